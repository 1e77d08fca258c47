use std::{
    collections::{BTreeMap, HashMap},
    path::PathBuf,
};

use anyhow::Context as _;

use crate::{
    catalog::discover::TraitOption,
    foundation::error::{LayermintError, LayermintResult},
    render::decode::{LayerImage, decode_layer},
};

/// Supplies decoded pixels for trait options.
pub trait LayerSource {
    /// Load the pixels of `option`, which belongs to `category`.
    fn load(&mut self, category: &str, option: &TraitOption) -> LayermintResult<LayerImage>;
}

/// Reads trait images from disk, decoding each file at most once per source.
#[derive(Debug, Default)]
pub struct FsLayerSource {
    cache: HashMap<PathBuf, LayerImage>,
    decodes: BTreeMap<PathBuf, u32>,
}

impl FsLayerSource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// How many times `path` has been decoded. Used to verify caching.
    pub fn decode_count(&self, path: &std::path::Path) -> u32 {
        self.decodes.get(path).copied().unwrap_or(0)
    }
}

impl LayerSource for FsLayerSource {
    fn load(&mut self, category: &str, option: &TraitOption) -> LayermintResult<LayerImage> {
        if let Some(hit) = self.cache.get(&option.source) {
            return Ok(hit.clone());
        }

        let bytes = std::fs::read(&option.source).with_context(|| {
            format!(
                "read trait image '{}' for category '{category}'",
                option.source.display()
            )
        })?;
        let layer = decode_layer(&bytes).map_err(|e| {
            LayermintError::render(format!("'{}': {e}", option.source.display()))
        })?;

        *self.decodes.entry(option.source.clone()).or_default() += 1;
        self.cache.insert(option.source.clone(), layer.clone());
        Ok(layer)
    }
}

/// Pixels registered in memory, keyed by category and option id.
#[derive(Debug, Default)]
pub struct InMemoryLayerSource {
    layers: BTreeMap<(String, String), LayerImage>,
}

impl InMemoryLayerSource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register pixels for `category`/`id`, replacing any previous entry.
    pub fn insert(&mut self, category: impl Into<String>, id: impl Into<String>, layer: LayerImage) {
        self.layers.insert((category.into(), id.into()), layer);
    }

    /// Builder-style [`InMemoryLayerSource::insert`].
    pub fn with(mut self, category: impl Into<String>, id: impl Into<String>, layer: LayerImage) -> Self {
        self.insert(category, id, layer);
        self
    }
}

impl LayerSource for InMemoryLayerSource {
    fn load(&mut self, category: &str, option: &TraitOption) -> LayermintResult<LayerImage> {
        self.layers
            .get(&(category.to_owned(), option.id.clone()))
            .cloned()
            .ok_or_else(|| {
                LayermintError::render(format!(
                    "no pixels registered for '{category}/{}'",
                    option.id
                ))
            })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/source.rs"]
mod tests;
