use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;

use crate::{
    catalog::discover::DEFAULT_EXTENSIONS,
    foundation::error::{LayermintError, LayermintResult},
    metadata::record::CollectionInfo,
    sample::plan::{DEFAULT_MAX_UNIVERSE, DEFAULT_SATURATION_WARNING, SampleLimits},
};

/// Default number of artifacts between progress log lines.
pub const DEFAULT_PROGRESS_EVERY: u64 = 100;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
/// Everything a generation run needs, as read from a JSON file.
pub struct GeneratorConfig {
    /// Number of unique artifacts to produce.
    pub collection_size: u64,
    /// Category names, bottom layer first.
    pub layer_order: Vec<String>,
    /// Directory holding one subdirectory per category.
    pub layers_dir: PathBuf,
    /// Where `<index>.png` files go.
    pub images_dir: PathBuf,
    /// Where `<index>.json` files go.
    pub metadata_dir: PathBuf,
    /// Strings stamped into every metadata record.
    pub collection: CollectionInfo,
    /// Shuffle seed; a fresh one is drawn and logged when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Eligible trait image extensions, compared case-insensitively.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    /// Fraction of the trait space above which a saturation warning is logged.
    #[serde(default = "default_saturation_warning")]
    pub saturation_warning: f64,
    /// Largest trait space that will be enumerated.
    #[serde(default = "default_max_universe")]
    pub max_universe: u64,
    /// Artifacts between progress log lines.
    #[serde(default = "default_progress_every")]
    pub progress_every: u64,
}

fn default_extensions() -> Vec<String> {
    DEFAULT_EXTENSIONS.iter().map(|s| (*s).to_owned()).collect()
}

fn default_saturation_warning() -> f64 {
    DEFAULT_SATURATION_WARNING
}

fn default_max_universe() -> u64 {
    DEFAULT_MAX_UNIVERSE
}

fn default_progress_every() -> u64 {
    DEFAULT_PROGRESS_EVERY
}

impl GeneratorConfig {
    /// Read, resolve, and validate a config file.
    ///
    /// Relative paths inside the file are resolved against the file's directory.
    pub fn from_path(path: impl AsRef<Path>) -> LayermintResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
        let mut cfg: Self = serde_json::from_reader(BufReader::new(f)).map_err(|e| {
            LayermintError::serde(format!("parse config '{}': {e}", path.display()))
        })?;

        let base = path.parent().unwrap_or_else(|| Path::new("."));
        cfg.resolve_paths(base);
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse and validate config JSON, resolving relative paths against `base`.
    pub fn from_json_str(json: &str, base: &Path) -> LayermintResult<Self> {
        let mut cfg: Self =
            serde_json::from_str(json).map_err(|e| LayermintError::serde(e.to_string()))?;
        cfg.resolve_paths(base);
        cfg.validate()?;
        Ok(cfg)
    }

    /// Make every relative directory absolute with respect to `base`.
    pub fn resolve_paths(&mut self, base: &Path) {
        for dir in [
            &mut self.layers_dir,
            &mut self.images_dir,
            &mut self.metadata_dir,
        ] {
            if dir.is_relative() {
                *dir = base.join(&*dir);
            }
        }
    }

    /// Check field ranges. Does not touch the file system.
    pub fn validate(&self) -> LayermintResult<()> {
        if self.layer_order.is_empty() {
            return Err(LayermintError::configuration(
                "layer_order must name at least one category",
            ));
        }
        if self.layer_order.iter().any(|n| n.trim().is_empty()) {
            return Err(LayermintError::configuration(
                "layer_order entries must be non-empty",
            ));
        }
        if self.extensions.is_empty() {
            return Err(LayermintError::configuration(
                "extensions must list at least one file extension",
            ));
        }
        if !(self.saturation_warning > 0.0 && self.saturation_warning <= 1.0) {
            return Err(LayermintError::configuration(format!(
                "saturation_warning must be in (0, 1], got {}",
                self.saturation_warning
            )));
        }
        if self.max_universe == 0 {
            return Err(LayermintError::configuration("max_universe must be > 0"));
        }
        if self.progress_every == 0 {
            return Err(LayermintError::configuration("progress_every must be > 0"));
        }
        self.collection.validate()
    }

    /// Sampling bounds derived from this config.
    pub fn limits(&self) -> SampleLimits {
        SampleLimits {
            saturation_warning: self.saturation_warning,
            max_universe: self.max_universe,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/generate/config.rs"]
mod tests;
