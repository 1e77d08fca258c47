use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
};

use anyhow::Context as _;

use crate::foundation::error::{LayermintError, LayermintResult};

/// Default file extensions considered trait images.
pub const DEFAULT_EXTENSIONS: &[&str] = &["png"];

#[derive(Clone, Debug, PartialEq, Eq)]
/// One candidate image for a category.
pub struct TraitOption {
    /// Identifier written into metadata (file name without extension).
    pub id: String,
    /// Where the image bytes live. For in-memory catalogs this is just a lookup key.
    pub source: PathBuf,
}

impl TraitOption {
    /// Build an option with an explicit identifier.
    pub fn new(id: impl Into<String>, source: impl Into<PathBuf>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
        }
    }

    /// Build an option from a file path, deriving the identifier from the file stem.
    pub fn from_file(path: impl Into<PathBuf>) -> Option<Self> {
        let source = path.into();
        let id = source.file_stem()?.to_str()?.to_owned();
        if id.is_empty() {
            return None;
        }
        Some(Self { id, source })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// A named compositing slot with its ordered candidate options.
pub struct TraitCategory {
    /// Category name; doubles as `trait_type` in metadata.
    pub name: String,
    /// Position in the layer order. Lower ordinals are drawn first.
    pub ordinal: usize,
    /// Candidate options, sorted by source file name when discovered.
    pub options: Vec<TraitOption>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Immutable, validated set of categories in compositing order.
pub struct Catalog {
    categories: Vec<TraitCategory>,
}

impl Catalog {
    /// Build a catalog from `(category name, options)` pairs in layer order.
    ///
    /// Rejects an empty layer order, duplicate category names, categories without options, and
    /// two options sharing an identifier within one category (e.g. `A.png` and `A.PNG`).
    pub fn new(layers: Vec<(String, Vec<TraitOption>)>) -> LayermintResult<Self> {
        if layers.is_empty() {
            return Err(LayermintError::configuration(
                "layer order must name at least one category",
            ));
        }

        let mut seen = BTreeSet::new();
        let mut categories = Vec::with_capacity(layers.len());
        for (ordinal, (name, options)) in layers.into_iter().enumerate() {
            if !seen.insert(name.clone()) {
                return Err(LayermintError::configuration(format!(
                    "category '{name}' appears more than once in the layer order"
                )));
            }
            if options.is_empty() {
                return Err(LayermintError::configuration(format!(
                    "category '{name}' has no trait options"
                )));
            }
            let mut ids: BTreeMap<&str, &Path> = BTreeMap::new();
            for option in &options {
                if let Some(first) = ids.insert(&option.id, &option.source) {
                    return Err(LayermintError::configuration(format!(
                        "category '{name}' has two options named '{}': '{}' and '{}'",
                        option.id,
                        first.display(),
                        option.source.display()
                    )));
                }
            }
            categories.push(TraitCategory {
                name,
                ordinal,
                options,
            });
        }

        Ok(Self { categories })
    }

    /// Build an in-memory catalog from option identifiers; sources are `<category>/<id>`.
    pub fn from_ids<S: AsRef<str>>(layers: &[(&str, &[S])]) -> LayermintResult<Self> {
        Self::new(
            layers
                .iter()
                .map(|(name, ids)| {
                    let options = ids
                        .iter()
                        .map(|id| {
                            let id = id.as_ref();
                            TraitOption::new(id, Path::new(name).join(id))
                        })
                        .collect();
                    ((*name).to_owned(), options)
                })
                .collect(),
        )
    }

    /// Scan `base_dir/<category>` for each category in `layer_order`.
    ///
    /// Files are eligible when their extension matches one of `extensions`
    /// (case-insensitive). Options are sorted by file name so that enumeration order only
    /// depends on directory contents.
    #[tracing::instrument(skip_all, fields(base_dir = %base_dir.display()))]
    pub fn discover(
        base_dir: &Path,
        layer_order: &[String],
        extensions: &[String],
    ) -> LayermintResult<Self> {
        if layer_order.is_empty() {
            return Err(LayermintError::configuration(
                "layer order must name at least one category",
            ));
        }

        let mut layers = Vec::with_capacity(layer_order.len());
        for name in layer_order {
            let dir = base_dir.join(name);
            if !dir.is_dir() {
                return Err(LayermintError::configuration(format!(
                    "category '{name}' has no directory at '{}'",
                    dir.display()
                )));
            }

            let options = scan_category_dir(&dir, extensions)?;
            if options.is_empty() {
                return Err(LayermintError::configuration(format!(
                    "no images found for category '{name}' in '{}'",
                    dir.display()
                )));
            }
            tracing::info!(category = %name, options = options.len(), "discovered layer");
            layers.push((name.clone(), options));
        }

        Self::new(layers)
    }

    /// Categories in layer order.
    pub fn categories(&self) -> &[TraitCategory] {
        &self.categories
    }

    /// Number of categories.
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Always false for a validated catalog; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Option counts per category, in layer order.
    pub fn option_counts(&self) -> Vec<usize> {
        self.categories.iter().map(|c| c.options.len()).collect()
    }

    /// Size of the full Cartesian product, or `None` if it does not fit in a `u64`.
    pub fn max_combinations(&self) -> Option<u64> {
        self.categories.iter().try_fold(1u64, |acc, c| {
            acc.checked_mul(u64::try_from(c.options.len()).ok()?)
        })
    }

    /// Look up one option by category ordinal and option index.
    pub fn option(&self, category: usize, option: usize) -> LayermintResult<&TraitOption> {
        self.categories
            .get(category)
            .and_then(|c| c.options.get(option))
            .ok_or_else(|| {
                LayermintError::configuration(format!(
                    "no option {option} in category ordinal {category}"
                ))
            })
    }
}

fn scan_category_dir(dir: &Path, extensions: &[String]) -> LayermintResult<Vec<TraitOption>> {
    let entries =
        std::fs::read_dir(dir).with_context(|| format!("read layer dir '{}'", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("read entry in '{}'", dir.display()))?;
        let path = entry.path();
        if path.is_file() && has_eligible_extension(&path, extensions) {
            files.push(path);
        }
    }
    files.sort();

    files
        .into_iter()
        .map(|path| {
            TraitOption::from_file(&path).ok_or_else(|| {
                LayermintError::configuration(format!(
                    "trait image '{}' has no usable UTF-8 name",
                    path.display()
                ))
            })
        })
        .collect()
}

fn has_eligible_extension(path: &Path, extensions: &[String]) -> bool {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return false;
    };
    extensions
        .iter()
        .any(|want| want.trim_start_matches('.').eq_ignore_ascii_case(ext))
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/discover.rs"]
mod tests;
