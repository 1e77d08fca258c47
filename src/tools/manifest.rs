use std::{collections::BTreeMap, fs::File, io::BufReader, path::Path};

use anyhow::Context as _;

use crate::foundation::error::{LayermintError, LayermintResult};

/// `manifest` field written into rewritten manifests.
pub const MANIFEST_KIND: &str = "arweave/paths";
/// `version` field written into rewritten manifests.
pub const MANIFEST_VERSION: &str = "0.2.0";

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A path manifest mapping request paths to uploaded entries.
pub struct PathManifest {
    /// Manifest kind tag.
    #[serde(default)]
    pub manifest: String,
    /// Manifest format version.
    #[serde(default)]
    pub version: String,
    /// Root entry, if any. Inputs may carry `{"path": ..}` or `{"id": ..}`; it is read as
    /// opaque JSON because rewriting always replaces it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<serde_json::Value>,
    /// Path to entry (typically `{"id": "<tx>"}`); entries are carried through untouched.
    pub paths: BTreeMap<String, serde_json::Value>,
}

impl PathManifest {
    /// Copy of this manifest with `.json` stripped from every path key and a fixed header.
    ///
    /// Fails if two keys collapse to the same name.
    pub fn rewrite_keys(&self) -> LayermintResult<Self> {
        let mut paths = BTreeMap::new();
        for (key, entry) in &self.paths {
            let stripped = key.strip_suffix(".json").unwrap_or(key).to_owned();
            if paths.insert(stripped.clone(), entry.clone()).is_some() {
                return Err(LayermintError::configuration(format!(
                    "manifest key '{key}' collides with an existing path '{stripped}'"
                )));
            }
        }

        Ok(Self {
            manifest: MANIFEST_KIND.to_owned(),
            version: MANIFEST_VERSION.to_owned(),
            index: Some(serde_json::json!({ "path": "0" })),
            paths,
        })
    }
}

/// Read `input`, rewrite its keys, write pretty JSON to `output`. Returns the path count.
#[tracing::instrument(skip_all, fields(input = %input.display(), output = %output.display()))]
pub fn rewrite_manifest_file(input: &Path, output: &Path) -> LayermintResult<usize> {
    let f = File::open(input).with_context(|| format!("open manifest '{}'", input.display()))?;
    let manifest: PathManifest = serde_json::from_reader(BufReader::new(f))
        .map_err(|e| LayermintError::serde(format!("parse manifest '{}': {e}", input.display())))?;

    let rewritten = manifest.rewrite_keys()?;
    let json = serde_json::to_string_pretty(&rewritten)
        .map_err(|e| LayermintError::serde(e.to_string()))?;

    if let Some(parent) = output.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(output, json)
        .with_context(|| format!("write manifest '{}'", output.display()))?;

    tracing::info!(paths = rewritten.paths.len(), "updated manifest");
    Ok(rewritten.paths.len())
}

#[cfg(test)]
#[path = "../../tests/unit/tools/manifest.rs"]
mod tests;
