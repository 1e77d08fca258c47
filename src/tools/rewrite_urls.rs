use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::error::{LayermintError, LayermintResult};

#[derive(Clone, Debug)]
/// Parameters for [`rewrite_image_prefix`].
pub struct RewriteOpts {
    /// Directory scanned (non-recursively) for `*.json` files.
    pub input_dir: PathBuf,
    /// Destination directory; may equal `input_dir` for an in-place rewrite.
    pub output_dir: PathBuf,
    /// Prefix to replace at the start of `image`.
    pub old_prefix: String,
    /// Replacement prefix.
    pub new_prefix: String,
}

impl RewriteOpts {
    /// Check the prefix pair before touching any file.
    ///
    /// `old_prefix` must be non-empty and must not extend `new_prefix`. With
    /// `https://cdn/v2/ -> https://cdn/`, the URL `https://cdn/v2/v2/1.png` becomes
    /// `https://cdn/v2/1.png`, which still starts with `old_prefix` and would be shortened
    /// again on the next pass.
    pub fn validate(&self) -> LayermintResult<()> {
        if self.old_prefix.is_empty() {
            return Err(LayermintError::configuration("old prefix must be non-empty"));
        }
        if self.old_prefix != self.new_prefix && self.old_prefix.starts_with(&self.new_prefix) {
            return Err(LayermintError::configuration(format!(
                "old prefix '{}' extends new prefix '{}'; the rewrite would not be idempotent",
                self.old_prefix, self.new_prefix
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Counts from a rewrite pass.
pub struct RewriteReport {
    /// JSON files read.
    pub scanned: u64,
    /// Files whose `image` changed.
    pub rewritten: u64,
    /// Files written back unchanged.
    pub unchanged: u64,
}

/// Replace a leading `old` with `new` in `url`.
///
/// Returns `None` when nothing should change: `url` does not start with `old`, or it already
/// starts with `new` (which keeps the rewrite idempotent when `new` extends `old`).
///
/// The reverse pairing, where `old` extends `new`, is not idempotent: a rewritten URL can still
/// start with `old`. [`RewriteOpts::validate`] rejects it for directory rewrites.
pub fn rewrite_prefix(url: &str, old: &str, new: &str) -> Option<String> {
    if url.starts_with(new) && new.starts_with(old) {
        return None;
    }
    let rest = url.strip_prefix(old)?;
    Some(format!("{new}{rest}"))
}

/// Apply the prefix rewrite to one document's `image` field. Returns true if it changed.
pub fn rewrite_document(doc: &mut serde_json::Value, old: &str, new: &str) -> bool {
    let Some(image) = doc.get_mut("image") else {
        return false;
    };
    let Some(updated) = image.as_str().and_then(|url| rewrite_prefix(url, old, new)) else {
        return false;
    };
    *image = serde_json::Value::String(updated);
    true
}

/// Rewrite the `image` prefix of every metadata document in a directory.
#[tracing::instrument(skip(opts), fields(input = %opts.input_dir.display(), output = %opts.output_dir.display()))]
pub fn rewrite_image_prefix(opts: &RewriteOpts) -> LayermintResult<RewriteReport> {
    opts.validate()?;

    let files = list_json_files(&opts.input_dir)?;
    std::fs::create_dir_all(&opts.output_dir)
        .with_context(|| format!("create output dir '{}'", opts.output_dir.display()))?;

    let mut report = RewriteReport::default();
    for path in files {
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("read metadata '{}'", path.display()))?;
        let mut doc: serde_json::Value = serde_json::from_str(&text)
            .map_err(|e| LayermintError::serde(format!("parse '{}': {e}", path.display())))?;

        let changed = rewrite_document(&mut doc, &opts.old_prefix, &opts.new_prefix);
        report.scanned += 1;
        if changed {
            report.rewritten += 1;
        } else {
            report.unchanged += 1;
        }

        let Some(name) = path.file_name() else {
            continue;
        };
        let out_path = opts.output_dir.join(name);
        let json = serde_json::to_string_pretty(&doc)
            .map_err(|e| LayermintError::serde(format!("encode '{}': {e}", out_path.display())))?;
        std::fs::write(&out_path, json)
            .with_context(|| format!("write metadata '{}'", out_path.display()))?;

        tracing::debug!(file = %out_path.display(), changed, "processed metadata");
    }

    tracing::info!(
        scanned = report.scanned,
        rewritten = report.rewritten,
        "bulk update complete"
    );
    Ok(report)
}

fn list_json_files(dir: &Path) -> LayermintResult<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("read metadata dir '{}'", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry
            .with_context(|| format!("read entry in '{}'", dir.display()))?
            .path();
        if path.is_file() && path.extension().is_some_and(|e| e == "json") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
#[path = "../../tests/unit/tools/rewrite_urls.rs"]
mod tests;
