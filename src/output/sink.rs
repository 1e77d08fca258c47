use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use anyhow::Context as _;

use crate::{
    foundation::error::LayermintResult, metadata::record::MetadataRecord,
    render::composite::Artwork,
};

/// Sink contract for consuming artifacts in index order.
///
/// Ordering contract: for each index, `write_image` is called before `write_metadata`, and
/// indices are strictly increasing from 0.
pub trait ArtifactSink {
    /// Called once before any artifact, with the number of artifacts that will follow.
    fn begin(&mut self, planned: u64) -> LayermintResult<()>;
    /// Persist the rendered image for `index`.
    fn write_image(&mut self, index: u64, artwork: &Artwork) -> LayermintResult<()>;
    /// Persist the metadata record for `index`.
    fn write_metadata(&mut self, index: u64, record: &MetadataRecord) -> LayermintResult<()>;
    /// Called once after the last artifact.
    fn end(&mut self) -> LayermintResult<()>;
}

/// Writes `<index>.png` and `<index>.json` into two directories.
#[derive(Clone, Debug)]
pub struct FsArtifactSink {
    images_dir: PathBuf,
    metadata_dir: PathBuf,
}

impl FsArtifactSink {
    /// Create a sink; directories are created in `begin`.
    pub fn new(images_dir: impl Into<PathBuf>, metadata_dir: impl Into<PathBuf>) -> Self {
        Self {
            images_dir: images_dir.into(),
            metadata_dir: metadata_dir.into(),
        }
    }

    /// Path of the image written for `index`.
    pub fn image_path(&self, index: u64) -> PathBuf {
        self.images_dir.join(format!("{index}.png"))
    }

    /// Path of the metadata written for `index`.
    pub fn metadata_path(&self, index: u64) -> PathBuf {
        self.metadata_dir.join(format!("{index}.json"))
    }

    /// Image output directory.
    pub fn images_dir(&self) -> &Path {
        &self.images_dir
    }

    /// Metadata output directory.
    pub fn metadata_dir(&self) -> &Path {
        &self.metadata_dir
    }
}

impl ArtifactSink for FsArtifactSink {
    fn begin(&mut self, _planned: u64) -> LayermintResult<()> {
        for dir in [&self.images_dir, &self.metadata_dir] {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("create output dir '{}'", dir.display()))?;
        }
        Ok(())
    }

    fn write_image(&mut self, index: u64, artwork: &Artwork) -> LayermintResult<()> {
        let path = self.image_path(index);
        let png = artwork.to_png()?;
        std::fs::write(&path, png).with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }

    fn write_metadata(&mut self, index: u64, record: &MetadataRecord) -> LayermintResult<()> {
        let path = self.metadata_path(index);
        let json = record.to_json_pretty()?;
        std::fs::write(&path, json)
            .with_context(|| format!("write metadata '{}'", path.display()))?;
        Ok(())
    }

    fn end(&mut self) -> LayermintResult<()> {
        Ok(())
    }
}

/// In-memory sink for tests and dry runs.
#[derive(Debug, Default)]
pub struct InMemorySink {
    planned: Option<u64>,
    finished: bool,
    images: BTreeMap<u64, Artwork>,
    records: BTreeMap<u64, MetadataRecord>,
}

impl InMemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count announced in `begin`, if it was called.
    pub fn planned(&self) -> Option<u64> {
        self.planned
    }

    /// True once `end` has been called.
    pub fn finished(&self) -> bool {
        self.finished
    }

    /// Captured images by index.
    pub fn images(&self) -> &BTreeMap<u64, Artwork> {
        &self.images
    }

    /// Captured metadata records by index.
    pub fn records(&self) -> &BTreeMap<u64, MetadataRecord> {
        &self.records
    }
}

impl ArtifactSink for InMemorySink {
    fn begin(&mut self, planned: u64) -> LayermintResult<()> {
        self.planned = Some(planned);
        self.finished = false;
        self.images.clear();
        self.records.clear();
        Ok(())
    }

    fn write_image(&mut self, index: u64, artwork: &Artwork) -> LayermintResult<()> {
        self.images.insert(index, artwork.clone());
        Ok(())
    }

    fn write_metadata(&mut self, index: u64, record: &MetadataRecord) -> LayermintResult<()> {
        self.records.insert(index, record.clone());
        Ok(())
    }

    fn end(&mut self) -> LayermintResult<()> {
        self.finished = true;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/output/sink.rs"]
mod tests;
