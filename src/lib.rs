//! layermint is an offline toolkit for releasing a layered-art NFT collection.
//!
//! The core is a generator that turns a directory of trait layers into a fixed number of unique
//! artworks plus matching metadata documents:
//!
//! 1. **Discover**: `layers/<Category>/<option>.png -> Catalog` (categories in layer order)
//! 2. **Select**: shuffle the full Cartesian product and keep the first `collection_size`
//! 3. **Render**: stack each combination's layers with source-over blending
//! 4. **Write**: hand `<index>.png` and `<index>.json` to an [`ArtifactSink`]
//!
//! Two small tools cover the rest of a release: [`rewrite_image_prefix`] repoints metadata
//! image URLs once assets are uploaded, and [`rewrite_manifest_file`] strips `.json` from path
//! manifest keys.
//!
//! Everything runs single-threaded and in memory. [`Generator`] takes its image reader and
//! artifact writer as trait objects, so runs can be tested without touching the file system.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod catalog;
mod foundation;
mod generate;
mod metadata;
mod output;
mod render;
mod sample;
mod tools;

pub use catalog::discover::{Catalog, DEFAULT_EXTENSIONS, TraitCategory, TraitOption};
pub use foundation::error::{LayermintError, LayermintResult};
pub use generate::config::{DEFAULT_PROGRESS_EVERY, GeneratorConfig};
pub use generate::generator::{
    GenerationReport, Generator, GeneratorOpts, ProgressEvent, Selection, generate_from_config,
};
pub use metadata::record::{Attribute, CollectionInfo, INDEX_PLACEHOLDER, MetadataRecord};
pub use output::sink::{ArtifactSink, FsArtifactSink, InMemorySink};
pub use render::composite::{
    Artwork, Rgba8, composite_layers, over, over_in_place, render_combination,
};
pub use render::decode::{LayerImage, decode_layer, encode_png};
pub use render::source::{FsLayerSource, InMemoryLayerSource, LayerSource};
pub use sample::plan::{
    CapacityPlan, DEFAULT_MAX_UNIVERSE, DEFAULT_SATURATION_WARNING, SampleLimits,
    check_capacity, resolve_seed, select,
};
pub use sample::universe::{Combination, Universe};
pub use tools::manifest::{
    MANIFEST_KIND, MANIFEST_VERSION, PathManifest, rewrite_manifest_file,
};
pub use tools::rewrite_urls::{
    RewriteOpts, RewriteReport, rewrite_document, rewrite_image_prefix, rewrite_prefix,
};
