/// JSON configuration for a generation run.
pub(crate) mod config;
/// The sample-render-write batch.
pub(crate) mod generator;
