/// Artifact sinks: where rendered images and metadata records go.
pub(crate) mod sink;
