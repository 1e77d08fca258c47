/// Source-over compositing of trait layers.
pub(crate) mod composite;
/// Image decoding and PNG encoding.
pub(crate) mod decode;
/// Where trait layer pixels come from.
pub(crate) mod source;
