/// Per-artifact metadata documents.
pub(crate) mod record;
