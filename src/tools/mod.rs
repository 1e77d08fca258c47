/// Path manifest key rewriting.
pub(crate) mod manifest;
/// Bulk image URL prefix rewriting across metadata files.
pub(crate) mod rewrite_urls;
