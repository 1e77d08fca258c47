/// Trait categories, their options, and filesystem discovery.
pub(crate) mod discover;
