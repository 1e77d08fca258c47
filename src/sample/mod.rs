/// Capacity checks and uniform selection without replacement.
pub(crate) mod plan;
/// The Cartesian product of a catalog, addressed by rank.
pub(crate) mod universe;
