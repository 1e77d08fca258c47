use crate::{
    catalog::discover::{Catalog, TraitOption},
    foundation::error::{LayermintError, LayermintResult},
};

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
/// One option index per category, in layer order.
pub struct Combination(Vec<usize>);

impl Combination {
    /// Wrap raw option indices. Callers are responsible for matching the catalog shape.
    pub fn new(indices: Vec<usize>) -> Self {
        Self(indices)
    }

    /// Option index per category.
    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    /// Number of categories covered.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no category is covered.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Resolve indices against `catalog`, failing if the shape does not match.
    pub fn resolve<'a>(&self, catalog: &'a Catalog) -> LayermintResult<Vec<&'a TraitOption>> {
        if self.0.len() != catalog.len() {
            return Err(LayermintError::configuration(format!(
                "combination covers {} categories but the catalog has {}",
                self.0.len(),
                catalog.len()
            )));
        }
        self.0
            .iter()
            .enumerate()
            .map(|(category, &option)| catalog.option(category, option))
            .collect()
    }

    /// Option identifiers in layer order.
    pub fn ids<'a>(&self, catalog: &'a Catalog) -> LayermintResult<Vec<&'a str>> {
        Ok(self
            .resolve(catalog)?
            .into_iter()
            .map(|o| o.id.as_str())
            .collect())
    }
}

/// The full Cartesian product of a catalog.
///
/// Combinations are numbered by rank in lexicographic order, first category most
/// significant, so rank 0 is every category's first option and the last rank is every
/// category's last option.
#[derive(Clone, Debug)]
pub struct Universe {
    radices: Vec<u64>,
    len: u64,
}

impl Universe {
    /// Build the universe for `catalog`. Fails if its size does not fit in a `u64`.
    pub fn new(catalog: &Catalog) -> LayermintResult<Self> {
        let len = catalog.max_combinations().ok_or_else(|| {
            LayermintError::capacity("trait space does not fit in a 64-bit combination count")
        })?;
        let radices = catalog.option_counts().into_iter().map(|n| n as u64).collect();
        Ok(Self { radices, len })
    }

    /// Number of distinct combinations.
    pub fn len(&self) -> u64 {
        self.len
    }

    /// True if the universe holds no combinations.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Decode a rank into per-category option indices.
    pub fn combination(&self, rank: u64) -> LayermintResult<Combination> {
        if rank >= self.len {
            return Err(LayermintError::capacity(format!(
                "rank {rank} is outside a universe of {}",
                self.len
            )));
        }
        let mut indices = vec![0usize; self.radices.len()];
        let mut rest = rank;
        for (slot, &radix) in indices.iter_mut().zip(&self.radices).rev() {
            *slot = (rest % radix) as usize;
            rest /= radix;
        }
        Ok(Combination(indices))
    }

    /// Every combination in rank order.
    pub fn iter(&self) -> impl Iterator<Item = Combination> + '_ {
        (0..self.len).filter_map(|rank| self.combination(rank).ok())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sample/universe.rs"]
mod tests;
