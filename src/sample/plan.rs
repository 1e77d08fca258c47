use rand::{Rng, seq::SliceRandom};

use crate::{
    catalog::discover::Catalog,
    foundation::error::{LayermintError, LayermintResult},
    sample::universe::{Combination, Universe},
};

/// Fraction of the universe above which a request is reported as saturated.
pub const DEFAULT_SATURATION_WARNING: f64 = 0.8;

/// Largest universe the sampler will enumerate in memory.
pub const DEFAULT_MAX_UNIVERSE: u64 = 50_000_000;

#[derive(Clone, Copy, Debug, PartialEq)]
/// Bounds applied before any combination is enumerated.
pub struct SampleLimits {
    /// Saturation threshold in `(0, 1]`. Purely advisory.
    pub saturation_warning: f64,
    /// Upper bound on the number of combinations materialized at once.
    pub max_universe: u64,
}

impl Default for SampleLimits {
    fn default() -> Self {
        Self {
            saturation_warning: DEFAULT_SATURATION_WARNING,
            max_universe: DEFAULT_MAX_UNIVERSE,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Outcome of a successful capacity check.
pub struct CapacityPlan {
    /// Number of unique combinations requested.
    pub requested: u64,
    /// Size of the full Cartesian product (saturates at `u64::MAX`).
    pub max_combinations: u64,
    /// True when the request crosses the saturation threshold.
    pub saturated: bool,
}

/// Check that `requested` unique combinations can be drawn from `catalog` within `limits`.
pub fn check_capacity(
    catalog: &Catalog,
    requested: u64,
    limits: SampleLimits,
) -> LayermintResult<CapacityPlan> {
    let max = catalog.max_combinations();

    if let Some(max) = max
        && requested > max
    {
        return Err(LayermintError::capacity(format!(
            "cannot generate {requested} unique combinations; maximum possible is {max}"
        )));
    }

    let max_combinations = max.unwrap_or(u64::MAX);
    if requested > 0 && max_combinations > limits.max_universe {
        return Err(LayermintError::capacity(format!(
            "trait space of {max_combinations} combinations exceeds the enumeration limit of {}",
            limits.max_universe
        )));
    }

    let saturated = requested as f64 > limits.saturation_warning * max_combinations as f64;
    if saturated {
        tracing::warn!(
            requested,
            max_combinations,
            percent = %format!("{:.1}", requested as f64 / max_combinations as f64 * 100.0),
            "request is close to the number of possible combinations; consider adding trait variety"
        );
    }

    Ok(CapacityPlan {
        requested,
        max_combinations,
        saturated,
    })
}

/// Draw `count` distinct combinations uniformly at random.
///
/// The whole universe is materialized as ranks, shuffled, and truncated, so the result has no
/// duplicates by construction. The returned order is the shuffled order.
pub fn select<R: Rng + ?Sized>(
    universe: &Universe,
    count: u64,
    rng: &mut R,
) -> LayermintResult<Vec<Combination>> {
    if count > universe.len() {
        return Err(LayermintError::capacity(format!(
            "cannot select {count} of {} combinations",
            universe.len()
        )));
    }

    let mut ranks: Vec<u64> = (0..universe.len()).collect();
    ranks.shuffle(rng);
    ranks.truncate(count as usize);

    ranks
        .into_iter()
        .map(|rank| universe.combination(rank))
        .collect()
}

/// Pick the seed for a run: the configured one, or fresh entropy.
pub fn resolve_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(|| rand::rng().random())
}

#[cfg(test)]
#[path = "../../tests/unit/sample/plan.rs"]
mod tests;
