use rand::{SeedableRng, rngs::StdRng};

use crate::{
    catalog::discover::Catalog,
    foundation::error::{LayermintError, LayermintResult},
    generate::config::{DEFAULT_PROGRESS_EVERY, GeneratorConfig},
    metadata::record::{CollectionInfo, MetadataRecord},
    output::sink::{ArtifactSink, FsArtifactSink},
    render::{composite::render_combination, source::FsLayerSource, source::LayerSource},
    sample::{
        plan::{CapacityPlan, SampleLimits, check_capacity, resolve_seed, select as draw},
        universe::{Combination, Universe},
    },
};

#[derive(Clone, Debug)]
/// Run parameters for [`Generator`].
pub struct GeneratorOpts {
    /// Number of unique artifacts to produce.
    pub collection_size: u64,
    /// Shuffle seed; drawn from entropy when `None`.
    pub seed: Option<u64>,
    /// Capacity bounds.
    pub limits: SampleLimits,
    /// Artifacts between progress log lines.
    pub progress_every: u64,
    /// Strings stamped into every record.
    pub collection: CollectionInfo,
}

impl GeneratorOpts {
    /// Options with default limits and cadence.
    pub fn new(collection_size: u64, collection: CollectionInfo) -> Self {
        Self {
            collection_size,
            seed: None,
            limits: SampleLimits::default(),
            progress_every: DEFAULT_PROGRESS_EVERY,
            collection,
        }
    }

    /// Set a fixed seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl From<&GeneratorConfig> for GeneratorOpts {
    fn from(cfg: &GeneratorConfig) -> Self {
        Self {
            collection_size: cfg.collection_size,
            seed: cfg.seed,
            limits: cfg.limits(),
            progress_every: cfg.progress_every,
            collection: cfg.collection.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Observer events, in emission order: one `Planned`, one `Rendered` per artifact, one
/// `Finished`.
pub enum ProgressEvent {
    /// Capacity checked and selection drawn; nothing written yet.
    Planned {
        /// Artifacts that will be produced.
        requested: u64,
        /// Size of the trait space.
        max_combinations: u64,
        /// True when the saturation threshold was crossed.
        saturated: bool,
        /// Seed used for the shuffle.
        seed: u64,
    },
    /// Image and metadata for `index` were handed to the sink.
    Rendered {
        /// 0-based artifact index.
        index: u64,
        /// Total artifacts in this run.
        total: u64,
    },
    /// All artifacts written.
    Finished {
        /// Artifacts produced.
        produced: u64,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Summary of a completed run.
pub struct GenerationReport {
    /// Artifacts produced.
    pub produced: u64,
    /// Size of the trait space.
    pub max_combinations: u64,
    /// True when the saturation threshold was crossed.
    pub saturated: bool,
    /// Seed used for the shuffle; pass it back to reproduce the run.
    pub seed: u64,
}

#[derive(Clone, Debug)]
/// Combinations chosen for a run, in output order.
pub struct Selection {
    /// Capacity check outcome.
    pub plan: CapacityPlan,
    /// Seed used for the shuffle.
    pub seed: u64,
    /// Chosen combinations; position is the artifact index.
    pub combinations: Vec<Combination>,
}

/// Samples unique combinations from a catalog and renders each as an artifact.
#[derive(Debug)]
pub struct Generator<'a> {
    catalog: &'a Catalog,
    opts: GeneratorOpts,
}

impl<'a> Generator<'a> {
    /// Bind options to a catalog.
    pub fn new(catalog: &'a Catalog, opts: GeneratorOpts) -> LayermintResult<Self> {
        if opts.progress_every == 0 {
            return Err(LayermintError::configuration("progress_every must be > 0"));
        }
        opts.collection.validate()?;
        Ok(Self { catalog, opts })
    }

    /// The catalog being sampled.
    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    /// Check capacity, then shuffle the full trait space and keep the first
    /// `collection_size` entries. Performs no IO.
    #[tracing::instrument(skip(self), fields(requested = self.opts.collection_size))]
    pub fn select(&self) -> LayermintResult<Selection> {
        let plan = check_capacity(self.catalog, self.opts.collection_size, self.opts.limits)?;
        let seed = resolve_seed(self.opts.seed);
        tracing::info!(
            max_combinations = plan.max_combinations,
            seed,
            "planned generation"
        );

        let combinations = if plan.requested == 0 {
            Vec::new()
        } else {
            let universe = Universe::new(self.catalog)?;
            let mut rng = StdRng::seed_from_u64(seed);
            draw(&universe, plan.requested, &mut rng)?
        };

        Ok(Selection {
            plan,
            seed,
            combinations,
        })
    }

    /// Select, render, and write every artifact.
    ///
    /// Capacity and configuration errors surface before `sink.begin` is called. A failure
    /// mid-run aborts immediately; artifacts already written stay in the sink.
    pub fn generate(
        &self,
        source: &mut dyn LayerSource,
        sink: &mut dyn ArtifactSink,
        progress: &mut dyn FnMut(&ProgressEvent),
    ) -> LayermintResult<GenerationReport> {
        let selection = self.select()?;
        let total = selection.plan.requested;

        progress(&ProgressEvent::Planned {
            requested: total,
            max_combinations: selection.plan.max_combinations,
            saturated: selection.plan.saturated,
            seed: selection.seed,
        });

        sink.begin(total)?;
        for (index, combination) in (0u64..).zip(&selection.combinations) {
            let artwork = render_combination(self.catalog, combination, source)?;
            sink.write_image(index, &artwork)?;

            let record = MetadataRecord::for_combination(
                index,
                combination,
                self.catalog,
                &self.opts.collection,
            )?;
            sink.write_metadata(index, &record)?;

            let done = index + 1;
            if done % self.opts.progress_every == 0 {
                tracing::info!("generated {done}/{total} artifacts");
            }
            progress(&ProgressEvent::Rendered { index, total });
        }
        sink.end()?;

        progress(&ProgressEvent::Finished { produced: total });
        tracing::info!(produced = total, "generation complete");

        Ok(GenerationReport {
            produced: total,
            max_combinations: selection.plan.max_combinations,
            saturated: selection.plan.saturated,
            seed: selection.seed,
        })
    }
}

/// Discover layers on disk and write artifacts to the configured directories.
#[tracing::instrument(skip(cfg), fields(layers_dir = %cfg.layers_dir.display()))]
pub fn generate_from_config(cfg: &GeneratorConfig) -> LayermintResult<GenerationReport> {
    cfg.validate()?;
    let catalog = Catalog::discover(&cfg.layers_dir, &cfg.layer_order, &cfg.extensions)?;

    let generator = Generator::new(&catalog, GeneratorOpts::from(cfg))?;
    let mut source = FsLayerSource::new();
    let mut sink = FsArtifactSink::new(&cfg.images_dir, &cfg.metadata_dir);

    generator.generate(&mut source, &mut sink, &mut |_| {})
}

#[cfg(test)]
#[path = "../../tests/unit/generate/generator.rs"]
mod tests;
