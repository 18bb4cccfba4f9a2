//! Simulation session state.
//!
//! A [`Simulation`] owns everything the simulator panel shows: the current
//! population, the latest sample and the accumulated sample means. Draws are
//! requested in batches and executed incrementally through [`Simulation::step`],
//! so an interactive front end can run a few draws per frame and repaint in
//! between. Headless callers use [`Simulation::run_batch`] instead.
//!
//! # Example
//!
//! ```
//! use cltlab_sim::{DistributionKind, PopulationConfig, Seed, Simulation};
//!
//! let mut sim = Simulation::with_seed(
//!     DistributionKind::SkewedRight,
//!     30,
//!     PopulationConfig::default(),
//!     Seed::from_u128(42),
//! )
//! .unwrap();
//!
//! sim.start_batch(100).unwrap();
//! while sim.step(10).is_some_and(|p| !p.is_done()) {}
//!
//! assert_eq!(sim.sample_means().len(), 100);
//! assert_eq!(sim.latest_sample().len(), 30);
//! ```

use std::ops::RangeInclusive;

use cltlab_stats::{descriptive::Summary, histogram::Histogram};
use rand::Rng as _;
use rand_pcg::Pcg32;

use crate::{
    DistributionKind, Population, PopulationConfig, PopulationError, Seed,
    sampler::{self, SampleError},
};

/// Sample sizes accepted by [`Simulation::set_sample_size`].
pub const SAMPLE_SIZE_RANGE: RangeInclusive<usize> = 2..=100;
/// Sample size a new session starts with in the interactive front end.
pub const DEFAULT_SAMPLE_SIZE: usize = 30;
/// Batch sizes offered by the simulator panel.
pub const BATCH_SIZES: [usize; 4] = [1, 10, 100, 1000];

/// Error returned when a simulation operation is rejected.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum SimulationError {
    #[display("a batch of draws is still running")]
    BatchInProgress,
    #[display("a batch must contain at least one draw")]
    EmptyBatch,
    #[display("sample size {size} is outside {}..={}", range.start(), range.end())]
    SampleSizeOutOfRange {
        size: usize,
        range: RangeInclusive<usize>,
    },
    #[display("{_0}")]
    #[from]
    Population(PopulationError),
    #[display("{_0}")]
    #[from]
    Sample(SampleError),
}

/// Progress of the batch currently being drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchProgress {
    /// Number of draws requested.
    pub requested: usize,
    /// Number of draws completed so far.
    pub completed: usize,
}

impl BatchProgress {
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.completed >= self.requested
    }

    /// Completed fraction in `[0, 1]`.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn ratio(&self) -> f64 {
        if self.requested == 0 {
            return 1.0;
        }
        (self.completed as f64 / self.requested as f64).min(1.0)
    }
}

/// Summary and histogram of one dataset, ready for charting.
#[derive(Debug, Clone, PartialEq)]
pub struct DataView {
    pub summary: Summary,
    pub histogram: Histogram,
}

impl DataView {
    #[must_use]
    pub fn new(values: &[f64], bin_count: usize) -> Self {
        Self {
            summary: Summary::new(values),
            histogram: Histogram::new(values, bin_count),
        }
    }
}

/// The three datasets the simulator displays side by side.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationViews {
    pub population: DataView,
    pub latest_sample: DataView,
    pub sample_means: DataView,
}

/// Interactive Central Limit Theorem session.
#[derive(Debug, Clone)]
pub struct Simulation {
    config: PopulationConfig,
    seed: Seed,
    rng: Pcg32,
    sample_size: usize,
    population: Population,
    latest_sample: Vec<f64>,
    sample_means: Vec<f64>,
    batch: Option<BatchProgress>,
}

impl Simulation {
    /// Creates a session with a random seed.
    pub fn new(
        kind: DistributionKind,
        sample_size: usize,
        config: PopulationConfig,
    ) -> Result<Self, SimulationError> {
        Self::with_seed(kind, sample_size, config, rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed for a reproducible session.
    pub fn with_seed(
        kind: DistributionKind,
        sample_size: usize,
        config: PopulationConfig,
        seed: Seed,
    ) -> Result<Self, SimulationError> {
        check_sample_size(sample_size)?;
        let mut rng = seed.rng();
        let population = Population::generate(kind, &config, &mut rng)?;
        Ok(Self {
            config,
            seed,
            rng,
            sample_size,
            population,
            latest_sample: vec![],
            sample_means: vec![],
            batch: None,
        })
    }

    /// Seed the session was created with.
    #[must_use]
    pub fn seed(&self) -> Seed {
        self.seed
    }

    #[must_use]
    pub fn config(&self) -> &PopulationConfig {
        &self.config
    }

    #[must_use]
    pub fn distribution(&self) -> DistributionKind {
        self.population.kind()
    }

    #[must_use]
    pub fn sample_size(&self) -> usize {
        self.sample_size
    }

    #[must_use]
    pub fn population(&self) -> &Population {
        &self.population
    }

    /// The most recent sample; empty before the first draw and after a reset.
    #[must_use]
    pub fn latest_sample(&self) -> &[f64] {
        &self.latest_sample
    }

    /// Means of every sample drawn since the last reset, oldest first.
    #[must_use]
    pub fn sample_means(&self) -> &[f64] {
        &self.sample_means
    }

    /// Returns `true` while a batch is being drawn.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.batch.is_some()
    }

    #[must_use]
    pub fn batch_progress(&self) -> Option<BatchProgress> {
        self.batch
    }

    /// Regenerates the population with a new shape and clears all draws.
    pub fn select_distribution(&mut self, kind: DistributionKind) -> Result<(), SimulationError> {
        self.ensure_idle()?;
        self.population = Population::generate(kind, &self.config, &mut self.rng)?;
        self.clear_draws();
        Ok(())
    }

    /// Changes the size of future samples.
    ///
    /// Accumulated means are kept; only [`Self::reset`] and
    /// [`Self::select_distribution`] clear them.
    pub fn set_sample_size(&mut self, sample_size: usize) -> Result<(), SimulationError> {
        self.ensure_idle()?;
        check_sample_size(sample_size)?;
        self.sample_size = sample_size;
        Ok(())
    }

    /// Clears the latest sample and the accumulated means.
    pub fn reset(&mut self) -> Result<(), SimulationError> {
        self.ensure_idle()?;
        self.clear_draws();
        Ok(())
    }

    /// Requests `count` draws to be executed by subsequent [`Self::step`] calls.
    pub fn start_batch(&mut self, count: usize) -> Result<(), SimulationError> {
        self.ensure_idle()?;
        if count == 0 {
            return Err(SimulationError::EmptyBatch);
        }
        log::debug!(
            "starting batch of {count} draws (n = {}, {})",
            self.sample_size,
            self.distribution()
        );
        self.batch = Some(BatchProgress {
            requested: count,
            completed: 0,
        });
        Ok(())
    }

    /// Advances the running batch by at most `max_draws` draws.
    ///
    /// Returns the progress after this step, or `None` if no batch is running.
    /// The batch is cleared once the returned progress reports done.
    pub fn step(&mut self, max_draws: usize) -> Option<BatchProgress> {
        let mut progress = self.batch?;
        let draws = max_draws.max(1).min(progress.requested - progress.completed);
        for _ in 0..draws {
            self.draw_once();
        }
        progress.completed += draws;
        if progress.is_done() {
            log::debug!("batch of {} draws finished", progress.requested);
            self.batch = None;
        } else {
            self.batch = Some(progress);
        }
        Some(progress)
    }

    /// Draws `count` samples synchronously.
    pub fn run_batch(&mut self, count: usize) -> Result<(), SimulationError> {
        self.start_batch(count)?;
        while self.step(count).is_some_and(|p| !p.is_done()) {}
        Ok(())
    }

    /// Standard error of the mean predicted by the CLT: `σ / √n`.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn expected_standard_error(&self) -> f64 {
        let population = Summary::new(self.population.values());
        population.std_dev / (self.sample_size as f64).sqrt()
    }

    /// Summaries and histograms of the population, the latest sample and the
    /// sample means.
    #[must_use]
    pub fn views(&self, bin_count: usize) -> SimulationViews {
        SimulationViews {
            population: DataView::new(self.population.values(), bin_count),
            latest_sample: DataView::new(&self.latest_sample, bin_count),
            sample_means: DataView::new(&self.sample_means, bin_count),
        }
    }

    fn draw_once(&mut self) {
        // The population is never empty and the sample size is validated.
        let Ok(sample) =
            sampler::draw_sample(self.population.values(), self.sample_size, &mut self.rng)
        else {
            return;
        };
        self.sample_means.push(cltlab_stats::descriptive::mean(&sample));
        self.latest_sample = sample;
    }

    fn clear_draws(&mut self) {
        self.latest_sample.clear();
        self.sample_means.clear();
    }

    fn ensure_idle(&self) -> Result<(), SimulationError> {
        if self.is_busy() {
            return Err(SimulationError::BatchInProgress);
        }
        Ok(())
    }
}

fn check_sample_size(size: usize) -> Result<(), SimulationError> {
    if !SAMPLE_SIZE_RANGE.contains(&size) {
        return Err(SimulationError::SampleSizeOutOfRange {
            size,
            range: SAMPLE_SIZE_RANGE,
        });
    }
    Ok(())
}
