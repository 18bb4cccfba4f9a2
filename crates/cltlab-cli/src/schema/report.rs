//! JSON documents written by the headless commands.

use chrono::{DateTime, Utc};
use cltlab_sim::{
    DataView, DistributionKind, PopulationConfig, Seed, Simulation,
    sample_size::{SampleSizeEstimate, SampleSizeRequest},
};
use serde::{Deserialize, Serialize};

/// Result of a `simulate` run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub generated_at: DateTime<Utc>,
    /// Seed that reproduces this run.
    pub seed: Seed,
    pub distribution: DistributionKind,
    pub population_config: PopulationConfig,
    pub sample_size: usize,
    /// Number of sample means drawn.
    pub draws: usize,
    /// CLT prediction for the standard deviation of the sample means.
    pub expected_standard_error: f64,
    pub population: DataReport,
    pub latest_sample: DataReport,
    pub sample_means: DataReport,
}

impl SimulationReport {
    #[must_use]
    pub fn new(sim: &Simulation, bin_count: usize) -> Self {
        let views = sim.views(bin_count);
        Self {
            generated_at: Utc::now(),
            seed: sim.seed(),
            distribution: sim.distribution(),
            population_config: *sim.config(),
            sample_size: sim.sample_size(),
            draws: sim.sample_means().len(),
            expected_standard_error: sim.expected_standard_error(),
            population: DataReport::from(&views.population),
            latest_sample: DataReport::from(&views.latest_sample),
            sample_means: DataReport::from(&views.sample_means),
        }
    }
}

/// Summary statistics and histogram of one dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataReport {
    pub count: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub bins: Vec<BinReport>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinReport {
    pub label: String,
    pub start: f64,
    pub end: f64,
    pub count: u64,
}

impl From<&DataView> for DataReport {
    fn from(view: &DataView) -> Self {
        let summary = &view.summary;
        Self {
            count: summary.count,
            mean: summary.mean,
            std_dev: summary.std_dev,
            min: summary.min,
            max: summary.max,
            bins: view
                .histogram
                .bins
                .iter()
                .map(|bin| BinReport {
                    label: bin.label.clone(),
                    start: bin.range.start,
                    end: bin.range.end,
                    count: bin.count,
                })
                .collect(),
        }
    }
}

/// Result of a `sample-size` run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleSizeReport {
    pub request: SampleSizeRequest,
    pub estimate: SampleSizeEstimate,
}
