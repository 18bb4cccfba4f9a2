use std::ops::RangeInclusive;

use anyhow::Context as _;
use cltlab_sim::{
    DistributionKind, PopulationConfig, Seed, Simulation,
    session::{DEFAULT_SAMPLE_SIZE, SAMPLE_SIZE_RANGE},
};
use cltlab_stats::histogram::DEFAULT_BIN_COUNT;

use crate::{
    command::DistributionArg,
    tui::{Panel, PanelTabs, Runtime},
};

use self::panels::{CalculatorPanel, SimulatorPanel};

mod panels;

const FRAME_RATE_RANGE: RangeInclusive<f64> = 1.0..=240.0;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ExploreArg {
    /// Initial population shape
    #[clap(long, value_enum, default_value_t)]
    distribution: DistributionArg,
    /// Initial number of values in each sample
    #[clap(long, default_value_t = DEFAULT_SAMPLE_SIZE)]
    sample_size: usize,
    /// Number of histogram bins
    #[clap(long, default_value_t = DEFAULT_BIN_COUNT)]
    bins: usize,
    /// Samples drawn per animation frame while a batch runs
    #[clap(long, default_value_t = 1)]
    draws_per_frame: usize,
    /// Animation frame rate (FPS)
    #[clap(long, default_value_t = 60.0)]
    frame_rate: f64,
    /// Seed for a reproducible session (32 hex digits)
    #[clap(long)]
    seed: Option<Seed>,
}

impl Default for ExploreArg {
    fn default() -> Self {
        Self {
            distribution: DistributionArg::default(),
            sample_size: DEFAULT_SAMPLE_SIZE,
            bins: DEFAULT_BIN_COUNT,
            draws_per_frame: 1,
            frame_rate: 60.0,
            seed: None,
        }
    }
}

pub(crate) fn run(arg: &ExploreArg) -> anyhow::Result<()> {
    let ExploreArg {
        distribution,
        sample_size,
        bins,
        draws_per_frame,
        frame_rate,
        seed,
    } = arg;

    anyhow::ensure!(
        SAMPLE_SIZE_RANGE.contains(sample_size),
        "--sample-size must be in {}..={}",
        SAMPLE_SIZE_RANGE.start(),
        SAMPLE_SIZE_RANGE.end()
    );
    anyhow::ensure!(*bins > 0, "--bins must be at least 1");
    anyhow::ensure!(*draws_per_frame > 0, "--draws-per-frame must be at least 1");
    anyhow::ensure!(
        FRAME_RATE_RANGE.contains(frame_rate),
        "--frame-rate must be in {}..={}",
        FRAME_RATE_RANGE.start(),
        FRAME_RATE_RANGE.end()
    );

    let kind = DistributionKind::from(*distribution);
    let config = PopulationConfig::default();
    let sim = match seed {
        Some(seed) => Simulation::with_seed(kind, *sample_size, config, *seed),
        None => Simulation::new(kind, *sample_size, config),
    }
    .context("Failed to create simulation")?;
    log::debug!("exploring with seed {}", sim.seed());

    let panels: Vec<Box<dyn Panel>> = vec![
        Box::new(SimulatorPanel::new(sim, *bins, *draws_per_frame)),
        Box::new(CalculatorPanel::new()),
    ];
    let mut app = PanelTabs::new(panels);

    Runtime::new(*frame_rate).run(&mut app)?;
    Ok(())
}
