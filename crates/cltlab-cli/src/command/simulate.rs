use std::path::PathBuf;

use anyhow::Context as _;
use cltlab_sim::{
    DistributionKind, PopulationConfig, Seed, Simulation,
    session::{DEFAULT_SAMPLE_SIZE, SAMPLE_SIZE_RANGE},
};
use cltlab_stats::histogram::DEFAULT_BIN_COUNT;

use crate::{
    command::DistributionArg,
    schema::report::{DataReport, SimulationReport},
    util::Output,
};

const BAR_WIDTH: u64 = 40;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    /// Shape of the population
    #[clap(long, value_enum, default_value_t)]
    distribution: DistributionArg,
    /// Number of values in each sample
    #[clap(long, default_value_t = DEFAULT_SAMPLE_SIZE)]
    sample_size: usize,
    /// Number of samples to draw
    #[clap(long, default_value_t = 1000)]
    draws: usize,
    /// Number of histogram bins
    #[clap(long, default_value_t = DEFAULT_BIN_COUNT)]
    bins: usize,
    /// Seed for a reproducible run (32 hex digits)
    #[clap(long)]
    seed: Option<Seed>,
    /// Write the report as JSON
    #[clap(long)]
    json: bool,
    /// Report file (stdout if omitted)
    #[clap(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    let SimulateArg {
        distribution,
        sample_size,
        draws,
        bins,
        seed,
        json,
        output,
    } = arg;

    anyhow::ensure!(
        SAMPLE_SIZE_RANGE.contains(sample_size),
        "--sample-size must be in {}..={}",
        SAMPLE_SIZE_RANGE.start(),
        SAMPLE_SIZE_RANGE.end()
    );
    anyhow::ensure!(*bins > 0, "--bins must be at least 1");

    let kind = DistributionKind::from(*distribution);
    let config = PopulationConfig::default();
    let mut sim = match seed {
        Some(seed) => Simulation::with_seed(kind, *sample_size, config, *seed),
        None => Simulation::new(kind, *sample_size, config),
    }
    .context("Failed to create simulation")?;

    log::info!(
        "drawing {draws} samples of size {sample_size} from a {kind} population (seed {})",
        sim.seed()
    );
    sim.run_batch(*draws).context("Failed to draw samples")?;
    log::info!("drew {} sample means", sim.sample_means().len());

    let report = SimulationReport::new(&sim, *bins);
    if *json {
        Output::save_json(&report, output.clone())?;
    } else {
        let mut out = Output::from_output_path(output.clone())?;
        out.write_lines(text_report(&report))?;
    }
    Ok(())
}

fn text_report(report: &SimulationReport) -> Vec<String> {
    let mut lines = vec![
        format!("Distribution:  {}", report.distribution),
        format!("Sample size:   {}", report.sample_size),
        format!("Draws:         {}", report.draws),
        format!("Seed:          {}", report.seed),
        format!(
            "Std error:     {:.3} expected, {:.3} observed",
            report.expected_standard_error, report.sample_means.std_dev
        ),
    ];
    for (title, data) in [
        ("Population", &report.population),
        ("Latest sample", &report.latest_sample),
        ("Sample means", &report.sample_means),
    ] {
        lines.push(String::new());
        lines.extend(data_section(title, data));
    }
    lines
}

#[expect(clippy::cast_possible_truncation)]
fn data_section(title: &str, data: &DataReport) -> Vec<String> {
    let mut lines = vec![format!(
        "{title}: n = {}, mean = {:.2}, sd = {:.2}, min = {:.2}, max = {:.2}",
        data.count, data.mean, data.std_dev, data.min, data.max
    )];
    let max_count = data.bins.iter().map(|bin| bin.count).max().unwrap_or(0);
    for bin in &data.bins {
        let width = if max_count == 0 {
            0
        } else {
            (bin.count * BAR_WIDTH).div_ceil(max_count)
        };
        lines.push(format!(
            "  {:>8} | {:<bar_width$} {}",
            bin.label,
            "#".repeat(width as usize),
            bin.count,
            bar_width = BAR_WIDTH as usize,
        ));
    }
    if data.bins.is_empty() {
        lines.push("  (no data)".to_owned());
    }
    lines
}
