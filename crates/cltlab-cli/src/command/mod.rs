use clap::{Parser, Subcommand, ValueEnum};
use cltlab_sim::DistributionKind;

use self::{explore::ExploreArg, sample_size::SampleSizeArg, simulate::SimulateArg};

mod explore;
mod sample_size;
mod simulate;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Explore the Central Limit Theorem and the sample-size calculator in a TUI
    Explore(#[clap(flatten)] ExploreArg),
    /// Draw sample means without a TUI and print a report
    Simulate(#[clap(flatten)] SimulateArg),
    /// Compute the sample size required for a survey
    SampleSize(#[clap(flatten)] SampleSizeArg),
}

/// Population shape selectable on the command line.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum DistributionArg {
    #[default]
    Normal,
    Uniform,
    SkewedRight,
    SkewedLeft,
    Bimodal,
}

impl From<DistributionArg> for DistributionKind {
    fn from(arg: DistributionArg) -> Self {
        match arg {
            DistributionArg::Normal => Self::Normal,
            DistributionArg::Uniform => Self::Uniform,
            DistributionArg::SkewedRight => Self::SkewedRight,
            DistributionArg::SkewedLeft => Self::SkewedLeft,
            DistributionArg::Bimodal => Self::Bimodal,
        }
    }
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode.unwrap_or(Mode::Explore(ExploreArg::default())) {
        Mode::Explore(arg) => explore::run(&arg)?,
        Mode::Simulate(arg) => simulate::run(&arg)?,
        Mode::SampleSize(arg) => sample_size::run(&arg)?,
    }
    Ok(())
}
