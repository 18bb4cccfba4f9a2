use anyhow::Context as _;
use cltlab_sim::sample_size::{ConfidenceLevel, SampleSizeEstimate, SampleSizeRequest};

use crate::{schema::report::SampleSizeReport, util::Output};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SampleSizeArg {
    /// Population size (omit or 0 for an infinite population)
    #[clap(long)]
    population: Option<u64>,
    /// Confidence level in percent (90, 95 or 99)
    #[clap(long, default_value_t = 95)]
    confidence: u32,
    /// Margin of error in percent
    #[clap(long, default_value_t = 5.0)]
    margin_of_error: f64,
    /// Expected proportion in percent
    #[clap(long, default_value_t = 50.0)]
    proportion: f64,
    /// Print the result as JSON
    #[clap(long)]
    json: bool,
}

pub(crate) fn run(arg: &SampleSizeArg) -> anyhow::Result<()> {
    let SampleSizeArg {
        population,
        confidence,
        margin_of_error,
        proportion,
        json,
    } = arg;

    let request = SampleSizeRequest {
        population: *population,
        confidence: ConfidenceLevel::try_from(*confidence).context("Invalid --confidence")?,
        margin_of_error: *margin_of_error,
        proportion: *proportion,
    };
    let estimate = request
        .estimate()
        .context("Failed to compute sample size")?;
    log::info!("required sample size: {}", estimate.required);

    let mut output = Output::stdout();
    if *json {
        output.write_json(&SampleSizeReport { request, estimate })?;
    } else {
        output.write_lines(working(&request, &estimate))?;
    }
    Ok(())
}

/// Formats the steps of the calculation.
fn working(request: &SampleSizeRequest, estimate: &SampleSizeEstimate) -> Vec<String> {
    let population = match request.population.filter(|&n| n > 0) {
        Some(n) => n.to_string(),
        None => "infinite".to_owned(),
    };
    let mut lines = vec![
        format!("Population:       {population}"),
        format!(
            "Confidence level: {} (z = {})",
            request.confidence, estimate.z
        ),
        format!("Margin of error:  {}%", request.margin_of_error),
        format!("Proportion:       {}%", request.proportion),
        format!("n0 = z²·p·(1-p)/e² = {:.2}", estimate.base),
    ];
    if let Some(corrected) = estimate.corrected {
        lines.push(format!("n  = n0/(1+(n0-1)/N) = {corrected:.2}"));
    }
    lines.push(format!("Required sample size: {}", estimate.required));
    lines
}
