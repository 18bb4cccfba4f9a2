//! Survey sample-size calculation.
//!
//! The required number of respondents for estimating a proportion `p` with
//! margin of error `e` at a confidence level with critical value `z` is
//!
//! ```text
//! n0 = z² · p · (1 - p) / e²
//! ```
//!
//! for an infinite population. When the population size `N` is known, the
//! finite population correction applies:
//!
//! ```text
//! n = n0 / (1 + (n0 - 1) / N)
//! ```
//!
//! The result is rounded up to a whole respondent.
//!
//! # Example
//!
//! ```
//! use cltlab_sim::sample_size::calculate_sample_size;
//!
//! assert_eq!(calculate_sample_size(None, 95, 5.0, 50.0), Ok(385));
//! assert_eq!(calculate_sample_size(Some(1000), 95, 5.0, 50.0), Ok(278));
//! assert!(calculate_sample_size(Some(100), 85, 5.0, 50.0).is_err());
//! ```

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// Margin-of-error values offered by the calculator panel, in percent.
pub const MARGIN_OF_ERROR_RANGE: RangeInclusive<f64> = 1.0..=10.0;
/// Step of the margin-of-error control, in percent.
pub const MARGIN_OF_ERROR_STEP: f64 = 0.5;
/// Proportion values offered by the calculator panel, in percent.
pub const PROPORTION_RANGE: RangeInclusive<f64> = 1.0..=99.0;
/// Population size the calculator panel starts with.
pub const DEFAULT_POPULATION_SIZE: u64 = 100_000;

/// Supported confidence levels.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(try_from = "u32", into = "u32")]
pub enum ConfidenceLevel {
    #[display("90%")]
    P90,
    #[default]
    #[display("95%")]
    P95,
    #[display("99%")]
    P99,
}

impl ConfidenceLevel {
    /// All levels in ascending order.
    pub const ALL: [Self; 3] = [Self::P90, Self::P95, Self::P99];

    /// Two-sided critical value of the standard normal distribution.
    #[must_use]
    pub fn z_score(self) -> f64 {
        match self {
            Self::P90 => 1.645,
            Self::P95 => 1.96,
            Self::P99 => 2.576,
        }
    }

    /// Level in percent.
    #[must_use]
    pub fn percent(self) -> u32 {
        match self {
            Self::P90 => 90,
            Self::P95 => 95,
            Self::P99 => 99,
        }
    }

    /// Next higher level, saturating at 99%.
    #[must_use]
    pub fn raise(self) -> Self {
        match self {
            Self::P90 => Self::P95,
            Self::P95 | Self::P99 => Self::P99,
        }
    }

    /// Next lower level, saturating at 90%.
    #[must_use]
    pub fn lower(self) -> Self {
        match self {
            Self::P90 | Self::P95 => Self::P90,
            Self::P99 => Self::P95,
        }
    }
}

impl TryFrom<u32> for ConfidenceLevel {
    type Error = SampleSizeError;

    fn try_from(percent: u32) -> Result<Self, Self::Error> {
        match percent {
            90 => Ok(Self::P90),
            95 => Ok(Self::P95),
            99 => Ok(Self::P99),
            _ => Err(SampleSizeError::UnsupportedConfidenceLevel(percent)),
        }
    }
}

impl From<ConfidenceLevel> for u32 {
    fn from(level: ConfidenceLevel) -> Self {
        level.percent()
    }
}

/// Error returned for calculator inputs that have no meaningful result.
#[derive(Debug, Clone, Copy, PartialEq, derive_more::Display, derive_more::Error)]
pub enum SampleSizeError {
    #[display("unsupported confidence level {_0}% (expected 90, 95 or 99)")]
    UnsupportedConfidenceLevel(#[error(not(source))] u32),
    #[display("margin of error must be in (0, 100] percent, got {_0}")]
    MarginOfErrorOutOfRange(#[error(not(source))] f64),
    #[display("proportion must be in [0, 100] percent, got {_0}")]
    ProportionOutOfRange(#[error(not(source))] f64),
}

/// Inputs of the sample-size formula.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleSizeRequest {
    /// Population size; `None` or `Some(0)` means an infinite population.
    pub population: Option<u64>,
    pub confidence: ConfidenceLevel,
    /// Margin of error in percent.
    pub margin_of_error: f64,
    /// Expected proportion in percent.
    pub proportion: f64,
}

impl Default for SampleSizeRequest {
    fn default() -> Self {
        Self {
            population: Some(DEFAULT_POPULATION_SIZE),
            confidence: ConfidenceLevel::default(),
            margin_of_error: 5.0,
            proportion: 50.0,
        }
    }
}

/// Result of the sample-size formula with its intermediate values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleSizeEstimate {
    /// Critical value used.
    pub z: f64,
    /// Infinite-population size `n0`.
    pub base: f64,
    /// Size after the finite population correction, if a population was given.
    pub corrected: Option<f64>,
    /// Required sample size, rounded up.
    pub required: u64,
}

impl SampleSizeRequest {
    /// Evaluates the formula.
    #[expect(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn estimate(&self) -> Result<SampleSizeEstimate, SampleSizeError> {
        let moe = self.margin_of_error;
        if !(moe.is_finite() && moe > 0.0 && moe <= 100.0) {
            return Err(SampleSizeError::MarginOfErrorOutOfRange(moe));
        }
        let proportion = self.proportion;
        if !(proportion.is_finite() && (0.0..=100.0).contains(&proportion)) {
            return Err(SampleSizeError::ProportionOutOfRange(proportion));
        }

        let z = self.confidence.z_score();
        let p = proportion / 100.0;
        let e = moe / 100.0;
        let base = z * z * p * (1.0 - p) / (e * e);

        let corrected = self
            .population
            .filter(|&n| n > 0)
            .map(|n| base / (1.0 + (base - 1.0) / n as f64));

        let required = corrected.unwrap_or(base).ceil().max(0.0) as u64;
        Ok(SampleSizeEstimate {
            z,
            base,
            corrected,
            required,
        })
    }
}

/// Computes the required sample size from raw calculator inputs.
///
/// `confidence_percent` must be 90, 95 or 99; `margin_of_error` and
/// `proportion` are percentages.
pub fn calculate_sample_size(
    population: Option<u64>,
    confidence_percent: u32,
    margin_of_error: f64,
    proportion: f64,
) -> Result<u64, SampleSizeError> {
    let request = SampleSizeRequest {
        population,
        confidence: ConfidenceLevel::try_from(confidence_percent)?,
        margin_of_error,
        proportion,
    };
    Ok(request.estimate()?.required)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infinite_population() {
        assert_eq!(calculate_sample_size(None, 95, 5.0, 50.0), Ok(385));
        assert_eq!(calculate_sample_size(Some(0), 95, 5.0, 50.0), Ok(385));
    }

    #[test]
    fn test_finite_population_correction() {
        assert_eq!(calculate_sample_size(Some(1000), 95, 5.0, 50.0), Ok(278));
    }

    #[test]
    fn test_unsupported_confidence_level() {
        assert_eq!(
            calculate_sample_size(Some(100), 85, 5.0, 50.0),
            Err(SampleSizeError::UnsupportedConfidenceLevel(85))
        );
    }

    #[test]
    fn test_other_levels() {
        // 1.645² · 0.25 / 0.05² = 270.6
        assert_eq!(calculate_sample_size(None, 90, 5.0, 50.0), Ok(271));
        // 2.576² · 0.25 / 0.05² = 663.6
        assert_eq!(calculate_sample_size(None, 99, 5.0, 50.0), Ok(664));
    }

    #[test]
    fn test_estimate_exposes_steps() {
        let estimate = SampleSizeRequest {
            population: Some(1000),
            ..SampleSizeRequest::default()
        }
        .estimate()
        .unwrap();
        assert_eq!(estimate.z, 1.96);
        assert!((estimate.base - 384.16).abs() < 1e-9);
        let corrected = estimate.corrected.unwrap();
        assert!((corrected - 277.74).abs() < 0.01, "{corrected}");
        assert_eq!(estimate.required, 278);
    }

    #[test]
    fn test_large_population_approaches_infinite() {
        let finite = calculate_sample_size(Some(100_000_000), 95, 5.0, 50.0).unwrap();
        assert_eq!(finite, 385);
    }

    #[test]
    fn test_small_population_is_bounded() {
        // The corrected size never exceeds the population itself.
        for n in [1, 10, 50, 200] {
            let required = calculate_sample_size(Some(n), 99, 1.0, 50.0).unwrap();
            assert!(required <= n, "{required} > {n}");
        }
    }

    #[test]
    fn test_extreme_proportions() {
        assert_eq!(calculate_sample_size(None, 95, 5.0, 0.0), Ok(0));
        assert_eq!(calculate_sample_size(None, 95, 5.0, 100.0), Ok(0));
        assert!(
            calculate_sample_size(None, 95, 5.0, 10.0).unwrap()
                < calculate_sample_size(None, 95, 5.0, 50.0).unwrap()
        );
    }

    #[test]
    fn test_invalid_inputs() {
        assert_eq!(
            calculate_sample_size(None, 95, 0.0, 50.0),
            Err(SampleSizeError::MarginOfErrorOutOfRange(0.0))
        );
        assert_eq!(
            calculate_sample_size(None, 95, 5.0, 120.0),
            Err(SampleSizeError::ProportionOutOfRange(120.0))
        );
        assert!(matches!(
            calculate_sample_size(None, 95, f64::NAN, 50.0),
            Err(SampleSizeError::MarginOfErrorOutOfRange(_))
        ));
    }

    #[test]
    fn test_confidence_level_conversions() {
        for level in ConfidenceLevel::ALL {
            assert_eq!(ConfidenceLevel::try_from(level.percent()), Ok(level));
        }
        assert_eq!(ConfidenceLevel::P90.lower(), ConfidenceLevel::P90);
        assert_eq!(ConfidenceLevel::P90.raise(), ConfidenceLevel::P95);
        assert_eq!(ConfidenceLevel::P99.raise(), ConfidenceLevel::P99);
        assert_eq!(ConfidenceLevel::P95.to_string(), "95%");
    }

    #[test]
    fn test_confidence_level_serde() {
        let json = serde_json::to_string(&ConfidenceLevel::P99).unwrap();
        assert_eq!(json, "99");
        assert!(serde_json::from_str::<ConfidenceLevel>("85").is_err());
    }
}
