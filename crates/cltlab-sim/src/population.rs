//! Synthetic population generation.
//!
//! A [`Population`] is a fixed-size dataset drawn once from one of the
//! [`DistributionKind`] shapes. All shapes live roughly inside the configured
//! range (`[0, 100]` by default):
//!
//! | Kind | Construction |
//! |---|---|
//! | Normal | Box–Muller variates, σ = 15, centered at the midpoint |
//! | Uniform | independent uniform draws over `[min, max)` |
//! | Skewed right | `min + (max - min) · r^skew`, skew = 4 |
//! | Skewed left | `min + (max - min) · (1 - r^skew)`, skew = 4 |
//! | Bimodal | two normal halves at `mid ± 25`, σ = 10 |
//!
//! Normal shapes are not clipped, so a few values fall outside the range.
//!
//! # Example
//!
//! ```
//! use cltlab_sim::{DistributionKind, Population, PopulationConfig, Seed};
//!
//! let mut rng = Seed::from_u128(1).rng();
//! let config = PopulationConfig::default();
//! let population = Population::generate(DistributionKind::Uniform, &config, &mut rng).unwrap();
//! assert_eq!(population.len(), 10_000);
//! assert!(population.values().iter().all(|v| (0.0..100.0).contains(v)));
//! ```

use std::f64::consts::PI;

use rand::Rng;
use rand_distr::Open01;
use serde::{Deserialize, Serialize};

use crate::DistributionKind;

/// Number of values in a generated population.
pub const POPULATION_SIZE: usize = 10_000;

/// Parameters shared by all population shapes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PopulationConfig {
    /// Number of values to generate.
    pub size: usize,
    /// Lower end of the population range.
    pub min: f64,
    /// Upper end of the population range.
    pub max: f64,
    /// Standard deviation of the normal shape.
    pub normal_std_dev: f64,
    /// Exponent applied to uniform variates by the skewed shapes.
    pub skew: f64,
    /// Distance of each bimodal peak from the midpoint.
    pub bimodal_offset: f64,
    /// Standard deviation of each bimodal peak.
    pub bimodal_std_dev: f64,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            size: POPULATION_SIZE,
            min: 0.0,
            max: 100.0,
            normal_std_dev: 15.0,
            skew: 4.0,
            bimodal_offset: 25.0,
            bimodal_std_dev: 10.0,
        }
    }
}

impl PopulationConfig {
    /// Midpoint of the population range.
    #[must_use]
    pub fn midpoint(&self) -> f64 {
        f64::midpoint(self.min, self.max)
    }

    /// Checks that every parameter can produce a population.
    pub fn validate(&self) -> Result<(), PopulationError> {
        if self.size == 0 {
            return Err(PopulationError::ZeroSize);
        }
        if !self.min.is_finite() || !self.max.is_finite() || self.min >= self.max {
            return Err(PopulationError::InvalidRange {
                min: self.min,
                max: self.max,
            });
        }
        for std_dev in [self.normal_std_dev, self.bimodal_std_dev] {
            if !(std_dev.is_finite() && std_dev > 0.0) {
                return Err(PopulationError::InvalidStdDev(std_dev));
            }
        }
        if !(self.skew.is_finite() && self.skew > 0.0) {
            return Err(PopulationError::InvalidSkew(self.skew));
        }
        if !self.bimodal_offset.is_finite() {
            return Err(PopulationError::InvalidOffset(self.bimodal_offset));
        }
        Ok(())
    }
}

/// Error returned for a [`PopulationConfig`] that cannot produce a population.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum PopulationError {
    #[display("population size must be at least 1")]
    ZeroSize,
    #[display("invalid population range [{min}, {max}]")]
    InvalidRange { min: f64, max: f64 },
    #[display("standard deviation must be positive and finite, got {_0}")]
    InvalidStdDev(#[error(not(source))] f64),
    #[display("skew exponent must be positive and finite, got {_0}")]
    InvalidSkew(#[error(not(source))] f64),
    #[display("bimodal offset must be finite, got {_0}")]
    InvalidOffset(#[error(not(source))] f64),
}

/// An immutable synthetic dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Population {
    kind: DistributionKind,
    values: Vec<f64>,
}

impl Population {
    /// Generates a population of `config.size` values with the given shape.
    pub fn generate<R>(
        kind: DistributionKind,
        config: &PopulationConfig,
        rng: &mut R,
    ) -> Result<Self, PopulationError>
    where
        R: Rng + ?Sized,
    {
        config.validate()?;

        let PopulationConfig {
            size,
            min,
            max,
            normal_std_dev,
            skew,
            bimodal_offset,
            bimodal_std_dev,
        } = *config;
        let mid = config.midpoint();

        let values = match kind {
            DistributionKind::Normal => normal_values(rng, size, mid, normal_std_dev),
            DistributionKind::Uniform => uniform_values(rng, size, min, max),
            DistributionKind::SkewedRight => {
                skewed_values(rng, size, min, max, skew, SkewDirection::Right)
            }
            DistributionKind::SkewedLeft => {
                skewed_values(rng, size, min, max, skew, SkewDirection::Left)
            }
            DistributionKind::Bimodal => bimodal_values(
                rng,
                size,
                (mid - bimodal_offset, mid + bimodal_offset),
                bimodal_std_dev,
            ),
        };
        log::debug!("generated {kind} population of {} values", values.len());

        Ok(Self { kind, values })
    }

    /// Shape this population was generated from.
    #[must_use]
    pub fn kind(&self) -> DistributionKind {
        self.kind
    }

    /// The generated values, in generation order.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Which end of the range a skewed shape leans away from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkewDirection {
    /// Long tail towards `max`.
    Right,
    /// Long tail towards `min`.
    Left,
}

/// Draws a pair of independent standard normal variates (Box–Muller).
///
/// Both uniforms come from the open interval `(0, 1)` so `ln(u)` stays finite.
pub fn standard_normal_pair<R>(rng: &mut R) -> (f64, f64)
where
    R: Rng + ?Sized,
{
    let u: f64 = rng.sample(Open01);
    let v: f64 = rng.sample(Open01);
    let radius = (-2.0 * u.ln()).sqrt();
    let theta = 2.0 * PI * v;
    (radius * theta.cos(), radius * theta.sin())
}

/// Generates `count` normal values; both variates of each pair are used.
pub fn normal_values<R>(rng: &mut R, count: usize, mean: f64, std_dev: f64) -> Vec<f64>
where
    R: Rng + ?Sized,
{
    let mut values = Vec::with_capacity(count + 1);
    while values.len() < count {
        let (z1, z2) = standard_normal_pair(rng);
        values.push(z1 * std_dev + mean);
        values.push(z2 * std_dev + mean);
    }
    values.truncate(count);
    values
}

/// Generates `count` values uniformly distributed over `[min, max)`.
pub fn uniform_values<R>(rng: &mut R, count: usize, min: f64, max: f64) -> Vec<f64>
where
    R: Rng + ?Sized,
{
    (0..count)
        .map(|_| min + rng.random::<f64>() * (max - min))
        .collect()
}

/// Generates `count` values by raising uniform variates to `skew`.
///
/// Larger exponents push more mass towards `min` ([`SkewDirection::Right`])
/// or `max` ([`SkewDirection::Left`]).
pub fn skewed_values<R>(
    rng: &mut R,
    count: usize,
    min: f64,
    max: f64,
    skew: f64,
    direction: SkewDirection,
) -> Vec<f64>
where
    R: Rng + ?Sized,
{
    (0..count)
        .map(|_| {
            let r = rng.random::<f64>().powf(skew);
            match direction {
                SkewDirection::Right => min + (max - min) * r,
                SkewDirection::Left => min + (max - min) * (1.0 - r),
            }
        })
        .collect()
}

/// Generates two normal halves with the given centers and concatenates them.
///
/// The first half has `count / 2` values, the second the remainder.
pub fn bimodal_values<R>(
    rng: &mut R,
    count: usize,
    centers: (f64, f64),
    std_dev: f64,
) -> Vec<f64>
where
    R: Rng + ?Sized,
{
    let first = count / 2;
    let mut values = normal_values(rng, first, centers.0, std_dev);
    values.extend(normal_values(rng, count - first, centers.1, std_dev));
    values
}
