//! Simulation core for the Central Limit Theorem lab.
//!
//! This crate generates synthetic populations, draws samples from them and
//! tracks the distribution of sample means over a session. It also hosts the
//! survey sample-size calculator.
//!
//! # Modules
//!
//! - [`distribution`]: The population shapes ([`DistributionKind`])
//! - [`population`]: Population generation, including the Box–Muller transform
//! - [`sampler`]: Sampling with replacement
//! - [`session`]: The interactive session with incremental batch draws
//! - [`sample_size`]: Survey sample-size formula with finite population correction
//! - [`seed`]: Reproducible random seeds
//!
//! # Example
//!
//! ```
//! use cltlab_sim::{DistributionKind, PopulationConfig, Seed, Simulation};
//! use cltlab_stats::histogram::DEFAULT_BIN_COUNT;
//!
//! let mut sim = Simulation::with_seed(
//!     DistributionKind::Uniform,
//!     25,
//!     PopulationConfig::default(),
//!     Seed::from_u128(2024),
//! )
//! .unwrap();
//! sim.run_batch(500).unwrap();
//!
//! let views = sim.views(DEFAULT_BIN_COUNT);
//! assert_eq!(views.sample_means.summary.count, 500);
//! assert!((views.sample_means.summary.mean - 50.0).abs() < 2.0);
//! ```

pub use self::{
    distribution::DistributionKind,
    population::{POPULATION_SIZE, Population, PopulationConfig, PopulationError},
    seed::{Seed, SeedParseError},
    session::{BatchProgress, DataView, Simulation, SimulationError, SimulationViews},
};

pub mod distribution;
pub mod population;
pub mod sample_size;
pub mod sampler;
pub mod seed;
pub mod session;
