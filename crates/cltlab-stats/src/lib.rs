//! Statistical utilities for the cltlab project.
//!
//! This crate provides the small numeric core shared by the simulator and the
//! command line tools:
//!
//! - **Descriptive statistics**: arithmetic mean and Bessel-corrected standard deviation
//! - **Histogram generation**: equal-width frequency bins for charting
//!
//! # Modules
//!
//! - [`descriptive`]: Mean, sample standard deviation and [`Summary`](descriptive::Summary)
//! - [`histogram`]: Fixed bin-count histograms covering the full data range
//!
//! # Examples
//!
//! ## Computing descriptive statistics
//!
//! ```
//! use cltlab_stats::descriptive::{self, Summary};
//!
//! let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
//! assert_eq!(descriptive::mean(&values), 5.0);
//!
//! let summary = Summary::new(&values);
//! assert_eq!(summary.count, 8);
//! assert!((summary.std_dev - 2.138).abs() < 1e-3);
//! ```
//!
//! ## Creating a histogram
//!
//! ```
//! use cltlab_stats::histogram::Histogram;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
//! let histogram = Histogram::new(&values, 5);
//! assert_eq!(histogram.bins.len(), 5);
//! assert_eq!(histogram.total_count(), 10);
//! ```

pub mod descriptive;
pub mod histogram;
