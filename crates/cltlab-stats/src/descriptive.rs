/// Computes the arithmetic mean of `values`.
///
/// Returns `0.0` for an empty slice.
///
/// # Examples
///
/// ```
/// # use cltlab_stats::descriptive::mean;
/// assert_eq!(mean(&[1.0, 2.0, 3.0]), 2.0);
/// assert_eq!(mean(&[]), 0.0);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Computes the sample standard deviation of `values` around `mean`.
///
/// The sum of squared deviations is divided by `count - 1` (Bessel's correction).
/// Returns `0.0` when fewer than two values are given.
///
/// # Examples
///
/// ```
/// # use cltlab_stats::descriptive::sample_std_dev;
/// let values = [1.0, 2.0, 3.0, 4.0];
/// let sd = sample_std_dev(&values, 2.5);
/// assert!((sd - 1.290_994).abs() < 1e-6);
///
/// assert_eq!(sample_std_dev(&[42.0], 42.0), 0.0);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn sample_std_dev(values: &[f64], mean: f64) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let sum_sq = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>();
    (sum_sq / (values.len() - 1) as f64).sqrt()
}

/// Descriptive statistics summarizing a dataset.
///
/// An empty dataset yields a summary with `count == 0` and all other fields zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    /// Number of values in the dataset.
    pub count: usize,
    /// The arithmetic mean of the dataset.
    pub mean: f64,
    /// The sample standard deviation (Bessel-corrected).
    pub std_dev: f64,
    /// The minimum value in the dataset.
    pub min: f64,
    /// The maximum value in the dataset.
    pub max: f64,
}

impl Summary {
    /// Computes the summary of `values`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use cltlab_stats::descriptive::Summary;
    /// let summary = Summary::new(&[5.0, 1.0, 3.0]);
    /// assert_eq!(summary.count, 3);
    /// assert_eq!(summary.mean, 3.0);
    /// assert_eq!(summary.min, 1.0);
    /// assert_eq!(summary.max, 5.0);
    /// ```
    #[must_use]
    pub fn new(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::EMPTY;
        }
        let mean = mean(values);
        let std_dev = sample_std_dev(values, mean);
        let (min, max) = values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        Self {
            count: values.len(),
            mean,
            std_dev,
            min,
            max,
        }
    }

    /// Summary of an empty dataset.
    pub const EMPTY: Self = Self {
        count: 0,
        mean: 0.0,
        std_dev: 0.0,
        min: 0.0,
        max: 0.0,
    };

    /// Returns `true` if the summarized dataset had no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}
