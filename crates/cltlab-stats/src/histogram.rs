use std::ops::Range;

/// Number of bins used when a caller has no preference.
pub const DEFAULT_BIN_COUNT: usize = 30;

/// A histogram representation of a dataset's distribution.
///
/// The data range `[min, max]` is divided into equal-width bins. Every bin is
/// half-open except the last one, which also contains `max`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Histogram {
    /// The bins comprising the histogram, ordered by their start value.
    pub bins: Vec<HistogramBin>,
}

/// A single bin in a histogram.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBin {
    /// Display label: the left edge with one decimal place, or the single
    /// value with two decimal places for zero-range data.
    pub label: String,
    /// The range of values covered by this bin (inclusive start, exclusive end).
    pub range: Range<f64>,
    /// The number of values that fall within this bin.
    pub count: u64,
}

impl Histogram {
    /// Creates a histogram with `bin_count` equal-width bins.
    ///
    /// - Empty input (or `bin_count == 0`) produces no bins.
    /// - If all values are equal, a single bin labelled with that value is
    ///   returned, holding every value.
    /// - Otherwise exactly `bin_count` bins are returned and the counts sum to
    ///   the number of values.
    ///
    /// Non-finite values are ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// # use cltlab_stats::histogram::Histogram;
    /// let histogram = Histogram::new(&[0.0, 1.0, 2.0, 3.0, 4.0], 2);
    /// let labels = histogram.bins.iter().map(|b| b.label.as_str()).collect::<Vec<_>>();
    /// let counts = histogram.bins.iter().map(|b| b.count).collect::<Vec<_>>();
    /// assert_eq!(labels, ["0.0", "2.0"]);
    /// assert_eq!(counts, [2, 3]);
    ///
    /// let flat = Histogram::new(&[5.0, 5.0, 5.0], 30);
    /// assert_eq!(flat.bins.len(), 1);
    /// assert_eq!(flat.bins[0].label, "5.00");
    /// assert_eq!(flat.bins[0].count, 3);
    /// ```
    #[expect(
        clippy::cast_precision_loss,
        clippy::cast_sign_loss,
        clippy::cast_possible_truncation
    )]
    #[must_use]
    pub fn new(values: &[f64], bin_count: usize) -> Self {
        let finite = || values.iter().copied().filter(|v| v.is_finite());

        let Some((min, max)) = finite().fold(None, |acc: Option<(f64, f64)>, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        }) else {
            return Self::default();
        };
        if bin_count == 0 {
            return Self::default();
        }

        if max <= min {
            return Self {
                bins: vec![HistogramBin {
                    label: format!("{min:.2}"),
                    range: min..max.next_up(),
                    count: finite().count() as u64,
                }],
            };
        }

        let bin_width = (max - min) / bin_count as f64;
        let mut bins = (0..bin_count)
            .map(|idx| {
                let start = min + idx as f64 * bin_width;
                let end = if idx + 1 == bin_count {
                    max.next_up()
                } else {
                    min + (idx + 1) as f64 * bin_width
                };
                HistogramBin {
                    label: format!("{start:.1}"),
                    range: start..end,
                    count: 0,
                }
            })
            .collect::<Vec<_>>();

        for value in finite() {
            // Rounding can push values just below `max` onto `bin_count`; they
            // belong to the last bin like `max` itself.
            let idx = ((value - min) / bin_width).floor() as usize;
            bins[idx.min(bin_count - 1)].count += 1;
        }

        Self { bins }
    }

    /// Returns the sum of all bin counts.
    #[must_use]
    pub fn total_count(&self) -> u64 {
        self.bins.iter().map(|bin| bin.count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_values() {
        let histogram = Histogram::new(&[], 30);
        assert!(histogram.bins.is_empty());
        assert_eq!(histogram.total_count(), 0);
    }

    #[test]
    fn test_zero_bins() {
        let histogram = Histogram::new(&[1.0, 2.0], 0);
        assert!(histogram.bins.is_empty());
    }

    #[test]
    fn test_zero_range_single_bin() {
        let histogram = Histogram::new(&[5.0, 5.0, 5.0], 30);
        assert_eq!(histogram.bins.len(), 1);
        assert_eq!(histogram.bins[0].label, "5.00");
        assert_eq!(histogram.bins[0].count, 3);
    }

    #[test]
    fn test_single_value() {
        let histogram = Histogram::new(&[42.126], DEFAULT_BIN_COUNT);
        assert_eq!(histogram.bins.len(), 1);
        assert_eq!(histogram.bins[0].label, "42.13");
        assert_eq!(histogram.bins[0].count, 1);
    }

    #[test]
    fn test_bin_count_is_fixed() {
        for len in [2, 10, 1000] {
            let values = (0..len).map(f64::from).collect::<Vec<_>>();
            let histogram = Histogram::new(&values, DEFAULT_BIN_COUNT);
            assert_eq!(histogram.bins.len(), DEFAULT_BIN_COUNT);
            assert_eq!(histogram.total_count(), values.len() as u64);
        }
    }

    #[test]
    fn test_max_lands_in_last_bin() {
        let values = [0.0, 0.1, 0.3, 0.7, 1.0];
        let histogram = Histogram::new(&values, 10);
        assert_eq!(histogram.bins.len(), 10);
        assert_eq!(histogram.bins[9].count, 1);
        assert_eq!(histogram.total_count(), 5);
    }

    #[test]
    fn test_counts_sum_for_awkward_widths() {
        // 0.1 steps do not divide evenly in binary floating point.
        let values = (0..=997).map(|i| f64::from(i) * 0.1).collect::<Vec<_>>();
        for bins in [3, 7, 30, 31, 97] {
            let histogram = Histogram::new(&values, bins);
            assert_eq!(histogram.bins.len(), bins);
            assert_eq!(histogram.total_count(), values.len() as u64);
        }
    }

    #[test]
    fn test_labels_are_left_edges() {
        let values = [10.0, 20.0, 30.0, 40.0];
        let histogram = Histogram::new(&values, 3);
        let labels = histogram
            .bins
            .iter()
            .map(|b| b.label.clone())
            .collect::<Vec<_>>();
        assert_eq!(labels, ["10.0", "20.0", "30.0"]);
        assert_eq!(histogram.bins[0].range, 10.0..20.0);
    }

    #[test]
    fn test_values_fall_inside_their_bin_range() {
        let values = [3.2, 8.9, 1.1, 4.4, 7.7, 2.5, 9.0];
        let histogram = Histogram::new(&values, 4);
        for &value in &values {
            let containing = histogram
                .bins
                .iter()
                .filter(|bin| bin.range.contains(&value))
                .count();
            assert_eq!(containing, 1, "value {value}");
        }
    }

    #[test]
    fn test_non_finite_values_are_ignored() {
        let values = [1.0, f64::NAN, 2.0, f64::INFINITY, 3.0];
        let histogram = Histogram::new(&values, 2);
        assert_eq!(histogram.bins.len(), 2);
        assert_eq!(histogram.total_count(), 3);
    }
}
