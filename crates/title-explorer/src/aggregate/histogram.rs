//! Equal-width histograms.

use serde::{Deserialize, Serialize};

/// One histogram bucket, `[lower, upper)` except the last which is closed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    pub bins: Vec<HistogramBin>,
}

impl Histogram {
    /// Bucket `values` into `bin_count` equal-width bins spanning the
    /// observed minimum and maximum.
    ///
    /// A single distinct value is widened to `value ± 0.5`. No values (or a
    /// zero bin count) yields an empty histogram.
    pub fn from_values(values: &[f64], bin_count: usize) -> Self {
        let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if finite.is_empty() || bin_count == 0 {
            return Self::default();
        }

        let (mut lower, mut upper) = finite
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        if lower == upper {
            lower -= 0.5;
            upper += 0.5;
        }

        let width = (upper - lower) / bin_count as f64;
        let mut bins: Vec<HistogramBin> = (0..bin_count)
            .map(|i| HistogramBin {
                lower: lower + width * i as f64,
                upper: if i + 1 == bin_count {
                    upper
                } else {
                    lower + width * (i + 1) as f64
                },
                count: 0,
            })
            .collect();

        for value in finite {
            let index = (((value - lower) / width) as usize).min(bin_count - 1);
            bins[index].count += 1;
        }

        Self { bins }
    }

    /// Total number of values counted.
    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Largest single bin count, used to scale bar widths.
    pub fn max_count(&self) -> usize {
        self.bins.iter().map(|b| b.count).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        let hist = Histogram::from_values(&[], 30);
        assert!(hist.bins.is_empty());
        assert_eq!(hist.total(), 0);
        assert!(hist.is_empty());
    }

    #[test]
    fn test_bin_edges_span_min_max() {
        let hist = Histogram::from_values(&[0.0, 10.0], 5);
        assert_eq!(hist.bins.len(), 5);
        assert_eq!(hist.bins[0].lower, 0.0);
        assert_eq!(hist.bins[0].upper, 2.0);
        assert_eq!(hist.bins[4].upper, 10.0);
    }

    #[test]
    fn test_max_lands_in_last_bin() {
        let hist = Histogram::from_values(&[0.0, 5.0, 10.0], 2);
        assert_eq!(hist.bins[0].count, 1);
        assert_eq!(hist.bins[1].count, 2);
        assert_eq!(hist.total(), 3);
    }

    #[test]
    fn test_single_value_widened() {
        let hist = Histogram::from_values(&[2020.0, 2020.0], 30);
        assert_eq!(hist.bins.len(), 30);
        assert_eq!(hist.bins[0].lower, 2019.5);
        assert_eq!(hist.bins[29].upper, 2020.5);
        assert_eq!(hist.total(), 2);
        assert_eq!(hist.bins[15].count, 2);
    }

    #[test]
    fn test_counts_sum_to_inputs() {
        let values: Vec<f64> = (1925..=2021).map(f64::from).collect();
        let hist = Histogram::from_values(&values, 30);
        assert_eq!(hist.total(), values.len());
        assert!(hist.max_count() >= values.len() / 30);
    }

    #[test]
    fn test_non_finite_values_ignored() {
        let hist = Histogram::from_values(&[1.0, f64::NAN, 3.0], 2);
        assert_eq!(hist.total(), 2);
    }
}
