//! Histogramming of generated distributions, for diagnostic output

use crate::numeric::Float;

use prefix_num_ops::real::*;

/// Histogram with equal-width bins and asymmetric counting errors
#[derive(Clone, Debug, PartialEq)]
pub struct Histogram {
    /// Centre of each bin
    pub centers: Vec<Float>,

    /// Number of entries in each bin
    pub counts: Vec<usize>,

    /// Lower and upper error bar of each bin
    pub errors: Vec<(Float, Float)>,
}
//
impl Histogram {
    /// Histogram `data` into `num_bins` bins spanning `range`
    ///
    /// The range defaults to the extent of the data. Values outside of the
    /// range are ignored, and the last bin includes its upper edge.
    ///
    pub fn new(data: &[Float], range: Option<(Float, Float)>, num_bins: usize) -> Self {
        assert!(num_bins > 0, "A histogram needs at least one bin");
        let (low, high) = range.unwrap_or_else(|| {
            data.iter()
                .fold((Float::INFINITY, Float::NEG_INFINITY), |(lo, hi), &x| {
                    (lo.min(x), hi.max(x))
                })
        });

        // A degenerate range gets a unit width, centered on its value
        let (low, high) = if low < high {
            (low, high)
        } else if low == high {
            (low - 0.5, high + 0.5)
        } else {
            (0., 1.)
        };
        let width = (high - low) / num_bins as Float;

        // Fill the bins
        let mut counts = vec![0; num_bins];
        for &x in data {
            if !(low..=high).contains(&x) {
                continue;
            }
            let bin = (((x - low) / width) as usize).min(num_bins - 1);
            counts[bin] += 1;
        }

        // Compute the error bars, normalized to the fraction of data which
        // made it into the histogram
        let total = counts.iter().sum::<usize>();
        let norm = if data.is_empty() {
            1.
        } else {
            total as Float / data.len() as Float
        };
        let errors = counts
            .iter()
            .map(|&count| {
                let root = if norm > 0. {
                    sqrt(count as Float / norm + 0.25)
                } else {
                    0.5
                };
                ((root - 0.5) * norm, (root + 0.5) * norm)
            })
            .collect();

        let centers = (0..num_bins)
            .map(|bin| low + (bin as Float + 0.5) * width)
            .collect();

        Self {
            centers,
            counts,
            errors,
        }
    }

    /// Number of bins
    pub fn num_bins(&self) -> usize {
        self.counts.len()
    }

    /// Total number of entries
    pub fn entries(&self) -> usize {
        self.counts.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn counting() {
        let data = [0., 0.5, 1., 1.5, 2., 2., 3.9, 4.];
        let hist = Histogram::new(&data, Some((0., 4.)), 4);
        assert_eq!(hist.centers, vec![0.5, 1.5, 2.5, 3.5]);
        assert_eq!(hist.counts, vec![2, 2, 2, 2]);
        assert_eq!(hist.entries(), data.len());
    }

    #[test]
    fn out_of_range_values() {
        let data = [-1., 0.25, 0.75, 2.];
        let hist = Histogram::new(&data, Some((0., 1.)), 2);
        assert_eq!(hist.counts, vec![1, 1]);

        // Half of the data is in range
        let root = sqrt(1. / 0.5 + 0.25);
        assert_relative_eq!(hist.errors[0].0, (root - 0.5) * 0.5);
        assert_relative_eq!(hist.errors[0].1, (root + 0.5) * 0.5);
    }

    #[test]
    fn default_range() {
        let data = [490., 495., 500., 505.];
        let hist = Histogram::new(&data, None, 3);
        assert_eq!(hist.num_bins(), 3);
        assert_relative_eq!(hist.centers[0], 492.5);
        assert_relative_eq!(hist.centers[2], 502.5);
        assert_eq!(hist.counts, vec![1, 1, 2]);
    }

    #[test]
    fn error_bars() {
        let data = [0.5; 6];
        let hist = Histogram::new(&data, Some((0., 1.)), 1);
        // With all data in range, errors are sqrt(n + 1/4) ∓ 1/2
        assert_relative_eq!(hist.errors[0].0, 2.);
        assert_relative_eq!(hist.errors[0].1, 3.);
    }

    #[test]
    fn single_value() {
        let hist = Histogram::new(&[7.; 3], None, 2);
        assert_eq!(hist.counts, vec![0, 3]);
        assert_relative_eq!(hist.centers[0], 6.75);
    }
}
