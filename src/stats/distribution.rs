//! Histogram binning and kernel density overlay for numeric distributions.

use serde::Serialize;
use statrs::distribution::{Continuous, Normal};
use statrs::statistics::Statistics;

/// Points evaluated along the density curve.
const DENSITY_POINTS: usize = 200;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// Equal-width histogram with a density curve scaled to bin counts.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Histogram {
    pub bins: Vec<HistogramBin>,
    /// `(x, scaled density)` pairs; empty when no estimate is possible.
    pub density: Vec<(f64, f64)>,
}

impl Histogram {
    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }

    pub fn max_count(&self) -> usize {
        self.bins.iter().map(|b| b.count).fold(0, usize::max)
    }

    pub fn bin_width(&self) -> f64 {
        self.bins.first().map(|b| b.end - b.start).unwrap_or(0.0)
    }
}

pub struct DistributionCalculator;

impl DistributionCalculator {
    /// Bin `values` into `bin_count` equal-width bins spanning min..=max
    /// (last bin closed) and attach a Gaussian KDE overlay.
    pub fn histogram(values: &[f64], bin_count: usize) -> Histogram {
        if values.is_empty() || bin_count == 0 {
            return Histogram::default();
        }

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        // A single distinct value still gets one unit-wide bin.
        let (lo, width, bin_count) = if max > min {
            (min, (max - min) / bin_count as f64, bin_count)
        } else {
            (min - 0.5, 1.0, 1)
        };

        let mut bins: Vec<HistogramBin> = (0..bin_count)
            .map(|i| HistogramBin {
                start: lo + i as f64 * width,
                end: lo + (i + 1) as f64 * width,
                count: 0,
            })
            .collect();

        for &v in values {
            let idx = (((v - lo) / width).floor() as usize).min(bin_count - 1);
            bins[idx].count += 1;
        }

        let density = Self::kde_curve(values, min, max)
            .into_iter()
            .map(|(x, d)| (x, d * values.len() as f64 * width))
            .collect();

        Histogram { bins, density }
    }

    /// Scott's rule bandwidth: sample standard deviation times n^(-1/5).
    pub fn scott_bandwidth(values: &[f64]) -> Option<f64> {
        if values.len() < 2 {
            return None;
        }
        let std = values.iter().std_dev();
        let bw = std * (values.len() as f64).powf(-0.2);
        (bw.is_finite() && bw > 0.0).then_some(bw)
    }

    /// Gaussian kernel density estimate evaluated on an even grid over `lo..=hi`.
    pub fn kde_curve(values: &[f64], lo: f64, hi: f64) -> Vec<(f64, f64)> {
        let Some(bandwidth) = Self::scott_bandwidth(values) else {
            return Vec::new();
        };
        let Ok(kernel) = Normal::new(0.0, 1.0) else {
            return Vec::new();
        };

        let n = values.len() as f64;
        let step = (hi - lo) / (DENSITY_POINTS - 1) as f64;

        (0..DENSITY_POINTS)
            .map(|i| {
                let x = lo + i as f64 * step;
                let sum: f64 = values
                    .iter()
                    .map(|&v| kernel.pdf((x - v) / bandwidth))
                    .sum();
                (x, sum / (n * bandwidth))
            })
            .collect()
    }
}
