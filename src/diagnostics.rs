//! Empirical range statistics for 2D noise functions.
//!
//! Single-octave Perlin noise is only approximately bounded by [-1, 1].
//! These counters sample a dense grid and report how often a function
//! leaves that range or lands near its edges.

use noise::NoiseFn;
use rayon::prelude::*;

/// Magnitude above which a sample counts as "high"
pub const HIGH_THRESHOLD: f64 = 0.9;

/// Sample statistics over a grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeReport {
    pub samples: u64,
    /// Samples outside [-1, 1]
    pub out_of_range: u64,
    /// Samples with magnitude above [`HIGH_THRESHOLD`]
    pub high: u64,
    pub min: f64,
    pub max: f64,
}

impl Default for RangeReport {
    fn default() -> Self {
        Self {
            samples: 0,
            out_of_range: 0,
            high: 0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }
}

impl RangeReport {
    /// Sample `source` at `(x + offset, y + offset)` for every integer
    /// `x` in `0..width` and `y` in `0..height`. An offset of 0.5 keeps
    /// every sample off the lattice, where noise is exactly zero.
    pub fn measure<N>(source: &N, width: u32, height: u32, offset: f64) -> Self
    where
        N: NoiseFn<f64, 2> + Sync,
    {
        let report = (0..height)
            .into_par_iter()
            .map(|y| {
                (0..width).fold(Self::default(), |mut row, x| {
                    row.record(source.get([x as f64 + offset, y as f64 + offset]));
                    row
                })
            })
            .reduce(Self::default, Self::merge);

        log::info!(
            "Sampled {} points: {} out of range, {} high, range [{:.4}, {:.4}]",
            report.samples,
            report.out_of_range,
            report.high,
            report.min,
            report.max
        );
        report
    }

    fn record(&mut self, value: f64) {
        self.samples += 1;
        if !(-1.0..=1.0).contains(&value) {
            self.out_of_range += 1;
        }
        if value.abs() > HIGH_THRESHOLD {
            self.high += 1;
        }
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    fn merge(self, other: Self) -> Self {
        Self {
            samples: self.samples + other.samples,
            out_of_range: self.out_of_range + other.out_of_range,
            high: self.high + other.high,
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Fraction of samples outside [-1, 1]
    pub fn out_of_range_rate(&self) -> f64 {
        if self.samples == 0 {
            return 0.0;
        }
        self.out_of_range as f64 / self.samples as f64
    }

    /// Fraction of samples with magnitude above [`HIGH_THRESHOLD`]
    pub fn high_rate(&self) -> f64 {
        if self.samples == 0 {
            return 0.0;
        }
        self.high as f64 / self.samples as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::{GradientSet, PerlinNoise};
    use crate::params::NoiseParams;

    /// Tolerated share of single-octave samples outside [-1, 1]
    const OUT_OF_RANGE_TOLERANCE: f64 = 0.01;

    #[test]
    fn test_half_offset_grid_stays_in_range() {
        let noise = PerlinNoise::new(2024);
        let report = RangeReport::measure(&noise, 1024, 1024, 0.5);

        assert_eq!(report.samples, 1024 * 1024);
        assert!(report.out_of_range_rate() <= OUT_OF_RANGE_TOLERANCE);
        assert!(report.high_rate() < 0.5);
        assert!(report.min < 0.0 && report.max > 0.0);
    }

    #[test]
    fn test_off_center_grid_rate() {
        // Offsets away from the cell center exercise the whole fade curve
        for gradients in [GradientSet::Reduced, GradientSet::Classic] {
            let noise = PerlinNoise::reference().with_params(NoiseParams {
                gradients,
                ..Default::default()
            });
            let report = RangeReport::measure(&noise, 512, 512, 0.3);
            assert!(
                report.out_of_range_rate() <= OUT_OF_RANGE_TOLERANCE,
                "{:?}: {:?}",
                gradients,
                report
            );
        }
    }

    #[test]
    fn test_lattice_grid_is_all_zero() {
        let report = RangeReport::measure(&PerlinNoise::reference(), 32, 32, 0.0);
        assert_eq!(report.samples, 1024);
        assert_eq!(report.high, 0);
        assert_eq!((report.min, report.max), (0.0, 0.0));
    }

    #[test]
    fn test_counts_values_outside_range() {
        let report = RangeReport::measure(&noise::Constant::new(1.5), 4, 4, 0.0);
        assert_eq!(report.out_of_range, 16);
        assert_eq!(report.high, 16);
        assert_eq!(report.out_of_range_rate(), 1.0);
    }

    #[test]
    fn test_empty_grid() {
        let report = RangeReport::measure(&PerlinNoise::reference(), 0, 0, 0.5);
        assert_eq!(report.samples, 0);
        assert_eq!(report.out_of_range_rate(), 0.0);
    }
}
