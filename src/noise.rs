//! Lattice noise generation for heightmaps.
//!
//! Classic 2D Perlin noise over a 256-cell periodic lattice, plus fractal
//! Brownian motion built from it. A generator owns its permutation table
//! and parameters and is immutable afterwards, so one instance can be
//! shared by reference across worker threads.

pub mod fractal;
mod gradient;
mod permutation;

use ::noise::NoiseFn;

use crate::error::Result;
use crate::params::NoiseParams;

pub use gradient::{fade, lerp, GradientSet};
pub use permutation::{PermutationTable, Shuffle, REFERENCE_PERMUTATION};

/// Period of the lattice along each axis
pub const LATTICE_PERIOD: f32 = 256.0;

/// Perlin noise generator
#[derive(Debug, Clone, Default)]
pub struct PerlinNoise {
    table: PermutationTable,
    params: NoiseParams,
}

impl PerlinNoise {
    /// Create a generator whose table is shuffled from `seed`
    pub fn new(seed: u64) -> Self {
        Self::with_table(
            PermutationTable::shuffled(seed, Shuffle::default()),
            NoiseParams::default(),
        )
    }

    /// Generator over the fixed reference table with default parameters
    pub fn reference() -> Self {
        Self::default()
    }

    /// Generator shuffled from the wall clock (differs every run)
    pub fn from_clock() -> Self {
        Self::with_table(
            PermutationTable::from_clock(Shuffle::default()),
            NoiseParams::default(),
        )
    }

    /// Create a generator from an explicit table and parameters.
    ///
    /// `params` is used as given; call [`NoiseParams::validate`] first or
    /// use [`try_with_table`](Self::try_with_table).
    pub fn with_table(table: PermutationTable, params: NoiseParams) -> Self {
        Self { table, params }
    }

    /// [`with_table`](Self::with_table), rejecting invalid parameters
    pub fn try_with_table(table: PermutationTable, params: NoiseParams) -> Result<Self> {
        params.validate()?;
        Ok(Self::with_table(table, params))
    }

    /// Replace the parameters, keeping the table
    pub fn with_params(self, params: NoiseParams) -> Self {
        Self { params, ..self }
    }

    pub fn table(&self) -> &PermutationTable {
        &self.table
    }

    pub fn params(&self) -> &NoiseParams {
        &self.params
    }

    /// Sample one octave of noise at `(x, y)`
    ///
    /// Returns a value in roughly [-1, 1]; the result is not clamped.
    /// Periodic with period 256 on both axes. Non-finite input yields NaN.
    pub fn evaluate(&self, x: f32, y: f32) -> f32 {
        let x_floor = x.floor();
        let y_floor = y.floor();

        // rem_euclid on the float is exact; an integer cast would saturate past 2^31
        let cell_x = x_floor.rem_euclid(LATTICE_PERIOD) as usize;
        let cell_y = y_floor.rem_euclid(LATTICE_PERIOD) as usize;

        let x = x - x_floor;
        let y = y - y_floor;

        let u = fade(x);
        let v = fade(y);

        let p = &self.table;
        let bottom_left = p.get(p.get(cell_x) + cell_y);
        let bottom_right = p.get(p.get(cell_x + 1) + cell_y);
        let top_left = p.get(p.get(cell_x) + cell_y + 1);
        let top_right = p.get(p.get(cell_x + 1) + cell_y + 1);

        let grad = self.params.gradients;
        lerp(
            v,
            lerp(
                u,
                grad.grad(bottom_left, x, y),
                grad.grad(bottom_right, x - 1.0, y),
            ),
            lerp(
                u,
                grad.grad(top_left, x, y - 1.0),
                grad.grad(top_right, x - 1.0, y - 1.0),
            ),
        )
    }

    /// Fractal Brownian motion: `octaves` layers of noise with rising
    /// frequency and decaying amplitude, summed without normalization.
    ///
    /// Fails only for a negative octave count; zero octaves sum to 0.
    pub fn fractal_sum(&self, x: f32, y: f32, octaves: i32) -> Result<f32> {
        let count = fractal::octave_count(octaves)?;
        Ok(self.fbm(x, y, count))
    }

    /// [`fractal_sum`](Self::fractal_sum) for an already validated count
    pub fn fbm(&self, x: f32, y: f32, octaves: u32) -> f32 {
        fractal::sum(&self.params, octaves, x, y, |x, y| self.evaluate(x, y))
    }
}

/// Evaluates in f32, so coordinates lose precision beyond 2^24.
impl NoiseFn<f64, 2> for PerlinNoise {
    fn get(&self, point: [f64; 2]) -> f64 {
        self.evaluate(point[0] as f32, point[1] as f32) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NoiseError;

    /// Coordinates on a 1/16 grid are exact in f32 even after adding 256
    fn dyadic_points() -> impl Iterator<Item = (f32, f32)> {
        (-40..40).flat_map(|i| {
            (-8..8).map(move |j| (i as f32 * 0.8125, j as f32 * 1.4375 + 0.0625))
        })
    }

    #[test]
    fn test_lattice_points_are_zero() {
        let noise = PerlinNoise::new(3);
        for x in -5..5 {
            for y in -5..5 {
                assert_eq!(noise.evaluate(x as f32, y as f32), 0.0);
            }
        }
    }

    #[test]
    fn test_periodic_over_256() {
        for noise in [PerlinNoise::reference(), PerlinNoise::new(11)] {
            for (x, y) in dyadic_points() {
                let value = noise.evaluate(x, y);
                assert_eq!(value, noise.evaluate(x + LATTICE_PERIOD, y));
                assert_eq!(value, noise.evaluate(x, y + LATTICE_PERIOD));
                assert_eq!(value, noise.evaluate(x - LATTICE_PERIOD, y - LATTICE_PERIOD));
            }
        }
    }

    #[test]
    fn test_periodic_past_i32_range() {
        let noise = PerlinNoise::new(11);
        // Multiples of 128 are exact in f32 around 2^31
        for (big, small) in [
            (2147483392.0, 0.0),
            (2147483520.0, 128.0),
            (2147483648.0, 0.0),
            (4294967296.0, 0.0),
            (1099511627776.0 + 512.0, 0.0),
            (-2147483520.0, 128.0),
        ] {
            for k in 0..8 {
                let y = k as f32 * 0.25 + 0.125;
                assert_eq!(noise.evaluate(big, y), noise.evaluate(small, y));
                assert_eq!(noise.evaluate(y, big), noise.evaluate(y, small));
            }
        }
        assert_eq!(
            noise.evaluate(2147483392.0, 0.5),
            noise.evaluate(2147483392.0 + LATTICE_PERIOD, 0.5)
        );
    }

    #[test]
    fn test_try_with_table_validates() {
        let bad = NoiseParams {
            base_frequency: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(
            PerlinNoise::try_with_table(PermutationTable::reference(), bad),
            Err(NoiseError::InvalidParameter {
                name: "base_frequency",
                ..
            })
        ));
        assert!(
            PerlinNoise::try_with_table(PermutationTable::reference(), NoiseParams::default())
                .is_ok()
        );
    }

    #[test]
    fn test_deterministic() {
        let noise = PerlinNoise::new(99);
        for i in 0..200 {
            let (x, y) = (i as f32 * 0.37, i as f32 * -1.13);
            assert_eq!(
                noise.evaluate(x, y).to_bits(),
                noise.evaluate(x, y).to_bits()
            );
        }
        let other = PerlinNoise::new(99);
        assert_eq!(noise.evaluate(3.3, 4.4), other.evaluate(3.3, 4.4));
    }

    #[test]
    fn test_continuous() {
        let noise = PerlinNoise::new(5);
        let eps = 1e-3;
        for i in 0..500 {
            let x = i as f32 * 0.173 - 30.0;
            let y = i as f32 * 0.071 + 2.0;
            let value = noise.evaluate(x, y);
            assert!((noise.evaluate(x + eps, y) - value).abs() < 0.02);
            assert!((noise.evaluate(x, y + eps) - value).abs() < 0.02);
        }
    }

    #[test]
    fn test_no_jump_across_cell_boundaries() {
        let noise = PerlinNoise::new(8);
        for cell in -4..12 {
            let edge = cell as f32;
            for k in 0..10 {
                let other = k as f32 * 0.37 + 0.1;
                let before = noise.evaluate(edge - 1e-3, other);
                let at = noise.evaluate(edge, other);
                assert!((before - at).abs() < 0.02, "x jump at cell {}", cell);

                let before = noise.evaluate(other, edge - 1e-3);
                let at = noise.evaluate(other, edge);
                assert!((before - at).abs() < 0.02, "y jump at cell {}", cell);
            }
        }
    }

    #[test]
    fn test_half_cell_samples_within_unit_range() {
        let noise = PerlinNoise::reference();
        for x in 0..64 {
            for y in 0..64 {
                let value = noise.evaluate(x as f32 + 0.5, y as f32 + 0.5);
                assert!((-1.0..=1.0).contains(&value), "{} at ({}, {})", value, x, y);
            }
        }
    }

    #[test]
    fn test_gradient_sets_differ() {
        let reduced = PerlinNoise::reference();
        let classic = PerlinNoise::reference().with_params(NoiseParams {
            gradients: GradientSet::Classic,
            ..Default::default()
        });
        let differing = dyadic_points()
            .filter(|&(x, y)| reduced.evaluate(x, y) != classic.evaluate(x, y))
            .count();
        assert!(differing > 0);
    }

    #[test]
    fn test_non_finite_propagates() {
        let noise = PerlinNoise::reference();
        assert!(noise.evaluate(f32::NAN, 1.5).is_nan());
        assert!(noise.evaluate(0.5, f32::INFINITY).is_nan());
    }

    #[test]
    fn test_fractal_sum_zero_octaves() {
        let noise = PerlinNoise::new(1);
        for (x, y) in dyadic_points() {
            assert_eq!(noise.fractal_sum(x, y, 0).unwrap(), 0.0);
        }
    }

    #[test]
    fn test_fractal_sum_rejects_negative_octaves() {
        let noise = PerlinNoise::reference();
        assert!(matches!(
            noise.fractal_sum(1.0, 2.0, -3),
            Err(NoiseError::NegativeOctaves(-3))
        ));
    }

    #[test]
    fn test_single_octave_matches_scaled_evaluate() {
        let noise = PerlinNoise::new(21);
        let frequency = noise.params().base_frequency;
        let (x, y) = (300.0, 700.0);
        assert_eq!(
            noise.fractal_sum(x, y, 1).unwrap(),
            noise.evaluate(x * frequency, y * frequency)
        );
    }

    #[test]
    fn test_seeded_fractal_sum_is_bounded_and_reproducible() {
        let first = PerlinNoise::new(42).fractal_sum(10.5, 20.5, 8).unwrap();
        let second = PerlinNoise::new(42).fractal_sum(10.5, 20.5, 8).unwrap();
        assert!((-2.0..=2.0).contains(&first));
        assert_eq!(first.to_bits(), second.to_bits());
    }

    #[test]
    fn test_fractal_sum_survives_frequency_overflow() {
        let noise = PerlinNoise::new(42);
        for octaves in [40, 130, 300] {
            let value = noise.fractal_sum(1000.5, 1000.5, octaves).unwrap();
            assert!(value.is_finite() && (-2.0..=2.0).contains(&value), "{}", value);
        }
        assert!(noise.fractal_sum(0.0, 0.0, 300).unwrap().is_finite());
        // Non-finite input still propagates
        assert!(noise.fractal_sum(f32::NAN, 1.0, 130).unwrap().is_nan());
    }

    #[test]
    fn test_noise_fn_matches_evaluate() {
        let noise = PerlinNoise::new(4);
        let value = noise.get([12.25, -3.75]);
        assert_eq!(value, noise.evaluate(12.25, -3.75) as f64);
    }
}
