//! Fractal Brownian motion: octave schedule and summation.

use crate::error::{NoiseError, Result};
use crate::params::NoiseParams;

/// One fBm layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Octave {
    pub frequency: f32,
    pub amplitude: f32,
}

/// Iterator over the first `count` octaves of a schedule
#[derive(Debug, Clone)]
pub struct Octaves {
    next: Octave,
    remaining: u32,
    amplitude_decay: f32,
    lacunarity: f32,
}

impl Iterator for Octaves {
    type Item = Octave;

    fn next(&mut self) -> Option<Octave> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let current = self.next;
        self.next = Octave {
            frequency: current.frequency * self.lacunarity,
            amplitude: current.amplitude * self.amplitude_decay,
        };
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Octaves {}

/// Octave schedule starting at amplitude 1 and `params.base_frequency`
pub fn octaves(params: &NoiseParams, count: u32) -> Octaves {
    Octaves {
        next: Octave {
            frequency: params.base_frequency,
            amplitude: 1.0,
        },
        remaining: count,
        amplitude_decay: params.amplitude_decay,
        lacunarity: params.lacunarity,
    }
}

/// Convert a signed octave count, rejecting negatives
pub fn octave_count(octaves: i32) -> Result<u32> {
    u32::try_from(octaves).map_err(|_| NoiseError::NegativeOctaves(octaves))
}

/// Sum `sample` over the schedule. The total is not divided by the
/// amplitude budget, so with decay 0.5 it can reach about twice the
/// single-octave range.
///
/// For finite input the sum stops early once the scaled coordinates
/// overflow or the amplitude underflows to zero; later octaves cannot
/// contribute. Non-finite input is sampled as-is and propagates.
pub fn sum<F>(params: &NoiseParams, count: u32, x: f32, y: f32, sample: F) -> f32
where
    F: Fn(f32, f32) -> f32,
{
    let finite_input = x.is_finite() && y.is_finite();
    let mut result = 0.0;

    for octave in octaves(params, count) {
        let (scaled_x, scaled_y) = (x * octave.frequency, y * octave.frequency);
        if finite_input
            && (octave.amplitude == 0.0 || !scaled_x.is_finite() || !scaled_y.is_finite())
        {
            break;
        }
        result += octave.amplitude * sample(scaled_x, scaled_y);
    }
    result
}

/// Upper bound on `|sum|` given a per-octave bound of 1
pub fn amplitude_budget(params: &NoiseParams, count: u32) -> f32 {
    octaves(params, count).map(|octave| octave.amplitude).sum()
}
