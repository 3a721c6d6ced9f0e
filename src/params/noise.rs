//! Noise evaluation and fractal summation parameters.

use crate::error::{NoiseError, Result};
use crate::noise::GradientSet;

/// Parameters shared by every evaluation on a noise generator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoiseParams {
    /// Frequency of the first fBm octave (lattice cells per input unit).
    /// At 0.005 a 1024-pixel heightmap spans about five lattice cells.
    pub base_frequency: f32,

    /// Amplitude multiplier applied after each octave (persistence).
    /// Must be in (0, 1]; 0.5 halves each octave's contribution.
    pub amplitude_decay: f32,

    /// Frequency multiplier applied after each octave (lacunarity)
    pub lacunarity: f32,

    /// Corner gradient selector
    pub gradients: GradientSet,
}

impl Default for NoiseParams {
    fn default() -> Self {
        Self {
            base_frequency: 0.005,
            amplitude_decay: 0.5,
            lacunarity: 2.0,
            gradients: GradientSet::Reduced,
        }
    }
}

impl NoiseParams {
    /// Validate configuration (positive finite frequency, decay in (0, 1], etc.)
    pub fn validate(&self) -> Result<()> {
        if !(self.base_frequency.is_finite() && self.base_frequency > 0.0) {
            return Err(NoiseError::InvalidParameter {
                name: "base_frequency",
                value: self.base_frequency as f64,
                reason: "must be finite and > 0",
            });
        }
        if !(self.amplitude_decay > 0.0 && self.amplitude_decay <= 1.0) {
            return Err(NoiseError::InvalidParameter {
                name: "amplitude_decay",
                value: self.amplitude_decay as f64,
                reason: "must be in (0, 1]",
            });
        }
        if !(self.lacunarity.is_finite() && self.lacunarity > 0.0) {
            return Err(NoiseError::InvalidParameter {
                name: "lacunarity",
                value: self.lacunarity as f64,
                reason: "must be finite and > 0",
            });
        }
        Ok(())
    }
}
