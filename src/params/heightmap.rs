//! Heightmap synthesis and export configuration.

use crate::error::{NoiseError, Result};

/// Heightmap synthesis parameters
#[derive(Debug, Clone)]
pub struct HeightmapParams {
    /// Buffer width (cells)
    pub width: u32,

    /// Buffer height (cells)
    pub height: u32,

    /// Number of fBm octaves per cell
    pub octaves: u32,

    /// Multiplier applied to the raw fBm sample
    pub scale: f32,

    /// Offset added after scaling (lifts the terrain above sea level)
    pub bias: f32,

    /// Weight of the radial falloff (normalized distance from center).
    /// 1.0 sinks the corners by ~0.71, 0.0 disables the island shape.
    pub falloff: f32,
}

impl Default for HeightmapParams {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 1024,
            octaves: 8,
            scale: 0.5,
            bias: 0.2,
            falloff: 1.0,
        }
    }
}

impl HeightmapParams {
    /// Parameters for a `width` x `height` buffer with default shaping
    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    /// Number of cells in the buffer
    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(NoiseError::InvalidParameter {
                name: "size",
                value: self.width.min(self.height) as f64,
                reason: "width and height must be > 0",
            });
        }
        for (name, value) in [
            ("scale", self.scale),
            ("bias", self.bias),
            ("falloff", self.falloff),
        ] {
            if !value.is_finite() {
                return Err(NoiseError::InvalidParameter {
                    name,
                    value: value as f64,
                    reason: "must be finite",
                });
            }
        }
        Ok(())
    }
}

/// On-disk encoding for a synthesized heightmap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// 8-bit grayscale PNG
    #[default]
    Png,
    /// Headerless row-major bytes, one per cell
    Raw,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Raw => "raw",
        }
    }
}
