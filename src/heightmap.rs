//! Island heightmap synthesis from fractal noise.
//!
//! Produces the single-channel displacement texture used by the terrain
//! demo: fBm noise, rescaled, pushed down by distance from the center and
//! quantized to one byte per cell.

use std::fs;
use std::path::Path;
use std::time::Instant;

use glam::Vec2;
use image::GrayImage;
use rayon::prelude::*;

use crate::error::{NoiseError, Result};
use crate::noise::PerlinNoise;
use crate::params::{ExportFormat, HeightmapParams};

/// Row-major 8-bit heightmap (`data[y * width + x]`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heightmap {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Heightmap {
    /// Synthesize a heightmap from `noise` using `params.octaves` of fBm per cell
    pub fn synthesize(noise: &PerlinNoise, params: &HeightmapParams) -> Result<Self> {
        let octaves = params.octaves;
        Self::synthesize_with(params, |x, y| noise.fbm(x, y, octaves))
    }

    /// Synthesize with an arbitrary sampler in place of fBm.
    ///
    /// `sample` receives integer cell coordinates as floats and is called
    /// from several threads at once.
    pub fn synthesize_with<F>(params: &HeightmapParams, sample: F) -> Result<Self>
    where
        F: Fn(f32, f32) -> f32 + Sync,
    {
        params.validate()?;
        let start = Instant::now();

        let width = params.width as usize;
        let mut data = vec![0u8; params.cell_count()];

        data.par_chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| {
                for (x, cell) in row.iter_mut().enumerate() {
                    let value = sample(x as f32, y as f32);
                    *cell = shape_cell(value, x as u32, y as u32, params);
                }
            });

        log::debug!(
            "Synthesized {}x{} heightmap ({} octaves) in {:.2}ms",
            params.width,
            params.height,
            params.octaves,
            start.elapsed().as_secs_f64() * 1000.0
        );

        Ok(Self {
            width: params.width,
            height: params.height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Cell value at `(x, y)`, `None` outside the buffer
    pub fn get(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Raw row-major bytes, ready for texture upload
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Smallest and largest cell values
    pub fn value_range(&self) -> (u8, u8) {
        self.data
            .iter()
            .fold((u8::MAX, u8::MIN), |(lo, hi), &v| (lo.min(v), hi.max(v)))
    }

    /// Copy into an 8-bit grayscale image
    pub fn to_image(&self) -> Result<GrayImage> {
        GrayImage::from_raw(self.width, self.height, self.data.clone()).ok_or(
            NoiseError::BufferSize {
                width: self.width,
                height: self.height,
                len: self.data.len(),
            },
        )
    }

    /// Write as an 8-bit grayscale PNG
    pub fn save_png(&self, path: &Path) -> Result<()> {
        self.to_image()?.save(path)?;
        Ok(())
    }

    /// Write the bytes with no header
    pub fn save_raw(&self, path: &Path) -> Result<()> {
        fs::write(path, &self.data)?;
        Ok(())
    }

    /// Write in `format`, creating parent directories as needed
    pub fn save(&self, path: &Path, format: ExportFormat) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        match format {
            ExportFormat::Png => self.save_png(path),
            ExportFormat::Raw => self.save_raw(path),
        }
    }
}

/// Distance of cell `(x, y)` from the buffer center in normalized units.
/// 0 at the center, about 0.71 at the corners.
pub fn radial_falloff(x: u32, y: u32, width: u32, height: u32) -> f32 {
    let position = Vec2::new(x as f32 / width as f32, y as f32 / height as f32);
    position.distance(Vec2::splat(0.5))
}

/// Rescale one noise sample, subtract the falloff, clamp and quantize
fn shape_cell(sample: f32, x: u32, y: u32, params: &HeightmapParams) -> u8 {
    let mut value = sample * params.scale + params.bias;
    value -= params.falloff * radial_falloff(x, y, params.width, params.height);
    // NaN compares false here and quantizes to 0 below
    if value < 0.0 {
        value = 0.0;
    }
    (value * 255.0).clamp(0.0, 255.0) as u8
}
