//! Crate-wide error type.

use thiserror::Error;

/// Errors produced by noise configuration, fractal summation and export.
///
/// Noise construction and single-octave evaluation never fail; everything
/// here comes from caller-supplied arguments or from writing output.
#[derive(Error, Debug)]
pub enum NoiseError {
    #[error("Octave count must be >= 0, got {0}")]
    NegativeOctaves(i32),
    #[error("Invalid parameter '{name}' = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
    #[error("Buffer of {len} bytes does not match {width}x{height}")]
    BufferSize { width: u32, height: u32, len: usize },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, NoiseError>;
