//! perlin-lab library - Perlin noise and fractal heightmaps

pub mod cli;
pub mod diagnostics;
pub mod error;
pub mod heightmap;
pub mod noise;
pub mod params;

pub use error::{NoiseError, Result};
pub use heightmap::Heightmap;
pub use self::noise::{GradientSet, PerlinNoise, PermutationTable, Shuffle};
pub use params::{ExportFormat, HeightmapParams, NoiseParams};
