//! Parameter definitions with documented units and defaults.
//!
//! The demos hard-coded these constants inline; they live here with:
//! - Documented ranges and meanings
//! - Defaults matching the terrain texture demo
//! - `validate()` checks before use

mod heightmap;
mod noise;

// Re-export all types
pub use self::heightmap::{ExportFormat, HeightmapParams};
pub use self::noise::NoiseParams;
