//! Command-line argument parsing.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::error::{NoiseError, Result};
use crate::noise::{GradientSet, PerlinNoise, PermutationTable, Shuffle};
use crate::params::{ExportFormat, HeightmapParams, NoiseParams};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "perlin-lab")]
#[command(about = "Perlin noise and fractal heightmap generator", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render an island heightmap texture to disk
    Heightmap(HeightmapArgs),

    /// Count single-octave samples outside [-1, 1] on a half-offset grid
    Diagnose(DiagnoseArgs),

    /// Print single-octave and fractal samples at one point
    Sample(SampleArgs),
}

/// Permutation table source
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TableSource {
    /// Fixed reference permutation (reproducible)
    Reference,
    /// Reference permutation shuffled from --seed
    Shuffled,
    /// Reference permutation shuffled from the system clock
    Clock,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShuffleArg {
    FullRange,
    FisherYates,
}

impl From<ShuffleArg> for Shuffle {
    fn from(arg: ShuffleArg) -> Self {
        match arg {
            ShuffleArg::FullRange => Shuffle::FullRange,
            ShuffleArg::FisherYates => Shuffle::FisherYates,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum GradientArg {
    Reduced,
    Classic,
}

impl From<GradientArg> for GradientSet {
    fn from(arg: GradientArg) -> Self {
        match arg {
            GradientArg::Reduced => GradientSet::Reduced,
            GradientArg::Classic => GradientSet::Classic,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormatArg {
    Png,
    Raw,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Png => ExportFormat::Png,
            FormatArg::Raw => ExportFormat::Raw,
        }
    }
}

/// Options shared by every subcommand that builds a generator
#[derive(Args, Debug, Clone)]
pub struct NoiseArgs {
    /// Permutation table source
    #[arg(long, value_enum, default_value = "reference")]
    pub table: TableSource,

    /// Seed for the shuffled table (the noise-rs diagnostic source accepts
    /// only values up to 4294967295)
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Shuffle strategy for shuffled and clock tables
    #[arg(long, value_enum, default_value = "full-range")]
    pub shuffle: ShuffleArg,

    /// Corner gradient set
    #[arg(long, value_enum, default_value = "reduced")]
    pub gradients: GradientArg,

    /// Frequency of the first octave
    #[arg(long, default_value_t = 0.005)]
    pub base_frequency: f32,

    /// Amplitude multiplier per octave (0-1]
    #[arg(long, default_value_t = 0.5)]
    pub amplitude_decay: f32,

    /// Frequency multiplier per octave
    #[arg(long, default_value_t = 2.0)]
    pub lacunarity: f32,
}

impl NoiseArgs {
    pub fn noise_params(&self) -> NoiseParams {
        NoiseParams {
            base_frequency: self.base_frequency,
            amplitude_decay: self.amplitude_decay,
            lacunarity: self.lacunarity,
            gradients: self.gradients.into(),
        }
    }

    /// Build the generator described by these options
    pub fn build_noise(&self) -> Result<PerlinNoise> {
        let params = self.noise_params();

        let shuffle = self.shuffle.into();
        let table = match self.table {
            TableSource::Reference => PermutationTable::reference(),
            TableSource::Shuffled => PermutationTable::shuffled(self.seed, shuffle),
            TableSource::Clock => PermutationTable::from_clock(shuffle),
        };
        PerlinNoise::try_with_table(table, params)
    }

    /// `--seed` as a noise-rs seed, which is 32-bit
    pub fn noise_rs_seed(&self) -> Result<u32> {
        u32::try_from(self.seed).map_err(|_| NoiseError::InvalidParameter {
            name: "seed",
            value: self.seed as f64,
            reason: "noise-rs seeds must fit in 32 bits",
        })
    }
}

#[derive(Args, Debug)]
pub struct HeightmapArgs {
    #[command(flatten)]
    pub noise: NoiseArgs,

    /// Buffer width in cells
    #[arg(long, default_value_t = 1024)]
    pub width: u32,

    /// Buffer height in cells
    #[arg(long, default_value_t = 1024)]
    pub height: u32,

    /// fBm octaves per cell
    #[arg(long, default_value_t = 8, allow_negative_numbers = true)]
    pub octaves: i32,

    /// Multiplier applied to the fBm sample
    #[arg(long, default_value_t = 0.5)]
    pub scale: f32,

    /// Offset added after scaling
    #[arg(long, default_value_t = 0.2, allow_negative_numbers = true)]
    pub bias: f32,

    /// Weight of the radial falloff (0 disables it)
    #[arg(long, default_value_t = 1.0)]
    pub falloff: f32,

    /// Output encoding
    #[arg(long, value_enum, default_value = "png")]
    pub format: FormatArg,

    /// Output file path (extension follows --format when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl HeightmapArgs {
    pub fn heightmap_params(&self) -> Result<HeightmapParams> {
        let params = HeightmapParams {
            width: self.width,
            height: self.height,
            octaves: crate::noise::fractal::octave_count(self.octaves)?,
            scale: self.scale,
            bias: self.bias,
            falloff: self.falloff,
        };
        params.validate()?;
        Ok(params)
    }

    pub fn output_path(&self) -> PathBuf {
        self.output.clone().unwrap_or_else(|| {
            PathBuf::from(format!(
                "heightmap.{}",
                ExportFormat::from(self.format).extension()
            ))
        })
    }
}

/// Which implementation the range diagnostic samples
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum DiagnoseSource {
    /// This crate's generator, configured by the noise options
    Lab,
    /// The `noise` crate's Perlin, seeded with --seed, for comparison
    NoiseRs,
}

#[derive(Args, Debug)]
pub struct DiagnoseArgs {
    #[command(flatten)]
    pub noise: NoiseArgs,

    /// Grid size (samples per side)
    #[arg(long, default_value_t = 1024)]
    pub size: u32,

    /// Offset added to each integer grid coordinate
    #[arg(long, default_value_t = 0.5)]
    pub offset: f64,

    #[arg(long, value_enum, default_value = "lab")]
    pub source: DiagnoseSource,
}

#[derive(Args, Debug)]
pub struct SampleArgs {
    #[command(flatten)]
    pub noise: NoiseArgs,

    #[arg(long, allow_negative_numbers = true)]
    pub x: f32,

    #[arg(long, allow_negative_numbers = true)]
    pub y: f32,

    #[arg(long, default_value_t = 8, allow_negative_numbers = true)]
    pub octaves: i32,
}
