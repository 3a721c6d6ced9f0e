//! perlin-lab - Perlin noise heightmaps for terrain demos
//!
//! Renders the island displacement texture, measures how well single
//! octave noise stays inside [-1, 1], and prints individual samples.

use std::time::Instant;

use clap::Parser;
use noise::{NoiseFn, Perlin};

use perlin_lab::cli::{Cli, Command, DiagnoseArgs, DiagnoseSource, HeightmapArgs, SampleArgs};
use perlin_lab::diagnostics::RangeReport;
use perlin_lab::heightmap::Heightmap;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Heightmap(args) => run_heightmap(&args)?,
        Command::Diagnose(args) => run_diagnose(&args)?,
        Command::Sample(args) => run_sample(&args)?,
    }

    Ok(())
}

fn run_heightmap(args: &HeightmapArgs) -> Result<(), Box<dyn std::error::Error>> {
    let noise = args.noise.build_noise()?;
    let params = args.heightmap_params()?;
    let output = args.output_path();

    println!("Heightmap Generator");
    println!("  Table: {:?}", args.noise.table);
    println!("  Size: {}x{}", params.width, params.height);
    println!("  Octaves: {}", params.octaves);

    let start = Instant::now();
    let map = Heightmap::synthesize(&noise, &params)?;
    map.save(&output, args.format.into())?;

    let (lo, hi) = map.value_range();
    println!("  Values: {}..={}", lo, hi);
    println!("  Output: {}", output.display());
    println!("  Time: {:.2}ms", start.elapsed().as_secs_f64() * 1000.0);

    Ok(())
}

fn run_diagnose(args: &DiagnoseArgs) -> Result<(), Box<dyn std::error::Error>> {
    let report = match args.source {
        DiagnoseSource::Lab => {
            let noise = args.noise.build_noise()?;
            RangeReport::measure(&noise, args.size, args.size, args.offset)
        }
        DiagnoseSource::NoiseRs => {
            let perlin = Perlin::new(args.noise.noise_rs_seed()?);
            RangeReport::measure(&perlin, args.size, args.size, args.offset)
        }
    };

    println!("Range diagnostic ({:?})", args.source);
    println!("  Samples: {}", report.samples);
    println!(
        "  Outside [-1, 1]: {} ({:.4}%)",
        report.out_of_range,
        report.out_of_range_rate() * 100.0
    );
    println!(
        "  High (|v| > 0.9): {} ({:.4}%)",
        report.high,
        report.high_rate() * 100.0
    );
    println!("  Min/max: {:.4} / {:.4}", report.min, report.max);

    Ok(())
}

fn run_sample(args: &SampleArgs) -> Result<(), Box<dyn std::error::Error>> {
    let noise = args.noise.build_noise()?;

    let single = noise.evaluate(args.x, args.y);
    let fractal = noise.fractal_sum(args.x, args.y, args.octaves)?;

    println!("noise({}, {}) = {}", args.x, args.y, single);
    println!("fbm({}, {}, {}) = {}", args.x, args.y, args.octaves, fractal);
    println!(
        "noise-rs view: {}",
        noise.get([args.x as f64, args.y as f64])
    );

    Ok(())
}
