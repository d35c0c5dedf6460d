//! Convert a raster or vector image into a G-code engraving program.

use std::path::PathBuf;

use clap::Parser;
use kerf_export::GcodeConfig;
use kerf_pipeline::PipelineConfig;

/// Convert a raster or vector image into a G-code engraving program.
#[derive(Parser)]
#[command(version)]
struct Args {
    /// Input image path (PNG, JPEG, BMP, WebP or SVG).
    input: PathBuf,

    /// Output G-code path.
    #[arg(short, long, default_value = "output.gcode")]
    output: PathBuf,

    /// Output width in millimetres.
    #[arg(long, default_value_t = 100.0)]
    width: f64,

    /// Output height in millimetres.
    #[arg(long, default_value_t = 100.0)]
    height: f64,

    /// Offset added to both axes, in millimetres.
    #[arg(long, default_value_t = 0.0)]
    offset: f64,

    /// Background cutoff (0-255): mask values at or above it are left
    /// untouched.
    #[arg(long, default_value_t = 128)]
    threshold: u8,

    /// Outline decimation tolerance in pixels.
    #[arg(long, default_value_t = 1.0)]
    tolerance: f64,

    /// Classify by dominant color bands instead of luma when the image
    /// has distinct flat color groups (vector-rendered sources).
    #[arg(long)]
    flat_color: bool,

    /// Always classify by luma, skipping the dominant-color heuristics.
    #[arg(long)]
    force_luma: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    eprintln!("Reading image from {}", args.input.display());
    let image = kerf_io::load_image(&args.input)?;
    let (width, height) = image.dimensions();
    eprintln!("Loaded {width}x{height} image");

    let pipeline_config = PipelineConfig {
        threshold: args.threshold,
        simplify_tolerance: args.tolerance,
        flat_color: args.flat_color,
        force_luma: args.force_luma,
        ..PipelineConfig::default()
    };

    eprintln!("Extracting toolpaths...");
    let result = kerf_pipeline::process(&image, &pipeline_config)?;
    eprintln!(
        "Found {} outline paths and {} fill segments",
        result.outlines.len(),
        result.fill_segments.len(),
    );

    let gcode_config = GcodeConfig {
        target_width: args.width,
        target_height: args.height,
        offset: args.offset,
    };
    let gcode = kerf_export::to_gcode(
        &result.outlines,
        &result.fill_segments,
        result.dimensions,
        &gcode_config,
    );

    std::fs::write(&args.output, &gcode)?;
    eprintln!(
        "Wrote {} bytes of G-code to {}",
        gcode.len(),
        args.output.display(),
    );

    Ok(())
}
