//! kerf-pipeline: Pure image-to-toolpath pipeline (sans-IO).
//!
//! Converts a decoded pixel grid into engraver path geometry through:
//! classification -> boundary tracing -> simplification, and
//! classification -> region filling -> zigzag fill planning.
//!
//! This crate has **no I/O dependencies** -- it operates on in-memory
//! pixel grids and returns structured geometry. Image decoding, SVG
//! rasterization and file writing live in `kerf-io` and the CLI.

pub mod boundary;
pub mod classify;
pub mod palette;
pub mod region;
pub mod simplify;
pub mod types;
pub mod visited;
pub mod zigzag;

pub use palette::ColorBucket;
pub use types::{
    Bounds, Dimensions, GrayImage, PipelineConfig, PipelineError, Point, Polyline, ProcessResult,
    Region, RgbaImage, ScanDirection, Segment,
};
pub use visited::VisitedSet;

/// Run the full image-to-toolpath pipeline over a decoded RGBA grid.
///
/// # Pipeline steps
///
/// 1. Pixel classification (luma soft threshold or dominant-color
///    heuristics) into an engrave-intensity mask
/// 2. Boundary tracing into outline paths
/// 3. Outline decimation
/// 4. Connected-region flood fill of interior pixels
/// 5. Boustrophedon fill planning per region
///
/// The outline and fill passes use independent visited state, so
/// together they partition the foreground: every dark pixel is either
/// traced or filled, never both.
///
/// # Errors
///
/// Returns [`PipelineError::EmptyImage`] if the grid has zero width or
/// height, and [`PipelineError::InvalidConfig`] if `line_spacing` is
/// not positive.
pub fn process(
    image: &RgbaImage,
    config: &PipelineConfig,
) -> Result<ProcessResult, PipelineError> {
    if image.width() == 0 || image.height() == 0 {
        return Err(PipelineError::EmptyImage);
    }
    validate(config)?;

    let mask = classify::classify(image, config);
    Ok(extract(mask, config))
}

/// Run the pipeline over an already-grayscale grid.
///
/// The luma soft threshold is applied directly to each sample; the
/// dominant-color heuristics need color information and do not apply.
///
/// # Errors
///
/// Same conditions as [`process`].
pub fn process_gray(
    gray: &GrayImage,
    config: &PipelineConfig,
) -> Result<ProcessResult, PipelineError> {
    if gray.width() == 0 || gray.height() == 0 {
        return Err(PipelineError::EmptyImage);
    }
    validate(config)?;

    let mask = classify::classify_gray(gray);
    Ok(extract(mask, config))
}

fn validate(config: &PipelineConfig) -> Result<(), PipelineError> {
    if config.line_spacing <= 0 {
        return Err(PipelineError::InvalidConfig(
            "line_spacing must be positive".to_owned(),
        ));
    }
    Ok(())
}

/// Shared tail of both entry points: mask in, geometry out.
fn extract(mask: GrayImage, config: &PipelineConfig) -> ProcessResult {
    let dimensions = Dimensions {
        width: mask.width(),
        height: mask.height(),
    };

    let outlines = boundary::trace_outlines(&mask, config);
    let outlines = simplify::simplify_paths(&outlines, config.simplify_tolerance);

    let regions = region::find_regions(&mask, config);
    let fill_segments = regions
        .iter()
        .flat_map(|r| zigzag::plan_fill(r, config))
        .collect();

    ProcessResult {
        outlines,
        fill_segments,
        mask,
        dimensions,
    }
}
