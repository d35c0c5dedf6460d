//! kerf-io: Input decoding for the kerf pipeline.
//!
//! Turns files on disk into the RGBA pixel grids the pipeline
//! consumes. Raster formats go through the `image` crate; SVG sources
//! are rasterized onto a white canvas with `usvg` + `tiny-skia`.

pub mod raster;
pub mod svg;

use std::path::Path;

use kerf_pipeline::RgbaImage;

/// Errors that can occur while loading an input image.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The file could not be read.
    #[error("failed to read input file: {0}")]
    Io(#[from] std::io::Error),

    /// The raster decoder rejected the file contents.
    #[error("failed to decode image: {0}")]
    ImageDecode(#[from] image::ImageError),

    /// The SVG parser rejected the file contents.
    #[error("failed to parse SVG: {0}")]
    Svg(#[from] usvg::Error),

    /// The decoded image has zero width or height.
    #[error("image has invalid dimensions")]
    InvalidDimensions,

    /// The file extension is not a supported input format.
    #[error("unsupported input format: {0}")]
    UnsupportedFormat(String),
}

/// Load an input file into an RGBA pixel grid, dispatching on the
/// file extension.
///
/// `.svg` files are rasterized at their intrinsic size onto a white
/// background; `.png`, `.jpg`, `.jpeg`, `.bmp` and `.webp` files are
/// decoded directly.
///
/// # Errors
///
/// Returns [`LoadError::UnsupportedFormat`] for unrecognized
/// extensions, and the underlying decode or parse error otherwise.
pub fn load_image(path: &Path) -> Result<RgbaImage, LoadError> {
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    let bytes = std::fs::read(path)?;
    match extension.as_str() {
        "svg" => svg::rasterize(&bytes),
        "png" | "jpg" | "jpeg" | "bmp" | "webp" => raster::decode(&bytes),
        other => Err(LoadError::UnsupportedFormat(other.to_owned())),
    }
}
