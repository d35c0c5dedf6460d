//! Shared types for the kerf image-to-toolpath pipeline.

use serde::{Deserialize, Serialize};

/// Re-export `GrayImage` so downstream crates can reference the
/// classification mask without depending on `image` directly.
pub use image::GrayImage;

/// Re-export `RgbaImage` so downstream crates can reference the
/// decoded input image without depending on `image` directly.
pub use image::RgbaImage;

/// A point on the pixel grid.
///
/// Coordinates are integers because every pipeline stage before program
/// emission operates on whole pixels; the pixel-to-machine transform in
/// the export layer is the only place fractional coordinates appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal position (pixels from the left edge).
    pub x: i32,
    /// Vertical position (pixels from the top edge).
    pub y: i32,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance to another point.
    ///
    /// Exact in integer arithmetic, so distance comparisons between
    /// neighbors are free of floating-point ties.
    #[must_use]
    pub const fn distance_squared(self, other: Self) -> i64 {
        let dx = (self.x - other.x) as i64;
        let dy = (self.y - other.y) as i64;
        dx * dx + dy * dy
    }
}

/// An ordered sequence of points describing one tool motion.
///
/// Order is semantically meaningful: it is the order the tool visits
/// the points, and it survives simplification unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Polyline(Vec<Point>);

impl Polyline {
    /// Create a new polyline from a vector of points.
    #[must_use]
    pub const fn new(points: Vec<Point>) -> Self {
        Self(points)
    }

    /// Returns `true` if the polyline has no points.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of points in the polyline.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns the first point, if any.
    #[must_use]
    pub fn first(&self) -> Option<&Point> {
        self.0.first()
    }

    /// Returns the last point, if any.
    #[must_use]
    pub fn last(&self) -> Option<&Point> {
        self.0.last()
    }

    /// Returns a slice of all points.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.0
    }

    /// Consumes the polyline and returns the underlying vector of points.
    #[must_use]
    pub fn into_points(self) -> Vec<Point> {
        self.0
    }
}

/// Axis-aligned bounding box over a set of points, inclusive on all sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    /// Top-left corner.
    pub min: Point,
    /// Bottom-right corner.
    pub max: Point,
}

/// A maximal 4-connected set of interior foreground pixels.
///
/// Point order carries no meaning; a region is only ever reduced to its
/// bounding box and per-row membership by the fill planner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    points: Vec<Point>,
}

impl Region {
    /// Create a region from a collected point set.
    #[must_use]
    pub const fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Returns the number of pixels in the region.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if the region contains no pixels.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns a slice of all member pixels.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Inclusive bounding box of the region, or `None` when empty.
    #[must_use]
    pub fn bounds(&self) -> Option<Bounds> {
        let first = self.points.first()?;
        let mut min = *first;
        let mut max = *first;
        for p in &self.points {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        Some(Bounds { min, max })
    }
}

/// Direction a fill scanline was walked in.
///
/// Segments are always stored left-to-right (`start_x <= end_x`); the
/// direction records which way the planner swept the row, which is also
/// the order segments within that row were emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScanDirection {
    /// Row swept from the region's left edge toward the right.
    LeftToRight,
    /// Row swept from the region's right edge toward the left.
    RightToLeft,
}

/// One contiguous filled run on a scanline, in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// Leftmost member pixel of the run.
    pub start_x: i32,
    /// Rightmost member pixel of the run. Always `>= start_x`.
    pub end_x: i32,
    /// Scanline row.
    pub y: i32,
    /// Sweep direction of the row that produced this segment.
    pub direction: ScanDirection,
}

impl Segment {
    /// Run length in pixels along the scanline.
    #[must_use]
    pub const fn length(&self) -> i32 {
        self.end_x - self.start_x
    }
}

/// Source image dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Configuration for the image-to-toolpath pipeline.
///
/// Defaults match the empirically tuned constants of the reference
/// engraver output; see the per-field docs before changing them, since
/// several downstream heuristics were calibrated against these values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Background cutoff (0-255). Mask intensities at or above this are
    /// background; below it they are material to mark.
    pub threshold: u8,

    /// Outline decimation tolerance in pixels. A point is kept only if
    /// its x or y distance from the last kept point exceeds this.
    pub simplify_tolerance: f64,

    /// Outlines with fewer points than this are discarded as noise.
    pub min_path_points: usize,

    /// Regions with fewer pixels than this are discarded: they are too
    /// small to be worth area coverage and are left to the outline pass.
    pub min_region_points: usize,

    /// Vertical distance between fill scanlines, in pixels.
    pub line_spacing: i32,

    /// Fill segments spanning fewer than this many pixels are dropped
    /// as coverage noise.
    pub min_segment_length: i32,

    /// The source is flat-color vector art: classify by dominant-color
    /// bands when the image has distinct color groups, instead of
    /// continuous luma.
    pub flat_color: bool,

    /// Skip the dominant-color heuristics and always classify by luma.
    pub force_luma: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            threshold: 128,
            simplify_tolerance: 1.0,
            min_path_points: 5,
            min_region_points: 200,
            line_spacing: 3,
            min_segment_length: 3,
            flat_color: false,
            force_luma: false,
        }
    }
}

/// Result of running the full pipeline.
#[derive(Debug, Clone)]
pub struct ProcessResult {
    /// Simplified boundary paths, in tool motion order.
    pub outlines: Vec<Polyline>,

    /// Boustrophedon fill segments for every accepted region, in scan
    /// order (top row first).
    pub fill_segments: Vec<Segment>,

    /// The classification mask (0 = full engrave, 255 = untouched).
    /// Kept for tonal power modulation and diagnostics.
    pub mask: GrayImage,

    /// Dimensions of the source grid in pixels. Export serializers use
    /// this to derive the pixel-to-machine scale.
    pub dimensions: Dimensions,
}

/// Errors that can occur during pipeline processing.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// The input grid has zero width or height.
    #[error("input image has zero width or height")]
    EmptyImage,

    /// Pipeline configuration is invalid.
    #[error("invalid pipeline configuration: {0}")]
    InvalidConfig(String),
}
