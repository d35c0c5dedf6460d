//! G-code export serializer.
//!
//! Converts outline polylines and zigzag fill segments into a textual
//! motion program for GRBL-style laser engravers and CNC routers.
//!
//! The dialect is deliberately small: `G21` (metric), `G90` (absolute
//! positioning), `G0`/`G1` (rapid/linear moves), `M3 Sn` (tool on at
//! power n) and `M5` (tool off). Feed rates are set once in the
//! preamble, so every subsequent move inherits them.
//!
//! Outlines are cut as continuous strokes; fill segments are cut as
//! independent strokes with the tool switched off between them, so the
//! beam never traverses a gap while engaged.
//!
//! This is a pure function with no I/O — it returns a `String`.

use std::fmt::Write;

use kerf_pipeline::{Dimensions, Point, Polyline, ScanDirection, Segment};

/// Rapid (tool-off) feed rate in mm/min, set once in the preamble.
pub const TRAVEL_FEED: u32 = 3000;

/// Cutting (tool-on) feed rate in mm/min, set once in the preamble.
pub const CUT_FEED: u32 = 1500;

/// Spindle/laser power for `M3 Sn` commands.
pub const SPINDLE_POWER: u32 = 1000;

/// Machine-space output parameters.
///
/// The pixel grid is stretched onto a `target_width` x `target_height`
/// rectangle in machine units (millimetres under `G21`), then shifted
/// by `offset` on both axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GcodeConfig {
    /// Output width in machine units.
    pub target_width: f64,

    /// Output height in machine units.
    pub target_height: f64,

    /// Uniform offset added to both axes, in machine units.
    pub offset: f64,
}

impl Default for GcodeConfig {
    fn default() -> Self {
        Self {
            target_width: 100.0,
            target_height: 100.0,
            offset: 0.0,
        }
    }
}

/// Affine pixel-space to machine-space mapping.
///
/// Pixel `(0, 0)` maps to `(offset, offset)`; pixel
/// `(width, height)` maps to `(offset + target_width,
/// offset + target_height)`. The axes scale independently, so a
/// non-square grid mapped onto a square target is stretched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    scale_x: f64,
    scale_y: f64,
    offset: f64,
}

impl Transform {
    /// Derive the mapping for a pixel grid of the given dimensions.
    ///
    /// A zero-sized grid yields a degenerate transform that collapses
    /// every point onto the offset; callers reject empty grids before
    /// reaching the emitter, so this only guards against division by
    /// zero.
    #[must_use]
    pub fn new(dimensions: Dimensions, config: &GcodeConfig) -> Self {
        let scale_x = if dimensions.width == 0 {
            0.0
        } else {
            config.target_width / f64::from(dimensions.width)
        };
        let scale_y = if dimensions.height == 0 {
            0.0
        } else {
            config.target_height / f64::from(dimensions.height)
        };
        Self {
            scale_x,
            scale_y,
            offset: config.offset,
        }
    }

    /// Map a pixel point into machine coordinates.
    #[must_use]
    pub fn apply(&self, point: Point) -> (f64, f64) {
        (
            self.offset + f64::from(point.x) * self.scale_x,
            self.offset + f64::from(point.y) * self.scale_y,
        )
    }
}

/// Serialize outlines and fill segments into a G-code program string.
///
/// Emission order is the input order: all outlines first, then all
/// fill segments. For each outline the tool rapids to the first point
/// off, switches on, and cuts linearly through the remaining points.
/// Each fill segment is an independent stroke: rapid to its entry end,
/// tool on, one linear move across, tool off. Right-to-left segments
/// enter at their right end so that consecutive scanlines are cut
/// boustrophedon.
///
/// Coordinates are formatted to 3 decimal places.
#[must_use]
pub fn to_gcode(
    outlines: &[Polyline],
    segments: &[Segment],
    dimensions: Dimensions,
    config: &GcodeConfig,
) -> String {
    let transform = Transform::new(dimensions, config);

    let mut out = String::new();

    // --- Preamble: units, positioning mode, tool off, feed rates ---
    let _ = writeln!(out, "G21");
    let _ = writeln!(out, "G90");
    let _ = writeln!(out, "M5");
    let _ = writeln!(out, "G0 F{TRAVEL_FEED}");
    let _ = writeln!(out, "G1 F{CUT_FEED}");

    for outline in outlines {
        let points = outline.points();
        let Some(&first) = points.first() else {
            continue;
        };

        let _ = writeln!(out, "M5");
        let (x, y) = transform.apply(first);
        let _ = writeln!(out, "G0 X{x:.3} Y{y:.3}");
        let _ = writeln!(out, "M3 S{SPINDLE_POWER}");
        for &point in &points[1..] {
            let (x, y) = transform.apply(point);
            let _ = writeln!(out, "G1 X{x:.3} Y{y:.3}");
        }
    }

    for segment in segments {
        let (entry_x, exit_x) = match segment.direction {
            ScanDirection::LeftToRight => (segment.start_x, segment.end_x),
            ScanDirection::RightToLeft => (segment.end_x, segment.start_x),
        };
        let (x, y) = transform.apply(Point::new(entry_x, segment.y));
        let _ = writeln!(out, "G0 X{x:.3} Y{y:.3}");
        let _ = writeln!(out, "M3 S{SPINDLE_POWER}");
        let (x, y) = transform.apply(Point::new(exit_x, segment.y));
        let _ = writeln!(out, "G1 X{x:.3} Y{y:.3}");
        let _ = writeln!(out, "M5");
    }

    // --- Postamble: tool off, return to origin ---
    let _ = writeln!(out, "M5");
    let _ = writeln!(out, "G0 X0 Y0");

    out
}
