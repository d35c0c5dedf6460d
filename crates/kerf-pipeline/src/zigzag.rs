//! Boustrophedon fill planning.
//!
//! Rasterizes a region into alternating-direction scanline segments at
//! a fixed line spacing. Alternating the sweep direction per row keeps
//! the rapid travel between adjacent scanlines short; within a row,
//! contiguous runs of member pixels become [`Segment`]s.

use std::collections::{HashMap, HashSet};

use crate::types::{PipelineConfig, Region, ScanDirection, Segment};

/// Plan fill segments for one region.
///
/// Scanlines step by `config.line_spacing` from the region's top row
/// to its bottom row; rows at an odd offset from the top are swept
/// right-to-left. Segments shorter than `config.min_segment_length`
/// are dropped as coverage noise. Output order is scan order, which is
/// also tool motion order.
#[must_use]
pub fn plan_fill(region: &Region, config: &PipelineConfig) -> Vec<Segment> {
    let Some(bounds) = region.bounds() else {
        return Vec::new();
    };
    if config.line_spacing <= 0 {
        return Vec::new();
    }

    // Row -> set of member x coordinates.
    let mut rows: HashMap<i32, HashSet<i32>> = HashMap::new();
    for p in region.points() {
        rows.entry(p.y).or_default().insert(p.x);
    }

    let mut segments = Vec::new();
    let mut y = bounds.min.y;
    while y <= bounds.max.y {
        let direction = if (y - bounds.min.y) % 2 == 1 {
            ScanDirection::RightToLeft
        } else {
            ScanDirection::LeftToRight
        };
        if let Some(row) = rows.get(&y) {
            scan_row(row, y, bounds.min.x, bounds.max.x, direction, config, &mut segments);
        }
        y += config.line_spacing;
    }

    segments
}

/// Sweep one scanline, flushing contiguous member runs as segments.
fn scan_row(
    row: &HashSet<i32>,
    y: i32,
    min_x: i32,
    max_x: i32,
    direction: ScanDirection,
    config: &PipelineConfig,
    segments: &mut Vec<Segment>,
) {
    let mut flush = |start_x: i32, end_x: i32| {
        if end_x - start_x >= config.min_segment_length {
            segments.push(Segment {
                start_x,
                end_x,
                y,
                direction,
            });
        }
    };

    match direction {
        ScanDirection::LeftToRight => {
            let mut run_start: Option<i32> = None;
            for x in min_x..=max_x {
                if row.contains(&x) {
                    run_start.get_or_insert(x);
                } else if let Some(start) = run_start.take() {
                    flush(start, x - 1);
                }
            }
            if let Some(start) = run_start {
                flush(start, max_x);
            }
        }
        ScanDirection::RightToLeft => {
            // Sweeping from the right: the run's first member is its
            // right end. Stored segments still satisfy start_x <= end_x.
            let mut run_end: Option<i32> = None;
            for x in (min_x..=max_x).rev() {
                if row.contains(&x) {
                    run_end.get_or_insert(x);
                } else if let Some(end) = run_end.take() {
                    flush(x + 1, end);
                }
            }
            if let Some(end) = run_end {
                flush(min_x, end);
            }
        }
    }
}
