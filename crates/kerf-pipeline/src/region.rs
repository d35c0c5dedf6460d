//! Region filling: group interior foreground pixels into connected
//! components.
//!
//! Interior pixels are foreground pixels that are not boundary pixels;
//! together with the outline pass this partitions the foreground, so no
//! pixel is both traced and filled. Components are collected by a
//! breadth-first 4-connected flood fill with its own visited set,
//! independent of the outline pass's.

use std::collections::VecDeque;

use image::GrayImage;

use crate::boundary::{intensity, is_boundary};
use crate::types::{PipelineConfig, Point, Region};
use crate::visited::VisitedSet;

/// 4-neighborhood offsets: left, right, up, down.
const NEIGHBORS_4: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Find all fillable regions in the mask.
///
/// Scans row-major; each unvisited interior pixel seeds one flood
/// fill. Regions smaller than `config.min_region_points` are dropped:
/// they are too thin to be worth area coverage and the outline pass
/// already marks them.
#[must_use]
pub fn find_regions(mask: &GrayImage, config: &PipelineConfig) -> Vec<Region> {
    let (width, height) = mask.dimensions();
    let mut visited = VisitedSet::new(width, height);
    let mut regions = Vec::new();

    for y in 0..height {
        for x in 0..width {
            if visited.visited(x, y) {
                continue;
            }
            if intensity(mask, x, y) >= config.threshold
                || is_boundary(mask, config.threshold, x, y)
            {
                visited.mark(x, y);
                continue;
            }

            let points = flood(mask, config.threshold, x, y, &mut visited);
            if points.len() >= config.min_region_points {
                regions.push(Region::new(points));
            }
        }
    }

    regions
}

/// Breadth-first 4-connected flood fill over interior foreground
/// pixels, starting at a seed. Growth never crosses a background or
/// boundary pixel.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_possible_wrap)]
fn flood(
    mask: &GrayImage,
    threshold: u8,
    start_x: u32,
    start_y: u32,
    visited: &mut VisitedSet,
) -> Vec<Point> {
    let (width, height) = mask.dimensions();
    let mut points = vec![Point::new(start_x as i32, start_y as i32)];
    let mut queue = VecDeque::from([(start_x, start_y)]);
    visited.mark(start_x, start_y);

    while let Some((x, y)) = queue.pop_front() {
        for (dx, dy) in NEIGHBORS_4 {
            let nx = i64::from(x) + i64::from(dx);
            let ny = i64::from(y) + i64::from(dy);
            if nx < 0 || ny < 0 || nx >= i64::from(width) || ny >= i64::from(height) {
                continue;
            }
            let (nx, ny) = (nx as u32, ny as u32);
            if visited.visited(nx, ny)
                || intensity(mask, nx, ny) >= threshold
                || is_boundary(mask, threshold, nx, ny)
            {
                continue;
            }

            visited.mark(nx, ny);
            points.push(Point::new(nx as i32, ny as i32));
            queue.push_back((nx, ny));
        }
    }

    points
}
