//! Boundary tracing: extract outline paths from the classification mask.
//!
//! A boundary pixel is a foreground pixel (intensity below the cutoff)
//! with at least one 8-connected neighbor that is background or off the
//! grid. Each unvisited boundary pixel found in a row-major scan seeds
//! a greedy walk: at every step the walk moves to the nearest unvisited
//! boundary neighbor and stops when none remains.
//!
//! The walk has no backtracking. At a branch point it commits to one
//! arm; the other arms stay unvisited and are picked up as separate
//! path seeds later in the scan, so branching shapes produce fragmented
//! paths. That fragmentation is part of the output contract.

use image::GrayImage;

use crate::types::{PipelineConfig, Point, Polyline};
use crate::visited::VisitedSet;

/// 8-neighborhood offsets in the fixed enumeration order that breaks
/// distance ties: left, right, up, down, then the four diagonals.
pub(crate) const NEIGHBORS_8: [(i32, i32); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

/// Mask intensity at a pixel.
pub(crate) fn intensity(mask: &GrayImage, x: u32, y: u32) -> u8 {
    mask.get_pixel(x, y).0[0]
}

/// Returns `true` if the pixel is foreground and touches background or
/// the grid edge through any of its 8 neighbors.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn is_boundary(mask: &GrayImage, threshold: u8, x: u32, y: u32) -> bool {
    if intensity(mask, x, y) >= threshold {
        return false;
    }

    let (width, height) = mask.dimensions();
    for (dx, dy) in NEIGHBORS_8 {
        let nx = i64::from(x) + i64::from(dx);
        let ny = i64::from(y) + i64::from(dy);
        if nx < 0 || ny < 0 || nx >= i64::from(width) || ny >= i64::from(height) {
            // The grid edge counts as background.
            return true;
        }
        if intensity(mask, nx as u32, ny as u32) >= threshold {
            return true;
        }
    }
    false
}

/// Extract all outline paths from the mask.
///
/// Scans row-major; each unvisited boundary pixel seeds one greedy
/// walk. Paths shorter than `config.min_path_points` are discarded as
/// noise. Every foreground pixel is visited at most once, so the
/// returned paths are pairwise disjoint.
#[must_use]
pub fn trace_outlines(mask: &GrayImage, config: &PipelineConfig) -> Vec<Polyline> {
    let (width, height) = mask.dimensions();
    let mut visited = VisitedSet::new(width, height);
    let mut paths = Vec::new();

    for y in 0..height {
        for x in 0..width {
            if visited.visited(x, y) {
                continue;
            }
            if intensity(mask, x, y) >= config.threshold {
                visited.mark(x, y);
                continue;
            }
            if is_boundary(mask, config.threshold, x, y) {
                let points = walk(mask, config.threshold, x, y, &mut visited);
                if points.len() >= config.min_path_points {
                    paths.push(Polyline::new(points));
                }
            }
            // Interior foreground pixels are consumed here so the scan
            // never reconsiders them; the fill pass has its own set.
            visited.mark(x, y);
        }
    }

    paths
}

/// Greedy nearest-unvisited-neighbor walk from a seed pixel.
///
/// Among the unvisited boundary neighbors, the one at minimum squared
/// Euclidean distance wins; the strict `<` comparison means earlier
/// entries in [`NEIGHBORS_8`] win ties, and orthogonal steps always
/// beat diagonal ones.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_possible_wrap)]
fn walk(
    mask: &GrayImage,
    threshold: u8,
    start_x: u32,
    start_y: u32,
    visited: &mut VisitedSet,
) -> Vec<Point> {
    let (width, height) = mask.dimensions();
    let mut points = vec![Point::new(start_x as i32, start_y as i32)];
    visited.mark(start_x, start_y);

    let (mut x, mut y) = (start_x, start_y);
    loop {
        let mut best: Option<(u32, u32)> = None;
        let mut best_dist = i64::MAX;

        for (dx, dy) in NEIGHBORS_8 {
            let nx = i64::from(x) + i64::from(dx);
            let ny = i64::from(y) + i64::from(dy);
            if nx < 0 || ny < 0 || nx >= i64::from(width) || ny >= i64::from(height) {
                continue;
            }
            let (nx, ny) = (nx as u32, ny as u32);
            if visited.visited(nx, ny) || !is_boundary(mask, threshold, nx, ny) {
                continue;
            }

            let dist = i64::from(dx) * i64::from(dx) + i64::from(dy) * i64::from(dy);
            if dist < best_dist {
                best_dist = dist;
                best = Some((nx, ny));
            }
        }

        let Some((nx, ny)) = best else {
            break;
        };
        visited.mark(nx, ny);
        points.push(Point::new(nx as i32, ny as i32));
        (x, y) = (nx, ny);
    }

    points
}
