//! Outline decimation.
//!
//! A single forward pass that drops points staying within a tolerance
//! box of the last kept point. Deliberately not Douglas-Peucker: the
//! decimation is O(n), allocation-light, and fully deterministic, which
//! matters more here than optimal point placement since the input is
//! pixel-stepped boundary walks.

use crate::types::{Point, Polyline};

/// Decimate a single path.
///
/// Keeps the first point, then each point whose x or y distance from
/// the last kept point exceeds `tolerance`. The original final point is
/// force-appended when decimation dropped it, so path endpoints always
/// survive. Paths with fewer than 3 points are returned unchanged.
#[must_use = "returns the simplified path"]
pub fn simplify(polyline: &Polyline, tolerance: f64) -> Polyline {
    let points = polyline.points();
    if points.len() < 3 {
        return polyline.clone();
    }

    let mut kept = vec![points[0]];
    let mut prev = points[0];

    for &current in &points[1..] {
        if f64::from((current.x - prev.x).abs()) > tolerance
            || f64::from((current.y - prev.y).abs()) > tolerance
        {
            kept.push(current);
            prev = current;
        }
    }

    if let Some(&last) = points.last()
        && kept.last() != Some(&last)
    {
        kept.push(last);
    }

    Polyline::new(kept)
}

/// Decimate every path independently.
#[must_use = "returns the simplified paths"]
pub fn simplify_paths(polylines: &[Polyline], tolerance: f64) -> Vec<Polyline> {
    polylines.iter().map(|pl| simplify(pl, tolerance)).collect()
}
