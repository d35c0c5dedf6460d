//! Integration tests for the full geometry pipeline.
//!
//! Builds deterministic in-memory images with known shapes and checks
//! the extracted outlines and fill segments against the shape geometry.

#![allow(clippy::unwrap_used)]

use std::collections::HashSet;

use image::{Rgba, RgbaImage};
use kerf_pipeline::{PipelineConfig, Point, ScanDirection, process};

const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

fn white_image(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_pixel(width, height, WHITE)
}

fn draw_rect(img: &mut RgbaImage, x0: u32, y0: u32, w: u32, h: u32, color: Rgba<u8>) {
    for y in y0..(y0 + h).min(img.height()) {
        for x in x0..(x0 + w).min(img.width()) {
            img.put_pixel(x, y, color);
        }
    }
}

#[test]
fn blank_page_produces_no_geometry() {
    let img = white_image(32, 32);
    let result = process(&img, &PipelineConfig::default()).unwrap();
    assert!(result.outlines.is_empty());
    assert!(result.fill_segments.is_empty());
}

#[test]
fn small_square_produces_one_outline_and_no_fill() {
    // 10x10 black square on a 20x20 white page: the 36-pixel perimeter
    // becomes one outline; the 64-pixel interior is below the region
    // minimum and is dropped.
    let mut img = white_image(20, 20);
    draw_rect(&mut img, 5, 5, 10, 10, BLACK);

    let result = process(&img, &PipelineConfig::default()).unwrap();
    assert_eq!(result.outlines.len(), 1);
    assert!(result.fill_segments.is_empty());

    let outline = &result.outlines[0];
    assert_eq!(outline.first(), Some(&Point::new(5, 5)));
    // Simplification keeps the endpoints and can only shrink the path.
    assert!(outline.len() <= 36);
    for p in outline.points() {
        assert!(
            p.x == 5 || p.x == 14 || p.y == 5 || p.y == 14,
            "({}, {}) is off the square's perimeter",
            p.x,
            p.y,
        );
    }
}

#[test]
fn large_square_produces_outline_and_fill() {
    // 24x24 square: 22x22 = 484 interior pixels clear the 200-point
    // region minimum, so fill segments appear alongside the outline.
    let mut img = white_image(40, 40);
    draw_rect(&mut img, 8, 8, 24, 24, BLACK);

    let result = process(&img, &PipelineConfig::default()).unwrap();
    assert_eq!(result.outlines.len(), 1);
    assert!(!result.fill_segments.is_empty());

    // Interior rows run 9..=30; scanlines step by 3 from row 9.
    for (i, seg) in result.fill_segments.iter().enumerate() {
        assert_eq!(seg.y, 9 + 3 * i as i32);
        assert_eq!(seg.start_x, 9);
        assert_eq!(seg.end_x, 30);
        assert!(seg.start_x <= seg.end_x);
    }

    // Scan direction alternates between consecutive scanlines.
    for pair in result.fill_segments.windows(2) {
        assert_ne!(pair[0].direction, pair[1].direction);
    }
}

#[test]
fn outline_and_fill_never_share_a_pixel() {
    let mut img = white_image(40, 40);
    draw_rect(&mut img, 8, 8, 24, 24, BLACK);

    // Tolerance 0 keeps every traced boundary pixel so the disjointness
    // check sees the full perimeter.
    let config = PipelineConfig {
        simplify_tolerance: 0.0,
        min_segment_length: 0,
        ..PipelineConfig::default()
    };
    let result = process(&img, &config).unwrap();

    let outline_pixels: HashSet<Point> = result
        .outlines
        .iter()
        .flat_map(|pl| pl.points().iter().copied())
        .collect();
    for seg in &result.fill_segments {
        for x in seg.start_x..=seg.end_x {
            let p = Point::new(x, seg.y);
            assert!(
                !outline_pixels.contains(&p),
                "fill pixel ({}, {}) also appears on an outline",
                p.x,
                p.y,
            );
        }
    }
}

#[test]
fn two_shapes_produce_two_outlines() {
    let mut img = white_image(48, 24);
    draw_rect(&mut img, 4, 4, 10, 10, BLACK);
    draw_rect(&mut img, 28, 4, 10, 10, BLACK);

    let result = process(&img, &PipelineConfig::default()).unwrap();
    assert_eq!(result.outlines.len(), 2);
    // Row-major seeding: the left square is traced first.
    assert!(result.outlines[0].first().unwrap().x < result.outlines[1].first().unwrap().x);
}

#[test]
fn mask_preserves_tonal_gradation() {
    let mut img = white_image(12, 12);
    draw_rect(&mut img, 2, 2, 8, 8, Rgba([140, 140, 140, 255]));

    let result = process(&img, &PipelineConfig::default()).unwrap();
    // (140 - 50) / 180 * 255 truncates to 127: a midtone, not a hard 0.
    assert_eq!(result.mask.get_pixel(5, 5).0[0], 127);
    assert_eq!(result.mask.get_pixel(0, 0).0[0], 255);
}

#[test]
fn identical_runs_produce_identical_geometry() {
    let mut img = white_image(40, 40);
    draw_rect(&mut img, 8, 8, 24, 24, BLACK);
    draw_rect(&mut img, 2, 30, 6, 6, BLACK);

    let config = PipelineConfig::default();
    let first = process(&img, &config).unwrap();
    let second = process(&img, &config).unwrap();
    assert_eq!(first.outlines, second.outlines);
    assert_eq!(first.fill_segments, second.fill_segments);
}

#[test]
fn fill_rows_alternate_starting_left_to_right() {
    let mut img = white_image(40, 40);
    draw_rect(&mut img, 8, 8, 24, 24, BLACK);

    let result = process(&img, &PipelineConfig::default()).unwrap();
    assert_eq!(result.fill_segments[0].direction, ScanDirection::LeftToRight);
}
