//! Integration test: run a synthetic image through the full pipeline
//! and export it to G-code.

#![allow(clippy::unwrap_used)]

use image::{Rgba, RgbaImage};
use kerf_export::{GcodeConfig, to_gcode};
use kerf_pipeline::PipelineConfig;

#[test]
fn black_square_exports_one_outline_stroke() {
    // 10x10 black square centred on a 20x20 white grid, mapped onto a
    // 50x50mm target with no offset.
    let mut img = RgbaImage::from_pixel(20, 20, Rgba([255, 255, 255, 255]));
    for y in 5..15 {
        for x in 5..15 {
            img.put_pixel(x, y, Rgba([0, 0, 0, 255]));
        }
    }

    let result = kerf_pipeline::process(&img, &PipelineConfig::default()).unwrap();
    assert_eq!(result.outlines.len(), 1);
    assert!(result.fill_segments.is_empty());

    let config = GcodeConfig {
        target_width: 50.0,
        target_height: 50.0,
        offset: 0.0,
    };
    let gcode = to_gcode(&result.outlines, &result.fill_segments, result.dimensions, &config);

    // One outline, one power-on.
    assert_eq!(gcode.matches("M3 S1000").count(), 1);

    assert!(gcode.starts_with("G21\nG90\nM5\nG0 F3000\nG1 F1500\n"));
    assert!(gcode.ends_with("M5\nG0 X0 Y0\n"));

    // The trace starts at the square's top-left boundary pixel (5, 5),
    // which scales by 50/20 = 2.5 to machine coordinates.
    assert!(gcode.contains("G0 X12.500 Y12.500"));

    // Every cut coordinate stays on the transformed perimeter: pixel
    // rows/columns 5 and 14 map to 12.5 and 35.0.
    for line in gcode.lines().filter(|l| l.starts_with("G1 X")) {
        let mut parts = line.split_whitespace();
        parts.next();
        let x: f64 = parts.next().unwrap().strip_prefix('X').unwrap().parse().unwrap();
        let y: f64 = parts.next().unwrap().strip_prefix('Y').unwrap().parse().unwrap();
        let on_edge = |v: f64| (v - 12.5).abs() < 1e-9 || (v - 35.0).abs() < 1e-9;
        let in_span = |v: f64| (12.5..=35.0).contains(&v);
        assert!(
            (on_edge(x) && in_span(y)) || (on_edge(y) && in_span(x)),
            "cut coordinate ({x}, {y}) is off the square's perimeter"
        );
    }
}

#[test]
fn blank_image_exports_only_pre_and_postamble() {
    let img = RgbaImage::from_pixel(16, 16, Rgba([255, 255, 255, 255]));
    let result = kerf_pipeline::process(&img, &PipelineConfig::default()).unwrap();
    let gcode = to_gcode(
        &result.outlines,
        &result.fill_segments,
        result.dimensions,
        &GcodeConfig::default(),
    );
    assert_eq!(gcode, "G21\nG90\nM5\nG0 F3000\nG1 F1500\nM5\nG0 X0 Y0\n");
}
