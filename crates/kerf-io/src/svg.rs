//! SVG rasterization.
//!
//! Parses vector sources with `usvg` and renders them onto a white
//! canvas with `tiny-skia` at the document's intrinsic size. The
//! white background matters: the pipeline treats light pixels as
//! untouched material, so unpainted canvas must read as background.
//!
//! `usvg` flattens the full SVG feature set (shapes, transforms, CSS)
//! into a tree of groups and pre-transformed paths; only paths are
//! rendered here. Embedded raster images and text nodes are skipped,
//! as are gradient and pattern paints, which fall back to black.

use kerf_pipeline::RgbaImage;
use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Stroke, Transform};

use crate::LoadError;

/// Rasterize SVG bytes into an RGBA pixel grid on a white background.
///
/// # Errors
///
/// Returns [`LoadError::Svg`] if the bytes are not a parseable SVG
/// document, and [`LoadError::InvalidDimensions`] if the document's
/// intrinsic size is degenerate.
pub fn rasterize(bytes: &[u8]) -> Result<RgbaImage, LoadError> {
    let tree = usvg::Tree::from_data(bytes, &usvg::Options::default())?;
    let size = tree.size().to_int_size();

    let Some(mut pixmap) = Pixmap::new(size.width(), size.height()) else {
        return Err(LoadError::InvalidDimensions);
    };
    pixmap.fill(tiny_skia::Color::WHITE);

    render_group(tree.root(), &mut pixmap);

    Ok(to_rgba(&pixmap))
}

/// Recursively render a group's path children into the pixmap.
fn render_group(group: &usvg::Group, pixmap: &mut Pixmap) {
    for child in group.children() {
        match child {
            usvg::Node::Group(g) => render_group(g, pixmap),
            usvg::Node::Path(path) => render_path(path, pixmap),
            // Embedded rasters and text are out of scope: the pipeline
            // expects line art, and usvg has already flattened
            // text-as-paths when fonts are resolvable.
            usvg::Node::Image(_) | usvg::Node::Text(_) => {}
        }
    }
}

fn render_path(path: &usvg::Path, pixmap: &mut Pixmap) {
    let Some(skia_path) = convert_path(path.data()) else {
        return;
    };
    let transform = convert_transform(path.abs_transform());

    if let Some(fill) = path.fill() {
        let paint = convert_paint(fill.paint(), fill.opacity());
        let rule = match fill.rule() {
            usvg::FillRule::NonZero => FillRule::Winding,
            usvg::FillRule::EvenOdd => FillRule::EvenOdd,
        };
        pixmap.fill_path(&skia_path, &paint, rule, transform, None);
    }

    if let Some(stroke) = path.stroke() {
        let paint = convert_paint(stroke.paint(), stroke.opacity());
        let stroke = Stroke {
            width: stroke.width().get(),
            ..Stroke::default()
        };
        pixmap.stroke_path(&skia_path, &paint, &stroke, transform, None);
    }
}

/// Rebuild a usvg path as a tiny-skia path.
///
/// usvg carries its geometry in its own vendored path type, so the
/// segments are replayed through a [`PathBuilder`] rather than passed
/// across directly.
fn convert_path(data: &usvg::tiny_skia_path::Path) -> Option<tiny_skia::Path> {
    let mut pb = PathBuilder::new();
    for segment in data.segments() {
        match segment {
            usvg::tiny_skia_path::PathSegment::MoveTo(p) => pb.move_to(p.x, p.y),
            usvg::tiny_skia_path::PathSegment::LineTo(p) => pb.line_to(p.x, p.y),
            usvg::tiny_skia_path::PathSegment::QuadTo(c, p) => pb.quad_to(c.x, c.y, p.x, p.y),
            usvg::tiny_skia_path::PathSegment::CubicTo(c1, c2, p) => {
                pb.cubic_to(c1.x, c1.y, c2.x, c2.y, p.x, p.y);
            }
            usvg::tiny_skia_path::PathSegment::Close => pb.close(),
        }
    }
    pb.finish()
}

fn convert_transform(t: usvg::Transform) -> Transform {
    Transform::from_row(t.sx, t.ky, t.kx, t.sy, t.tx, t.ty)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn convert_paint(paint: &usvg::Paint, opacity: usvg::Opacity) -> Paint<'static> {
    let color = match paint {
        usvg::Paint::Color(c) => *c,
        // Gradients and patterns collapse to solid black: the
        // classifier only needs foreground coverage.
        _ => usvg::Color::black(),
    };
    let alpha = (opacity.get() * 255.0).round() as u8;

    let mut skia_paint = Paint::default();
    skia_paint.set_color_rgba8(color.red, color.green, color.blue, alpha);
    skia_paint.anti_alias = true;
    skia_paint
}

/// Convert the pixmap (premultiplied RGBA) to an `RgbaImage` (straight RGBA).
fn to_rgba(pixmap: &Pixmap) -> RgbaImage {
    let data = pixmap.data();
    let mut img = RgbaImage::new(pixmap.width(), pixmap.height());
    for (i, pixel) in img.pixels_mut().enumerate() {
        let off = i * 4;
        let a = data[off + 3];
        if a == 0 {
            *pixel = image::Rgba([0, 0, 0, 0]);
        } else {
            // Un-premultiply: channel = premultiplied * 255 / alpha.
            let r = u16::from(data[off]) * 255 / u16::from(a);
            let g = u16::from(data[off + 1]) * 255 / u16::from(a);
            let b = u16::from(data[off + 2]) * 255 / u16::from(a);
            #[allow(clippy::cast_possible_truncation)]
            {
                *pixel = image::Rgba([r as u8, g as u8, b as u8, a]);
            }
        }
    }
    img
}
