//! Pixel classification: map a decoded pixel grid to engrave intensity.
//!
//! Produces the classification mask consumed by every downstream stage:
//! 0 means full engrave, 255 means untouched, and intermediate values
//! carry tonal gradation for power modulation.
//!
//! Two strategies exist because plain luma thresholding is visually
//! wrong on flat-color vector art: a bright flat color can read as
//! "light" under luma math while being the intended foreground.
//!
//! - **Luma**: soft threshold over the standard luminance formula.
//! - **Dominant-color**: when the caller flags a flat-color source and
//!   the two largest quantized color buckets cover most of the visible
//!   pixels, classify by nearest-dominant membership into discrete
//!   bands. Independently, a warm-background heuristic flips foreground
//!   and background for the common yellow-logo case.
//!
//! The cutoffs below are empirical, tuned on sample inputs. They are
//! named constants, not derived values; resist the urge to "improve"
//! them without comparing engraver output.

use std::collections::HashMap;

use image::{GrayImage, Luma, Rgba, RgbaImage};

use crate::palette::{self, ColorBucket};
use crate::types::PipelineConfig;

/// Pixels with alpha below this are invisible for classification
/// statistics (histogram and darkness counts).
pub const VISIBLE_ALPHA: u8 = 128;

/// Luma at or below this maps to full engrave (0).
pub const LUMA_LOW: u8 = 50;

/// Luma above this maps to untouched (255).
pub const LUMA_HIGH: u8 = 230;

/// Luma below this counts as "dark" when measuring how sparse the dark
/// foreground is.
pub const DARK_LUMA: u8 = 64;

/// Fraction of visible pixels the top two buckets must jointly cover
/// for the image to count as having distinct color groups.
pub const DISTINCT_COVERAGE: f64 = 0.7;

/// Fraction of visible pixels that must fall into warm buckets for the
/// warm-background inversion to fire.
pub const WARM_COVERAGE: f64 = 0.5;

/// Maximum per-channel distance (in quantized units) for a pixel to be
/// considered a member of a dominant bucket.
pub const BAND_DISTANCE: u8 = 1;

/// Intensity band for pixels matching the second dominant bucket.
pub const BAND_SECONDARY: u8 = 127;

const ENGRAVE: u8 = 0;
const BACKGROUND: u8 = 255;

/// Classify an RGBA grid into an engrave-intensity mask.
///
/// The grid is read, never mutated; the returned mask has the same
/// dimensions. Fully transparent pixels always classify as background,
/// and a fully transparent image yields an all-background mask.
#[must_use = "returns the classification mask"]
pub fn classify(image: &RgbaImage, config: &PipelineConfig) -> GrayImage {
    let stats = collect_stats(image);
    let strategy = choose_strategy(&stats, config);

    GrayImage::from_fn(image.width(), image.height(), |x, y| {
        let Rgba([r, g, b, a]) = *image.get_pixel(x, y);
        if a == 0 {
            return Luma([BACKGROUND]);
        }
        let value = match &strategy {
            Strategy::Luma => soft_threshold(luma(r, g, b)),
            Strategy::Banded { primary, secondary } => {
                band(r, g, b, *primary, *secondary)
            }
            Strategy::Inverted => inverted(r, g, b),
        };
        Luma([value])
    })
}

/// Classify an already-grayscale grid by applying the luma soft
/// threshold directly to each sample.
#[must_use = "returns the classification mask"]
pub fn classify_gray(gray: &GrayImage) -> GrayImage {
    GrayImage::from_fn(gray.width(), gray.height(), |x, y| {
        Luma([soft_threshold(gray.get_pixel(x, y).0[0])])
    })
}

/// Which per-pixel rule to apply, decided once per run.
#[derive(Debug)]
enum Strategy {
    Luma,
    Banded { primary: u16, secondary: Option<u16> },
    Inverted,
}

/// Aggregate statistics from one pass over the visible pixels.
struct ImageStats {
    histogram: HashMap<u16, usize>,
    dark: usize,
    visible: usize,
}

fn collect_stats(image: &RgbaImage) -> ImageStats {
    let mut histogram = HashMap::new();
    let mut dark = 0;
    let mut visible = 0;

    for Rgba([r, g, b, a]) in image.pixels().copied() {
        if a < VISIBLE_ALPHA {
            continue;
        }
        *histogram.entry(palette::quantize(r, g, b)).or_insert(0) += 1;
        if luma(r, g, b) < DARK_LUMA {
            dark += 1;
        }
        visible += 1;
    }

    ImageStats {
        histogram,
        dark,
        visible,
    }
}

#[allow(clippy::cast_precision_loss)]
fn choose_strategy(stats: &ImageStats, config: &PipelineConfig) -> Strategy {
    if config.force_luma || stats.visible == 0 {
        return Strategy::Luma;
    }

    let dominant = palette::dominant_buckets(&stats.histogram, 3);
    if !has_distinct_groups(&dominant, stats.visible) {
        return Strategy::Luma;
    }

    let warm: usize = stats
        .histogram
        .iter()
        .filter(|&(&key, _)| palette::is_warm(key))
        .map(|(_, &count)| count)
        .sum();
    let warm_background = warm as f64 / stats.visible as f64 > WARM_COVERAGE;
    let sparse_dark = stats.dark < stats.visible / 5;

    if warm_background && sparse_dark {
        Strategy::Inverted
    } else if config.flat_color {
        Strategy::Banded {
            primary: dominant[0].key,
            secondary: dominant.get(1).map(|b| b.key),
        }
    } else {
        Strategy::Luma
    }
}

#[allow(clippy::cast_precision_loss)]
fn has_distinct_groups(dominant: &[ColorBucket], visible: usize) -> bool {
    if dominant.len() < 2 || visible == 0 {
        return false;
    }
    let top_two = dominant[0].count + dominant[1].count;
    top_two as f64 / visible as f64 > DISTINCT_COVERAGE
}

/// Standard luminance: `(299*R + 587*G + 114*B) / 1000`.
#[allow(clippy::cast_possible_truncation)]
fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((299 * u32::from(r) + 587 * u32::from(g) + 114 * u32::from(b)) / 1000) as u8
}

/// Soft threshold: full engrave below the low cutoff, untouched above
/// the high cutoff, linear renormalization in between. Downstream
/// extraction still applies a binary test; the gradation survives into
/// the mask for power modulation.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn soft_threshold(gray: u8) -> u8 {
    if gray < LUMA_LOW {
        ENGRAVE
    } else if gray > LUMA_HIGH {
        BACKGROUND
    } else {
        let normalized = f64::from(gray - LUMA_LOW) / f64::from(LUMA_HIGH - LUMA_LOW);
        (normalized * 255.0) as u8
    }
}

/// Banded classification for distinct-color-group images: nearest
/// dominant bucket wins, anything matching neither is background.
fn band(r: u8, g: u8, b: u8, primary: u16, secondary: Option<u16>) -> u8 {
    let key = palette::quantize(r, g, b);
    let primary_dist = palette::channel_distance(key, primary);
    let secondary_dist = secondary.map(|s| palette::channel_distance(key, s));

    if primary_dist <= BAND_DISTANCE && secondary_dist.is_none_or(|d| primary_dist <= d) {
        ENGRAVE
    } else if secondary_dist.is_some_and(|d| d <= BAND_DISTANCE) {
        BAND_SECONDARY
    } else {
        BACKGROUND
    }
}

/// Inverted assignment for a bright warm background with a sparse dark
/// foreground: the warm background is the material to mark.
fn inverted(r: u8, g: u8, b: u8) -> u8 {
    let is_yellow = r > 200 && g > 180 && b < 100;
    let is_black = r < 60 && g < 60 && b < 60;

    if is_yellow {
        ENGRAVE
    } else if is_black {
        BACKGROUND
    } else {
        255 - luma(r, g, b)
    }
}
