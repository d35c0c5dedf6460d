//! Quantized color histogram and dominant-color ranking.
//!
//! Near-identical colors are merged by truncating each channel to
//! [`QUANT_BITS`] bits before counting, so flat-color art (icons,
//! logos) collapses into a handful of buckets even with anti-aliased
//! edges. Ranking uses an explicit total order so the result never
//! depends on `HashMap` iteration order.

use std::collections::HashMap;

/// Bits kept per channel when quantizing a color into a bucket key.
pub const QUANT_BITS: u32 = 4;

const CHANNEL_SHIFT: u32 = 8 - QUANT_BITS;

/// A quantized color bucket and the number of pixels that fell into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorBucket {
    /// Packed quantized channels: `rrrr_gggg_bbbb` for 4-bit channels.
    pub key: u16,
    /// Number of visible pixels quantizing to this bucket.
    pub count: usize,
}

impl ColorBucket {
    /// Unpack the bucket key into quantized `(r, g, b)` channels,
    /// each in `0..2^QUANT_BITS`.
    #[must_use]
    pub const fn channels(self) -> (u8, u8, u8) {
        channels(self.key)
    }
}

/// Quantize an 8-bit RGB color into a bucket key.
#[must_use]
pub const fn quantize(r: u8, g: u8, b: u8) -> u16 {
    ((r >> CHANNEL_SHIFT) as u16) << (2 * QUANT_BITS)
        | ((g >> CHANNEL_SHIFT) as u16) << QUANT_BITS
        | (b >> CHANNEL_SHIFT) as u16
}

/// Unpack a bucket key into quantized `(r, g, b)` channels.
#[must_use]
pub const fn channels(key: u16) -> (u8, u8, u8) {
    let mask = (1 << QUANT_BITS) - 1;
    (
        ((key >> (2 * QUANT_BITS)) & mask) as u8,
        ((key >> QUANT_BITS) & mask) as u8,
        (key & mask) as u8,
    )
}

/// Largest per-channel difference between two bucket keys, in
/// quantized units.
#[must_use]
pub const fn channel_distance(a: u16, b: u16) -> u8 {
    let (ar, ag, ab) = channels(a);
    let (br, bg, bb) = channels(b);
    let dr = ar.abs_diff(br);
    let dg = ag.abs_diff(bg);
    let db = ab.abs_diff(bb);
    let mut max = dr;
    if dg > max {
        max = dg;
    }
    if db > max {
        max = db;
    }
    max
}

/// Returns `true` if a bucket holds a bright, saturated warm color
/// (red and green channels high, both at least double the blue).
///
/// Channel comparisons are in quantized units, so the `> 10` floor on a
/// 4-bit channel corresponds to 8-bit values above ~175.
#[must_use]
pub const fn is_warm(key: u16) -> bool {
    let (r, g, b) = channels(key);
    r > 10 && g > 10 && r > b * 2 && g > b * 2
}

/// Rank the histogram's buckets and return the `count` largest.
///
/// Ordering is total and deterministic: pixel count descending, then
/// bucket key ascending to break ties. Two runs over the same
/// histogram always produce the same sequence regardless of the map's
/// internal iteration order.
#[must_use]
pub fn dominant_buckets(histogram: &HashMap<u16, usize>, count: usize) -> Vec<ColorBucket> {
    let mut buckets: Vec<ColorBucket> = histogram
        .iter()
        .map(|(&key, &count)| ColorBucket { key, count })
        .collect();

    buckets.sort_unstable_by(|a, b| b.count.cmp(&a.count).then(a.key.cmp(&b.key)));
    buckets.truncate(count);
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantize_truncates_channels() {
        // 0x1F and 0x10 share the same top 4 bits.
        assert_eq!(quantize(0x1F, 0x2F, 0x3F), quantize(0x10, 0x20, 0x30));
        assert_ne!(quantize(0x1F, 0x2F, 0x3F), quantize(0x2F, 0x2F, 0x3F));
    }

    #[test]
    fn channels_round_trip() {
        let key = quantize(0xF0, 0x80, 0x10);
        assert_eq!(channels(key), (0xF, 0x8, 0x1));
    }

    #[test]
    fn channel_distance_is_max_over_channels() {
        let a = quantize(0xF0, 0x00, 0x40);
        let b = quantize(0xE0, 0x20, 0x40);
        // Per-channel quantized deltas: 1, 2, 0.
        assert_eq!(channel_distance(a, b), 2);
        assert_eq!(channel_distance(a, a), 0);
    }

    #[test]
    fn warm_buckets() {
        assert!(is_warm(quantize(0xFF, 0xE0, 0x10)), "yellow is warm");
        assert!(!is_warm(quantize(0x10, 0x10, 0x10)), "black is not warm");
        assert!(!is_warm(quantize(0xFF, 0xFF, 0xFF)), "white fails the blue ratio");
        assert!(!is_warm(quantize(0x10, 0xFF, 0x10)), "green alone is not warm");
    }

    #[test]
    fn ranking_orders_by_count_descending() {
        let mut histogram = HashMap::new();
        histogram.insert(quantize(0, 0, 0), 50);
        histogram.insert(quantize(255, 255, 255), 200);
        histogram.insert(quantize(255, 0, 0), 10);

        let ranked = dominant_buckets(&histogram, 3);
        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0].count, 200);
        assert_eq!(ranked[1].count, 50);
        assert_eq!(ranked[2].count, 10);
    }

    #[test]
    fn ranking_ties_break_by_ascending_key() {
        let mut histogram = HashMap::new();
        let low_key = quantize(0x00, 0x00, 0x10);
        let high_key = quantize(0xF0, 0x00, 0x00);
        histogram.insert(high_key, 40);
        histogram.insert(low_key, 40);

        let ranked = dominant_buckets(&histogram, 2);
        assert_eq!(ranked[0].key, low_key);
        assert_eq!(ranked[1].key, high_key);
    }

    #[test]
    fn ranking_is_reproducible() {
        // Build two histograms with identical content but different
        // insertion order; the ranking must be identical.
        let keys: Vec<u16> = (0u8..16).map(|i| quantize(i << 4, 0, 0)).collect();

        let mut forward = HashMap::new();
        for (i, &k) in keys.iter().enumerate() {
            forward.insert(k, 7 + i % 3);
        }
        let mut reverse = HashMap::new();
        for (i, &k) in keys.iter().enumerate().rev() {
            reverse.insert(k, 7 + i % 3);
        }

        assert_eq!(dominant_buckets(&forward, 8), dominant_buckets(&reverse, 8));
    }

    #[test]
    fn ranking_truncates_to_requested_count() {
        let mut histogram = HashMap::new();
        for i in 0u8..10 {
            histogram.insert(quantize(i * 16, 0, 0), usize::from(i) + 1);
        }
        assert_eq!(dominant_buckets(&histogram, 3).len(), 3);
    }

    #[test]
    fn empty_histogram_ranks_empty() {
        let histogram = HashMap::new();
        assert!(dominant_buckets(&histogram, 3).is_empty());
    }
}
