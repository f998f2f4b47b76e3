//! Canny edge detector and median-adaptive threshold selection.
//!
//! The adaptive rule derives both thresholds from the median intensity `m`
//! of the (blurred) raster: `low = max(0, (1−σ)·m)` and a high threshold
//! chosen by [`HighThresholdRule`]. The historical rule
//! `max(255, (1+σ)·m)` saturates at 255 for any `m < 192`; downstream Hough
//! parameters were tuned against it, so it stays the default.
use super::grad::sobel_gradients;
use super::nms::{suppress_non_maxima, EdgeClass};
use crate::image::RasterU8;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// How the high Canny threshold is derived from the median.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HighThresholdRule {
    /// `max(255, (1+σ)·m)`: historical behaviour, effectively constant 255.
    #[default]
    Saturating,
    /// `min(255, (1+σ)·m)`: the usual auto-Canny formulation.
    Clamped,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CannyThresholds {
    pub low: f32,
    pub high: f32,
}

/// Thresholds from the median intensity, truncated to integers.
pub fn adaptive_thresholds(median: f64, sigma: f64, rule: HighThresholdRule) -> CannyThresholds {
    let low = ((1.0 - sigma) * median).max(0.0).trunc();
    let scaled = (1.0 + sigma) * median;
    let high = match rule {
        HighThresholdRule::Saturating => scaled.max(255.0),
        HighThresholdRule::Clamped => scaled.min(255.0),
    }
    .trunc();
    CannyThresholds {
        low: low as f32,
        high: high as f32,
    }
}

/// Binary edge map (0 / 255) of `src`.
///
/// Pixels survive when they are local maxima above `low` and are
/// 8-connected to a local maximum above `high`. Swapped thresholds are
/// reordered.
pub fn canny(src: &RasterU8, low: f32, high: f32) -> RasterU8 {
    let (low, high) = if low > high { (high, low) } else { (low, high) };
    let grad = sobel_gradients(src);
    let classes = suppress_non_maxima(&grad, low, high);
    let w = src.w;
    let h = src.h;
    let mut out = RasterU8::new(w, h);

    let mut queue: VecDeque<(usize, usize)> = VecDeque::new();
    for (i, class) in classes.iter().enumerate() {
        if *class == EdgeClass::Strong {
            out.data[i] = 255;
            queue.push_back((i % w, i / w));
        }
    }

    while let Some((x, y)) = queue.pop_front() {
        for dy in -1i64..=1 {
            for dx in -1i64..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let nx = x as i64 + dx;
                let ny = y as i64 + dy;
                if nx < 0 || ny < 0 || nx >= w as i64 || ny >= h as i64 {
                    continue;
                }
                let idx = ny as usize * w + nx as usize;
                if classes[idx] == EdgeClass::Weak && out.data[idx] == 0 {
                    out.data[idx] = 255;
                    queue.push_back((nx as usize, ny as usize));
                }
            }
        }
    }

    debug!(
        "canny: {}x{} low={:.0} high={:.0} edges={}",
        w,
        h,
        low,
        high,
        out.count_nonzero()
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::draw::fill_disk;

    #[test]
    fn saturating_rule_pins_high_at_255() {
        let t = adaptive_thresholds(0.0, 0.33, HighThresholdRule::Saturating);
        assert_eq!(t.low, 0.0);
        assert_eq!(t.high, 255.0);
        let t = adaptive_thresholds(100.0, 0.33, HighThresholdRule::Saturating);
        assert_eq!(t.low, 67.0);
        assert_eq!(t.high, 255.0);
        let t = adaptive_thresholds(240.0, 0.33, HighThresholdRule::Saturating);
        assert_eq!(t.high, 319.0);
    }

    #[test]
    fn clamped_rule_tracks_the_median() {
        let t = adaptive_thresholds(100.0, 0.33, HighThresholdRule::Clamped);
        assert_eq!(t.low, 67.0);
        assert_eq!(t.high, 133.0);
        let t = adaptive_thresholds(240.0, 0.33, HighThresholdRule::Clamped);
        assert_eq!(t.high, 255.0);
    }

    #[test]
    fn disk_edges_form_a_ring() {
        let mut img = RasterU8::square(40);
        fill_disk(&mut img, 20, 20, 10, 255);
        let edges = canny(&img, 50.0, 100.0);
        assert!(edges.count_nonzero() > 40);
        for y in 0..40 {
            for x in 0..40 {
                if edges.get(x, y) != 0 {
                    let d = ((x as f64 - 20.0).powi(2) + (y as f64 - 20.0).powi(2)).sqrt();
                    assert!((d - 10.0).abs() <= 2.0, "edge pixel ({x},{y}) at {d}");
                }
            }
        }
    }

    #[test]
    fn flat_image_yields_no_edges() {
        let mut img = RasterU8::square(16);
        img.data.iter_mut().for_each(|v| *v = 120);
        assert_eq!(canny(&img, 0.0, 255.0).count_nonzero(), 0);
    }
}
