//! Non-maximum suppression on gradient magnitude with direction alignment.
//!
//! Each pixel is compared with its two neighbours along the gradient
//! direction quantized to 0°, 45°, 90° or 135°. Survivors are classified
//! against a `(low, high)` threshold pair for the hysteresis stage. Ties are
//! broken like OpenCV: strictly greater than the "previous" neighbour and
//! greater-or-equal to the "next" one, so plateaus keep exactly one pixel.
use super::grad::Grad;
use crate::image::ImageView;

const TAN_22_5_DEG: f32 = 0.414_213_56;
const TAN_67_5_DEG: f32 = 2.414_213_6;

/// Per-pixel classification after suppression.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeClass {
    /// Suppressed or below the low threshold.
    None,
    /// Local maximum with `low < mag ≤ high`.
    Weak,
    /// Local maximum with `mag > high`.
    Strong,
}

/// Run NMS and return a row-major class map of the same size as `grad`.
pub fn suppress_non_maxima(grad: &Grad, low: f32, high: f32) -> Vec<EdgeClass> {
    let w = grad.width();
    let h = grad.height();
    let mut classes = vec![EdgeClass::None; w * h];
    if w < 3 || h < 3 {
        return classes;
    }

    for y in 1..h - 1 {
        let mag_prev = grad.mag.row(y - 1);
        let mag_row = grad.mag.row(y);
        let mag_next = grad.mag.row(y + 1);
        let gx_row = grad.gx.row(y);
        let gy_row = grad.gy.row(y);

        for x in 1..w - 1 {
            let m = mag_row[x];
            if m <= low {
                continue;
            }

            let gx = gx_row[x];
            let gy = gy_row[x];
            let abs_gx = gx.abs();
            let abs_gy = gy.abs();

            let is_max = if abs_gy < abs_gx * TAN_22_5_DEG {
                m > mag_row[x - 1] && m >= mag_row[x + 1]
            } else if abs_gy > abs_gx * TAN_67_5_DEG {
                m > mag_prev[x] && m >= mag_next[x]
            } else if (gx < 0.0) != (gy < 0.0) {
                m > mag_prev[x + 1] && m > mag_next[x - 1]
            } else {
                m > mag_prev[x - 1] && m > mag_next[x + 1]
            };

            if is_max {
                classes[y * w + x] = if m > high {
                    EdgeClass::Strong
                } else {
                    EdgeClass::Weak
                };
            }
        }
    }

    classes
}
