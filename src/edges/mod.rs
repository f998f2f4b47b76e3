//! Edge processing: Sobel gradients, non-maximum suppression and Canny
//! hysteresis on 8-bit rasters.
//!
//! Magnitudes use the L1 norm `|gx| + |gy|` on raw 8-bit intensities, so
//! thresholds live in the same numeric range as the classic Canny/Hough
//! parameters (tens to hundreds).
//!
//! - Gradients clamp indices at the border (replicate).
//! - NMS ignores the outermost 1-pixel frame.
//! - Hysteresis grows strong edges through 8-connected weak candidates.

pub mod canny;
pub mod grad;
pub mod nms;

pub use canny::{adaptive_thresholds, canny, CannyThresholds, HighThresholdRule};
pub use grad::{sobel_gradients, Grad};
pub use nms::{suppress_non_maxima, EdgeClass};
