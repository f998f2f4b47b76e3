//! Circle estimation on a projected neighbourhood.
//!
//! Two estimators share one output type:
//! - [`hough`]: blur → Canny (median-adaptive thresholds) → gradient Hough
//!   transform on the projection raster; yields a [`PixelCircle`].
//! - [`lsq`]: algebraic least-squares fit directly on world coordinates.
//!
//! [`PixelCircle`]: crate::types::PixelCircle
pub mod hough;
pub mod lsq;

pub use hough::{estimate_hough, hough_circles, CircleSelection, HoughOutput, HoughParams};
pub use lsq::{fit_circle, fit_circle_xy};

use crate::edges::HighThresholdRule;
use crate::error::{ClearanceError, Result};
use serde::{Deserialize, Serialize};

/// Which estimator the pipeline runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstimatorKind {
    #[default]
    Hough,
    LeastSquares,
}

/// Pre-processing applied before the Hough transform.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeParams {
    /// Gaussian kernel size (odd).
    pub blur_ksize: usize,
    /// Spread of the median-adaptive Canny thresholds.
    pub sigma: f64,
    pub high_rule: HighThresholdRule,
}

impl Default for EdgeParams {
    fn default() -> Self {
        Self {
            blur_ksize: 9,
            sigma: 0.33,
            high_rule: HighThresholdRule::Saturating,
        }
    }
}

impl EdgeParams {
    pub fn validate(&self) -> Result<()> {
        if self.blur_ksize == 0 || self.blur_ksize % 2 == 0 {
            return Err(ClearanceError::invalid(
                "blur_ksize",
                format!("kernel size must be odd and positive, got {}", self.blur_ksize),
            ));
        }
        if !(self.sigma.is_finite() && self.sigma >= 0.0) {
            return Err(ClearanceError::invalid(
                "sigma",
                format!("must be finite and >= 0, got {}", self.sigma),
            ));
        }
        Ok(())
    }
}
