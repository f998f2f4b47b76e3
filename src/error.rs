//! Error taxonomy for the clearance pipeline.
//!
//! Every failure surfaces as an explicit variant. No stage substitutes a zero,
//! a NaN, or a default circle for a missing result. A sector without
//! qualifying points is *not* an error; it is reported as `None` in
//! [`crate::clearance::ClearanceResult`].

use serde::Serialize;
use thiserror::Error;

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, ClearanceError>;

/// Pipeline stage that ran out of input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Stage {
    /// Height/radius filtering before rasterization or fitting.
    Projection,
    /// Circle estimation input (edge pixels or fit points).
    Estimation,
    /// Height filtering of the obstacle cloud before sector classification.
    Classification,
    /// Auxiliary measurements in [`crate::measure`].
    Measurement,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::Projection => "projection",
            Stage::Estimation => "estimation",
            Stage::Classification => "classification",
            Stage::Measurement => "measurement",
        };
        f.write_str(name)
    }
}

/// Why a least-squares or geometric fit could not produce a result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DegenerateReason {
    /// Fewer points than the model has degrees of freedom.
    TooFewPoints,
    /// Normal equations are singular or numerically close to it
    /// (typically collinear input).
    SingularSystem,
    /// The solved radius would be imaginary.
    NonRealRadius,
}

impl std::fmt::Display for DegenerateReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            DegenerateReason::TooFewPoints => "too few points",
            DegenerateReason::SingularSystem => "singular normal equations",
            DegenerateReason::NonRealRadius => "radius is not real",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ClearanceError {
    /// No point satisfied the filtering criteria of `stage`.
    #[error("no points survived the {stage} stage")]
    EmptyInput { stage: Stage },

    /// The Hough transform produced no circle. Terminal for the invocation;
    /// parameter search is left to the operator.
    #[error("no circle detected ({candidates_considered} accumulator candidates considered)")]
    NoCircleDetected { candidates_considered: usize },

    /// The algebraic fit could not be solved.
    #[error("degenerate circle fit: {reason}")]
    DegenerateFit { reason: DegenerateReason },

    /// A configuration value is outside its valid domain.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// A circle with a non-positive or non-finite radius or centre.
    #[error("invalid circle: center=({x}, {y}) radius={radius}")]
    InvalidCircle { x: f64, y: f64, radius: f64 },
}

impl ClearanceError {
    pub(crate) fn empty(stage: Stage) -> Self {
        ClearanceError::EmptyInput { stage }
    }

    pub(crate) fn degenerate(reason: DegenerateReason) -> Self {
        ClearanceError::DegenerateFit { reason }
    }

    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        ClearanceError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_stage_and_reason() {
        let err = ClearanceError::empty(Stage::Projection);
        assert_eq!(err.to_string(), "no points survived the projection stage");

        let err = ClearanceError::degenerate(DegenerateReason::SingularSystem);
        assert!(err.to_string().contains("singular"));

        let err = ClearanceError::invalid("image_size", "must be > 0");
        assert!(err.to_string().contains("image_size"));
    }
}
