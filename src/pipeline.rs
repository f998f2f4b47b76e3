//! End-to-end obstacle clearance around a circular plant feature.
//!
//! Stages, in order:
//! 1. Projection: slice the cloud around the reference point and, for the
//!    Hough estimator, rasterize it.
//! 2. Estimation: Hough transform on the raster or least-squares fit on the
//!    slice, giving a world circle.
//! 3. Classification: the whole cloud is re-filtered by height only (no
//!    in-plane radius limit) and split into the four sectors.
//! 4. Reduction: minimum projected distance per sector.
use crate::circle::{estimate_hough, fit_circle, EdgeParams, EstimatorKind, HoughParams};
use crate::clearance::{reduce, ClearanceResult};
use crate::diagnostics::{elapsed_ms, ClearanceReport, StageCounts, TimingBreakdown};
use crate::error::{ClearanceError, Result, Stage};
use crate::projector::{project, select_points, ProjectionParams};
use crate::sectors::{classify, SectorParams};
use crate::types::{Point3D, WorldCircle, WorldPoint};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Every tuning constant of the pipeline. Defaults reproduce the historical
/// field setup (1 cm slice, 5 cm neighbourhood on a 100 px raster, approach
/// along the second plane axis).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClearanceParams {
    pub projection: ProjectionParams,
    pub edge: EdgeParams,
    pub hough: HoughParams,
    pub estimator: EstimatorKind,
    pub sectors: SectorParams,
    /// Approach direction in degrees from the first plane axis.
    pub approach_angle_deg: f64,
}

impl Default for ClearanceParams {
    fn default() -> Self {
        Self {
            projection: ProjectionParams::default(),
            edge: EdgeParams::default(),
            hough: HoughParams::default(),
            estimator: EstimatorKind::Hough,
            sectors: SectorParams::default(),
            approach_angle_deg: 90.0,
        }
    }
}

impl ClearanceParams {
    pub fn approach_rad(&self) -> f64 {
        self.approach_angle_deg.to_radians()
    }

    pub fn validate(&self) -> Result<()> {
        self.projection.validate()?;
        if self.estimator == EstimatorKind::Hough {
            self.edge.validate()?;
            self.hough.validate()?;
        }
        if !self.approach_angle_deg.is_finite() {
            return Err(ClearanceError::invalid(
                "approach_angle_deg",
                "must be finite",
            ));
        }
        if !(self.sectors.radius_margin.is_finite() && self.sectors.radius_margin >= 0.0) {
            return Err(ClearanceError::invalid(
                "radius_margin",
                format!("must be finite and >= 0, got {}", self.sectors.radius_margin),
            ));
        }
        Ok(())
    }
}

/// Stateless runner; one instance can process any number of clouds.
#[derive(Clone, Debug, Default)]
pub struct ClearancePipeline {
    params: ClearanceParams,
}

impl ClearancePipeline {
    pub fn new(params: ClearanceParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &ClearanceParams {
        &self.params
    }

    /// Runs all stages on `points` around `reference`.
    pub fn run(&self, points: &[Point3D], reference: &Point3D) -> Result<ClearanceReport> {
        self.params.validate()?;
        let total_start = Instant::now();
        let mut timings = TimingBreakdown::default();
        let mut counts = StageCounts {
            input: points.len(),
            ..StageCounts::default()
        };

        let (circle, raster_circle, projection) = match self.params.estimator {
            EstimatorKind::Hough => {
                let start = Instant::now();
                let projection = project(points, reference, &self.params.projection)?;
                timings.push_since("projection", start);
                counts.projected = projection.points.len();

                let start = Instant::now();
                let pixel = estimate_hough(&projection.raster, &self.params.edge, &self.params.hough)?;
                let circle = projection.circle_to_world(&pixel)?;
                timings.push_since("estimation", start);
                debug!(
                    "pipeline: raster circle ({:.1}, {:.1}) r={:.1} px -> world ({:.5}, {:.5}) r={:.5} m",
                    pixel.center.x,
                    pixel.center.y,
                    pixel.radius,
                    circle.center.x,
                    circle.center.y,
                    circle.radius
                );
                (circle, Some(pixel), Some(projection))
            }
            EstimatorKind::LeastSquares => {
                let start = Instant::now();
                let selected = select_points(points, reference, &self.params.projection)?;
                timings.push_since("projection", start);
                counts.projected = selected.len();

                let start = Instant::now();
                let circle = fit_circle(&selected)?;
                timings.push_since("estimation", start);
                (circle, None, None)
            }
        };

        let start = Instant::now();
        let slice = self.height_slice(points, reference)?;
        counts.slice = slice.len();
        let clearance = self.measure(&slice, &circle, self.params.approach_rad());
        counts.classified = clearance.readings().map(|r| r.point_count).sum();
        timings.push_since("classification", start);
        timings.total_ms = elapsed_ms(total_start);

        info!(
            "pipeline: circle ({:.4}, {:.4}) r={:.4} m; sectors with data: {}/4; {:.3} ms",
            circle.center.x,
            circle.center.y,
            circle.radius,
            clearance.readings().count(),
            timings.total_ms
        );

        Ok(ClearanceReport {
            estimator: self.params.estimator,
            strategy: self.params.sectors.strategy,
            approach_angle_deg: self.params.approach_angle_deg,
            circle,
            circle_mm: circle.to_millimeters(),
            raster_circle,
            clearance,
            counts,
            timings,
            projection,
        })
    }

    /// Classifies and reduces in-plane points around a known circle.
    /// `approach` is in radians.
    pub fn measure(
        &self,
        points: &[WorldPoint],
        circle: &WorldCircle,
        approach: f64,
    ) -> ClearanceResult {
        let approach = self.params.sectors.strategy.effective_approach(approach);
        let sets = classify(points, circle, approach, &self.params.sectors);
        reduce(&sets, circle, approach)
    }

    /// In-plane coordinates of every point inside the height slice of
    /// `reference`, regardless of in-plane distance.
    fn height_slice(&self, points: &[Point3D], reference: &Point3D) -> Result<Vec<WorldPoint>> {
        let plane = self.params.projection.plane;
        let ref_h = plane.height(reference);
        let tol = self.params.projection.height_tolerance;
        let slice: Vec<WorldPoint> = points
            .iter()
            .filter(|p| (plane.height(p) - ref_h).abs() < tol)
            .map(|p| plane.project(p))
            .collect();
        debug!(
            "pipeline: {} of {} points in the classification slice",
            slice.len(),
            points.len()
        );
        if slice.is_empty() {
            return Err(ClearanceError::empty(Stage::Classification));
        }
        Ok(slice)
    }
}
