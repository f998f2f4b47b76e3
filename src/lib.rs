#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod clearance;
pub mod diagnostics;
pub mod error;
pub mod pipeline;
pub mod projector;
pub mod sectors;
pub mod types;

// Building blocks – public for tools and experiments.
pub mod angle;
pub mod circle;
pub mod edges;
pub mod filters;
pub mod image;

// Auxiliary measurements and demo-tool support.
pub mod annotate;
pub mod cloud;
pub mod config;
pub mod measure;
pub mod traverse;

// --- High-level re-exports -------------------------------------------------

// Main entry points: pipeline + results.
pub use crate::clearance::{ClearanceResult, SectorReading};
pub use crate::diagnostics::ClearanceReport;
pub use crate::error::{ClearanceError, Result};
pub use crate::pipeline::{ClearanceParams, ClearancePipeline};
pub use crate::sectors::{Sector, SectorStrategy};
pub use crate::types::{Plane, Point3D, WorldCircle, WorldPoint};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use plant_clearance::prelude::*;
///
/// # fn main() -> Result<(), ClearanceError> {
/// let cloud: Vec<Point3D> = vec![Point3D::new(0.0, 0.0, 0.0)];
/// let pipeline = ClearancePipeline::new(ClearanceParams::default());
/// let report = pipeline.run(&cloud, &cloud[0])?;
/// for reading in report.clearance.readings() {
///     println!("{}: {:.1} mm", reading.sector, reading.clearance_mm());
/// }
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::circle::EstimatorKind;
    pub use crate::{
        ClearanceError, ClearanceParams, ClearancePipeline, ClearanceReport, ClearanceResult,
        Plane, Point3D, Sector, SectorReading, SectorStrategy, WorldCircle, WorldPoint,
    };
}
