use crate::circle::EstimatorKind;
use crate::clearance::ClearanceResult;
use crate::diagnostics::TimingBreakdown;
use crate::projector::Projection;
use crate::sectors::{Sector, SectorStrategy};
use crate::types::{PixelCircle, WorldCircle, MM_PER_M};
use serde::Serialize;

/// Result of [`ClearancePipeline::run`](crate::ClearancePipeline::run).
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearanceReport {
    pub estimator: EstimatorKind,
    pub strategy: SectorStrategy,
    pub approach_angle_deg: f64,
    pub circle: WorldCircle,
    /// `[x, y, r]` in millimetres.
    pub circle_mm: [f64; 3],
    /// Detection on the oriented raster (Hough only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raster_circle: Option<PixelCircle>,
    pub clearance: ClearanceResult,
    pub counts: StageCounts,
    pub timings: TimingBreakdown,
    /// Raster and frame used for estimation (Hough only).
    #[serde(skip)]
    pub projection: Option<Projection>,
}

/// Number of points that entered or survived each stage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageCounts {
    pub input: usize,
    pub projected: usize,
    pub slice: usize,
    pub classified: usize,
}

fn format_optional_mm(val: Option<f64>) -> String {
    val.map(|v| format!("{:.1} mm", v * MM_PER_M))
        .unwrap_or_else(|| "-".to_string())
}

impl ClearanceReport {
    /// Human-readable summary, one line per item.
    pub fn summary_lines(&self) -> Vec<String> {
        let [x, y, r] = self.circle_mm;
        let mut lines = vec![format!(
            "circle: center=({:.4}, {:.4}) m r={:.4} m  [({x:.1}, {y:.1}) mm, r={r:.1} mm]",
            self.circle.center.x, self.circle.center.y, self.circle.radius
        )];
        for sector in Sector::ALL {
            let reading = self.clearance.get(sector);
            lines.push(format!(
                "{:<6} axis={:>7} center={:>10} clearance={:>10} points={}",
                sector.label(),
                reading
                    .map(|r| format!("{:.1}°", r.axis_deg))
                    .unwrap_or_else(|| "-".to_string()),
                format_optional_mm(reading.map(|r| r.center_distance)),
                format_optional_mm(reading.map(|r| r.clearance)),
                reading.map(|r| r.point_count).unwrap_or(0)
            ));
        }
        lines.push(format!("total {:.3} ms", self.timings.total_ms));
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clearance::reduce;
    use crate::sectors::SectorSets;
    use crate::types::WorldPoint;

    #[test]
    fn summary_carries_circle_and_sector_distances() {
        let circle = WorldCircle::new(WorldPoint::new(0.0, 0.0), 0.02).unwrap();
        let sets = SectorSets {
            front: vec![WorldPoint::new(0.1, 0.0)],
            ..SectorSets::default()
        };
        let report = ClearanceReport {
            estimator: EstimatorKind::LeastSquares,
            strategy: SectorStrategy::RotatedBand,
            approach_angle_deg: 0.0,
            circle,
            circle_mm: circle.to_millimeters(),
            raster_circle: None,
            clearance: reduce(&sets, &circle, 0.0),
            counts: StageCounts::default(),
            timings: TimingBreakdown::default(),
            projection: None,
        };
        let lines = report.summary_lines();
        assert_eq!(lines.len(), 6);
        assert!(lines[0].contains("r=20.0 mm"), "{}", lines[0]);
        assert!(lines[1].starts_with("FRONT"), "{}", lines[1]);
        assert!(lines[1].contains("0.0°"), "{}", lines[1]);
        assert!(lines[1].contains("100.0 mm"), "{}", lines[1]);
        assert!(lines[1].contains("80.0 mm"), "{}", lines[1]);
        assert!(lines[2].contains("points=0"), "{}", lines[2]);
    }
}
