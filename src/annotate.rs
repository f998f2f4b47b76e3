//! Wide-view verification raster: the height slice around the reference, the
//! fitted circle, its centre, and the nearest obstacle of every sector.
//!
//! The raster carries markers only. The numbers that belong with it (circle
//! and per-sector distances) are in [`ClearanceReport::summary_lines`] and
//! the JSON report written next to it.
//!
//! [`ClearanceReport::summary_lines`]: crate::diagnostics::ClearanceReport::summary_lines
use crate::clearance::ClearanceResult;
use crate::error::Result;
use crate::image::draw::{draw_circle, draw_cross, draw_tilted_cross, fill_disk};
use crate::image::{Orientation, RasterU8};
use crate::projector::ProjectionParams;
use crate::types::{WorldCircle, WorldPoint};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverviewParams {
    /// Half-width of the view in metres.
    pub radius: f64,
    pub image_size: usize,
    pub point_radius: u32,
    /// Marker size in pixels.
    pub marker_size: i64,
    /// Same convention as `ProjectionParams::orientation`; the historical
    /// tool rendered with a horizontal flip and a counter-clockwise turn.
    pub orientation: Orientation,
}

impl Default for OverviewParams {
    fn default() -> Self {
        Self {
            radius: 0.5,
            image_size: 1000,
            point_radius: 1,
            marker_size: 10,
            orientation: Orientation::IDENTITY,
        }
    }
}

/// Renders `points` (in-plane, metres) around `reference` with the circle
/// and the per-sector nearest obstacles overlaid.
pub fn render_overview(
    points: &[WorldPoint],
    reference: WorldPoint,
    circle: &WorldCircle,
    clearance: &ClearanceResult,
    params: &OverviewParams,
) -> Result<RasterU8> {
    let frame_params = ProjectionParams {
        radius_threshold: params.radius,
        image_size: params.image_size,
        ..ProjectionParams::default()
    };
    frame_params.validate()?;
    let frame = frame_params.frame(reference);
    let mut img = RasterU8::square(frame.size);

    for p in points.iter().filter(|p| p.distance(&reference) < params.radius) {
        let (x, y) = frame.to_cell(*p);
        fill_disk(&mut img, x, y, params.point_radius, 255);
    }

    let (cx, cy) = frame.to_cell(circle.center);
    let r = frame.radius_to_pixels(circle.radius).round() as i64;
    draw_circle(&mut img, cx, cy, r.max(1), 255);
    draw_cross(&mut img, cx, cy, params.marker_size, 255);

    for reading in clearance.readings() {
        let (x, y) = frame.to_cell(reading.nearest);
        draw_tilted_cross(&mut img, x, y, params.marker_size / 2, 255);
    }

    Ok(params.orientation.apply(&img))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clearance::SectorReading;
    use crate::sectors::Sector;

    #[test]
    fn overview_marks_circle_and_obstacles() {
        let circle = WorldCircle::new(WorldPoint::new(0.0, 0.0), 0.02).unwrap();
        let obstacle = WorldPoint::new(0.1, 0.0);
        let clearance = ClearanceResult {
            front: Some(SectorReading {
                sector: Sector::Front,
                axis_deg: 0.0,
                center_distance: 0.1,
                clearance: 0.08,
                point_count: 1,
                nearest: obstacle,
            }),
            ..ClearanceResult::default()
        };
        let far = WorldPoint::new(0.6, 0.0);
        let params = OverviewParams::default();
        let img =
            render_overview(&[obstacle, far], WorldPoint::default(), &circle, &clearance, &params)
                .unwrap();
        assert_eq!((img.w, img.h), (1000, 1000));
        // centre cross
        assert_eq!(img.get(500, 500), 255);
        // obstacle at 0.1 m = 100 px right of centre
        assert_eq!(img.get(600, 500), 255);
        // circle outline at 20 px
        assert_eq!(img.get(520, 500), 255);
        assert_eq!(img.get(500, 480), 255);
        assert_eq!(img.get(550, 550), 0);
    }

    #[test]
    fn invalid_view_is_rejected() {
        let circle = WorldCircle::new(WorldPoint::new(0.0, 0.0), 0.02).unwrap();
        let params = OverviewParams {
            image_size: 0,
            ..OverviewParams::default()
        };
        assert!(render_overview(&[], WorldPoint::default(), &circle, &ClearanceResult::default(), &params).is_err());
    }
}
