mod common;

use common::init_logging;
use common::synthetic_cloud::{ring, ring_2d, with_gaussian_noise};
use plant_clearance::circle::{fit_circle, EstimatorKind};
use plant_clearance::image::{Orientation, Rotation};
use plant_clearance::prelude::*;

/// Hollow fruit slice (1 mm raster pixels) plus one obstacle per side, none
/// of them inside the 5 cm projection neighbourhood.
fn fruit_scene(cx: f64, cy: f64, r: f64) -> (Vec<Point3D>, Point3D) {
    let mut cloud = ring(cx, cy, 0.0, r, 360, 0.0);
    let reference = cloud[0];
    cloud.push(Point3D::new(cx + 0.12, cy, 0.001));
    cloud.push(Point3D::new(cx - 0.09, cy + 0.004, -0.001));
    cloud.push(Point3D::new(cx - 0.003, cy - 0.11, 0.0));
    (cloud, reference)
}

/// World size of one raster pixel at the default projection (0.05 m over
/// 50 px).
const PIXEL: f64 = 0.001;

fn assert_round_trip(report: &ClearanceReport, cx: f64, cy: f64, r: f64) {
    let c = report.circle;
    assert!(
        (c.center.x - cx).abs() <= PIXEL && (c.center.y - cy).abs() <= PIXEL,
        "centre off: {c:?}"
    );
    assert!((c.radius - r).abs() <= PIXEL, "radius off: {c:?}");
}

#[test]
fn hough_recovers_a_rasterized_ring() {
    init_logging();
    let (cx, cy, r) = (0.003, -0.002, 0.02);
    let (cloud, reference) = fruit_scene(cx, cy, r);
    let params = ClearanceParams {
        approach_angle_deg: 0.0,
        ..ClearanceParams::default()
    };
    let report = ClearancePipeline::new(params).run(&cloud, &reference).unwrap();
    assert_eq!(report.estimator, EstimatorKind::Hough);
    assert!(report.raster_circle.is_some());
    assert!(report.projection.is_some());
    assert_eq!(report.counts.projected, 360);
    assert_round_trip(&report, cx, cy, r);

    let front = report.clearance.front.expect("front obstacle");
    assert!((front.center_distance - 0.12).abs() <= PIXEL, "{front:?}");
    assert!((front.clearance - 0.10).abs() <= 2.0 * PIXEL, "{front:?}");
    let behind = report.clearance.behind.expect("behind obstacle");
    assert!((behind.center_distance - 0.09).abs() <= PIXEL, "{behind:?}");
    let left = report.clearance.left.expect("left obstacle");
    assert!((left.center_distance - 0.11).abs() <= PIXEL, "{left:?}");
    assert!(report.clearance.right.is_none());
}

#[test]
fn hough_recovers_rings_around_surface_references() {
    init_logging();
    for (k, &(cx, cy, r)) in [(0.0004, -0.0013, 0.022), (-0.006, 0.002, 0.015), (0.011, 0.007, 0.014)]
        .iter()
        .enumerate()
    {
        let mut cloud = ring(cx, cy, 0.0, r, 720, 0.3 * k as f64);
        let reference = cloud[0];
        cloud.push(Point3D::new(cx, cy + 0.2, 0.0));
        let report = ClearancePipeline::new(ClearanceParams::default())
            .run(&cloud, &reference)
            .unwrap();
        assert_round_trip(&report, cx, cy, r);
    }
}

#[test]
fn orientation_does_not_move_the_world_circle() {
    init_logging();
    let (cx, cy, r) = (-0.01, 0.004, 0.018);
    let (cloud, reference) = fruit_scene(cx, cy, r);
    let mut params = ClearanceParams::default();
    params.projection.orientation = Orientation::new(true, Rotation::Cw90);
    let report = ClearancePipeline::new(params).run(&cloud, &reference).unwrap();
    assert_round_trip(&report, cx, cy, r);
    let raster = &report.projection.as_ref().unwrap().raster;
    assert_eq!((raster.w, raster.h), (100, 100));
}

#[test]
fn least_squares_tolerates_surface_noise() {
    let noisy = with_gaussian_noise(&ring_2d(0.05, 0.02, 0.015, 200), 0.0003, 7);
    let c = fit_circle(&noisy).unwrap();
    assert!((c.center.x - 0.05).abs() < 2e-4, "{c:?}");
    assert!((c.center.y - 0.02).abs() < 2e-4, "{c:?}");
    assert!((c.radius - 0.015).abs() < 2e-4, "{c:?}");
}
