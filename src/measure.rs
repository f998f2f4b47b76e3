//! Auxiliary measurements on a scanned plant: height slices, projected
//! cross-section area, distances along a direction, culling of geometry
//! behind a viewpoint, and the offset between a fitted centre and a
//! reference point (e.g. the peduncle).
use crate::angle::{direction, dot, norm, project_onto};
use crate::error::{ClearanceError, DegenerateReason, Result, Stage};
use crate::types::{Plane, Point3D, WorldCircle, WorldPoint};
use log::debug;

/// Indices of points whose height differs from `target` by less than
/// `tolerance`.
pub fn height_slice(points: &[Point3D], plane: Plane, target: f64, tolerance: f64) -> Vec<usize> {
    points
        .iter()
        .enumerate()
        .filter(|(_, p)| (plane.height(p) - target).abs() < tolerance)
        .map(|(i, _)| i)
        .collect()
}

/// Area enclosed by an ordered vertex loop after projection onto `plane`
/// (shoelace formula, orientation-independent).
pub fn projected_polygon_area(points: &[Point3D], plane: Plane) -> Result<f64> {
    if points.is_empty() {
        return Err(ClearanceError::empty(Stage::Measurement));
    }
    if points.len() < 3 {
        return Err(ClearanceError::degenerate(DegenerateReason::TooFewPoints));
    }
    let ring: Vec<WorldPoint> = points.iter().map(|p| plane.project(p)).collect();
    let twice: f64 = ring
        .iter()
        .zip(ring.iter().cycle().skip(1))
        .map(|(a, b)| a.x * b.y - b.x * a.y)
        .sum();
    let area = 0.5 * twice.abs();
    debug!("measure: polygon of {} vertices, area {:.6}", ring.len(), area);
    Ok(area)
}

/// Length of the projection of `b − a` (in-plane) onto the direction at
/// `angle`.
pub fn directional_distance(a: &Point3D, b: &Point3D, plane: Plane, angle: f64) -> f64 {
    let pa = plane.project(a);
    let pb = plane.project(b);
    let v = [pb.x - pa.x, pb.y - pa.y];
    norm(&project_onto(&v, &direction(angle)))
}

/// Indices of points kept after removing everything at least `depth` behind
/// `reference` as seen from a viewpoint at `angle`.
///
/// A point is behind when `reference − p` points along `dir(angle)`; it is
/// removed when that offset's projection is at least `depth` long.
pub fn cull_behind(
    points: &[Point3D],
    reference: &Point3D,
    plane: Plane,
    angle: f64,
    depth: f64,
) -> Vec<usize> {
    let dir = direction(angle);
    let r = plane.project(reference);
    let kept: Vec<usize> = points
        .iter()
        .enumerate()
        .filter(|(_, p)| {
            let w = plane.project(p);
            let v = [r.x - w.x, r.y - w.y];
            let behind = dot(&v, &dir) > 0.0;
            !(behind && norm(&project_onto(&v, &dir)) >= depth)
        })
        .map(|(i, _)| i)
        .collect();
    debug!(
        "measure: cull_behind kept {} of {} (depth {})",
        kept.len(),
        points.len(),
        depth
    );
    kept
}

/// In-plane distance from a fitted circle's centre to `point`.
pub fn center_offset(circle: &WorldCircle, point: &WorldPoint) -> f64 {
    circle.center.distance(point)
}
