//! Algebraic (Kåsa) least-squares circle fit.
//!
//! Minimizes `Σ (x² + y² + D·x + E·y + F)²` via the 3×3 normal equations.
//! Coordinates are shifted to their centroid before accumulating the sums;
//! the solution is shifted back, so the result equals the uncentred fit.
use crate::error::{ClearanceError, DegenerateReason, Result, Stage};
use crate::types::{WorldCircle, WorldPoint};
use log::debug;
use nalgebra::{Matrix3, Vector3};

/// Relative determinant below which the normal matrix counts as singular.
const SINGULAR_RTOL: f64 = 1e-12;

/// Fits a circle to in-plane world points.
pub fn fit_circle(points: &[WorldPoint]) -> Result<WorldCircle> {
    let xy: Vec<[f64; 2]> = points.iter().map(|p| p.to_array()).collect();
    let (c, r) = fit_circle_xy(&xy)?;
    WorldCircle::new(WorldPoint::new(c[0], c[1]), r)
}

/// Fits a circle to raw `[x, y]` pairs; returns `(centre, radius)`.
pub fn fit_circle_xy(points: &[[f64; 2]]) -> Result<([f64; 2], f64)> {
    if points.is_empty() {
        return Err(ClearanceError::empty(Stage::Estimation));
    }
    if points.len() < 3 {
        return Err(ClearanceError::degenerate(DegenerateReason::TooFewPoints));
    }
    if points.iter().any(|p| !(p[0].is_finite() && p[1].is_finite())) {
        return Err(ClearanceError::invalid("points", "non-finite coordinate"));
    }

    let n = points.len() as f64;
    let mx = points.iter().map(|p| p[0]).sum::<f64>() / n;
    let my = points.iter().map(|p| p[1]).sum::<f64>() / n;

    let (mut sx, mut sy, mut sxx, mut syy, mut sxy) = (0.0, 0.0, 0.0, 0.0, 0.0);
    let (mut m1, mut m2, mut m3) = (0.0, 0.0, 0.0);
    for p in points {
        let x = p[0] - mx;
        let y = p[1] - my;
        let rr = x * x + y * y;
        sx += x;
        sy += y;
        sxx += x * x;
        syy += y * y;
        sxy += x * y;
        m1 += x * rr;
        m2 += y * rr;
        m3 += rr;
    }

    let a = Matrix3::new(sxx, sxy, sx, sxy, syy, sy, sx, sy, n);
    let b = Vector3::new(-m1, -m2, -m3);

    let scale = a.norm();
    let det = a.determinant();
    if !(scale > 0.0) || det.abs() <= SINGULAR_RTOL * scale.powi(3) {
        debug!("lsq: singular normal matrix (det={det:e}, |A|={scale:e})");
        return Err(ClearanceError::degenerate(DegenerateReason::SingularSystem));
    }
    let sol = a
        .lu()
        .solve(&b)
        .ok_or(ClearanceError::degenerate(DegenerateReason::SingularSystem))?;

    let (d, e, f) = (sol[0], sol[1], sol[2]);
    let cx = -0.5 * d;
    let cy = -0.5 * e;
    let r2 = cx * cx + cy * cy - f;
    if !(r2.is_finite() && r2 > 0.0) {
        return Err(ClearanceError::degenerate(DegenerateReason::NonRealRadius));
    }
    let r = r2.sqrt();
    debug!(
        "lsq: {} points -> centre ({:.6}, {:.6}) r={:.6}",
        points.len(),
        cx + mx,
        cy + my,
        r
    );
    Ok(([cx + mx, cy + my], r))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring(cx: f64, cy: f64, r: f64, n: usize) -> Vec<WorldPoint> {
        (0..n)
            .map(|i| {
                let t = i as f64 / n as f64 * std::f64::consts::TAU;
                WorldPoint::new(cx + r * t.cos(), cy + r * t.sin())
            })
            .collect()
    }

    #[test]
    fn exact_points_recover_the_circle() {
        let c = fit_circle(&ring(0.31, -0.12, 0.015, 24)).unwrap();
        assert!((c.center.x - 0.31).abs() < 1e-9);
        assert!((c.center.y + 0.12).abs() < 1e-9);
        assert!((c.radius - 0.015).abs() < 1e-9);
    }

    #[test]
    fn three_points_define_a_circle() {
        let (c, r) = fit_circle_xy(&[[1.0, 0.0], [0.0, 1.0], [-1.0, 0.0]]).unwrap();
        assert!(c[0].abs() < 1e-12 && c[1].abs() < 1e-12);
        assert!((r - 1.0).abs() < 1e-12);
    }

    #[test]
    fn arc_only_still_fits() {
        let pts: Vec<[f64; 2]> = (0..10)
            .map(|i| {
                let t = i as f64 * 0.1;
                [2.0 + 5.0 * t.cos(), -1.0 + 5.0 * t.sin()]
            })
            .collect();
        let (c, r) = fit_circle_xy(&pts).unwrap();
        assert!((c[0] - 2.0).abs() < 1e-6);
        assert!((c[1] + 1.0).abs() < 1e-6);
        assert!((r - 5.0).abs() < 1e-6);
    }

    #[test]
    fn degenerate_inputs() {
        assert_eq!(
            fit_circle(&[]).unwrap_err(),
            ClearanceError::EmptyInput {
                stage: Stage::Estimation
            }
        );
        assert_eq!(
            fit_circle_xy(&[[0.0, 0.0], [1.0, 1.0]]).unwrap_err(),
            ClearanceError::DegenerateFit {
                reason: DegenerateReason::TooFewPoints
            }
        );
        assert_eq!(
            fit_circle_xy(&[[0.0, 0.0], [1.0, 1.0], [2.0, 2.0], [3.0, 3.0]]).unwrap_err(),
            ClearanceError::DegenerateFit {
                reason: DegenerateReason::SingularSystem
            }
        );
        assert_eq!(
            fit_circle_xy(&[[1.0, 1.0]; 5]).unwrap_err(),
            ClearanceError::DegenerateFit {
                reason: DegenerateReason::SingularSystem
            }
        );
    }
}
