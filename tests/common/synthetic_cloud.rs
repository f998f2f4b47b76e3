use plant_clearance::types::{Point3D, WorldPoint};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use std::f64::consts::TAU;

/// `n` points evenly spaced on a horizontal circle at height `z`, starting
/// at angle `phase`.
pub fn ring(cx: f64, cy: f64, z: f64, radius: f64, n: usize, phase: f64) -> Vec<Point3D> {
    assert!(n > 0, "ring needs at least one point");
    (0..n)
        .map(|i| {
            let t = phase + i as f64 / n as f64 * TAU;
            Point3D::new(cx + radius * t.cos(), cy + radius * t.sin(), z)
        })
        .collect()
}

/// In-plane version of [`ring`].
pub fn ring_2d(cx: f64, cy: f64, radius: f64, n: usize) -> Vec<WorldPoint> {
    ring(cx, cy, 0.0, radius, n, 0.0)
        .into_iter()
        .map(|p| WorldPoint::new(p.x, p.y))
        .collect()
}

/// Stack of rings between `z0` and `z1` (inclusive), a crude fruit surface.
pub fn cylinder(cx: f64, cy: f64, radius: f64, z0: f64, z1: f64, layers: usize, n: usize) -> Vec<Point3D> {
    assert!(layers >= 2, "cylinder needs at least two layers");
    (0..layers)
        .flat_map(|k| {
            let z = z0 + (z1 - z0) * k as f64 / (layers - 1) as f64;
            ring(cx, cy, z, radius, n, 0.0)
        })
        .collect()
}

/// Copies `points` with isotropic Gaussian noise of standard deviation
/// `sigma` (metres), repeatable for a given `seed`.
pub fn with_gaussian_noise(points: &[WorldPoint], sigma: f64, seed: u64) -> Vec<WorldPoint> {
    let mut rng = StdRng::seed_from_u64(seed);
    let normal = Normal::new(0.0, sigma).expect("noise sigma must be finite and >= 0");
    points
        .iter()
        .map(|p| WorldPoint::new(p.x + normal.sample(&mut rng), p.y + normal.sample(&mut rng)))
        .collect()
}
