//! Angle and planar vector utilities shared by the classifier, reducer and
//! auxiliary measurements. All inputs are in-plane world coordinates unless
//! stated otherwise.

use std::f64::consts::{FRAC_PI_2, PI};

/// Unit vector pointing at `angle` radians from the first plane axis.
#[inline]
pub fn direction(angle: f64) -> [f64; 2] {
    [angle.cos(), angle.sin()]
}

#[inline]
pub fn dot(a: &[f64; 2], b: &[f64; 2]) -> f64 {
    a[0] * b[0] + a[1] * b[1]
}

#[inline]
pub fn norm(v: &[f64; 2]) -> f64 {
    (v[0] * v[0] + v[1] * v[1]).sqrt()
}

/// Signed length of `v` along `dir`. `dir` need not be normalized.
#[inline]
pub fn scalar_projection(v: &[f64; 2], dir: &[f64; 2]) -> f64 {
    let n = norm(dir);
    if n <= f64::EPSILON {
        return 0.0;
    }
    dot(v, dir) / n
}

/// Vector projection of `v` onto `dir`. Returns the zero vector for a
/// zero-length `dir`.
#[inline]
pub fn project_onto(v: &[f64; 2], dir: &[f64; 2]) -> [f64; 2] {
    let nn = dot(dir, dir);
    if nn <= f64::EPSILON * f64::EPSILON {
        return [0.0, 0.0];
    }
    let s = dot(v, dir) / nn;
    [dir[0] * s, dir[1] * s]
}

/// Signed offset of `p` from the line through `c` running along `angle`,
/// measured along the line normal `angle + π/2`:
/// `cos(θ+π/2)(x−cx) + sin(θ+π/2)(y−cy)`.
#[inline]
pub fn signed_line_offset(p: &[f64; 2], c: &[f64; 2], angle: f64) -> f64 {
    let n = direction(angle + FRAC_PI_2);
    n[0] * (p[0] - c[0]) + n[1] * (p[1] - c[1])
}

/// Normalizes an angle into (−π, π].
#[inline]
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = (angle + PI).rem_euclid(2.0 * PI) - PI;
    if wrapped <= -PI {
        wrapped + 2.0 * PI
    } else {
        wrapped
    }
}

/// Rotates `p` about the origin by `angle` radians (counter-clockwise).
#[inline]
pub fn rotate(p: &[f64; 2], angle: f64) -> [f64; 2] {
    let (s, c) = angle.sin_cos();
    [c * p[0] - s * p[1], s * p[0] + c * p[1]]
}
