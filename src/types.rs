//! Core value types. World-plane and raster-pixel coordinates are distinct
//! types; conversions happen only through [`crate::projector::RasterFrame`].

use crate::error::{ClearanceError, Result};
use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// Input vertex in world metres.
pub type Point3D = Point3<f64>;

/// Metres → millimetres.
pub const MM_PER_M: f64 = 1000.0;

/// Projection plane. The remaining axis is the "height" axis used for slice
/// filtering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Plane {
    /// In-plane (x, y), height along z. Obstacle work.
    #[default]
    XY,
    /// In-plane (x, z), height along y. Cross-section work.
    XZ,
    /// In-plane (y, z), height along x.
    YZ,
}

impl Plane {
    /// In-plane coordinates of `p`.
    #[inline]
    pub fn project(&self, p: &Point3D) -> WorldPoint {
        match self {
            Plane::XY => WorldPoint::new(p.x, p.y),
            Plane::XZ => WorldPoint::new(p.x, p.z),
            Plane::YZ => WorldPoint::new(p.y, p.z),
        }
    }

    /// Coordinate of `p` along the axis orthogonal to the plane.
    #[inline]
    pub fn height(&self, p: &Point3D) -> f64 {
        match self {
            Plane::XY => p.z,
            Plane::XZ => p.y,
            Plane::YZ => p.x,
        }
    }
}

/// Point in world-plane metres.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldPoint {
    pub x: f64,
    pub y: f64,
}

impl WorldPoint {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn to_array(self) -> [f64; 2] {
        [self.x, self.y]
    }

    #[inline]
    pub fn distance(&self, other: &WorldPoint) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Point in raster pixels (`x` = column, `y` = row).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Circle in world-plane metres.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldCircle {
    pub center: WorldPoint,
    pub radius: f64,
}

impl WorldCircle {
    /// Validating constructor: radius must be positive and everything finite.
    pub fn new(center: WorldPoint, radius: f64) -> Result<Self> {
        if !center.is_finite() || !radius.is_finite() || radius <= 0.0 {
            return Err(ClearanceError::InvalidCircle {
                x: center.x,
                y: center.y,
                radius,
            });
        }
        Ok(Self { center, radius })
    }

    /// `[x, y, r]` in millimetres.
    pub fn to_millimeters(&self) -> [f64; 3] {
        [
            self.center.x * MM_PER_M,
            self.center.y * MM_PER_M,
            self.radius * MM_PER_M,
        ]
    }
}

/// Circle in raster pixels with its accumulator support.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PixelCircle {
    pub center: PixelPoint,
    pub radius: f64,
    /// Accumulator votes at the centre cell (0 for circles not produced by
    /// a Hough transform).
    pub votes: u32,
}

impl PixelCircle {
    pub fn new(center: PixelPoint, radius: f64, votes: u32) -> Result<Self> {
        if !center.x.is_finite() || !center.y.is_finite() || !radius.is_finite() || radius <= 0.0
        {
            return Err(ClearanceError::InvalidCircle {
                x: center.x,
                y: center.y,
                radius,
            });
        }
        Ok(Self {
            center,
            radius,
            votes,
        })
    }

    /// Rounds centre and radius to whole pixels.
    pub fn quantized(&self) -> Self {
        Self {
            center: PixelPoint::new(self.center.x.round(), self.center.y.round()),
            radius: self.radius.round().max(1.0),
            votes: self.votes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plane_splits_coordinates() {
        let p = Point3D::new(1.0, 2.0, 3.0);
        assert_eq!(Plane::XY.project(&p), WorldPoint::new(1.0, 2.0));
        assert_eq!(Plane::XY.height(&p), 3.0);
        assert_eq!(Plane::XZ.project(&p), WorldPoint::new(1.0, 3.0));
        assert_eq!(Plane::XZ.height(&p), 2.0);
        assert_eq!(Plane::YZ.project(&p), WorldPoint::new(2.0, 3.0));
        assert_eq!(Plane::YZ.height(&p), 1.0);
    }

    #[test]
    fn circle_constructor_rejects_bad_radius() {
        let c = WorldPoint::new(0.0, 0.0);
        assert!(WorldCircle::new(c, 0.0).is_err());
        assert!(WorldCircle::new(c, -1.0).is_err());
        assert!(WorldCircle::new(c, f64::NAN).is_err());
        assert!(WorldCircle::new(WorldPoint::new(f64::INFINITY, 0.0), 1.0).is_err());
        assert!(WorldCircle::new(c, 0.02).is_ok());
    }

    #[test]
    fn millimeter_view_scales_all_fields() {
        let c = WorldCircle::new(WorldPoint::new(0.001, -0.002), 0.015).unwrap();
        let mm = c.to_millimeters();
        assert!((mm[0] - 1.0).abs() < 1e-12);
        assert!((mm[1] + 2.0).abs() < 1e-12);
        assert!((mm[2] - 15.0).abs() < 1e-12);
    }
}
