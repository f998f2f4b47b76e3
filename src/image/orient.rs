//! Display orientation for rasters: an optional horizontal flip followed by a
//! rotation in quarter turns.
//!
//! Orientation is cosmetic. Every forward pixel mapping has an exact inverse,
//! so anything detected on an oriented raster can be carried back to the
//! projector's native pixel frame before conversion to world units.

use super::raster::RasterU8;
use crate::types::PixelPoint;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rotation {
    #[default]
    None,
    /// 90° clockwise.
    Cw90,
    /// 90° counter-clockwise.
    Ccw90,
    /// 180°.
    Half,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Orientation {
    /// Mirror columns (`x → w−1−x`) before rotating.
    pub flip_horizontal: bool,
    pub rotation: Rotation,
}

impl Orientation {
    pub const IDENTITY: Orientation = Orientation {
        flip_horizontal: false,
        rotation: Rotation::None,
    };

    pub fn new(flip_horizontal: bool, rotation: Rotation) -> Self {
        Self {
            flip_horizontal,
            rotation,
        }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Output dimensions for a `w × h` source.
    pub fn output_size(&self, w: usize, h: usize) -> (usize, usize) {
        match self.rotation {
            Rotation::Cw90 | Rotation::Ccw90 => (h, w),
            Rotation::None | Rotation::Half => (w, h),
        }
    }

    /// Maps a pixel of a `w × h` source raster into the oriented raster.
    pub fn map_point(&self, p: PixelPoint, w: usize, h: usize) -> PixelPoint {
        let wm = w as f64 - 1.0;
        let hm = h as f64 - 1.0;
        let (x, y) = if self.flip_horizontal {
            (wm - p.x, p.y)
        } else {
            (p.x, p.y)
        };
        let (x, y) = match self.rotation {
            Rotation::None => (x, y),
            Rotation::Ccw90 => (y, wm - x),
            Rotation::Cw90 => (hm - y, x),
            Rotation::Half => (wm - x, hm - y),
        };
        PixelPoint::new(x, y)
    }

    /// Inverse of [`map_point`](Self::map_point); `w × h` is the size of the
    /// source (pre-orientation) raster.
    pub fn unmap_point(&self, p: PixelPoint, w: usize, h: usize) -> PixelPoint {
        let wm = w as f64 - 1.0;
        let hm = h as f64 - 1.0;
        let (x, y) = match self.rotation {
            Rotation::None => (p.x, p.y),
            Rotation::Ccw90 => (wm - p.y, p.x),
            Rotation::Cw90 => (p.y, hm - p.x),
            Rotation::Half => (wm - p.x, hm - p.y),
        };
        if self.flip_horizontal {
            PixelPoint::new(wm - x, y)
        } else {
            PixelPoint::new(x, y)
        }
    }

    /// Returns a re-oriented copy of `src`.
    pub fn apply(&self, src: &RasterU8) -> RasterU8 {
        if self.is_identity() {
            return src.clone();
        }
        let (ow, oh) = self.output_size(src.w, src.h);
        let mut out = RasterU8::new(ow, oh);
        for y in 0..src.h {
            for x in 0..src.w {
                let q = self.map_point(PixelPoint::new(x as f64, y as f64), src.w, src.h);
                out.set(q.x as usize, q.y as usize, src.get(x, y));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Rotation; 4] = [
        Rotation::None,
        Rotation::Cw90,
        Rotation::Ccw90,
        Rotation::Half,
    ];

    #[test]
    fn map_then_unmap_is_identity() {
        let (w, h) = (7usize, 4usize);
        for flip in [false, true] {
            for rot in ALL {
                let o = Orientation::new(flip, rot);
                let p = PixelPoint::new(2.25, 3.0);
                let q = o.unmap_point(o.map_point(p, w, h), w, h);
                assert!((q.x - p.x).abs() < 1e-12 && (q.y - p.y).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn flip_then_ccw_is_a_transpose() {
        let o = Orientation::new(true, Rotation::Ccw90);
        let q = o.map_point(PixelPoint::new(3.0, 8.0), 10, 10);
        assert_eq!(q, PixelPoint::new(8.0, 3.0));
    }

    #[test]
    fn apply_moves_pixels_like_map_point() {
        let mut src = RasterU8::new(5, 3);
        src.set(4, 0, 255);
        let o = Orientation::new(false, Rotation::Ccw90);
        let out = o.apply(&src);
        assert_eq!((out.w, out.h), (3, 5));
        // Top-right corner goes to top-left under a counter-clockwise turn.
        assert_eq!(out.get(0, 0), 255);
        assert_eq!(out.count_nonzero(), 1);
    }
}
