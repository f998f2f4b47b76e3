//! Planar projector: selects the neighbourhood of a reference point, maps it
//! onto a square raster and keeps the affine frame needed to carry raster
//! detections back to world coordinates.
//!
//! The frame is centred on the reference point and spans
//! `±radius_threshold` metres across `image_size` pixels:
//!
//! ```text
//! pixel = (world − ref) / radius_threshold · size/2 + size/2
//! world = (2·pixel − size) · radius_threshold / size + ref
//! ```
//!
//! Column `x` follows the first plane axis and row `y` the second. A point
//! is drawn into cell `trunc(pixel)`, which covers `[i, i+1)`; detections on
//! the raster are cell indices, so the inverse map adds half a pixel before
//! leaving the frame. Any [`Orientation`] is applied after rasterization and
//! undone before the inverse map.
use crate::error::{ClearanceError, Result, Stage};
use crate::image::draw::fill_disk;
use crate::image::{Orientation, RasterU8};
use crate::types::{PixelCircle, PixelPoint, Plane, Point3D, WorldCircle, WorldPoint};
use log::debug;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionParams {
    pub plane: Plane,
    /// Half-thickness of the height slice in metres (strict).
    pub height_tolerance: f64,
    /// In-plane neighbourhood radius in metres (strict). Also the half-width
    /// of the raster frame.
    pub radius_threshold: f64,
    /// Raster side length in pixels.
    pub image_size: usize,
    /// Radius of the disk drawn for every point, in pixels.
    pub point_radius: u32,
    /// Raster orientation handed to the estimator. The historical obstacle
    /// tool used a horizontal flip followed by a counter-clockwise quarter
    /// turn (`Orientation::new(true, Rotation::Ccw90)`), i.e. a transpose.
    pub orientation: Orientation,
}

impl Default for ProjectionParams {
    fn default() -> Self {
        Self {
            plane: Plane::XY,
            height_tolerance: 0.01,
            radius_threshold: 0.05,
            image_size: 100,
            point_radius: 2,
            orientation: Orientation::IDENTITY,
        }
    }
}

impl ProjectionParams {
    pub fn validate(&self) -> Result<()> {
        if !(self.height_tolerance.is_finite() && self.height_tolerance > 0.0) {
            return Err(ClearanceError::invalid(
                "height_tolerance",
                format!("must be finite and > 0, got {}", self.height_tolerance),
            ));
        }
        if !(self.radius_threshold.is_finite() && self.radius_threshold > 0.0) {
            return Err(ClearanceError::invalid(
                "radius_threshold",
                format!("must be finite and > 0, got {}", self.radius_threshold),
            ));
        }
        if self.image_size == 0 {
            return Err(ClearanceError::invalid("image_size", "must be > 0"));
        }
        Ok(())
    }

    pub fn frame(&self, reference: WorldPoint) -> RasterFrame {
        RasterFrame {
            reference,
            radius_threshold: self.radius_threshold,
            size: self.image_size,
        }
    }
}

/// Affine world ↔ native-pixel map around a reference point.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RasterFrame {
    pub reference: WorldPoint,
    pub radius_threshold: f64,
    pub size: usize,
}

impl RasterFrame {
    /// Pixels per metre.
    #[inline]
    pub fn scale(&self) -> f64 {
        self.size as f64 * 0.5 / self.radius_threshold
    }

    /// Continuous pixel coordinates of `w`.
    #[inline]
    pub fn to_pixel(&self, w: WorldPoint) -> PixelPoint {
        let half = self.size as f64 * 0.5;
        PixelPoint::new(
            (w.x - self.reference.x) * self.scale() + half,
            (w.y - self.reference.y) * self.scale() + half,
        )
    }

    /// Integer pixel a point is rasterized into (truncation toward zero).
    #[inline]
    pub fn to_cell(&self, w: WorldPoint) -> (i64, i64) {
        let p = self.to_pixel(w);
        (p.x.trunc() as i64, p.y.trunc() as i64)
    }

    /// Cell-index coordinates of `w`: the centre of cell `i` sits at `i`.
    #[inline]
    pub fn to_index(&self, w: WorldPoint) -> PixelPoint {
        let p = self.to_pixel(w);
        PixelPoint::new(p.x - 0.5, p.y - 0.5)
    }

    #[inline]
    pub fn to_world(&self, p: PixelPoint) -> WorldPoint {
        let size = self.size as f64;
        WorldPoint::new(
            (2.0 * p.x - size) * self.radius_threshold / size + self.reference.x,
            (2.0 * p.y - size) * self.radius_threshold / size + self.reference.y,
        )
    }

    #[inline]
    pub fn radius_to_world(&self, r: f64) -> f64 {
        r * 2.0 * self.radius_threshold / self.size as f64
    }

    #[inline]
    pub fn radius_to_pixels(&self, r: f64) -> f64 {
        r * self.scale()
    }

    /// Inverse of [`to_index`](Self::to_index).
    #[inline]
    pub fn index_to_world(&self, p: PixelPoint) -> WorldPoint {
        self.to_world(PixelPoint::new(p.x + 0.5, p.y + 0.5))
    }

    /// Native-frame circle in cell indices → world circle.
    pub fn circle_to_world(&self, c: &PixelCircle) -> Result<WorldCircle> {
        WorldCircle::new(
            self.index_to_world(c.center),
            self.radius_to_world(c.radius),
        )
    }
}

/// Output of [`project`].
#[derive(Clone, Debug)]
pub struct Projection {
    /// Oriented raster handed to the circle estimator.
    pub raster: RasterU8,
    /// In-plane coordinates of the selected points.
    pub points: Vec<WorldPoint>,
    pub frame: RasterFrame,
    pub orientation: Orientation,
}

impl Projection {
    /// Maps a circle detected on the oriented raster back to world units.
    pub fn circle_to_world(&self, c: &PixelCircle) -> Result<WorldCircle> {
        let native = PixelCircle {
            center: self
                .orientation
                .unmap_point(c.center, self.frame.size, self.frame.size),
            ..*c
        };
        self.frame.circle_to_world(&native)
    }

    /// Maps a world point into the cell indices of the oriented raster.
    pub fn world_to_raster(&self, w: WorldPoint) -> PixelPoint {
        self.orientation
            .map_point(self.frame.to_index(w), self.frame.size, self.frame.size)
    }
}

/// Points inside the height slice and in-plane radius of `reference`, as
/// in-plane coordinates.
pub fn select_points(
    points: &[Point3D],
    reference: &Point3D,
    params: &ProjectionParams,
) -> Result<Vec<WorldPoint>> {
    params.validate()?;
    let plane = params.plane;
    let ref_h = plane.height(reference);
    let ref_w = plane.project(reference);
    let selected: Vec<WorldPoint> = points
        .iter()
        .filter(|p| (plane.height(p) - ref_h).abs() < params.height_tolerance)
        .map(|p| plane.project(p))
        .filter(|w| w.distance(&ref_w) < params.radius_threshold)
        .collect();
    debug!(
        "projector: {} of {} points inside slice ±{} m, radius {} m",
        selected.len(),
        points.len(),
        params.height_tolerance,
        params.radius_threshold
    );
    if selected.is_empty() {
        return Err(ClearanceError::empty(Stage::Projection));
    }
    Ok(selected)
}

/// Draws `points` into a black raster as filled disks of value 255.
pub fn rasterize(points: &[WorldPoint], frame: &RasterFrame, point_radius: u32) -> RasterU8 {
    let mut raster = RasterU8::square(frame.size);
    for &p in points {
        let (x, y) = frame.to_cell(p);
        fill_disk(&mut raster, x, y, point_radius, 255);
    }
    raster
}

/// Selects, rasterizes and orients the neighbourhood of `reference`.
pub fn project(
    points: &[Point3D],
    reference: &Point3D,
    params: &ProjectionParams,
) -> Result<Projection> {
    let selected = select_points(points, reference, params)?;
    let frame = params.frame(params.plane.project(reference));
    let native = rasterize(&selected, &frame, params.point_radius);
    let raster = params.orientation.apply(&native);
    debug!(
        "projector: raster {}x{} with {} lit pixels",
        raster.w,
        raster.h,
        raster.count_nonzero()
    );
    Ok(Projection {
        raster,
        points: selected,
        frame,
        orientation: params.orientation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::Rotation;

    fn params() -> ProjectionParams {
        ProjectionParams::default()
    }

    #[test]
    fn frame_maps_reference_to_image_centre() {
        let frame = params().frame(WorldPoint::new(1.0, 2.0));
        let p = frame.to_pixel(WorldPoint::new(1.0, 2.0));
        assert_eq!(p, PixelPoint::new(50.0, 50.0));
        let edge = frame.to_pixel(WorldPoint::new(1.05, 1.95));
        assert!((edge.x - 100.0).abs() < 1e-9);
        assert!(edge.y.abs() < 1e-9);
    }

    #[test]
    fn frame_inverse_round_trips() {
        let frame = params().frame(WorldPoint::new(-0.3, 0.7));
        let w = WorldPoint::new(-0.28, 0.69);
        let back = frame.to_world(frame.to_pixel(w));
        assert!(back.distance(&w) < 1e-12);
        assert!((frame.radius_to_world(20.0) - 0.02).abs() < 1e-12);
        assert!((frame.radius_to_pixels(0.02) - 20.0).abs() < 1e-9);
    }

    #[test]
    fn cell_indices_sit_half_a_pixel_inside() {
        let frame = params().frame(WorldPoint::new(0.0, 0.0));
        // 0.0207 m lands at pixel 70.7, i.e. cell 70
        let w = WorldPoint::new(0.0207, -0.0107);
        assert_eq!(frame.to_cell(w), (70, 39));
        let idx = frame.to_index(w);
        assert!((idx.x - 70.2).abs() < 1e-9 && (idx.y - 38.8).abs() < 1e-9);
        assert!(frame.index_to_world(idx).distance(&w) < 1e-12);
        // the centre of cell 70 is 70.5 px, i.e. 0.0205 m
        let centre = frame.index_to_world(PixelPoint::new(70.0, 39.0));
        assert!((centre.x - 0.0205).abs() < 1e-12, "{centre:?}");
        assert!((centre.y + 0.0105).abs() < 1e-12, "{centre:?}");
    }

    #[test]
    fn filters_are_strict() {
        let reference = Point3D::new(0.0, 0.0, 0.0);
        let cloud = vec![
            Point3D::new(0.01, 0.0, 0.0),
            // exactly on the height tolerance: rejected
            Point3D::new(0.01, 0.0, 0.01),
            // exactly on the radius threshold: rejected
            Point3D::new(0.05, 0.0, 0.0),
            Point3D::new(0.0, 0.049, 0.009),
        ];
        let sel = select_points(&cloud, &reference, &params()).unwrap();
        assert_eq!(sel.len(), 2);
    }

    #[test]
    fn empty_selection_is_an_error() {
        let reference = Point3D::new(0.0, 0.0, 0.0);
        let cloud = vec![Point3D::new(1.0, 1.0, 1.0)];
        assert_eq!(
            project(&cloud, &reference, &params()).unwrap_err(),
            ClearanceError::EmptyInput {
                stage: Stage::Projection
            }
        );
        assert!(project(&[], &reference, &params()).is_err());
    }

    #[test]
    fn invalid_params_are_rejected() {
        let reference = Point3D::new(0.0, 0.0, 0.0);
        let cloud = vec![reference];
        let mut p = params();
        p.image_size = 0;
        assert!(matches!(
            project(&cloud, &reference, &p),
            Err(ClearanceError::InvalidParameter { name: "image_size", .. })
        ));
    }

    #[test]
    fn points_become_disks() {
        let reference = Point3D::new(0.0, 0.0, 0.0);
        let cloud = vec![Point3D::new(0.0, 0.0, 0.0)];
        let proj = project(&cloud, &reference, &params()).unwrap();
        assert_eq!(proj.raster.count_nonzero(), 13);
        assert_eq!(proj.raster.get(50, 50), 255);
    }

    #[test]
    fn oriented_detection_maps_back_to_world() {
        let reference = Point3D::new(0.0, 0.0, 0.0);
        let mut p = params();
        p.orientation = Orientation::new(true, Rotation::Ccw90);
        let cloud = vec![Point3D::new(0.02, -0.01, 0.0)];
        let proj = project(&cloud, &reference, &p).unwrap();
        let w = WorldPoint::new(0.02, -0.01);
        let pix = proj.world_to_raster(w);
        let circle = PixelCircle::new(pix, 10.0, 0).unwrap();
        let back = proj.circle_to_world(&circle).unwrap();
        assert!(back.center.distance(&w) < 1e-12);
        assert!((back.radius - 0.01).abs() < 1e-12);
    }
}
