//! Distance reduction: nearest obstacle per sector, measured along the
//! sector axis.
use crate::angle::{direction, normalize_angle, scalar_projection};
use crate::sectors::{Sector, SectorSets};
use crate::types::{WorldCircle, WorldPoint, MM_PER_M};
use serde::Serialize;

/// Point of `points` whose offset from `center`, projected onto the axis at
/// `axis_angle`, is shortest; with that projected length.
pub fn nearest_along_axis(
    points: &[WorldPoint],
    center: &WorldPoint,
    axis_angle: f64,
) -> Option<(WorldPoint, f64)> {
    let dir = direction(axis_angle);
    points
        .iter()
        .map(|p| {
            let v = [p.x - center.x, p.y - center.y];
            (*p, scalar_projection(&v, &dir).abs())
        })
        .reduce(|best, cur| if cur.1 < best.1 { cur } else { best })
}

/// Minimum projected distance from `center` along `axis_angle`; `None` for an
/// empty set.
pub fn min_projected_distance(
    points: &[WorldPoint],
    center: &WorldPoint,
    axis_angle: f64,
) -> Option<f64> {
    nearest_along_axis(points, center, axis_angle).map(|(_, d)| d)
}

/// Nearest obstacle in one sector.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectorReading {
    pub sector: Sector,
    /// Direction of the sector axis in degrees, in (−180, 180].
    pub axis_deg: f64,
    /// Projected distance from the circle centre, metres.
    pub center_distance: f64,
    /// Projected distance from the circle boundary (`center_distance − r`),
    /// metres.
    pub clearance: f64,
    /// Points classified into the sector.
    pub point_count: usize,
    /// The obstacle point that realizes the minimum.
    pub nearest: WorldPoint,
}

impl SectorReading {
    pub fn center_distance_mm(&self) -> f64 {
        self.center_distance * MM_PER_M
    }

    pub fn clearance_mm(&self) -> f64 {
        self.clearance * MM_PER_M
    }
}

/// Per-sector readings. `None` means the sector had no qualifying point.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearanceResult {
    pub front: Option<SectorReading>,
    pub behind: Option<SectorReading>,
    pub left: Option<SectorReading>,
    pub right: Option<SectorReading>,
}

impl ClearanceResult {
    pub fn get(&self, sector: Sector) -> Option<&SectorReading> {
        match sector {
            Sector::Front => self.front.as_ref(),
            Sector::Behind => self.behind.as_ref(),
            Sector::Left => self.left.as_ref(),
            Sector::Right => self.right.as_ref(),
        }
    }

    fn slot(&mut self, sector: Sector) -> &mut Option<SectorReading> {
        match sector {
            Sector::Front => &mut self.front,
            Sector::Behind => &mut self.behind,
            Sector::Left => &mut self.left,
            Sector::Right => &mut self.right,
        }
    }

    /// Readings in `Sector::ALL` order, skipping empty sectors.
    pub fn readings(&self) -> impl Iterator<Item = &SectorReading> + '_ {
        Sector::ALL.into_iter().filter_map(move |s| self.get(s))
    }

    /// Sectors without any qualifying point.
    pub fn missing(&self) -> Vec<Sector> {
        Sector::ALL
            .into_iter()
            .filter(|s| self.get(*s).is_none())
            .collect()
    }
}

/// Reduces classified sector sets to one reading per sector.
pub fn reduce(sets: &SectorSets, circle: &WorldCircle, approach: f64) -> ClearanceResult {
    let mut result = ClearanceResult::default();
    for sector in Sector::ALL {
        let pts = sets.get(sector);
        let axis = sector.axis_angle(approach);
        let reading = nearest_along_axis(pts, &circle.center, axis).map(
            |(nearest, d)| SectorReading {
                sector,
                axis_deg: normalize_angle(axis).to_degrees(),
                center_distance: d,
                clearance: d - circle.radius,
                point_count: pts.len(),
                nearest,
            },
        );
        *result.slot(sector) = reading;
    }
    result
}
