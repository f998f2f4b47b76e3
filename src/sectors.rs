//! Sector classification of obstacle points around a fitted circle.
//!
//! A sector is a half-band: the strip of width `2r` centred on the ray that
//! leaves the circle centre along the sector's axis angle. A point belongs to
//! a sector when it lies inside the strip, ahead of the centre along the
//! axis, and farther than `r + margin` from the centre.
//!
//! Axis angles relative to the approach angle `θ`:
//!
//! | Sector | Axis |
//! |---|---|
//! | Front | `θ` |
//! | Left | `θ − π/2` |
//! | Behind | `θ + π` |
//! | Right | `θ + π/2` |
//!
//! Strips of neighbouring sectors overlap in the square corners around the
//! circle. A point there can satisfy two sectors when `margin < r(√2 − 1)`;
//! it is reported in both.
use crate::angle::{direction, dot, signed_line_offset};
use crate::types::{WorldCircle, WorldPoint};
use log::debug;
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, PI};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Sector {
    Front,
    Behind,
    Left,
    Right,
}

impl Sector {
    pub const ALL: [Sector; 4] = [Sector::Front, Sector::Behind, Sector::Left, Sector::Right];

    /// Axis angle of the sector for the given approach angle (radians).
    #[inline]
    pub fn axis_angle(self, approach: f64) -> f64 {
        match self {
            Sector::Front => approach,
            Sector::Behind => approach + PI,
            Sector::Left => approach - FRAC_PI_2,
            Sector::Right => approach + FRAC_PI_2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Sector::Front => "FRONT",
            Sector::Behind => "BEHIND",
            Sector::Left => "LEFT",
            Sector::Right => "RIGHT",
        }
    }
}

impl std::fmt::Display for Sector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// How sector membership is decided.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectorStrategy {
    /// Bands rotate with the approach angle; band edges are inclusive.
    #[default]
    RotatedBand,
    /// Fixed quadrants: Front = +second axis, Behind = −second axis,
    /// Left = +first axis, Right = −first axis. Band edges are exclusive and
    /// the approach angle is ignored.
    AxisAligned,
}

impl SectorStrategy {
    /// Approach angle the strategy actually uses.
    #[inline]
    pub fn effective_approach(self, approach: f64) -> f64 {
        match self {
            SectorStrategy::RotatedBand => approach,
            SectorStrategy::AxisAligned => FRAC_PI_2,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectorParams {
    pub strategy: SectorStrategy,
    /// Extra exclusion distance beyond the radius, in metres.
    pub radius_margin: f64,
}

impl Default for SectorParams {
    fn default() -> Self {
        Self {
            strategy: SectorStrategy::RotatedBand,
            radius_margin: 0.008,
        }
    }
}

/// Rotated-band membership test for one sector axis.
pub fn in_sector(point: &WorldPoint, circle: &WorldCircle, axis_angle: f64, margin: f64) -> bool {
    let p = point.to_array();
    let c = circle.center.to_array();
    let r = circle.radius;
    let off = signed_line_offset(&p, &c, axis_angle);
    if !(off - r <= 0.0 && off + r >= 0.0) {
        return false;
    }
    let v = [p[0] - c[0], p[1] - c[1]];
    if dot(&v, &direction(axis_angle)) <= 0.0 {
        return false;
    }
    point.distance(&circle.center) > r + margin
}

/// Fixed-quadrant membership test.
pub fn in_axis_sector(point: &WorldPoint, circle: &WorldCircle, sector: Sector, margin: f64) -> bool {
    let dx = point.x - circle.center.x;
    let dy = point.y - circle.center.y;
    let r = circle.radius;
    let in_band = match sector {
        Sector::Front => dx.abs() < r && dy > 0.0,
        Sector::Behind => dx.abs() < r && dy < 0.0,
        Sector::Left => dy.abs() < r && dx > 0.0,
        Sector::Right => dy.abs() < r && dx < 0.0,
    };
    in_band && point.distance(&circle.center) > r + margin
}

/// Points per sector. Order inside each set follows the input order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SectorSets {
    pub front: Vec<WorldPoint>,
    pub behind: Vec<WorldPoint>,
    pub left: Vec<WorldPoint>,
    pub right: Vec<WorldPoint>,
}

impl SectorSets {
    pub fn get(&self, sector: Sector) -> &[WorldPoint] {
        match sector {
            Sector::Front => &self.front,
            Sector::Behind => &self.behind,
            Sector::Left => &self.left,
            Sector::Right => &self.right,
        }
    }

    fn get_mut(&mut self, sector: Sector) -> &mut Vec<WorldPoint> {
        match sector {
            Sector::Front => &mut self.front,
            Sector::Behind => &mut self.behind,
            Sector::Left => &mut self.left,
            Sector::Right => &mut self.right,
        }
    }

    pub fn total(&self) -> usize {
        Sector::ALL.iter().map(|s| self.get(*s).len()).sum()
    }
}

/// Partitions `points` into the four sectors around `circle`.
pub fn classify(
    points: &[WorldPoint],
    circle: &WorldCircle,
    approach: f64,
    params: &SectorParams,
) -> SectorSets {
    let mut sets = SectorSets::default();
    for p in points {
        for sector in Sector::ALL {
            let hit = match params.strategy {
                SectorStrategy::RotatedBand => {
                    in_sector(p, circle, sector.axis_angle(approach), params.radius_margin)
                }
                SectorStrategy::AxisAligned => in_axis_sector(p, circle, sector, params.radius_margin),
            };
            if hit {
                sets.get_mut(sector).push(*p);
            }
        }
    }
    debug!(
        "sectors: {:?} approach={:.3} rad: front={} behind={} left={} right={} of {}",
        params.strategy,
        approach,
        sets.front.len(),
        sets.behind.len(),
        sets.left.len(),
        sets.right.len(),
        points.len()
    );
    sets
}
