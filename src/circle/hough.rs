//! Gradient Hough transform for circles.
//!
//! Overview
//! - Edges: the input is re-run through Canny with `(param1/2, param1)`;
//!   Sobel gradients of the input give each edge pixel a direction.
//! - Centre votes: every edge pixel votes along both senses of its unit
//!   gradient for radii `min_radius..=max_radius`, into an accumulator of
//!   resolution `1/dp`.
//! - Centres: accumulator cells with more than `param2` votes that are local
//!   maxima over their 4-neighbourhood, visited by votes (descending).
//!   A centre closer than `min_dist` to an accepted one is skipped.
//! - Radius: edge distances to the centre are swept in bins of width `dp`;
//!   the bin with the largest `count / radius` wins if `count > param2`.
//!
//! The first stage of [`estimate_hough`] (blur, adaptive Canny) prepares the
//! binary edge map this transform consumes. The transform itself only
//! resolves centres to accumulator cells; [`refine_circle`] then fits the
//! selected circle to the edge pixels around it for sub-pixel accuracy.
use super::lsq::fit_circle_xy;
use super::EdgeParams;
use crate::edges::{adaptive_thresholds, canny, sobel_gradients, Grad};
use crate::error::{ClearanceError, Result};
use crate::filters::gaussian_blur;
use crate::image::{ImageView, RasterU8};
use crate::types::{PixelCircle, PixelPoint};
use log::debug;
use serde::{Deserialize, Serialize};

/// Which circle to keep when the transform returns several.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CircleSelection {
    /// First emitted, i.e. the best-supported accepted centre.
    #[default]
    First,
    /// Last emitted; reproduces the historical loop-variable behaviour.
    Last,
    /// Highest accumulator vote count (ties keep the earlier circle).
    MostVotes,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoughParams {
    /// Inverse accumulator resolution (1 = image resolution).
    pub dp: f64,
    /// Minimum distance between accepted centres, in image pixels.
    pub min_dist: f64,
    /// High Canny threshold of the internal edge pass (low is half).
    pub param1: f64,
    /// Vote threshold for centres and radius support.
    pub param2: f64,
    pub min_radius: i32,
    /// `<= 0` means "image size".
    pub max_radius: i32,
    pub selection: CircleSelection,
    /// Half-width in pixels of the band around the detected radius whose
    /// edge pixels refine the circle; `<= 0` keeps the raw transform output.
    pub refine_window: f64,
    /// Round the winning circle to whole pixels.
    pub quantize: bool,
}

impl Default for HoughParams {
    fn default() -> Self {
        Self {
            dp: 1.2,
            min_dist: 15.0,
            param1: 50.0,
            param2: 30.0,
            min_radius: 10,
            max_radius: 25,
            selection: CircleSelection::First,
            refine_window: 8.0,
            quantize: true,
        }
    }
}

impl HoughParams {
    pub fn validate(&self) -> Result<()> {
        if !(self.dp.is_finite() && self.dp > 0.0) {
            return Err(ClearanceError::invalid(
                "dp",
                format!("must be finite and > 0, got {}", self.dp),
            ));
        }
        if !(self.min_dist.is_finite() && self.min_dist > 0.0) {
            return Err(ClearanceError::invalid(
                "min_dist",
                format!("must be finite and > 0, got {}", self.min_dist),
            ));
        }
        if !(self.param1.is_finite() && self.param1 > 0.0) {
            return Err(ClearanceError::invalid(
                "param1",
                format!("must be finite and > 0, got {}", self.param1),
            ));
        }
        if !(self.param2.is_finite() && self.param2 > 0.0) {
            return Err(ClearanceError::invalid(
                "param2",
                format!("must be finite and > 0, got {}", self.param2),
            ));
        }
        if !self.refine_window.is_finite() {
            return Err(ClearanceError::invalid(
                "refine_window",
                format!("must be finite, got {}", self.refine_window),
            ));
        }
        Ok(())
    }

    /// Edge pixels a refined side needs (at least three).
    fn min_support(&self) -> usize {
        (self.param2.ceil() as usize).max(3)
    }

    /// Effective `(min, max)` radius search range for an image of `w × h`.
    fn radius_range(&self, w: usize, h: usize) -> (f64, f64) {
        let min_r = self.min_radius.max(0);
        let max_r = if self.max_radius <= 0 {
            w.max(h) as i32
        } else if self.max_radius <= min_r {
            min_r + 2
        } else {
            self.max_radius
        };
        (min_r as f64, max_r as f64)
    }
}

/// Circles in emission order plus the number of centre candidates examined.
#[derive(Clone, Debug, Default)]
pub struct HoughOutput {
    pub circles: Vec<PixelCircle>,
    pub candidates: usize,
}

struct EdgePixel {
    x: f64,
    y: f64,
}

/// Runs the gradient Hough transform on `img` (typically a binary edge map).
pub fn hough_circles(img: &RasterU8, params: &HoughParams) -> Result<HoughOutput> {
    params.validate()?;
    let w = img.width();
    let h = img.height();
    if w == 0 || h == 0 {
        return Ok(HoughOutput::default());
    }

    let edges = canny(img, (params.param1 * 0.5) as f32, params.param1 as f32);
    let grad = sobel_gradients(img);
    let (min_r, max_r) = params.radius_range(w, h);
    let idp = 1.0 / params.dp;
    let aw = ((w as f64) * idp).ceil() as usize;
    let ah = ((h as f64) * idp).ceil() as usize;
    let mut accum = vec![0u32; aw * ah];
    let mut edge_pixels = Vec::new();

    for y in 0..h {
        let edge_row = edges.row(y);
        let gx_row = grad.gx.row(y);
        let gy_row = grad.gy.row(y);
        for x in 0..w {
            if edge_row[x] == 0 {
                continue;
            }
            let vx = gx_row[x] as f64;
            let vy = gy_row[x] as f64;
            if vx == 0.0 && vy == 0.0 {
                continue;
            }
            let mag = vx.hypot(vy);
            let (ux, uy) = (vx / mag, vy / mag);
            for sense in [1.0, -1.0] {
                let mut r = min_r;
                while r <= max_r {
                    let ax = ((x as f64 + sense * r * ux) * idp).floor();
                    let ay = ((y as f64 + sense * r * uy) * idp).floor();
                    if ax < 0.0 || ay < 0.0 || ax >= aw as f64 || ay >= ah as f64 {
                        break;
                    }
                    accum[ay as usize * aw + ax as usize] += 1;
                    r += 1.0;
                }
            }
            edge_pixels.push(EdgePixel {
                x: x as f64,
                y: y as f64,
            });
        }
    }

    if edge_pixels.is_empty() {
        debug!("hough: no edge pixels in {}x{} input", w, h);
        return Ok(HoughOutput::default());
    }

    let centres = find_centres(&accum, aw, ah, params.param2);
    let candidates = centres.len();
    debug!(
        "hough: {} edge pixels, {} centre candidates (param2={})",
        edge_pixels.len(),
        candidates,
        params.param2
    );

    let min_dist2 = params.min_dist * params.min_dist;
    let mut circles: Vec<PixelCircle> = Vec::new();
    let mut distances = Vec::with_capacity(edge_pixels.len());
    for idx in centres {
        let votes = accum[idx];
        let cx = ((idx % aw) as f64 + 0.5) * params.dp;
        let cy = ((idx / aw) as f64 + 0.5) * params.dp;

        if circles.iter().any(|c| {
            let dx = c.center.x - cx;
            let dy = c.center.y - cy;
            dx * dx + dy * dy < min_dist2
        }) {
            continue;
        }

        distances.clear();
        for e in &edge_pixels {
            let d2 = (e.x - cx).powi(2) + (e.y - cy).powi(2);
            if d2 >= min_r * min_r && d2 <= max_r * max_r {
                distances.push(d2.sqrt());
            }
        }
        if distances.is_empty() {
            continue;
        }
        distances.sort_by(|a, b| a.total_cmp(b));

        let (r_best, support) = best_radius(&distances, params.dp);
        if (support as f64) > params.param2 && r_best > 0.0 {
            let circle = PixelCircle::new(PixelPoint::new(cx, cy), r_best, votes)?;
            debug!(
                "hough: accepted centre ({:.1}, {:.1}) r={:.2} votes={} support={}",
                cx, cy, r_best, votes, support
            );
            circles.push(circle);
        }
    }

    Ok(HoughOutput {
        circles,
        candidates,
    })
}

/// Local maxima of the accumulator above `threshold`, ordered by votes
/// (descending) then by scan index.
fn find_centres(accum: &[u32], aw: usize, ah: usize, threshold: f64) -> Vec<usize> {
    let at = |x: i64, y: i64| -> u32 {
        if x < 0 || y < 0 || x >= aw as i64 || y >= ah as i64 {
            0
        } else {
            accum[y as usize * aw + x as usize]
        }
    };
    let mut centres = Vec::new();
    for y in 0..ah as i64 {
        for x in 0..aw as i64 {
            let v = at(x, y);
            if (v as f64) > threshold
                && v > at(x - 1, y)
                && v >= at(x + 1, y)
                && v > at(x, y - 1)
                && v >= at(x, y + 1)
            {
                centres.push(y as usize * aw + x as usize);
            }
        }
    }
    centres.sort_by(|&a, &b| accum[b].cmp(&accum[a]).then(a.cmp(&b)));
    centres
}

/// Best radius over sorted distances: bins grow while the spread from the
/// bin start stays within `dr`; a bin scores `count / median`.
fn best_radius(sorted: &[f64], dr: f64) -> (f64, usize) {
    let mut r_best = 0.0;
    let mut max_count = 0usize;
    let mut start = 0usize;
    for j in 1..=sorted.len() {
        let closes = j == sorted.len() || sorted[j] - sorted[start] > dr;
        if !closes {
            continue;
        }
        let count = j - start;
        let r_cur = sorted[(start + j - 1) / 2];
        let better = if r_best <= 0.0 {
            count >= max_count
        } else {
            count as f64 * r_best >= max_count as f64 * r_cur
        };
        if better && r_cur > 0.0 {
            r_best = r_cur;
            max_count = count;
        }
        start = j;
    }
    (r_best, max_count)
}

/// Minimum |cos| between gradient and radial direction for an edge pixel to
/// take part in refinement.
const RADIAL_ALIGNMENT: f64 = 0.5;

/// Sub-pixel circle from the edge pixels around a coarse detection.
///
/// Edge pixels within `window` of the coarse radius are split by the sign of
/// their gradient along the radial direction: rising edges (brighter
/// outside) and falling edges (brighter inside). Every side with at least
/// `min_support` pixels gets its own least-squares circle. A bright ring
/// yields both sides and the result is their midline; a filled disk only has
/// its falling boundary. `None` when neither side is supported.
pub fn refine_circle(
    edges: &RasterU8,
    grad: &Grad,
    coarse: &PixelCircle,
    window: f64,
    cell: f64,
    min_support: usize,
) -> Option<PixelCircle> {
    let (cx, cy) = (coarse.center.x, coarse.center.y);
    let mut rising = Vec::new();
    let mut falling = Vec::new();
    for y in 0..edges.height() {
        let edge_row = edges.row(y);
        let gx_row = grad.gx.row(y);
        let gy_row = grad.gy.row(y);
        for x in 0..edges.width() {
            if edge_row[x] == 0 {
                continue;
            }
            let (dx, dy) = (x as f64 - cx, y as f64 - cy);
            let d = dx.hypot(dy);
            if d <= f64::EPSILON || (d - coarse.radius).abs() > window {
                continue;
            }
            let (vx, vy) = (gx_row[x] as f64, gy_row[x] as f64);
            let g = vx.hypot(vy);
            if g <= 0.0 {
                continue;
            }
            let radial = (vx * dx + vy * dy) / (g * d);
            if radial >= RADIAL_ALIGNMENT {
                rising.push([x as f64, y as f64]);
            } else if radial <= -RADIAL_ALIGNMENT {
                falling.push([x as f64, y as f64]);
            }
        }
    }

    // The coarse centre is off by up to a cell, which spreads the distances
    // of one true edge by about that much.
    let gate = cell.max(1.0) + 1.0;
    let sides: Vec<([f64; 2], f64)> = [&rising, &falling]
        .into_iter()
        .filter_map(|side| fit_edge_side(side, [cx, cy], gate, min_support))
        .collect();
    debug!(
        "hough: refine {} rising / {} falling edge pixels -> {} side(s)",
        rising.len(),
        falling.len(),
        sides.len()
    );
    if sides.is_empty() {
        return None;
    }
    let n = sides.len() as f64;
    let x = sides.iter().map(|(c, _)| c[0]).sum::<f64>() / n;
    let y = sides.iter().map(|(c, _)| c[1]).sum::<f64>() / n;
    let r = sides.iter().map(|(_, r)| r).sum::<f64>() / n;
    PixelCircle::new(PixelPoint::new(x, y), r, coarse.votes).ok()
}

/// Least-squares circle through one polarity of edge pixels: pixels far from
/// their median distance to `centre` are dropped, the rest are fitted, and
/// the fit is repeated on the pixels within one pixel of the first circle.
fn fit_edge_side(
    points: &[[f64; 2]],
    centre: [f64; 2],
    gate: f64,
    min_support: usize,
) -> Option<([f64; 2], f64)> {
    if points.len() < min_support {
        return None;
    }
    let dist = |p: &[f64; 2], c: [f64; 2]| (p[0] - c[0]).hypot(p[1] - c[1]);
    let mut d: Vec<f64> = points.iter().map(|p| dist(p, centre)).collect();
    d.sort_by(|a, b| a.total_cmp(b));
    let median = d[d.len() / 2];
    let kept: Vec<[f64; 2]> = points
        .iter()
        .copied()
        .filter(|p| (dist(p, centre) - median).abs() <= gate)
        .collect();
    if kept.len() < min_support {
        return None;
    }
    let (c, r) = fit_circle_xy(&kept).ok()?;
    let inliers: Vec<[f64; 2]> = kept
        .iter()
        .copied()
        .filter(|p| (dist(p, c) - r).abs() <= 1.0)
        .collect();
    if inliers.len() < min_support {
        return Some((c, r));
    }
    fit_circle_xy(&inliers).ok().or(Some((c, r)))
}

/// Picks one circle according to `selection`.
pub fn select_circle(circles: &[PixelCircle], selection: CircleSelection) -> Option<PixelCircle> {
    match selection {
        CircleSelection::First => circles.first().copied(),
        CircleSelection::Last => circles.last().copied(),
        CircleSelection::MostVotes => circles
            .iter()
            .copied()
            .reduce(|best, c| if c.votes > best.votes { c } else { best }),
    }
}

/// Blur, adaptive Canny and Hough transform on a projection raster.
pub fn estimate_hough(
    raster: &RasterU8,
    edge: &EdgeParams,
    params: &HoughParams,
) -> Result<PixelCircle> {
    edge.validate()?;
    params.validate()?;
    let blurred = gaussian_blur(raster, edge.blur_ksize)?;
    let median = blurred.median();
    let thresholds = adaptive_thresholds(median, edge.sigma, edge.high_rule);
    debug!(
        "hough: median={:.1} canny low={:.0} high={:.0}",
        median, thresholds.low, thresholds.high
    );
    let edges = canny(&blurred, thresholds.low, thresholds.high);
    let output = hough_circles(&edges, params)?;
    let mut circle = select_circle(&output.circles, params.selection).ok_or(
        ClearanceError::NoCircleDetected {
            candidates_considered: output.candidates,
        },
    )?;
    if params.refine_window > 0.0 {
        let grad = sobel_gradients(&blurred);
        match refine_circle(
            &edges,
            &grad,
            &circle,
            params.refine_window,
            params.dp,
            params.min_support(),
        ) {
            Some(refined) => {
                debug!(
                    "hough: refined ({:.1}, {:.1}) r={:.2} -> ({:.2}, {:.2}) r={:.2}",
                    circle.center.x,
                    circle.center.y,
                    circle.radius,
                    refined.center.x,
                    refined.center.y,
                    refined.radius
                );
                circle = refined;
            }
            None => debug!("hough: refinement unsupported, keeping transform output"),
        }
    }
    Ok(if params.quantize {
        circle.quantized()
    } else {
        circle
    })
}
