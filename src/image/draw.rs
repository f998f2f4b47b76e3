//! Minimal drawing primitives on [`RasterU8`]: filled disks for point
//! rasterization plus outlines and markers for verification images.
//! All coordinates are raster pixels; pixels outside the raster are clipped.

use super::raster::RasterU8;

/// Filled disk: every pixel with `dx² + dy² ≤ r²` around `(cx, cy)`.
/// A radius of 0 sets the single centre pixel.
pub fn fill_disk(img: &mut RasterU8, cx: i64, cy: i64, radius: u32, value: u8) {
    let r = radius as i64;
    let r2 = r * r;
    for dy in -r..=r {
        for dx in -r..=r {
            if dx * dx + dy * dy <= r2 {
                img.put(cx + dx, cy + dy, value);
            }
        }
    }
}

/// One-pixel circle outline (midpoint algorithm).
pub fn draw_circle(img: &mut RasterU8, cx: i64, cy: i64, radius: i64, value: u8) {
    if radius <= 0 {
        img.put(cx, cy, value);
        return;
    }
    let mut x = radius;
    let mut y = 0i64;
    let mut err = 1 - radius;
    while x >= y {
        for (px, py) in [
            (x, y),
            (y, x),
            (-y, x),
            (-x, y),
            (-x, -y),
            (-y, -x),
            (y, -x),
            (x, -y),
        ] {
            img.put(cx + px, cy + py, value);
        }
        y += 1;
        if err < 0 {
            err += 2 * y + 1;
        } else {
            x -= 1;
            err += 2 * (y - x) + 1;
        }
    }
}

/// Bresenham line between two pixels (inclusive).
pub fn draw_line(img: &mut RasterU8, x0: i64, y0: i64, x1: i64, y1: i64, value: u8) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let (mut x, mut y) = (x0, y0);
    let mut err = dx + dy;
    loop {
        img.put(x, y, value);
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

/// Upright cross marker of total width `size`.
pub fn draw_cross(img: &mut RasterU8, cx: i64, cy: i64, size: i64, value: u8) {
    let half = (size / 2).max(1);
    draw_line(img, cx - half, cy, cx + half, cy, value);
    draw_line(img, cx, cy - half, cx, cy + half, value);
}

/// Diagonal cross marker of total width `size`.
pub fn draw_tilted_cross(img: &mut RasterU8, cx: i64, cy: i64, size: i64, value: u8) {
    let half = (size / 2).max(1);
    draw_line(img, cx - half, cy - half, cx + half, cy + half, value);
    draw_line(img, cx - half, cy + half, cx + half, cy - half, value);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disk_of_radius_two_covers_thirteen_pixels() {
        let mut img = RasterU8::square(9);
        fill_disk(&mut img, 4, 4, 2, 255);
        assert_eq!(img.count_nonzero(), 13);
        let mut single = RasterU8::square(3);
        fill_disk(&mut single, 1, 1, 0, 255);
        assert_eq!(single.count_nonzero(), 1);
    }

    #[test]
    fn disk_is_clipped_at_the_border() {
        let mut img = RasterU8::square(4);
        fill_disk(&mut img, 0, 0, 2, 255);
        // Quarter of the 13-pixel disk plus the shared axis pixels.
        assert_eq!(img.count_nonzero(), 6);
    }

    #[test]
    fn circle_outline_stays_on_radius() {
        let mut img = RasterU8::square(41);
        draw_circle(&mut img, 20, 20, 15, 255);
        for y in 0..41 {
            for x in 0..41 {
                if img.get(x, y) != 0 {
                    let d = ((x as f64 - 20.0).powi(2) + (y as f64 - 20.0).powi(2)).sqrt();
                    assert!((d - 15.0).abs() < 1.0, "pixel ({x},{y}) at distance {d}");
                }
            }
        }
        assert!(img.count_nonzero() > 60);
    }

    #[test]
    fn line_hits_both_endpoints() {
        let mut img = RasterU8::square(10);
        draw_line(&mut img, 1, 2, 8, 6, 255);
        assert_eq!(img.get(1, 2), 255);
        assert_eq!(img.get(8, 6), 255);
    }
}
