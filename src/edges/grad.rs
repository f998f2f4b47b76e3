//! Sobel gradients on an 8-bit raster with L1 magnitude.
//!
//! - Convolves the 3×3 Sobel pair with border clamping.
//! - Outputs per-pixel `gx`, `gy` and `mag = |gx| + |gy|`.
//!
//! Complexity: O(W·H); memory: three float buffers.
use crate::image::{ImageF32, ImageView, ImageViewMut, RasterU8};

type Kernel3 = [[f32; 3]; 3];

const SOBEL_KERNEL_X: Kernel3 = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];
const SOBEL_KERNEL_Y: Kernel3 = [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]];

/// Per-pixel gradient buffers.
#[derive(Clone, Debug)]
pub struct Grad {
    /// Horizontal derivative (towards +x / right)
    pub gx: ImageF32,
    /// Vertical derivative (towards +y / down)
    pub gy: ImageF32,
    /// L1 magnitude per pixel: `|gx| + |gy|`
    pub mag: ImageF32,
}

impl Grad {
    pub fn width(&self) -> usize {
        self.mag.w
    }

    pub fn height(&self) -> usize {
        self.mag.h
    }
}

/// Compute Sobel gradients of `src`.
pub fn sobel_gradients(src: &RasterU8) -> Grad {
    let w = src.w;
    let h = src.h;
    let mut gx = ImageF32::new(w, h);
    let mut gy = ImageF32::new(w, h);
    let mut mag = ImageF32::new(w, h);

    if w == 0 || h == 0 {
        return Grad { gx, gy, mag };
    }

    for y in 0..h {
        let y_idx = [y.saturating_sub(1), y, (y + 1).min(h - 1)];
        let rows = [src.row(y_idx[0]), src.row(y_idx[1]), src.row(y_idx[2])];
        let out_gx = gx.row_mut(y);
        let out_gy = gy.row_mut(y);
        let out_mag = mag.row_mut(y);
        for x in 0..w {
            let x_idx = [x.saturating_sub(1), x, (x + 1).min(w - 1)];

            let mut sum_x = 0.0;
            let mut sum_y = 0.0;
            for (ky, yy_row) in rows.iter().enumerate() {
                let kx_row = &SOBEL_KERNEL_X[ky];
                let ky_row = &SOBEL_KERNEL_Y[ky];
                for (k, &xx) in x_idx.iter().enumerate() {
                    let sample = yy_row[xx] as f32;
                    sum_x += sample * kx_row[k];
                    sum_y += sample * ky_row[k];
                }
            }

            out_gx[x] = sum_x;
            out_gy[x] = sum_y;
            out_mag[x] = sum_x.abs() + sum_y.abs();
        }
    }

    Grad { gx, gy, mag }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertical_step_has_horizontal_gradient() {
        let mut img = RasterU8::new(6, 5);
        for y in 0..5 {
            for x in 3..6 {
                img.set(x, y, 100);
            }
        }
        let g = sobel_gradients(&img);
        assert_eq!(g.gx.get(2, 2), 400.0);
        assert_eq!(g.gx.get(3, 2), 400.0);
        assert_eq!(g.gy.get(2, 2), 0.0);
        assert_eq!(g.mag.get(0, 2), 0.0);
        assert_eq!(g.mag.get(3, 2), 400.0);
    }
}
