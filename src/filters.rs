//! Separable smoothing filters applied to projection rasters before edge
//! detection.
//!
//! Design
//! - A filter is a 1D tap vector applied horizontally then vertically.
//! - Boundary handling uses clamping (replicate border) via saturating/`min`.
//! - Intermediate results stay in f32; the output is rounded back to 8 bits.
use crate::error::{ClearanceError, Result};
use crate::image::{ImageF32, ImageView, ImageViewMut, RasterU8};

/// Trait implemented by separable 1D filters.
pub trait SeparableFilter {
    /// Return the 1D taps (in left-to-right order). The kernel is assumed to be
    /// symmetric around its centre, but the implementation does not rely on it.
    fn taps(&self) -> &[f32];
}

/// Normalised sampled Gaussian.
#[derive(Clone, Debug)]
pub struct GaussianKernel {
    taps: Vec<f32>,
    sigma: f64,
}

impl GaussianKernel {
    /// Kernel of odd size `ksize`. A non-positive `sigma` is derived from the
    /// size with the OpenCV rule `0.3·((ksize−1)/2 − 1) + 0.8`.
    pub fn new(ksize: usize, sigma: f64) -> Result<Self> {
        if ksize == 0 || ksize % 2 == 0 {
            return Err(ClearanceError::invalid(
                "blur_ksize",
                format!("kernel size must be odd and positive, got {ksize}"),
            ));
        }
        let sigma = if sigma > 0.0 {
            sigma
        } else {
            default_sigma(ksize)
        };
        let half = (ksize / 2) as i64;
        let denom = 2.0 * sigma * sigma;
        let mut taps: Vec<f64> = (-half..=half)
            .map(|i| (-((i * i) as f64) / denom).exp())
            .collect();
        let sum: f64 = taps.iter().sum();
        for t in &mut taps {
            *t /= sum;
        }
        Ok(Self {
            taps: taps.into_iter().map(|t| t as f32).collect(),
            sigma,
        })
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }
}

impl SeparableFilter for GaussianKernel {
    #[inline]
    fn taps(&self) -> &[f32] {
        &self.taps
    }
}

/// Sigma OpenCV picks for `GaussianBlur(..., sigmaX = 0)`.
#[inline]
pub fn default_sigma(ksize: usize) -> f64 {
    0.3 * ((ksize as f64 - 1.0) * 0.5 - 1.0) + 0.8
}

/// Apply `filter` separably to an 8-bit raster.
pub fn blur_separable<F: SeparableFilter>(src: &RasterU8, filter: &F) -> RasterU8 {
    let w = src.w;
    let h = src.h;
    if w == 0 || h == 0 {
        return src.clone();
    }
    let taps = filter.taps();
    let half = (taps.len() / 2) as i64;

    let input = ImageF32::from_raster(src);
    let mut tmp = ImageF32::new(w, h);
    // horizontal
    for y in 0..h {
        let row = input.row(y);
        let out = tmp.row_mut(y);
        for (x, dst) in out.iter_mut().enumerate() {
            let mut acc = 0.0f32;
            for (k, &t) in taps.iter().enumerate() {
                let xx = (x as i64 + k as i64 - half).clamp(0, w as i64 - 1) as usize;
                acc += t * row[xx];
            }
            *dst = acc;
        }
    }
    // vertical
    let mut out = ImageF32::new(w, h);
    for y in 0..h {
        for (k, &t) in taps.iter().enumerate() {
            let yy = (y as i64 + k as i64 - half).clamp(0, h as i64 - 1) as usize;
            let src_row = tmp.row(yy).to_vec();
            let dst_row = out.row_mut(y);
            for (d, s) in dst_row.iter_mut().zip(src_row.iter()) {
                *d += t * s;
            }
        }
    }
    out.to_raster()
}

/// Gaussian blur with kernel `ksize × ksize` and OpenCV's default sigma.
pub fn gaussian_blur(src: &RasterU8, ksize: usize) -> Result<RasterU8> {
    let kernel = GaussianKernel::new(ksize, 0.0)?;
    Ok(blur_separable(src, &kernel))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nine_tap_sigma_follows_opencv_rule() {
        assert!((default_sigma(9) - 1.7).abs() < 1e-12);
        let k = GaussianKernel::new(9, 0.0).unwrap();
        assert_eq!(k.taps().len(), 9);
        let sum: f32 = k.taps().iter().sum();
        assert!((sum - 1.0).abs() < 1e-5);
        assert!(k.taps()[4] > k.taps()[3]);
    }

    #[test]
    fn even_kernel_is_rejected() {
        assert!(GaussianKernel::new(8, 0.0).is_err());
        assert!(GaussianKernel::new(0, 1.0).is_err());
    }

    #[test]
    fn blur_preserves_flat_images() {
        let mut img = RasterU8::new(12, 7);
        img.data.iter_mut().for_each(|v| *v = 90);
        let out = gaussian_blur(&img, 9).unwrap();
        assert!(out.data.iter().all(|&v| v == 90));
    }

    #[test]
    fn blur_spreads_a_single_spike() {
        let mut img = RasterU8::square(15);
        img.set(7, 7, 255);
        let out = gaussian_blur(&img, 9).unwrap();
        assert!(out.get(7, 7) < 255);
        assert!(out.get(8, 7) > 0);
        assert_eq!(out.get(8, 7), out.get(6, 7));
        assert_eq!(out.get(0, 0), 0);
    }
}
