//! Owned single-channel f32 buffer in row-major layout (stride == width).
//!
//! Holds intermediate blur passes and Sobel derivatives. Values are kept in
//! 8-bit intensity units (0..255), not normalized, so thresholds match the
//! classic Canny/Hough parameter ranges.
use super::raster::RasterU8;

#[derive(Clone, Debug)]
pub struct ImageF32 {
    /// Image width in pixels
    pub w: usize,
    /// Image height in pixels
    pub h: usize,
    /// Number of f32 elements between consecutive rows (equals `w`)
    pub stride: usize,
    /// Backing storage in row-major order
    pub data: Vec<f32>,
}

impl ImageF32 {
    /// Zero-initialized buffer of size `w × h`.
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            stride: w,
            data: vec![0.0; w * h],
        }
    }

    /// Widen an 8-bit raster without rescaling.
    pub fn from_raster(src: &RasterU8) -> Self {
        Self {
            w: src.w,
            h: src.h,
            stride: src.w,
            data: src.data.iter().map(|&v| v as f32).collect(),
        }
    }

    /// Round and saturate back to 8 bits.
    pub fn to_raster(&self) -> RasterU8 {
        let mut out = RasterU8::new(self.w, self.h);
        for (dst, &v) in out.data.iter_mut().zip(self.data.iter()) {
            *dst = v.round().clamp(0.0, 255.0) as u8;
        }
        out
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.stride + x
    }
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[self.idx(x, y)]
    }
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, v: f32) {
        let i = self.idx(x, y);
        self.data[i] = v;
    }
}

impl crate::image::traits::ImageView for ImageF32 {
    type Pixel = f32;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn stride(&self) -> usize {
        self.stride
    }
    #[inline]
    fn row(&self, y: usize) -> &[f32] {
        let start = y * self.stride;
        &self.data[start..start + self.w]
    }
    #[inline]
    fn as_slice(&self) -> Option<&[f32]> {
        (self.stride == self.w).then_some(&self.data[..self.w * self.h])
    }
}

impl crate::image::traits::ImageViewMut for ImageF32 {
    #[inline]
    fn row_mut(&mut self, y: usize) -> &mut [f32] {
        let start = y * self.stride;
        let end = start + self.w;
        &mut self.data[start..end]
    }
}
