//! Owned 8-bit monochrome raster (row-major, stride == width).
//!
//! Produced by the planar projector and consumed by the circle estimator.
//! Pixel `(x, y)` is column `x`, row `y`; the origin is the top-left corner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterU8 {
    pub w: usize,
    pub h: usize,
    pub stride: usize, // bytes between rows
    pub data: Vec<u8>,
}

impl RasterU8 {
    /// Black raster of size `w × h`.
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            stride: w,
            data: vec![0; w * h],
        }
    }

    pub fn square(size: usize) -> Self {
        Self::new(size, size)
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.stride + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, v: u8) {
        let i = y * self.stride + x;
        self.data[i] = v;
    }

    /// Bounds-checked write for signed coordinates; out-of-range writes are
    /// dropped.
    #[inline]
    pub fn put(&mut self, x: i64, y: i64, v: u8) {
        if x >= 0 && y >= 0 && (x as usize) < self.w && (y as usize) < self.h {
            self.set(x as usize, y as usize, v);
        }
    }

    /// Number of non-zero pixels.
    pub fn count_nonzero(&self) -> usize {
        self.data.iter().filter(|&&v| v != 0).count()
    }

    /// Median intensity. For an even pixel count this is the mean of the two
    /// middle values, matching `numpy.median`.
    pub fn median(&self) -> f64 {
        let n = self.data.len();
        if n == 0 {
            return 0.0;
        }
        let mut hist = [0usize; 256];
        for &v in &self.data {
            hist[v as usize] += 1;
        }
        let nth = |k: usize| -> f64 {
            let mut acc = 0usize;
            for (value, &count) in hist.iter().enumerate() {
                acc += count;
                if acc > k {
                    return value as f64;
                }
            }
            255.0
        };
        if n % 2 == 1 {
            nth(n / 2)
        } else {
            0.5 * (nth(n / 2 - 1) + nth(n / 2))
        }
    }
}

impl crate::image::traits::ImageView for RasterU8 {
    type Pixel = u8;

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
    fn row(&self, y: usize) -> &[u8] {
        let start = y * self.stride;
        &self.data[start..start + self.w]
    }
    #[inline]
    fn as_slice(&self) -> Option<&[u8]> {
        (self.stride == self.w).then_some(&self.data[..self.w * self.h])
    }
}

impl crate::image::traits::ImageViewMut for RasterU8 {
    #[inline]
    fn row_mut(&mut self, y: usize) -> &mut [u8] {
        let start = y * self.stride;
        let end = start + self.w;
        &mut self.data[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::ImageView;

    #[test]
    fn median_matches_numpy_convention() {
        let mut r = RasterU8::new(4, 1);
        r.data = vec![10, 0, 200, 30];
        assert_eq!(r.median(), 20.0);
        let mut odd = RasterU8::new(3, 1);
        odd.data = vec![9, 1, 5];
        assert_eq!(odd.median(), 5.0);
        assert_eq!(RasterU8::new(0, 0).median(), 0.0);
    }

    #[test]
    fn put_ignores_out_of_bounds() {
        let mut r = RasterU8::square(4);
        r.put(-1, 0, 255);
        r.put(4, 2, 255);
        r.put(1, 2, 255);
        assert_eq!(r.count_nonzero(), 1);
        assert_eq!(r.row(2), &[0, 255, 0, 0]);
    }
}
