//! Region statistics over read-only planes.

use super::layout::Region;
use crate::image::{PixelBuffer, PixelFormat, Rgb};

/// Mean and population standard deviation of a gray region, normalized by 255.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RegionStats {
    pub mean: f64,
    pub std_dev: f64,
}

impl RegionStats {
    /// Statistics of `region` in a single-channel `plane`.
    ///
    /// An empty region yields zeros.
    pub fn of(plane: &PixelBuffer, region: Region) -> Self {
        debug_assert_eq!(plane.format(), PixelFormat::Gray);
        let n = region.area();
        if n == 0 {
            return Self::default();
        }

        let width = plane.width();
        let data = plane.data();
        let mut sum = 0u64;
        let mut sum_sq = 0u64;
        for y in region.y0..region.y1 {
            let row = &data[y * width + region.x0..y * width + region.x1];
            for &v in row {
                let v = v as u64;
                sum += v;
                sum_sq += v * v;
            }
        }

        let n = n as f64;
        let mean = sum as f64 / n;
        let variance = (sum_sq as f64 / n - mean * mean).max(0.0);
        Self {
            mean: mean / 255.0,
            std_dev: variance.sqrt() / 255.0,
        }
    }
}

/// Per-channel mean color of `region` in an RGB `plane`, truncated toward zero.
pub fn mean_rgb(plane: &PixelBuffer, region: Region) -> Rgb {
    debug_assert_eq!(plane.format(), PixelFormat::Rgb);
    let n = region.area() as u64;
    if n == 0 {
        return Rgb::BLACK;
    }

    let width = plane.width();
    let data = plane.data();
    let mut sums = [0u64; 3];
    for y in region.y0..region.y1 {
        let start = (y * width + region.x0) * 3;
        let end = (y * width + region.x1) * 3;
        for px in data[start..end].chunks_exact(3) {
            sums[0] += px[0] as u64;
            sums[1] += px[1] as u64;
            sums[2] += px[2] as u64;
        }
    }
    Rgb::new(
        (sums[0] / n) as u8,
        (sums[1] / n) as u8,
        (sums[2] / n) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full(plane: &PixelBuffer) -> Region {
        Region {
            x0: 0,
            y0: 0,
            x1: plane.width(),
            y1: plane.height(),
        }
    }

    #[test]
    fn test_uniform_region() {
        let plane = PixelBuffer::filled(4, 4, PixelFormat::Gray, 255);
        let stats = RegionStats::of(&plane, full(&plane));
        assert_eq!(stats.mean, 1.0);
        assert_eq!(stats.std_dev, 0.0);
    }

    #[test]
    fn test_half_black_half_white() {
        let plane = PixelBuffer::gray_from_fn(4, 2, |x, _| if x < 2 { 0 } else { 255 });
        let stats = RegionStats::of(&plane, full(&plane));
        assert!((stats.mean - 0.5).abs() < 1e-12);
        // population std of {0, 255} is 127.5
        assert!((stats.std_dev - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_sub_region() {
        let plane = PixelBuffer::gray_from_fn(4, 4, |x, y| if x >= 2 && y >= 2 { 51 } else { 0 });
        let region = Region {
            x0: 2,
            y0: 2,
            x1: 4,
            y1: 4,
        };
        let stats = RegionStats::of(&plane, region);
        assert!((stats.mean - 0.2).abs() < 1e-12);
        assert_eq!(stats.std_dev, 0.0);
    }

    #[test]
    fn test_empty_region() {
        let plane = PixelBuffer::filled(4, 4, PixelFormat::Gray, 9);
        let region = Region {
            x0: 2,
            y0: 2,
            x1: 2,
            y1: 4,
        };
        assert_eq!(RegionStats::of(&plane, region), RegionStats::default());
    }

    #[test]
    fn test_mean_rgb_truncates() {
        let plane = PixelBuffer::rgb_from_fn(2, 1, |x, _| {
            if x == 0 {
                Rgb::new(10, 0, 255)
            } else {
                Rgb::new(11, 3, 254)
            }
        });
        assert_eq!(mean_rgb(&plane, full(&plane)), Rgb::new(10, 1, 254));
    }
}
