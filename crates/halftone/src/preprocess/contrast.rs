//! Percentile contrast stretch.

use crate::image::{PixelBuffer, PixelFormat};

/// Value at percentile `p` (0..=100) of `sorted`, linearly interpolated
/// between the two nearest ranks.
fn percentile(sorted: &[f64], p: f64) -> f64 {
    let last = sorted.len() - 1;
    let rank = p / 100.0 * last as f64;
    let lo = rank.floor() as usize;
    let hi = (lo + 1).min(last);
    let frac = rank - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/// Stretch a gray plane so the `low` and `high` percentiles map to 0 and 255.
///
/// Values outside the percentile range are clipped. Output samples are
/// truncated toward zero. A flat plane (`high` percentile not above `low`)
/// is returned unchanged.
///
/// ```
/// use halftone::preprocess::stretch_contrast;
/// use halftone::PixelBuffer;
///
/// let plane = PixelBuffer::gray_from_fn(3, 1, |x, _| [50, 100, 150][x]);
/// let out = stretch_contrast(&plane, 0.0, 100.0);
/// assert_eq!(out.data(), &[0, 127, 255]);
/// ```
pub fn stretch_contrast(plane: &PixelBuffer, low: f64, high: f64) -> PixelBuffer {
    debug_assert_eq!(plane.format(), PixelFormat::Gray);
    if plane.is_empty() {
        return plane.clone();
    }

    let mut sorted: Vec<f64> = plane.data().iter().map(|&v| v as f64 / 255.0).collect();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let lo = percentile(&sorted, low);
    let hi = percentile(&sorted, high);
    if hi <= lo {
        return plane.clone();
    }

    let mut out = plane.clone();
    for v in out.data_mut() {
        let x = *v as f64 / 255.0;
        let stretched = ((x - lo) / (hi - lo)).clamp(0.0, 1.0);
        *v = (stretched * 255.0) as u8;
    }
    out
}
