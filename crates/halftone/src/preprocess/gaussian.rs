//! Separable Gaussian blur for single-channel planes.

use crate::image::{PixelBuffer, PixelFormat};

/// Kernel radius in standard deviations.
const TRUNCATE: f64 = 4.0;

/// Normalized 1-D Gaussian kernel of radius `floor(TRUNCATE * sigma + 0.5)`.
fn kernel(sigma: f64) -> Vec<f64> {
    let radius = (TRUNCATE * sigma + 0.5) as usize;
    let denom = 2.0 * sigma * sigma;
    let mut weights: Vec<f64> = (0..=2 * radius)
        .map(|i| {
            let d = i as f64 - radius as f64;
            (-d * d / denom).exp()
        })
        .collect();
    let sum: f64 = weights.iter().sum();
    for w in &mut weights {
        *w /= sum;
    }
    weights
}

/// Mirror an out-of-range index back into `0..len`, repeating the edge
/// sample (`d c b a | a b c d | d c b a`).
#[inline]
fn reflect(i: isize, len: usize) -> usize {
    let len = len as isize;
    let period = 2 * len;
    let mut m = i.rem_euclid(period);
    if m >= len {
        m = period - 1 - m;
    }
    m as usize
}

/// Convolve one line of samples with `weights`, writing into `out`.
fn convolve_line(src: &[f64], weights: &[f64], out: &mut [f64]) {
    let radius = (weights.len() / 2) as isize;
    let len = src.len();
    for (i, slot) in out.iter_mut().enumerate() {
        let mut acc = 0.0;
        for (k, &w) in weights.iter().enumerate() {
            let j = reflect(i as isize + k as isize - radius, len);
            acc += w * src[j];
        }
        *slot = acc;
    }
}

/// Blur a gray plane with standard deviation `sigma`.
///
/// Rows then columns, with reflected borders; results are rounded back to
/// `u8`. A non-positive sigma returns the plane unchanged.
pub fn gaussian_blur(plane: &PixelBuffer, sigma: f64) -> PixelBuffer {
    debug_assert_eq!(plane.format(), PixelFormat::Gray);
    let (w, h) = (plane.width(), plane.height());
    if sigma <= 0.0 || plane.is_empty() {
        return plane.clone();
    }

    let weights = kernel(sigma);
    let mut values: Vec<f64> = plane.data().iter().map(|&v| v as f64).collect();

    let mut line = vec![0.0; w];
    for row in values.chunks_exact_mut(w) {
        convolve_line(row, &weights, &mut line);
        row.copy_from_slice(&line);
    }

    let mut column = vec![0.0; h];
    let mut blurred = vec![0.0; h];
    for x in 0..w {
        for y in 0..h {
            column[y] = values[y * w + x];
        }
        convolve_line(&column, &weights, &mut blurred);
        for y in 0..h {
            values[y * w + x] = blurred[y];
        }
    }

    let mut out = PixelBuffer::filled(w, h, PixelFormat::Gray, 0);
    for (dst, v) in out.data_mut().iter_mut().zip(values) {
        *dst = v.round().clamp(0.0, 255.0) as u8;
    }
    out
}

/// The smoothing pass: blur at `sigma`, then again at `sigma / 2`.
pub fn smooth(plane: &PixelBuffer, sigma: f64) -> PixelBuffer {
    let once = gaussian_blur(plane, sigma);
    gaussian_blur(&once, sigma * 0.5)
}
