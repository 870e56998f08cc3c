//! Integer-factor bilinear upscaling.

use super::buffer::PixelBuffer;

/// Upscale a buffer by an integer factor with bilinear interpolation.
///
/// Sample positions are pixel-center aligned: output pixel `d` reads the
/// source at `(d + 0.5) / factor - 0.5`, clamped to the image edge. A factor
/// of 1 returns an identical copy.
pub fn upscale_bilinear(buffer: &PixelBuffer, factor: usize) -> PixelBuffer {
    if factor <= 1 || buffer.is_empty() {
        return buffer.clone();
    }

    let (w, h) = (buffer.width(), buffer.height());
    let (new_w, new_h) = (w * factor, h * factor);
    let channels = buffer.channels();
    let src = buffer.data();

    let xs: Vec<(usize, usize, f32)> = (0..new_w).map(|d| sample_axis(d, factor, w)).collect();
    let ys: Vec<(usize, usize, f32)> = (0..new_h).map(|d| sample_axis(d, factor, h)).collect();

    let mut out = PixelBuffer::filled(new_w, new_h, buffer.format(), 0);
    let dst = out.data_mut();

    for (dy, &(y0, y1, fy)) in ys.iter().enumerate() {
        for (dx, &(x0, x1, fx)) in xs.iter().enumerate() {
            let out_idx = (dy * new_w + dx) * channels;
            for c in 0..channels {
                let p00 = src[(y0 * w + x0) * channels + c] as f32;
                let p10 = src[(y0 * w + x1) * channels + c] as f32;
                let p01 = src[(y1 * w + x0) * channels + c] as f32;
                let p11 = src[(y1 * w + x1) * channels + c] as f32;
                let top = p00 + (p10 - p00) * fx;
                let bottom = p01 + (p11 - p01) * fx;
                let v = top + (bottom - top) * fy;
                dst[out_idx + c] = (v + 0.5).clamp(0.0, 255.0) as u8;
            }
        }
    }

    out
}

/// Source neighbours and interpolation weight for one output coordinate.
#[inline]
fn sample_axis(d: usize, factor: usize, len: usize) -> (usize, usize, f32) {
    let pos = ((d as f32 + 0.5) / factor as f32 - 0.5).clamp(0.0, (len - 1) as f32);
    let i0 = pos.floor() as usize;
    let i1 = (i0 + 1).min(len - 1);
    (i0, i1, pos - i0 as f32)
}
