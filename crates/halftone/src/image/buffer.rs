//! Row-major 8-bit pixel buffers.
//!
//! [`PixelBuffer`] is both the engine's input (an already decoded image) and
//! its output (the rendered canvas). Samples are interleaved per pixel.

use super::color::Rgb;
use crate::api::HalftoneError;

/// Sample layout of a [`PixelBuffer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// One luma sample per pixel.
    Gray,
    /// Three samples per pixel: R, G, B.
    Rgb,
    /// Four samples per pixel: R, G, B, straight (non-premultiplied) alpha.
    Rgba,
}

impl PixelFormat {
    /// Number of interleaved samples per pixel.
    #[inline]
    pub fn channels(self) -> usize {
        match self {
            PixelFormat::Gray => 1,
            PixelFormat::Rgb => 3,
            PixelFormat::Rgba => 4,
        }
    }
}

/// A width x height grid of 8-bit samples.
///
/// # Example
///
/// ```
/// use halftone::{PixelBuffer, PixelFormat};
///
/// let buffer = PixelBuffer::filled(4, 2, PixelFormat::Rgb, 128);
/// assert_eq!(buffer.width(), 4);
/// assert_eq!(buffer.height(), 2);
/// assert_eq!(buffer.data().len(), 4 * 2 * 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    format: PixelFormat,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap raw interleaved samples.
    ///
    /// # Errors
    ///
    /// Returns [`HalftoneError::BufferSize`] if `data.len()` is not
    /// `width * height * format.channels()`.
    pub fn from_raw(
        width: usize,
        height: usize,
        format: PixelFormat,
        data: Vec<u8>,
    ) -> Result<Self, HalftoneError> {
        let expected = width * height * format.channels();
        if data.len() != expected {
            return Err(HalftoneError::BufferSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            format,
            data,
        })
    }

    /// A buffer with every sample set to `value`.
    pub fn filled(width: usize, height: usize, format: PixelFormat, value: u8) -> Self {
        Self {
            width,
            height,
            format,
            data: vec![value; width * height * format.channels()],
        }
    }

    /// Build a single-channel buffer from a per-pixel function.
    pub fn gray_from_fn(width: usize, height: usize, f: impl Fn(usize, usize) -> u8) -> Self {
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            format: PixelFormat::Gray,
            data,
        }
    }

    /// Build an RGB buffer from a per-pixel function.
    pub fn rgb_from_fn(width: usize, height: usize, f: impl Fn(usize, usize) -> Rgb) -> Self {
        let mut data = Vec::with_capacity(width * height * 3);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&f(x, y).to_bytes());
            }
        }
        Self {
            width,
            height,
            format: PixelFormat::Rgb,
            data,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    #[inline]
    pub fn channels(&self) -> usize {
        self.format.channels()
    }

    /// Returns true if the buffer covers no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Raw interleaved samples, row-major.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    pub(crate) fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consume the buffer, returning its samples.
    #[inline]
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Samples of the pixel at `(x, y)`.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> &[u8] {
        let c = self.channels();
        let start = (y * self.width + x) * c;
        &self.data[start..start + c]
    }

    /// Color of the pixel at `(x, y)`, replicating luma for gray buffers.
    /// Alpha is ignored.
    #[inline]
    pub fn rgb_at(&self, x: usize, y: usize) -> Rgb {
        let p = self.pixel(x, y);
        match self.format {
            PixelFormat::Gray => Rgb::new(p[0], p[0], p[0]),
            PixelFormat::Rgb | PixelFormat::Rgba => Rgb::new(p[0], p[1], p[2]),
        }
    }

    /// Returns true if the buffer carries an alpha channel.
    #[inline]
    pub fn has_alpha(&self) -> bool {
        self.format == PixelFormat::Rgba
    }

    /// Composite RGBA over an opaque black background.
    ///
    /// Each color channel becomes `round(c * a / 255)`. Gray and RGB
    /// buffers are returned unchanged.
    pub fn flatten_alpha(&self) -> PixelBuffer {
        if self.format != PixelFormat::Rgba {
            return self.clone();
        }
        let mut data = Vec::with_capacity(self.width * self.height * 3);
        for px in self.data.chunks_exact(4) {
            let a = px[3] as u32;
            for &c in &px[..3] {
                data.push(((c as u32 * a + 127) / 255) as u8);
            }
        }
        PixelBuffer {
            width: self.width,
            height: self.height,
            format: PixelFormat::Rgb,
            data,
        }
    }

    /// Single-channel luma plane.
    ///
    /// RGBA input is flattened against black first.
    pub fn to_luma(&self) -> PixelBuffer {
        let data = match self.format {
            PixelFormat::Gray => self.data.clone(),
            PixelFormat::Rgb => self
                .data
                .chunks_exact(3)
                .map(|p| Rgb::new(p[0], p[1], p[2]).luma())
                .collect(),
            PixelFormat::Rgba => return self.flatten_alpha().to_luma(),
        };
        PixelBuffer {
            width: self.width,
            height: self.height,
            format: PixelFormat::Gray,
            data,
        }
    }

    /// Three-channel RGB plane.
    ///
    /// Gray input is replicated to all channels; RGBA input is flattened
    /// against black.
    pub fn to_rgb(&self) -> PixelBuffer {
        match self.format {
            PixelFormat::Rgb => self.clone(),
            PixelFormat::Rgba => self.flatten_alpha(),
            PixelFormat::Gray => PixelBuffer {
                width: self.width,
                height: self.height,
                format: PixelFormat::Rgb,
                data: self.data.iter().flat_map(|&v| [v, v, v]).collect(),
            },
        }
    }

    /// Replace every sample `v` with `255 - v`.
    pub fn invert(&mut self) {
        for v in &mut self.data {
            *v = 255 - *v;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_checks_length() {
        let ok = PixelBuffer::from_raw(2, 2, PixelFormat::Rgb, vec![0; 12]);
        assert!(ok.is_ok());

        let err = PixelBuffer::from_raw(2, 2, PixelFormat::Rgb, vec![0; 11]).unwrap_err();
        assert!(matches!(
            err,
            HalftoneError::BufferSize {
                expected: 12,
                actual: 11
            }
        ));
    }

    #[test]
    fn test_pixel_access() {
        let buffer = PixelBuffer::rgb_from_fn(3, 2, |x, y| Rgb::new(x as u8, y as u8, 7));
        assert_eq!(buffer.pixel(2, 1), &[2, 1, 7]);
        assert_eq!(buffer.rgb_at(1, 0), Rgb::new(1, 0, 7));
    }

    #[test]
    fn test_flatten_alpha_against_black() {
        let rgba = PixelBuffer::from_raw(
            3,
            1,
            PixelFormat::Rgba,
            vec![200, 100, 50, 255, 200, 100, 50, 0, 200, 100, 50, 128],
        )
        .unwrap();
        let flat = rgba.flatten_alpha();

        assert_eq!(flat.format(), PixelFormat::Rgb);
        assert_eq!(flat.pixel(0, 0), &[200, 100, 50], "opaque keeps its color");
        assert_eq!(flat.pixel(1, 0), &[0, 0, 0], "transparent becomes black");
        assert_eq!(flat.pixel(2, 0), &[100, 50, 25], "half alpha halves");
    }

    #[test]
    fn test_to_luma_from_rgba_uses_flattened_color() {
        let rgba = PixelBuffer::from_raw(1, 1, PixelFormat::Rgba, vec![255, 255, 255, 0]).unwrap();
        assert_eq!(rgba.to_luma().data(), &[0]);
    }

    #[test]
    fn test_to_rgb_replicates_gray() {
        let gray = PixelBuffer::gray_from_fn(2, 1, |x, _| if x == 0 { 10 } else { 240 });
        let rgb = gray.to_rgb();
        assert_eq!(rgb.data(), &[10, 10, 10, 240, 240, 240]);
    }

    #[test]
    fn test_invert_twice_is_identity() {
        let original = PixelBuffer::gray_from_fn(16, 16, |x, y| (x * 16 + y) as u8);
        let mut buffer = original.clone();
        buffer.invert();
        assert_ne!(buffer, original);
        buffer.invert();
        assert_eq!(buffer, original);
    }

    #[test]
    fn test_is_empty() {
        assert!(PixelBuffer::filled(0, 5, PixelFormat::Gray, 0).is_empty());
        assert!(PixelBuffer::filled(5, 0, PixelFormat::Gray, 0).is_empty());
        assert!(!PixelBuffer::filled(1, 1, PixelFormat::Gray, 0).is_empty());
    }
}
