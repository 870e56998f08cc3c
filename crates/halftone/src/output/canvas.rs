//! The render target.

use crate::config::RenderMode;
use crate::image::{PixelBuffer, PixelFormat, Rgb};

/// All-black canvas that circles are rasterized into.
///
/// Grayscale canvases store one sample per pixel and take the luma of the
/// fill color, so [`Rgb::WHITE`] writes 255. Color canvases store RGB.
#[derive(Debug, Clone)]
pub struct OutputCanvas {
    buffer: PixelBuffer,
}

impl OutputCanvas {
    pub fn new(width: usize, height: usize, mode: RenderMode) -> Self {
        let format = match mode {
            RenderMode::Grayscale => PixelFormat::Gray,
            RenderMode::Color => PixelFormat::Rgb,
        };
        Self {
            buffer: PixelBuffer::filled(width, height, format, 0),
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.buffer.width()
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.buffer.height()
    }

    /// Fill `x0..=x1` on row `y`. Callers clip to the canvas.
    pub(crate) fn fill_span(&mut self, y: usize, x0: usize, x1: usize, color: Rgb) {
        let width = self.buffer.width();
        match self.buffer.format() {
            PixelFormat::Gray => {
                let v = color.luma();
                self.buffer.data_mut()[y * width + x0..=y * width + x1].fill(v);
            }
            _ => {
                let bytes = color.to_bytes();
                let row = &mut self.buffer.data_mut()[(y * width + x0) * 3..(y * width + x1 + 1) * 3];
                for px in row.chunks_exact_mut(3) {
                    px.copy_from_slice(&bytes);
                }
            }
        }
    }

    /// Replace every sample `v` with `255 - v`.
    pub fn invert(&mut self) {
        self.buffer.invert();
    }

    /// Read-only view of the pixels drawn so far.
    pub fn as_buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    pub fn into_buffer(self) -> PixelBuffer {
        self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_canvas_is_black() {
        let gray = OutputCanvas::new(5, 4, RenderMode::Grayscale).into_buffer();
        assert_eq!(gray.format(), PixelFormat::Gray);
        assert!(gray.data().iter().all(|&v| v == 0));

        let color = OutputCanvas::new(5, 4, RenderMode::Color).into_buffer();
        assert_eq!(color.format(), PixelFormat::Rgb);
        assert_eq!(color.data().len(), 60);
        assert!(color.data().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_fill_span() {
        let mut canvas = OutputCanvas::new(4, 2, RenderMode::Color);
        canvas.fill_span(1, 1, 2, Rgb::new(1, 2, 3));
        let buffer = canvas.into_buffer();
        assert_eq!(buffer.pixel(0, 1), &[0, 0, 0]);
        assert_eq!(buffer.pixel(1, 1), &[1, 2, 3]);
        assert_eq!(buffer.pixel(2, 1), &[1, 2, 3]);
        assert_eq!(buffer.pixel(3, 1), &[0, 0, 0]);
        assert_eq!(buffer.pixel(1, 0), &[0, 0, 0]);
    }

    #[test]
    fn test_gray_fill_uses_luma() {
        let mut canvas = OutputCanvas::new(3, 1, RenderMode::Grayscale);
        canvas.fill_span(0, 0, 0, Rgb::WHITE);
        canvas.fill_span(0, 2, 2, Rgb::new(255, 0, 0));
        assert_eq!(canvas.as_buffer().data(), &[255, 0, 76]);
    }

    #[test]
    fn test_invert() {
        let mut canvas = OutputCanvas::new(2, 1, RenderMode::Grayscale);
        canvas.fill_span(0, 0, 0, Rgb::WHITE);
        canvas.invert();
        assert_eq!(canvas.into_buffer().data(), &[0, 255]);
    }
}
