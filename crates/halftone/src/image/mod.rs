//! Pixel buffers and color primitives
//!
//! The engine receives an already decoded [`PixelBuffer`] and returns one.
//! This module also holds the two color-space steps the pipeline needs
//! before any cell is visited: alpha flattening and luma conversion, plus
//! the integer bilinear upscaler.

mod buffer;
mod color;
mod resize;

pub use buffer::{PixelBuffer, PixelFormat};
pub use color::Rgb;
pub use resize::upscale_bilinear;
