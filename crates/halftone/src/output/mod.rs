//! Output canvas and circle rasterization.
//!
//! Circles are drawn with a hard-edged scanline fill: no anti-aliasing, every
//! pixel is either the background or the fill color. Circles of neighbouring
//! cells never overlap because a diameter is at most 80% of the cell size.

mod canvas;
mod raster;

pub use canvas::OutputCanvas;
pub use raster::draw_circle;
