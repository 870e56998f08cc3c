//! Grid partitioning and cell statistics
//!
//! The working buffer is tiled in steps of `cell_size` from the top-left
//! corner; the final row and column may be clipped by the image edge. Each
//! cell also exposes a neighborhood of up to 3x3 cells for context.

mod layout;
mod stats;

pub use layout::{cell_size, Cell, Cells, Region, RenderContext};
pub use stats::{mean_rgb, RegionStats};
