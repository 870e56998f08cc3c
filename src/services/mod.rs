pub mod grid_search;
pub mod halftone_service;
pub mod naming;

pub use grid_search::{run_grid_search, SearchReport};
pub use halftone_service::{render_bytes, render_image, HalftoneService, RenderedImage};
pub use naming::output_filename;
