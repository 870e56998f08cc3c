//! Processing configuration and its validation.

mod error;
mod options;

pub use error::ConfigError;
pub use options::{
    ProcessingConfig, RenderMode, MIN_GRID_SIZE, NUM_COLORS_RANGE, SIGMA_RANGE, UPSCALE_FACTORS,
};
