//! Grayscale preprocessing ahead of grid sampling.
//!
//! Two optional steps, in order:
//!
//! 1. **Smoothing**: Gaussian blur at `smoothing_sigma`, then a second pass
//!    at half that sigma. Borders are reflected and the kernel is truncated
//!    at four standard deviations.
//! 2. **Contrast stretch**: the `contrast_percentile` bounds are mapped to
//!    0 and 255, with clipping outside them.
//!
//! Preprocessing runs on the original-resolution luma plane only. Color
//! mode samples cell colors from the untouched RGB image.

mod contrast;
mod gaussian;

pub use contrast::stretch_contrast;
pub use gaussian::{gaussian_blur, smooth};

use crate::config::ProcessingConfig;
use crate::image::PixelBuffer;

/// Apply the preprocessing steps enabled in `config` to a gray plane.
pub fn preprocess(plane: &PixelBuffer, config: &ProcessingConfig) -> PixelBuffer {
    let mut out = if config.smoothing {
        smooth(plane, config.smoothing_sigma)
    } else {
        plane.clone()
    };
    if config.enhance_contrast {
        let (low, high) = config.contrast_percentile;
        out = stretch_contrast(&out, low, high);
    }
    out
}
