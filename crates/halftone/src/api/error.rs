//! Unified error type for the halftone public API.

use crate::config::ConfigError;
use std::fmt;

/// Everything [`HalftoneEngine`](super::HalftoneEngine) can reject.
///
/// All failures happen before any pixel is drawn; there are no partial
/// results.
///
/// # Example
///
/// ```
/// use halftone::{HalftoneError, PixelBuffer, PixelFormat, ProcessingConfig};
///
/// let image = PixelBuffer::filled(0, 10, PixelFormat::Gray, 0);
/// let err = halftone::process(&image, &ProcessingConfig::default()).unwrap_err();
/// assert!(matches!(err, HalftoneError::DegenerateInput { .. }));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum HalftoneError {
    /// A configuration value outside its valid range.
    Config(ConfigError),
    /// The image is too small for the requested grid: the resolved cell size
    /// would be zero.
    Geometry {
        width: usize,
        height: usize,
        divisions: usize,
    },
    /// Zero-area input image.
    DegenerateInput { width: usize, height: usize },
    /// Raw sample data does not match the declared dimensions.
    BufferSize { expected: usize, actual: usize },
}

impl fmt::Display for HalftoneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HalftoneError::Config(err) => write!(f, "invalid configuration: {}", err),
            HalftoneError::Geometry {
                width,
                height,
                divisions,
            } => write!(
                f,
                "image {}x{} is too small for {} grid divisions (cell size would be 0)",
                width, height, divisions
            ),
            HalftoneError::DegenerateInput { width, height } => {
                write!(f, "image has no pixels ({}x{})", width, height)
            }
            HalftoneError::BufferSize { expected, actual } => write!(
                f,
                "pixel data has {} bytes, expected {}",
                actual, expected
            ),
        }
    }
}

impl std::error::Error for HalftoneError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HalftoneError::Config(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ConfigError> for HalftoneError {
    fn from(err: ConfigError) -> Self {
        HalftoneError::Config(err)
    }
}
