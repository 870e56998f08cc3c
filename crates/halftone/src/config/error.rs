//! Configuration validation errors.

use std::fmt;

/// A rejected [`ProcessingConfig`](super::ProcessingConfig) value.
///
/// Every variant names the offending field (see [`ConfigError::field`]) and
/// carries the value that violated its constraint. Values are never clamped
/// into range; validation fails before any pixel is touched.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// `num_colors` outside `2..=10` while it drives the grid divisions.
    NumColorsOutOfRange { value: u32 },
    /// Explicit `grid_size` below 4.
    GridSizeTooSmall { value: u32 },
    /// Explicit `grid_size` above half the shorter image side.
    GridSizeTooLarge { value: u32, max: u32 },
    /// `smoothing_sigma` outside `0.5..=3.0` while smoothing is enabled.
    SigmaOutOfRange { value: f64 },
    /// `darkness_threshold` not a finite value in `0.0..=1.0`.
    ThresholdOutOfRange { value: f64 },
    /// `contrast_percentile` not satisfying `0 <= low < high <= 100`.
    InvalidPercentiles { low: f64, high: f64 },
    /// `gamma` not finite and positive.
    InvalidGamma { value: f64 },
    /// Unrecognized `brightness_mapping` name.
    UnknownMapping { name: String },
    /// `upscale_factor` not one of 1, 2, 4, 8.
    UnsupportedUpscale { value: u32 },
    /// `palette_size` of zero in color mode.
    PaletteSizeZero,
    /// Unrecognized `palette_strategy` name.
    UnknownStrategy { name: String },
    /// Upscaled output above `max_output_pixels`.
    OutputTooLarge {
        width: usize,
        height: usize,
        limit: usize,
    },
}

impl ConfigError {
    /// Name of the configuration field that failed validation.
    pub fn field(&self) -> &'static str {
        match self {
            ConfigError::NumColorsOutOfRange { .. } => "num_colors",
            ConfigError::GridSizeTooSmall { .. } | ConfigError::GridSizeTooLarge { .. } => {
                "grid_size"
            }
            ConfigError::SigmaOutOfRange { .. } => "smoothing_sigma",
            ConfigError::ThresholdOutOfRange { .. } => "darkness_threshold",
            ConfigError::InvalidPercentiles { .. } => "contrast_percentile",
            ConfigError::InvalidGamma { .. } => "gamma",
            ConfigError::UnknownMapping { .. } => "brightness_mapping",
            ConfigError::UnsupportedUpscale { .. } => "upscale_factor",
            ConfigError::PaletteSizeZero => "palette_size",
            ConfigError::UnknownStrategy { .. } => "palette_strategy",
            ConfigError::OutputTooLarge { .. } => "max_output_pixels",
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NumColorsOutOfRange { value } => {
                write!(f, "num_colors must be between 2 and 10, got {}", value)
            }
            ConfigError::GridSizeTooSmall { value } => {
                write!(f, "grid_size must be at least 4, got {}", value)
            }
            ConfigError::GridSizeTooLarge { value, max } => write!(
                f,
                "grid_size must be at most {} (half the shorter image side), got {}",
                max, value
            ),
            ConfigError::SigmaOutOfRange { value } => {
                write!(f, "smoothing_sigma must be between 0.5 and 3.0, got {}", value)
            }
            ConfigError::ThresholdOutOfRange { value } => {
                write!(f, "darkness_threshold must be between 0 and 1, got {}", value)
            }
            ConfigError::InvalidPercentiles { low, high } => write!(
                f,
                "contrast_percentile must satisfy 0 <= low < high <= 100, got ({}, {})",
                low, high
            ),
            ConfigError::InvalidGamma { value } => {
                write!(f, "gamma must be a positive number, got {}", value)
            }
            ConfigError::UnknownMapping { name } => write!(
                f,
                "unknown brightness_mapping '{}' (expected linear, logarithmic, exponential, sigmoid, power or adaptive)",
                name
            ),
            ConfigError::UnsupportedUpscale { value } => {
                write!(f, "upscale_factor must be 1, 2, 4 or 8, got {}", value)
            }
            ConfigError::PaletteSizeZero => write!(f, "palette_size must be at least 1"),
            ConfigError::UnknownStrategy { name } => write!(
                f,
                "unknown palette_strategy '{}' (expected median-cut or kmeans)",
                name
            ),
            ConfigError::OutputTooLarge {
                width,
                height,
                limit,
            } => write!(
                f,
                "output of {}x{} pixels exceeds the limit of {} pixels",
                width, height, limit
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
