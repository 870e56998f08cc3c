//! Processing configuration.
//!
//! [`ProcessingConfig`] is an immutable value once handed to the engine.
//! Fields are public for inspection; the builder methods are the intended
//! way to set them.

use super::error::ConfigError;
use crate::brightness::{BrightnessMapping, CurvePolicy, DEFAULT_GAMMA};
use crate::palette::PaletteStrategy;

/// Accepted range for `num_colors` when it drives the grid.
pub const NUM_COLORS_RANGE: (u32, u32) = (2, 10);
/// Smallest explicit grid division count.
pub const MIN_GRID_SIZE: u32 = 4;
/// Accepted smoothing sigma range.
pub const SIGMA_RANGE: (f64, f64) = (0.5, 3.0);
/// Supported integer upscale factors.
pub const UPSCALE_FACTORS: [u32; 4] = [1, 2, 4, 8];

/// Output flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Single-channel output, circles filled with 255.
    #[default]
    Grayscale,
    /// RGB output, circles filled with their cell's nearest palette color.
    Color,
}

/// Configuration for one halftone transform.
///
/// # Defaults
///
/// - `num_colors`: 5, no explicit `grid_size`
/// - smoothing off (sigma 1.5 when enabled)
/// - `darkness_threshold`: 0.1
/// - contrast stretch off, percentiles (2, 98)
/// - no inversion, linear mapping, gamma 2.2
/// - no upscaling, grayscale mode, palette of 8 via median cut
///
/// # Example
///
/// ```
/// use halftone::{BrightnessMapping, ProcessingConfig};
///
/// let config = ProcessingConfig::new()
///     .grid_size(16)
///     .smoothing(1.5)
///     .brightness_mapping(BrightnessMapping::Adaptive)
///     .upscale_factor(2);
///
/// assert_eq!(config.divisions(), 16);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessingConfig {
    /// Tone count; also the grid divisions when `grid_size` is `None`.
    pub num_colors: u32,
    /// Explicit grid divisions along the shorter side.
    pub grid_size: Option<u32>,
    /// Gaussian smoothing and the neighborhood heuristic.
    pub smoothing: bool,
    /// Gaussian sigma for the first smoothing pass.
    pub smoothing_sigma: f64,
    /// Minimum mapped brightness for a circle to be drawn.
    pub darkness_threshold: f64,
    /// Percentile contrast stretch.
    pub enhance_contrast: bool,
    /// `(low, high)` percentiles mapped to black and white.
    pub contrast_percentile: (f64, f64),
    /// Invert the finished canvas.
    pub invert: bool,
    /// Brightness curve.
    pub brightness_mapping: BrightnessMapping,
    /// Exponent denominator for power/adaptive curves.
    pub gamma: f64,
    /// Where the curve applies.
    pub curve_policy: CurvePolicy,
    /// Integer upscale factor (1, 2, 4 or 8).
    pub upscale_factor: u32,
    /// Grayscale or color output.
    pub mode: RenderMode,
    /// Palette entries in color mode.
    pub palette_size: u32,
    /// Palette extraction algorithm in color mode.
    pub palette_strategy: PaletteStrategy,
    /// Upper bound on output pixels (after upscaling); `None` is unbounded.
    pub max_output_pixels: Option<usize>,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            num_colors: 5,
            grid_size: None,
            smoothing: false,
            smoothing_sigma: 1.5,
            darkness_threshold: 0.1,
            enhance_contrast: false,
            contrast_percentile: (2.0, 98.0),
            invert: false,
            brightness_mapping: BrightnessMapping::Linear,
            gamma: DEFAULT_GAMMA,
            curve_policy: CurvePolicy::SmoothedOnly,
            upscale_factor: 1,
            mode: RenderMode::Grayscale,
            palette_size: 8,
            palette_strategy: PaletteStrategy::MedianCut,
            max_output_pixels: None,
        }
    }
}

impl ProcessingConfig {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the tone count (also the divisions unless `grid_size` is set).
    #[inline]
    pub fn num_colors(mut self, n: u32) -> Self {
        self.num_colors = n;
        self
    }

    /// Set explicit grid divisions along the shorter side.
    #[inline]
    pub fn grid_size(mut self, divisions: u32) -> Self {
        self.grid_size = Some(divisions);
        self
    }

    /// Enable smoothing with the given sigma.
    #[inline]
    pub fn smoothing(mut self, sigma: f64) -> Self {
        self.smoothing = true;
        self.smoothing_sigma = sigma;
        self
    }

    #[inline]
    pub fn darkness_threshold(mut self, threshold: f64) -> Self {
        self.darkness_threshold = threshold;
        self
    }

    /// Enable the percentile contrast stretch.
    #[inline]
    pub fn enhance_contrast(mut self, low: f64, high: f64) -> Self {
        self.enhance_contrast = true;
        self.contrast_percentile = (low, high);
        self
    }

    #[inline]
    pub fn invert(mut self, invert: bool) -> Self {
        self.invert = invert;
        self
    }

    #[inline]
    pub fn brightness_mapping(mut self, mapping: BrightnessMapping) -> Self {
        self.brightness_mapping = mapping;
        self
    }

    #[inline]
    pub fn gamma(mut self, gamma: f64) -> Self {
        self.gamma = gamma;
        self
    }

    #[inline]
    pub fn curve_policy(mut self, policy: CurvePolicy) -> Self {
        self.curve_policy = policy;
        self
    }

    #[inline]
    pub fn upscale_factor(mut self, factor: u32) -> Self {
        self.upscale_factor = factor;
        self
    }

    /// Switch to color mode with a palette of `palette_size` entries.
    #[inline]
    pub fn color(mut self, palette_size: u32) -> Self {
        self.mode = RenderMode::Color;
        self.palette_size = palette_size;
        self
    }

    #[inline]
    pub fn palette_strategy(mut self, strategy: PaletteStrategy) -> Self {
        self.palette_strategy = strategy;
        self
    }

    /// Refuse images whose upscaled output exceeds `limit` pixels.
    #[inline]
    pub fn max_output_pixels(mut self, limit: usize) -> Self {
        self.max_output_pixels = Some(limit);
        self
    }

    /// Output dimensions for an original image of `width` x `height`.
    #[inline]
    pub fn output_size(&self, width: usize, height: usize) -> (usize, usize) {
        let factor = self.upscale_factor.max(1) as usize;
        (width.saturating_mul(factor), height.saturating_mul(factor))
    }

    /// Grid divisions along the shorter side: `grid_size`, else `num_colors`.
    #[inline]
    pub fn divisions(&self) -> u32 {
        self.grid_size.unwrap_or(self.num_colors)
    }

    /// Validate every constraint that does not depend on the image.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.grid_size {
            None => {
                let (lo, hi) = NUM_COLORS_RANGE;
                if !(lo..=hi).contains(&self.num_colors) {
                    return Err(ConfigError::NumColorsOutOfRange {
                        value: self.num_colors,
                    });
                }
            }
            Some(g) if g < MIN_GRID_SIZE => {
                return Err(ConfigError::GridSizeTooSmall { value: g });
            }
            Some(_) => {}
        }

        if self.smoothing {
            let (lo, hi) = SIGMA_RANGE;
            if !(lo..=hi).contains(&self.smoothing_sigma) {
                return Err(ConfigError::SigmaOutOfRange {
                    value: self.smoothing_sigma,
                });
            }
        }

        if !(0.0..=1.0).contains(&self.darkness_threshold) {
            return Err(ConfigError::ThresholdOutOfRange {
                value: self.darkness_threshold,
            });
        }

        if self.enhance_contrast {
            let (low, high) = self.contrast_percentile;
            if !(0.0..=100.0).contains(&low) || !(0.0..=100.0).contains(&high) || low >= high {
                return Err(ConfigError::InvalidPercentiles { low, high });
            }
        }

        if !(self.gamma.is_finite() && self.gamma > 0.0) {
            return Err(ConfigError::InvalidGamma { value: self.gamma });
        }

        if !UPSCALE_FACTORS.contains(&self.upscale_factor) {
            return Err(ConfigError::UnsupportedUpscale {
                value: self.upscale_factor,
            });
        }

        if self.mode == RenderMode::Color && self.palette_size == 0 {
            return Err(ConfigError::PaletteSizeZero);
        }

        Ok(())
    }

    /// Validate against a concrete image size.
    ///
    /// Adds the upper bound for an explicit `grid_size`: half the shorter
    /// side of the original image.
    pub fn validate_for(&self, width: usize, height: usize) -> Result<(), ConfigError> {
        self.validate()?;
        if let Some(g) = self.grid_size {
            let max = (width.min(height) / 2).min(u32::MAX as usize) as u32;
            if g > max {
                return Err(ConfigError::GridSizeTooLarge { value: g, max });
            }
        }
        if let Some(limit) = self.max_output_pixels {
            let (w, h) = self.output_size(width, height);
            if w.saturating_mul(h) > limit {
                return Err(ConfigError::OutputTooLarge {
                    width: w,
                    height: h,
                    limit,
                });
            }
        }
        Ok(())
    }
}
