use halftone::{
    BrightnessMapping, ConfigError, CurvePolicy, PaletteStrategy, ProcessingConfig, RenderMode,
};
use serde::{Deserialize, Serialize};

/// Processing parameters as they appear in config.yaml, CLI flags and
/// upload forms.
///
/// Every field is optional so parameter sets can be layered with
/// [`overlay`](Self::overlay); unset fields fall back to the engine defaults
/// in [`to_config`](Self::to_config).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_colors: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub smoothing: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub smoothing_sigma: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub darkness_threshold: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enhance_contrast: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contrast_low: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contrast_high: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invert: Option<bool>,
    /// Curve name, e.g. `linear` or `sigmoid`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brightness_mapping: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gamma: Option<f64>,
    /// Apply the curve even without smoothing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub curve_always: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upscale_factor: Option<u32>,
    /// Color mode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub palette_size: Option<u32>,
    /// `median-cut` or `kmeans`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub palette_strategy: Option<String>,
}

impl ProcessingParams {
    /// `self` with every field that is set in `top` replaced.
    pub fn overlay(&self, top: &ProcessingParams) -> ProcessingParams {
        ProcessingParams {
            num_colors: top.num_colors.or(self.num_colors),
            grid_size: top.grid_size.or(self.grid_size),
            smoothing: top.smoothing.or(self.smoothing),
            smoothing_sigma: top.smoothing_sigma.or(self.smoothing_sigma),
            darkness_threshold: top.darkness_threshold.or(self.darkness_threshold),
            enhance_contrast: top.enhance_contrast.or(self.enhance_contrast),
            contrast_low: top.contrast_low.or(self.contrast_low),
            contrast_high: top.contrast_high.or(self.contrast_high),
            invert: top.invert.or(self.invert),
            brightness_mapping: top
                .brightness_mapping
                .clone()
                .or_else(|| self.brightness_mapping.clone()),
            gamma: top.gamma.or(self.gamma),
            curve_always: top.curve_always.or(self.curve_always),
            upscale_factor: top.upscale_factor.or(self.upscale_factor),
            color: top.color.or(self.color),
            palette_size: top.palette_size.or(self.palette_size),
            palette_strategy: top
                .palette_strategy
                .clone()
                .or_else(|| self.palette_strategy.clone()),
        }
    }

    /// Resolve into an engine configuration.
    ///
    /// Curve and strategy names are parsed strictly; numeric ranges are left
    /// to the engine's own validation.
    pub fn to_config(&self) -> Result<ProcessingConfig, ConfigError> {
        let mut config = ProcessingConfig::new();

        if let Some(n) = self.num_colors {
            config.num_colors = n;
        }
        config.grid_size = self.grid_size;
        config.smoothing = self.smoothing.unwrap_or(false);
        if let Some(sigma) = self.smoothing_sigma {
            config.smoothing_sigma = sigma;
        }
        if let Some(threshold) = self.darkness_threshold {
            config.darkness_threshold = threshold;
        }
        config.enhance_contrast = self.enhance_contrast.unwrap_or(false);
        let (low, high) = config.contrast_percentile;
        config.contrast_percentile = (
            self.contrast_low.unwrap_or(low),
            self.contrast_high.unwrap_or(high),
        );
        config.invert = self.invert.unwrap_or(false);
        if let Some(ref name) = self.brightness_mapping {
            config.brightness_mapping = name.parse::<BrightnessMapping>()?;
        }
        if let Some(gamma) = self.gamma {
            config.gamma = gamma;
        }
        if self.curve_always.unwrap_or(false) {
            config.curve_policy = CurvePolicy::Always;
        }
        if let Some(factor) = self.upscale_factor {
            config.upscale_factor = factor;
        }
        if self.color.unwrap_or(false) {
            config.mode = RenderMode::Color;
        }
        if let Some(k) = self.palette_size {
            config.palette_size = k;
        }
        if let Some(ref name) = self.palette_strategy {
            config.palette_strategy = name.parse::<PaletteStrategy>()?;
        }

        Ok(config)
    }
}
