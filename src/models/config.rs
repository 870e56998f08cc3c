use crate::assets::AssetLoader;
use crate::error::RenderError;
use crate::models::ProcessingParams;
use serde::Deserialize;
use std::collections::HashMap;

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    /// Parameters applied to every render
    #[serde(default)]
    pub defaults: ProcessingParams,

    /// Named parameter sets layered over the defaults
    #[serde(default)]
    pub presets: HashMap<String, ProcessingParams>,

    /// HTTP service settings
    #[serde(default)]
    pub server: ServerConfig,
}

/// Configuration for `stixis serve`
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Largest accepted request body in bytes
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,

    /// Largest rendered image in pixels (after upscaling)
    #[serde(default = "default_max_output_pixels")]
    pub max_output_pixels: usize,
}

fn default_max_upload_bytes() -> usize {
    16 * 1024 * 1024
}

fn default_max_output_pixels() -> usize {
    50_000_000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: default_max_upload_bytes(),
            max_output_pixels: default_max_output_pixels(),
        }
    }
}

impl AppConfig {
    /// Load configuration from AssetLoader (embedded or external)
    pub fn load_from_assets(loader: &AssetLoader) -> Self {
        match loader.read_config_string() {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    let config: Self = config;
                    tracing::info!(
                        presets = config.presets.len(),
                        max_upload_bytes = config.server.max_upload_bytes,
                        max_output_pixels = config.server.max_output_pixels,
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Layer defaults, the named preset and explicit overrides, in that order.
    pub fn resolve(
        &self,
        preset: Option<&str>,
        overrides: &ProcessingParams,
    ) -> Result<ProcessingParams, RenderError> {
        let mut params = self.defaults.clone();
        if let Some(name) = preset {
            let preset = self
                .presets
                .get(name)
                .ok_or_else(|| RenderError::UnknownPreset(name.to_string()))?;
            params = params.overlay(preset);
        }
        Ok(params.overlay(overrides))
    }

    /// Preset names, sorted
    pub fn preset_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.presets.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
