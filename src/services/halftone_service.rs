use halftone::{HalftoneEngine, PixelBuffer, ProcessingConfig, RenderReport};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::RenderError;
use crate::models::{AppConfig, ProcessingParams};
use crate::rendering::{decode_image, encode_png};
use crate::services::naming::{input_stem, output_filename};

/// A finished render: PNG bytes plus what the engine did.
#[derive(Debug, Clone)]
pub struct RenderedImage {
    pub png: Vec<u8>,
    pub report: RenderReport,
}

impl RenderedImage {
    pub fn width(&self) -> usize {
        self.report.width
    }

    pub fn height(&self) -> usize {
        self.report.height
    }
}

/// Run the engine on a decoded image and encode the result.
pub fn render_image(
    image: &PixelBuffer,
    config: &ProcessingConfig,
) -> Result<RenderedImage, RenderError> {
    let mapping = config.brightness_mapping;
    tracing::debug!(
        mapping = %mapping,
        curve = config.curve_policy.name(),
        gamma = mapping.uses_gamma().then_some(config.gamma),
        upscale = config.upscale_factor,
        "Rendering"
    );

    let engine = HalftoneEngine::new(config.clone())?;
    let (canvas, report) = engine.process_with_report(image)?;

    tracing::debug!(
        width = report.width,
        height = report.height,
        cell_size = report.cell_size,
        divisions = report.divisions,
        cells = report.cells,
        circles = report.circles_drawn,
        palette = report.palette.as_ref().map(|p| p.len()),
        "Rendered halftone"
    );

    let png = encode_png(&canvas)?;
    Ok(RenderedImage { png, report })
}

/// Decode, render and encode in one go.
pub fn render_bytes(bytes: &[u8], config: &ProcessingConfig) -> Result<RenderedImage, RenderError> {
    let image = decode_image(bytes)?;
    tracing::debug!(
        width = image.width(),
        height = image.height(),
        format = ?image.format(),
        "Decoded input"
    );
    render_image(&image, config)
}

/// Halftone rendering for the CLI and the HTTP handlers.
pub struct HalftoneService {
    config: Arc<AppConfig>,
}

impl HalftoneService {
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self { config }
    }

    pub fn app_config(&self) -> &AppConfig {
        &self.config
    }

    /// Engine configuration for a preset plus explicit overrides.
    ///
    /// Only image-independent constraints are checked here; the grid size
    /// is checked against the image during rendering.
    pub fn resolve_config(
        &self,
        preset: Option<&str>,
        overrides: &ProcessingParams,
    ) -> Result<ProcessingConfig, RenderError> {
        let params = self.config.resolve(preset, overrides)?;
        let config = params.to_config()?;
        config.validate()?;
        Ok(config)
    }

    /// Render upload bytes without blocking the async runtime.
    ///
    /// Output larger than `server.max_output_pixels` is refused before the
    /// engine allocates anything.
    pub async fn render(
        &self,
        bytes: Vec<u8>,
        config: ProcessingConfig,
    ) -> Result<RenderedImage, RenderError> {
        let config = config.max_output_pixels(self.config.server.max_output_pixels);
        tokio::task::spawn_blocking(move || render_bytes(&bytes, &config))
            .await
            .map_err(|e| RenderError::Task(e.to_string()))?
    }

    /// Render `input` into `output_dir` (created if missing) and return the
    /// written path.
    pub fn render_file(
        &self,
        input: &Path,
        output_dir: &Path,
        config: &ProcessingConfig,
    ) -> Result<PathBuf, RenderError> {
        let bytes = fs::read(input)?;
        let rendered = render_bytes(&bytes, config)?;

        fs::create_dir_all(output_dir)?;
        let path = output_dir.join(output_filename(&input_stem(input), config));
        fs::write(&path, &rendered.png)?;

        tracing::info!(
            input = %input.display(),
            output = %path.display(),
            circles = rendered.report.circles_drawn,
            "Wrote halftone image"
        );
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use halftone::{PixelFormat, RenderMode};

    fn service() -> HalftoneService {
        HalftoneService::new(Arc::new(AppConfig::default()))
    }

    #[test]
    fn test_render_image_reports_geometry() {
        let image = PixelBuffer::filled(40, 20, PixelFormat::Gray, 255);
        let rendered = render_image(&image, &ProcessingConfig::new().num_colors(4)).unwrap();

        assert_eq!((rendered.width(), rendered.height()), (40, 20));
        assert_eq!(rendered.report.cell_size, 5);
        assert_eq!(rendered.report.circles_drawn, 32);
        assert_eq!(&rendered.png[0..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_render_bytes_rejects_undecodable_input() {
        let err = render_bytes(b"GIF89a", &ProcessingConfig::default()).unwrap_err();
        assert!(matches!(err, RenderError::Decode(_)));
    }

    #[tokio::test]
    async fn test_render_refuses_oversized_output() {
        let mut config = AppConfig::default();
        config.server.max_output_pixels = 1000;
        let service = HalftoneService::new(Arc::new(config));
        let png = encode_png(&PixelBuffer::filled(20, 20, PixelFormat::Gray, 200)).unwrap();
        let base = service
            .resolve_config(None, &ProcessingParams::default())
            .unwrap();

        assert!(service.render(png.clone(), base.clone()).await.is_ok());

        let err = service
            .render(png, base.upscale_factor(2))
            .await
            .unwrap_err();
        assert!(err.is_client_error());
        assert!(
            err.to_string()
                .contains("output of 40x40 pixels exceeds the limit of 1000 pixels"),
            "{}",
            err
        );
    }

    #[test]
    fn test_resolve_config_validates() {
        let overrides = ProcessingParams {
            upscale_factor: Some(3),
            ..Default::default()
        };
        let err = service().resolve_config(None, &overrides).unwrap_err();
        assert!(err.is_client_error());
        assert!(err.to_string().contains("upscale_factor"));
    }

    #[test]
    fn test_resolve_config_applies_overrides() {
        let overrides = ProcessingParams {
            color: Some(true),
            palette_size: Some(4),
            ..Default::default()
        };
        let config = service().resolve_config(None, &overrides).unwrap();
        assert_eq!(config.mode, RenderMode::Color);
        assert_eq!(config.palette_size, 4);
    }
}
