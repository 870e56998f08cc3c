//! HalftoneEngine -- the entry point that wires the pipeline together.
//!
//! [`HalftoneEngine`] owns a validated [`ProcessingConfig`] and turns decoded
//! images into halftone canvases. It holds no per-image state, so one engine
//! can process any number of images.

use super::error::HalftoneError;
use crate::brightness::BrightnessMapper;
use crate::config::{ProcessingConfig, RenderMode};
use crate::grid::{mean_rgb, RegionStats, RenderContext};
use crate::image::{upscale_bilinear, PixelBuffer, Rgb};
use crate::output::{draw_circle, OutputCanvas};
use crate::palette::{extract_palette, NearestColorCache, Palette};
use crate::preprocess::preprocess;

/// What one `process` call did.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderReport {
    /// Output width in pixels (after upscaling).
    pub width: usize,
    /// Output height in pixels (after upscaling).
    pub height: usize,
    /// Resolved cell size in output pixels.
    pub cell_size: usize,
    /// Grid divisions along the shorter side.
    pub divisions: usize,
    /// Cells visited.
    pub cells: usize,
    /// Circles with a non-zero diameter.
    pub circles_drawn: usize,
    /// Palette used in color mode.
    pub palette: Option<Palette>,
}

/// Halftone-circle renderer.
///
/// # Pipeline
///
/// 1. Validate the configuration against the image size
/// 2. Flatten alpha against black, derive the luma plane
/// 3. Smooth and contrast-stretch the luma plane (if enabled)
/// 4. Extract the palette from the original-resolution RGB plane (color mode)
/// 5. Resolve the [`RenderContext`] and upscale the planes
/// 6. For every cell: decide, size and draw its circle
/// 7. Invert the canvas (if enabled)
///
/// # Example
///
/// ```
/// use halftone::{HalftoneEngine, PixelBuffer, PixelFormat, ProcessingConfig};
///
/// let engine = HalftoneEngine::new(ProcessingConfig::new().num_colors(4)).unwrap();
/// let image = PixelBuffer::filled(40, 40, PixelFormat::Gray, 255);
///
/// let (canvas, report) = engine.process_with_report(&image).unwrap();
/// assert_eq!(canvas.width(), 40);
/// assert_eq!(report.cell_size, 10);
/// assert_eq!(report.circles_drawn, 16);
/// ```
#[derive(Debug, Clone)]
pub struct HalftoneEngine {
    config: ProcessingConfig,
    mapper: BrightnessMapper,
}

impl HalftoneEngine {
    /// Create an engine, validating every image-independent constraint.
    ///
    /// # Errors
    ///
    /// [`HalftoneError::Config`] naming the first invalid field.
    pub fn new(config: ProcessingConfig) -> Result<Self, HalftoneError> {
        config.validate()?;
        let mapper = BrightnessMapper::new(
            config.brightness_mapping,
            config.gamma,
            config.darkness_threshold,
            config.smoothing,
            config.curve_policy,
        );
        Ok(Self { config, mapper })
    }

    pub fn config(&self) -> &ProcessingConfig {
        &self.config
    }

    /// Render `image` into a new canvas.
    ///
    /// Grayscale mode returns a Gray buffer, color mode an RGB buffer, both
    /// `upscale_factor` times the input size.
    pub fn process(&self, image: &PixelBuffer) -> Result<PixelBuffer, HalftoneError> {
        self.process_with_report(image).map(|(canvas, _)| canvas)
    }

    /// Like [`process`](Self::process), also returning a [`RenderReport`].
    pub fn process_with_report(
        &self,
        image: &PixelBuffer,
    ) -> Result<(PixelBuffer, RenderReport), HalftoneError> {
        let config = &self.config;
        let (width, height) = (image.width(), image.height());
        if width == 0 || height == 0 {
            return Err(HalftoneError::DegenerateInput { width, height });
        }
        config.validate_for(width, height)?;

        let ctx = RenderContext::new(
            width,
            height,
            config.divisions() as usize,
            config.upscale_factor as usize,
        )?;

        let flat = image.flatten_alpha();
        let gray = preprocess(&flat.to_luma(), config);
        let gray = upscale_bilinear(&gray, ctx.upscale_factor);

        let color = match config.mode {
            RenderMode::Grayscale => None,
            RenderMode::Color => {
                let rgb = flat.to_rgb();
                let palette = extract_palette(
                    &rgb,
                    config.palette_size as usize,
                    config.palette_strategy,
                );
                Some((upscale_bilinear(&rgb, ctx.upscale_factor), palette))
            }
        };

        let mut canvas = OutputCanvas::new(ctx.width, ctx.height, config.mode);
        let mut report = RenderReport {
            width: ctx.width,
            height: ctx.height,
            cell_size: ctx.cell_size,
            divisions: ctx.divisions,
            cells: 0,
            circles_drawn: 0,
            palette: None,
        };

        {
            let mut cache = color.as_ref().map(|(_, palette)| NearestColorCache::new(palette));

            for cell in ctx.cells() {
                report.cells += 1;
                let brightness = RegionStats::of(&gray, cell.region).mean;
                let neighborhood = if config.smoothing {
                    RegionStats::of(&gray, ctx.neighborhood(&cell))
                } else {
                    RegionStats::default()
                };

                let decision = self.mapper.decide(brightness, neighborhood);
                let diameter = decision.diameter(ctx.cell_size);
                if diameter == 0 {
                    continue;
                }

                let fill = match (&color, cache.as_mut()) {
                    (Some((rgb, _)), Some(cache)) => cache.nearest(mean_rgb(rgb, cell.region)),
                    _ => Rgb::WHITE,
                };
                let (cx, cy) = cell.center(ctx.cell_size);
                draw_circle(&mut canvas, cx, cy, diameter, fill);
                report.circles_drawn += 1;
            }
        }

        if config.invert {
            canvas.invert();
        }
        report.palette = color.map(|(_, palette)| palette);
        Ok((canvas.into_buffer(), report))
    }
}

/// One-shot `process(image, config)`.
///
/// Equivalent to `HalftoneEngine::new(config.clone())?.process(image)`.
pub fn process(image: &PixelBuffer, config: &ProcessingConfig) -> Result<PixelBuffer, HalftoneError> {
    HalftoneEngine::new(config.clone())?.process(image)
}
