#![allow(clippy::manual_range_contains)]

//! halftone: halftone-circle rendering
//!
//! This library turns a raster image into a grid of filled circles whose
//! size encodes local brightness and, in color mode, whose fill is the
//! nearest entry of a palette extracted from the image.
//!
//! # Quick Start
//!
//! ```
//! use halftone::{BrightnessMapping, HalftoneEngine, PixelBuffer, PixelFormat, ProcessingConfig};
//!
//! let config = ProcessingConfig::new()
//!     .grid_size(8)
//!     .smoothing(1.0)
//!     .brightness_mapping(BrightnessMapping::Sigmoid);
//! let engine = HalftoneEngine::new(config).unwrap();
//!
//! let image = PixelBuffer::gray_from_fn(64, 48, |x, _| (x * 4) as u8);
//! let canvas = engine.process(&image).unwrap();
//!
//! assert_eq!(canvas.width(), 64);
//! assert_eq!(canvas.format(), PixelFormat::Gray);
//! ```
//!
//! # Pipeline
//!
//! 1. **Preprocess** ([`preprocess`]): optional Gaussian smoothing and
//!    percentile contrast stretch of the luma plane.
//! 2. **Grid** ([`grid`]): the shorter image side is divided into
//!    `divisions` cells of `floor(min(w, h) / divisions)` pixels; the grid
//!    tiles the whole image from the top-left corner.
//! 3. **Decide** ([`brightness`]): each cell's mean brightness, optionally
//!    blended with its 3x3 neighborhood, goes through the selected curve
//!    and the darkness threshold.
//! 4. **Draw** ([`output`]): a circle of diameter
//!    `floor(brightness * cell_size * 0.8)` is centered in the cell.
//! 5. **Invert** (optional): every sample becomes `255 - v`.
//!
//! In color mode ([`RenderMode::Color`]) a palette is extracted once from
//! the original image ([`palette`]) and each circle is filled with the
//! palette entry nearest to its cell's mean color.
//!
//! # Brightness Curves
//!
//! | name | curve |
//! |---|---|
//! | `linear` | identity |
//! | `logarithmic` | lifts shadows |
//! | `exponential` | compresses shadows, never reaches 0 |
//! | `sigmoid` | S-curve around 0.5 |
//! | `power` | `x^(1/gamma)` |
//! | `adaptive` | logarithmic in shadows, sigmoid in highlights, power between |
//!
//! # Determinism
//!
//! `process` is a pure function of its inputs. Palette subsampling uses a
//! fixed-seed generator, so the same image and configuration always give
//! the same output bytes.

pub mod api;
pub mod brightness;
pub mod config;
pub mod grid;
pub mod image;
pub mod output;
pub mod palette;
pub mod preprocess;


pub use api::{process, HalftoneEngine, HalftoneError, RenderReport};
pub use brightness::{BrightnessMapping, CurvePolicy, DEFAULT_GAMMA};
pub use config::{ConfigError, ProcessingConfig, RenderMode};
pub use image::{PixelBuffer, PixelFormat, Rgb};
pub use palette::{extract_palette, NearestColorCache, Palette, PaletteError, PaletteStrategy};
