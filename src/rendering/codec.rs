//! Image codec boundary.
//!
//! Uploads and input files are decoded with the `image` crate into the
//! engine's [`PixelBuffer`]; finished canvases are written with the `png`
//! crate as 8-bit grayscale or RGB.

use halftone::{PixelBuffer, PixelFormat};
use std::io::Cursor;
use std::path::Path;

use crate::error::RenderError;

/// File extensions accepted for input images (lowercase)
pub const ALLOWED_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Lowercased extension of `filename`, if it has one.
pub fn extension(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty())
        .map(str::to_ascii_lowercase)
}

/// Whether `filename` carries one of [`ALLOWED_EXTENSIONS`] (case-insensitive).
pub fn is_allowed_file(filename: &str) -> bool {
    extension(filename).is_some_and(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()))
}

/// Decode PNG or JPEG bytes.
///
/// Images with an alpha channel come back as [`PixelFormat::Rgba`], luma
/// images as [`PixelFormat::Gray`], everything else as [`PixelFormat::Rgb`].
/// Samples wider than 8 bits are reduced to 8.
pub fn decode_image(bytes: &[u8]) -> Result<PixelBuffer, RenderError> {
    let img = image::load_from_memory(bytes).map_err(|e| RenderError::Decode(e.to_string()))?;
    let color = img.color();
    let (width, height) = (img.width() as usize, img.height() as usize);

    let (format, data) = if color.has_alpha() {
        (PixelFormat::Rgba, img.into_rgba8().into_raw())
    } else if !color.has_color() {
        (PixelFormat::Gray, img.into_luma8().into_raw())
    } else {
        (PixelFormat::Rgb, img.into_rgb8().into_raw())
    };

    tracing::trace!(width, height, ?format, "Decoded image");
    Ok(PixelBuffer::from_raw(width, height, format, data)?)
}

/// Encode a canvas as an 8-bit PNG in its own color type.
pub fn encode_png(buffer: &PixelBuffer) -> Result<Vec<u8>, RenderError> {
    let color_type = match buffer.format() {
        PixelFormat::Gray => png::ColorType::Grayscale,
        PixelFormat::Rgb => png::ColorType::Rgb,
        PixelFormat::Rgba => png::ColorType::Rgba,
    };
    let width = u32::try_from(buffer.width())
        .map_err(|_| RenderError::PngEncode(format!("width {} too large", buffer.width())))?;
    let height = u32::try_from(buffer.height())
        .map_err(|_| RenderError::PngEncode(format!("height {} too large", buffer.height())))?;

    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(color_type);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Default);
        let mut writer = encoder
            .write_header()
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(buffer.data())
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
        writer
            .finish()
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
    }

    Ok(buf.into_inner())
}
