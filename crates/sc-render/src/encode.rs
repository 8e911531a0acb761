//! Raster → encoded image bytes.

use image::buffer::ConvertBuffer;
use image::{RgbImage, RgbaImage};
use sc_core::{ExportError, ImageFormat};
use std::io::Cursor;

/// Encode an RGBA buffer into `format`.
///
/// JPEG has no alpha channel, so the buffer is flattened to RGB first; the
/// surface is always opaque, which makes the conversion lossless apart from
/// JPEG's own compression.
pub fn encode_rgba(image: &RgbaImage, format: ImageFormat) -> Result<Vec<u8>, ExportError> {
    let mut out = Cursor::new(Vec::new());
    let result = match format {
        ImageFormat::Png => image.write_to(&mut out, image::ImageFormat::Png),
        ImageFormat::Bmp => image.write_to(&mut out, image::ImageFormat::Bmp),
        ImageFormat::Jpeg => {
            let rgb: RgbImage = image.convert();
            rgb.write_to(&mut out, image::ImageFormat::Jpeg)
        }
    };
    result.map_err(|e| ExportError::Encode(e.to_string()))?;

    let bytes = out.into_inner();
    log::debug!(
        "encoded {}x{} surface as {format} ({} bytes)",
        image.width(),
        image.height(),
        bytes.len()
    );
    Ok(bytes)
}
