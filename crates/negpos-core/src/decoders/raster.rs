//! JPEG and BMP decoding through the `image` crate

use std::path::Path;

use crate::error::{ConvertError, Result};
use crate::models::{Pixel, PixelBuffer};

/// Decode a JPEG or BMP file
pub(crate) fn decode_raster(path: &Path) -> Result<PixelBuffer> {
    let decoded = image::ImageReader::open(path)
        .map_err(|e| ConvertError::decode(path, format!("Failed to open image file: {}", e)))?
        .with_guessed_format()
        .map_err(|e| ConvertError::decode(path, format!("Failed to detect image format: {}", e)))?
        .decode()
        .map_err(|e| ConvertError::decode(path, format!("Failed to decode image: {}", e)))?;

    let has_alpha = decoded.color().has_alpha();
    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();

    let pixels = rgba
        .pixels()
        .map(|p| Pixel::argb(p[3], p[0], p[1], p[2]))
        .collect();

    PixelBuffer::new(width, height, pixels, has_alpha)
}
