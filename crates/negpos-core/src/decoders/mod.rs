//! Image decoders for various formats
//!
//! Support for TIFF, PNG, JPEG and BMP files. Every decoder produces an 8-bit
//! ARGB [`PixelBuffer`]: grayscale sources are expanded to R = G = B, deeper
//! samples are reduced to 8 bits and sources without alpha come out opaque.

mod png;
mod raster;
mod tiff;


use std::path::Path;

use crate::error::{ConvertError, Result};
use crate::models::{Pixel, PixelBuffer};

/// Decode an image from a file path
pub fn decode_image<P: AsRef<Path>>(path: P) -> Result<PixelBuffer> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .ok_or_else(|| ConvertError::decode(path, "No file extension found"))?;

    match extension.as_str() {
        "tif" | "tiff" => tiff::decode_tiff(path),
        "png" => png::decode_png(path),
        "jpg" | "jpeg" | "bmp" => raster::decode_raster(path),
        _ => Err(ConvertError::decode(
            path,
            format!("Unsupported file format: {}", extension),
        )),
    }
}

/// Interleaved sample layout of a decoded 8-bit frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SampleLayout {
    Gray,
    GrayAlpha,
    Rgb,
    Rgba,
}

impl SampleLayout {
    pub(crate) fn channels(self) -> usize {
        match self {
            SampleLayout::Gray => 1,
            SampleLayout::GrayAlpha => 2,
            SampleLayout::Rgb => 3,
            SampleLayout::Rgba => 4,
        }
    }

    pub(crate) fn has_alpha(self) -> bool {
        matches!(self, SampleLayout::GrayAlpha | SampleLayout::Rgba)
    }
}

/// Build a pixel buffer from interleaved 8-bit samples.
///
/// Fails with a decode error when the sample count does not match
/// `width * height * channels`.
pub(crate) fn pixels_from_samples(
    path: &Path,
    samples: &[u8],
    width: u32,
    height: u32,
    layout: SampleLayout,
) -> Result<PixelBuffer> {
    let channels = layout.channels();
    let expected_len = width as usize * height as usize * channels;
    if samples.len() != expected_len {
        return Err(ConvertError::decode(
            path,
            format!(
                "Buffer size mismatch: expected {}, got {}",
                expected_len,
                samples.len()
            ),
        ));
    }

    let pixels = samples
        .chunks_exact(channels)
        .map(|s| match layout {
            SampleLayout::Gray => Pixel::rgb(s[0], s[0], s[0]),
            SampleLayout::GrayAlpha => Pixel::argb(s[1], s[0], s[0], s[0]),
            SampleLayout::Rgb => Pixel::rgb(s[0], s[1], s[2]),
            SampleLayout::Rgba => Pixel::argb(s[3], s[0], s[1], s[2]),
        })
        .collect();

    PixelBuffer::new(width, height, pixels, layout.has_alpha())
}
