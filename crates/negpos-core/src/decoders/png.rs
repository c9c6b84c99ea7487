//! PNG image decoder

use std::path::Path;

use super::{pixels_from_samples, SampleLayout};
use crate::error::{ConvertError, Result};
use crate::models::PixelBuffer;

/// Decode a PNG file
pub(crate) fn decode_png(path: &Path) -> Result<PixelBuffer> {
    use std::fs::File;
    use std::io::BufReader;

    let file = File::open(path)
        .map_err(|e| ConvertError::decode(path, format!("Failed to open PNG file: {}", e)))?;
    let mut decoder = png::Decoder::new(BufReader::new(file));
    // Palette and sub-byte depths come out as plain 8-bit channels
    decoder.set_transformations(png::Transformations::EXPAND);
    let mut reader = decoder
        .read_info()
        .map_err(|e| ConvertError::decode(path, format!("Failed to read PNG info: {}", e)))?;

    let (color_type, bit_depth) = reader.output_color_type();

    let buffer_size = reader
        .output_buffer_size()
        .ok_or_else(|| ConvertError::decode(path, "Failed to determine PNG buffer size"))?;
    let mut buf = vec![0u8; buffer_size];
    let frame_info = reader
        .next_frame(&mut buf)
        .map_err(|e| ConvertError::decode(path, format!("Failed to read PNG frame: {}", e)))?;

    let bytes = &buf[..frame_info.buffer_size()];

    let layout = match color_type {
        png::ColorType::Grayscale => SampleLayout::Gray,
        png::ColorType::GrayscaleAlpha => SampleLayout::GrayAlpha,
        png::ColorType::Rgb => SampleLayout::Rgb,
        png::ColorType::Rgba => SampleLayout::Rgba,
        png::ColorType::Indexed => {
            return Err(ConvertError::decode(path, "Indexed PNG was not expanded"));
        }
    };

    match bit_depth {
        png::BitDepth::Eight => {
            pixels_from_samples(path, bytes, frame_info.width, frame_info.height, layout)
        }
        png::BitDepth::Sixteen => {
            // PNG 16-bit is big-endian; the first byte is the high byte
            let samples: Vec<u8> = bytes.chunks_exact(2).map(|pair| pair[0]).collect();
            pixels_from_samples(path, &samples, frame_info.width, frame_info.height, layout)
        }
        other => Err(ConvertError::decode(
            path,
            format!("Unsupported PNG bit depth: {:?}", other),
        )),
    }
}
