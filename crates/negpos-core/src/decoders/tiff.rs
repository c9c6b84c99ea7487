//! TIFF image decoder

use std::path::Path;

use super::{pixels_from_samples, SampleLayout};
use crate::error::{ConvertError, Result};
use crate::models::PixelBuffer;

/// Decode a TIFF file
pub(crate) fn decode_tiff(path: &Path) -> Result<PixelBuffer> {
    use std::fs::File;
    use std::io::BufReader;
    use tiff::decoder::{DecodingResult, Limits};

    let file = File::open(path)
        .map_err(|e| ConvertError::decode(path, format!("Failed to open TIFF file: {}", e)))?;

    // Configure limits for large film scans (up to 1GB uncompressed)
    let mut limits = Limits::default();
    limits.decoding_buffer_size = 1024 * 1024 * 1024;
    limits.ifd_value_size = 1024 * 1024 * 1024;
    limits.intermediate_buffer_size = 1024 * 1024 * 1024;

    let mut decoder = tiff::decoder::Decoder::new(BufReader::new(file))
        .map_err(|e| {
            ConvertError::decode(path, format!("Failed to create TIFF decoder: {}", e))
        })?
        .with_limits(limits);

    let (width, height) = decoder.dimensions().map_err(|e| {
        ConvertError::decode(path, format!("Failed to get TIFF dimensions: {}", e))
    })?;

    let color_type = decoder.colortype().map_err(|e| {
        ConvertError::decode(path, format!("Failed to get TIFF color type: {}", e))
    })?;

    let layout = match color_type {
        tiff::ColorType::Gray(_) => SampleLayout::Gray,
        tiff::ColorType::GrayA(_) => SampleLayout::GrayAlpha,
        tiff::ColorType::RGB(_) => SampleLayout::Rgb,
        tiff::ColorType::RGBA(_) => SampleLayout::Rgba,
        tiff::ColorType::CMYK(_) => {
            return Err(ConvertError::decode(path, "CMYK color type not supported"))
        }
        tiff::ColorType::Palette(_) => {
            return Err(ConvertError::decode(path, "Palette color type not supported"))
        }
        other => {
            return Err(ConvertError::decode(
                path,
                format!("Unsupported TIFF color type: {:?}", other),
            ))
        }
    };

    let image_data = decoder.read_image().map_err(|e| {
        ConvertError::decode(path, format!("Failed to read TIFF image data: {}", e))
    })?;

    let samples = match image_data {
        DecodingResult::U8(buf) => buf,
        DecodingResult::U16(buf) => reduce_samples(&buf),
        DecodingResult::U32(buf) => reduce_samples(&buf),
        DecodingResult::U64(buf) => reduce_samples(&buf),
        DecodingResult::F32(buf) => reduce_samples(&buf),
        DecodingResult::F64(buf) => reduce_samples(&buf),
        _ => {
            return Err(ConvertError::decode(
                path,
                "Signed integer and half-float TIFF formats not supported",
            ))
        }
    };

    pixels_from_samples(path, &samples, width, height, layout)
}

/// Trait for TIFF sample types that can be reduced to 8 bits
trait TiffValue: Copy {
    fn to_u8(self) -> u8;
}

impl TiffValue for u16 {
    #[inline]
    fn to_u8(self) -> u8 {
        (self >> 8) as u8
    }
}

impl TiffValue for u32 {
    #[inline]
    fn to_u8(self) -> u8 {
        (self >> 24) as u8
    }
}

impl TiffValue for u64 {
    #[inline]
    fn to_u8(self) -> u8 {
        (self >> 56) as u8
    }
}

impl TiffValue for f32 {
    #[inline]
    fn to_u8(self) -> u8 {
        (self.clamp(0.0, 1.0) * 255.0).round() as u8
    }
}

impl TiffValue for f64 {
    #[inline]
    fn to_u8(self) -> u8 {
        (self.clamp(0.0, 1.0) * 255.0).round() as u8
    }
}

fn reduce_samples<T: TiffValue>(buf: &[T]) -> Vec<u8> {
    buf.iter().map(|&v| v.to_u8()).collect()
}
