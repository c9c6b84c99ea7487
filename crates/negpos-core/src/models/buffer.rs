//! Owned pixel storage for one decoded image.

use crate::error::{ConvertError, Result};

use super::Pixel;

/// Decoded image data, row-major, one [`Pixel`] per position.
///
/// The buffer is owned by the job converting it and mutated in place by the
/// pipeline passes. `pixels.len() == width * height` always holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Pixel>,

    /// Whether the source carried an alpha channel. Sources without one
    /// decode as fully opaque and are exported without alpha.
    pub has_alpha: bool,
}

impl PixelBuffer {
    pub fn new(width: u32, height: u32, pixels: Vec<Pixel>, has_alpha: bool) -> Result<Self> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(ConvertError::BufferSizeMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
            has_alpha,
        })
    }

    /// A buffer with every position set to `pixel`
    pub fn filled(width: u32, height: u32, pixel: Pixel) -> Self {
        Self {
            width,
            height,
            pixels: vec![pixel; width as usize * height as usize],
            has_alpha: pixel.alpha != u8::MAX,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [Pixel] {
        &mut self.pixels
    }

}
