//! Negative-to-positive channel inversion
//!
//! Each color sample is replaced by its 255-complement. Alpha passes through.

use crate::models::{Pixel, PixelBuffer};

use super::parallel::parallel_for_each_mut;

/// Invert a single pixel's color channels
#[inline]
pub fn invert_pixel(pixel: Pixel) -> Pixel {
    Pixel {
        alpha: pixel.alpha,
        red: u8::MAX - pixel.red,
        green: u8::MAX - pixel.green,
        blue: u8::MAX - pixel.blue,
    }
}

/// Invert every pixel of the buffer in place
pub fn invert(image: &mut PixelBuffer) {
    parallel_for_each_mut(image.pixels_mut(), |pixel| *pixel = invert_pixel(*pixel));
}
