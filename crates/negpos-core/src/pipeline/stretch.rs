//! Per-channel linear range stretch
//!
//! Maps each channel's observed `[min, max]` interval onto `[0, 255]` with
//! integer truncation, clipping samples outside the interval.

use crate::error::Result;
use crate::models::{ChannelRange, ChannelRanges, Pixel, PixelBuffer};

use super::parallel::parallel_for_each_mut;

/// Stretch one sample against its channel range.
///
/// A degenerate range (`min == max`) has no span to divide by and is handled
/// before the division: the single observed value maps to 0, anything above
/// it clips to 255 like any other sample past `max`.
#[inline]
pub fn stretch_sample(value: u8, range: ChannelRange) -> u8 {
    if range.is_degenerate() {
        return if value > range.max { u8::MAX } else { 0 };
    }
    if value <= range.min {
        return 0;
    }
    if value >= range.max {
        return u8::MAX;
    }

    let offset = u32::from(value - range.min);
    let span = u32::from(range.max - range.min);
    // offset < span, so the quotient stays below 255
    (offset * 255 / span) as u8
}

#[inline]
fn stretch_pixel(pixel: Pixel, ranges: &ChannelRanges) -> Pixel {
    Pixel {
        alpha: pixel.alpha,
        red: stretch_sample(pixel.red, ranges.red),
        green: stretch_sample(pixel.green, ranges.green),
        blue: stretch_sample(pixel.blue, ranges.blue),
    }
}

/// Stretch every pixel of the buffer in place using the given ranges.
///
/// Ranges are validated up front; an inverted range (`min > max`) is a
/// precondition error and leaves the buffer untouched.
pub fn stretch(image: &mut PixelBuffer, ranges: &ChannelRanges) -> Result<()> {
    ranges.validate()?;

    let ranges = *ranges;
    parallel_for_each_mut(image.pixels_mut(), |pixel| {
        *pixel = stretch_pixel(*pixel, &ranges)
    });
    Ok(())
}
