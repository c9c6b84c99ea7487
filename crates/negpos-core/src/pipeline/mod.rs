//! Image processing pipeline
//!
//! Core pipeline for negative-to-positive conversion.
//!
//! This module is organized into submodules:
//! - `inversion`: 255-complement of the color channels
//! - `statistics`: per-channel min/max discovery
//! - `stretch`: per-channel linear remap onto the full 8-bit range
//! - `parallel`: threshold-based rayon dispatch shared by the passes

mod inversion;
mod parallel;
mod statistics;
mod stretch;


pub use inversion::{invert, invert_pixel};
pub use statistics::scan;
pub use stretch::{stretch, stretch_sample};

use crate::error::Result;
use crate::models::{ChannelRanges, PixelBuffer};

/// Minimum number of pixels to trigger parallel processing
pub(crate) const PARALLEL_THRESHOLD: usize = 30_000;

/// Execute the full processing pipeline in place: invert, measure, stretch.
///
/// The ranges are measured on the inverted buffer, never on the negative.
/// Returns the ranges that were used for the stretch.
pub fn process_image(image: &mut PixelBuffer) -> Result<ChannelRanges> {
    invert(image);

    let ranges = scan(image)?;
    stretch(image, &ranges)?;
    Ok(ranges)
}
