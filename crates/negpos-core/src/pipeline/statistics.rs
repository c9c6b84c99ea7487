//! Per-channel extremum discovery

use crate::error::{ConvertError, Result};
use crate::models::{ChannelRange, ChannelRanges, Pixel, PixelBuffer};

use super::parallel::parallel_fold_reduce;

/// Running min/max for the three color channels, reduced across workers.
#[derive(Debug, Clone, Copy)]
struct Extrema {
    min: [u8; 3],
    max: [u8; 3],
}

impl Extrema {
    /// Identity for [`Extrema::merge`]
    const EMPTY: Extrema = Extrema {
        min: [u8::MAX; 3],
        max: [u8::MIN; 3],
    };

    #[inline]
    fn add(mut self, pixel: &Pixel) -> Self {
        let samples = [pixel.red, pixel.green, pixel.blue];
        for (i, &v) in samples.iter().enumerate() {
            self.min[i] = self.min[i].min(v);
            self.max[i] = self.max[i].max(v);
        }
        self
    }

    #[inline]
    fn merge(mut self, other: Self) -> Self {
        for i in 0..3 {
            self.min[i] = self.min[i].min(other.min[i]);
            self.max[i] = self.max[i].max(other.max[i]);
        }
        self
    }

    fn into_ranges(self) -> ChannelRanges {
        let range = |i: usize| ChannelRange {
            min: self.min[i],
            max: self.max[i],
        };
        ChannelRanges {
            red: range(0),
            green: range(1),
            blue: range(2),
        }
    }
}

/// Measure the minimum and maximum of each color channel over the current
/// buffer contents. Alpha is ignored.
///
/// Fails with a precondition error if the buffer holds no pixels.
pub fn scan(image: &PixelBuffer) -> Result<ChannelRanges> {
    if image.is_empty() {
        return Err(ConvertError::EmptyImage {
            width: image.width(),
            height: image.height(),
        });
    }

    let extrema = parallel_fold_reduce(
        image.pixels(),
        || Extrema::EMPTY,
        Extrema::add,
        Extrema::merge,
    );

    Ok(extrema.into_ranges())
}
