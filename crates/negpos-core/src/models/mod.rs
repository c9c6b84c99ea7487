//! Data models for negpos
//!
//! Pixel storage and per-channel statistics shared by the decoders, the
//! pixel pipeline and the exporters.

mod buffer;
mod pixel;
mod range;

pub use buffer::PixelBuffer;
pub use pixel::{Channel, Pixel};
pub use range::{ChannelRange, ChannelRanges};
