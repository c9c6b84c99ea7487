//! negpos Core Library
//!
//! Core functionality for color negative to positive conversion: channel
//! inversion, per-channel range measurement and linear range stretch, plus
//! the decode/encode glue around them.

pub mod config;
pub mod decoders;
pub mod error;
pub mod exporters;
pub mod job;
pub mod models;
pub mod pipeline;

// Re-export commonly used types
pub use config::{load_config, ConfigHandle, ConvertConfig};
pub use error::{ConvertError, ErrorKind, Result};
pub use job::{ImageJob, JobError, JobReport, JobStage};
pub use models::{Channel, ChannelRange, ChannelRanges, Pixel, PixelBuffer};
pub use pipeline::process_image;
