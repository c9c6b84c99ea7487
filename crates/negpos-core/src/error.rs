//! Error types for negpos-core
//!
//! Every failure a single conversion job can hit maps onto one of a small
//! number of kinds:
//! - Decode: input file unreadable or in an unsupported layout
//! - Encode: output could not be written
//! - Precondition: the buffer or channel ranges violate the pipeline contract
//!
//! A degenerate channel range (min == max) is not an error.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use crate::models::Channel;

/// Coarse classification of a [`ConvertError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    Decode,
    Encode,
    Precondition,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Decode => "decode",
            ErrorKind::Encode => "encode",
            ErrorKind::Precondition => "precondition",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Failed to decode '{}': {message}", path.display())]
    Decode { path: PathBuf, message: String },

    #[error("Failed to encode '{}': {message}", path.display())]
    Encode { path: PathBuf, message: String },

    #[error("Image has no pixels ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },

    #[error("Invalid {channel} range: min {min} is greater than max {max}")]
    InvalidRange { channel: Channel, min: u8, max: u8 },

    #[error("Pixel buffer size mismatch: expected {expected}, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },
}

impl ConvertError {
    pub fn decode(path: impl AsRef<Path>, message: impl Into<String>) -> Self {
        Self::Decode {
            path: path.as_ref().to_path_buf(),
            message: message.into(),
        }
    }

    pub fn encode(path: impl AsRef<Path>, message: impl Into<String>) -> Self {
        Self::Encode {
            path: path.as_ref().to_path_buf(),
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Decode { .. } => ErrorKind::Decode,
            Self::Encode { .. } => ErrorKind::Encode,
            Self::EmptyImage { .. } | Self::InvalidRange { .. } | Self::BufferSizeMismatch { .. } => {
                ErrorKind::Precondition
            }
        }
    }

    /// True for contract violations that point at a decoder bug or corrupt input.
    pub fn is_precondition(&self) -> bool {
        self.kind() == ErrorKind::Precondition
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;
