//! Shared utilities for negpos-cli
//!
//! Input discovery, output naming and the parallel batch runner used by the
//! `negpos` binary.

pub mod processing;

// Re-export commonly used items at the crate root for convenience
pub use processing::{
    collect_images, determine_output_path, is_supported_image, run_batch, BatchReport,
    JobFailure, JobSummary, OUTPUT_PREFIX, SUPPORTED_EXTENSIONS,
};
