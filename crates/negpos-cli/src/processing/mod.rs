//! Image discovery and batch processing.

mod batch;
mod input;


pub use batch::{run_batch, BatchReport, JobFailure, JobSummary};
pub use input::{
    collect_images, determine_output_path, is_supported_image, OUTPUT_PREFIX,
    SUPPORTED_EXTENSIONS,
};
