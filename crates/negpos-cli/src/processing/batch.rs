//! Parallel batch conversion: one job per input file.

use rayon::prelude::*;
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use log::{info, warn};
use negpos_core::{
    ChannelRanges, ConvertError, ErrorKind, ImageJob, JobError, JobReport, JobStage,
};

use super::input::determine_output_path;

/// A converted file, as recorded in the batch report
#[derive(Debug, Clone, Serialize)]
pub struct JobSummary {
    pub input: PathBuf,
    pub output: PathBuf,
    pub dimensions: [u32; 2],
    pub ranges: ChannelRanges,
    pub elapsed_secs: f64,
}

impl From<JobReport> for JobSummary {
    fn from(report: JobReport) -> Self {
        Self {
            input: report.input,
            output: report.output,
            dimensions: [report.width, report.height],
            ranges: report.ranges,
            elapsed_secs: report.elapsed.as_secs_f64(),
        }
    }
}

/// A file that failed to convert
#[derive(Debug, Clone, Serialize)]
pub struct JobFailure {
    pub input: PathBuf,
    pub stage: String,
    pub kind: ErrorKind,
    pub error: String,
}

impl JobFailure {
    fn new(input: &Path, err: JobError) -> Self {
        Self {
            input: input.to_path_buf(),
            stage: err.stage.to_string(),
            kind: err.error.kind(),
            error: err.error.to_string(),
        }
    }

    /// A job that never started because its output could not be claimed
    fn unplanned(input: &Path, error: ConvertError) -> Self {
        Self::new(
            input,
            JobError {
                stage: JobStage::Pending,
                error,
            },
        )
    }
}

/// Outcome of a whole batch run
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    pub succeeded: Vec<JobSummary>,
    pub failed: Vec<JobFailure>,
    pub elapsed_secs: f64,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }
}

/// Assign every input its output path before any job runs.
///
/// Two inputs may never write the same file: the first one (in input order)
/// keeps the path and every later claimant fails at `pending`.
fn plan_outputs<'a>(
    files: &'a [PathBuf],
    input_root: &Path,
    output_dir: &Path,
) -> Vec<(&'a PathBuf, Result<PathBuf, ConvertError>)> {
    let mut claimed: HashMap<PathBuf, &PathBuf> = HashMap::new();

    files
        .iter()
        .map(|input| {
            let planned = determine_output_path(input, input_root, output_dir)
                .map_err(|message| ConvertError::encode(input, message))
                .and_then(|output| match claimed.get(&output) {
                    Some(owner) => Err(ConvertError::encode(
                        &output,
                        format!("Output already claimed by {}", owner.display()),
                    )),
                    None => {
                        claimed.insert(output.clone(), input);
                        Ok(output)
                    }
                });
            (input, planned)
        })
        .collect()
}

/// Convert every file in parallel, writing results into `output_dir`.
///
/// Files below `input_root` keep their relative subdirectory under
/// `output_dir`. Jobs share nothing: a failing file is recorded in the
/// report and the rest of the batch carries on. Only setup problems (output
/// directory, thread pool) fail the whole call.
pub fn run_batch(
    files: &[PathBuf],
    input_root: &Path,
    output_dir: &Path,
    threads: Option<usize>,
) -> Result<BatchReport, String> {
    let batch_start = Instant::now();

    if !output_dir.exists() {
        std::fs::create_dir_all(output_dir)
            .map_err(|e| format!("Failed to create output directory: {}", e))?;
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(num_threads) = threads {
        builder = builder.num_threads(num_threads);
    }
    let pool = builder
        .build()
        .map_err(|e| format!("Failed to configure thread pool: {}", e))?;

    info!(
        "Processing {} files on {} threads",
        files.len(),
        pool.current_num_threads()
    );

    // Progress tracking
    let processed_count = AtomicUsize::new(0);
    let total_files = files.len();

    let planned = plan_outputs(files, input_root, output_dir);

    let results: Vec<Result<JobSummary, JobFailure>> = pool.install(|| {
        planned
            .into_par_iter()
            .map(|(input, output)| {
                let result = output
                    .and_then(|output| prepare_output_dir(&output).map(|()| output))
                    .map_err(|error| JobFailure::unplanned(input, error))
                    .and_then(|output| {
                        ImageJob::new(input, output)
                            .run()
                            .map(JobSummary::from)
                            .map_err(|err| JobFailure::new(input, err))
                    });

                let count = processed_count.fetch_add(1, Ordering::SeqCst) + 1;
                match &result {
                    Ok(summary) => info!(
                        "[{}/{}] {} -> {} ({:.2}s)",
                        count,
                        total_files,
                        input.display(),
                        summary.output.display(),
                        summary.elapsed_secs
                    ),
                    Err(failure) => warn!(
                        "[{}/{}] {} failed at {}: {}",
                        count,
                        total_files,
                        input.display(),
                        failure.stage,
                        failure.error
                    ),
                }
                result
            })
            .collect()
    });

    let mut report = BatchReport::default();
    for result in results {
        match result {
            Ok(summary) => report.succeeded.push(summary),
            Err(failure) => report.failed.push(failure),
        }
    }
    report.elapsed_secs = batch_start.elapsed().as_secs_f64();

    Ok(report)
}

/// Create the subdirectory a mirrored output lands in
fn prepare_output_dir(output: &Path) -> Result<(), ConvertError> {
    match output.parent() {
        Some(parent) if !parent.exists() => std::fs::create_dir_all(parent).map_err(|e| {
            ConvertError::encode(output, format!("Failed to create output directory: {}", e))
        }),
        _ => Ok(()),
    }
}
