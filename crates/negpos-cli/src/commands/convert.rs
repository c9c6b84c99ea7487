use log::{info, warn};
use std::path::PathBuf;

use negpos_cli::{collect_images, run_batch, BatchReport};
use negpos_core::{load_config, ConvertConfig};

/// Command-line overrides for the convert command
#[derive(Debug, Default)]
pub struct ConvertArgs {
    pub input_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub threads: Option<usize>,
    /// `Some` when `--recursive` or `--no-recursive` was given
    pub recursive: Option<bool>,
    pub config: Option<PathBuf>,
    pub report: Option<PathBuf>,
}

impl ConvertArgs {
    /// Layer the command-line values over the loaded configuration
    fn apply(&self, mut config: ConvertConfig) -> ConvertConfig {
        if let Some(dir) = &self.input_dir {
            config.input_dir = dir.clone();
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        if self.threads.is_some() {
            config.threads = self.threads;
        }
        if let Some(recursive) = self.recursive {
            config.recursive = recursive;
        }
        config.sanitize()
    }
}

/// Convert every supported image in the input directory.
///
/// Fails if any single file failed, after the whole batch has run.
pub fn cmd_convert(args: ConvertArgs) -> Result<(), String> {
    let handle = load_config(args.config.as_deref());
    handle.log_usage();
    let config = args.apply(handle.config);

    let files = collect_images(&config.input_dir, config.recursive)?;
    if files.is_empty() {
        info!("No image files found in {}", config.input_dir.display());
        return Ok(());
    }

    let report = run_batch(&files, &config.input_dir, &config.output_dir, config.threads)?;
    print_summary(&report);

    if let Some(path) = &args.report {
        write_report(&report, path)?;
        info!("Report written to {}", path.display());
    }

    if report.is_success() {
        Ok(())
    } else {
        Err(format!(
            "{} of {} files failed to convert",
            report.failed.len(),
            report.total()
        ))
    }
}

fn print_summary(report: &BatchReport) {
    println!("\n========================================");
    println!("Conversion complete");
    println!("========================================");
    println!("  Succeeded: {}", report.succeeded.len());
    println!("  Failed:    {}", report.failed.len());
    println!("  Time:      {:.2}s", report.elapsed_secs);

    for failure in &report.failed {
        warn!(
            "{} failed at {} ({} error): {}",
            failure.input.display(),
            failure.stage,
            failure.kind,
            failure.error
        );
    }
}

fn write_report(report: &BatchReport, path: &std::path::Path) -> Result<(), String> {
    let json = serde_json::to_string_pretty(report)
        .map_err(|e| format!("Failed to serialize report: {}", e))?;
    std::fs::write(path, json)
        .map_err(|e| format!("Failed to write report {}: {}", path.display(), e))
}
