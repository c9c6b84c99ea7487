//! Single-image conversion job.
//!
//! A job owns one image from decode to encode and walks a fixed sequence of
//! stages. Any failure ends the job where it stands; there is no retry.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use log::{debug, info};

use crate::decoders::decode_image;
use crate::error::{ConvertError, Result};
use crate::exporters::export_tiff;
use crate::models::{ChannelRanges, PixelBuffer};
use crate::pipeline::{invert, scan, stretch};

/// Progress of an [`ImageJob`]. Stages only ever advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum JobStage {
    Pending,
    Decoded,
    Inverted,
    Measured,
    Stretched,
    Encoded,
}

impl fmt::Display for JobStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            JobStage::Pending => "pending",
            JobStage::Decoded => "decoded",
            JobStage::Inverted => "inverted",
            JobStage::Measured => "measured",
            JobStage::Stretched => "stretched",
            JobStage::Encoded => "encoded",
        };
        f.write_str(name)
    }
}

/// Outcome of a completed job
#[derive(Debug, Clone)]
pub struct JobReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    pub ranges: ChannelRanges,
    pub elapsed: Duration,
}

/// Failure of a job, with the last stage it reached
#[derive(Debug)]
pub struct JobError {
    pub stage: JobStage,
    pub error: ConvertError,
}

impl fmt::Display for JobError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (after stage: {})", self.error, self.stage)
    }
}

impl std::error::Error for JobError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

/// Converts one negative file into one positive file.
#[derive(Debug)]
pub struct ImageJob {
    input: PathBuf,
    output: PathBuf,
    stage: JobStage,
}

impl ImageJob {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            stage: JobStage::Pending,
        }
    }

    pub fn input(&self) -> &Path {
        &self.input
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    pub fn stage(&self) -> JobStage {
        self.stage
    }

    fn advance(&mut self, stage: JobStage) {
        debug_assert!(stage > self.stage, "job stages only move forward");
        debug!("{}: {} -> {}", self.input.display(), self.stage, stage);
        self.stage = stage;
    }

    /// Run decode, invert, measure, stretch and encode in order.
    pub fn run(mut self) -> std::result::Result<JobReport, JobError> {
        let start = Instant::now();

        let mut image = match decode_image(&self.input) {
            Ok(image) => image,
            Err(error) => return Err(self.fail(error)),
        };
        self.advance(JobStage::Decoded);

        let ranges = match self.transform(&mut image) {
            Ok(ranges) => ranges,
            Err(error) => return Err(self.fail(error)),
        };

        if let Err(error) = export_tiff(&image, &self.output) {
            return Err(self.fail(error));
        }
        self.advance(JobStage::Encoded);

        let report = JobReport {
            input: self.input,
            output: self.output,
            width: image.width(),
            height: image.height(),
            ranges,
            elapsed: start.elapsed(),
        };
        info!(
            "Converted {} -> {} ({}x{}, {:.2}s)",
            report.input.display(),
            report.output.display(),
            report.width,
            report.height,
            report.elapsed.as_secs_f64()
        );
        Ok(report)
    }

    /// The in-buffer passes, in the only order that is correct: the stretch
    /// uses ranges measured on the inverted buffer.
    fn transform(&mut self, image: &mut PixelBuffer) -> Result<ChannelRanges> {
        invert(image);
        self.advance(JobStage::Inverted);

        let ranges = scan(image)?;
        self.advance(JobStage::Measured);
        debug!(
            "{}: R [{}, {}] G [{}, {}] B [{}, {}]",
            self.input.display(),
            ranges.red.min,
            ranges.red.max,
            ranges.green.min,
            ranges.green.max,
            ranges.blue.min,
            ranges.blue.max
        );
        for channel in ranges.degenerate_channels() {
            debug!("{}: {} channel is flat", self.input.display(), channel);
        }

        stretch(image, &ranges)?;
        self.advance(JobStage::Stretched);

        Ok(ranges)
    }

    fn fail(&self, error: ConvertError) -> JobError {
        JobError {
            stage: self.stage,
            error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::models::{ChannelRange, Pixel};
    use tempfile::tempdir;

    fn write_negative(path: &Path) {
        let image = PixelBuffer::new(
            2,
            1,
            vec![Pixel::argb(255, 10, 200, 0), Pixel::argb(0, 250, 200, 255)],
            true,
        )
        .unwrap();
        export_tiff(&image, path).unwrap();
    }

    #[test]
    fn test_job_converts_file() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("neg.tif");
        let output = dir.path().join("changed_neg.tif");
        write_negative(&input);

        let report = ImageJob::new(&input, &output).run().unwrap();

        assert_eq!((report.width, report.height), (2, 1));
        assert_eq!(report.ranges.red, ChannelRange { min: 5, max: 245 });
        assert!(report.ranges.green.is_degenerate());

        let positive = decode_image(&output).unwrap();
        assert_eq!(positive.pixels()[0], Pixel::argb(255, 255, 0, 255));
        assert_eq!(positive.pixels()[1], Pixel::argb(0, 0, 0, 0));
    }

    #[test]
    fn test_job_decode_failure_stops_before_decoded() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("broken.png");
        std::fs::write(&input, b"not a png").unwrap();
        let output = dir.path().join("changed_broken.png");

        let err = ImageJob::new(&input, &output).run().unwrap_err();

        assert_eq!(err.stage, JobStage::Pending);
        assert_eq!(err.error.kind(), ErrorKind::Decode);
        assert!(!output.exists());
    }

    #[test]
    fn test_job_encode_failure_after_stretch() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("neg.tif");
        write_negative(&input);
        let output = dir.path().join("missing_dir").join("changed_neg.tif");

        let err = ImageJob::new(&input, &output).run().unwrap_err();

        assert_eq!(err.stage, JobStage::Stretched);
        assert_eq!(err.error.kind(), ErrorKind::Encode);
        assert!(err.to_string().contains("stretched"));
    }

    #[test]
    fn test_transform_walks_stages_in_order() {
        let mut job = ImageJob::new("a.tif", "b.tif");
        job.advance(JobStage::Decoded);
        let mut image = PixelBuffer::filled(4, 4, Pixel::rgb(1, 2, 3));

        job.transform(&mut image).unwrap();

        assert_eq!(job.stage(), JobStage::Stretched);
        assert!(image.pixels().iter().all(|p| *p == Pixel::rgb(0, 0, 0)));
    }

    #[test]
    fn test_transform_empty_image_is_precondition_failure() {
        let mut job = ImageJob::new("a.tif", "b.tif");
        job.advance(JobStage::Decoded);
        let mut image = PixelBuffer::new(0, 3, Vec::new(), false).unwrap();

        let err = job.transform(&mut image).unwrap_err();

        assert!(err.is_precondition());
        assert_eq!(job.stage(), JobStage::Inverted);
    }
}
