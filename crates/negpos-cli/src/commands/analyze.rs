use serde::Serialize;
use std::path::{Path, PathBuf};

use negpos_core::decoders::decode_image;
use negpos_core::pipeline::{invert, scan};
use negpos_core::{Channel, ChannelRanges};

/// Analysis result structure for JSON output.
///
/// Ranges are measured on the inverted image, i.e. exactly the values the
/// stretch pass would use.
#[derive(Debug, Serialize)]
pub struct AnalysisResult {
    pub file: String,
    pub dimensions: [u32; 2],
    pub has_alpha: bool,
    pub ranges: ChannelRanges,
    pub degenerate_channels: Vec<Channel>,
}

/// Decode, invert and measure one image without writing anything.
pub fn analyze_image(input: &Path) -> Result<AnalysisResult, String> {
    let mut image = decode_image(input).map_err(|e| e.to_string())?;
    invert(&mut image);
    let ranges = scan(&image).map_err(|e| e.to_string())?;

    Ok(AnalysisResult {
        file: input.display().to_string(),
        dimensions: [image.width(), image.height()],
        has_alpha: image.has_alpha,
        degenerate_channels: ranges.degenerate_channels(),
        ranges,
    })
}

/// Execute the analyze command to inspect the range stretch of one image.
pub fn cmd_analyze(input: PathBuf, json_output: bool) -> Result<(), String> {
    let result = analyze_image(&input)?;

    if json_output {
        let json = serde_json::to_string_pretty(&result)
            .map_err(|e| format!("Failed to serialize analysis: {}", e))?;
        println!("{}", json);
        return Ok(());
    }

    println!("Analyzing: {}\n", input.display());
    println!("Image Info:");
    println!("  Dimensions: {}x{}", result.dimensions[0], result.dimensions[1]);
    println!("  Alpha: {}", if result.has_alpha { "yes" } else { "no" });

    println!("\nInverted Channel Ranges:");
    for channel in Channel::ALL {
        let range = result.ranges.get(channel);
        println!(
            "  {:<5}: min={:3}, max={:3}, span={:3}",
            channel.to_string(),
            range.min,
            range.max,
            range.span()
        );
    }

    if !result.degenerate_channels.is_empty() {
        let names: Vec<String> = result
            .degenerate_channels
            .iter()
            .map(|c| c.to_string())
            .collect();
        println!("\nFlat channels (stretch maps them to 0): {}", names.join(", "));
    }

    Ok(())
}
