use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

use commands::{cmd_analyze, cmd_convert, ConvertArgs};

#[derive(Parser)]
#[command(name = "negpos")]
#[command(version, about = "Color negative to positive converter", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Show per-stage debug output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only show warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert every negative in a directory to a positive
    Convert {
        /// Directory containing the scanned negatives
        #[arg(value_name = "INPUT_DIR")]
        input_dir: Option<PathBuf>,

        /// Directory receiving the converted images
        #[arg(value_name = "OUTPUT_DIR")]
        output_dir: Option<PathBuf>,

        /// Number of parallel threads
        #[arg(short = 'j', long, value_name = "N")]
        threads: Option<usize>,

        /// Also convert images in subdirectories
        #[arg(short, long, overrides_with = "no_recursive")]
        recursive: bool,

        /// Only convert images directly inside INPUT_DIR, even if the config
        /// file enables recursion
        #[arg(long, overrides_with = "recursive")]
        no_recursive: bool,

        /// Configuration file (YAML)
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Write a JSON report of the run
        #[arg(long, value_name = "FILE")]
        report: Option<PathBuf>,
    },

    /// Show the channel ranges the conversion would stretch
    Analyze {
        /// Input file
        input: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_logging(verbose: bool, quiet: bool) {
    let level = if verbose {
        "debug"
    } else if quiet {
        "warn"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

/// Command-line recursion choice; `None` leaves the config file in charge
fn recursive_override(recursive: bool, no_recursive: bool) -> Option<bool> {
    match (recursive, no_recursive) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let result = match cli.command {
        Commands::Convert {
            input_dir,
            output_dir,
            threads,
            recursive,
            no_recursive,
            config,
            report,
        } => cmd_convert(ConvertArgs {
            input_dir,
            output_dir,
            threads,
            recursive: recursive_override(recursive, no_recursive),
            config,
            report,
        }),
        Commands::Analyze { input, json } => cmd_analyze(input, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recursive_flags() {
        assert_eq!(recursive_override(false, false), None);
        assert_eq!(recursive_override(true, false), Some(true));
        assert_eq!(recursive_override(false, true), Some(false));
    }

    #[test]
    fn test_last_recursion_flag_wins() {
        let cli = Cli::parse_from(["negpos", "convert", "--recursive", "--no-recursive"]);
        match cli.command {
            Commands::Convert {
                recursive,
                no_recursive,
                ..
            } => assert_eq!(recursive_override(recursive, no_recursive), Some(false)),
            _ => panic!("expected convert"),
        }
    }
}
