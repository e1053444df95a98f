//! Command-line argument definitions for the cost sheet processor
//!
//! Both subcommands share one set of flags; the legacy Spanish command
//! names are kept as aliases.

use crate::config::{Config, OutputFormat, SourceEncoding};
use crate::{Error, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for the cost sheet processor
///
/// Converts fixed-width "hoja de coste" exports (cost and sell copies of a
/// work order report) into material and labor tables.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "cost-sheet-processor",
    version,
    about = "Convert legacy cost/sell sheet exports into material and labor tables",
    long_about = "Reads the NNNNNNcoste.txt and NNNNNNventa.txt exports of each work order (OT), \
                  validates every material and labor row against both copies and writes the \
                  accepted rows as CSV or Parquet tables, one pair per OT or merged."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Convert every work order into its own pair of tables
    #[command(alias = "todos")]
    Convert(SharedArgs),
    /// Convert every work order into one merged pair of tables
    #[command(alias = "juntar")]
    Merge(SharedArgs),
}

/// Flags accepted by every subcommand
#[derive(Debug, Clone, Default, Parser)]
pub struct SharedArgs {
    /// Directory containing the exports
    ///
    /// Defaults to the current directory or COST_SHEET_INPUT_DIR.
    #[arg(
        short = 'i',
        long = "input",
        value_name = "PATH",
        help = "Directory containing the NNNNNNcoste.txt / NNNNNNventa.txt exports"
    )]
    pub input_dir: Option<PathBuf>,

    /// Directory the tables are written to
    #[arg(
        short = 'o',
        long = "output",
        value_name = "PATH",
        help = "Directory the output tables are written to"
    )]
    pub output_dir: Option<PathBuf>,

    /// Report every dropped row, not only contradictions
    #[arg(
        short = 'e',
        long = "errors",
        help = "Report rows dropped for empty or malformed fields"
    )]
    pub show_all_errors: bool,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info and per-line tracing, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Only show errors. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,

    #[arg(short = 'y', long = "yes", help = "Do not ask for confirmation")]
    pub assume_yes: bool,

    #[arg(long = "format", value_enum, help = "Output table format [default: csv]")]
    pub format: Option<OutputFormat>,

    #[arg(
        long = "encoding",
        value_enum,
        help = "Text encoding of the exports [default: utf16le]"
    )]
    pub encoding: Option<SourceEncoding>,

    /// Number of reports parsed concurrently
    #[arg(
        short = 'j',
        long = "jobs",
        value_name = "COUNT",
        help = "Number of reports parsed concurrently [default: number of CPUs]"
    )]
    pub jobs: Option<usize>,
}

impl SharedArgs {
    /// Validate the arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if let Some(input_dir) = &self.input_dir {
            if !input_dir.is_dir() {
                return Err(Error::configuration(format!(
                    "Input path is not a directory: {}",
                    input_dir.display()
                )));
            }
        }

        if self.jobs == Some(0) {
            return Err(Error::configuration(
                "Number of jobs must be greater than 0",
            ));
        }

        Ok(())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress bars (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }

    /// Apply explicitly given flags on top of `config`
    pub fn apply_to(&self, mut config: Config) -> Config {
        if let Some(input_dir) = &self.input_dir {
            config = config.with_input_dir(input_dir);
        }
        if let Some(output_dir) = &self.output_dir {
            config = config.with_output_dir(output_dir);
        }
        if let Some(format) = self.format {
            config = config.with_output_format(format);
        }
        if let Some(encoding) = self.encoding {
            config = config.with_encoding(encoding);
        }
        if let Some(jobs) = self.jobs {
            config = config.with_max_concurrent_reports(jobs);
        }

        let show_all_errors = config.show_all_errors || self.show_all_errors;
        let verbose = config.verbose || self.verbose > 0;
        let assume_yes = config.assume_yes || self.assume_yes;

        config
            .with_show_all_errors(show_all_errors)
            .with_verbose(verbose)
            .with_assume_yes(assume_yes)
    }
}
