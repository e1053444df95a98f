//! Configuration management and validation.
//!
//! Settings are layered: built-in defaults, then `COST_SHEET_*` environment
//! variables, then command-line overrides applied by the CLI through the
//! `with_*` builders. Column offsets are part of the export format and are
//! deliberately absent here.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

use crate::app::services::report_parser::ParseOptions;
use crate::constants::{ENV_ENCODING, ENV_FORMAT, ENV_INPUT_DIR, ENV_JOBS, ENV_OUTPUT_DIR};
use crate::{Error, Result};

/// Text encoding of the export files
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum SourceEncoding {
    /// UTF-16 little endian, as written by the legacy system
    #[default]
    #[value(name = "utf16le")]
    Utf16Le,
    /// UTF-8, for exports that were re-saved by hand
    #[value(name = "utf8")]
    Utf8,
}

impl FromStr for SourceEncoding {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "utf16le" | "utf-16le" | "utf16" => Ok(SourceEncoding::Utf16Le),
            "utf8" | "utf-8" => Ok(SourceEncoding::Utf8),
            other => Err(Error::configuration(format!(
                "Unknown source encoding '{}', expected utf16le or utf8",
                other
            ))),
        }
    }
}

/// File format of the output tables
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Csv,
    Parquet,
}

impl OutputFormat {
    /// File extension without the dot
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Parquet => "parquet",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "parquet" => Ok(OutputFormat::Parquet),
            other => Err(Error::configuration(format!(
                "Unknown output format '{}', expected csv or parquet",
                other
            ))),
        }
    }
}

/// Global configuration for cost sheet processing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory searched for `NNNNNNcoste.txt` / `NNNNNNventa.txt` exports
    pub input_dir: PathBuf,

    /// Directory the output tables are written to
    pub output_dir: PathBuf,

    pub encoding: SourceEncoding,

    pub output_format: OutputFormat,

    /// Report rows dropped for empty or malformed fields
    pub show_all_errors: bool,

    /// Per-row parser tracing
    pub verbose: bool,

    /// Skip the confirmation prompt
    pub assume_yes: bool,

    /// Maximum number of reports parsed at the same time
    pub max_concurrent_reports: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("."),
            output_dir: PathBuf::from("."),
            encoding: SourceEncoding::default(),
            output_format: OutputFormat::default(),
            show_all_errors: false,
            verbose: false,
            assume_yes: false,
            max_concurrent_reports: num_cpus::get(),
        }
    }
}

impl Config {
    /// Defaults overridden by the process environment
    pub fn from_env() -> Result<Self> {
        Self::default().with_env_overrides(|key| std::env::var(key).ok())
    }

    /// Apply `COST_SHEET_*` overrides read through `lookup`
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup(ENV_INPUT_DIR) {
            debug!("{} overrides input directory: {}", ENV_INPUT_DIR, dir);
            self.input_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup(ENV_OUTPUT_DIR) {
            debug!("{} overrides output directory: {}", ENV_OUTPUT_DIR, dir);
            self.output_dir = PathBuf::from(dir);
        }
        if let Some(encoding) = lookup(ENV_ENCODING) {
            self.encoding = encoding.parse()?;
        }
        if let Some(format) = lookup(ENV_FORMAT) {
            self.output_format = format.parse()?;
        }
        if let Some(jobs) = lookup(ENV_JOBS) {
            self.max_concurrent_reports = jobs.trim().parse().map_err(|_| {
                Error::configuration(format!("{} must be a positive integer, got '{}'", ENV_JOBS, jobs))
            })?;
        }

        Ok(self)
    }

    pub fn with_input_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.input_dir = dir.as_ref().to_path_buf();
        self
    }

    pub fn with_output_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.output_dir = dir.as_ref().to_path_buf();
        self
    }

    pub fn with_encoding(mut self, encoding: SourceEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    pub fn with_show_all_errors(mut self, show_all_errors: bool) -> Self {
        self.show_all_errors = show_all_errors;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_assume_yes(mut self, assume_yes: bool) -> Self {
        self.assume_yes = assume_yes;
        self
    }

    pub fn with_max_concurrent_reports(mut self, max_reports: usize) -> Self {
        self.max_concurrent_reports = max_reports;
        self
    }

    /// Parser options derived from the diagnostic settings
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions::default()
            .with_show_all_errors(self.show_all_errors)
            .with_verbose(self.verbose)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.max_concurrent_reports == 0 {
            return Err(Error::configuration(
                "Maximum concurrent reports must be greater than 0",
            ));
        }

        if !self.input_dir.is_dir() {
            return Err(Error::configuration(format!(
                "Input directory {} does not exist",
                self.input_dir.display()
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.input_dir, PathBuf::from("."));
        assert_eq!(config.encoding, SourceEncoding::Utf16Le);
        assert_eq!(config.output_format, OutputFormat::Csv);
        assert!(!config.show_all_errors);
        assert!(config.max_concurrent_reports >= 1);
    }

    #[test]
    fn test_env_overrides() {
        let config = Config::default()
            .with_env_overrides(lookup(&[
                (ENV_INPUT_DIR, "/data/exports"),
                (ENV_ENCODING, "UTF-8"),
                (ENV_FORMAT, "parquet"),
                (ENV_JOBS, "3"),
            ]))
            .unwrap();

        assert_eq!(config.input_dir, PathBuf::from("/data/exports"));
        assert_eq!(config.output_dir, PathBuf::from("."));
        assert_eq!(config.encoding, SourceEncoding::Utf8);
        assert_eq!(config.output_format, OutputFormat::Parquet);
        assert_eq!(config.max_concurrent_reports, 3);
    }

    #[test]
    fn test_invalid_env_values() {
        assert!(Config::default()
            .with_env_overrides(lookup(&[(ENV_JOBS, "many")]))
            .is_err());
        assert!(Config::default()
            .with_env_overrides(lookup(&[(ENV_FORMAT, "xlsx")]))
            .is_err());
    }

    #[test]
    fn test_builders_override_env() {
        let config = Config::default()
            .with_env_overrides(lookup(&[(ENV_FORMAT, "parquet")]))
            .unwrap()
            .with_output_format(OutputFormat::Csv)
            .with_show_all_errors(true)
            .with_verbose(true);

        assert_eq!(config.output_format, OutputFormat::Csv);
        assert_eq!(
            config.parse_options(),
            ParseOptions {
                show_all_errors: true,
                verbose: true,
            }
        );
    }

    #[test]
    fn test_validate() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::default().with_input_dir(temp_dir.path());
        assert!(config.validate().is_ok());

        assert!(config.clone().with_max_concurrent_reports(0).validate().is_err());
        assert!(config
            .with_input_dir(temp_dir.path().join("missing"))
            .validate()
            .is_err());
    }

    #[test]
    fn test_output_format_extension() {
        assert_eq!(OutputFormat::Csv.extension(), "csv");
        assert_eq!(OutputFormat::Parquet.to_string(), "parquet");
        assert_eq!("PARQUET".parse::<OutputFormat>().unwrap(), OutputFormat::Parquet);
    }
}
