//! Cost Sheet Processor Library
//!
//! A Rust library for converting the legacy fixed-width "hoja de coste"
//! exports (a cost copy and a sell copy of the same work-order report) into
//! validated material and labor tables.
//!
//! This library provides tools for:
//! - Decoding UTF-16LE report exports into line arrays
//! - Segmenting a report into preamble, materials, labor and trailer sections
//! - Extracting and validating fixed-offset fields with European number/date formats
//! - Cross-checking each cost row against its sell counterpart
//! - Writing the resulting tables as CSV or Parquet files

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod project_discovery;
        pub mod report_parser;
        pub mod report_writer;
        pub mod source_reader;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
    pub mod input;
}

// Re-export commonly used types
pub use app::models::{DateRange, LaborRecord, MaterialRecord, ParsedReport};
pub use app::services::report_parser::{ParseOptions, ParseResult, ReportError, ReportParser};
pub use config::Config;

/// Result type alias for the cost sheet processor
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for cost sheet processing operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Source file could not be decoded with the configured encoding
    #[error("Decoding error in file '{file}': {message}")]
    Decoding { file: String, message: String },

    /// A report could not be parsed at all
    #[error("Malformed report {report_id}: {source}")]
    MalformedReport {
        report_id: String,
        #[source]
        source: ReportError,
    },

    /// Writing an output table failed
    #[error("Output writing error: {message}")]
    OutputWriting {
        message: String,
        #[source]
        source: polars::error::PolarsError,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Project discovery error
    #[error("Project discovery error: {message}")]
    Discovery { message: String },

    /// Processing interrupted
    #[error("Processing interrupted: {reason}")]
    ProcessingInterrupted { reason: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a decoding error
    pub fn decoding(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decoding {
            file: file.into(),
            message: message.into(),
        }
    }

    /// Wrap a fatal parser error with the report it belongs to
    pub fn malformed_report(report_id: impl Into<String>, source: ReportError) -> Self {
        Self::MalformedReport {
            report_id: report_id.into(),
            source,
        }
    }

    /// Create an output writing error
    pub fn output_writing(message: impl Into<String>, source: polars::error::PolarsError) -> Self {
        Self::OutputWriting {
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a project discovery error
    pub fn discovery(message: impl Into<String>) -> Self {
        Self::Discovery {
            message: message.into(),
        }
    }

    /// Create a processing interrupted error
    pub fn processing_interrupted(reason: impl Into<String>) -> Self {
        Self::ProcessingInterrupted {
            reason: reason.into(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<polars::error::PolarsError> for Error {
    fn from(error: polars::error::PolarsError) -> Self {
        Self::OutputWriting {
            message: "Table operation failed".to_string(),
            source: error,
        }
    }
}

impl From<glob::PatternError> for Error {
    fn from(error: glob::PatternError) -> Self {
        Self::Discovery {
            message: format!("Invalid file pattern: {}", error),
        }
    }
}
