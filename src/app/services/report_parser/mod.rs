//! Fixed-width cost sheet parser
//!
//! This module turns the paired cost and sell exports of one work order into
//! validated material and labor records. Both exports are renderings of the
//! same document; they differ only in their price columns.
//!
//! ## Architecture
//!
//! The parser is organized into logical components:
//! - [`parser`] - Orchestration: guide selection, date range, rejection policy
//! - [`scanner`] - Explicit section state machine over the guide lines
//! - [`extractor`] - Character-offset column slicing
//! - [`field_codec`] - European number and `dd/mm/yyyy` date decoding
//! - [`record_builder`] - Row to record construction with typed failures
//! - [`consistency`] - Cost/sell identity cross-check
//! - [`stats`] - Parsing statistics and result structures
//!
//! ## Usage
//!
//! ```rust
//! use cost_sheet_processor::app::services::report_parser::{ParseOptions, ReportParser};
//!
//! # fn example(cost: Vec<String>, sell: Vec<String>) -> cost_sheet_processor::Result<()> {
//! let parser = ReportParser::new(ParseOptions::default())?;
//! let result = parser.parse("240117", &cost, &sell)?;
//!
//! println!(
//!     "Parsed {} materials and {} labor rows",
//!     result.stats.materials_parsed, result.stats.labor_parsed
//! );
//! # Ok(())
//! # }
//! ```

pub mod consistency;
pub mod extractor;
pub mod field_codec;
pub mod parser;
pub mod record_builder;
pub mod scanner;
pub mod stats;

#[cfg(test)]
pub mod tests;

use thiserror::Error;

// Re-export main types for easy access
pub use extractor::Field;
pub use field_codec::FieldError;
pub use parser::{ParseOptions, ReportParser};
pub use record_builder::RowError;
pub use scanner::{Section, SectionScanner};
pub use stats::{IssueKind, ParseResult, ParseStats, RowIssue};

/// Conditions that make a whole report unusable
///
/// None of these ever yields a partial report.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReportError {
    #[error("neither a cost nor a sell export was supplied")]
    NoInput,

    #[error("no 'Desde Fecha ... Hasta Fecha ...' range on line {line_number}: '{content}'")]
    MissingDateRange { line_number: usize, content: String },

    #[error("declared date range has an unreadable date '{raw}': {reason}")]
    InvalidDateRange { raw: String, reason: FieldError },

    #[error("{section} section header not found before end of report")]
    MissingSectionHeader { section: Section },

    #[error("expected the {expected} section header on line {line_number}, found '{content}'")]
    UnexpectedSectionLine {
        expected: Section,
        line_number: usize,
        content: String,
    },
}
