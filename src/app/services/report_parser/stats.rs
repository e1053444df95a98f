//! Parsing statistics and result structures for report processing
//!
//! This module provides types for tracking how many rows of a report were
//! turned into records, which were rejected and why, and bundles them with
//! the parsed report itself.

use serde::{Deserialize, Serialize};

use super::extractor::Field;
use super::record_builder::RowError;
use super::scanner::Section;
use crate::app::models::ParsedReport;

/// Parsing result with the report and its statistics
#[derive(Debug, Clone, PartialEq)]
pub struct ParseResult {
    /// Records and declared date range of the report
    pub report: ParsedReport,

    /// Row-level statistics of the parse
    pub stats: ParseStats,
}

/// Kind of row rejection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IssueKind {
    /// Empty or malformed field
    Invalid,
    /// Cost and sell copies disagree
    Contradictory,
}

/// A rejected row that was surfaced to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowIssue {
    /// 1-based line number in the guide export
    pub line: usize,
    pub section: Section,
    pub kind: IssueKind,
    pub field: Field,
    pub message: String,
}

impl RowIssue {
    pub fn from_error(section: Section, error: &RowError) -> Self {
        let kind = if error.is_contradictory() {
            IssueKind::Contradictory
        } else {
            IssueKind::Invalid
        };

        Self {
            line: error.line(),
            section,
            kind,
            field: error.field(),
            message: error.to_string(),
        }
    }
}

/// Row statistics of one report
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseStats {
    /// Rows handed to a record builder
    pub rows_attempted: usize,

    /// Material records produced
    pub materials_parsed: usize,

    /// Labor records produced
    pub labor_parsed: usize,

    /// Rows dropped for an empty or malformed field
    pub rows_invalid: usize,

    /// Rows dropped because cost and sell disagree
    pub rows_contradictory: usize,

    /// Blank pagination lines skipped inside sections
    pub page_breaks: usize,

    /// Rejections that were reported (contradictions always, invalid rows on request)
    pub issues: Vec<RowIssue>,
}

impl ParseStats {
    /// Total records produced
    pub fn records_parsed(&self) -> usize {
        self.materials_parsed + self.labor_parsed
    }

    /// Total rows dropped
    pub fn rows_rejected(&self) -> usize {
        self.rows_invalid + self.rows_contradictory
    }

    /// Share of attempted rows that became records, as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.rows_attempted == 0 {
            0.0
        } else {
            (self.records_parsed() as f64 / self.rows_attempted as f64) * 100.0
        }
    }

    /// Check whether any row contradicted its counterpart
    pub fn has_contradictions(&self) -> bool {
        self.rows_contradictory > 0
    }
}
