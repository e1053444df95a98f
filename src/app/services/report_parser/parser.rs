//! Core cost sheet parser implementation
//!
//! This module provides the main parser orchestration: choosing the guide
//! export, reading the declared date range, driving the section scanner and
//! applying the rejection policy to failed rows.

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, trace, warn};

use super::ReportError;
use super::extractor::{RowLines, strip_terminator};
use super::field_codec::parse_date;
use super::record_builder::{RowError, build_labor, build_material};
use super::scanner::{FormatPatterns, ScanEvent, Section, SectionEnd, SectionScanner};
use super::stats::{ParseResult, ParseStats, RowIssue};
use crate::app::models::{DateRange, LaborRecord, MaterialRecord, ParsedReport};
use crate::constants::DATE_RANGE_LINE_INDEX;
use crate::{Error, Result};

/// Diagnostic switches passed through from the caller
///
/// Neither option changes which records are produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseOptions {
    /// Report rows dropped for empty or malformed fields
    pub show_all_errors: bool,

    /// Trace every row and every built record at info level
    pub verbose: bool,
}

impl ParseOptions {
    pub fn with_show_all_errors(mut self, show_all_errors: bool) -> Self {
        self.show_all_errors = show_all_errors;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

/// Parser for paired cost/sell report exports
///
/// The parser holds no per-report state; one instance can parse any number
/// of reports, from any number of threads.
#[derive(Debug, Clone)]
pub struct ReportParser {
    options: ParseOptions,
    patterns: FormatPatterns,
}

/// Records accumulated during one parse
#[derive(Default)]
struct Accumulator {
    materials: Vec<MaterialRecord>,
    labor: Vec<LaborRecord>,
    stats: ParseStats,
}

impl ReportParser {
    /// Create a new parser with the given diagnostic options
    pub fn new(options: ParseOptions) -> Result<Self> {
        let patterns = FormatPatterns::compile().map_err(|e| {
            Error::configuration(format!("Failed to compile report format patterns: {}", e))
        })?;

        Ok(Self { options, patterns })
    }

    pub fn options(&self) -> ParseOptions {
        self.options
    }

    /// Parse one report from its cost and sell lines
    ///
    /// Either side may be empty, but not both. Lines may still carry their
    /// `\n` or `\r\n` terminators.
    pub fn parse<C, S>(&self, report_id: &str, cost_lines: &[C], sell_lines: &[S]) -> Result<ParseResult>
    where
        C: AsRef<str>,
        S: AsRef<str>,
    {
        let cost: Vec<&str> = cost_lines.iter().map(|line| line.as_ref()).collect();
        let sell: Vec<&str> = sell_lines.iter().map(|line| line.as_ref()).collect();

        self.parse_lines(report_id, &cost, &sell)
            .map_err(|source| Error::malformed_report(report_id, source))
    }

    fn parse_lines(
        &self,
        report_id: &str,
        cost: &[&str],
        sell: &[&str],
    ) -> std::result::Result<ParseResult, ReportError> {
        let use_cost = !cost.is_empty();
        let use_sell = !sell.is_empty();
        let guide = match (use_cost, use_sell) {
            (true, _) => cost,
            (false, true) => sell,
            (false, false) => return Err(ReportError::NoInput),
        };

        if self.options.verbose {
            info!(
                "Parsing report {} (cost: {} lines, sell: {} lines, show all errors: {})",
                report_id,
                cost.len(),
                sell.len(),
                self.options.show_all_errors
            );
        }

        let date_range = self.declared_date_range(guide)?;
        debug!(
            "Report {} declares range {} to {}",
            report_id, date_range.from, date_range.to
        );

        let mut acc = Accumulator::default();

        for event in SectionScanner::new(guide, &self.patterns) {
            match event? {
                ScanEvent::SectionStarted {
                    section,
                    header_line,
                } => {
                    debug!("{} section starts at line {}", section, header_line);
                }
                ScanEvent::PageBreak { .. } => {
                    acc.stats.page_breaks += 1;
                }
                ScanEvent::Row {
                    section,
                    line_number,
                } => {
                    let index = line_number - 1;
                    let row = RowLines::new(
                        aligned_line(guide, index),
                        use_cost.then(|| aligned_line(cost, index)),
                        use_sell.then(|| aligned_line(sell, index)),
                    );

                    self.handle_row(section, line_number, &row, &mut acc);
                }
                ScanEvent::SectionEnded { section, end } => match end {
                    SectionEnd::TerminalMarker { line_number } => {
                        debug!("{} section ends at line {}", section, line_number);
                    }
                    SectionEnd::EndOfInput => {
                        debug!(
                            "{} section of report {} runs to end of input without its terminal marker",
                            section, report_id
                        );
                    }
                },
            }
        }

        let Accumulator {
            materials,
            labor,
            stats,
        } = acc;

        info!(
            "Report {}: {} materials, {} labor rows, {} rows dropped ({} contradictory)",
            report_id,
            stats.materials_parsed,
            stats.labor_parsed,
            stats.rows_rejected(),
            stats.rows_contradictory
        );

        Ok(ParseResult {
            report: ParsedReport::new(report_id.to_string(), date_range, materials, labor),
            stats,
        })
    }

    /// Read the "Desde Fecha ... Hasta Fecha ..." line of the guide
    fn declared_date_range(&self, guide: &[&str]) -> std::result::Result<DateRange, ReportError> {
        let line = aligned_line(guide, DATE_RANGE_LINE_INDEX);

        let (from_raw, to_raw) =
            self.patterns
                .date_range(line)
                .ok_or_else(|| ReportError::MissingDateRange {
                    line_number: DATE_RANGE_LINE_INDEX + 1,
                    content: line.trim().to_string(),
                })?;

        let decode = |raw: &str| {
            parse_date(raw).map_err(|reason| ReportError::InvalidDateRange {
                raw: raw.to_string(),
                reason,
            })
        };
        let range = DateRange::new(decode(from_raw)?, decode(to_raw)?);

        if range.from > range.to {
            warn!(
                "Declared date range is reversed: {} is after {}",
                range.from, range.to
            );
        }

        Ok(range)
    }

    fn handle_row(
        &self,
        section: Section,
        line_number: usize,
        row: &RowLines<'_>,
        acc: &mut Accumulator,
    ) {
        acc.stats.rows_attempted += 1;

        if self.options.verbose {
            info!(
                "Line {} ({}): guide '{}', cost {:?}, sell {:?}",
                line_number, section, row.guide, row.cost, row.sell
            );
        }

        let outcome = match section {
            Section::Materials => build_material(row, line_number).map(|record| {
                if self.options.verbose {
                    info!("Built material record: {:?}", record);
                }
                acc.materials.push(record);
                acc.stats.materials_parsed += 1;
            }),
            Section::Labor => build_labor(row, line_number).map(|record| {
                if self.options.verbose {
                    info!("Built labor record: {:?}", record);
                }
                acc.labor.push(record);
                acc.stats.labor_parsed += 1;
            }),
        };

        if let Err(error) = outcome {
            self.record_rejection(section, &error, &mut acc.stats);
        }
    }

    /// Count a dropped row and surface it according to its kind
    fn record_rejection(&self, section: Section, error: &RowError, stats: &mut ParseStats) {
        match error {
            RowError::Contradictory { .. } => {
                stats.rows_contradictory += 1;
                error!("{}", error);
                stats.issues.push(RowIssue::from_error(section, error));
            }
            RowError::Invalid { .. } => {
                stats.rows_invalid += 1;
                if self.options.show_all_errors {
                    warn!("{}", error);
                    stats.issues.push(RowIssue::from_error(section, error));
                } else {
                    trace!("{}", error);
                }
            }
        }
    }
}

/// Line `index` of an export without its terminator, or `""` past its end
fn aligned_line<'a>(lines: &[&'a str], index: usize) -> &'a str {
    lines.get(index).copied().map_or("", strip_terminator)
}
