//! Section segmentation of a report
//!
//! The scanner walks the guide lines once, moving through
//! `Preamble → Materials → LaborSeek → Labor → Done`, and yields a
//! [`ScanEvent`] for every transition, page break and candidate row. It never
//! builds records itself; the orchestrator decides what to do with each row.
//!
//! ```text
//! _________________________________________________M A T E R I A L_________________________________________________
//! Referencia       Descripción                              Fecha         Cantidad          Precio         Importe
//! _________________________________________________________________________________________________________________
//! CAB1,5LILA       CABLE LILA 1,5 CPR LH CCA                18/06/2024       40,00            0,20            8,00
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ReportError;
use super::extractor::strip_terminator;
use crate::constants::{
    DATE_RANGE_PATTERN, LABOR_HEADER_PATTERN, LABOR_TERMINAL_MARKER, MATERIALS_HEADER_PATTERN,
    MATERIALS_TERMINAL_MARKER, SECTION_DELIMITER,
};

/// Record-bearing section of a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Section {
    Materials,
    Labor,
}

impl Section {
    /// Exact line that closes the section
    pub fn terminal_marker(self) -> &'static str {
        match self {
            Section::Materials => MATERIALS_TERMINAL_MARKER,
            Section::Labor => LABOR_TERMINAL_MARKER,
        }
    }

    fn scanning_state(self) -> ScanState {
        match self {
            Section::Materials => ScanState::Materials,
            Section::Labor => ScanState::Labor,
        }
    }

    fn following_state(self) -> ScanState {
        match self {
            Section::Materials => ScanState::LaborSeek,
            Section::Labor => ScanState::Done,
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Section::Materials => f.write_str("materials"),
            Section::Labor => f.write_str("labor"),
        }
    }
}

/// Position of the scanner within the report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    Preamble,
    Materials,
    LaborSeek,
    Labor,
    Done,
}

/// How a section came to an end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionEnd {
    /// The section's totals underline was found on this 1-based line
    TerminalMarker { line_number: usize },
    /// The report ran out of lines first (truncated export)
    EndOfInput,
}

/// Something the scanner found while walking the report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanEvent {
    SectionStarted {
        section: Section,
        header_line: usize,
    },
    /// A line inside a section that should be built into a record
    Row {
        section: Section,
        line_number: usize,
    },
    /// A blank pagination line inside a section
    PageBreak {
        section: Section,
        line_number: usize,
    },
    SectionEnded {
        section: Section,
        end: SectionEnd,
    },
}

/// Compiled line patterns of the report format
#[derive(Debug, Clone)]
pub struct FormatPatterns {
    materials_header: Regex,
    labor_header: Regex,
    date_range: Regex,
}

impl FormatPatterns {
    pub fn compile() -> Result<Self, regex::Error> {
        Ok(Self {
            materials_header: Regex::new(MATERIALS_HEADER_PATTERN)?,
            labor_header: Regex::new(LABOR_HEADER_PATTERN)?,
            date_range: Regex::new(DATE_RANGE_PATTERN)?,
        })
    }

    /// Check whether a line is the given section's header
    pub fn is_header(&self, section: Section, line: &str) -> bool {
        let pattern = match section {
            Section::Materials => &self.materials_header,
            Section::Labor => &self.labor_header,
        };
        pattern.is_match(line.trim())
    }

    /// Extract the raw `(from, to)` dates of a "Desde Fecha ... Hasta Fecha ..." line
    pub fn date_range<'l>(&self, line: &'l str) -> Option<(&'l str, &'l str)> {
        let captures = self.date_range.captures(line)?;
        Some((captures.get(1)?.as_str(), captures.get(2)?.as_str()))
    }
}

/// State machine over the guide lines of one report
#[derive(Debug)]
pub struct SectionScanner<'a> {
    lines: &'a [&'a str],
    patterns: &'a FormatPatterns,
    cursor: usize,
    state: ScanState,
}

impl<'a> SectionScanner<'a> {
    pub fn new(lines: &'a [&'a str], patterns: &'a FormatPatterns) -> Self {
        Self {
            lines,
            patterns,
            cursor: 0,
            state: ScanState::Preamble,
        }
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    fn line(&self, index: usize) -> Option<&'a str> {
        self.lines.get(index).map(|line| strip_terminator(*line))
    }

    fn step(&mut self) -> Result<Option<ScanEvent>, ReportError> {
        match self.state {
            ScanState::Preamble => self.seek_header(Section::Materials).map(Some),
            ScanState::Materials => Ok(Some(self.scan_section(Section::Materials))),
            ScanState::LaborSeek => self.seek_header(Section::Labor).map(Some),
            ScanState::Labor => Ok(Some(self.scan_section(Section::Labor))),
            ScanState::Done => Ok(None),
        }
    }

    /// Skip ahead to a section header
    ///
    /// Before the materials section the first delimiter-led line must be its
    /// header. Between sections, delimiter-led lines such as the totals rule
    /// are skipped until the labor header shows up.
    fn seek_header(&mut self, section: Section) -> Result<ScanEvent, ReportError> {
        let strict = section == Section::Materials;

        while let Some(line) = self.line(self.cursor) {
            let line_number = self.cursor + 1;

            if line.starts_with(SECTION_DELIMITER) {
                if self.patterns.is_header(section, line) {
                    self.cursor += 1;
                    self.skip_header_trailer();
                    self.state = section.scanning_state();
                    return Ok(ScanEvent::SectionStarted {
                        section,
                        header_line: line_number,
                    });
                }

                if strict {
                    return Err(ReportError::UnexpectedSectionLine {
                        expected: section,
                        line_number,
                        content: line.trim().to_string(),
                    });
                }
            }

            self.cursor += 1;
        }

        Err(ReportError::MissingSectionHeader { section })
    }

    /// Skip the column captions and the rule line under a section header
    fn skip_header_trailer(&mut self) {
        if self
            .line(self.cursor)
            .is_some_and(|line| !line.starts_with(SECTION_DELIMITER))
        {
            self.cursor += 1;
        }
        if self
            .line(self.cursor)
            .is_some_and(|line| line.starts_with(SECTION_DELIMITER))
        {
            self.cursor += 1;
        }
    }

    fn scan_section(&mut self, section: Section) -> ScanEvent {
        let Some(line) = self.line(self.cursor) else {
            self.state = section.following_state();
            return ScanEvent::SectionEnded {
                section,
                end: SectionEnd::EndOfInput,
            };
        };

        let line_number = self.cursor + 1;
        self.cursor += 1;

        if line.is_empty() {
            return ScanEvent::PageBreak {
                section,
                line_number,
            };
        }

        if line == section.terminal_marker() {
            self.state = section.following_state();
            return ScanEvent::SectionEnded {
                section,
                end: SectionEnd::TerminalMarker { line_number },
            };
        }

        ScanEvent::Row {
            section,
            line_number,
        }
    }
}

impl Iterator for SectionScanner<'_> {
    type Item = Result<ScanEvent, ReportError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.step() {
            Ok(event) => event.map(Ok),
            Err(error) => {
                self.state = ScanState::Done;
                Some(Err(error))
            }
        }
    }
}
