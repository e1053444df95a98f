//! Tests for section segmentation

use super::*;
use crate::app::services::report_parser::ReportError;
use crate::app::services::report_parser::scanner::{
    FormatPatterns, ScanEvent, ScanState, Section, SectionEnd, SectionScanner,
};

fn patterns() -> FormatPatterns {
    FormatPatterns::compile().unwrap()
}

fn scan(lines: &[String]) -> Vec<Result<ScanEvent, ReportError>> {
    let patterns = patterns();
    let lines = as_strs(lines);
    SectionScanner::new(&lines, &patterns).collect()
}

fn rows(events: &[Result<ScanEvent, ReportError>]) -> Vec<(Section, usize)> {
    events
        .iter()
        .filter_map(|event| match event {
            Ok(ScanEvent::Row {
                section,
                line_number,
            }) => Some((*section, *line_number)),
            _ => None,
        })
        .collect()
}

#[test]
fn test_full_document_event_sequence() {
    let lines = ReportFixture::new()
        .material(cable_row("0,20", "8,00"))
        .labor(assembly_row("30,00", "90,00"))
        .close_labor()
        .lines();

    let events: Vec<ScanEvent> = scan(&lines).into_iter().map(Result::unwrap).collect();

    assert_eq!(
        events,
        vec![
            ScanEvent::SectionStarted {
                section: Section::Materials,
                header_line: 8,
            },
            ScanEvent::Row {
                section: Section::Materials,
                line_number: 11,
            },
            ScanEvent::SectionEnded {
                section: Section::Materials,
                end: SectionEnd::TerminalMarker { line_number: 12 },
            },
            ScanEvent::SectionStarted {
                section: Section::Labor,
                header_line: 15,
            },
            ScanEvent::Row {
                section: Section::Labor,
                line_number: 18,
            },
            ScanEvent::SectionEnded {
                section: Section::Labor,
                end: SectionEnd::TerminalMarker { line_number: 19 },
            },
        ]
    );
}

#[test]
fn test_labor_runs_to_end_of_input() {
    let lines = ReportFixture::new()
        .labor(assembly_row("30,00", "90,00"))
        .labor(assembly_row("30,00", "90,00"))
        .lines();

    let events = scan(&lines);

    assert_eq!(
        events.last().cloned().unwrap().unwrap(),
        ScanEvent::SectionEnded {
            section: Section::Labor,
            end: SectionEnd::EndOfInput,
        }
    );
    assert_eq!(
        rows(&events),
        vec![(Section::Labor, 17), (Section::Labor, 18)]
    );
}

#[test]
fn test_page_breaks_do_not_end_section() {
    let lines = ReportFixture::new()
        .material(cable_row("0,20", "8,00"))
        .material("")
        .material("\n")
        .material("\r\n")
        .material(cable_row("0,21", "8,40"))
        .lines();

    let events = scan(&lines);
    let page_breaks: Vec<usize> = events
        .iter()
        .filter_map(|event| match event {
            Ok(ScanEvent::PageBreak { line_number, .. }) => Some(*line_number),
            _ => None,
        })
        .collect();

    assert_eq!(page_breaks, vec![12, 13, 14]);
    assert_eq!(
        rows(&events),
        vec![(Section::Materials, 11), (Section::Materials, 15)]
    );
}

#[test]
fn test_terminated_lines_classify_like_clean_lines() {
    let clean = ReportFixture::new()
        .material(cable_row("0,20", "8,00"))
        .labor(assembly_row("30,00", "90,00"))
        .close_labor()
        .lines();
    let terminated: Vec<String> = clean.iter().map(|line| format!("{}\r\n", line)).collect();

    assert_eq!(scan(&clean), scan(&terminated));
}

#[test]
fn test_header_followed_directly_by_rule() {
    let lines = vec![
        "preamble".to_string(),
        materials_header(),
        rule_line(),
        cable_row("0,20", "8,00"),
        MATERIALS_TERMINAL_MARKER.to_string(),
        labor_header(),
        rule_line(),
        assembly_row("30,00", "90,00"),
    ];

    let events = scan(&lines);

    assert_eq!(
        rows(&events),
        vec![(Section::Materials, 4), (Section::Labor, 8)]
    );
}

#[test]
fn test_unexpected_delimiter_line_before_materials() {
    let mut lines = ReportFixture::new().lines();
    lines.insert(6, rule_line());

    let events = scan(&lines);

    assert_eq!(events.len(), 1);
    assert_eq!(
        events[0],
        Err(ReportError::UnexpectedSectionLine {
            expected: Section::Materials,
            line_number: 7,
            content: rule_line(),
        })
    );
}

#[test]
fn test_missing_materials_header() {
    let lines = vec!["title".to_string(), DATE_RANGE_LINE.to_string()];

    assert_eq!(
        scan(&lines),
        vec![Err(ReportError::MissingSectionHeader {
            section: Section::Materials,
        })]
    );
}

#[test]
fn test_missing_labor_header() {
    let lines = ReportFixture::new()
        .material(cable_row("0,20", "8,00"))
        .without_labor_section()
        .lines();

    let events = scan(&lines);

    assert_eq!(
        events.last().cloned().unwrap(),
        Err(ReportError::MissingSectionHeader {
            section: Section::Labor,
        })
    );
    assert_eq!(rows(&events), vec![(Section::Materials, 11)]);
}

#[test]
fn test_truncated_materials_then_missing_labor() {
    let lines = ReportFixture::new()
        .material(cable_row("0,20", "8,00"))
        .truncated_materials()
        .lines();

    let events = scan(&lines);

    assert_eq!(
        &events[events.len() - 2..],
        &[
            Ok(ScanEvent::SectionEnded {
                section: Section::Materials,
                end: SectionEnd::EndOfInput,
            }),
            Err(ReportError::MissingSectionHeader {
                section: Section::Labor,
            }),
        ]
    );
}

#[test]
fn test_scanner_is_done_after_error() {
    let patterns = patterns();
    let lines = ["no header here"];
    let mut scanner = SectionScanner::new(&lines, &patterns);

    assert!(scanner.next().unwrap().is_err());
    assert_eq!(scanner.state(), ScanState::Done);
    assert!(scanner.next().is_none());
}

#[test]
fn test_header_pattern_requires_delimiters() {
    let patterns = patterns();

    assert!(patterns.is_header(Section::Materials, &materials_header()));
    assert!(patterns.is_header(Section::Labor, &labor_header()));
    assert!(!patterns.is_header(Section::Labor, &materials_header()));
    assert!(!patterns.is_header(Section::Materials, "M A T E R I A L"));
}

#[test]
fn test_date_range_extraction() {
    let patterns = patterns();

    assert_eq!(
        patterns.date_range(DATE_RANGE_LINE),
        Some(("01/01/2024", "31/12/2024"))
    );
    assert_eq!(patterns.date_range("Desde Fecha 01/01/2024"), None);
}
