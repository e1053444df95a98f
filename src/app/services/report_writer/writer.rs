//! Output file writing for parsed reports

use polars::prelude::{CsvWriter, DataFrame, ParquetWriter, SerWriter};
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::frames::{labor_frame, materials_frame};
use crate::app::models::ParsedReport;
use crate::config::OutputFormat;
use crate::constants::{
    CSV_SEPARATOR, DATE_FORMAT, FILE_NAME_DATE_FORMAT, LABOR_OUTPUT_SUFFIX, MATERIALS_OUTPUT_SUFFIX,
    MERGED_OUTPUT_STEM,
};
use crate::{Error, Result};

/// Paths of the two tables written for one output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenTables {
    pub materials: PathBuf,
    pub labor: PathBuf,
}

/// Writes materials and labor tables to an output directory
#[derive(Debug, Clone)]
pub struct ReportWriter {
    output_dir: PathBuf,
    format: OutputFormat,
}

impl ReportWriter {
    pub fn new(output_dir: impl Into<PathBuf>, format: OutputFormat) -> Self {
        Self {
            output_dir: output_dir.into(),
            format,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// File stem for one report: `<OT>_de_<ddmmyyyy>_a_<ddmmyyyy>`
    pub fn report_stem(report: &ParsedReport) -> String {
        let range = report.date_range();
        format!(
            "{}_de_{}_a_{}",
            report.report_id(),
            range.from.format(FILE_NAME_DATE_FORMAT),
            range.to.format(FILE_NAME_DATE_FORMAT)
        )
    }

    /// Write the two tables of a single report
    pub fn write_report(&self, report: &ParsedReport) -> Result<WrittenTables> {
        let stem = Self::report_stem(report);
        self.write_tables(&stem, &[report])
    }

    /// Write the concatenated tables of several reports, ordered by work order
    pub fn write_merged(&self, reports: &[ParsedReport]) -> Result<WrittenTables> {
        let mut ordered: Vec<&ParsedReport> = reports.iter().collect();
        ordered.sort_by(|a, b| a.report_id().cmp(b.report_id()));

        let tables = self.write_tables(MERGED_OUTPUT_STEM, &ordered)?;
        info!(
            "Merged {} reports into {} and {}",
            ordered.len(),
            tables.materials.display(),
            tables.labor.display()
        );
        Ok(tables)
    }

    fn write_tables(&self, stem: &str, reports: &[&ParsedReport]) -> Result<WrittenTables> {
        std::fs::create_dir_all(&self.output_dir).map_err(|e| {
            Error::io(
                format!("Failed to create output directory {}", self.output_dir.display()),
                e,
            )
        })?;

        let tables = WrittenTables {
            materials: self.table_path(stem, MATERIALS_OUTPUT_SUFFIX),
            labor: self.table_path(stem, LABOR_OUTPUT_SUFFIX),
        };

        let mut materials = materials_frame(reports.iter().copied())
            .map_err(|e| Error::output_writing("Failed to build materials table", e))?;
        self.write_frame(&mut materials, &tables.materials)?;

        let mut labor = labor_frame(reports.iter().copied())
            .map_err(|e| Error::output_writing("Failed to build labor table", e))?;
        self.write_frame(&mut labor, &tables.labor)?;

        Ok(tables)
    }

    fn table_path(&self, stem: &str, suffix: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}_{}.{}", stem, suffix, self.format.extension()))
    }

    fn write_frame(&self, df: &mut DataFrame, path: &Path) -> Result<()> {
        let file = File::create(path)
            .map_err(|e| Error::io(format!("Failed to create {}", path.display()), e))?;

        let written = match self.format {
            OutputFormat::Csv => CsvWriter::new(file)
                .include_header(true)
                .with_separator(CSV_SEPARATOR)
                .with_date_format(Some(DATE_FORMAT.to_string()))
                .finish(df),
            OutputFormat::Parquet => ParquetWriter::new(file).finish(df).map(|_| ()),
        };
        written.map_err(|e| Error::output_writing(format!("Failed to write {}", path.display()), e))?;

        debug!("Wrote {} rows to {}", df.height(), path.display());
        Ok(())
    }
}
