//! Tabular output of parsed reports
//!
//! Each output is a pair of tables, materials and labor, written as CSV or
//! Parquet through polars. Captions follow the spreadsheets the tables feed.
//!
//! - [`frames`] - DataFrame construction from parsed reports
//! - [`writer`] - File naming and CSV/Parquet writing

pub mod frames;
pub mod writer;

pub use frames::{labor_frame, materials_frame};
pub use writer::{ReportWriter, WrittenTables};
