//! Data models for cost sheet processing
//!
//! This module contains the record types produced by the report parser. A
//! record is only ever built from fully validated fields; the pricing of each
//! side (cost or sell) is present exactly when that side's export was supplied.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// =============================================================================
// Pricing
// =============================================================================

/// Price-bearing columns of a material row for one side of the report
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct MaterialPricing {
    /// Unit price
    pub unit_price: f64,

    /// Total amount of the row
    pub amount: f64,
}

/// Price-bearing columns of a labor row for one side of the report
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct LaborPricing {
    /// Hourly (or per unit) rate
    pub unit_price: f64,

    /// Total amount of the row
    pub amount: f64,

    /// Per diem allowance ("dietas")
    pub per_diem: f64,

    /// Travel allowance ("desplazamiento")
    pub travel: f64,
}

// =============================================================================
// Records
// =============================================================================

/// One line of the materials section
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MaterialRecord {
    /// 1-based line number in the guide export
    pub line_number: usize,

    /// Article reference (may be empty for free-text lines)
    pub reference: String,

    pub description: String,

    /// Date the material was booked against the work order
    pub date: NaiveDate,

    /// Quantity (negative for returns)
    pub quantity: f64,

    /// Cost-side pricing, present only when a cost export was supplied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<MaterialPricing>,

    /// Sell-side pricing, present only when a sell export was supplied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sell: Option<MaterialPricing>,
}

/// One line of the labor ("mano de obra") section
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LaborRecord {
    /// 1-based line number in the guide export
    pub line_number: usize,

    pub operation_id: String,

    pub operation: String,

    pub date: NaiveDate,

    pub operator_id: String,

    pub operator_name: String,

    /// Hours (or units) worked
    pub quantity: f64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<LaborPricing>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sell: Option<LaborPricing>,
}

// =============================================================================
// Parsed Report
// =============================================================================

/// Date range a report declares on its header line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self { from, to }
    }
}

/// Complete result of parsing one cost/sell export pair
///
/// The collections are filled during a single parse pass and cannot be
/// modified afterwards; consumers only get shared slices.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedReport {
    report_id: String,
    date_range: DateRange,
    materials: Vec<MaterialRecord>,
    labor: Vec<LaborRecord>,
}

impl ParsedReport {
    pub(crate) fn new(
        report_id: String,
        date_range: DateRange,
        materials: Vec<MaterialRecord>,
        labor: Vec<LaborRecord>,
    ) -> Self {
        Self {
            report_id,
            date_range,
            materials,
            labor,
        }
    }

    /// Work order (OT) identifier the report was parsed for
    pub fn report_id(&self) -> &str {
        &self.report_id
    }

    /// Declared date range of the report
    pub fn date_range(&self) -> DateRange {
        self.date_range
    }

    /// Material records in encounter order
    pub fn materials(&self) -> &[MaterialRecord] {
        &self.materials
    }

    /// Labor records in encounter order
    pub fn labor(&self) -> &[LaborRecord] {
        &self.labor
    }

    /// Total number of records across both sections
    pub fn record_count(&self) -> usize {
        self.materials.len() + self.labor.len()
    }
}
