//! Fixed-offset field extraction for report rows
//!
//! Offsets are character positions, not bytes: operator names and
//! descriptions routinely contain accented letters. Slicing past the end of
//! a short line yields an empty field rather than an error.

use std::fmt;

use crate::constants::{ColumnSpan, labor_columns, material_columns};

/// Named column of a material or labor row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Field {
    Reference,
    Description,
    Date,
    Quantity,
    OperationId,
    Operation,
    OperatorId,
    OperatorName,
    UnitCost,
    TotalCost,
    PerDiemCost,
    TravelCost,
    UnitSell,
    TotalSell,
    PerDiemSell,
    TravelSell,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Reference => "reference",
            Field::Description => "description",
            Field::Date => "date",
            Field::Quantity => "quantity",
            Field::OperationId => "operation id",
            Field::Operation => "operation",
            Field::OperatorId => "operator id",
            Field::OperatorName => "operator name",
            Field::UnitCost => "unit cost",
            Field::TotalCost => "total cost",
            Field::PerDiemCost => "per diem cost",
            Field::TravelCost => "travel cost",
            Field::UnitSell => "unit sell",
            Field::TotalSell => "total sell",
            Field::PerDiemSell => "per diem sell",
            Field::TravelSell => "travel sell",
        };
        f.write_str(name)
    }
}

/// Fields that must read identically on the cost and sell copy of a material row
pub const MATERIAL_IDENTITY_COLUMNS: [(Field, ColumnSpan); 4] = [
    (Field::Reference, material_columns::REFERENCE),
    (Field::Description, material_columns::DESCRIPTION),
    (Field::Date, material_columns::DATE),
    (Field::Quantity, material_columns::QUANTITY),
];

/// Fields that must read identically on the cost and sell copy of a labor row
pub const LABOR_IDENTITY_COLUMNS: [(Field, ColumnSpan); 6] = [
    (Field::OperationId, labor_columns::OPERATION_ID),
    (Field::Operation, labor_columns::OPERATION),
    (Field::Date, labor_columns::DATE),
    (Field::OperatorId, labor_columns::OPERATOR_ID),
    (Field::OperatorName, labor_columns::OPERATOR_NAME),
    (Field::Quantity, labor_columns::QUANTITY),
];

/// Remove a trailing `\n` or `\r\n` from a raw line
pub fn strip_terminator(line: &str) -> &str {
    line.trim_end_matches(['\n', '\r'])
}

/// Slice the character columns `[start, end)` out of a line and trim them
pub fn slice_columns(line: &str, (start, end): ColumnSpan) -> &str {
    let line = strip_terminator(line);
    let from = byte_offset(line, start);
    let to = byte_offset(line, end).max(from);
    line[from..to].trim()
}

fn byte_offset(line: &str, column: usize) -> usize {
    line.char_indices()
        .nth(column)
        .map_or(line.len(), |(offset, _)| offset)
}

/// The aligned raw lines of one row
///
/// A side is `Some` exactly when that side's export is in use; a missing
/// aligned line on an active side is passed as an empty string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowLines<'a> {
    pub guide: &'a str,
    pub cost: Option<&'a str>,
    pub sell: Option<&'a str>,
}

impl<'a> RowLines<'a> {
    pub fn new(guide: &'a str, cost: Option<&'a str>, sell: Option<&'a str>) -> Self {
        Self { guide, cost, sell }
    }
}

/// Raw price fields of one side of a material row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawMaterialPricing<'a> {
    pub unit_price: &'a str,
    pub amount: &'a str,
}

/// Raw, trimmed fields of a material row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawMaterialRow<'a> {
    pub reference: &'a str,
    pub description: &'a str,
    pub date: &'a str,
    pub quantity: &'a str,
    pub cost: Option<RawMaterialPricing<'a>>,
    pub sell: Option<RawMaterialPricing<'a>>,
}

/// Raw price fields of one side of a labor row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawLaborPricing<'a> {
    pub unit_price: &'a str,
    pub amount: &'a str,
    pub per_diem: &'a str,
    pub travel: &'a str,
}

/// Raw, trimmed fields of a labor row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawLaborRow<'a> {
    pub operation_id: &'a str,
    pub operation: &'a str,
    pub date: &'a str,
    pub operator_id: &'a str,
    pub operator_name: &'a str,
    pub quantity: &'a str,
    pub cost: Option<RawLaborPricing<'a>>,
    pub sell: Option<RawLaborPricing<'a>>,
}

/// Slice a material row: identity fields from the guide, prices per side
pub fn extract_material<'a>(lines: &RowLines<'a>) -> RawMaterialRow<'a> {
    let pricing = |line: &'a str| RawMaterialPricing {
        unit_price: slice_columns(line, material_columns::UNIT_PRICE),
        amount: slice_columns(line, material_columns::AMOUNT),
    };

    RawMaterialRow {
        reference: slice_columns(lines.guide, material_columns::REFERENCE),
        description: slice_columns(lines.guide, material_columns::DESCRIPTION),
        date: slice_columns(lines.guide, material_columns::DATE),
        quantity: slice_columns(lines.guide, material_columns::QUANTITY),
        cost: lines.cost.map(pricing),
        sell: lines.sell.map(pricing),
    }
}

/// Slice a labor row: identity fields from the guide, prices per side
pub fn extract_labor<'a>(lines: &RowLines<'a>) -> RawLaborRow<'a> {
    let pricing = |line: &'a str| RawLaborPricing {
        unit_price: slice_columns(line, labor_columns::UNIT_PRICE),
        amount: slice_columns(line, labor_columns::AMOUNT),
        per_diem: slice_columns(line, labor_columns::PER_DIEM),
        travel: slice_columns(line, labor_columns::TRAVEL),
    };

    RawLaborRow {
        operation_id: slice_columns(lines.guide, labor_columns::OPERATION_ID),
        operation: slice_columns(lines.guide, labor_columns::OPERATION),
        date: slice_columns(lines.guide, labor_columns::DATE),
        operator_id: slice_columns(lines.guide, labor_columns::OPERATOR_ID),
        operator_name: slice_columns(lines.guide, labor_columns::OPERATOR_NAME),
        quantity: slice_columns(lines.guide, labor_columns::QUANTITY),
        cost: lines.cost.map(pricing),
        sell: lines.sell.map(pricing),
    }
}
