//! Row-level record construction
//!
//! Turns the aligned raw lines of one row into a validated record or a
//! [`RowError`]. Checks run in a fixed order: date and quantity, then the
//! cost side, then the sell side, and finally the cost/sell identity check.
//! No partially-filled record ever leaves this module.

use thiserror::Error;

use super::consistency::check_identity;
use super::extractor::{
    Field, LABOR_IDENTITY_COLUMNS, MATERIAL_IDENTITY_COLUMNS, RawLaborPricing,
    RawMaterialPricing, RowLines, extract_labor, extract_material,
};
use super::field_codec::{FieldError, parse_amount, parse_date, parse_quantity};
use crate::app::models::{LaborPricing, LaborRecord, MaterialPricing, MaterialRecord};

/// Why a row produced no record
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RowError {
    /// A required field is empty or malformed
    #[error("invalid row at line {line}: {field} {reason}")]
    Invalid {
        line: usize,
        field: Field,
        reason: FieldError,
    },

    /// The cost and sell copies disagree on an identity field
    #[error(
        "contradictory row at line {line}: {field} differs between cost '{cost_value}' and sell '{sell_value}'"
    )]
    Contradictory {
        line: usize,
        field: Field,
        cost_value: String,
        sell_value: String,
    },
}

impl RowError {
    /// 1-based line number of the offending row
    pub fn line(&self) -> usize {
        match self {
            RowError::Invalid { line, .. } | RowError::Contradictory { line, .. } => *line,
        }
    }

    /// Field that caused the failure
    pub fn field(&self) -> Field {
        match self {
            RowError::Invalid { field, .. } | RowError::Contradictory { field, .. } => *field,
        }
    }

    pub fn is_contradictory(&self) -> bool {
        matches!(self, RowError::Contradictory { .. })
    }
}

/// Attach field and line context to a codec failure
fn field_value<T>(
    result: Result<T, FieldError>,
    field: Field,
    line: usize,
) -> Result<T, RowError> {
    result.map_err(|reason| RowError::Invalid {
        line,
        field,
        reason,
    })
}

/// Build a material record from one row
pub fn build_material(lines: &RowLines<'_>, line_number: usize) -> Result<MaterialRecord, RowError> {
    let raw = extract_material(lines);

    let date = field_value(parse_date(raw.date), Field::Date, line_number)?;
    let quantity = field_value(parse_quantity(raw.quantity), Field::Quantity, line_number)?;

    let cost = raw
        .cost
        .map(|pricing| material_pricing(pricing, Field::UnitCost, Field::TotalCost, line_number))
        .transpose()?;
    let sell = raw
        .sell
        .map(|pricing| material_pricing(pricing, Field::UnitSell, Field::TotalSell, line_number))
        .transpose()?;

    if let (Some(cost_line), Some(sell_line)) = (lines.cost, lines.sell) {
        check_identity(cost_line, sell_line, line_number, &MATERIAL_IDENTITY_COLUMNS)?;
    }

    Ok(MaterialRecord {
        line_number,
        reference: raw.reference.to_string(),
        description: raw.description.to_string(),
        date,
        quantity,
        cost,
        sell,
    })
}

fn material_pricing(
    raw: RawMaterialPricing<'_>,
    unit_field: Field,
    amount_field: Field,
    line: usize,
) -> Result<MaterialPricing, RowError> {
    Ok(MaterialPricing {
        unit_price: field_value(parse_amount(raw.unit_price), unit_field, line)?,
        amount: field_value(parse_amount(raw.amount), amount_field, line)?,
    })
}

/// Build a labor record from one row
pub fn build_labor(lines: &RowLines<'_>, line_number: usize) -> Result<LaborRecord, RowError> {
    let raw = extract_labor(lines);

    let date = field_value(parse_date(raw.date), Field::Date, line_number)?;
    let quantity = field_value(parse_quantity(raw.quantity), Field::Quantity, line_number)?;

    let cost = raw
        .cost
        .map(|pricing| labor_pricing(pricing, LaborSide::Cost, line_number))
        .transpose()?;
    let sell = raw
        .sell
        .map(|pricing| labor_pricing(pricing, LaborSide::Sell, line_number))
        .transpose()?;

    if let (Some(cost_line), Some(sell_line)) = (lines.cost, lines.sell) {
        check_identity(cost_line, sell_line, line_number, &LABOR_IDENTITY_COLUMNS)?;
    }

    Ok(LaborRecord {
        line_number,
        operation_id: raw.operation_id.to_string(),
        operation: raw.operation.to_string(),
        date,
        operator_id: raw.operator_id.to_string(),
        operator_name: raw.operator_name.to_string(),
        quantity,
        cost,
        sell,
    })
}

#[derive(Clone, Copy)]
enum LaborSide {
    Cost,
    Sell,
}

impl LaborSide {
    /// Field names for (unit price, amount, per diem, travel)
    fn fields(self) -> [Field; 4] {
        match self {
            LaborSide::Cost => [
                Field::UnitCost,
                Field::TotalCost,
                Field::PerDiemCost,
                Field::TravelCost,
            ],
            LaborSide::Sell => [
                Field::UnitSell,
                Field::TotalSell,
                Field::PerDiemSell,
                Field::TravelSell,
            ],
        }
    }
}

fn labor_pricing(
    raw: RawLaborPricing<'_>,
    side: LaborSide,
    line: usize,
) -> Result<LaborPricing, RowError> {
    let [unit_field, amount_field, per_diem_field, travel_field] = side.fields();

    Ok(LaborPricing {
        unit_price: field_value(parse_amount(raw.unit_price), unit_field, line)?,
        amount: field_value(parse_amount(raw.amount), amount_field, line)?,
        per_diem: field_value(parse_amount(raw.per_diem), per_diem_field, line)?,
        travel: field_value(parse_amount(raw.travel), travel_field, line)?,
    })
}
