//! Conversion of parsed reports into polars DataFrames
//!
//! One row per record, tagged with the work order it came from. Pricing of
//! a side that was not supplied becomes a null cell, never zero.

use chrono::NaiveDate;
use polars::prelude::{Column, DataFrame, PolarsResult};

use crate::app::models::{LaborRecord, MaterialRecord, ParsedReport};
use crate::constants::{labor_output, material_output};

fn material_rows<'a>(
    reports: impl IntoIterator<Item = &'a ParsedReport>,
) -> Vec<(&'a str, &'a MaterialRecord)> {
    reports
        .into_iter()
        .flat_map(|report| {
            report
                .materials()
                .iter()
                .map(move |record| (report.report_id(), record))
        })
        .collect()
}

fn labor_rows<'a>(
    reports: impl IntoIterator<Item = &'a ParsedReport>,
) -> Vec<(&'a str, &'a LaborRecord)> {
    reports
        .into_iter()
        .flat_map(|report| {
            report
                .labor()
                .iter()
                .map(move |record| (report.report_id(), record))
        })
        .collect()
}

fn text_column<R>(name: &str, rows: &[R], value: impl Fn(&R) -> &str) -> Column {
    let values: Vec<&str> = rows.iter().map(value).collect();
    Column::new(name.into(), values)
}

fn number_column<R>(name: &str, rows: &[R], value: impl Fn(&R) -> f64) -> Column {
    let values: Vec<f64> = rows.iter().map(value).collect();
    Column::new(name.into(), values)
}

fn optional_column<R>(name: &str, rows: &[R], value: impl Fn(&R) -> Option<f64>) -> Column {
    let values: Vec<Option<f64>> = rows.iter().map(value).collect();
    Column::new(name.into(), values)
}

fn date_column<R>(name: &str, rows: &[R], value: impl Fn(&R) -> NaiveDate) -> Column {
    let values: Vec<NaiveDate> = rows.iter().map(value).collect();
    Column::new(name.into(), values)
}

fn line_column<R>(name: &str, rows: &[R], value: impl Fn(&R) -> usize) -> Column {
    let values: Vec<u64> = rows.iter().map(|row| value(row) as u64).collect();
    Column::new(name.into(), values)
}

/// Build the materials table of one or more reports
pub fn materials_frame<'a>(
    reports: impl IntoIterator<Item = &'a ParsedReport>,
) -> PolarsResult<DataFrame> {
    let rows = material_rows(reports);
    let cost = |(_, r): &(&str, &MaterialRecord)| r.cost;
    let sell = |(_, r): &(&str, &MaterialRecord)| r.sell;

    DataFrame::new(vec![
        line_column(material_output::LINE, &rows, |(_, r)| r.line_number),
        text_column(material_output::REPORT, &rows, |(id, _)| *id),
        text_column(material_output::REFERENCE, &rows, |(_, r)| r.reference.as_str()),
        text_column(material_output::DESCRIPTION, &rows, |(_, r)| r.description.as_str()),
        date_column(material_output::DATE, &rows, |(_, r)| r.date),
        number_column(material_output::QUANTITY, &rows, |(_, r)| r.quantity),
        optional_column(material_output::UNIT_COST, &rows, |row| {
            cost(row).map(|p| p.unit_price)
        }),
        optional_column(material_output::TOTAL_COST, &rows, |row| {
            cost(row).map(|p| p.amount)
        }),
        optional_column(material_output::UNIT_SELL, &rows, |row| {
            sell(row).map(|p| p.unit_price)
        }),
        optional_column(material_output::TOTAL_SELL, &rows, |row| {
            sell(row).map(|p| p.amount)
        }),
    ])
}

/// Build the labor table of one or more reports
pub fn labor_frame<'a>(
    reports: impl IntoIterator<Item = &'a ParsedReport>,
) -> PolarsResult<DataFrame> {
    let rows = labor_rows(reports);
    let cost = |(_, r): &(&str, &LaborRecord)| r.cost;
    let sell = |(_, r): &(&str, &LaborRecord)| r.sell;

    DataFrame::new(vec![
        line_column(labor_output::LINE, &rows, |(_, r)| r.line_number),
        text_column(labor_output::REPORT, &rows, |(id, _)| *id),
        text_column(labor_output::OPERATION_ID, &rows, |(_, r)| r.operation_id.as_str()),
        text_column(labor_output::OPERATION, &rows, |(_, r)| r.operation.as_str()),
        date_column(labor_output::DATE, &rows, |(_, r)| r.date),
        text_column(labor_output::OPERATOR_ID, &rows, |(_, r)| r.operator_id.as_str()),
        text_column(labor_output::OPERATOR_NAME, &rows, |(_, r)| r.operator_name.as_str()),
        number_column(labor_output::QUANTITY, &rows, |(_, r)| r.quantity),
        optional_column(labor_output::UNIT_COST, &rows, |row| {
            cost(row).map(|p| p.unit_price)
        }),
        optional_column(labor_output::TOTAL_COST, &rows, |row| {
            cost(row).map(|p| p.amount)
        }),
        optional_column(labor_output::PER_DIEM_COST, &rows, |row| {
            cost(row).map(|p| p.per_diem)
        }),
        optional_column(labor_output::TRAVEL_COST, &rows, |row| {
            cost(row).map(|p| p.travel)
        }),
        optional_column(labor_output::UNIT_SELL, &rows, |row| {
            sell(row).map(|p| p.unit_price)
        }),
        optional_column(labor_output::TOTAL_SELL, &rows, |row| {
            sell(row).map(|p| p.amount)
        }),
        optional_column(labor_output::PER_DIEM_SELL, &rows, |row| {
            sell(row).map(|p| p.per_diem)
        }),
        optional_column(labor_output::TRAVEL_SELL, &rows, |row| {
            sell(row).map(|p| p.travel)
        }),
    ])
}
