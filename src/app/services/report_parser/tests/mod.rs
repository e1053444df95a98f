//! Test utilities for report parser testing
//!
//! This module provides fixed-width line builders and a small document
//! builder that lays out a report the way the legacy export does.

use crate::constants::{LABOR_TERMINAL_MARKER, MATERIALS_TERMINAL_MARKER};

mod scanner_tests;

pub const DATE_RANGE_LINE: &str =
    "     Desde Fecha  01/01/2024      Hasta Fecha  31/12/2024                 Valoración Coste";

/// 1-based line number of the first material row of a [`ReportFixture`]
pub const FIRST_MATERIAL_LINE: usize = 11;

/// Build a material row at the export's column offsets
pub fn material_row(
    reference: &str,
    description: &str,
    date: &str,
    quantity: &str,
    unit_price: &str,
    amount: &str,
) -> String {
    format!(
        "{:<16}{:<41}{:>11}{:>12}{:>16}{:>16}",
        reference, description, date, quantity, unit_price, amount
    )
}

/// Build a labor row at the export's column offsets
#[allow(clippy::too_many_arguments)]
pub fn labor_row(
    operation_id: &str,
    operation: &str,
    date: &str,
    operator_id: &str,
    operator_name: &str,
    quantity: &str,
    unit_price: &str,
    per_diem: &str,
    travel: &str,
    amount: &str,
) -> String {
    format!(
        "{:>4} {:<24}{:>11}{:>5} {:<24}{:>8}{:>8}{:>9}{:>7}{:>11}",
        operation_id,
        operation,
        date,
        operator_id,
        operator_name,
        quantity,
        unit_price,
        per_diem,
        travel,
        amount
    )
}

/// A well-formed material row with the given prices
pub fn cable_row(unit_price: &str, amount: &str) -> String {
    material_row(
        "CAB1,5LILA",
        "CABLE LILA 1,5 CPR LH CCA",
        "18/06/2024",
        "40,00",
        unit_price,
        amount,
    )
}

/// A well-formed labor row with the given rate and amount
pub fn assembly_row(unit_price: &str, amount: &str) -> String {
    labor_row(
        "1",
        "ARMADO DE CUADRO DE DINA",
        "20/08/2024",
        "109",
        "GARCIA RODRIGUEZ, KEVIN",
        "3,00",
        unit_price,
        "0,00",
        "0,00",
        amount,
    )
}

pub fn materials_header() -> String {
    format!("{}M A T E R I A L{}", "_".repeat(49), "_".repeat(49))
}

pub fn labor_header() -> String {
    format!("{}M A N O   D E   O B R A{}", "_".repeat(45), "_".repeat(45))
}

pub fn rule_line() -> String {
    "_".repeat(113)
}

/// Builder for a complete report export
///
/// Layout: seven preamble lines (the sixth carries the date range), the
/// materials header with captions and rule, the material rows, the materials
/// terminal marker and totals, then the labor header block and labor rows.
#[derive(Debug, Clone)]
pub struct ReportFixture {
    date_line: String,
    materials: Vec<String>,
    close_materials: bool,
    labor: Option<Vec<String>>,
    close_labor: bool,
}

impl Default for ReportFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFixture {
    pub fn new() -> Self {
        Self {
            date_line: DATE_RANGE_LINE.to_string(),
            materials: Vec::new(),
            close_materials: true,
            labor: Some(Vec::new()),
            close_labor: false,
        }
    }

    pub fn date_line(mut self, line: &str) -> Self {
        self.date_line = line.to_string();
        self
    }

    pub fn material(mut self, row: impl Into<String>) -> Self {
        self.materials.push(row.into());
        self
    }

    pub fn labor(mut self, row: impl Into<String>) -> Self {
        self.labor.get_or_insert_with(Vec::new).push(row.into());
        self
    }

    /// End the report inside the materials section
    pub fn truncated_materials(mut self) -> Self {
        self.close_materials = false;
        self.labor = None;
        self
    }

    /// Close the materials section but never open the labor section
    pub fn without_labor_section(mut self) -> Self {
        self.labor = None;
        self
    }

    pub fn close_labor(mut self) -> Self {
        self.close_labor = true;
        self
    }

    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![
            "HOJA DE COSTE POR ORDEN DE TRABAJO".to_string(),
            "INSTALACIONES ELECTRICAS DEL NORTE, S.L.".to_string(),
            String::new(),
            "     O.T.  240117   CUADRO GENERAL NAVE 3".to_string(),
            String::new(),
            self.date_line.clone(),
            String::new(),
            materials_header(),
            "Referencia       Descripción                              Fecha         Cantidad          Precio         Importe"
                .to_string(),
            rule_line(),
        ];
        lines.extend(self.materials.iter().cloned());

        if !self.close_materials {
            return lines;
        }
        lines.push(MATERIALS_TERMINAL_MARKER.to_string());
        lines.push(format!("{:>81}{:>16}", "1.677,10", "14.845,22"));
        lines.push(String::new());

        let Some(labor) = &self.labor else {
            lines.push("TOTAL O.T.".to_string());
            return lines;
        };

        lines.push(labor_header());
        lines.push(
            "Op.  Operación                Fecha      Oper. Nombre                 Cantidad  Precio   Dietas Despl.    Importe"
                .to_string(),
        );
        lines.push(rule_line());
        lines.extend(labor.iter().cloned());

        if self.close_labor {
            lines.push(LABOR_TERMINAL_MARKER.to_string());
            lines.push(format!("{:>78}{:>35}", "11,00", "590,00"));
        }

        lines
    }
}

/// Borrow owned fixture lines as `&str`
pub fn as_strs(lines: &[String]) -> Vec<&str> {
    lines.iter().map(String::as_str).collect()
}
