//! Format contracts and application constants
//!
//! This module contains the fixed column layout of the legacy cost sheet
//! export, the section markers that delimit it, file naming patterns and the
//! captions used for the output tables. None of the column offsets are
//! configurable: they are part of the source format.

// =============================================================================
// Column Layout
// =============================================================================

/// A half-open character column range `[start, end)` within a report line
pub type ColumnSpan = (usize, usize);

/// Column layout of a material row
///
/// ```text
/// PHO3208100       BORNA CONEIXION PIT-1,5/S                03/05/2024       50,00           0,403           20,15
/// ```
pub mod material_columns {
    use super::ColumnSpan;

    pub const REFERENCE: ColumnSpan = (0, 16);
    pub const DESCRIPTION: ColumnSpan = (16, 57);
    pub const DATE: ColumnSpan = (57, 68);
    pub const QUANTITY: ColumnSpan = (68, 80);
    pub const UNIT_PRICE: ColumnSpan = (80, 96);
    pub const AMOUNT: ColumnSpan = (96, 112);
}

/// Column layout of a labor row
///
/// ```text
///    1 ARMADO DE CUADRO DE DINA 20/08/2024  109 GARCIA RODRIGUEZ, KEVIN     3,00   30,00     0,00   0,00      90,00
/// ```
pub mod labor_columns {
    use super::ColumnSpan;

    pub const OPERATION_ID: ColumnSpan = (0, 4);
    pub const OPERATION: ColumnSpan = (4, 29);
    pub const DATE: ColumnSpan = (29, 40);
    pub const OPERATOR_ID: ColumnSpan = (40, 45);
    pub const OPERATOR_NAME: ColumnSpan = (45, 70);
    pub const QUANTITY: ColumnSpan = (70, 78);
    pub const UNIT_PRICE: ColumnSpan = (78, 86);
    pub const PER_DIEM: ColumnSpan = (86, 95);
    pub const TRAVEL: ColumnSpan = (95, 102);
    pub const AMOUNT: ColumnSpan = (102, 113);
}

// =============================================================================
// Section Markers
// =============================================================================

/// Glyph that starts every section header and rule line
pub const SECTION_DELIMITER: char = '_';

/// Zero-based index of the line holding "Desde Fecha ... Hasta Fecha ..."
pub const DATE_RANGE_LINE_INDEX: usize = 5;

/// Pattern of the declared date range on the header line
pub const DATE_RANGE_PATTERN: &str =
    r"Desde Fecha\s+([0-9]{2}/[0-9]{2}/[0-9]{4})\s+Hasta Fecha\s+([0-9]{2}/[0-9]{2}/[0-9]{4})";

/// Pattern of the materials section header (matched against the trimmed line)
pub const MATERIALS_HEADER_PATTERN: &str = r"^_+M A T E R I A L_+$";

/// Pattern of the labor section header (matched against the trimmed line)
pub const LABOR_HEADER_PATTERN: &str = r"^_+M A N O   D E   O B R A_+$";

/// Underline of the materials totals row; closes the materials section
pub const MATERIALS_TERMINAL_MARKER: &str = concat!(
    "                                                                     ",
    "___________",
    "                 ",
    "_______________",
);

/// Underline of the labor totals row; closes the labor section
pub const LABOR_TERMINAL_MARKER: &str = concat!(
    "                                                                    ",
    "__________",
    "         ",
    "________",
    " ",
    "______",
    " ",
    "__________",
);

// =============================================================================
// Field Formats
// =============================================================================

/// Thousands separator used by the source locale
pub const THOUSANDS_SEPARATOR: char = '.';

/// Decimal separator used by the source locale
pub const DECIMAL_SEPARATOR: char = ',';

/// Date format of every date field (`dd/mm/yyyy`)
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Compact date format used in output file names (`ddmmyyyy`)
pub const FILE_NAME_DATE_FORMAT: &str = "%d%m%Y";

// =============================================================================
// Project Files
// =============================================================================

/// Pattern of an export file name: six-digit OT followed by its side
pub const EXPORT_FILE_NAME_PATTERN: &str = r"^([0-9]{6})(coste|venta)\.txt$";

/// File name suffix of the cost copy
pub const COST_FILE_SUFFIX: &str = "coste";

/// File name suffix of the sell copy
pub const SELL_FILE_SUFFIX: &str = "venta";

/// Output file stem for merged reports
pub const MERGED_OUTPUT_STEM: &str = "OT_juntadas";

/// Output file suffix for the materials table
pub const MATERIALS_OUTPUT_SUFFIX: &str = "materiales";

/// Output file suffix for the labor table
pub const LABOR_OUTPUT_SUFFIX: &str = "manodeobra";

/// Field separator for CSV output; numbers are written with `.` decimals
pub const CSV_SEPARATOR: u8 = b';';

// =============================================================================
// Output Columns
// =============================================================================

/// Column captions of the materials table
pub mod material_output {
    pub const LINE: &str = "Linea fichero original";
    pub const REPORT: &str = "Numero OT";
    pub const REFERENCE: &str = "Referencia";
    pub const DESCRIPTION: &str = "Descripcion";
    pub const DATE: &str = "Fecha";
    pub const QUANTITY: &str = "Cantidad";
    pub const UNIT_COST: &str = "Precio Coste";
    pub const TOTAL_COST: &str = "Importe Coste";
    pub const UNIT_SELL: &str = "Precio Venta";
    pub const TOTAL_SELL: &str = "Importe Venta";
}

/// Column captions of the labor table
pub mod labor_output {
    pub const LINE: &str = "Linea fichero original";
    pub const REPORT: &str = "Numero OT";
    pub const OPERATION_ID: &str = "Operacion Id";
    pub const OPERATION: &str = "Operacion";
    pub const DATE: &str = "Fecha";
    pub const OPERATOR_ID: &str = "Operario Id";
    pub const OPERATOR_NAME: &str = "Operario Nombre";
    pub const QUANTITY: &str = "Cantidad";
    pub const UNIT_COST: &str = "Precio Coste";
    pub const TOTAL_COST: &str = "Importe Coste";
    pub const PER_DIEM_COST: &str = "Dietas Coste";
    pub const TRAVEL_COST: &str = "Desplazamiento Coste";
    pub const UNIT_SELL: &str = "Precio Venta";
    pub const TOTAL_SELL: &str = "Importe Venta";
    pub const PER_DIEM_SELL: &str = "Dietas Venta";
    pub const TRAVEL_SELL: &str = "Desplazamiento Venta";
}

// =============================================================================
// Environment
// =============================================================================

/// Environment variable overriding the input directory
pub const ENV_INPUT_DIR: &str = "COST_SHEET_INPUT_DIR";

/// Environment variable overriding the output directory
pub const ENV_OUTPUT_DIR: &str = "COST_SHEET_OUTPUT_DIR";

/// Environment variable overriding the source encoding
pub const ENV_ENCODING: &str = "COST_SHEET_ENCODING";

/// Environment variable overriding the output format
pub const ENV_FORMAT: &str = "COST_SHEET_FORMAT";

/// Environment variable overriding the number of concurrent reports
pub const ENV_JOBS: &str = "COST_SHEET_JOBS";
