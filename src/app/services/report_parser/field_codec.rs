//! Locale-aware field decoding for cost sheet rows
//!
//! The legacy export prints numbers as `1.677,10` (dot for thousands, comma
//! for decimals) and dates as `dd/mm/yyyy`. These functions turn a raw field
//! into a value or fail; they never guess at malformed text.

use chrono::NaiveDate;
use thiserror::Error;

use crate::constants::{DATE_FORMAT, DECIMAL_SEPARATOR, THOUSANDS_SEPARATOR};

/// Why a single raw field could not be decoded
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("field is empty")]
    Empty,

    #[error("malformed value '{raw}'")]
    Format { raw: String },
}

impl FieldError {
    fn format(raw: &str) -> Self {
        Self::Format {
            raw: raw.to_string(),
        }
    }
}

/// Parse a quantity field
pub fn parse_quantity(raw: &str) -> Result<f64, FieldError> {
    parse_decimal(raw)
}

/// Parse a price, amount, per diem or travel field
pub fn parse_amount(raw: &str) -> Result<f64, FieldError> {
    parse_decimal(raw)
}

/// Parse a `dd/mm/yyyy` date field
///
/// Two-digit day, two-digit month and four-digit year are mandatory, and the
/// result must be a real calendar date.
pub fn parse_date(raw: &str) -> Result<NaiveDate, FieldError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FieldError::Empty);
    }

    // chrono accepts unpadded day/month, so the shape is checked first
    if !has_date_shape(trimmed) {
        return Err(FieldError::format(trimmed));
    }

    NaiveDate::parse_from_str(trimmed, DATE_FORMAT).map_err(|_| FieldError::format(trimmed))
}

fn has_date_shape(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            2 | 5 => *b == b'/',
            _ => b.is_ascii_digit(),
        })
}

fn parse_decimal(raw: &str) -> Result<f64, FieldError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FieldError::Empty);
    }

    let normalized: String = trimmed
        .chars()
        .filter(|c| *c != THOUSANDS_SEPARATOR)
        .map(|c| if c == DECIMAL_SEPARATOR { '.' } else { c })
        .collect();

    match normalized.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(FieldError::format(trimmed)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quantity_european_format() {
        assert_eq!(parse_quantity("1.677,10").unwrap(), 1677.10);
        assert_eq!(parse_quantity("0,403").unwrap(), 0.403);
        assert_eq!(parse_quantity("-27,00").unwrap(), -27.0);
        assert_eq!(parse_quantity("  10,00 ").unwrap(), 10.0);
    }

    #[test]
    fn test_parse_quantity_failures() {
        assert_eq!(parse_quantity(""), Err(FieldError::Empty));
        assert_eq!(parse_quantity("   "), Err(FieldError::Empty));
        assert_eq!(
            parse_quantity("12,34,56"),
            Err(FieldError::Format {
                raw: "12,34,56".to_string()
            })
        );
        assert!(matches!(parse_quantity("abc"), Err(FieldError::Format { .. })));
        assert!(matches!(parse_quantity("inf"), Err(FieldError::Format { .. })));
        assert!(matches!(parse_quantity("NaN"), Err(FieldError::Format { .. })));
    }

    #[test]
    fn test_parse_amount_thousands() {
        assert_eq!(parse_amount("14.845,22").unwrap(), 14845.22);
        assert_eq!(parse_amount("327,479").unwrap(), 327.479);
        assert_eq!(parse_amount("-327,48").unwrap(), -327.48);
    }

    #[test]
    fn test_parse_date_valid() {
        assert_eq!(
            parse_date("20/08/2024").unwrap(),
            NaiveDate::from_ymd_opt(2024, 8, 20).unwrap()
        );
        assert_eq!(
            parse_date(" 29/02/2024 ").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
    }

    #[test]
    fn test_parse_date_failures() {
        assert_eq!(parse_date(""), Err(FieldError::Empty));
        assert!(matches!(parse_date("32/13/2024"), Err(FieldError::Format { .. })));
        assert!(matches!(parse_date("29/02/2023"), Err(FieldError::Format { .. })));
        assert!(matches!(parse_date("1/2/2024"), Err(FieldError::Format { .. })));
        assert!(matches!(parse_date("2024-08-20"), Err(FieldError::Format { .. })));
        assert!(matches!(parse_date("20/08/24"), Err(FieldError::Format { .. })));
    }
}
