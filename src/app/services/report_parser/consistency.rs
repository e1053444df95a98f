//! Cost/sell cross-checking
//!
//! The cost and sell exports are two renderings of the same document. Their
//! identity columns are compared as raw trimmed text, before any numeric
//! decoding, so `10,00` and `10,0` count as a disagreement.

use super::extractor::{Field, slice_columns};
use super::record_builder::RowError;
use crate::constants::ColumnSpan;

/// Compare the identity columns of a cost line and a sell line
///
/// Fails on the first column whose trimmed text differs.
pub fn check_identity(
    cost_line: &str,
    sell_line: &str,
    line_number: usize,
    columns: &[(Field, ColumnSpan)],
) -> Result<(), RowError> {
    for &(field, span) in columns {
        let cost_value = slice_columns(cost_line, span);
        let sell_value = slice_columns(sell_line, span);

        if cost_value != sell_value {
            return Err(RowError::Contradictory {
                line: line_number,
                field,
                cost_value: cost_value.to_string(),
                sell_value: sell_value.to_string(),
            });
        }
    }

    Ok(())
}
