//! Multi-valued phone column expansion.

use anyhow::Result;
use polars::prelude::DataFrame;
use tracing::info;

use reestr_ingest::is_null_sentinel;

use crate::data_utils::{set_opt_string_column, string_column};

/// Blank placeholder cleaned out of expanded cells.
const NO_PHONE_PLACEHOLDER: &str = "Нет";

/// Pick the delimiter a list column uses: comma wins over semicolon, tab is
/// the fallback when neither appears anywhere in the column.
fn detect_delimiter(values: &[String]) -> char {
    for delimiter in [',', ';'] {
        if values.iter().any(|value| value.contains(delimiter)) {
            return delimiter;
        }
    }
    '\t'
}

/// Split a delimiter-joined list column into one `<col>|p<N>` column per
/// ordinal position, up to the longest list found. Shorter rows leave their
/// excess positions null. Returns the names of the emitted columns.
pub(super) fn expand_multi_column(df: &mut DataFrame, column: &str) -> Result<Vec<String>> {
    let values = string_column(df, column)?;
    let delimiter = detect_delimiter(&values);
    info!(column, %delimiter, "expanding multi-valued phone column");

    let split: Vec<Vec<String>> = values
        .iter()
        .map(|value| {
            value
                .split(delimiter)
                .map(|token| {
                    let token = token.trim();
                    if is_null_sentinel(token) || token == NO_PHONE_PLACEHOLDER {
                        String::new()
                    } else {
                        token.to_string()
                    }
                })
                .collect()
        })
        .collect();

    let widest = split.iter().map(Vec::len).max().unwrap_or(0);
    let mut emitted = Vec::with_capacity(widest);
    for slot in 0..widest {
        let name = format!("{column}|p{}", slot + 1);
        let values: Vec<Option<String>> = split
            .iter()
            .map(|tokens| tokens.get(slot).cloned())
            .collect();
        set_opt_string_column(df, &name, values)?;
        emitted.push(name);
    }
    Ok(emitted)
}
