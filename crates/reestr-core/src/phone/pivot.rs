//! Long-to-wide pivot for the multi-sheet phone sheet.

use std::collections::HashMap;

use anyhow::Result;
use polars::prelude::{Column, DataFrame};
use tracing::info;

use reestr_model::DecodeError;
use reestr_model::columns::{phones, register};

use crate::data_utils::{has_column, set_opt_string_column, string_column};

/// Pivot one-row-per-(id, phone, type) input into one row per id with
/// `p1..pN` columns, sequence numbers assigned in first-appearance order.
///
/// # Errors
///
/// Fails when the phone-type column is absent — without it the sheet shape
/// cannot be trusted and the caller must abort the run.
pub fn pivot_post_phones(df: &DataFrame) -> Result<DataFrame> {
    info!("pivoting long-format phone sheet");
    if !has_column(df, phones::PHONE_TYPE) {
        return Err(DecodeError::MissingColumn {
            decoder: "phones",
            column: phones::PHONE_TYPE,
        }
        .into());
    }
    let ids = string_column(df, register::ID)?;
    let values = string_column(df, "p1")?;

    // Group in first-appearance order of the ids.
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Vec<String>> = HashMap::new();
    for (id, value) in ids.iter().zip(values) {
        let group = groups.entry(id.clone()).or_insert_with(|| {
            order.push(id.clone());
            Vec::new()
        });
        group.push(value);
    }

    let widest = groups.values().map(Vec::len).max().unwrap_or(0);
    let mut wide = DataFrame::new(vec![Column::new(register::ID.into(), order.clone())])?;
    for slot in 0..widest {
        let column: Vec<Option<String>> = order
            .iter()
            .map(|id| groups[id].get(slot).cloned())
            .collect();
        set_opt_string_column(&mut wide, &format!("p{}", slot + 1), column)?;
    }
    info!(
        rows = wide.height(),
        slots = widest,
        "phone sheet pivoted wide"
    );
    Ok(wide)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn long_frame() -> DataFrame {
        DataFrame::new(vec![
            Column::new(register::ID.into(), ["1", "1", "2", "1"]),
            Column::new(
                "p1".into(),
                ["89161111111", "89162222222", "89163333333", "89164444444"],
            ),
            Column::new(
                phones::PHONE_TYPE.into(),
                ["Мобильный", "Рабочий", "Мобильный", "Домашний"],
            ),
        ])
        .expect("frame")
    }

    #[test]
    fn groups_pivot_in_first_appearance_order() {
        let wide = pivot_post_phones(&long_frame()).expect("pivot");
        assert_eq!(wide.height(), 2);
        assert_eq!(
            string_column(&wide, register::ID).expect("id"),
            ["1", "2"]
        );
        assert_eq!(
            string_column(&wide, "p1").expect("p1"),
            ["89161111111", "89163333333"]
        );
        assert_eq!(
            string_column(&wide, "p3").expect("p3"),
            ["89164444444", ""]
        );
    }

    #[test]
    fn missing_type_column_is_a_contract_violation() {
        let df = DataFrame::new(vec![
            Column::new(register::ID.into(), ["1"]),
            Column::new("p1".into(), ["89161111111"]),
        ])
        .expect("frame");
        let error = pivot_post_phones(&df).expect_err("must fail");
        assert!(error.to_string().contains(phones::PHONE_TYPE));
    }
}
