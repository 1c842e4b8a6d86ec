//! Phone engine: column classification, expansion, normalization, pivot.
//!
//! The hardest decoder in the pipeline. A sheet may carry one phone per
//! cell (`p1`..`p20`), delimiter-joined lists (`phones`, `phones_2`..), a
//! legacy single-identifier layout (`phone_num_zaim`), or — in the
//! multi-sheet shape — one row per (id, phone, type) that must be pivoted
//! wide before normalization.

mod expand;
mod normalize;
mod pivot;

use anyhow::Result;
use polars::prelude::DataFrame;
use tracing::{info, warn};

use reestr_model::PhoneKind;
use reestr_model::columns::phones;

use crate::context::DecodeContext;
use crate::data_utils::{has_column, set_string_column, string_column};
use crate::decoder::FieldDecoder;

pub use normalize::{normalize_number, split_code_body};
pub use pivot::pivot_post_phones;

/// Phone-bearing columns found in a table, split by shape.
#[derive(Debug, Default, Clone)]
struct PhoneColumns {
    /// Delimiter-joined list columns (`phones`, `phones_2`, ...).
    multi: Vec<String>,
    /// One-number-per-cell columns (`p1`..`p20`).
    single: Vec<String>,
}

/// Scan for the recognized phone column set and classify by name shape.
fn find_phone_columns(df: &DataFrame) -> PhoneColumns {
    let mut found = PhoneColumns::default();
    if has_column(df, phones::MULTIPLE) {
        found.multi.push(phones::MULTIPLE.to_string());
    }
    for ordinal in 2..=phones::MAX_SLOT {
        let name = format!("phones_{ordinal}");
        if has_column(df, &name) {
            found.multi.push(name);
        }
    }
    for ordinal in 1..=phones::MAX_SLOT {
        let name = format!("p{ordinal}");
        if has_column(df, &name) {
            found.single.push(name);
        }
    }
    if !found.multi.is_empty() || !found.single.is_empty() {
        info!(
            multi = found.multi.len(),
            single = found.single.len(),
            "phone columns classified"
        );
    }
    found
}

pub struct PhoneDecoder;

impl FieldDecoder for PhoneDecoder {
    fn name(&self) -> &'static str {
        "phones"
    }

    fn decode(&self, mut df: DataFrame, _ctx: &DecodeContext) -> Result<DataFrame> {
        // The legacy single-identifier layout is its own strategy and never
        // mixes with the generic multi/single processing.
        if has_column(&df, phones::ZAIM) {
            if let Err(error) = normalize::apply_zaim_strategy(&mut df) {
                warn!(%error, "zaim phone strategy failed");
            }
            return Ok(df);
        }

        let columns = find_phone_columns(&df);
        let mut slots: Vec<String> = Vec::new();

        for column in &columns.multi {
            match expand::expand_multi_column(&mut df, column) {
                Ok(expanded) => slots.extend(expanded),
                Err(error) => warn!(column, %error, "multi-valued expansion failed"),
            }
        }
        slots.extend(columns.single.iter().cloned());

        for slot in &slots {
            if let Err(error) = normalize_slot(&mut df, slot) {
                warn!(column = slot.as_str(), %error, "phone normalization failed");
            }
        }

        if let Err(error) = classify_types(&mut df) {
            warn!(%error, "phone type classification failed");
        }
        Ok(df)
    }
}

impl PhoneDecoder {
    /// Multi-sheet entry point: pivot the long-format phone sheet wide,
    /// then run the standard per-slot normalization.
    ///
    /// # Errors
    ///
    /// The phone-type column is the pivot's contract; its absence fails the
    /// run — the caller cannot reconcile the sheet without it.
    pub fn decode_post(&self, df: &DataFrame, ctx: &DecodeContext) -> Result<DataFrame> {
        let wide = pivot::pivot_post_phones(df)?;
        self.decode(wide, ctx)
    }
}

/// Normalize one phone slot in place and derive its code/body columns.
fn normalize_slot(df: &mut DataFrame, column: &str) -> Result<()> {
    let normalized: Vec<String> = string_column(df, column)?
        .iter()
        .map(|value| normalize::normalize_number(value))
        .collect();
    let mut codes = Vec::with_capacity(normalized.len());
    let mut bodies = Vec::with_capacity(normalized.len());
    for number in &normalized {
        let (code, body) = normalize::split_code_body(number);
        codes.push(code);
        bodies.push(body);
    }
    set_string_column(df, column, normalized)?;
    set_string_column(df, &format!("{column}{}", phones::CODE_SUFFIX), codes)?;
    set_string_column(df, &format!("{column}{}", phones::BODY_SUFFIX), bodies)?;
    Ok(())
}

/// Sources that label numbers get the label mapped to the closed kind set.
fn classify_types(df: &mut DataFrame) -> Result<()> {
    if !has_column(df, phones::PHONE_TYPE) {
        return Ok(());
    }
    info!("phone type column found, classifying");
    let values = string_column(df, phones::PHONE_TYPE)?
        .iter()
        .map(|label| PhoneKind::classify(label).as_str().to_string())
        .collect();
    set_string_column(df, phones::TYPE, values)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use polars::prelude::Column;

    use super::*;

    fn decode(df: DataFrame) -> DataFrame {
        PhoneDecoder
            .decode(df, &DecodeContext::default())
            .expect("decode")
    }

    fn strings(df: &DataFrame, name: &str) -> Vec<String> {
        string_column(df, name).expect(name)
    }

    #[test]
    fn multi_column_expands_and_normalizes() {
        let df = DataFrame::new(vec![Column::new(
            phones::MULTIPLE.into(),
            ["+79161234567,89031234567", "89031234567"],
        )])
        .expect("frame");
        let decoded = decode(df);
        assert_eq!(
            strings(&decoded, "phones|p1"),
            ["+79161234567", "+79031234567"]
        );
        assert_eq!(strings(&decoded, "phones|p2"), ["+79031234567", ""]);
        assert_eq!(strings(&decoded, "phones|p1_code"), ["916", "903"]);
        assert_eq!(strings(&decoded, "phones|p1_body"), ["1234567", "1234567"]);
    }

    #[test]
    fn single_columns_normalize_in_place() {
        let df = DataFrame::new(vec![Column::new(
            "p1".into(),
            ["89161234567.0", "мусор", ""],
        )])
        .expect("frame");
        let decoded = decode(df);
        assert_eq!(strings(&decoded, "p1"), ["+79161234567", "", ""]);
        assert_eq!(strings(&decoded, "p1_code"), ["916", "", ""]);
        assert_eq!(strings(&decoded, "p1_body"), ["1234567", "", ""]);
    }

    #[test]
    fn zaim_strategy_excludes_generic_processing() {
        let df = DataFrame::new(vec![
            Column::new(
                phones::ZAIM.into(),
                ["Договор займа 9000-01 (Иванов И.И.)"],
            ),
            Column::new("p1".into(), ["89161234567"]),
        ])
        .expect("frame");
        let decoded = decode(df);
        // p1 stays raw; only the zaim columns were produced.
        assert_eq!(strings(&decoded, "p1"), ["89161234567"]);
        assert!(has_column(&decoded, phones::CONTACT));
        assert!(has_column(&decoded, phones::ZAIM_CODE));
    }

    #[test]
    fn phone_type_labels_classify() {
        let df = DataFrame::new(vec![Column::new(
            phones::PHONE_TYPE.into(),
            ["Мобильный", "Рабочий", "иное"],
        )])
        .expect("frame");
        let decoded = decode(df);
        assert_eq!(
            strings(&decoded, phones::TYPE),
            ["MOBILE", "WORK", "NO_CLASSIFICATION"]
        );
    }
}
