//! Passport decoder: document decomposition, formatting, classification.

use anyhow::Result;
use polars::prelude::DataFrame;
use tracing::{info, warn};

use reestr_ingest::{is_null_sentinel, strip_float_artifact};
use reestr_model::DocKind;
use reestr_model::columns::passport;
use reestr_standards::region_for_series;

use crate::context::DecodeContext;
use crate::data_utils::{has_column, set_string_column, string_column};
use crate::decoder::FieldDecoder;
use crate::text_utils::{char_len, char_slice, char_slice_from, char_suffix, pad_left_zeroes};

/// Source layouts a sheet can carry, in decode priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PassportLayout {
    /// Single concatenated series+number+organization+date string.
    Combined,
    /// Series and number concatenated, nothing else.
    Full,
    /// Issuing-division field, optionally paired with a series column.
    Division,
}

fn detect_layouts(df: &DataFrame) -> Vec<PassportLayout> {
    let mut layouts = Vec::new();
    if has_column(df, passport::COMBINED) {
        layouts.push(PassportLayout::Combined);
    }
    if has_column(df, passport::FULL) {
        layouts.push(PassportLayout::Full);
    }
    if has_column(df, passport::DIVISION) {
        layouts.push(PassportLayout::Division);
    }
    layouts
}

pub struct PassportDecoder;

impl FieldDecoder for PassportDecoder {
    fn name(&self) -> &'static str {
        "passport"
    }

    fn decode(&self, mut df: DataFrame, _ctx: &DecodeContext) -> Result<DataFrame> {
        for layout in detect_layouts(&df) {
            if let Err(error) = apply_layout(&mut df, layout) {
                warn!(?layout, %error, "passport layout split failed");
            }
        }
        if let Err(error) = classify_doctype(&mut df) {
            warn!(%error, "doctype classification failed");
        }
        if let Err(error) = format_series_and_region(&mut df) {
            warn!(%error, "series formatting failed");
        }
        if let Err(error) = clean_up(&mut df) {
            warn!(%error, "passport cleanup failed");
        }
        Ok(df)
    }
}

fn apply_layout(df: &mut DataFrame, layout: PassportLayout) -> Result<()> {
    match layout {
        PassportLayout::Combined => {
            info!("combined passport column found, splitting");
            let raw = string_column(df, passport::COMBINED)?;
            let mut series = Vec::with_capacity(raw.len());
            let mut numbers = Vec::with_capacity(raw.len());
            let mut dates = Vec::with_capacity(raw.len());
            let mut orgs = Vec::with_capacity(raw.len());
            for value in &raw {
                let (s, n, d, o) = split_combined(value);
                series.push(s);
                numbers.push(n);
                dates.push(d);
                orgs.push(o);
            }
            set_string_column(df, passport::SERIES, series)?;
            set_string_column(df, passport::NUMBER, numbers)?;
            set_string_column(df, passport::DATE, dates)?;
            set_string_column(df, passport::ORGANIZATION, orgs)?;
        }
        PassportLayout::Full => {
            info!("series+number passport column found, splitting");
            let raw = string_column(df, passport::FULL)?;
            let mut series = Vec::with_capacity(raw.len());
            let mut numbers = Vec::with_capacity(raw.len());
            for value in &raw {
                let (s, n) = split_full(value);
                series.push(s);
                numbers.push(n);
            }
            set_string_column(df, passport::SERIES, series)?;
            set_string_column(df, passport::NUMBER, numbers)?;
        }
        PassportLayout::Division => {
            info!("division passport column found, splitting");
            let division = string_column(df, passport::DIVISION)?;
            let existing_series = if has_column(df, passport::SERIES) {
                string_column(df, passport::SERIES)?
            } else {
                vec![String::new(); division.len()]
            };
            let mut series = Vec::with_capacity(division.len());
            let mut numbers = Vec::with_capacity(division.len());
            for (value, existing) in division.iter().zip(&existing_series) {
                let (s, n) = split_division(value, existing);
                series.push(s);
                numbers.push(n);
            }
            set_string_column(df, passport::SERIES, series)?;
            set_string_column(df, passport::NUMBER, numbers)?;
        }
    }
    Ok(())
}

/// Combined layout: 4 series chars, 7 number chars, the issue date in the
/// last 11 characters, the organization in between.
fn split_combined(value: &str) -> (String, String, String, String) {
    let len = char_len(value);
    let series = char_slice(value, 0, 4);
    let number = char_slice(value, 4, 11);
    let date = char_suffix(value, 11);
    let organization = if len > 24 {
        char_slice(value, 13, len - 11).trim().to_string()
    } else {
        String::new()
    };
    (series, number, date, organization)
}

/// Series+number layout. Short values are whole numbers with no series;
/// values under ten characters are zero-padded into the 4+6 shape first.
fn split_full(value: &str) -> (String, String) {
    let value = strip_float_artifact(value);
    let len = char_len(value);
    let foreign = DocKind::classify(value) == DocKind::Foreign;
    if len <= 6 && !foreign {
        return (String::new(), value.to_string());
    }
    let padded = if len < 10 && !foreign {
        pad_left_zeroes(value, 10)
    } else {
        value.to_string()
    };
    (char_slice(&padded, 0, 4), char_slice_from(&padded, 4))
}

/// Division layout: a long division value carries its own 5-char series;
/// otherwise the series column (when any) stays authoritative.
fn split_division(division: &str, existing_series: &str) -> (String, String) {
    if char_len(division) >= 11 {
        (char_slice(division, 0, 5), char_slice_from(division, 5))
    } else {
        (existing_series.to_string(), division.to_string())
    }
}

fn classify_doctype(df: &mut DataFrame) -> Result<()> {
    if !has_column(df, passport::NUMBER) {
        return Ok(());
    }
    let values = string_column(df, passport::NUMBER)?
        .iter()
        .map(|number| DocKind::classify(number).as_str().to_string())
        .collect();
    set_string_column(df, passport::DOCTYPE, values)?;
    Ok(())
}

fn format_series_and_region(df: &mut DataFrame) -> Result<()> {
    if !has_column(df, passport::SERIES) {
        return Ok(());
    }
    let formatted: Vec<String> = string_column(df, passport::SERIES)?
        .iter()
        .map(|series| format_series(series))
        .collect();
    let regions = formatted
        .iter()
        .map(|series| region_for_series(series).to_string())
        .collect();
    set_string_column(df, passport::SERIES, formatted)?;
    set_string_column(df, passport::REGION, regions)?;
    Ok(())
}

/// Render a 4-digit series as "NN NN"; shorter numerics are zero-padded to
/// four digits first; anything non-numeric or longer passes through.
fn format_series(series: &str) -> String {
    let cleaned = strip_float_artifact(series);
    let cleaned = if cleaned == "nan" { "" } else { cleaned };
    if cleaned.is_empty() || !cleaned.chars().all(|ch| ch.is_ascii_digit()) {
        return cleaned.to_string();
    }
    if char_len(cleaned) <= 4 {
        let padded = pad_left_zeroes(cleaned, 4);
        format!("{} {}", char_slice(&padded, 0, 2), char_slice_from(&padded, 2))
    } else {
        cleaned.to_string()
    }
}

fn clean_up(df: &mut DataFrame) -> Result<()> {
    if has_column(df, passport::NUMBER) {
        info!("zero-padding passport numbers");
        let values = string_column(df, passport::NUMBER)?
            .iter()
            .map(|number| {
                if number.is_empty() {
                    String::new()
                } else {
                    pad_left_zeroes(number, 6)
                }
            })
            .collect();
        set_string_column(df, passport::NUMBER, values)?;
    }
    if has_column(df, passport::ORGANIZATION) {
        info!("blanking null sentinels in passport organization");
        let organizations: Vec<String> = string_column(df, passport::ORGANIZATION)?
            .into_iter()
            .map(|org| if is_null_sentinel(&org) { String::new() } else { org })
            .collect();
        let division_codes = organizations
            .iter()
            .map(|org| char_suffix(org, 8))
            .collect();
        set_string_column(df, passport::ORGANIZATION, organizations)?;
        set_string_column(df, passport::DIVISION_CODE, division_codes)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use polars::prelude::Column;

    use super::*;
    use reestr_standards::UNKNOWN_REGION;

    fn decode(df: DataFrame) -> DataFrame {
        PassportDecoder
            .decode(df, &DecodeContext::default())
            .expect("decode")
    }

    fn strings(df: &DataFrame, name: &str) -> Vec<String> {
        string_column(df, name).expect(name)
    }

    #[test]
    fn combined_layout_round_trips_fixed_slots() {
        let value = format!("4512{}{}{}", "5678901", "ОВД г. Москвы", " 01.02.2010");
        let df = DataFrame::new(vec![Column::new(passport::COMBINED.into(), [value])])
            .expect("frame");
        let decoded = decode(df);
        assert_eq!(strings(&decoded, passport::SERIES), ["45 12"]);
        assert_eq!(strings(&decoded, passport::NUMBER), ["5678901"]);
        assert_eq!(strings(&decoded, passport::DATE), [" 01.02.2010"]);
        assert_eq!(strings(&decoded, passport::ORGANIZATION), ["Д г. Москвы"]);
        assert_eq!(strings(&decoded, passport::DOCTYPE), ["Паспорт РФ"]);
        assert_eq!(strings(&decoded, passport::REGION), ["Москва"]);
    }

    #[test]
    fn full_layout_splits_and_pads() {
        let df = DataFrame::new(vec![Column::new(
            passport::FULL.into(),
            ["4512567890", "123456", "123456789", "AB1234567"],
        )])
        .expect("frame");
        let decoded = decode(df);
        assert_eq!(
            strings(&decoded, passport::SERIES),
            ["45 12", "", "1234", "AB12"]
        );
        assert_eq!(
            strings(&decoded, passport::NUMBER),
            ["567890", "123456", "056789", "034567"]
        );
    }

    #[test]
    fn short_full_value_is_number_only() {
        let df = DataFrame::new(vec![Column::new(passport::FULL.into(), ["1234"])])
            .expect("frame");
        let decoded = decode(df);
        assert_eq!(strings(&decoded, passport::SERIES), [""]);
        // Number pad runs in cleanup regardless of the split branch.
        assert_eq!(strings(&decoded, passport::NUMBER), ["001234"]);
        assert_eq!(strings(&decoded, passport::REGION), [UNKNOWN_REGION]);
    }

    #[test]
    fn division_layout_prefers_long_division_value() {
        let df = DataFrame::new(vec![
            Column::new(passport::DIVISION.into(), ["45123567890", "7890"]),
            Column::new(passport::SERIES.into(), ["1111", "2222"]),
        ])
        .expect("frame");
        let decoded = decode(df);
        assert_eq!(strings(&decoded, passport::SERIES), ["45123", "22 22"]);
        assert_eq!(strings(&decoded, passport::NUMBER), ["567890", "007890"]);
    }

    #[test]
    fn foreign_documents_classified_by_shape() {
        let df = DataFrame::new(vec![Column::new(
            passport::NUMBER.into(),
            ["5678901", "AB123456", "123456789"],
        )])
        .expect("frame");
        let decoded = decode(df);
        assert_eq!(
            strings(&decoded, passport::DOCTYPE),
            ["Паспорт РФ", "Паспорт ин. гос.", "Паспорт ин. гос."]
        );
    }

    #[test]
    fn organization_sentinels_blank_and_division_code_derives() {
        let df = DataFrame::new(vec![Column::new(
            passport::ORGANIZATION.into(),
            ["ОВД района, 770-001", "null", "nan"],
        )])
        .expect("frame");
        let decoded = decode(df);
        assert_eq!(
            strings(&decoded, passport::ORGANIZATION),
            ["ОВД района, 770-001", "", ""]
        );
        assert_eq!(strings(&decoded, passport::DIVISION_CODE), [" 770-001", "", ""]);
    }
}
