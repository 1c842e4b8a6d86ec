//! Per-number normalization.

use anyhow::Result;
use once_cell::sync::Lazy;
use phonenumber::{Mode, PhoneNumber, country};
use polars::prelude::DataFrame;
use regex::Regex;
use tracing::info;

use reestr_ingest::{is_null_sentinel, strip_float_artifact};
use reestr_model::columns::phones;

use crate::data_utils::{set_string_column, string_column};
use crate::text_utils::{char_slice, char_slice_from};

/// Blank placeholder some sources write instead of leaving the cell empty.
const NO_PHONE_PLACEHOLDER: &str = "Нет";

/// Candidate phone-shaped substrings for the free-text fallback.
static PHONE_CANDIDATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\+?\d[\d\-\s().]{7,}\d").expect("valid regex"));

/// Normalize one raw cell into E.164, or the empty string when nothing in
/// the cell parses as a number. Never fails.
pub fn normalize_number(raw: &str) -> String {
    let value = strip_float_artifact(raw.trim());
    if is_null_sentinel(value) || value == NO_PHONE_PLACEHOLDER {
        return String::new();
    }
    match phonenumber::parse(Some(country::Id::RU), value) {
        Ok(number) => format_e164(&number),
        Err(_) => match_in_text(value)
            .map(|number| format_e164(&number))
            .unwrap_or_default(),
    }
}

/// First phone-shaped substring of a free-text cell that parses.
fn match_in_text(value: &str) -> Option<PhoneNumber> {
    PHONE_CANDIDATE
        .find_iter(value)
        .find_map(|candidate| phonenumber::parse(Some(country::Id::RU), candidate.as_str()).ok())
}

fn format_e164(number: &PhoneNumber) -> String {
    number.format().mode(Mode::E164).to_string()
}

/// Split a normalized number into operator/area code (characters 2..5 of
/// the E.164 string) and subscriber body. Empty input yields empty parts.
pub fn split_code_body(number: &str) -> (String, String) {
    if number.is_empty() {
        return (String::new(), String::new());
    }
    (char_slice(number, 2, 5), char_slice_from(number, 5))
}

/// Legacy single-identifier layout: the raw cell embeds a contact name at a
/// fixed offset and the number parses against region CH; code/rest split by
/// fixed offsets on the E.164 string without its plus.
pub(super) fn apply_zaim_strategy(df: &mut DataFrame) -> Result<()> {
    info!("zaim phone column found, applying legacy strategy");
    let raw = string_column(df, phones::ZAIM)?;

    let contacts = raw
        .iter()
        .map(|value| {
            char_slice_from(value, 20)
                .trim_end_matches(')')
                .to_string()
        })
        .collect();

    let numbers: Vec<String> = raw
        .iter()
        .map(|value| {
            let compact: String = value.chars().filter(|ch| !ch.is_whitespace()).collect();
            match phonenumber::parse(Some(country::Id::CH), &compact) {
                Ok(number) => {
                    let formatted = format_e164(&number);
                    formatted.strip_prefix('+').unwrap_or(&formatted).to_string()
                }
                Err(_) => String::new(),
            }
        })
        .collect();

    let codes = numbers
        .iter()
        .map(|number| char_slice(number, 1, 4))
        .collect();
    let rests = numbers
        .iter()
        .map(|number| char_slice_from(number, 4))
        .collect();

    set_string_column(df, phones::CONTACT, contacts)?;
    set_string_column(df, phones::ZAIM, numbers)?;
    set_string_column(df, phones::ZAIM_CODE, codes)?;
    set_string_column(df, phones::ZAIM_REST, rests)?;
    Ok(())
}
