//! Date decoder: day.month.year fields rendered as ISO dates.

use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};
use polars::prelude::DataFrame;
use tracing::{info, warn};

use reestr_model::columns::DATE_FIELDS;

use crate::context::DecodeContext;
use crate::data_utils::{has_column, set_string_column, string_column};
use crate::decoder::FieldDecoder;

pub struct DateDecoder;

impl FieldDecoder for DateDecoder {
    fn name(&self) -> &'static str {
        "dates"
    }

    fn decode(&self, mut df: DataFrame, _ctx: &DecodeContext) -> Result<DataFrame> {
        for field in DATE_FIELDS {
            // Guarded per field; one bad column never blocks the others.
            if !has_column(&df, field) {
                continue;
            }
            if let Err(error) = format_field(&mut df, field) {
                warn!(field, %error, "date formatting failed");
            }
        }
        Ok(df)
    }
}

fn format_field(df: &mut DataFrame, field: &str) -> Result<()> {
    info!(field, "formatting dates");
    let mut unparsed = 0usize;
    let values = string_column(df, field)?
        .into_iter()
        .map(|value| match parse_date(&value) {
            Some(date) => date.format("%Y-%m-%d").to_string(),
            None => {
                if !value.is_empty() {
                    unparsed += 1;
                }
                value
            }
        })
        .collect();
    if unparsed > 0 {
        warn!(field, unparsed, "cells left unparsed");
    }
    set_string_column(df, field, values)?;
    Ok(())
}

/// Parse `dd.mm.yyyy`, tolerating an attached time-of-day, which is
/// discarded.
fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(trimmed, "%d.%m.%Y")
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(trimmed, "%d.%m.%Y %H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
}
