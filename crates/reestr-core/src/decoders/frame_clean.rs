//! Final cleanup decoder.
//!
//! Always the last stage, after every semantic decoder has consumed the
//! sentinels it cares about: synthetic index columns are dropped, remaining
//! null-sentinel text is blanked, missing numeric cells become zero.

use anyhow::Result;
use polars::prelude::{DataFrame, DataType};
use tracing::{info, warn};

use reestr_ingest::is_null_sentinel;
use reestr_model::columns::SYNTHETIC_INDEX_PREFIX;

use crate::context::DecodeContext;
use crate::data_utils::{
    column_names, drop_columns, numeric_column, set_f64_column, set_string_column, string_column,
};
use crate::decoder::FieldDecoder;

pub struct FrameCleanDecoder;

impl FieldDecoder for FrameCleanDecoder {
    fn name(&self) -> &'static str {
        "frame_clean"
    }

    fn decode(&self, mut df: DataFrame, _ctx: &DecodeContext) -> Result<DataFrame> {
        if let Err(error) = drop_synthetic_columns(&mut df) {
            warn!(%error, "synthetic column drop failed");
        }
        if let Err(error) = blank_sentinels_and_fill(&mut df) {
            warn!(%error, "sentinel cleanup failed");
        }
        Ok(df)
    }
}

fn drop_synthetic_columns(df: &mut DataFrame) -> Result<()> {
    let synthetic: Vec<String> = column_names(df)
        .into_iter()
        .filter(|name| name.starts_with(SYNTHETIC_INDEX_PREFIX))
        .collect();
    if !synthetic.is_empty() {
        info!(count = synthetic.len(), "dropping synthetic index columns");
        let names: Vec<&str> = synthetic.iter().map(String::as_str).collect();
        drop_columns(df, &names);
    }
    Ok(())
}

fn blank_sentinels_and_fill(df: &mut DataFrame) -> Result<()> {
    for name in column_names(df) {
        let dtype = df.column(&name)?.dtype().clone();
        match dtype {
            DataType::String => {
                let values = string_column(df, &name)?
                    .into_iter()
                    .map(|value| {
                        if is_null_sentinel(&value) {
                            String::new()
                        } else {
                            value
                        }
                    })
                    .collect();
                set_string_column(df, &name, values)?;
            }
            DataType::Float64
            | DataType::Float32
            | DataType::Int64
            | DataType::Int32
            | DataType::Int16
            | DataType::Int8
            | DataType::UInt64
            | DataType::UInt32
            | DataType::UInt16
            | DataType::UInt8 => {
                let values = numeric_column(df, &name)?;
                if values.iter().any(Option::is_none) {
                    let filled = values
                        .into_iter()
                        .map(|value| value.unwrap_or(0.0))
                        .collect();
                    set_f64_column(df, &name, filled)?;
                }
            }
            _ => {}
        }
    }
    Ok(())
}
