//! Immutable register defaults threaded through the pipeline.
//!
//! One `DecodeConfig` is built per conversion run and handed to the
//! orchestrator; decoders read from it and never mutate it. This replaces
//! ad-hoc per-site constants with a single explicit configuration value.

use chrono::NaiveDate;
use serde::Deserialize;

/// Constant values the decoders stamp into or substitute for source data.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DecodeConfig {
    /// Canonical currency code written wherever the source confirms RUB/RUR.
    pub currency: String,
    /// Default placement used when the source carries no placement column.
    pub placement: i64,
    /// Registration name stamped on every row.
    pub reg_name: String,
    /// Registration date stamped on every row, ISO rendered.
    pub reg_date: NaiveDate,
    /// Substitute workplace label for blank positions.
    pub workplace: String,
}

impl DecodeConfig {
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    pub fn with_placement(mut self, placement: i64) -> Self {
        self.placement = placement;
        self
    }

    pub fn with_registration(mut self, name: impl Into<String>, date: NaiveDate) -> Self {
        self.reg_name = name.into();
        self.reg_date = date;
        self
    }

    /// The registration date in the canonical ISO rendering.
    pub fn reg_date_iso(&self) -> String {
        self.reg_date.format("%Y-%m-%d").to_string()
    }
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            currency: "RUR".to_string(),
            placement: 1,
            reg_name: String::new(),
            reg_date: NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date"),
            workplace: "ООО".to_string(),
        }
    }
}
