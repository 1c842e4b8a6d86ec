//! Pipeline orchestrator.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use polars::prelude::{DataFrame, IntoLazy, JoinArgs, JoinType, col};
use tracing::{debug, info};

use reestr_model::columns::{register, sheets};
use reestr_model::{DecodeConfig, DecodeError};

use crate::context::DecodeContext;
use crate::data_utils::has_column;
use crate::decoder::FieldDecoder;
use crate::decoders::{
    DateDecoder, DebtDecoder, FrameCleanDecoder, PassportDecoder, PersonDecoder, RegisterDecoder,
};
use crate::phone::PhoneDecoder;

/// The three entity tables of the multi-sheet (POST) input shape.
#[derive(Debug)]
pub struct PostSheets {
    pub contracts: DataFrame,
    pub phones: DataFrame,
    pub addresses: DataFrame,
}

impl PostSheets {
    /// Pull the three known sheets out of a reader-produced sheet map.
    pub fn from_map(mut sheet_map: BTreeMap<String, DataFrame>) -> Result<Self> {
        let mut take = |name: &str| {
            sheet_map.remove(name).ok_or_else(|| DecodeError::MissingSheet {
                sheet: name.to_string(),
            })
        };
        Ok(Self {
            contracts: take(sheets::CONTRACTS)?,
            phones: take(sheets::TELEPHONES)?,
            addresses: take(sheets::ADDRESSES)?,
        })
    }
}

/// Runs the fixed decoder sequence over one table per invocation.
///
/// Decoders degrade in-band on bad data; an `Err` out of any of them is a
/// structural violation and fails the whole conversion attempt with the
/// offending stage named.
pub struct DataProcessor {
    ctx: DecodeContext,
}

impl DataProcessor {
    pub fn new(config: DecodeConfig) -> Self {
        Self {
            ctx: DecodeContext::new(config),
        }
    }

    /// Single-sheet shape: the full decoder sequence.
    pub fn process_table(&self, df: DataFrame) -> Result<DataFrame> {
        info!(rows = df.height(), "processing single-sheet table");
        let stages: [&dyn FieldDecoder; 7] = [
            &PersonDecoder,
            &DateDecoder,
            &PhoneDecoder,
            &PassportDecoder,
            &DebtDecoder,
            &RegisterDecoder,
            &FrameCleanDecoder,
        ];
        let mut df = df;
        for stage in stages {
            df = self.run_stage(stage, df)?;
        }
        Ok(df)
    }

    /// Multi-sheet shape: per-entity sub-pipelines, then the join, then the
    /// final cleanup over the joined result.
    pub fn process_post(&self, sheets: PostSheets) -> Result<DataFrame> {
        info!(
            contracts = sheets.contracts.height(),
            phones = sheets.phones.height(),
            addresses = sheets.addresses.height(),
            "processing multi-sheet tables"
        );
        let contract_stages: [&dyn FieldDecoder; 5] = [
            &PersonDecoder,
            &DateDecoder,
            &PassportDecoder,
            &DebtDecoder,
            &RegisterDecoder,
        ];
        let mut contracts = sheets.contracts;
        for stage in contract_stages {
            contracts = self.run_stage(stage, contracts)?;
        }

        let phones = PhoneDecoder
            .decode_post(&sheets.phones, &self.ctx)
            .context("phone sheet decoding failed")?;
        let addresses = RegisterDecoder
            .decode_addresses(&sheets.addresses)
            .context("address sheet decoding failed")?;

        let merged = join_sheets(contracts, phones, addresses)?;
        self.run_stage(&FrameCleanDecoder, merged)
    }

    fn run_stage(&self, stage: &dyn FieldDecoder, df: DataFrame) -> Result<DataFrame> {
        let name = stage.name();
        let rows_in = df.height();
        debug!(decoder = name, rows = rows_in, "stage start");
        let decoded = stage
            .decode(df, &self.ctx)
            .with_context(|| format!("decoder '{name}' failed"))?;
        if rows_in > 0 && decoded.height() == 0 {
            return Err(DecodeError::LostTable { decoder: name }.into());
        }
        debug!(decoder = name, rows = decoded.height(), "stage done");
        Ok(decoded)
    }
}

/// Inner-join the three decoded entity tables on the shared identifier.
fn join_sheets(
    contracts: DataFrame,
    phones: DataFrame,
    addresses: DataFrame,
) -> Result<DataFrame> {
    for (sheet, df) in [
        ("contracts", &contracts),
        ("phones", &phones),
        ("addresses", &addresses),
    ] {
        if !has_column(df, register::ID) {
            return Err(DecodeError::MissingJoinKey {
                sheet,
                column: register::ID,
            }
            .into());
        }
    }
    info!("joining entity tables on shared identifier");
    let merged = contracts
        .lazy()
        .join(
            phones.lazy(),
            [col(register::ID)],
            [col(register::ID)],
            JoinArgs::new(JoinType::Inner),
        )
        .join(
            addresses.lazy(),
            [col(register::ID)],
            [col(register::ID)],
            JoinArgs::new(JoinType::Inner),
        )
        .collect()
        .context("joining entity tables failed")?;
    Ok(merged)
}
