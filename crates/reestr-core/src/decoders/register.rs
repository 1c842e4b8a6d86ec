//! Register decoder: currency, composite ids, product taxonomy, lifetimes.

use anyhow::Result;
use polars::prelude::DataFrame;
use tracing::{info, warn};

use reestr_model::DecodeError;
use reestr_model::columns::register;
use reestr_standards::classify_product;

use crate::context::DecodeContext;
use crate::data_utils::{
    drop_columns, has_column, has_columns, set_i64_column, set_opt_string_column,
    set_string_column, string_column,
};
use crate::decoder::FieldDecoder;
use crate::text_utils::first_integer;

/// Written in-band when a currency column carries anything but RUB/RUR.
pub const CURRENCY_ERROR: &str = "ERROR_CHECK_CURRENCY";

pub struct RegisterDecoder;

impl FieldDecoder for RegisterDecoder {
    fn name(&self) -> &'static str {
        "register"
    }

    fn decode(&self, mut df: DataFrame, ctx: &DecodeContext) -> Result<DataFrame> {
        if let Err(error) = normalize_currency(&mut df, ctx) {
            warn!(%error, "currency normalization failed");
        }
        if let Err(error) = concatenate_ids(&mut df) {
            warn!(%error, "id concatenation failed");
        }
        if let Err(error) = classify_products(&mut df) {
            warn!(%error, "product classification failed");
        }
        if let Err(error) = stamp_lifetimes(&mut df, ctx) {
            warn!(%error, "lifetime stamping failed");
        }
        Ok(df)
    }
}

impl RegisterDecoder {
    /// Pivot the long-format address sheet of the multi-sheet shape into
    /// per-row `fact`/`reg` columns keyed by the shared identifier.
    ///
    /// # Errors
    ///
    /// The address-type column is the pivot's contract; its absence fails
    /// the run.
    pub fn decode_addresses(&self, df: &DataFrame) -> Result<DataFrame> {
        info!("processing address sheet");
        if !has_column(df, register::ADDRESS_TYPE) {
            return Err(DecodeError::MissingColumn {
                decoder: "register",
                column: register::ADDRESS_TYPE,
            }
            .into());
        }
        let ids = string_column(df, register::ID)?;
        let addresses = string_column(df, register::ADDRESS)?;
        let kinds = string_column(df, register::ADDRESS_TYPE)?;

        let mut fact = Vec::with_capacity(df.height());
        let mut reg = Vec::with_capacity(df.height());
        for (address, kind) in addresses.iter().zip(&kinds) {
            fact.push((kind == "Фактический").then(|| address.clone()));
            reg.push((kind == "Регистрация").then(|| address.clone()));
        }

        let mut result = DataFrame::new(vec![polars::prelude::Column::new(
            register::ID.into(),
            ids,
        )])?;
        set_opt_string_column(&mut result, register::ADDRESS_FACT, fact)?;
        set_opt_string_column(&mut result, register::ADDRESS_REG, reg)?;
        Ok(result)
    }
}

/// A whole-column decision: confirmed rubles normalize to the configured
/// code, anything else flags the column for manual review in-band.
fn normalize_currency(df: &mut DataFrame, ctx: &DecodeContext) -> Result<()> {
    let code = ctx.config.currency.clone();
    if has_column(df, register::CURRENCY) {
        info!("mapping currency column");
        let values = string_column(df, register::CURRENCY)?;
        let confirmed = values
            .iter()
            .any(|value| matches!(value.as_str(), "RUB" | "RUR"));
        let replacement = if confirmed {
            code
        } else {
            CURRENCY_ERROR.to_string()
        };
        set_string_column(
            df,
            register::CURRENCY,
            vec![replacement; df.height()],
        )?;
    } else {
        info!("currency column absent, synthesizing");
        set_string_column(df, register::CURRENCY, vec![code; df.height()])?;
    }
    Ok(())
}

fn concatenate_ids(df: &mut DataFrame) -> Result<()> {
    let sources = [register::CLIENT_ID, register::CREDIT_ID, register::OUTER_ID];
    if !has_columns(df, &sources) {
        return Ok(());
    }
    info!("concatenating identifier columns into extension");
    let client = string_column(df, register::CLIENT_ID)?;
    let credit = string_column(df, register::CREDIT_ID)?;
    let outer = string_column(df, register::OUTER_ID)?;
    let extension = client
        .iter()
        .zip(&credit)
        .zip(&outer)
        .map(|((client, credit), outer)| format!("{client}|{credit}|{outer}"))
        .collect();
    set_string_column(df, register::EXTENSION, extension)?;
    drop_columns(df, &sources);
    Ok(())
}

fn classify_products(df: &mut DataFrame) -> Result<()> {
    if !has_column(df, register::PRODUCT_GROUP) {
        return Ok(());
    }
    info!("mapping product group to the closed product set");
    let groups = string_column(df, register::PRODUCT_GROUP)?;
    let products: Vec<_> = groups.iter().map(|group| classify_product(group)).collect();
    set_string_column(
        df,
        register::PRODUCT,
        products.iter().map(|p| p.code().to_string()).collect(),
    )?;
    set_string_column(
        df,
        register::PRODUCT_NAME,
        products.iter().map(|p| p.label().to_string()).collect(),
    )?;
    Ok(())
}

fn stamp_lifetimes(df: &mut DataFrame, ctx: &DecodeContext) -> Result<()> {
    info!("stamping lifetime attributes");
    let placements: Vec<i64> = if has_column(df, register::PLACEMENT) {
        string_column(df, register::PLACEMENT)?
            .iter()
            .map(|value| first_integer(value))
            .collect()
    } else {
        vec![ctx.config.placement; df.height()]
    };
    set_i64_column(df, register::PLACEMENT, placements)?;
    set_string_column(
        df,
        register::REG_NAME,
        vec![ctx.config.reg_name.clone(); df.height()],
    )?;
    set_string_column(
        df,
        register::REG_DATE,
        vec![ctx.config.reg_date_iso(); df.height()],
    )?;
    Ok(())
}
