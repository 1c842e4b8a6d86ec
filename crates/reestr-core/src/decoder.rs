//! Field decoder contract.

use anyhow::Result;
use polars::prelude::DataFrame;

use crate::context::DecodeContext;

/// A stateless transformation stage over one table, gated by column
/// presence.
///
/// Decoders never assume a column exists: absence of an input variant is a
/// no-op branch. Malformed cells and failed sub-steps are logged and the
/// remaining independent sub-steps still run, leaving the table partially
/// decoded rather than aborting the batch.
///
/// # Errors
///
/// `Err` is reserved for structural contract violations — the phone pivot
/// without its type column, the address pivot without its type column, a
/// stage losing the table. The orchestrator treats these as fatal for the
/// run; everything else degrades in-band.
pub trait FieldDecoder {
    /// Stage name used in logs and error context.
    fn name(&self) -> &'static str;

    /// Consume the table and hand back the decoded version.
    fn decode(&self, df: DataFrame, ctx: &DecodeContext) -> Result<DataFrame>;
}
