//! Structural pipeline errors.
//!
//! Malformed cells and absent optional columns are handled inside the
//! decoders (logged, row left in a safe state). The variants here are the
//! contract violations that abort a conversion run instead.

use thiserror::Error;

/// Errors that invalidate the whole conversion attempt.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// A decoder needs a column the sheet does not carry.
    #[error("column '{column}' not found in '{decoder}' input")]
    MissingColumn {
        decoder: &'static str,
        column: &'static str,
    },

    /// A sheet required by the multi-sheet shape is absent.
    #[error("sheet '{sheet}' not found in input")]
    MissingSheet { sheet: String },

    /// The shared identifier needed to reconcile sheets is absent.
    #[error("join key '{column}' missing from '{sheet}' sheet")]
    MissingJoinKey { sheet: &'static str, column: &'static str },

    /// A decoder produced an empty result where rows were expected.
    #[error("decoder '{decoder}' lost the table")]
    LostTable { decoder: &'static str },
}
