//! Column-decoding pipeline for consumer-credit register exports.
//!
//! Heterogeneous spreadsheet exports are normalized into one canonical
//! tabular schema by an ordered sequence of presence-driven decoders; the
//! phone engine additionally expands, normalizes and (for the multi-sheet
//! shape) pivots phone columns.

pub mod context;
pub mod data_utils;
pub mod decoder;
pub mod decoders;
pub mod phone;
pub mod processor;
pub mod text_utils;

pub use context::DecodeContext;
pub use decoder::FieldDecoder;
pub use processor::{DataProcessor, PostSheets};
