//! Thin table I/O for the register pipeline.
//!
//! The core consumes and produces in-memory `DataFrame`s and is indifferent
//! to the delivery format; this crate covers the CSV leg plus the `AnyValue`
//! conversion helpers the decoders lean on.

pub mod csv_io;
pub mod values;

pub use csv_io::{read_sheets, read_table, write_table};
pub use values::{any_to_f64, any_to_i64, any_to_string, is_null_sentinel, parse_f64, strip_float_artifact};
