pub mod columns;
pub mod config;
pub mod error;
pub mod outcome;

pub use config::DecodeConfig;
pub use error::DecodeError;
pub use outcome::{DocKind, PhoneKind, Product, Scheme, NO_CLASSIFICATION};
