//! Concrete field decoders, one module per semantic area.

pub mod dates;
pub mod debt;
pub mod frame_clean;
pub mod passport;
pub mod person;
pub mod register;

pub use dates::DateDecoder;
pub use debt::DebtDecoder;
pub use frame_clean::FrameCleanDecoder;
pub use passport::PassportDecoder;
pub use person::PersonDecoder;
pub use register::RegisterDecoder;
