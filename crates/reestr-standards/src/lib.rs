//! Static reference data for register decoding.
//!
//! Read-only lookups consumed by the decoders: the passport-series region
//! table and the product-group taxonomy. Loaded once, never mutated.

pub mod products;
pub mod regions;

pub use products::{classify_product, is_card_product};
pub use regions::{region_for_series, UNKNOWN_REGION};
