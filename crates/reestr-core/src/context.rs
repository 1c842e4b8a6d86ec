//! Per-run decoding context.

use reestr_model::DecodeConfig;

/// Immutable context handed to every decoder of one conversion run.
///
/// Carries the register defaults; decoders hold no state of their own, so
/// one context can serve any number of sequential runs.
#[derive(Debug, Clone, Default)]
pub struct DecodeContext {
    pub config: DecodeConfig,
}

impl DecodeContext {
    pub fn new(config: DecodeConfig) -> Self {
        Self { config }
    }
}
