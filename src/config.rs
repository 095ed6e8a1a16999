use serde::{Deserialize, Serialize};

/// behavior when a sale exceeds the shares held in open lots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OversellPolicy {
    /// consume what is available and drop the unfilled remainder
    #[default]
    Truncate,
    /// reject the computation with an insufficient-lots error
    Strict,
}

/// fifo engine configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FifoConfig {
    pub oversell_policy: OversellPolicy,
}

impl FifoConfig {
    pub fn strict() -> Self {
        Self {
            oversell_policy: OversellPolicy::Strict,
        }
    }
}
