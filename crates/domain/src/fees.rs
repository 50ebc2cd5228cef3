use crate::error::DomainError;
use serde::{Deserialize, Serialize};

/// A pool fee tier and the tick spacing the protocol pairs with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeTier {
    /// Fee in hundredths of a basis point (10000 = 1%).
    pub fee: u32,
    pub tick_spacing: i32,
}

impl FeeTier {
    /// The 1% tier used by the WETH/CLAWD pool.
    pub const ONE_PERCENT: FeeTier = FeeTier {
        fee: 10_000,
        tick_spacing: 200,
    };

    pub fn new(fee: u32, tick_spacing: i32) -> Result<Self, DomainError> {
        if tick_spacing <= 0 {
            return Err(DomainError::InvalidTickSpacing(tick_spacing));
        }
        Ok(Self { fee, tick_spacing })
    }
}

impl Default for FeeTier {
    fn default() -> Self {
        Self::ONE_PERCENT
    }
}
