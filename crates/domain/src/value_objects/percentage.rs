use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// Slippage tolerance applied to contract minimums by default (5%).
pub const DEFAULT_SLIPPAGE_BPS: u32 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Percentage(pub Decimal);

impl Percentage {
    pub fn from_bps(bps: u32) -> Self {
        Self(Decimal::from(bps) / Decimal::from(10000))
    }

    pub fn to_bps(&self) -> u32 {
        (self.0 * Decimal::from(10000)).to_u32().unwrap_or(0)
    }

    /// The fraction kept after applying this percentage as a haircut, in bps.
    pub fn retained_bps(&self) -> u32 {
        10_000u32.saturating_sub(self.to_bps().min(10_000))
    }
}

impl Default for Percentage {
    fn default() -> Self {
        Self::from_bps(DEFAULT_SLIPPAGE_BPS)
    }
}
