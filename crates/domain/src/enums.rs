use serde::{Deserialize, Serialize};

/// One of the two pool tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AmountSide {
    /// WETH in the observed pool.
    Token0,
    /// CLAWD in the observed pool.
    Token1,
}

impl AmountSide {
    pub fn other(self) -> Self {
        match self {
            AmountSide::Token0 => AmountSide::Token1,
            AmountSide::Token1 => AmountSide::Token0,
        }
    }
}

/// Where the current price sits relative to a position's range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PositionStatus {
    /// Price at or below the lower bound; the position holds only token0.
    BelowRange,
    InRange,
    /// Price at or above the upper bound; the position holds only token1.
    AboveRange,
}
