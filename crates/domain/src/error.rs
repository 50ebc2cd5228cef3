//! Errors for the fallible, non render-path operations of the domain.
//!
//! The liquidity math itself never fails: missing prices and invalid inputs
//! degrade to zero amounts. These variants cover validation and unit
//! conversion done before building contract parameters.

use thiserror::Error;

/// Errors raised by validation and conversion helpers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// The lower tick is not strictly below the upper tick.
    #[error("invalid tick range: lower {lower} must be below upper {upper}")]
    InvalidRange {
        /// Requested lower tick.
        lower: i32,
        /// Requested upper tick.
        upper: i32,
    },

    /// A tick lies outside the protocol bounds.
    #[error("tick {0} outside protocol bounds")]
    TickOutOfBounds(i32),

    /// A tick is not a multiple of the tick spacing.
    #[error("tick {tick} is not a multiple of spacing {spacing}")]
    UnalignedTick {
        /// Offending tick.
        tick: i32,
        /// Spacing of the fee tier.
        spacing: i32,
    },

    /// Tick spacing must be strictly positive.
    #[error("tick spacing must be positive, got {0}")]
    InvalidTickSpacing(i32),

    /// Prices must be strictly positive and finite.
    #[error("price must be positive and finite")]
    NonPositivePrice,

    /// A deposit needs a non-zero token0 amount.
    #[error("deposit amount is zero")]
    EmptyDeposit,

    /// A vesting duration must be positive.
    #[error("vesting duration must be positive")]
    InvalidDuration,

    /// Token amounts cannot be negative.
    #[error("amount must not be negative")]
    NegativeAmount,

    /// An intermediate value did not fit in the target representation.
    #[error("overflow converting {0}")]
    Overflow(&'static str),

    /// A textual amount could not be parsed.
    #[error("cannot parse amount '{0}'")]
    Parse(String),
}
