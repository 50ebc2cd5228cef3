//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types from the crate.
//!
//! # Example
//!
//! ```rust
//! use clawd_lp_domain::prelude::*;
//!
//! let (lower, upper) = (sqrt_price_from_tick(-1000), sqrt_price_from_tick(1000));
//! let clawd = amount0_for_liquidity(1.0, 1.0, lower, upper);
//! assert!(clawd > 0.0);
//! ```

// Deposit
pub use crate::deposit::{
    DEFAULT_DEADLINE_SECS, DepositForm, DepositPlan, DepositStep, LockUpParams, MintParams,
    needs_approval, next_deposit_step,
};

// Display
pub use crate::display::{
    format_amount, format_multiplier, format_ratio, format_usd_at_tick, format_usd_value,
    price_to_usd,
};

// Enums and errors
pub use crate::enums::{AmountSide, PositionStatus};
pub use crate::error::DomainError;

// Fees and tokens
pub use crate::fees::FeeTier;
pub use crate::token::Token;

// Math
pub use crate::math::concentrated_liquidity::{
    amount0_for_liquidity, amount1_for_liquidity, amounts_for_liquidity, liquidity_for_amount0,
    liquidity_for_amount1,
};
pub use crate::math::price_tick::{
    MAX_TICK, MIN_TICK, price_from_tick, snap_to_spacing, sqrt_price_from_tick, tick_from_price,
};
pub use crate::math::sqrt_price_x96::{
    amounts_for_liquidity_x96, price_from_sqrt_price_x96, sqrt_price_x96_to_f64,
    tick_to_sqrt_price_x96,
};

// Pool
pub use crate::pool::PoolSlot0;

// Slider
pub use crate::track::{DEFAULT_TRACK_HALF_STEPS, RangeTrack, TrackPositions};

// Value objects
pub use crate::value_objects::{Amount, Percentage, TickRange};

// Vesting
pub use crate::vesting::{PositionRead, VestingCountdown, VestingState};
