//! Concentrated liquidity math and position tooling for a Uniswap V3 pool.
//!
//! This crate provides:
//! - Tick, price and sqrt-price conversions with a single tick snapping rule
//! - Deposit sizing from one token amount at the current price
//! - Token amounts for an existing position, in `f64` and exact Q96 integers
//! - Display formatting for USD prices, multipliers and amount fields
//! - Range slider geometry
//! - Mint and lock-up parameter construction with slippage minimums
//! - Read-side vesting progress and withdrawal previews

/// Prelude module for convenient imports.
pub mod prelude;

/// Deposit form, approval ordering and contract parameters.
pub mod deposit;
/// Price and amount formatting.
pub mod display;
/// Shared enums.
pub mod enums;
/// Domain errors.
pub mod error;
/// Fee tiers and tick spacing.
pub mod fees;
/// Tick, sqrt-price and liquidity math.
pub mod math;
/// Pool price reads.
pub mod pool;
/// Token descriptors.
pub mod token;
/// Range slider geometry.
pub mod track;
/// Value objects.
pub mod value_objects;
/// Vesting contract views.
pub mod vesting;
