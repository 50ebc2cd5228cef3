//! Token amounts and liquidity for a position between two sqrt-prices.
//!
//! These functions run on every price poll and every edit of the deposit
//! form, so they never fail: a missing price, a non-positive amount or an
//! inverted range yields zero instead of an error.

use crate::math::price_tick::sqrt_price_from_tick;

fn is_valid_bounds(sqrt_price_lower: f64, sqrt_price_upper: f64) -> bool {
    sqrt_price_lower.is_finite()
        && sqrt_price_upper.is_finite()
        && sqrt_price_lower > 0.0
        && sqrt_price_lower < sqrt_price_upper
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Calculates liquidity for a given amount of token0 between `sqrt_price` and
/// the upper bound.
/// L = amount0 * (sqrt(P) * sqrt(P_b)) / (sqrt(P_b) - sqrt(P))
pub fn liquidity_for_amount0(amount0: f64, sqrt_price: f64, sqrt_price_upper: f64) -> f64 {
    let den = sqrt_price_upper - sqrt_price;
    if !(amount0 > 0.0) || !(sqrt_price > 0.0) || !(den > 0.0) {
        return 0.0;
    }
    non_negative(amount0 * sqrt_price * sqrt_price_upper / den)
}

/// Calculates liquidity for a given amount of token1 between the lower bound
/// and `sqrt_price`.
/// L = amount1 / (sqrt(P) - sqrt(P_a))
pub fn liquidity_for_amount1(amount1: f64, sqrt_price: f64, sqrt_price_lower: f64) -> f64 {
    let den = sqrt_price - sqrt_price_lower;
    if !(amount1 > 0.0) || !(den > 0.0) {
        return 0.0;
    }
    non_negative(amount1 / den)
}

/// Returns the amount of token1 matching `amount0` of token0 for a new
/// position, at the current price clipped into the range.
///
/// Returns 0 when the price is at or below the lower bound (the position
/// only takes token0) and when it is at or above the upper bound (token0
/// cannot be deposited at all).
pub fn amount0_for_liquidity(
    amount0: f64,
    sqrt_price_current: f64,
    sqrt_price_lower: f64,
    sqrt_price_upper: f64,
) -> f64 {
    if !(amount0 > 0.0) || !(sqrt_price_current > 0.0) {
        return 0.0;
    }
    if !is_valid_bounds(sqrt_price_lower, sqrt_price_upper) {
        return 0.0;
    }
    if sqrt_price_current <= sqrt_price_lower {
        return 0.0;
    }
    let sp = sqrt_price_current.min(sqrt_price_upper);
    let liquidity = liquidity_for_amount0(amount0, sp, sqrt_price_upper);
    non_negative(liquidity * (sp - sqrt_price_lower))
}

/// Returns the amount of token0 matching `amount1` of token1 for a new
/// position. Mirror image of [`amount0_for_liquidity`].
pub fn amount1_for_liquidity(
    amount1: f64,
    sqrt_price_current: f64,
    sqrt_price_lower: f64,
    sqrt_price_upper: f64,
) -> f64 {
    if !(amount1 > 0.0) || !(sqrt_price_current > 0.0) {
        return 0.0;
    }
    if !is_valid_bounds(sqrt_price_lower, sqrt_price_upper) {
        return 0.0;
    }
    if sqrt_price_current >= sqrt_price_upper {
        return 0.0;
    }
    let sp = sqrt_price_current.max(sqrt_price_lower);
    let liquidity = liquidity_for_amount1(amount1, sp, sqrt_price_lower);
    non_negative(liquidity * (sqrt_price_upper - sp) / (sp * sqrt_price_upper))
}

/// Calculates the token amounts held by `liquidity` between two ticks at the
/// current sqrt-price.
///
/// * below the range: all token0, L * (sqrt(P_b) - sqrt(P_a)) / (sqrt(P_a) * sqrt(P_b))
/// * inside the range: L * (sqrt(P_b) - sqrt(P)) / (sqrt(P) * sqrt(P_b)) of token0
///   and L * (sqrt(P) - sqrt(P_a)) of token1
/// * above the range: all token1, L * (sqrt(P_b) - sqrt(P_a))
pub fn amounts_for_liquidity(
    sqrt_price_current: f64,
    tick_lower: i32,
    tick_upper: i32,
    liquidity: f64,
) -> (f64, f64) {
    if !(liquidity > 0.0) || !(sqrt_price_current > 0.0) || tick_lower >= tick_upper {
        return (0.0, 0.0);
    }
    let lower = sqrt_price_from_tick(tick_lower);
    let upper = sqrt_price_from_tick(tick_upper);
    if !is_valid_bounds(lower, upper) {
        return (0.0, 0.0);
    }

    let (amount0, amount1) = if sqrt_price_current <= lower {
        (liquidity * (upper - lower) / (lower * upper), 0.0)
    } else if sqrt_price_current < upper {
        (
            liquidity * (upper - sqrt_price_current) / (sqrt_price_current * upper),
            liquidity * (sqrt_price_current - lower),
        )
    } else {
        (0.0, liquidity * (upper - lower))
    };

    (non_negative(amount0), non_negative(amount1))
}
