//! Conversions for the on-chain Q64.96 sqrt-price and exact position amounts.
//!
//! `sqrtPriceX96 = sqrt(token1 / token0) * 2^96`, a 160-bit integer. Two
//! conversions are kept apart on purpose:
//! - [`sqrt_price_x96_to_f64`] loses low bits and feeds the estimation math;
//! - [`price_from_sqrt_price_x96`] squares the integer exactly and feeds the
//!   headline price.
//!
//! All products are carried in `U512` so that `L * Δsqrt * Q96` cannot wrap.

use crate::error::DomainError;
use crate::math::price_tick::sqrt_price_from_tick;
use primitive_types::{U256, U512};

/// Fractional bits of a Q64.96 value.
pub const RESOLUTION: usize = 96;

/// Decimal places of the scaled ratio returned by [`price_from_sqrt_price_x96`].
pub const RATIO_SCALE: usize = 18;

const RATIO_ONE: u64 = 1_000_000_000_000_000_000;

/// 2^96
pub fn q96() -> U256 {
    U256::one() << RESOLUTION
}

/// Floating sqrt-price used by the amount estimation math.
/// sqrt(P) = sqrtPriceX96 / 2^96
pub fn sqrt_price_x96_to_f64(sqrt_price_x96: U256) -> f64 {
    sqrt_price_x96.to_f64_lossy() / 2f64.powi(RESOLUTION as i32)
}

/// Sqrt-price of a tick in Q64.96, floored.
pub fn tick_to_sqrt_price_x96(tick: i32) -> U256 {
    U256::from_f64_lossy(sqrt_price_from_tick(tick) * 2f64.powi(RESOLUTION as i32))
}

/// Exact token1-per-token0 ratio scaled by 10^18, truncated.
/// P * 10^18 = sqrtPriceX96^2 * 10^18 / 2^192
///
/// Any sqrt-price the pool can hold (160 bits) fits; only inputs far beyond
/// that range overflow.
pub fn price_from_sqrt_price_x96(sqrt_price_x96: U256) -> Result<U256, DomainError> {
    let scaled = sqrt_price_x96
        .full_mul(sqrt_price_x96)
        .checked_mul(U512::from(RATIO_ONE))
        .ok_or(DomainError::Overflow("pool ratio"))?;
    U256::try_from(scaled >> (2 * RESOLUTION)).map_err(|_| DomainError::Overflow("pool ratio"))
}

/// A ratio scaled by 10^18 as `f64`.
pub fn scaled_ratio_to_f64(ratio: U256) -> f64 {
    ratio.to_f64_lossy() / RATIO_ONE as f64
}

fn narrow(value: U512) -> U256 {
    U256::try_from(value).unwrap_or(U256::MAX)
}

/// Calculates the exact token amounts held by `liquidity` between two ticks at
/// the current Q64.96 sqrt-price, rounding down like the pool does on burn.
///
/// Returns `(0, 0)` for zero liquidity, a zero price or an inverted range.
pub fn amounts_for_liquidity_x96(
    sqrt_price_x96: U256,
    tick_lower: i32,
    tick_upper: i32,
    liquidity: u128,
) -> (U256, U256) {
    if liquidity == 0 || sqrt_price_x96.is_zero() || tick_lower >= tick_upper {
        return (U256::zero(), U256::zero());
    }
    let sqrt_lower = tick_to_sqrt_price_x96(tick_lower);
    let sqrt_upper = tick_to_sqrt_price_x96(tick_upper);
    if sqrt_lower.is_zero() || sqrt_lower >= sqrt_upper {
        return (U256::zero(), U256::zero());
    }

    let l = U512::from(liquidity);
    let q96 = U512::from(q96());
    let lower = U512::from(sqrt_lower);
    let upper = U512::from(sqrt_upper);
    let current = U512::from(sqrt_price_x96);

    if sqrt_price_x96 <= sqrt_lower {
        // amount0 = L * (sqrt_b - sqrt_a) * Q96 / sqrt_a / sqrt_b
        let amount0 = l * (upper - lower) * q96 / lower / upper;
        (narrow(amount0), U256::zero())
    } else if sqrt_price_x96 < sqrt_upper {
        let amount0 = l * (upper - current) * q96 / current / upper;
        let amount1 = l * (current - lower) / q96;
        (narrow(amount0), narrow(amount1))
    } else {
        let amount1 = l * (upper - lower) / q96;
        (U256::zero(), narrow(amount1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::price_tick::price_from_tick;

    // sqrt(1) * 2^96
    const ONE_X96: &str = "79228162514264337593543950336";

    fn one_x96() -> U256 {
        U256::from_dec_str(ONE_X96).unwrap()
    }

    fn ratio_one() -> U256 {
        U256::from(RATIO_ONE)
    }

    #[test]
    fn test_q96() {
        assert_eq!(q96(), one_x96());
        assert_eq!(sqrt_price_x96_to_f64(q96()), 1.0);
        assert_eq!(sqrt_price_x96_to_f64(U256::zero()), 0.0);
    }

    #[test]
    fn test_tick_to_sqrt_price_x96() {
        assert_eq!(tick_to_sqrt_price_x96(0), one_x96());
        assert!(tick_to_sqrt_price_x96(200) > tick_to_sqrt_price_x96(0));
        assert!(tick_to_sqrt_price_x96(-200) < tick_to_sqrt_price_x96(0));
    }

    #[test]
    fn test_price_from_sqrt_price_x96() {
        assert_eq!(price_from_sqrt_price_x96(one_x96()).unwrap(), ratio_one());
        // sqrt price 2 -> price 4
        assert_eq!(
            price_from_sqrt_price_x96(one_x96() * U256::from(2u8)).unwrap(),
            ratio_one() * U256::from(4u8)
        );
        assert_eq!(price_from_sqrt_price_x96(U256::zero()).unwrap(), U256::zero());
        // sqrt price 1/2 -> price 0.25
        assert_eq!(
            price_from_sqrt_price_x96(one_x96() / U256::from(2u8)).unwrap(),
            ratio_one() / U256::from(4u8)
        );
    }

    #[test]
    fn test_price_from_sqrt_price_x96_high_ticks() {
        // Well beyond 7.9e10 token1 per token0
        for tick in [253_000, 400_000, 800_000] {
            let ratio = price_from_sqrt_price_x96(tick_to_sqrt_price_x96(tick)).unwrap();
            let expected = price_from_tick(tick);
            assert!((scaled_ratio_to_f64(ratio) - expected).abs() / expected < 1e-9);
        }

        let max_pool_sqrt = (U256::one() << 160) - U256::one();
        assert!(price_from_sqrt_price_x96(max_pool_sqrt).is_ok());
    }

    #[test]
    fn test_price_from_sqrt_price_x96_overflow() {
        assert_eq!(
            price_from_sqrt_price_x96(U256::MAX),
            Err(DomainError::Overflow("pool ratio"))
        );
    }

    #[test]
    fn test_amounts_for_liquidity_x96_regimes() {
        let liquidity = 1_000_000_000_000_000_000u128;
        let lower = tick_to_sqrt_price_x96(-200);
        let upper = tick_to_sqrt_price_x96(200);

        let (a0, a1) = amounts_for_liquidity_x96(lower / U256::from(2u8), -200, 200, liquidity);
        assert!(a0 > U256::zero());
        assert_eq!(a1, U256::zero());

        let (a0, a1) = amounts_for_liquidity_x96(upper * U256::from(2u8), -200, 200, liquidity);
        assert_eq!(a0, U256::zero());
        assert!(a1 > U256::zero());

        let (a0, a1) = amounts_for_liquidity_x96(one_x96(), -200, 200, liquidity);
        assert!(a0 > U256::zero());
        assert!(a1 > U256::zero());
    }

    #[test]
    fn test_amounts_for_liquidity_x96_matches_float_path() {
        let liquidity = 5_000_000_000_000_000_000u128;
        let current = tick_to_sqrt_price_x96(60);
        let (a0, a1) = amounts_for_liquidity_x96(current, -1000, 1000, liquidity);

        let (f0, f1) = crate::math::concentrated_liquidity::amounts_for_liquidity(
            sqrt_price_x96_to_f64(current),
            -1000,
            1000,
            liquidity as f64,
        );
        assert!((a0.to_f64_lossy() - f0).abs() / f0 < 1e-9);
        assert!((a1.to_f64_lossy() - f1).abs() / f1 < 1e-9);
    }

    #[test]
    fn test_amounts_for_liquidity_x96_zero_inputs() {
        let zero = (U256::zero(), U256::zero());
        assert_eq!(amounts_for_liquidity_x96(one_x96(), -200, 200, 0), zero);
        assert_eq!(amounts_for_liquidity_x96(U256::zero(), -200, 200, 1), zero);
        assert_eq!(amounts_for_liquidity_x96(one_x96(), 200, -200, 1), zero);
    }
}
