// Property-based tests for the liquidity math.
// Run with: cargo test -p clawd-lp-domain --test properties

use clawd_lp_domain::prelude::*;
use proptest::prelude::*;

const TICK_BAND: i32 = 200_000;

fn close(a: f64, b: f64, rel: f64) -> bool {
    (a - b).abs() <= rel * a.abs().max(b.abs()).max(1e-12)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Property: price and sqrt-price strictly increase with the tick
    #[test]
    fn prop_price_monotonic(t in -TICK_BAND..TICK_BAND, step in 1i32..5_000) {
        prop_assert!(price_from_tick(t) < price_from_tick(t + step));
        prop_assert!(sqrt_price_from_tick(t) < sqrt_price_from_tick(t + step));
    }

    /// Property: an aligned tick survives price -> tick
    #[test]
    fn prop_tick_round_trip(
        steps in -1_000i32..1_000,
        spacing in prop::sample::select(vec![1, 10, 60, 200]),
    ) {
        let tick = steps * spacing;
        prop_assert_eq!(tick_from_price(price_from_tick(tick), spacing).unwrap(), tick);
    }

    /// Property: token0 -> token1 -> token0 reproduces the input inside the range
    #[test]
    fn prop_amounts_symmetric(
        lower in -50_000i32..0,
        width in 200i32..50_000,
        offset in 0.05f64..0.95,
        amount0 in 1e-6f64..1e6,
    ) {
        let upper = lower + width;
        let current_tick = lower + ((width as f64) * offset) as i32;
        prop_assume!(current_tick > lower && current_tick < upper);

        let sp = sqrt_price_from_tick(current_tick);
        let sl = sqrt_price_from_tick(lower);
        let su = sqrt_price_from_tick(upper);

        let amount1 = amount0_for_liquidity(amount0, sp, sl, su);
        let back = amount1_for_liquidity(amount1, sp, sl, su);
        prop_assert!(close(back, amount0, 1e-6), "{} vs {}", back, amount0);
    }

    /// Property: below the range everything is token0, above it everything is token1
    #[test]
    fn prop_boundary_regimes(
        lower in -50_000i32..50_000,
        width in 1i32..20_000,
        liquidity in 1f64..1e24,
    ) {
        let upper = lower + width;
        let sl = sqrt_price_from_tick(lower);
        let su = sqrt_price_from_tick(upper);

        let (a0, a1) = amounts_for_liquidity(sl, lower, upper, liquidity);
        prop_assert!(close(a0, liquidity * (su - sl) / (sl * su), 1e-9));
        prop_assert_eq!(a1, 0.0);

        let (a0, a1) = amounts_for_liquidity(su, lower, upper, liquidity);
        prop_assert_eq!(a0, 0.0);
        prop_assert!(close(a1, liquidity * (su - sl), 1e-9));
    }

    /// Property: zero liquidity holds nothing at any price
    #[test]
    fn prop_zero_liquidity(sp in 0f64..1e6, lower in -50_000i32..50_000, width in 1i32..20_000) {
        prop_assert_eq!(amounts_for_liquidity(sp, lower, lower + width, 0.0), (0.0, 0.0));
    }

    /// Property: the scaled pool ratio tracks 1.0001^tick, including ratios past 1e11
    #[test]
    fn prop_pool_ratio_matches_tick(tick in -130_000i32..800_000) {
        let slot0 = PoolSlot0::new(tick_to_sqrt_price_x96(tick), tick);
        let (ratio, expected) = (slot0.ratio_f64(), price_from_tick(tick));
        prop_assert!(close(ratio, expected, 1e-9), "{} vs {}", ratio, expected);
    }

    /// Property: no input combination yields a negative amount or liquidity
    #[test]
    fn prop_non_negative(
        sp in 0f64..1e3,
        lower in -50_000i32..50_000,
        upper in -50_000i32..50_000,
        amount in -1e6f64..1e6,
        liquidity in -1e12f64..1e12,
    ) {
        let sl = sqrt_price_from_tick(lower);
        let su = sqrt_price_from_tick(upper);
        prop_assert!(amount0_for_liquidity(amount, sp, sl, su) >= 0.0);
        prop_assert!(amount1_for_liquidity(amount, sp, sl, su) >= 0.0);
        prop_assert!(liquidity_for_amount0(amount, sp, su) >= 0.0);
        prop_assert!(liquidity_for_amount1(amount, sp, sl) >= 0.0);
        let (a0, a1) = amounts_for_liquidity(sp, lower, upper, liquidity);
        prop_assert!(a0 >= 0.0 && a1 >= 0.0);
    }

    /// Property: the exact Q96 path agrees with the float path
    #[test]
    fn prop_x96_matches_float(
        lower in -100_000i32..100_000,
        width in 200i32..40_000,
        current in -120_000i32..140_000,
        liquidity in 1_000_000_000_000u128..1_000_000_000_000_000_000_000,
    ) {
        let upper = lower + width;
        let x96 = tick_to_sqrt_price_x96(current);
        let (e0, e1) = amounts_for_liquidity_x96(x96, lower, upper, liquidity);
        let sqrt_price = sqrt_price_x96_to_f64(x96);
        let (f0, f1) = amounts_for_liquidity(sqrt_price, lower, upper, liquidity as f64);

        let (e0, e1) = (e0.to_f64_lossy(), e1.to_f64_lossy());
        prop_assert!((e0 - f0).abs() <= 1e-6 * f0.max(1.0) + 2.0);
        prop_assert!((e1 - f1).abs() <= 1e-6 * f1.max(1.0) + 2.0);
    }
}

#[test]
fn test_worked_example() {
    assert_eq!(price_from_tick(0), 1.0);
    assert_eq!(sqrt_price_from_tick(0), 1.0);

    let sl = sqrt_price_from_tick(-100);
    let su = sqrt_price_from_tick(100);
    let amount1 = amount0_for_liquidity(1.0, 1.0, sl, su);
    assert!(amount1 > 0.0 && amount1.is_finite());

    let liquidity = liquidity_for_amount0(1.0, 1.0, su);
    let (a0, a1) = amounts_for_liquidity(1.0, -100, 100, liquidity);
    assert!((a0 - 1.0).abs() < 1e-9);
    assert!((a1 - amount1).abs() < 1e-9);
}
