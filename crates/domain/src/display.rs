//! Display helpers for prices, multipliers and amount fields.

use crate::enums::AmountSide;
use crate::math::price_tick::price_from_tick;
use crate::math::sqrt_price_x96::RATIO_SCALE;
use primitive_types::U256;

/// Placeholder shown while a reference price is missing.
pub const MISSING: &str = "—";

/// Decimal places used for a USD price: more places as the value shrinks.
pub fn usd_decimals(usd: f64) -> usize {
    if usd >= 1.0 {
        2
    } else if usd >= 0.01 {
        4
    } else if usd >= 0.0001 {
        6
    } else {
        8
    }
}

/// USD price of token1 at `tick`, given the USD price of token0.
/// usd = reference / 1.0001^tick
///
/// Returns `None` while the reference price is unknown.
pub fn price_to_usd(tick: i32, reference_price: f64) -> Option<String> {
    if !(reference_price > 0.0) || !reference_price.is_finite() {
        return None;
    }
    let usd = reference_price / price_from_tick(tick);
    Some(format!("{:.*}", usd_decimals(usd), usd))
}

/// [`price_to_usd`] with a dollar sign, or the placeholder.
pub fn format_usd_at_tick(tick: i32, reference_price: f64) -> String {
    match price_to_usd(tick, reference_price) {
        Some(usd) => format!("${usd}"),
        None => MISSING.to_string(),
    }
}

/// How far the price at `tick` is from the current ratio, e.g. `"2.00x"`.
/// Empty while the current ratio is unknown.
pub fn format_multiplier(tick: i32, current_ratio: f64) -> String {
    if !(current_ratio > 0.0) {
        return String::new();
    }
    let ratio = current_ratio / price_from_tick(tick);
    format!("{ratio:.2}x")
}

/// Renders a ratio scaled by 10^18 exactly, without trailing zeros.
pub fn format_ratio(scaled: U256) -> String {
    let one = U256::exp10(RATIO_SCALE);
    let whole = scaled / one;
    let fraction = scaled % one;
    if fraction.is_zero() {
        return whole.to_string();
    }
    let digits = format!("{:0>width$}", fraction.to_string(), width = RATIO_SCALE);
    format!("{}.{}", whole, digits.trim_end_matches('0'))
}

/// A dollar value such as a deposit estimate or claimable fees.
pub fn format_usd_value(value: f64) -> String {
    if value < 0.01 {
        format!("${value:.4}")
    } else {
        format!("${value:.2}")
    }
}

/// Renders a computed counterpart amount for its input field.
/// Token0 keeps 8 decimals, token1 keeps 2; zero renders as `"0"`.
pub fn format_amount(side: AmountSide, amount: f64) -> String {
    if !(amount > 0.0) || !amount.is_finite() {
        return "0".to_string();
    }
    match side {
        AmountSide::Token0 => format!("{amount:.8}"),
        AmountSide::Token1 => format!("{amount:.2}"),
    }
}
