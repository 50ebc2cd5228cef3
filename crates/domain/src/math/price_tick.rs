use crate::error::DomainError;

/// Lowest tick supported by the protocol.
pub const MIN_TICK: i32 = -887_272;
/// Highest tick supported by the protocol.
pub const MAX_TICK: i32 = 887_272;

const TICK_BASE: f64 = 1.0001;

// Raw log-price ticks within this distance below an integer are treated as
// that integer before flooring, so exact tick prices survive f64 noise.
const FLOOR_TOLERANCE: f64 = 1e-9;

/// Returns the price corresponding to a given tick.
/// P = 1.0001 ^ tick (token1 per token0)
pub fn price_from_tick(tick: i32) -> f64 {
    TICK_BASE.powi(tick)
}

/// Returns the square root of the price at a given tick.
/// sqrt(P) = 1.0001 ^ (tick / 2)
pub fn sqrt_price_from_tick(tick: i32) -> f64 {
    price_from_tick(tick).sqrt()
}

/// Snaps a (possibly fractional) tick to the nearest multiple of `tick_spacing`.
///
/// Ties round toward positive infinity. A non-positive spacing is treated as 1.
pub fn snap_to_spacing(tick: f64, tick_spacing: i32) -> i32 {
    let spacing = f64::from(tick_spacing.max(1));
    let steps = (tick / spacing + 0.5).floor();
    // `as` saturates, so absurd inputs still land on an i32
    (steps * spacing) as i32
}

/// Returns the greatest tick whose price is at or below `price`.
/// tick = floor(log_1.0001(P))
pub fn raw_tick_from_price(price: f64) -> Result<i32, DomainError> {
    if !price.is_finite() || price <= 0.0 {
        return Err(DomainError::NonPositivePrice);
    }
    let raw = price.ln() / TICK_BASE.ln();
    Ok((raw + FLOOR_TOLERANCE).floor() as i32)
}

/// Returns the usable tick for a price: floored to a whole tick, then snapped
/// to the nearest multiple of `tick_spacing` and kept inside the usable bounds.
pub fn tick_from_price(price: f64, tick_spacing: i32) -> Result<i32, DomainError> {
    if tick_spacing <= 0 {
        return Err(DomainError::InvalidTickSpacing(tick_spacing));
    }
    let raw = raw_tick_from_price(price)?;
    let snapped = snap_to_spacing(f64::from(raw), tick_spacing);
    Ok(snapped.clamp(
        min_usable_tick(tick_spacing),
        max_usable_tick(tick_spacing),
    ))
}

/// Lowest tick aligned to `tick_spacing` that is inside the protocol bounds.
pub fn min_usable_tick(tick_spacing: i32) -> i32 {
    let spacing = tick_spacing.max(1);
    (MIN_TICK / spacing) * spacing
}

/// Highest tick aligned to `tick_spacing` that is inside the protocol bounds.
pub fn max_usable_tick(tick_spacing: i32) -> i32 {
    let spacing = tick_spacing.max(1);
    (MAX_TICK / spacing) * spacing
}
