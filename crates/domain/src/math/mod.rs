//! Concentrated liquidity math.
//!
//! Two numeric paths live side by side: the `f64` path used to estimate
//! deposit amounts and render prices, and the exact Q96 integer path used to
//! read an existing position and the headline pool ratio.

pub mod concentrated_liquidity;
pub mod price_tick;
pub mod sqrt_price_x96;
