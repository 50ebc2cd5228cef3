use crate::math::price_tick::tick_from_price;
use crate::math::sqrt_price_x96::{
    price_from_sqrt_price_x96, scaled_ratio_to_f64, sqrt_price_x96_to_f64,
};
use primitive_types::U256;
use serde::{Deserialize, Serialize};

/// Address of the WETH/CLAWD 1% pool on Base.
pub const POOL_ADDRESS: &str = "0xCD55381a53da35Ab1D7Bc5e3fE5F76cac976FAc3";

/// The price fields of the pool's `slot0()` read.
///
/// A zero `sqrt_price_x96` means the read has not arrived yet; every derived
/// view then reports zero or `None` instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolSlot0 {
    pub sqrt_price_x96: U256,
    pub tick: i32,
}

impl PoolSlot0 {
    pub fn new(sqrt_price_x96: U256, tick: i32) -> Self {
        Self {
            sqrt_price_x96,
            tick,
        }
    }

    pub fn is_loaded(&self) -> bool {
        !self.sqrt_price_x96.is_zero()
    }

    /// Floating sqrt-price for the amount math; 0 while not loaded.
    pub fn sqrt_price(&self) -> f64 {
        sqrt_price_x96_to_f64(self.sqrt_price_x96)
    }

    /// Exact token1-per-token0 ratio for the headline price, scaled by 10^18.
    pub fn ratio(&self) -> Option<U256> {
        if !self.is_loaded() {
            return None;
        }
        price_from_sqrt_price_x96(self.sqrt_price_x96).ok()
    }

    /// The exact ratio as `f64`, 0 while unknown.
    pub fn ratio_f64(&self) -> f64 {
        self.ratio().map(scaled_ratio_to_f64).unwrap_or(0.0)
    }

    /// Current tick derived from the exact ratio and snapped to `tick_spacing`.
    pub fn current_tick(&self, tick_spacing: i32) -> Option<i32> {
        let ratio = self.ratio_f64();
        if ratio <= 0.0 {
            return None;
        }
        tick_from_price(ratio, tick_spacing).ok()
    }

    /// USD price of token1 given the USD price of token0; 0 while either is
    /// unknown.
    pub fn token1_usd(&self, token0_usd: f64) -> f64 {
        let ratio = self.ratio_f64();
        if ratio > 0.0 && token0_usd > 0.0 {
            token0_usd / ratio
        } else {
            0.0
        }
    }
}
