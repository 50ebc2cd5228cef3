//! Read-side view of the liquidity vesting contract.
//!
//! The contract locks one Uniswap V3 position and releases its liquidity
//! linearly over `vest_duration` seconds. Everything here derives from its
//! view functions plus the position and pool reads.

use crate::math::sqrt_price_x96::amounts_for_liquidity_x96;
use crate::pool::PoolSlot0;
use primitive_types::{U256, U512};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// 100% in the contract's 1e18 fixed-point percentages.
pub const WAD: u128 = 1_000_000_000_000_000_000;

/// The locked position as returned by `positions(tokenId)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionRead {
    pub tick_lower: i32,
    pub tick_upper: i32,
    pub liquidity: u128,
}

impl PositionRead {
    /// Exact token amounts held by the position at the current pool price.
    pub fn amounts(&self, slot0: &PoolSlot0) -> (U256, U256) {
        amounts_for_liquidity_x96(
            slot0.sqrt_price_x96,
            self.tick_lower,
            self.tick_upper,
            self.liquidity,
        )
    }
}

/// The vesting contract's state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VestingState {
    pub is_locked: bool,
    /// `vestedPercent()`, 1e18 = 100%.
    pub vested_percent_wad: U256,
    /// `initialLiquidity()`.
    pub initial_liquidity: u128,
    /// `vestedLiquidity()`: liquidity already withdrawn.
    pub vested_liquidity: u128,
    /// Unix seconds.
    pub lock_start: u64,
    /// Seconds.
    pub vest_duration: u64,
}

impl VestingState {
    /// Vested share of the initial liquidity, 0..=100.
    pub fn vested_percent(&self) -> f64 {
        let wad = self.vested_percent_wad.min(U256::from(u128::MAX)).as_u128();
        wad as f64 / 1e16
    }

    /// Share of the initial liquidity already withdrawn, 0..=100, with two
    /// decimals of precision.
    pub fn withdrawn_percent(&self) -> f64 {
        if self.initial_liquidity == 0 {
            return 0.0;
        }
        let basis = U256::from(self.vested_liquidity) * U256::from(10_000u32)
            / U256::from(self.initial_liquidity);
        basis.min(U256::from(u64::MAX)).as_u64() as f64 / 100.0
    }

    /// Vested but not yet withdrawn, 0..=100.
    pub fn available_percent(&self) -> f64 {
        (self.vested_percent() - self.withdrawn_percent()).max(0.0)
    }

    pub fn total_vested_percent(&self) -> f64 {
        self.withdrawn_percent() + self.available_percent()
    }

    /// Liquidity the next `vest()` would remove:
    /// vestedPercent * initialLiquidity / 1e18 - vestedLiquidity
    pub fn liquidity_to_withdraw(&self) -> u128 {
        let total = self.vested_percent_wad.full_mul(U256::from(self.initial_liquidity))
            / U512::from(WAD);
        let total = U256::try_from(total).unwrap_or(U256::MAX);
        let total = total.min(U256::from(u128::MAX)).as_u128();
        total.saturating_sub(self.vested_liquidity)
    }

    /// Token amounts the next `vest()` would release at the current price.
    /// `None` when nothing is locked, the price is not loaded or nothing is
    /// withdrawable.
    pub fn preview_withdrawal(
        &self,
        position: &PositionRead,
        slot0: &PoolSlot0,
    ) -> Option<(U256, U256)> {
        if !self.is_locked || !slot0.is_loaded() {
            return None;
        }
        let liquidity = self.liquidity_to_withdraw();
        if liquidity == 0 {
            debug!("Nothing vested since last withdrawal");
            return None;
        }
        Some(amounts_for_liquidity_x96(
            slot0.sqrt_price_x96,
            position.tick_lower,
            position.tick_upper,
            liquidity,
        ))
    }

    pub fn countdown(&self, now: u64) -> VestingCountdown {
        if !self.is_locked || self.lock_start == 0 || self.vest_duration == 0 {
            return VestingCountdown::NotLocked;
        }
        let end = self.lock_start.saturating_add(self.vest_duration);
        if now >= end {
            return VestingCountdown::FullyVested;
        }
        let remaining = end - now;
        VestingCountdown::Remaining {
            days: remaining / 86_400,
            hours: (remaining % 86_400) / 3_600,
            minutes: (remaining % 3_600) / 60,
        }
    }
}

/// Time left until the position is fully vested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VestingCountdown {
    NotLocked,
    FullyVested,
    Remaining { days: u64, hours: u64, minutes: u64 },
}

impl fmt::Display for VestingCountdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VestingCountdown::NotLocked => write!(f, "N/A"),
            VestingCountdown::FullyVested => write!(f, "Fully vested"),
            VestingCountdown::Remaining {
                days,
                hours,
                minutes,
            } => write!(f, "{days}d {hours}h {minutes}m"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::sqrt_price_x96::{q96, tick_to_sqrt_price_x96};

    fn abs_diff(a: U256, b: U256) -> U256 {
        if a > b { a - b } else { b - a }
    }

    fn state(vested_pct: u128, initial: u128, vested: u128) -> VestingState {
        VestingState {
            is_locked: true,
            vested_percent_wad: U256::from(vested_pct),
            initial_liquidity: initial,
            vested_liquidity: vested,
            lock_start: 1_000_000,
            vest_duration: 30 * 86_400,
        }
    }

    #[test]
    fn test_percentages() {
        // 40% vested, 25% withdrawn
        let s = state(WAD * 40 / 100, 1_000_000, 250_000);
        assert!((s.vested_percent() - 40.0).abs() < 1e-9);
        assert_eq!(s.withdrawn_percent(), 25.0);
        assert!((s.available_percent() - 15.0).abs() < 1e-9);
        assert!((s.total_vested_percent() - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_available_never_negative() {
        let s = state(WAD / 10, 1_000_000, 500_000);
        assert_eq!(s.available_percent(), 0.0);
        assert_eq!(s.liquidity_to_withdraw(), 0);
    }

    #[test]
    fn test_liquidity_to_withdraw() {
        let s = state(WAD / 2, 1_000_000, 200_000);
        assert_eq!(s.liquidity_to_withdraw(), 300_000);

        let empty = state(WAD / 2, 0, 0);
        assert_eq!(empty.withdrawn_percent(), 0.0);
        assert_eq!(empty.liquidity_to_withdraw(), 0);
    }

    #[test]
    fn test_preview_withdrawal() {
        let s = state(WAD / 2, 1_000_000_000_000, 0);
        let position = PositionRead {
            tick_lower: -2000,
            tick_upper: 2000,
            liquidity: 1_000_000_000_000,
        };
        let slot0 = PoolSlot0::new(q96(), 0);

        let (a0, a1) = s.preview_withdrawal(&position, &slot0).unwrap();
        let (p0, p1) = position.amounts(&slot0);
        assert!(a0 > U256::zero() && a1 > U256::zero());
        // Half the liquidity releases about half the tokens
        assert!(abs_diff(p0 / U256::from(2u8), a0) <= U256::one());
        assert!(abs_diff(p1 / U256::from(2u8), a1) <= U256::one());
    }

    #[test]
    fn test_preview_withdrawal_unavailable() {
        let position = PositionRead {
            tick_lower: -2000,
            tick_upper: 2000,
            liquidity: 1_000,
        };
        let slot0 = PoolSlot0::new(tick_to_sqrt_price_x96(0), 0);

        let mut unlocked = state(WAD / 2, 1_000, 0);
        unlocked.is_locked = false;
        assert_eq!(unlocked.preview_withdrawal(&position, &slot0), None);

        let drained = state(WAD / 2, 1_000, 500);
        assert_eq!(drained.preview_withdrawal(&position, &slot0), None);

        let fresh = state(WAD / 2, 1_000, 0);
        let unloaded = PoolSlot0::new(U256::zero(), 0);
        assert_eq!(fresh.preview_withdrawal(&position, &unloaded), None);
    }

    #[test]
    fn test_countdown() {
        let s = state(0, 1, 0);
        let now = s.lock_start + 86_400 + 2 * 3_600 + 5 * 60 + 7;
        let countdown = s.countdown(now);
        assert_eq!(
            countdown,
            VestingCountdown::Remaining {
                days: 28,
                hours: 21,
                minutes: 54
            }
        );
        assert_eq!(countdown.to_string(), "28d 21h 54m");
        assert_eq!(s.countdown(s.lock_start + s.vest_duration).to_string(), "Fully vested");

        let mut unlocked = s;
        unlocked.is_locked = false;
        assert_eq!(unlocked.countdown(now).to_string(), "N/A");
    }
}
