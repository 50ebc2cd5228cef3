use crate::enums::PositionStatus;
use crate::error::DomainError;
use crate::math::price_tick::{
    MAX_TICK, MIN_TICK, max_usable_tick, min_usable_tick, sqrt_price_from_tick,
};
use serde::{Deserialize, Serialize};

/// Half-width, in tick spacings, of the range proposed around the current tick.
pub const DEFAULT_HALF_WIDTH_STEPS: i32 = 50;

/// The `[tick_lower, tick_upper)` bounds of a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TickRange {
    pub lower: i32,
    pub upper: i32,
}

impl TickRange {
    pub fn new(lower: i32, upper: i32) -> Result<Self, DomainError> {
        if lower >= upper {
            return Err(DomainError::InvalidRange { lower, upper });
        }
        for tick in [lower, upper] {
            if !(MIN_TICK..=MAX_TICK).contains(&tick) {
                return Err(DomainError::TickOutOfBounds(tick));
            }
        }
        Ok(Self { lower, upper })
    }

    /// Like [`TickRange::new`] but also requires both ticks to sit on the
    /// fee tier's spacing, as the pool does when minting.
    pub fn aligned(lower: i32, upper: i32, tick_spacing: i32) -> Result<Self, DomainError> {
        if tick_spacing <= 0 {
            return Err(DomainError::InvalidTickSpacing(tick_spacing));
        }
        let range = Self::new(lower, upper)?;
        for tick in [lower, upper] {
            if tick % tick_spacing != 0 {
                return Err(DomainError::UnalignedTick {
                    tick,
                    spacing: tick_spacing,
                });
            }
        }
        Ok(range)
    }

    /// A range of `half_width_steps` spacings on each side of `center`,
    /// kept inside the usable ticks.
    pub fn around(
        center: i32,
        half_width_steps: i32,
        tick_spacing: i32,
    ) -> Result<Self, DomainError> {
        if tick_spacing <= 0 {
            return Err(DomainError::InvalidTickSpacing(tick_spacing));
        }
        let half_width = half_width_steps.max(1).saturating_mul(tick_spacing);
        let min = min_usable_tick(tick_spacing);
        let max = max_usable_tick(tick_spacing);
        let lower = center.saturating_sub(half_width).clamp(min, max - tick_spacing);
        let upper = center.saturating_add(half_width).clamp(lower + tick_spacing, max);
        Self::new(lower, upper)
    }

    pub fn width(&self) -> i32 {
        self.upper - self.lower
    }

    pub fn contains_tick(&self, tick: i32) -> bool {
        tick >= self.lower && tick < self.upper
    }

    /// `(sqrt(P_a), sqrt(P_b))` for the estimation math.
    pub fn sqrt_price_bounds(&self) -> (f64, f64) {
        (
            sqrt_price_from_tick(self.lower),
            sqrt_price_from_tick(self.upper),
        )
    }

    /// Classifies the current sqrt-price against this range.
    pub fn status(&self, sqrt_price_current: f64) -> PositionStatus {
        let (lower, upper) = self.sqrt_price_bounds();
        if sqrt_price_current <= lower {
            PositionStatus::BelowRange
        } else if sqrt_price_current < upper {
            PositionStatus::InRange
        } else {
            PositionStatus::AboveRange
        }
    }
}
