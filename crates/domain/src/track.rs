//! Range slider geometry.
//!
//! The track spans `half_steps` tick spacings on each side of the current
//! tick. The axis is inverted: higher ticks mean cheaper token1, so they are
//! drawn on the left (low USD) and lower ticks on the right (high USD).

use crate::error::DomainError;
use crate::math::price_tick::snap_to_spacing;
use crate::value_objects::tick_range::{DEFAULT_HALF_WIDTH_STEPS, TickRange};
use serde::{Deserialize, Serialize};

/// Default number of spacings drawn on each side of the current tick.
pub const DEFAULT_TRACK_HALF_STEPS: i32 = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeTrack {
    pub current_tick: i32,
    pub tick_spacing: i32,
    pub half_steps: i32,
}

/// Handle positions on the track, as percentages from the left edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackPositions {
    /// Handle bound to the upper tick.
    pub left_pct: f64,
    /// Handle bound to the lower tick.
    pub right_pct: f64,
    pub current_pct: f64,
}

impl RangeTrack {
    pub fn new(current_tick: i32, tick_spacing: i32, half_steps: i32) -> Result<Self, DomainError> {
        if tick_spacing <= 0 {
            return Err(DomainError::InvalidTickSpacing(tick_spacing));
        }
        Ok(Self {
            current_tick,
            tick_spacing,
            half_steps: half_steps.max(1),
        })
    }

    pub fn min_tick(&self) -> i32 {
        self.current_tick
            .saturating_sub(self.half_steps.saturating_mul(self.tick_spacing))
    }

    pub fn max_tick(&self) -> i32 {
        self.current_tick
            .saturating_add(self.half_steps.saturating_mul(self.tick_spacing))
    }

    /// Position of `tick` on the inverted axis, clamped to [0, 100].
    pub fn tick_to_pct(&self, tick: i32) -> f64 {
        let min = f64::from(self.min_tick());
        let span = f64::from(self.max_tick()) - min;
        let pct = 100.0 - (f64::from(tick) - min) / span * 100.0;
        pct.clamp(0.0, 100.0)
    }

    /// Tick under a pointer at `pct`, snapped to the spacing.
    pub fn pct_to_tick(&self, pct: f64) -> i32 {
        let pct = if pct.is_nan() { 50.0 } else { pct.clamp(0.0, 100.0) };
        let min = f64::from(self.min_tick());
        let span = f64::from(self.max_tick()) - min;
        let raw = min + (100.0 - pct) / 100.0 * span;
        snap_to_spacing(raw, self.tick_spacing)
    }

    /// The range proposed before the user touches the handles.
    pub fn default_range(&self) -> Result<TickRange, DomainError> {
        TickRange::around(self.current_tick, DEFAULT_HALF_WIDTH_STEPS, self.tick_spacing)
    }

    pub fn positions(&self, range: &TickRange) -> TrackPositions {
        TrackPositions {
            left_pct: self.tick_to_pct(range.upper),
            right_pct: self.tick_to_pct(range.lower),
            current_pct: self.tick_to_pct(self.current_tick),
        }
    }

    /// Moves the left handle (the upper tick). A drop that would meet or
    /// cross the lower tick leaves the range unchanged.
    pub fn drag_upper(&self, range: TickRange, pct: f64) -> TickRange {
        let tick = self.pct_to_tick(pct);
        TickRange::new(range.lower, tick).unwrap_or(range)
    }

    /// Moves the right handle (the lower tick). A drop that would meet or
    /// cross the upper tick leaves the range unchanged.
    pub fn drag_lower(&self, range: TickRange, pct: f64) -> TickRange {
        let tick = self.pct_to_tick(pct);
        TickRange::new(tick, range.upper).unwrap_or(range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track() -> RangeTrack {
        RangeTrack::new(0, 200, DEFAULT_TRACK_HALF_STEPS).unwrap()
    }

    #[test]
    fn test_bounds() {
        let t = track();
        assert_eq!(t.min_tick(), -40_000);
        assert_eq!(t.max_tick(), 40_000);
    }

    #[test]
    fn test_tick_to_pct_is_inverted() {
        let t = track();
        assert_eq!(t.tick_to_pct(40_000), 0.0);
        assert_eq!(t.tick_to_pct(-40_000), 100.0);
        assert_eq!(t.tick_to_pct(0), 50.0);
        // Off-track ticks clamp
        assert_eq!(t.tick_to_pct(90_000), 0.0);
        assert_eq!(t.tick_to_pct(-90_000), 100.0);
    }

    #[test]
    fn test_pct_to_tick_snaps() {
        let t = track();
        assert_eq!(t.pct_to_tick(50.0), 0);
        assert_eq!(t.pct_to_tick(0.0), 40_000);
        assert_eq!(t.pct_to_tick(100.0), -40_000);
        // 25.1% -> raw 19_920 -> 20_000
        assert_eq!(t.pct_to_tick(25.1), 20_000);
        assert_eq!(t.pct_to_tick(f64::NAN), 0);
        assert_eq!(t.pct_to_tick(t.tick_to_pct(-12_400)), -12_400);
    }

    #[test]
    fn test_default_range_and_positions() {
        let t = track();
        let range = t.default_range().unwrap();
        assert_eq!(range, TickRange::new(-10_000, 10_000).unwrap());

        let p = t.positions(&range);
        assert_eq!(p.left_pct, 37.5);
        assert_eq!(p.right_pct, 62.5);
        assert_eq!(p.current_pct, 50.0);
    }

    #[test]
    fn test_handles_cannot_cross() {
        let t = track();
        let range = TickRange::new(-10_000, 10_000).unwrap();

        // Moving the upper handle right of the lower one is refused
        assert_eq!(t.drag_upper(range, 90.0), range);
        assert_eq!(t.drag_upper(range, 40.0).upper, 8_000);

        assert_eq!(t.drag_lower(range, 10.0), range);
        assert_eq!(t.drag_lower(range, 60.0).lower, -8_000);
    }

    #[test]
    fn test_rejects_bad_spacing() {
        assert_eq!(
            RangeTrack::new(0, -1, 200),
            Err(DomainError::InvalidTickSpacing(-1))
        );
    }
}
