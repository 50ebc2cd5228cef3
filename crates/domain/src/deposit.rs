//! Sizing a new position and turning it into contract call parameters.
//!
//! The deposit form has two amount fields. Whichever was edited last is the
//! anchor: editing it, moving the range or receiving a new price recomputes
//! the other field from it, never the reverse, so the two fields cannot
//! feed back into each other.

use crate::display::format_amount;
use crate::enums::AmountSide;
use crate::error::DomainError;
use crate::fees::FeeTier;
use crate::math::concentrated_liquidity::{amount0_for_liquidity, amount1_for_liquidity};
use crate::token::Token;
use crate::value_objects::amount::Amount;
use crate::value_objects::percentage::Percentage;
use crate::value_objects::tick_range::TickRange;
use primitive_types::U256;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Seconds a mint transaction stays valid after it is built.
pub const DEFAULT_DEADLINE_SECS: u64 = 300;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// The two amount fields of the deposit form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositForm {
    pub amount0_input: String,
    pub amount1_input: String,
    /// The field edited last.
    pub anchor: AmountSide,
}

impl Default for DepositForm {
    fn default() -> Self {
        Self {
            amount0_input: String::new(),
            amount1_input: String::new(),
            anchor: AmountSide::Token0,
        }
    }
}

impl DepositForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self, side: AmountSide) -> &str {
        match side {
            AmountSide::Token0 => &self.amount0_input,
            AmountSide::Token1 => &self.amount1_input,
        }
    }

    fn input_mut(&mut self, side: AmountSide) -> &mut String {
        match side {
            AmountSide::Token0 => &mut self.amount0_input,
            AmountSide::Token1 => &mut self.amount1_input,
        }
    }

    /// Records a user edit of one field and recomputes the other.
    pub fn edit(
        &mut self,
        side: AmountSide,
        value: impl Into<String>,
        sqrt_price_current: f64,
        range: &TickRange,
    ) {
        *self.input_mut(side) = value.into();
        self.anchor = side;
        self.recompute(sqrt_price_current, range);
    }

    /// Recomputes the counterpart of the anchor field.
    ///
    /// Does nothing while the price is unknown or the anchor field does not
    /// hold a positive number, so the counterpart keeps its last value.
    pub fn recompute(&mut self, sqrt_price_current: f64, range: &TickRange) {
        if !(sqrt_price_current > 0.0) {
            debug!("Price not loaded, skipping deposit recompute");
            return;
        }
        let anchor = self.anchor;
        let value = match self.input(anchor).trim().parse::<f64>() {
            Ok(v) if v.is_finite() && v > 0.0 => v,
            _ => {
                debug!(side = ?anchor, "No positive anchor amount, skipping recompute");
                return;
            }
        };

        let (lower, upper) = range.sqrt_price_bounds();
        let counterpart = match anchor {
            AmountSide::Token0 => amount0_for_liquidity(value, sqrt_price_current, lower, upper),
            AmountSide::Token1 => amount1_for_liquidity(value, sqrt_price_current, lower, upper),
        };
        let other = anchor.other();
        *self.input_mut(other) = format_amount(other, counterpart);
        debug!(
            anchor = ?anchor,
            amount = value,
            counterpart = counterpart,
            tick_lower = range.lower,
            tick_upper = range.upper,
            "Deposit recomputed"
        );
    }

    /// Converts the form into base-unit amounts for `range`.
    pub fn plan(
        &self,
        range: TickRange,
        token0: &Token,
        token1: &Token,
        slippage: Percentage,
    ) -> Result<DepositPlan, DomainError> {
        Ok(DepositPlan {
            range,
            amount0: Amount::parse(&self.amount0_input, token0.decimals)?,
            amount1: Amount::parse(&self.amount1_input, token1.decimals)?,
            slippage,
        })
    }
}

/// Which transaction the deposit flow should offer next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DepositStep {
    /// The allowance for this side has not been read yet.
    AwaitingAllowance(AmountSide),
    ApproveToken0,
    ApproveToken1,
    /// Both allowances cover the deposit.
    Ready,
}

/// Whether `amount` still has to be approved before it can be pulled.
///
/// A zero amount is never transferred and needs nothing. Otherwise only a
/// read allowance at or above the amount clears it.
pub fn needs_approval(allowance: Option<U256>, amount: &Amount) -> bool {
    if amount.is_zero() {
        return false;
    }
    match allowance {
        Some(allowance) => allowance < amount.raw,
        None => true,
    }
}

fn allowance_step(
    side: AmountSide,
    allowance: Option<U256>,
    amount: &Amount,
) -> Option<DepositStep> {
    if !needs_approval(allowance, amount) {
        return None;
    }
    Some(match (allowance, side) {
        (None, side) => DepositStep::AwaitingAllowance(side),
        (Some(_), AmountSide::Token0) => DepositStep::ApproveToken0,
        (Some(_), AmountSide::Token1) => DepositStep::ApproveToken1,
    })
}

/// Orders the writes: token0 approval, then token1 approval, then the deposit.
/// A side whose allowance has not been observed blocks everything after it.
pub fn next_deposit_step(
    plan: &DepositPlan,
    allowance0: Option<U256>,
    allowance1: Option<U256>,
) -> DepositStep {
    allowance_step(AmountSide::Token0, allowance0, &plan.amount0)
        .or_else(|| allowance_step(AmountSide::Token1, allowance1, &plan.amount1))
        .unwrap_or(DepositStep::Ready)
}

/// Amounts and range ready to be turned into a contract call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositPlan {
    pub range: TickRange,
    pub amount0: Amount,
    pub amount1: Amount,
    pub slippage: Percentage,
}

impl DepositPlan {
    pub fn amount0_min(&self) -> Amount {
        self.amount0.with_slippage(self.slippage)
    }

    pub fn amount1_min(&self) -> Amount {
        self.amount1.with_slippage(self.slippage)
    }

    fn check(&self, tick_spacing: i32) -> Result<(), DomainError> {
        TickRange::aligned(self.range.lower, self.range.upper, tick_spacing)?;
        if self.amount0.is_zero() {
            return Err(DomainError::EmptyDeposit);
        }
        Ok(())
    }

    /// Parameters for `NonfungiblePositionManager.mint`.
    pub fn mint_params(
        &self,
        token0: &Token,
        token1: &Token,
        fee_tier: FeeTier,
        recipient: impl Into<String>,
        now: u64,
        deadline_secs: u64,
    ) -> Result<MintParams, DomainError> {
        self.check(fee_tier.tick_spacing)?;
        let params = MintParams {
            token0: token0.address.clone(),
            token1: token1.address.clone(),
            fee: fee_tier.fee,
            tick_lower: self.range.lower,
            tick_upper: self.range.upper,
            amount0_desired: self.amount0.raw,
            amount1_desired: self.amount1.raw,
            amount0_min: self.amount0_min().raw,
            amount1_min: self.amount1_min().raw,
            recipient: recipient.into(),
            deadline: now.saturating_add(deadline_secs),
        };
        debug!(
            tick_lower = params.tick_lower,
            tick_upper = params.tick_upper,
            amount0 = %params.amount0_desired,
            amount1 = %params.amount1_desired,
            "Built mint params"
        );
        Ok(params)
    }

    /// Arguments for the vesting contract's `lockUp`.
    pub fn lock_up_params(
        &self,
        vest_days: f64,
        tick_spacing: i32,
    ) -> Result<LockUpParams, DomainError> {
        self.check(tick_spacing)?;
        if !(vest_days > 0.0) || !vest_days.is_finite() {
            return Err(DomainError::InvalidDuration);
        }
        let params = LockUpParams {
            amount0: self.amount0.raw,
            amount1: self.amount1.raw,
            vest_duration_secs: (vest_days * SECONDS_PER_DAY).floor() as u64,
            tick_lower: self.range.lower,
            tick_upper: self.range.upper,
            amount0_min: self.amount0_min().raw,
            amount1_min: self.amount1_min().raw,
        };
        debug!(
            vest_duration_secs = params.vest_duration_secs,
            "Built lock-up params"
        );
        Ok(params)
    }
}

/// `INonfungiblePositionManager.MintParams`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MintParams {
    pub token0: String,
    pub token1: String,
    pub fee: u32,
    pub tick_lower: i32,
    pub tick_upper: i32,
    pub amount0_desired: U256,
    pub amount1_desired: U256,
    pub amount0_min: U256,
    pub amount1_min: U256,
    pub recipient: String,
    pub deadline: u64,
}

/// Arguments of `lockUp(amount0, amount1, duration, tickLower, tickUpper, min0, min1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LockUpParams {
    pub amount0: U256,
    pub amount1: U256,
    pub vest_duration_secs: u64,
    pub tick_lower: i32,
    pub tick_upper: i32,
    pub amount0_min: U256,
    pub amount1_min: U256,
}
