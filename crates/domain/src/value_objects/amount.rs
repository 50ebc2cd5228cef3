use crate::error::DomainError;
use crate::value_objects::percentage::Percentage;
use primitive_types::U256;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A token quantity in base units together with the token's decimals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Amount {
    pub raw: U256,
    pub decimals: u8,
}

impl Amount {
    pub fn new(raw: U256, decimals: u8) -> Self {
        Self { raw, decimals }
    }

    pub fn zero(decimals: u8) -> Self {
        Self::new(U256::zero(), decimals)
    }

    pub fn is_zero(&self) -> bool {
        self.raw.is_zero()
    }

    /// Converts a human amount into base units, dropping digits beyond
    /// `decimals`.
    pub fn from_decimal(d: Decimal, decimals: u8) -> Result<Self, DomainError> {
        if d.is_sign_negative() && !d.is_zero() {
            return Err(DomainError::NegativeAmount);
        }
        let truncated = d.round_dp_with_strategy(u32::from(decimals), RoundingStrategy::ToZero);
        let mantissa = truncated
            .mantissa()
            .to_u128()
            .ok_or(DomainError::Overflow("amount"))?;
        let exponent = u32::from(decimals) - truncated.scale();
        if exponent > 77 {
            return Err(DomainError::Overflow("amount"));
        }
        let raw = U256::from(mantissa)
            .checked_mul(U256::exp10(exponent as usize))
            .ok_or(DomainError::Overflow("amount"))?;
        Ok(Self { raw, decimals })
    }

    /// Parses a field value such as `"1.5"`. An empty field is zero.
    pub fn parse(input: &str, decimals: u8) -> Result<Self, DomainError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(Self::zero(decimals));
        }
        let d = Decimal::from_str(trimmed).map_err(|_| DomainError::Parse(trimmed.to_string()))?;
        Self::from_decimal(d, decimals)
    }

    pub fn to_decimal(&self) -> Result<Decimal, DomainError> {
        if self.raw > U256::from(i128::MAX as u128) {
            return Err(DomainError::Overflow("amount"));
        }
        Decimal::try_from_i128_with_scale(self.raw.as_u128() as i128, u32::from(self.decimals))
            .map_err(|_| DomainError::Overflow("amount"))
    }

    /// Lossy human value, for display and estimation.
    pub fn to_f64(&self) -> f64 {
        self.raw.to_f64_lossy() / 10f64.powi(i32::from(self.decimals))
    }

    /// Minimum acceptable amount after a slippage haircut, rounded down.
    pub fn with_slippage(&self, slippage: Percentage) -> Self {
        let retained = U256::from(slippage.retained_bps());
        let raw = match self.raw.checked_mul(retained) {
            Some(scaled) => scaled / U256::from(10_000u32),
            None => self.raw / U256::from(10_000u32) * retained,
        };
        Self {
            raw,
            decimals: self.decimals,
        }
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_decimal() {
            Ok(d) => write!(f, "{}", d.normalize()),
            Err(_) => write!(f, "{}e-{}", self.raw, self.decimals),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_from_decimal() {
        let a = Amount::from_decimal(dec!(1.5), 18).unwrap();
        assert_eq!(a.raw, U256::from(1_500_000_000_000_000_000u128));

        let b = Amount::from_decimal(dec!(0.123456789), 6).unwrap();
        assert_eq!(b.raw, U256::from(123_456u64));

        let c = Amount::from_decimal(dec!(42), 0).unwrap();
        assert_eq!(c.raw, U256::from(42u64));
    }

    #[test]
    fn test_from_decimal_rejects_negative() {
        assert_eq!(
            Amount::from_decimal(dec!(-1), 18),
            Err(DomainError::NegativeAmount)
        );
    }

    #[test]
    fn test_parse() {
        assert!(Amount::parse("", 18).unwrap().is_zero());
        assert_eq!(
            Amount::parse(" 2.25 ", 18).unwrap().raw,
            U256::from(2_250_000_000_000_000_000u128)
        );
        assert_eq!(
            Amount::parse("abc", 18),
            Err(DomainError::Parse("abc".to_string()))
        );
    }

    #[test]
    fn test_to_decimal_and_display() {
        let a = Amount::new(U256::from(1_250_000_000_000_000_000u128), 18);
        assert_eq!(a.to_decimal().unwrap(), dec!(1.25));
        assert_eq!(a.to_string(), "1.25");
        assert!((a.to_f64() - 1.25).abs() < 1e-12);
    }

    #[test]
    fn test_with_slippage() {
        let a = Amount::new(U256::from(1_000u64), 18);
        assert_eq!(a.with_slippage(Percentage::from_bps(500)).raw, U256::from(950u64));

        // Rounds down like (x * 95) / 100
        let b = Amount::new(U256::from(999u64), 18);
        assert_eq!(b.with_slippage(Percentage::default()).raw, U256::from(949u64));
    }
}
