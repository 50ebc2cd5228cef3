//! Settings shared by every command.
//!
//! Each value can come from a flag, from the environment (a `.env` file is
//! loaded first) or fall back to the deployed pool's parameters.

use anyhow::{Context, Result};
use clap::Args;
use clawd_lp_domain::deposit::DEFAULT_DEADLINE_SECS;
use clawd_lp_domain::fees::FeeTier;
use clawd_lp_domain::token::{CLAWD_ADDRESS, Token, WETH_ADDRESS};
use clawd_lp_domain::track::DEFAULT_TRACK_HALF_STEPS;
use clawd_lp_domain::value_objects::percentage::{DEFAULT_SLIPPAGE_BPS, Percentage};
use primitive_types::U256;

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    /// Tick spacing of the pool's fee tier
    #[arg(long, env = "CLAWD_LP_TICK_SPACING", default_value_t = 200, global = true)]
    pub tick_spacing: i32,

    /// Pool fee in hundredths of a basis point
    #[arg(long, env = "CLAWD_LP_FEE", default_value_t = 10_000, global = true)]
    pub fee: u32,

    /// Slippage tolerance applied to contract minimums, in basis points
    #[arg(
        long,
        env = "CLAWD_LP_SLIPPAGE_BPS",
        default_value_t = DEFAULT_SLIPPAGE_BPS,
        global = true
    )]
    pub slippage_bps: u32,

    /// Tick spacings drawn on each side of the current tick on the range track
    #[arg(
        long,
        env = "CLAWD_LP_TRACK_HALF_STEPS",
        default_value_t = DEFAULT_TRACK_HALF_STEPS,
        global = true
    )]
    pub track_half_steps: i32,

    /// Seconds a mint stays valid
    #[arg(
        long,
        env = "CLAWD_LP_DEADLINE_SECS",
        default_value_t = DEFAULT_DEADLINE_SECS,
        global = true
    )]
    pub deadline_secs: u64,

    /// Token0 address
    #[arg(long, env = "CLAWD_LP_TOKEN0", default_value = WETH_ADDRESS, global = true)]
    pub token0: String,

    /// Token1 address
    #[arg(long, env = "CLAWD_LP_TOKEN1", default_value = CLAWD_ADDRESS, global = true)]
    pub token1: String,

    /// USD price of token0, used for USD display
    #[arg(long, env = "CLAWD_LP_ETH_USD", global = true)]
    pub eth_usd: Option<f64>,
}

/// Validated settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub fee_tier: FeeTier,
    pub slippage: Percentage,
    pub track_half_steps: i32,
    pub deadline_secs: u64,
    pub token0: Token,
    pub token1: Token,
    /// 0 when unknown.
    pub eth_usd: f64,
}

impl ConfigArgs {
    pub fn into_settings(self) -> Result<Settings> {
        let fee_tier = FeeTier::new(self.fee, self.tick_spacing).context("invalid fee tier")?;
        if self.slippage_bps > 10_000 {
            anyhow::bail!("slippage of {} bps exceeds 100%", self.slippage_bps);
        }
        let weth = Token::weth();
        let clawd = Token::clawd();
        Ok(Settings {
            fee_tier,
            slippage: Percentage::from_bps(self.slippage_bps),
            track_half_steps: self.track_half_steps,
            deadline_secs: self.deadline_secs,
            token0: Token::new(self.token0, weth.symbol, weth.decimals, weth.name),
            token1: Token::new(self.token1, clawd.symbol, clawd.decimals, clawd.name),
            eth_usd: self.eth_usd.filter(|p| p.is_finite() && *p > 0.0).unwrap_or(0.0),
        })
    }
}

/// Parses a decimal or `0x`-prefixed hexadecimal integer.
pub fn parse_u256(input: &str) -> Result<U256, String> {
    let trimmed = input.trim();
    match trimmed.strip_prefix("0x") {
        Some(hex) => U256::from_str_radix(hex, 16).map_err(|e| e.to_string()),
        None => U256::from_dec_str(trimmed).map_err(|e| e.to_string()),
    }
}
