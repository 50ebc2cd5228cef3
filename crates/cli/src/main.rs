//! Command Line Interface for the WETH/CLAWD liquidity tools.
mod config;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use clawd_lp_domain::deposit::{
    DepositForm, DepositPlan, DepositStep, LockUpParams, MintParams, next_deposit_step,
};
use clawd_lp_domain::display::{
    format_multiplier, format_ratio, format_usd_at_tick, format_usd_value,
};
use clawd_lp_domain::enums::AmountSide;
use clawd_lp_domain::math::concentrated_liquidity::amounts_for_liquidity;
use clawd_lp_domain::math::sqrt_price_x96::amounts_for_liquidity_x96;
use clawd_lp_domain::pool::PoolSlot0;
use clawd_lp_domain::track::RangeTrack;
use clawd_lp_domain::value_objects::amount::Amount;
use clawd_lp_domain::value_objects::tick_range::TickRange;
use clawd_lp_domain::vesting::{PositionRead, VestingState};
use config::{ConfigArgs, Settings, parse_u256};
use dotenv::dotenv;
use primitive_types::U256;
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "clawd-lp")]
#[command(about = "WETH/CLAWD concentrated liquidity calculator", long_about = None)]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the pool price from a slot0 read
    Price {
        /// sqrtPriceX96 from slot0 (decimal or 0x hex)
        #[arg(long, value_parser = parse_u256)]
        sqrt_price_x96: U256,
    },
    /// Show the default range and slider positions
    Range {
        #[arg(long, value_parser = parse_u256)]
        sqrt_price_x96: U256,

        /// Lower tick (defaults to the proposed range)
        #[arg(long, allow_hyphen_values = true)]
        tick_lower: Option<i32>,

        /// Upper tick (defaults to the proposed range)
        #[arg(long, allow_hyphen_values = true)]
        tick_upper: Option<i32>,
    },
    /// Size a deposit from one token amount
    Quote {
        #[arg(long, value_parser = parse_u256)]
        sqrt_price_x96: U256,

        #[arg(long, allow_hyphen_values = true)]
        tick_lower: i32,

        #[arg(long, allow_hyphen_values = true)]
        tick_upper: i32,

        /// Token0 amount to deposit
        #[arg(long, conflicts_with = "clawd", required_unless_present = "clawd")]
        weth: Option<String>,

        /// Token1 amount to deposit
        #[arg(long)]
        clawd: Option<String>,
    },
    /// Token amounts held by an existing position
    Position {
        #[arg(long, value_parser = parse_u256)]
        sqrt_price_x96: U256,

        #[arg(long, allow_hyphen_values = true)]
        tick_lower: i32,

        #[arg(long, allow_hyphen_values = true)]
        tick_upper: i32,

        #[arg(long)]
        liquidity: u128,
    },
    /// Build NonfungiblePositionManager.mint parameters
    MintParams {
        #[arg(long, allow_hyphen_values = true)]
        tick_lower: i32,

        #[arg(long, allow_hyphen_values = true)]
        tick_upper: i32,

        #[arg(long)]
        weth: String,

        #[arg(long)]
        clawd: String,

        /// Position recipient
        #[arg(long)]
        recipient: String,

        /// Observed token0 allowance for the position manager
        #[arg(long, value_parser = parse_u256)]
        allowance0: Option<U256>,

        /// Observed token1 allowance for the position manager
        #[arg(long, value_parser = parse_u256)]
        allowance1: Option<U256>,
    },
    /// Build vesting lockUp arguments
    LockUpParams {
        #[arg(long, allow_hyphen_values = true)]
        tick_lower: i32,

        #[arg(long, allow_hyphen_values = true)]
        tick_upper: i32,

        #[arg(long)]
        weth: String,

        #[arg(long)]
        clawd: String,

        /// Vesting period in days
        #[arg(long, default_value_t = 30.0)]
        vest_days: f64,

        /// Observed token0 allowance for the vesting contract
        #[arg(long, value_parser = parse_u256)]
        allowance0: Option<U256>,

        /// Observed token1 allowance for the vesting contract
        #[arg(long, value_parser = parse_u256)]
        allowance1: Option<U256>,
    },
    /// Show vesting progress and the next withdrawal
    Vesting {
        #[arg(long, value_parser = parse_u256)]
        sqrt_price_x96: U256,

        #[arg(long, allow_hyphen_values = true)]
        tick_lower: i32,

        #[arg(long, allow_hyphen_values = true)]
        tick_upper: i32,

        /// Current liquidity of the locked position
        #[arg(long)]
        position_liquidity: u128,

        /// vestedPercent() (1e18 = 100%)
        #[arg(long, value_parser = parse_u256)]
        vested_percent_wad: U256,

        #[arg(long)]
        initial_liquidity: u128,

        #[arg(long, default_value_t = 0)]
        vested_liquidity: u128,

        /// Lock start, unix seconds
        #[arg(long)]
        lock_start: u64,

        /// Vesting duration in seconds
        #[arg(long)]
        vest_duration: u64,

        /// Treat the contract as unlocked
        #[arg(long)]
        unlocked: bool,
    },
}

fn now_secs() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp()).unwrap_or(0)
}

fn print_amount(label: &str, raw: U256, decimals: u8) {
    println!("{:<18} {}", label, Amount::new(raw, decimals));
}

fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let settings = cli.config.into_settings()?;
    debug!(?settings, "Loaded settings");

    match cli.command {
        Commands::Price { sqrt_price_x96 } => show_price(&settings, sqrt_price_x96),
        Commands::Range {
            sqrt_price_x96,
            tick_lower,
            tick_upper,
        } => show_range(&settings, sqrt_price_x96, tick_lower, tick_upper),
        Commands::Quote {
            sqrt_price_x96,
            tick_lower,
            tick_upper,
            weth,
            clawd,
        } => quote(&settings, sqrt_price_x96, tick_lower, tick_upper, weth, clawd),
        Commands::Position {
            sqrt_price_x96,
            tick_lower,
            tick_upper,
            liquidity,
        } => show_position(&settings, sqrt_price_x96, tick_lower, tick_upper, liquidity),
        Commands::MintParams {
            tick_lower,
            tick_upper,
            weth,
            clawd,
            recipient,
            allowance0,
            allowance1,
        } => {
            let plan = deposit_plan(&settings, tick_lower, tick_upper, weth, clawd)?;
            let params = build_mint_params(&settings, &plan, recipient, allowance0, allowance1)?;
            println!("{}", serde_json::to_string_pretty(&params)?);
            Ok(())
        }
        Commands::LockUpParams {
            tick_lower,
            tick_upper,
            weth,
            clawd,
            vest_days,
            allowance0,
            allowance1,
        } => {
            let plan = deposit_plan(&settings, tick_lower, tick_upper, weth, clawd)?;
            let params = build_lock_up_params(&settings, &plan, vest_days, allowance0, allowance1)?;
            println!("{}", serde_json::to_string_pretty(&params)?);
            Ok(())
        }
        Commands::Vesting {
            sqrt_price_x96,
            tick_lower,
            tick_upper,
            position_liquidity,
            vested_percent_wad,
            initial_liquidity,
            vested_liquidity,
            lock_start,
            vest_duration,
            unlocked,
        } => {
            let slot0 = PoolSlot0::new(sqrt_price_x96, 0);
            let position = PositionRead {
                tick_lower,
                tick_upper,
                liquidity: position_liquidity,
            };
            let state = VestingState {
                is_locked: !unlocked,
                vested_percent_wad,
                initial_liquidity,
                vested_liquidity,
                lock_start,
                vest_duration,
            };
            show_vesting(&settings, &slot0, &position, &state)
        }
    }
}

fn deposit_plan(
    settings: &Settings,
    tick_lower: i32,
    tick_upper: i32,
    weth: String,
    clawd: String,
) -> Result<DepositPlan> {
    let form = DepositForm {
        amount0_input: weth,
        amount1_input: clawd,
        anchor: AmountSide::Token0,
    };
    let range = TickRange::new(tick_lower, tick_upper)?;
    Ok(form.plan(range, &settings.token0, &settings.token1, settings.slippage)?)
}

fn symbol(settings: &Settings, side: AmountSide) -> &str {
    match side {
        AmountSide::Token0 => &settings.token0.symbol,
        AmountSide::Token1 => &settings.token1.symbol,
    }
}

/// Refuses to build a deposit until both approvals are observed.
fn ensure_ready(settings: &Settings, step: DepositStep) -> Result<()> {
    info!(?step, "Next deposit step");
    match step {
        DepositStep::Ready => Ok(()),
        DepositStep::AwaitingAllowance(side) => {
            let flag = match side {
                AmountSide::Token0 => "--allowance0",
                AmountSide::Token1 => "--allowance1",
            };
            anyhow::bail!("{} allowance not read yet, pass {}", symbol(settings, side), flag)
        }
        DepositStep::ApproveToken0 => {
            anyhow::bail!("approve {} first", symbol(settings, AmountSide::Token0))
        }
        DepositStep::ApproveToken1 => {
            anyhow::bail!("approve {} first", symbol(settings, AmountSide::Token1))
        }
    }
}

fn build_mint_params(
    settings: &Settings,
    plan: &DepositPlan,
    recipient: String,
    allowance0: Option<U256>,
    allowance1: Option<U256>,
) -> Result<MintParams> {
    ensure_ready(settings, next_deposit_step(plan, allowance0, allowance1))?;
    Ok(plan.mint_params(
        &settings.token0,
        &settings.token1,
        settings.fee_tier,
        recipient,
        now_secs(),
        settings.deadline_secs,
    )?)
}

fn build_lock_up_params(
    settings: &Settings,
    plan: &DepositPlan,
    vest_days: f64,
    allowance0: Option<U256>,
    allowance1: Option<U256>,
) -> Result<LockUpParams> {
    ensure_ready(settings, next_deposit_step(plan, allowance0, allowance1))?;
    Ok(plan.lock_up_params(vest_days, settings.fee_tier.tick_spacing)?)
}

fn show_price(settings: &Settings, sqrt_price_x96: U256) -> Result<()> {
    let slot0 = PoolSlot0::new(sqrt_price_x96, 0);
    let spacing = settings.fee_tier.tick_spacing;
    let ratio = slot0.ratio().context("pool price not loaded")?;
    let tick = slot0
        .current_tick(spacing)
        .context("cannot derive a tick from the pool price")?;

    println!("\n📊 Pool Price");
    println!("════════════════════════════════════");
    println!(
        "{} per {}: {}",
        settings.token1.symbol,
        settings.token0.symbol,
        format_ratio(ratio)
    );
    println!("sqrt price:        {:.12}", slot0.sqrt_price());
    println!("current tick:      {} (spacing {})", tick, spacing);
    if settings.eth_usd > 0.0 {
        println!(
            "{} USD:         {}",
            settings.token1.symbol,
            format_usd_at_tick(tick, settings.eth_usd)
        );
        println!(
            "{} USD (exact):  ${:.10}",
            settings.token1.symbol,
            slot0.token1_usd(settings.eth_usd)
        );
    }
    println!("════════════════════════════════════");
    Ok(())
}

fn show_range(
    settings: &Settings,
    sqrt_price_x96: U256,
    tick_lower: Option<i32>,
    tick_upper: Option<i32>,
) -> Result<()> {
    let slot0 = PoolSlot0::new(sqrt_price_x96, 0);
    let spacing = settings.fee_tier.tick_spacing;
    let current = slot0
        .current_tick(spacing)
        .context("pool price not loaded")?;
    let track = RangeTrack::new(current, spacing, settings.track_half_steps)?;
    let default_range = track.default_range()?;
    let range = TickRange::new(
        tick_lower.unwrap_or(default_range.lower),
        tick_upper.unwrap_or(default_range.upper),
    )?;
    let positions = track.positions(&range);
    let ratio = slot0.ratio_f64();

    println!("\n📐 Range");
    println!("════════════════════════════════════");
    let side = if range.contains_tick(current) {
        "inside"
    } else {
        "outside"
    };
    println!("current tick:  {} ({} range)", current, side);
    println!("track:         [{}, {}]", track.min_tick(), track.max_tick());
    println!("range:         [{}, {})", range.lower, range.upper);
    println!(
        "width:         {} ticks ({} spacings)",
        range.width(),
        range.width() / spacing
    );
    println!("status:        {:?}", range.status(slot0.sqrt_price()));
    println!(
        "min price:     {} ({} of current) at {:.1}%",
        format_usd_at_tick(range.upper, settings.eth_usd),
        format_multiplier(range.upper, ratio),
        positions.left_pct
    );
    println!(
        "max price:     {} ({} of current) at {:.1}%",
        format_usd_at_tick(range.lower, settings.eth_usd),
        format_multiplier(range.lower, ratio),
        positions.right_pct
    );
    println!("current at:    {:.1}%", positions.current_pct);
    println!("════════════════════════════════════");
    Ok(())
}

fn quote(
    settings: &Settings,
    sqrt_price_x96: U256,
    tick_lower: i32,
    tick_upper: i32,
    weth: Option<String>,
    clawd: Option<String>,
) -> Result<()> {
    let slot0 = PoolSlot0::new(sqrt_price_x96, 0);
    let range = TickRange::aligned(tick_lower, tick_upper, settings.fee_tier.tick_spacing)?;

    let mut form = DepositForm::new();
    match (weth, clawd) {
        (Some(value), _) => form.edit(AmountSide::Token0, value, slot0.sqrt_price(), &range),
        (None, Some(value)) => form.edit(AmountSide::Token1, value, slot0.sqrt_price(), &range),
        (None, None) => anyhow::bail!("either --weth or --clawd is required"),
    }

    println!("\n💧 Deposit Quote");
    println!("════════════════════════════════════");
    println!("range:    [{}, {})", range.lower, range.upper);
    println!("status:   {:?}", range.status(slot0.sqrt_price()));
    println!("{:<8}  {}", settings.token0.symbol, form.amount0_input);
    println!("{:<8}  {}", settings.token1.symbol, form.amount1_input);
    if settings.eth_usd > 0.0 {
        let weth_usd = form.amount0_input.parse::<f64>().unwrap_or(0.0) * settings.eth_usd;
        let clawd_usd =
            form.amount1_input.parse::<f64>().unwrap_or(0.0) * slot0.token1_usd(settings.eth_usd);
        println!("value:    ≈ {} + {}", format_usd_value(weth_usd), format_usd_value(clawd_usd));
    }
    println!("════════════════════════════════════");
    Ok(())
}

fn show_position(
    settings: &Settings,
    sqrt_price_x96: U256,
    tick_lower: i32,
    tick_upper: i32,
    liquidity: u128,
) -> Result<()> {
    let slot0 = PoolSlot0::new(sqrt_price_x96, 0);
    let (est0, est1) =
        amounts_for_liquidity(slot0.sqrt_price(), tick_lower, tick_upper, liquidity as f64);
    let (exact0, exact1) =
        amounts_for_liquidity_x96(sqrt_price_x96, tick_lower, tick_upper, liquidity);
    let scale0 = 10f64.powi(i32::from(settings.token0.decimals));
    let scale1 = 10f64.powi(i32::from(settings.token1.decimals));

    println!("\n📦 Position");
    println!("════════════════════════════════════");
    print_amount(&settings.token0.symbol, exact0, settings.token0.decimals);
    print_amount(&settings.token1.symbol, exact1, settings.token1.decimals);
    println!("estimate:          {:.8} / {:.2}", est0 / scale0, est1 / scale1);
    println!("════════════════════════════════════");
    Ok(())
}

fn show_vesting(
    settings: &Settings,
    slot0: &PoolSlot0,
    position: &PositionRead,
    state: &VestingState,
) -> Result<()> {
    let (locked0, locked1) = position.amounts(slot0);

    println!("\n🔒 Vesting");
    println!("════════════════════════════════════");
    println!("vested:            {:.2}%", state.total_vested_percent());
    println!("withdrawn:         {:.2}%", state.withdrawn_percent());
    println!("available now:     {:.2}%", state.available_percent());
    println!("time remaining:    {}", state.countdown(now_secs()));
    print_amount("locked", locked0, settings.token0.decimals);
    print_amount("", locked1, settings.token1.decimals);
    match state.preview_withdrawal(position, slot0) {
        Some((amount0, amount1)) => {
            print_amount("next withdrawal", amount0, settings.token0.decimals);
            print_amount("", amount1, settings.token1.decimals);
        }
        None => println!("next withdrawal:   nothing to withdraw"),
    }
    println!("════════════════════════════════════");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> Settings {
        Cli::try_parse_from(["clawd-lp", "price", "--sqrt-price-x96", "1"])
            .unwrap()
            .config
            .into_settings()
            .unwrap()
    }

    fn plan(settings: &Settings) -> DepositPlan {
        deposit_plan(settings, -1000, 1000, "1".to_string(), "2000".to_string()).unwrap()
    }

    #[test]
    fn test_params_require_observed_approvals() {
        let settings = settings();
        let plan = plan(&settings);
        let enough = Some(U256::MAX);

        let err = build_mint_params(&settings, &plan, "0xabc".into(), None, enough).unwrap_err();
        assert_eq!(err.to_string(), "WETH allowance not read yet, pass --allowance0");

        let err = build_lock_up_params(&settings, &plan, 30.0, enough, Some(U256::zero()))
            .unwrap_err();
        assert_eq!(err.to_string(), "approve CLAWD first");

        let err = build_lock_up_params(&settings, &plan, 30.0, Some(U256::one()), None)
            .unwrap_err();
        assert_eq!(err.to_string(), "approve WETH first");
    }

    #[test]
    fn test_params_once_approved() {
        let settings = settings();
        let plan = plan(&settings);
        let enough = Some(U256::MAX);

        let mint = build_mint_params(&settings, &plan, "0xabc".into(), enough, enough).unwrap();
        assert_eq!(mint.tick_lower, -1000);
        assert_eq!(mint.recipient, "0xabc");

        let lock_up = build_lock_up_params(&settings, &plan, 30.0, enough, enough).unwrap();
        assert_eq!(lock_up.vest_duration_secs, 30 * 86_400);
    }
}
