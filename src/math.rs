// src/math.rs
//! Concentrated-liquidity math for a single pool snapshot.
//!
//! Everything here is plain `f64` arithmetic. Degenerate inputs (zero TVL,
//! extreme ticks) produce `inf`/`NaN` instead of errors.

use serde::{Deserialize, Serialize};

/// Base of the tick -> price exponential
pub const TICK_BASE: f64 = 1.0001;

/// Tick spacing used for fee tiers missing from [`FEE_TIER_TICK_SPACING`]
pub const DEFAULT_TICK_SPACING: i32 = 60;

/// Fee tier (hundredths of a bip) -> tick spacing
pub const FEE_TIER_TICK_SPACING: [(u32, i32); 3] = [(500, 10), (3000, 60), (10000, 200)];

/// Held in `i64` so ranges next to `i32::MIN`/`i32::MAX` don't overflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickRange {
    pub bottom_tick: i64,
    pub top_tick: i64,
}

/// Raw token amounts (before decimal adjustment) held by `L` inside a tick range
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LiquidityAmounts {
    pub amount0: f64,
    pub amount1: f64,
}

/// Liquidity amounts re-expressed in a single token at the current price
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CombinedValuation {
    pub combined_amount0: f64,
    pub combined_amount1: f64,
}

/// Convert a tick to a price, i.e. the raw token1/token0 ratio
pub fn tick_to_price(tick: i64) -> f64 {
    TICK_BASE.powf(tick as f64)
}

/// Not every tick can be initialized; spacing is determined by the fee tier.
/// Unknown fee tiers fall back to [`DEFAULT_TICK_SPACING`].
pub fn fee_tier_to_tick_spacing(fee_tier: u32) -> i32 {
    FEE_TIER_TICK_SPACING
        .iter()
        .find(|(tier, _)| *tier == fee_tier)
        .map(|(_, spacing)| *spacing)
        .unwrap_or(DEFAULT_TICK_SPACING)
}

/// Initializable ticks surrounding `tick`. Floors toward negative infinity,
/// so `-5` with spacing `60` lands in `[-60, 0)`.
pub fn compute_tick_range(tick: i32, spacing: i32) -> TickRange {
    let spacing = spacing as i64;
    let bottom_tick = (tick as i64).div_euclid(spacing) * spacing;
    TickRange {
        bottom_tick,
        top_tick: bottom_tick + spacing,
    }
}

/// Token amounts the active liquidity would yield if withdrawn across `range`.
///
/// The range bounds use `price(tick / 2)` as their square root, with the half
/// tick floored. Bounds are multiples of an even spacing for every known fee
/// tier, so this only diverges from a true square root on odd bounds.
pub fn compute_liquidity_amounts(liquidity: f64, tick: i32, range: TickRange) -> LiquidityAmounts {
    let l = liquidity;
    let sp = tick_to_price(tick as i64).sqrt();
    let sa = tick_to_price(range.bottom_tick.div_euclid(2));
    let sb = tick_to_price(range.top_tick.div_euclid(2));

    LiquidityAmounts {
        amount0: l * (sb - sp) / (sp * sb),
        amount1: l * (sp - sa),
    }
}

/// Requires `price > 0`.
pub fn compute_combined_valuation(amounts: LiquidityAmounts, price: f64) -> CombinedValuation {
    CombinedValuation {
        combined_amount0: amounts.amount0 + amounts.amount1 / price,
        combined_amount1: amounts.amount1 + amounts.amount0 * price,
    }
}

/// Scale a raw on-chain amount down by `10^decimals`. Negative `decimals`
/// scale up, which is what a token1/token0 price needs when token0 has more
/// decimals than token1.
pub fn adjust_for_decimals(raw_amount: f64, decimals: i32) -> f64 {
    raw_amount / 10f64.powi(decimals)
}

/// Share of the token1 TVL that is active in the current tick range.
/// A pool with zero recorded TVL yields `inf` or `NaN`.
pub fn compute_concentration_ratio(adjusted_combined_amount1: f64, total_locked_token1: f64) -> f64 {
    adjusted_combined_amount1 / total_locked_token1
}
