// src/report.rs
use std::fmt;
use std::io::{self, Write};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::math::{
    adjust_for_decimals, compute_combined_valuation, compute_concentration_ratio,
    compute_liquidity_amounts, compute_tick_range, fee_tier_to_tick_spacing, tick_to_price,
    CombinedValuation, LiquidityAmounts, TickRange,
};
use crate::pool::{Liquidity, PoolSnapshot, TokenInfo};

/// Fixed-point number for the text report. NaN prints as `nan` so reports
/// diff cleanly against older output; `inf` already matches.
struct Fixed(f64, usize);

impl fmt::Display for Fixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_nan() {
            f.write_str("nan")
        } else {
            write!(f, "{:.*}", self.1, self.0)
        }
    }
}

/// Everything derived from one pool snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolMetrics {
    pub pool_id: String,
    pub liquidity: Liquidity,
    pub tick: i32,
    pub fee_tier: u32,
    pub tick_spacing: i32,
    pub tick_range: TickRange,
    pub token0: TokenInfo,
    pub token1: TokenInfo,

    // Raw (on-chain units)
    pub price: f64,
    pub amounts: LiquidityAmounts,
    pub combined: CombinedValuation,

    // Human readable
    pub adjusted_price: f64,
    pub adjusted_inverse_price: f64,
    pub adjusted_amount0: f64,
    pub adjusted_amount1: f64,
    pub adjusted_combined_amount0: f64,
    pub adjusted_combined_amount1: f64,
    pub total_locked_token0: f64,
    pub total_locked_token1: f64,

    /// Concentration ratio (cR)
    pub concentration_ratio: f64,

    pub computed_at: DateTime<Utc>,
}

impl PoolMetrics {
    pub fn from_snapshot(pool: &PoolSnapshot) -> Self {
        let decimals0 = pool.token0.decimals as i32;
        let decimals1 = pool.token1.decimals as i32;

        let tick_spacing = fee_tier_to_tick_spacing(pool.fee_tier);
        let tick_range = compute_tick_range(pool.tick, tick_spacing);

        let price = tick_to_price(pool.tick as i64);
        let adjusted_price = adjust_for_decimals(price, decimals1 - decimals0);

        let amounts = compute_liquidity_amounts(pool.liquidity.as_f64(), pool.tick, tick_range);
        let combined = compute_combined_valuation(amounts, price);

        let adjusted_combined_amount1 = adjust_for_decimals(combined.combined_amount1, decimals1);
        let concentration_ratio =
            compute_concentration_ratio(adjusted_combined_amount1, pool.total_value_locked_token1);

        debug!(
            "Pool {}: spacing={} range=[{}, {}) price={} amounts={:?}",
            pool.pool_id, tick_spacing, tick_range.bottom_tick, tick_range.top_tick, price, amounts
        );

        Self {
            pool_id: pool.pool_id.clone(),
            liquidity: pool.liquidity.clone(),
            tick: pool.tick,
            fee_tier: pool.fee_tier,
            tick_spacing,
            tick_range,
            token0: pool.token0.clone(),
            token1: pool.token1.clone(),
            price,
            amounts,
            combined,
            adjusted_price,
            adjusted_inverse_price: 1.0 / adjusted_price,
            adjusted_amount0: adjust_for_decimals(amounts.amount0, decimals0),
            adjusted_amount1: adjust_for_decimals(amounts.amount1, decimals1),
            adjusted_combined_amount0: adjust_for_decimals(combined.combined_amount0, decimals0),
            adjusted_combined_amount1,
            total_locked_token0: pool.total_value_locked_token0,
            total_locked_token1: pool.total_value_locked_token1,
            concentration_ratio,
            computed_at: Utc::now(),
        }
    }

    /// Plain-text report. Prices and cR get 6 decimal places, amounts 2.
    pub fn render<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let sym0 = &self.token0.symbol;
        let sym1 = &self.token1.symbol;

        writeln!(out, "L={}", self.liquidity)?;
        writeln!(out, "tick={}", self.tick)?;
        writeln!(out, "token0: {}, {} decimals", sym0, self.token0.decimals)?;
        writeln!(out, "token1: {}, {} decimals", sym1, self.token1.decimals)?;
        writeln!(
            out,
            "Current price: {} {} for 1 {} ({} {} for 1 {})",
            Fixed(self.adjusted_price, 6),
            sym1,
            sym0,
            Fixed(self.adjusted_inverse_price, 6),
            sym0,
            sym1
        )?;
        writeln!(
            out,
            "Liquidity at the current tick range: {} {} and {} {}",
            Fixed(self.adjusted_amount0, 2),
            sym0,
            Fixed(self.adjusted_amount1, 2),
            sym1
        )?;
        // Older reports labelled the token0 amount with token1's symbol
        writeln!(
            out,
            "Combined, liquidity at the current tick range is: {} {} (or {} {})",
            Fixed(self.adjusted_combined_amount1, 2),
            sym1,
            Fixed(self.adjusted_combined_amount0, 2),
            sym0
        )?;
        writeln!(
            out,
            "Total liquidity locked: {} {} (or {} {})",
            Fixed(self.total_locked_token1, 2),
            sym1,
            Fixed(self.total_locked_token0, 2),
            sym0
        )?;
        writeln!(out, "Concentration ratio (cR): {}", Fixed(self.concentration_ratio, 6))?;
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
