// src/pool.rs
//! Pool snapshot as consumed by the metrics pipeline, and the loosely typed
//! subgraph record it is decoded from.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MetricsError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenInfo {
    pub symbol: String,
    pub decimals: u8,
}

/// Active liquidity `L` as an unbounded decimal integer. The subgraph reports
/// a BigInt; it is only narrowed to `f64` when the math needs it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Liquidity(String);

impl Liquidity {
    pub fn as_f64(&self) -> f64 {
        // Digit strings always parse; values past f64 range become `inf`
        self.0.parse().unwrap_or(f64::INFINITY)
    }

    pub fn digits(&self) -> &str {
        &self.0
    }
}

impl FromStr for Liquidity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(format!("not a non-negative integer: {}", s));
        }
        let digits = s.trim_start_matches('0');
        Ok(Liquidity(if digits.is_empty() { "0".to_string() } else { digits.to_string() }))
    }
}

impl TryFrom<String> for Liquidity {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Liquidity> for String {
    fn from(value: Liquidity) -> Self {
        value.0
    }
}

impl From<u128> for Liquidity {
    fn from(value: u128) -> Self {
        Liquidity(value.to_string())
    }
}

impl fmt::Display for Liquidity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One pool record, immutable for the duration of a calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolSnapshot {
    pub pool_id: String,
    pub tick: i32,
    pub liquidity: Liquidity,
    pub fee_tier: u32,
    pub token0: TokenInfo,
    pub token1: TokenInfo,
    /// Already decimal adjusted
    pub total_value_locked_token0: f64,
    /// Already decimal adjusted
    pub total_value_locked_token1: f64,
}

/// Subgraph scalars arrive either as JSON strings (BigInt/BigDecimal) or as
/// plain numbers depending on the indexer version.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum WireNumber {
    Text(String),
    Number(serde_json::Number),
}

impl WireNumber {
    fn text(&self) -> String {
        match self {
            WireNumber::Text(s) => s.trim().to_string(),
            WireNumber::Number(n) => n.to_string(),
        }
    }

    pub fn parse<T: FromStr>(&self, field: &'static str) -> Result<T, MetricsError> {
        let text = self.text();
        text.parse::<T>()
            .map_err(|_| MetricsError::malformed(field, text))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawToken {
    pub symbol: String,
    pub decimals: WireNumber,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPool {
    /// `null` for pools that were created but never initialized
    pub tick: Option<WireNumber>,
    pub liquidity: WireNumber,
    pub fee_tier: WireNumber,
    pub total_value_locked_token0: WireNumber,
    pub total_value_locked_token1: WireNumber,
    pub token0: RawToken,
    pub token1: RawToken,
}

impl RawPool {
    pub fn into_snapshot(self, pool_id: &str) -> Result<PoolSnapshot, MetricsError> {
        let tick = self
            .tick
            .as_ref()
            .ok_or_else(|| MetricsError::malformed("tick", "null"))?
            .parse::<i32>("tick")?;

        Ok(PoolSnapshot {
            pool_id: pool_id.to_string(),
            tick,
            liquidity: self.liquidity.parse("liquidity")?,
            fee_tier: self.fee_tier.parse("feeTier")?,
            token0: TokenInfo {
                symbol: self.token0.symbol,
                decimals: self.token0.decimals.parse("token0.decimals")?,
            },
            token1: TokenInfo {
                symbol: self.token1.symbol,
                decimals: self.token1.decimals.parse("token1.decimals")?,
            },
            total_value_locked_token0: self
                .total_value_locked_token0
                .parse("totalValueLockedToken0")?,
            total_value_locked_token1: self
                .total_value_locked_token1
                .parse("totalValueLockedToken1")?,
        })
    }
}
