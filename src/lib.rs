//! Pool Metrics - Uniswap v3 pool liquidity concentration
//! Fetches one pool from the subgraph and derives price, active-range amounts and cR

pub mod app;
pub mod config;
pub mod error;
pub mod math;
pub mod pool;
pub mod report;
pub mod subgraph;

// Re-export main types for convenience
pub use config::AppCfg;
pub use error::MetricsError;
pub use pool::{PoolSnapshot, TokenInfo};
pub use report::PoolMetrics;
pub use subgraph::{PoolDataSource, SubgraphClient};
