pub mod uniswap_v3_client;

use async_trait::async_trait;

use crate::error::MetricsError;
use crate::pool::PoolSnapshot;

pub use uniswap_v3_client::SubgraphClient;

/// Source of pool snapshots
#[async_trait]
pub trait PoolDataSource: Send + Sync {
    /// Fetch exactly one pool record. Zero matches is [`MetricsError::PoolNotFound`].
    async fn fetch_pool(&self, pool_id: &str) -> Result<PoolSnapshot, MetricsError>;
}
