use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::MetricsError;
use crate::pool::{PoolSnapshot, RawPool};
use super::PoolDataSource;

pub const POOL_QUERY: &str = r#"query pools($pool_id: ID!) {
  pools (where: {id: $pool_id}) {
    tick
    liquidity
    totalValueLockedToken0
    totalValueLockedToken1
    feeTier
    token0 {
      symbol
      decimals
    }
    token1 {
      symbol
      decimals
    }
  }
}"#;

#[derive(Debug, Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
    variables: PoolVariables<'a>,
}

#[derive(Debug, Serialize)]
struct PoolVariables<'a> {
    pool_id: &'a str,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<PoolsData>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct PoolsData {
    pools: Vec<RawPool>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

/// Uniswap v3 subgraph client (GraphQL over HTTP POST)
pub struct SubgraphClient {
    http_client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl SubgraphClient {
    pub fn new(endpoint: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            http_client: Client::new(),
            endpoint: endpoint.into(),
            api_key,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Pull the first pool out of a subgraph response body
pub fn decode_pool_response(body: &str, pool_id: &str) -> Result<PoolSnapshot, MetricsError> {
    let response: GraphQlResponse = serde_json::from_str(body)?;

    if !response.errors.is_empty() {
        let messages: Vec<String> = response.errors.into_iter().map(|e| e.message).collect();
        return Err(MetricsError::GraphQl(messages.join("; ")));
    }

    let raw = response
        .data
        .and_then(|data| data.pools.into_iter().next())
        .ok_or_else(|| MetricsError::PoolNotFound(pool_id.to_string()))?;

    raw.into_snapshot(pool_id)
}

#[async_trait]
impl PoolDataSource for SubgraphClient {
    async fn fetch_pool(&self, pool_id: &str) -> Result<PoolSnapshot, MetricsError> {
        // Subgraph entity ids are lowercase hex
        let pool_id = pool_id.to_lowercase();

        info!("Fetching pool {} from {}", pool_id, self.endpoint());

        let payload = GraphQlRequest {
            query: POOL_QUERY,
            variables: PoolVariables { pool_id: &pool_id },
        };

        let mut request = self.http_client.post(&self.endpoint).json(&payload);
        if let Some(api_key) = &self.api_key {
            request = request.bearer_auth(api_key);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(MetricsError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        debug!("Subgraph response: {}", body);

        let snapshot = decode_pool_response(&body, &pool_id)?;
        info!(
            "Loaded pool {} ({}/{}, fee tier {})",
            snapshot.pool_id, snapshot.token0.symbol, snapshot.token1.symbol, snapshot.fee_tier
        );
        Ok(snapshot)
    }
}
