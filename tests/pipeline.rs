use async_trait::async_trait;

use pool_metrics::app::run_with_source;
use pool_metrics::config::AppCfg;
use pool_metrics::subgraph::uniswap_v3_client::decode_pool_response;
use pool_metrics::{MetricsError, PoolDataSource, PoolMetrics, PoolSnapshot};

/// Serves canned subgraph bodies instead of hitting the network
struct CannedSubgraph {
    body: &'static str,
}

#[async_trait]
impl PoolDataSource for CannedSubgraph {
    async fn fetch_pool(&self, pool_id: &str) -> Result<PoolSnapshot, MetricsError> {
        decode_pool_response(self.body, pool_id)
    }
}

const REFERENCE_BODY: &str = r#"{
  "data": {
    "pools": [{
      "tick": "200000",
      "liquidity": "1000000000000",
      "totalValueLockedToken0": "500000",
      "totalValueLockedToken1": "250",
      "feeTier": "3000",
      "token0": { "symbol": "USDC", "decimals": "6" },
      "token1": { "symbol": "WETH", "decimals": "18" }
    }]
  }
}"#;

#[tokio::test]
async fn test_reference_pool_end_to_end() {
    let source = CannedSubgraph { body: REFERENCE_BODY };
    let cfg = AppCfg { pool_id: "0xref".to_string(), ..AppCfg::default() };
    let mut out = Vec::new();

    run_with_source(&source, &cfg, &mut out).await.unwrap();

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("L=1000000000000\n"));
    assert!(text.contains("Current price: 0.000485 WETH for 1 USDC (2063.215669 USDC for 1 WETH)"));
    assert!(text.contains("Total liquidity locked: 250.00 WETH (or 500000.00 USDC)"));
    assert!(text.ends_with("Concentration ratio (cR): 0.000000\n"));
}

#[tokio::test]
async fn test_reference_pool_metrics() {
    let snapshot = CannedSubgraph { body: REFERENCE_BODY }
        .fetch_pool("0xref")
        .await
        .unwrap();
    let metrics = PoolMetrics::from_snapshot(&snapshot);

    assert_eq!(metrics.tick_spacing, 60);
    assert_eq!(metrics.tick_range.bottom_tick, 199980);
    assert_eq!(metrics.tick_range.top_tick, 200040);

    let expected_cr = 2.6395226365276666e-07;
    assert!(((metrics.concentration_ratio - expected_cr) / expected_cr).abs() < 1e-6);
}

#[tokio::test]
async fn test_zero_tvl_still_prints_report() {
    let source = CannedSubgraph {
        body: r#"{"data":{"pools":[{
          "tick": "-123456", "liquidity": "5000000", "feeTier": "3000",
          "totalValueLockedToken0": "0", "totalValueLockedToken1": "0",
          "token0": {"symbol":"A","decimals":"18"}, "token1": {"symbol":"B","decimals":"18"}
        }]}}"#,
    };
    let mut out = Vec::new();

    run_with_source(&source, &AppCfg::default(), &mut out).await.unwrap();

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("tick=-123456\n"));
    assert!(text.contains("Concentration ratio (cR): inf"));
}

#[tokio::test]
async fn test_empty_result_is_fatal_without_output() {
    let source = CannedSubgraph { body: r#"{"data":{"pools":[]}}"# };
    let mut out = Vec::new();

    let err = run_with_source(&source, &AppCfg::default(), &mut out)
        .await
        .unwrap_err();

    assert!(out.is_empty());
    assert!(matches!(
        err.downcast_ref::<MetricsError>(),
        Some(MetricsError::PoolNotFound(_))
    ));
}

#[tokio::test]
async fn test_malformed_field_is_fatal_without_output() {
    let source = CannedSubgraph {
        body: r#"{"data":{"pools":[{
          "tick": "12.5", "liquidity": "1", "feeTier": "3000",
          "totalValueLockedToken0": "1", "totalValueLockedToken1": "1",
          "token0": {"symbol":"A","decimals":"18"}, "token1": {"symbol":"B","decimals":"18"}
        }]}}"#,
    };
    let mut out = Vec::new();

    let err = run_with_source(&source, &AppCfg::default(), &mut out)
        .await
        .unwrap_err();

    assert!(out.is_empty());
    assert!(matches!(
        err.downcast_ref::<MetricsError>(),
        Some(MetricsError::MalformedField { field: "tick", .. })
    ));
}

#[tokio::test]
async fn test_tick_at_i32_max_flows_through_to_output() {
    let source = CannedSubgraph {
        body: r#"{"data":{"pools":[{
          "tick": "2147483647", "liquidity": "1000000", "feeTier": "3000",
          "totalValueLockedToken0": "1", "totalValueLockedToken1": "1",
          "token0": {"symbol":"A","decimals":"18"}, "token1": {"symbol":"B","decimals":"18"}
        }]}}"#,
    };
    let snapshot = source.fetch_pool("0xedge").await.unwrap();
    let metrics = PoolMetrics::from_snapshot(&snapshot);
    assert_eq!(metrics.tick_range.bottom_tick, 2147483640);
    assert_eq!(metrics.tick_range.top_tick, 2147483700);

    let mut out = Vec::new();
    run_with_source(&source, &AppCfg::default(), &mut out).await.unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("tick=2147483647\n"));
    assert!(text.contains("Concentration ratio (cR): "));
}
