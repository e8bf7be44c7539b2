// src/app.rs
use std::io::Write;

use anyhow::{Context, Result};
use tracing::info;

use crate::config::AppCfg;
use crate::report::PoolMetrics;
use crate::subgraph::{PoolDataSource, SubgraphClient};

pub async fn run(app_cfg: AppCfg) -> Result<()> {
    info!(
        "Starting pool metrics: pool={} subgraph={} api_key={}",
        app_cfg.pool_id,
        app_cfg.subgraph_url,
        app_cfg.api_key.is_some()
    );

    let client = SubgraphClient::new(app_cfg.subgraph_url.clone(), app_cfg.api_key.clone());
    let mut out = std::io::stdout();
    run_with_source(&client, &app_cfg, &mut out).await
}

/// Fetch, compute, then write. Nothing is written unless the whole report
/// was computed.
pub async fn run_with_source<S, W>(source: &S, app_cfg: &AppCfg, out: &mut W) -> Result<()>
where
    S: PoolDataSource + ?Sized,
    W: Write,
{
    let snapshot = source
        .fetch_pool(&app_cfg.pool_id)
        .await
        .with_context(|| format!("fetch pool {}", app_cfg.pool_id))?;

    let metrics = PoolMetrics::from_snapshot(&snapshot);
    info!(
        "Computed metrics for {}: cR={}",
        metrics.pool_id, metrics.concentration_ratio
    );

    if app_cfg.json_output {
        let json = metrics.to_json().context("serialize report")?;
        writeln!(out, "{}", json)?;
    } else {
        metrics.render(out)?;
    }
    out.flush()?;
    Ok(())
}
