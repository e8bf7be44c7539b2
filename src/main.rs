use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use pool_metrics::app;
use pool_metrics::config::{AppCfg, CliOverrides, Config};

#[derive(Parser, Debug)]
#[command(version, about = "Uniswap v3 pool liquidity metrics and concentration ratio")]
struct Args {
    /// Pool address (defaults to the GIV/WETH 0.3% pool)
    pool_id: Option<String>,

    /// Path to config file (optional)
    #[arg(long)]
    config: Option<String>,

    /// Subgraph GraphQL endpoint (overrides config)
    #[arg(long)]
    endpoint: Option<String>,

    /// Subgraph API key, sent as a bearer token (overrides config)
    #[arg(long, env = "SUBGRAPH_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    // Load base configuration from file if provided
    let base_config = match &args.config {
        Some(config_path) => Some(Config::from_file(config_path)?),
        None => None,
    };

    let app_cfg = AppCfg::resolve(
        base_config,
        CliOverrides {
            pool_id: args.pool_id,
            subgraph_url: args.endpoint,
            api_key: args.api_key,
            json_output: args.json,
        },
    );

    app::run(app_cfg).await
}
