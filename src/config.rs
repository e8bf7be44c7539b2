use serde::Deserialize;
use std::{fs, path::Path};

use crate::error::MetricsError;

/// GIV/WETH 0.3% pool
pub const DEFAULT_POOL_ID: &str = "0xc763b6b3d0f75167db95daa6a0a0d75dd467c4e1";

pub const DEFAULT_SUBGRAPH_URL: &str = "https://api.thegraph.com/subgraphs/name/uniswap/uniswap-v3";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubgraphCfg {
    pub url: Option<String>,
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PoolCfg {
    pub id: Option<String>,
}

/// Optional TOML config file; every section may be omitted
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub subgraph: SubgraphCfg,
    #[serde(default)]
    pub pool: PoolCfg,
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, MetricsError> {
        let path = path.as_ref();
        let s = fs::read_to_string(path)
            .map_err(|e| MetricsError::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        Self::from_toml(&s)
    }

    pub fn from_toml(s: &str) -> Result<Self, MetricsError> {
        toml::from_str(s).map_err(|e| MetricsError::Config(format!("Failed to parse config: {}", e)))
    }
}

/// Settings resolved once at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppCfg {
    pub pool_id: String,
    pub subgraph_url: String,
    pub api_key: Option<String>,
    pub json_output: bool,
}

impl Default for AppCfg {
    fn default() -> Self {
        Self {
            pool_id: DEFAULT_POOL_ID.to_string(),
            subgraph_url: DEFAULT_SUBGRAPH_URL.to_string(),
            api_key: None,
            json_output: false,
        }
    }
}

/// Command-line overrides; `None` keeps the file/default value
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub pool_id: Option<String>,
    pub subgraph_url: Option<String>,
    pub api_key: Option<String>,
    pub json_output: bool,
}

impl AppCfg {
    /// Priority: CLI args > config file > defaults
    pub fn resolve(file: Option<Config>, cli: CliOverrides) -> Self {
        let file = file.unwrap_or_default();
        let defaults = AppCfg::default();

        Self {
            pool_id: cli.pool_id.or(file.pool.id).unwrap_or(defaults.pool_id),
            subgraph_url: cli
                .subgraph_url
                .or(file.subgraph.url)
                .unwrap_or(defaults.subgraph_url),
            api_key: cli.api_key.or(file.subgraph.api_key),
            json_output: cli.json_output,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_file_or_args() {
        let cfg = AppCfg::resolve(None, CliOverrides::default());
        assert_eq!(cfg, AppCfg::default());
        assert_eq!(cfg.pool_id, DEFAULT_POOL_ID);
        assert_eq!(cfg.subgraph_url, DEFAULT_SUBGRAPH_URL);
        assert!(cfg.api_key.is_none());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let file = Config::from_toml(
            r#"
            [subgraph]
            url = "https://gateway.example/subgraph"
            api_key = "secret"

            [pool]
            id = "0xfile"
            "#,
        )
        .unwrap();

        let cfg = AppCfg::resolve(Some(file), CliOverrides::default());
        assert_eq!(cfg.pool_id, "0xfile");
        assert_eq!(cfg.subgraph_url, "https://gateway.example/subgraph");
        assert_eq!(cfg.api_key.as_deref(), Some("secret"));
    }

    #[test]
    fn test_cli_overrides_file() {
        let file = Config::from_toml("[pool]\nid = \"0xfile\"\n").unwrap();
        let cli = CliOverrides {
            pool_id: Some("0xcli".to_string()),
            json_output: true,
            ..Default::default()
        };

        let cfg = AppCfg::resolve(Some(file), cli);
        assert_eq!(cfg.pool_id, "0xcli");
        assert_eq!(cfg.subgraph_url, DEFAULT_SUBGRAPH_URL);
        assert!(cfg.json_output);
    }

    #[test]
    fn test_empty_config_file() {
        let cfg = Config::from_toml("").unwrap();
        assert!(cfg.pool.id.is_none());
        assert!(cfg.subgraph.url.is_none());
    }

    #[test]
    fn test_invalid_config_file() {
        assert!(matches!(Config::from_toml("[pool\nid="), Err(MetricsError::Config(_))));
        assert!(matches!(
            Config::from_file("/nonexistent/pool-metrics.toml"),
            Err(MetricsError::Config(_))
        ));
    }
}
