//! Error handling for pool metrics

use thiserror::Error;

/// Errors raised while fetching or decoding a pool snapshot
#[derive(Error, Debug)]
pub enum MetricsError {
    #[error("Subgraph request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Subgraph returned status {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Subgraph query error: {0}")]
    GraphQl(String),

    #[error("Pool not found: {0}")]
    PoolNotFound(String),

    #[error("Malformed field `{field}`: {value}")]
    MalformedField { field: &'static str, value: String },

    #[error("Failed to decode subgraph response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl MetricsError {
    pub fn malformed(field: &'static str, value: impl Into<String>) -> Self {
        MetricsError::MalformedField {
            field,
            value: value.into(),
        }
    }
}
