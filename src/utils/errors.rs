//! Error types for the dashboard service

use thiserror::Error;

/// Failure talking to the proxy admin API
#[derive(Error, Debug)]
pub enum AdminError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("admin API returned {status} for {url}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to build admin HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

/// Dashboard startup and lifecycle errors
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("could not discover a wildcard domain from the proxy TLS config")]
    DomainNotFound,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}
