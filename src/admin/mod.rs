//! Read/write access to the proxy's administrative API

pub mod client;
pub mod registration;
pub mod types;

use async_trait::async_trait;

use crate::utils::errors::AdminError;
use types::{DynamicDnsConfig, RouteDescriptor, TlsConfig, UpstreamRecord};

pub use client::AdminClient;

/// The five read-only sources the status view is built from.
///
/// Every method may fail independently; callers collapse failures to an
/// empty value rather than propagating them.
#[async_trait]
pub trait AdminSource: Send + Sync {
    async fn routes(&self) -> Result<Vec<RouteDescriptor>, AdminError>;

    async fn upstreams(&self) -> Result<Vec<UpstreamRecord>, AdminError>;

    async fn tls_config(&self) -> Result<TlsConfig, AdminError>;

    async fn dynamic_dns(&self) -> Result<DynamicDnsConfig, AdminError>;

    /// Raw exposition-format metrics text
    async fn metrics_text(&self) -> Result<String, AdminError>;
}
