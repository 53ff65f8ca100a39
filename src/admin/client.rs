//! Admin API HTTP client

use async_trait::async_trait;
use axum::body::Bytes;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::registration::RouteRegistration;
use super::types::{DynamicDnsConfig, RouteDescriptor, TlsConfig, UpstreamRecord};
use super::AdminSource;
use crate::utils::errors::AdminError;

/// Client for one proxy instance and one of its HTTP server blocks
#[derive(Debug, Clone)]
pub struct AdminClient {
    base_url: String,
    server_name: String,
    client: Client,
}

impl AdminClient {
    /// Create a client; every request carries `timeout`
    pub fn new(
        base_url: impl Into<String>,
        server_name: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, AdminError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(AdminError::Client)?;

        Ok(AdminClient {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            server_name: server_name.into(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn routes_path(&self) -> String {
        format!("/config/apps/http/servers/{}/routes", self.server_name)
    }

    /// GET a path and return the body, failing on anything but 200
    async fn get_bytes(&self, path: &str) -> Result<(String, Bytes), AdminError> {
        let url = self.url(path);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| AdminError::Transport {
                url: url.clone(),
                source,
            })?;

        if response.status() != StatusCode::OK {
            return Err(AdminError::Status {
                url,
                status: response.status(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| AdminError::Transport {
                url: url.clone(),
                source,
            })?;

        Ok((url, body))
    }

    async fn get_json(&self, path: &str) -> Result<(String, Value), AdminError> {
        let (url, body) = self.get_bytes(path).await?;
        let value = serde_json::from_slice(&body).map_err(|source| AdminError::Decode {
            url: url.clone(),
            source,
        })?;
        Ok((url, value))
    }

    /// GET a JSON object, reading `null` as the default value
    async fn get_object<T>(&self, path: &str) -> Result<T, AdminError>
    where
        T: DeserializeOwned + Default,
    {
        let (url, value) = self.get_json(path).await?;
        if value.is_null() {
            return Ok(T::default());
        }
        serde_json::from_value(value).map_err(|source| AdminError::Decode { url, source })
    }

    /// GET a JSON array, keeping the entries that decode
    async fn get_list<T>(&self, path: &str) -> Result<Vec<T>, AdminError>
    where
        T: DeserializeOwned,
    {
        let (url, value) = self.get_json(path).await?;
        decode_entries(&url, value)
    }

    /// Replace any route carrying the same `@id` with a fresh one
    pub async fn register_route(&self, registration: &RouteRegistration) -> Result<(), AdminError> {
        self.deregister_route(&registration.route_id).await;

        let url = self.url(&self.routes_path());
        let response = self
            .client
            .post(&url)
            .json(&registration.to_route())
            .send()
            .await
            .map_err(|source| AdminError::Transport {
                url: url.clone(),
                source,
            })?;

        if !response.status().is_success() {
            return Err(AdminError::Status {
                url,
                status: response.status(),
            });
        }

        info!(
            "Registered route {} for {}",
            registration.route_id,
            registration.hostname()
        );
        Ok(())
    }

    /// Remove the route with this `@id`; failures are only logged
    pub async fn deregister_route(&self, route_id: &str) {
        let url = self.url(&format!("/id/{}", route_id));
        match self.client.delete(&url).send().await {
            Ok(response) if response.status().is_success() => {
                debug!("Removed route {}", route_id);
            }
            Ok(response) => {
                debug!("Route {} not removed: {}", route_id, response.status());
            }
            Err(e) => {
                warn!("Failed to remove route {}: {}", route_id, e);
            }
        }
    }
}

#[async_trait]
impl AdminSource for AdminClient {
    async fn routes(&self) -> Result<Vec<RouteDescriptor>, AdminError> {
        self.get_list(&self.routes_path()).await
    }

    async fn upstreams(&self) -> Result<Vec<UpstreamRecord>, AdminError> {
        self.get_list("/reverse_proxy/upstreams").await
    }

    async fn tls_config(&self) -> Result<TlsConfig, AdminError> {
        self.get_object("/config/apps/tls/").await
    }

    async fn dynamic_dns(&self) -> Result<DynamicDnsConfig, AdminError> {
        self.get_object("/config/apps/dynamic_dns/").await
    }

    async fn metrics_text(&self) -> Result<String, AdminError> {
        let (_, body) = self.get_bytes("/metrics").await?;
        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}

/// Decode a JSON array entry by entry, skipping entries that don't fit `T`
pub(crate) fn decode_entries<T>(url: &str, value: Value) -> Result<Vec<T>, AdminError>
where
    T: DeserializeOwned,
{
    if value.is_null() {
        return Ok(Vec::new());
    }

    let entries: Vec<Value> = serde_json::from_value(value).map_err(|source| AdminError::Decode {
        url: url.to_string(),
        source,
    })?;

    let total = entries.len();
    let decoded: Vec<T> = entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value(entry) {
            Ok(item) => Some(item),
            Err(e) => {
                debug!("Skipping malformed entry {} from {}: {}", index, url, e);
                None
            }
        })
        .collect();

    if decoded.len() < total {
        debug!("Decoded {}/{} entries from {}", decoded.len(), total, url);
    }

    Ok(decoded)
}
