//! Wire types for the proxy admin API payloads

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A declared route from the HTTP server block
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RouteDescriptor {
    #[serde(rename = "@id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "match", default, deserialize_with = "null_as_default")]
    pub matchers: Vec<MatcherSet>,
    #[serde(rename = "handle", default, deserialize_with = "null_as_default")]
    pub handlers: Vec<HandlerDescriptor>,
}

/// One entry of a route's `match` list
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatcherSet {
    #[serde(default, deserialize_with = "null_as_default")]
    pub host: Vec<String>,
}

/// One entry of a route's `handle` list
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HandlerDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handler: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub upstreams: Vec<UpstreamTarget>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpstreamTarget {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dial: Option<String>,
}

/// Usage record reported by `/reverse_proxy/upstreams`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamRecord {
    pub address: String,
    #[serde(default)]
    pub num_requests: u64,
    #[serde(default)]
    pub fails: u64,
}

/// The parts of the TLS app config the dashboard reads
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TlsConfig {
    #[serde(default, deserialize_with = "null_as_default")]
    pub certificates: Certificates,
    #[serde(default, deserialize_with = "null_as_default")]
    pub automation: Automation,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Certificates {
    #[serde(default, deserialize_with = "null_as_default")]
    pub automate: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Automation {
    #[serde(default, deserialize_with = "null_as_default")]
    pub policies: Vec<AutomationPolicy>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AutomationPolicy {
    #[serde(default, deserialize_with = "null_as_default")]
    pub subjects: Vec<String>,
}

/// Dynamic DNS app config
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DynamicDnsConfig {
    /// Zone -> managed subdomain labels
    #[serde(default, deserialize_with = "null_as_default")]
    pub domains: BTreeMap<String, Vec<String>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub versions: IpVersions,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct IpVersions {
    #[serde(default, deserialize_with = "null_as_default")]
    pub ipv4: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ipv6: bool,
}

/// Treat an explicit JSON `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
