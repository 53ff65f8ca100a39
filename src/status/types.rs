//! The aggregated status view served to the dashboard front-end

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One route's merged status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRecord {
    pub id: String,
    pub hosts: Vec<String>,
    /// Filesystem form of the backend address
    pub socket: String,
    #[serde(rename = "socket_exists")]
    pub backend_reachable: bool,
    pub healthy: bool,
    #[serde(rename = "requests")]
    pub request_count: u64,
    #[serde(rename = "fails")]
    pub failure_count: u64,
}

/// Dynamic DNS state as the front-end expects it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsState {
    pub domains: BTreeMap<String, Vec<String>>,
    pub ipv4: bool,
    pub ipv6: bool,
}

/// Top-level payload of `/api/status`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedStatus {
    pub services: Vec<ServiceRecord>,
    pub tls_domains: Vec<String>,
    pub dns: DnsState,
}

impl AggregatedStatus {
    pub fn healthy_count(&self) -> usize {
        self.services.iter().filter(|s| s.healthy).count()
    }
}
