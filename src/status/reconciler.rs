//! Merge routes, upstream stats, health gauges and config into one view

use std::sync::Arc;
use tracing::{debug, warn};

use crate::admin::types::{DynamicDnsConfig, RouteDescriptor, TlsConfig, UpstreamRecord};
use crate::admin::AdminSource;
use crate::status::backend::{BackendAddress, ReachabilityProbe};
use crate::status::metrics::parse_upstream_health;
use crate::status::policy::resolve_health;
use crate::status::routes::extract_routes;
use crate::status::tls::tls_domains;
use crate::status::types::{AggregatedStatus, DnsState, ServiceRecord};
use crate::status::upstreams::index_upstreams;
use crate::utils::errors::AdminError;

/// Raw inputs of one poll, each already defaulted if its fetch failed
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub routes: Vec<RouteDescriptor>,
    pub upstreams: Vec<UpstreamRecord>,
    pub tls: TlsConfig,
    pub dns: DynamicDnsConfig,
    pub metrics: String,
}

/// Builds the status view from scratch on every call
pub struct StatusReconciler {
    source: Arc<dyn AdminSource>,
    probe: Arc<dyn ReachabilityProbe>,
    health_metric: String,
}

impl StatusReconciler {
    pub fn new(
        source: Arc<dyn AdminSource>,
        probe: Arc<dyn ReachabilityProbe>,
        health_metric: impl Into<String>,
    ) -> Self {
        StatusReconciler {
            source,
            probe,
            health_metric: health_metric.into(),
        }
    }

    /// Fetch all sources concurrently; an unavailable source reads as empty
    pub async fn snapshot(&self) -> Snapshot {
        let (routes, upstreams, tls, dns, metrics) = futures::future::join5(
            self.source.routes(),
            self.source.upstreams(),
            self.source.tls_config(),
            self.source.dynamic_dns(),
            self.source.metrics_text(),
        )
        .await;

        Snapshot {
            routes: or_default("routes", routes),
            upstreams: or_default("upstreams", upstreams),
            tls: or_default("tls config", tls),
            dns: or_default("dynamic dns config", dns),
            metrics: or_default("metrics", metrics),
        }
    }

    /// Never fails; the worst case is an empty status
    pub async fn compute_status(&self) -> AggregatedStatus {
        let snapshot = self.snapshot().await;
        let status = reconcile(&snapshot, self.probe.as_ref(), &self.health_metric);
        debug!(
            "Reconciled {} services ({} healthy)",
            status.services.len(),
            status.healthy_count()
        );
        status
    }
}

fn or_default<T: Default>(source: &str, result: Result<T, AdminError>) -> T {
    result.unwrap_or_else(|e| {
        warn!("Admin source '{}' unavailable: {}", source, e);
        T::default()
    })
}

/// Pure merge step over an already fetched snapshot
pub fn reconcile(
    snapshot: &Snapshot,
    probe: &dyn ReachabilityProbe,
    health_metric: &str,
) -> AggregatedStatus {
    let health = parse_upstream_health(&snapshot.metrics, health_metric);
    let usage = index_upstreams(snapshot.upstreams.clone());

    let services = extract_routes(&snapshot.routes)
        .into_iter()
        .map(|route| {
            let backend = BackendAddress::from_dial(&route.backend);
            let reachable = probe.is_reachable(&backend);
            let verdict = resolve_health(health.get(backend.address()).copied(), reachable);
            let stats = usage.get(backend.address()).copied().unwrap_or_default();

            ServiceRecord {
                id: route.id,
                hosts: route.hosts,
                socket: backend.display_path().to_string(),
                backend_reachable: reachable,
                healthy: verdict.healthy,
                request_count: stats.num_requests,
                failure_count: stats.fails,
            }
        })
        .collect();

    AggregatedStatus {
        services,
        tls_domains: tls_domains(&snapshot.tls),
        dns: DnsState::from(&snapshot.dns),
    }
}
