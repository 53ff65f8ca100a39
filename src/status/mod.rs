//! Status aggregation: parse each admin source, then reconcile them

pub mod backend;
pub mod dns;
pub mod metrics;
pub mod policy;
pub mod reconciler;
pub mod routes;
pub mod tls;
pub mod types;
pub mod upstreams;

pub use reconciler::{reconcile, Snapshot, StatusReconciler};
pub use types::{AggregatedStatus, DnsState, ServiceRecord};
