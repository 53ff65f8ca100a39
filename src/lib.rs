//! dev-mesh dashboard library
//! Status aggregation over a local reverse-proxy's admin API, plus the
//! HTTP surface that serves it.

pub mod admin;
pub mod config;
pub mod handlers;
pub mod server;
pub mod status;
pub mod utils;

pub use config::Config;
pub use status::{AggregatedStatus, StatusReconciler};
