//! Route table flattening

use crate::admin::types::RouteDescriptor;

/// Placeholder id for routes declared without `@id`
pub const UNKNOWN_ROUTE_ID: &str = "unknown";

/// A route reduced to what the status view needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedRoute {
    pub id: String,
    pub hosts: Vec<String>,
    /// Last dial target across all handlers, empty if none
    pub backend: String,
}

impl From<&RouteDescriptor> for ExtractedRoute {
    fn from(route: &RouteDescriptor) -> Self {
        let hosts = route
            .matchers
            .iter()
            .flat_map(|m| m.host.iter().cloned())
            .collect();

        // Later handlers override earlier ones, as the proxy applies them
        let backend = route
            .handlers
            .iter()
            .flat_map(|h| h.upstreams.iter())
            .filter_map(|u| u.dial.as_deref())
            .last()
            .unwrap_or_default()
            .to_string();

        ExtractedRoute {
            id: route
                .id
                .clone()
                .unwrap_or_else(|| UNKNOWN_ROUTE_ID.to_string()),
            hosts,
            backend,
        }
    }
}

/// Flatten routes in declaration order
pub fn extract_routes(routes: &[RouteDescriptor]) -> Vec<ExtractedRoute> {
    routes.iter().map(ExtractedRoute::from).collect()
}
