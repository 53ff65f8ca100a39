//! The dashboard's own route in the proxy config

use std::path::PathBuf;

use super::types::{HandlerDescriptor, MatcherSet, RouteDescriptor, UpstreamTarget};

/// Route that exposes the dashboard as `{route_id}.{domain}`
#[derive(Debug, Clone)]
pub struct RouteRegistration {
    pub route_id: String,
    pub domain: String,
    pub socket_path: PathBuf,
}

impl RouteRegistration {
    pub fn hostname(&self) -> String {
        format!("{}.{}", self.route_id, self.domain)
    }

    /// Dial target for the proxy; `unix/` followed by the absolute path
    pub fn dial(&self) -> String {
        format!("unix/{}", self.socket_path.display())
    }

    pub fn to_route(&self) -> RouteDescriptor {
        RouteDescriptor {
            id: Some(self.route_id.clone()),
            matchers: vec![MatcherSet {
                host: vec![self.hostname()],
            }],
            handlers: vec![HandlerDescriptor {
                handler: Some("reverse_proxy".to_string()),
                upstreams: vec![UpstreamTarget {
                    dial: Some(self.dial()),
                }],
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_route_json_shape() {
        let registration = RouteRegistration {
            route_id: "dev-mesh".to_string(),
            domain: "a2780.lpds.dev".to_string(),
            socket_path: PathBuf::from("/tmp/caddy-dev/dev-mesh.sock"),
        };

        let value = serde_json::to_value(registration.to_route()).unwrap();
        assert_eq!(
            value,
            json!({
                "@id": "dev-mesh",
                "match": [{"host": ["dev-mesh.a2780.lpds.dev"]}],
                "handle": [{
                    "handler": "reverse_proxy",
                    "upstreams": [{"dial": "unix//tmp/caddy-dev/dev-mesh.sock"}]
                }]
            })
        );
    }
}
