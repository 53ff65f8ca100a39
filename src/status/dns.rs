//! Dynamic DNS state

use crate::admin::types::DynamicDnsConfig;
use crate::status::types::DnsState;

impl From<&DynamicDnsConfig> for DnsState {
    fn from(config: &DynamicDnsConfig) -> Self {
        DnsState {
            domains: config.domains.clone(),
            ipv4: config.versions.ipv4,
            ipv6: config.versions.ipv6,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_dns_state_from_config() {
        let config: DynamicDnsConfig = serde_json::from_value(json!({
            "domains": {"b.dev": ["x"], "a.dev": ["api", "web"]},
            "versions": {"ipv4": true}
        }))
        .unwrap();

        let state = DnsState::from(&config);
        assert!(state.ipv4);
        assert!(!state.ipv6);
        assert_eq!(
            serde_json::to_string(&state).unwrap(),
            r#"{"domains":{"a.dev":["api","web"],"b.dev":["x"]},"ipv4":true,"ipv6":false}"#
        );
    }

    #[test]
    fn test_missing_dns_app() {
        let state = DnsState::from(&DynamicDnsConfig::default());
        assert_eq!(state, DnsState::default());
    }
}
