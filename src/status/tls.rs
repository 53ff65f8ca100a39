//! Certificate subjects from the proxy's TLS app config

use crate::admin::types::TlsConfig;

/// Domains under automatic certificate management.
///
/// The explicit `automate` list wins when non-empty; otherwise every
/// policy's subjects, in policy order.
pub fn tls_domains(config: &TlsConfig) -> Vec<String> {
    if !config.certificates.automate.is_empty() {
        return config.certificates.automate.clone();
    }

    config
        .automation
        .policies
        .iter()
        .flat_map(|policy| policy.subjects.iter().cloned())
        .collect()
}

/// Base domain of the first wildcard subject, e.g. `*.a.dev` gives `a.dev`.
///
/// Candidates are the `automate` list when non-empty, else the first
/// subject of each policy.
pub fn discover_wildcard_domain(config: &TlsConfig) -> Option<String> {
    let candidates: Vec<&str> = if !config.certificates.automate.is_empty() {
        config
            .certificates
            .automate
            .iter()
            .map(String::as_str)
            .collect()
    } else {
        config
            .automation
            .policies
            .iter()
            .filter_map(|policy| policy.subjects.first().map(String::as_str))
            .collect()
    };

    candidates
        .into_iter()
        .find_map(|subject| subject.strip_prefix("*."))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tls(value: serde_json::Value) -> TlsConfig {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_automate_list_preferred() {
        let config = tls(json!({
            "certificates": {"automate": ["*.a.dev", "a.dev"]},
            "automation": {"policies": [{"subjects": ["other.dev"]}]}
        }));
        assert_eq!(tls_domains(&config), vec!["*.a.dev", "a.dev"]);
    }

    #[test]
    fn test_policy_subjects_flattened() {
        let config = tls(json!({
            "certificates": {"automate": []},
            "automation": {"policies": [
                {"subjects": ["*.a.dev", "a.dev"]},
                {"issuers": [{"module": "acme"}]},
                {"subjects": ["b.dev"]}
            ]}
        }));
        assert_eq!(tls_domains(&config), vec!["*.a.dev", "a.dev", "b.dev"]);
    }

    #[test]
    fn test_empty_tls_config() {
        assert!(tls_domains(&TlsConfig::default()).is_empty());
        assert_eq!(discover_wildcard_domain(&TlsConfig::default()), None);
    }

    #[test]
    fn test_discover_from_automate() {
        let config = tls(json!({"certificates": {"automate": ["a.dev", "*.a2780.lpds.dev"]}}));
        assert_eq!(
            discover_wildcard_domain(&config),
            Some("a2780.lpds.dev".to_string())
        );
    }

    #[test]
    fn test_discover_only_first_policy_subject() {
        let config = tls(json!({"automation": {"policies": [
            {"subjects": ["plain.dev", "*.hidden.dev"]},
            {"subjects": ["*.found.dev"]}
        ]}}));
        assert_eq!(discover_wildcard_domain(&config), Some("found.dev".to_string()));
    }
}
