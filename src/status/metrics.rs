//! Upstream health gauges from the proxy's metrics endpoint

use std::collections::HashMap;
use tracing::trace;

/// Gauge the proxy exports per upstream: 1 healthy, 0 not
pub const DEFAULT_HEALTH_METRIC: &str = "caddy_reverse_proxy_upstreams_healthy";

/// Map each `upstream` label value to its health.
///
/// Only samples of exactly `metric_name` are read. Malformed samples are
/// skipped; later samples for the same upstream replace earlier ones.
pub fn parse_upstream_health(text: &str, metric_name: &str) -> HashMap<String, bool> {
    let mut health = HashMap::new();

    for line in text.lines() {
        let Some(rest) = line
            .strip_prefix(metric_name)
            .and_then(|rest| rest.strip_prefix('{'))
        else {
            continue;
        };

        match parse_sample(rest) {
            Some((upstream, value)) => {
                health.insert(upstream, value == 1.0);
            }
            None => trace!("Skipping malformed health sample: {}", line),
        }
    }

    health
}

/// `rest` starts just after the opening brace
fn parse_sample(rest: &str) -> Option<(String, f64)> {
    let (labels, tail) = parse_labels(rest)?;
    let upstream = labels
        .into_iter()
        .find(|(key, _)| key == "upstream")
        .map(|(_, value)| value)?;
    // value, then an optional timestamp
    let value = tail.split_whitespace().next()?.parse::<f64>().ok()?;
    Some((upstream, value))
}

/// Parse `key="value",...}` and return the pairs plus whatever follows `}`
fn parse_labels(input: &str) -> Option<(Vec<(String, String)>, &str)> {
    let mut labels = Vec::new();
    let mut rest = input;

    loop {
        rest = rest.trim_start();
        if let Some(after) = rest.strip_prefix('}') {
            return Some((labels, after));
        }

        let eq = rest.find('=')?;
        let key = rest[..eq].trim();
        if key.is_empty() {
            return None;
        }

        let quoted = rest[eq + 1..].trim_start().strip_prefix('"')?;
        let mut value = String::new();
        let mut escaped = false;
        let mut end = None;
        for (i, c) in quoted.char_indices() {
            if escaped {
                value.push(if c == 'n' { '\n' } else { c });
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                end = Some(i);
                break;
            } else {
                value.push(c);
            }
        }

        labels.push((key.to_string(), value));
        rest = quoted[end? + 1..].trim_start();
        rest = rest.strip_prefix(',').unwrap_or(rest);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> HashMap<String, bool> {
        parse_upstream_health(text, DEFAULT_HEALTH_METRIC)
    }

    #[test]
    fn test_parse_healthy_and_unhealthy() {
        let text = "\
# HELP caddy_reverse_proxy_upstreams_healthy Health status of reverse proxy upstreams.
# TYPE caddy_reverse_proxy_upstreams_healthy gauge
caddy_reverse_proxy_upstreams_healthy{upstream=\"unix//tmp/caddy-dev/api.sock\"} 1
caddy_reverse_proxy_upstreams_healthy{upstream=\"localhost:8080\"} 0
";
        let health = parse(text);
        assert_eq!(health.len(), 2);
        assert_eq!(health.get("unix//tmp/caddy-dev/api.sock"), Some(&true));
        assert_eq!(health.get("localhost:8080"), Some(&false));
    }

    #[test]
    fn test_ignores_other_metrics() {
        let text = "\
caddy_http_requests_total{server=\"srv0\"} 1
caddy_reverse_proxy_upstreams_healthy_total{upstream=\"a\"} 1
xcaddy_reverse_proxy_upstreams_healthy{upstream=\"b\"} 1
";
        assert!(parse(text).is_empty());
    }

    #[test]
    fn test_last_sample_wins() {
        let text = "\
caddy_reverse_proxy_upstreams_healthy{upstream=\"a\"} 1
caddy_reverse_proxy_upstreams_healthy{upstream=\"a\"} 0
";
        assert_eq!(parse(text).get("a"), Some(&false));
    }

    #[test]
    fn test_malformed_lines_do_not_stop_parsing() {
        let text = "\
caddy_reverse_proxy_upstreams_healthy{host=\"a\"} 1
caddy_reverse_proxy_upstreams_healthy{upstream=\"b\"} up
caddy_reverse_proxy_upstreams_healthy{upstream=\"c
caddy_reverse_proxy_upstreams_healthy{upstream=\"d\"}
caddy_reverse_proxy_upstreams_healthy{upstream=\"e\"} 1
";
        let health = parse(text);
        assert_eq!(health.len(), 1);
        assert_eq!(health.get("e"), Some(&true));
    }

    #[test]
    fn test_extra_labels_and_timestamp() {
        let text = "caddy_reverse_proxy_upstreams_healthy{handler=\"rp\",upstream=\"a\\\"b\",} 1.0 1700000000000\n";
        let health = parse(text);
        assert_eq!(health.get("a\"b"), Some(&true));
    }

    #[test]
    fn test_non_one_values_are_unhealthy() {
        let text = "\
caddy_reverse_proxy_upstreams_healthy{upstream=\"a\"} 0.5
caddy_reverse_proxy_upstreams_healthy{upstream=\"b\"} NaN
caddy_reverse_proxy_upstreams_healthy{upstream=\"c\"} 1e0
";
        let health = parse(text);
        assert_eq!(health.get("a"), Some(&false));
        assert_eq!(health.get("b"), Some(&false));
        assert_eq!(health.get("c"), Some(&true));
    }

    #[test]
    fn test_garbage_input_yields_empty() {
        assert!(parse("").is_empty());
        assert!(parse("\u{0}\u{1}{{}}}\n===\"\"\n caddy").is_empty());
        assert!(parse("caddy_reverse_proxy_upstreams_healthy{").is_empty());
        assert!(parse("caddy_reverse_proxy_upstreams_healthy{=\"x\"} 1").is_empty());
    }

    #[test]
    fn test_custom_metric_name() {
        let text = "mesh_backend_up{upstream=\"a\"} 1\n";
        let health = parse_upstream_health(text, "mesh_backend_up");
        assert_eq!(health.get("a"), Some(&true));
    }
}
