//! Configuration management for the dashboard service

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::status::metrics::DEFAULT_HEALTH_METRIC;
use crate::utils::errors::DashboardError;

/// Dashboard configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Proxy admin API base URL
    pub admin_url: String,
    /// HTTP server block whose routes are shown
    pub server_name: String,
    /// `@id` of the dashboard's own route, also its subdomain label
    pub route_id: String,
    /// Unix socket the dashboard listens on
    pub socket_path: PathBuf,
    /// Timeout for each admin API request
    pub fetch_timeout_ms: u64,
    /// Health gauge metric name
    pub health_metric: String,
    /// Register the dashboard route with the proxy on startup
    pub register: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            admin_url: "http://localhost:2019".to_string(),
            server_name: "srv0".to_string(),
            route_id: "dev-mesh".to_string(),
            socket_path: PathBuf::from("/tmp/caddy-dev/dev-mesh.sock"),
            fetch_timeout_ms: 2000,
            health_metric: DEFAULT_HEALTH_METRIC.to_string(),
            register: true,
        }
    }
}

/// Values given on the command line; `None` keeps the file/default value
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub admin_url: Option<String>,
    pub server_name: Option<String>,
    pub route_id: Option<String>,
    pub socket_path: Option<PathBuf>,
    pub fetch_timeout_ms: Option<u64>,
    pub health_metric: Option<String>,
    pub no_register: bool,
}

impl Config {
    /// Load from an optional TOML file, then apply overrides and validate
    pub fn load(
        config_file: Option<&Path>,
        overrides: ConfigOverrides,
    ) -> Result<Self, DashboardError> {
        let mut config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => Config::default(),
        };
        config.apply(overrides);
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self, DashboardError> {
        let content = fs::read_to_string(path).map_err(|e| {
            DashboardError::ConfigError(format!("failed to read {}: {}", path.display(), e))
        })?;
        Ok(toml::from_str(&content)?)
    }

    fn apply(&mut self, overrides: ConfigOverrides) {
        if let Some(admin_url) = overrides.admin_url {
            self.admin_url = admin_url;
        }
        if let Some(server_name) = overrides.server_name {
            self.server_name = server_name;
        }
        if let Some(route_id) = overrides.route_id {
            self.route_id = route_id;
        }
        if let Some(socket_path) = overrides.socket_path {
            self.socket_path = socket_path;
        }
        if let Some(timeout) = overrides.fetch_timeout_ms {
            self.fetch_timeout_ms = timeout;
        }
        if let Some(health_metric) = overrides.health_metric {
            self.health_metric = health_metric;
        }
        if overrides.no_register {
            self.register = false;
        }
    }

    pub fn validate(&self) -> Result<(), DashboardError> {
        if self.admin_url.trim().is_empty() {
            return Err(DashboardError::ConfigError("admin_url must not be empty".into()));
        }
        if self.route_id.trim().is_empty() {
            return Err(DashboardError::ConfigError("route_id must not be empty".into()));
        }
        if self.server_name.trim().is_empty() {
            return Err(DashboardError::ConfigError("server_name must not be empty".into()));
        }
        if self.fetch_timeout_ms == 0 {
            return Err(DashboardError::ConfigError(
                "fetch_timeout_ms must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::load(None, ConfigOverrides::default()).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.fetch_timeout(), Duration::from_secs(2));
        assert!(config.register);
    }

    #[test]
    fn test_load_file_with_overrides() {
        let toml = r#"
            admin_url = "http://127.0.0.1:2020"
            route_id = "status"
            fetch_timeout_ms = 1500
        "#;

        let temp_file = std::env::temp_dir().join(format!("dev-mesh-config-{}.toml", std::process::id()));
        std::fs::write(&temp_file, toml).unwrap();

        let config = Config::load(
            Some(&temp_file),
            ConfigOverrides {
                route_id: Some("mesh".to_string()),
                no_register: true,
                ..ConfigOverrides::default()
            },
        )
        .unwrap();

        assert_eq!(config.admin_url, "http://127.0.0.1:2020");
        assert_eq!(config.route_id, "mesh");
        assert_eq!(config.fetch_timeout_ms, 1500);
        assert_eq!(config.server_name, "srv0");
        assert!(!config.register);

        std::fs::remove_file(&temp_file).unwrap();
    }

    #[test]
    fn test_invalid_values_rejected() {
        let result = Config::load(
            None,
            ConfigOverrides {
                fetch_timeout_ms: Some(0),
                ..ConfigOverrides::default()
            },
        );
        assert!(matches!(result, Err(DashboardError::ConfigError(_))));

        let result = Config::load(
            None,
            ConfigOverrides {
                admin_url: Some(" ".to_string()),
                ..ConfigOverrides::default()
            },
        );
        assert!(matches!(result, Err(DashboardError::ConfigError(_))));
    }

    #[test]
    fn test_missing_file() {
        let path = std::env::temp_dir().join("dev-mesh-config-does-not-exist.toml");
        let result = Config::load(Some(&path), ConfigOverrides::default());
        assert!(matches!(result, Err(DashboardError::ConfigError(_))));
    }

    #[test]
    fn test_malformed_file() {
        let temp_file = std::env::temp_dir().join(format!("dev-mesh-bad-{}.toml", std::process::id()));
        std::fs::write(&temp_file, "fetch_timeout_ms = \"soon\"").unwrap();

        let result = Config::load(Some(&temp_file), ConfigOverrides::default());
        assert!(matches!(result, Err(DashboardError::TomlError(_))));

        std::fs::remove_file(&temp_file).unwrap();
    }
}
