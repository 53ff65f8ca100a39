//! Backend address forms and the local reachability probe

use std::path::Path;

const UNIX_DIAL_PREFIX: &str = "unix/";

/// A route's selected backend in both of its forms
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendAddress {
    dial: String,
    socket_path: Option<String>,
}

impl BackendAddress {
    pub fn from_dial(dial: &str) -> Self {
        let socket_path = dial.strip_prefix(UNIX_DIAL_PREFIX).map(|path| {
            if path.starts_with('/') {
                path.to_string()
            } else {
                format!("/{}", path)
            }
        });

        BackendAddress {
            dial: dial.to_string(),
            socket_path,
        }
    }

    /// Key used by the upstream list and the health gauges
    pub fn address(&self) -> &str {
        &self.dial
    }

    /// Unix socket path, if the backend is a unix socket
    pub fn socket_path(&self) -> Option<&str> {
        self.socket_path.as_deref()
    }

    /// What the dashboard shows: the socket path, else the dial text
    pub fn display_path(&self) -> &str {
        self.socket_path.as_deref().unwrap_or(&self.dial)
    }
}

/// Cheap local check used when the proxy has no active health data
pub trait ReachabilityProbe: Send + Sync {
    fn is_reachable(&self, backend: &BackendAddress) -> bool;
}

/// Reachable means the unix socket file exists
#[derive(Debug, Clone, Copy, Default)]
pub struct FilesystemProbe;

impl ReachabilityProbe for FilesystemProbe {
    fn is_reachable(&self, backend: &BackendAddress) -> bool {
        backend
            .socket_path()
            .map(|path| Path::new(path).exists())
            .unwrap_or(false)
    }
}
