//! Unix socket listener lifecycle

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use tokio::net::UnixListener;
use tracing::{debug, warn};

use crate::utils::errors::DashboardError;

/// Bind `path`, replacing a stale socket file and opening it to all users
/// so the proxy can dial it.
pub fn bind_unix_socket(path: &Path) -> Result<UnixListener, DashboardError> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }

    if path.exists() {
        debug!("Removing stale socket {}", path.display());
        fs::remove_file(path)?;
    }

    let listener = UnixListener::bind(path)?;
    fs::set_permissions(path, fs::Permissions::from_mode(0o777))?;
    Ok(listener)
}

pub fn remove_socket(path: &Path) {
    if !path.exists() {
        return;
    }
    if let Err(e) = fs::remove_file(path) {
        warn!("Failed to remove socket {}: {}", path.display(), e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bind_replaces_stale_file() {
        let dir = std::env::temp_dir().join(format!("dev-mesh-server-{}", std::process::id()));
        let path = dir.join("dashboard.sock");
        fs::create_dir_all(&dir).unwrap();
        fs::write(&path, b"stale").unwrap();

        let listener = bind_unix_socket(&path).unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o777);

        drop(listener);
        remove_socket(&path);
        assert!(!path.exists());
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_remove_missing_socket_is_noop() {
        remove_socket(Path::new("/nonexistent/dev-mesh/none.sock"));
    }
}
