//! dev-mesh dashboard
//! Always-on status page for the local service mesh, served over a unix
//! socket behind the proxy it reports on.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use dev_mesh_dashboard::admin::registration::RouteRegistration;
use dev_mesh_dashboard::admin::{AdminClient, AdminSource};
use dev_mesh_dashboard::config::{Config, ConfigOverrides};
use dev_mesh_dashboard::handlers;
use dev_mesh_dashboard::server::{bind_unix_socket, remove_socket};
use dev_mesh_dashboard::status::backend::FilesystemProbe;
use dev_mesh_dashboard::status::tls::discover_wildcard_domain;
use dev_mesh_dashboard::status::StatusReconciler;
use dev_mesh_dashboard::utils::errors::DashboardError;

/// dev-mesh dashboard
#[derive(Parser, Debug)]
#[command(name = "dev-mesh-dashboard")]
#[command(about = "Status page for a local Caddy-fronted service mesh", long_about = None)]
struct Args {
    /// Configuration file (TOML); command-line values override it
    #[arg(long, env = "DEV_MESH_CONFIG")]
    config: Option<PathBuf>,

    /// Proxy admin API base URL
    #[arg(long, env = "DEV_MESH_ADMIN_URL")]
    admin_url: Option<String>,

    /// HTTP server block to read routes from
    #[arg(long)]
    server_name: Option<String>,

    /// Route id (and subdomain label) for the dashboard itself
    #[arg(long)]
    route_id: Option<String>,

    /// Unix socket to listen on
    #[arg(long, env = "DEV_MESH_SOCKET")]
    socket_path: Option<PathBuf>,

    /// Per-request timeout for admin API calls, in milliseconds
    #[arg(long)]
    fetch_timeout_ms: Option<u64>,

    /// Metric name of the upstream health gauge
    #[arg(long)]
    health_metric: Option<String>,

    /// Serve without registering a route with the proxy
    #[arg(long)]
    no_register: bool,
}

impl Args {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            admin_url: self.admin_url.clone(),
            server_name: self.server_name.clone(),
            route_id: self.route_id.clone(),
            socket_path: self.socket_path.clone(),
            fetch_timeout_ms: self.fetch_timeout_ms,
            health_metric: self.health_metric.clone(),
            no_register: self.no_register,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = Config::load(args.config.as_deref(), args.overrides())
        .context("Failed to load configuration")?;

    info!("Starting dev-mesh dashboard");
    info!("Admin API: {} (server {})", config.admin_url, config.server_name);

    let admin = Arc::new(
        AdminClient::new(
            config.admin_url.clone(),
            config.server_name.clone(),
            config.fetch_timeout(),
        )
        .context("Failed to create admin API client")?,
    );

    let registration = if config.register {
        let tls = admin
            .tls_config()
            .await
            .context("Failed to read TLS config from admin API")?;
        let domain = discover_wildcard_domain(&tls).ok_or(DashboardError::DomainNotFound)?;
        info!("Domain: {}", domain);
        Some(RouteRegistration {
            route_id: config.route_id.clone(),
            domain,
            socket_path: config.socket_path.clone(),
        })
    } else {
        None
    };

    let reconciler = Arc::new(StatusReconciler::new(
        admin.clone(),
        Arc::new(FilesystemProbe),
        config.health_metric.clone(),
    ));
    let app = handlers::create_router(reconciler);

    let listener = bind_unix_socket(&config.socket_path)
        .with_context(|| format!("Failed to bind {}", config.socket_path.display()))?;
    info!("Listening on {}", config.socket_path.display());

    if let Some(ref registration) = registration {
        if let Err(e) = admin.register_route(registration).await {
            remove_socket(&config.socket_path);
            return Err(e).context("Failed to register dashboard route");
        }
        info!("Dashboard: https://{}", registration.hostname());
    }

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    info!("Shutting down...");
    if registration.is_some() {
        admin.deregister_route(&config.route_id).await;
    }
    remove_socket(&config.socket_path);

    served.context("Dashboard server failed")?;
    info!("Dashboard shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
