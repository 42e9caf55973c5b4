//! HTTP server for the Vitrine site builder.
//!
//! This crate provides a native Rust HTTP server using axum, serving the
//! JSON API for sites, themes and pages. Route handlers are thin glue:
//! every invariant lives in the catalogs, every multi-entity operation in
//! the orchestrator.
//!
//! # Quick Start
//!
//! ```ignore
//! use vitrine_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig {
//!         host: "127.0.0.1".to_string(),
//!         port: 7878,
//!         bootstrap: None,
//!     };
//!
//!     run_server(config).await.unwrap();
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! Client ──HTTP──► axum router (vitrine-server)
//!                      │
//!                      ├─► site handlers ──► SiteRegistry / SiteOrchestrator
//!                      ├─► page handlers ──► PageCatalog
//!                      └─► theme handlers ─► ThemeCatalog
//!                                               │
//!                                               └─► document store (vitrine-store)
//! ```

mod app;
mod auth;
mod error;
mod handlers;
mod notify;
mod state;

use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;

use uuid::Uuid;

use vitrine_catalog::{NewSite, PageCatalog, SiteOrchestrator, SiteRegistry, ThemeCatalog};
use vitrine_store::Stores;

pub use auth::{BearerPrincipalSupplier, Principal, PrincipalSupplier};
pub use notify::{LogNotifier, Notification, Notifier, NotifyError};

use state::AppState;

/// Seed site created on startup when the store is empty.
#[derive(Clone, Debug)]
pub struct BootstrapSite {
    /// Owner id; a fresh id is generated when absent.
    pub owner: Option<Uuid>,
    /// Site name.
    pub name: String,
    /// Site domain.
    pub domain: String,
}

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Seed site created on startup (`None` starts empty).
    pub bootstrap: Option<BootstrapSite>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 7878,
            bootstrap: None,
        }
    }
}

/// Run the server.
///
/// Wires the in-memory store into the catalogs, optionally seeds a
/// bootstrap site, then serves until Ctrl-C.
///
/// # Errors
///
/// Returns an error if seeding or binding fails.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let state = Arc::new(build_state(&config)?);

    let app = app::create_router(state);

    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    tracing::info!(address = %addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Build the shared application state from a config.
fn build_state(config: &ServerConfig) -> Result<AppState, Box<dyn std::error::Error>> {
    let stores = Stores::in_memory();

    let registry = Arc::new(SiteRegistry::new(
        Arc::clone(&stores.sites),
        Arc::clone(&stores.themes),
        Arc::clone(&stores.pages),
    ));
    let themes = Arc::new(ThemeCatalog::new(Arc::clone(&stores.themes)));
    let pages = Arc::new(PageCatalog::new(Arc::clone(&stores.pages)));
    let orchestrator = SiteOrchestrator::new(
        Arc::clone(&registry),
        Arc::clone(&themes),
        Arc::clone(&pages),
    );

    if let Some(seed) = &config.bootstrap {
        let owner = seed.owner.unwrap_or_else(Uuid::new_v4);
        let view = orchestrator
            .create_site_with_defaults(NewSite::new(owner, seed.name.clone(), seed.domain.clone()))?;
        tracing::info!(site = %view.site.id, domain = %seed.domain, "Seed site created");
    }

    Ok(AppState {
        registry,
        themes,
        pages,
        orchestrator,
        principals: Arc::new(BearerPrincipalSupplier),
        notifier: Arc::new(LogNotifier),
    })
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from the Vitrine config.
#[must_use]
pub fn server_config_from_config(config: &vitrine_config::Config) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        bootstrap: config.bootstrap.as_ref().map(|b| BootstrapSite {
            owner: b.owner,
            name: b.name.clone(),
            domain: b.domain.clone(),
        }),
    }
}
