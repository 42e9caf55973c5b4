//! Application state.
//!
//! Shared state for all request handlers. The catalogs are constructed
//! once at startup and passed by reference; there are no ambient
//! singletons.

use std::sync::Arc;

use vitrine_catalog::{PageCatalog, SiteOrchestrator, SiteRegistry, ThemeCatalog};

use crate::auth::PrincipalSupplier;
use crate::notify::Notifier;

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Site entity owner.
    pub(crate) registry: Arc<SiteRegistry>,
    /// Theme entity owner.
    pub(crate) themes: Arc<ThemeCatalog>,
    /// Page entity owner.
    pub(crate) pages: Arc<PageCatalog>,
    /// Cross-entity operations (bootstrap, cascade delete).
    pub(crate) orchestrator: SiteOrchestrator,
    /// Authenticated principal producer.
    pub(crate) principals: Arc<dyn PrincipalSupplier>,
    /// Outbound notification collaborator.
    pub(crate) notifier: Arc<dyn Notifier>,
}
