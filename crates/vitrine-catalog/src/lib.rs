//! Site, theme and page catalogs for the Vitrine site builder.
//!
//! This crate implements the invariant-owning layer between the HTTP
//! surface and the document store:
//! - [`PageCatalog`]: page lifecycle, per-site path uniqueness, default-page
//!   delete protection, publish toggling
//! - [`ThemeCatalog`]: theme lifecycle, single-default-per-site promotion
//! - [`SiteRegistry`]: site lifecycle, domain uniqueness, read-time joins
//! - [`SiteOrchestrator`]: the only component allowed to touch more than
//!   one catalog in a single logical operation (site bootstrap and cascade
//!   delete)
//!
//! Discipline: each entity type is owned by exactly one catalog, catalogs
//! never call each other, and no operation is internally parallelized.
//! Nothing here assumes a transaction primitive from the store; the
//! orchestrator compensates by hand where a multi-step sequence fails
//! midway.

mod error;
mod orchestrator;
mod pages;
mod sites;
mod themes;

pub use error::CatalogError;
pub use orchestrator::{CascadeReport, SiteOrchestrator};
pub use pages::{NewPage, PageCatalog, PageList, PagePatch};
pub use sites::{NewSite, SitePatch, SiteRegistry, SiteView};
pub use themes::{NewTheme, ThemeCatalog, ThemeStyle};
