//! Entity model for the Vitrine site builder.
//!
//! This crate provides:
//! - [`Site`]: tenant storefront with navigation, settings and status
//! - [`Theme`]: per-site visual style tokens, one default per site
//! - [`Page`]: path-addressed document holding a component tree
//! - [`Component`]: recursive visual component instance
//!
//! Entities are plain serde-serializable documents with no knowledge of
//! persistence. Invariants that span more than one document (path
//! uniqueness, single default theme) are enforced by the catalogs, not
//! here; this crate only validates what a single document can know about
//! itself.

mod component;
mod page;
mod site;
mod theme;

pub use component::{Component, InvalidComponent, Layout, Placement};
pub use page::{Page, Seo};
pub use site::{
    Currency, CurrencyPosition, FooterLink, FooterSection, MenuItem, MenuLink, Navigation,
    NewsletterSettings, Site, SiteSettings, SiteStatus, SocialLinks,
};
pub use theme::{ButtonStyle, Theme, ThemeFont};
