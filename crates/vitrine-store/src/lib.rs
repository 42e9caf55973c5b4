//! Document store abstraction for the Vitrine site builder.
//!
//! This crate provides:
//! - Per-entity store traits ([`SiteStore`], [`ThemeStore`], [`PageStore`])
//! - [`StoreError`] for unified error handling across backends
//! - [`MemoryStore`]: the bundled in-memory backend, also the test double
//!
//! Each entity type is owned by exactly one catalog; the traits here are
//! deliberately narrow so a backend only has to support exact-match
//! filtering on the fields the catalogs actually query (`site`, `domain`,
//! `path`).

mod memory;
mod store;

pub use memory::MemoryStore;
pub use store::{PageStore, SiteStore, StoreError, StoreErrorKind, Stores, ThemeStore};
