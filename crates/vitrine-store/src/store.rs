//! Store traits and error types.
//!
//! Provides the per-entity store traits for abstracting document
//! persistence, along with [`StoreError`] for unified error handling
//! across backends.
//!
//! Missing documents are `Ok(None)` on reads and `false` on deletes;
//! [`StoreErrorKind::NotFound`] is reserved for updates that target a
//! document which no longer exists. Mapping absence to a domain-level
//! failure is the catalogs' job.

use std::sync::Arc;

use uuid::Uuid;

use vitrine_model::{Page, Site, Theme};

/// Semantic error categories for store failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum StoreErrorKind {
    /// Update target does not exist.
    NotFound,
    /// A document with the same id already exists.
    Conflict,
    /// Backend is temporarily unavailable.
    Unavailable,
    /// Other/unknown error category.
    Other,
}

/// Store error with semantic kind and backend-specific source.
#[derive(Debug)]
pub struct StoreError {
    kind: StoreErrorKind,
    entity: Option<&'static str>,
    id: Option<Uuid>,
    backend: Option<&'static str>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl StoreError {
    /// Create a new store error.
    #[must_use]
    pub fn new(kind: StoreErrorKind) -> Self {
        Self {
            kind,
            entity: None,
            id: None,
            backend: None,
            source: None,
        }
    }

    /// Attach the entity type name (e.g. "site").
    #[must_use]
    pub fn with_entity(mut self, entity: &'static str) -> Self {
        self.entity = Some(entity);
        self
    }

    /// Attach the document id.
    #[must_use]
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = Some(id);
        self
    }

    /// Attach the backend identifier (e.g. "Memory").
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Create a not-found error for an entity/id pair.
    #[must_use]
    pub fn not_found(entity: &'static str, id: Uuid) -> Self {
        Self::new(StoreErrorKind::NotFound)
            .with_entity(entity)
            .with_id(id)
    }

    /// Create a conflict error for an entity/id pair.
    #[must_use]
    pub fn conflict(entity: &'static str, id: Uuid) -> Self {
        Self::new(StoreErrorKind::Conflict)
            .with_entity(entity)
            .with_id(id)
    }

    /// Semantic error category.
    #[must_use]
    pub fn kind(&self) -> StoreErrorKind {
        self.kind
    }

    /// Entity type name, if attached.
    #[must_use]
    pub fn entity(&self) -> Option<&'static str> {
        self.entity
    }

    /// Document id, if attached.
    #[must_use]
    pub fn id(&self) -> Option<Uuid> {
        self.id
    }

    /// Backend identifier, if attached.
    #[must_use]
    pub fn backend(&self) -> Option<&'static str> {
        self.backend
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: "[Backend] Kind: entity id"
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }

        let kind_str = match self.kind {
            StoreErrorKind::NotFound => "Not found",
            StoreErrorKind::Conflict => "Conflict",
            StoreErrorKind::Unavailable => "Unavailable",
            StoreErrorKind::Other => "Error",
        };
        write!(f, "{kind_str}")?;

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        if let Some(entity) = self.entity {
            write!(f, " ({entity}")?;
            if let Some(id) = self.id {
                write!(f, " {id}")?;
            }
            write!(f, ")")?;
        }

        Ok(())
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Site document persistence.
pub trait SiteStore: Send + Sync {
    /// Insert a new site document.
    ///
    /// # Errors
    ///
    /// Returns [`StoreErrorKind::Conflict`] if a site with the same id
    /// already exists.
    fn insert(&self, site: &Site) -> Result<(), StoreError>;

    /// Look up a site by id. Missing is `Ok(None)`.
    fn get(&self, id: Uuid) -> Result<Option<Site>, StoreError>;

    /// Exact-match lookup by domain. Missing is `Ok(None)`.
    fn find_by_domain(&self, domain: &str) -> Result<Option<Site>, StoreError>;

    /// All sites belonging to an owner.
    fn list_by_owner(&self, owner: Uuid) -> Result<Vec<Site>, StoreError>;

    /// Replace an existing site document.
    ///
    /// # Errors
    ///
    /// Returns [`StoreErrorKind::NotFound`] if the site does not exist.
    fn update(&self, site: &Site) -> Result<(), StoreError>;

    /// Delete a site document. Returns whether it existed.
    fn delete(&self, id: Uuid) -> Result<bool, StoreError>;
}

/// Theme document persistence.
pub trait ThemeStore: Send + Sync {
    /// Insert a new theme document.
    ///
    /// # Errors
    ///
    /// Returns [`StoreErrorKind::Conflict`] if a theme with the same id
    /// already exists.
    fn insert(&self, theme: &Theme) -> Result<(), StoreError>;

    /// Look up a theme by id. Missing is `Ok(None)`.
    fn get(&self, id: Uuid) -> Result<Option<Theme>, StoreError>;

    /// All themes belonging to a site.
    fn list_by_site(&self, site: Uuid) -> Result<Vec<Theme>, StoreError>;

    /// Replace an existing theme document.
    ///
    /// # Errors
    ///
    /// Returns [`StoreErrorKind::NotFound`] if the theme does not exist.
    fn update(&self, theme: &Theme) -> Result<(), StoreError>;

    /// Delete a theme document. Returns whether it existed.
    fn delete(&self, id: Uuid) -> Result<bool, StoreError>;

    /// Delete every theme belonging to a site. Returns the number removed.
    fn delete_by_site(&self, site: Uuid) -> Result<usize, StoreError>;
}

/// Page document persistence.
pub trait PageStore: Send + Sync {
    /// Insert a new page document.
    ///
    /// # Errors
    ///
    /// Returns [`StoreErrorKind::Conflict`] if a page with the same id
    /// already exists.
    fn insert(&self, page: &Page) -> Result<(), StoreError>;

    /// Look up a page by id. Missing is `Ok(None)`.
    fn get(&self, id: Uuid) -> Result<Option<Page>, StoreError>;

    /// Exact-match lookup by owning site and path. Missing is `Ok(None)`.
    fn find_by_path(&self, site: Uuid, path: &str) -> Result<Option<Page>, StoreError>;

    /// All pages belonging to a site, newest first.
    fn list_by_site(&self, site: Uuid) -> Result<Vec<Page>, StoreError>;

    /// Replace an existing page document.
    ///
    /// # Errors
    ///
    /// Returns [`StoreErrorKind::NotFound`] if the page does not exist.
    fn update(&self, page: &Page) -> Result<(), StoreError>;

    /// Delete a page document. Returns whether it existed.
    fn delete(&self, id: Uuid) -> Result<bool, StoreError>;

    /// Delete every page belonging to a site. Returns the number removed.
    fn delete_by_site(&self, site: Uuid) -> Result<usize, StoreError>;
}

/// Bundle of store handles, one per entity type.
///
/// The catalogs each receive only the handles they own; this bundle
/// exists so process startup can wire a single backend into all of them.
#[derive(Clone)]
pub struct Stores {
    /// Site documents.
    pub sites: Arc<dyn SiteStore>,
    /// Theme documents.
    pub themes: Arc<dyn ThemeStore>,
    /// Page documents.
    pub pages: Arc<dyn PageStore>,
}

impl Stores {
    /// Wire all three handles to a single shared [`MemoryStore`].
    #[must_use]
    pub fn in_memory() -> Self {
        let backend = Arc::new(crate::MemoryStore::new());
        Self {
            sites: Arc::clone(&backend) as Arc<dyn SiteStore>,
            themes: Arc::clone(&backend) as Arc<dyn ThemeStore>,
            pages: backend,
        }
    }
}
