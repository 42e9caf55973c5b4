//! In-memory store backend.
//!
//! Provides [`MemoryStore`], the bundled backend for development servers
//! and the test double for catalog tests. Documents live in `RwLock`'d
//! maps; every read hands out a clone, so callers never observe a
//! half-applied mutation.

use std::collections::HashMap;
use std::sync::RwLock;

use uuid::Uuid;

use vitrine_model::{Page, Site, Theme};

use crate::store::{PageStore, SiteStore, StoreError, ThemeStore};

const BACKEND: &str = "Memory";

/// In-memory document store.
///
/// Use the builder methods to preload test data.
///
/// # Example
///
/// ```
/// use uuid::Uuid;
/// use vitrine_model::Site;
/// use vitrine_store::{MemoryStore, SiteStore};
///
/// let site = Site::new(Uuid::new_v4(), "Acme");
/// let store = MemoryStore::new().with_site(site.clone());
///
/// assert!(SiteStore::get(&store, site.id).unwrap().is_some());
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    sites: RwLock<HashMap<Uuid, Site>>,
    themes: RwLock<HashMap<Uuid, Theme>>,
    pages: RwLock<HashMap<Uuid, Page>>,
}

impl MemoryStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Preload a site document.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_site(self, site: Site) -> Self {
        self.sites.write().unwrap().insert(site.id, site);
        self
    }

    /// Preload a theme document.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_theme(self, theme: Theme) -> Self {
        self.themes.write().unwrap().insert(theme.id, theme);
        self
    }

    /// Preload a page document.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_page(self, page: Page) -> Self {
        self.pages.write().unwrap().insert(page.id, page);
        self
    }
}

impl SiteStore for MemoryStore {
    fn insert(&self, site: &Site) -> Result<(), StoreError> {
        let mut sites = self.sites.write().unwrap();
        if sites.contains_key(&site.id) {
            return Err(StoreError::conflict("site", site.id).with_backend(BACKEND));
        }
        sites.insert(site.id, site.clone());
        Ok(())
    }

    fn get(&self, id: Uuid) -> Result<Option<Site>, StoreError> {
        Ok(self.sites.read().unwrap().get(&id).cloned())
    }

    fn find_by_domain(&self, domain: &str) -> Result<Option<Site>, StoreError> {
        Ok(self
            .sites
            .read()
            .unwrap()
            .values()
            .find(|s| s.domain.as_deref() == Some(domain))
            .cloned())
    }

    fn list_by_owner(&self, owner: Uuid) -> Result<Vec<Site>, StoreError> {
        let mut sites: Vec<Site> = self
            .sites
            .read()
            .unwrap()
            .values()
            .filter(|s| s.owner == owner)
            .cloned()
            .collect();
        sites.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        Ok(sites)
    }

    fn update(&self, site: &Site) -> Result<(), StoreError> {
        let mut sites = self.sites.write().unwrap();
        if !sites.contains_key(&site.id) {
            return Err(StoreError::not_found("site", site.id).with_backend(BACKEND));
        }
        sites.insert(site.id, site.clone());
        Ok(())
    }

    fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        Ok(self.sites.write().unwrap().remove(&id).is_some())
    }
}

impl ThemeStore for MemoryStore {
    fn insert(&self, theme: &Theme) -> Result<(), StoreError> {
        let mut themes = self.themes.write().unwrap();
        if themes.contains_key(&theme.id) {
            return Err(StoreError::conflict("theme", theme.id).with_backend(BACKEND));
        }
        themes.insert(theme.id, theme.clone());
        Ok(())
    }

    fn get(&self, id: Uuid) -> Result<Option<Theme>, StoreError> {
        Ok(self.themes.read().unwrap().get(&id).cloned())
    }

    fn list_by_site(&self, site: Uuid) -> Result<Vec<Theme>, StoreError> {
        let mut themes: Vec<Theme> = self
            .themes
            .read()
            .unwrap()
            .values()
            .filter(|t| t.site == site)
            .cloned()
            .collect();
        themes.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        Ok(themes)
    }

    fn update(&self, theme: &Theme) -> Result<(), StoreError> {
        let mut themes = self.themes.write().unwrap();
        if !themes.contains_key(&theme.id) {
            return Err(StoreError::not_found("theme", theme.id).with_backend(BACKEND));
        }
        themes.insert(theme.id, theme.clone());
        Ok(())
    }

    fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        Ok(self.themes.write().unwrap().remove(&id).is_some())
    }

    fn delete_by_site(&self, site: Uuid) -> Result<usize, StoreError> {
        let mut themes = self.themes.write().unwrap();
        let before = themes.len();
        themes.retain(|_, t| t.site != site);
        let removed = before - themes.len();
        tracing::debug!(site = %site, removed, "Deleted themes by site");
        Ok(removed)
    }
}

impl PageStore for MemoryStore {
    fn insert(&self, page: &Page) -> Result<(), StoreError> {
        let mut pages = self.pages.write().unwrap();
        if pages.contains_key(&page.id) {
            return Err(StoreError::conflict("page", page.id).with_backend(BACKEND));
        }
        pages.insert(page.id, page.clone());
        Ok(())
    }

    fn get(&self, id: Uuid) -> Result<Option<Page>, StoreError> {
        Ok(self.pages.read().unwrap().get(&id).cloned())
    }

    fn find_by_path(&self, site: Uuid, path: &str) -> Result<Option<Page>, StoreError> {
        Ok(self
            .pages
            .read()
            .unwrap()
            .values()
            .find(|p| p.site == site && p.path == path)
            .cloned())
    }

    fn list_by_site(&self, site: Uuid) -> Result<Vec<Page>, StoreError> {
        let mut pages: Vec<Page> = self
            .pages
            .read()
            .unwrap()
            .values()
            .filter(|p| p.site == site)
            .cloned()
            .collect();
        pages.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        Ok(pages)
    }

    fn update(&self, page: &Page) -> Result<(), StoreError> {
        let mut pages = self.pages.write().unwrap();
        if !pages.contains_key(&page.id) {
            return Err(StoreError::not_found("page", page.id).with_backend(BACKEND));
        }
        pages.insert(page.id, page.clone());
        Ok(())
    }

    fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        Ok(self.pages.write().unwrap().remove(&id).is_some())
    }

    fn delete_by_site(&self, site: Uuid) -> Result<usize, StoreError> {
        let mut pages = self.pages.write().unwrap();
        let before = pages.len();
        pages.retain(|_, p| p.site != site);
        let removed = before - pages.len();
        tracing::debug!(site = %site, removed, "Deleted pages by site");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use pretty_assertions::assert_eq;

    use crate::store::StoreErrorKind;

    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_memory_store_is_send_sync() {
        assert_send_sync::<MemoryStore>();
    }

    #[test]
    fn test_site_insert_get() {
        let store = MemoryStore::new();
        let site = Site::new(Uuid::new_v4(), "Acme");

        SiteStore::insert(&store, &site).unwrap();

        let loaded = SiteStore::get(&store, site.id).unwrap().unwrap();
        assert_eq!(loaded, site);
    }

    #[test]
    fn test_site_insert_conflict() {
        let site = Site::new(Uuid::new_v4(), "Acme");
        let store = MemoryStore::new().with_site(site.clone());

        let err = SiteStore::insert(&store, &site).unwrap_err();

        assert_eq!(err.kind(), StoreErrorKind::Conflict);
        assert_eq!(err.entity(), Some("site"));
    }

    #[test]
    fn test_site_get_missing_is_none() {
        let store = MemoryStore::new();

        assert!(SiteStore::get(&store, Uuid::new_v4()).unwrap().is_none());
    }

    #[test]
    fn test_site_find_by_domain() {
        let mut site = Site::new(Uuid::new_v4(), "Acme");
        site.domain = Some("acme.test".to_owned());
        let store = MemoryStore::new().with_site(site.clone());

        let found = store.find_by_domain("acme.test").unwrap().unwrap();
        assert_eq!(found.id, site.id);
        assert!(store.find_by_domain("other.test").unwrap().is_none());
    }

    #[test]
    fn test_site_update_missing_is_not_found() {
        let store = MemoryStore::new();
        let site = Site::new(Uuid::new_v4(), "Acme");

        let err = SiteStore::update(&store, &site).unwrap_err();

        assert_eq!(err.kind(), StoreErrorKind::NotFound);
    }

    #[test]
    fn test_site_delete_reports_presence() {
        let site = Site::new(Uuid::new_v4(), "Acme");
        let store = MemoryStore::new().with_site(site.clone());

        assert!(SiteStore::delete(&store, site.id).unwrap());
        assert!(!SiteStore::delete(&store, site.id).unwrap());
    }

    #[test]
    fn test_list_by_owner_filters_and_sorts_newest_first() {
        let owner = Uuid::new_v4();
        let mut older = Site::new(owner, "Older");
        older.created_at = Utc::now() - Duration::hours(1);
        let newer = Site::new(owner, "Newer");
        let other = Site::new(Uuid::new_v4(), "Other");

        let store = MemoryStore::new()
            .with_site(older.clone())
            .with_site(newer.clone())
            .with_site(other);

        let sites = store.list_by_owner(owner).unwrap();

        assert_eq!(sites.len(), 2);
        assert_eq!(sites[0].id, newer.id);
        assert_eq!(sites[1].id, older.id);
    }

    #[test]
    fn test_page_find_by_path_scoped_to_site() {
        let site_a = Uuid::new_v4();
        let site_b = Uuid::new_v4();
        let page_a = Page::new(site_a, "Home", "/", "home");
        let page_b = Page::new(site_b, "Home", "/", "home");
        let store = MemoryStore::new()
            .with_page(page_a.clone())
            .with_page(page_b.clone());

        let found = store.find_by_path(site_a, "/").unwrap().unwrap();

        assert_eq!(found.id, page_a.id);
        assert!(store.find_by_path(site_a, "/missing").unwrap().is_none());
    }

    #[test]
    fn test_page_list_by_site_newest_first() {
        let site = Uuid::new_v4();
        let mut first = Page::new(site, "Home", "/", "home");
        first.created_at = Utc::now() - Duration::minutes(5);
        let second = Page::new(site, "About", "/about", "content");
        let store = MemoryStore::new()
            .with_page(first.clone())
            .with_page(second.clone());

        let pages = PageStore::list_by_site(&store, site).unwrap();

        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].id, second.id);
        assert_eq!(pages[1].id, first.id);
    }

    #[test]
    fn test_page_delete_by_site_leaves_other_sites() {
        let site_a = Uuid::new_v4();
        let site_b = Uuid::new_v4();
        let store = MemoryStore::new()
            .with_page(Page::new(site_a, "Home", "/", "home"))
            .with_page(Page::new(site_a, "About", "/about", "content"))
            .with_page(Page::new(site_b, "Home", "/", "home"));

        let removed = PageStore::delete_by_site(&store, site_a).unwrap();

        assert_eq!(removed, 2);
        assert!(PageStore::list_by_site(&store, site_a).unwrap().is_empty());
        assert_eq!(PageStore::list_by_site(&store, site_b).unwrap().len(), 1);
    }

    #[test]
    fn test_theme_lifecycle() {
        let site = Uuid::new_v4();
        let mut theme = Theme::new(site, "Default");
        let store = MemoryStore::new().with_theme(theme.clone());

        theme.primary_color = "#000000".to_owned();
        ThemeStore::update(&store, &theme).unwrap();

        let loaded = ThemeStore::get(&store, theme.id).unwrap().unwrap();
        assert_eq!(loaded.primary_color, "#000000");

        assert_eq!(ThemeStore::delete_by_site(&store, site).unwrap(), 1);
        assert!(ThemeStore::get(&store, theme.id).unwrap().is_none());
    }
}
