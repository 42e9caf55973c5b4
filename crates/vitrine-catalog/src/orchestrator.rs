//! Site orchestrator.
//!
//! The only component permitted to call more than one catalog inside a
//! single logical operation. Implements site bootstrap (site + default
//! theme + default pages) and whole-site cascade deletion.
//!
//! The store offers no transaction primitive, so both operations are
//! plain sequential writes. Bootstrap compensates on partial failure:
//! everything created before the failing step is removed again and the
//! original error is surfaced. Cascade deletion removes dependents
//! before the parent so a dangling site is never observable mid-way.

use std::sync::Arc;

use uuid::Uuid;

use crate::error::CatalogError;
use crate::pages::{NewPage, PageCatalog};
use crate::sites::{NewSite, SitePatch, SiteRegistry, SiteView};
use crate::themes::{NewTheme, ThemeCatalog};

/// Name given to the bootstrap theme.
const DEFAULT_THEME_NAME: &str = "Default";

/// Pages created for every new site: (name, path, kind, is_default).
/// All four start published; only Home is the default page.
const DEFAULT_PAGES: [(&str, &str, &str, bool); 4] = [
    ("Home", "/", "home", true),
    ("Products", "/products", "products", false),
    ("About", "/about", "content", false),
    ("Contact", "/contact", "contact", false),
];

/// Outcome of a cascade deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CascadeReport {
    /// Number of pages removed.
    pub pages_removed: usize,
    /// Number of themes removed.
    pub themes_removed: usize,
}

/// Composes the registry and catalogs for cross-entity operations.
pub struct SiteOrchestrator {
    registry: Arc<SiteRegistry>,
    themes: Arc<ThemeCatalog>,
    pages: Arc<PageCatalog>,
}

impl SiteOrchestrator {
    /// Create an orchestrator over the given registry and catalogs.
    #[must_use]
    pub fn new(
        registry: Arc<SiteRegistry>,
        themes: Arc<ThemeCatalog>,
        pages: Arc<PageCatalog>,
    ) -> Self {
        Self {
            registry,
            themes,
            pages,
        }
    }

    /// Create a site together with its default theme and pages.
    ///
    /// Sequence: create the site (fails fast on validation and duplicate
    /// domain), create the default theme (`is_default` set directly —
    /// safe, no sibling themes exist yet), point the site at the theme,
    /// bulk-create the four default pages, then re-read the site with
    /// everything attached.
    ///
    /// If any step after the site write fails, the orchestrator deletes
    /// whatever it created, including the site, and returns the original
    /// error; cleanup failures are logged and swallowed so they never
    /// mask the root cause.
    ///
    /// # Errors
    ///
    /// Returns whatever the failing step returned: `Validation`,
    /// `DuplicateDomain` or `Store`.
    pub fn create_site_with_defaults(&self, new: NewSite) -> Result<SiteView, CatalogError> {
        let site = self.registry.create(new)?;

        if let Err(err) = self.bootstrap(site.id) {
            tracing::error!(site = %site.id, error = %err, "Site bootstrap failed, compensating");
            self.compensate(site.id);
            return Err(err);
        }

        let view = self.registry.get_by_id(site.id)?;
        tracing::info!(site = %site.id, pages = view.pages.len(), "Site bootstrapped");
        Ok(view)
    }

    /// Delete a site together with all of its pages and themes.
    ///
    /// Dependents go first: pages, then themes (bypassing default-theme
    /// delete protection — the whole site is going away), then the site
    /// itself.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the site does not exist.
    pub fn delete_site_cascade(&self, id: Uuid) -> Result<CascadeReport, CatalogError> {
        // Resolve first so a missing site fails before anything is touched.
        let site = self.registry.get(id)?;

        let pages_removed = self.pages.delete_by_site(site.id)?;
        let themes_removed = self.themes.delete_by_site(site.id)?;
        self.registry.remove(site.id)?;

        tracing::info!(
            site = %id,
            pages_removed,
            themes_removed,
            "Site deleted with cascade"
        );
        Ok(CascadeReport {
            pages_removed,
            themes_removed,
        })
    }

    fn bootstrap(&self, site: Uuid) -> Result<(), CatalogError> {
        let theme = self
            .themes
            .create(NewTheme::new(site, DEFAULT_THEME_NAME).as_default())?;

        let patch = SitePatch {
            theme: Some(theme.id),
            ..SitePatch::default()
        };
        self.registry.update(site, patch)?;

        for (name, path, kind, is_default) in DEFAULT_PAGES {
            let mut new = NewPage::new(site, name, path, kind).published();
            if is_default {
                new = new.as_default();
            }
            self.pages.create(new)?;
        }

        Ok(())
    }

    /// Best-effort removal of everything bootstrap created.
    fn compensate(&self, site: Uuid) {
        if let Err(err) = self.pages.delete_by_site(site) {
            tracing::error!(site = %site, error = %err, "Compensation failed removing pages");
        }
        if let Err(err) = self.themes.delete_by_site(site) {
            tracing::error!(site = %site, error = %err, "Compensation failed removing themes");
        }
        if let Err(err) = self.registry.remove(site) {
            tracing::error!(site = %site, error = %err, "Compensation failed removing site");
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use vitrine_model::SiteStatus;
    use vitrine_store::{MemoryStore, PageStore, SiteStore, ThemeStore};

    use super::*;

    struct Fixture {
        orchestrator: SiteOrchestrator,
        registry: Arc<SiteRegistry>,
        themes: Arc<ThemeCatalog>,
        pages: Arc<PageCatalog>,
    }

    fn fixture() -> Fixture {
        let backend = Arc::new(MemoryStore::new());
        let registry = Arc::new(SiteRegistry::new(
            Arc::clone(&backend) as Arc<dyn SiteStore>,
            Arc::clone(&backend) as Arc<dyn ThemeStore>,
            Arc::clone(&backend) as Arc<dyn PageStore>,
        ));
        let themes = Arc::new(ThemeCatalog::new(
            Arc::clone(&backend) as Arc<dyn ThemeStore>,
        ));
        let pages = Arc::new(PageCatalog::new(Arc::clone(&backend) as Arc<dyn PageStore>));
        let orchestrator = SiteOrchestrator::new(
            Arc::clone(&registry),
            Arc::clone(&themes),
            Arc::clone(&pages),
        );
        Fixture {
            orchestrator,
            registry,
            themes,
            pages,
        }
    }

    fn acme() -> NewSite {
        NewSite::new(Uuid::new_v4(), "Acme", "acme.test")
    }

    #[test]
    fn test_create_site_with_defaults() {
        let f = fixture();

        let view = f.orchestrator.create_site_with_defaults(acme()).unwrap();

        assert_eq!(view.site.status, SiteStatus::Draft);

        let theme = view.theme_detail.expect("bootstrap theme attached");
        assert!(theme.is_default);
        assert_eq!(theme.site, view.site.id);
        assert_eq!(theme.primary_color, "#3b82f6");

        assert_eq!(view.pages.len(), 4);
        let mut paths: Vec<&str> = view.pages.iter().map(|p| p.path.as_str()).collect();
        paths.sort_unstable();
        assert_eq!(paths, ["/", "/about", "/contact", "/products"]);

        let home = view.pages.iter().find(|p| p.path == "/").unwrap();
        assert!(home.is_default);
        assert!(home.is_published);
        assert!(view
            .pages
            .iter()
            .filter(|p| p.path != "/")
            .all(|p| p.is_published && !p.is_default));
    }

    #[test]
    fn test_create_second_site_same_domain_fails() {
        let f = fixture();
        let first = f.orchestrator.create_site_with_defaults(acme()).unwrap();

        let err = f.orchestrator.create_site_with_defaults(acme()).unwrap_err();

        assert!(matches!(err, CatalogError::DuplicateDomain(_)));
        // First site is unaffected.
        let view = f.registry.get_by_id(first.site.id).unwrap();
        assert_eq!(view.pages.len(), 4);
    }

    #[test]
    fn test_bootstrap_failure_compensates() {
        let f = fixture();
        let owner = Uuid::new_v4();

        // Plant a page that collides with the bootstrap Home page. The
        // site and theme writes succeed, page creation then fails.
        let site = f
            .registry
            .create(NewSite::new(owner, "Doomed", "doomed.test"))
            .unwrap();
        f.pages
            .create(NewPage::new(site.id, "Squatter", "/", "home"))
            .unwrap();

        // Bootstrap the same site id is impossible through the public
        // API, so exercise the inner sequence directly.
        let err = f.orchestrator.bootstrap(site.id).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicatePath { .. }));

        f.orchestrator.compensate(site.id);

        assert!(matches!(
            f.registry.get(site.id),
            Err(CatalogError::NotFound { .. })
        ));
        assert!(f.themes.list_by_site(site.id).unwrap().is_empty());
        assert_eq!(f.pages.list_by_site(site.id).unwrap().total, 0);
    }

    #[test]
    fn test_delete_site_cascade() {
        let f = fixture();
        let view = f.orchestrator.create_site_with_defaults(acme()).unwrap();
        let site = view.site.id;
        // An extra non-default theme joins the cascade too.
        f.themes.create(NewTheme::new(site, "Season")).unwrap();

        let report = f.orchestrator.delete_site_cascade(site).unwrap();

        assert_eq!(
            report,
            CascadeReport {
                pages_removed: 4,
                themes_removed: 2,
            }
        );
        assert!(matches!(
            f.registry.get_by_id(site),
            Err(CatalogError::NotFound { .. })
        ));
        assert!(f.themes.list_by_site(site).unwrap().is_empty());
        assert_eq!(f.pages.list_by_site(site).unwrap().total, 0);
    }

    #[test]
    fn test_delete_site_cascade_bypasses_default_theme_protection() {
        let f = fixture();
        let view = f.orchestrator.create_site_with_defaults(acme()).unwrap();
        let theme = view.theme_detail.unwrap();

        // Direct deletion of the default theme is refused...
        assert!(matches!(
            f.themes.delete(theme.id),
            Err(CatalogError::DefaultThemeProtected)
        ));

        // ...but the cascade removes it along with the site.
        f.orchestrator.delete_site_cascade(view.site.id).unwrap();
        assert!(matches!(
            f.themes.get(theme.id),
            Err(CatalogError::NotFound { .. })
        ));
    }

    #[test]
    fn test_delete_missing_site() {
        let f = fixture();

        let err = f.orchestrator.delete_site_cascade(Uuid::new_v4()).unwrap_err();

        assert!(matches!(err, CatalogError::NotFound { .. }));
    }

    #[test]
    fn test_cascade_leaves_other_sites_alone() {
        let f = fixture();
        let doomed = f.orchestrator.create_site_with_defaults(acme()).unwrap();
        let survivor = f
            .orchestrator
            .create_site_with_defaults(NewSite::new(Uuid::new_v4(), "Other", "other.test"))
            .unwrap();

        f.orchestrator.delete_site_cascade(doomed.site.id).unwrap();

        let view = f.registry.get_by_id(survivor.site.id).unwrap();
        assert_eq!(view.pages.len(), 4);
        assert!(view.theme_detail.is_some());
    }
}
