//! Site registry.
//!
//! Owns the Site entity: creation with the starter navigation and default
//! settings, domain uniqueness, menu/status updates and read-time joins.
//! The registry has write access to the site store only; it reads the
//! theme and page stores to assemble [`SiteView`]s and to check that a
//! patched theme reference actually belongs to the site.

use std::sync::Arc;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use vitrine_model::{MenuItem, Page, Site, SiteSettings, SiteStatus, Theme};
use vitrine_store::{PageStore, SiteStore, ThemeStore};

use crate::error::CatalogError;

/// Accepted domain shape: dot-separated lowercase labels.
static DOMAIN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9]([a-z0-9-]*[a-z0-9])?(\.[a-z0-9]([a-z0-9-]*[a-z0-9])?)+$")
        .expect("domain regex is valid")
});

/// Input for [`SiteRegistry::create`].
#[derive(Debug, Clone)]
pub struct NewSite {
    /// Owning user, supplied by the authenticated principal.
    pub owner: Uuid,
    /// Display name.
    pub name: String,
    /// Custom domain, unique across all sites.
    pub domain: String,
    /// Short description.
    pub description: Option<String>,
    /// Logo image URL.
    pub logo_url: Option<String>,
}

impl NewSite {
    /// Create a minimal input.
    #[must_use]
    pub fn new(owner: Uuid, name: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            owner,
            name: name.into(),
            domain: domain.into(),
            description: None,
            logo_url: None,
        }
    }
}

/// Partial update for [`SiteRegistry::update`].
///
/// Identity fields (`id`, `owner`, timestamps) are deliberately absent,
/// so a patch can never reassign a site.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SitePatch {
    /// New display name.
    pub name: Option<String>,
    /// New domain; re-checked for uniqueness.
    pub domain: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New theme reference; must belong to this site.
    pub theme: Option<Uuid>,
    /// Replacement settings.
    pub settings: Option<SiteSettings>,
}

/// A site with its theme and pages attached (read-time join).
///
/// Page membership is derived from each page's `site` back-reference at
/// query time; the site document holds no page list of its own.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteView {
    /// The site document.
    #[serde(flatten)]
    pub site: Site,
    /// The referenced theme, when set and resolvable.
    pub theme_detail: Option<Theme>,
    /// Pages of this site, newest first.
    pub pages: Vec<Page>,
}

/// Registry owning the Site entity.
pub struct SiteRegistry {
    sites: Arc<dyn SiteStore>,
    themes: Arc<dyn ThemeStore>,
    pages: Arc<dyn PageStore>,
}

impl SiteRegistry {
    /// Create a registry over the given stores.
    ///
    /// The theme and page handles are used for reads only.
    #[must_use]
    pub fn new(
        sites: Arc<dyn SiteStore>,
        themes: Arc<dyn ThemeStore>,
        pages: Arc<dyn PageStore>,
    ) -> Self {
        Self {
            sites,
            themes,
            pages,
        }
    }

    /// Create a draft site with the starter navigation skeleton and
    /// default settings.
    ///
    /// # Errors
    ///
    /// Returns `Validation` if `name` is empty or `domain` is empty or
    /// malformed, and `DuplicateDomain` if another site already uses the
    /// domain.
    pub fn create(&self, new: NewSite) -> Result<Site, CatalogError> {
        if new.name.trim().is_empty() {
            return Err(CatalogError::validation("name must not be empty"));
        }
        validate_domain(&new.domain)?;
        if self.sites.find_by_domain(&new.domain)?.is_some() {
            return Err(CatalogError::DuplicateDomain(new.domain));
        }

        let mut site = Site::new(new.owner, new.name);
        site.domain = Some(new.domain);
        site.description = new.description;
        site.settings.logo_url = new.logo_url;

        self.sites.insert(&site)?;
        tracing::info!(site = %site.id, owner = %site.owner, "Site created");
        Ok(site)
    }

    /// Look up a site by id, without joins.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the site does not exist.
    pub fn get(&self, id: Uuid) -> Result<Site, CatalogError> {
        self.sites
            .get(id)?
            .ok_or_else(|| CatalogError::not_found("site", id))
    }

    /// Look up a site by id with theme and pages attached.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the site does not exist.
    pub fn get_by_id(&self, id: Uuid) -> Result<SiteView, CatalogError> {
        let site = self.get(id)?;
        self.attach(site)
    }

    /// Look up a site by domain with theme and pages attached.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no site uses the domain.
    pub fn get_by_domain(&self, domain: &str) -> Result<SiteView, CatalogError> {
        let site = self
            .sites
            .find_by_domain(domain)?
            .ok_or_else(|| CatalogError::not_found("site", domain))?;
        self.attach(site)
    }

    /// All sites belonging to an owner, without joins.
    ///
    /// # Errors
    ///
    /// Returns `Store` if the listing query fails.
    pub fn list_by_owner(&self, owner: Uuid) -> Result<Vec<Site>, CatalogError> {
        Ok(self.sites.list_by_owner(owner)?)
    }

    /// Apply a partial update.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the site does not exist, `Validation` if a
    /// patched `name`/`domain` is malformed or a patched `theme` belongs
    /// to a different site, and `DuplicateDomain` if the new domain
    /// collides with another site.
    pub fn update(&self, id: Uuid, patch: SitePatch) -> Result<Site, CatalogError> {
        let mut site = self.get(id)?;

        if let Some(domain) = &patch.domain {
            validate_domain(domain)?;
            if site.domain.as_deref() != Some(domain)
                && let Some(other) = self.sites.find_by_domain(domain)?
                && other.id != id
            {
                return Err(CatalogError::DuplicateDomain(domain.clone()));
            }
        }
        if let Some(theme) = patch.theme {
            let theme = self
                .themes
                .get(theme)?
                .ok_or_else(|| CatalogError::not_found("theme", theme))?;
            if theme.site != id {
                return Err(CatalogError::validation(
                    "theme belongs to a different site",
                ));
            }
        }

        if let Some(name) = patch.name {
            if name.trim().is_empty() {
                return Err(CatalogError::validation("name must not be empty"));
            }
            site.name = name;
        }
        if let Some(domain) = patch.domain {
            site.domain = Some(domain);
        }
        if let Some(description) = patch.description {
            site.description = Some(description);
        }
        if let Some(theme) = patch.theme {
            site.theme = Some(theme);
        }
        if let Some(settings) = patch.settings {
            site.settings = settings;
        }

        site.touch();
        self.sites.update(&site)?;
        Ok(site)
    }

    /// Replace the header menu.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the site does not exist and `Validation` if
    /// any item (or nested child) has an empty label or url.
    pub fn update_menu(&self, id: Uuid, menu: Vec<MenuItem>) -> Result<Site, CatalogError> {
        for item in &menu {
            validate_menu_entry(&item.label, &item.url)?;
            for child in &item.children {
                validate_menu_entry(&child.label, &child.url)?;
            }
        }

        let mut site = self.get(id)?;
        site.navigation.menu = menu;
        site.touch();
        self.sites.update(&site)?;
        Ok(site)
    }

    /// Change the lifecycle status.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the site does not exist and `Validation` if
    /// `status` is not one of `draft`, `published`, `archived`.
    pub fn update_status(&self, id: Uuid, status: &str) -> Result<Site, CatalogError> {
        let status = SiteStatus::parse(status).ok_or_else(|| {
            CatalogError::validation(format!(
                "status must be one of draft, published, archived (got '{status}')"
            ))
        })?;

        let mut site = self.get(id)?;
        site.status = status;
        site.touch();
        self.sites.update(&site)?;
        tracing::info!(site = %id, status = ?status, "Site status changed");
        Ok(site)
    }

    /// Remove the site document only.
    ///
    /// No cascade: dependent themes and pages are left untouched. Only
    /// the orchestrator calls this, after removing dependents.
    pub(crate) fn remove(&self, id: Uuid) -> Result<bool, CatalogError> {
        Ok(self.sites.delete(id)?)
    }

    fn attach(&self, site: Site) -> Result<SiteView, CatalogError> {
        let theme_detail = match site.theme {
            Some(theme_id) => {
                let theme = self.themes.get(theme_id)?;
                if theme.is_none() {
                    tracing::warn!(site = %site.id, theme = %theme_id, "Dangling theme reference");
                }
                theme
            }
            None => None,
        };
        let pages = self.pages.list_by_site(site.id)?;
        Ok(SiteView {
            site,
            theme_detail,
            pages,
        })
    }
}

fn validate_domain(domain: &str) -> Result<(), CatalogError> {
    if domain.trim().is_empty() {
        return Err(CatalogError::validation("domain must not be empty"));
    }
    if !DOMAIN_RE.is_match(domain) {
        return Err(CatalogError::validation(format!(
            "domain '{domain}' is not a valid hostname"
        )));
    }
    Ok(())
}

fn validate_menu_entry(label: &str, url: &str) -> Result<(), CatalogError> {
    if label.trim().is_empty() || url.trim().is_empty() {
        return Err(CatalogError::validation(
            "menu items need a non-empty label and url",
        ));
    }
    Ok(())
}
