//! Page catalog.
//!
//! Owns the Page entity: creation, patching, deletion, cloning, publish
//! toggling and per-site listing. The two invariants enforced here are
//! path uniqueness within a site and delete protection for the default
//! page.

use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use vitrine_model::{Component, Page, Seo};
use vitrine_store::PageStore;

use crate::error::CatalogError;

/// Input for [`PageCatalog::create`].
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPage {
    /// Owning site.
    pub site: Uuid,
    /// Display name.
    pub name: String,
    /// URL path, unique within the site.
    pub path: String,
    /// Page kind understood by the frontend.
    #[serde(rename = "type")]
    pub page_type: String,
    /// Initial component trees.
    #[serde(default)]
    pub components: Vec<Component>,
    /// Mark as the site's home/fallback page.
    #[serde(default)]
    pub is_default: bool,
    /// Publish immediately.
    #[serde(default)]
    pub is_published: bool,
}

impl NewPage {
    /// Create a minimal input: unpublished, not default, no components.
    #[must_use]
    pub fn new(
        site: Uuid,
        name: impl Into<String>,
        path: impl Into<String>,
        page_type: impl Into<String>,
    ) -> Self {
        Self {
            site,
            name: name.into(),
            path: path.into(),
            page_type: page_type.into(),
            components: Vec::new(),
            is_default: false,
            is_published: false,
        }
    }

    /// Set the initial component trees.
    #[must_use]
    pub fn with_components(mut self, components: Vec<Component>) -> Self {
        self.components = components;
        self
    }

    /// Mark as the site's default page.
    #[must_use]
    pub fn as_default(mut self) -> Self {
        self.is_default = true;
        self
    }

    /// Publish immediately on creation.
    #[must_use]
    pub fn published(mut self) -> Self {
        self.is_published = true;
        self
    }
}

/// Partial update for [`PageCatalog::update`].
///
/// Ownership is immutable: there is deliberately no `site` field, so a
/// patch can never move a page between sites. Publish state changes go
/// through [`PageCatalog::toggle_published`], not here.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PagePatch {
    /// New display name.
    pub name: Option<String>,
    /// New path; re-checked for uniqueness within the site.
    pub path: Option<String>,
    /// New page kind.
    #[serde(rename = "type")]
    pub page_type: Option<String>,
    /// New browser title.
    pub title: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// Replacement SEO metadata.
    pub seo: Option<Seo>,
    /// Replacement component trees (whole-document write).
    pub components: Option<Vec<Component>>,
    /// Change the default-page flag.
    pub is_default: Option<bool>,
}

/// Pages of one site with their total count.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageList {
    /// Pages, newest first.
    pub pages: Vec<Page>,
    /// Total number of pages for the site.
    pub total: usize,
}

/// Catalog owning the Page entity.
pub struct PageCatalog {
    store: Arc<dyn PageStore>,
}

impl PageCatalog {
    /// Create a catalog over the given page store.
    #[must_use]
    pub fn new(store: Arc<dyn PageStore>) -> Self {
        Self { store }
    }

    /// Create a page.
    ///
    /// # Errors
    ///
    /// Returns `Validation` if `name`, `path` or `type` is empty,
    /// `Component` if a component tree is structurally invalid, and
    /// `DuplicatePath` if another page of the same site already uses the
    /// path.
    pub fn create(&self, new: NewPage) -> Result<Page, CatalogError> {
        validate_required(&new.name, "name")?;
        validate_required(&new.path, "path")?;
        validate_required(&new.page_type, "type")?;
        Component::validate_all(&new.components)?;

        if self.store.find_by_path(new.site, &new.path)?.is_some() {
            return Err(CatalogError::DuplicatePath { path: new.path });
        }

        let mut page = Page::new(new.site, new.name, new.path, new.page_type);
        page.components = new.components;
        page.is_default = new.is_default;
        page.is_published = new.is_published;
        if new.is_published {
            page.published_at = Some(Utc::now());
        }

        self.store.insert(&page)?;
        tracing::info!(page = %page.id, site = %page.site, path = %page.path, "Page created");
        Ok(page)
    }

    /// Look up a page by id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the page does not exist.
    pub fn get(&self, id: Uuid) -> Result<Page, CatalogError> {
        self.store
            .get(id)?
            .ok_or_else(|| CatalogError::not_found("page", id))
    }

    /// Apply a partial update.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the page does not exist, `Validation` if a
    /// patched `name`/`path`/`type` is empty, `Component` if replacement
    /// components are invalid, and `DuplicatePath` if the new path
    /// collides with another page of the same site.
    pub fn update(&self, id: Uuid, patch: PagePatch) -> Result<Page, CatalogError> {
        let mut page = self.get(id)?;

        if let Some(path) = &patch.path {
            validate_required(path, "path")?;
            if *path != page.path
                && let Some(other) = self.store.find_by_path(page.site, path)?
                && other.id != id
            {
                return Err(CatalogError::DuplicatePath { path: path.clone() });
            }
        }
        if let Some(components) = &patch.components {
            Component::validate_all(components)?;
        }

        if let Some(name) = patch.name {
            validate_required(&name, "name")?;
            page.name = name;
        }
        if let Some(path) = patch.path {
            page.path = path;
        }
        if let Some(page_type) = patch.page_type {
            validate_required(&page_type, "type")?;
            page.page_type = page_type;
        }
        if let Some(title) = patch.title {
            page.title = Some(title);
        }
        if let Some(description) = patch.description {
            page.description = Some(description);
        }
        if let Some(seo) = patch.seo {
            page.seo = seo;
        }
        if let Some(components) = patch.components {
            page.components = components;
        }
        if let Some(is_default) = patch.is_default {
            page.is_default = is_default;
        }

        page.touch();
        self.store.update(&page)?;
        Ok(page)
    }

    /// Delete a page.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the page does not exist and
    /// `DefaultPageProtected` if it is the site's default page; the caller
    /// must promote a different page first.
    pub fn delete(&self, id: Uuid) -> Result<(), CatalogError> {
        let page = self.get(id)?;
        if page.is_default {
            return Err(CatalogError::DefaultPageProtected);
        }
        self.store.delete(id)?;
        tracing::info!(page = %id, site = %page.site, "Page deleted");
        Ok(())
    }

    /// Deep-copy a page under a new name and path.
    ///
    /// The clone keeps the source's kind and full component tree but is
    /// never the default page and never published.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the source does not exist, `Validation` if
    /// `new_name`/`new_path` is empty, and `DuplicatePath` under the same
    /// rule as `create`.
    pub fn clone_page(
        &self,
        id: Uuid,
        new_name: impl Into<String>,
        new_path: impl Into<String>,
    ) -> Result<Page, CatalogError> {
        let source = self.get(id)?;
        let new = NewPage::new(source.site, new_name, new_path, source.page_type.clone())
            .with_components(source.components.clone());
        let mut clone = self.create(new)?;
        clone.title = source.title.clone();
        clone.description = source.description.clone();
        clone.seo = source.seo.clone();
        self.store.update(&clone)?;
        Ok(clone)
    }

    /// Flip the published flag.
    ///
    /// `published_at` is set on the first transition to published and
    /// never cleared or moved afterwards, so publish history is retained
    /// across unpublish/republish cycles.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the page does not exist.
    pub fn toggle_published(&self, id: Uuid) -> Result<Page, CatalogError> {
        let mut page = self.get(id)?;
        page.is_published = !page.is_published;
        if page.is_published && page.published_at.is_none() {
            page.published_at = Some(Utc::now());
        }
        page.touch();
        self.store.update(&page)?;
        tracing::info!(page = %id, published = page.is_published, "Publish state toggled");
        Ok(page)
    }

    /// All pages of a site, newest first, with the total count.
    ///
    /// No pagination is applied at this layer; callers add limit/offset
    /// on top if they need it.
    ///
    /// # Errors
    ///
    /// Returns `Store` if the listing query fails.
    pub fn list_by_site(&self, site: Uuid) -> Result<PageList, CatalogError> {
        let pages = self.store.list_by_site(site)?;
        let total = pages.len();
        Ok(PageList { pages, total })
    }

    /// Remove every page of a site, bypassing default-page protection.
    ///
    /// Only the orchestrator calls this, as part of a whole-site cascade.
    ///
    /// # Errors
    ///
    /// Returns `Store` if the bulk delete fails.
    pub(crate) fn delete_by_site(&self, site: Uuid) -> Result<usize, CatalogError> {
        Ok(self.store.delete_by_site(site)?)
    }
}

fn validate_required(value: &str, field: &str) -> Result<(), CatalogError> {
    if value.trim().is_empty() {
        return Err(CatalogError::validation(format!(
            "{field} must not be empty"
        )));
    }
    Ok(())
}
