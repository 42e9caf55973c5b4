//! Theme catalog.
//!
//! Owns the Theme entity. The single-default-per-site invariant is
//! actively repaired in exactly one place, [`ThemeCatalog::set_default`];
//! plain creation with `is_default` set is tolerated only for the site
//! bootstrap path, where no sibling themes exist yet.

use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use vitrine_model::{ButtonStyle, Theme, ThemeFont};
use vitrine_store::ThemeStore;

use crate::error::CatalogError;

/// Optional style-token overrides for [`ThemeCatalog::create`].
///
/// Every field is optional; anything left `None` keeps the default token
/// from [`Theme::new`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ThemeStyle {
    /// Primary brand color.
    pub primary_color: Option<String>,
    /// Secondary brand color.
    pub secondary_color: Option<String>,
    /// Accent color for highlights.
    pub accent_color: Option<String>,
    /// Page background.
    pub background_color: Option<String>,
    /// Card/panel background.
    pub surface_color: Option<String>,
    /// Body text color.
    pub text_color: Option<String>,
    /// Secondary text color.
    pub muted_text_color: Option<String>,
    /// Border color.
    pub border_color: Option<String>,
    /// Heading font family.
    pub heading_font: Option<String>,
    /// Body font family.
    pub body_font: Option<String>,
    /// Base font size.
    pub base_font_size: Option<String>,
    /// Corner radius for cards and inputs.
    pub border_radius: Option<String>,
    /// Corner radius for buttons.
    pub button_radius: Option<String>,
    /// Primary button colors.
    pub primary_button: Option<ButtonStyle>,
    /// Secondary button colors.
    pub secondary_button: Option<ButtonStyle>,
    /// Free-form CSS appended after generated styles.
    pub custom_css: Option<String>,
    /// Extra web fonts loaded by the storefront.
    pub fonts: Option<Vec<ThemeFont>>,
}

impl ThemeStyle {
    fn apply(self, theme: &mut Theme) {
        if let Some(v) = self.primary_color {
            theme.primary_color = v;
        }
        if let Some(v) = self.secondary_color {
            theme.secondary_color = v;
        }
        if let Some(v) = self.accent_color {
            theme.accent_color = v;
        }
        if let Some(v) = self.background_color {
            theme.background_color = v;
        }
        if let Some(v) = self.surface_color {
            theme.surface_color = v;
        }
        if let Some(v) = self.text_color {
            theme.text_color = v;
        }
        if let Some(v) = self.muted_text_color {
            theme.muted_text_color = v;
        }
        if let Some(v) = self.border_color {
            theme.border_color = v;
        }
        if let Some(v) = self.heading_font {
            theme.heading_font = v;
        }
        if let Some(v) = self.body_font {
            theme.body_font = v;
        }
        if let Some(v) = self.base_font_size {
            theme.base_font_size = v;
        }
        if let Some(v) = self.border_radius {
            theme.border_radius = v;
        }
        if let Some(v) = self.button_radius {
            theme.button_radius = v;
        }
        if let Some(v) = self.primary_button {
            theme.primary_button = v;
        }
        if let Some(v) = self.secondary_button {
            theme.secondary_button = v;
        }
        if let Some(v) = self.custom_css {
            theme.custom_css = v;
        }
        if let Some(v) = self.fonts {
            theme.fonts = v;
        }
    }
}

/// Input for [`ThemeCatalog::create`].
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTheme {
    /// Owning site.
    pub site: Uuid,
    /// Display name.
    pub name: String,
    /// Create as the site's default theme.
    ///
    /// This does not demote siblings; use [`ThemeCatalog::set_default`]
    /// for atomic promotion once sibling themes exist.
    #[serde(default)]
    pub is_default: bool,
    /// Style tokens to set at creation; the rest keep their defaults.
    #[serde(flatten)]
    pub style: ThemeStyle,
}

impl NewTheme {
    /// Create a non-default theme input with every token at its default.
    #[must_use]
    pub fn new(site: Uuid, name: impl Into<String>) -> Self {
        Self {
            site,
            name: name.into(),
            is_default: false,
            style: ThemeStyle::default(),
        }
    }

    /// Create as the site's default theme (bootstrap only).
    #[must_use]
    pub fn as_default(mut self) -> Self {
        self.is_default = true;
        self
    }

    /// Set style-token overrides.
    #[must_use]
    pub fn with_style(mut self, style: ThemeStyle) -> Self {
        self.style = style;
        self
    }
}

/// Catalog owning the Theme entity.
pub struct ThemeCatalog {
    store: Arc<dyn ThemeStore>,
}

impl ThemeCatalog {
    /// Create a catalog over the given theme store.
    #[must_use]
    pub fn new(store: Arc<dyn ThemeStore>) -> Self {
        Self { store }
    }

    /// Create a theme.
    ///
    /// Tokens start at the documented defaults; any override carried in
    /// the input is applied on top.
    ///
    /// # Errors
    ///
    /// Returns `Validation` if `name` is empty.
    pub fn create(&self, new: NewTheme) -> Result<Theme, CatalogError> {
        if new.name.trim().is_empty() {
            return Err(CatalogError::validation("name must not be empty"));
        }

        let mut theme = Theme::new(new.site, new.name);
        theme.is_default = new.is_default;
        new.style.apply(&mut theme);

        self.store.insert(&theme)?;
        tracing::info!(theme = %theme.id, site = %theme.site, "Theme created");
        Ok(theme)
    }

    /// Look up a theme by id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the theme does not exist.
    pub fn get(&self, id: Uuid) -> Result<Theme, CatalogError> {
        self.store
            .get(id)?
            .ok_or_else(|| CatalogError::not_found("theme", id))
    }

    /// All themes of a site, newest first.
    ///
    /// # Errors
    ///
    /// Returns `Store` if the listing query fails.
    pub fn list_by_site(&self, site: Uuid) -> Result<Vec<Theme>, CatalogError> {
        Ok(self.store.list_by_site(site)?)
    }

    /// Promote a theme to be its site's default.
    ///
    /// No-op success when the theme is already the default. Otherwise
    /// every sibling default is demoted first, then this theme is
    /// promoted, so at most one default per site survives the call. The
    /// steps are sequential store writes, not a transaction; a concurrent
    /// promotion on the same site can interleave (accepted limitation,
    /// the store provides no transaction primitive).
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the theme does not exist.
    pub fn set_default(&self, id: Uuid) -> Result<Theme, CatalogError> {
        let mut theme = self.get(id)?;
        if theme.is_default {
            return Ok(theme);
        }

        for sibling in self.store.list_by_site(theme.site)? {
            if sibling.is_default && sibling.id != id {
                let mut demoted = sibling;
                demoted.is_default = false;
                demoted.touch();
                self.store.update(&demoted)?;
            }
        }

        theme.is_default = true;
        theme.touch();
        self.store.update(&theme)?;
        tracing::info!(theme = %id, site = %theme.site, "Default theme changed");
        Ok(theme)
    }

    /// Delete a theme.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the theme does not exist and
    /// `DefaultThemeProtected` if it is the site's default; promote
    /// another theme first.
    pub fn delete(&self, id: Uuid) -> Result<(), CatalogError> {
        let theme = self.get(id)?;
        if theme.is_default {
            return Err(CatalogError::DefaultThemeProtected);
        }
        self.store.delete(id)?;
        tracing::info!(theme = %id, site = %theme.site, "Theme deleted");
        Ok(())
    }

    /// Deep-copy a theme under a new name.
    ///
    /// The clone keeps every style token, custom CSS and font of the
    /// source but gets a fresh id and timestamps and is never the
    /// default.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the source does not exist and `Validation`
    /// if `new_name` is empty.
    pub fn clone_theme(&self, id: Uuid, new_name: impl Into<String>) -> Result<Theme, CatalogError> {
        let new_name = new_name.into();
        if new_name.trim().is_empty() {
            return Err(CatalogError::validation("name must not be empty"));
        }

        let source = self.get(id)?;
        let now = Utc::now();
        let mut clone = source;
        clone.id = Uuid::new_v4();
        clone.name = new_name;
        clone.is_default = false;
        clone.created_at = now;
        clone.updated_at = now;

        self.store.insert(&clone)?;
        Ok(clone)
    }

    /// Remove every theme of a site, bypassing default-theme protection.
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

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use vitrine_store::MemoryStore;

    use super::*;

    fn catalog() -> ThemeCatalog {
        ThemeCatalog::new(Arc::new(MemoryStore::new()))
    }

    fn default_count(catalog: &ThemeCatalog, site: Uuid) -> usize {
        catalog
            .list_by_site(site)
            .unwrap()
            .iter()
            .filter(|t| t.is_default)
            .count()
    }

    #[test]
    fn test_create_theme() {
        let catalog = catalog();
        let site = Uuid::new_v4();

        let theme = catalog.create(NewTheme::new(site, "Default")).unwrap();

        assert_eq!(theme.site, site);
        assert!(!theme.is_default);
        assert_eq!(theme.primary_color, "#3b82f6");
    }

    #[test]
    fn test_create_applies_style_overrides() {
        let catalog = catalog();
        let style = ThemeStyle {
            primary_color: Some("#111827".to_owned()),
            custom_css: Some(".hero { padding: 0 }".to_owned()),
            fonts: Some(vec![ThemeFont {
                name: "Lora".to_owned(),
                url: "https://fonts.example.com/lora.css".to_owned(),
                weight: "400;700".to_owned(),
            }]),
            ..ThemeStyle::default()
        };

        let theme = catalog
            .create(NewTheme::new(Uuid::new_v4(), "Editorial").with_style(style))
            .unwrap();

        assert_eq!(theme.primary_color, "#111827");
        assert_eq!(theme.custom_css, ".hero { padding: 0 }");
        assert_eq!(theme.fonts.len(), 1);
        // Untouched tokens keep their defaults.
        assert_eq!(theme.secondary_color, "#64748b");
        assert_eq!(theme.heading_font, "Inter");
    }

    #[test]
    fn test_new_theme_deserializes_flattened_style() {
        let new: NewTheme = serde_json::from_str(
            r##"{
                "site": "00000000-0000-0000-0000-000000000000",
                "name": "Editorial",
                "primaryColor": "#111827",
                "headingFont": "Lora"
            }"##,
        )
        .unwrap();

        assert_eq!(new.style.primary_color.as_deref(), Some("#111827"));
        assert_eq!(new.style.heading_font.as_deref(), Some("Lora"));
        assert!(new.style.custom_css.is_none());
        assert!(!new.is_default);
    }

    #[test]
    fn test_create_rejects_empty_name() {
        let catalog = catalog();

        let err = catalog
            .create(NewTheme::new(Uuid::new_v4(), "  "))
            .unwrap_err();

        assert!(matches!(err, CatalogError::Validation(_)));
    }

    #[test]
    fn test_set_default_demotes_siblings() {
        let catalog = catalog();
        let site = Uuid::new_v4();
        let first = catalog
            .create(NewTheme::new(site, "First").as_default())
            .unwrap();
        let second = catalog.create(NewTheme::new(site, "Second")).unwrap();

        let promoted = catalog.set_default(second.id).unwrap();

        assert!(promoted.is_default);
        assert!(!catalog.get(first.id).unwrap().is_default);
        assert_eq!(default_count(&catalog, site), 1);
    }

    #[test]
    fn test_set_default_is_idempotent() {
        let catalog = catalog();
        let site = Uuid::new_v4();
        let theme = catalog
            .create(NewTheme::new(site, "Only").as_default())
            .unwrap();
        let before = catalog.get(theme.id).unwrap();

        let after = catalog.set_default(theme.id).unwrap();

        // Second call is a no-op: not even updated_at moves.
        assert_eq!(after.updated_at, before.updated_at);
        assert_eq!(default_count(&catalog, site), 1);
    }

    #[test]
    fn test_set_default_scoped_to_site() {
        let catalog = catalog();
        let site_a = Uuid::new_v4();
        let site_b = Uuid::new_v4();
        let a = catalog
            .create(NewTheme::new(site_a, "A").as_default())
            .unwrap();
        let b = catalog.create(NewTheme::new(site_b, "B")).unwrap();

        catalog.set_default(b.id).unwrap();

        // Promotion on site B leaves site A's default alone.
        assert!(catalog.get(a.id).unwrap().is_default);
    }

    #[test]
    fn test_delete_default_theme_protected() {
        let catalog = catalog();
        let theme = catalog
            .create(NewTheme::new(Uuid::new_v4(), "Default").as_default())
            .unwrap();

        let err = catalog.delete(theme.id).unwrap_err();

        assert!(matches!(err, CatalogError::DefaultThemeProtected));
        assert!(catalog.get(theme.id).is_ok());
    }

    #[test]
    fn test_delete_after_promotion_succeeds() {
        let catalog = catalog();
        let site = Uuid::new_v4();
        let old = catalog
            .create(NewTheme::new(site, "Old").as_default())
            .unwrap();
        let new = catalog.create(NewTheme::new(site, "New")).unwrap();

        catalog.set_default(new.id).unwrap();

        assert!(catalog.delete(old.id).is_ok());
        assert!(matches!(
            catalog.get(old.id),
            Err(CatalogError::NotFound { .. })
        ));
    }

    #[test]
    fn test_clone_theme_copies_tokens() {
        let catalog = catalog();
        let source = catalog
            .create(NewTheme::new(Uuid::new_v4(), "Brand").as_default())
            .unwrap();

        let clone = catalog.clone_theme(source.id, "Brand Copy").unwrap();

        assert_ne!(clone.id, source.id);
        assert_eq!(clone.site, source.site);
        assert_eq!(clone.name, "Brand Copy");
        assert!(!clone.is_default);
        assert_eq!(clone.primary_color, source.primary_color);
        assert_eq!(clone.primary_button, source.primary_button);
        assert!(clone.created_at >= source.created_at);
    }

    #[test]
    fn test_clone_missing_theme() {
        let catalog = catalog();

        let err = catalog.clone_theme(Uuid::new_v4(), "Copy").unwrap_err();

        assert!(matches!(err, CatalogError::NotFound { .. }));
    }
}
