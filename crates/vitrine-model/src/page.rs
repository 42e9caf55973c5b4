//! Page entity: a path-addressed document inside one site.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::component::Component;

/// Search-engine metadata.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Seo {
    /// `<title>` override.
    pub meta_title: Option<String>,
    /// Meta description.
    pub meta_description: Option<String>,
    /// Meta keywords.
    pub meta_keywords: Option<String>,
    /// Open Graph image URL.
    pub og_image: Option<String>,
}

/// A page belonging to one site.
///
/// `path` is unique within the owning site, not globally. The page marked
/// `is_default` is the site's home/fallback page and cannot be deleted
/// while it holds that flag. `published_at` records the first publish and
/// is never cleared afterwards, so publish history survives unpublishing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// Unique id.
    pub id: Uuid,
    /// Owning site, set at creation and immutable.
    pub site: Uuid,
    /// Display name.
    pub name: String,
    /// URL path (e.g. "/", "/products"). Unique per site.
    pub path: String,
    /// Page kind understood by the frontend (e.g. "home", "content").
    #[serde(rename = "type")]
    pub page_type: String,
    /// Browser title.
    pub title: Option<String>,
    /// Short description.
    pub description: Option<String>,
    /// Search-engine metadata.
    #[serde(default)]
    pub seo: Seo,
    /// Embedded component trees, in display order.
    #[serde(default)]
    pub components: Vec<Component>,
    /// Marks the site's home/fallback page.
    pub is_default: bool,
    /// Currently visible to visitors.
    pub is_published: bool,
    /// Set on the first publish, never cleared.
    pub published_at: Option<DateTime<Utc>>,
    /// Creation time, immutable.
    pub created_at: DateTime<Utc>,
    /// Refreshed on every mutation.
    pub updated_at: DateTime<Utc>,
}

impl Page {
    /// Create an unpublished, non-default page with no components.
    #[must_use]
    pub fn new(
        site: Uuid,
        name: impl Into<String>,
        path: impl Into<String>,
        page_type: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            site,
            name: name.into(),
            path: path.into(),
            page_type: page_type.into(),
            title: None,
            description: None,
            seo: Seo::default(),
            components: Vec::new(),
            is_default: false,
            is_published: false,
            published_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Refresh `updated_at`.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_new_page_defaults() {
        let site = Uuid::new_v4();
        let page = Page::new(site, "Home", "/", "home");

        assert_eq!(page.site, site);
        assert_eq!(page.path, "/");
        assert_eq!(page.page_type, "home");
        assert!(!page.is_default);
        assert!(!page.is_published);
        assert!(page.published_at.is_none());
        assert!(page.components.is_empty());
    }

    #[test]
    fn test_page_type_serializes_as_type() {
        let page = Page::new(Uuid::new_v4(), "Home", "/", "home");
        let json = serde_json::to_value(&page).unwrap();

        assert_eq!(json["type"], "home");
        assert_eq!(json["isDefault"], false);
        assert!(json.get("publishedAt").is_some());
    }

    #[test]
    fn test_deserialize_document_with_components() {
        let json = serde_json::json!({
            "id": Uuid::new_v4(),
            "site": Uuid::new_v4(),
            "name": "Home",
            "path": "/",
            "type": "home",
            "title": null,
            "description": null,
            "components": [
                { "type": "hero", "children": [{ "type": "button" }] }
            ],
            "isDefault": true,
            "isPublished": true,
            "publishedAt": "2026-01-01T00:00:00Z",
            "createdAt": "2026-01-01T00:00:00Z",
            "updatedAt": "2026-01-01T00:00:00Z"
        });

        let page: Page = serde_json::from_value(json).unwrap();

        assert!(page.is_default);
        assert_eq!(page.components.len(), 1);
        assert_eq!(page.components[0].children[0].kind, "button");
    }
}
