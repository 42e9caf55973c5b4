//! Site entity: a tenant's storefront.
//!
//! A site carries identity, an optional unique domain, navigation
//! structure and display settings. Page membership is derived from each
//! page's `site` back-reference at query time; the site document itself
//! does not keep a page list, so the two can never drift apart.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Site lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SiteStatus {
    /// Not publicly visible yet.
    #[default]
    Draft,
    /// Live.
    Published,
    /// Taken offline but retained.
    Archived,
}

impl SiteStatus {
    /// Parse a status from its lowercase wire name.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "draft" => Some(Self::Draft),
            "published" => Some(Self::Published),
            "archived" => Some(Self::Archived),
            _ => None,
        }
    }
}

/// Nested header menu entry (one level below a top item).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuLink {
    /// Display label.
    pub label: String,
    /// Link target.
    pub url: String,
    /// Opens in a new tab when true.
    #[serde(default)]
    pub external: bool,
}

/// Top-level header menu item with at most one level of children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    /// Display label.
    pub label: String,
    /// Link target.
    pub url: String,
    /// Opens in a new tab when true.
    #[serde(default)]
    pub external: bool,
    /// Nested entries shown in a dropdown.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<MenuLink>,
}

impl MenuItem {
    /// Create an internal menu item without children.
    #[must_use]
    pub fn internal(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
            external: false,
            children: Vec::new(),
        }
    }
}

/// Footer link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FooterLink {
    /// Display text.
    pub text: String,
    /// Link target.
    pub url: String,
    /// Opens in a new tab when true.
    #[serde(default)]
    pub external: bool,
}

/// Footer column: a heading with a list of links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FooterSection {
    /// Column heading.
    pub heading: String,
    /// Links under the heading.
    pub links: Vec<FooterLink>,
}

/// Header menu and footer structure.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Navigation {
    /// Header menu items.
    #[serde(default)]
    pub menu: Vec<MenuItem>,
    /// Footer sections.
    #[serde(default)]
    pub footer: Vec<FooterSection>,
}

impl Navigation {
    /// Starter navigation skeleton given to every new site.
    #[must_use]
    pub fn starter() -> Self {
        Self {
            menu: vec![
                MenuItem::internal("Home", "/"),
                MenuItem::internal("Products", "/products"),
                MenuItem::internal("About", "/about"),
                MenuItem::internal("Contact", "/contact"),
            ],
            footer: vec![FooterSection {
                heading: "Company".to_owned(),
                links: vec![
                    FooterLink {
                        text: "About Us".to_owned(),
                        url: "/about".to_owned(),
                        external: false,
                    },
                    FooterLink {
                        text: "Contact".to_owned(),
                        url: "/contact".to_owned(),
                        external: false,
                    },
                ],
            }],
        }
    }
}

/// Social profile links.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialLinks {
    pub facebook: Option<String>,
    pub instagram: Option<String>,
    pub twitter: Option<String>,
    pub youtube: Option<String>,
}

/// Newsletter signup block configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsletterSettings {
    /// Show the signup block.
    #[serde(default)]
    pub enabled: bool,
    /// Heading shown above the signup form.
    pub heading: Option<String>,
}

/// Where the currency symbol is placed relative to the amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurrencyPosition {
    /// `$9.99`
    #[default]
    Prefix,
    /// `9.99 kr`
    Suffix,
}

/// Display currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Currency {
    /// ISO 4217 code (e.g. "USD").
    pub code: String,
    /// Display symbol (e.g. "$").
    pub symbol: String,
    /// Symbol placement.
    #[serde(default)]
    pub position: CurrencyPosition,
}

impl Default for Currency {
    fn default() -> Self {
        Self {
            code: "USD".to_owned(),
            symbol: "$".to_owned(),
            position: CurrencyPosition::Prefix,
        }
    }
}

/// Site-wide display settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SiteSettings {
    /// Logo image URL.
    pub logo_url: Option<String>,
    /// Favicon URL.
    pub favicon_url: Option<String>,
    /// Show the search box in the header.
    pub enable_search: bool,
    /// Show the cart icon in the header.
    pub show_cart_icon: bool,
    /// Social profile links.
    pub social: SocialLinks,
    /// Newsletter signup block.
    pub newsletter: NewsletterSettings,
    /// Google Analytics measurement id.
    pub google_analytics_id: Option<String>,
    /// Facebook pixel id.
    pub facebook_pixel_id: Option<String>,
    /// Display currency.
    pub currency: Currency,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            logo_url: None,
            favicon_url: None,
            enable_search: true,
            show_cart_icon: true,
            social: SocialLinks::default(),
            newsletter: NewsletterSettings::default(),
            google_analytics_id: None,
            facebook_pixel_id: None,
            currency: Currency::default(),
        }
    }
}

/// A tenant's storefront.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Site {
    /// Unique id.
    pub id: Uuid,
    /// Display name, never empty.
    pub name: String,
    /// Custom domain, unique across all sites when present.
    pub domain: Option<String>,
    /// Owning user.
    pub owner: Uuid,
    /// Current theme. When set, the referenced theme's `site` must equal
    /// this site's id.
    pub theme: Option<Uuid>,
    /// Short description shown in dashboards.
    pub description: Option<String>,
    /// Header menu and footer.
    pub navigation: Navigation,
    /// Display settings.
    pub settings: SiteSettings,
    /// Lifecycle status.
    pub status: SiteStatus,
    /// Creation time, immutable.
    pub created_at: DateTime<Utc>,
    /// Refreshed on every mutation.
    pub updated_at: DateTime<Utc>,
}

impl Site {
    /// Create a draft site with the starter navigation and default
    /// settings.
    #[must_use]
    pub fn new(owner: Uuid, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            domain: None,
            owner,
            theme: None,
            description: None,
            navigation: Navigation::starter(),
            settings: SiteSettings::default(),
            status: SiteStatus::Draft,
            created_at: now,
            updated_at: now,
        }
    }

    /// Refresh `updated_at`.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
