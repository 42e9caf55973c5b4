//! Theme entity: per-site visual style tokens.
//!
//! A theme belongs to exactly one site for its whole lifetime. At most one
//! theme per site may be the default; that invariant lives in the theme
//! catalog, which is the only place allowed to promote a theme.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Button color group for one visual state pair (rest + hover).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonStyle {
    /// Background color.
    pub background: String,
    /// Text color.
    pub text: String,
    /// Border color.
    pub border: String,
    /// Background color on hover.
    pub hover_background: String,
    /// Text color on hover.
    pub hover_text: String,
}

/// Custom web font reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeFont {
    /// Font family name.
    pub name: String,
    /// Stylesheet or font file URL.
    pub url: String,
    /// Font weight (e.g. "400", "400;700").
    pub weight: String,
}

/// Visual style tokens for one site.
///
/// Every token has a default so a freshly created theme renders sensibly
/// without any editing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    /// Unique id.
    pub id: Uuid,
    /// Owning site, set at creation and immutable.
    pub site: Uuid,
    /// Display name.
    pub name: String,
    /// At most one theme per site may be the default.
    pub is_default: bool,

    // Colors
    /// Primary brand color. Default `#3b82f6`.
    pub primary_color: String,
    /// Secondary brand color. Default `#64748b`.
    pub secondary_color: String,
    /// Accent color for highlights. Default `#f59e0b`.
    pub accent_color: String,
    /// Page background. Default `#ffffff`.
    pub background_color: String,
    /// Card/panel background. Default `#f8fafc`.
    pub surface_color: String,
    /// Body text color. Default `#1f2937`.
    pub text_color: String,
    /// Secondary text color. Default `#6b7280`.
    pub muted_text_color: String,
    /// Border color. Default `#e5e7eb`.
    pub border_color: String,

    // Typography
    /// Heading font family. Default `Inter`.
    pub heading_font: String,
    /// Body font family. Default `Inter`.
    pub body_font: String,
    /// Base font size. Default `16px`.
    pub base_font_size: String,

    // Shape
    /// Corner radius for cards and inputs. Default `0.5rem`.
    pub border_radius: String,
    /// Corner radius for buttons. Default `0.375rem`.
    pub button_radius: String,

    // Buttons
    /// Primary button colors.
    pub primary_button: ButtonStyle,
    /// Secondary button colors.
    pub secondary_button: ButtonStyle,

    /// Free-form CSS appended after generated styles.
    #[serde(default)]
    pub custom_css: String,
    /// Extra web fonts loaded by the storefront.
    #[serde(default)]
    pub fonts: Vec<ThemeFont>,

    /// Creation time, immutable.
    pub created_at: DateTime<Utc>,
    /// Refreshed on every mutation.
    pub updated_at: DateTime<Utc>,
}

impl Theme {
    /// Create a theme for `site` with every token at its default value.
    #[must_use]
    pub fn new(site: Uuid, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            site,
            name: name.into(),
            is_default: false,
            primary_color: "#3b82f6".to_owned(),
            secondary_color: "#64748b".to_owned(),
            accent_color: "#f59e0b".to_owned(),
            background_color: "#ffffff".to_owned(),
            surface_color: "#f8fafc".to_owned(),
            text_color: "#1f2937".to_owned(),
            muted_text_color: "#6b7280".to_owned(),
            border_color: "#e5e7eb".to_owned(),
            heading_font: "Inter".to_owned(),
            body_font: "Inter".to_owned(),
            base_font_size: "16px".to_owned(),
            border_radius: "0.5rem".to_owned(),
            button_radius: "0.375rem".to_owned(),
            primary_button: ButtonStyle {
                background: "#3b82f6".to_owned(),
                text: "#ffffff".to_owned(),
                border: "#3b82f6".to_owned(),
                hover_background: "#2563eb".to_owned(),
                hover_text: "#ffffff".to_owned(),
            },
            secondary_button: ButtonStyle {
                background: "#ffffff".to_owned(),
                text: "#1f2937".to_owned(),
                border: "#e5e7eb".to_owned(),
                hover_background: "#f8fafc".to_owned(),
                hover_text: "#1f2937".to_owned(),
            },
            custom_css: String::new(),
            fonts: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Refresh `updated_at`.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
