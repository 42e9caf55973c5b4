//! Recursive component instance tree.
//!
//! Components exist only inside a page's `components` list; they have no
//! identity or persistence of their own and are written as part of whole
//! page documents. Children are owned, so a node can never be its own
//! descendant by construction.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Validation failure for a component tree.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidComponent {
    /// A node has an empty `kind`.
    #[error("component kind must not be empty")]
    EmptyKind,
    /// A node's base layout has a non-positive width or height.
    #[error("component '{kind}' has non-positive size {w}x{h}")]
    NonPositiveSize {
        /// Component kind of the offending node.
        kind: String,
        /// Declared width.
        w: f64,
        /// Declared height.
        h: f64,
    },
    /// A breakpoint override has a non-positive width or height.
    #[error("component '{kind}' has non-positive size at breakpoint '{breakpoint}'")]
    NonPositiveBreakpointSize {
        /// Component kind of the offending node.
        kind: String,
        /// Breakpoint name (e.g. "md").
        breakpoint: String,
    },
}

/// Grid placement without ordering, used for breakpoint overrides.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// Column position.
    pub x: f64,
    /// Row position.
    pub y: f64,
    /// Width in grid units.
    pub w: f64,
    /// Height in grid units.
    pub h: f64,
}

/// Base grid placement plus optional per-breakpoint overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    /// Column position.
    pub x: f64,
    /// Row position.
    pub y: f64,
    /// Width in grid units.
    pub w: f64,
    /// Height in grid units.
    pub h: f64,
    /// Stacking order among siblings.
    #[serde(default)]
    pub order: i32,
    /// Placement overrides keyed by breakpoint name (e.g. "sm", "md").
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub breakpoints: BTreeMap<String, Placement>,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            w: 12.0,
            h: 4.0,
            order: 0,
            breakpoints: BTreeMap::new(),
        }
    }
}

/// A visual component instance.
///
/// `props` is an opaque key→value map; interpretation belongs to the
/// rendering frontend, never to this backend. `children` nest without a
/// depth limit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    /// Renderable kind understood by the frontend (e.g. "hero", "product-grid").
    #[serde(rename = "type")]
    pub kind: String,
    /// Uninterpreted component properties.
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub props: serde_json::Map<String, serde_json::Value>,
    /// Nested child components.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Component>,
    /// Grid placement.
    #[serde(default)]
    pub layout: Layout,
}

impl Component {
    /// Create a component of the given kind with default layout.
    #[must_use]
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            props: serde_json::Map::new(),
            children: Vec::new(),
            layout: Layout::default(),
        }
    }

    /// Validate this node and every descendant.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidComponent`] if any node has an empty kind or a
    /// non-positive width/height in its base layout or a breakpoint
    /// override.
    pub fn validate(&self) -> Result<(), InvalidComponent> {
        if self.kind.trim().is_empty() {
            return Err(InvalidComponent::EmptyKind);
        }
        if self.layout.w <= 0.0 || self.layout.h <= 0.0 {
            return Err(InvalidComponent::NonPositiveSize {
                kind: self.kind.clone(),
                w: self.layout.w,
                h: self.layout.h,
            });
        }
        for (breakpoint, placement) in &self.layout.breakpoints {
            if placement.w <= 0.0 || placement.h <= 0.0 {
                return Err(InvalidComponent::NonPositiveBreakpointSize {
                    kind: self.kind.clone(),
                    breakpoint: breakpoint.clone(),
                });
            }
        }
        for child in &self.children {
            child.validate()?;
        }
        Ok(())
    }

    /// Validate a whole component list (a page's `components` field).
    ///
    /// # Errors
    ///
    /// Returns the first [`InvalidComponent`] found in any tree.
    pub fn validate_all(components: &[Component]) -> Result<(), InvalidComponent> {
        components.iter().try_for_each(Self::validate)
    }

    /// Total number of nodes in this tree, including this one.
    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Component::node_count).sum::<usize>()
    }
}
