//! Catalog error types.

use vitrine_model::InvalidComponent;
use vitrine_store::StoreError;

/// Typed failure surfaced by catalog and orchestrator operations.
///
/// None of these are retried internally; retry policy, if any, belongs to
/// the caller.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// A required field is missing or malformed.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A component tree failed structural validation.
    #[error("invalid component: {0}")]
    Component(#[from] InvalidComponent),

    /// Another page of the same site already uses this path.
    #[error("a page with path '{path}' already exists for this site")]
    DuplicatePath {
        /// The colliding path.
        path: String,
    },

    /// Another site already uses this domain.
    #[error("domain '{0}' is already in use by another site")]
    DuplicateDomain(String),

    /// The page is the site's default and cannot be deleted while it holds
    /// that flag.
    #[error("the default page cannot be deleted; promote another page first")]
    DefaultPageProtected,

    /// The theme is the site's default and cannot be deleted while it
    /// holds that flag.
    #[error("the default theme cannot be deleted; promote another theme first")]
    DefaultThemeProtected,

    /// A referenced entity does not exist.
    #[error("{entity} '{id}' not found")]
    NotFound {
        /// Entity type name (e.g. "site").
        entity: &'static str,
        /// Id or lookup key that failed to resolve.
        id: String,
    },

    /// The persistence collaborator failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl CatalogError {
    /// Shorthand for a validation failure.
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Shorthand for a missing entity.
    pub(crate) fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use uuid::Uuid;

    use super::*;

    #[test]
    fn test_not_found_message() {
        let id = Uuid::nil();
        let err = CatalogError::not_found("site", id);

        assert_eq!(err.to_string(), format!("site '{id}' not found"));
    }

    #[test]
    fn test_duplicate_path_message() {
        let err = CatalogError::DuplicatePath {
            path: "/about".to_owned(),
        };

        assert_eq!(
            err.to_string(),
            "a page with path '/about' already exists for this site"
        );
    }

    #[test]
    fn test_component_error_converts() {
        let err: CatalogError = InvalidComponent::EmptyKind.into();

        assert!(matches!(err, CatalogError::Component(_)));
        assert_eq!(
            err.to_string(),
            "invalid component: component kind must not be empty"
        );
    }
}
