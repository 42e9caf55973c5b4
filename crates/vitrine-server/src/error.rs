//! HTTP error mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use vitrine_catalog::CatalogError;

/// Error type returned by all request handlers.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ServerError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("missing or invalid credentials")]
    Unauthenticated,
}

impl ServerError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Catalog(err) => match err {
                CatalogError::Validation(_) | CatalogError::Component(_) => {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
                CatalogError::DuplicatePath { .. }
                | CatalogError::DuplicateDomain(_)
                | CatalogError::DefaultPageProtected
                | CatalogError::DefaultThemeProtected => StatusCode::CONFLICT,
                CatalogError::NotFound { .. } => StatusCode::NOT_FOUND,
                CatalogError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Backend failures are logged in full but never leaked to clients.
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "request failed");
            "internal error".to_owned()
        } else {
            self.to_string()
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use vitrine_store::{StoreError, StoreErrorKind};

    use super::*;

    #[test]
    fn validation_maps_to_unprocessable() {
        let err = ServerError::Catalog(CatalogError::Validation("name must not be empty".into()));
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn conflicts_map_to_409() {
        let dup = ServerError::Catalog(CatalogError::DuplicatePath {
            path: "/about".into(),
        });
        assert_eq!(dup.status(), StatusCode::CONFLICT);

        let protected = ServerError::Catalog(CatalogError::DefaultPageProtected);
        assert_eq!(protected.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn missing_entity_maps_to_404() {
        let err = ServerError::Catalog(CatalogError::NotFound {
            entity: "site",
            id: "abc".into(),
        });
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn store_failures_map_to_500() {
        let err = ServerError::Catalog(CatalogError::Store(
            StoreError::new(StoreErrorKind::Unavailable).with_backend("Memory"),
        ));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn unauthenticated_maps_to_401() {
        assert_eq!(ServerError::Unauthenticated.status(), StatusCode::UNAUTHORIZED);
    }
}
