//! Request authentication.
//!
//! Handlers that need a caller identity take a [`Principal`] extractor
//! argument. The extractor delegates to the [`PrincipalSupplier`]
//! installed in application state, so alternate schemes can be swapped
//! in without touching handler code.

use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::request::Parts;
use uuid::Uuid;

use crate::error::ServerError;
use crate::state::AppState;

/// An authenticated caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    /// Owner id the caller acts as.
    pub owner: Uuid,
}

/// Produces a [`Principal`] from request headers, or rejects the request.
pub trait PrincipalSupplier: Send + Sync {
    /// Authenticate a request from its headers.
    ///
    /// Returns `None` when no valid credentials are present.
    fn authenticate(&self, headers: &HeaderMap) -> Option<Principal>;
}

/// Supplier that reads `Authorization: Bearer <uuid>` headers.
///
/// The bearer token is the owner id itself. This is the bundled scheme
/// for development and tests; production deployments install their own
/// supplier.
#[derive(Debug, Default, Clone, Copy)]
pub struct BearerPrincipalSupplier;

impl PrincipalSupplier for BearerPrincipalSupplier {
    fn authenticate(&self, headers: &HeaderMap) -> Option<Principal> {
        let value = headers.get(axum::http::header::AUTHORIZATION)?;
        let token = value.to_str().ok()?.strip_prefix("Bearer ")?;
        let owner = Uuid::parse_str(token.trim()).ok()?;
        Some(Principal { owner })
    }
}

impl FromRequestParts<Arc<AppState>> for Principal {
    type Rejection = ServerError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        state
            .principals
            .authenticate(&parts.headers)
            .ok_or(ServerError::Unauthenticated)
    }
}
