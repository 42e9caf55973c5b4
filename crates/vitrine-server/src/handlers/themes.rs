//! Theme endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::Deserialize;
use uuid::Uuid;
use vitrine_catalog::NewTheme;
use vitrine_model::Theme;

use crate::auth::Principal;
use crate::error::ServerError;
use crate::state::AppState;

/// Body for `POST /api/themes/{id}/clone`.
#[derive(Debug, Deserialize)]
pub(crate) struct CloneThemeRequest {
    name: String,
}

/// `POST /api/themes` — add a theme to a site.
pub(crate) async fn create(
    State(state): State<Arc<AppState>>,
    _principal: Principal,
    Json(new): Json<NewTheme>,
) -> Result<(StatusCode, Json<Theme>), ServerError> {
    let theme = state.themes.create(new)?;
    Ok((StatusCode::CREATED, Json(theme)))
}

/// `GET /api/sites/{id}/themes` — themes of a site.
pub(crate) async fn list_by_site(
    State(state): State<Arc<AppState>>,
    Path(site): Path<Uuid>,
) -> Result<Json<Vec<Theme>>, ServerError> {
    Ok(Json(state.themes.list_by_site(site)?))
}

/// `DELETE /api/themes/{id}` — remove a non-default theme.
pub(crate) async fn delete(
    State(state): State<Arc<AppState>>,
    _principal: Principal,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.themes.delete(id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /api/themes/{id}/clone` — duplicate a theme as a non-default copy.
pub(crate) async fn clone(
    State(state): State<Arc<AppState>>,
    _principal: Principal,
    Path(id): Path<Uuid>,
    Json(body): Json<CloneThemeRequest>,
) -> Result<(StatusCode, Json<Theme>), ServerError> {
    let theme = state.themes.clone_theme(id, body.name)?;
    Ok((StatusCode::CREATED, Json(theme)))
}

/// `POST /api/themes/{id}/default` — promote a theme to site default.
pub(crate) async fn set_default(
    State(state): State<Arc<AppState>>,
    _principal: Principal,
    Path(id): Path<Uuid>,
) -> Result<Json<Theme>, ServerError> {
    Ok(Json(state.themes.set_default(id)?))
}
