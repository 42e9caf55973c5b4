//! Page endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::Deserialize;
use uuid::Uuid;
use vitrine_catalog::{NewPage, PageList, PagePatch};
use vitrine_model::Page;

use crate::auth::Principal;
use crate::error::ServerError;
use crate::state::AppState;

/// Body for `POST /api/pages/{id}/clone`.
#[derive(Debug, Deserialize)]
pub(crate) struct ClonePageRequest {
    name: String,
    path: String,
}

/// `POST /api/pages` — add a page to a site.
pub(crate) async fn create(
    State(state): State<Arc<AppState>>,
    _principal: Principal,
    Json(new): Json<NewPage>,
) -> Result<(StatusCode, Json<Page>), ServerError> {
    let page = state.pages.create(new)?;
    Ok((StatusCode::CREATED, Json(page)))
}

/// `GET /api/sites/{id}/pages` — pages of a site, newest first.
pub(crate) async fn list_by_site(
    State(state): State<Arc<AppState>>,
    Path(site): Path<Uuid>,
) -> Result<Json<PageList>, ServerError> {
    Ok(Json(state.pages.list_by_site(site)?))
}

/// `PATCH /api/pages/{id}` — partial update.
pub(crate) async fn update(
    State(state): State<Arc<AppState>>,
    _principal: Principal,
    Path(id): Path<Uuid>,
    Json(patch): Json<PagePatch>,
) -> Result<Json<Page>, ServerError> {
    Ok(Json(state.pages.update(id, patch)?))
}

/// `DELETE /api/pages/{id}` — remove a non-default page.
pub(crate) async fn delete(
    State(state): State<Arc<AppState>>,
    _principal: Principal,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.pages.delete(id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /api/pages/{id}/clone` — duplicate a page under a new path.
pub(crate) async fn clone(
    State(state): State<Arc<AppState>>,
    _principal: Principal,
    Path(id): Path<Uuid>,
    Json(body): Json<ClonePageRequest>,
) -> Result<(StatusCode, Json<Page>), ServerError> {
    let page = state.pages.clone_page(id, body.name, body.path)?;
    Ok((StatusCode::CREATED, Json(page)))
}

/// `POST /api/pages/{id}/publish` — toggle the published flag.
pub(crate) async fn publish(
    State(state): State<Arc<AppState>>,
    _principal: Principal,
    Path(id): Path<Uuid>,
) -> Result<Json<Page>, ServerError> {
    Ok(Json(state.pages.toggle_published(id)?))
}
