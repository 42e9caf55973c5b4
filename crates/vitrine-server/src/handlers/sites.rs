//! Site endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::Deserialize;
use uuid::Uuid;
use vitrine_catalog::{CascadeReport, NewSite, SitePatch, SiteView};
use vitrine_model::{MenuItem, Site};

use crate::auth::Principal;
use crate::error::ServerError;
use crate::notify::Notification;
use crate::state::AppState;

/// Body for `POST /api/sites`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateSiteRequest {
    name: String,
    domain: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    logo_url: Option<String>,
}

/// Body for `PUT /api/sites/{id}/status`.
#[derive(Debug, Deserialize)]
pub(crate) struct StatusRequest {
    status: String,
}

/// `POST /api/sites` — bootstrap a site with its starter theme and pages.
pub(crate) async fn create(
    State(state): State<Arc<AppState>>,
    principal: Principal,
    Json(body): Json<CreateSiteRequest>,
) -> Result<(StatusCode, Json<SiteView>), ServerError> {
    let new = NewSite {
        owner: principal.owner,
        name: body.name,
        domain: body.domain,
        description: body.description,
        logo_url: body.logo_url,
    };
    let view = state.orchestrator.create_site_with_defaults(new)?;

    // Welcome delivery is best-effort and must never delay the response.
    let domain = view.site.domain.as_deref().unwrap_or("");
    let note = Notification::welcome(principal.owner, &view.site.name, domain);
    let notifier = Arc::clone(&state.notifier);
    tokio::task::spawn_blocking(move || {
        if let Err(err) = notifier.deliver(&note) {
            tracing::warn!(error = %err, "welcome notification failed");
        }
    });

    Ok((StatusCode::CREATED, Json(view)))
}

/// `GET /api/sites` — all sites owned by the caller.
pub(crate) async fn list(
    State(state): State<Arc<AppState>>,
    principal: Principal,
) -> Result<Json<Vec<Site>>, ServerError> {
    let sites = state.registry.list_by_owner(principal.owner)?;
    Ok(Json(sites))
}

/// `GET /api/sites/{id}` — a site with its theme and pages joined in.
pub(crate) async fn get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<SiteView>, ServerError> {
    Ok(Json(state.registry.get_by_id(id)?))
}

/// `GET /api/sites/by-domain/{domain}` — domain-based lookup for renderers.
pub(crate) async fn get_by_domain(
    State(state): State<Arc<AppState>>,
    Path(domain): Path<String>,
) -> Result<Json<SiteView>, ServerError> {
    Ok(Json(state.registry.get_by_domain(&domain)?))
}

/// `PATCH /api/sites/{id}` — partial update.
pub(crate) async fn update(
    State(state): State<Arc<AppState>>,
    _principal: Principal,
    Path(id): Path<Uuid>,
    Json(patch): Json<SitePatch>,
) -> Result<Json<Site>, ServerError> {
    Ok(Json(state.registry.update(id, patch)?))
}

/// `DELETE /api/sites/{id}` — cascade delete, reporting what went away.
pub(crate) async fn delete(
    State(state): State<Arc<AppState>>,
    _principal: Principal,
    Path(id): Path<Uuid>,
) -> Result<Json<CascadeReport>, ServerError> {
    Ok(Json(state.orchestrator.delete_site_cascade(id)?))
}

/// `PUT /api/sites/{id}/menu` — replace the header menu wholesale.
pub(crate) async fn update_menu(
    State(state): State<Arc<AppState>>,
    _principal: Principal,
    Path(id): Path<Uuid>,
    Json(menu): Json<Vec<MenuItem>>,
) -> Result<Json<Site>, ServerError> {
    Ok(Json(state.registry.update_menu(id, menu)?))
}

/// `PUT /api/sites/{id}/status` — lifecycle transition.
pub(crate) async fn update_status(
    State(state): State<Arc<AppState>>,
    _principal: Principal,
    Path(id): Path<Uuid>,
    Json(body): Json<StatusRequest>,
) -> Result<Json<Site>, ServerError> {
    Ok(Json(state.registry.update_status(id, &body.status)?))
}
