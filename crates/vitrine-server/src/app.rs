//! Router construction.
//!
//! Builds the axum router with all routes and middleware.

use std::sync::Arc;

use axum::Router;
use axum::routing::{delete, get, patch, post, put};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Create the application router.
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    let site_routes = Router::new()
        .route("/api/sites", post(handlers::sites::create).get(handlers::sites::list))
        .route(
            "/api/sites/{id}",
            get(handlers::sites::get)
                .patch(handlers::sites::update)
                .delete(handlers::sites::delete),
        )
        .route("/api/sites/by-domain/{domain}", get(handlers::sites::get_by_domain))
        .route("/api/sites/{id}/menu", put(handlers::sites::update_menu))
        .route("/api/sites/{id}/status", put(handlers::sites::update_status))
        .route("/api/sites/{id}/pages", get(handlers::pages::list_by_site))
        .route("/api/sites/{id}/themes", get(handlers::themes::list_by_site));

    let page_routes = Router::new()
        .route("/api/pages", post(handlers::pages::create))
        .route(
            "/api/pages/{id}",
            patch(handlers::pages::update).delete(handlers::pages::delete),
        )
        .route("/api/pages/{id}/clone", post(handlers::pages::clone))
        .route("/api/pages/{id}/publish", post(handlers::pages::publish));

    let theme_routes = Router::new()
        .route("/api/themes", post(handlers::themes::create))
        .route("/api/themes/{id}", delete(handlers::themes::delete))
        .route("/api/themes/{id}/clone", post(handlers::themes::clone))
        .route("/api/themes/{id}/default", post(handlers::themes::set_default));

    Router::new()
        .merge(site_routes)
        .merge(page_routes)
        .merge(theme_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};
    use tower::ServiceExt;
    use uuid::Uuid;
    use vitrine_catalog::{PageCatalog, SiteOrchestrator, SiteRegistry, ThemeCatalog};
    use vitrine_store::Stores;

    use super::*;
    use crate::auth::BearerPrincipalSupplier;
    use crate::notify::LogNotifier;

    fn test_state() -> Arc<AppState> {
        let stores = Stores::in_memory();
        let registry = Arc::new(SiteRegistry::new(
            Arc::clone(&stores.sites),
            Arc::clone(&stores.themes),
            Arc::clone(&stores.pages),
        ));
        let themes = Arc::new(ThemeCatalog::new(Arc::clone(&stores.themes)));
        let pages = Arc::new(PageCatalog::new(Arc::clone(&stores.pages)));
        let orchestrator =
            SiteOrchestrator::new(Arc::clone(&registry), Arc::clone(&themes), Arc::clone(&pages));

        Arc::new(AppState {
            registry,
            themes,
            pages,
            orchestrator,
            principals: Arc::new(BearerPrincipalSupplier),
            notifier: Arc::new(LogNotifier),
        })
    }

    fn post_json(uri: &str, owner: Uuid, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {owner}"))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn create_site_returns_201_with_defaults() {
        let router = create_router(test_state());
        let owner = Uuid::new_v4();

        let response = router
            .oneshot(post_json(
                "/api/sites",
                owner,
                json!({ "name": "Atelier", "domain": "atelier.example.com" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        assert_eq!(body["name"], "Atelier");
        assert_eq!(body["pages"].as_array().unwrap().len(), 4);
        assert_eq!(body["themeDetail"]["isDefault"], true);
    }

    #[tokio::test]
    async fn create_site_without_credentials_is_401() {
        let router = create_router(test_state());

        let request = Request::builder()
            .method("POST")
            .uri("/api/sites")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                json!({ "name": "Atelier", "domain": "atelier.example.com" }).to_string(),
            ))
            .unwrap();

        let response = router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn duplicate_domain_is_409() {
        let state = test_state();
        let router = create_router(Arc::clone(&state));
        let owner = Uuid::new_v4();

        let first = router
            .clone()
            .oneshot(post_json(
                "/api/sites",
                owner,
                json!({ "name": "One", "domain": "shared.example.com" }),
            ))
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::CREATED);

        let second = router
            .oneshot(post_json(
                "/api/sites",
                owner,
                json!({ "name": "Two", "domain": "shared.example.com" }),
            ))
            .await
            .unwrap();
        assert_eq!(second.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn invalid_domain_is_422() {
        let router = create_router(test_state());

        let response = router
            .oneshot(post_json(
                "/api/sites",
                Uuid::new_v4(),
                json!({ "name": "Bad", "domain": "Not A Domain" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn unknown_site_is_404() {
        let router = create_router(test_state());

        let request = Request::builder()
            .uri(format!("/api/sites/{}", Uuid::new_v4()))
            .body(Body::empty())
            .unwrap();

        let response = router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn delete_site_reports_cascade() {
        let state = test_state();
        let router = create_router(Arc::clone(&state));
        let owner = Uuid::new_v4();

        let created = router
            .clone()
            .oneshot(post_json(
                "/api/sites",
                owner,
                json!({ "name": "Gone", "domain": "gone.example.com" }),
            ))
            .await
            .unwrap();
        let id = body_json(created).await["id"].as_str().unwrap().to_owned();

        let request = Request::builder()
            .method("DELETE")
            .uri(format!("/api/sites/{id}"))
            .header(header::AUTHORIZATION, format!("Bearer {owner}"))
            .body(Body::empty())
            .unwrap();
        let response = router.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let report = body_json(response).await;
        assert_eq!(report["pagesRemoved"], 4);
        assert_eq!(report["themesRemoved"], 1);
    }

    #[tokio::test]
    async fn deleting_default_page_is_409() {
        let state = test_state();
        let router = create_router(Arc::clone(&state));
        let owner = Uuid::new_v4();

        let created = router
            .clone()
            .oneshot(post_json(
                "/api/sites",
                owner,
                json!({ "name": "Guarded", "domain": "guarded.example.com" }),
            ))
            .await
            .unwrap();
        let body = body_json(created).await;
        let default_page = body["pages"]
            .as_array()
            .unwrap()
            .iter()
            .find(|p| p["isDefault"] == true)
            .unwrap()["id"]
            .as_str()
            .unwrap()
            .to_owned();

        let request = Request::builder()
            .method("DELETE")
            .uri(format!("/api/pages/{default_page}"))
            .header(header::AUTHORIZATION, format!("Bearer {owner}"))
            .body(Body::empty())
            .unwrap();
        let response = router.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::CONFLICT);
    }
}
