#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use resource_db::repositories::{InMemoryResourceRepo, ResourceRepository};
use tower::ServiceExt;

use resource_api::config::ServerConfig;
use resource_api::router::build_app_router;
use resource_api::services::ResourceService;
use resource_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        ..ServerConfig::default()
    }
}

/// Build the full application router (same middleware stack as production)
/// over the given repository.
pub fn build_app_with_repo(repo: Arc<dyn ResourceRepository>) -> Router {
    let state = AppState {
        resources: ResourceService::new(repo),
        config: Arc::new(test_config()),
    };
    build_app_router(state)
}

/// Build the application over a fresh in-memory store.
///
/// The returned repository handle shares data with the router, so a test can
/// build several routers over the same store.
pub fn build_test_app() -> (Router, InMemoryResourceRepo) {
    let repo = InMemoryResourceRepo::new();
    (build_app_with_repo(Arc::new(repo.clone())), repo)
}

pub fn app_for(repo: &InMemoryResourceRepo) -> Router {
    build_app_with_repo(Arc::new(repo.clone()))
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Request::delete(uri).body(Body::empty()).unwrap()).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, "POST", uri, body).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, "PUT", uri, body).await
}

pub async fn send_raw(app: Router, method: &str, uri: &str, body: &'static str) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

async fn send_json(app: Router, method: &str, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

/// Read a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Create a resource through the API and return its id.
pub async fn create_resource(repo: &InMemoryResourceRepo, body: serde_json::Value) -> i64 {
    let response = post_json(app_for(repo), "/api/v1/resources", body).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}
