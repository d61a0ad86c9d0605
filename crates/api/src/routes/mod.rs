pub mod health;
pub mod resource;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /resources            GET search, POST create
/// /resources/{id}       GET by id, PUT update, DELETE
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/resources", resource::router())
}
