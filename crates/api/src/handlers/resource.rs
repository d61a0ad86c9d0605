//! Handlers for the `/resources` resource.
//!
//! The path id is parsed by [`ResourceId`] during extraction. Each handler then
//! validates its raw input and delegates to the service. Errors propagate
//! untouched to [`AppError`].
//!
//! [`AppError`]: crate::error::AppError
//! [`ResourceId`]: crate::extract::ResourceId

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use resource_core::resource::{validate_create, validate_update};
use resource_core::search::{validate_search, PageResult};
use resource_db::models::resource::ResourceView;

use crate::error::AppResult;
use crate::extract::{JsonInput, QueryInput, ResourceId};
use crate::response::MessageResponse;
use crate::state::AppState;

/// GET /api/v1/resources
pub async fn search(
    State(state): State<AppState>,
    QueryInput(query): QueryInput,
) -> AppResult<Json<PageResult<ResourceView>>> {
    let request = validate_search(&query)?;
    let page = state.resources.search(&request).await?;
    Ok(Json(page))
}

/// GET /api/v1/resources/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
) -> AppResult<Json<ResourceView>> {
    let resource = state.resources.get_by_id(id).await?;
    Ok(Json(resource))
}

/// POST /api/v1/resources
pub async fn create(
    State(state): State<AppState>,
    JsonInput(body): JsonInput,
) -> AppResult<(StatusCode, Json<ResourceView>)> {
    let request = validate_create(&body)?;
    let resource = state.resources.create(request).await?;
    Ok((StatusCode::CREATED, Json(resource)))
}

/// PUT /api/v1/resources/{id}
pub async fn update(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
    JsonInput(body): JsonInput,
) -> AppResult<Json<ResourceView>> {
    let request = validate_update(&body)?;
    let resource = state.resources.update(id, request).await?;
    Ok(Json(resource))
}

/// DELETE /api/v1/resources/{id}
pub async fn delete(
    State(state): State<AppState>,
    ResourceId(id): ResourceId,
) -> AppResult<Json<MessageResponse>> {
    state.resources.delete(id).await?;
    Ok(Json(MessageResponse::ok("Resource deleted successfully")))
}
