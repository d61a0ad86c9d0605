use axum::extract::OriginalUri;
use axum::http::Method;

use crate::error::AppError;

/// Fallback for requests no route accepts.
pub async fn route_not_found(method: Method, OriginalUri(uri): OriginalUri) -> AppError {
    AppError::RouteNotFound {
        method,
        path: uri.path().to_string(),
    }
}
