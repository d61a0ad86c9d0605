use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use resource_core::error::CoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`], which makes it the single place where an
/// internal error becomes a wire response.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `resource_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A storage failure reported by the repository.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// No route matched the request.
    #[error("Route {method} {path} not found")]
    RouteNotFound { method: Method, path: String },

    /// The request did not finish within the configured timeout.
    #[error("Request timed out")]
    RequestTimeout,

    /// Anything else that went wrong while serving the request.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            // --- CoreError variants ---
            AppError::Core(CoreError::Validation(errors)) => {
                tracing::debug!(?errors, "Request failed validation");
                (
                    StatusCode::BAD_REQUEST,
                    json!({
                        "success": false,
                        "message": "Validation error",
                        "errors": errors,
                    }),
                )
            }
            AppError::Core(CoreError::InvalidInput(msg)) => (
                StatusCode::BAD_REQUEST,
                json!({ "success": false, "message": msg }),
            ),
            AppError::Core(CoreError::NotFound { entity, id }) => {
                tracing::debug!(entity = *entity, id = *id, "Entity not found");
                (
                    StatusCode::NOT_FOUND,
                    json!({ "success": false, "message": self.to_string() }),
                )
            }

            // --- Routing ---
            AppError::RouteNotFound { .. } => (
                StatusCode::NOT_FOUND,
                json!({ "success": false, "message": self.to_string() }),
            ),

            AppError::RequestTimeout => {
                tracing::warn!("Request timed out");
                (
                    StatusCode::REQUEST_TIMEOUT,
                    json!({ "success": false, "message": self.to_string() }),
                )
            }

            // --- Unexpected ---
            AppError::Database(err) => {
                tracing::error!(error = %err, "Database error");
                internal(err.to_string())
            }
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal(msg.clone())
            }
        };

        (status, axum::Json(body)).into_response()
    }
}

fn internal(detail: String) -> (StatusCode, serde_json::Value) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({
            "success": false,
            "message": "Internal server error",
            "error": detail,
        }),
    )
}
