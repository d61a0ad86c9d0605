//! Request extractors feeding the validation layer.
//!
//! The body and query extractors hand raw, untyped input to the per-operation
//! schemas in `resource_core`. Failures are reported as field-level validation
//! errors so malformed requests get the same response shape as invalid ones.
//! [`ResourceId`] reports every unusable path segment as an invalid id.

use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use resource_core::error::CoreError;
use resource_core::resource::{parse_resource_id, MSG_INVALID_ID};
use resource_core::types::DbId;
use resource_core::validation::{FieldViolation, RawInput};
use serde_json::Value;

use crate::error::AppError;

/// Raw JSON object from the request body. An empty body reads as `{}`.
#[derive(Debug)]
pub struct JsonInput(pub RawInput);

/// Raw query-string parameters, every value as a JSON string.
#[derive(Debug)]
pub struct QueryInput(pub RawInput);

/// The `{id}` path segment, parsed as a resource id.
#[derive(Debug, Clone, Copy)]
pub struct ResourceId(pub DbId);

fn rejected(field: &str, message: impl Into<String>) -> AppError {
    AppError::Core(CoreError::Validation(vec![FieldViolation {
        field: field.to_string(),
        message: message.into(),
    }]))
}

/// Parse a request body into a JSON object.
pub fn parse_body(bytes: &[u8]) -> Result<RawInput, AppError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(RawInput::new());
    }
    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(rejected("body", "Request body must be a JSON object")),
        Err(err) => Err(rejected("body", format!("Request body must be valid JSON: {err}"))),
    }
}

impl<S> FromRequest<S> for JsonInput
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|err| rejected("body", err.body_text()))?;
        parse_body(&bytes).map(Self)
    }
}

impl<S> FromRequestParts<S> for QueryInput
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<HashMap<String, String>>::from_request_parts(parts, state)
            .await
            .map_err(|err| rejected("query", err.body_text()))?;
        Ok(Self(
            params
                .into_iter()
                .map(|(key, value)| (key, Value::String(value)))
                .collect(),
        ))
    }
}

impl<S> FromRequestParts<S> for ResourceId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| CoreError::InvalidInput(MSG_INVALID_ID.to_string()))?;
        Ok(Self(parse_resource_id(&raw)?))
    }
}
