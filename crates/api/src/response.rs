//! Shared response envelope types for API handlers.

use serde::Serialize;

/// `{ "success": true, "message": ... }` acknowledgement for operations that
/// return no entity data.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: &'static str,
}

impl MessageResponse {
    pub fn ok(message: &'static str) -> Self {
        Self {
            success: true,
            message,
        }
    }
}
