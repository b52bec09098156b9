//! Mapping of repository outcomes onto HTTP error bodies.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::repository::UserError;

/// The user-facing operation a request performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Create,
    Get,
    Update,
    Delete,
}

impl Operation {
    /// Message returned for server-side failures. Never carries internals.
    pub fn failure_message(self) -> &'static str {
        match self {
            Operation::List => "Failed to get users",
            Operation::Create => "Failed to create user",
            Operation::Get => "Failed to get user",
            Operation::Update => "Failed to update user",
            Operation::Delete => "Failed to delete user",
        }
    }

    pub fn error(self, err: UserError) -> ApiError {
        let status =
            StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let message = match &err {
            UserError::Validation(e) => e.to_string(),
            UserError::NotFound(_) => "User not found".to_string(),
            _ => {
                tracing::error!(operation = ?self, error = %err, "request failed");
                self.failure_message().to_string()
            }
        };
        ApiError { status, message }
    }
}

/// An error response: status plus `{ "error": message }`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}
