//! Response construction.
//!
//! Handlers pick status codes outside the registered ranges (666, 777, 888,
//! 999). `StatusCode::from_u16` accepts any three-digit code, so they are
//! written to the wire as given.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::store::Article;

/// Generic body used by the CRUD handlers. `message` is always present.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T = Article> {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<T>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            data: None,
            status: None,
            error: None,
        }
    }

    pub fn with_data(mut self, data: Vec<T>) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_status(mut self, status: &'static str) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }
}

/// JSON body with an arbitrary status code.
pub fn json<T: Serialize>(code: u16, body: T) -> Response {
    let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(body)).into_response()
}

pub fn method_not_allowed() -> Response {
    (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed").into_response()
}

pub fn database_error() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, "Database error").into_response()
}
