//! Request handlers.
//!
//! `goat` is the escalator entry point. The rest are the CRUD handlers whose
//! status codes are wrong on purpose.

pub mod articles;
pub mod goat;
pub mod health;
pub mod users;

use axum::response::Response;

use crate::http::response::{json, ApiResponse};
use crate::store::Article;

/// Unknown route. Answers 200 instead of 404.
pub fn not_found() -> Response {
    json(
        200,
        ApiResponse::<Article>::message("Try a different endpoint").with_error("Route not found"),
    )
}
