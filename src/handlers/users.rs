//! User handlers.
//!
//! Creation is "idempotent" in the unhelpful sense: a repeated name is
//! refused with 400. A malformed email is blamed on the server (500).

use axum::response::Response;

use crate::http::response::{database_error, json, ApiResponse};
use crate::http::server::AppState;
use crate::store::models::is_valid_email;
use crate::store::{NewUser, StoreError, User};

/// Create a user: 201 on success, 400 for a missing field or taken name,
/// 500 for a malformed email.
pub async fn create(state: &AppState, body: Option<&[u8]>) -> Response {
    let user = body.and_then(|bytes| serde_json::from_slice::<NewUser>(bytes).ok());
    let user = match user {
        Some(u) if !u.name.is_empty() && !u.email.is_empty() => u,
        _ => {
            return json(
                400,
                ApiResponse::<User>::message("Failed to create user. Both name and email are required.")
                    .with_error("INCORRECT_REQUEST"),
            );
        }
    };

    if !is_valid_email(&user.email) {
        return json(
            500,
            ApiResponse::<User>::message("internal server error")
                .with_error(format!("invalid email address '{}'", user.email)),
        );
    }

    match state.store.create_user(&user.name, &user.email).await {
        Ok(created) => {
            tracing::info!(id = created.id, name = %created.name, "User created");
            json(201, created)
        }
        Err(e @ StoreError::DuplicateUser(_)) => json(
            400,
            ApiResponse::<User>::message(e.to_string()).with_error("USER_EXISTS"),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Failed to create user");
            database_error()
        }
    }
}

/// List all users.
pub async fn list(state: &AppState) -> Response {
    match state.store.list_users().await {
        Ok(users) => json(200, ApiResponse::message("Users retrieved.").with_data(users)),
        Err(e) => {
            tracing::error!(error = %e, "Failed to list users");
            database_error()
        }
    }
}
