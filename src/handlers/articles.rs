//! Article handlers. Every success and failure uses the wrong status code.

use axum::response::Response;

use crate::http::response::{database_error, json, ApiResponse};
use crate::http::server::AppState;
use crate::store::{Article, NewArticle};

/// Instead of 200.
pub const RETRIEVED: u16 = 777;
/// Instead of 201.
pub const CREATED: u16 = 888;
/// Instead of 400.
pub const REJECTED: u16 = 999;
/// Instead of 404.
pub const NOTHING_DELETED: u16 = 666;
/// Instead of 400, for a non-numeric id.
pub const BAD_ID: u16 = 500;

/// List all articles with 777. `data` is omitted when there are none.
pub async fn list(state: &AppState) -> Response {
    match state.store.list_articles().await {
        Ok(articles) => {
            let mut body = ApiResponse::message("Data successfully retrieved!");
            if !articles.is_empty() {
                body = body.with_data(articles);
            }
            json(RETRIEVED, body)
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to list articles");
            database_error()
        }
    }
}

/// `body` is `None` when the body could not be read (e.g. over the size limit).
pub async fn create(state: &AppState, body: Option<&[u8]>) -> Response {
    let article = body.and_then(|bytes| serde_json::from_slice::<NewArticle>(bytes).ok());
    let article = match article {
        Some(a) if !a.title.is_empty() && !a.content.is_empty() => a,
        _ => {
            return json(
                REJECTED,
                ApiResponse::<Article>::message("")
                    .with_status("INCORRECT_REQUEST")
                    .with_error("Failed to add article. Both title and content are required."),
            );
        }
    };

    match state.store.create_article(&article.title, &article.content).await {
        Ok(()) => json(
            CREATED,
            ApiResponse::<Article>::message("New article added.").with_status("OK"),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Failed to create article");
            database_error()
        }
    }
}

/// Delete by numeric id: 200 when removed, 666 when absent, 500 for a
/// non-numeric id.
pub async fn delete(state: &AppState, id: &str) -> Response {
    let id: i64 = match id.parse() {
        Ok(id) => id,
        Err(_) => {
            return json(
                BAD_ID,
                ApiResponse::<Article>::message(
                    "Invalid input. We can only delete articles by their numeric ID.",
                )
                .with_error("We're not even going to check for that. Something went wrong on our end."),
            );
        }
    };

    match state.store.delete_article(id).await {
        Ok(0) => json(
            NOTHING_DELETED,
            ApiResponse::<Article>::message("No evil articles found to remove.")
                .with_status("FAILURE"),
        ),
        Ok(_) => json(
            200,
            ApiResponse::<Article>::message(format!("Article with id {} has been removed.", id))
                .with_status("SUCCESS"),
        ),
        Err(e) => {
            tracing::error!(error = %e, id, "Failed to delete article");
            database_error()
        }
    }
}
