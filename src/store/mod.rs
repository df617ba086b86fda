//! Persistence subsystem.
//!
//! # Data Flow
//! ```text
//! CRUD handlers ──list/create/delete──▶ Store ──▶ SQLite file
//! Escalator ─────remove_store_file────▶ Store ──▶ unlink(file)
//! ```
//!
//! # Design Decisions
//! - Handlers and the escalator only see the `Store` trait
//! - The escalator treats the backing file as an opaque named resource
//! - Store errors never reach clients verbatim

pub mod models;
pub mod sqlite;

use async_trait::async_trait;

pub use models::{Article, NewArticle, NewUser, User};
pub use sqlite::SqliteStore;

/// Errors raised by a store implementation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("user with name '{0}' already exists")]
    DuplicateUser(String),
    #[error("store file error: {0}")]
    File(#[from] std::io::Error),
}

/// Persistence collaborator consumed by the handlers and the escalator.
#[async_trait]
pub trait Store: Send + Sync {
    async fn list_articles(&self) -> Result<Vec<Article>, StoreError>;

    async fn create_article(&self, title: &str, content: &str) -> Result<(), StoreError>;

    /// Returns the number of rows removed.
    async fn delete_article(&self, id: i64) -> Result<u64, StoreError>;

    /// Fails with [`StoreError::DuplicateUser`] when the name is taken.
    async fn create_user(&self, name: &str, email: &str) -> Result<User, StoreError>;

    async fn find_user(&self, name: &str) -> Result<Option<User>, StoreError>;

    async fn list_users(&self) -> Result<Vec<User>, StoreError>;

    /// Delete the backing file itself.
    async fn remove_store_file(&self) -> Result<(), StoreError>;
}
