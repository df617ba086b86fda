//! SQLite-backed store.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};

use crate::config::DatabaseConfig;
use crate::store::{Article, Store, StoreError, User};

pub struct SqliteStore {
    pool: SqlitePool,
    path: PathBuf,
}

impl SqliteStore {
    /// Open (creating if needed) the database file, create tables and seed
    /// the two demo articles.
    pub async fn open(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let path = PathBuf::from(&config.path);

        // Rollback journal keeps the store in a single file.
        let options = SqliteConnectOptions::new()
            .filename(&path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Delete);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options)
            .await?;

        let store = Self { pool, path };
        store.init().await?;

        tracing::info!(path = %store.path.display(), "Database initialized");
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn init(&self) -> Result<(), StoreError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS articles (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                content TEXT NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL UNIQUE,
                email TEXT NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "INSERT OR IGNORE INTO articles (id, title, content) VALUES
                (1, 'The Absence of Errors', 'Initial article content.'),
                (2, 'The Double Fallacy', 'Another crucial piece of the puzzle.')",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl Store for SqliteStore {
    async fn list_articles(&self) -> Result<Vec<Article>, StoreError> {
        let articles = sqlx::query_as::<_, Article>("SELECT id, title, content FROM articles")
            .fetch_all(&self.pool)
            .await?;
        Ok(articles)
    }

    async fn create_article(&self, title: &str, content: &str) -> Result<(), StoreError> {
        sqlx::query("INSERT INTO articles (title, content) VALUES (?, ?)")
            .bind(title)
            .bind(content)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete_article(&self, id: i64) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM articles WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn create_user(&self, name: &str, email: &str) -> Result<User, StoreError> {
        if self.find_user(name).await?.is_some() {
            return Err(StoreError::DuplicateUser(name.to_string()));
        }

        let result = sqlx::query("INSERT INTO users (name, email) VALUES (?, ?)")
            .bind(name)
            .bind(email)
            .execute(&self.pool)
            .await?;

        Ok(User {
            id: result.last_insert_rowid(),
            name: name.to_string(),
            email: email.to_string(),
        })
    }

    async fn find_user(&self, name: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>("SELECT id, name, email FROM users WHERE name = ?")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        let users = sqlx::query_as::<_, User>("SELECT id, name, email FROM users")
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }

    async fn remove_store_file(&self) -> Result<(), StoreError> {
        tokio::fs::remove_file(&self.path).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn open_temp() -> (tempfile::TempDir, SqliteStore) {
        let dir = tempfile::tempdir().unwrap();
        let config = DatabaseConfig {
            path: dir.path().join("test.db").to_string_lossy().into_owned(),
            max_connections: 1,
        };
        let store = SqliteStore::open(&config).await.unwrap();
        (dir, store)
    }

    #[tokio::test]
    async fn test_seeded_articles() {
        let (_dir, store) = open_temp().await;
        let articles = store.list_articles().await.unwrap();

        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].id, 1);
        assert_eq!(articles[0].title, "The Absence of Errors");
        assert_eq!(articles[1].title, "The Double Fallacy");
    }

    #[tokio::test]
    async fn test_create_and_delete_article() {
        let (_dir, store) = open_temp().await;
        store.create_article("Third", "Body").await.unwrap();

        let articles = store.list_articles().await.unwrap();
        let third = articles.iter().find(|a| a.title == "Third").unwrap();

        assert_eq!(store.delete_article(third.id).await.unwrap(), 1);
        assert_eq!(store.delete_article(third.id).await.unwrap(), 0);
        assert_eq!(store.list_articles().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_duplicate_user_rejected() {
        let (_dir, store) = open_temp().await;
        let user = store.create_user("billy", "billy@goat.farm").await.unwrap();
        assert_eq!(user.name, "billy");

        let err = store.create_user("billy", "other@goat.farm").await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateUser(ref n) if n == "billy"));

        assert_eq!(store.find_user("billy").await.unwrap(), Some(user));
        assert_eq!(store.list_users().await.unwrap().len(), 1);
        assert_eq!(store.find_user("nanny").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_remove_store_file() {
        let (_dir, store) = open_temp().await;
        assert!(store.path().exists());

        store.remove_store_file().await.unwrap();
        assert!(!store.path().exists());

        let err = store.remove_store_file().await.unwrap_err();
        assert!(matches!(err, StoreError::File(_)));
    }
}
