use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use tracing::info;

use super::KeyValueStore;
use crate::{config::StorageSettings, models::Result};

/// Key/value store backed by a single SQLite table.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections.max(1))
            .connect_with(options)
            .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS kv_store (
                key TEXT PRIMARY KEY NOT NULL,
                value TEXT NOT NULL
            )",
        )
        .execute(&pool)
        .await?;

        info!("Opened key/value store at {}", url);
        Ok(Self { pool })
    }

    pub async fn from_settings(settings: &StorageSettings) -> Result<Self> {
        Self::connect(&settings.url, settings.max_connections).await
    }

    /// Private in-memory database. Limited to one connection so every query
    /// sees the same data.
    pub async fn in_memory() -> Result<Self> {
        Self::connect("sqlite::memory:", 1).await
    }
}

#[async_trait]
impl KeyValueStore for SqliteStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let value = sqlx::query_scalar::<_, String>("SELECT value FROM kv_store WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query(
            "INSERT INTO kv_store (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        sqlx::query("DELETE FROM kv_store WHERE key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sqlite_store_upserts() {
        let store = SqliteStore::in_memory().await.unwrap();
        assert_eq!(store.get("claimed_fid_1").await.unwrap(), None);

        store.set("claimed_fid_1", "true").await.unwrap();
        store.set("claimed_fid_1", "false").await.unwrap();
        assert_eq!(store.get("claimed_fid_1").await.unwrap().as_deref(), Some("false"));

        store.remove("claimed_fid_1").await.unwrap();
        assert_eq!(store.get("claimed_fid_1").await.unwrap(), None);
    }
}
