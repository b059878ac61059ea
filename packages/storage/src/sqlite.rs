// ABOUTME: SQLite-backed document store
// ABOUTME: Stores one JSON document per path; read-modify-write runs inside a transaction

use std::path::Path;
use std::str::FromStr;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Row;
use tracing::{debug, info};

use crate::document::{
    apply_field_updates, deep_merge, into_document, resolve_sentinels, Document, SetOptions,
    WriteResult,
};
use crate::error::{StoreError, StoreResult};
use crate::path::DocumentPath;
use crate::store::DocumentStore;

pub struct SqliteDocumentStore {
    pool: SqlitePool,
}

impl SqliteDocumentStore {
    /// Open (creating if needed) a database file and run migrations
    pub async fn open(database_path: &Path, max_connections: u32) -> StoreResult<Self> {
        // Ensure parent directory exists
        if let Some(parent) = database_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        info!("Opening SQLite document store at: {:?}", database_path);

        let options = SqliteConnectOptions::new()
            .filename(database_path)
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections.max(1))
            .acquire_timeout(std::time::Duration::from_secs(30))
            .connect_with(options)
            .await?;

        sqlx::query("PRAGMA journal_mode = WAL")
            .execute(&pool)
            .await?;

        Self::from_pool(pool).await
    }

    /// Private in-memory database (single connection so all queries share it)
    pub async fn in_memory() -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str(":memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        Self::from_pool(pool).await
    }

    /// Wrap an existing pool, running migrations first
    pub async fn from_pool(pool: SqlitePool) -> StoreResult<Self> {
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    fn decode(path: &DocumentPath, data: &str) -> StoreResult<Document> {
        let value: serde_json::Value = serde_json::from_str(data)?;
        into_document(value).map_err(|e| {
            StoreError::InvalidDocument(format!("{} at {}", e, path))
        })
    }
}

#[async_trait]
impl DocumentStore for SqliteDocumentStore {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    async fn get(&self, path: &DocumentPath) -> StoreResult<Option<Document>> {
        debug!("sqlite get {}", path);

        let row = sqlx::query("SELECT data FROM documents WHERE path = ?")
            .bind(path.to_string())
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => {
                let data: String = row.try_get("data")?;
                Ok(Some(Self::decode(path, &data)?))
            }
            None => Ok(None),
        }
    }

    async fn set(
        &self,
        path: &DocumentPath,
        mut doc: Document,
        options: SetOptions,
    ) -> StoreResult<WriteResult> {
        debug!("sqlite set {} (merge: {})", path, options.merge);

        let write_time = Utc::now();
        resolve_sentinels(&mut doc, write_time);
        let key = path.to_string();
        let stamp = write_time.to_rfc3339();

        let mut tx = self.pool.begin().await?;

        if options.merge {
            let existing = sqlx::query("SELECT data FROM documents WHERE path = ?")
                .bind(&key)
                .fetch_optional(&mut *tx)
                .await?;
            if let Some(row) = existing {
                let data: String = row.try_get("data")?;
                let mut merged = Self::decode(path, &data)?;
                deep_merge(&mut merged, doc);
                doc = merged;
            }
        }

        let json = serde_json::to_string(&doc)?;
        sqlx::query(
            r#"
            INSERT INTO documents (path, data, created_at, updated_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(path) DO UPDATE SET
                data = excluded.data,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(&key)
        .bind(&json)
        .bind(&stamp)
        .bind(&stamp)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(WriteResult { write_time })
    }

    async fn update(&self, path: &DocumentPath, mut partial: Document) -> StoreResult<WriteResult> {
        debug!("sqlite update {}", path);

        let write_time = Utc::now();
        resolve_sentinels(&mut partial, write_time);
        let key = path.to_string();

        let mut tx = self.pool.begin().await?;

        let row = sqlx::query("SELECT data FROM documents WHERE path = ?")
            .bind(&key)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| StoreError::NotFound(key.clone()))?;

        let data: String = row.try_get("data")?;
        let mut existing = Self::decode(path, &data)?;
        apply_field_updates(&mut existing, partial)?;

        sqlx::query("UPDATE documents SET data = ?, updated_at = ? WHERE path = ?")
            .bind(serde_json::to_string(&existing)?)
            .bind(write_time.to_rfc3339())
            .bind(&key)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(WriteResult { write_time })
    }
}
