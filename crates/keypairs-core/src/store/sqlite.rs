// ABOUTME: SQLite persistence for keypairs via sqlx
// ABOUTME: Uniqueness of (user_id, name) is enforced by the primary key, not by a prior read

use super::{duplicate, not_found, KeypairStore, Result};
use crate::error::StoreError;
use crate::model::Keypair;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteRow};
use sqlx::{Pool, Row, Sqlite};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, warn};

/// Keypair store backed by SQLite
#[derive(Clone)]
pub struct SqliteKeypairStore {
    pool: Pool<Sqlite>,
}

impl SqliteKeypairStore {
    /// Open or create the store at the given path
    pub async fn open(path: &Path) -> Result<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::CreateDirectory {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let url = format!("sqlite:{}?mode=rwc", path.display());
        let options = SqliteConnectOptions::from_str(&url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.init_schema().await?;
        debug!(path = %path.display(), "Keypair store opened");
        Ok(store)
    }

    /// Initialize database schema
    async fn init_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS key_pairs (
                user_id TEXT NOT NULL,
                name TEXT NOT NULL,
                public_key TEXT NOT NULL,
                fingerprint TEXT NOT NULL,
                created_at TEXT NOT NULL,
                PRIMARY KEY (user_id, name)
            )
            "#,
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Close the pool, waiting for connections to finish.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

fn row_to_keypair(row: &SqliteRow) -> Keypair {
    let user_id: String = row.get("user_id");
    let name: String = row.get("name");
    let created_str: String = row.get("created_at");
    let created_at = parse_created_at(&created_str).unwrap_or_else(|| {
        warn!(
            user_id = %user_id,
            name = %name,
            created_at = %created_str,
            "Unparseable created_at in key_pairs row, substituting current time"
        );
        Utc::now()
    });
    Keypair {
        user_id,
        name,
        public_key: row.get("public_key"),
        fingerprint: row.get("fingerprint"),
        created_at,
    }
}

fn parse_created_at(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[async_trait]
impl KeypairStore for SqliteKeypairStore {
    async fn get(&self, user_id: &str, name: &str) -> Result<Keypair> {
        let row = sqlx::query(
            "SELECT user_id, name, public_key, fingerprint, created_at FROM key_pairs WHERE user_id = ? AND name = ?",
        )
        .bind(user_id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref()
            .map(row_to_keypair)
            .ok_or_else(|| not_found(user_id, name))
    }

    async fn list(&self, user_id: &str) -> Result<Vec<Keypair>> {
        let rows = sqlx::query(
            "SELECT user_id, name, public_key, fingerprint, created_at FROM key_pairs WHERE user_id = ? ORDER BY name",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(row_to_keypair).collect())
    }

    async fn create(&self, keypair: &Keypair) -> Result<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO key_pairs (user_id, name, public_key, fingerprint, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&keypair.user_id)
        .bind(&keypair.name)
        .bind(&keypair.public_key)
        .bind(&keypair.fingerprint)
        .bind(keypair.created_at.to_rfc3339())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(duplicate(keypair))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&self, user_id: &str, name: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM key_pairs WHERE user_id = ? AND name = ?")
            .bind(user_id)
            .bind(name)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found(user_id, name));
        }
        Ok(())
    }

    async fn count(&self, user_id: &str) -> Result<usize> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM key_pairs WHERE user_id = ?")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count.max(0) as usize)
    }
}
