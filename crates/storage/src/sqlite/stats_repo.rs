use async_trait::async_trait;
use chrono::Utc;
use quiz_core::model::{QuizStatsSnapshot, STATS_SNAPSHOT_KEY};
use sqlx::Row;

use super::SqliteRepository;
use crate::repository::{StatsSnapshotRepository, StorageError, decode_snapshot, encode_snapshot};

fn conn<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Connection(e.to_string())
}

impl SqliteRepository {
    async fn get_entry(&self, key: &str) -> Result<Option<String>, StorageError> {
        let row = sqlx::query("SELECT value FROM kv_entries WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(conn)?;

        row.map(|row| {
            row.try_get::<String, _>("value")
                .map_err(|e| StorageError::Serialization(e.to_string()))
        })
        .transpose()
    }

    async fn put_entry(&self, key: &str, value: &str) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO kv_entries (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            ",
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(conn)?;
        Ok(())
    }
}

#[async_trait]
impl StatsSnapshotRepository for SqliteRepository {
    async fn load_snapshot(&self) -> Result<Option<QuizStatsSnapshot>, StorageError> {
        self.get_entry(STATS_SNAPSHOT_KEY)
            .await?
            .as_deref()
            .map(decode_snapshot)
            .transpose()
    }

    async fn save_snapshot(&self, snapshot: &QuizStatsSnapshot) -> Result<(), StorageError> {
        let encoded = encode_snapshot(snapshot)?;
        self.put_entry(STATS_SNAPSHOT_KEY, &encoded).await
    }
}
