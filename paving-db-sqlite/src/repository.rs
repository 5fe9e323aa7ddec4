use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Row, sqlite::SqlitePool};
use tracing::debug;

use paving_core::db::repository::{RateStore, RepositoryError};
use paving_core::models::{JobType, RateRecord};

/// SQLite-backed [`RateStore`].
///
/// Each configuration slot is a set of `(slot, rate_key, rate_value)`
/// rows with the value kept as decimal text, so a saved record loads
/// back byte-for-byte. Saves replace the slot wholesale inside a
/// transaction.
pub struct SqliteRateStore {
    pool: SqlitePool,
}

impl SqliteRateStore {
    pub async fn new(database_url: &str) -> Result<Self> {
        let pool = SqlitePool::connect(database_url)
            .await
            .with_context(|| format!("Failed to connect to database: {}", database_url))?;
        Ok(Self { pool })
    }

    pub fn new_with_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to run database migrations")?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl RateStore for SqliteRateStore {
    async fn load_rates(&self, job_type: JobType) -> Result<Option<RateRecord>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT rate_key, rate_value FROM rate_configs WHERE slot = ? ORDER BY rate_key",
        )
        .bind(job_type.slot_key())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        if rows.is_empty() {
            return Ok(None);
        }

        let mut record = RateRecord::new();
        for row in rows {
            let key: String = row
                .try_get("rate_key")
                .map_err(|e| RepositoryError::Database(e.to_string()))?;
            let value: String = row
                .try_get("rate_value")
                .map_err(|e| RepositoryError::Database(e.to_string()))?;
            record.insert(key, value);
        }

        debug!(slot = job_type.slot_key(), entries = record.len(), "loaded rate record");
        Ok(Some(record))
    }

    async fn save_rates(
        &self,
        job_type: JobType,
        record: &RateRecord,
    ) -> Result<(), RepositoryError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        // Replace the slot wholesale so stale keys never linger.
        sqlx::query("DELETE FROM rate_configs WHERE slot = ?")
            .bind(job_type.slot_key())
            .execute(&mut *tx)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        let updated_at = Utc::now().to_rfc3339();
        for (key, value) in record {
            sqlx::query(
                "INSERT INTO rate_configs (slot, rate_key, rate_value, updated_at)
                 VALUES (?, ?, ?, ?)",
            )
            .bind(job_type.slot_key())
            .bind(key)
            .bind(value)
            .bind(&updated_at)
            .execute(&mut *tx)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;
        }

        tx.commit()
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        debug!(slot = job_type.slot_key(), entries = record.len(), "saved rate record");
        Ok(())
    }

    async fn delete_rates(&self, job_type: JobType) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM rate_configs WHERE slot = ?")
            .bind(job_type.slot_key())
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;
        Ok(())
    }

    async fn list_slots(&self) -> Result<Vec<String>, RepositoryError> {
        let rows = sqlx::query("SELECT DISTINCT slot FROM rate_configs ORDER BY slot")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        rows.iter()
            .map(|row| {
                row.try_get("slot")
                    .map_err(|e| RepositoryError::Database(e.to_string()))
            })
            .collect()
    }
}
