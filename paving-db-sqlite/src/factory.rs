use async_trait::async_trait;

use paving_core::db::factory::{DbConfig, StoreFactory};
use paving_core::db::repository::{RateStore, RepositoryError};

use crate::repository::SqliteRateStore;

/// [`StoreFactory`] for SQLite.
///
/// Register this with a [`paving_core::db::StoreRegistry`] to make the
/// `"sqlite"` backend available:
///
/// ```rust,no_run
/// use paving_core::db::StoreRegistry;
/// use paving_db_sqlite::SqliteStoreFactory;
///
/// let mut registry = StoreRegistry::new();
/// registry.register(Box::new(SqliteStoreFactory));
/// ```
pub struct SqliteStoreFactory;

#[async_trait]
impl StoreFactory for SqliteStoreFactory {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    /// Opens the database described by `config.connection_string` and
    /// runs migrations.
    ///
    /// Accepted connection-string values:
    /// * A sqlx-style URL, e.g. `sqlite:paving.db?mode=rwc` (creates the
    ///   file if missing).
    /// * `sqlite::memory:` — an ephemeral in-memory database (useful for
    ///   tests).
    async fn create(&self, config: &DbConfig) -> Result<Box<dyn RateStore>, RepositoryError> {
        let store = SqliteRateStore::new(&config.connection_string)
            .await
            .map_err(|e| RepositoryError::Connection(e.to_string()))?;
        store
            .run_migrations()
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;
        Ok(Box::new(store))
    }
}

#[cfg(test)]
mod tests {
    use paving_core::db::factory::{DbConfig, StoreFactory};

    use super::SqliteStoreFactory;

    #[test]
    fn backend_name_is_sqlite() {
        assert_eq!(SqliteStoreFactory.backend_name(), "sqlite");
    }

    /// Full round-trip: factory to a migrated in-memory store.
    #[tokio::test]
    async fn creates_in_memory_store() {
        let config = DbConfig {
            backend: "sqlite".to_string(),
            connection_string: "sqlite::memory:".to_string(),
        };

        let result = SqliteStoreFactory.create(&config).await;

        assert!(
            result.is_ok(),
            "failed to create in-memory store: {:#?}",
            result.err()
        );
    }
}
