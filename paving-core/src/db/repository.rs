use async_trait::async_trait;
use thiserror::Error;
use tracing::warn;

use crate::models::{JobType, RateConfig, RateRecord};

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Configuration slot not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Persistent storage for per-job-type rate configurations.
///
/// A slot holds one flat record of named decimal strings. Saves replace
/// the slot wholesale; there is no per-key update, matching the
/// copy-and-update lifecycle of the in-memory configuration.
#[async_trait]
pub trait RateStore: Send + Sync {
    /// The saved record for a job type, or `None` if nothing was saved.
    async fn load_rates(&self, job_type: JobType) -> Result<Option<RateRecord>, RepositoryError>;

    /// Replaces the job type's slot with `record`.
    async fn save_rates(
        &self,
        job_type: JobType,
        record: &RateRecord,
    ) -> Result<(), RepositoryError>;

    /// Removes the job type's slot entirely.
    async fn delete_rates(&self, job_type: JobType) -> Result<(), RepositoryError>;

    /// Slot keys currently present in the store.
    async fn list_slots(&self) -> Result<Vec<String>, RepositoryError>;
}

/// Loads a job type's rates, falling back to the built-in defaults.
///
/// A saved record is merged over the defaults so that keys added after
/// the record was saved still resolve. Load failures are logged and
/// swallowed: configuration I/O must never block a calculation.
pub async fn load_rates_or_default(store: &dyn RateStore, job_type: JobType) -> RateConfig {
    let mut rates = RateConfig::defaults(job_type);
    match store.load_rates(job_type).await {
        Ok(Some(record)) => rates.merge_record(&record),
        Ok(None) => {}
        Err(error) => {
            warn!(%job_type, %error, "failed to load saved rates, using built-in defaults");
        }
    }
    rates
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use crate::models::keys;

    use super::*;

    /// Store stub driven by a canned response; an error string becomes a
    /// database error.
    struct StubStore {
        response: Result<Option<RateRecord>, String>,
    }

    #[async_trait]
    impl RateStore for StubStore {
        async fn load_rates(
            &self,
            _job_type: JobType,
        ) -> Result<Option<RateRecord>, RepositoryError> {
            match &self.response {
                Ok(record) => Ok(record.clone()),
                Err(msg) => Err(RepositoryError::Database(msg.clone())),
            }
        }

        async fn save_rates(
            &self,
            _job_type: JobType,
            _record: &RateRecord,
        ) -> Result<(), RepositoryError> {
            unimplemented!()
        }

        async fn delete_rates(&self, _job_type: JobType) -> Result<(), RepositoryError> {
            unimplemented!()
        }

        async fn list_slots(&self) -> Result<Vec<String>, RepositoryError> {
            unimplemented!()
        }
    }

    #[tokio::test]
    async fn missing_slot_yields_defaults() {
        let store = StubStore { response: Ok(None) };

        let rates = load_rates_or_default(&store, JobType::RemoveReplace).await;

        assert_eq!(rates, RateConfig::defaults(JobType::RemoveReplace));
    }

    #[tokio::test]
    async fn saved_record_merges_over_defaults() {
        let mut record = RateRecord::new();
        record.insert(keys::PRICE_PER_TON.to_string(), "120".to_string());
        let store = StubStore {
            response: Ok(Some(record)),
        };

        let rates = load_rates_or_default(&store, JobType::RemoveReplace).await;

        assert_eq!(rates.rate(keys::PRICE_PER_TON), dec!(120));
        assert_eq!(rates.rate(keys::TRUCKING_IN_COST_PER_TON), dec!(10));
    }

    #[tokio::test]
    async fn load_failure_falls_back_to_defaults() {
        let store = StubStore {
            response: Err("disk on fire".to_string()),
        };

        let rates = load_rates_or_default(&store, JobType::Extras).await;

        assert_eq!(rates, RateConfig::defaults(JobType::Extras));
    }
}
