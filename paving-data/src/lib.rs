//! Rate-sheet tooling: CSV import/export for the rate configuration
//! store, plus first-run seeding of the built-in defaults.
//!
//! A rate sheet is a CSV with the columns `job_type,rate_key,rate_value`
//! where `job_type` is a job slug (`remove-replace`, `extras`, ...) and
//! `rate_value` must parse as a decimal. Imports overlay the sheet's
//! rows onto each job type's current record (saved record if present,
//! built-in defaults otherwise) and save the result wholesale.

use std::collections::BTreeMap;
use std::io::{Read, Write};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use paving_core::db::repository::{RateStore, RepositoryError};
use paving_core::models::{JobType, RateConfig};

/// Errors that can occur when handling rate sheets.
#[derive(Debug, Error)]
pub enum RateSheetError {
    #[error("CSV error: {0}")]
    Csv(String),

    #[error("Unknown job type '{0}' (expected a job slug such as 'remove-replace')")]
    UnknownJobType(String),

    #[error("Invalid decimal value '{value}' for rate '{key}'")]
    InvalidValue { key: String, value: String },

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

impl From<csv::Error> for RateSheetError {
    fn from(err: csv::Error) -> Self {
        RateSheetError::Csv(err.to_string())
    }
}

/// A single row of a rate sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateSheetRecord {
    pub job_type: String,
    pub rate_key: String,
    pub rate_value: String,
}

/// Parser/loader for CSV rate sheets. Works against any [`RateStore`]
/// backend.
pub struct RateSheetLoader;

impl RateSheetLoader {
    /// Parses and validates rate sheet rows from a CSV reader.
    ///
    /// Every row must name a known job type and carry a decimal value;
    /// the first offending row aborts the parse so a bad sheet is never
    /// half-applied.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<RateSheetRecord>, RateSheetError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: RateSheetRecord = result?;
            if JobType::parse(&record.job_type).is_none() {
                return Err(RateSheetError::UnknownJobType(record.job_type));
            }
            if record.rate_value.trim().parse::<Decimal>().is_err() {
                return Err(RateSheetError::InvalidValue {
                    key: record.rate_key,
                    value: record.rate_value,
                });
            }
            records.push(record);
        }

        Ok(records)
    }

    /// Applies rate sheet rows to the store. Returns the number of rows
    /// applied.
    pub async fn load(
        store: &dyn RateStore,
        records: &[RateSheetRecord],
    ) -> Result<usize, RateSheetError> {
        let mut grouped: BTreeMap<&str, Vec<&RateSheetRecord>> = BTreeMap::new();
        for record in records {
            grouped.entry(record.job_type.as_str()).or_default().push(record);
        }

        let mut applied = 0;
        for (slug, rows) in grouped {
            let job_type = JobType::parse(slug)
                .ok_or_else(|| RateSheetError::UnknownJobType(slug.to_string()))?;

            let mut slot_record = match store.load_rates(job_type).await? {
                Some(existing) => existing,
                None => RateConfig::defaults(job_type).to_record(),
            };
            for row in rows {
                slot_record.insert(row.rate_key.clone(), row.rate_value.trim().to_string());
                applied += 1;
            }
            store.save_rates(job_type, &slot_record).await?;
        }

        Ok(applied)
    }

    /// Writes every saved configuration slot to a CSV rate sheet.
    /// Returns the number of rows written.
    pub async fn export<W: Write>(
        store: &dyn RateStore,
        writer: W,
    ) -> Result<usize, RateSheetError> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        let mut written = 0;

        for slot in store.list_slots().await? {
            let Some(job_type) = JobType::from_slot_key(&slot) else {
                warn!(slot, "skipping unrecognized configuration slot");
                continue;
            };
            let Some(record) = store.load_rates(job_type).await? else {
                continue;
            };
            for (key, value) in &record {
                csv_writer.serialize(RateSheetRecord {
                    job_type: job_type.as_str().to_string(),
                    rate_key: key.clone(),
                    rate_value: value.clone(),
                })?;
                written += 1;
            }
        }

        csv_writer
            .flush()
            .map_err(|e| RateSheetError::Csv(e.to_string()))?;
        Ok(written)
    }

    /// Saves the built-in defaults for every job type that has no saved
    /// slot yet. Returns the number of slots seeded.
    pub async fn seed_defaults(store: &dyn RateStore) -> Result<usize, RateSheetError> {
        let mut seeded = 0;
        for job_type in JobType::ALL {
            if store.load_rates(job_type).await?.is_none() {
                store
                    .save_rates(job_type, &RateConfig::defaults(job_type).to_record())
                    .await?;
                seeded += 1;
            }
        }
        Ok(seeded)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use sqlx::sqlite::SqlitePoolOptions;

    use paving_core::models::keys;
    use paving_db_sqlite::SqliteRateStore;

    use super::*;

    async fn setup_store() -> SqliteRateStore {
        let pool = SqlitePoolOptions::new()
            .connect("sqlite::memory:")
            .await
            .expect("Failed to create in-memory database");
        let store = SqliteRateStore::new_with_pool(pool);
        store
            .run_migrations()
            .await
            .expect("Failed to run migrations");
        store
    }

    const SHEET: &str = "\
job_type,rate_key,rate_value
remove-replace,pricePerTon,115
remove-replace,truckingInCostPerTon,12.50
extras,culvertCost,650
";

    #[test]
    fn parse_reads_valid_rows() {
        let records = RateSheetLoader::parse(SHEET.as_bytes()).unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].job_type, "remove-replace");
        assert_eq!(records[0].rate_key, "pricePerTon");
        assert_eq!(records[0].rate_value, "115");
    }

    #[test]
    fn parse_rejects_unknown_job_type() {
        let sheet = "job_type,rate_key,rate_value\nseal-coating,pricePerTon,100\n";

        let result = RateSheetLoader::parse(sheet.as_bytes());

        assert!(matches!(result, Err(RateSheetError::UnknownJobType(slug)) if slug == "seal-coating"));
    }

    #[test]
    fn parse_rejects_non_decimal_value() {
        let sheet = "job_type,rate_key,rate_value\nextras,culvertCost,lots\n";

        let result = RateSheetLoader::parse(sheet.as_bytes());

        assert!(matches!(
            result,
            Err(RateSheetError::InvalidValue { key, value }) if key == "culvertCost" && value == "lots"
        ));
    }

    #[tokio::test]
    async fn load_overlays_sheet_onto_defaults() {
        let store = setup_store().await;
        let records = RateSheetLoader::parse(SHEET.as_bytes()).unwrap();

        let applied = RateSheetLoader::load(&store, &records).await.unwrap();

        assert_eq!(applied, 3);
        let record = store
            .load_rates(JobType::RemoveReplace)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record.get(keys::PRICE_PER_TON).map(String::as_str), Some("115"));
        assert_eq!(
            record.get(keys::TRUCKING_IN_COST_PER_TON).map(String::as_str),
            Some("12.50")
        );
        // untouched defaults came along with the save
        assert_eq!(
            record.get(keys::REMOVAL_LABOR_COST_PER_TON).map(String::as_str),
            Some("38")
        );
    }

    #[tokio::test]
    async fn export_then_import_is_lossless() {
        let store = setup_store().await;
        RateSheetLoader::seed_defaults(&store).await.unwrap();
        let before = store.load_rates(JobType::Extras).await.unwrap();

        let mut sheet = Vec::new();
        RateSheetLoader::export(&store, &mut sheet).await.unwrap();

        let records = RateSheetLoader::parse(sheet.as_slice()).unwrap();
        let fresh = setup_store().await;
        RateSheetLoader::load(&fresh, &records).await.unwrap();

        assert_eq!(fresh.load_rates(JobType::Extras).await.unwrap(), before);
    }

    #[tokio::test]
    async fn seed_defaults_fills_every_empty_slot_once() {
        let store = setup_store().await;

        let first = RateSheetLoader::seed_defaults(&store).await.unwrap();
        let second = RateSheetLoader::seed_defaults(&store).await.unwrap();

        assert_eq!(first, JobType::ALL.len());
        assert_eq!(second, 0);
    }
}
