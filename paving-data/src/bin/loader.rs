use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use paving_data::RateSheetLoader;
use paving_db_sqlite::SqliteRateStore;

/// Manage the paving estimator's rate configuration database.
///
/// Rate sheets are CSV files with the columns:
/// - job_type: a job slug (remove-replace, overlay-transitions,
///   concrete-asphalt, grade-pave-base, extras)
/// - rate_key: the rate's name (e.g. pricePerTon)
/// - rate_value: the decimal value as text (e.g. 112.50)
#[derive(Parser, Debug)]
#[command(name = "paving-rate-loader")]
#[command(version, about, long_about = None)]
struct Args {
    /// SQLite database URL (e.g. sqlite:paving.db?mode=rwc to create if missing)
    #[arg(short, long, default_value = "sqlite:paving.db?mode=rwc")]
    database: String,

    /// Run database migrations before anything else
    #[arg(short, long, default_value_t = false)]
    migrate: bool,

    /// Save built-in default rates for any job type without a saved slot
    #[arg(short, long, default_value_t = false)]
    seed_defaults: bool,

    /// Import a CSV rate sheet into the database
    #[arg(short, long)]
    import: Option<PathBuf>,

    /// Export all saved rate configurations to a CSV rate sheet
    #[arg(short, long)]
    export: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let store = SqliteRateStore::new(&args.database)
        .await
        .with_context(|| format!("Failed to connect to database: {}", args.database))?;

    if args.migrate {
        println!("Running migrations...");
        store
            .run_migrations()
            .await
            .context("Failed to run migrations")?;
        println!("Migrations complete.");
    }

    if args.seed_defaults {
        let seeded = RateSheetLoader::seed_defaults(&store)
            .await
            .context("Failed to seed default rates")?;
        println!("Seeded defaults for {} job type(s).", seeded);
    }

    if let Some(path) = &args.import {
        println!("Importing rate sheet from: {}", path.display());

        let file =
            File::open(path).with_context(|| format!("Failed to open: {}", path.display()))?;
        let records = RateSheetLoader::parse(file)
            .with_context(|| format!("Failed to parse CSV: {}", path.display()))?;

        println!("Parsed {} rows from CSV", records.len());

        let applied = RateSheetLoader::load(&store, &records)
            .await
            .context("Failed to load rate sheet into database")?;

        println!("Applied {} rate(s).", applied);
    }

    if let Some(path) = &args.export {
        let file =
            File::create(path).with_context(|| format!("Failed to create: {}", path.display()))?;
        let written = RateSheetLoader::export(&store, file)
            .await
            .context("Failed to export rate sheet")?;

        println!("Exported {} rate(s) to {}.", written, path.display());
    }

    Ok(())
}
