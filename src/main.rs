//! Binary entry point for forage.
//!
//! Seeds the document store from an item catalog and reports on expiring
//! or expired items.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
// CLI output goes to stdout by design
#![allow(clippy::print_stdout)]
#![allow(clippy::print_stderr)]

use chrono::{Duration, Utc};
use clap::{Parser, Subcommand};
use forage::catalog;
use forage::config::ForageConfig;
use forage::models::{DocumentId, Item};
use forage::observability::{self, LogFormat, LoggingConfig};
use forage::storage::{DocumentStore, SqliteStore};
use forage::{ReportService, SeedOptions, SeedService};
use std::path::PathBuf;
use std::process::ExitCode;

/// Forage - food inventory seeding and expiry tracking.
#[derive(Parser)]
#[command(name = "forage")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log output format ("text" or "json").
    #[arg(long, global = true, default_value = "text")]
    log_format: String,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// Drop the collection and reseed it from a catalog.
    Seed {
        /// Catalog JSON file (defaults to the built-in catalog).
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Target collection.
        #[arg(long)]
        collection: Option<String>,

        /// Validate and enrich without touching the store.
        #[arg(long)]
        dry_run: bool,
    },

    /// List items expiring within the lookahead window.
    Expiring {
        /// Lookahead window in days.
        #[arg(short, long)]
        lookahead_days: Option<i64>,
    },

    /// List items that have already expired.
    Expired,

    /// Show collection statistics.
    Status,
}

fn main() -> ExitCode {
    // Pick up FORAGE_* variables from a local .env if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    observability::init(LoggingConfig {
        verbose: cli.verbose,
        format: LogFormat::parse(&cli.log_format),
    });

    let config = match &cli.config {
        Some(path) => match ForageConfig::load_from_file(path) {
            Ok(config) => config.with_env_overrides(),
            Err(err) => {
                eprintln!("error: {err}");
                return ExitCode::FAILURE;
            }
        },
        None => ForageConfig::load_default(),
    };

    let result = match cli.command {
        Commands::Seed {
            file,
            collection,
            dry_run,
        } => run_seed(&config, file, collection, dry_run),
        Commands::Expiring { lookahead_days } => run_expiring(&config, lookahead_days),
        Commands::Expired => run_expired(&config),
        Commands::Status => run_status(&config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Runs the `seed` command.
fn run_seed(
    config: &ForageConfig,
    file: Option<PathBuf>,
    collection: Option<String>,
    dry_run: bool,
) -> forage::Result<()> {
    let items = match file {
        Some(path) => catalog::from_file(path)?,
        None => catalog::builtin()?,
    };

    let options = SeedOptions::default()
        .with_collection(collection.unwrap_or_else(|| config.collection.clone()))
        .with_dry_run(dry_run);

    let store = SqliteStore::new(&config.db_path)?;
    let mut service = SeedService::new(store, options);
    let report = service.seed(items, Utc::now())?;

    if report.dry_run {
        println!("dry run: {} items validated, store untouched", report.requested);
    } else {
        println!(
            "seeded {} of {} items (previous contents dropped: {})",
            report.inserted, report.requested, report.collection_dropped
        );
    }
    Ok(())
}

/// Runs the `expiring` command.
fn run_expiring(config: &ForageConfig, lookahead_days: Option<i64>) -> forage::Result<()> {
    let days = lookahead_days.unwrap_or(config.lookahead_days);
    let store = SqliteStore::new(&config.db_path)?;
    let reports = ReportService::new(&store, &config.collection);
    let hits = reports.expiring(Utc::now(), Duration::days(days))?;

    if hits.is_empty() {
        println!("nothing expiring within {days} day(s)");
    } else {
        println!("expiring within {days} day(s):");
        print_documents(&hits);
    }
    Ok(())
}

/// Runs the `expired` command.
fn run_expired(config: &ForageConfig) -> forage::Result<()> {
    let store = SqliteStore::new(&config.db_path)?;
    let reports = ReportService::new(&store, &config.collection);
    let hits = reports.expired(Utc::now())?;

    if hits.is_empty() {
        println!("nothing has expired");
    } else {
        println!("expired:");
        print_documents(&hits);
    }
    Ok(())
}

/// Runs the `status` command.
fn run_status(config: &ForageConfig) -> forage::Result<()> {
    let store = SqliteStore::new(&config.db_path)?;
    let count = store.count(&config.collection)?;
    println!("database:   {}", config.db_path.display());
    println!("collection: {}", config.collection);
    println!("documents:  {count}");
    Ok(())
}

/// Prints one line per document.
fn print_documents(documents: &[(DocumentId, Item)]) {
    for (_, item) in documents {
        let store_in = item.store_in.as_deref().unwrap_or("?");
        let expires = item
            .expiration_date
            .map_or_else(|| "-".to_string(), |dt| dt.format("%Y-%m-%d").to_string());
        println!("  {expires}  {:<20} ({store_in})", item.name);
    }
}
