//! # Forage
//!
//! Food inventory seeding and expiry tracking over a local document store.
//!
//! Forage loads a catalog of food items, determines the storage environment
//! that keeps each item usable the longest, stamps the resulting expiration
//! date onto the item, and bulk-loads the enriched batch into a document
//! store. It then answers "what is expiring soon" and "what has already
//! expired" over the seeded collection.
//!
//! ## Example
//!
//! ```rust,ignore
//! use chrono::Utc;
//! use forage::catalog;
//! use forage::storage::SqliteStore;
//! use forage::{SeedOptions, SeedService};
//!
//! let store = SqliteStore::new("./forage.db")?;
//! let mut service = SeedService::new(store, SeedOptions::default());
//! let report = service.seed(catalog::builtin()?, Utc::now())?;
//! println!("seeded {} items", report.inserted);
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

use thiserror::Error as ThisError;

// Module declarations
pub mod catalog;
pub mod config;
pub mod expiration;
pub mod models;
pub mod observability;
pub mod services;
pub mod storage;

// Re-exports for convenience
pub use config::ForageConfig;
pub use expiration::{derive, enrich, Derivation};
pub use models::{
    Amount, Attributes, DocumentId, DurationUnit, Item, ItemKind, LifespanTable, ShelfLife,
};
pub use services::{ReportService, SeedOptions, SeedReport, SeedService};
pub use storage::{DocumentStore, MemoryStore, SqliteStore};

/// Error type for forage operations.
///
/// Uses `thiserror` for automatic `Display` and `Error` trait implementations.
#[derive(Debug, ThisError)]
pub enum Error {
    /// Invalid input was provided.
    ///
    /// Raised when:
    /// - A shelf-life unit string is not one of the recognized spellings
    /// - An item carries an empty lifespan table
    /// - A catalog file is malformed
    /// - A seed batch is empty
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An operation failed.
    ///
    /// Raised when:
    /// - `SQLite` operations fail
    /// - Filesystem I/O errors occur
    /// - Config file parsing fails
    #[error("operation '{operation}' failed: {cause}")]
    OperationFailed {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },

    /// A bulk insert persisted fewer documents than were submitted.
    ///
    /// The target collection has already been dropped when this is raised,
    /// so the caller should re-run the seed rather than retry the insert.
    #[error("partial insert: expected {expected} documents, inserted {inserted}")]
    PartialInsert {
        /// Number of documents submitted.
        expected: usize,
        /// Number of documents actually persisted.
        inserted: usize,
    },
}

/// Result type alias for forage operations.
pub type Result<T> = std::result::Result<T, Error>;
