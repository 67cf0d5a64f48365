//! Document storage.
//!
//! The seeding and reporting flows talk to a [`DocumentStore`]: a minimal
//! document-collection interface (drop, ordered bulk insert, count, and two
//! expiry-window queries). Two backends are provided:
//!
//! - [`MemoryStore`] — in-memory, insertion-ordered; the test double.
//! - [`SqliteStore`] — durable storage with documents kept as JSON rows
//!   plus indexed columns for the expiry queries.

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::models::{DocumentId, Item};
use crate::Result;
use chrono::{DateTime, Utc};

/// Trait for document-store backends.
///
/// Collections are addressed by name and created implicitly on first
/// insert. Bulk inserts are ordered; callers compare the number of returned
/// IDs against the number of submitted documents to detect partial
/// insertion.
pub trait DocumentStore {
    /// Removes every document in a collection.
    ///
    /// Returns `true` if the collection held any documents.
    fn drop_collection(&mut self, collection: &str) -> Result<bool>;

    /// Inserts documents in order, returning the IDs actually persisted.
    fn insert_many(&mut self, collection: &str, items: &[Item]) -> Result<Vec<DocumentId>>;

    /// Returns the number of documents in a collection.
    fn count(&self, collection: &str) -> Result<usize>;

    /// Returns every document in a collection, in insertion order.
    fn find_all(&self, collection: &str) -> Result<Vec<(DocumentId, Item)>>;

    /// Returns documents with `from <= expiration_date < to`, ascending by
    /// expiration date. Documents without a derived expiration are skipped.
    fn find_expiring_between(
        &self,
        collection: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<(DocumentId, Item)>>;

    /// Returns documents whose expiration date is strictly before `now`,
    /// ascending by expiration date.
    fn find_expired(&self, collection: &str, now: DateTime<Utc>) -> Result<Vec<(DocumentId, Item)>> {
        self.find_expiring_between(collection, DateTime::<Utc>::MIN_UTC, now)
    }
}
