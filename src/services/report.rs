//! Expiry reporting service.
//!
//! Answers "what is expiring soon" and "what has already expired" over a
//! seeded collection. Both queries return documents ascending by expiration
//! date; items carrying the never-expires sentinel sit in the far future and
//! never show up.

use crate::models::{DocumentId, Item};
use crate::storage::DocumentStore;
use crate::Result;
use chrono::{DateTime, Duration, Utc};
use tracing::debug;

/// Default lookahead window for the expiring report (48 hours).
pub const DEFAULT_LOOKAHEAD_DAYS: i64 = 2;

/// Read-only expiry reports over one collection.
pub struct ReportService<'a, S: DocumentStore> {
    /// Backing document store.
    store: &'a S,
    /// Collection the reports run against.
    collection: String,
}

impl<'a, S: DocumentStore> ReportService<'a, S> {
    /// Creates a report service for a collection.
    pub fn new(store: &'a S, collection: impl Into<String>) -> Self {
        Self {
            store,
            collection: collection.into(),
        }
    }

    /// Documents expiring within `[now, now + lookahead)`.
    ///
    /// Already-expired documents are not included; use [`Self::expired`].
    ///
    /// # Errors
    ///
    /// Returns an error if the store query fails.
    pub fn expiring(
        &self,
        now: DateTime<Utc>,
        lookahead: Duration,
    ) -> Result<Vec<(DocumentId, Item)>> {
        let to = now.checked_add_signed(lookahead).unwrap_or(DateTime::<Utc>::MAX_UTC);
        let hits = self.store.find_expiring_between(&self.collection, now, to)?;
        debug!(
            collection = %self.collection,
            lookahead_hours = lookahead.num_hours(),
            hits = hits.len(),
            "expiring report"
        );
        Ok(hits)
    }

    /// Documents whose expiration date is strictly before `now`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store query fails.
    pub fn expired(&self, now: DateTime<Utc>) -> Result<Vec<(DocumentId, Item)>> {
        let hits = self.store.find_expired(&self.collection, now)?;
        debug!(collection = %self.collection, hits = hits.len(), "expired report");
        Ok(hits)
    }
}
