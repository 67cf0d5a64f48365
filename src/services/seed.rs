//! Collection seeding service.
//!
//! Enriches a batch of catalog items with derived storage fields, clears the
//! target collection, and bulk-inserts the batch in one shot.

use crate::expiration;
use crate::models::Item;
use crate::storage::DocumentStore;
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use tracing::{info, warn};

/// Default collection for seeded items.
pub const DEFAULT_COLLECTION: &str = "ingredients";

/// Options for a seeding run.
#[derive(Debug, Clone)]
pub struct SeedOptions {
    /// Target collection name.
    pub collection: String,
    /// Validate and enrich without touching the store.
    pub dry_run: bool,
}

impl Default for SeedOptions {
    fn default() -> Self {
        Self {
            collection: DEFAULT_COLLECTION.to_string(),
            dry_run: false,
        }
    }
}

impl SeedOptions {
    /// Sets the target collection.
    #[must_use]
    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    /// Enables or disables dry-run mode.
    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// Outcome of a seeding run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedReport {
    /// Number of items submitted.
    pub requested: usize,
    /// Number of documents actually persisted (zero for dry runs).
    pub inserted: usize,
    /// Whether the drop removed any prior documents.
    pub collection_dropped: bool,
    /// Whether this was a dry run.
    pub dry_run: bool,
}

/// Service for seeding a collection from a catalog batch.
pub struct SeedService<S: DocumentStore> {
    /// Backing document store.
    store: S,
    /// Seeding options.
    options: SeedOptions,
}

impl<S: DocumentStore> SeedService<S> {
    /// Creates a new seed service.
    #[must_use]
    pub fn new(store: S, options: SeedOptions) -> Self {
        Self { store, options }
    }

    /// Returns a shared reference to the backing store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Consumes the service and returns the backing store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Seeds the target collection.
    ///
    /// The whole batch shares one reference timestamp: every item is
    /// stamped with it and enriched with `store_in` / `expiration_date`
    /// before the store is touched. Enrichment failures therefore abort
    /// with the prior contents intact. After enrichment the collection is
    /// dropped and the batch inserted in order.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidInput`] if the batch is empty or any item has an
    ///   empty lifespan table.
    /// - [`Error::PartialInsert`] if the store persisted fewer documents
    ///   than submitted. The drop has already happened at that point, so
    ///   the caller should re-run the seed rather than retry the insert.
    pub fn seed(&mut self, mut items: Vec<Item>, reference: DateTime<Utc>) -> Result<SeedReport> {
        if items.is_empty() {
            return Err(Error::InvalidInput("seed batch is empty".to_string()));
        }

        expiration::enrich(&mut items, reference)?;

        if self.options.dry_run {
            info!(
                collection = %self.options.collection,
                requested = items.len(),
                "dry run, store untouched"
            );
            return Ok(SeedReport {
                requested: items.len(),
                inserted: 0,
                collection_dropped: false,
                dry_run: true,
            });
        }

        let collection_dropped = self.store.drop_collection(&self.options.collection)?;
        let ids = self.store.insert_many(&self.options.collection, &items)?;

        if ids.len() != items.len() {
            warn!(
                collection = %self.options.collection,
                expected = items.len(),
                inserted = ids.len(),
                "bulk insert persisted fewer documents than submitted"
            );
            return Err(Error::PartialInsert {
                expected: items.len(),
                inserted: ids.len(),
            });
        }

        info!(
            collection = %self.options.collection,
            inserted = ids.len(),
            dropped = collection_dropped,
            "seed complete"
        );

        Ok(SeedReport {
            requested: items.len(),
            inserted: ids.len(),
            collection_dropped,
            dry_run: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Amount, DocumentId, DurationUnit, ItemKind, LifespanTable, ShelfLife};
    use crate::storage::MemoryStore;
    use chrono::TimeZone;

    fn item(name: &str, entries: &[(&str, u32, DurationUnit)]) -> Item {
        Item {
            name: name.to_string(),
            kind: ItemKind::Ingredient,
            amount: Amount::new(1.0, "count"),
            attributes: None,
            comment: None,
            lifespan: LifespanTable::from_entries(
                entries
                    .iter()
                    .map(|(env, value, unit)| ((*env).to_string(), ShelfLife::new(*value, *unit))),
            )
            .unwrap(),
            updated: DateTime::UNIX_EPOCH,
            store_in: None,
            expiration_date: None,
        }
    }

    fn reference() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 9, 0, 0).unwrap()
    }

    #[test]
    fn test_seed_enriches_and_inserts() {
        let mut service = SeedService::new(MemoryStore::new(), SeedOptions::default());
        let report = service
            .seed(
                vec![
                    item("Apples", &[("refrigerator", 1, DurationUnit::Week)]),
                    item("Bananas", &[("pantry", 4, DurationUnit::Day)]),
                ],
                reference(),
            )
            .unwrap();

        assert_eq!(report.requested, 2);
        assert_eq!(report.inserted, 2);
        assert!(!report.collection_dropped);
        assert!(!report.dry_run);

        let docs = service.store().find_all(DEFAULT_COLLECTION).unwrap();
        assert_eq!(docs.len(), 2);
        for (_, doc) in &docs {
            assert!(doc.is_enriched());
            assert_eq!(doc.updated, reference());
            let store_in = doc.store_in.as_deref().unwrap();
            assert!(doc.lifespan.contains(store_in));
        }
    }

    #[test]
    fn test_seed_replaces_prior_contents() {
        let mut service = SeedService::new(MemoryStore::new(), SeedOptions::default());
        service
            .seed(
                vec![item("Apples", &[("refrigerator", 1, DurationUnit::Week)])],
                reference(),
            )
            .unwrap();

        let report = service
            .seed(
                vec![item("Bagel", &[("pantry", 2, DurationUnit::Day)])],
                reference(),
            )
            .unwrap();
        assert!(report.collection_dropped);
        assert_eq!(service.store().count(DEFAULT_COLLECTION).unwrap(), 1);
    }

    #[test]
    fn test_seed_rejects_empty_batch() {
        let mut service = SeedService::new(MemoryStore::new(), SeedOptions::default());
        let result = service.seed(Vec::new(), reference());
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_seed_aborts_before_drop_on_bad_item() {
        let mut service = SeedService::new(MemoryStore::new(), SeedOptions::default());
        service
            .seed(
                vec![item("Apples", &[("refrigerator", 1, DurationUnit::Week)])],
                reference(),
            )
            .unwrap();

        // Second batch contains an item with no lifespan entries
        let result = service.seed(vec![item("Mystery", &[])], reference());
        assert!(matches!(result, Err(Error::InvalidInput(_))));

        // Prior contents are intact
        assert_eq!(service.store().count(DEFAULT_COLLECTION).unwrap(), 1);
    }

    #[test]
    fn test_dry_run_leaves_store_untouched() {
        let mut service = SeedService::new(
            MemoryStore::new(),
            SeedOptions::default().with_dry_run(true),
        );
        let report = service
            .seed(
                vec![item("Apples", &[("refrigerator", 1, DurationUnit::Week)])],
                reference(),
            )
            .unwrap();

        assert!(report.dry_run);
        assert_eq!(report.inserted, 0);
        assert_eq!(service.store().count(DEFAULT_COLLECTION).unwrap(), 0);
    }

    /// Store that acknowledges fewer documents than it was given.
    struct LossyStore {
        inner: MemoryStore,
    }

    impl DocumentStore for LossyStore {
        fn drop_collection(&mut self, collection: &str) -> crate::Result<bool> {
            self.inner.drop_collection(collection)
        }

        fn insert_many(
            &mut self,
            collection: &str,
            items: &[Item],
        ) -> crate::Result<Vec<DocumentId>> {
            let mut ids = self.inner.insert_many(collection, items)?;
            ids.pop();
            Ok(ids)
        }

        fn count(&self, collection: &str) -> crate::Result<usize> {
            self.inner.count(collection)
        }

        fn find_all(&self, collection: &str) -> crate::Result<Vec<(DocumentId, Item)>> {
            self.inner.find_all(collection)
        }

        fn find_expiring_between(
            &self,
            collection: &str,
            from: DateTime<Utc>,
            to: DateTime<Utc>,
        ) -> crate::Result<Vec<(DocumentId, Item)>> {
            self.inner.find_expiring_between(collection, from, to)
        }
    }

    #[test]
    fn test_partial_insert_is_fatal() {
        let store = LossyStore {
            inner: MemoryStore::new(),
        };
        let mut service = SeedService::new(store, SeedOptions::default());
        let result = service.seed(
            vec![
                item("Apples", &[("refrigerator", 1, DurationUnit::Week)]),
                item("Bananas", &[("pantry", 4, DurationUnit::Day)]),
            ],
            reference(),
        );

        assert!(matches!(
            result,
            Err(Error::PartialInsert {
                expected: 2,
                inserted: 1
            })
        ));
    }
}
