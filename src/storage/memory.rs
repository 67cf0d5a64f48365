//! In-memory document store (useful for testing).

use super::DocumentStore;
use crate::models::{DocumentId, Item};
use crate::Result;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// In-memory, insertion-ordered document store.
///
/// Not durable; intended for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: HashMap<String, Vec<(DocumentId, Item)>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentStore for MemoryStore {
    fn drop_collection(&mut self, collection: &str) -> Result<bool> {
        Ok(self
            .collections
            .remove(collection)
            .is_some_and(|docs| !docs.is_empty()))
    }

    fn insert_many(&mut self, collection: &str, items: &[Item]) -> Result<Vec<DocumentId>> {
        let docs = self.collections.entry(collection.to_string()).or_default();
        let mut ids = Vec::with_capacity(items.len());
        for item in items {
            let id = DocumentId::new(uuid::Uuid::new_v4().to_string());
            docs.push((id.clone(), item.clone()));
            ids.push(id);
        }
        Ok(ids)
    }

    fn count(&self, collection: &str) -> Result<usize> {
        Ok(self.collections.get(collection).map_or(0, Vec::len))
    }

    fn find_all(&self, collection: &str) -> Result<Vec<(DocumentId, Item)>> {
        Ok(self.collections.get(collection).cloned().unwrap_or_default())
    }

    fn find_expiring_between(
        &self,
        collection: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<(DocumentId, Item)>> {
        let mut matches: Vec<(DocumentId, Item)> = self
            .collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|(_, item)| {
                        item.expiration_date
                            .is_some_and(|expires| from <= expires && expires < to)
                    })
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        matches.sort_by_key(|(_, item)| item.expiration_date);
        Ok(matches)
    }
}
