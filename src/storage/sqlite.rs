//! `SQLite`-backed document store.
//!
//! Documents are stored one per row with the full item serialized as JSON,
//! plus `name` and `expiration_date` columns so the expiry-window queries
//! run against an index instead of decoding every document.

use super::DocumentStore;
use crate::models::{DocumentId, Item};
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use std::path::PathBuf;
use tracing::debug;

/// `SQLite`-backed document store.
pub struct SqliteStore {
    /// Connection to the `SQLite` database.
    conn: Connection,
    /// Path to the database file (None for in-memory).
    db_path: Option<PathBuf>,
}

fn sql_error(operation: &str, cause: impl std::fmt::Display) -> Error {
    Error::OperationFailed {
        operation: operation.to_string(),
        cause: cause.to_string(),
    }
}

impl SqliteStore {
    /// Opens (or creates) a document store at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new(db_path: impl Into<PathBuf>) -> Result<Self> {
        let db_path = db_path.into();
        let conn = Connection::open(&db_path).map_err(|e| sql_error("open_sqlite", e))?;

        let store = Self {
            conn,
            db_path: Some(db_path),
        };
        store.initialize()?;
        Ok(store)
    }

    /// Creates an in-memory store (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn in_memory() -> Result<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| sql_error("open_sqlite_in_memory", e))?;

        let store = Self {
            conn,
            db_path: None,
        };
        store.initialize()?;
        Ok(store)
    }

    /// Returns the database path (None for in-memory).
    #[must_use]
    pub const fn db_path(&self) -> Option<&PathBuf> {
        self.db_path.as_ref()
    }

    /// Initializes pragmas and the schema.
    fn initialize(&self) -> Result<()> {
        // WAL allows a reader while the seeder writes; busy_timeout waits
        // for locks instead of failing immediately.
        self.conn
            .pragma_update(None, "journal_mode", "WAL")
            .map_err(|e| sql_error("set_journal_mode", e))?;
        self.conn
            .pragma_update(None, "busy_timeout", 5000)
            .map_err(|e| sql_error("set_busy_timeout", e))?;
        self.conn
            .pragma_update(None, "synchronous", "NORMAL")
            .map_err(|e| sql_error("set_synchronous", e))?;

        self.conn
            .execute(
                "CREATE TABLE IF NOT EXISTS documents (
                    id TEXT PRIMARY KEY,
                    collection TEXT NOT NULL,
                    seq INTEGER NOT NULL,
                    name TEXT NOT NULL,
                    expiration_date INTEGER,
                    body TEXT NOT NULL
                )",
                [],
            )
            .map_err(|e| sql_error("create_documents_table", e))?;

        // Index for the expiry-window queries
        let _ = self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_documents_collection_expiration
             ON documents(collection, expiration_date)",
            [],
        );

        // Index for insertion-order listing
        let _ = self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_documents_collection_seq
             ON documents(collection, seq)",
            [],
        );

        Ok(())
    }

    /// Decodes a document row back into an item.
    fn decode_row(id: String, body: &str) -> Result<(DocumentId, Item)> {
        let item: Item =
            serde_json::from_str(body).map_err(|e| sql_error("decode_document", e))?;
        Ok((DocumentId::new(id), item))
    }

    fn query_documents(&self, sql: &str, params: &[&dyn rusqlite::ToSql]) -> Result<Vec<(DocumentId, Item)>> {
        let mut stmt = self
            .conn
            .prepare(sql)
            .map_err(|e| sql_error("prepare_query", e))?;

        let rows = stmt
            .query_map(params, |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })
            .map_err(|e| sql_error("query_documents", e))?;

        let mut documents = Vec::new();
        for row in rows {
            let (id, body) = row.map_err(|e| sql_error("read_document_row", e))?;
            documents.push(Self::decode_row(id, &body)?);
        }
        Ok(documents)
    }
}

/// Millisecond timestamp stored in the `expiration_date` column.
fn expiration_millis(item: &Item) -> Option<i64> {
    item.expiration_date.map(|dt| dt.timestamp_millis())
}

fn millis(dt: DateTime<Utc>) -> i64 {
    dt.timestamp_millis()
}

impl DocumentStore for SqliteStore {
    fn drop_collection(&mut self, collection: &str) -> Result<bool> {
        let deleted = self
            .conn
            .execute(
                "DELETE FROM documents WHERE collection = ?1",
                params![collection],
            )
            .map_err(|e| sql_error("drop_collection", e))?;
        debug!(collection, deleted, "dropped collection");
        Ok(deleted > 0)
    }

    fn insert_many(&mut self, collection: &str, items: &[Item]) -> Result<Vec<DocumentId>> {
        let base_seq: i64 = self
            .conn
            .query_row(
                "SELECT COALESCE(MAX(seq), -1) FROM documents WHERE collection = ?1",
                params![collection],
                |row| row.get(0),
            )
            .map_err(|e| sql_error("next_sequence", e))?;

        let tx = self
            .conn
            .transaction()
            .map_err(|e| sql_error("begin_insert", e))?;

        let mut ids = Vec::with_capacity(items.len());
        for (offset, item) in items.iter().enumerate() {
            let id = uuid::Uuid::new_v4().to_string();
            let body =
                serde_json::to_string(item).map_err(|e| sql_error("encode_document", e))?;
            let seq = base_seq + 1 + i64::try_from(offset).unwrap_or(i64::MAX);

            tx.execute(
                "INSERT INTO documents (id, collection, seq, name, expiration_date, body)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![id, collection, seq, item.name, expiration_millis(item), body],
            )
            .map_err(|e| sql_error("insert_document", e))?;
            ids.push(DocumentId::new(id));
        }

        tx.commit().map_err(|e| sql_error("commit_insert", e))?;
        debug!(collection, inserted = ids.len(), "bulk insert complete");
        Ok(ids)
    }

    fn count(&self, collection: &str) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row(
                "SELECT COUNT(*) FROM documents WHERE collection = ?1",
                params![collection],
                |row| row.get(0),
            )
            .map_err(|e| sql_error("count_documents", e))?;
        Ok(usize::try_from(count).unwrap_or(0))
    }

    fn find_all(&self, collection: &str) -> Result<Vec<(DocumentId, Item)>> {
        self.query_documents(
            "SELECT id, body FROM documents WHERE collection = ?1 ORDER BY seq ASC",
            &[&collection],
        )
    }

    fn find_expiring_between(
        &self,
        collection: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<(DocumentId, Item)>> {
        let from_millis = millis(from);
        let to_millis = millis(to);
        self.query_documents(
            "SELECT id, body FROM documents
             WHERE collection = ?1
               AND expiration_date IS NOT NULL
               AND expiration_date >= ?2
               AND expiration_date < ?3
             ORDER BY expiration_date ASC",
            &[&collection, &from_millis, &to_millis],
        )
    }
}
