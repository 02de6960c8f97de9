//! Quote persistence over a simple key-value store
//!
//! The whole quote collection is one JSON array under a single namespaced key,
//! so every save or delete is one atomic write. Entries that fail to decode are
//! kept verbatim and skipped when listing, never dropped.

use miette::Diagnostic;
use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::core::identity::QuoteId;
use crate::entities::quote::{QuoteRecord, QuoteSummary};

/// Key holding the quote collection
pub const QUOTES_KEY: &str = "roofquote.quotes.v1";

const STORE_FILE: &str = "quotes.db";

/// How long a writer waits for another process holding the database lock
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const SELECT_VALUE: &str = "SELECT value FROM kv WHERE key = ?1";
const UPSERT_VALUE: &str = "INSERT INTO kv (key, value) VALUES (?1, ?2)
     ON CONFLICT(key) DO UPDATE SET value = excluded.value";
const DELETE_VALUE: &str = "DELETE FROM kv WHERE key = ?1";

#[derive(Debug, Error, Diagnostic)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed quote data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Quote not found: {0}")]
    #[diagnostic(help("Run `roofquote quote list` to see saved quotes"))]
    NotFound(String),

    #[error("Quote already saved: {0}")]
    AlreadyExists(QuoteId),

    #[error("'{reference}' matches {count} quotes; use more of the ID")]
    Ambiguous { reference: String, count: usize },

    #[error("Could not determine a data directory for this platform")]
    NoDataDir,
}

/// Minimal string key-value storage
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;

    /// Replace the value of `key` with whatever `change` returns for the
    /// current one, as a single atomic step. `None` removes the key.
    fn update(
        &mut self,
        key: &str,
        change: &mut dyn FnMut(Option<String>) -> Result<Option<String>, StoreError>,
    ) -> Result<(), StoreError> {
        match change(self.get(key)?)? {
            Some(value) => self.set(key, &value),
            None => self.remove(key),
        }
    }
}

/// In-memory store, for tests and throwaway sessions
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// SQLite-backed store: a single `kv` table
#[derive(Debug)]
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Platform default database location
    pub fn default_path() -> Result<PathBuf, StoreError> {
        directories::ProjectDirs::from("", "", "roofquote")
            .map(|dirs| dirs.data_dir().join(STORE_FILE))
            .ok_or(StoreError::NoDataDir)
    }

    /// Open (creating if needed) the database at `path`
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path)?;
        tracing::debug!(path = %path.display(), "opened quote store");
        Self::init(conn)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, StoreError> {
        conn.busy_timeout(BUSY_TIMEOUT)?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(Self { conn })
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let value = self
            .conn
            .query_row(SELECT_VALUE, params![key], |row| row.get(0))
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.conn.execute(UPSERT_VALUE, params![key, value])?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.conn.execute(DELETE_VALUE, params![key])?;
        Ok(())
    }

    /// Runs inside `BEGIN IMMEDIATE`, so concurrent writers queue on the
    /// write lock instead of overwriting each other's changes.
    fn update(
        &mut self,
        key: &str,
        change: &mut dyn FnMut(Option<String>) -> Result<Option<String>, StoreError>,
    ) -> Result<(), StoreError> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let current: Option<String> = tx
            .query_row(SELECT_VALUE, params![key], |row| row.get(0))
            .optional()?;
        match change(current)? {
            Some(value) => tx.execute(UPSERT_VALUE, params![key, value])?,
            None => tx.execute(DELETE_VALUE, params![key])?,
        };
        tx.commit()?;
        Ok(())
    }
}

/// Saved quotes, kept under [`QUOTES_KEY`]
#[derive(Debug)]
pub struct QuoteStore<S> {
    store: S,
}

impl<S: KeyValueStore> QuoteStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    /// Save a new record and return its id. Saved records are immutable.
    pub fn save(&mut self, record: &QuoteRecord) -> Result<QuoteId, StoreError> {
        let value = serde_json::to_value(record)?;
        self.update_entries(|entries| {
            if entries.iter().any(|e| entry_id(e) == Some(record.id)) {
                return Err(StoreError::AlreadyExists(record.id));
            }
            entries.push(value.clone());
            Ok(())
        })?;
        tracing::debug!(id = %record.id, name = %record.name, "saved quote");
        Ok(record.id)
    }

    /// Summaries of every readable record, newest first
    pub fn list(&self) -> Result<Vec<QuoteSummary>, StoreError> {
        let mut summaries: Vec<QuoteSummary> = self
            .records()?
            .iter()
            .map(QuoteRecord::summary)
            .collect();
        summaries.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(summaries)
    }

    pub fn load(&self, id: QuoteId) -> Result<QuoteRecord, StoreError> {
        self.records()?
            .into_iter()
            .find(|r| r.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    pub fn delete(&mut self, id: QuoteId) -> Result<(), StoreError> {
        self.update_entries(|entries| {
            let before = entries.len();
            entries.retain(|e| entry_id(e) != Some(id));
            if entries.len() == before {
                return Err(StoreError::NotFound(id.to_string()));
            }
            Ok(())
        })?;
        tracing::debug!(id = %id, "deleted quote");
        Ok(())
    }

    /// Find a quote by full id, unique id prefix, or exact name
    pub fn resolve(&self, reference: &str) -> Result<QuoteId, StoreError> {
        let reference = reference.trim();
        if let Ok(id) = QuoteId::parse(reference) {
            return Ok(id);
        }

        let records = self.records()?;
        let needle = reference.to_uppercase();
        let by_prefix: Vec<QuoteId> = records
            .iter()
            .map(|r| r.id)
            .filter(|id| {
                let full = id.to_string();
                !needle.is_empty()
                    && (full.starts_with(&needle) || id.ulid().to_string().starts_with(&needle))
            })
            .collect();
        if let Some(id) = single(&by_prefix, reference)? {
            return Ok(id);
        }

        let by_name: Vec<QuoteId> = records
            .iter()
            .filter(|r| r.name.eq_ignore_ascii_case(reference))
            .map(|r| r.id)
            .collect();
        single(&by_name, reference)?.ok_or_else(|| StoreError::NotFound(reference.to_string()))
    }

    /// Every record that decodes cleanly
    fn records(&self) -> Result<Vec<QuoteRecord>, StoreError> {
        Ok(self
            .read_entries()?
            .into_iter()
            .filter_map(|entry| match serde_json::from_value::<QuoteRecord>(entry) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!(error = %e, "skipping unreadable quote entry");
                    None
                }
            })
            .collect())
    }

    fn read_entries(&self) -> Result<Vec<Value>, StoreError> {
        parse_entries(self.store.get(QUOTES_KEY)?.as_deref())
    }

    /// Read-modify-write of the whole collection in one store update
    fn update_entries(
        &mut self,
        mut change: impl FnMut(&mut Vec<Value>) -> Result<(), StoreError>,
    ) -> Result<(), StoreError> {
        self.store.update(QUOTES_KEY, &mut |raw: Option<String>| {
            let mut entries = parse_entries(raw.as_deref())?;
            change(&mut entries)?;
            if entries.is_empty() {
                Ok(None)
            } else {
                Ok(Some(serde_json::to_string(&entries)?))
            }
        })
    }
}

fn parse_entries(raw: Option<&str>) -> Result<Vec<Value>, StoreError> {
    match raw {
        Some(raw) if !raw.trim().is_empty() => Ok(serde_json::from_str(raw)?),
        _ => Ok(Vec::new()),
    }
}

fn entry_id(entry: &Value) -> Option<QuoteId> {
    entry
        .get("id")
        .and_then(Value::as_str)
        .and_then(|s| QuoteId::parse(s).ok())
}

fn single(ids: &[QuoteId], reference: &str) -> Result<Option<QuoteId>, StoreError> {
    match ids {
        [] => Ok(None),
        [id] => Ok(Some(*id)),
        _ => Err(StoreError::Ambiguous {
            reference: reference.to_string(),
            count: ids.len(),
        }),
    }
}
