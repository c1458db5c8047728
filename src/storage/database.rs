// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Embedded inventory database backed by redb (pure Rust, ACID).
//!
//! ## Table Layout
//!
//! - `netrino_element`: element id → serialized StoredElement
//! - `netrino_element_name`: element name → element id (unique index)
//! - `netrino_element_tree`: `parent_id|seq|child_id` → child id
//!   (`parent_id` is empty for top-level elements)
//! - `netrino_element_interface`: `element_id|interface` → serialized StoredInterface
//! - `netrino_element_tag`: tag name → serialized StoredTag (global unique index)
//! - `netrino_element_tag_index`: `element_id|tag_name` → tag id
//! - `netrino_meta`: counter name → u64
//!
//! Every write goes through [`ElementDb::write`], which commits when the
//! operation returns `Ok` and aborts the transaction on any error.

use std::path::Path;

use redb::{
    Database, ReadTransaction, ReadableDatabase, ReadableTable, TableDefinition, WriteTransaction,
};
use serde::{de::DeserializeOwned, Serialize};

// =============================================================================
// Table Definitions
// =============================================================================

pub(crate) const ELEMENTS: TableDefinition<&str, &[u8]> = TableDefinition::new("netrino_element");

pub(crate) const ELEMENT_NAMES: TableDefinition<&str, &str> =
    TableDefinition::new("netrino_element_name");

pub(crate) const ELEMENT_TREE: TableDefinition<&str, &str> =
    TableDefinition::new("netrino_element_tree");

pub(crate) const INTERFACES: TableDefinition<&str, &[u8]> =
    TableDefinition::new("netrino_element_interface");

pub(crate) const TAGS: TableDefinition<&str, &[u8]> = TableDefinition::new("netrino_element_tag");

pub(crate) const ELEMENT_TAGS: TableDefinition<&str, &str> =
    TableDefinition::new("netrino_element_tag_index");

pub(crate) const META: TableDefinition<&str, u64> = TableDefinition::new("netrino_meta");

/// Counter used to keep element listings in insertion order.
const ELEMENT_SEQ: &str = "element_seq";

// =============================================================================
// Error Type
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("redb error: {0}")]
    Redb(#[from] redb::Error),

    #[error("redb database error: {0}")]
    RedbDatabase(#[from] redb::DatabaseError),

    #[error("redb transaction error: {0}")]
    RedbTransaction(#[from] redb::TransactionError),

    #[error("redb table error: {0}")]
    RedbTable(#[from] redb::TableError),

    #[error("redb storage error: {0}")]
    RedbStorage(#[from] redb::StorageError),

    #[error("redb commit error: {0}")]
    RedbCommit(#[from] redb::CommitError),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("already exists: {0}")]
    AlreadyExists(String),

    #[error("dangling reference: {0}")]
    MissingReference(String),

    #[error("cycle: {0}")]
    Cycle(String),

    #[error("in use: {0}")]
    InUse(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Key Helpers
// =============================================================================

/// Composite key for two-part lookups (`owner|name`).
pub(crate) fn pair_key(owner: &str, name: &str) -> String {
    format!("{owner}|{name}")
}

/// Prefix for range-scanning every entry owned by `owner`.
pub(crate) fn owner_prefix(owner: &str) -> String {
    format!("{owner}|")
}

/// Tree index key. The zero-padded hex sequence keeps a forward scan in
/// insertion order.
pub(crate) fn tree_key(parent_id: Option<&str>, seq: u64, child_id: &str) -> String {
    format!("{}|{seq:016x}|{child_id}", parent_id.unwrap_or(""))
}

// =============================================================================
// Table Helpers
// =============================================================================

/// Read and deserialize a JSON value by key.
pub(crate) fn get_json<T: DeserializeOwned>(
    table: &impl ReadableTable<&'static str, &'static [u8]>,
    key: &str,
) -> StoreResult<Option<T>> {
    match table.get(key)? {
        Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
        None => Ok(None),
    }
}

/// Serialize a value to JSON bytes for storage.
pub(crate) fn to_json<T: Serialize>(value: &T) -> StoreResult<Vec<u8>> {
    Ok(serde_json::to_vec(value)?)
}

/// Deserialize every JSON value whose key starts with `prefix`, in key order.
pub(crate) fn scan_json<T: DeserializeOwned>(
    table: &impl ReadableTable<&'static str, &'static [u8]>,
    prefix: &str,
) -> StoreResult<Vec<T>> {
    let mut results = Vec::new();
    for entry in table.range(prefix..)? {
        let (key, value) = entry?;
        if !key.value().starts_with(prefix) {
            break;
        }
        results.push(serde_json::from_slice(value.value())?);
    }
    Ok(results)
}

/// Collect `(key, value)` string pairs whose key starts with `prefix`.
pub(crate) fn scan_str(
    table: &impl ReadableTable<&'static str, &'static str>,
    prefix: &str,
) -> StoreResult<Vec<(String, String)>> {
    let mut results = Vec::new();
    for entry in table.range(prefix..)? {
        let (key, value) = entry?;
        if !key.value().starts_with(prefix) {
            break;
        }
        results.push((key.value().to_string(), value.value().to_string()));
    }
    Ok(results)
}

/// True if any key starts with `prefix`.
pub(crate) fn has_prefix<V: redb::Value + 'static>(
    table: &impl ReadableTable<&'static str, V>,
    prefix: &str,
) -> StoreResult<bool> {
    match table.range(prefix..)?.next() {
        Some(entry) => {
            let (key, _) = entry?;
            Ok(key.value().starts_with(prefix))
        }
        None => Ok(false),
    }
}

/// Allocate the next element sequence number inside a write transaction.
pub(crate) fn next_element_seq(txn: &WriteTransaction) -> StoreResult<u64> {
    let mut meta = txn.open_table(META)?;
    let current = meta.get(ELEMENT_SEQ)?.map(|v| v.value()).unwrap_or(0);
    let next = current + 1;
    meta.insert(ELEMENT_SEQ, next)?;
    Ok(next)
}

// =============================================================================
// ElementDb
// =============================================================================

/// Embedded ACID inventory database.
pub struct ElementDb {
    db: Database,
}

impl ElementDb {
    /// Open (or create) the database at the given path.
    pub fn open(path: &Path) -> StoreResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let db = Database::create(path)?;

        // Pre-create all tables so later read transactions don't fail
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(ELEMENTS)?;
            let _ = write_txn.open_table(ELEMENT_NAMES)?;
            let _ = write_txn.open_table(ELEMENT_TREE)?;
            let _ = write_txn.open_table(INTERFACES)?;
            let _ = write_txn.open_table(TAGS)?;
            let _ = write_txn.open_table(ELEMENT_TAGS)?;
            let _ = write_txn.open_table(META)?;
        }
        write_txn.commit()?;

        tracing::info!(path = %path.display(), "Inventory database opened");
        Ok(Self { db })
    }

    /// Run `op` inside a single write transaction.
    ///
    /// Commits when `op` returns `Ok`; aborts on every error path so no
    /// partial state becomes visible.
    pub fn write<T, E>(&self, op: impl FnOnce(&WriteTransaction) -> Result<T, E>) -> Result<T, E>
    where
        E: From<StoreError>,
    {
        let txn = self.db.begin_write().map_err(StoreError::from)?;
        match op(&txn) {
            Ok(value) => {
                txn.commit().map_err(StoreError::from)?;
                Ok(value)
            }
            Err(err) => {
                if let Err(abort_err) = txn.abort() {
                    tracing::warn!(error = %abort_err, "Failed to abort write transaction");
                }
                Err(err)
            }
        }
    }

    /// Run `op` against a consistent read snapshot.
    pub fn read<T, E>(&self, op: impl FnOnce(&ReadTransaction) -> Result<T, E>) -> Result<T, E>
    where
        E: From<StoreError>,
    {
        let txn = self.db.begin_read().map_err(StoreError::from)?;
        op(&txn)
    }

    /// Verify the database can serve a read transaction.
    pub fn health_check(&self) -> StoreResult<()> {
        self.read(|txn| {
            txn.open_table(ELEMENTS)?;
            Ok(())
        })
    }
}

// =============================================================================
// Tests
// =============================================================================

/// Open a throwaway database in a temp directory.
#[cfg(test)]
pub(crate) fn temp_db() -> (ElementDb, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let db = ElementDb::open(&dir.path().join("test.redb")).unwrap();
    (db, dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_creates_tables() {
        let (db, _dir) = temp_db();
        db.health_check().unwrap();
    }

    #[test]
    fn write_commits_on_ok() {
        let (db, _dir) = temp_db();
        db.write(|txn| -> StoreResult<()> {
            let mut table = txn.open_table(ELEMENT_NAMES)?;
            table.insert("core-router", "id-1")?;
            Ok(())
        })
        .unwrap();

        let found = db
            .read(|txn| -> StoreResult<Option<String>> {
                let table = txn.open_table(ELEMENT_NAMES)?;
                Ok(table.get("core-router")?.map(|v| v.value().to_string()))
            })
            .unwrap();
        assert_eq!(found.as_deref(), Some("id-1"));
    }

    #[test]
    fn write_aborts_on_error() {
        let (db, _dir) = temp_db();
        let result = db.write(|txn| -> StoreResult<()> {
            let mut table = txn.open_table(ELEMENT_NAMES)?;
            table.insert("edge-switch", "id-2")?;
            Err(StoreError::AlreadyExists("edge-switch".to_string()))
        });
        assert!(matches!(result, Err(StoreError::AlreadyExists(_))));

        let found = db
            .read(|txn| -> StoreResult<bool> {
                let table = txn.open_table(ELEMENT_NAMES)?;
                Ok(table.get("edge-switch")?.is_some())
            })
            .unwrap();
        assert!(!found, "aborted insert must not be visible");
    }

    #[test]
    fn sequence_is_monotonic() {
        let (db, _dir) = temp_db();
        let first = db.write(|txn| next_element_seq(txn)).unwrap();
        let second = db.write(|txn| next_element_seq(txn)).unwrap();
        assert_eq!(first, 1);
        assert_eq!(second, 2);
    }

    #[test]
    fn tree_keys_sort_by_sequence() {
        let a = tree_key(None, 2, "b");
        let b = tree_key(None, 10, "a");
        assert!(a < b, "lower sequence should sort first");
        assert!(tree_key(Some("p"), 1, "c").starts_with(&owner_prefix("p")));
        assert!(tree_key(None, 1, "c").starts_with(&owner_prefix("")));
    }

    #[test]
    fn prefix_scan_stays_within_owner() {
        let (db, _dir) = temp_db();
        db.write(|txn| -> StoreResult<()> {
            let mut table = txn.open_table(ELEMENT_TAGS)?;
            table.insert(pair_key("a", "x").as_str(), "1")?;
            table.insert(pair_key("a", "y").as_str(), "2")?;
            table.insert(pair_key("ab", "z").as_str(), "3")?;
            Ok(())
        })
        .unwrap();

        let entries = db
            .read(|txn| -> StoreResult<Vec<(String, String)>> {
                let table = txn.open_table(ELEMENT_TAGS)?;
                scan_str(&table, &owner_prefix("a"))
            })
            .unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].1, "1");
        assert_eq!(entries[1].1, "2");
    }
}
