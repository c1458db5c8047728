// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Element interface repository.
//!
//! Interfaces are keyed by `element_id|interface`, so an element holds at
//! most one instance per interface type. The `metadata` column is stored
//! exactly as given (ciphertext); this module never sees plaintext.

use chrono::{DateTime, Utc};
use redb::ReadableTable;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::storage::database::{
    get_json, owner_prefix, pair_key, scan_json, to_json, ElementDb, StoreError, StoreResult,
    ELEMENTS, INTERFACES,
};

/// Interface record as persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredInterface {
    /// Unique interface identifier (UUID)
    pub id: String,
    /// Owning element
    pub element_id: String,
    /// Interface type name
    pub interface: String,
    /// Encrypted, serialized metadata document
    pub metadata: String,
    pub creation_time: DateTime<Utc>,
}

/// Interfaces of `element_id`, ordered by interface name.
pub(super) fn interfaces_of(
    table: &impl ReadableTable<&'static str, &'static [u8]>,
    element_id: &str,
) -> StoreResult<Vec<StoredInterface>> {
    scan_json(table, &owner_prefix(element_id))
}

/// Repository for interface operations.
pub struct InterfaceRepository<'a> {
    db: &'a ElementDb,
}

impl<'a> InterfaceRepository<'a> {
    /// Create a new InterfaceRepository.
    pub fn new(db: &'a ElementDb) -> Self {
        Self { db }
    }

    /// Get one interface of an element.
    pub fn get(&self, element_id: &str, interface: &str) -> StoreResult<StoredInterface> {
        self.db.read(|txn| {
            let table = txn.open_table(INTERFACES)?;
            get_json(&table, &pair_key(element_id, interface))?.ok_or_else(|| {
                StoreError::NotFound(format!("Interface {interface} on element {element_id}"))
            })
        })
    }

    /// Insert a new interface.
    ///
    /// # Returns
    /// - `Err(StoreError::MissingReference)` if the element does not exist
    /// - `Err(StoreError::AlreadyExists)` if the element already has this interface
    pub fn insert(
        &self,
        element_id: &str,
        interface: &str,
        metadata: String,
    ) -> StoreResult<StoredInterface> {
        self.db.write(|txn| {
            if txn.open_table(ELEMENTS)?.get(element_id)?.is_none() {
                return Err(StoreError::MissingReference(format!("Element {element_id}")));
            }

            let key = pair_key(element_id, interface);
            let mut table = txn.open_table(INTERFACES)?;
            if table.get(key.as_str())?.is_some() {
                return Err(StoreError::AlreadyExists(format!(
                    "Interface {interface} on element {element_id}"
                )));
            }

            let record = StoredInterface {
                id: Uuid::new_v4().to_string(),
                element_id: element_id.to_string(),
                interface: interface.to_string(),
                metadata,
                creation_time: Utc::now(),
            };
            table.insert(key.as_str(), to_json(&record)?.as_slice())?;
            Ok(record)
        })
    }

    /// Replace the metadata of an existing interface.
    ///
    /// `rewrite` receives the current record and returns the new metadata.
    /// It runs inside the write transaction, so the read-modify-write cannot
    /// interleave with another writer. Any error from `rewrite` aborts the
    /// transaction.
    pub fn update_metadata<E>(
        &self,
        element_id: &str,
        interface: &str,
        rewrite: impl FnOnce(&StoredInterface) -> Result<String, E>,
    ) -> Result<StoredInterface, E>
    where
        E: From<StoreError>,
    {
        self.db.write(|txn| {
            let key = pair_key(element_id, interface);
            let mut table = txn.open_table(INTERFACES).map_err(StoreError::from)?;

            let mut record: StoredInterface = get_json(&table, &key)?.ok_or_else(|| {
                StoreError::NotFound(format!("Interface {interface} on element {element_id}"))
            })?;
            record.metadata = rewrite(&record)?;

            let bytes = to_json(&record)?;
            table
                .insert(key.as_str(), bytes.as_slice())
                .map_err(StoreError::from)?;
            Ok(record)
        })
    }

    /// Delete an interface. Returns whether a row was removed.
    pub fn delete(&self, element_id: &str, interface: &str) -> StoreResult<bool> {
        self.db.write(|txn| {
            let mut table = txn.open_table(INTERFACES)?;
            let removed = table
                .remove(pair_key(element_id, interface).as_str())?
                .is_some();
            Ok(removed)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::database::temp_db;
    use crate::storage::repository::{ElementRepository, NewElement};

    fn element(db: &ElementDb, name: &str) -> String {
        ElementRepository::new(db)
            .create(&NewElement {
                name: name.to_string(),
                enabled: true,
                parent_id: None,
            })
            .unwrap()
            .id
    }

    #[test]
    fn insert_and_get_interface() {
        let (db, _dir) = temp_db();
        let element_id = element(&db, "router");
        let repo = InterfaceRepository::new(&db);

        let created = repo.insert(&element_id, "ssh", "blob".to_string()).unwrap();
        let loaded = repo.get(&element_id, "ssh").unwrap();

        assert_eq!(loaded, created);
        assert_eq!(loaded.metadata, "blob");
    }

    #[test]
    fn duplicate_interface_type_is_rejected() {
        let (db, _dir) = temp_db();
        let element_id = element(&db, "router");
        let repo = InterfaceRepository::new(&db);

        repo.insert(&element_id, "ssh", "first".to_string()).unwrap();
        let result = repo.insert(&element_id, "ssh", "second".to_string());

        assert!(matches!(result, Err(StoreError::AlreadyExists(_))));
        assert_eq!(repo.get(&element_id, "ssh").unwrap().metadata, "first");
    }

    #[test]
    fn same_type_on_different_elements_is_allowed() {
        let (db, _dir) = temp_db();
        let a = element(&db, "a");
        let b = element(&db, "b");
        let repo = InterfaceRepository::new(&db);

        repo.insert(&a, "ssh", "x".to_string()).unwrap();
        repo.insert(&b, "ssh", "y".to_string()).unwrap();

        let elements = ElementRepository::new(&db);
        assert_eq!(elements.load(&a).unwrap().interfaces[0].metadata, "x");
        assert_eq!(elements.load(&b).unwrap().interfaces[0].metadata, "y");
    }

    #[test]
    fn insert_for_unknown_element_fails() {
        let (db, _dir) = temp_db();
        let repo = InterfaceRepository::new(&db);

        let result = repo.insert("missing", "ssh", "x".to_string());
        assert!(matches!(result, Err(StoreError::MissingReference(_))));
    }

    #[test]
    fn update_metadata_rewrites_in_place() {
        let (db, _dir) = temp_db();
        let element_id = element(&db, "router");
        let repo = InterfaceRepository::new(&db);
        let created = repo.insert(&element_id, "netconf", "v1".to_string()).unwrap();

        let updated = repo
            .update_metadata(&element_id, "netconf", |current| -> StoreResult<String> {
                Ok(format!("{}+v2", current.metadata))
            })
            .unwrap();

        assert_eq!(updated.metadata, "v1+v2");
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.creation_time, created.creation_time);
    }

    #[test]
    fn failed_rewrite_leaves_metadata_untouched() {
        let (db, _dir) = temp_db();
        let element_id = element(&db, "router");
        let repo = InterfaceRepository::new(&db);
        repo.insert(&element_id, "netconf", "v1".to_string()).unwrap();

        let result = repo.update_metadata(&element_id, "netconf", |_| -> StoreResult<String> {
            Err(StoreError::InUse("rejected".to_string()))
        });
        assert!(result.is_err());
        assert_eq!(repo.get(&element_id, "netconf").unwrap().metadata, "v1");
    }

    #[test]
    fn update_missing_interface_is_not_found() {
        let (db, _dir) = temp_db();
        let element_id = element(&db, "router");
        let repo = InterfaceRepository::new(&db);

        let result = repo.update_metadata(&element_id, "snmp", |_| -> StoreResult<String> {
            Ok("never".to_string())
        });
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }

    #[test]
    fn delete_reports_whether_row_existed() {
        let (db, _dir) = temp_db();
        let element_id = element(&db, "router");
        let repo = InterfaceRepository::new(&db);
        repo.insert(&element_id, "ssh", "x".to_string()).unwrap();

        assert!(repo.delete(&element_id, "ssh").unwrap());
        assert!(!repo.delete(&element_id, "ssh").unwrap());
        assert!(matches!(
            repo.get(&element_id, "ssh"),
            Err(StoreError::NotFound(_))
        ));
    }
}
