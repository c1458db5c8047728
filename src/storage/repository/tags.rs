// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Element tag repository.
//!
//! Tag names are unique across ALL elements (the `netrino_element_tag`
//! table is keyed by name alone), so two elements cannot carry the same tag
//! at the same time. `netrino_element_tag_index` lists the tags per element.

use redb::ReadableTable;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::storage::database::{
    get_json, owner_prefix, pair_key, scan_str, to_json, ElementDb, StoreError, StoreResult,
    ELEMENTS, ELEMENT_TAGS, TAGS,
};

/// Tag record as persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredTag {
    /// Unique tag identifier (UUID)
    pub id: String,
    pub name: String,
    /// Element carrying the tag
    pub element_id: String,
}

/// Tags of `element_id` from the per-element index, ordered by name.
pub(super) fn tags_of(
    index: &impl ReadableTable<&'static str, &'static str>,
    element_id: &str,
) -> StoreResult<Vec<StoredTag>> {
    let prefix = owner_prefix(element_id);
    Ok(scan_str(index, &prefix)?
        .into_iter()
        .map(|(key, tag_id)| StoredTag {
            id: tag_id,
            name: key[prefix.len()..].to_string(),
            element_id: element_id.to_string(),
        })
        .collect())
}

/// Repository for tag operations.
pub struct TagRepository<'a> {
    db: &'a ElementDb,
}

impl<'a> TagRepository<'a> {
    /// Create a new TagRepository.
    pub fn new(db: &'a ElementDb) -> Self {
        Self { db }
    }

    /// Attach a tag to an element.
    ///
    /// # Returns
    /// - `Err(StoreError::MissingReference)` if the element does not exist
    /// - `Err(StoreError::AlreadyExists)` if any element already uses the name
    pub fn add(&self, element_id: &str, name: &str) -> StoreResult<StoredTag> {
        self.db.write(|txn| {
            if txn.open_table(ELEMENTS)?.get(element_id)?.is_none() {
                return Err(StoreError::MissingReference(format!("Element {element_id}")));
            }

            let mut tags = txn.open_table(TAGS)?;
            if let Some(existing) = get_json::<StoredTag>(&tags, name)? {
                return Err(StoreError::AlreadyExists(format!(
                    "Tag {name} (on element {})",
                    existing.element_id
                )));
            }

            let tag = StoredTag {
                id: Uuid::new_v4().to_string(),
                name: name.to_string(),
                element_id: element_id.to_string(),
            };
            tags.insert(name, to_json(&tag)?.as_slice())?;
            txn.open_table(ELEMENT_TAGS)?
                .insert(pair_key(element_id, name).as_str(), tag.id.as_str())?;

            Ok(tag)
        })
    }

    /// Remove a tag from an element. Returns whether a row was removed;
    /// a tag of the same name on another element is left alone.
    pub fn remove(&self, element_id: &str, name: &str) -> StoreResult<bool> {
        self.db.write(|txn| {
            let removed = txn
                .open_table(ELEMENT_TAGS)?
                .remove(pair_key(element_id, name).as_str())?
                .is_some();
            if removed {
                txn.open_table(TAGS)?.remove(name)?;
            }
            Ok(removed)
        })
    }
}
