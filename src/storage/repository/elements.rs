// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Element repository.
//!
//! Elements form a tree through `parent_id`. Names are unique across the
//! whole tree, enforced by the `netrino_element_name` index. Children are
//! listed through the `netrino_element_tree` index in insertion order.
//!
//! Deleting an element is restricted: it fails while the element still has
//! children, interfaces or tags.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use redb::ReadableTable;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::interfaces::{interfaces_of, StoredInterface};
use super::tags::{tags_of, StoredTag};
use crate::storage::database::{
    get_json, has_prefix, next_element_seq, owner_prefix, scan_str, to_json, tree_key,
    ElementDb, StoreError, StoreResult, ELEMENTS, ELEMENT_NAMES, ELEMENT_TAGS, ELEMENT_TREE,
    INTERFACES,
};

/// Element record as persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredElement {
    /// Unique element identifier (UUID)
    pub id: String,
    /// Parent element, `None` for top-level elements
    pub parent_id: Option<String>,
    /// Globally unique name
    pub name: String,
    pub enabled: bool,
    /// Set once at creation
    pub creation_time: DateTime<Utc>,
    /// Insertion sequence, used for stable listing order
    pub seq: u64,
}

/// Input for creating an element.
#[derive(Debug, Clone)]
pub struct NewElement {
    pub name: String,
    pub enabled: bool,
    pub parent_id: Option<String>,
}

/// Partial update of an element. `None` leaves a field untouched;
/// `parent_id: Some(None)` moves the element to the top level.
#[derive(Debug, Clone, Default)]
pub struct ElementChanges {
    pub name: Option<String>,
    pub enabled: Option<bool>,
    pub parent_id: Option<Option<String>>,
}

/// An element together with everything hanging off it, read from one snapshot.
#[derive(Debug, Clone)]
pub struct ElementGraph {
    pub element: StoredElement,
    pub children: Vec<StoredElement>,
    pub interfaces: Vec<StoredInterface>,
    pub tags: Vec<StoredTag>,
}

/// Load the elements listed under `parent_id` in the tree index.
fn children_of(
    tree: &impl ReadableTable<&'static str, &'static str>,
    elements: &impl ReadableTable<&'static str, &'static [u8]>,
    parent_id: Option<&str>,
) -> StoreResult<Vec<StoredElement>> {
    let prefix = owner_prefix(parent_id.unwrap_or(""));
    let mut children = Vec::new();
    for (_, child_id) in scan_str(tree, &prefix)? {
        match get_json::<StoredElement>(elements, &child_id)? {
            Some(child) => children.push(child),
            None => tracing::warn!(child_id = %child_id, "Tree index points at missing element"),
        }
    }
    Ok(children)
}

/// Repository for element operations.
pub struct ElementRepository<'a> {
    db: &'a ElementDb,
}

impl<'a> ElementRepository<'a> {
    /// Create a new ElementRepository.
    pub fn new(db: &'a ElementDb) -> Self {
        Self { db }
    }

    /// List elements without a parent, in insertion order.
    pub fn list_top_level(&self) -> StoreResult<Vec<StoredElement>> {
        self.db.read(|txn| {
            let tree = txn.open_table(ELEMENT_TREE)?;
            let elements = txn.open_table(ELEMENTS)?;
            children_of(&tree, &elements, None)
        })
    }

    /// Get an element by ID.
    pub fn get(&self, element_id: &str) -> StoreResult<StoredElement> {
        self.db.read(|txn| {
            let elements = txn.open_table(ELEMENTS)?;
            get_json(&elements, element_id)?
                .ok_or_else(|| StoreError::NotFound(format!("Element {element_id}")))
        })
    }

    /// Load an element with its children, interfaces and tags.
    pub fn load(&self, element_id: &str) -> StoreResult<ElementGraph> {
        self.db.read(|txn| {
            let elements = txn.open_table(ELEMENTS)?;
            let element: StoredElement = get_json(&elements, element_id)?
                .ok_or_else(|| StoreError::NotFound(format!("Element {element_id}")))?;

            let tree = txn.open_table(ELEMENT_TREE)?;
            let children = children_of(&tree, &elements, Some(element_id))?;

            let interfaces = interfaces_of(&txn.open_table(INTERFACES)?, element_id)?;
            let tags = tags_of(&txn.open_table(ELEMENT_TAGS)?, element_id)?;

            Ok(ElementGraph {
                element,
                children,
                interfaces,
                tags,
            })
        })
    }

    /// Create a new element.
    ///
    /// # Returns
    /// - `Err(StoreError::AlreadyExists)` if the name is taken
    /// - `Err(StoreError::MissingReference)` if the parent does not exist
    pub fn create(&self, new: &NewElement) -> StoreResult<StoredElement> {
        self.db.write(|txn| {
            let mut names = txn.open_table(ELEMENT_NAMES)?;
            if names.get(new.name.as_str())?.is_some() {
                return Err(StoreError::AlreadyExists(new.name.clone()));
            }

            let mut elements = txn.open_table(ELEMENTS)?;
            if let Some(parent_id) = &new.parent_id {
                if elements.get(parent_id.as_str())?.is_none() {
                    return Err(StoreError::MissingReference(format!("Element {parent_id}")));
                }
            }

            let element = StoredElement {
                id: Uuid::new_v4().to_string(),
                parent_id: new.parent_id.clone(),
                name: new.name.clone(),
                enabled: new.enabled,
                creation_time: Utc::now(),
                seq: next_element_seq(txn)?,
            };

            elements.insert(element.id.as_str(), to_json(&element)?.as_slice())?;
            names.insert(element.name.as_str(), element.id.as_str())?;

            let mut tree = txn.open_table(ELEMENT_TREE)?;
            let key = tree_key(element.parent_id.as_deref(), element.seq, &element.id);
            tree.insert(key.as_str(), element.id.as_str())?;

            Ok(element)
        })
    }

    /// Apply a partial update to an element.
    ///
    /// Name uniqueness, parent existence and tree acyclicity are re-checked
    /// before anything is written.
    pub fn update(&self, element_id: &str, changes: &ElementChanges) -> StoreResult<StoredElement> {
        self.db.write(|txn| {
            let mut elements = txn.open_table(ELEMENTS)?;
            let mut names = txn.open_table(ELEMENT_NAMES)?;

            let mut element: StoredElement = get_json(&elements, element_id)?
                .ok_or_else(|| StoreError::NotFound(format!("Element {element_id}")))?;

            let rename = changes
                .name
                .as_ref()
                .filter(|name| **name != element.name)
                .cloned();
            if let Some(name) = &rename {
                if names.get(name.as_str())?.is_some() {
                    return Err(StoreError::AlreadyExists(name.clone()));
                }
            }

            let reparent = changes
                .parent_id
                .as_ref()
                .filter(|parent| **parent != element.parent_id)
                .cloned();
            if let Some(Some(parent_id)) = &reparent {
                if get_json::<StoredElement>(&elements, parent_id)?.is_none() {
                    return Err(StoreError::MissingReference(format!("Element {parent_id}")));
                }
                ensure_not_ancestor(&elements, element_id, parent_id)?;
            }

            if let Some(name) = rename {
                names.remove(element.name.as_str())?;
                names.insert(name.as_str(), element_id)?;
                element.name = name;
            }

            if let Some(enabled) = changes.enabled {
                element.enabled = enabled;
            }

            if let Some(parent_id) = reparent {
                let mut tree = txn.open_table(ELEMENT_TREE)?;
                let old_key = tree_key(element.parent_id.as_deref(), element.seq, element_id);
                let new_key = tree_key(parent_id.as_deref(), element.seq, element_id);
                tree.remove(old_key.as_str())?;
                tree.insert(new_key.as_str(), element_id)?;
                element.parent_id = parent_id;
            }

            elements.insert(element_id, to_json(&element)?.as_slice())?;
            Ok(element)
        })
    }

    /// Delete an element.
    ///
    /// # Returns
    /// - `Err(StoreError::NotFound)` if the element does not exist
    /// - `Err(StoreError::InUse)` if it still has children, interfaces or tags
    pub fn delete(&self, element_id: &str) -> StoreResult<StoredElement> {
        self.db.write(|txn| {
            let mut elements = txn.open_table(ELEMENTS)?;
            let element: StoredElement = get_json(&elements, element_id)?
                .ok_or_else(|| StoreError::NotFound(format!("Element {element_id}")))?;

            let prefix = owner_prefix(element_id);
            let mut tree = txn.open_table(ELEMENT_TREE)?;

            let mut dependents = Vec::new();
            if has_prefix(&tree, &prefix)? {
                dependents.push("children");
            }
            if has_prefix(&txn.open_table(INTERFACES)?, &prefix)? {
                dependents.push("interfaces");
            }
            if has_prefix(&txn.open_table(ELEMENT_TAGS)?, &prefix)? {
                dependents.push("tags");
            }
            if !dependents.is_empty() {
                return Err(StoreError::InUse(format!(
                    "Element {element_id} still has {}",
                    dependents.join(", ")
                )));
            }

            elements.remove(element_id)?;
            txn.open_table(ELEMENT_NAMES)?
                .remove(element.name.as_str())?;
            let key = tree_key(element.parent_id.as_deref(), element.seq, element_id);
            tree.remove(key.as_str())?;

            Ok(element)
        })
    }
}

/// Fail if `element_id` appears on the ancestor chain starting at `parent_id`
/// (including `parent_id` itself).
fn ensure_not_ancestor(
    elements: &impl ReadableTable<&'static str, &'static [u8]>,
    element_id: &str,
    parent_id: &str,
) -> StoreResult<()> {
    let mut visited = HashSet::new();
    let mut cursor = Some(parent_id.to_string());

    while let Some(current) = cursor {
        if current == element_id {
            return Err(StoreError::Cycle(format!(
                "Element {parent_id} is {element_id} or one of its descendants"
            )));
        }
        if !visited.insert(current.clone()) {
            break;
        }
        cursor = get_json::<StoredElement>(elements, &current)?.and_then(|e| e.parent_id);
    }
    Ok(())
}
