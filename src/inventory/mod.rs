// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Element Inventory
//!
//! Composes the element store, the metadata cipher and the interface
//! registry into the operations exposed by the API.
//!
//! ## Interface Metadata Flow
//!
//! - **Write**: schema validate → canonical JSON → encrypt → persist
//! - **Update**: decrypt → merge → validate → encrypt, inside one write
//!   transaction
//! - **Read**: decrypt → parse. Any failure fails the whole read with
//!   [`InventoryError::CorruptedInterfaceData`]
//!
//! Validation always happens before anything is written.

pub mod error;

use std::sync::Arc;

use crate::interfaces::{Document, InterfaceRegistry, InterfaceSchema, InterfaceTypeInfo};
use crate::models::{
    CreateElementRequest, ElementPage, ElementSummary, ElementView, InterfaceView,
    ListElementsQuery, TagView, UpdateElementRequest,
};
use crate::storage::{
    ElementChanges, ElementDb, ElementGraph, ElementRepository, InterfaceRepository,
    MetadataCipher, NewElement, StoredInterface, TagRepository,
};

pub use error::{InventoryError, InventoryResult};

/// Shared inventory context, cloned into every request handler.
#[derive(Clone)]
pub struct Inventory {
    db: Arc<ElementDb>,
    cipher: Arc<MetadataCipher>,
    registry: Arc<InterfaceRegistry>,
}

impl Inventory {
    pub fn new(db: ElementDb, cipher: MetadataCipher, registry: InterfaceRegistry) -> Self {
        Self {
            db: Arc::new(db),
            cipher: Arc::new(cipher),
            registry: Arc::new(registry),
        }
    }

    /// Verify the database can be read.
    pub fn health_check(&self) -> InventoryResult<()> {
        Ok(self.db.health_check()?)
    }

    // =========================================================================
    // Elements
    // =========================================================================

    /// List top-level elements in insertion order.
    pub fn list_top_level_elements(&self, query: &ListElementsQuery) -> InventoryResult<ElementPage> {
        let search = query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        let matching: Vec<ElementSummary> = ElementRepository::new(&self.db)
            .list_top_level()?
            .iter()
            .filter(|e| match &search {
                Some(needle) => e.name.to_lowercase().contains(needle),
                None => true,
            })
            .map(ElementSummary::from)
            .collect();

        let total = matching.len();
        let items = matching
            .into_iter()
            .skip(query.offset.unwrap_or(0))
            .take(query.limit.unwrap_or(usize::MAX))
            .collect();

        Ok(ElementPage { items, total })
    }

    /// Create an element. `parent_id` overrides the parent in the request.
    pub fn create_element(
        &self,
        request: CreateElementRequest,
        parent_id: Option<String>,
    ) -> InventoryResult<ElementView> {
        let new = NewElement {
            name: validate_name(&request.name)?,
            enabled: request.enabled,
            parent_id: parent_id.or(request.parent_id),
        };

        let element = ElementRepository::new(&self.db)
            .create(&new)
            .map_err(|e| {
                InventoryError::from_store(
                    e,
                    InventoryError::DuplicateName,
                    InventoryError::ParentNotFound,
                )
            })?;

        tracing::info!(
            element_id = %element.id,
            parent_id = ?element.parent_id,
            "Element created"
        );

        self.view(ElementGraph {
            element,
            children: Vec::new(),
            interfaces: Vec::new(),
            tags: Vec::new(),
        })
    }

    /// Get an element with its children, decrypted interfaces and tags.
    pub fn get_element(&self, element_id: &str) -> InventoryResult<ElementView> {
        let graph = ElementRepository::new(&self.db).load(element_id)?;
        self.view(graph)
    }

    /// Apply a partial update and return the refreshed view.
    pub fn update_element(
        &self,
        element_id: &str,
        request: UpdateElementRequest,
    ) -> InventoryResult<ElementView> {
        let changes = ElementChanges {
            name: request.name.as_deref().map(validate_name).transpose()?,
            enabled: request.enabled,
            parent_id: request.parent_id,
        };

        ElementRepository::new(&self.db)
            .update(element_id, &changes)
            .map_err(|e| {
                InventoryError::from_store(
                    e,
                    InventoryError::DuplicateName,
                    InventoryError::ParentNotFound,
                )
            })?;

        tracing::info!(element_id = %element_id, "Element updated");
        self.get_element(element_id)
    }

    /// Delete an element that has no children, interfaces or tags.
    pub fn delete_element(&self, element_id: &str) -> InventoryResult<ElementSummary> {
        let element = ElementRepository::new(&self.db).delete(element_id)?;
        tracing::info!(element_id = %element_id, "Element deleted");
        Ok(ElementSummary::from(&element))
    }

    // =========================================================================
    // Interfaces
    // =========================================================================

    /// Validate `raw` against the interface type and attach it to the element.
    pub fn add_interface(
        &self,
        element_id: &str,
        interface: &str,
        raw: &Document,
    ) -> InventoryResult<InterfaceView> {
        let schema = self.registry.get(interface)?;
        let document = schema.validate(raw)?;
        let sealed = self.seal(schema.as_ref(), &document)?;

        let record = InterfaceRepository::new(&self.db)
            .insert(element_id, interface, sealed)
            .map_err(|e| {
                InventoryError::from_store(
                    e,
                    InventoryError::DuplicateInterface,
                    InventoryError::ElementNotFound,
                )
            })?;

        tracing::info!(
            element_id = %element_id,
            interface = %interface,
            "Interface added"
        );

        Ok(InterfaceView {
            interface: record.interface,
            metadata: document.into(),
            creation_time: record.creation_time,
        })
    }

    /// Merge `raw` into the stored metadata of an interface.
    pub fn update_interface(
        &self,
        element_id: &str,
        interface: &str,
        raw: &Document,
    ) -> InventoryResult<InterfaceView> {
        let schema = self.registry.get(interface)?;
        let mut merged = Document::new();

        let record = InterfaceRepository::new(&self.db).update_metadata(
            element_id,
            interface,
            |current| -> InventoryResult<String> {
                let existing = self.open(current)?;
                merged = schema.merge(&existing, raw)?;
                self.seal(schema.as_ref(), &merged)
            },
        )?;

        tracing::info!(
            element_id = %element_id,
            interface = %interface,
            "Interface updated"
        );

        Ok(InterfaceView {
            interface: record.interface,
            metadata: merged.into(),
            creation_time: record.creation_time,
        })
    }

    /// Read one interface with its metadata decrypted.
    pub fn view_interface(&self, element_id: &str, interface: &str) -> InventoryResult<InterfaceView> {
        let record = InterfaceRepository::new(&self.db).get(element_id, interface)?;
        self.interface_view(record)
    }

    /// Remove an interface. Removing an absent interface is not an error.
    pub fn delete_interface(&self, element_id: &str, interface: &str) -> InventoryResult<()> {
        let removed = InterfaceRepository::new(&self.db).delete(element_id, interface)?;
        if removed {
            tracing::info!(
                element_id = %element_id,
                interface = %interface,
                "Interface deleted"
            );
        }
        Ok(())
    }

    /// Registered interface types with their field descriptions.
    pub fn list_interface_types(&self) -> Vec<InterfaceTypeInfo> {
        self.registry.describe()
    }

    // =========================================================================
    // Tags
    // =========================================================================

    /// Tag an element. Tag names are unique across all elements.
    pub fn add_tag(&self, element_id: &str, name: &str) -> InventoryResult<ElementView> {
        let name = validate_name(name)?;
        TagRepository::new(&self.db)
            .add(element_id, &name)
            .map_err(|e| {
                InventoryError::from_store(
                    e,
                    InventoryError::DuplicateTag,
                    InventoryError::ElementNotFound,
                )
            })?;

        tracing::info!(element_id = %element_id, tag = %name, "Tag added");
        self.get_element(element_id)
    }

    /// Remove a tag from an element. Absent tags are ignored.
    pub fn delete_tag(&self, element_id: &str, name: &str) -> InventoryResult<ElementView> {
        ElementRepository::new(&self.db).get(element_id)?;

        if TagRepository::new(&self.db).remove(element_id, name.trim())? {
            tracing::info!(element_id = %element_id, tag = %name, "Tag removed");
        }
        self.get_element(element_id)
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn view(&self, graph: ElementGraph) -> InventoryResult<ElementView> {
        let interfaces = graph
            .interfaces
            .into_iter()
            .map(|record| self.interface_view(record))
            .collect::<InventoryResult<Vec<_>>>()?;

        Ok(ElementView {
            id: graph.element.id,
            parent_id: graph.element.parent_id,
            name: graph.element.name,
            enabled: graph.element.enabled,
            creation_time: graph.element.creation_time,
            children: graph.children.iter().map(ElementSummary::from).collect(),
            interfaces,
            tags: graph.tags.iter().map(TagView::from).collect(),
        })
    }

    fn interface_view(&self, record: StoredInterface) -> InventoryResult<InterfaceView> {
        let metadata = self.open(&record)?;
        Ok(InterfaceView {
            interface: record.interface,
            metadata: metadata.into(),
            creation_time: record.creation_time,
        })
    }

    /// Decrypt and parse stored metadata.
    fn open(&self, record: &StoredInterface) -> InventoryResult<Document> {
        let corrupted = |reason: String| {
            tracing::error!(
                element_id = %record.element_id,
                interface = %record.interface,
                reason = %reason,
                "Stored interface metadata is unreadable"
            );
            InventoryError::CorruptedInterfaceData {
                interface: record.interface.clone(),
                reason,
            }
        };

        let plaintext = self
            .cipher
            .decrypt(&record.metadata)
            .map_err(|e| corrupted(e.to_string()))?;
        serde_json::from_str(&plaintext).map_err(|e| corrupted(e.to_string()))
    }

    /// Serialize and encrypt a validated document.
    fn seal(&self, schema: &dyn InterfaceSchema, document: &Document) -> InventoryResult<String> {
        let json = schema.serialize(document)?;
        Ok(self.cipher.encrypt(&json)?)
    }
}

/// Element and tag names must not be blank or hold control characters;
/// surrounding whitespace is dropped.
fn validate_name(name: &str) -> InventoryResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(InventoryError::InvalidName("name must not be blank".to_string()));
    }
    if trimmed.contains(char::is_control) {
        return Err(InventoryError::InvalidName(format!(
            "'{trimmed}' contains a control character"
        )));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
pub(crate) fn temp_inventory() -> (Inventory, tempfile::TempDir) {
    let (db, dir) = crate::storage::database::temp_db();
    let key = MetadataCipher::generate_key().unwrap();
    let cipher = MetadataCipher::from_base64_key(&key).unwrap();
    (Inventory::new(db, cipher, InterfaceRegistry::with_builtin()), dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interfaces::{DeclarativeSchema, FieldKind, FieldSpec};
    use serde_json::{json, Value};

    fn doc(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    fn create(inventory: &Inventory, name: &str, parent_id: Option<&str>) -> ElementView {
        inventory
            .create_element(
                CreateElementRequest {
                    name: name.to_string(),
                    enabled: true,
                    parent_id: None,
                },
                parent_id.map(str::to_string),
            )
            .unwrap()
    }

    fn ssh() -> Document {
        doc(json!({"host": "10.0.0.1", "username": "admin", "password": "s3cret"}))
    }

    #[test]
    fn created_element_can_be_read_back() {
        let (inventory, _dir) = temp_inventory();
        let created = create(&inventory, "core-router", None);

        let loaded = inventory.get_element(&created.id).unwrap();
        assert_eq!(loaded.name, "core-router");
        assert!(loaded.enabled);
        assert!(loaded.parent_id.is_none());
        assert_eq!(loaded.creation_time, created.creation_time);
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let (inventory, _dir) = temp_inventory();
        create(&inventory, "r1", None);

        let result = inventory.create_element(
            CreateElementRequest {
                name: "r1".to_string(),
                enabled: false,
                parent_id: None,
            },
            None,
        );
        assert!(matches!(result, Err(InventoryError::DuplicateName(_))));
    }

    #[test]
    fn blank_name_is_rejected() {
        let (inventory, _dir) = temp_inventory();
        let result = inventory.create_element(
            CreateElementRequest {
                name: "   ".to_string(),
                enabled: true,
                parent_id: None,
            },
            None,
        );
        assert!(matches!(result, Err(InventoryError::InvalidName(_))));
    }

    #[test]
    fn missing_parent_is_reported() {
        let (inventory, _dir) = temp_inventory();
        let result = inventory.create_element(
            CreateElementRequest {
                name: "orphan".to_string(),
                enabled: true,
                parent_id: Some("nope".to_string()),
            },
            None,
        );
        assert!(matches!(result, Err(InventoryError::ParentNotFound(_))));
    }

    #[test]
    fn children_show_up_in_parent_view_only() {
        let (inventory, _dir) = temp_inventory();
        let site = create(&inventory, "site", None);
        let rack = create(&inventory, "rack", Some(&site.id));

        let view = inventory.get_element(&site.id).unwrap();
        assert_eq!(view.children.len(), 1);
        assert_eq!(view.children[0].id, rack.id);

        let page = inventory
            .list_top_level_elements(&ListElementsQuery::default())
            .unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].id, site.id);
    }

    #[test]
    fn listing_pages_and_searches() {
        let (inventory, _dir) = temp_inventory();
        for name in ["edge-1", "core-1", "edge-2", "edge-3"] {
            create(&inventory, name, None);
        }

        let page = inventory
            .list_top_level_elements(&ListElementsQuery {
                limit: Some(1),
                offset: Some(1),
                search: Some("EDGE".to_string()),
            })
            .unwrap();
        assert_eq!(page.total, 3);
        let names: Vec<&str> = page.items.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["edge-2"]);
    }

    #[test]
    fn update_is_partial_and_moves_elements() {
        let (inventory, _dir) = temp_inventory();
        let site = create(&inventory, "site", None);
        let rack = create(&inventory, "rack", Some(&site.id));

        let updated = inventory
            .update_element(
                &rack.id,
                UpdateElementRequest {
                    enabled: Some(false),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.name, "rack");
        assert!(!updated.enabled);
        assert_eq!(updated.parent_id.as_deref(), Some(site.id.as_str()));

        let moved = inventory
            .update_element(
                &rack.id,
                UpdateElementRequest {
                    parent_id: Some(None),
                    ..Default::default()
                },
            )
            .unwrap();
        assert!(moved.parent_id.is_none());
        assert_eq!(moved.creation_time, rack.creation_time);
    }

    #[test]
    fn reparenting_under_descendant_is_a_cycle() {
        let (inventory, _dir) = temp_inventory();
        let site = create(&inventory, "site", None);
        let rack = create(&inventory, "rack", Some(&site.id));

        let result = inventory.update_element(
            &site.id,
            UpdateElementRequest {
                parent_id: Some(Some(rack.id.clone())),
                ..Default::default()
            },
        );
        assert!(matches!(result, Err(InventoryError::ParentCycle(_))));
    }

    #[test]
    fn reparent_to_missing_parent_leaves_element_unchanged() {
        let (inventory, _dir) = temp_inventory();
        let site = create(&inventory, "site", None);
        let rack = create(&inventory, "rack", Some(&site.id));

        let result = inventory.update_element(
            &rack.id,
            UpdateElementRequest {
                name: Some("rack-renamed".to_string()),
                enabled: Some(false),
                parent_id: Some(Some("nope".to_string())),
            },
        );
        assert!(matches!(result, Err(InventoryError::ParentNotFound(_))));

        let stored = inventory.get_element(&rack.id).unwrap();
        assert_eq!(stored.name, "rack");
        assert!(stored.enabled);
        assert_eq!(stored.parent_id.as_deref(), Some(site.id.as_str()));
        assert_eq!(inventory.get_element(&site.id).unwrap().children.len(), 1);
    }

    #[test]
    fn updating_unknown_element_is_not_found() {
        let (inventory, _dir) = temp_inventory();
        let result = inventory.update_element(
            "missing",
            UpdateElementRequest {
                enabled: Some(false),
                ..Default::default()
            },
        );
        assert!(matches!(result, Err(InventoryError::NotFound(_))));
    }

    #[test]
    fn names_may_contain_separator_characters() {
        let (inventory, _dir) = temp_inventory();
        let rack = create(&inventory, "rack|01", None);
        assert_eq!(inventory.get_element(&rack.id).unwrap().name, "rack|01");

        let view = inventory.add_tag(&rack.id, "site|jhb").unwrap();
        assert_eq!(view.tags, vec![TagView { name: "site|jhb".to_string() }]);

        let view = inventory.delete_tag(&rack.id, "site|jhb").unwrap();
        assert!(view.tags.is_empty());
    }

    #[test]
    fn control_characters_in_names_are_rejected() {
        let (inventory, _dir) = temp_inventory();
        let result = inventory.create_element(
            CreateElementRequest {
                name: "rack\n01".to_string(),
                enabled: true,
                parent_id: None,
            },
            None,
        );
        assert!(matches!(result, Err(InventoryError::InvalidName(_))));
    }

    #[test]
    fn rename_to_taken_name_fails() {
        let (inventory, _dir) = temp_inventory();
        create(&inventory, "a", None);
        let b = create(&inventory, "b", None);

        let result = inventory.update_element(
            &b.id,
            UpdateElementRequest {
                name: Some("a".to_string()),
                ..Default::default()
            },
        );
        assert!(matches!(result, Err(InventoryError::DuplicateName(_))));
    }

    #[test]
    fn interface_round_trips_normalized_document() {
        let (inventory, _dir) = temp_inventory();
        let element = create(&inventory, "r1", None);

        let added = inventory
            .add_interface(&element.id, "ssh", &doc(json!({"host": " r1.lab ", "username": "ops", "port": "2222"})))
            .unwrap();
        let viewed = inventory.view_interface(&element.id, "ssh").unwrap();

        assert_eq!(viewed.metadata, json!({"host": "r1.lab", "port": 2222, "username": "ops"}));
        assert_eq!(viewed, added);

        let view = inventory.get_element(&element.id).unwrap();
        assert_eq!(view.interfaces, vec![viewed]);
    }

    #[test]
    fn metadata_is_encrypted_at_rest() {
        let (inventory, _dir) = temp_inventory();
        let element = create(&inventory, "r1", None);
        inventory.add_interface(&element.id, "ssh", &ssh()).unwrap();

        let stored = InterfaceRepository::new(&inventory.db)
            .get(&element.id, "ssh")
            .unwrap();
        assert!(!stored.metadata.contains("s3cret"));
        assert!(!stored.metadata.contains("10.0.0.1"));
    }

    #[test]
    fn second_interface_of_same_type_is_rejected() {
        let (inventory, _dir) = temp_inventory();
        let element = create(&inventory, "r1", None);
        inventory.add_interface(&element.id, "ssh", &ssh()).unwrap();

        let result = inventory.add_interface(&element.id, "ssh", &ssh());
        assert!(matches!(result, Err(InventoryError::DuplicateInterface(_))));
    }

    #[test]
    fn interface_validation_happens_before_any_write() {
        let (inventory, _dir) = temp_inventory();
        let element = create(&inventory, "r1", None);

        let result = inventory.add_interface(&element.id, "ssh", &doc(json!({"host": "r1"})));
        assert!(matches!(
            result,
            Err(InventoryError::InvalidInterfaceData { ref field, .. }) if field == "username"
        ));
        assert!(matches!(
            inventory.view_interface(&element.id, "ssh"),
            Err(InventoryError::NotFound(_))
        ));
    }

    #[test]
    fn unknown_interface_type_and_element_are_reported() {
        let (inventory, _dir) = temp_inventory();
        let element = create(&inventory, "r1", None);

        assert!(matches!(
            inventory.add_interface(&element.id, "telnet", &ssh()),
            Err(InventoryError::UnknownInterfaceType(_))
        ));
        assert!(matches!(
            inventory.add_interface("missing", "ssh", &ssh()),
            Err(InventoryError::ElementNotFound(_))
        ));
    }

    #[test]
    fn update_interface_merges_fields() {
        let registry = {
            let mut registry = InterfaceRegistry::new();
            let kind = FieldKind::Integer { min: 0, max: 100 };
            registry
                .register(Arc::new(DeclarativeSchema::new(
                    "counters",
                    "",
                    vec![
                        FieldSpec::optional("a", kind.clone()),
                        FieldSpec::optional("b", kind.clone()),
                        FieldSpec::optional("c", kind),
                    ],
                )))
                .unwrap();
            registry
        };
        let (db, _dir) = crate::storage::database::temp_db();
        let key = MetadataCipher::generate_key().unwrap();
        let inventory = Inventory::new(db, MetadataCipher::from_base64_key(&key).unwrap(), registry);
        let element = create(&inventory, "r1", None);

        inventory
            .add_interface(&element.id, "counters", &doc(json!({"a": 1, "b": 2})))
            .unwrap();
        let updated = inventory
            .update_interface(&element.id, "counters", &doc(json!({"b": 3, "c": 4})))
            .unwrap();

        assert_eq!(updated.metadata, json!({"a": 1, "b": 3, "c": 4}));
        assert_eq!(
            inventory.view_interface(&element.id, "counters").unwrap().metadata,
            json!({"a": 1, "b": 3, "c": 4})
        );
    }

    #[test]
    fn invalid_update_keeps_stored_metadata() {
        let (inventory, _dir) = temp_inventory();
        let element = create(&inventory, "r1", None);
        inventory.add_interface(&element.id, "ssh", &ssh()).unwrap();

        let result = inventory.update_interface(&element.id, "ssh", &doc(json!({"port": 0})));
        assert!(matches!(result, Err(InventoryError::InvalidInterfaceData { .. })));
        assert_eq!(
            inventory.view_interface(&element.id, "ssh").unwrap().metadata["port"],
            json!(22)
        );
    }

    #[test]
    fn update_missing_interface_is_not_found() {
        let (inventory, _dir) = temp_inventory();
        let element = create(&inventory, "r1", None);

        let result = inventory.update_interface(&element.id, "ssh", &ssh());
        assert!(matches!(result, Err(InventoryError::NotFound(_))));
    }

    #[test]
    fn deleting_absent_interface_succeeds() {
        let (inventory, _dir) = temp_inventory();
        let element = create(&inventory, "r1", None);

        inventory.delete_interface(&element.id, "ssh").unwrap();
        inventory.add_interface(&element.id, "ssh", &ssh()).unwrap();
        inventory.delete_interface(&element.id, "ssh").unwrap();
        inventory.delete_interface(&element.id, "ssh").unwrap();

        assert!(inventory.get_element(&element.id).unwrap().interfaces.is_empty());
    }

    #[test]
    fn undecryptable_metadata_fails_the_element_read() {
        let (inventory, _dir) = temp_inventory();
        let element = create(&inventory, "r1", None);
        InterfaceRepository::new(&inventory.db)
            .insert(&element.id, "ssh", "bm90IGNpcGhlcnRleHQ=".to_string())
            .unwrap();

        let result = inventory.get_element(&element.id);
        assert!(matches!(
            result,
            Err(InventoryError::CorruptedInterfaceData { ref interface, .. }) if interface == "ssh"
        ));
    }

    #[test]
    fn tags_are_global_and_returned_in_view() {
        let (inventory, _dir) = temp_inventory();
        let a = create(&inventory, "a", None);
        let b = create(&inventory, "b", None);

        let view = inventory.add_tag(&a.id, "prod").unwrap();
        assert_eq!(view.tags, vec![TagView { name: "prod".to_string() }]);

        let result = inventory.add_tag(&b.id, "prod");
        assert!(matches!(result, Err(InventoryError::DuplicateTag(_))));
    }

    #[test]
    fn delete_tag_is_a_no_op_when_absent() {
        let (inventory, _dir) = temp_inventory();
        let a = create(&inventory, "a", None);
        inventory.add_tag(&a.id, "prod").unwrap();

        let view = inventory.delete_tag(&a.id, "staging").unwrap();
        assert_eq!(view.tags.len(), 1);

        let view = inventory.delete_tag(&a.id, "prod").unwrap();
        assert!(view.tags.is_empty());

        assert!(matches!(
            inventory.delete_tag("missing", "prod"),
            Err(InventoryError::NotFound(_))
        ));
    }

    #[test]
    fn delete_is_restricted_while_element_is_in_use() {
        let (inventory, _dir) = temp_inventory();
        let site = create(&inventory, "site", None);
        let rack = create(&inventory, "rack", Some(&site.id));
        inventory.add_interface(&rack.id, "ssh", &ssh()).unwrap();
        inventory.add_tag(&rack.id, "prod").unwrap();

        assert!(matches!(
            inventory.delete_element(&site.id),
            Err(InventoryError::ElementInUse(_))
        ));
        assert!(matches!(
            inventory.delete_element(&rack.id),
            Err(InventoryError::ElementInUse(_))
        ));

        // Nothing was removed
        let rack_view = inventory.get_element(&rack.id).unwrap();
        assert_eq!(rack_view.interfaces.len(), 1);
        assert_eq!(rack_view.tags.len(), 1);
        assert_eq!(inventory.get_element(&site.id).unwrap().children.len(), 1);

        inventory.delete_interface(&rack.id, "ssh").unwrap();
        inventory.delete_tag(&rack.id, "prod").unwrap();
        let deleted = inventory.delete_element(&rack.id).unwrap();
        assert_eq!(deleted.id, rack.id);
        inventory.delete_element(&site.id).unwrap();

        assert!(matches!(
            inventory.get_element(&site.id),
            Err(InventoryError::NotFound(_))
        ));
    }

    #[test]
    fn interface_types_are_listed() {
        let (inventory, _dir) = temp_inventory();
        let names: Vec<String> = inventory
            .list_interface_types()
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, vec!["netconf", "snmp", "ssh"]);
    }
}
