// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Registry of interface types, keyed by name.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use utoipa::ToSchema;

use super::builtin;
use super::schema::{FieldDescriptor, InterfaceSchema, SchemaError, SchemaResult};

/// Names that cannot be used as interface types.
///
/// `tag` is taken by the `/element/{id}/tag/{tag}` route.
const RESERVED_NAMES: &[&str] = &["tag"];

/// Interface type description for the type listing.
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq)]
pub struct InterfaceTypeInfo {
    pub name: String,
    pub description: String,
    pub fields: Vec<FieldDescriptor>,
}

/// Name-to-schema mapping. Populated at startup, read-only afterwards.
#[derive(Clone, Default)]
pub struct InterfaceRegistry {
    schemas: BTreeMap<String, Arc<dyn InterfaceSchema>>,
}

impl std::fmt::Debug for InterfaceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InterfaceRegistry")
            .field("types", &self.names())
            .finish()
    }
}

impl InterfaceRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in types (`ssh`, `netconf`, `snmp`).
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        for schema in builtin::all() {
            registry.schemas.insert(schema.name().to_string(), schema);
        }
        registry
    }

    /// Register a new interface type.
    pub fn register(&mut self, schema: Arc<dyn InterfaceSchema>) -> SchemaResult<()> {
        let name = schema.name().to_string();
        if !is_valid_type_name(&name) {
            return Err(SchemaError::InvalidTypeName(name));
        }
        if self.schemas.contains_key(&name) {
            return Err(SchemaError::AlreadyRegistered(name));
        }
        tracing::debug!(interface = %name, "Registered interface type");
        self.schemas.insert(name, schema);
        Ok(())
    }

    /// Look up the schema for an interface type.
    pub fn get(&self, name: &str) -> SchemaResult<Arc<dyn InterfaceSchema>> {
        self.schemas
            .get(name)
            .cloned()
            .ok_or_else(|| SchemaError::UnknownInterfaceType(name.to_string()))
    }

    /// Registered type names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.schemas.keys().map(String::as_str).collect()
    }

    /// Describe every registered type, sorted by name.
    pub fn describe(&self) -> Vec<InterfaceTypeInfo> {
        self.schemas
            .values()
            .map(|schema| InterfaceTypeInfo {
                name: schema.name().to_string(),
                description: schema.description().to_string(),
                fields: schema.fields(),
            })
            .collect()
    }
}

/// Type names end up in URL paths and `element|interface` storage keys.
fn is_valid_type_name(name: &str) -> bool {
    !name.is_empty()
        && !RESERVED_NAMES.contains(&name)
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
