// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Interface Types
//!
//! An interface is a typed metadata document attached to an element (SSH
//! credentials, an SNMP community, ...). Each type has an
//! [`InterfaceSchema`] that validates, normalizes and merges documents.
//! Schemas live in an [`InterfaceRegistry`] built at startup.

pub mod builtin;
pub mod registry;
pub mod schema;

pub use registry::{InterfaceRegistry, InterfaceTypeInfo};
pub use schema::{
    DeclarativeSchema, Document, FieldDescriptor, FieldKind, FieldSpec, InterfaceSchema,
    SchemaError, SchemaResult,
};
