// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Repository layer providing typed access to the inventory database.
//!
//! Each repository provides CRUD operations for a specific entity type.
//! Every write runs in its own redb write transaction.

pub mod elements;
pub mod interfaces;
pub mod tags;

pub use elements::{ElementChanges, ElementGraph, ElementRepository, NewElement, StoredElement};
pub use interfaces::{InterfaceRepository, StoredInterface};
pub use tags::{StoredTag, TagRepository};
