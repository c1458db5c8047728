// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Inventory Storage Module
//!
//! Persistent storage for elements, interfaces and tags in a single embedded
//! redb database file (`$DATA_DIR/netrino.redb`).
//!
//! ## Security Model
//!
//! - Interface metadata is encrypted by [`MetadataCipher`] before it reaches
//!   a repository, and decrypted only when read back for a caller
//! - Element and tag data is stored in clear
//! - The metadata key comes from configuration and never touches disk here

pub mod cipher;
pub mod database;
pub mod repository;

pub use cipher::{CipherError, MetadataCipher};
pub use database::{ElementDb, StoreError, StoreResult};
pub use repository::{
    ElementChanges, ElementGraph, ElementRepository, InterfaceRepository, NewElement,
    StoredElement, StoredInterface, StoredTag, TagRepository,
};
