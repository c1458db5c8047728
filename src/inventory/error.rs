// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Inventory operation errors.

use crate::interfaces::SchemaError;
use crate::storage::{CipherError, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("Parent element not found: {0}")]
    ParentNotFound(String),

    #[error("Element name already in use: {0}")]
    DuplicateName(String),

    #[error("Interface already exists: {0}")]
    DuplicateInterface(String),

    #[error("Tag already in use: {0}")]
    DuplicateTag(String),

    #[error("Element in use: {0}")]
    ElementInUse(String),

    #[error("Parent cycle: {0}")]
    ParentCycle(String),

    #[error("Invalid element name: {0}")]
    InvalidName(String),

    #[error("Invalid interface data: field '{field}' {reason}")]
    InvalidInterfaceData { field: String, reason: String },

    #[error("Unknown interface type: {0}")]
    UnknownInterfaceType(String),

    /// Stored metadata could not be decrypted or parsed.
    #[error("Corrupted data for interface {interface}: {reason}")]
    CorruptedInterfaceData { interface: String, reason: String },

    #[error("Metadata codec error: {0}")]
    Codec(#[from] CipherError),

    #[error("Transaction failed: {0}")]
    TransactionFailure(StoreError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl InventoryError {
    /// Stable snake_case identifier for API error bodies.
    pub fn error_code(&self) -> &'static str {
        match self {
            InventoryError::NotFound(_) => "not_found",
            InventoryError::ElementNotFound(_) => "element_not_found",
            InventoryError::ParentNotFound(_) => "parent_not_found",
            InventoryError::DuplicateName(_) => "duplicate_name",
            InventoryError::DuplicateInterface(_) => "duplicate_interface",
            InventoryError::DuplicateTag(_) => "duplicate_tag",
            InventoryError::ElementInUse(_) => "element_in_use",
            InventoryError::ParentCycle(_) => "parent_cycle",
            InventoryError::InvalidName(_) => "invalid_name",
            InventoryError::InvalidInterfaceData { .. } => "invalid_interface_data",
            InventoryError::UnknownInterfaceType(_) => "unknown_interface_type",
            InventoryError::CorruptedInterfaceData { .. } => "corrupted_interface_data",
            InventoryError::Codec(_) => "codec_error",
            InventoryError::TransactionFailure(_) => "transaction_failure",
            InventoryError::Internal(_) => "internal_error",
        }
    }

    /// Map a store error, naming what an `AlreadyExists` or
    /// `MissingReference` means for the calling operation.
    pub(crate) fn from_store(
        err: StoreError,
        duplicate: fn(String) -> Self,
        missing: fn(String) -> Self,
    ) -> Self {
        match err {
            StoreError::AlreadyExists(msg) => duplicate(msg),
            StoreError::MissingReference(msg) => missing(msg),
            other => other.into(),
        }
    }
}

impl From<StoreError> for InventoryError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(msg) => InventoryError::NotFound(msg),
            StoreError::AlreadyExists(msg) => InventoryError::DuplicateName(msg),
            StoreError::MissingReference(msg) => InventoryError::ElementNotFound(msg),
            StoreError::Cycle(msg) => InventoryError::ParentCycle(msg),
            StoreError::InUse(msg) => InventoryError::ElementInUse(msg),
            engine => InventoryError::TransactionFailure(engine),
        }
    }
}

impl From<SchemaError> for InventoryError {
    fn from(err: SchemaError) -> Self {
        match err {
            SchemaError::UnknownInterfaceType(name) => InventoryError::UnknownInterfaceType(name),
            SchemaError::InvalidField { field, reason } => {
                InventoryError::InvalidInterfaceData { field, reason }
            }
            other => InventoryError::Internal(other.to_string()),
        }
    }
}

pub type InventoryResult<T> = Result<T, InventoryError>;
