// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request and response data structures used by the REST API. All types
//! derive `ToSchema` for OpenAPI documentation.
//!
//! ## Model Categories
//!
//! - **Elements**: inventory nodes and their tree position
//! - **Interfaces**: typed, decrypted metadata documents attached to elements
//! - **Tags**: free-form element labels

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};

use crate::storage::{StoredElement, StoredTag};

// =============================================================================
// Element Models
// =============================================================================

/// Element without its attachments, as listed.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct ElementSummary {
    pub id: String,
    pub name: String,
    pub enabled: bool,
    pub creation_time: DateTime<Utc>,
}

impl From<&StoredElement> for ElementSummary {
    fn from(element: &StoredElement) -> Self {
        Self {
            id: element.id.clone(),
            name: element.name.clone(),
            enabled: element.enabled,
            creation_time: element.creation_time,
        }
    }
}

/// One page of top-level elements.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct ElementPage {
    pub items: Vec<ElementSummary>,
    /// Number of matching elements before paging
    pub total: usize,
}

/// Full element view with children, decrypted interfaces and tags.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ElementView {
    pub id: String,
    /// Parent element, `null` for top-level elements
    pub parent_id: Option<String>,
    pub name: String,
    pub enabled: bool,
    pub creation_time: DateTime<Utc>,
    pub children: Vec<ElementSummary>,
    pub interfaces: Vec<InterfaceView>,
    pub tags: Vec<TagView>,
}

/// Request to create an element.
///
/// When posted to `/v1/element/{id}`, the path id becomes the parent and
/// `parent_id` in the body is ignored.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateElementRequest {
    pub name: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub parent_id: Option<String>,
}

fn default_enabled() -> bool {
    true
}

/// Partial element update. Absent fields are left untouched; an explicit
/// `"parent_id": null` moves the element to the top level.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateElementRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(
        default,
        deserialize_with = "explicit_null",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>)]
    pub parent_id: Option<Option<String>>,
}

/// Distinguish a missing field (`None`) from an explicit `null` (`Some(None)`).
fn explicit_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Paging and filtering for the top-level element listing.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListElementsQuery {
    /// Maximum number of items to return
    pub limit: Option<usize>,
    /// Number of matching items to skip
    pub offset: Option<usize>,
    /// Case-insensitive substring match on the element name
    pub search: Option<String>,
}

// =============================================================================
// Interface Models
// =============================================================================

/// Interface attached to an element, with its metadata decrypted.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct InterfaceView {
    /// Interface type name
    pub interface: String,
    /// Validated metadata document
    #[schema(value_type = Object)]
    pub metadata: Value,
    pub creation_time: DateTime<Utc>,
}

// =============================================================================
// Tag Models
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct TagView {
    pub name: String,
}

impl From<&StoredTag> for TagView {
    fn from(tag: &StoredTag) -> Self {
        Self {
            name: tag.name.clone(),
        }
    }
}
