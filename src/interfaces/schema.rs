// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Interface schemas: validation, normalization and merge of interface
//! metadata documents.
//!
//! A schema turns a raw JSON object into a normalized document:
//!
//! - unknown fields are rejected
//! - `null` means "unset": the default applies, or the field is omitted
//! - missing required fields are rejected
//! - numeric strings become integers, `"true"`/`"false"` become booleans,
//!   non-secret strings are trimmed
//!
//! Merging overlays the update on the existing document and re-validates
//! the result, so `{a:1,b:2}` merged with `{b:3,c:4}` is `{a:1,b:3,c:4}`.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};
use utoipa::ToSchema;

/// A JSON object as handled by schemas.
pub type Document = Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    #[error("unknown interface type: {0}")]
    UnknownInterfaceType(String),

    #[error("invalid interface data: field '{field}' {reason}")]
    InvalidField { field: String, reason: String },

    #[error("interface type already registered: {0}")]
    AlreadyRegistered(String),

    #[error("invalid interface type name: {0}")]
    InvalidTypeName(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl SchemaError {
    fn field(field: &str, reason: impl Into<String>) -> Self {
        SchemaError::InvalidField {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

pub type SchemaResult<T> = Result<T, SchemaError>;

/// Validating/normalizing schema for one interface type.
///
/// Implementations are registered in an
/// [`InterfaceRegistry`](super::InterfaceRegistry) at startup.
pub trait InterfaceSchema: Send + Sync {
    /// Interface type name, as used in URLs and storage keys.
    fn name(&self) -> &str;

    /// Human-readable summary for the interface type listing.
    fn description(&self) -> &str {
        ""
    }

    /// Field descriptions for the interface type listing.
    fn fields(&self) -> Vec<FieldDescriptor>;

    /// Validate and normalize a raw document.
    fn validate(&self, raw: &Document) -> SchemaResult<Document>;

    /// Merge `update` into an already validated document.
    fn merge(&self, existing: &Document, update: &Document) -> SchemaResult<Document> {
        let mut merged = existing.clone();
        for (key, value) in update {
            merged.insert(key.clone(), value.clone());
        }
        self.validate(&merged)
    }

    /// Serialize a validated document to canonical JSON (keys sorted).
    fn serialize(&self, document: &Document) -> SchemaResult<String> {
        let sorted: BTreeMap<&str, &Value> =
            document.iter().map(|(k, v)| (k.as_str(), v)).collect();
        serde_json::to_string(&sorted).map_err(|e| SchemaError::Serialization(e.to_string()))
    }
}

// =============================================================================
// Declarative schemas
// =============================================================================

/// Type of a schema field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    /// Free text, trimmed, must not be empty
    String,
    /// Credential material, kept verbatim, must not be empty
    Secret,
    /// Whole number within inclusive bounds
    Integer { min: i64, max: i64 },
    Boolean,
    /// One of a fixed set of strings
    Choice(&'static [&'static str]),
}

impl FieldKind {
    fn label(&self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Secret => "secret",
            FieldKind::Integer { .. } => "integer",
            FieldKind::Boolean => "boolean",
            FieldKind::Choice(_) => "choice",
        }
    }

    fn normalize(&self, field: &str, value: &Value) -> SchemaResult<Value> {
        match self {
            FieldKind::String => match value {
                Value::String(s) if !s.trim().is_empty() => Ok(Value::String(s.trim().to_string())),
                Value::String(_) => Err(SchemaError::field(field, "must not be empty")),
                _ => Err(SchemaError::field(field, "expected a string")),
            },
            FieldKind::Secret => match value {
                Value::String(s) if !s.is_empty() => Ok(value.clone()),
                Value::String(_) => Err(SchemaError::field(field, "must not be empty")),
                _ => Err(SchemaError::field(field, "expected a string")),
            },
            FieldKind::Integer { min, max } => {
                let number = match value {
                    Value::Number(n) => n.as_i64(),
                    Value::String(s) => s.trim().parse::<i64>().ok(),
                    _ => None,
                }
                .ok_or_else(|| SchemaError::field(field, "expected an integer"))?;

                if number < *min || number > *max {
                    return Err(SchemaError::field(
                        field,
                        format!("must be between {min} and {max}"),
                    ));
                }
                Ok(Value::from(number))
            }
            FieldKind::Boolean => match value {
                Value::Bool(b) => Ok(Value::Bool(*b)),
                Value::String(s) if s.trim().eq_ignore_ascii_case("true") => Ok(Value::Bool(true)),
                Value::String(s) if s.trim().eq_ignore_ascii_case("false") => {
                    Ok(Value::Bool(false))
                }
                _ => Err(SchemaError::field(field, "expected a boolean")),
            },
            FieldKind::Choice(choices) => {
                let choice = value
                    .as_str()
                    .map(str::trim)
                    .filter(|s| choices.contains(s))
                    .ok_or_else(|| {
                        SchemaError::field(field, format!("must be one of: {}", choices.join(", ")))
                    })?;
                Ok(Value::String(choice.to_string()))
            }
        }
    }
}

/// One field of a [`DeclarativeSchema`].
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub default: Option<Value>,
    pub description: &'static str,
}

impl FieldSpec {
    pub fn required(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: true,
            default: None,
            description: "",
        }
    }

    pub fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self {
            required: false,
            ..Self::required(name, kind)
        }
    }

    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn describe(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }
}

/// Description of a schema field, as exposed by the API.
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq)]
pub struct FieldDescriptor {
    pub name: String,
    /// `string`, `secret`, `integer`, `boolean` or `choice`
    pub kind: String,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub default: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<i64>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
}

impl From<&FieldSpec> for FieldDescriptor {
    fn from(spec: &FieldSpec) -> Self {
        let (min, max) = match spec.kind {
            FieldKind::Integer { min, max } => (Some(min), Some(max)),
            _ => (None, None),
        };
        let choices = match spec.kind {
            FieldKind::Choice(choices) => Some(choices.iter().map(|c| c.to_string()).collect()),
            _ => None,
        };
        Self {
            name: spec.name.to_string(),
            kind: spec.kind.label().to_string(),
            required: spec.required,
            default: spec.default.clone(),
            choices,
            min,
            max,
            description: spec.description.to_string(),
        }
    }
}

/// Schema defined by a list of [`FieldSpec`]s.
#[derive(Debug, Clone)]
pub struct DeclarativeSchema {
    name: String,
    description: String,
    fields: Vec<FieldSpec>,
}

impl DeclarativeSchema {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        fields: Vec<FieldSpec>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            fields,
        }
    }
}

impl InterfaceSchema for DeclarativeSchema {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn fields(&self) -> Vec<FieldDescriptor> {
        self.fields.iter().map(FieldDescriptor::from).collect()
    }

    fn validate(&self, raw: &Document) -> SchemaResult<Document> {
        if let Some(unknown) = raw
            .keys()
            .find(|key| !self.fields.iter().any(|f| f.name == key.as_str()))
        {
            return Err(SchemaError::field(unknown, "is not a known field"));
        }

        let mut document = Document::new();
        for spec in &self.fields {
            match raw.get(spec.name).filter(|v| !v.is_null()) {
                Some(value) => {
                    document.insert(spec.name.to_string(), spec.kind.normalize(spec.name, value)?);
                }
                None => {
                    if let Some(default) = &spec.default {
                        document.insert(spec.name.to_string(), default.clone());
                    } else if spec.required {
                        return Err(SchemaError::field(spec.name, "is required"));
                    }
                }
            }
        }
        Ok(document)
    }
}
