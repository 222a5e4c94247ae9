//! Declarative adapter definitions
//!
//! Adapter maps can be written as plain JSON or YAML documents and turned
//! into an [`AdapterMap`]. Each entry is `null` (the key read as a dotted
//! path), a path string, or a descriptor object:
//!
//! ```json
//! {
//!   "id": null,
//!   "title": "payload.title",
//!   "createdAt": {
//!     "path": "meta.created",
//!     "defaultValue": 0,
//!     "validator": "number",
//!     "transformer": "epoch_millis_to_iso8601"
//!   }
//! }
//! ```
//!
//! Transformers and restorers name built-ins from
//! [`built_in`](crate::transformer::built_in). A transformer with a known
//! inverse gets that inverse as restorer unless one is named explicitly.
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use super::types::{Adapter, AdapterDescriptor, AdapterMap, DefaultValue, PathSpec};
use crate::transformer::{built_in, Transformer};
use crate::validator::Validator;
use crate::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A whole declarative adapter document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AdapterSchema {
    pub entries: IndexMap<String, AdapterEntry>,
}

/// One declared model key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AdapterEntry {
    /// `null`: same as an empty descriptor, the key is the path
    Null,
    Path(String),
    Descriptor(DescriptorEntry),
    /// Anything else; rejected when the map is built
    Other(Value),
}

/// The object form of an entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DescriptorEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Value>,

    /// `Some(Value::Null)` when the document declares a `null` default
    #[serde(
        default,
        rename = "defaultValue",
        alias = "default_value",
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub default_value: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validator: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transformer: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restorer: Option<String>,
}

// Distinguishes an explicit `null` from a missing field
fn present<'de, D>(deserializer: D) -> std::result::Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl AdapterSchema {
    /// Parse a schema from a JSON value
    pub fn from_value(value: Value) -> Result<Self> {
        if !value.is_object() {
            return Err(Error::invalid_argument(
                "adapter definitions must be an object",
                None,
            ));
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Parse a schema from JSON text
    pub fn from_json_str(text: &str) -> Result<Self> {
        Self::from_value(serde_json::from_str(text)?)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve every entry into an [`AdapterMap`], in document order
    pub fn to_adapter_map(&self) -> Result<AdapterMap> {
        self.entries
            .iter()
            .map(|(key, entry)| Ok((key.clone(), entry.to_adapter(key)?)))
            .collect()
    }
}

impl AdapterEntry {
    /// Resolve this entry for the given model key
    pub fn to_adapter(&self, key: &str) -> Result<Adapter> {
        match self {
            AdapterEntry::Null => Ok(Adapter::Descriptor(AdapterDescriptor::default())),
            AdapterEntry::Path(path) => Ok(Adapter::path(path.as_str())),
            AdapterEntry::Descriptor(entry) => entry.to_adapter(key),
            AdapterEntry::Other(value) => Err(Error::invalid_argument(
                format!("adapter for '{}' must be null, a path or an object, got {}", key, value),
                Some(key),
            )),
        }
    }
}

impl DescriptorEntry {
    fn to_adapter(&self, key: &str) -> Result<Adapter> {
        let path = match &self.path {
            None | Some(Value::Null) => None,
            Some(Value::String(path)) => Some(PathSpec::Literal(path.clone())),
            Some(other) => {
                return Err(Error::invalid_argument(
                    format!("path of '{}' must be a string, got {}", key, other),
                    Some("path"),
                ))
            }
        };

        let validator = self.validator.as_ref().map(validator_from).transpose()?;
        let transformer = self.transformer.as_deref().map(named_transformer).transpose()?;
        let restorer = match (&self.restorer, &self.transformer) {
            (Some(name), _) => Some(named_transformer(name)?),
            (None, Some(forward)) => built_in::inverse_of(forward).and_then(built_in::lookup),
            (None, None) => None,
        };

        Ok(Adapter::Descriptor(AdapterDescriptor {
            path,
            default_value: self.default_value.clone().map(DefaultValue::Value),
            validator,
            transformer,
            restorer,
        }))
    }
}

fn named_transformer(name: &str) -> Result<Transformer> {
    built_in::lookup(name).ok_or_else(|| {
        Error::configuration(format!(
            "unknown transformer '{}', expected one of: {}",
            name,
            built_in::names().join(", ")
        ))
    })
}

/// Build a validator from its declarative form
pub fn validator_from(value: &Value) -> Result<Validator> {
    match value {
        Value::String(type_name) => Ok(Validator::type_name(type_name.as_str())),
        Value::Object(map) => {
            if let Some(Value::String(pattern)) = map.get("pattern") {
                return Validator::pattern(pattern);
            }
            if let Some(Value::String(name)) = map.get("builtin") {
                return Validator::builtin(name).ok_or_else(|| {
                    Error::configuration(format!("unknown builtin validator '{}'", name))
                });
            }
            Ok(Validator::Unsupported(value.clone()))
        }
        other => Ok(Validator::Unsupported(other.clone())),
    }
}
