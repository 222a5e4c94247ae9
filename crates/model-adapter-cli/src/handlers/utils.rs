//! Shared utilities for command handlers

use crate::error::{Error, Result};
use model_adapter_core::{AdapterMap, AdapterSchema};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// Whether a path names a YAML document
fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|s| s == "yaml" || s == "yml")
        .unwrap_or(false)
}

/// Load a JSON or YAML document, picking the parser by file extension
pub fn load_document(path: &Path) -> Result<Value> {
    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path)?;
    let value = if is_yaml(path) {
        serde_yaml::from_str(&content)?
    } else {
        serde_json::from_str(&content)?
    };

    tracing::debug!(path = %path.display(), "Loaded document");
    Ok(value)
}

/// Load a document that must be an object
pub fn load_object(path: &Path) -> Result<Map<String, Value>> {
    match load_document(path)? {
        Value::Object(map) => Ok(map),
        _ => Err(Error::InvalidFormat {
            path: path.to_path_buf(),
            expected: "a JSON or YAML object".to_string(),
        }),
    }
}

/// Load a declarative adapter schema and resolve it into adapters
pub fn load_adapters(path: &Path) -> Result<AdapterMap> {
    let schema = AdapterSchema::from_value(Value::Object(load_object(path)?))?;
    let adapters = schema.to_adapter_map()?;

    tracing::info!(
        path = %path.display(),
        adapters = adapters.len(),
        "Loaded adapter schema"
    );
    Ok(adapters)
}
