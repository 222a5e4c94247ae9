//! Adapter normalization and adapter map helpers
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use super::types::{Adapter, AdapterMap, Descriptor, PathSpec};
use crate::path::Path;
use serde_json::Value;

/// Turn any adapter form into the canonical [`Descriptor`] for `key`.
///
/// A literal path that is empty falls back to the key. Computed paths and
/// default producers are evaluated here, once per call.
pub fn normalize(adapter: &Adapter, key: &str) -> Descriptor {
    let mut descriptor = Descriptor {
        key: key.to_string(),
        path: Path::parse(key),
        default_value: None,
        validator: None,
        transformer: None,
        restorer: None,
    };

    match adapter {
        Adapter::Identity => {
            descriptor.path = Path::from_segments([key]);
        }
        Adapter::Path(spec) => {
            if let Some(path) = resolve_path(spec) {
                descriptor.path = path;
            }
        }
        Adapter::Descriptor(full) => {
            if let Some(path) = full.path.as_ref().and_then(resolve_path) {
                descriptor.path = path;
            }
            descriptor.default_value = full.default_value.as_ref().map(|d| d.produce());
            descriptor.validator = full.validator.clone();
            descriptor.transformer = full.transformer.clone();
            descriptor.restorer = full.restorer.clone();
        }
    }

    descriptor
}

fn resolve_path(spec: &PathSpec) -> Option<Path> {
    match spec {
        PathSpec::Literal(path) if path.is_empty() => None,
        other => Some(Path::parse(other.resolve())),
    }
}

/// Identity adapters for every own key of `source`.
///
/// Anything other than an object has no own keys and yields an empty map.
pub fn one_to_one_adapters(source: &Value) -> AdapterMap {
    match source {
        Value::Object(map) => map
            .keys()
            .map(|key| (key.clone(), Adapter::Identity))
            .collect(),
        _ => AdapterMap::new(),
    }
}

/// Merge `overrides` over `base`: colliding keys keep their position in
/// `base` but take the override, new keys are appended in order.
pub fn merge_adapters(mut base: AdapterMap, overrides: &AdapterMap) -> AdapterMap {
    for (key, adapter) in overrides {
        base.insert(key.clone(), adapter.clone());
    }
    base
}
