//! Forward and inverse mapping between sources and models
//!
//! [`adapt`] reads every declared key out of a source document into a model,
//! [`restore`] writes a model back into a freshly built source-shaped
//! document. Both walk the adapter map in order; for overlapping paths the
//! key processed last wins.
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use crate::adapter::{normalize, AdapterMap};
use crate::diagnostics::DiagnosticSink;
use crate::path;
use crate::validator::validate;
use crate::{Error, Result};
use serde_json::{Map, Value};

/// Populate `target` from `source` according to `adapters`.
///
/// For each key: resolve the path, fall back to the default when the value
/// is absent or `null`, validate (only when a source is given), transform,
/// assign. A key whose value ends up absent is removed from `target`.
///
/// A transformer error stops the pass; keys processed before it keep their
/// new values.
pub fn adapt(
    target: &mut Map<String, Value>,
    source: Option<&Value>,
    adapters: &AdapterMap,
    sink: &dyn DiagnosticSink,
) -> Result<()> {
    log::debug!(
        "adapting {} key(s){}",
        adapters.len(),
        if source.is_some() { "" } else { " without source" }
    );

    for (key, adapter) in adapters {
        let descriptor = normalize(adapter, key);

        let mut value = source.and_then(|s| path::get(s, &descriptor.path)).cloned();

        if matches!(value, None | Some(Value::Null)) {
            if let Some(default) = &descriptor.default_value {
                value = Some(default.clone());
            }
        }

        if source.is_some() {
            validate(value.as_ref(), &descriptor, sink);
        }

        if let Some(transformer) = &descriptor.transformer {
            let input = value.unwrap_or(Value::Null);
            let context = source.unwrap_or(&Value::Null);
            value = Some(
                transformer
                    .apply(&input, context)
                    .map_err(|e| Error::transform(key.as_str(), e))?,
            );
        }

        match value {
            Some(value) => {
                target.insert(key.clone(), value);
            }
            None => {
                target.shift_remove(key);
            }
        }
    }

    Ok(())
}

/// Build a source-shaped document from `model` according to `adapters`.
///
/// For each key: read the model value, restore it, validate, write it at the
/// descriptor path. Absent values still create the parent containers but
/// leave the leaf unset. `model` is never modified.
pub fn restore(
    model: &Map<String, Value>,
    adapters: &AdapterMap,
    sink: &dyn DiagnosticSink,
) -> Result<Value> {
    let context = Value::Object(model.clone());
    let mut restored = Value::Object(Map::new());

    for (key, adapter) in adapters {
        let descriptor = normalize(adapter, key);

        let mut value = model.get(key).cloned();

        if let Some(restorer) = &descriptor.restorer {
            let input = value.unwrap_or(Value::Null);
            value = Some(
                restorer
                    .apply(&input, &context)
                    .map_err(|e| Error::restore(key.as_str(), e))?,
            );
        }

        validate(value.as_ref(), &descriptor, sink);

        write(&mut restored, &descriptor.path, value);
    }

    Ok(restored)
}

/// Write `value` at `path`, or clear the leaf when the value is absent
pub(crate) fn write(root: &mut Value, at: &path::Path, value: Option<Value>) {
    match value {
        Some(value) => path::set(root, at, value),
        None => {
            if path::parent_container(root, at).is_some() {
                path::remove(root, at);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::{adapter_map, Adapter};
    use crate::diagnostics::{CollectingSink, Diagnostic, NoopSink};
    use crate::validator::Validator;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn test_adapt_resolves_paths() {
        let adapters = adapter_map([("ccc", "c.cc1.ccc"), ("a", "a")]);
        let source = json!({"a": "a", "c": {"cc1": {"ccc": "ccc1"}}});

        let mut model = Map::new();
        adapt(&mut model, Some(&source), &adapters, &NoopSink).unwrap();
        assert_eq!(Value::Object(model), json!({"ccc": "ccc1", "a": "a"}));
    }

    #[test]
    fn test_adapt_without_source_removes_keys() {
        let adapters = adapter_map([("a", "a")]);
        let mut model = object(json!({"a": 1}));
        adapt(&mut model, None, &adapters, &NoopSink).unwrap();
        assert!(model.is_empty());
    }

    #[test]
    fn test_adapt_without_source_skips_validation() {
        let sink = CollectingSink::new();
        let adapters = adapter_map([(
            "a",
            Adapter::builder().validator(Validator::type_name("string")).build(),
        )]);

        adapt(&mut Map::new(), None, &adapters, &sink).unwrap();
        assert!(sink.is_empty());

        adapt(&mut Map::new(), Some(&json!({})), &adapters, &sink).unwrap();
        assert!(matches!(
            &sink.diagnostics()[0],
            Diagnostic::ValidationFailed { value: None, .. }
        ));
    }

    #[test]
    fn test_transformer_receives_source() {
        let adapters = adapter_map([(
            "full",
            Adapter::builder()
                .path("first")
                .transform(|value, source| {
                    Ok(json!(format!(
                        "{} {}",
                        value.as_str().unwrap_or_default(),
                        source["last"].as_str().unwrap_or_default()
                    )))
                })
                .build(),
        )]);

        let mut model = Map::new();
        adapt(
            &mut model,
            Some(&json!({"first": "Ada", "last": "Lovelace"})),
            &adapters,
            &NoopSink,
        )
        .unwrap();
        assert_eq!(model["full"], json!("Ada Lovelace"));
    }

    #[test]
    fn test_transformer_error_keeps_earlier_keys() {
        let adapters = adapter_map([
            ("a", Adapter::from("a")),
            (
                "b",
                Adapter::builder()
                    .transform(|_, _| anyhow::bail!("broken"))
                    .build(),
            ),
            ("c", Adapter::from("c")),
        ]);

        let mut model = Map::new();
        let err = adapt(&mut model, Some(&json!({"a": 1, "b": 2, "c": 3})), &adapters, &NoopSink)
            .unwrap_err();

        assert!(matches!(err, Error::Transform { ref key, .. } if key == "b"));
        assert_eq!(Value::Object(model), json!({"a": 1}));
    }

    #[test]
    fn test_restore_builds_nested_document() {
        let adapters = adapter_map([("ccc", "c.cc1.ccc"), ("a", "a")]);
        let model = object(json!({"ccc": "ccc1", "a": "a"}));

        let restored = restore(&model, &adapters, &NoopSink).unwrap();
        assert_eq!(restored, json!({"c": {"cc1": {"ccc": "ccc1"}}, "a": "a"}));
    }

    #[test]
    fn test_restore_absent_value_creates_parent_only() {
        let adapters = adapter_map([("x", "p.q.x"), ("y", "y")]);
        let restored = restore(&Map::new(), &adapters, &NoopSink).unwrap();
        assert_eq!(restored, json!({"p": {"q": {}}}));
    }

    #[test]
    fn test_restore_overlapping_paths_last_write_wins() {
        let adapters = adapter_map([("inner", "o.i"), ("outer", "o")]);
        let model = object(json!({"inner": 1, "outer": {"z": 2}}));

        let restored = restore(&model, &adapters, &NoopSink).unwrap();
        assert_eq!(restored, json!({"o": {"z": 2}}));
    }

    #[test]
    fn test_restorer_error_propagates() {
        let adapters = adapter_map([(
            "a",
            Adapter::builder()
                .restore(|_, _| anyhow::bail!("cannot restore"))
                .build(),
        )]);
        let err = restore(&object(json!({"a": 1})), &adapters, &NoopSink).unwrap_err();
        assert!(matches!(err, Error::Restore { ref key, .. } if key == "a"));
    }

    #[test]
    fn test_restore_validates_restored_value() {
        let sink = CollectingSink::new();
        let adapters = adapter_map([(
            "a",
            Adapter::builder()
                .validator(Validator::type_name("number"))
                .restore(|v, _| Ok(json!(v.to_string())))
                .build(),
        )]);

        restore(&object(json!({"a": 1})), &adapters, &sink).unwrap();
        assert_eq!(sink.len(), 1);
    }
}
