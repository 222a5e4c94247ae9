//! Recursive default merging
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use serde_json::{Map, Value};

/// Fill `dest` from `src` without overwriting anything `dest` already has.
///
/// - nested objects in `src` merge recursively; an absent or `null` slot in
///   `dest` becomes an empty object first, any other non-object slot is left
///   alone
/// - every other value is copied only onto an absent or `null` slot, so a
///   `null` in `src` may fill an absent slot but never replaces a value
///
/// Nothing happens unless both sides are objects.
pub fn defaults_deep(dest: &mut Value, src: &Value) {
    if let (Value::Object(dest), Value::Object(src)) = (dest, src) {
        merge_into(dest, src);
    }
}

/// Apply [`defaults_deep`] for each source in turn; earlier sources win
pub fn defaults_deep_all<'a, I>(dest: &mut Value, sources: I)
where
    I: IntoIterator<Item = &'a Value>,
{
    for src in sources {
        defaults_deep(dest, src);
    }
}

fn merge_into(dest: &mut Map<String, Value>, src: &Map<String, Value>) {
    for (key, src_value) in src {
        if let Value::Object(src_map) = src_value {
            let slot = dest.entry(key.clone()).or_insert(Value::Null);
            if slot.is_null() {
                *slot = Value::Object(Map::new());
            }
            if let Value::Object(dest_map) = slot {
                merge_into(dest_map, src_map);
            }
            continue;
        }

        match dest.get(key) {
            Some(existing) if !existing.is_null() => {}
            _ => {
                dest.insert(key.clone(), src_value.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fills_missing_and_null() {
        let mut dest = json!({"a": null, "b": 1});
        defaults_deep(&mut dest, &json!({"a": "x", "b": 2, "c": 3}));
        assert_eq!(dest, json!({"a": "x", "b": 1, "c": 3}));
    }

    #[test]
    fn test_nested_objects_merge() {
        let mut dest = json!({"n": {"keep": true}});
        defaults_deep(&mut dest, &json!({"n": {"keep": false, "add": 1}, "m": {"x": {}}}));
        assert_eq!(dest, json!({"n": {"keep": true, "add": 1}, "m": {"x": {}}}));
    }

    #[test]
    fn test_incompatible_destination_untouched() {
        let mut dest = json!({"n": "scalar", "list": [1]});
        defaults_deep(&mut dest, &json!({"n": {"x": 1}, "list": [2, 3]}));
        assert_eq!(dest, json!({"n": "scalar", "list": [1]}));
    }

    #[test]
    fn test_null_source_fills_only_absent() {
        let mut dest = json!({"a": 1});
        defaults_deep(&mut dest, &json!({"a": null, "b": null}));
        assert_eq!(dest, json!({"a": 1, "b": null}));
    }

    #[test]
    fn test_source_then_defaults() {
        let mut dest = json!({});
        defaults_deep_all(
            &mut dest,
            [&json!({"a": 1, "o": {"x": 1}}), &json!({"a": 0, "b": 2, "o": {"y": 2}})],
        );
        assert_eq!(dest, json!({"a": 1, "o": {"x": 1, "y": 2}, "b": 2}));
    }

    #[test]
    fn test_copy_is_deep() {
        let src = json!({"o": {"x": [1, 2]}});
        let mut dest = json!({});
        defaults_deep(&mut dest, &src);
        assert_eq!(dest, src);
    }
}
