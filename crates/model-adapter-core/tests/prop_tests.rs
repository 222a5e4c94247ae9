//! Property-based tests for the adapter engine
//!
//! These tests verify the invariants that should hold for all inputs:
//! restoring an adapted model recovers the source, defaults only fill absent
//! or null values, and path segments round-trip through escaping.

use model_adapter_core::path::{self, Path};
use model_adapter_core::transformer::built_in;
use model_adapter_core::{adapter_map, Adapter, AdapterMap, LiveModel, Model, NoopSink};
use proptest::prelude::*;
use serde_json::{json, Map, Value};
use std::sync::Arc;

/// Strategy for generating arbitrary JSON values
fn json_value_strategy() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| json!(n)),
        "[a-zA-Z0-9 ]{0,12}".prop_map(Value::String),
    ];

    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-z]{1,6}", inner, 0..4)
                .prop_map(|entries| Value::Object(entries.into_iter().collect())),
        ]
    })
}

/// Strategy for generating flat source objects
fn source_strategy() -> impl Strategy<Value = Map<String, Value>> {
    prop::collection::btree_map("[a-z]{1,8}", json_value_strategy(), 0..6)
        .prop_map(|entries| entries.into_iter().collect())
}

/// Strategy for path segments, including literal dots
fn segment_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9]{1,4}(\\.[a-z0-9]{1,4})?"
}

fn quiet(adapters: AdapterMap) -> model_adapter_core::ModelBuilder {
    Model::builder(adapters).diagnostics(Arc::new(NoopSink))
}

proptest! {
    #[test]
    fn prop_copy_mode_restores_source(source in source_strategy()) {
        let source = Value::Object(source);
        let model = quiet(AdapterMap::new()).build(Some(&source)).unwrap();
        prop_assert_eq!(model.restore().unwrap(), source);
    }

    #[test]
    fn prop_nested_paths_round_trip(
        outer in "[a-z]{1,6}",
        inner in "[a-z]{1,6}",
        value in json_value_strategy(),
    ) {
        let source = json!({ outer.clone(): { inner.clone(): value } });
        let adapters = adapter_map([("field", format!("{}.{}", outer, inner))]);

        let model = quiet(adapters).copy(false).build(Some(&source)).unwrap();
        prop_assert_eq!(model.restore().unwrap(), source);
    }

    #[test]
    fn prop_inverse_pair_round_trips(millis in 0i64..4_102_444_800_000) {
        let source = json!({"at": millis});
        let adapters = adapter_map([(
            "at",
            Adapter::builder()
                .transformer(built_in::epoch_millis_to_iso8601())
                .restorer(built_in::iso8601_to_epoch_millis())
                .build(),
        )]);

        let model = quiet(adapters.clone()).build(Some(&source)).unwrap();
        prop_assert_eq!(model.restore().unwrap(), source.clone());

        let live = LiveModel::new(Some(source.clone()), None, adapters);
        prop_assert_eq!(live.restore(), source);
    }

    #[test]
    fn prop_restore_is_idempotent(source in source_strategy()) {
        let source = Value::Object(source);
        let model = quiet(AdapterMap::new()).build(Some(&source)).unwrap();
        prop_assert_eq!(model.restore().unwrap(), model.restore().unwrap());
    }

    #[test]
    fn prop_default_fills_only_absent_or_null(
        raw in proptest::option::of(json_value_strategy()),
        default in json_value_strategy(),
    ) {
        let source = match &raw {
            Some(value) => json!({"v": value}),
            None => json!({}),
        };
        let adapters = adapter_map([("v", Adapter::builder().default_value(default.clone()).build())]);
        let model = quiet(adapters).copy(false).build(Some(&source)).unwrap();

        let expected = match raw {
            None | Some(Value::Null) => default,
            Some(value) => value,
        };
        prop_assert_eq!(model.get("v"), Some(&expected));
    }

    #[test]
    fn prop_segments_round_trip(segments in prop::collection::vec(segment_strategy(), 1..5)) {
        let path = Path::from_segments(segments.clone());
        let reparsed = Path::parse(path.as_str());
        prop_assert_eq!(reparsed.segments(), &segments[..]);
        prop_assert_eq!(reparsed.as_str(), path.as_str());
    }

    #[test]
    fn prop_set_then_get(segments in prop::collection::vec("[a-z]{1,4}", 1..5), value in json_value_strategy()) {
        let at = Path::from_segments(segments);
        let mut root = json!({});
        path::set(&mut root, &at, value.clone());
        prop_assert_eq!(path::get(&root, &at), Some(&value));
    }
}

#[test]
fn test_escaped_segments_example() {
    assert_eq!(Path::parse("a\\.b.c").segments(), ["a.b", "c"]);
}

#[test]
fn test_noop_sink_is_silent() {
    let adapters = adapter_map([(
        "a",
        Adapter::builder()
            .validator(model_adapter_core::Validator::type_name("string"))
            .build(),
    )]);
    let mut fields = Map::new();
    model_adapter_core::mapper::adapt(&mut fields, Some(&json!({"a": 1})), &adapters, &NoopSink).unwrap();
    assert_eq!(fields.get("a"), Some(&json!(1)));
}
