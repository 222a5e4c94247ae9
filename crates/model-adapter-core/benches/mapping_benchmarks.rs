//! Benchmarks for path resolution and the adapt/restore mapping passes
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use model_adapter_core::path::{self, Path};
use model_adapter_core::transformer::built_in;
use model_adapter_core::{adapter_map, Adapter, AdapterMap, LiveModel, Model, NoopSink};
use serde_json::{json, Value};
use std::sync::Arc;

fn create_source() -> Value {
    json!({
        "user": {
            "id": 42,
            "name": "ada",
            "createdAt": 1565001521464_i64,
            "address": {"city": "London", "zip": "N1"},
            "tags": ["admin", "ops", "dev"]
        },
        "settings": {"theme.dark": true, "locale": "en-GB"},
        "flags": [true, false, true]
    })
}

fn create_adapters() -> AdapterMap {
    adapter_map([
        ("id", Adapter::from("user.id")),
        ("name", Adapter::builder().path("user.name").transformer(built_in::uppercase()).build()),
        (
            "createdAt",
            Adapter::builder()
                .path("user.createdAt")
                .transformer(built_in::epoch_millis_to_iso8601())
                .restorer(built_in::iso8601_to_epoch_millis())
                .build(),
        ),
        ("city", Adapter::from("user.address.city")),
        ("firstTag", Adapter::from("user.tags.0")),
        ("dark", Adapter::from("settings.theme\\.dark")),
        ("missing", Adapter::builder().path("nowhere.at.all").default_value(json!([])).build()),
    ])
}

fn bench_path_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("path_parsing");

    let test_cases = vec![
        ("single", "user"),
        ("nested", "user.address.city"),
        ("indexed", "user.tags.0"),
        ("escaped", "settings.theme\\.dark"),
    ];

    for (name, expr) in test_cases {
        group.bench_with_input(BenchmarkId::new("parse", name), expr, |b, expr| {
            b.iter(|| black_box(Path::parse(*black_box(expr))))
        });
    }

    group.finish();
}

fn bench_path_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("path_lookup");
    let data = create_source();

    for expr in ["user", "user.address.city", "user.tags.2", "nowhere.at.all"] {
        let at = Path::parse(expr);
        group.bench_with_input(BenchmarkId::new("get", expr), &at, |b, at| {
            b.iter(|| black_box(path::get(black_box(&data), at)))
        });
    }

    group.finish();
}

fn bench_model(c: &mut Criterion) {
    let mut group = c.benchmark_group("model");
    let source = create_source();
    let adapters = create_adapters();

    for copy in [false, true] {
        group.bench_with_input(BenchmarkId::new("adapt", copy), &copy, |b, &copy| {
            b.iter(|| {
                let model = Model::builder(adapters.clone())
                    .copy(copy)
                    .diagnostics(Arc::new(NoopSink))
                    .build(Some(black_box(&source)));
                black_box(model)
            })
        });
    }

    let model = Model::builder(adapters.clone())
        .diagnostics(Arc::new(NoopSink))
        .build(Some(&source))
        .expect("benchmark model adapts");
    group.bench_function("restore", |b| b.iter(|| black_box(model.restore())));

    group.finish();
}

fn bench_live_model(c: &mut Criterion) {
    let mut group = c.benchmark_group("live_model");
    let source = create_source();
    let adapters = adapter_map([
        ("user.createdAt", Adapter::builder().transformer(built_in::epoch_millis_to_iso8601()).build()),
        ("user.name", Adapter::builder().transformer(built_in::uppercase()).build()),
    ]);

    group.bench_function("build", |b| {
        b.iter(|| black_box(LiveModel::new(Some(source.clone()), None, adapters.clone())))
    });

    let live = LiveModel::new(Some(source.clone()), None, adapters.clone());
    group.bench_function("get_bound", |b| b.iter(|| black_box(live.get("user.createdAt"))));
    group.bench_function("to_value", |b| b.iter(|| black_box(live.to_value())));
    group.bench_function("restore", |b| b.iter(|| black_box(live.restore())));

    group.finish();
}

criterion_group!(
    benches,
    bench_path_parsing,
    bench_path_lookup,
    bench_model,
    bench_live_model
);
criterion_main!(benches);
