//! Benchmark: load, compile and render a synthesized protocol of roughly the
//! size of the published browser schema (50 domains, each with records, enums,
//! aliases, commands and events referring across domains). Also decodes a batch
//! of notifications through the compiled codec.

use cdpgen::frame::{decode_notifications, Notification};
use cdpgen::render::render_module;
use cdpgen::{compile_protocol, parse, Codec};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde_json::json;

const DOMAINS: usize = 50;

fn synthesize() -> String {
    let domains: Vec<serde_json::Value> = (0..DOMAINS)
        .map(|i| {
            let name = format!("Domain{}", i);
            let prev = format!("Domain{}", i.saturating_sub(1));
            json!({
                "domain": name,
                "description": "Synthesized domain.",
                "dependencies": [prev],
                "types": [
                    {"id": "ItemId", "type": "integer"},
                    {"id": "Kind", "type": "string", "enum": ["first-kind", "secondKind", "third"]},
                    {"id": "Names", "type": "array", "items": {"type": "string"}},
                    {"id": "Item", "type": "object", "properties": [
                        {"name": "id", "$ref": "ItemId"},
                        {"name": "kind", "$ref": "Kind"},
                        {"name": "label", "type": "string", "optional": true},
                        {"name": "weight", "type": "number"},
                        {"name": "parent", "$ref": "Item", "optional": true},
                        {"name": "children", "type": "array", "items": {"$ref": "Item"}, "optional": true},
                        {"name": "origin", "$ref": format!("{}.ItemId", prev), "optional": true}
                    ]}
                ],
                "commands": [
                    {"name": "getItem", "parameters": [
                        {"name": "id", "$ref": "ItemId"},
                        {"name": "depth", "type": "integer", "optional": true}
                    ], "returns": [{"name": "item", "$ref": "Item"}]},
                    {"name": "listItems", "returns": [
                        {"name": "items", "type": "array", "items": {"$ref": "Item"}},
                        {"name": "total", "type": "integer"}
                    ]},
                    {"name": "enable"},
                    {"name": "legacy", "deprecated": true}
                ],
                "events": [
                    {"name": "itemAdded", "parameters": [
                        {"name": "item", "$ref": "Item"},
                        {"name": "timestamp", "type": "number", "optional": true}
                    ]}
                ]
            })
        })
        .collect();
    json!({"version": {"major": "1", "minor": "3"}, "domains": domains}).to_string()
}

fn notifications() -> Vec<Notification> {
    (0..1000)
        .map(|i| Notification {
            method: format!("Domain{}.itemAdded", i % DOMAINS),
            params: json!({
                "item": {
                    "id": i,
                    "kind": "secondKind",
                    "weight": 1.5,
                    "children": [{"id": i + 1, "kind": "third", "weight": 0.5}]
                },
                "timestamp": 12.0
            }),
        })
        .collect()
}

fn bench_compile_protocol(c: &mut Criterion) {
    let source = synthesize();
    let protocol = parse(&source).expect("synthesized schema loads");
    let report = compile_protocol(&protocol);
    assert!(report.is_complete());

    c.bench_function("load_synthesized_protocol", |b| {
        b.iter(|| parse(black_box(&source)).expect("load"))
    });

    c.bench_function("compile_synthesized_protocol", |b| {
        b.iter(|| compile_protocol(black_box(&protocol)))
    });

    c.bench_function("render_synthesized_protocol", |b| {
        b.iter(|| {
            report
                .modules
                .iter()
                .map(|m| render_module(black_box(m)).len())
                .sum::<usize>()
        })
    });

    let codec = Codec::new(&report.modules);
    let batch = notifications();
    c.bench_function("decode_notification_batch", |b| {
        b.iter(|| {
            let decoded = decode_notifications(&codec, black_box(&batch));
            assert!(decoded.rejected.is_empty());
            decoded.events.len()
        })
    });
}

criterion_group!(benches, bench_compile_protocol);
criterion_main!(benches);
