//! Criterion benchmarks for block creation, loading and rendering.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde_json::{json, Value};

use page_blocks::contact::{ContactFormConfig, ContactQuery};
use page_blocks::{BlockList, BlockRegistry, BlockRenderer, BlockType};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// A page cycling through every block type with registry defaults
fn make_page(registry: &BlockRegistry, n: usize) -> BlockList {
    BlockType::ALL
        .iter()
        .cycle()
        .take(n)
        .map(|t| registry.create_block(t.as_str()).unwrap())
        .collect()
}

/// Stored JSON with a legacy tag and an unknown block every ten records
fn make_stored_json(registry: &BlockRegistry, n: usize) -> Value {
    let mut records = serde_json::to_value(make_page(registry, n)).unwrap();
    if let Some(array) = records.as_array_mut() {
        for (i, record) in array.iter_mut().enumerate() {
            match i % 10 {
                3 => *record = json!({ "id": format!("legacy-{i}"), "type": "richText", "body": "Text" }),
                7 => *record = json!({ "id": format!("gallery-{i}"), "type": "gallery" }),
                _ => {}
            }
        }
    }
    records
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

fn bench_create_block(c: &mut Criterion) {
    let registry = BlockRegistry::standard();
    let mut group = c.benchmark_group("create_block");

    for block_type in [BlockType::Hero, BlockType::Faq, BlockType::ContactForm] {
        group.bench_with_input(
            BenchmarkId::from_parameter(block_type),
            &block_type,
            |b, t| {
                b.iter(|| black_box(registry.create_block(t.as_str()).unwrap()));
            },
        );
    }
    group.finish();
}

// ---------------------------------------------------------------------------
// Block lists
// ---------------------------------------------------------------------------

fn bench_load_block_list(c: &mut Criterion) {
    let registry = BlockRegistry::standard();
    let mut group = c.benchmark_group("load_block_list");

    for count in [10, 100, 1_000] {
        let stored = make_stored_json(&registry, count).to_string();
        group.bench_with_input(BenchmarkId::from_parameter(count), &stored, |b, json| {
            b.iter(|| {
                let mut blocks = BlockList::from_json(json).unwrap();
                black_box(blocks.migrate())
            });
        });
    }
    group.finish();
}

fn bench_duplicate_and_move(c: &mut Criterion) {
    let registry = BlockRegistry::standard();
    let page = make_page(&registry, 100);
    let first = page.iter().next().and_then(|b| b.id().cloned()).unwrap();

    c.bench_function("duplicate_then_move_to_end", |b| {
        b.iter(|| {
            let mut blocks = page.clone();
            let copy = blocks.duplicate(&first).unwrap();
            blocks.move_to(&copy, blocks.len() - 1).unwrap();
            black_box(blocks)
        });
    });
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn bench_render_page(c: &mut Criterion) {
    let registry = BlockRegistry::standard();
    let renderer = BlockRenderer::default();
    let mut group = c.benchmark_group("render_page");

    for count in [10, 100, 1_000] {
        let page = make_page(&registry, count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &page, |b, blocks| {
            b.iter(|| black_box(renderer.render(blocks.as_slice()).html.len()));
        });
    }
    group.finish();
}

fn bench_contact_form(c: &mut Criterion) {
    let query = ContactQuery::parse("?type=quote&service=brandskydd&product=Grundkurs%20HLR");

    c.bench_function("contact_form_from_query", |b| {
        b.iter(|| black_box(ContactFormConfig::from_query(black_box(&query))));
    });
}

criterion_group!(registry_benches, bench_create_block);
criterion_group!(list_benches, bench_load_block_list, bench_duplicate_and_move);
criterion_group!(render_benches, bench_render_page, bench_contact_form);
criterion_main!(registry_benches, list_benches, render_benches);
