//! Benchmark for customization document parsing.
//!
//! Run with: cargo bench --package kerbonaut_config --bench document_benchmark

#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use kerbonaut_config::{parse_document, ConfigRegistry, DocumentParser, TokenBuffer};

fn create_document(records: usize) -> String {
    let mut doc = String::from("{\"configs\": [\n");
    for i in 0..records {
        if i > 0 {
            doc.push_str(",\n");
        }
        doc.push_str(&format!(
            r#"    {{
        "kerbalName": "Kerbal{i} Kerman",
        "hideHead": {hide}, "trait": "Engineer", "courage": 0.{c},
        "bodyTextures": {{ "HeadDiffuse": "head{i}.png", "EyesNormal": "eyes{i}_n.png" }},
        "hairPieces": [
            {{ "meshName": "Bun{i}", "meshTexture": "bun.png", "posY": 0.07, "rotZ": 12.5 }},
            {{ "meshName": "Fringe{i}", "shader": "KSP/Bumped", "normalMap": "fringe_n.png" }}
        ]
    }}"#,
            hide = i % 2 == 0,
            c = i % 10,
        ));
    }
    doc.push_str("\n]}");
    doc
}

fn benchmark_lex(c: &mut Criterion) {
    let doc = create_document(100);

    let mut group = c.benchmark_group("lexer");
    group.throughput(Throughput::Bytes(doc.len() as u64));
    group.bench_function("tokenize_100_records", |b| {
        b.iter(|| black_box(TokenBuffer::new(black_box(&doc))))
    });
    group.finish();
}

fn benchmark_parse(c: &mut Criterion) {
    let small = create_document(10);
    let large = create_document(500);

    c.bench_function("parse_10_records", |b| {
        b.iter(|| black_box(parse_document(black_box(&small))))
    });

    let mut group = c.benchmark_group("parse_large");
    group.throughput(Throughput::Elements(500));
    group.sample_size(20);
    group.bench_function("parse_500_records", |b| {
        b.iter(|| black_box(parse_document(black_box(&large))))
    });
    group.finish();
}

fn benchmark_lookup(c: &mut Criterion) {
    let mut registry = ConfigRegistry::new();
    registry.load_str(&create_document(200), &DocumentParser::default());

    c.bench_function("lookup_exact", |b| {
        b.iter(|| black_box(registry.get(black_box("Kerbal150 Kerman"))))
    });
    c.bench_function("lookup_miss", |b| {
        b.iter(|| black_box(registry.get(black_box("Kerbal150 Smith"))))
    });
}

criterion_group!(benches, benchmark_lex, benchmark_parse, benchmark_lookup);
criterion_main!(benches);
