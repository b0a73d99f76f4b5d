//! Performance benchmarks for docsift
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use docsift::{load_index, parse_query, SearchIndex};

/// Build a synthetic index payload with `pages` pages of eight entries each
fn synthetic_index(pages: usize) -> String {
    let mut docs = Vec::with_capacity(pages * 8);
    for p in 0..pages {
        let page = format!("Page {p}");
        docs.push(serde_json::json!({
            "location": format!("page{p}/"),
            "page": page,
            "title": page,
            "text": format!("Overview of module {p}. Benchmarks and checks for models."),
            "category": "page",
        }));
        for s in 0..7 {
            let category = if s % 2 == 0 { "function" } else { "method" };
            docs.push(serde_json::json!({
                "location": format!("page{p}/#Module{p}.symbol_{s}"),
                "page": page,
                "title": format!("Module{p}.symbol_{s}"),
                "text": format!(
                    "symbol_{s}(model; kwargs...)\n\nCreate default benchmark suite number {s} for model {p}.\n\nKeyword arguments\n\nadbackends: backends to check."
                ),
                "category": category,
            }));
        }
    }
    format!(
        "var documenterSearchIndex = {}",
        serde_json::json!({ "docs": docs })
    )
}

fn bench_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("load");
    for pages in [10, 100, 1000] {
        let raw = synthetic_index(pages);
        group.bench_with_input(BenchmarkId::from_parameter(pages * 8), &raw, |b, raw| {
            b.iter(|| load_index(black_box(raw)))
        });
    }
    group.finish();
}

fn bench_query_parsing(c: &mut Criterion) {
    let queries = vec![
        "simple",
        "two words",
        "\"exact phrase\"",
        "category:function suite",
        "page:\"Page 1\" model top:10",
    ];

    let mut group = c.benchmark_group("query_parsing");
    for query in queries {
        group.bench_with_input(
            BenchmarkId::from_parameter(query),
            &query,
            |b, &q| {
                b.iter(|| parse_query(black_box(q)))
            },
        );
    }
    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let index: SearchIndex =
        load_index(&synthetic_index(1000)).expect("Failed to load synthetic index");

    let mut group = c.benchmark_group("search");

    // Common word, most entries match
    group.bench_function("common_term", |b| {
        b.iter(|| index.query(black_box("benchmark")).count())
    });

    // Single title match near the end
    group.bench_function("rare_term", |b| {
        b.iter(|| index.query(black_box("Module999.symbol_6")).count())
    });

    group.bench_function("no_match", |b| {
        b.iter(|| index.query(black_box("xyzzy")).count())
    });

    // Filters with the default limit
    group.bench_function("filtered", |b| {
        let query = parse_query("category:method page:\"Page 5\" suite");
        b.iter(|| index.search(black_box(&query)).count())
    });

    group.finish();
}

criterion_group!(benches, bench_load, bench_query_parsing, bench_search);

criterion_main!(benches);
