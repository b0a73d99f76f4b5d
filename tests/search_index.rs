//! Library-level tests against a real generated index
//! (`tests/fixtures/search_index.js`, 13 entries).

use docsift::index::stats::IndexStats;
use docsift::query::MatchField;
use docsift::{load_index, load_index_file, parse_query, Category, IndexError, SearchIndex};
use std::path::PathBuf;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("search_index.js")
}

fn fixture() -> SearchIndex {
    load_index_file(&fixture_path()).expect("fixture should load")
}

fn positions(index: &SearchIndex, term: &str) -> Vec<usize> {
    index.query(term).hits().map(|h| h.index).collect()
}

#[test]
fn test_loads_all_entries_in_order() {
    let index = fixture();
    assert_eq!(index.len(), 13);
    assert_eq!(index.binding(), Some("documenterSearchIndex"));

    let first = &index.entries()[0];
    assert_eq!(first.location, "");
    assert_eq!(first.title, "Home");
    assert_eq!(first.text, "CurrentModule = TuringBenchmarking");
    assert_eq!(first.category, Category::Page);

    let last = &index.entries()[12];
    assert_eq!(last.title, "TuringBenchmarking.stan_model_string");
    assert_eq!(last.category, Category::Function);
}

#[test]
fn test_single_title_match() {
    let index = fixture();
    let hits: Vec<_> = index.query("stan_model_string").collect();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].location, "#TuringBenchmarking.stan_model_string");
}

#[test]
fn test_no_match() {
    assert_eq!(fixture().query("xyzzy").count(), 0);
}

#[test]
fn test_case_insensitive() {
    let index = fixture();
    let upper: Vec<_> = index.query("STAN").collect();
    let lower: Vec<_> = index.query("stan").collect();
    assert_eq!(upper, lower);
    assert_eq!(positions(&index, "Stan"), [9, 10, 11, 12]);
}

#[test]
fn test_idempotent() {
    let index = fixture();
    assert_eq!(positions(&index, "model"), positions(&index, "model"));
    assert_eq!(positions(&index, "model"), [2, 4, 8, 9, 10, 11, 12]);
}

#[test]
fn test_results_follow_input_order() {
    let index = fixture();
    assert_eq!(positions(&index, "zygote"), [4, 11]);
    assert_eq!(positions(&index, "benchmark_model"), [4, 8]);
}

#[test]
fn test_text_only_match() {
    let index = fixture();
    let hits: Vec<_> = index.query("mooncake").hits().collect();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].field, Some(MatchField::Text));
    assert_eq!(hits[0].entry.title, "TuringBenchmarking.make_turing_suite");
}

#[test]
fn test_location_helpers_on_fixture() {
    let index = fixture();
    let entry = &index.entries()[8];
    assert_eq!(entry.page_path(), "");
    assert_eq!(
        entry.anchor(),
        Some("TuringBenchmarking.benchmark_model-Tuple{DynamicPPL.Model}")
    );
    assert_eq!(index.at_location("").count(), 5);
    assert_eq!(index.pages(), ["Home"]);
}

#[test]
fn test_filtered_search() {
    let index = fixture();
    let hits: Vec<_> = index.search(&parse_query("category:method suite")).collect();
    let titles: Vec<_> = hits.iter().map(|h| h.entry.title.as_str()).collect();
    assert_eq!(
        titles,
        [
            "TuringBenchmarking.benchmark_model",
            "TuringBenchmarking.make_turing_suite"
        ]
    );

    let sections = index.search(&parse_query("cat:section")).count();
    assert_eq!(sections, 3);
}

#[test]
fn test_stats_on_fixture() {
    let stats = IndexStats::collect(&fixture());
    assert_eq!(stats.entries, 13);
    assert_eq!(stats.pages, 1);
    assert_eq!(stats.empty_text, 4);
    assert_eq!(stats.text_bytes, 3310);
    assert_eq!(
        stats.categories,
        vec![
            (Category::Page, 5),
            (Category::Section, 3),
            (Category::Method, 2),
            (Category::Function, 3),
        ]
    );
}

#[test]
fn test_malformed_produces_no_index() {
    let raw = std::fs::read_to_string(fixture_path()).unwrap();
    // drop the first `location` key
    let broken = raw.replacen(r#""location":"","#, "", 1);

    match load_index(&broken) {
        Err(IndexError::Malformed { reason, .. }) => {
            assert!(reason.contains("missing field `location`"), "{reason}");
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(index) => panic!("loaded {} entries from malformed input", index.len()),
    }
}

#[test]
fn test_shared_across_threads() {
    let index = fixture();
    let expected = positions(&index, "suite");

    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(|| positions(&index, "suite")))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}
