//! End-to-end tests for the search index pipeline.
//!
//! These run the full pipeline over an in-memory site and inspect the
//! artifacts it adds.

use std::{collections::BTreeMap, io};

use serde_json::Value;
use simplesearch_core::{Document, DocumentSet, FieldValue, MatchOptions};
use simplesearch_index::{
    AssetLoader, Directive, FsAssetLoader, IndexError, SearchOptions, SimpleSearch, UrlTransform,
};

/// Serves a fixed script instead of reading the bundled one.
struct FakeScript;

impl AssetLoader for FakeScript {
    async fn load(&self) -> io::Result<Vec<u8>> {
        Ok(b"contents of simple-search.min.js".to_vec())
    }

    fn describe(&self) -> String {
        "fake".to_string()
    }
}

fn sample_site() -> DocumentSet {
    let mut docs = DocumentSet::new();
    docs.insert(".archive/dot.html", Document::new("Hidden File"));
    docs.insert(
        "index.html",
        Document::new("Main Index")
            .with_field(
                "keywords",
                FieldValue::List(vec!["awesome".into(), "amazing".into()]),
            )
            .with_field("title", "Main index"),
    );
    docs.insert(
        "toc.htm",
        Document::new("Table of contents")
            .with_field("otherMetadata", "this is more metadata")
            .with_field("url", "WRONG - this should be overwritten"),
    );
    docs.insert("search.php", Document::new("A PHP script?"));
    docs
}

async fn run(options: SearchOptions) -> DocumentSet {
    let mut docs = sample_site();
    SimpleSearch::new(options)
        .expect("valid options")
        .run(&mut docs, &FakeScript)
        .await
        .expect("pipeline run");
    docs
}

/// Parse an index and key its records by URL.
fn records_by_url(docs: &DocumentSet, key: &str) -> BTreeMap<String, Value> {
    let index = docs.get(key).expect("index present");
    let records: Vec<Value> = serde_json::from_slice(index.contents()).expect("valid json");
    records
        .into_iter()
        .map(|record| {
            let url = record["url"].as_str().expect("url string").to_string();
            (url, record)
        })
        .collect()
}

fn indexed_urls(docs: &DocumentSet) -> Vec<String> {
    records_by_url(docs, "search.json").into_keys().collect()
}

fn default_records() -> BTreeMap<String, Value> {
    [
        (
            "/index.html".to_string(),
            serde_json::json!({
                "contents": "index main",
                "keywords": "amazing awesome",
                "title": "index main",
                "url": "/index.html"
            }),
        ),
        (
            "/toc.htm".to_string(),
            serde_json::json!({
                "contents": "contents of table",
                "url": "/toc.htm"
            }),
        ),
    ]
    .into_iter()
    .collect()
}

#[tokio::test]
async fn test_writes_search_json() {
    let docs = run(SearchOptions::default()).await;

    assert_eq!(records_by_url(&docs, "search.json"), default_records());
    assert!(!docs.contains("search-thing.json"));
}

#[tokio::test]
async fn test_writes_search_json_elsewhere() {
    let docs = run(SearchOptions::default().with_destination_json("search-thing.json")).await;

    assert_eq!(records_by_url(&docs, "search-thing.json"), default_records());
    assert!(!docs.contains("search.json"));
}

#[tokio::test]
async fn test_includes_script() {
    let docs = run(SearchOptions::default()).await;

    let script = docs.get("simple-search.min.js").expect("script present");
    assert_eq!(script.contents(), b"contents of simple-search.min.js");
    assert_eq!(script.mode.as_deref(), Some("0644"));
    assert!(!docs.contains("search.js"));
}

#[tokio::test]
async fn test_script_written_elsewhere() {
    let docs = run(SearchOptions::default().with_destination_js("search.js")).await;

    assert!(docs.contains("search.js"));
    assert!(!docs.contains("simple-search.min.js"));
}

#[tokio::test]
async fn test_script_skipped() {
    let docs = run(SearchOptions::default().without_script()).await;

    assert!(docs.contains("search.json"));
    assert!(!docs.contains("simple-search.min.js"));
}

#[tokio::test]
async fn test_indexes_any_metadata_and_overwrites_url() {
    let docs = run(SearchOptions::default().with_index([("otherMetadata", true), ("url", true)])).await;

    let expected: BTreeMap<String, Value> = [
        (
            "/index.html".to_string(),
            serde_json::json!({ "url": "/index.html" }),
        ),
        (
            "/toc.htm".to_string(),
            serde_json::json!({
                "otherMetadata": "this is more metadata",
                "url": "/toc.htm"
            }),
        ),
    ]
    .into_iter()
    .collect();

    assert_eq!(records_by_url(&docs, "search.json"), expected);
}

#[tokio::test]
async fn test_keywords_mode_on_metadata() {
    let docs = run(SearchOptions::default().with_index([("otherMetadata", "keywords")])).await;

    let records = records_by_url(&docs, "search.json");
    assert_eq!(
        records["/toc.htm"]["otherMetadata"],
        Value::from("is metadata more this")
    );
}

#[tokio::test]
async fn test_custom_cleansing_function() {
    let docs = run(SearchOptions::default().with_index([
        ("contents", Directive::from("markdown")),
        (
            "title",
            Directive::custom(|s| format!("modified{s}modified")),
        ),
    ]))
    .await;

    let expected: BTreeMap<String, Value> = [
        (
            "/index.html".to_string(),
            serde_json::json!({
                "contents": "index main",
                "title": "modifiedMain indexmodified",
                "url": "/index.html"
            }),
        ),
        (
            "/toc.htm".to_string(),
            serde_json::json!({
                "contents": "contents of table",
                "url": "/toc.htm"
            }),
        ),
    ]
    .into_iter()
    .collect();

    assert_eq!(records_by_url(&docs, "search.json"), expected);
}

#[tokio::test]
async fn test_matches_htm_and_html_by_default() {
    let docs = run(SearchOptions::default()).await;
    assert_eq!(indexed_urls(&docs), vec!["/index.html", "/toc.htm"]);
}

#[tokio::test]
async fn test_matches_anything_you_like() {
    let docs = run(SearchOptions::default().with_match("**/*.php")).await;
    assert_eq!(indexed_urls(&docs), vec!["/search.php"]);
}

#[tokio::test]
async fn test_can_include_hidden_files() {
    let docs = run(SearchOptions::default().with_match_options(MatchOptions {
        dot: true,
        ..MatchOptions::default()
    }))
    .await;

    assert_eq!(
        indexed_urls(&docs),
        vec!["/.archive/dot.html", "/index.html", "/toc.htm"]
    );
}

#[tokio::test]
async fn test_transform_url() {
    let docs = run(SearchOptions::default()
        .with_transform_url(UrlTransform::custom(|key| format!("/my-site/{key}"))))
    .await;

    assert_eq!(
        indexed_urls(&docs),
        vec!["/my-site/index.html", "/my-site/toc.htm"]
    );
}

#[tokio::test]
async fn test_records_follow_collection_order() {
    let docs = run(SearchOptions::default()).await;

    let index = docs.get("search.json").expect("index present");
    let records: Vec<Value> = serde_json::from_slice(index.contents()).expect("valid json");
    let urls: Vec<_> = records.iter().filter_map(|r| r["url"].as_str()).collect();

    assert_eq!(urls, vec!["/index.html", "/toc.htm"]);
}

#[tokio::test]
async fn test_unmatched_documents_untouched() {
    let before = sample_site();
    let after = run(SearchOptions::default()).await;

    for (key, document) in before.iter() {
        assert_eq!(after.get(key), Some(document), "{key} changed");
    }
}

#[tokio::test]
async fn test_missing_script_fails_after_index() {
    let mut docs = sample_site();
    let search = SimpleSearch::new(SearchOptions::default()).expect("valid options");

    let err = search
        .run(&mut docs, &FsAssetLoader::new("/nonexistent/simple-search.min.js"))
        .await
        .expect_err("missing script");

    assert!(matches!(err, IndexError::Asset { .. }));
    assert!(err.to_string().contains("/nonexistent/simple-search.min.js"));
    assert!(docs.contains("search.json"));
}

#[tokio::test]
async fn test_bundled_script_copied_verbatim() {
    let mut docs = sample_site();
    let search = SimpleSearch::new(SearchOptions::default()).expect("valid options");
    search
        .run(&mut docs, &FsAssetLoader::bundled())
        .await
        .expect("pipeline run");

    let expected = std::fs::read(simplesearch_index::BUNDLED_SCRIPT).expect("bundled script");
    let script = docs.get("simple-search.min.js").expect("script present");
    assert_eq!(script.contents(), expected.as_slice());
}
