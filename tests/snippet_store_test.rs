//! Snippet store behaviour through the persistent JSON store.

use codebot::snippets::{BulkTagOutcome, SEARCH_LIMIT};
use codebot::{
    AnalysisConfig, Error, JsonFileStore, NewSnippet, SnippetFilter, SnippetStore, SnippetUpdate,
};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn store_in(dir: &TempDir) -> JsonFileStore {
    JsonFileStore::open(dir.path().join("data").join("snippets.json")).unwrap()
}

fn seed(store: &mut JsonFileStore) {
    store
        .create(
            NewSnippet::new("Connect to Postgres", "conn = connect(dsn)")
                .description("database helper")
                .tags(["db", "sql"]),
        )
        .unwrap();
    store
        .create(NewSnippet::new("Fetch page", "fetch(url).then(r => r.json())").language("javascript"))
        .unwrap();
    store
        .create(
            NewSnippet::new("Retry loop", "for attempt in range(3):\n    try_once()")
                .tags(["retry"]),
        )
        .unwrap();
}

#[test]
fn test_missing_file_opens_empty() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    assert!(store.snippets().is_empty());
    assert!(!store.path().exists());
}

#[test]
fn test_records_survive_reopen() {
    let dir = TempDir::new().unwrap();
    let created = {
        let mut store = store_in(&dir);
        store
            .create(NewSnippet::new("Parse args", "import argparse").tags(["cli"]))
            .unwrap()
    };

    let mut reopened = store_in(&dir);
    assert_eq!(reopened.fetch(&created.id).unwrap(), created);

    // The id counter is persisted too
    let next = reopened.create(NewSnippet::new("Another", "x = 1")).unwrap();
    assert_eq!(next.id, "000000000000000000000002");
}

#[test]
fn test_no_temp_file_left_behind() {
    let dir = TempDir::new().unwrap();
    let mut store = store_in(&dir);
    store.create(NewSnippet::new("t", "x")).unwrap();

    let names: Vec<_> = std::fs::read_dir(dir.path().join("data"))
        .unwrap()
        .map(|entry| entry.unwrap().file_name().into_string().unwrap())
        .collect();
    assert_eq!(names, vec!["snippets.json".to_string()]);
}

#[test]
fn test_list_filters_are_case_insensitive_regexes() {
    let dir = TempDir::new().unwrap();
    let mut store = store_in(&dir);
    seed(&mut store);

    let by_language = store
        .list(
            &SnippetFilter {
                language: Some("^JAVA".into()),
                ..SnippetFilter::default()
            },
            20,
        )
        .unwrap();
    assert_eq!(by_language.len(), 1);
    assert_eq!(by_language[0].title, "Fetch page");

    let by_tag = store
        .list(
            &SnippetFilter {
                tag: Some("^sq".into()),
                ..SnippetFilter::default()
            },
            20,
        )
        .unwrap();
    assert_eq!(by_tag.len(), 1);

    // Free-text search covers descriptions
    let by_description = store
        .list(
            &SnippetFilter {
                search: Some("DATABASE".into()),
                ..SnippetFilter::default()
            },
            20,
        )
        .unwrap();
    assert_eq!(by_description[0].title, "Connect to Postgres");
}

#[test]
fn test_invalid_regex_is_reported() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    let err = store.search_code("(unclosed", None).unwrap_err();
    assert!(matches!(err, Error::InvalidPattern { .. }));
}

#[test]
fn test_search_code_ignores_titles() {
    let dir = TempDir::new().unwrap();
    let mut store = store_in(&dir);
    seed(&mut store);

    assert!(store.search_code("postgres", None).unwrap().is_empty());
    let found = store.search_code(r"range\(\d\)", Some("python")).unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].title, "Retry loop");
}

#[test]
fn test_search_code_is_capped() {
    let dir = TempDir::new().unwrap();
    let mut store = store_in(&dir);
    for i in 0..SEARCH_LIMIT + 5 {
        store.create(NewSnippet::new(format!("s{i}"), "x = 1")).unwrap();
    }
    assert_eq!(store.search_code("x", None).unwrap().len(), SEARCH_LIMIT);
}

#[test]
fn test_update_and_delete_persist() {
    let dir = TempDir::new().unwrap();
    let mut store = store_in(&dir);
    seed(&mut store);

    let updated = store
        .update(
            "000000000000000000000002",
            SnippetUpdate {
                title: Some("Fetch JSON".into()),
                ..SnippetUpdate::default()
            },
        )
        .unwrap();
    assert_eq!(updated.language, "javascript");
    store.delete("000000000000000000000001").unwrap();

    let reopened = store_in(&dir);
    assert_eq!(reopened.snippets().len(), 2);
    assert_eq!(reopened.fetch("000000000000000000000002").unwrap().title, "Fetch JSON");
    assert!(matches!(
        reopened.fetch("000000000000000000000001"),
        Err(Error::NotFound { .. })
    ));
}

#[test]
fn test_bulk_tag_adds_then_removes() {
    let dir = TempDir::new().unwrap();
    let mut store = store_in(&dir);
    seed(&mut store);

    let outcome = store
        .bulk_tag(
            &SnippetFilter {
                language: Some("python".into()),
                ..SnippetFilter::default()
            },
            &["reviewed".to_string(), "db".to_string()],
            &["sql".to_string()],
        )
        .unwrap();
    assert_eq!(
        outcome,
        BulkTagOutcome {
            matched: 2,
            modified: 2
        }
    );

    let reopened = store_in(&dir);
    assert_eq!(
        reopened.fetch("000000000000000000000001").unwrap().tags,
        vec!["db", "reviewed"]
    );
    assert_eq!(
        reopened.fetch("000000000000000000000003").unwrap().tags,
        vec!["retry", "reviewed", "db"]
    );
}

#[test]
fn test_bulk_tag_counts_unchanged_records() {
    let dir = TempDir::new().unwrap();
    let mut store = store_in(&dir);
    seed(&mut store);

    let outcome = store
        .bulk_tag(&SnippetFilter::default(), &["db".to_string()], &[])
        .unwrap();
    assert_eq!(outcome.matched, 3);
    assert_eq!(outcome.modified, 2);
}

#[test]
fn test_bulk_tag_rejects_empty_work() {
    let dir = TempDir::new().unwrap();
    let mut store = store_in(&dir);
    seed(&mut store);

    let no_match = SnippetFilter {
        search: Some("no such text".into()),
        ..SnippetFilter::default()
    };
    assert!(matches!(
        store.bulk_tag(&no_match, &["x".to_string()], &[]),
        Err(Error::Validation(_))
    ));
    assert!(matches!(
        store.bulk_tag(&SnippetFilter::default(), &[], &[]),
        Err(Error::Validation(_))
    ));
}

#[test]
fn test_stats() {
    let dir = TempDir::new().unwrap();
    let mut store = store_in(&dir);
    seed(&mut store);

    let stats = store.stats().unwrap();
    assert_eq!(stats.total_snippets, 3);
    assert_eq!(
        stats.languages,
        vec![("python".to_string(), 2), ("javascript".to_string(), 1)]
    );
    assert_eq!(
        stats.popular_tags,
        vec![
            ("db".to_string(), 1),
            ("retry".to_string(), 1),
            ("sql".to_string(), 1)
        ]
    );
    assert!(stats.latest_snippet.is_some());
}

#[test]
fn test_analyze_stored_snippet() {
    let dir = TempDir::new().unwrap();
    let mut store = store_in(&dir);
    let snippet = store
        .create(NewSnippet::new("Debug", "print(secret)").language("Python"))
        .unwrap();

    let analysis = store.analyze(&snippet.id, &AnalysisConfig::default()).unwrap();
    assert_eq!(analysis.snippet_id, snippet.id);
    assert_eq!(analysis.language, "python");
    assert_eq!(analysis.patterns_found[0].rule_name, "print_debug");
    assert!(matches!(
        store.analyze("missing", &AnalysisConfig::default()),
        Err(Error::NotFound { .. })
    ));
}
