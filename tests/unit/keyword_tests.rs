//! Tests for custom keyword tables

use pretty_assertions::assert_eq;

use rust_sqlsplit::splitter::KeywordClass;
use rust_sqlsplit::{split_statements_with, KeywordSet, StatementSpan};

fn texts<'a>(spans: &[StatementSpan<'a>]) -> Vec<&'a str> {
    spans.iter().map(|s| s.query).collect()
}

#[test]
fn test_default_tables_match_split_statements() {
    let sql = "DECLARE @a INT SELECT 1 WITH c AS (SELECT 2 AS b) SELECT b FROM c";
    assert_eq!(
        split_statements_with(sql, &KeywordSet::default()),
        rust_sqlsplit::split_statements(sql)
    );
}

#[test]
fn test_custom_skip_keyword() {
    let keywords = KeywordSet::tsql().with_skip_keywords(["RAISERROR", "THROW"]);
    let sql = "RAISERROR('boom', 16, 1) SELECT 1; THROW 50000, 'bad', 1; SELECT 2";
    assert_eq!(
        texts(&split_statements_with(sql, &keywords)),
        vec!["SELECT 1;", "SELECT 2"]
    );

    // Without the extension RAISERROR is ordinary text
    assert_eq!(
        texts(&split_statements_with(sql, &KeywordSet::tsql())),
        vec!["RAISERROR('boom', 16, 1)", "SELECT 1;", "THROW 50000, 'bad', 1;", "SELECT 2"]
    );
}

#[test]
fn test_custom_boundary_keyword() {
    let keywords = KeywordSet::tsql().with_boundary_keywords(["drop"]);
    assert_eq!(
        texts(&split_statements_with("SELECT 1 DROP TABLE t", &keywords)),
        vec!["SELECT 1", "DROP TABLE t"]
    );
}

#[test]
fn test_custom_batch_separator() {
    let keywords = KeywordSet::tsql().with_batch_separators(["BATCH"]);
    assert_eq!(keywords.classify("batch"), Some(KeywordClass::BatchSeparator));
    assert_eq!(
        texts(&split_statements_with("BATCH\nSELECT 1;\nBATCH", &keywords)),
        vec!["SELECT 1;"]
    );
}

#[test]
fn test_extension_is_idempotent() {
    let once = KeywordSet::tsql().with_skip_keywords(["RAISERROR"]);
    let twice = once.clone().with_skip_keywords(["raiserror", ""]);
    assert_eq!(once, twice);
}

#[test]
fn test_spans_outlive_keyword_set() {
    let sql = String::from("SELECT 1 SELECT 2");
    let spans = {
        let keywords = KeywordSet::tsql();
        split_statements_with(&sql, &keywords)
    };
    assert_eq!(texts(&spans), vec!["SELECT 1", "SELECT 2"]);
}
