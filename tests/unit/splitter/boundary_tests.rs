//! Tests for semicolon and keyword statement boundaries

use pretty_assertions::assert_eq;

use rust_sqlsplit::split_statements;

use crate::common::queries;

// ============================================================================
// Empty Input Tests
// ============================================================================

#[test]
fn test_empty_input() {
    assert!(split_statements("").is_empty());
}

#[test]
fn test_whitespace_and_semicolons_only() {
    assert!(queries(";").is_empty());
    assert!(queries("  ;  ;  ").is_empty());
    assert!(queries("\n\t\r\n").is_empty());
}

#[test]
fn test_unicode_whitespace_only() {
    assert!(queries("\u{00A0}").is_empty());
    assert!(queries("\u{3000}\u{2028}\u{2029}").is_empty());
    assert!(queries("\u{FEFF}").is_empty());
    assert!(queries("\u{00A0};\u{1680};\u{000B}").is_empty());
}

// ============================================================================
// Unicode Whitespace Tests
// ============================================================================

#[test]
fn test_trailing_unicode_whitespace_after_semicolon() {
    assert_eq!(queries("SELECT 1;\u{3000}"), vec!["SELECT 1;"]);
    assert_eq!(queries("SELECT 1;\u{2028}SELECT 2;"), vec!["SELECT 1;", "SELECT 2;"]);
}

#[test]
fn test_trailing_unicode_whitespace_is_trimmed() {
    let spans = split_statements("SELECT 1\u{00A0}");
    assert_eq!(spans.len(), 1);
    assert_eq!(spans[0].query, "SELECT 1");
    assert_eq!(spans[0].end_position, 8);
}

#[test]
fn test_leading_byte_order_mark_is_skipped() {
    let spans = split_statements("\u{FEFF}SELECT 1");
    assert_eq!(spans.len(), 1);
    assert_eq!(spans[0].query, "SELECT 1");
    assert_eq!(spans[0].start_position, 3);
}

#[test]
fn test_unicode_whitespace_separates_keywords() {
    assert_eq!(
        queries("SELECT\u{00A0}a\u{00A0}FROM\u{00A0}t\u{3000}SELECT\u{3000}b\u{3000}FROM\u{3000}s"),
        vec!["SELECT\u{00A0}a\u{00A0}FROM\u{00A0}t", "SELECT\u{3000}b\u{3000}FROM\u{3000}s"]
    );
}

#[test]
fn test_non_whitespace_unicode_stays_in_words() {
    assert_eq!(queries("SELECT café FROM naïve"), vec!["SELECT café FROM naïve"]);
    assert_eq!(queries("SELECT 1 AS 値SELECT"), vec!["SELECT 1 AS 値SELECT"]);
}

// ============================================================================
// Semicolon Tests
// ============================================================================

#[test]
fn test_semicolon_included_in_statement() {
    let spans = split_statements("SELECT 1; SELECT 2;");
    assert_eq!(spans.len(), 2);
    assert_eq!(spans[0].query, "SELECT 1;");
    assert_eq!((spans[0].start_position, spans[0].end_position), (0, 9));
    assert_eq!(spans[1].query, "SELECT 2;");
    assert_eq!((spans[1].start_position, spans[1].end_position), (10, 19));
}

#[test]
fn test_repeated_semicolons_collapse() {
    let spans = split_statements("SELECT 1;;; SELECT 2;;;");
    let texts: Vec<_> = spans.iter().map(|s| s.query).collect();
    assert_eq!(texts, vec!["SELECT 1;", "SELECT 2;"]);
    assert_eq!(spans[1].start_position, 12);
}

#[test]
fn test_semicolon_inside_parentheses_does_not_split() {
    // Not valid T-SQL, but the depth rule must hold regardless
    let sql = "SELECT (1; 2) FROM t";
    assert_eq!(queries(sql), vec![sql]);
}

#[test]
fn test_last_statement_without_semicolon() {
    assert_eq!(
        queries("SELECT 1;\nSELECT 2"),
        vec!["SELECT 1;", "SELECT 2"]
    );
}

// ============================================================================
// Keyword Boundary Tests
// ============================================================================

#[test]
fn test_keyword_split_without_semicolons() {
    assert_eq!(
        queries("SELECT * FROM users SELECT * FROM orders"),
        vec!["SELECT * FROM users", "SELECT * FROM orders"]
    );
}

#[test]
fn test_every_statement_verb_is_a_boundary() {
    let sql = "SELECT 1 INSERT INTO t VALUES (1) UPDATE t SET a = 2 DELETE FROM t MERGE INTO t USING s ON 1 = 1 WHEN MATCHED THEN DELETE;";
    assert_eq!(
        queries(sql),
        vec![
            "SELECT 1",
            "INSERT INTO t VALUES (1)",
            "UPDATE t SET a = 2",
            "DELETE FROM t",
            "MERGE INTO t USING s ON 1 = 1 WHEN MATCHED THEN DELETE;",
        ]
    );
}

#[test]
fn test_keywords_are_case_insensitive() {
    assert_eq!(
        queries("select 1 Select 2 sElEcT 3"),
        vec!["select 1", "Select 2", "sElEcT 3"]
    );
}

#[test]
fn test_keywords_match_whole_words_only() {
    let sql = "SELECT selected, updated_at, @select, #insert FROM deletes";
    assert_eq!(queries(sql), vec![sql]);
}

#[test]
fn test_qualified_names_are_not_keywords() {
    let sql = "SELECT t.select, t.[update], dbo.delete FROM t";
    assert_eq!(queries(sql), vec![sql]);
}

#[test]
fn test_subquery_does_not_split() {
    let sql = "SELECT * FROM users WHERE id IN (SELECT user_id FROM orders)";
    assert_eq!(queries(sql), vec![sql]);
}

#[test]
fn test_nested_subqueries() {
    let sql = "SELECT * FROM (SELECT a FROM (SELECT a FROM t) x) y WHERE EXISTS (SELECT 1) SELECT 2";
    assert_eq!(
        queries(sql),
        vec![
            "SELECT * FROM (SELECT a FROM (SELECT a FROM t) x) y WHERE EXISTS (SELECT 1)",
            "SELECT 2"
        ]
    );
}

#[test]
fn test_table_hint_does_not_split() {
    let sql = "SELECT * FROM users WITH (NOLOCK)";
    assert_eq!(queries(sql), vec![sql]);

    let sql = "SELECT * FROM a WITH (NOLOCK) JOIN b WITH (NOLOCK, INDEX(ix_b)) ON a.id = b.id";
    assert_eq!(queries(sql), vec![sql]);
}

#[test]
fn test_update_set_is_part_of_statement() {
    let sql = "UPDATE users SET name = 'x' WHERE id = 1";
    assert_eq!(queries(sql), vec![sql]);
}

// ============================================================================
// Continuation Tests
// ============================================================================

#[test]
fn test_set_operators_continue_statement() {
    for op in ["UNION", "UNION ALL", "EXCEPT", "INTERSECT"] {
        let sql = format!("SELECT a FROM t {} SELECT a FROM s", op);
        assert_eq!(queries(&sql), vec![sql.as_str()], "operator {}", op);
    }
}

#[test]
fn test_statement_after_union_chain_splits() {
    assert_eq!(
        queries("SELECT 1 UNION SELECT 2 SELECT 3"),
        vec!["SELECT 1 UNION SELECT 2", "SELECT 3"]
    );
}

#[test]
fn test_insert_select_is_one_statement() {
    assert_eq!(
        queries("INSERT INTO archive (id) SELECT id FROM users SELECT COUNT(*) FROM archive"),
        vec![
            "INSERT INTO archive (id) SELECT id FROM users",
            "SELECT COUNT(*) FROM archive"
        ]
    );
}

#[test]
fn test_insert_values_then_select_splits() {
    assert_eq!(
        queries("INSERT INTO t (a) VALUES (1) SELECT * FROM t"),
        vec!["INSERT INTO t (a) VALUES (1)", "SELECT * FROM t"]
    );
}

#[test]
fn test_merge_actions_continue_statement() {
    let sql = "MERGE INTO t USING s ON t.id = s.id \
               WHEN MATCHED THEN UPDATE SET a = s.a \
               WHEN NOT MATCHED THEN INSERT (a) VALUES (s.a);";
    assert_eq!(queries(sql), vec![sql]);
}

// ============================================================================
// Trimming Tests
// ============================================================================

#[test]
fn test_trailing_whitespace_trimmed() {
    let spans = split_statements("SELECT 1   \n\n");
    assert_eq!(spans.len(), 1);
    assert_eq!(spans[0].query, "SELECT 1");
    assert_eq!(spans[0].end_position, 8);
}

#[test]
fn test_leading_whitespace_excluded() {
    let spans = split_statements("\n   SELECT 1");
    assert_eq!(spans.len(), 1);
    assert_eq!(spans[0].start_position, 4);
    assert_eq!(spans[0].query, "SELECT 1");
}

#[test]
fn test_trailing_comment_kept_before_keyword_boundary() {
    assert_eq!(
        queries("SELECT 1 -- first\nSELECT 2"),
        vec!["SELECT 1 -- first", "SELECT 2"]
    );
}
