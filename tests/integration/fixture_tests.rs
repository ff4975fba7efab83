//! Splitting realistic scripts checked in under tests/fixtures/scripts

use pretty_assertions::assert_eq;

use rust_sqlsplit::script::split_sql_file;
use rust_sqlsplit::{SplitOptions, SplitScript};

use crate::common::{assert_span_invariants, fixture_path};

fn split_fixture(name: &str, options: &SplitOptions) -> SplitScript {
    let path = fixture_path(name);
    let script = split_sql_file(&path, options)
        .unwrap_or_else(|e| panic!("Failed to split fixture {}: {:?}", name, e));

    let spans = rust_sqlsplit::split_statements_with(&script.text, &options.keywords);
    assert_span_invariants(&script.text, &spans);
    script
}

fn texts(script: &SplitScript) -> Vec<String> {
    // Normalize CRLF checkouts so expectations stay readable
    script
        .statements
        .iter()
        .map(|s| s.query.replace("\r\n", "\n"))
        .collect()
}

#[test]
fn test_deployment_script() {
    let script = split_fixture("deployment.sql", &SplitOptions::default());
    assert_eq!(
        texts(&script),
        vec![
            "INSERT INTO dbo.archive (id, sku, qty)\nSELECT id, sku, qty\nFROM dbo.stock WITH (NOLOCK)\nWHERE updated_at < DATEADD(day, -90, GETDATE());",
            "DELETE FROM dbo.stock\nWHERE updated_at < DATEADD(day, -90, GETDATE());",
            "UPDATE dbo.stock\nSET qty = 0\nWHERE qty < 0;",
            "INSERT INTO dbo.audit_log (message) VALUES (N'Maintenance done; rows archived')\nGO",
        ]
    );
    assert_eq!(script.statements[0].start_line, 20);
}

#[test]
fn test_report_queries() {
    let script = split_fixture("reports.sql", &SplitOptions::default());
    let statements = texts(&script);
    assert_eq!(statements.len(), 3, "statements: {:#?}", statements);

    assert!(statements[0].starts_with("WITH monthly AS ("));
    assert!(statements[0].ends_with("ORDER BY month_start, rnk"));
    assert!(statements[0].contains("ELSE 'rest' END AS tier"));

    assert_eq!(
        statements[1],
        "SELECT 'active' AS status, COUNT(*) FROM dbo.customers WHERE active = 1\nUNION ALL\nSELECT 'inactive', COUNT(*) FROM dbo.customers WHERE active = 0"
    );
    assert_eq!(
        statements[2],
        "SELECT [order], [select], \"from\"\nFROM dbo.[weird; names]\nWHERE note <> 'it''s -- not a comment'"
    );
}

#[test]
fn test_procedural_script() {
    let script = split_fixture("procedural.sql", &SplitOptions::default());
    let statements = texts(&script);
    assert_eq!(
        statements,
        vec![
            "BEGIN TRANSACTION;",
            "DELETE TOP (@batch) FROM dbo.queue\n        OUTPUT deleted.* INTO dbo.queue_history\n        WHERE processed = 1;",
            "COMMIT TRANSACTION;",
            "ROLLBACK TRANSACTION;",
            "SELECT 'done' AS result",
            "SELECT 'partial' AS result;",
        ]
    );
}

#[test]
fn test_sqlcmd_script_with_includes() {
    let options = SplitOptions {
        expand_includes: true,
        ..SplitOptions::default()
    };
    let script = split_fixture("sqlcmd/main.sql", &options);
    assert_eq!(
        texts(&script),
        vec![
            "UPDATE dbo.stock SET refreshed_at = GETDATE();",
            "SELECT COUNT(*) FROM dbo.stock;",
        ]
    );
    assert!(script.text.contains("-- :r ./procs/refresh.sql"));
    assert!(script.text.contains("-- :on error exit"));
}
