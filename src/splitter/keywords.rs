//! Keyword tables that drive statement boundary decisions.
//!
//! The scanner never matches keywords inline; it asks a [`KeywordSet`] to
//! classify each whole word it meets at structural depth zero. Dialect
//! variations are expressed by swapping or extending the tables.
//!
//! # Example
//!
//! ```
//! use rust_sqlsplit::{split_statements_with, KeywordSet};
//!
//! let keywords = KeywordSet::tsql().with_skip_keywords(["RAISERROR"]);
//! let spans = split_statements_with("RAISERROR('x', 16, 1) SELECT 1", &keywords);
//! assert_eq!(spans.len(), 1);
//! assert_eq!(spans[0].query, "SELECT 1");
//! ```

use std::sync::LazyLock;

use crate::util::eq_ci;

/// Statement verbs that start a new statement when real content is already pending.
const BOUNDARY_KEYWORDS: &[&str] = &["SELECT", "INSERT", "UPDATE", "DELETE", "MERGE"];

/// Keywords that open a common table expression header (after lookahead).
const CTE_KEYWORDS: &[&str] = &["WITH"];

/// Administrative statements whose whole clause is dropped from the output.
const SKIP_KEYWORDS: &[&str] = &[
    "DECLARE", "SET", "PRINT", "USE", "CREATE", "TRUNCATE", "EXEC", "EXECUTE",
];

const BLOCK_OPEN_KEYWORDS: &[&str] = &["BEGIN"];
const BLOCK_CLOSE_KEYWORDS: &[&str] = &["END"];
const CONDITIONAL_KEYWORDS: &[&str] = &["IF", "WHILE"];
const CONTROL_KEYWORDS: &[&str] = &["ELSE", "TRY", "CATCH"];
const BATCH_SEPARATORS: &[&str] = &["GO"];

/// Words after which a statement verb continues the current statement.
const CONTINUATION_KEYWORDS: &[&str] = &["UNION", "ALL", "EXCEPT", "INTERSECT", "THEN"];

const CASE_KEYWORDS: &[&str] = &["CASE"];

/// Words that turn `BEGIN` into a transaction statement instead of a block.
const TRANSACTION_KEYWORDS: &[&str] = &["TRAN", "TRANSACTION", "DISTRIBUTED"];

/// Statements without a boundary verb. They end a skipped clause
/// (`IF @@TRANCOUNT > 0 ROLLBACK`, `IF OBJECT_ID('t') IS NOT NULL DROP TABLE t`)
/// but never split pending content.
const STANDALONE_KEYWORDS: &[&str] = &[
    // transaction and flow
    "COMMIT", "ROLLBACK", "SAVE", "RETURN", "THROW", "RAISERROR", "BREAK", "CONTINUE", "WAITFOR",
    // DDL, permissions and maintenance
    "DROP", "ALTER", "GRANT", "REVOKE", "DENY", "BACKUP", "RESTORE", "DBCC",
];

/// Statement heads paired with the verb that supplies their rows.
const STATEMENT_SOURCES: &[(&str, &str)] = &[("INSERT", "SELECT")];

/// Words that supply rows inline, so no source verb follows.
const ROW_CONSTRUCTORS: &[&str] = &["VALUES"];

/// Statements that open with a privilege list (`GRANT SELECT, INSERT ON t TO r`).
const PRIVILEGE_STATEMENTS: &[&str] = &["GRANT", "REVOKE", "DENY"];

/// Words that close a privilege list.
const PRIVILEGE_LIST_END: &[&str] = &["ON", "TO", "FROM"];

static TSQL_KEYWORDS: LazyLock<KeywordSet> = LazyLock::new(KeywordSet::tsql);

/// Role a keyword plays in boundary detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordClass {
    /// SELECT, INSERT, UPDATE, DELETE, MERGE
    Boundary,
    /// WITH (CTE header or table hint, decided by lookahead)
    Cte,
    /// DECLARE, SET, PRINT, ...
    Skip,
    /// GO
    BatchSeparator,
    /// BEGIN
    BlockOpen,
    /// END
    BlockClose,
    /// IF, WHILE: control keywords followed by a condition
    Conditional,
    /// ELSE, TRY, CATCH
    Control,
    /// UNION, ALL, EXCEPT, INTERSECT, THEN
    Continuation,
    /// CASE
    CaseOpen,
    /// TRAN, TRANSACTION, DISTRIBUTED
    Transaction,
    /// COMMIT, ROLLBACK, RETURN, THROW, ...
    Standalone,
}

/// Keyword configuration for the statement scanner.
///
/// All tables are matched as whole words, ASCII case-insensitively. When a
/// word appears in more than one table the first match in [`KeywordClass`]
/// declaration order wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordSet {
    boundary: Vec<String>,
    cte: Vec<String>,
    skip: Vec<String>,
    batch_separator: Vec<String>,
    block_open: Vec<String>,
    block_close: Vec<String>,
    conditional: Vec<String>,
    control: Vec<String>,
    continuation: Vec<String>,
    case_open: Vec<String>,
    transaction: Vec<String>,
    standalone: Vec<String>,
    statement_sources: Vec<(String, String)>,
    row_constructors: Vec<String>,
    privilege_statements: Vec<String>,
    privilege_list_end: Vec<String>,
}

fn table(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_ascii_uppercase()).collect()
}

fn contains(table: &[String], word: &str) -> bool {
    table.iter().any(|k| eq_ci(word, k))
}

impl Default for KeywordSet {
    fn default() -> Self {
        Self::tsql()
    }
}

impl KeywordSet {
    /// The T-SQL keyword tables.
    pub fn tsql() -> Self {
        Self {
            boundary: table(BOUNDARY_KEYWORDS),
            cte: table(CTE_KEYWORDS),
            skip: table(SKIP_KEYWORDS),
            batch_separator: table(BATCH_SEPARATORS),
            block_open: table(BLOCK_OPEN_KEYWORDS),
            block_close: table(BLOCK_CLOSE_KEYWORDS),
            conditional: table(CONDITIONAL_KEYWORDS),
            control: table(CONTROL_KEYWORDS),
            continuation: table(CONTINUATION_KEYWORDS),
            case_open: table(CASE_KEYWORDS),
            transaction: table(TRANSACTION_KEYWORDS),
            standalone: table(STANDALONE_KEYWORDS),
            statement_sources: STATEMENT_SOURCES
                .iter()
                .map(|(head, source)| (head.to_ascii_uppercase(), source.to_ascii_uppercase()))
                .collect(),
            row_constructors: table(ROW_CONSTRUCTORS),
            privilege_statements: table(PRIVILEGE_STATEMENTS),
            privilege_list_end: table(PRIVILEGE_LIST_END),
        }
    }

    /// Shared, lazily built T-SQL tables used by [`crate::split_statements`].
    pub fn tsql_static() -> &'static KeywordSet {
        &TSQL_KEYWORDS
    }

    /// Add keywords whose clause is skipped when it starts a statement.
    pub fn with_skip_keywords<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        extend(&mut self.skip, words);
        self
    }

    /// Add statement verbs that act as implicit boundaries.
    pub fn with_boundary_keywords<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        extend(&mut self.boundary, words);
        self
    }

    /// Add batch separator keywords (GO by default).
    pub fn with_batch_separators<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        extend(&mut self.batch_separator, words);
        self
    }

    /// Classify a word, or `None` for ordinary statement text.
    pub fn classify(&self, word: &str) -> Option<KeywordClass> {
        let tables: [(&[String], KeywordClass); 12] = [
            (&self.boundary, KeywordClass::Boundary),
            (&self.cte, KeywordClass::Cte),
            (&self.skip, KeywordClass::Skip),
            (&self.batch_separator, KeywordClass::BatchSeparator),
            (&self.block_open, KeywordClass::BlockOpen),
            (&self.block_close, KeywordClass::BlockClose),
            (&self.conditional, KeywordClass::Conditional),
            (&self.control, KeywordClass::Control),
            (&self.continuation, KeywordClass::Continuation),
            (&self.case_open, KeywordClass::CaseOpen),
            (&self.transaction, KeywordClass::Transaction),
            (&self.standalone, KeywordClass::Standalone),
        ];
        tables
            .into_iter()
            .find(|(words, _)| contains(words, word))
            .map(|(_, class)| class)
    }

    /// Whether `word` is a control-flow keyword (BEGIN, END, IF, ELSE, WHILE, TRY, CATCH).
    ///
    /// The scanner works from [`KeywordSet::classify`] directly. This is the
    /// coarse question tools like editors and highlighters ask when they
    /// want to dim or fold the text that never reaches a statement span.
    pub fn is_control(&self, word: &str) -> bool {
        matches!(
            self.classify(word),
            Some(
                KeywordClass::BlockOpen
                    | KeywordClass::BlockClose
                    | KeywordClass::Conditional
                    | KeywordClass::Control
            )
        )
    }

    /// Whether `word` follows `BEGIN` in a transaction statement.
    pub fn is_transaction_word(&self, word: &str) -> bool {
        contains(&self.transaction, word)
    }

    /// The verb that feeds rows into a statement headed by `head`, if any.
    pub fn source_for(&self, head: &str) -> Option<&str> {
        self.statement_sources
            .iter()
            .find(|(h, _)| eq_ci(head, h))
            .map(|(_, source)| source.as_str())
    }

    /// Whether `word` supplies rows inline (`INSERT ... VALUES`).
    pub fn is_row_constructor(&self, word: &str) -> bool {
        contains(&self.row_constructors, word)
    }

    /// Whether a statement headed by `head` opens with a privilege list.
    pub fn is_privilege_statement(&self, head: &str) -> bool {
        contains(&self.privilege_statements, head)
    }

    /// Whether `word` closes a privilege list.
    pub fn ends_privilege_list(&self, word: &str) -> bool {
        contains(&self.privilege_list_end, word)
    }
}

fn extend<I, S>(table: &mut Vec<String>, words: I)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    for word in words {
        let word = word.as_ref().trim().to_ascii_uppercase();
        if !word.is_empty() && !table.contains(&word) {
            table.push(word);
        }
    }
}
