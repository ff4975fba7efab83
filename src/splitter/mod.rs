//! Statement boundary scanning for T-SQL scripts
//!
//! Splits a raw, possibly multi-statement script into individually
//! executable statement spans without parsing the SQL. The work happens in a
//! single forward pass over the input:
//!
//! - `lexical`: string, bracketed identifier and comment tracking
//! - `structure`: parenthesis, BEGIN/END and CASE/END depth
//! - `scanner`: keyword-driven boundary decisions
//! - `segment`: span extraction, trimming and empty-segment filtering
//!
//! The scanner never fails. Unterminated strings or comments are folded into
//! the trailing statement.

mod keywords;
mod lexical;
mod lookahead;
mod scanner;
mod segment;
mod structure;

pub use keywords::{KeywordClass, KeywordSet};
pub use lexical::LexicalMode;
pub use lookahead::LOOKAHEAD_LIMIT;
pub use segment::StatementSpan;

use scanner::Scanner;

/// Split `text` into statement spans using the T-SQL keyword tables.
///
/// # Example
///
/// ```
/// use rust_sqlsplit::split_statements;
///
/// let spans = split_statements("SELECT 1;;; SELECT 2;;;");
/// let queries: Vec<_> = spans.iter().map(|s| s.query).collect();
/// assert_eq!(queries, ["SELECT 1;", "SELECT 2;"]);
/// assert_eq!(spans[1].start_position, 12);
/// ```
pub fn split_statements(text: &str) -> Vec<StatementSpan<'_>> {
    split_statements_with(text, KeywordSet::tsql_static())
}

/// Split `text` into statement spans using custom keyword tables.
pub fn split_statements_with<'a>(text: &'a str, keywords: &KeywordSet) -> Vec<StatementSpan<'a>> {
    Scanner::new(text, keywords).run()
}
