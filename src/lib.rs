//! rust-sqlsplit: A fast statement splitter for T-SQL scripts
//!
//! This library takes a raw, possibly multi-statement SQL script and returns
//! the individually executable statements in it, with exact source offsets,
//! without parsing or validating the SQL.
//!
//! ```
//! let spans = rust_sqlsplit::split_statements(
//!     "DECLARE @v INT SET @v = 1 SELECT @v; SELECT * FROM users WITH (NOLOCK)",
//! );
//! let queries: Vec<_> = spans.iter().map(|s| s.query).collect();
//! assert_eq!(queries, ["SELECT @v;", "SELECT * FROM users WITH (NOLOCK)"]);
//! ```

pub mod error;
pub mod execution;
pub mod script;
pub mod splitter;
mod util;

use std::path::PathBuf;

use anyhow::Result;

pub use error::SqlSplitError;
pub use script::{OwnedStatement, SplitOptions, SplitScript};
pub use splitter::{split_statements, split_statements_with, KeywordSet, StatementSpan};

/// Split every SQL file named by `inputs` (files, directories or glob patterns)
pub fn split_scripts(inputs: &[PathBuf], options: &SplitOptions) -> Result<Vec<SplitScript>> {
    let files = script::collect_sql_files(inputs)?;
    tracing::debug!(files = files.len(), "collected SQL files");
    script::split_sql_files(&files, options)
}
