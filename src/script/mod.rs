//! Script loading and splitting for files on disk

mod discovery;
mod sqlcmd;

pub use discovery::collect_sql_files;
pub use sqlcmd::expand_includes;

use std::path::{Path, PathBuf};

use anyhow::Result;
use encoding_rs::{Encoding, WINDOWS_1252};
use rayon::prelude::*;
use serde::Serialize;
use tracing::info;

use crate::error::SqlSplitError;
use crate::splitter::{split_statements_with, KeywordSet, StatementSpan};

/// Minimum number of files to benefit from parallel processing.
/// Below this threshold, sequential processing is faster due to rayon overhead.
pub const PARALLEL_THRESHOLD: usize = 8;

/// Options for splitting scripts
#[derive(Debug, Clone, Default)]
pub struct SplitOptions {
    /// Keyword tables driving boundary detection
    pub keywords: KeywordSet,
    /// Expand SQLCMD `:r` includes and `:setvar` variables before splitting
    pub expand_includes: bool,
}

/// A statement that owns its text, detached from the script it came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnedStatement {
    pub query: String,
    pub start_position: usize,
    pub end_position: usize,
    /// 1-based line of the first character
    pub start_line: usize,
}

impl OwnedStatement {
    fn from_span(span: &StatementSpan<'_>, text: &str) -> Self {
        Self {
            query: span.query.to_string(),
            start_position: span.start_position,
            end_position: span.end_position,
            start_line: span.start_line(text),
        }
    }
}

/// A script and the statements found in it
#[derive(Debug, Clone, Serialize)]
pub struct SplitScript {
    pub path: PathBuf,
    /// The text that was scanned (after include expansion, if enabled)
    #[serde(skip)]
    pub text: String,
    pub statements: Vec<OwnedStatement>,
}

impl SplitScript {
    /// Split already-loaded script text. `path` names the script in output and
    /// anchors relative `:r` includes.
    pub fn from_text(path: PathBuf, text: String, options: &SplitOptions) -> Result<Self> {
        let text = if options.expand_includes {
            expand_includes(&text, &path)?
        } else {
            text
        };

        let statements = split_statements_with(&text, &options.keywords)
            .iter()
            .map(|span| OwnedStatement::from_span(span, &text))
            .collect();

        Ok(Self {
            path,
            text,
            statements,
        })
    }
}

/// Decode script bytes as text.
///
/// A byte order mark selects UTF-8 or UTF-16 (as saved by SSMS). Without one,
/// UTF-8 is tried first and Windows-1252 is the fallback. Bytes containing
/// NUL without a BOM are treated as binary and rejected.
pub fn decode_sql_bytes(bytes: &[u8]) -> Option<String> {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        let (decoded, had_errors) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
        return (!had_errors).then(|| decoded.into_owned());
    }
    if bytes.contains(&0) {
        return None;
    }
    match std::str::from_utf8(bytes) {
        Ok(s) => Some(s.to_string()),
        Err(_) => {
            // Common for SQL files saved by older Windows tooling
            let (decoded, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
            Some(decoded.into_owned())
        }
    }
}

/// Read a SQL file as text.
pub fn read_sql_file(path: &Path) -> Result<String, SqlSplitError> {
    let bytes = std::fs::read(path).map_err(|e| SqlSplitError::SqlFileReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    decode_sql_bytes(&bytes).ok_or_else(|| SqlSplitError::InvalidEncoding {
        path: path.to_path_buf(),
    })
}

/// Read and split a single SQL file
pub fn split_sql_file(path: &Path, options: &SplitOptions) -> Result<SplitScript> {
    let text = read_sql_file(path)?;
    let script = SplitScript::from_text(path.to_path_buf(), text, options)?;
    info!(
        path = %path.display(),
        statements = script.statements.len(),
        "split script"
    );
    Ok(script)
}

/// Split multiple SQL files, using parallel processing for larger file sets.
///
/// Results are returned in input order; the first error is propagated.
pub fn split_sql_files(files: &[PathBuf], options: &SplitOptions) -> Result<Vec<SplitScript>> {
    if files.len() >= PARALLEL_THRESHOLD {
        files
            .par_iter()
            .map(|file| split_sql_file(file, options))
            .collect()
    } else {
        files
            .iter()
            .map(|file| split_sql_file(file, options))
            .collect()
    }
}
