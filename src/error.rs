//! Error types for rust-sqlsplit

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading and splitting SQL scripts.
///
/// Splitting itself never fails; every variant here comes from getting the
/// script text into memory.
#[derive(Error, Debug)]
pub enum SqlSplitError {
    #[error("Failed to read SQL file: {path}")]
    SqlFileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("SQL file is not valid text (neither UTF-8 nor Windows-1252): {path}")]
    InvalidEncoding { path: PathBuf },

    #[error("Failed to read SQL from standard input")]
    StdinReadError {
        #[source]
        source: std::io::Error,
    },

    #[error("No SQL files matched input: {input}")]
    InputNotFound { input: String },

    #[error("Invalid glob pattern: {pattern}")]
    InvalidGlobPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("Failed to walk directory: {path}")]
    DirectoryWalkError {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("SQLCMD include file not found: {path} (referenced from {source_file})")]
    SqlcmdIncludeNotFound { path: PathBuf, source_file: PathBuf },

    #[error("Circular SQLCMD include detected: {path} (include chain: {chain})")]
    SqlcmdCircularInclude { path: PathBuf, chain: String },
}
