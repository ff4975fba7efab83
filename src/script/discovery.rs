//! Input discovery: files, directories and glob patterns.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::SqlSplitError;

fn is_sql_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("sql"))
}

/// Resolve command-line inputs to a sorted, de-duplicated list of SQL files.
///
/// - an existing file is taken as-is, whatever its extension
/// - a directory is walked recursively for `*.sql` files
/// - anything else is treated as a glob pattern
///
/// An input that resolves to nothing is an error, so typos are not silently
/// ignored.
pub fn collect_sql_files<P: AsRef<Path>>(inputs: &[P]) -> Result<Vec<PathBuf>, SqlSplitError> {
    let mut files = BTreeSet::new();

    for input in inputs {
        let input = input.as_ref();
        let mut matched = false;

        if input.is_file() {
            files.insert(input.to_path_buf());
            matched = true;
        } else if input.is_dir() {
            for entry in WalkDir::new(input).follow_links(true) {
                let entry = entry.map_err(|e| SqlSplitError::DirectoryWalkError {
                    path: input.to_path_buf(),
                    source: e,
                })?;
                if entry.file_type().is_file() && is_sql_file(entry.path()) {
                    files.insert(entry.into_path());
                    matched = true;
                }
            }
        } else {
            let pattern = input.to_string_lossy();
            let paths = glob::glob(&pattern).map_err(|e| SqlSplitError::InvalidGlobPattern {
                pattern: pattern.to_string(),
                source: e,
            })?;
            // Unreadable entries are skipped, like the shell would
            for path in paths.flatten().filter(|p| p.is_file()) {
                files.insert(path);
                matched = true;
            }
        }

        if !matched {
            return Err(SqlSplitError::InputNotFound {
                input: input.display().to_string(),
            });
        }
    }

    Ok(files.into_iter().collect())
}
