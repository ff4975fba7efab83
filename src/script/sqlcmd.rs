//! SQLCMD directive processing
//!
//! Deployment scripts written for `sqlcmd` use `:r` to include other files
//! and `:setvar` to define `$(name)` variables. Expanding them before the
//! split lets the scanner see the statements that would actually run.
//! Any other directive line (`:on error exit`, `:connect`, ...) is commented
//! out so it never becomes statement text.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::debug;

use super::read_sql_file;
use crate::error::SqlSplitError;

static SETVAR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^[ \t]*:setvar[ \t]+(\w+)[ \t]+"?([^"\r\n]*)"?[ \t]*\r?$"#)
        .expect("valid setvar regex")
});

// Matches: :r path\to\file.sql or :r "path with spaces\file.sql"
static INCLUDE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^[ \t]*:r[ \t]+(?:"([^"\r\n]+)"|(\S+))[ \t]*\r?$"#)
        .expect("valid include regex")
});

static DIRECTIVE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*:[A-Za-z]\w*\b.*$").expect("valid directive regex"));

static VARIABLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\((\w+)\)").expect("valid variable regex"));

/// Expand all `:r` include directives in `content`.
///
/// Relative include paths are resolved from the directory of `source_file`.
/// `:setvar` definitions are collected first and substituted into include
/// paths and statement text; unknown `$(name)` references are left alone.
///
/// # Errors
/// - [`SqlSplitError::SqlcmdIncludeNotFound`] when an included file is missing
/// - [`SqlSplitError::SqlcmdCircularInclude`] when a file includes itself
pub fn expand_includes(content: &str, source_file: &Path) -> Result<String, SqlSplitError> {
    let mut visited = HashSet::new();
    visited.insert(
        source_file
            .canonicalize()
            .unwrap_or_else(|_| source_file.to_path_buf()),
    );
    let mut variables = HashMap::new();
    expand_recursive(content, source_file, &mut visited, &mut variables)
}

fn expand_recursive(
    content: &str,
    source_file: &Path,
    visited: &mut HashSet<PathBuf>,
    variables: &mut HashMap<String, String>,
) -> Result<String, SqlSplitError> {
    for caps in SETVAR_RE.captures_iter(content) {
        variables.insert(caps[1].to_string(), caps[2].trim().to_string());
    }

    let source_dir = source_file.parent().unwrap_or(Path::new("."));
    let mut result = String::with_capacity(content.len());
    let mut last_end = 0;

    for caps in INCLUDE_RE.captures_iter(content) {
        let Some(whole) = caps.get(0) else { continue };
        result.push_str(&comment_out_directives(
            &substitute(&content[last_end..whole.start()], variables),
        ));

        let raw_path = caps
            .get(1)
            .or_else(|| caps.get(2))
            .map(|m| m.as_str())
            .unwrap_or_default();
        // Windows paths use backslash
        let include_str = substitute(raw_path, variables).replace('\\', "/");
        let include_path = Path::new(&include_str);
        let resolved = if include_path.is_absolute() {
            include_path.to_path_buf()
        } else {
            source_dir.join(include_path)
        };

        let canonical = resolved
            .canonicalize()
            .map_err(|_| SqlSplitError::SqlcmdIncludeNotFound {
                path: resolved.clone(),
                source_file: source_file.to_path_buf(),
            })?;

        if visited.contains(&canonical) {
            let chain = visited
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(" -> ");
            return Err(SqlSplitError::SqlcmdCircularInclude {
                path: canonical,
                chain,
            });
        }

        let included = read_sql_file(&canonical).map_err(|_| SqlSplitError::SqlcmdIncludeNotFound {
            path: resolved.clone(),
            source_file: source_file.to_path_buf(),
        })?;
        debug!(include = %canonical.display(), from = %source_file.display(), "expanding :r");

        visited.insert(canonical.clone());
        let expanded = expand_recursive(&included, &canonical, visited, variables)?;
        // The same file may appear again in a different branch
        visited.remove(&canonical);

        result.push_str(&format!("-- :r {}\n", include_str));
        result.push_str(&expanded);
        if !expanded.ends_with('\n') {
            result.push('\n');
        }

        last_end = whole.end();
    }

    result.push_str(&comment_out_directives(&substitute(
        &content[last_end..],
        variables,
    )));
    Ok(result)
}

/// Replace `$(name)` with its `:setvar` value where one is defined.
fn substitute(text: &str, variables: &HashMap<String, String>) -> String {
    VARIABLE_RE
        .replace_all(text, |caps: &Captures| {
            variables
                .get(&caps[1])
                .cloned()
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

fn comment_out_directives(text: &str) -> String {
    DIRECTIVE_RE.replace_all(text, "-- $0").into_owned()
}
