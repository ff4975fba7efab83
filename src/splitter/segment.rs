//! Statement spans and the segment extractor/filter.

use std::ops::Range;

use serde::Serialize;

use super::lexical::{Lexeme, LexicalTracker};
use crate::util::{trim_end_whitespace, whitespace_len};

/// One individually executable statement.
///
/// Offsets are byte offsets into the scanned text, so
/// `&text[span.start_position..span.end_position] == span.query` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatementSpan<'a> {
    pub query: &'a str,
    pub start_position: usize,
    pub end_position: usize,
}

impl<'a> StatementSpan<'a> {
    /// Byte range of the statement in the scanned text.
    pub fn range(&self) -> Range<usize> {
        self.start_position..self.end_position
    }

    /// The same span expressed as 0-based character indices into `text`.
    pub fn char_range(&self, text: &str) -> Range<usize> {
        let start = text[..self.start_position].chars().count();
        start..start + self.query.chars().count()
    }

    /// 1-based line number of the statement's first character in `text`.
    pub fn start_line(&self, text: &str) -> usize {
        text.as_bytes()[..self.start_position]
            .iter()
            .filter(|&&b| b == b'\n')
            .count()
            + 1
    }
}

/// Materialize `text[start..end]` as a span, or `None` if it holds no statement.
///
/// Trailing whitespace is trimmed. Leading trivia is the caller's job: `start`
/// must already point at the first character of real content.
pub fn extract(text: &str, start: usize, end: usize) -> Option<StatementSpan<'_>> {
    let query = trim_end_whitespace(&text[start..end]);
    if !has_statement_text(query) {
        return None;
    }
    Some(StatementSpan {
        query,
        start_position: start,
        end_position: start + query.len(),
    })
}

/// Whether `segment` has anything besides whitespace, comments and semicolons.
pub fn has_statement_text(segment: &str) -> bool {
    let bytes = segment.as_bytes();
    let mut lexer = LexicalTracker::new();
    let mut i = 0;
    while i < bytes.len() {
        match lexer.step(bytes, i) {
            Lexeme::Literal(_) => return true,
            Lexeme::Trivia(n) => i += n,
            Lexeme::Code => {
                let whitespace = whitespace_len(segment, i);
                if whitespace > 0 {
                    i += whitespace;
                } else if bytes[i] == b';' {
                    i += 1;
                } else {
                    return true;
                }
            }
        }
    }
    false
}
