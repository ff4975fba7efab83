//! Bounded, non-consuming lookahead.
//!
//! The main scan is a pure forward pass. The only places that need to peek
//! ahead are `WITH` (CTE header versus table hint), `BEGIN` (block versus
//! `BEGIN TRAN`) and `IF` (control flow versus `DROP ... IF EXISTS`).
//! Peeking works on a private cursor and never moves the scanner's own
//! offset.

use crate::util::{eq_ci, whitespace_len, word_end};

/// Maximum number of bytes a single lookahead may inspect.
pub const LOOKAHEAD_LIMIT: usize = 4096;

/// What a `WITH` keyword introduces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WithClause {
    /// `WITH (NOLOCK)`: ordinary statement text.
    TableHint,
    /// `WITH name [(cols)] AS (` or `WITH XMLNAMESPACES (...)`: a header
    /// that the following statement consumes.
    CommonTableExpression,
    /// Anything else (`WITH CHECK OPTION`, `WITH RECOMPILE`, ...).
    Other,
}

/// A throwaway cursor over the input.
struct Lookahead<'a> {
    text: &'a str,
    bytes: &'a [u8],
    origin: usize,
    pos: usize,
}

impl<'a> Lookahead<'a> {
    fn new(text: &'a str, pos: usize) -> Self {
        Self {
            text,
            bytes: text.as_bytes(),
            origin: pos,
            pos,
        }
    }

    fn exhausted(&self) -> bool {
        self.pos >= self.bytes.len() || self.pos - self.origin > LOOKAHEAD_LIMIT
    }

    /// Skip whitespace and comments.
    fn skip_trivia(&mut self) {
        while !self.exhausted() {
            let b = self.bytes[self.pos];
            let next = self.bytes.get(self.pos + 1).copied();
            let whitespace = whitespace_len(self.text, self.pos);
            if whitespace > 0 {
                self.pos += whitespace;
            } else if b == b'-' && next == Some(b'-') {
                while !self.exhausted() && self.bytes[self.pos] != b'\n' {
                    self.pos += 1;
                }
            } else if b == b'/' && next == Some(b'*') {
                self.pos += 2;
                while !self.exhausted()
                    && !(self.bytes[self.pos] == b'*' && self.bytes.get(self.pos + 1) == Some(&b'/'))
                {
                    self.pos += 1;
                }
                self.pos += 2;
            } else {
                break;
            }
        }
    }

    /// Next significant byte, without consuming it.
    fn peek(&mut self) -> Option<u8> {
        self.skip_trivia();
        if self.exhausted() {
            None
        } else {
            Some(self.bytes[self.pos])
        }
    }

    /// Consume the next unquoted word.
    fn word(&mut self) -> Option<&'a str> {
        self.skip_trivia();
        if self.exhausted() {
            return None;
        }
        let start = self.pos;
        let end = word_end(self.text, start);
        if end == start {
            return None;
        }
        self.pos = end;
        Some(&self.text[start..end])
    }

    /// Consume an identifier: a word, `[bracketed]` or `"quoted"`.
    fn identifier(&mut self) -> bool {
        match self.peek() {
            Some(b'[') => self.delimited(b']'),
            Some(b'"') => self.delimited(b'"'),
            Some(_) => self.word().is_some(),
            None => false,
        }
    }

    /// Consume an opening delimiter up to its closing byte (doubled closer escapes).
    fn delimited(&mut self, close: u8) -> bool {
        self.pos += 1;
        while !self.exhausted() {
            if self.bytes[self.pos] == close {
                if self.bytes.get(self.pos + 1) == Some(&close) {
                    self.pos += 2;
                    continue;
                }
                self.pos += 1;
                return true;
            }
            self.pos += 1;
        }
        false
    }

    /// Consume a balanced `( ... )` group, such as a CTE column list.
    fn parenthesized(&mut self) -> bool {
        let mut depth = 0usize;
        while !self.exhausted() {
            match self.bytes[self.pos] {
                b'(' => {
                    depth += 1;
                    self.pos += 1;
                }
                b')' => {
                    depth = depth.saturating_sub(1);
                    self.pos += 1;
                    if depth == 0 {
                        return true;
                    }
                }
                b'\'' => {
                    if !self.delimited(b'\'') {
                        return false;
                    }
                }
                b'[' => {
                    if !self.delimited(b']') {
                        return false;
                    }
                }
                b'"' => {
                    if !self.delimited(b'"') {
                        return false;
                    }
                }
                _ => self.pos += 1,
            }
        }
        false
    }
}

/// Decide what the `WITH` ending at byte `after_with` introduces.
pub fn classify_with(text: &str, after_with: usize) -> WithClause {
    let mut la = Lookahead::new(text, after_with);

    match la.peek() {
        Some(b'(') => return WithClause::TableHint,
        None => return WithClause::Other,
        Some(_) => {}
    }

    let name_start = la.pos;
    if la.word().is_some_and(|w| eq_ci(w, "XMLNAMESPACES")) && la.peek() == Some(b'(') {
        return if la.parenthesized() {
            WithClause::CommonTableExpression
        } else {
            WithClause::Other
        };
    }
    la.pos = name_start;

    if !la.identifier() {
        return WithClause::Other;
    }
    if la.peek() == Some(b'(') && !la.parenthesized() {
        return WithClause::Other;
    }
    if !la.word().is_some_and(|w| eq_ci(w, "AS")) {
        return WithClause::Other;
    }
    if la.peek() == Some(b'(') {
        WithClause::CommonTableExpression
    } else {
        WithClause::Other
    }
}

/// Whether the `IF` ending at `after_if` is the `IF EXISTS name` clause of a
/// DDL statement rather than the `IF EXISTS (subquery)` control flow form.
pub fn is_exists_clause(text: &str, after_if: usize) -> bool {
    let mut la = Lookahead::new(text, after_if);
    la.word().is_some_and(|w| eq_ci(w, "EXISTS")) && !matches!(la.peek(), Some(b'(') | None)
}

/// The next significant word starting at `pos`, if the next token is a word.
pub fn next_word(text: &str, pos: usize) -> Option<&str> {
    Lookahead::new(text, pos).word()
}
