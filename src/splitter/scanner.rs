//! Single-pass statement boundary scanner.
//!
//! The scanner walks the input once, left to right. At every offset the
//! lexical tracker is consulted first; only bytes of ordinary code reach the
//! structural tracker and the boundary decider below. Keywords are recognized
//! as whole words at parenthesis depth zero and classified through the
//! configured [`KeywordSet`].
//!
//! ## Boundary rules
//!
//! - `;` closes the pending statement (and is part of its text).
//! - SELECT/INSERT/UPDATE/DELETE/MERGE start a new statement when the pending
//!   one already has content, unless they continue it (`UNION ALL SELECT`,
//!   `INSERT ... SELECT`, the statement consuming a CTE).
//! - `WITH name AS (` and `WITH XMLNAMESPACES (` open a header-led statement;
//!   `WITH (` is a table hint.
//! - BEGIN/END/IF/ELSE/WHILE/TRY/CATCH close any pending statement and never
//!   appear in output. IF/WHILE conditions are skipped. `IF EXISTS name`
//!   inside a statement (`DROP TABLE IF EXISTS t`) is ordinary text.
//! - DECLARE/SET/PRINT/USE/CREATE/TRUNCATE/EXEC/EXECUTE and GO are skipped
//!   with their whole clause when they start a statement; later in a
//!   statement they are ordinary text.
//! - COMMIT/ROLLBACK/RETURN/THROW/DROP/ALTER/GRANT/... end a skipped clause
//!   and start a statement of their own, but never split pending content.

use tracing::{debug, trace};

use super::keywords::{KeywordClass, KeywordSet};
use super::lexical::{Lexeme, LexicalMode, LexicalTracker};
use super::lookahead::{self, WithClause};
use super::segment::{self, StatementSpan};
use super::structure::DepthTracker;
use crate::util::{eq_ci, is_word_start, next_char_boundary, whitespace_len, word_end};

/// Per-call scanner state. Nothing here outlives one split.
pub struct Scanner<'a, 'k> {
    text: &'a str,
    bytes: &'a [u8],
    keywords: &'k KeywordSet,
    lexer: LexicalTracker,
    depth: DepthTracker,
    /// Offset of the pending segment's first content byte (or where it may start)
    segment_start: usize,
    /// The pending segment holds real statement content
    has_content: bool,
    /// Inside a skipped clause (DECLARE ..., IF condition, GO, ...)
    skipping: bool,
    /// A CTE header was seen and its consuming statement has not started yet
    cte_pending: bool,
    /// Verb that would feed the pending statement (`SELECT` after `INSERT`)
    awaiting_source: Option<&'k str>,
    /// The last significant token was UNION, ALL, THEN, ...
    after_continuation: bool,
    /// Between GRANT/REVOKE/DENY and the ON/TO/FROM closing its privileges
    in_privilege_list: bool,
    spans: Vec<StatementSpan<'a>>,
}

impl<'a, 'k> Scanner<'a, 'k> {
    pub fn new(text: &'a str, keywords: &'k KeywordSet) -> Self {
        Self {
            text,
            bytes: text.as_bytes(),
            keywords,
            lexer: LexicalTracker::new(),
            depth: DepthTracker::new(),
            segment_start: 0,
            has_content: false,
            skipping: false,
            cte_pending: false,
            awaiting_source: None,
            after_continuation: false,
            in_privilege_list: false,
            spans: Vec::new(),
        }
    }

    /// Scan the whole input and return the statement spans in order.
    pub fn run(mut self) -> Vec<StatementSpan<'a>> {
        let mut i = 0;
        while i < self.bytes.len() {
            i = match self.lexer.step(self.bytes, i) {
                Lexeme::Trivia(n) => i + n,
                Lexeme::Literal(n) => {
                    self.content(i);
                    i + n
                }
                Lexeme::Code => self.code(i),
            };
        }
        if self.lexer.mode() != LexicalMode::Normal {
            debug!(mode = ?self.lexer.mode(), "input ends inside a literal or comment");
        }
        self.flush(self.bytes.len());
        debug!(
            statements = self.spans.len(),
            bytes = self.bytes.len(),
            open_parens = self.depth.paren_depth(),
            open_blocks = self.depth.block_depth(),
            "split complete"
        );
        self.spans
    }

    // ========================================================================
    // Structural handling of ordinary code
    // ========================================================================

    /// Handle the code byte at `i`; returns the offset to continue from.
    fn code(&mut self, i: usize) -> usize {
        let whitespace = whitespace_len(self.text, i);
        if whitespace > 0 {
            return i + whitespace;
        }
        if is_word_start(self.text, i) {
            let end = word_end(self.text, i);
            self.word(i, end);
            return end;
        }
        match self.bytes[i] {
            b'(' => {
                self.depth.open_paren();
                self.content(i);
            }
            b')' => {
                self.depth.close_paren();
                self.content(i);
            }
            b';' if self.depth.at_top_level() => self.semicolon(i),
            _ => self.content(i),
        }
        next_char_boundary(self.text, i)
    }

    /// Record real statement content at `i`.
    fn content(&mut self, i: usize) {
        self.after_continuation = false;
        if self.skipping || self.has_content {
            return;
        }
        self.segment_start = i;
        self.has_content = true;
    }

    // ========================================================================
    // Boundary decider
    // ========================================================================

    fn word(&mut self, start: usize, end: usize) {
        let text = self.text;
        let word = &text[start..end];
        let qualified = start > 0 && self.bytes[start - 1] == b'.';
        if !self.depth.at_top_level() || qualified {
            self.content(start);
            return;
        }

        match self.keywords.classify(word) {
            None => {
                if self.keywords.is_row_constructor(word) {
                    self.awaiting_source = None;
                }
                if self.in_privilege_list && self.keywords.ends_privilege_list(word) {
                    self.in_privilege_list = false;
                }
                self.content(start);
            }
            Some(KeywordClass::Transaction) => self.content(start),
            Some(KeywordClass::Standalone) if self.skipping || !self.has_content => {
                self.begin_statement(start, word)
            }
            Some(KeywordClass::Standalone) => self.content(start),
            Some(KeywordClass::CaseOpen) => {
                self.depth.open_case();
                self.content(start);
            }
            Some(KeywordClass::BlockClose) if self.depth.in_case() => {
                self.depth.close_case();
                self.content(start);
            }
            Some(KeywordClass::Control) if self.depth.in_case() => self.content(start),
            Some(KeywordClass::Continuation) => {
                self.content(start);
                self.after_continuation = true;
            }
            Some(KeywordClass::Boundary) => self.boundary_keyword(start, word),
            Some(KeywordClass::Cte) => self.with_keyword(start, end),
            Some(KeywordClass::Skip) | Some(KeywordClass::BatchSeparator) => {
                self.skip_keyword(start, word)
            }
            Some(KeywordClass::BlockOpen) => {
                let transaction = lookahead::next_word(self.text, end)
                    .is_some_and(|next| self.keywords.is_transaction_word(next));
                if transaction {
                    // BEGIN TRAN is a statement, not a block
                    self.content(start);
                } else {
                    self.depth.open_block();
                    self.control_keyword(start, end, false);
                }
            }
            Some(KeywordClass::BlockClose) => {
                self.depth.close_block();
                self.control_keyword(start, end, false);
            }
            Some(KeywordClass::Conditional)
                if self.has_content && lookahead::is_exists_clause(self.text, end) =>
            {
                // DROP TABLE IF EXISTS t
                self.content(start)
            }
            Some(KeywordClass::Conditional) => self.control_keyword(start, end, true),
            Some(KeywordClass::Control) => self.control_keyword(start, end, false),
        }
    }

    fn semicolon(&mut self, i: usize) {
        if self.has_content {
            self.flush(i + 1);
        } else {
            if self.skipping {
                trace!(offset = i, "skipped clause ends at semicolon");
            }
            self.reset(i + 1);
        }
    }

    fn boundary_keyword(&mut self, start: usize, word: &str) {
        if self.skipping || !self.has_content {
            self.begin_statement(start, word);
            return;
        }
        if self.in_privilege_list {
            // GRANT SELECT, INSERT ON ...
            self.content(start);
            return;
        }
        let keywords = self.keywords;
        if self.cte_pending {
            // The statement a CTE header feeds belongs to the same span
            self.cte_pending = false;
            self.awaiting_source = keywords.source_for(word);
            return;
        }
        if self.after_continuation {
            self.after_continuation = false;
            return;
        }
        if let Some(source) = self.awaiting_source {
            if eq_ci(word, source) {
                self.awaiting_source = None;
                return;
            }
        }
        self.flush(start);
        self.begin_statement(start, word);
    }

    fn with_keyword(&mut self, start: usize, end: usize) {
        match lookahead::classify_with(self.text, end) {
            WithClause::TableHint | WithClause::Other => self.content(start),
            WithClause::CommonTableExpression => {
                if self.has_content {
                    self.flush(start);
                }
                self.skipping = false;
                self.segment_start = start;
                self.has_content = true;
                self.cte_pending = true;
                self.awaiting_source = None;
                self.after_continuation = false;
                self.in_privilege_list = false;
            }
        }
    }

    fn skip_keyword(&mut self, start: usize, word: &str) {
        if self.has_content {
            // UPDATE t SET ..., trailing GO, ...
            self.content(start);
            return;
        }
        trace!(offset = start, keyword = word, "skipping clause");
        self.skipping = true;
    }

    /// BEGIN/END/IF/ELSE/WHILE/TRY/CATCH never appear in statement text.
    fn control_keyword(&mut self, start: usize, end: usize, conditional: bool) {
        if self.has_content {
            self.flush(start);
        }
        self.reset(end);
        self.skipping = conditional;
    }

    fn begin_statement(&mut self, start: usize, word: &str) {
        let keywords = self.keywords;
        self.skipping = false;
        self.segment_start = start;
        self.has_content = true;
        self.cte_pending = false;
        self.awaiting_source = keywords.source_for(word);
        self.after_continuation = false;
        self.in_privilege_list = keywords.is_privilege_statement(word);
    }

    // ========================================================================
    // Segment extraction
    // ========================================================================

    /// Emit the pending segment ending at `end`, then start a new one there.
    fn flush(&mut self, end: usize) {
        if self.has_content {
            match segment::extract(self.text, self.segment_start, end) {
                Some(span) => {
                    debug!(
                        start = span.start_position,
                        end = span.end_position,
                        "statement boundary"
                    );
                    self.spans.push(span);
                }
                None => trace!(start = self.segment_start, end, "discarded empty segment"),
            }
        }
        self.reset(end);
    }

    fn reset(&mut self, at: usize) {
        self.segment_start = at;
        self.has_content = false;
        self.skipping = false;
        self.cte_pending = false;
        self.awaiting_source = None;
        self.after_continuation = false;
        self.in_privilege_list = false;
        self.depth.reset_case();
    }
}
