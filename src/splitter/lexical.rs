//! Lexical context tracking: strings, bracketed identifiers and comments.

/// Lexical mode at a scan position. Exactly one holds at any offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LexicalMode {
    #[default]
    Normal,
    InSingleQuote,
    InDoubleQuote,
    /// `[identifier]`, with `]]` as an escaped bracket
    InBracket,
    /// `-- ...` up to and including the next newline
    InLineComment,
    /// `/* ... */`, not nested
    InBlockComment,
}

/// What the tracker made of the bytes at the current offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lexeme {
    /// A byte of ordinary code in Normal mode; the caller examines and consumes it.
    Code,
    /// `n` bytes belonging to a string literal or bracketed identifier.
    Literal(usize),
    /// `n` bytes belonging to a comment.
    Trivia(usize),
}

/// Tracks the lexical mode across a single forward pass.
///
/// Unterminated strings and comments are not errors: the mode simply
/// persists to the end of the input.
#[derive(Debug, Default)]
pub struct LexicalTracker {
    mode: LexicalMode,
}

impl LexicalTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> LexicalMode {
        self.mode
    }

    /// Classify the byte at `i`, updating the mode. Never consumes past the input.
    pub fn step(&mut self, bytes: &[u8], i: usize) -> Lexeme {
        let b = bytes[i];
        let next = bytes.get(i + 1).copied();

        match self.mode {
            LexicalMode::Normal => match (b, next) {
                (b'\'', _) => self.enter(LexicalMode::InSingleQuote, Lexeme::Literal(1)),
                (b'"', _) => self.enter(LexicalMode::InDoubleQuote, Lexeme::Literal(1)),
                (b'[', _) => self.enter(LexicalMode::InBracket, Lexeme::Literal(1)),
                (b'-', Some(b'-')) => self.enter(LexicalMode::InLineComment, Lexeme::Trivia(2)),
                (b'/', Some(b'*')) => self.enter(LexicalMode::InBlockComment, Lexeme::Trivia(2)),
                _ => Lexeme::Code,
            },
            LexicalMode::InSingleQuote => self.quoted(b'\'', b, next),
            LexicalMode::InDoubleQuote => self.quoted(b'"', b, next),
            LexicalMode::InBracket => match (b, next) {
                (b']', Some(b']')) => Lexeme::Literal(2),
                (b']', _) => self.enter(LexicalMode::Normal, Lexeme::Literal(1)),
                _ => Lexeme::Literal(1),
            },
            LexicalMode::InLineComment => {
                if b == b'\n' {
                    self.mode = LexicalMode::Normal;
                }
                Lexeme::Trivia(1)
            }
            LexicalMode::InBlockComment => match (b, next) {
                (b'*', Some(b'/')) => self.enter(LexicalMode::Normal, Lexeme::Trivia(2)),
                _ => Lexeme::Trivia(1),
            },
        }
    }

    fn enter(&mut self, mode: LexicalMode, lexeme: Lexeme) -> Lexeme {
        self.mode = mode;
        lexeme
    }

    fn quoted(&mut self, quote: u8, b: u8, next: Option<u8>) -> Lexeme {
        if next == Some(quote) && (b == b'\\' || b == quote) {
            // \' or '' inside a '...' literal
            return Lexeme::Literal(2);
        }
        if b == quote {
            self.mode = LexicalMode::Normal;
        }
        Lexeme::Literal(1)
    }
}
