//! Shared text helpers for the scanner.
//!
//! Every character that carries syntactic meaning in a T-SQL script is ASCII,
//! so the scanner walks bytes. Non-ASCII characters are decoded only where
//! they matter: Unicode whitespace (and the byte order mark) separates words,
//! everything else is treated as an identifier character. Words and whitespace
//! runs are always consumed whole, so every offset we hand out is a `char`
//! boundary.

/// Whether `b` can appear inside an unquoted identifier or keyword.
#[inline]
pub fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'_' | b'@' | b'#' | b'$') || b >= 0x80
}

/// Whitespace as SQL Server sees it: anything Unicode calls whitespace, plus U+FEFF.
#[inline]
pub fn is_sql_whitespace(c: char) -> bool {
    c.is_whitespace() || c == '\u{FEFF}'
}

#[inline]
fn is_word_char(c: char) -> bool {
    if c.is_ascii() {
        is_word_byte(c as u8)
    } else {
        !is_sql_whitespace(c)
    }
}

#[inline]
fn char_at(text: &str, pos: usize) -> Option<char> {
    text.get(pos..).and_then(|rest| rest.chars().next())
}

/// Byte length of the whitespace character at `pos`, or 0 if there is none.
#[inline]
pub fn whitespace_len(text: &str, pos: usize) -> usize {
    match text.as_bytes().get(pos) {
        Some(b) if b.is_ascii() => usize::from(is_sql_whitespace(*b as char)),
        Some(_) => char_at(text, pos)
            .filter(|&c| is_sql_whitespace(c))
            .map_or(0, char::len_utf8),
        None => 0,
    }
}

/// Byte offset one past the end of the word starting at `start`.
#[inline]
pub fn word_end(text: &str, start: usize) -> usize {
    let Some(rest) = text.get(start..) else {
        return start;
    };
    let bytes = rest.as_bytes();
    let mut end = 0;
    while end < bytes.len() {
        let b = bytes[end];
        if b.is_ascii() {
            if !is_word_byte(b) {
                break;
            }
            end += 1;
        } else {
            match rest[end..].chars().next() {
                Some(c) if is_word_char(c) => end += c.len_utf8(),
                _ => break,
            }
        }
    }
    start + end
}

/// Whether the word at `start` stands on its own (not glued to a previous word).
#[inline]
pub fn is_word_start(text: &str, start: usize) -> bool {
    char_at(text, start).is_some_and(is_word_char)
        && !text[..start].chars().next_back().is_some_and(is_word_char)
}

/// First `char` boundary after `pos`.
#[inline]
pub fn next_char_boundary(text: &str, pos: usize) -> usize {
    let mut next = pos + 1;
    while next < text.len() && !text.is_char_boundary(next) {
        next += 1;
    }
    next.min(text.len())
}

/// Case-insensitive keyword comparison without allocating.
#[inline]
pub fn eq_ci(word: &str, keyword: &str) -> bool {
    word.len() == keyword.len() && word.as_bytes().eq_ignore_ascii_case(keyword.as_bytes())
}

/// Trim trailing whitespace, matching the scanner's notion of whitespace.
#[inline]
pub fn trim_end_whitespace(s: &str) -> &str {
    s.trim_end_matches(is_sql_whitespace)
}
