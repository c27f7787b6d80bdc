//! Token model tying a `TokenKind` to its source text and offset.
//!
//! A `Token` borrows its text from the SQL string handed to the lexer, so tokens
//! are cheap to copy and never outlive the source. Offsets are byte offsets into
//! that source.
use crate::sql::token_kind::TokenKind;

/// A lexical token: classification, raw text and start offset.
///
/// Invariants:
/// - `text` is exactly `source[start..start + text.len()]`
/// - `text` is never empty
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub start: usize,
}

impl<'a> Token<'a> {
    pub const fn new(kind: TokenKind, text: &'a str, start: usize) -> Self {
        Self { kind, text, start }
    }

    /// Exclusive end offset.
    pub const fn end(&self) -> usize {
        self.start + self.text.len()
    }

    pub const fn len(&self) -> usize {
        self.text.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// True if `text` equals `value` ignoring ASCII case.
    pub fn is(&self, value: &str) -> bool {
        self.text.eq_ignore_ascii_case(value)
    }

    /// True if `text` equals any of `values` ignoring ASCII case.
    pub fn is_any(&self, values: &[&str]) -> bool {
        values.iter().any(|v| self.is(v))
    }

    pub fn lower(&self) -> String {
        self.text.to_ascii_lowercase()
    }

    /// Returns true if the byte offset lies within this token's span.
    ///
    /// NOTE: End is exclusive, so `offset == end` returns false.
    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset < self.end()
    }

    pub const fn span(&self) -> (usize, usize) {
        (self.start, self.end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::token_kind::{KeywordClass, NameClass};

    #[test]
    fn span_and_length() {
        let t = Token::new(TokenKind::Name(NameClass::Other), "Users", 5);
        assert_eq!(t.len(), 5);
        assert_eq!(t.span(), (5, 10));
        assert!(t.contains(7));
        assert!(!t.contains(10)); // end exclusive
    }

    #[test]
    fn case_insensitive_value_checks() {
        let t = Token::new(TokenKind::Keyword(KeywordClass::Reserved), "SeLeCt", 0);
        assert!(t.is("select"));
        assert!(t.is_any(&["from", "SELECT"]));
        assert!(!t.is_any(&["from", "where"]));
        assert_eq!(t.lower(), "select");
    }
}
