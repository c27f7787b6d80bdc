//! Parse-time cursor over the significant tokens of one SQL string.
//!
//! `State` pulls tokens from the `Lexer` on demand, drops whitespace and comments,
//! and keeps every significant token it has seen in a buffer. Positions in that
//! buffer are what a `Snapshot` records, so rewinding is an index reset and nested
//! lookahead scopes compose for free.

use crate::sql::{
    token::Token,
    token_kind::{LiteralClass, NameClass, TokenKind},
    tokenizer::Lexer,
};

/// Saved cursor position, produced by `State::snapshot`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot(usize);

#[derive(Debug)]
pub struct State<'a> {
    lexer: Lexer<'a>,
    tokens: Vec<Token<'a>>,
    index: usize,
    source_len: usize,
}

impl<'a> State<'a> {
    pub fn new(sql: &'a str) -> Self {
        let mut state = Self {
            lexer: Lexer::new(sql),
            tokens: Vec::new(),
            index: 0,
            source_len: sql.len(),
        };
        state.fill();
        state
    }

    /// Buffer tokens until the current index is available or input runs out.
    fn fill(&mut self) {
        while self.tokens.len() <= self.index {
            match self.lexer.by_ref().find(|t| !t.kind.is_trivia()) {
                Some(token) => self.tokens.push(token),
                None => break,
            }
        }
    }

    pub fn source(&self) -> &'a str {
        self.lexer.source()
    }

    pub fn current(&self) -> Option<Token<'a>> {
        self.tokens.get(self.index).copied()
    }

    pub fn kind(&self) -> Option<TokenKind> {
        self.current().map(|t| t.kind)
    }

    /// Raw text of the current token, empty at end of input.
    pub fn value(&self) -> &'a str {
        self.current().map_or("", |t| t.text)
    }

    pub fn lower(&self) -> String {
        self.value().to_ascii_lowercase()
    }

    /// Byte offset of the current token, or the input length at end of input.
    pub fn pos(&self) -> usize {
        self.current().map_or(self.source_len, |t| t.start)
    }

    pub fn is_eof(&self) -> bool {
        self.current().is_none()
    }

    /// Consume the current token and return it.
    pub fn next(&mut self) -> Option<Token<'a>> {
        let token = self.current()?;
        self.index += 1;
        self.fill();
        Some(token)
    }

    /// The most recently consumed token.
    pub fn previous(&self) -> Option<Token<'a>> {
        self.index.checked_sub(1).and_then(|i| self.tokens.get(i).copied())
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot(self.index)
    }

    pub fn restore(&mut self, snapshot: Snapshot) {
        self.index = snapshot.0;
        self.fill();
    }

    /// Run `f` against this state and rewind afterwards, whatever `f` consumed.
    pub fn lookahead<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let snapshot = self.snapshot();
        let result = f(self);
        self.restore(snapshot);
        result
    }

    /// The token after the current one, without consuming anything.
    pub fn peek(&mut self) -> Option<Token<'a>> {
        self.lookahead(|s| {
            s.next();
            s.current()
        })
    }

    fn matches(&self, values: &[&str]) -> bool {
        values.is_empty() || self.current().is_some_and(|t| t.is_any(values))
    }

    /// Current token has exactly `kind` and, if `values` is not empty, one of those values.
    pub fn is(&self, kind: TokenKind, values: &[&str]) -> bool {
        self.kind() == Some(kind) && self.matches(values)
    }

    /// Bare word (keyword, name, word operator, constant) matching one of `values`.
    pub fn is_word(&self, values: &[&str]) -> bool {
        self.kind().is_some_and(TokenKind::is_word) && self.matches(values)
    }

    pub fn is_reserved(&self, values: &[&str]) -> bool {
        self.kind().is_some_and(TokenKind::is_reserved) && self.matches(values)
    }

    pub fn is_keyword(&self, values: &[&str]) -> bool {
        self.kind().is_some_and(TokenKind::is_keyword) && self.matches(values)
    }

    pub fn is_operator(&self, values: &[&str]) -> bool {
        self.kind().is_some_and(TokenKind::is_operator) && self.matches(values)
    }

    pub fn is_literal(&self) -> bool {
        self.kind().is_some_and(TokenKind::is_literal)
    }

    pub fn is_variable(&self) -> bool {
        self.kind().is_some_and(TokenKind::is_variable)
    }

    pub fn is_placeholder(&self) -> bool {
        self.kind() == Some(TokenKind::Name(NameClass::Placeholder))
    }

    /// Something that may be used as a plain name here.
    pub fn is_identifier(&self) -> bool {
        self.kind().is_some_and(TokenKind::is_identifier)
    }

    fn is_punctuation(&self, value: &str) -> bool {
        self.is(TokenKind::Punctuation, &[value])
    }

    pub fn is_open_paren(&self) -> bool {
        self.is_punctuation("(")
    }

    pub fn is_close_paren(&self) -> bool {
        self.is_punctuation(")")
    }

    pub fn is_comma(&self) -> bool {
        self.is_punctuation(",")
    }

    pub fn is_semicolon(&self) -> bool {
        self.is_punctuation(";")
    }

    pub fn is_dot(&self) -> bool {
        self.is_punctuation(".")
    }

    /// Current token starts exactly where the previous one ended.
    pub fn is_adjacent(&self) -> bool {
        match (self.previous(), self.current()) {
            (Some(prev), Some(cur)) => prev.end() == cur.start,
            _ => false,
        }
    }

    /// Consume the current token if it is a word, operator or punctuation with one
    /// of `values`. Strings, quoted names and variables never match.
    pub fn accept(&mut self, values: &[&str]) -> Option<Token<'a>> {
        let token = self.current()?;
        let plain = !matches!(
            token.kind,
            TokenKind::Literal(LiteralClass::String)
                | TokenKind::Name(NameClass::Quoted | NameClass::Variable)
        );
        (plain && token.is_any(values)).then(|| {
            self.next();
            token
        })
    }

    /// Consume `words` in order, or nothing at all. Returns the first token on success.
    pub fn accept_seq(&mut self, words: &[&str]) -> Option<Token<'a>> {
        let snapshot = self.snapshot();
        let first = self.current()?;
        for word in words {
            if self.accept(&[word]).is_none() {
                self.restore(snapshot);
                return None;
            }
        }
        Some(first)
    }

    /// Skip tokens up to, not including, the next `;`. Returns how many were skipped.
    pub fn skip_statement(&mut self) -> usize {
        let mut skipped = 0;
        while !self.is_eof() && !self.is_semicolon() {
            self.next();
            skipped += 1;
        }
        skipped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::token_kind::KeywordClass;

    #[test]
    fn skips_trivia_on_every_advance() {
        let mut state = State::new("  SELECT /* c */ a -- x\n , b");
        let mut seen = Vec::new();
        while let Some(token) = state.next() {
            seen.push(token.text);
        }
        assert_eq!(seen, vec!["SELECT", "a", ",", "b"]);
        assert!(state.is_eof());
        assert_eq!(state.value(), "");
    }

    #[test]
    fn pos_at_end_is_input_length() {
        let sql = "SELECT ";
        let mut state = State::new(sql);
        assert_eq!(state.pos(), 0);
        state.next();
        assert_eq!(state.pos(), sql.len());
    }

    #[test]
    fn lookahead_rewinds() {
        let mut state = State::new("ROW (1, 2)");
        let is_row_ctor = state.lookahead(|s| {
            s.next();
            s.is_open_paren()
        });
        assert!(is_row_ctor);
        assert_eq!(state.value(), "ROW");
    }

    #[test]
    fn nested_lookahead_composes() {
        let mut state = State::new("a b c d");
        state.next();
        let (inner, after_inner) = state.lookahead(|s| {
            s.next();
            let inner = s.lookahead(|s| {
                s.next();
                s.value()
            });
            (inner, s.value())
        });
        assert_eq!(inner, "d");
        assert_eq!(after_inner, "c");
        let past_end = state.lookahead(|s| {
            s.next();
            s.next();
            s.next();
            s.value()
        });
        assert_eq!(past_end, "");
        assert_eq!(state.value(), "b");
    }

    #[test]
    fn accept_seq_is_all_or_nothing() {
        let mut state = State::new("ORDER GROUP BY");
        assert!(state.accept_seq(&["order", "by"]).is_none());
        assert_eq!(state.value(), "ORDER");
        assert!(state.accept(&["order"]).is_some());
        assert!(state.accept_seq(&["group", "by"]).is_some());
        assert!(state.is_eof());
    }

    #[test]
    fn accept_ignores_strings_and_quoted_names() {
        let mut state = State::new("'from' `from` from");
        assert!(state.accept(&["'from'"]).is_none());
        state.next();
        assert!(state.accept(&["`from`"]).is_none());
        state.next();
        assert!(state.accept(&["from"]).is_some());
    }

    #[test]
    fn predicates() {
        let mut state = State::new("select count ( x ) , ; . @v ? 'a'");
        assert!(state.is_reserved(&["SELECT"]));
        assert!(state.is_keyword(&[]));
        assert!(state.is(TokenKind::Keyword(KeywordClass::Reserved), &["select"]));
        state.next();
        assert!(state.is_identifier());
        assert!(!state.is_reserved(&[]));
        state.next();
        assert!(state.is_open_paren());
        state.next();
        state.next();
        assert!(state.is_close_paren());
        state.next();
        assert!(state.is_comma());
        state.next();
        assert!(state.is_semicolon());
        state.next();
        assert!(state.is_dot());
        state.next();
        assert!(state.is_variable());
        state.next();
        assert!(state.is_placeholder());
        state.next();
        assert!(state.is_literal());
    }

    #[test]
    fn adjacency_and_peek() {
        let mut state = State::new("count(x) max (y)");
        assert_eq!(state.peek().map(|t| t.text), Some("("));
        state.next();
        assert!(state.is_adjacent());
        state.skip_statement();
        let mut state = State::new("max (y)");
        state.next();
        assert!(!state.is_adjacent());
    }

    #[test]
    fn skip_statement_stops_at_semicolon() {
        let mut state = State::new("garbage here; SELECT");
        assert_eq!(state.skip_statement(), 2);
        assert!(state.is_semicolon());
    }
}
