use crate::sql::{
    keyword::classify,
    token::Token,
    token_kind::{CommentStyle, LiteralClass, NameClass, OperatorClass, TokenKind},
};

/// Multi-character operators, longest first so the first match is the maximal munch.
const MULTI_CHAR_OPERATORS: &[&str] = &[
    "<=>", "->>", "<<", ">>", "<=", ">=", "<>", "!=", ":=", "||", "&&", "->",
];
const SINGLE_CHAR_OPERATORS: &[u8] = b"=<>!~^&|+-*/%:";

/// Lenient MySQL lexer producing a lazy stream of `Token`s.
///
/// Behavior:
/// - Every byte of the input ends up in exactly one token, except unknown
///   characters (`{`, `[`, `\` outside strings, ...) which are skipped.
/// - At each position the scanners are tried in a fixed order: whitespace,
///   comments, punctuation, numbers, dot, quoted text, variables, parameter
///   markers, operators, words.
/// - A scanner either consumes its whole match or leaves the position where it
///   found it. Malformed numbers (`10e`, `0b02`) are given back and re-read as
///   words; unterminated strings and comments run to end of input.
///
/// Guarantees:
/// - Never panics and never fails.
/// - Token boundaries always fall on UTF-8 character boundaries.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    source: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

/// Collect every token of `sql`, trivia included.
pub fn tokenize(sql: &str) -> Vec<Token<'_>> {
    Lexer::new(sql).collect()
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$' || b >= 0x80
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            bytes: source.as_bytes(),
            pos: 0,
        }
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn peek_at(&self, n: usize) -> Option<u8> {
        self.bytes.get(self.pos + n).copied()
    }

    fn starts_with(&self, s: &str) -> bool {
        self.bytes[self.pos..].starts_with(s.as_bytes())
    }

    fn eat_while(&mut self, predicate: impl Fn(u8) -> bool) -> usize {
        let start = self.pos;
        while self.peek().is_some_and(&predicate) {
            self.pos += 1;
        }
        self.pos - start
    }

    fn scan(&mut self) -> Option<TokenKind> {
        self.scan_whitespace()
            .or_else(|| self.scan_comment())
            .or_else(|| self.scan_punctuation())
            .or_else(|| self.scan_number())
            .or_else(|| self.scan_dot())
            .or_else(|| self.scan_quoted())
            .or_else(|| self.scan_variable())
            .or_else(|| self.scan_placeholder())
            .or_else(|| self.scan_operator())
            .or_else(|| self.scan_word())
    }

    fn scan_whitespace(&mut self) -> Option<TokenKind> {
        (self.eat_while(|b| b.is_ascii_whitespace()) > 0).then_some(TokenKind::Whitespace)
    }

    fn scan_comment(&mut self) -> Option<TokenKind> {
        if self.starts_with("/*") {
            self.pos = match self.source[self.pos + 2..].find("*/") {
                Some(offset) => self.pos + 2 + offset + 2,
                None => self.bytes.len(),
            };
            return Some(TokenKind::Comment(CommentStyle::Multiline));
        }
        // `--` only opens a comment when followed by whitespace, a control character
        // or end of input; `1--2` is a subtraction of a negation.
        let dash_comment = self.starts_with("--")
            && self
                .peek_at(2)
                .is_none_or(|b| b.is_ascii_whitespace() || b.is_ascii_control());
        if dash_comment || self.peek() == Some(b'#') {
            self.eat_while(|b| b != b'\n');
            return Some(TokenKind::Comment(CommentStyle::Single));
        }
        None
    }

    fn scan_punctuation(&mut self) -> Option<TokenKind> {
        match self.peek()? {
            b'(' | b')' | b',' | b';' => {
                self.pos += 1;
                Some(TokenKind::Punctuation)
            }
            _ => None,
        }
    }

    fn scan_dot(&mut self) -> Option<TokenKind> {
        (self.peek()? == b'.').then(|| {
            self.pos += 1;
            TokenKind::Punctuation
        })
    }

    fn scan_number(&mut self) -> Option<TokenKind> {
        self.scan_prefixed(b'x', |b| b.is_ascii_hexdigit(), LiteralClass::Hex)
            .or_else(|| self.scan_prefixed(b'b', |b| b == b'0' || b == b'1', LiteralClass::Bit))
            .or_else(|| self.scan_decimal())
    }

    /// Hex and bit literals, in both notations: `0x1f` / `X'1f'` and `0b01` / `B'01'`.
    fn scan_prefixed(
        &mut self,
        marker: u8,
        digit: impl Fn(u8) -> bool,
        class: LiteralClass,
    ) -> Option<TokenKind> {
        let start = self.pos;
        let first = self.peek()?;
        if first == b'0' && self.peek_at(1) == Some(marker) {
            self.pos += 2;
            let digits = self.eat_while(&digit);
            if digits > 0 && !self.peek().is_some_and(is_word_byte) {
                return Some(TokenKind::Literal(class));
            }
        } else if first.to_ascii_lowercase() == marker && self.peek_at(1) == Some(b'\'') {
            self.pos += 2;
            self.eat_while(&digit);
            if self.peek() == Some(b'\'') {
                self.pos += 1;
                return Some(TokenKind::Literal(class));
            }
        }
        self.pos = start;
        None
    }

    fn scan_decimal(&mut self) -> Option<TokenKind> {
        let start = self.pos;
        let int_digits = self.eat_while(|b| b.is_ascii_digit());
        let mut frac_digits = 0;
        if self.peek() == Some(b'.') {
            match self.peek_at(1) {
                Some(b) if b.is_ascii_digit() => {
                    self.pos += 1;
                    frac_digits = self.eat_while(|b| b.is_ascii_digit());
                }
                next if int_digits > 0 && !next.is_some_and(is_word_byte) => self.pos += 1,
                _ => {}
            }
        }
        if int_digits == 0 && frac_digits == 0 {
            self.pos = start;
            return None;
        }
        if matches!(self.peek(), Some(b'e' | b'E')) {
            let mark = self.pos;
            self.pos += 1;
            if matches!(self.peek(), Some(b'+' | b'-')) {
                self.pos += 1;
            }
            if self.eat_while(|b| b.is_ascii_digit()) == 0 {
                self.pos = mark;
            }
        }
        if self.peek().is_some_and(is_word_byte) {
            self.pos = start;
            return None;
        }
        Some(TokenKind::Literal(LiteralClass::Dec))
    }

    /// Consume a quoted body starting at the opening quote. Doubled quotes and
    /// (outside backticks) backslash escapes do not close the quote.
    fn eat_quoted(&mut self, quote: u8) {
        self.pos += 1;
        while let Some(b) = self.peek() {
            if b == b'\\' && quote != b'`' {
                self.pos = (self.pos + 2).min(self.bytes.len());
            } else if b == quote {
                self.pos += 1;
                if self.peek() != Some(quote) {
                    return;
                }
                self.pos += 1;
            } else {
                self.pos += 1;
            }
        }
    }

    fn scan_quoted(&mut self) -> Option<TokenKind> {
        let quote = self.peek()?;
        let kind = match quote {
            b'\'' | b'"' => TokenKind::Literal(LiteralClass::String),
            b'`' => TokenKind::Name(NameClass::Quoted),
            _ => return None,
        };
        self.eat_quoted(quote);
        Some(kind)
    }

    /// `@name`, `@'name'`, `@@name` and `@@scope.name`.
    fn scan_variable(&mut self) -> Option<TokenKind> {
        if self.peek()? != b'@' {
            return None;
        }
        self.pos += 1;
        match self.peek() {
            Some(b'@') => {
                self.pos += 1;
                self.eat_while(|b| is_word_byte(b) || b == b'.');
            }
            Some(quote @ (b'\'' | b'"' | b'`')) => self.eat_quoted(quote),
            _ => {
                self.eat_while(|b| is_word_byte(b) || b == b'.');
            }
        }
        Some(TokenKind::Name(NameClass::Variable))
    }

    fn scan_placeholder(&mut self) -> Option<TokenKind> {
        (self.peek()? == b'?').then(|| {
            self.pos += 1;
            TokenKind::Name(NameClass::Placeholder)
        })
    }

    fn scan_operator(&mut self) -> Option<TokenKind> {
        if let Some(op) = MULTI_CHAR_OPERATORS.iter().find(|op| self.starts_with(op)) {
            self.pos += op.len();
            return Some(TokenKind::Operator(OperatorClass::Symbol));
        }
        SINGLE_CHAR_OPERATORS.contains(&self.peek()?).then(|| {
            self.pos += 1;
            TokenKind::Operator(OperatorClass::Symbol)
        })
    }

    fn scan_word(&mut self) -> Option<TokenKind> {
        let start = self.pos;
        (self.eat_while(is_word_byte) > 0).then(|| classify(&self.source[start..self.pos]))
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        while self.pos < self.bytes.len() {
            let start = self.pos;
            if let Some(kind) = self.scan() {
                return Some(Token::new(kind, &self.source[start..self.pos], start));
            }
            // Unknown characters are always ASCII; skip one byte.
            self.pos = start + 1;
        }
        None
    }
}
