//! Token kind definitions for the MySQL lexer.
//!
//! Kinds form a two level hierarchy. The outer `TokenKind` is the category a parser
//! usually branches on (keyword, name, literal, ...), the inner class narrows it down.
//! `Display` renders the dotted tag, e.g. `Literal.Number.Hex` or `Keyword.Reserved`.

use derive_more::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum KeywordClass {
    /// Cannot be used as a bare identifier.
    #[display(".Reserved")]
    Reserved,
    /// Context dependent, still usable as an identifier.
    #[display("")]
    NonReserved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum NameClass {
    #[display("")]
    Other,
    /// Known builtin function name.
    #[display(".Builtin")]
    Builtin,
    /// Backtick quoted identifier.
    #[display(".Quoted")]
    Quoted,
    /// `@user`, `@@system` or `@@scope.system` variable.
    #[display(".Variable")]
    Variable,
    /// `?` parameter marker.
    #[display(".Placeholder")]
    Placeholder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum LiteralClass {
    #[display(".Number.Dec")]
    Dec,
    #[display(".Number.Hex")]
    Hex,
    #[display(".Number.Bit")]
    Bit,
    #[display(".String")]
    String,
    /// `TRUE`, `FALSE` and `NULL`.
    #[display(".Constant")]
    Constant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum OperatorClass {
    #[display(".Symbol")]
    Symbol,
    #[display(".Word")]
    Word,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum CommentStyle {
    /// `-- ` and `#` comments, running to end of line.
    #[display(".Single")]
    Single,
    /// `/* ... */` comments.
    #[display(".Multiline")]
    Multiline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum TokenKind {
    #[display("Text.Whitespace")]
    Whitespace,
    #[display("Comment{_0}")]
    Comment(CommentStyle),
    /// `(`, `)`, `,`, `;` and `.`.
    #[display("Punctuation")]
    Punctuation,
    #[display("Keyword{_0}")]
    Keyword(KeywordClass),
    #[display("Name{_0}")]
    Name(NameClass),
    #[display("Literal{_0}")]
    Literal(LiteralClass),
    #[display("Operator{_0}")]
    Operator(OperatorClass),
}

impl TokenKind {
    /// Whitespace and comments carry no syntax and are skipped by the parser.
    pub fn is_trivia(self) -> bool {
        matches!(self, TokenKind::Whitespace | TokenKind::Comment(_))
    }

    pub fn is_reserved(self) -> bool {
        self == TokenKind::Keyword(KeywordClass::Reserved)
    }

    /// Reserved or non-reserved keyword.
    pub fn is_keyword(self) -> bool {
        matches!(self, TokenKind::Keyword(_))
    }

    pub fn is_literal(self) -> bool {
        matches!(self, TokenKind::Literal(_))
    }

    pub fn is_number(self) -> bool {
        matches!(
            self,
            TokenKind::Literal(LiteralClass::Dec | LiteralClass::Hex | LiteralClass::Bit)
        )
    }

    pub fn is_operator(self) -> bool {
        matches!(self, TokenKind::Operator(_))
    }

    pub fn is_variable(self) -> bool {
        self == TokenKind::Name(NameClass::Variable)
    }

    /// A bare word: keyword, name, word operator or `TRUE`/`FALSE`/`NULL`.
    /// Quoted identifiers and variables are not words.
    pub fn is_word(self) -> bool {
        matches!(
            self,
            TokenKind::Keyword(_)
                | TokenKind::Name(NameClass::Other | NameClass::Builtin)
                | TokenKind::Operator(OperatorClass::Word)
                | TokenKind::Literal(LiteralClass::Constant)
        )
    }

    /// Kinds that may name a table, column or alias without quoting.
    pub fn is_identifier(self) -> bool {
        matches!(
            self,
            TokenKind::Keyword(KeywordClass::NonReserved)
                | TokenKind::Name(NameClass::Other | NameClass::Builtin | NameClass::Quoted)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(TokenKind::Literal(LiteralClass::Hex), "Literal.Number.Hex")]
    #[case(TokenKind::Literal(LiteralClass::Dec), "Literal.Number.Dec")]
    #[case(TokenKind::Keyword(KeywordClass::Reserved), "Keyword.Reserved")]
    #[case(TokenKind::Keyword(KeywordClass::NonReserved), "Keyword")]
    #[case(TokenKind::Operator(OperatorClass::Symbol), "Operator.Symbol")]
    #[case(TokenKind::Name(NameClass::Other), "Name")]
    #[case(TokenKind::Comment(CommentStyle::Multiline), "Comment.Multiline")]
    #[case(TokenKind::Whitespace, "Text.Whitespace")]
    fn display_is_dotted_tag(#[case] kind: TokenKind, #[case] tag: &str) {
        assert_eq!(kind.to_string(), tag);
    }

    #[test]
    fn trivia_classification() {
        assert!(TokenKind::Whitespace.is_trivia());
        assert!(TokenKind::Comment(CommentStyle::Single).is_trivia());
        assert!(!TokenKind::Punctuation.is_trivia());
    }

    #[test]
    fn word_and_identifier_classification() {
        let quoted = TokenKind::Name(NameClass::Quoted);
        assert!(quoted.is_identifier());
        assert!(!quoted.is_word());

        let reserved = TokenKind::Keyword(KeywordClass::Reserved);
        assert!(reserved.is_word());
        assert!(!reserved.is_identifier());

        assert!(!TokenKind::Name(NameClass::Variable).is_word());
        assert!(TokenKind::Literal(LiteralClass::Constant).is_word());
        assert!(!TokenKind::Literal(LiteralClass::String).is_word());
    }
}
