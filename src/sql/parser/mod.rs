//! Lenient recursive descent parser for MySQL statements.
//!
//! One `Parser` drives one `State` and builds one `Ast`. Each statement grammar
//! lives in its own file as an `impl Parser` block; they share the expression
//! parser and the table reference and clause helpers.
//!
//! Nothing here fails. A grammar that does not recognise its leading token returns
//! `None` and the dispatcher tries the next one, falling back to a bare expression.
//! Tokens left over after a statement are skipped up to the next `;`.

mod call;
mod clause;
mod delete;
mod expression;
mod insert;
mod select;
mod set;
mod table;
mod update;

#[cfg(test)]
mod parser_tests;

pub use select::SELECT_MODIFIERS;

use crate::sql::{
    ast::{Ast, NodeId, NodeKind, Variant},
    state::State,
    token::Token,
    token_kind::{LiteralClass, TokenKind},
};
use crate::*;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// `||` concatenates strings instead of meaning `OR`.
    pub pipes_as_concat: bool,
}

impl ParseOptions {
    pub fn from_config() -> Self {
        Self {
            pipes_as_concat: config().pipes_as_concat,
        }
    }
}

/// Output of one parse: the arena, one root per statement, and the last node created.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parsed {
    pub ast: Ast,
    pub statements: Vec<NodeId>,
    pub last: Option<NodeId>,
}

impl Parsed {
    pub fn render(&self) -> String {
        self.statements.iter().map(|&id| self.ast.render(id)).collect()
    }
}

/// Parse every `;` separated statement of `sql` with default options.
pub fn parse(sql: &str) -> Parsed {
    Parser::new(sql).parse()
}

/// Deepest nesting of parentheses, subqueries and unary operators that is descended
/// into. Anything below is left unparsed and skipped with the rest of the statement.
const MAX_DEPTH: usize = 128;

pub struct Parser<'a> {
    state: State<'a>,
    ast: Ast,
    last: Option<NodeId>,
    options: ParseOptions,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(sql: &'a str) -> Self {
        Self {
            state: State::new(sql),
            ast: Ast::new(),
            last: None,
            options: ParseOptions::default(),
            depth: 0,
        }
    }

    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    pub fn parse(mut self) -> Parsed {
        let mut statements = Vec::new();
        loop {
            while self.state.accept(&[";"]).is_some() {}
            if self.state.is_eof() {
                break;
            }
            let start = self.state.pos();
            if let Some(root) = self.parse_statement() {
                statements.push(root);
            }
            let skipped = self.state.skip_statement();
            if skipped > 0 {
                trace!(start, skipped, "skipped tokens the statement grammar did not consume");
            }
        }
        Parsed {
            ast: self.ast,
            statements,
            last: self.last,
        }
    }

    fn parse_statement(&mut self) -> Option<NodeId> {
        self.parse_select()
            .or_else(|| self.parse_insert())
            .or_else(|| self.parse_update())
            .or_else(|| self.parse_delete())
            .or_else(|| self.parse_do())
            .or_else(|| self.parse_call())
            .or_else(|| self.parse_set())
            .or_else(|| self.parse_expr())
    }

    fn node(&mut self, kind: NodeKind, variant: Variant, value: Option<String>, pos: usize) -> NodeId {
        let id = self.ast.new_node(kind, variant, value, pos);
        self.last = Some(id);
        id
    }

    /// Structural node starting at the current token.
    fn clause(&mut self, kind: NodeKind, value: Option<String>) -> NodeId {
        let pos = self.state.pos();
        self.node(kind, Variant::Statement, value, pos)
    }

    fn keyword(&mut self, token: Token<'_>) -> NodeId {
        self.node(
            NodeKind::Keyword,
            Variant::Statement,
            Some(token.text.to_ascii_uppercase()),
            token.start,
        )
    }

    /// Mark `id` as the most recent node, for context detection.
    fn touch(&mut self, id: NodeId) {
        self.last = Some(id);
    }

    fn attach(&mut self, parent: NodeId, child: impl Into<Option<NodeId>>) {
        self.ast.add_child(parent, child);
    }

    fn attach_with(
        &mut self,
        parent: NodeId,
        parse: impl FnOnce(&mut Self) -> Option<NodeId>,
    ) -> Option<NodeId> {
        let child = parse(self);
        self.ast.add_child(parent, child);
        child
    }

    /// Run a recursive grammar one nesting level deeper, or yield nothing past
    /// `MAX_DEPTH`.
    fn nested<T>(&mut self, parse: impl FnOnce(&mut Self) -> Option<T>) -> Option<T> {
        if self.depth >= MAX_DEPTH {
            trace!(pos = self.state.pos(), "nesting too deep, not descending");
            return None;
        }
        self.depth += 1;
        let out = parse(self);
        self.depth -= 1;
        out
    }

    /// Accept any run of `words`, collecting them under one `modifier` node.
    fn parse_modifiers(&mut self, words: &[&str]) -> Option<NodeId> {
        let mut modifier = None;
        while let Some(token) = self.state.accept(words) {
            let parent = *modifier.get_or_insert_with(|| {
                self.node(NodeKind::Modifier, Variant::Statement, None, token.start)
            });
            let keyword = self.keyword(token);
            self.attach(parent, keyword);
        }
        modifier
    }

    /// A possibly qualified name: `a`, `db.t`, `` `t`.`c` ``, `t.*`. Parts are unquoted
    /// and joined with `.`. Reserved words are only accepted after a dot.
    fn parse_name(&mut self) -> Option<(String, usize)> {
        let first = self.state.current()?;
        if !self.state.is_identifier() {
            return None;
        }
        self.state.next();
        let mut parts = vec![unquote(first.text)];
        while self.state.is_dot() {
            self.state.next();
            if let Some(star) = self.state.accept(&["*"]) {
                parts.push(star.text.to_string());
                break;
            }
            match self.state.current() {
                // A reserved word after `a. ` belongs to the next clause.
                Some(part)
                    if part.kind.is_identifier()
                        || (part.kind.is_word() && self.state.is_adjacent()) =>
                {
                    parts.push(unquote(part.text));
                    self.state.next();
                }
                _ => break,
            }
        }
        Some((parts.join("."), first.start))
    }

    fn parse_identifier(&mut self) -> Option<NodeId> {
        let (name, pos) = self.parse_name()?;
        Some(self.node(NodeKind::Identifier, Variant::Expression, Some(name), pos))
    }

    /// `AS name` or a bare name. Column aliases may also be string literals.
    fn parse_alias(&mut self, allow_string: bool) -> Option<NodeId> {
        let pos = self.state.pos();
        let explicit = self.state.accept(&["as"]).is_some();
        let token = match self.state.current() {
            Some(t) if t.kind.is_identifier() => t,
            Some(t) if allow_string && t.kind == TokenKind::Literal(LiteralClass::String) => t,
            // `AS` with nothing usable after it still opens an alias for autocomplete.
            _ if explicit => {
                return Some(self.node(NodeKind::Alias, Variant::Statement, None, pos));
            }
            _ => return None,
        };
        self.state.next();
        Some(self.node(
            NodeKind::Alias,
            Variant::Statement,
            Some(unquote(token.text)),
            token.start,
        ))
    }

    /// Comma separated identifiers inside parentheses, attached to `parent`.
    fn parse_identifier_list(&mut self, parent: NodeId) {
        if self.state.accept(&["("]).is_none() {
            return;
        }
        loop {
            let ident = self.parse_identifier();
            self.attach(parent, ident);
            if ident.is_none() || self.state.accept(&[","]).is_none() {
                break;
            }
        }
        self.state.accept(&[")"]);
    }
}

/// Strip one level of quoting and undo doubled quote characters.
pub(crate) fn unquote(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(q @ ('`' | '\'' | '"')) => {
            let inner = text[1..].strip_suffix(q).unwrap_or(&text[1..]);
            let doubled: String = [q, q].iter().collect();
            inner.replace(&doubled, &q.to_string())
        }
        _ => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("plain", "plain")]
    #[case("`quoted`", "quoted")]
    #[case("`a``b`", "a`b")]
    #[case("'it''s'", "it's")]
    #[case("`open", "open")]
    fn unquotes(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(unquote(raw), expected);
    }

    #[test]
    fn empty_input_has_no_statements() {
        let parsed = parse("");
        assert!(parsed.statements.is_empty());
        assert!(parsed.last.is_none());
        assert!(parse(" ;; -- nothing\n").statements.is_empty());
    }

    #[test]
    fn one_root_per_statement() {
        let parsed = parse("SELECT 1; UPDATE t SET a = 1; DO 1");
        let kinds: Vec<_> = parsed.statements.iter().map(|&id| parsed.ast[id].kind).collect();
        assert_eq!(kinds, vec![NodeKind::Select, NodeKind::Update, NodeKind::Do]);
        for &root in &parsed.statements {
            assert_eq!(parsed.ast.parent(root), None);
        }
    }

    #[test]
    fn garbage_is_skipped_to_next_statement() {
        let parsed = parse(") ) nonsense ( ; SELECT a");
        let kinds: Vec<_> = parsed.statements.iter().map(|&id| parsed.ast[id].kind).collect();
        assert_eq!(kinds.last(), Some(&NodeKind::Select));
    }

    #[test]
    fn bare_expression_is_a_statement() {
        let parsed = parse("1 + 2");
        let root = parsed.statements[0];
        assert_eq!(parsed.ast[root].kind, NodeKind::Operator);
    }
}
