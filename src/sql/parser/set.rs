use super::{Parser, unquote};
use crate::sql::ast::{ASSIGNMENT_PRECEDENCE, NodeId, NodeKind, Variant};

const SCOPES: &[&str] = &["global", "session", "local", "persist", "persist_only"];

impl<'a> Parser<'a> {
    /// ```text
    /// SET item [, item] ...
    /// item := NAMES {charset | 'charset' | DEFAULT} [COLLATE collation]
    ///       | {CHARACTER SET | CHARSET} {charset | 'charset' | DEFAULT}
    ///       | [scope] name {= | :=} expr
    ///       | @var {= | :=} expr
    ///       | @@[scope.]name {= | :=} expr
    /// ```
    pub(super) fn parse_set(&mut self) -> Option<NodeId> {
        if !self.state.is_word(&["set"]) {
            return None;
        }
        let set = self.clause(NodeKind::Set, None);
        self.state.next();
        loop {
            let item = self.parse_set_item();
            self.attach(set, item);
            if item.is_none() || self.state.accept(&[","]).is_none() {
                break;
            }
        }
        Some(set)
    }

    fn parse_set_item(&mut self) -> Option<NodeId> {
        let pos = self.state.pos();
        if self.state.accept(&["names"]).is_some() {
            let charset = self.parse_charset_name(pos);
            let pos = self.state.pos();
            if self.state.accept(&["collate"]).is_some() {
                let name = self.charset_word();
                let collate = self.node(NodeKind::Collate, Variant::Statement, name, pos);
                self.attach(charset, collate);
            }
            return Some(charset);
        }
        if self.state.accept_seq(&["character", "set"]).is_some()
            || self.state.accept(&["charset"]).is_some()
        {
            return Some(self.parse_charset_name(pos));
        }

        let target = self.parse_set_target()?;
        let operator = self.state.accept(&["=", ":="]).map(|t| t.text.to_string());
        let assignment = self.node(
            NodeKind::Assignment,
            Variant::Op(ASSIGNMENT_PRECEDENCE),
            operator,
            pos,
        );
        self.attach(assignment, target);
        self.attach_with(assignment, Self::parse_expr);
        Some(assignment)
    }

    /// A `charset` node valued with the name that follows, if any was typed.
    fn parse_charset_name(&mut self, pos: usize) -> NodeId {
        let charset = self.node(NodeKind::Charset, Variant::Statement, None, pos);
        let name = self.charset_word();
        self.ast.set_value(charset, name);
        charset
    }

    fn charset_word(&mut self) -> Option<String> {
        let token = self.state.current().filter(|t| {
            t.kind.is_identifier() || t.kind.is_literal() || t.is("default")
        })?;
        self.state.next();
        Some(unquote(token.text))
    }

    /// `GLOBAL name` is normalised to the `@@global.name` spelling.
    fn parse_set_target(&mut self) -> Option<NodeId> {
        let token = self.state.current()?;
        let scoped = self.state.is_word(SCOPES)
            && self.state.lookahead(|s| {
                s.next();
                s.is_identifier()
            });
        if scoped {
            self.state.next();
            let (name, _) = self.parse_name()?;
            let value = format!("@@{}.{name}", token.text.to_ascii_lowercase());
            return Some(self.node(NodeKind::Variable, Variant::Expression, Some(value), token.start));
        }
        if self.state.is_variable() {
            self.state.next();
            return Some(self.node(
                NodeKind::Variable,
                Variant::Expression,
                Some(token.text.to_string()),
                token.start,
            ));
        }
        self.parse_identifier()
    }
}
