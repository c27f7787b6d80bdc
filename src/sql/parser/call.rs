use super::Parser;
use crate::sql::ast::{NodeId, NodeKind};

impl<'a> Parser<'a> {
    /// `DO expr [, expr] ...`
    pub(super) fn parse_do(&mut self) -> Option<NodeId> {
        if !self.state.is_word(&["do"]) {
            return None;
        }
        let statement = self.clause(NodeKind::Do, None);
        self.state.next();
        loop {
            let expr = self.attach_with(statement, Self::parse_expr);
            if expr.is_none() || self.state.accept(&[","]).is_none() {
                break;
            }
        }
        Some(statement)
    }

    /// `CALL name [(expr, ...)]`, also accepting a bare expression after the name.
    pub(super) fn parse_call(&mut self) -> Option<NodeId> {
        if !self.state.is_word(&["call"]) {
            return None;
        }
        let call = self.clause(NodeKind::Call, None);
        self.state.next();
        if self.attach_with(call, Self::parse_identifier).is_none() {
            return Some(call);
        }
        if self.state.is_open_paren() {
            self.attach_with(call, Self::parse_paren_group);
        } else {
            self.attach_with(call, Self::parse_expr);
        }
        Some(call)
    }
}

#[cfg(test)]
mod tests {
    use crate::sql::{ast::NodeKind, parser::parse};

    #[test]
    fn do_expression_list() {
        let parsed = parse("DO SLEEP(1), @a := 2");
        let statement = parsed.ast.at(parsed.statements[0]);
        assert_eq!(statement.kind(), NodeKind::Do);
        let kinds: Vec<_> = statement.children().map(|c| c.kind()).collect();
        assert_eq!(kinds, vec![NodeKind::Function, NodeKind::Operator]);
    }

    #[test]
    fn call_with_arguments() {
        let parsed = parse("CALL db.refresh(1, 'x')");
        let call = parsed.ast.at(parsed.statements[0]);
        assert_eq!(call.child(NodeKind::Identifier).and_then(|i| i.value()), Some("db.refresh"));
        assert_eq!(
            call.child(NodeKind::ParenGroup).map(|g| g.children().count()),
            Some(2)
        );
    }

    #[test]
    fn call_without_arguments() {
        let parsed = parse("CALL cleanup");
        let call = parsed.ast.at(parsed.statements[0]);
        assert_eq!(call.children().count(), 1);
    }
}
