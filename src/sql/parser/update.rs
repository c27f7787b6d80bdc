use super::Parser;
use crate::sql::ast::{ASSIGNMENT_PRECEDENCE, NodeId, NodeKind, Variant};

impl<'a> Parser<'a> {
    /// ```text
    /// UPDATE [LOW_PRIORITY] [IGNORE] table_references
    ///     SET assignment [, assignment] ...
    ///     [WHERE expr] [ORDER BY ...] [LIMIT row_count]
    /// ```
    pub(super) fn parse_update(&mut self) -> Option<NodeId> {
        if !self.state.is_word(&["update"]) {
            return None;
        }
        let update = self.clause(NodeKind::Update, None);
        self.state.next();
        self.attach_with(update, |p| p.parse_modifiers(&["low_priority", "ignore"]));
        let references = self.clause(NodeKind::TableReferences, None);
        self.parse_table_references(references);
        self.attach(update, references);
        let pos = self.state.pos();
        if self.state.accept(&["set"]).is_some() {
            let list = self.node(NodeKind::AssignmentList, Variant::Statement, None, pos);
            self.parse_assignments(list);
            self.attach(update, list);
        }
        self.attach_with(update, Self::parse_where);
        self.attach_with(update, Self::parse_order_by);
        self.attach_with(update, Self::parse_limit);
        Some(update)
    }

    /// `col = expr [, col = expr] ...`, attached to `list`.
    pub(super) fn parse_assignments(&mut self, list: NodeId) {
        loop {
            let assignment = self.parse_assignment();
            self.attach(list, assignment);
            if assignment.is_none() || self.state.accept(&[","]).is_none() {
                break;
            }
        }
    }

    fn parse_assignment(&mut self) -> Option<NodeId> {
        let target = self.parse_identifier()?;
        let pos = self.ast[target].pos;
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
}
