//! Clauses shared by SELECT, UPDATE and DELETE.

use super::Parser;
use crate::sql::ast::{NodeId, NodeKind, Variant};

impl<'a> Parser<'a> {
    pub(super) fn parse_from(&mut self) -> Option<NodeId> {
        if !self.state.is_word(&["from"]) {
            return None;
        }
        let from = self.clause(NodeKind::From, None);
        self.state.next();
        self.parse_table_references(from);
        Some(from)
    }

    pub(super) fn parse_where(&mut self) -> Option<NodeId> {
        self.parse_condition(&["where"], NodeKind::Where)
    }

    pub(super) fn parse_having(&mut self) -> Option<NodeId> {
        self.parse_condition(&["having"], NodeKind::Having)
    }

    fn parse_condition(&mut self, keyword: &[&str], kind: NodeKind) -> Option<NodeId> {
        if !self.state.is_word(keyword) {
            return None;
        }
        let clause = self.clause(kind, None);
        self.state.next();
        self.attach_with(clause, Self::parse_expr);
        Some(clause)
    }

    /// `GROUP BY expr [ASC|DESC], ... [WITH ROLLUP]`
    pub(super) fn parse_group_by(&mut self) -> Option<NodeId> {
        let pos = self.state.pos();
        self.state.accept_seq(&["group", "by"])?;
        let group = self.node(NodeKind::Group, Variant::Statement, None, pos);
        self.parse_ordering_list(group);
        let pos = self.state.pos();
        if let Some(with) = self.state.accept_seq(&["with", "rollup"]) {
            let modifier = self.node(NodeKind::Modifier, Variant::Statement, None, pos);
            let with = self.keyword(with);
            self.attach(modifier, with);
            if let Some(rollup) = self.state.previous() {
                let rollup = self.keyword(rollup);
                self.attach(modifier, rollup);
            }
            self.attach(group, modifier);
        }
        Some(group)
    }

    pub(super) fn parse_order_by(&mut self) -> Option<NodeId> {
        let pos = self.state.pos();
        self.state.accept_seq(&["order", "by"])?;
        let order = self.node(NodeKind::Order, Variant::Statement, None, pos);
        self.parse_ordering_list(order);
        Some(order)
    }

    /// Comma separated expressions, each wrapped in a `direction` node when followed by
    /// `ASC` or `DESC`.
    fn parse_ordering_list(&mut self, parent: NodeId) {
        loop {
            let Some(expr) = self.parse_expr() else {
                break;
            };
            let item = match self.state.accept(&["asc", "desc"]) {
                Some(direction) => {
                    let node = self.node(
                        NodeKind::Direction,
                        Variant::Statement,
                        Some(direction.text.to_ascii_uppercase()),
                        direction.start,
                    );
                    self.attach(node, expr);
                    node
                }
                None => expr,
            };
            self.attach(parent, item);
            if self.state.accept(&[","]).is_none() {
                break;
            }
        }
    }

    /// `LIMIT row_count`, `LIMIT offset, row_count` or `LIMIT row_count OFFSET offset`.
    pub(super) fn parse_limit(&mut self) -> Option<NodeId> {
        if !self.state.is_word(&["limit"]) {
            return None;
        }
        let limit = self.clause(NodeKind::Limit, None);
        self.state.next();
        let Some(first) = self.parse_expr() else {
            return Some(limit);
        };
        let (row_count, offset) = if self.state.accept(&["offset"]).is_some() {
            (Some(first), self.parse_expr())
        } else if self.state.accept(&[","]).is_some() {
            (self.parse_expr(), Some(first))
        } else {
            (Some(first), None)
        };
        for (kind, expr) in [(NodeKind::RowCount, row_count), (NodeKind::Offset, offset)] {
            let Some(expr) = expr else { continue };
            let pos = self.ast[expr].pos;
            let wrapper = self.node(kind, Variant::Statement, None, pos);
            self.attach(wrapper, expr);
            self.attach(limit, wrapper);
        }
        Some(limit)
    }
}
