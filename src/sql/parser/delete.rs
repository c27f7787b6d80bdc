use super::Parser;
use crate::sql::ast::{NodeId, NodeKind, Variant};

impl<'a> Parser<'a> {
    /// ```text
    /// DELETE [LOW_PRIORITY] [QUICK] [IGNORE] FROM tbl [WHERE ...] [ORDER BY ...] [LIMIT ...]
    /// DELETE [modifiers] tbl[.*] [, tbl[.*]] ... FROM table_references [WHERE ...]
    /// DELETE [modifiers] FROM tbl[.*] [, tbl[.*]] ... USING table_references [WHERE ...]
    /// ```
    pub(super) fn parse_delete(&mut self) -> Option<NodeId> {
        if !self.state.is_word(&["delete"]) {
            return None;
        }
        let delete = self.clause(NodeKind::Delete, None);
        self.state.next();
        self.attach_with(delete, Self::parse_delete_modifiers);

        if self.state.is_word(&["from"]) {
            self.attach_with(delete, Self::parse_from);
            let pos = self.state.pos();
            if self.state.accept(&["using"]).is_some() {
                let using = self.node(NodeKind::Using, Variant::Statement, None, pos);
                self.parse_table_references(using);
                self.attach(delete, using);
            }
        } else {
            let targets = self.clause(NodeKind::TableReferences, None);
            loop {
                let target = self.parse_table_name();
                self.attach(targets, target);
                if target.is_none() || self.state.accept(&[","]).is_none() {
                    break;
                }
            }
            self.attach(delete, targets);
            self.attach_with(delete, Self::parse_from);
        }
        self.attach_with(delete, Self::parse_where);
        self.attach_with(delete, Self::parse_order_by);
        self.attach_with(delete, Self::parse_limit);
        Some(delete)
    }

    /// `QUICK` is not reserved, so it only counts as a modifier when the next token
    /// does not continue a table name list.
    fn parse_delete_modifiers(&mut self) -> Option<NodeId> {
        let mut modifier = None;
        loop {
            let quick = self.state.is_word(&["quick"])
                && self.state.lookahead(|s| {
                    s.next();
                    !s.is_dot() && !s.is_comma()
                });
            if !quick && !self.state.is_word(&["low_priority", "ignore"]) {
                break;
            }
            let Some(token) = self.state.next() else {
                break;
            };
            let parent = *modifier.get_or_insert_with(|| {
                self.node(NodeKind::Modifier, Variant::Statement, None, token.start)
            });
            let keyword = self.keyword(token);
            self.attach(parent, keyword);
        }
        modifier
    }
}

#[cfg(test)]
mod tests {
    use crate::sql::{ast::NodeKind, parser::parse};

    fn kinds(sql: &str) -> Vec<NodeKind> {
        let parsed = parse(sql);
        parsed.ast.at(parsed.statements[0]).children().map(|c| c.kind()).collect()
    }

    #[test]
    fn single_table_delete() {
        assert_eq!(
            kinds("DELETE QUICK FROM t WHERE a = 1 ORDER BY a LIMIT 1"),
            vec![
                NodeKind::Modifier,
                NodeKind::From,
                NodeKind::Where,
                NodeKind::Order,
                NodeKind::Limit
            ]
        );
    }

    #[test]
    fn targets_then_from() {
        let sql = "DELETE t1.*, t2 FROM t1 JOIN t2 ON t1.id = t2.id WHERE t1.x";
        assert_eq!(
            kinds(sql),
            vec![NodeKind::TableReferences, NodeKind::From, NodeKind::Where]
        );
        let parsed = parse(sql);
        let targets = parsed
            .ast
            .at(parsed.statements[0])
            .child(NodeKind::TableReferences)
            .expect("targets");
        let names: Vec<_> = targets.children().filter_map(|t| t.value()).collect();
        assert_eq!(names, vec!["t1", "t2"]);
    }

    #[test]
    fn from_then_using() {
        assert_eq!(
            kinds("DELETE FROM t1, t2 USING t1 JOIN t2 WHERE t1.id = t2.id"),
            vec![NodeKind::From, NodeKind::Using, NodeKind::Where]
        );
    }

    #[test]
    fn quick_as_table_name() {
        let parsed = parse("DELETE quick, other FROM quick JOIN other");
        let delete = parsed.ast.at(parsed.statements[0]);
        assert!(delete.child(NodeKind::Modifier).is_none());
        assert!(delete.child(NodeKind::TableReferences).is_some());
    }
}
