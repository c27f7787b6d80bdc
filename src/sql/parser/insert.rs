use super::Parser;
use crate::sql::ast::{NodeId, NodeKind, Variant};

const INSERT_MODIFIERS: &[&str] = &["low_priority", "delayed", "high_priority", "ignore"];

impl<'a> Parser<'a> {
    /// ```text
    /// {INSERT|REPLACE} [modifiers] [INTO] tbl [PARTITION (p, ...)] [(col, ...)]
    ///     { {VALUES|VALUE} (expr, ...) [, (expr, ...)] ...
    ///     | SET assignment [, assignment] ...
    ///     | SELECT ... }
    ///     [ON DUPLICATE KEY UPDATE assignment [, assignment] ...]
    /// ```
    ///
    /// `INSERT(` and `REPLACE(` with no space are the string functions and are left to
    /// the expression parser.
    pub(super) fn parse_insert(&mut self) -> Option<NodeId> {
        let kind = if self.state.is_word(&["insert"]) {
            NodeKind::Insert
        } else if self.state.is_word(&["replace"]) {
            NodeKind::Replace
        } else {
            return None;
        };
        let function = self.state.lookahead(|s| {
            s.next();
            s.is_open_paren() && s.is_adjacent()
        });
        if function {
            return None;
        }
        let insert = self.clause(kind, None);
        self.state.next();
        self.attach_with(insert, |p| p.parse_modifiers(INSERT_MODIFIERS));

        let into = self.clause(NodeKind::Into, None);
        self.state.accept(&["into"]);
        self.attach_with(into, Self::parse_table_name);
        self.attach(insert, into);

        let column_list = self.state.is_open_paren()
            && !self.state.lookahead(|s| {
                s.next();
                s.is_word(&["select"])
            });
        if column_list {
            let columns = self.clause(NodeKind::Columns, None);
            self.parse_identifier_list(columns);
            self.attach(insert, columns);
        }

        self.attach_with(insert, Self::parse_insert_source);

        let pos = self.state.pos();
        if self
            .state
            .accept_seq(&["on", "duplicate", "key", "update"])
            .is_some()
        {
            let list = self.node(
                NodeKind::AssignmentList,
                Variant::Statement,
                Some("ON DUPLICATE KEY UPDATE".to_string()),
                pos,
            );
            self.parse_assignments(list);
            self.attach(insert, list);
        }
        Some(insert)
    }

    fn parse_insert_source(&mut self) -> Option<NodeId> {
        let pos = self.state.pos();
        if self.state.accept(&["values", "value"]).is_some() {
            let values = self.node(NodeKind::Values, Variant::Statement, None, pos);
            loop {
                let row = if self.state.is_word(&["row"]) {
                    self.parse_simple_expr_term()
                } else {
                    self.parse_paren_group()
                };
                self.attach(values, row);
                if row.is_none() || self.state.accept(&[","]).is_none() {
                    break;
                }
            }
            return Some(values);
        }
        if self.state.accept(&["set"]).is_some() {
            let list = self.node(NodeKind::AssignmentList, Variant::Statement, None, pos);
            self.parse_assignments(list);
            return Some(list);
        }
        if self.state.is_open_paren() {
            return self.parse_paren_group();
        }
        self.parse_select()
    }
}

#[cfg(test)]
mod tests {
    use crate::sql::{ast::NodeKind, parser::parse};
    use rstest::rstest;

    #[test]
    fn values_rows() {
        let parsed = parse("INSERT LOW_PRIORITY INTO t (a, b) VALUES (1, 2), ROW(3, 4)");
        let insert = parsed.ast.at(parsed.statements[0]);
        assert_eq!(insert.kind(), NodeKind::Insert);
        assert!(insert.child(NodeKind::Modifier).is_some());
        let table = insert
            .child(NodeKind::Into)
            .and_then(|i| i.child(NodeKind::TableReference))
            .and_then(|t| t.value());
        assert_eq!(table, Some("t"));
        let columns: Vec<_> = insert
            .child(NodeKind::Columns)
            .expect("columns")
            .children()
            .filter_map(|c| c.value())
            .collect();
        assert_eq!(columns, vec!["a", "b"]);
        let rows: Vec<_> = insert
            .child(NodeKind::Values)
            .expect("values")
            .children()
            .map(|r| r.kind())
            .collect();
        assert_eq!(rows, vec![NodeKind::ParenGroup, NodeKind::Row]);
    }

    #[rstest]
    #[case("REPLACE t SET a = 1", NodeKind::Replace, NodeKind::AssignmentList)]
    #[case("INSERT INTO t SELECT a FROM u", NodeKind::Insert, NodeKind::Select)]
    #[case("INSERT INTO t (SELECT a FROM u)", NodeKind::Insert, NodeKind::Subquery)]
    fn sources(#[case] sql: &str, #[case] kind: NodeKind, #[case] source: NodeKind) {
        let parsed = parse(sql);
        let insert = parsed.ast.at(parsed.statements[0]);
        assert_eq!(insert.kind(), kind);
        assert!(insert.child(NodeKind::Columns).is_none());
        assert!(insert.child(source).is_some(), "missing {source} in {sql}");
    }

    #[test]
    fn on_duplicate_key_update() {
        let parsed = parse("INSERT INTO t (a) VALUES (1) ON DUPLICATE KEY UPDATE a = a + 1");
        let list = parsed
            .ast
            .at(parsed.statements[0])
            .child(NodeKind::AssignmentList)
            .expect("update list");
        assert_eq!(list.value(), Some("ON DUPLICATE KEY UPDATE"));
        assert_eq!(list.children().count(), 1);
    }

    #[test]
    fn string_function_is_not_a_statement() {
        let parsed = parse("REPLACE('abc', 'b', 'x')");
        let root = parsed.ast.at(parsed.statements[0]);
        assert_eq!(root.kind(), NodeKind::Function);
        assert_eq!(root.children().count(), 3);
    }

    #[test]
    fn partial_into_is_the_last_node() {
        let parsed = parse("INSERT INTO ");
        let last = parsed.last.map(|id| parsed.ast[id].kind);
        assert_eq!(last, Some(NodeKind::Into));
    }
}
