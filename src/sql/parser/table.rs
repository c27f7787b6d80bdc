//! Table references and joins.
//!
//! ```text
//! table_references := table_reference [, table_reference] ...
//! table_reference  := table_factor [join] ...
//! table_factor     := name [PARTITION (p, ...)] [[AS] alias] [index_hint ...]
//!                   | ( SELECT ... ) [AS] alias
//!                   | ( table_references )
//! ```
//!
//! Joins hang off the table reference on their left. `LEFT`/`RIGHT` joins get a
//! `join_dir` node holding the `join`; other joins are a bare `join` node. The
//! joined factor and its `ON`/`USING` spec are children of the `join`.

use super::Parser;
use crate::sql::ast::{NodeId, NodeKind, Variant};

const INDEX_HINT_VERBS: &[&str] = &["use", "ignore", "force"];

impl<'a> Parser<'a> {
    /// Comma separated table references, attached to `parent`.
    pub(super) fn parse_table_references(&mut self, parent: NodeId) {
        loop {
            let reference = self.parse_table_reference();
            self.attach(parent, reference);
            if reference.is_none() || self.state.accept(&[","]).is_none() {
                break;
            }
        }
    }

    fn parse_table_reference(&mut self) -> Option<NodeId> {
        let reference = self.parse_table_factor()?;
        while let Some(join) = self.parse_join() {
            self.attach(reference, join);
        }
        Some(reference)
    }

    fn parse_table_factor(&mut self) -> Option<NodeId> {
        let pos = self.state.pos();
        if self.state.is_open_paren() {
            let reference = self.node(NodeKind::TableReference, Variant::Statement, None, pos);
            let subquery = self.state.lookahead(|s| {
                s.next();
                s.is_word(&["select"])
            });
            if subquery {
                self.attach_with(reference, Self::parse_paren_group);
                self.attach_with(reference, |p| p.parse_alias(false));
            } else {
                self.state.next();
                self.nested(|p| {
                    p.parse_table_references(reference);
                    Some(())
                });
                self.state.accept(&[")"]);
            }
            return Some(reference);
        }
        let reference = self.parse_table_name()?;
        self.attach_with(reference, |p| p.parse_alias(false));
        while let Some(hint) = self.parse_index_hint() {
            self.attach(reference, hint);
            let more = self.state.is_comma()
                && self.state.lookahead(|s| {
                    s.next();
                    s.is_word(INDEX_HINT_VERBS)
                });
            if more {
                self.state.next();
            }
        }
        Some(reference)
    }

    /// `name [PARTITION (p, ...)]` as a `table_reference` valued with the name.
    /// A trailing `.*` (multi-table DELETE targets) is dropped from the value.
    pub(super) fn parse_table_name(&mut self) -> Option<NodeId> {
        let (name, pos) = match self.state.current() {
            Some(dual) if self.state.is_word(&["dual"]) => {
                self.state.next();
                (dual.text.to_string(), dual.start)
            }
            _ => self.parse_name()?,
        };
        let name = match name.strip_suffix(".*") {
            Some(stripped) => stripped.to_string(),
            None => name,
        };
        let reference = self.node(NodeKind::TableReference, Variant::Statement, Some(name), pos);
        let pos = self.state.pos();
        if self.state.accept(&["partition"]).is_some() {
            let partition = self.node(NodeKind::Partition, Variant::Statement, None, pos);
            self.parse_identifier_list(partition);
            self.attach(reference, partition);
        }
        Some(reference)
    }

    /// `{USE|IGNORE|FORCE} {INDEX|KEY} [FOR {JOIN|ORDER BY|GROUP BY}] (index, ...)`
    fn parse_index_hint(&mut self) -> Option<NodeId> {
        let is_hint = self.state.is_word(INDEX_HINT_VERBS)
            && self.state.lookahead(|s| {
                s.next();
                s.is_word(&["index", "key"])
            });
        if !is_hint {
            return None;
        }
        let verb = self.state.next()?;
        let key = self.state.next()?;
        let value = format!(
            "{} {}",
            verb.text.to_ascii_uppercase(),
            key.text.to_ascii_uppercase()
        );
        let hint = self.node(NodeKind::IndexHint, Variant::Statement, Some(value), verb.start);
        let pos = self.state.pos();
        if self.state.accept(&["for"]).is_some() {
            let target = if self.state.accept(&["join"]).is_some() {
                Some("FOR JOIN")
            } else if self.state.accept_seq(&["order", "by"]).is_some() {
                Some("FOR ORDER BY")
            } else if self.state.accept_seq(&["group", "by"]).is_some() {
                Some("FOR GROUP BY")
            } else {
                None
            };
            let modifier = self.node(
                NodeKind::Modifier,
                Variant::Statement,
                target.map(str::to_string),
                pos,
            );
            self.attach(hint, modifier);
        }
        if self.state.accept(&["("]).is_some() {
            loop {
                // `PRIMARY` is reserved but names an index here.
                let index = match self.state.accept(&["primary"]) {
                    Some(primary) => Some(self.node(
                        NodeKind::Identifier,
                        Variant::Expression,
                        Some(primary.text.to_string()),
                        primary.start,
                    )),
                    None => self.parse_identifier(),
                };
                self.attach(hint, index);
                if index.is_none() || self.state.accept(&[","]).is_none() {
                    break;
                }
            }
            self.state.accept(&[")"]);
        }
        Some(hint)
    }

    fn parse_join(&mut self) -> Option<NodeId> {
        let pos = self.state.pos();
        let directional = self.state.is_word(&["left", "right"])
            && self.state.lookahead(|s| {
                s.next();
                s.accept(&["outer"]);
                s.is_word(&["join"])
            });
        if directional {
            let direction = self.state.next()?;
            let dir = self.node(
                NodeKind::JoinDir,
                Variant::Statement,
                Some(direction.text.to_ascii_uppercase()),
                pos,
            );
            let join_pos = self.state.pos();
            let value = match self.state.accept(&["outer"]) {
                Some(_) => "OUTER JOIN",
                None => "JOIN",
            };
            self.state.accept(&["join"]);
            let join = self.node(NodeKind::Join, Variant::Statement, Some(value.to_string()), join_pos);
            self.attach(dir, join);
            self.parse_join_target(join);
            return Some(dir);
        }

        let value = if let Some(natural) = self.parse_natural_join() {
            natural
        } else if self.state.accept(&["straight_join"]).is_some() {
            "STRAIGHT_JOIN".to_string()
        } else if self.state.accept_seq(&["inner", "join"]).is_some() {
            "INNER JOIN".to_string()
        } else if self.state.accept_seq(&["cross", "join"]).is_some() {
            "CROSS JOIN".to_string()
        } else if self.state.accept(&["join"]).is_some() {
            "JOIN".to_string()
        } else {
            return None;
        };
        let join = self.node(NodeKind::Join, Variant::Statement, Some(value), pos);
        self.parse_join_target(join);
        Some(join)
    }

    /// `NATURAL [INNER | {LEFT|RIGHT} [OUTER]] JOIN`, as its normalised text.
    fn parse_natural_join(&mut self) -> Option<String> {
        let words = self.state.lookahead(|s| {
            let mut words = vec![s.accept(&["natural"])?];
            if let Some(side) = s.accept(&["inner", "left", "right"]) {
                words.push(side);
                if let Some(outer) = s.accept(&["outer"]) {
                    words.push(outer);
                }
            }
            words.push(s.accept(&["join"])?);
            Some(words.len())
        })?;
        let text: Vec<String> = (0..words)
            .filter_map(|_| self.state.next())
            .map(|t| t.text.to_ascii_uppercase())
            .collect();
        Some(text.join(" "))
    }

    fn parse_join_target(&mut self, join: NodeId) {
        self.attach_with(join, Self::parse_table_factor);
        let pos = self.state.pos();
        if self.state.accept(&["on"]).is_some() {
            let spec = self.node(NodeKind::JoinSpec, Variant::Statement, Some("ON".to_string()), pos);
            self.attach_with(spec, Self::parse_expr);
            self.attach(join, spec);
        } else if self.state.accept(&["using"]).is_some() {
            let spec = self.node(
                NodeKind::JoinSpec,
                Variant::Statement,
                Some("USING".to_string()),
                pos,
            );
            self.parse_identifier_list(spec);
            self.attach(join, spec);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::sql::{ast::NodeKind, parser::parse};

    #[test]
    fn index_hints() {
        let parsed = parse("SELECT a FROM t USE INDEX FOR JOIN (i1, PRIMARY), IGNORE KEY (i2)");
        let reference = parsed
            .ast
            .at(parsed.statements[0])
            .child(NodeKind::From)
            .and_then(|f| f.child(NodeKind::TableReference))
            .expect("table reference");
        let hints: Vec<_> = reference
            .children()
            .filter(|c| c.kind() == NodeKind::IndexHint)
            .collect();
        assert_eq!(hints.len(), 2);
        assert_eq!(hints[0].value(), Some("USE INDEX"));
        assert_eq!(hints[0].child(NodeKind::Modifier).and_then(|m| m.value()), Some("FOR JOIN"));
        let indexes: Vec<_> = hints[0]
            .children()
            .filter(|c| c.kind() == NodeKind::Identifier)
            .filter_map(|c| c.value())
            .collect();
        assert_eq!(indexes, vec!["i1", "PRIMARY"]);
        assert_eq!(hints[1].value(), Some("IGNORE KEY"));
    }

    #[test]
    fn subquery_factor_with_alias() {
        let parsed = parse("SELECT x.a FROM (SELECT a FROM t) AS x");
        let reference = parsed
            .ast
            .at(parsed.statements[0])
            .child(NodeKind::From)
            .and_then(|f| f.child(NodeKind::TableReference))
            .expect("derived table");
        assert_eq!(reference.value(), None);
        assert!(reference.child(NodeKind::Subquery).is_some());
        assert_eq!(reference.child(NodeKind::Alias).and_then(|a| a.value()), Some("x"));
    }

    #[test]
    fn join_variants() {
        let parsed = parse(
            "SELECT * FROM a NATURAL LEFT JOIN b STRAIGHT_JOIN c INNER JOIN d USING (id) \
             CROSS JOIN e JOIN f ON f.id = a.id",
        );
        let reference = parsed
            .ast
            .at(parsed.statements[0])
            .child(NodeKind::From)
            .and_then(|f| f.child(NodeKind::TableReference))
            .expect("table reference");
        let joins: Vec<_> = reference.children().filter_map(|c| c.value()).collect();
        assert_eq!(
            joins,
            vec!["NATURAL LEFT JOIN", "STRAIGHT_JOIN", "INNER JOIN", "CROSS JOIN", "JOIN"]
        );
        let inner = reference.children().nth(2).expect("inner join");
        assert_eq!(inner.child(NodeKind::JoinSpec).and_then(|s| s.value()), Some("USING"));
    }

    #[test]
    fn nested_join_list() {
        let parsed = parse("SELECT * FROM (a, b) JOIN c");
        let outer = parsed
            .ast
            .at(parsed.statements[0])
            .child(NodeKind::From)
            .and_then(|f| f.child(NodeKind::TableReference))
            .expect("nested reference");
        let names: Vec<_> = outer
            .children()
            .filter(|c| c.kind() == NodeKind::TableReference)
            .filter_map(|c| c.value())
            .collect();
        assert_eq!(names, vec!["a", "b"]);
        assert!(outer.child(NodeKind::Join).is_some());
    }

    #[test]
    fn partition_and_qualified_name() {
        let parsed = parse("SELECT * FROM db.t PARTITION (p0, p1) tt");
        let reference = parsed
            .ast
            .at(parsed.statements[0])
            .child(NodeKind::From)
            .and_then(|f| f.child(NodeKind::TableReference))
            .expect("table reference");
        assert_eq!(reference.value(), Some("db.t"));
        let partition = reference.child(NodeKind::Partition).expect("partition");
        assert_eq!(partition.children().count(), 2);
        assert_eq!(reference.child(NodeKind::Alias).and_then(|a| a.value()), Some("tt"));
    }
}
