use super::Parser;
use crate::sql::{
    ast::{NodeId, NodeKind, Variant},
    token_kind::{LiteralClass, TokenKind},
};

pub const SELECT_MODIFIERS: &[&str] = &[
    "all",
    "distinct",
    "distinctrow",
    "high_priority",
    "straight_join",
    "sql_small_result",
    "sql_big_result",
    "sql_buffer_result",
    "sql_no_cache",
    "sql_cache",
    "sql_calc_found_rows",
];

/// Reserved words that end the column list.
const COLUMN_TERMINATORS: &[&str] = &[
    "from", "where", "group", "having", "order", "limit", "procedure", "into", "for", "lock",
    "union", "window",
];

impl<'a> Parser<'a> {
    /// ```text
    /// SELECT [modifiers] column [, column] ...
    ///     [INTO ...] [FROM table_references] [WHERE expr] [GROUP BY ...] [HAVING expr]
    ///     [ORDER BY ...] [LIMIT ...] [PROCEDURE name(args)] [INTO ...] [FOR UPDATE | ...]
    ///     [UNION [ALL | DISTINCT] SELECT ...]
    /// ```
    pub(super) fn parse_select(&mut self) -> Option<NodeId> {
        self.nested(Self::select_statement)
    }

    fn select_statement(&mut self) -> Option<NodeId> {
        if !self.state.is_word(&["select"]) {
            return None;
        }
        let select = self.clause(NodeKind::Select, None);
        self.state.next();
        let modifier = self.attach_with(select, |p| p.parse_modifiers(SELECT_MODIFIERS));
        let columns = self.parse_columns();
        self.attach(select, columns);
        // Nothing typed after the modifiers yet: the cursor is still in modifier position.
        if let (Some(modifier), false) = (modifier, self.ast.has_children(columns)) {
            self.touch(modifier);
        }
        self.attach_with(select, Self::parse_into);
        self.attach_with(select, Self::parse_from);
        self.attach_with(select, Self::parse_where);
        self.attach_with(select, Self::parse_group_by);
        self.attach_with(select, Self::parse_having);
        self.attach_with(select, Self::parse_order_by);
        self.attach_with(select, Self::parse_limit);
        self.attach_with(select, Self::parse_procedure);
        self.attach_with(select, Self::parse_into);
        self.attach_with(select, Self::parse_lock);
        self.attach_with(select, Self::parse_union);
        Some(select)
    }

    fn parse_columns(&mut self) -> NodeId {
        let columns = self.clause(NodeKind::Columns, None);
        loop {
            let column = self.parse_column();
            self.attach(columns, column);
            if column.is_none() || self.state.accept(&[","]).is_none() {
                break;
            }
        }
        columns
    }

    fn parse_column(&mut self) -> Option<NodeId> {
        if self.state.is_reserved(COLUMN_TERMINATORS) {
            return None;
        }
        let pos = self.state.pos();
        let expr = match self.state.accept(&["*"]) {
            Some(star) => self.node(
                NodeKind::Identifier,
                Variant::Expression,
                Some(star.text.to_string()),
                star.start,
            ),
            None => self.parse_expr()?,
        };
        let column = self.node(NodeKind::Column, Variant::Statement, None, pos);
        self.attach(column, expr);
        self.attach_with(column, |p| p.parse_alias(true));
        Some(column)
    }

    /// `INTO @var, ...`, `INTO OUTFILE 'file' [options]` or `INTO DUMPFILE 'file'`.
    fn parse_into(&mut self) -> Option<NodeId> {
        if !self.state.is_word(&["into"]) {
            return None;
        }
        let into = self.clause(NodeKind::Into, None);
        self.state.next();
        let pos = self.state.pos();
        let target = if self.state.accept(&["outfile"]).is_some() {
            let file = self.string_value();
            let outfile = self.node(NodeKind::Outfile, Variant::Statement, file, pos);
            self.parse_export_options(outfile);
            outfile
        } else if self.state.accept(&["dumpfile"]).is_some() {
            let file = self.string_value();
            self.node(NodeKind::Dumpfile, Variant::Statement, file, pos)
        } else {
            let variables = self.node(NodeKind::Variables, Variant::Statement, None, pos);
            loop {
                let variable = self.parse_simple_expr_term();
                self.attach(variables, variable);
                if variable.is_none() || self.state.accept(&[","]).is_none() {
                    break;
                }
            }
            variables
        };
        self.attach(into, target);
        Some(into)
    }

    /// Take the current token as a string value if it is a string literal.
    fn string_value(&mut self) -> Option<String> {
        let token = self
            .state
            .current()
            .filter(|t| t.kind == TokenKind::Literal(LiteralClass::String))?;
        self.state.next();
        Some(super::unquote(token.text))
    }

    /// `[CHARACTER SET cs] [FIELDS|COLUMNS option ...] [LINES option ...]`
    fn parse_export_options(&mut self, outfile: NodeId) {
        loop {
            let pos = self.state.pos();
            if self.state.accept_seq(&["character", "set"]).is_some() {
                let name = self.state.next().map(|t| super::unquote(t.text));
                let charset = self.node(NodeKind::Charset, Variant::Statement, name, pos);
                self.attach(outfile, charset);
            } else if self.state.accept(&["fields", "columns"]).is_some() {
                let fields = self.node(NodeKind::Fields, Variant::Statement, None, pos);
                self.parse_file_options(fields, &["terminated", "enclosed", "escaped"]);
                self.attach(outfile, fields);
            } else if self.state.accept(&["lines"]).is_some() {
                let lines = self.node(NodeKind::Lines, Variant::Statement, None, pos);
                self.parse_file_options(lines, &["starting", "terminated"]);
                self.attach(outfile, lines);
            } else {
                break;
            }
        }
    }

    /// `[OPTIONALLY] word BY 'string'` repeated.
    fn parse_file_options(&mut self, parent: NodeId, words: &[&str]) {
        loop {
            let pos = self.state.pos();
            let optionally = self.state.accept(&["optionally"]).is_some();
            let Some(word) = self.state.accept(words) else {
                break;
            };
            self.state.accept(&["by"]);
            let mut value = format!("{} BY", word.text.to_ascii_uppercase());
            if optionally {
                value.insert_str(0, "OPTIONALLY ");
            }
            let option = self.node(NodeKind::FileOption, Variant::Statement, Some(value), pos);
            if let Some(token) = self
                .state
                .current()
                .filter(|t| t.kind == TokenKind::Literal(LiteralClass::String))
            {
                self.state.next();
                let literal = self.literal(token);
                self.attach(option, literal);
            }
            self.attach(parent, option);
        }
    }

    fn parse_procedure(&mut self) -> Option<NodeId> {
        let pos = self.state.pos();
        self.state.accept(&["procedure"])?;
        let name = self.state.current().filter(|t| t.kind.is_identifier());
        let name = name.map(|t| {
            self.state.next();
            super::unquote(t.text)
        });
        let procedure = self.node(NodeKind::Procedure, Variant::Statement, name, pos);
        self.attach_with(procedure, Self::parse_paren_group);
        Some(procedure)
    }

    /// `FOR UPDATE | FOR SHARE [OF t, ...] [NOWAIT | SKIP LOCKED]` or `LOCK IN SHARE MODE`.
    fn parse_lock(&mut self) -> Option<NodeId> {
        let pos = self.state.pos();
        let value = if self.state.accept_seq(&["for", "update"]).is_some() {
            "FOR UPDATE"
        } else if self.state.accept_seq(&["for", "share"]).is_some() {
            "FOR SHARE"
        } else if self.state.accept_seq(&["lock", "in", "share", "mode"]).is_some() {
            "LOCK IN SHARE MODE"
        } else {
            return None;
        };
        let lock = self.node(NodeKind::Lock, Variant::Statement, Some(value.to_string()), pos);
        if self.state.accept(&["of"]).is_some() {
            loop {
                let table = self.parse_identifier();
                self.attach(lock, table);
                if table.is_none() || self.state.accept(&[","]).is_none() {
                    break;
                }
            }
        }
        let pos = self.state.pos();
        let wait = if self.state.accept(&["nowait"]).is_some() {
            Some("NOWAIT")
        } else if self.state.accept_seq(&["skip", "locked"]).is_some() {
            Some("SKIP LOCKED")
        } else {
            None
        };
        if let Some(wait) = wait {
            let keyword = self.node(NodeKind::Keyword, Variant::Statement, Some(wait.to_string()), pos);
            self.attach(lock, keyword);
        }
        Some(lock)
    }

    fn parse_union(&mut self) -> Option<NodeId> {
        let pos = self.state.pos();
        self.state.accept(&["union"])?;
        let value = match self.state.accept(&["all", "distinct"]) {
            Some(token) => format!("UNION {}", token.text.to_ascii_uppercase()),
            None => "UNION".to_string(),
        };
        let union = self.node(NodeKind::Union, Variant::Statement, Some(value), pos);
        if self.state.is_open_paren() {
            self.attach_with(union, Self::parse_paren_group);
        } else {
            self.attach_with(union, Self::parse_select);
        }
        Some(union)
    }
}

#[cfg(test)]
mod tests {
    use crate::sql::{ast::NodeKind, parser::parse};

    #[test]
    fn modifiers_are_keywords() {
        let parsed = parse("SELECT DISTINCT SQL_NO_CACHE a FROM t");
        let select = parsed.ast.at(parsed.statements[0]);
        let modifier = select.child(NodeKind::Modifier).expect("modifier");
        let words: Vec<_> = modifier.children().filter_map(|n| n.value()).collect();
        assert_eq!(words, vec!["DISTINCT", "SQL_NO_CACHE"]);
    }

    #[test]
    fn bare_modifier_is_the_last_node() {
        let parsed = parse("SELECT DISTINCT ");
        let last = parsed.last.map(|id| parsed.ast[id].kind);
        assert_eq!(last, Some(NodeKind::Modifier));
    }

    #[test]
    fn column_aliases() {
        let parsed = parse("SELECT a AS x, b y, c 'z' FROM t");
        let columns = parsed.ast.at(parsed.statements[0]).child(NodeKind::Columns).expect("columns");
        let aliases: Vec<_> = columns
            .children()
            .filter_map(|c| c.child(NodeKind::Alias).and_then(|a| a.value()))
            .collect();
        assert_eq!(aliases, vec!["x", "y", "z"]);
    }

    #[test]
    fn into_outfile_options() {
        let parsed = parse(
            "SELECT a INTO OUTFILE '/tmp/out' FIELDS TERMINATED BY ',' OPTIONALLY ENCLOSED BY '\"' \
             LINES TERMINATED BY '\\n' FROM t",
        );
        let select = parsed.ast.at(parsed.statements[0]);
        let outfile = select
            .child(NodeKind::Into)
            .and_then(|i| i.child(NodeKind::Outfile))
            .expect("outfile");
        assert_eq!(outfile.value(), Some("/tmp/out"));
        let fields: Vec<_> = outfile
            .child(NodeKind::Fields)
            .expect("fields")
            .children()
            .filter_map(|o| o.value())
            .collect();
        assert_eq!(fields, vec!["TERMINATED BY", "OPTIONALLY ENCLOSED BY"]);
        assert!(outfile.child(NodeKind::Lines).is_some());
        assert!(select.child(NodeKind::From).is_some());
    }

    #[test]
    fn into_variables() {
        let parsed = parse("SELECT a, b INTO @x, @y FROM t");
        let variables = parsed
            .ast
            .at(parsed.statements[0])
            .child(NodeKind::Into)
            .and_then(|i| i.child(NodeKind::Variables))
            .expect("variables");
        let names: Vec<_> = variables.children().filter_map(|v| v.value()).collect();
        assert_eq!(names, vec!["@x", "@y"]);
    }

    #[test]
    fn union_chain() {
        let parsed = parse("SELECT a FROM t UNION ALL SELECT b FROM u UNION SELECT c");
        let first = parsed.ast.at(parsed.statements[0]);
        let union = first.child(NodeKind::Union).expect("first union");
        assert_eq!(union.value(), Some("UNION ALL"));
        let second = union.child(NodeKind::Select).expect("second select");
        assert_eq!(
            second.child(NodeKind::Union).and_then(|u| u.value()),
            Some("UNION")
        );
    }

    #[test]
    fn locking_clauses() {
        let parsed = parse("SELECT a FROM t FOR UPDATE NOWAIT");
        let lock = parsed.ast.at(parsed.statements[0]).child(NodeKind::Lock).expect("lock");
        assert_eq!(lock.value(), Some("FOR UPDATE"));
        assert_eq!(lock.child(NodeKind::Keyword).and_then(|k| k.value()), Some("NOWAIT"));

        let parsed = parse("SELECT a FROM t LOCK IN SHARE MODE");
        let lock = parsed.ast.at(parsed.statements[0]).child(NodeKind::Lock);
        assert_eq!(lock.and_then(|l| l.value()), Some("LOCK IN SHARE MODE"));
    }

    #[test]
    fn procedure_clause() {
        let parsed = parse("SELECT a FROM t PROCEDURE analyse(10, 2000)");
        let procedure = parsed
            .ast
            .at(parsed.statements[0])
            .child(NodeKind::Procedure)
            .expect("procedure");
        assert_eq!(procedure.value(), Some("analyse"));
        assert_eq!(
            procedure.child(NodeKind::ParenGroup).map(|g| g.children().count()),
            Some(2)
        );
    }
}
