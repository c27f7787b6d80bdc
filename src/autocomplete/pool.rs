use crate::sql::ast::{Ast, NodeId, NodeKind};

/// Names harvested from one statement's tree, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuggestionPool {
    pub columns: Vec<String>,
    pub tables: Vec<String>,
    /// `(alias, table)` for every aliased table reference.
    pub aliases: Vec<(String, String)>,
    pub column_aliases: Vec<String>,
    pub variables: Vec<String>,
}

impl SuggestionPool {
    /// Walk the statement at `root`. Nodes starting at `skip` are the word under the
    /// cursor and are left out.
    pub fn harvest(ast: &Ast, root: NodeId, skip: Option<usize>) -> Self {
        let mut pool = Self::default();
        for id in ast.descendants(root) {
            let node = &ast[id];
            match node.kind {
                NodeKind::Column => pool.harvest_column(ast, id, skip),
                NodeKind::TableReference if !at(node.pos, skip) => pool.harvest_table(ast, id, skip),
                NodeKind::Variable if !at(node.pos, skip) => {
                    if let Some(name) = &node.value {
                        push_unique(&mut pool.variables, name);
                    }
                }
                _ => {}
            }
        }
        pool
    }

    fn harvest_column(&mut self, ast: &Ast, id: NodeId, skip: Option<usize>) {
        let leading = ast.children(id).first().map(|&c| &ast[c]);
        if let Some(ident) = leading.filter(|n| n.kind == NodeKind::Identifier) {
            if let (Some(name), false) = (ident.value.as_deref(), at(ident.pos, skip)) {
                let name = unqualified(name);
                if name != "*" {
                    push_unique(&mut self.columns, name);
                }
            }
        }
        if let Some(alias) = alias_of(ast, id, skip) {
            push_unique(&mut self.column_aliases, &alias);
        }
    }

    fn harvest_table(&mut self, ast: &Ast, id: NodeId, skip: Option<usize>) {
        let Some(name) = ast[id].value.as_deref() else {
            return;
        };
        push_unique(&mut self.tables, name);
        if let Some(alias) = alias_of(ast, id, skip) {
            if !self.aliases.iter().any(|(a, _)| *a == alias) {
                self.aliases.push((alias, name.to_string()));
            }
        }
    }

    /// The table a qualifier names, via an alias or directly, ignoring ASCII case.
    pub fn resolve_qualifier(&self, qualifier: &str) -> Option<&str> {
        self.aliases
            .iter()
            .find(|(alias, _)| alias.eq_ignore_ascii_case(qualifier))
            .map(|(_, table)| table.as_str())
            .or_else(|| {
                self.tables
                    .iter()
                    .find(|t| {
                        t.eq_ignore_ascii_case(qualifier)
                            || unqualified(t).eq_ignore_ascii_case(qualifier)
                    })
                    .map(String::as_str)
            })
    }

    /// True if `name` is a table or column alias.
    pub fn is_alias(&self, name: &str) -> bool {
        self.aliases.iter().any(|(alias, _)| alias.eq_ignore_ascii_case(name))
            || self.column_aliases.iter().any(|a| a.eq_ignore_ascii_case(name))
    }

    /// True if `name` contains any table or column alias, ignoring ASCII case.
    pub fn mentions_alias(&self, name: &str) -> bool {
        let name = name.to_ascii_lowercase();
        self.table_aliases()
            .chain(self.column_aliases.iter().map(String::as_str))
            .any(|alias| name.contains(&alias.to_ascii_lowercase()))
    }

    pub fn table_aliases(&self) -> impl Iterator<Item = &str> {
        self.aliases.iter().map(|(alias, _)| alias.as_str())
    }
}

fn alias_of(ast: &Ast, id: NodeId, skip: Option<usize>) -> Option<String> {
    let alias = &ast[ast.child(id, NodeKind::Alias)?];
    if at(alias.pos, skip) {
        return None;
    }
    alias.value.clone()
}

fn at(pos: usize, skip: Option<usize>) -> bool {
    skip == Some(pos)
}

/// Last `.` separated part.
fn unqualified(name: &str) -> &str {
    name.rsplit('.').next().unwrap_or(name)
}

fn push_unique(list: &mut Vec<String>, name: &str) {
    if !list.iter().any(|n| n == name) {
        list.push(name.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::parser::parse;

    fn pool(sql: &str, skip: Option<usize>) -> SuggestionPool {
        let parsed = parse(sql);
        SuggestionPool::harvest(&parsed.ast, parsed.statements[0], skip)
    }

    #[test]
    fn harvests_names_and_aliases() {
        let pool = pool(
            "SELECT a.first_name, last_name AS surname, COUNT(*) n, @x \
             FROM actor a JOIN film_actor USING (actor_id) WHERE a.actor_id = @id",
            None,
        );
        assert_eq!(pool.columns, vec!["first_name", "last_name"]);
        assert_eq!(pool.tables, vec!["actor", "film_actor"]);
        assert_eq!(pool.aliases, vec![("a".to_string(), "actor".to_string())]);
        assert_eq!(pool.column_aliases, vec!["surname", "n"]);
        assert_eq!(pool.variables, vec!["@x", "@id"]);
        assert_eq!(pool.resolve_qualifier("A"), Some("actor"));
        assert_eq!(pool.resolve_qualifier("film_actor"), Some("film_actor"));
        assert_eq!(pool.resolve_qualifier("nothing"), None);
        assert!(pool.is_alias("surname"));
        assert!(!pool.is_alias("actor"));
        assert!(pool.mentions_alias("actor"));
        assert!(pool.mentions_alias("SURNAME_KEY"));
        assert!(!pool.mentions_alias("title"));
    }

    #[test]
    fn word_under_cursor_is_skipped() {
        // `fir` starts at 7.
        let pool = pool("SELECT fir FROM actor", Some(7));
        assert!(pool.columns.is_empty());
        assert_eq!(pool.tables, vec!["actor"]);
    }

    #[test]
    fn qualified_tables() {
        let pool = pool("SELECT * FROM sakila.actor", None);
        assert!(pool.columns.is_empty());
        assert_eq!(pool.resolve_qualifier("actor"), Some("sakila.actor"));
    }
}
