crate::reexport!(context);
crate::reexport!(pool);
crate::reexport!(suggestion);

use crate::sql::{
    parser::{ParseOptions, Parsed, Parser},
    tokenizer::tokenize,
};
use crate::*;
use moka::future::Cache;

/// Suggestions for one cursor position, in the order they should be shown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Completion {
    pub suggestions: Vec<String>,
    /// The word the suggestions complete.
    pub prefix: String,
}

/// Completes SQL text against names found in the statement and in a schema source.
pub struct Autocomplete<S> {
    source: S,
    options: ParseOptions,
    cache: Cache<(String, usize), Completion>,
}

impl<S: SchemaSource> Autocomplete<S> {
    pub fn new(source: S) -> Self {
        Self::with_options(source, ParseOptions::from_config(), config().suggestion_cache)
    }

    pub fn with_options(source: S, options: ParseOptions, capacity: u64) -> Self {
        Self {
            source,
            options,
            cache: Cache::new(capacity),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Suggestions for the word ending at byte offset `cursor` in `text`.
    ///
    /// Repeating the last few requests is answered from a cache, so the same text and
    /// cursor always give the same answer even if the source has changed since.
    pub async fn suggestions(&self, text: &str, cursor: usize) -> Completion {
        let prefix = Prefix::at(text, cursor);
        let key = (text.to_string(), prefix.cursor);
        if let Some(hit) = self.cache.get(&key).await {
            debug!(cursor = prefix.cursor, "completion served from cache");
            return hit;
        }
        let completion = Request::new(self, text, prefix).complete().await;
        self.cache.insert(key, completion.clone()).await;
        completion
    }

    fn parse(&self, sql: &str) -> Parsed {
        Parser::new(sql).with_options(self.options).parse()
    }
}

/// State for computing one completion.
struct Request<'a, S> {
    engine: &'a Autocomplete<S>,
    prefix: Prefix,
    context: Option<ContextTag>,
    pool: SuggestionPool,
}

impl<'a, S: SchemaSource> Request<'a, S> {
    fn new(engine: &'a Autocomplete<S>, text: &str, prefix: Prefix) -> Self {
        let head = &text[..prefix.cursor];
        let statement_start = tokenize(head)
            .iter()
            .filter(|t| t.text == ";")
            .map(|t| t.end())
            .last()
            .unwrap_or(0);

        let partial = engine.parse(head);
        let context = partial
            .last
            .filter(|&id| partial.ast[id].pos >= statement_start)
            .and_then(|id| detect_context(&partial.ast, id));

        let full = engine.parse(text);
        let pool = full
            .statements
            .iter()
            .find(|&&root| full.ast[root].pos >= statement_start)
            .map(|&root| SuggestionPool::harvest(&full.ast, root, prefix.skip()))
            .unwrap_or_default();

        debug!(
            context = ?context,
            prefix = %prefix.text,
            qualifier = ?prefix.qualifier,
            "completing"
        );
        Self {
            engine,
            prefix,
            context,
            pool,
        }
    }

    async fn complete(self) -> Completion {
        let suggestions = match self.prefix.qualifier.clone() {
            Some(qualifier) => self.qualified(&qualifier).await,
            None => self.unqualified().await,
        };
        debug!(count = suggestions.len(), "suggestions ready");
        Completion {
            suggestions,
            prefix: self.prefix.text,
        }
    }

    /// `qualifier.` names an alias, a table or a schema.
    async fn qualified(&self, qualifier: &str) -> Vec<String> {
        let text = &self.prefix.text;
        if let Some(table) = self.pool.resolve_qualifier(qualifier) {
            return select(text, [self.table_columns(table).await]);
        }
        if self.context == Some(ContextTag::Table) {
            return select(text, [self.tables(Some(qualifier)).await]);
        }
        let columns = self.table_columns(qualifier).await;
        let tables = self.tables(Some(qualifier)).await;
        select(text, [columns, tables])
    }

    async fn unqualified(&self) -> Vec<String> {
        let text = &self.prefix.text;
        let Some(context) = self.context else {
            return select(text, [keywords()]);
        };
        match context {
            tag if tag.is_expression() => select(text, self.expression_sources(tag).await),
            ContextTag::Table => {
                let tables = self.tables(None).await;
                select(text, [tables, self.pool.tables.clone(), keywords()])
            }
            ContextTag::SelectModifier => {
                let sources = self.expression_sources(ContextTag::Column).await;
                select(text, std::iter::once(select_modifiers()).chain(sources))
            }
            ContextTag::IndexHint => select(text, [vec!["PRIMARY".to_string()], keywords()]),
            ContextTag::Charset => select(text, [charsets(), keywords()]),
            ContextTag::Variable => {
                let words = SET_WORDS.iter().map(|w| w.to_string()).collect();
                select(text, [self.pool.variables.clone(), words, keywords()])
            }
            _ => select(text, [keywords()]),
        }
    }

    /// Columns, the aliases `tag` allows, variables, functions and keywords.
    async fn expression_sources(&self, tag: ContextTag) -> [Vec<String>; 5] {
        let mut columns = self.pool.columns.clone();
        for table in &self.pool.tables {
            columns.extend(self.table_columns(table).await);
        }
        let aliases = match tag {
            ContextTag::Where => {
                columns.retain(|c| !self.pool.mentions_alias(c));
                Vec::new()
            }
            ContextTag::Column => {
                columns.retain(|c| !self.pool.is_alias(c));
                self.pool.table_aliases().map(str::to_string).collect()
            }
            _ => {
                columns.retain(|c| !self.pool.is_alias(c));
                self.pool.column_aliases.clone()
            }
        };
        [
            columns,
            aliases,
            self.pool.variables.clone(),
            functions(),
            keywords(),
        ]
    }

    /// Columns of a possibly schema qualified table name.
    async fn table_columns(&self, table: &str) -> Vec<String> {
        match table.rsplit_once('.') {
            Some((schema, name)) => self.columns(Some(schema), name).await,
            None => self.columns(None, table).await,
        }
    }

    async fn tables(&self, schema: Option<&str>) -> Vec<String> {
        self.engine
            .source
            .tables(schema)
            .await
            .unwrap_or_else(|err| {
                warn!(?schema, %err, "schema source failed to list tables");
                Vec::new()
            })
    }

    async fn columns(&self, schema: Option<&str>, table: &str) -> Vec<String> {
        self.engine
            .source
            .columns(schema, table)
            .await
            .unwrap_or_else(|err| {
                warn!(?schema, table, %err, "schema source failed to list columns");
                Vec::new()
            })
    }
}
