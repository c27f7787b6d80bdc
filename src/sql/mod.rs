//! Lenient MySQL tokenization, parsing and tree building.
//!
//! This module turns raw, possibly half typed SQL into a tree the autocomplete
//! engine can walk. Nothing in here reports errors: unknown characters are
//! skipped, malformed numbers are re-read as words, and a grammar that does not
//! match simply yields no node.
//!
//! Modules:
//! - `keyword`    : Static word tables and `classify`.
//! - `token_kind` : Two level token classification with dotted `Display` tags.
//! - `token`      : Token struct borrowing its text from the source.
//! - `tokenizer`  : Single pass lexer, an `Iterator` over every token including trivia.
//! - `state`      : Cursor over significant tokens with rewindable lookahead.
//! - `ast`        : Arena of nodes with parent links.
//! - `parser`     : Statement and expression grammars.
//!
//! Example:
//! ```rust
//! use myview::{NodeKind, parse};
//!
//! let parsed = parse("SELECT a, b FROM my_table");
//! let select = parsed.ast.at(parsed.statements[0]);
//! assert_eq!(select.kind(), NodeKind::Select);
//! assert!(select.child(NodeKind::From).is_some());
//! ```
//!
//! Every parse also records the last node it created. For input cut at the
//! cursor that node sits in the clause being typed, which is what context
//! detection starts from.

pub mod ast;
pub mod keyword;
pub mod parser;
pub mod state;
pub mod token;
pub mod token_kind;
pub mod tokenizer;

pub use ast::{Ast, Node, NodeId, NodeKind, NodeRef, Variant};
pub use parser::{ParseOptions, Parsed, Parser, parse};
pub use state::State;
pub use token::Token;
pub use token_kind::TokenKind;
pub use tokenizer::{Lexer, tokenize};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_feed_the_parser() {
        let sql = "SELECT col FROM tbl";
        let words: Vec<_> = tokenize(sql)
            .into_iter()
            .filter(|t| !t.kind.is_trivia())
            .map(|t| t.text)
            .collect();
        assert_eq!(words, vec!["SELECT", "col", "FROM", "tbl"]);

        let parsed = parse(sql);
        let from = parsed.ast.at(parsed.statements[0]).child(NodeKind::From);
        let table = from.and_then(|f| f.child(NodeKind::TableReference));
        assert_eq!(table.and_then(|t| t.value()), Some("tbl"));
    }
}
