//! Expression grammar, innermost layer last:
//!
//! ```text
//! expr             := expr_term {OR | || | XOR | AND | && | :=} expr_term ...
//! expr_term        := NOT expr_term | boolean_primary [IS [NOT] {TRUE|FALSE|UNKNOWN}]
//! boolean_primary  := predicate {comparison [ANY|SOME|ALL] predicate | IS [NOT] NULL} ...
//! predicate        := bit_expr [[NOT] {IN | BETWEEN | LIKE | REGEXP} ...] | bit_expr SOUNDS LIKE bit_expr
//! bit_expr         := simple_expr {^ * / DIV % MOD - + << >> & |} simple_expr ...
//! simple_expr      := simple_expr_term {COLLATE name | -> path | || term} ...
//! ```
//!
//! Binary operator chains are built with `fold`, an operator stack that reduces the
//! previous operator while it binds at least as tightly as the incoming one.

use super::Parser;
use crate::sql::{
    ast::{CONCAT_PRECEDENCE, NodeId, NodeKind, Variant, precedence},
    keyword::{is_function_name, is_interval_unit},
    state::State,
    token::Token,
    token_kind::{LiteralClass, TokenKind},
};

const EXPR_OPERATORS: &[&str] = &["or", "xor", "and", "&&", ":="];
const COMPARISON_OPERATORS: &[&str] = &["=", ">=", ">", "<=", "<", "<>", "!=", "<=>"];
const BIT_OPERATORS: &[&str] = &[
    "^", "*", "/", "div", "%", "mod", "-", "+", "<<", ">>", "&", "|",
];
const JSON_OPERATORS: &[&str] = &["->", "->>"];
const UNARY_OPERATORS: &[&str] = &["+", "-", "~", "!"];
const PREDICATE_WORDS: &[&str] = &["between", "like", "regexp", "rlike"];
/// Words that may sit between function arguments: `CAST(x AS t)`, `EXTRACT(u FROM d)`.
const ARGUMENT_KEYWORDS: &[&str] = &[
    "distinct", "all", "as", "from", "for", "in", "using", "separator",
];
const MATCH_MODIFIERS: &[&str] = &[
    "in", "boolean", "natural", "language", "mode", "with", "query", "expansion",
];
const IS_PRECEDENCE: i8 = -6;

/// Consume a balanced parenthesised group, the current token being `(`.
fn skip_parens(state: &mut State<'_>) {
    let mut depth = 0usize;
    while let Some(token) = state.next() {
        match token.text {
            "(" => depth += 1,
            ")" => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return;
                }
            }
            _ => {}
        }
    }
}

fn is_subquery_start(state: &mut State<'_>) -> bool {
    state.lookahead(|s| {
        s.next();
        s.is_word(&["select"])
    })
}

fn next_is_open_paren(state: &mut State<'_>) -> bool {
    state.lookahead(|s| {
        s.next();
        s.is_open_paren()
    })
}

/// A predicate keyword is next. `IN` only counts before `(` or at the end of input
/// so that `POSITION(a IN b)` keeps its `IN` as an argument separator.
fn predicate_follows(state: &mut State<'_>) -> bool {
    state.is_word(PREDICATE_WORDS)
        || (state.is_word(&["in"])
            && state.lookahead(|s| {
                s.next();
                s.is_open_paren() || s.is_eof()
            }))
        || state.lookahead(|s| s.accept_seq(&["sounds", "like"]).is_some())
}

impl<'a> Parser<'a> {
    pub(super) fn parse_expr(&mut self) -> Option<NodeId> {
        let first = self.parse_expr_term()?;
        Some(self.fold(first, Self::expr_operator, Self::parse_expr_term))
    }

    /// Operator precedence fold over `operand (operator operand)*`.
    ///
    /// A trailing operator with no right operand keeps its left operand as its only
    /// child, so partial input still yields a connected tree.
    fn fold(
        &mut self,
        first: NodeId,
        operator: impl Fn(&mut Self) -> Option<NodeId>,
        operand: impl Fn(&mut Self) -> Option<NodeId>,
    ) -> NodeId {
        let mut operands = vec![first];
        let mut operators: Vec<NodeId> = Vec::new();
        while let Some(op) = operator(self) {
            while let Some(&top) = operators.last() {
                if !self.ast.has_precedence(top, op) {
                    break;
                }
                operators.pop();
                self.reduce(top, &mut operands);
            }
            operators.push(op);
            match operand(self) {
                Some(next) => operands.push(next),
                None => {
                    if let Some(dangling) = operators.pop() {
                        let left = operands.pop();
                        self.attach(dangling, left);
                        operands.push(dangling);
                    }
                    break;
                }
            }
        }
        while let Some(op) = operators.pop() {
            self.reduce(op, &mut operands);
        }
        operands.pop().unwrap_or(first)
    }

    fn reduce(&mut self, op: NodeId, operands: &mut Vec<NodeId>) {
        let right = operands.pop();
        let left = operands.pop();
        self.attach(op, left);
        self.attach(op, right);
        operands.push(op);
    }

    fn op_node(&mut self, token: Token<'_>, rank: i8) -> NodeId {
        self.node(
            NodeKind::Operator,
            Variant::Op(rank),
            Some(token.text.to_string()),
            token.start,
        )
    }

    pub(super) fn literal(&mut self, token: Token<'_>) -> NodeId {
        self.node(
            NodeKind::Literal,
            Variant::Expression,
            Some(token.text.to_string()),
            token.start,
        )
    }

    /// Consume one of `ops` as a binary operator node.
    fn binary_operator(&mut self, ops: &[&str]) -> Option<NodeId> {
        if !self.state.is_operator(ops) {
            return None;
        }
        let token = self.state.current()?;
        let rank = precedence(&token.lower())?;
        self.state.next();
        Some(self.op_node(token, rank))
    }

    fn expr_operator(&mut self) -> Option<NodeId> {
        if !self.options.pipes_as_concat && self.state.is_operator(&["||"]) {
            return self.binary_operator(&["||"]);
        }
        self.binary_operator(EXPR_OPERATORS)
    }

    fn parse_expr_term(&mut self) -> Option<NodeId> {
        if self.state.is_word(&["not"]) {
            let not = self.state.next()?;
            let unary = self.node(
                NodeKind::UnaryOperator,
                Variant::UnaryOp,
                Some(not.text.to_string()),
                not.start,
            );
            let operand = self.nested(Self::parse_expr_term);
            self.attach(unary, operand);
            return Some(unary);
        }
        let primary = self.parse_boolean_primary()?;
        let truth_test = self.state.is_word(&["is"])
            && self.state.lookahead(|s| {
                s.next();
                s.accept(&["not"]);
                s.is_word(&["true", "false", "unknown"])
            });
        Some(if truth_test {
            self.parse_is(primary)
        } else {
            primary
        })
    }

    /// `left IS [NOT] word`, the current token being `IS`.
    fn parse_is(&mut self, left: NodeId) -> NodeId {
        let pos = self.state.pos();
        self.state.next();
        let value = match self.state.accept(&["not"]) {
            Some(_) => "IS NOT",
            None => "IS",
        };
        let op = self.node(
            NodeKind::Operator,
            Variant::Op(IS_PRECEDENCE),
            Some(value.to_string()),
            pos,
        );
        self.attach(op, left);
        if let Some(word) = self.state.next() {
            let literal = self.literal(word);
            self.attach(op, literal);
        }
        op
    }

    /// Comparisons all share one rank, so the fold reduces to a left-to-right chain.
    fn parse_boolean_primary(&mut self) -> Option<NodeId> {
        let mut left = self.parse_predicate()?;
        loop {
            let null_test = self.state.is_word(&["is"])
                && self.state.lookahead(|s| {
                    s.next();
                    s.accept(&["not"]);
                    s.is_word(&["null"])
                });
            if null_test {
                left = self.parse_is(left);
            } else if let Some(op) = self.binary_operator(COMPARISON_OPERATORS) {
                let right = self.parse_comparison_operand();
                self.attach(op, left);
                self.attach(op, right);
                left = op;
                if right.is_none() {
                    break;
                }
            } else {
                break;
            }
        }
        Some(left)
    }

    fn parse_comparison_operand(&mut self) -> Option<NodeId> {
        let quantified =
            self.state.is_word(&["any", "some", "all"]) && next_is_open_paren(&mut self.state);
        if !quantified {
            return self.parse_predicate();
        }
        let token = self.state.next()?;
        let unary = self.node(
            NodeKind::UnaryOperator,
            Variant::UnaryOp,
            Some(token.text.to_ascii_uppercase()),
            token.start,
        );
        let group = self.parse_paren_group();
        self.attach(unary, group);
        Some(unary)
    }

    fn parse_predicate(&mut self) -> Option<NodeId> {
        let left = self.parse_bit_expr()?;
        let negated = self.state.is_word(&["not"])
            && self.state.lookahead(|s| {
                s.next();
                predicate_follows(s)
            });
        let not = if negated { self.state.next() } else { None };
        let Some(predicate) = self.parse_predicate_tail(left) else {
            return Some(left);
        };
        let Some(not) = not else {
            return Some(predicate);
        };
        let unary = self.node(
            NodeKind::UnaryOperator,
            Variant::UnaryOp,
            Some(not.text.to_string()),
            not.start,
        );
        self.attach(unary, predicate);
        Some(unary)
    }

    fn parse_predicate_tail(&mut self, left: NodeId) -> Option<NodeId> {
        if !predicate_follows(&mut self.state) {
            return None;
        }
        let token = self.state.current()?;
        if self.state.accept_seq(&["sounds", "like"]).is_some() {
            let op = self.node(
                NodeKind::Operator,
                Variant::Op(IS_PRECEDENCE),
                Some("SOUNDS LIKE".to_string()),
                token.start,
            );
            let right = self.parse_bit_expr();
            self.attach(op, left);
            self.attach(op, right);
            return Some(op);
        }
        self.state.next();
        let lower = token.lower();
        let op = self.op_node(token, precedence(&lower).unwrap_or(IS_PRECEDENCE));
        self.attach(op, left);
        match lower.as_str() {
            "in" => {
                let list = self.parse_paren_group();
                self.attach(op, list);
            }
            "between" => {
                let low = self.parse_bit_expr();
                self.attach(op, low);
                self.state.accept(&["and"]);
                let high = self.parse_predicate();
                self.attach(op, high);
            }
            "like" => {
                let pattern = self.parse_simple_expr();
                self.attach(op, pattern);
                if let Some(escape) = self.state.accept(&["escape"]) {
                    let keyword = self.keyword(escape);
                    let character = self.parse_simple_expr();
                    self.attach(keyword, character);
                    self.attach(op, keyword);
                }
            }
            _ => {
                let pattern = self.parse_bit_expr();
                self.attach(op, pattern);
            }
        }
        Some(op)
    }

    fn parse_bit_expr(&mut self) -> Option<NodeId> {
        let first = self.parse_simple_expr()?;
        Some(self.fold(
            first,
            |p| p.binary_operator(BIT_OPERATORS),
            Self::parse_simple_expr,
        ))
    }

    pub(super) fn parse_simple_expr(&mut self) -> Option<NodeId> {
        let mut left = self.parse_simple_expr_term()?;
        loop {
            let pos = self.state.pos();
            if self.state.accept(&["collate"]).is_some() {
                let name = self
                    .state
                    .current()
                    .filter(|t| t.kind.is_identifier() || t.kind.is_literal());
                if name.is_some() {
                    self.state.next();
                }
                let collate = self.node(
                    NodeKind::Collate,
                    Variant::Expression,
                    name.map(|t| super::unquote(t.text)),
                    pos,
                );
                self.attach(collate, left);
                left = collate;
            } else if let Some(op) = self.binary_operator(JSON_OPERATORS) {
                let path = self.parse_simple_expr_term();
                self.attach(op, left);
                self.attach(op, path);
                left = op;
            } else if self.options.pipes_as_concat && self.state.is_operator(&["||"]) {
                let Some(token) = self.state.next() else { break };
                let op = self.op_node(token, CONCAT_PRECEDENCE);
                let right = self.parse_simple_expr_term();
                self.attach(op, left);
                self.attach(op, right);
                left = op;
            } else {
                break;
            }
        }
        Some(left)
    }

    pub(super) fn parse_simple_expr_term(&mut self) -> Option<NodeId> {
        self.nested(Self::simple_expr_term)
    }

    fn simple_expr_term(&mut self) -> Option<NodeId> {
        let token = self.state.current()?;
        if self.state.is_operator(UNARY_OPERATORS) || self.state.is_reserved(&["binary"]) {
            self.state.next();
            let unary = self.node(
                NodeKind::UnaryOperator,
                Variant::UnaryOp,
                Some(token.text.to_string()),
                token.start,
            );
            let operand = self.parse_simple_expr_term();
            self.attach(unary, operand);
            return Some(unary);
        }
        if self.state.is_reserved(&["interval"]) {
            return Some(self.parse_interval());
        }
        if self.state.is_reserved(&["case"]) {
            return Some(self.parse_case());
        }
        if self.state.is_word(&["match"]) && next_is_open_paren(&mut self.state) {
            return Some(self.parse_match());
        }
        if self.state.is_word(&["exists", "row"]) && next_is_open_paren(&mut self.state) {
            self.state.next();
            let kind = if token.is("exists") {
                NodeKind::Exists
            } else {
                NodeKind::Row
            };
            let node = self.node(kind, Variant::Expression, None, token.start);
            let group = self.parse_paren_group();
            self.attach(node, group);
            return Some(node);
        }
        let typed_literal = self.state.is_word(&["date", "time", "timestamp"])
            && self.state.lookahead(|s| {
                s.next();
                s.is(TokenKind::Literal(LiteralClass::String), &[])
            });
        if typed_literal {
            self.state.next();
            let text = self.state.next().map_or("", |t| t.text);
            let value = format!("{} {text}", token.text.to_ascii_uppercase());
            return Some(self.node(NodeKind::Literal, Variant::Expression, Some(value), token.start));
        }
        if self.is_function_call() {
            return Some(self.parse_function());
        }
        if self.state.is_literal() || self.state.is_reserved(&["default"]) {
            self.state.next();
            return Some(self.literal(token));
        }
        if self.state.is_variable() || self.state.is_placeholder() {
            self.state.next();
            let kind = if token.kind.is_variable() {
                NodeKind::Variable
            } else {
                NodeKind::Placeholder
            };
            return Some(self.node(
                kind,
                Variant::Expression,
                Some(token.text.to_string()),
                token.start,
            ));
        }
        if self.state.is_open_paren() {
            return self.parse_paren_group();
        }
        let (name, pos) = self.parse_name()?;
        if self.state.is_open_paren() && self.state.is_adjacent() {
            return Some(self.parse_call_arguments(name, pos));
        }
        Some(self.node(NodeKind::Identifier, Variant::Expression, Some(name), pos))
    }

    /// A function name immediately followed by `(`.
    fn is_function_call(&mut self) -> bool {
        let Some(token) = self.state.current() else {
            return false;
        };
        let callable = is_function_name(token.text) || token.kind.is_identifier();
        callable
            && self.state.lookahead(|s| {
                s.next();
                s.is_open_paren() && s.is_adjacent()
            })
    }

    fn parse_function(&mut self) -> NodeId {
        let pos = self.state.pos();
        let name = self
            .state
            .next()
            .map_or_else(String::new, |t| super::unquote(t.text));
        self.parse_call_arguments(name, pos)
    }

    /// Arguments of a call to `name`, the current token being `(`.
    fn parse_call_arguments(&mut self, name: String, pos: usize) -> NodeId {
        let function = self.node(NodeKind::Function, Variant::Expression, Some(name), pos);
        self.state.accept(&["("]);
        loop {
            if self.state.is_close_paren() || self.state.is_semicolon() || self.state.is_eof() {
                break;
            }
            if self.state.accept(&[","]).is_some() {
                continue;
            }
            let keyword = self
                .state
                .accept(&["*"])
                .or_else(|| self.state.accept(ARGUMENT_KEYWORDS));
            if let Some(keyword) = keyword {
                let node = self.keyword(keyword);
                self.attach(function, node);
            } else if let Some(argument) = self.parse_expr() {
                self.attach(function, argument);
            } else if let Some(word) = self.state.current().filter(|t| t.kind.is_word()) {
                // Type names and other bare words: `CAST(x AS UNSIGNED)`.
                self.state.next();
                let node = self.keyword(word);
                self.attach(function, node);
            } else {
                break;
            }
        }
        self.state.accept(&[")"]);
        function
    }

    /// `( expr, ... )` or `( SELECT ... )`, the current token being `(`.
    pub(super) fn parse_paren_group(&mut self) -> Option<NodeId> {
        if !self.state.is_open_paren() {
            return None;
        }
        let pos = self.state.pos();
        let subquery = is_subquery_start(&mut self.state);
        self.state.next();
        let group = if subquery {
            let node = self.node(NodeKind::Subquery, Variant::Expression, None, pos);
            self.attach_with(node, Self::parse_select);
            node
        } else {
            let node = self.node(NodeKind::ParenGroup, Variant::Expression, None, pos);
            loop {
                let item = self.attach_with(node, Self::parse_expr);
                if item.is_none() || self.state.accept(&[","]).is_none() {
                    break;
                }
            }
            node
        };
        self.state.accept(&[")"]);
        Some(group)
    }

    /// `INTERVAL expr unit`, or the `INTERVAL(n, n1, ...)` function when no unit follows.
    fn parse_interval(&mut self) -> NodeId {
        let as_function = self.state.lookahead(|s| {
            s.next();
            if !s.is_open_paren() {
                return false;
            }
            skip_parens(s);
            !s.current().is_some_and(|t| is_interval_unit(t.text))
        });
        if as_function {
            return self.parse_function();
        }
        let pos = self.state.pos();
        self.state.next();
        let interval = self.node(
            NodeKind::Interval,
            Variant::Expression,
            Some("INTERVAL".to_string()),
            pos,
        );
        self.attach_with(interval, Self::parse_expr);
        if let Some(unit) = self.state.current().filter(|t| is_interval_unit(t.text)) {
            self.state.next();
            let keyword = self.keyword(unit);
            self.attach(interval, keyword);
        }
        interval
    }

    fn parse_case(&mut self) -> NodeId {
        let pos = self.state.pos();
        self.state.next();
        let case = self.node(NodeKind::Case, Variant::Expression, Some("CASE".to_string()), pos);
        if !self.state.is_word(&["when"]) {
            self.attach_with(case, Self::parse_expr);
        }
        loop {
            let pos = self.state.pos();
            let kind = if self.state.accept(&["when"]).is_some() {
                NodeKind::When
            } else if self.state.accept(&["then"]).is_some() {
                NodeKind::Then
            } else if self.state.accept(&["else"]).is_some() {
                NodeKind::Else
            } else {
                break;
            };
            let branch = self.node(kind, Variant::Statement, None, pos);
            self.attach(case, branch);
            if !self.state.is_word(&["end", "when", "then", "else"]) {
                self.attach_with(branch, Self::parse_expr);
            }
        }
        self.state.accept(&["end"]);
        case
    }

    /// `MATCH (col, ...) AGAINST (expr [modifier words])`.
    fn parse_match(&mut self) -> NodeId {
        let pos = self.state.pos();
        self.state.next();
        let node = self.node(NodeKind::Match, Variant::Expression, Some("MATCH".to_string()), pos);
        self.parse_identifier_list(node);
        let pos = self.state.pos();
        if self.state.accept(&["against"]).is_none() {
            return node;
        }
        let against = self.node(NodeKind::Against, Variant::Expression, None, pos);
        self.attach(node, against);
        if self.state.accept(&["("]).is_some() {
            self.attach_with(against, Self::parse_expr);
            self.attach_with(against, |p| p.parse_modifiers(MATCH_MODIFIERS));
            self.state.accept(&[")"]);
        }
        node
    }
}

#[cfg(test)]
mod tests {
    use crate::sql::{ast::NodeKind, parser::parse};

    fn shape(sql: &str) -> String {
        parse(sql).render()
    }

    #[test]
    fn power_is_tighter_than_multiplication() {
        assert_eq!(
            shape("2 * 3 ^ 4"),
            "operator \"*\"\n  literal \"2\"\n  operator \"^\"\n    literal \"3\"\n    literal \"4\"\n"
        );
    }

    #[test]
    fn and_binds_tighter_than_or() {
        let parsed = parse("a OR b AND c");
        let root = parsed.ast.at(parsed.statements[0]);
        assert_eq!(root.value(), Some("OR"));
        let right = root.children().nth(1).map(|n| n.value());
        assert_eq!(right, Some(Some("AND")));
    }

    #[test]
    fn not_in_wraps_the_predicate() {
        let parsed = parse("a NOT IN (1, 2)");
        let root = parsed.ast.at(parsed.statements[0]);
        assert_eq!(root.kind(), NodeKind::UnaryOperator);
        let inner = root.children().next().expect("predicate under NOT");
        assert_eq!(inner.value(), Some("IN"));
        assert!(inner.child(NodeKind::ParenGroup).is_some());
    }

    #[test]
    fn dangling_operator_keeps_left_operand() {
        let parsed = parse("1 + 2 *");
        let root = parsed.ast.at(parsed.statements[0]);
        assert_eq!(root.value(), Some("+"));
        let times = root.children().nth(1).expect("dangling operator");
        assert_eq!(times.value(), Some("*"));
        assert_eq!(times.children().count(), 1);
    }

    #[test]
    fn function_arguments_tolerate_keywords() {
        let parsed = parse("CAST(x AS UNSIGNED)");
        let root = parsed.ast.at(parsed.statements[0]);
        assert_eq!(root.kind(), NodeKind::Function);
        let values: Vec<_> = root.children().filter_map(|n| n.value()).collect();
        assert_eq!(values, vec!["x", "AS", "UNSIGNED"]);
    }

    #[test]
    fn count_star_and_distinct() {
        let parsed = parse("COUNT(DISTINCT a), COUNT(*)");
        let root = parsed.ast.at(parsed.statements[0]);
        let values: Vec<_> = root.children().filter_map(|n| n.value()).collect();
        assert_eq!(values, vec!["DISTINCT", "a"]);
    }

    #[test]
    fn interval_with_and_without_unit() {
        let parsed = parse("d + INTERVAL 1 DAY");
        let root = parsed.ast.at(parsed.statements[0]);
        let interval = root.child(NodeKind::Interval).expect("interval operand");
        assert_eq!(interval.child(NodeKind::Keyword).and_then(|k| k.value()), Some("DAY"));

        let parsed = parse("INTERVAL(5, 1, 10)");
        let root = parsed.ast.at(parsed.statements[0]);
        assert_eq!(root.kind(), NodeKind::Function);
        assert_eq!(root.children().count(), 3);
    }

    #[test]
    fn case_branches() {
        let parsed = parse("CASE WHEN a THEN 1 ELSE 2 END");
        let root = parsed.ast.at(parsed.statements[0]);
        let kinds: Vec<_> = root.children().map(|n| n.kind()).collect();
        assert_eq!(kinds, vec![NodeKind::When, NodeKind::Then, NodeKind::Else]);
    }

    #[test]
    fn match_against_modifiers() {
        let parsed = parse("MATCH (title, body) AGAINST ('x' IN NATURAL LANGUAGE MODE)");
        let root = parsed.ast.at(parsed.statements[0]);
        assert_eq!(root.children().filter(|n| n.kind() == NodeKind::Identifier).count(), 2);
        let modifier = root
            .child(NodeKind::Against)
            .and_then(|a| a.child(NodeKind::Modifier))
            .expect("modifier node");
        let words: Vec<_> = modifier.children().filter_map(|n| n.value()).collect();
        assert_eq!(words, vec!["IN", "NATURAL", "LANGUAGE", "MODE"]);
    }

    #[test]
    fn quantified_subquery_comparison() {
        let parsed = parse("a > ALL (SELECT b FROM t)");
        let root = parsed.ast.at(parsed.statements[0]);
        let all = root.children().nth(1).expect("right operand");
        assert_eq!(all.value(), Some("ALL"));
        assert!(all.child(NodeKind::Subquery).is_some());
    }

    #[test]
    fn partial_in_keeps_the_operator() {
        let parsed = parse("SELECT * FROM t WHERE a IN ");
        let filter = parsed
            .ast
            .at(parsed.statements[0])
            .child(NodeKind::Where)
            .expect("where");
        let op = filter.children().next().expect("in operator");
        assert_eq!((op.kind(), op.value()), (NodeKind::Operator, Some("IN")));
        assert_eq!(op.children().filter_map(|n| n.value()).collect::<Vec<_>>(), vec!["a"]);
        assert_eq!(parsed.last, Some(op.id()));

        let position = parse("POSITION(a IN b)");
        let root = position.ast.at(position.statements[0]);
        assert_eq!(root.kind(), NodeKind::Function);
    }

    #[rstest::rstest]
    #[case(format!("SELECT {}1{}", "(".repeat(5000), ")".repeat(5000)))]
    #[case(format!("SELECT {}1", "- ".repeat(5000)))]
    #[case(format!("SELECT {}a", "NOT ".repeat(5000)))]
    #[case(format!("SELECT * FROM {}t{}", "(".repeat(5000), ")".repeat(5000)))]
    #[case("SELECT * FROM (".repeat(5000))]
    #[case("SELECT 1 UNION ".repeat(5000))]
    fn deep_nesting_is_cut_off(#[case] sql: String) {
        let parsed = parse(&sql);
        let root = parsed.ast.at(parsed.statements[0]);
        assert_eq!(root.kind(), NodeKind::Select);
        assert!(parsed.last.is_some());
    }

    #[test]
    fn is_not_null_and_truth_tests() {
        let parsed = parse("a IS NOT NULL AND b IS TRUE");
        let root = parsed.ast.at(parsed.statements[0]);
        let values: Vec<_> = root.children().filter_map(|n| n.value()).collect();
        assert_eq!(values, vec!["IS NOT", "IS"]);
    }
}
