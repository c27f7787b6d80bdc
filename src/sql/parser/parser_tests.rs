use crate::sql::{
    ast::{NodeKind, NodeRef},
    parser::{ParseOptions, Parser, parse},
    token_kind::{LiteralClass, TokenKind},
    tokenizer::tokenize,
};
use rstest::rstest;

fn root(parsed: &crate::sql::parser::Parsed) -> NodeRef<'_> {
    parsed.ast.at(parsed.statements[0])
}

fn child_kinds(node: NodeRef<'_>) -> Vec<NodeKind> {
    node.children().map(|c| c.kind()).collect()
}

#[rstest]
#[case("SELECT a, b + 1 AS c FROM t1 JOIN t2 USING (id) WHERE a > 2 ORDER BY c LIMIT 3")]
#[case("UPDATE t SET a = a * 2 WHERE id IN (1, 2, 3)")]
#[case("INSERT INTO t (a) VALUES (1), (2) ON DUPLICATE KEY UPDATE a = VALUES(a)")]
#[case("SELECT col1, col2 FROM ")]
#[case("SET @a := 1; DO @a; CALL p(@a)")]
fn parsing_is_idempotent(#[case] sql: &str) {
    assert_eq!(parse(sql), parse(sql));
}

#[rstest]
#[case("SELECT  a /* c */ , `b``q` FROM t -- tail\nWHERE x = 'it''s'")]
#[case("select@@global.x,?,0x1F,b'01',.5e-3 # hash\n")]
#[case("SELECT 'unterminated")]
#[case("  \t\n")]
fn tokens_reproduce_the_input(#[case] sql: &str) {
    let joined: String = tokenize(sql).iter().map(|t| t.text).collect();
    assert_eq!(joined, sql);
}

#[test]
fn multiplication_binds_tighter_than_addition() {
    let parsed = parse("1 + 2 * 3");
    assert_eq!(
        parsed.render(),
        "operator \"+\"\n  literal \"1\"\n  operator \"*\"\n    literal \"2\"\n    literal \"3\"\n"
    );
}

#[test]
fn parentheses_group_first() {
    let parsed = parse("(1 + 2) * 3");
    let top = root(&parsed);
    assert_eq!(top.value(), Some("*"));
    assert_eq!(child_kinds(top), vec![NodeKind::ParenGroup, NodeKind::Literal]);
}

#[test]
fn subtraction_is_left_associative() {
    let parsed = parse("1 - 2 - 3");
    assert_eq!(
        parsed.render(),
        "operator \"-\"\n  operator \"-\"\n    literal \"1\"\n    literal \"2\"\n  literal \"3\"\n"
    );
}

#[test]
fn select_dispatch() {
    let parsed = parse("SELECT col FROM t");
    let select = root(&parsed);
    assert_eq!(select.kind(), NodeKind::Select);
    assert_eq!(child_kinds(select), vec![NodeKind::Columns, NodeKind::From]);
}

#[test]
fn update_dispatch() {
    let parsed = parse("UPDATE t SET a=1 WHERE id=2");
    let update = root(&parsed);
    assert_eq!(update.kind(), NodeKind::Update);
    for kind in [
        NodeKind::TableReferences,
        NodeKind::AssignmentList,
        NodeKind::Where,
    ] {
        assert!(update.child(kind).is_some(), "missing {kind}");
    }
}

#[test]
fn left_join_shape() {
    let parsed = parse("SELECT * FROM t1 LEFT JOIN t2 t ON t1.a = t.id");
    let from = root(&parsed).child(NodeKind::From).expect("from");
    assert_eq!(from.children().count(), 1);
    let reference = from.child(NodeKind::TableReference).expect("t1");
    assert_eq!(reference.value(), Some("t1"));

    let dir = reference.child(NodeKind::JoinDir).expect("join_dir");
    assert_eq!(dir.value(), Some("LEFT"));
    let join = dir.child(NodeKind::Join).expect("join");
    let joined = join.child(NodeKind::TableReference).expect("t2");
    assert_eq!(joined.value(), Some("t2"));
    assert_eq!(joined.child(NodeKind::Alias).and_then(|a| a.value()), Some("t"));

    let spec = join.child(NodeKind::JoinSpec).expect("join_spec");
    let condition = spec.children().next().expect("condition");
    assert_eq!(condition.kind(), NodeKind::Operator);
    assert_eq!(condition.value(), Some("="));
}

#[rstest]
#[case("10e", false)]
#[case(".203", true)]
#[case("0b02", false)]
#[case("0x12af", true)]
#[case("1.5E+3", true)]
fn numeric_literals(#[case] text: &str, #[case] is_number: bool) {
    let tokens = tokenize(text);
    let first = tokens[0];
    assert_eq!(first.kind.is_number() && first.text == text, is_number, "{text}: {first:?}");
}

#[test]
fn numeric_literal_classes() {
    let kind = |text: &str| tokenize(text)[0].kind;
    assert_eq!(kind(".203"), TokenKind::Literal(LiteralClass::Dec));
    assert_eq!(kind("0x12af"), TokenKind::Literal(LiteralClass::Hex));
    assert_ne!(kind("0b02"), TokenKind::Literal(LiteralClass::Bit));
    assert_ne!(kind("10e"), TokenKind::Literal(LiteralClass::Dec));
}

#[test]
fn trailing_from_still_yields_columns() {
    let parsed = parse("SELECT col1, col2 FROM ");
    let select = root(&parsed);
    assert_eq!(select.kind(), NodeKind::Select);
    let columns = select.child(NodeKind::Columns).expect("columns");
    assert_eq!(columns.children().count(), 2);
    assert_eq!(parsed.last.map(|id| parsed.ast[id].kind), Some(NodeKind::From));
}

#[rstest]
#[case("SELECT a FROM t WHERE ", NodeKind::Where)]
#[case("SELECT a FROM t JOIN ", NodeKind::Join)]
#[case("SELECT ", NodeKind::Columns)]
#[case("DELETE FROM ", NodeKind::From)]
#[case("SET ", NodeKind::Set)]
#[case("INSERT INTO t (", NodeKind::Columns)]
fn last_node_for_partial_input(#[case] sql: &str, #[case] kind: NodeKind) {
    let parsed = parse(sql);
    assert_eq!(parsed.last.map(|id| parsed.ast[id].kind), Some(kind), "{sql}");
}

#[rstest]
#[case("INSERT INTO t VALUES (1)", NodeKind::Insert)]
#[case("REPLACE INTO t VALUES (1)", NodeKind::Replace)]
#[case("DELETE FROM t", NodeKind::Delete)]
#[case("DO 1", NodeKind::Do)]
#[case("CALL p()", NodeKind::Call)]
#[case("SET @a = 1", NodeKind::Set)]
#[case("a = 1", NodeKind::Operator)]
fn statement_roots(#[case] sql: &str, #[case] kind: NodeKind) {
    assert_eq!(root(&parse(sql)).kind(), kind);
}

#[test]
fn pipes_follow_the_sql_mode() {
    let sql = "a || b";
    let or = parse(sql);
    assert_eq!(root(&or).value(), Some("||"));
    assert!(matches!(root(&or).variant(), crate::sql::ast::Variant::Op(-11)));

    let concat = Parser::new(sql)
        .with_options(ParseOptions {
            pipes_as_concat: true,
        })
        .parse();
    assert!(matches!(
        root(&concat).variant(),
        crate::sql::ast::Variant::Op(crate::sql::ast::CONCAT_PRECEDENCE)
    ));
}

#[test]
fn nested_subquery_statement() {
    let parsed = parse("SELECT a FROM t WHERE a IN (SELECT b FROM u WHERE u.c = t.c)");
    let ids = parsed.ast.descendants(parsed.statements[0]);
    let selects = ids
        .iter()
        .filter(|&&id| parsed.ast[id].kind == NodeKind::Select)
        .count();
    assert_eq!(selects, 2);
    for id in ids.into_iter().skip(1) {
        assert!(parsed.ast.parent(id).is_some());
    }
}

#[test]
fn dangling_qualifier_keeps_the_next_clause() {
    let parsed = parse("SELECT a. FROM actor a");
    let select = root(&parsed);
    let table = parsed
        .ast
        .descendants(select.id())
        .into_iter()
        .map(|id| parsed.ast.at(id))
        .find(|n| n.kind() == NodeKind::TableReference);
    assert_eq!(table.and_then(|t| t.value()), Some("actor"));
    let alias = table.and_then(|t| t.child(NodeKind::Alias));
    assert_eq!(alias.and_then(|a| a.value()), Some("a"));
    assert!(select.child(NodeKind::From).is_some());
}
