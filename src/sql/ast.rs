//! Arena backed parse tree.
//!
//! Nodes live in one `Vec` owned by `Ast` and refer to each other by `NodeId`.
//! Children are owned by exactly one parent; the parent link is a plain index used
//! for upward walks during autocomplete context detection.

use std::fmt;
use std::ops::Index;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Node variant. `Op` carries the binary operator's precedence, larger binds tighter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Statement,
    Expression,
    Op(i8),
    UnaryOp,
}

/// Syntactic role of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    // Statements
    Select,
    Insert,
    Replace,
    Update,
    Delete,
    Do,
    Call,
    Set,
    // Clauses
    Modifier,
    Keyword,
    Columns,
    Column,
    Into,
    Variables,
    Outfile,
    Dumpfile,
    Fields,
    Lines,
    FileOption,
    From,
    Using,
    Where,
    Group,
    Having,
    Order,
    Direction,
    Limit,
    RowCount,
    Offset,
    Procedure,
    Lock,
    Union,
    TableReferences,
    TableReference,
    Partition,
    Alias,
    IndexHint,
    Join,
    JoinDir,
    JoinSpec,
    Subquery,
    AssignmentList,
    Assignment,
    Values,
    Charset,
    Collate,
    // Expressions
    Literal,
    Identifier,
    Variable,
    Placeholder,
    Operator,
    UnaryOperator,
    Function,
    ParenGroup,
    Row,
    Exists,
    Interval,
    Case,
    When,
    Then,
    Else,
    Match,
    Against,
}

impl NodeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Select => "select",
            NodeKind::Insert => "insert",
            NodeKind::Replace => "replace",
            NodeKind::Update => "update",
            NodeKind::Delete => "delete",
            NodeKind::Do => "do",
            NodeKind::Call => "call",
            NodeKind::Set => "set",
            NodeKind::Modifier => "modifier",
            NodeKind::Keyword => "keyword",
            NodeKind::Columns => "columns",
            NodeKind::Column => "column",
            NodeKind::Into => "into",
            NodeKind::Variables => "variables",
            NodeKind::Outfile => "outfile",
            NodeKind::Dumpfile => "dumpfile",
            NodeKind::Fields => "fields",
            NodeKind::Lines => "lines",
            NodeKind::FileOption => "file_option",
            NodeKind::From => "from",
            NodeKind::Using => "using",
            NodeKind::Where => "where",
            NodeKind::Group => "group",
            NodeKind::Having => "having",
            NodeKind::Order => "order",
            NodeKind::Direction => "direction",
            NodeKind::Limit => "limit",
            NodeKind::RowCount => "row_count",
            NodeKind::Offset => "offset",
            NodeKind::Procedure => "procedure",
            NodeKind::Lock => "lock",
            NodeKind::Union => "union",
            NodeKind::TableReferences => "table_references",
            NodeKind::TableReference => "table_reference",
            NodeKind::Partition => "partition",
            NodeKind::Alias => "alias",
            NodeKind::IndexHint => "index_hint",
            NodeKind::Join => "join",
            NodeKind::JoinDir => "join_dir",
            NodeKind::JoinSpec => "join_spec",
            NodeKind::Subquery => "subquery",
            NodeKind::AssignmentList => "assignment_list",
            NodeKind::Assignment => "assignment",
            NodeKind::Values => "values",
            NodeKind::Charset => "charset",
            NodeKind::Collate => "collate",
            NodeKind::Literal => "literal",
            NodeKind::Identifier => "identifier",
            NodeKind::Variable => "variable",
            NodeKind::Placeholder => "placeholder",
            NodeKind::Operator => "operator",
            NodeKind::UnaryOperator => "unary_operator",
            NodeKind::Function => "function",
            NodeKind::ParenGroup => "paren_group",
            NodeKind::Row => "row",
            NodeKind::Exists => "exists",
            NodeKind::Interval => "interval",
            NodeKind::Case => "case",
            NodeKind::When => "when",
            NodeKind::Then => "then",
            NodeKind::Else => "else",
            NodeKind::Match => "match",
            NodeKind::Against => "against",
        }
    }

    pub fn is_statement(self) -> bool {
        matches!(
            self,
            NodeKind::Select
                | NodeKind::Insert
                | NodeKind::Replace
                | NodeKind::Update
                | NodeKind::Delete
                | NodeKind::Do
                | NodeKind::Call
                | NodeKind::Set
        )
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Precedence of a binary operator in an expression, by lowercased operator text.
///
/// Larger binds tighter: `^` is 0 and `:=` is -13.
pub fn precedence(op: &str) -> Option<i8> {
    let rank = match op {
        "^" => 0,
        "*" | "/" | "div" | "%" | "mod" => -1,
        "-" | "+" => -2,
        "<<" | ">>" => -3,
        "&" => -4,
        "|" => -5,
        "=" | "<=>" | ">=" | ">" | "<=" | "<" | "<>" | "!=" | "is" | "like" | "regexp"
        | "rlike" | "in" | "sounds like" | "->" | "->>" => -6,
        "between" | "case" => -7,
        "not" => -8,
        "and" | "&&" => -9,
        "xor" => -10,
        "or" | "||" => -11,
        ":=" => -13,
        _ => return None,
    };
    Some(rank)
}

/// Rank of `=` used as assignment.
pub const ASSIGNMENT_PRECEDENCE: i8 = -12;
/// Rank of `||` under `PIPES_AS_CONCAT`, above every other binary operator.
pub const CONCAT_PRECEDENCE: i8 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    pub variant: Variant,
    pub value: Option<String>,
    /// Byte offset where parsing of this node began.
    pub pos: usize,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ast {
    nodes: Vec<Node>,
}

impl Index<NodeId> for Ast {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }
}

impl Ast {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn new_node(
        &mut self,
        kind: NodeKind,
        variant: Variant,
        value: Option<String>,
        pos: usize,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            variant,
            value,
            pos,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn at(&self, id: NodeId) -> NodeRef<'_> {
        NodeRef { ast: self, id }
    }

    pub fn set_value(&mut self, id: NodeId, value: Option<String>) {
        if let Some(node) = self.nodes.get_mut(id.0) {
            node.value = value;
        }
    }

    /// Append `child` to `parent`'s children. `None` is a no-op.
    ///
    /// A child that already has a parent is moved. A child that is `parent` itself
    /// or one of its ancestors is ignored so the tree never gets a cycle.
    pub fn add_child(&mut self, parent: NodeId, child: impl Into<Option<NodeId>>) {
        let Some(child) = child.into() else {
            return;
        };
        if child == parent || self.ancestors(parent).any(|a| a == child) {
            return;
        }
        if let Some(old) = self.nodes[child.0].parent.take() {
            self.nodes[old.0].children.retain(|&c| c != child);
        }
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn has_children(&self, id: NodeId) -> bool {
        !self.nodes[id.0].children.is_empty()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// First immediate child of `kind`.
    pub fn child(&self, id: NodeId, kind: NodeKind) -> Option<NodeId> {
        self.nodes
            .get(id.0)?
            .children
            .iter()
            .copied()
            .find(|&c| self.nodes[c.0].kind == kind)
    }

    /// Parent, grandparent, ... up to the root. Excludes `id`.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.nodes[id.0].parent, |&p| self.nodes[p.0].parent)
    }

    /// `id` and everything below it, depth first in child order.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.nodes[next.0].children.iter().rev());
        }
        out
    }

    /// Whether operator `prev` binds at least as tightly as `next`.
    ///
    /// A unary operator always wins against a binary one.
    pub fn has_precedence(&self, prev: NodeId, next: NodeId) -> bool {
        match (self.nodes[prev.0].variant, self.nodes[next.0].variant) {
            (Variant::UnaryOp, _) => true,
            (Variant::Op(p), Variant::Op(n)) => p >= n,
            _ => false,
        }
    }

    /// Indented dump of the subtree at `id`, one node per line.
    pub fn render(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.render_into(id, 0, &mut out);
        out
    }

    fn render_into(&self, id: NodeId, depth: usize, out: &mut String) {
        let node = &self.nodes[id.0];
        out.push_str(&"  ".repeat(depth));
        out.push_str(&node.kind.to_string());
        if let Some(value) = &node.value {
            out.push_str(&format!(" {value:?}"));
        }
        out.push('\n');
        for &child in &node.children {
            self.render_into(child, depth + 1, out);
        }
    }
}

/// Borrowed view of one node, for navigating without passing the arena around.
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'a> {
    ast: &'a Ast,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> NodeKind {
        self.ast[self.id].kind
    }

    pub fn value(&self) -> Option<&'a str> {
        self.ast[self.id].value.as_deref()
    }

    pub fn pos(&self) -> usize {
        self.ast[self.id].pos
    }

    pub fn variant(&self) -> Variant {
        self.ast[self.id].variant
    }

    pub fn child(&self, kind: NodeKind) -> Option<NodeRef<'a>> {
        self.ast.child(self.id, kind).map(|id| self.ast.at(id))
    }

    pub fn children(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        let ast = self.ast;
        ast.children(self.id).iter().map(move |&id| ast.at(id))
    }

    pub fn parent(&self) -> Option<NodeRef<'a>> {
        self.ast.parent(self.id).map(|id| self.ast.at(id))
    }

    pub fn has_children(&self) -> bool {
        self.ast.has_children(self.id)
    }
}
