use crate::sql::ast::{Ast, NodeId, NodeKind};

/// What kind of name the cursor is expecting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ContextTag {
    #[display("column")]
    Column,
    #[display("table")]
    Table,
    #[display("where")]
    Where,
    #[display("having")]
    Having,
    #[display("order")]
    Order,
    #[display("group")]
    Group,
    #[display("index_hint")]
    IndexHint,
    #[display("select_modifier")]
    SelectModifier,
    #[display("charset")]
    Charset,
    #[display("variable")]
    Variable,
}

impl ContextTag {
    /// Contexts where any expression may be typed, so columns and functions apply.
    pub fn is_expression(self) -> bool {
        matches!(
            self,
            Self::Column | Self::Where | Self::Having | Self::Order | Self::Group
        )
    }
}

/// Walk up from `from` to the first node that names a context.
///
/// Which node kinds count depends on the statement the node belongs to, so the
/// walk tracks the nearest enclosing statement at every step.
pub fn detect_context(ast: &Ast, from: NodeId) -> Option<ContextTag> {
    std::iter::once(from).chain(ast.ancestors(from)).find_map(|id| {
        let statement = enclosing_statement(ast, id)?;
        let parent = ast.parent(id).map(|p| ast[p].kind);
        tag(statement, ast[id].kind, parent)
    })
}

fn enclosing_statement(ast: &Ast, id: NodeId) -> Option<NodeKind> {
    std::iter::once(id)
        .chain(ast.ancestors(id))
        .map(|a| ast[a].kind)
        .find(|kind| kind.is_statement())
}

fn tag(statement: NodeKind, kind: NodeKind, parent: Option<NodeKind>) -> Option<ContextTag> {
    use NodeKind as K;
    if let Some(tag) = common_tag(kind) {
        return Some(tag);
    }
    match statement {
        K::Select => match kind {
            K::Column | K::Columns => Some(ContextTag::Column),
            K::TableReference | K::TableReferences | K::From => Some(ContextTag::Table),
            K::Modifier if parent == Some(K::Select) => Some(ContextTag::SelectModifier),
            K::Variables => Some(ContextTag::Variable),
            _ => None,
        },
        K::Update => match kind {
            K::TableReference | K::TableReferences => Some(ContextTag::Table),
            K::AssignmentList => Some(ContextTag::Column),
            _ => None,
        },
        K::Delete => match kind {
            K::TableReference | K::TableReferences | K::From | K::Using => {
                Some(ContextTag::Table)
            }
            _ => None,
        },
        K::Insert | K::Replace => match kind {
            K::Into | K::TableReference => Some(ContextTag::Table),
            K::Columns | K::AssignmentList => Some(ContextTag::Column),
            _ => None,
        },
        K::Set if kind == K::Set => Some(ContextTag::Variable),
        _ => None,
    }
}

/// Kinds that mean the same thing in every statement.
fn common_tag(kind: NodeKind) -> Option<ContextTag> {
    use NodeKind as K;
    match kind {
        K::Where | K::JoinSpec => Some(ContextTag::Where),
        K::Having => Some(ContextTag::Having),
        K::Order => Some(ContextTag::Order),
        K::Group => Some(ContextTag::Group),
        K::IndexHint => Some(ContextTag::IndexHint),
        K::Variable => Some(ContextTag::Variable),
        K::Charset => Some(ContextTag::Charset),
        _ => None,
    }
}
