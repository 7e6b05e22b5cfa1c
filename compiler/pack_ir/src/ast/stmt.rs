//! Statement nodes.

use crate::{DeclId, ExprId, NodeFlags, Span, Spanned, StmtId};

/// A statement.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
    pub flags: NodeFlags,
}

impl Spanned for Stmt {
    fn span(&self) -> Span {
        self.span
    }
}

/// Statement kinds.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum StmtKind {
    Compound(Vec<StmtId>),
    Expr(ExprId),
    Decl(Vec<DeclId>),
    Return(Option<ExprId>),
    Null,
}
