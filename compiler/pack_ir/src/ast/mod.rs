//! Syntax nodes.
//!
//! Nodes never own their children: every child is an arena id into the
//! [`AstContext`](crate::AstContext), which computes each node's dependence
//! flags when it is allocated.

mod decl;
mod expr;
mod operators;
mod stmt;
mod template;
mod types;

pub use decl::{Attr, BaseSpecifier, CtorInitializer, Decl, DeclKind};
pub use expr::{
    BlockLiteral, DictionaryElement, Expr, ExprKind, FoldExpr, Lambda, LambdaCapture,
    PackIndexing,
};
pub use operators::BinaryOp;
pub use stmt::{Stmt, StmtKind};
pub use template::{TemplateArgument, TemplateName, TemplateParamList};
pub use types::{BuiltinType, Type, TypeKind, TypeParamType};
