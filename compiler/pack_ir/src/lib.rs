//! Pack IR - syntax model for variadic template analysis
//!
//! This crate contains the data structures the pack analysis runs over:
//! - Spans for source locations
//! - Names for interned identifiers
//! - Types, expressions, declarations and statements in one arena
//! - Template arguments, including argument packs
//! - Dependence flags cached on every node
//! - A visitor framework for traversals
//!
//! # Design Philosophy
//!
//! - **Intern Everything**: identifiers are `Name(u32)`
//! - **Flatten Everything**: no `Box<Expr>`; children are `ExprId`/`TypeId`/
//!   `DeclId`/`StmtId` indices into [`AstContext`]
//! - **Compute Once**: [`NodeFlags`] are derived bottom-up at allocation and
//!   read in O(1) afterwards

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-allocated types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod arena;
pub mod ast;
mod flags;
mod ids;
mod interner;
mod name;
mod span;
pub mod stack;
pub mod visitor;

pub use arena::{ArenaError, AstContext};
pub use ast::{
    Attr, BaseSpecifier, BinaryOp, BlockLiteral, BuiltinType, CtorInitializer, Decl, DeclKind,
    DictionaryElement, Expr, ExprKind, FoldExpr, Lambda, LambdaCapture, PackIndexing, Stmt,
    StmtKind, TemplateArgument, TemplateName, TemplateParamList, Type, TypeKind, TypeParamType,
};
pub use flags::NodeFlags;
pub use ids::{DeclId, ExprId, StmtId, TypeId};
pub use interner::{InternError, StringInterner};
pub use name::Name;
pub use span::{Span, Spanned};
pub use visitor::Visitor;
