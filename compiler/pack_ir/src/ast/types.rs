//! Type nodes.
//!
//! A type node is *located* when it carries a span (it was written in the
//! source); synthesized types have no span. The pack collector records a
//! type-parameter-pack occurrence with a location only when it reaches it
//! through a located node.

use super::template::{TemplateArgument, TemplateName};
use crate::{DeclId, ExprId, Name, NodeFlags, Span, TypeId};

/// Builtin scalar types.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BuiltinType {
    Void,
    Bool,
    Char,
    Int,
    Long,
    Float,
    Double,
}

/// The canonical identity of a template type parameter.
///
/// Two occurrences of `T` denote the same parameter exactly when their
/// `TypeParamType`s are equal; where the occurrence was written plays no
/// part.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct TypeParamType {
    pub depth: u32,
    pub index: u32,
    pub is_pack: bool,
    pub name: Name,
}

/// Type node kinds.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum TypeKind {
    Builtin(BuiltinType),
    /// An occurrence of a template type parameter.
    TemplateTypeParm(TypeParamType),
    Pointer(TypeId),
    LValueReference(TypeId),
    RValueReference(TypeId),
    Array {
        element: TypeId,
        bound: Option<ExprId>,
    },
    Function {
        params: Vec<TypeId>,
        result: TypeId,
    },
    /// `Tmpl<Args...>`
    Specialization {
        template: TemplateName,
        args: Vec<TemplateArgument>,
    },
    Record(DeclId),
    /// `Pattern...`, with the repeat count once it is known.
    PackExpansion {
        pattern: TypeId,
        ellipsis: Span,
        num_expansions: Option<u32>,
    },
    /// `Pattern...[Index]`
    PackIndexing {
        pattern: TypeId,
        index: ExprId,
    },
    Decltype(ExprId),
    /// `auto`; `deduced` stays `None` until deduction runs.
    Deduced {
        deduced: Option<TypeId>,
    },
    /// A type parameter pack replaced by its argument pack but not yet
    /// expanded.
    SubstTemplateTypeParmPack {
        param: TypeParamType,
        pack: Vec<TemplateArgument>,
    },
    Error,
}

/// Type node.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Type {
    pub kind: TypeKind,
    pub span: Option<Span>,
    pub flags: NodeFlags,
}

impl Type {
    /// Whether this node was written in the source.
    pub const fn is_located(&self) -> bool {
        self.span.is_some()
    }
}
