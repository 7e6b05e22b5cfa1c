//! Declaration nodes.

use super::template::TemplateParamList;
use super::types::TypeParamType;
use crate::{DeclId, ExprId, Name, Span, Spanned, StmtId, TypeId};

/// A declaration.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Decl {
    /// `Name::EMPTY` for anonymous declarations.
    pub name: Name,
    pub span: Span,
    pub kind: DeclKind,
    pub attrs: Vec<Attr>,
    /// The declaration this one is nested in (for a parameter, its function).
    pub context: Option<DeclId>,
}

impl Spanned for Decl {
    fn span(&self) -> Span {
        self.span
    }
}

/// Declaration kinds.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum DeclKind {
    TemplateTypeParm {
        param: TypeParamType,
        default: Option<TypeId>,
    },
    NonTypeTemplateParm {
        depth: u32,
        index: u32,
        is_pack: bool,
        ty: TypeId,
    },
    TemplateTemplateParm {
        depth: u32,
        index: u32,
        is_pack: bool,
    },
    /// Variable or function parameter.
    Var {
        ty: TypeId,
        init: Option<ExprId>,
        is_pack: bool,
        /// Introduced by a lambda init-capture.
        is_init_capture: bool,
    },
    /// A structured binding; `auto [...xs] = t` introduces a binding pack.
    Binding {
        binding: Option<ExprId>,
        is_pack: bool,
    },
    Function {
        template_params: Option<TemplateParamList>,
        params: Vec<DeclId>,
        result: Option<TypeId>,
        ctor_inits: Vec<CtorInitializer>,
        body: Option<StmtId>,
    },
    Record {
        bases: Vec<BaseSpecifier>,
        members: Vec<DeclId>,
    },
    /// `using Qualifier::name;` in a dependent context.
    UnresolvedUsingValue {
        qualifier: TypeId,
        ellipsis: Option<Span>,
    },
    /// `using typename Qualifier::name;`
    UnresolvedUsingTypename {
        qualifier: TypeId,
        ellipsis: Option<Span>,
    },
}

impl Decl {
    /// Whether this declaration declares a parameter pack of any kind.
    pub fn is_parameter_pack(&self) -> bool {
        match &self.kind {
            DeclKind::TemplateTypeParm { param, .. } => param.is_pack,
            DeclKind::NonTypeTemplateParm { is_pack, .. }
            | DeclKind::TemplateTemplateParm { is_pack, .. }
            | DeclKind::Var { is_pack, .. }
            | DeclKind::Binding { is_pack, .. } => *is_pack,
            DeclKind::Function { .. }
            | DeclKind::Record { .. }
            | DeclKind::UnresolvedUsingValue { .. }
            | DeclKind::UnresolvedUsingTypename { .. } => false,
        }
    }

    /// Whether this is a template parameter pack.
    pub fn is_template_parameter_pack(&self) -> bool {
        self.is_parameter_pack() && self.depth_and_index().is_some()
    }

    /// `(depth, index)` of a template parameter.
    pub fn depth_and_index(&self) -> Option<(u32, u32)> {
        match &self.kind {
            DeclKind::TemplateTypeParm { param, .. } => Some((param.depth, param.index)),
            DeclKind::NonTypeTemplateParm { depth, index, .. }
            | DeclKind::TemplateTemplateParm { depth, index, .. } => Some((*depth, *index)),
            _ => None,
        }
    }

    /// Template parameter list of a function template.
    pub fn template_params(&self) -> Option<&TemplateParamList> {
        match &self.kind {
            DeclKind::Function {
                template_params, ..
            } => template_params.as_ref(),
            _ => None,
        }
    }

    /// Whether the using-declaration is a pack expansion (`using Bases::f...;`).
    pub fn is_using_pack_expansion(&self) -> bool {
        matches!(
            self.kind,
            DeclKind::UnresolvedUsingValue {
                ellipsis: Some(_),
                ..
            } | DeclKind::UnresolvedUsingTypename {
                ellipsis: Some(_),
                ..
            }
        )
    }
}

/// `[[name(args)]]`, possibly `[[name(args)...]]`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Attr {
    pub name: Name,
    pub args: Vec<ExprId>,
    pub ellipsis: Option<Span>,
    pub span: Span,
}

impl Attr {
    pub const fn is_pack_expansion(&self) -> bool {
        self.ellipsis.is_some()
    }
}

/// `public Base<T>` or `public Bases...` in a class head.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct BaseSpecifier {
    pub ty: TypeId,
    pub ellipsis: Option<Span>,
    pub span: Span,
}

impl BaseSpecifier {
    pub const fn is_pack_expansion(&self) -> bool {
        self.ellipsis.is_some()
    }
}

/// `member(args)` in a constructor's member-initializer list.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct CtorInitializer {
    /// Either a member or a base; a base initializer names its type.
    pub member: Name,
    pub base: Option<TypeId>,
    pub args: Vec<ExprId>,
    pub ellipsis: Option<Span>,
    pub span: Span,
}

impl CtorInitializer {
    pub const fn is_pack_expansion(&self) -> bool {
        self.ellipsis.is_some()
    }
}
