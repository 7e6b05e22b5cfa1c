//! Template arguments, template names and template parameter lists.

use crate::{DeclId, ExprId, Span, TypeId};

/// A reference to a template in type position (`Tmpl` in `Tmpl<int>`).
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum TemplateName {
    /// A named template, possibly a template template parameter.
    Decl(DeclId),
    /// A template template parameter pack already substituted with its
    /// argument pack but not yet expanded.
    SubstPack {
        param: DeclId,
        pack: Vec<TemplateArgument>,
    },
}

/// A template argument.
///
/// `Null` is the unbound state in an argument table. `Pack` is an argument
/// pack; its elements may themselves be pack expansions whose length is not
/// known yet.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum TemplateArgument {
    #[default]
    Null,
    Type(TypeId),
    Expr(ExprId),
    Template(TemplateName),
    /// `Tmpl...` where `Tmpl` names a template template parameter pack.
    TemplateExpansion {
        template: TemplateName,
        ellipsis: Span,
        num_expansions: Option<u32>,
    },
    Integral(i64),
    Pack(Vec<TemplateArgument>),
}

impl TemplateArgument {
    /// Whether this argument is unbound.
    pub const fn is_null(&self) -> bool {
        matches!(self, TemplateArgument::Null)
    }

    /// Elements of an argument pack; a non-pack argument is its own
    /// single element.
    pub fn pack_elements(&self) -> &[TemplateArgument] {
        match self {
            TemplateArgument::Pack(elements) => elements,
            other => std::slice::from_ref(other),
        }
    }
}

/// A template parameter list: `template<typename T, int... Ns>`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct TemplateParamList {
    /// Nesting depth of the template that owns this list.
    pub depth: u32,
    pub params: Vec<DeclId>,
    pub span: Span,
}
