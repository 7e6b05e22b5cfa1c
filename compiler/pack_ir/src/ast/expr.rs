//! Expression nodes.

use super::operators::BinaryOp;
use super::decl::Attr;
use super::template::TemplateArgument;
use crate::{DeclId, ExprId, NodeFlags, Span, Spanned, StmtId, TypeId};

/// Expression node.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
    pub flags: NodeFlags,
}

impl Spanned for Expr {
    fn span(&self) -> Span {
        self.span
    }
}

/// Expression kinds.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum ExprKind {
    IntLiteral(i64),
    BoolLiteral(bool),
    /// A name referring to a declaration.
    DeclRef(DeclId),
    Binary {
        op: BinaryOp,
        lhs: ExprId,
        rhs: ExprId,
    },
    /// An infix operator resolved to an overloaded `operator@` call.
    OperatorCall {
        op: BinaryOp,
        lhs: ExprId,
        rhs: ExprId,
    },
    Conditional {
        cond: ExprId,
        then_expr: ExprId,
        else_expr: ExprId,
    },
    Call {
        callee: ExprId,
        args: Vec<ExprId>,
    },
    Paren(ExprId),
    ImplicitCast(ExprId),
    /// `T(args...)` / `T{args...}`
    Construct {
        ty: TypeId,
        args: Vec<ExprId>,
    },
    /// `pattern...`
    PackExpansion {
        pattern: ExprId,
        ellipsis: Span,
        num_expansions: Option<u32>,
    },
    Fold(FoldExpr),
    /// `pack...[index]`
    PackIndexing(PackIndexing),
    /// `sizeof...(pack)`
    SizeOfPack {
        pack: DeclId,
        name_span: Span,
    },
    /// A non-type template parameter pack replaced by its argument pack but
    /// not yet expanded.
    SubstNonTypeTemplateParmPack {
        param: DeclId,
        pack: Vec<TemplateArgument>,
    },
    /// A function parameter pack (or binding pack) resolved to its list of
    /// instantiated declarations but not yet expanded.
    FunctionParmPack {
        param: DeclId,
        expansions: Vec<DeclId>,
    },
    Lambda(Lambda),
    Block(BlockLiteral),
    /// `@{ key : value, ... }`
    DictionaryLiteral(Vec<DictionaryElement>),
    /// GNU statement expression `({ ... })`.
    StmtExpr(StmtId),
    /// `requires (params) { requirements }`
    Requires {
        params: Vec<DeclId>,
        requirements: Vec<ExprId>,
    },
    /// `T()` value-initialization, `void()` in particular.
    ScalarValueInit(TypeId),
    /// Error recovery placeholder.
    Recovery,
}

/// `( lhs op ... op rhs )`; a unary fold has exactly one operand.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct FoldExpr {
    pub lhs: Option<ExprId>,
    pub op: BinaryOp,
    pub rhs: Option<ExprId>,
    pub lparen: Span,
    pub ellipsis: Span,
    pub rparen: Span,
    pub num_expansions: Option<u32>,
}

impl FoldExpr {
    /// Whether this is a right fold `(pack op ...)` or `(pack op ... op init)`.
    pub fn is_right_fold(&self, ast: &crate::AstContext) -> bool {
        self.lhs
            .is_some_and(|lhs| ast.expr(lhs).flags.contains_unexpanded_pack())
    }

    /// The pattern of the fold: whichever operand contains the pack.
    pub fn pattern(&self, ast: &crate::AstContext) -> Option<ExprId> {
        if self.is_right_fold(ast) {
            self.lhs
        } else {
            self.rhs
        }
    }
}

/// `pack...[index]`
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct PackIndexing {
    pub pack: ExprId,
    pub index: ExprId,
    pub ellipsis: Span,
    pub rsquare: Span,
    /// Constant value of `index` once it is known.
    pub resolved_index: Option<i64>,
    /// Elements of the pack after substitution.
    pub expansions: Vec<ExprId>,
    pub fully_substituted: bool,
}

/// One capture of a lambda.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct LambdaCapture {
    /// The captured variable. For an init-capture `x = init` this is the
    /// capture's own variable, which holds the initializer.
    pub var: DeclId,
    /// Set for `args...` and `...xs = init` captures.
    pub ellipsis: Option<Span>,
    pub span: Span,
}

impl LambdaCapture {
    pub const fn is_pack_expansion(&self) -> bool {
        self.ellipsis.is_some()
    }
}

/// `[captures] <template-params> (params) attrs -> result { body }`
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Lambda {
    pub captures: Vec<LambdaCapture>,
    /// The call operator. A generic lambda's template parameter list is
    /// the call operator's.
    pub call_operator: DeclId,
    pub attrs: Vec<Attr>,
    /// Whether the body references a pack declared outside the lambda.
    /// Set by semantic analysis, not derivable from the children.
    pub contains_unexpanded_pack: bool,
}

/// `^(params) { body }`
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct BlockLiteral {
    pub params: Vec<DeclId>,
    pub body: StmtId,
    pub contains_unexpanded_pack: bool,
}

/// `key : value` or `key : value ...` in a dictionary literal.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct DictionaryElement {
    pub key: ExprId,
    pub value: ExprId,
    pub ellipsis: Option<Span>,
}

impl DictionaryElement {
    pub const fn is_pack_expansion(&self) -> bool {
        self.ellipsis.is_some()
    }
}
