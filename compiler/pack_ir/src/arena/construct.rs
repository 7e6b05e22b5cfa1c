//! Construction helpers for the [`AstContext`].
//!
//! Shorthands for the nodes tests and semantic analysis build most often.
//! Anything more unusual goes through `alloc_*` directly.

use super::AstContext;
use crate::ast::{
    BinaryOp, BuiltinType, Decl, DeclKind, ExprKind, StmtKind, TemplateArgument, TemplateName,
    TemplateParamList, TypeKind, TypeParamType,
};
use crate::{DeclId, ExprId, Span, StmtId, TypeId};

impl AstContext {
    // === Declarations ===

    /// Declare a template type parameter `typename Name` or `typename... Name`.
    pub fn template_type_parm(
        &mut self,
        name: &str,
        depth: u32,
        index: u32,
        is_pack: bool,
        span: Span,
    ) -> DeclId {
        let name = self.intern(name);
        self.alloc_decl(Decl {
            name,
            span,
            kind: DeclKind::TemplateTypeParm {
                param: TypeParamType {
                    depth,
                    index,
                    is_pack,
                    name,
                },
                default: None,
            },
            attrs: Vec::new(),
            context: None,
        })
    }

    /// Declare a non-type template parameter `int Name` or `int... Name`.
    pub fn non_type_template_parm(
        &mut self,
        name: &str,
        depth: u32,
        index: u32,
        is_pack: bool,
        span: Span,
    ) -> DeclId {
        let ty = self.builtin(BuiltinType::Int);
        let name = self.intern(name);
        self.alloc_decl(Decl {
            name,
            span,
            kind: DeclKind::NonTypeTemplateParm {
                depth,
                index,
                is_pack,
                ty,
            },
            attrs: Vec::new(),
            context: None,
        })
    }

    /// Declare a template template parameter.
    pub fn template_template_parm(
        &mut self,
        name: &str,
        depth: u32,
        index: u32,
        is_pack: bool,
        span: Span,
    ) -> DeclId {
        let name = self.intern(name);
        self.alloc_decl(Decl {
            name,
            span,
            kind: DeclKind::TemplateTemplateParm {
                depth,
                index,
                is_pack,
            },
            attrs: Vec::new(),
            context: None,
        })
    }

    /// Declare a variable or parameter of type `ty`.
    pub fn var(&mut self, name: &str, ty: TypeId, is_pack: bool, span: Span) -> DeclId {
        let name = self.intern(name);
        self.alloc_decl(Decl {
            name,
            span,
            kind: DeclKind::Var {
                ty,
                init: None,
                is_pack,
                is_init_capture: false,
            },
            attrs: Vec::new(),
            context: None,
        })
    }

    /// Declare a structured binding.
    pub fn binding(&mut self, name: &str, is_pack: bool, span: Span) -> DeclId {
        let name = self.intern(name);
        self.alloc_decl(Decl {
            name,
            span,
            kind: DeclKind::Binding {
                binding: None,
                is_pack,
            },
            attrs: Vec::new(),
            context: None,
        })
    }

    /// Declare a function (template when `template_params` is given) and
    /// make it the context of its parameters.
    pub fn function(
        &mut self,
        name: &str,
        template_params: Option<TemplateParamList>,
        params: Vec<DeclId>,
        body: Option<StmtId>,
        span: Span,
    ) -> DeclId {
        let name = self.intern(name);
        let id = self.alloc_decl(Decl {
            name,
            span,
            kind: DeclKind::Function {
                template_params,
                params: params.clone(),
                result: None,
                ctor_inits: Vec::new(),
                body,
            },
            attrs: Vec::new(),
            context: None,
        });
        for param in params {
            self.decl_mut(param).context = Some(id);
        }
        id
    }

    // === Types ===

    /// A synthesized builtin type.
    pub fn builtin(&mut self, builtin: BuiltinType) -> TypeId {
        self.alloc_type(TypeKind::Builtin(builtin), None)
    }

    /// A written occurrence of a template type parameter.
    ///
    /// # Panics
    /// Panics if `param` is not a template type parameter.
    pub fn type_param_ref(&mut self, param: DeclId, span: Option<Span>) -> TypeId {
        let DeclKind::TemplateTypeParm { param, .. } = self.decl(param).kind else {
            panic!("type_param_ref on a declaration that is not a template type parameter")
        };
        self.alloc_type(TypeKind::TemplateTypeParm(param), span)
    }

    /// `pattern...` as a type.
    pub fn pack_expansion_type(
        &mut self,
        pattern: TypeId,
        ellipsis: Span,
        num_expansions: Option<u32>,
    ) -> TypeId {
        let span = self.ty(pattern).span.map(|s| s.merge(ellipsis));
        self.alloc_type(
            TypeKind::PackExpansion {
                pattern,
                ellipsis,
                num_expansions,
            },
            span,
        )
    }

    /// `Tmpl<args...>` naming a class template or template template parameter.
    pub fn specialization(
        &mut self,
        template: DeclId,
        args: Vec<TemplateArgument>,
        span: Option<Span>,
    ) -> TypeId {
        self.alloc_type(
            TypeKind::Specialization {
                template: TemplateName::Decl(template),
                args,
            },
            span,
        )
    }

    // === Expressions ===

    pub fn int_lit(&mut self, value: i64, span: Span) -> ExprId {
        self.alloc_expr(ExprKind::IntLiteral(value), span)
    }

    pub fn bool_lit(&mut self, value: bool, span: Span) -> ExprId {
        self.alloc_expr(ExprKind::BoolLiteral(value), span)
    }

    pub fn decl_ref(&mut self, decl: DeclId, span: Span) -> ExprId {
        self.alloc_expr(ExprKind::DeclRef(decl), span)
    }

    /// `lhs op rhs`, spanning both operands.
    pub fn binary(&mut self, op: BinaryOp, lhs: ExprId, rhs: ExprId) -> ExprId {
        let span = self.expr(lhs).span.merge(self.expr(rhs).span);
        self.alloc_expr(ExprKind::Binary { op, lhs, rhs }, span)
    }

    pub fn paren(&mut self, inner: ExprId, span: Span) -> ExprId {
        self.alloc_expr(ExprKind::Paren(inner), span)
    }

    pub fn call(&mut self, callee: ExprId, args: Vec<ExprId>, span: Span) -> ExprId {
        self.alloc_expr(ExprKind::Call { callee, args }, span)
    }

    /// `pattern...` as an expression.
    pub fn pack_expansion_expr(
        &mut self,
        pattern: ExprId,
        ellipsis: Span,
        num_expansions: Option<u32>,
    ) -> ExprId {
        let span = self.expr(pattern).span.merge(ellipsis);
        self.alloc_expr(
            ExprKind::PackExpansion {
                pattern,
                ellipsis,
                num_expansions,
            },
            span,
        )
    }

    // === Statements ===

    pub fn expr_stmt(&mut self, expr: ExprId) -> StmtId {
        let span = self.expr(expr).span;
        self.alloc_stmt(StmtKind::Expr(expr), span)
    }

    pub fn compound(&mut self, stmts: Vec<StmtId>, span: Span) -> StmtId {
        self.alloc_stmt(StmtKind::Compound(stmts), span)
    }
}
