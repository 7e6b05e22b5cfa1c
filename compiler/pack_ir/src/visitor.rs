//! Syntax visitor.
//!
//! Generic traversal over the arena-allocated syntax tree. A single
//! `Visitor` trait carries one hook per node category; each default
//! implementation calls the matching `walk_*` function, which visits the
//! node's children. Override a hook to prune, record, or save and restore
//! state around a subtree, and call `walk_*` to continue into children.
//!
//! The visitor may mutate its own state during traversal. The syntax tree
//! itself is immutable while borrowed.
//!
//! # Example
//!
//! ```text
//! struct CountDeclRefs {
//!     count: usize,
//! }
//!
//! impl<'ast> Visitor<'ast> for CountDeclRefs {
//!     fn visit_decl_ref(&mut self, _decl: DeclId, _span: Span, _ast: &'ast AstContext) {
//!         self.count += 1;
//!     }
//! }
//! ```

use crate::ast::{
    Attr, BaseSpecifier, BlockLiteral, CtorInitializer, DeclKind, DictionaryElement, ExprKind,
    FoldExpr, Lambda, LambdaCapture, PackIndexing, StmtKind, TemplateArgument, TemplateName,
    TypeKind, TypeParamType,
};
use crate::stack::ensure_sufficient_stack;
use crate::{AstContext, DeclId, ExprId, Span, StmtId, TypeId};

/// Syntax visitor.
///
/// Override `visit_*` methods to add behavior at specific nodes; call the
/// `walk_*` functions to continue into children.
pub trait Visitor<'ast> {
    fn visit_stmt(&mut self, id: StmtId, ast: &'ast AstContext) {
        walk_stmt(self, id, ast);
    }

    fn visit_expr(&mut self, id: ExprId, ast: &'ast AstContext) {
        walk_expr(self, id, ast);
    }

    fn visit_type(&mut self, id: TypeId, ast: &'ast AstContext) {
        walk_type(self, id, ast);
    }

    fn visit_decl(&mut self, id: DeclId, ast: &'ast AstContext) {
        walk_decl(self, id, ast);
    }

    /// A name referring to a declaration. Leaf.
    fn visit_decl_ref(&mut self, decl: DeclId, span: Span, ast: &'ast AstContext) {
        let _ = (decl, span, ast);
    }

    /// An occurrence of a template type parameter. `span` is `None` when
    /// the occurrence was synthesized rather than written. Leaf.
    fn visit_template_type_parm(
        &mut self,
        param: TypeParamType,
        span: Option<Span>,
        ast: &'ast AstContext,
    ) {
        let _ = (param, span, ast);
    }

    /// A pack that substitution already replaced by its arguments but that
    /// no expansion has consumed yet. Leaf.
    fn visit_substituted_pack(&mut self, ast: &'ast AstContext) {
        let _ = ast;
    }

    fn visit_template_argument(&mut self, arg: &'ast TemplateArgument, ast: &'ast AstContext) {
        walk_template_argument(self, arg, ast);
    }

    fn visit_template_name(&mut self, name: &'ast TemplateName, ast: &'ast AstContext) {
        walk_template_name(self, name, ast);
    }

    fn visit_attr(&mut self, attr: &'ast Attr, ast: &'ast AstContext) {
        for &arg in &attr.args {
            self.visit_expr(arg, ast);
        }
    }

    fn visit_base_specifier(&mut self, base: &'ast BaseSpecifier, ast: &'ast AstContext) {
        self.visit_type(base.ty, ast);
    }

    fn visit_ctor_initializer(&mut self, init: &'ast CtorInitializer, ast: &'ast AstContext) {
        if let Some(base) = init.base {
            self.visit_type(base, ast);
        }
        for &arg in &init.args {
            self.visit_expr(arg, ast);
        }
    }

    fn visit_lambda(&mut self, lambda: &'ast Lambda, ast: &'ast AstContext) {
        walk_lambda(self, lambda, ast);
    }

    fn visit_lambda_capture(&mut self, capture: &'ast LambdaCapture, ast: &'ast AstContext) {
        walk_lambda_capture(self, capture, ast);
    }

    fn visit_block(&mut self, block: &'ast BlockLiteral, ast: &'ast AstContext) {
        walk_block(self, block, ast);
    }

    fn visit_dictionary_element(
        &mut self,
        element: &'ast DictionaryElement,
        ast: &'ast AstContext,
    ) {
        self.visit_expr(element.key, ast);
        self.visit_expr(element.value, ast);
    }

    /// The pattern of `pattern...` in expression position.
    fn visit_pack_expansion_expr(&mut self, pattern: ExprId, ast: &'ast AstContext) {
        self.visit_expr(pattern, ast);
    }

    /// The pattern of `Pattern...` in type position.
    fn visit_pack_expansion_type(&mut self, pattern: TypeId, ast: &'ast AstContext) {
        self.visit_type(pattern, ast);
    }

    fn visit_fold(&mut self, fold: &'ast FoldExpr, ast: &'ast AstContext) {
        walk_fold(self, fold, ast);
    }

    fn visit_pack_indexing_expr(&mut self, indexing: &'ast PackIndexing, ast: &'ast AstContext) {
        walk_pack_indexing_expr(self, indexing, ast);
    }

    fn visit_pack_indexing_type(&mut self, pattern: TypeId, index: ExprId, ast: &'ast AstContext) {
        self.visit_type(pattern, ast);
        self.visit_expr(index, ast);
    }
}

// Walk Functions

pub fn walk_stmt<'ast, V: Visitor<'ast> + ?Sized>(
    visitor: &mut V,
    id: StmtId,
    ast: &'ast AstContext,
) {
    match &ast.stmt(id).kind {
        StmtKind::Compound(stmts) => {
            for &stmt in stmts {
                visitor.visit_stmt(stmt, ast);
            }
        }
        StmtKind::Expr(expr) | StmtKind::Return(Some(expr)) => visitor.visit_expr(*expr, ast),
        StmtKind::Decl(decls) => {
            for &decl in decls {
                visitor.visit_decl(decl, ast);
            }
        }
        StmtKind::Return(None) | StmtKind::Null => {}
    }
}

pub fn walk_expr<'ast, V: Visitor<'ast> + ?Sized>(
    visitor: &mut V,
    id: ExprId,
    ast: &'ast AstContext,
) {
    ensure_sufficient_stack(|| {
        let expr = ast.expr(id);
        match &expr.kind {
            ExprKind::IntLiteral(_)
            | ExprKind::BoolLiteral(_)
            | ExprKind::SizeOfPack { .. }
            | ExprKind::Recovery => {}
            ExprKind::DeclRef(decl) => visitor.visit_decl_ref(*decl, expr.span, ast),
            ExprKind::Binary { lhs, rhs, .. } | ExprKind::OperatorCall { lhs, rhs, .. } => {
                visitor.visit_expr(*lhs, ast);
                visitor.visit_expr(*rhs, ast);
            }
            ExprKind::Conditional {
                cond,
                then_expr,
                else_expr,
            } => {
                visitor.visit_expr(*cond, ast);
                visitor.visit_expr(*then_expr, ast);
                visitor.visit_expr(*else_expr, ast);
            }
            ExprKind::Call { callee, args } => {
                visitor.visit_expr(*callee, ast);
                for &arg in args {
                    visitor.visit_expr(arg, ast);
                }
            }
            ExprKind::Paren(inner) | ExprKind::ImplicitCast(inner) => {
                visitor.visit_expr(*inner, ast);
            }
            ExprKind::Construct { ty, args } => {
                visitor.visit_type(*ty, ast);
                for &arg in args {
                    visitor.visit_expr(arg, ast);
                }
            }
            ExprKind::PackExpansion { pattern, .. } => {
                visitor.visit_pack_expansion_expr(*pattern, ast);
            }
            ExprKind::Fold(fold) => visitor.visit_fold(fold, ast),
            ExprKind::PackIndexing(indexing) => visitor.visit_pack_indexing_expr(indexing, ast),
            ExprKind::SubstNonTypeTemplateParmPack { .. } | ExprKind::FunctionParmPack { .. } => {
                visitor.visit_substituted_pack(ast);
            }
            ExprKind::Lambda(lambda) => visitor.visit_lambda(lambda, ast),
            ExprKind::Block(block) => visitor.visit_block(block, ast),
            ExprKind::DictionaryLiteral(elements) => {
                for element in elements {
                    visitor.visit_dictionary_element(element, ast);
                }
            }
            ExprKind::StmtExpr(stmt) => visitor.visit_stmt(*stmt, ast),
            ExprKind::Requires {
                params,
                requirements,
            } => {
                for &param in params {
                    visitor.visit_decl(param, ast);
                }
                for &requirement in requirements {
                    visitor.visit_expr(requirement, ast);
                }
            }
            ExprKind::ScalarValueInit(ty) => visitor.visit_type(*ty, ast),
        }
    });
}

pub fn walk_type<'ast, V: Visitor<'ast> + ?Sized>(
    visitor: &mut V,
    id: TypeId,
    ast: &'ast AstContext,
) {
    ensure_sufficient_stack(|| {
        let ty = ast.ty(id);
        match &ty.kind {
            TypeKind::Builtin(_) | TypeKind::Record(_) | TypeKind::Error => {}
            TypeKind::TemplateTypeParm(param) => {
                visitor.visit_template_type_parm(*param, ty.span, ast);
            }
            TypeKind::Pointer(inner)
            | TypeKind::LValueReference(inner)
            | TypeKind::RValueReference(inner)
            | TypeKind::Deduced {
                deduced: Some(inner),
            } => visitor.visit_type(*inner, ast),
            TypeKind::Deduced { deduced: None } => {}
            TypeKind::Array { element, bound } => {
                visitor.visit_type(*element, ast);
                if let Some(bound) = bound {
                    visitor.visit_expr(*bound, ast);
                }
            }
            TypeKind::Function { params, result } => {
                for &param in params {
                    visitor.visit_type(param, ast);
                }
                visitor.visit_type(*result, ast);
            }
            TypeKind::Specialization { template, args } => {
                visitor.visit_template_name(template, ast);
                for arg in args {
                    visitor.visit_template_argument(arg, ast);
                }
            }
            TypeKind::PackExpansion { pattern, .. } => {
                visitor.visit_pack_expansion_type(*pattern, ast);
            }
            TypeKind::PackIndexing { pattern, index } => {
                visitor.visit_pack_indexing_type(*pattern, *index, ast);
            }
            TypeKind::Decltype(expr) => visitor.visit_expr(*expr, ast),
            TypeKind::SubstTemplateTypeParmPack { .. } => visitor.visit_substituted_pack(ast),
        }
    });
}

pub fn walk_decl<'ast, V: Visitor<'ast> + ?Sized>(
    visitor: &mut V,
    id: DeclId,
    ast: &'ast AstContext,
) {
    let decl = ast.decl(id);
    for attr in &decl.attrs {
        visitor.visit_attr(attr, ast);
    }
    match &decl.kind {
        DeclKind::TemplateTypeParm { default, .. } => {
            if let Some(default) = default {
                visitor.visit_type(*default, ast);
            }
        }
        DeclKind::NonTypeTemplateParm { ty, .. } => visitor.visit_type(*ty, ast),
        DeclKind::TemplateTemplateParm { .. } => {}
        DeclKind::Var { ty, init, .. } => {
            visitor.visit_type(*ty, ast);
            if let Some(init) = init {
                visitor.visit_expr(*init, ast);
            }
        }
        DeclKind::Binding { binding, .. } => {
            if let Some(binding) = binding {
                visitor.visit_expr(*binding, ast);
            }
        }
        DeclKind::Function {
            template_params,
            params,
            result,
            ctor_inits,
            body,
        } => {
            if let Some(list) = template_params {
                for &param in &list.params {
                    visitor.visit_decl(param, ast);
                }
            }
            for &param in params {
                visitor.visit_decl(param, ast);
            }
            if let Some(result) = result {
                visitor.visit_type(*result, ast);
            }
            for init in ctor_inits {
                visitor.visit_ctor_initializer(init, ast);
            }
            if let Some(body) = body {
                visitor.visit_stmt(*body, ast);
            }
        }
        DeclKind::Record { bases, members } => {
            for base in bases {
                visitor.visit_base_specifier(base, ast);
            }
            for &member in members {
                visitor.visit_decl(member, ast);
            }
        }
        DeclKind::UnresolvedUsingValue { qualifier, .. }
        | DeclKind::UnresolvedUsingTypename { qualifier, .. } => {
            visitor.visit_type(*qualifier, ast);
        }
    }
}

pub fn walk_template_argument<'ast, V: Visitor<'ast> + ?Sized>(
    visitor: &mut V,
    arg: &'ast TemplateArgument,
    ast: &'ast AstContext,
) {
    match arg {
        TemplateArgument::Null | TemplateArgument::Integral(_) => {}
        TemplateArgument::Type(ty) => visitor.visit_type(*ty, ast),
        TemplateArgument::Expr(expr) => visitor.visit_expr(*expr, ast),
        TemplateArgument::Template(name) | TemplateArgument::TemplateExpansion { template: name, .. } => {
            visitor.visit_template_name(name, ast);
        }
        TemplateArgument::Pack(elements) => {
            for element in elements {
                visitor.visit_template_argument(element, ast);
            }
        }
    }
}

pub fn walk_template_name<'ast, V: Visitor<'ast> + ?Sized>(
    visitor: &mut V,
    name: &'ast TemplateName,
    ast: &'ast AstContext,
) {
    match name {
        TemplateName::Decl(_) => {}
        TemplateName::SubstPack { .. } => visitor.visit_substituted_pack(ast),
    }
}

pub fn walk_lambda<'ast, V: Visitor<'ast> + ?Sized>(
    visitor: &mut V,
    lambda: &'ast Lambda,
    ast: &'ast AstContext,
) {
    for capture in &lambda.captures {
        visitor.visit_lambda_capture(capture, ast);
    }
    for attr in &lambda.attrs {
        visitor.visit_attr(attr, ast);
    }
    visitor.visit_decl(lambda.call_operator, ast);
}

/// Only an init-capture has anything to walk: its variable's initializer.
pub fn walk_lambda_capture<'ast, V: Visitor<'ast> + ?Sized>(
    visitor: &mut V,
    capture: &'ast LambdaCapture,
    ast: &'ast AstContext,
) {
    if let DeclKind::Var {
        is_init_capture: true,
        ..
    } = ast.decl(capture.var).kind
    {
        visitor.visit_decl(capture.var, ast);
    }
}

pub fn walk_block<'ast, V: Visitor<'ast> + ?Sized>(
    visitor: &mut V,
    block: &'ast BlockLiteral,
    ast: &'ast AstContext,
) {
    for &param in &block.params {
        visitor.visit_decl(param, ast);
    }
    visitor.visit_stmt(block.body, ast);
}

pub fn walk_fold<'ast, V: Visitor<'ast> + ?Sized>(
    visitor: &mut V,
    fold: &'ast FoldExpr,
    ast: &'ast AstContext,
) {
    if let Some(lhs) = fold.lhs {
        visitor.visit_expr(lhs, ast);
    }
    if let Some(rhs) = fold.rhs {
        visitor.visit_expr(rhs, ast);
    }
}

pub fn walk_pack_indexing_expr<'ast, V: Visitor<'ast> + ?Sized>(
    visitor: &mut V,
    indexing: &'ast PackIndexing,
    ast: &'ast AstContext,
) {
    visitor.visit_expr(indexing.pack, ast);
    visitor.visit_expr(indexing.index, ast);
    for &element in &indexing.expansions {
        visitor.visit_expr(element, ast);
    }
}

#[cfg(test)]
mod tests;
