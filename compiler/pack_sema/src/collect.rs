//! Unexpanded parameter pack collection.
//!
//! [`PackCollector`] walks a syntax subtree and records every parameter pack
//! that occurs in it without an enclosing expansion, in the order the
//! occurrences are reached. It prunes every node whose cached flags say it
//! mentions no unexpanded pack, except inside a lambda or block body, where
//! the flag on inner nodes can not be trusted to describe the closure as a
//! whole.
//!
//! Nothing under an existing pack expansion, fold or pack-indexing pattern
//! is collected: those packs already belong to that expansion.

use std::ops::{Deref, DerefMut};

use pack_ir::visitor::{
    walk_block, walk_decl, walk_expr, walk_lambda, walk_lambda_capture, walk_stmt,
    walk_template_argument, walk_template_name, walk_type,
};
use pack_ir::{
    AstContext, Attr, BaseSpecifier, BlockLiteral, CtorInitializer, DeclId, DeclKind,
    DictionaryElement, ExprId, ExprKind, FoldExpr, Lambda, LambdaCapture, NodeFlags, PackIndexing,
    Span, StmtId, TemplateArgument, TemplateName, TypeId, TypeParamType, Visitor,
};

use crate::unexpanded::{UnexpandedPack, UnexpandedPacks};

/// Collects unexpanded parameter packs from a syntax subtree.
#[derive(Clone, Debug)]
pub struct PackCollector {
    packs: UnexpandedPacks,
    /// Packs at this template depth or deeper belong to an enclosing
    /// generic lambda and are expanded there.
    depth_limit: u32,
    in_lambda_or_block: bool,
    contains_intermediate_packs: bool,
}

impl Default for PackCollector {
    fn default() -> Self {
        PackCollector {
            packs: UnexpandedPacks::new(),
            depth_limit: u32::MAX,
            in_lambda_or_block: false,
            contains_intermediate_packs: false,
        }
    }
}

impl PackCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Packs collected so far.
    pub fn packs(&self) -> &[UnexpandedPack] {
        &self.packs
    }

    pub fn into_packs(self) -> UnexpandedPacks {
        self.packs
    }

    /// Whether the walk passed a pack that substitution already replaced
    /// by its arguments. Such packs are never collected.
    pub fn contains_intermediate_packs(&self) -> bool {
        self.contains_intermediate_packs
    }

    pub fn collect_expr(&mut self, id: ExprId, ast: &AstContext) {
        self.visit_expr(id, ast);
    }

    pub fn collect_type(&mut self, id: TypeId, ast: &AstContext) {
        self.visit_type(id, ast);
    }

    pub fn collect_stmt(&mut self, id: StmtId, ast: &AstContext) {
        self.visit_stmt(id, ast);
    }

    pub fn collect_decl(&mut self, id: DeclId, ast: &AstContext) {
        self.visit_decl(id, ast);
    }

    pub fn collect_template_argument<'ast>(
        &mut self,
        arg: &'ast TemplateArgument,
        ast: &'ast AstContext,
    ) {
        self.visit_template_argument(arg, ast);
    }

    pub fn collect_template_name<'ast>(&mut self, name: &'ast TemplateName, ast: &'ast AstContext) {
        self.visit_template_name(name, ast);
    }

    /// Record a declared pack unless an enclosing generic lambda expands it.
    fn add_decl(&mut self, decl: DeclId, span: Option<Span>, ast: &AstContext) {
        let declared = ast.decl(decl);
        match &declared.kind {
            DeclKind::Var { .. } => {
                let owner_depth = ast
                    .enclosing_function(decl)
                    .and_then(|function| ast.decl(function).template_params())
                    .map(|list| list.depth);
                if owner_depth.is_some_and(|depth| depth >= self.depth_limit) {
                    return;
                }
            }
            _ => {
                if let Some((depth, _)) = declared.depth_and_index() {
                    if declared.is_template_parameter_pack() && depth >= self.depth_limit {
                        return;
                    }
                }
            }
        }
        self.packs.push(UnexpandedPack::decl(decl, span));
    }

    fn add_type_param(&mut self, param: TypeParamType, span: Option<Span>) {
        if param.depth < self.depth_limit {
            self.packs.push(UnexpandedPack::type_param(param, span));
        }
    }

    /// Enter a closure body: pruning is off until the guard drops, and the
    /// depth limit drops to the closure's own template depth, if it has one.
    fn enter_closure(&mut self, template_depth: Option<u32>) -> ClosureScope<'_> {
        let saved_in_lambda_or_block = self.in_lambda_or_block;
        let saved_depth_limit = self.depth_limit;
        self.in_lambda_or_block = true;
        if let Some(depth) = template_depth {
            self.depth_limit = depth;
        }
        ClosureScope {
            collector: self,
            saved_in_lambda_or_block,
            saved_depth_limit,
        }
    }

    fn should_traverse(&self, flags: NodeFlags) -> bool {
        flags.contains_unexpanded_pack() || self.in_lambda_or_block
    }
}

/// Restores the collector's closure state on drop.
struct ClosureScope<'c> {
    collector: &'c mut PackCollector,
    saved_in_lambda_or_block: bool,
    saved_depth_limit: u32,
}

impl Deref for ClosureScope<'_> {
    type Target = PackCollector;

    fn deref(&self) -> &PackCollector {
        self.collector
    }
}

impl DerefMut for ClosureScope<'_> {
    fn deref_mut(&mut self) -> &mut PackCollector {
        self.collector
    }
}

impl Drop for ClosureScope<'_> {
    fn drop(&mut self) {
        self.collector.in_lambda_or_block = self.saved_in_lambda_or_block;
        self.collector.depth_limit = self.saved_depth_limit;
    }
}

impl<'ast> Visitor<'ast> for PackCollector {
    fn visit_stmt(&mut self, id: StmtId, ast: &'ast AstContext) {
        if self.should_traverse(ast.stmt(id).flags) {
            walk_stmt(self, id, ast);
        }
    }

    fn visit_expr(&mut self, id: ExprId, ast: &'ast AstContext) {
        let expr = ast.expr(id);
        // A dictionary literal's flag is exact even inside a closure.
        if matches!(expr.kind, ExprKind::DictionaryLiteral(_))
            && !expr.flags.contains_unexpanded_pack()
        {
            return;
        }
        if self.should_traverse(expr.flags) {
            walk_expr(self, id, ast);
        }
    }

    fn visit_type(&mut self, id: TypeId, ast: &'ast AstContext) {
        if self.should_traverse(ast.ty(id).flags) {
            walk_type(self, id, ast);
        }
    }

    fn visit_decl(&mut self, id: DeclId, ast: &'ast AstContext) {
        let decl = ast.decl(id);
        if decl.is_parameter_pack() || decl.is_using_pack_expansion() {
            return;
        }
        walk_decl(self, id, ast);
    }

    fn visit_decl_ref(&mut self, decl: DeclId, span: Span, ast: &'ast AstContext) {
        if ast.decl(decl).is_parameter_pack() {
            self.add_decl(decl, Some(span), ast);
        }
    }

    fn visit_template_type_parm(
        &mut self,
        param: TypeParamType,
        span: Option<Span>,
        _ast: &'ast AstContext,
    ) {
        if param.is_pack {
            self.add_type_param(param, span);
        }
    }

    fn visit_substituted_pack(&mut self, _ast: &'ast AstContext) {
        self.contains_intermediate_packs = true;
    }

    fn visit_template_argument(&mut self, arg: &'ast TemplateArgument, ast: &'ast AstContext) {
        if ast.is_pack_expansion(arg) {
            return;
        }
        walk_template_argument(self, arg, ast);
    }

    fn visit_template_name(&mut self, name: &'ast TemplateName, ast: &'ast AstContext) {
        if let TemplateName::Decl(decl) = name {
            if let DeclKind::TemplateTemplateParm { is_pack: true, .. } = ast.decl(*decl).kind {
                self.add_decl(*decl, None, ast);
            }
        }
        walk_template_name(self, name, ast);
    }

    fn visit_attr(&mut self, attr: &'ast Attr, ast: &'ast AstContext) {
        if attr.is_pack_expansion() {
            return;
        }
        for &arg in &attr.args {
            self.visit_expr(arg, ast);
        }
    }

    fn visit_base_specifier(&mut self, base: &'ast BaseSpecifier, ast: &'ast AstContext) {
        if !base.is_pack_expansion() {
            self.visit_type(base.ty, ast);
        }
    }

    fn visit_ctor_initializer(&mut self, init: &'ast CtorInitializer, ast: &'ast AstContext) {
        if init.is_pack_expansion() {
            return;
        }
        if let Some(base) = init.base {
            self.visit_type(base, ast);
        }
        for &arg in &init.args {
            self.visit_expr(arg, ast);
        }
    }

    fn visit_lambda(&mut self, lambda: &'ast Lambda, ast: &'ast AstContext) {
        if !lambda.contains_unexpanded_pack {
            return;
        }
        let template_depth = ast
            .decl(lambda.call_operator)
            .template_params()
            .map(|list| list.depth);
        let mut scoped = self.enter_closure(template_depth);
        walk_lambda(&mut *scoped, lambda, ast);
    }

    fn visit_lambda_capture(&mut self, capture: &'ast LambdaCapture, ast: &'ast AstContext) {
        if !capture.is_pack_expansion() {
            walk_lambda_capture(self, capture, ast);
        }
    }

    fn visit_block(&mut self, block: &'ast BlockLiteral, ast: &'ast AstContext) {
        if !block.contains_unexpanded_pack {
            return;
        }
        let mut scoped = self.enter_closure(None);
        walk_block(&mut *scoped, block, ast);
    }

    fn visit_dictionary_element(
        &mut self,
        element: &'ast DictionaryElement,
        ast: &'ast AstContext,
    ) {
        if element.is_pack_expansion() {
            return;
        }
        self.visit_expr(element.key, ast);
        self.visit_expr(element.value, ast);
    }

    fn visit_pack_expansion_expr(&mut self, _pattern: ExprId, _ast: &'ast AstContext) {}

    fn visit_pack_expansion_type(&mut self, _pattern: TypeId, _ast: &'ast AstContext) {}

    fn visit_fold(&mut self, _fold: &'ast FoldExpr, _ast: &'ast AstContext) {}

    /// Only the index can name packs of its own; the indexed pack is
    /// consumed by the indexing.
    fn visit_pack_indexing_expr(&mut self, indexing: &'ast PackIndexing, ast: &'ast AstContext) {
        walk_expr(self, indexing.index, ast);
    }

    fn visit_pack_indexing_type(
        &mut self,
        _pattern: TypeId,
        index: ExprId,
        ast: &'ast AstContext,
    ) {
        walk_expr(self, index, ast);
    }
}

// Entry points

/// Unexpanded packs of an expression.
pub fn collect_expr(ast: &AstContext, id: ExprId) -> UnexpandedPacks {
    let mut collector = PackCollector::new();
    collector.collect_expr(id, ast);
    collector.into_packs()
}

/// Unexpanded packs of a type.
pub fn collect_type(ast: &AstContext, id: TypeId) -> UnexpandedPacks {
    let mut collector = PackCollector::new();
    collector.collect_type(id, ast);
    collector.into_packs()
}

pub fn collect_stmt(ast: &AstContext, id: StmtId) -> UnexpandedPacks {
    let mut collector = PackCollector::new();
    collector.collect_stmt(id, ast);
    collector.into_packs()
}

pub fn collect_decl(ast: &AstContext, id: DeclId) -> UnexpandedPacks {
    let mut collector = PackCollector::new();
    collector.collect_decl(id, ast);
    collector.into_packs()
}

/// Unexpanded packs of a template argument. An argument that is itself a
/// pack expansion yields nothing.
pub fn collect_template_argument(ast: &AstContext, arg: &TemplateArgument) -> UnexpandedPacks {
    let mut collector = PackCollector::new();
    collector.collect_template_argument(arg, ast);
    collector.into_packs()
}

pub fn collect_template_name(ast: &AstContext, name: &TemplateName) -> UnexpandedPacks {
    let mut collector = PackCollector::new();
    collector.collect_template_name(name, ast);
    collector.into_packs()
}
