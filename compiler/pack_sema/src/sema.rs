//! The semantic analysis session for parameter packs.

use pack_diagnostic::{Diagnostic, DiagnosticQueue, ErrorGuaranteed};
use pack_ir::{AstContext, DeclId};

use crate::config::SemaConfig;
use crate::instantiate::LocalInstantiationScope;
use crate::scope::{FunctionScope, FunctionScopeKind};
use crate::scope_guard::{ScopedCompound, ScopedFunction, ScopedInstantiation};

/// Pack analysis over one translation unit.
///
/// Owns the syntax arena, the diagnostic queue, the stack of function
/// scopes being analyzed and the local instantiation scope of the
/// instantiation in progress.
pub struct Sema {
    pub(crate) ast: AstContext,
    pub(crate) diagnostics: DiagnosticQueue,
    pub(crate) function_scopes: Vec<FunctionScope>,
    pub(crate) instantiation: LocalInstantiationScope,
    pub(crate) config: SemaConfig,
}

impl Sema {
    pub fn new(ast: AstContext) -> Self {
        Self::with_config(ast, SemaConfig::default())
    }

    pub fn with_config(ast: AstContext, config: SemaConfig) -> Self {
        Sema {
            ast,
            diagnostics: DiagnosticQueue::with_config(config.diagnostics.clone()),
            function_scopes: Vec::new(),
            instantiation: LocalInstantiationScope::new(),
            config,
        }
    }

    pub fn ast(&self) -> &AstContext {
        &self.ast
    }

    pub fn ast_mut(&mut self) -> &mut AstContext {
        &mut self.ast
    }

    pub fn into_ast(self) -> AstContext {
        self.ast
    }

    pub fn diagnostics(&self) -> &DiagnosticQueue {
        &self.diagnostics
    }

    pub fn diagnostics_mut(&mut self) -> &mut DiagnosticQueue {
        &mut self.diagnostics
    }

    pub fn config(&self) -> &SemaConfig {
        &self.config
    }

    pub fn instantiation_scope(&self) -> &LocalInstantiationScope {
        &self.instantiation
    }

    pub fn instantiation_scope_mut(&mut self) -> &mut LocalInstantiationScope {
        &mut self.instantiation
    }

    pub fn function_scopes(&self) -> &[FunctionScope] {
        &self.function_scopes
    }

    // === Scopes ===

    /// Push a function scope; it is popped when the guard drops.
    pub fn scoped_function(&mut self, kind: FunctionScopeKind) -> ScopedFunction<'_> {
        ScopedFunction::new(self, kind)
    }

    /// Analyze a body inside a fresh function scope, returning the closure's
    /// result and the finished scope.
    pub fn with_function_scope<T>(
        &mut self,
        kind: FunctionScopeKind,
        f: impl FnOnce(&mut Sema) -> T,
    ) -> (T, FunctionScope) {
        let mut scoped = self.scoped_function(kind);
        let result = f(&mut scoped);
        (result, scoped.finish())
    }

    /// Push a compound statement on the innermost function scope; it is
    /// popped when the guard drops.
    pub fn scoped_compound(&mut self, is_stmt_expr: bool) -> ScopedCompound<'_> {
        ScopedCompound::new(self, is_stmt_expr)
    }

    /// Run `f` inside a compound statement of the innermost function scope.
    pub fn with_compound_scope<T>(
        &mut self,
        is_stmt_expr: bool,
        f: impl FnOnce(&mut Sema) -> T,
    ) -> T {
        let mut scoped = self.scoped_compound(is_stmt_expr);
        f(&mut scoped)
    }

    /// Record a pack declared by the innermost lambda or block.
    pub fn add_local_pack(&mut self, decl: DeclId) {
        if let Some(index) = self.enclosing_closure_index() {
            self.function_scopes[index].local_packs.push(decl);
        }
    }

    /// Push an instantiation frame; it is popped when the guard drops.
    pub fn scoped_instantiation(&mut self, combine_with_outer: bool) -> ScopedInstantiation<'_> {
        ScopedInstantiation::new(self, combine_with_outer)
    }

    /// Run `f` inside a fresh local instantiation frame.
    pub fn with_instantiation_scope<T>(
        &mut self,
        combine_with_outer: bool,
        f: impl FnOnce(&mut Sema) -> T,
    ) -> T {
        let mut scoped = self.scoped_instantiation(combine_with_outer);
        f(&mut scoped)
    }

    /// Whether an unexpanded pack may appear here because an enclosing
    /// lambda may still be expanded as a whole.
    pub fn is_unexpanded_pack_permitted(&self) -> bool {
        self.function_scopes
            .iter()
            .any(|scope| scope.kind == FunctionScopeKind::Lambda)
    }

    /// Index of the innermost lambda or block scope.
    pub(crate) fn enclosing_closure_index(&self) -> Option<usize> {
        self.function_scopes
            .iter()
            .rposition(|scope| scope.kind.is_closure())
    }

    // === Diagnostics ===

    pub(crate) fn emit_error(&mut self, diag: Diagnostic) -> ErrorGuaranteed {
        self.diagnostics.emit_error(diag)
    }

    pub(crate) fn emit_warning(&mut self, diag: Diagnostic) {
        self.diagnostics.emit_warning(diag);
    }
}
