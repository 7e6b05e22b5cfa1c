//! Syntax arena.
//!
//! `AstContext` owns every node of a translation unit plus the identifier
//! interner. Nodes are appended, never removed; ids stay valid for the
//! context's lifetime.
//!
//! Each expression, type and statement gets its [`NodeFlags`] computed from
//! its children when it is allocated (see `dependence.rs`), so children must
//! be allocated before their parents.

mod construct;
mod dependence;

use crate::ast::{Decl, DeclKind, Expr, ExprKind, Stmt, StmtKind, TemplateArgument, Type, TypeKind};
use crate::{DeclId, ExprId, Name, Span, StmtId, StringInterner, TypeId};

/// Owner of all syntax nodes.
#[derive(Default)]
pub struct AstContext {
    interner: StringInterner,
    exprs: Vec<Expr>,
    types: Vec<Type>,
    decls: Vec<Decl>,
    stmts: Vec<Stmt>,
}

/// An arena ran out of `u32` ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArenaError {
    /// More than `u32::MAX` nodes of one kind.
    Overflow { arena: &'static str, count: usize },
}

impl std::fmt::Display for ArenaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArenaError::Overflow { arena, count } => write!(
                f,
                "{arena} arena exceeded capacity: {count} nodes, max is {}",
                u32::MAX
            ),
        }
    }
}

impl std::error::Error for ArenaError {}

/// Convert an arena length to the next id.
#[inline]
fn next_index(len: usize, arena: &'static str) -> Result<u32, ArenaError> {
    u32::try_from(len).map_err(|_| ArenaError::Overflow { arena, count: len })
}

impl AstContext {
    pub fn new() -> Self {
        Self::default()
    }

    // === Names ===

    /// Intern an identifier.
    pub fn intern(&self, s: &str) -> Name {
        self.interner.intern(s)
    }

    /// Spelling of an interned identifier.
    pub fn name_str(&self, name: Name) -> &'static str {
        self.interner.lookup(name)
    }

    pub fn interner(&self) -> &StringInterner {
        &self.interner
    }

    // === Allocation ===

    /// Allocate an expression; its flags are derived from `kind`.
    pub fn try_alloc_expr(&mut self, kind: ExprKind, span: Span) -> Result<ExprId, ArenaError> {
        let id = ExprId::new(next_index(self.exprs.len(), "expression")?);
        let flags = self.expr_kind_flags(&kind);
        self.exprs.push(Expr { kind, span, flags });
        Ok(id)
    }

    /// # Panics
    /// Panics once the arena holds more than `u32::MAX` expressions.
    /// Use `try_alloc_expr` for fallible allocation.
    pub fn alloc_expr(&mut self, kind: ExprKind, span: Span) -> ExprId {
        self.try_alloc_expr(kind, span).unwrap_or_else(|e| panic!("{e}"))
    }

    /// Allocate a type; `span` is `None` for synthesized types.
    pub fn try_alloc_type(
        &mut self,
        kind: TypeKind,
        span: Option<Span>,
    ) -> Result<TypeId, ArenaError> {
        let id = TypeId::new(next_index(self.types.len(), "type")?);
        let flags = self.type_kind_flags(&kind);
        self.types.push(Type { kind, span, flags });
        Ok(id)
    }

    /// # Panics
    /// Panics once the arena holds more than `u32::MAX` types.
    pub fn alloc_type(&mut self, kind: TypeKind, span: Option<Span>) -> TypeId {
        self.try_alloc_type(kind, span).unwrap_or_else(|e| panic!("{e}"))
    }

    pub fn try_alloc_decl(&mut self, decl: Decl) -> Result<DeclId, ArenaError> {
        let id = DeclId::new(next_index(self.decls.len(), "declaration")?);
        self.decls.push(decl);
        Ok(id)
    }

    /// # Panics
    /// Panics once the arena holds more than `u32::MAX` declarations.
    pub fn alloc_decl(&mut self, decl: Decl) -> DeclId {
        self.try_alloc_decl(decl).unwrap_or_else(|e| panic!("{e}"))
    }

    pub fn try_alloc_stmt(&mut self, kind: StmtKind, span: Span) -> Result<StmtId, ArenaError> {
        let id = StmtId::new(next_index(self.stmts.len(), "statement")?);
        let flags = self.stmt_kind_flags(&kind);
        self.stmts.push(Stmt { kind, span, flags });
        Ok(id)
    }

    /// # Panics
    /// Panics once the arena holds more than `u32::MAX` statements.
    pub fn alloc_stmt(&mut self, kind: StmtKind, span: Span) -> StmtId {
        self.try_alloc_stmt(kind, span).unwrap_or_else(|e| panic!("{e}"))
    }

    // === Access ===

    #[inline]
    pub fn expr(&self, id: ExprId) -> &Expr {
        &self.exprs[id.index()]
    }

    #[inline]
    pub fn ty(&self, id: TypeId) -> &Type {
        &self.types[id.index()]
    }

    #[inline]
    pub fn decl(&self, id: DeclId) -> &Decl {
        &self.decls[id.index()]
    }

    /// Mutable access to a declaration, used to link a declaration to its
    /// context or body after both exist.
    #[inline]
    pub fn decl_mut(&mut self, id: DeclId) -> &mut Decl {
        &mut self.decls[id.index()]
    }

    #[inline]
    pub fn stmt(&self, id: StmtId) -> &Stmt {
        &self.stmts[id.index()]
    }

    pub fn expr_count(&self) -> usize {
        self.exprs.len()
    }

    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    /// Name of a declaration as written.
    pub fn decl_name(&self, id: DeclId) -> &'static str {
        self.name_str(self.decl(id).name)
    }

    // === Queries ===

    /// Whether a template argument is a pack expansion: `T...`, `e...` or
    /// `Tmpl...`.
    pub fn is_pack_expansion(&self, arg: &TemplateArgument) -> bool {
        match arg {
            TemplateArgument::Type(ty) => {
                matches!(self.ty(*ty).kind, TypeKind::PackExpansion { .. })
            }
            TemplateArgument::Expr(expr) => {
                matches!(self.expr(*expr).kind, ExprKind::PackExpansion { .. })
            }
            TemplateArgument::TemplateExpansion { .. } => true,
            TemplateArgument::Null
            | TemplateArgument::Template(_)
            | TemplateArgument::Integral(_)
            | TemplateArgument::Pack(_) => false,
        }
    }

    /// Repeat count of a pack-expansion template argument, `None` while
    /// unknown or for non-expansions.
    pub fn expansion_count(&self, arg: &TemplateArgument) -> Option<u32> {
        match arg {
            TemplateArgument::Type(ty) => match self.ty(*ty).kind {
                TypeKind::PackExpansion { num_expansions, .. } => num_expansions,
                _ => None,
            },
            TemplateArgument::Expr(expr) => match self.expr(*expr).kind {
                ExprKind::PackExpansion { num_expansions, .. } => num_expansions,
                _ => None,
            },
            TemplateArgument::TemplateExpansion { num_expansions, .. } => *num_expansions,
            _ => None,
        }
    }

    /// The function a declaration is directly nested in, if any.
    pub fn enclosing_function(&self, id: DeclId) -> Option<DeclId> {
        let context = self.decl(id).context?;
        matches!(self.decl(context).kind, DeclKind::Function { .. }).then_some(context)
    }
}
