//! Function scopes: the stack of function, lambda and block bodies being
//! analyzed.
//!
//! A lambda or block scope remembers which packs it declares itself and
//! whether its body referenced a pack from outside. That flag ends up on the
//! closure node, and the enclosing construct reports the pack if nothing
//! expands it.

use pack_ir::DeclId;

/// Kind of body a [`FunctionScope`] belongs to.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum FunctionScopeKind {
    Function,
    Lambda,
    Block,
}

impl FunctionScopeKind {
    /// Lambdas and blocks capture from their enclosing scope.
    pub const fn is_closure(self) -> bool {
        matches!(self, FunctionScopeKind::Lambda | FunctionScopeKind::Block)
    }
}

/// A `{ ... }` scope inside a function body.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct CompoundScope {
    /// The body of a GNU statement expression `({ ... })`.
    pub is_stmt_expr: bool,
}

/// State of one function, lambda or block body under analysis.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct FunctionScope {
    pub kind: FunctionScopeKind,
    /// Packs declared by this closure: its template parameter packs,
    /// parameter packs and init-capture packs.
    pub local_packs: Vec<DeclId>,
    pub compound_scopes: Vec<CompoundScope>,
    /// The body referenced a pack declared outside the closure.
    pub contains_unexpanded_pack: bool,
}

impl FunctionScope {
    pub fn new(kind: FunctionScopeKind) -> Self {
        FunctionScope {
            kind,
            local_packs: Vec::new(),
            compound_scopes: Vec::new(),
            contains_unexpanded_pack: false,
        }
    }

    pub fn has_stmt_expr(&self) -> bool {
        self.compound_scopes.iter().any(|scope| scope.is_stmt_expr)
    }
}
