//! RAII scope guards for [`Sema`].
//!
//! A guard pushes a scope on creation and pops it in `Drop`, so the scope
//! is gone on every exit path, early `?` returns and panics included. The
//! guard dereferences to `Sema` for use while the scope is active.
//!
//! ```text
//! let mut scoped = sema.scoped_instantiation(false);
//! scoped.instantiation_scope_mut().make_instantiated_local_pack(xs)?;
//! // frame popped when `scoped` drops
//! ```

use std::ops::{Deref, DerefMut};

use crate::scope::{CompoundScope, FunctionScope, FunctionScopeKind};
use crate::Sema;

/// A function scope pushed on [`Sema`]; truncates the scope stack back to
/// its previous height when dropped.
pub struct ScopedFunction<'s> {
    sema: &'s mut Sema,
    height: usize,
    kind: FunctionScopeKind,
}

impl<'s> ScopedFunction<'s> {
    pub(crate) fn new(sema: &'s mut Sema, kind: FunctionScopeKind) -> Self {
        let height = sema.function_scopes.len();
        tracing::trace!(?kind, height, "push function scope");
        sema.function_scopes.push(FunctionScope::new(kind));
        ScopedFunction { sema, height, kind }
    }

    /// Pop the scope and hand it back.
    pub fn finish(self) -> FunctionScope {
        let kind = self.kind;
        self.sema
            .function_scopes
            .split_off(self.height)
            .into_iter()
            .next()
            .unwrap_or_else(|| FunctionScope::new(kind))
    }
}

impl Deref for ScopedFunction<'_> {
    type Target = Sema;

    fn deref(&self) -> &Sema {
        self.sema
    }
}

impl DerefMut for ScopedFunction<'_> {
    fn deref_mut(&mut self) -> &mut Sema {
        self.sema
    }
}

impl Drop for ScopedFunction<'_> {
    fn drop(&mut self) {
        tracing::trace!(kind = ?self.kind, height = self.height, "pop function scope");
        self.sema.function_scopes.truncate(self.height);
    }
}

/// A compound statement pushed on the innermost function scope. Outside any
/// function scope nothing is pushed.
pub struct ScopedCompound<'s> {
    sema: &'s mut Sema,
    /// Owning function scope and its compound depth before the push.
    pushed: Option<(usize, usize)>,
}

impl<'s> ScopedCompound<'s> {
    pub(crate) fn new(sema: &'s mut Sema, is_stmt_expr: bool) -> Self {
        let pushed = sema.function_scopes.last_mut().map(|scope| {
            let height = scope.compound_scopes.len();
            scope.compound_scopes.push(CompoundScope { is_stmt_expr });
            height
        });
        let owner = sema.function_scopes.len().checked_sub(1);
        ScopedCompound {
            pushed: owner.zip(pushed),
            sema,
        }
    }
}

impl Deref for ScopedCompound<'_> {
    type Target = Sema;

    fn deref(&self) -> &Sema {
        self.sema
    }
}

impl DerefMut for ScopedCompound<'_> {
    fn deref_mut(&mut self) -> &mut Sema {
        self.sema
    }
}

impl Drop for ScopedCompound<'_> {
    fn drop(&mut self) {
        let Some((owner, height)) = self.pushed else {
            return;
        };
        if let Some(scope) = self.sema.function_scopes.get_mut(owner) {
            scope.compound_scopes.truncate(height);
        }
    }
}

/// A local instantiation frame pushed on [`Sema`]; pops every frame above
/// its starting depth when dropped.
pub struct ScopedInstantiation<'s> {
    sema: &'s mut Sema,
    depth: usize,
}

impl<'s> ScopedInstantiation<'s> {
    pub(crate) fn new(sema: &'s mut Sema, combine_with_outer: bool) -> Self {
        let depth = sema.instantiation.depth();
        sema.instantiation.push_frame(combine_with_outer);
        ScopedInstantiation { sema, depth }
    }
}

impl Deref for ScopedInstantiation<'_> {
    type Target = Sema;

    fn deref(&self) -> &Sema {
        self.sema
    }
}

impl DerefMut for ScopedInstantiation<'_> {
    fn deref_mut(&mut self) -> &mut Sema {
        self.sema
    }
}

impl Drop for ScopedInstantiation<'_> {
    fn drop(&mut self) {
        while self.sema.instantiation.depth() > self.depth {
            if self.sema.instantiation.pop_frame().is_err() {
                break;
            }
        }
    }
}
