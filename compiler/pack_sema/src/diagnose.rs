//! Reporting unexpanded parameter packs.
//!
//! A construct that can not expand packs (an expression statement, a base
//! type, a static assertion, ...) must not mention one. Inside a lambda or
//! block, a pack from outside the closure is not an error yet: the closure
//! as a whole may be expanded later, so the closure is marked and the
//! decision moves to whatever contains it.

use std::fmt;

use pack_diagnostic::{Diagnostic, ErrorCode};
use pack_ir::{ExprId, ExprKind, Name, Span, TemplateArgument, TemplateName, TypeId};
use rustc_hash::FxHashSet;

use crate::collect::PackCollector;
use crate::unexpanded::{PackEntity, UnexpandedPack};
use crate::Sema;

/// The construct an unexpanded pack was found in.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum UnexpandedPackContext {
    Expression,
    BaseType,
    DeclarationType,
    DataMemberType,
    BitFieldWidth,
    StaticAssertion,
    FixedUnderlyingType,
    EnumeratorValue,
    UsingDeclaration,
    FriendDeclaration,
    Qualifier,
    Initializer,
    DefaultArgument,
    NonTypeTemplateParameterType,
    ExceptionType,
    ExplicitSpecialization,
    PartialSpecialization,
    Lambda,
    Block,
    TypeConstraint,
    Requirement,
    RequiresClause,
}

impl UnexpandedPackContext {
    /// What the message calls the construct.
    pub const fn subject(self) -> &'static str {
        match self {
            Self::Expression => "expression",
            Self::BaseType => "base type",
            Self::DeclarationType => "declaration type",
            Self::DataMemberType => "data member type",
            Self::BitFieldWidth => "bit-field size",
            Self::StaticAssertion => "static assertion",
            Self::FixedUnderlyingType => "fixed underlying type",
            Self::EnumeratorValue => "enumerator value",
            Self::UsingDeclaration => "using declaration",
            Self::FriendDeclaration => "friend declaration",
            Self::Qualifier => "qualifier",
            Self::Initializer => "initializer",
            Self::DefaultArgument => "default argument",
            Self::NonTypeTemplateParameterType => "non-type template parameter type",
            Self::ExceptionType => "exception type",
            Self::ExplicitSpecialization => "explicit specialization",
            Self::PartialSpecialization => "partial specialization",
            Self::Lambda => "lambda",
            Self::Block => "block",
            Self::TypeConstraint => "type constraint",
            Self::Requirement => "requirement",
            Self::RequiresClause => "requires clause",
        }
    }
}

impl fmt::Display for UnexpandedPackContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.subject())
    }
}

impl Sema {
    /// Report `packs` as unexpanded in `context`, or defer them to the
    /// enclosing closure.
    ///
    /// Returns `true` when an error was emitted.
    pub fn diagnose_unexpanded_parameter_packs(
        &mut self,
        span: Span,
        context: UnexpandedPackContext,
        packs: &[UnexpandedPack],
    ) -> bool {
        if packs.is_empty() {
            return false;
        }

        let mut reported: &[UnexpandedPack] = packs;
        let own_packs: Vec<UnexpandedPack>;
        if let Some(closure) = self.enclosing_closure_index() {
            let scope = &self.function_scopes[closure];
            own_packs = packs
                .iter()
                .filter(|pack| {
                    scope
                        .local_packs
                        .iter()
                        .any(|&local| pack.is_declared_by(local, &self.ast))
                })
                .copied()
                .collect();

            if own_packs.is_empty() {
                // A statement expression can not be duplicated by an
                // expansion of the closure.
                let in_stmt_expr = self.function_scopes[closure..]
                    .iter()
                    .rev()
                    .any(|scope| scope.has_stmt_expr());
                if !in_stmt_expr {
                    tracing::debug!(
                        packs = packs.len(),
                        kind = ?self.function_scopes[closure].kind,
                        "deferring unexpanded packs to enclosing closure"
                    );
                    self.function_scopes[closure].contains_unexpanded_pack = true;
                    return false;
                }
            } else {
                reported = &own_packs;
            }
        }

        let diag = self.unexpanded_pack_diagnostic(span, context, reported);
        self.emit_error(diag);
        true
    }

    fn unexpanded_pack_diagnostic(
        &self,
        span: Span,
        context: UnexpandedPackContext,
        packs: &[UnexpandedPack],
    ) -> Diagnostic {
        let mut seen = FxHashSet::default();
        let names: Vec<Name> = packs
            .iter()
            .map(|pack| pack.name(&self.ast))
            .filter(|name| !name.is_empty() && seen.insert(*name))
            .collect();

        let quoted: Vec<String> = names
            .iter()
            .take(2)
            .map(|&name| format!("'{}'", self.ast.name_str(name)))
            .collect();
        let message = match names.len() {
            0 => format!("{context} contains unexpanded parameter packs"),
            1 => format!("{context} contains unexpanded parameter pack {}", quoted[0]),
            2 => format!(
                "{context} contains unexpanded parameter packs {} and {}",
                quoted[0], quoted[1]
            ),
            n => format!(
                "{context} contains unexpanded parameter packs {}, {} and {} {}",
                quoted[0],
                quoted[1],
                n - 2,
                if n == 3 { "other" } else { "others" }
            ),
        };

        let mut diag = Diagnostic::error(ErrorCode::E1001)
            .with_message(message)
            .with_label(span, format!("{context} is not a pack expansion"));
        for location in packs.iter().filter_map(|pack| pack.span) {
            diag = diag.with_secondary_label(location, "parameter pack referenced here");
        }
        diag.with_note("add '...' after the pattern to expand it")
    }

    // === Per-category entry points ===

    /// Report unexpanded packs in a type. No-op for a type without any.
    pub fn diagnose_unexpanded_pack_in_type(
        &mut self,
        span: Span,
        ty: TypeId,
        context: UnexpandedPackContext,
    ) -> bool {
        if !self.ast.ty(ty).flags.contains_unexpanded_pack() {
            return false;
        }
        let mut collector = PackCollector::new();
        collector.collect_type(ty, &self.ast);
        self.diagnose_collected(span, context, collector)
    }

    /// Report unexpanded packs in an expression, at the expression.
    pub fn diagnose_unexpanded_pack_in_expr(
        &mut self,
        expr: ExprId,
        context: UnexpandedPackContext,
    ) -> bool {
        let node = self.ast.expr(expr);
        if !node.flags.contains_unexpanded_pack() {
            return false;
        }
        let span = node.span;
        let mut collector = PackCollector::new();
        collector.collect_expr(expr, &self.ast);
        self.diagnose_collected(span, context, collector)
    }

    pub fn diagnose_unexpanded_pack_in_template_argument(
        &mut self,
        span: Span,
        arg: &TemplateArgument,
        context: UnexpandedPackContext,
    ) -> bool {
        if !self
            .ast
            .template_argument_flags(arg)
            .contains_unexpanded_pack()
        {
            return false;
        }
        let mut collector = PackCollector::new();
        collector.collect_template_argument(arg, &self.ast);
        self.diagnose_collected(span, context, collector)
    }

    pub fn diagnose_unexpanded_pack_in_template_name(
        &mut self,
        span: Span,
        name: &TemplateName,
        context: UnexpandedPackContext,
    ) -> bool {
        if !self.ast.template_name_flags(name).contains_unexpanded_pack() {
            return false;
        }
        let mut collector = PackCollector::new();
        collector.collect_template_name(name, &self.ast);
        self.diagnose_collected(span, context, collector)
    }

    /// Report the requires-expression's own parameter packs that its
    /// requirements leave unexpanded. Packs from outside are left for the
    /// enclosing construct.
    pub fn diagnose_unexpanded_pack_in_requires_expr(&mut self, requires: ExprId) -> bool {
        let node = self.ast.expr(requires);
        let ExprKind::Requires { params, .. } = &node.kind else {
            return false;
        };
        if !node.flags.contains_unexpanded_pack() {
            return false;
        }
        let span = node.span;
        let own: Vec<UnexpandedPack> = crate::collect::collect_expr(&self.ast, requires)
            .into_iter()
            .filter(|pack| matches!(pack.entity, PackEntity::Decl(decl) if params.contains(&decl)))
            .collect();
        if own.is_empty() {
            return false;
        }
        self.diagnose_unexpanded_parameter_packs(span, UnexpandedPackContext::Requirement, &own)
    }

    fn diagnose_collected(
        &mut self,
        span: Span,
        context: UnexpandedPackContext,
        collector: PackCollector,
    ) -> bool {
        if collector.packs().is_empty() && collector.contains_intermediate_packs() {
            tracing::debug!("only substituted packs left; an outer fold expands them");
        }
        let packs = collector.into_packs();
        self.diagnose_unexpanded_parameter_packs(span, context, &packs)
    }
}
