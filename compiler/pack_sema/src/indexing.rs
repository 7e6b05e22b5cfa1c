//! Pack indexing expressions: `pack...[index]`.

use pack_diagnostic::{Diagnostic, ErrorCode, ErrorGuaranteed};
use pack_ir::{BinaryOp, ExprId, ExprKind, PackIndexing, Span};

use crate::Sema;

impl Sema {
    /// Check a pack indexing expression as written and build it.
    ///
    /// On success the dialect warning W4001 is emitted: a compatibility
    /// note under C++26, an extension warning before it.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn act_on_pack_indexing_expr(
        &mut self,
        pack: ExprId,
        ellipsis: Span,
        index: ExprId,
        rsquare: Span,
    ) -> Result<ExprId, ErrorGuaranteed> {
        if !self.names_parameter_pack(pack) {
            let node = self.ast.expr(pack);
            let span = node.span;
            if node.flags.contains_errors() {
                if let Some(reported) = self.diagnostics.has_errors() {
                    return Err(reported);
                }
            }
            let diag = Diagnostic::error(ErrorCode::E4001)
                .with_message("expression does not refer to the name of a parameter pack")
                .with_label(span, "expected a parameter pack");
            return Err(self.emit_error(diag));
        }

        let built = self.build_pack_indexing_expr(pack, ellipsis, index, rsquare, Vec::new(), false)?;

        let message = if self.config.lang.cplusplus26 {
            "pack indexing is incompatible with C++ standards before C++2c"
        } else {
            "pack indexing is a C++2c extension"
        };
        let span = self.ast.expr(built).span;
        self.emit_warning(
            Diagnostic::warning(ErrorCode::W4001)
                .with_message(message)
                .with_label(span, "pack indexed here"),
        );
        Ok(built)
    }

    /// Build a pack indexing expression, evaluating the index when it does
    /// not depend on template parameters.
    ///
    /// `expansions` holds the pack's elements once substituted; with
    /// `fully_substituted` set a constant index must select one of them.
    pub fn build_pack_indexing_expr(
        &mut self,
        pack: ExprId,
        ellipsis: Span,
        index: ExprId,
        rsquare: Span,
        expansions: Vec<ExprId>,
        fully_substituted: bool,
    ) -> Result<ExprId, ErrorGuaranteed> {
        let index_node = self.ast.expr(index);
        let resolved_index = if index_node.flags.is_instantiation_dependent() {
            None
        } else {
            let Some(value) = self.evaluate_index(index) else {
                let span = index_node.span;
                let diag = Diagnostic::error(ErrorCode::E4005)
                    .with_message("pack index is not a constant expression")
                    .with_label(span, "must be a constant expression");
                return Err(self.emit_error(diag));
            };
            Some(value)
        };

        if let (Some(value), true) = (resolved_index, fully_substituted) {
            let in_bounds = usize::try_from(value).is_ok_and(|i| i < expansions.len());
            if !in_bounds {
                let pack_span = self.ast.expr(pack).span;
                let name = self.pack_spelling(pack);
                let diag = Diagnostic::error(ErrorCode::E4002)
                    .with_message(format!(
                        "invalid index {value} for pack '{name}' of size {}",
                        expansions.len()
                    ))
                    .with_label(pack_span, "indexed pack")
                    .with_secondary_label(self.ast.expr(index).span, "index");
                return Err(self.emit_error(diag));
            }
        }

        let span = self.ast.expr(pack).span.merge(rsquare);
        Ok(self.ast.alloc_expr(
            ExprKind::PackIndexing(PackIndexing {
                pack,
                index,
                ellipsis,
                rsquare,
                resolved_index,
                expansions,
                fully_substituted,
            }),
            span,
        ))
    }

    fn names_parameter_pack(&self, expr: ExprId) -> bool {
        match self.ast.expr(expr).kind {
            ExprKind::DeclRef(decl) => self.ast.decl(decl).is_parameter_pack(),
            _ => false,
        }
    }

    fn pack_spelling(&self, expr: ExprId) -> &'static str {
        match self.ast.expr(expr).kind {
            ExprKind::DeclRef(decl)
            | ExprKind::SubstNonTypeTemplateParmPack { param: decl, .. }
            | ExprKind::FunctionParmPack { param: decl, .. } => self.ast.decl_name(decl),
            _ => "<pack>",
        }
    }

    /// Integer value of a constant index expression.
    fn evaluate_index(&self, expr: ExprId) -> Option<i64> {
        match &self.ast.expr(expr).kind {
            ExprKind::IntLiteral(value) => Some(*value),
            ExprKind::BoolLiteral(value) => Some(i64::from(*value)),
            ExprKind::Paren(inner) | ExprKind::ImplicitCast(inner) => self.evaluate_index(*inner),
            ExprKind::Conditional {
                cond,
                then_expr,
                else_expr,
            } => {
                if self.evaluate_index(*cond)? != 0 {
                    self.evaluate_index(*then_expr)
                } else {
                    self.evaluate_index(*else_expr)
                }
            }
            ExprKind::Binary { op, lhs, rhs } => {
                let lhs = self.evaluate_index(*lhs)?;
                let rhs = self.evaluate_index(*rhs)?;
                fold_constant(*op, lhs, rhs)
            }
            _ => None,
        }
    }
}

fn fold_constant(op: BinaryOp, lhs: i64, rhs: i64) -> Option<i64> {
    match op {
        BinaryOp::Add => lhs.checked_add(rhs),
        BinaryOp::Sub => lhs.checked_sub(rhs),
        BinaryOp::Mul => lhs.checked_mul(rhs),
        BinaryOp::Div => lhs.checked_div(rhs),
        BinaryOp::Rem => lhs.checked_rem(rhs),
        BinaryOp::Shl => u32::try_from(rhs).ok().and_then(|rhs| lhs.checked_shl(rhs)),
        BinaryOp::Shr => u32::try_from(rhs).ok().and_then(|rhs| lhs.checked_shr(rhs)),
        BinaryOp::BitAnd => Some(lhs & rhs),
        BinaryOp::BitXor => Some(lhs ^ rhs),
        BinaryOp::BitOr => Some(lhs | rhs),
        BinaryOp::Lt => Some(i64::from(lhs < rhs)),
        BinaryOp::Gt => Some(i64::from(lhs > rhs)),
        BinaryOp::Le => Some(i64::from(lhs <= rhs)),
        BinaryOp::Ge => Some(i64::from(lhs >= rhs)),
        BinaryOp::Eq => Some(i64::from(lhs == rhs)),
        BinaryOp::Ne => Some(i64::from(lhs != rhs)),
        BinaryOp::LAnd => Some(i64::from(lhs != 0 && rhs != 0)),
        BinaryOp::LOr => Some(i64::from(lhs != 0 || rhs != 0)),
        BinaryOp::Comma => Some(rhs),
        _ => None,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests use unwrap for brevity")]
mod tests;
