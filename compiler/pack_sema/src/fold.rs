//! Fold expressions: `(pack op ...)`, `(... op pack)` and
//! `(init op ... op pack)`.

use pack_diagnostic::{Diagnostic, ErrorCode, ErrorGuaranteed, Suggestion};
use pack_ir::{BinaryOp, BuiltinType, ExprId, ExprKind, FoldExpr, Span};

use crate::Sema;

impl Sema {
    /// Check and build a fold expression as written.
    ///
    /// A binary fold needs exactly one operand with an unexpanded pack; a
    /// unary fold's single operand must have one.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn act_on_fold_expr(
        &mut self,
        lparen: Span,
        lhs: Option<ExprId>,
        op: BinaryOp,
        ellipsis: Span,
        rhs: Option<ExprId>,
        rparen: Span,
    ) -> Result<ExprId, ErrorGuaranteed> {
        for operand in lhs.into_iter().chain(rhs) {
            self.check_fold_operand(operand);
        }

        match (lhs, rhs) {
            (Some(lhs), Some(rhs)) => {
                let lhs_node = self.ast.expr(lhs);
                let rhs_node = self.ast.expr(rhs);
                let lhs_has_pack = lhs_node.flags.contains_unexpanded_pack();
                if lhs_has_pack == rhs_node.flags.contains_unexpanded_pack() {
                    let (lhs_span, rhs_span) = (lhs_node.span, rhs_node.span);
                    let diag = if lhs_has_pack {
                        Diagnostic::error(ErrorCode::E3001)
                            .with_message("both operands of fold expression contain unexpanded parameter packs")
                            .with_label(ellipsis, "ambiguous fold direction")
                            .with_secondary_label(lhs_span, "contains a pack")
                            .with_secondary_label(rhs_span, "also contains a pack")
                    } else {
                        Diagnostic::error(ErrorCode::E1002)
                            .with_message("pack expansion does not contain any unexpanded parameter packs")
                            .with_label(ellipsis, "nothing to expand")
                            .with_secondary_label(lhs_span, "names no parameter pack")
                            .with_secondary_label(rhs_span, "names no parameter pack")
                    };
                    return Err(self.emit_error(diag));
                }
            }
            (Some(operand), None) | (None, Some(operand)) => {
                let node = self.ast.expr(operand);
                if !node.flags.contains_unexpanded_pack() {
                    let span = node.span;
                    let diag = Diagnostic::error(ErrorCode::E1002)
                        .with_message("pack expansion does not contain any unexpanded parameter packs")
                        .with_label(span, "names no parameter pack")
                        .with_secondary_label(ellipsis, "expanded here");
                    return Err(self.emit_error(diag));
                }
            }
            (None, None) => {
                tracing::debug!("fold expression without operands");
                let diag = Diagnostic::error(ErrorCode::E1002)
                    .with_message("pack expansion does not contain any unexpanded parameter packs")
                    .with_label(ellipsis, "fold has no operand");
                return Err(self.emit_error(diag));
            }
        }

        Ok(self.build_fold_expr(FoldExpr {
            lhs,
            op,
            rhs,
            lparen,
            ellipsis,
            rparen,
            num_expansions: None,
        }))
    }

    /// Allocate a fold expression without further checks.
    pub fn build_fold_expr(&mut self, fold: FoldExpr) -> ExprId {
        let span = fold.lparen.merge(fold.rparen);
        self.ast.alloc_expr(ExprKind::Fold(fold), span)
    }

    /// The value of a unary fold over an empty pack.
    ///
    /// `&&` gives `true`, `||` gives `false` and `,` gives `void()`. Any
    /// other operator has no value for an empty pack.
    pub fn build_empty_fold_expr(
        &mut self,
        ellipsis: Span,
        op: BinaryOp,
    ) -> Result<ExprId, ErrorGuaranteed> {
        match op {
            BinaryOp::LOr => Ok(self.ast.bool_lit(false, ellipsis)),
            BinaryOp::LAnd => Ok(self.ast.bool_lit(true, ellipsis)),
            BinaryOp::Comma => {
                let void = self.ast.builtin(BuiltinType::Void);
                Ok(self.ast.alloc_expr(ExprKind::ScalarValueInit(void), ellipsis))
            }
            _ => {
                let symbol = op.as_symbol();
                let diag = Diagnostic::error(ErrorCode::E3002)
                    .with_message(format!(
                        "unary fold expression has empty expansion for operator '{symbol}' \
                         with no fallback value"
                    ))
                    .with_label(ellipsis, "pack expanded to nothing here")
                    .with_note("only '&&', '||' and ',' have a value for an empty pack");
                Err(self.emit_error(diag))
            }
        }
    }

    /// Warn about an operand that is an unparenthesized binary or
    /// conditional expression, offering the parentheses as a fix.
    pub fn check_fold_operand(&mut self, operand: ExprId) {
        let mut expr = operand;
        while let ExprKind::ImplicitCast(inner) = self.ast.expr(expr).kind {
            expr = inner;
        }
        let node = self.ast.expr(expr);
        let needs_parens = matches!(
            node.kind,
            ExprKind::Binary { .. } | ExprKind::OperatorCall { .. } | ExprKind::Conditional { .. }
        );
        if !needs_parens {
            return;
        }
        let span = node.span;
        let fix = Suggestion::machine_applicable("parenthesize the operand", span.start_point(), "(")
            .with_substitution(span.end_point(), ")");
        let diag = Diagnostic::warning(ErrorCode::W3001)
            .with_message("expression not permitted as operand of fold expression")
            .with_label(span, "operator here binds looser than the fold")
            .with_suggestion(fix);
        self.emit_warning(diag);
    }
}
