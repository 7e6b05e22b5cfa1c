//! `sizeof...(name)`.

use pack_diagnostic::{Diagnostic, ErrorCode, ErrorGuaranteed, Suggestion};
use pack_ir::{DeclId, ExprId, ExprKind, Name, Span};

use crate::lookup::{LookupResult, NameLookup, TypoCorrector};
use crate::Sema;

impl Sema {
    /// Resolve the operand of `sizeof...` and build the expression.
    ///
    /// `op` is the `sizeof` keyword and `rparen` the closing parenthesis;
    /// together they give the node's span. An unknown name is corrected to a
    /// nearby parameter pack when one exists: the error is still reported,
    /// but the expression is built from the correction.
    #[tracing::instrument(level = "trace", skip(self, lookup, typos))]
    pub fn act_on_sizeof_pack_expr(
        &mut self,
        op: Span,
        name: Name,
        name_span: Span,
        rparen: Span,
        lookup: &dyn NameLookup,
        typos: &dyn TypoCorrector,
    ) -> Result<ExprId, ErrorGuaranteed> {
        let resolved = match lookup.lookup_ordinary_name(name) {
            LookupResult::Found(decl) => Some(decl),
            LookupResult::NotFound => self.correct_pack_name(name, name_span, typos),
            LookupResult::Overloaded(_) => None,
            LookupResult::Ambiguous(candidates) => {
                return Err(self.ambiguous_pack_name(name, name_span, &candidates));
            }
        };

        let pack = resolved.filter(|&decl| self.ast.decl(decl).is_parameter_pack());
        let Some(pack) = pack else {
            let spelling = self.ast.name_str(name);
            let diag = Diagnostic::error(ErrorCode::E4001)
                .with_message(format!(
                    "'{spelling}' does not refer to the name of a parameter pack"
                ))
                .with_label(name_span, "expected a parameter pack");
            return Err(self.emit_error(diag));
        };

        Ok(self
            .ast
            .alloc_expr(ExprKind::SizeOfPack { pack, name_span }, op.merge(rparen)))
    }

    fn correct_pack_name(
        &mut self,
        name: Name,
        name_span: Span,
        typos: &dyn TypoCorrector,
    ) -> Option<DeclId> {
        let ast = &self.ast;
        let corrected = typos.correct_typo(name, ast, &|decl| {
            ast.decl(decl).is_parameter_pack()
        })?;

        let spelling = self.ast.name_str(name);
        let suggestion = self.ast.decl_name(corrected);
        tracing::debug!(from = spelling, to = suggestion, "corrected sizeof... operand");
        let declared_at = self.ast.decl(corrected).span;
        let diag = Diagnostic::error(ErrorCode::E4003)
            .with_message(format!(
                "'{spelling}' does not refer to the name of a parameter pack; did you mean '{suggestion}'?"
            ))
            .with_label(name_span, "unknown name")
            .with_secondary_label(declared_at, "parameter pack declared here")
            .with_suggestion(Suggestion::maybe_incorrect(
                format!("replace with '{suggestion}'"),
                name_span,
                suggestion,
            ));
        self.emit_error(diag);
        Some(corrected)
    }

    fn ambiguous_pack_name(
        &mut self,
        name: Name,
        name_span: Span,
        candidates: &[DeclId],
    ) -> ErrorGuaranteed {
        let spelling = self.ast.name_str(name);
        let mut diag = Diagnostic::error(ErrorCode::E4004)
            .with_message(format!("reference to '{spelling}' is ambiguous"))
            .with_label(name_span, "ambiguous name");
        for &candidate in candidates {
            diag = diag.with_secondary_label(self.ast.decl(candidate).span, "candidate found here");
        }
        self.emit_error(diag)
    }
}
