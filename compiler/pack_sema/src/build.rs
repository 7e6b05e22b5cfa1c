//! Building pack expansions.
//!
//! `pattern...` is only well formed when the pattern names a pack that is
//! not already expanded. A type pattern may instead contain an undeduced
//! `auto`, for the init-capture `...xs = args` desugaring.

use pack_diagnostic::{Diagnostic, ErrorCode, ErrorGuaranteed};
use pack_ir::{ExprId, ExprKind, Span, TemplateArgument, TemplateName, TypeId, TypeKind};

use crate::Sema;

/// A template argument as the parser hands it over, before it is known
/// whether it will be expanded.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum ParsedTemplateArgument {
    Type(TypeId),
    NonType(ExprId),
    Template {
        name: TemplateName,
        span: Span,
        /// The nested-name-specifier in front of the name, if any.
        qualifier: Option<Span>,
    },
}

impl Sema {
    /// `pattern...` for a written type.
    pub fn act_on_pack_expansion_type(
        &mut self,
        pattern: TypeId,
        ellipsis: Span,
    ) -> Result<TypeId, ErrorGuaranteed> {
        let pattern_range = self.ast.ty(pattern).span.unwrap_or(ellipsis);
        self.check_pack_expansion_type(pattern, pattern_range, ellipsis, None)
    }

    /// Build a pack-expansion type with an optional known length.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn check_pack_expansion_type(
        &mut self,
        pattern: TypeId,
        pattern_range: Span,
        ellipsis: Span,
        num_expansions: Option<u32>,
    ) -> Result<TypeId, ErrorGuaranteed> {
        let flags = self.ast.ty(pattern).flags;
        if !flags.contains_unexpanded_pack() && !flags.contains_deduced_type() {
            return Err(self.expansion_without_packs(ellipsis, pattern_range));
        }
        Ok(self.ast.alloc_type(
            TypeKind::PackExpansion {
                pattern,
                ellipsis,
                num_expansions,
            },
            Some(pattern_range.merge(ellipsis)),
        ))
    }

    /// `pattern...` for a written expression.
    pub fn act_on_pack_expansion_expr(
        &mut self,
        pattern: ExprId,
        ellipsis: Span,
    ) -> Result<ExprId, ErrorGuaranteed> {
        self.check_pack_expansion_expr(pattern, ellipsis, None)
    }

    /// Build a pack-expansion expression with an optional known length.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn check_pack_expansion_expr(
        &mut self,
        pattern: ExprId,
        ellipsis: Span,
        num_expansions: Option<u32>,
    ) -> Result<ExprId, ErrorGuaranteed> {
        let node = self.ast.expr(pattern);
        if !node.flags.contains_unexpanded_pack() {
            let pattern_range = node.span;
            return Err(self.expansion_without_packs(ellipsis, pattern_range));
        }
        let span = node.span.merge(ellipsis);
        Ok(self.ast.alloc_expr(
            ExprKind::PackExpansion {
                pattern,
                ellipsis,
                num_expansions,
            },
            span,
        ))
    }

    /// `arg...` in a template argument list.
    pub fn act_on_template_argument_expansion(
        &mut self,
        arg: ParsedTemplateArgument,
        ellipsis: Span,
    ) -> Result<TemplateArgument, ErrorGuaranteed> {
        match arg {
            ParsedTemplateArgument::Type(ty) => self
                .act_on_pack_expansion_type(ty, ellipsis)
                .map(TemplateArgument::Type),
            ParsedTemplateArgument::NonType(expr) => self
                .act_on_pack_expansion_expr(expr, ellipsis)
                .map(TemplateArgument::Expr),
            ParsedTemplateArgument::Template {
                name,
                span,
                qualifier,
            } => {
                if !self.ast.template_name_flags(&name).contains_unexpanded_pack() {
                    let range = qualifier.map_or(span, |qualifier| qualifier.merge(span));
                    return Err(self.expansion_without_packs(ellipsis, range));
                }
                Ok(TemplateArgument::TemplateExpansion {
                    template: name,
                    ellipsis,
                    num_expansions: None,
                })
            }
        }
    }

    pub(crate) fn expansion_without_packs(
        &mut self,
        ellipsis: Span,
        pattern_range: Span,
    ) -> ErrorGuaranteed {
        let diag = Diagnostic::error(ErrorCode::E1002)
            .with_message("pack expansion does not contain any unexpanded parameter packs")
            .with_label(ellipsis, "nothing to expand")
            .with_secondary_label(pattern_range, "pattern names no parameter pack");
        self.emit_error(diag)
    }
}
