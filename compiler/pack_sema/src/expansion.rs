//! Expansion-size resolution.
//!
//! Given the packs a pattern mentions, decide how many times the pattern is
//! repeated. Every pack bound to a known length must agree on it. A pack that
//! is not bound yet is not an error: the expansion waits for a later, more
//! substituted instantiation.
//!
//! Sizes come from two places. Template parameter packs are looked up by
//! `(depth, index)` in the [`MultiLevelTemplateArgs`]; function parameter
//! packs and binding packs are looked up in the local instantiation scope.

use pack_diagnostic::{Diagnostic, ErrorCode, ErrorGuaranteed};
use pack_ir::{DeclId, DeclKind, ExprId, ExprKind, Span, TemplateArgument, TemplateName, TypeId, TypeKind};

use crate::collect::{collect_expr, collect_type};
use crate::instantiate::{Instantiation, MultiLevelTemplateArgs};
use crate::unexpanded::{PackEntity, UnexpandedPack};
use crate::Sema;

/// The outcome of sizing one pack expansion.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct ExpansionPlan {
    /// Every pack is bound; the pattern can be instantiated
    /// `num_expansions` times.
    pub should_expand: bool,
    /// Keep the expansion node after instantiating it: a partially
    /// substituted pack may still receive arguments.
    pub retain_expansion: bool,
    pub num_expansions: Option<u32>,
}

impl ExpansionPlan {
    /// Ready to expand into a known number of copies.
    pub fn is_ready(&self) -> bool {
        self.should_expand && self.num_expansions.is_some()
    }
}

/// A pack-expansion template argument split into its parts.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ExpansionPattern {
    pub pattern: TemplateArgument,
    pub ellipsis: Span,
    pub num_expansions: Option<u32>,
}

/// Size of one bound pack. `pending` counts elements that are themselves
/// expansions of unknown length.
#[derive(Copy, Clone, Debug)]
struct PackSize {
    size: u32,
    pending: u32,
}

fn len_u32(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}

impl Sema {
    /// Decide whether the expansion of a pattern mentioning `packs` can be
    /// instantiated now, and how many times.
    ///
    /// `known_expansions` is a length an outer level already fixed; a pack
    /// that disagrees with it is reported against the outer level.
    ///
    /// Returns `Err` only after reporting a length conflict. A pack that is
    /// not bound yet yields `should_expand == false` and no diagnostic.
    #[tracing::instrument(
        level = "trace",
        skip_all,
        fields(packs = packs.len(), known = ?known_expansions)
    )]
    pub fn check_parameter_packs_for_expansion(
        &mut self,
        ellipsis: Span,
        pattern_range: Span,
        packs: &[UnexpandedPack],
        args: &MultiLevelTemplateArgs,
        known_expansions: Option<u32>,
    ) -> Result<ExpansionPlan, ErrorGuaranteed> {
        let mut plan = ExpansionPlan {
            should_expand: true,
            retain_expansion: false,
            num_expansions: known_expansions,
        };
        let mut first: Option<&UnexpandedPack> = None;
        let mut partial: Option<(u32, &UnexpandedPack)> = None;
        let partial_coords = self
            .instantiation
            .partially_substituted_pack()
            .and_then(|partial| self.ast.decl(partial.pack).depth_and_index());

        for pack in packs {
            let Some(PackSize { size, pending }) = self.bound_pack_size(pack, args) else {
                tracing::trace!(pack = self.pack_name(pack), "pack not bound yet");
                plan.should_expand = false;
                continue;
            };

            let coords = pack.depth_and_index(&self.ast);
            if coords.is_some() && coords == partial_coords {
                plan.retain_expansion = true;
                partial = Some((size, pack));
                continue;
            }

            match plan.num_expansions {
                None => {
                    plan.num_expansions = Some(size);
                    first = Some(pack);
                }
                Some(expected) if expected != size => {
                    // An element of unknown length may still absorb the
                    // difference.
                    if pending > 0 && size - pending <= expected {
                        tracing::trace!(
                            pack = self.pack_name(pack),
                            size,
                            pending,
                            expected,
                            "length undecided until pending elements expand"
                        );
                        plan.should_expand = false;
                        continue;
                    }
                    let diag = self.length_conflict(
                        ellipsis,
                        pattern_range,
                        first,
                        pack,
                        expected,
                        PackSize { size, pending },
                    );
                    return Err(self.emit_error(diag));
                }
                Some(_) => {}
            }
        }

        if let Some((partial_size, pack)) = partial {
            if let Some(full) = plan.num_expansions.filter(|&full| full < partial_size) {
                let name = self.pack_name(pack);
                let mut diag = Diagnostic::error(ErrorCode::E2003)
                    .with_message(format!(
                        "partially substituted pack '{name}' has {partial_size} arguments, \
                         more than the {full} of the expansion"
                    ))
                    .with_label(ellipsis, "expansion length fixed here")
                    .with_secondary_label(pattern_range, "pattern");
                if let Some(span) = pack.span {
                    diag = diag.with_secondary_label(span, format!("'{name}' referenced here"));
                }
                return Err(self.emit_error(diag));
            }
            plan.num_expansions = Some(partial_size);
        }

        tracing::debug!(
            should_expand = plan.should_expand,
            retain = plan.retain_expansion,
            count = ?plan.num_expansions,
            "sized pack expansion"
        );
        Ok(plan)
    }

    fn length_conflict(
        &self,
        ellipsis: Span,
        pattern_range: Span,
        first: Option<&UnexpandedPack>,
        conflicting: &UnexpandedPack,
        expected: u32,
        found: PackSize,
    ) -> Diagnostic {
        let name = self.pack_name(conflicting);
        let least = found.size - found.pending;
        let found_text = if found.pending > 0 {
            format!("at least {least}")
        } else {
            found.size.to_string()
        };

        let mut diag = match first {
            Some(first_pack) => {
                let first_name = self.pack_name(first_pack);
                let mut diag = Diagnostic::error(ErrorCode::E2001).with_message(format!(
                    "pack expansion contains parameter packs '{first_name}' and '{name}' \
                     that have different lengths ({expected} vs. {found_text})"
                ));
                if let Some(span) = first_pack.span {
                    diag = diag.with_secondary_label(
                        span,
                        format!("'{first_name}' has {expected} elements"),
                    );
                }
                diag
            }
            None => Diagnostic::error(ErrorCode::E2002).with_message(format!(
                "pack expansion contains parameter pack '{name}' that has a different \
                 length ({expected} vs. {found_text}) from outer parameter packs"
            )),
        };
        diag = diag
            .with_label(ellipsis, "packs expanded here")
            .with_secondary_label(pattern_range, "pattern");
        if let Some(span) = conflicting.span {
            diag = diag.with_secondary_label(span, format!("'{name}' has {found_text} elements"));
        }
        diag
    }

    fn pack_name(&self, pack: &UnexpandedPack) -> &'static str {
        self.ast.name_str(pack.name(&self.ast))
    }

    /// Length of a pack that is bound, `None` while it is not.
    fn bound_pack_size(
        &self,
        pack: &UnexpandedPack,
        args: &MultiLevelTemplateArgs,
    ) -> Option<PackSize> {
        if let Some((depth, index)) = pack.depth_and_index(&self.ast) {
            let elements = args.pack_elements(depth, index)?;
            let pending = elements
                .iter()
                .filter(|element| {
                    self.ast.is_pack_expansion(element)
                        && self.ast.expansion_count(element).is_none()
                })
                .count();
            return Some(PackSize {
                size: len_u32(elements.len()),
                pending: len_u32(pending),
            });
        }
        let PackEntity::Decl(decl) = pack.entity else {
            return None;
        };
        self.local_pack_size(decl).map(|size| PackSize { size, pending: 0 })
    }

    /// Length of a function parameter pack or binding pack from the local
    /// instantiation scope.
    fn local_pack_size(&self, decl: DeclId) -> Option<u32> {
        let instantiated = match self.instantiation.find_instantiation_of(decl)? {
            Instantiation::Pack(elements) => return Some(len_u32(elements.len())),
            Instantiation::Decl(instantiated) => *instantiated,
        };
        // Any other pack still mapped to a single declaration is not
        // expanded yet.
        if !matches!(self.ast.decl(decl).kind, DeclKind::Binding { .. }) {
            return None;
        }
        // A binding pack is instantiated to a binding whose value lists the
        // expanded declarations.
        let DeclKind::Binding {
            binding: Some(value),
            ..
        } = self.ast.decl(instantiated).kind
        else {
            return None;
        };
        match &self.ast.expr(value).kind {
            ExprKind::FunctionParmPack { expansions, .. } => Some(len_u32(expansions.len())),
            _ => None,
        }
    }

    // === Length queries without diagnostics ===

    /// Common length of `packs`, or `None` when any of them is not bound.
    pub fn num_arguments_in_expansion_of_packs(
        &self,
        packs: &[UnexpandedPack],
        args: &MultiLevelTemplateArgs,
    ) -> Option<u32> {
        let mut result = None;
        for pack in packs {
            let size = match pack.depth_and_index(&self.ast) {
                Some((depth, index)) => len_u32(args.pack_elements(depth, index)?.len()),
                None => match pack.entity {
                    PackEntity::Decl(decl) => self.local_pack_size(decl)?,
                    PackEntity::TypeParam(_) => return None,
                },
            };
            debug_assert!(
                !matches!(result, Some(previous) if previous != size),
                "inconsistent pack sizes"
            );
            result = Some(size);
        }
        result
    }

    /// Length of a pack-expansion type, from the packs in its pattern.
    pub fn num_arguments_in_expansion(
        &self,
        expansion: TypeId,
        args: &MultiLevelTemplateArgs,
    ) -> Option<u32> {
        let pattern = match self.ast.ty(expansion).kind {
            TypeKind::PackExpansion { pattern, .. } => pattern,
            _ => expansion,
        };
        let packs = collect_type(&self.ast, pattern);
        self.num_arguments_in_expansion_of_packs(&packs, args)
    }

    /// Length of the expansion of an expression pattern.
    pub fn num_arguments_in_expansion_of_expr(
        &self,
        pattern: ExprId,
        args: &MultiLevelTemplateArgs,
    ) -> Option<u32> {
        let packs = collect_expr(&self.ast, pattern);
        self.num_arguments_in_expansion_of_packs(&packs, args)
    }

    /// Length of an argument that is a pack substitution already replaced
    /// by its arguments, when every argument is final.
    ///
    /// `None` when the argument is not such a substitution, or when an
    /// element is itself an expansion or still mentions an unexpanded pack.
    pub fn fully_pack_expanded_size(&self, arg: &TemplateArgument) -> Option<u32> {
        let pack: &[TemplateArgument] = match arg {
            TemplateArgument::Type(ty) => match &self.ast.ty(*ty).kind {
                TypeKind::SubstTemplateTypeParmPack { pack, .. } => pack,
                _ => return None,
            },
            TemplateArgument::Expr(expr) => match &self.ast.expr(*expr).kind {
                ExprKind::SubstNonTypeTemplateParmPack { pack, .. } => pack,
                ExprKind::FunctionParmPack { expansions, .. } => {
                    if expansions
                        .iter()
                        .any(|&decl| self.ast.decl(decl).is_parameter_pack())
                    {
                        return None;
                    }
                    return Some(len_u32(expansions.len()));
                }
                _ => return None,
            },
            TemplateArgument::Template(TemplateName::SubstPack { pack, .. }) => pack,
            _ => return None,
        };

        let settled = pack.iter().all(|element| {
            !self.ast.is_pack_expansion(element)
                && !self
                    .ast
                    .template_argument_flags(element)
                    .contains_unexpanded_pack()
        });
        settled.then(|| len_u32(pack.len()))
    }

    /// Split a pack-expansion template argument into pattern, ellipsis and
    /// count. `None` for an argument that is not an expansion.
    pub fn pack_expansion_pattern(&self, arg: &TemplateArgument) -> Option<ExpansionPattern> {
        match arg {
            TemplateArgument::Type(ty) => match self.ast.ty(*ty).kind {
                TypeKind::PackExpansion {
                    pattern,
                    ellipsis,
                    num_expansions,
                } => Some(ExpansionPattern {
                    pattern: TemplateArgument::Type(pattern),
                    ellipsis,
                    num_expansions,
                }),
                _ => None,
            },
            TemplateArgument::Expr(expr) => match self.ast.expr(*expr).kind {
                ExprKind::PackExpansion {
                    pattern,
                    ellipsis,
                    num_expansions,
                } => Some(ExpansionPattern {
                    pattern: TemplateArgument::Expr(pattern),
                    ellipsis,
                    num_expansions,
                }),
                _ => None,
            },
            TemplateArgument::TemplateExpansion {
                template,
                ellipsis,
                num_expansions,
            } => Some(ExpansionPattern {
                pattern: TemplateArgument::Template(template.clone()),
                ellipsis: *ellipsis,
                num_expansions: *num_expansions,
            }),
            TemplateArgument::Null
            | TemplateArgument::Template(_)
            | TemplateArgument::Integral(_)
            | TemplateArgument::Pack(_) => None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests use unwrap for brevity")]
mod tests;
