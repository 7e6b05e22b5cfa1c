//! Bottom-up computation of [`NodeFlags`].
//!
//! Rules:
//! - a reference to a parameter pack (declaration, type parameter,
//!   template template parameter, or an already-substituted pack) is
//!   `PACK_REFERENCE`;
//! - a pack expansion, fold, or pack index keeps everything of its pattern
//!   except the unexpanded-pack bit;
//! - lambdas and blocks do not inherit from their bodies: semantic analysis
//!   decides whether one contains an unexpanded pack;
//! - everything else is the union of its children.

use super::AstContext;
use crate::ast::{
    Attr, DeclKind, DictionaryElement, ExprKind, PackIndexing, StmtKind, TemplateArgument,
    TemplateName, TypeKind,
};
use crate::{DeclId, ExprId, NodeFlags, StmtId, TypeId};

impl AstContext {
    #[inline]
    fn expr_flags(&self, id: ExprId) -> NodeFlags {
        self.expr(id).flags
    }

    #[inline]
    fn type_flags(&self, id: TypeId) -> NodeFlags {
        self.ty(id).flags
    }

    #[inline]
    fn stmt_flags(&self, id: StmtId) -> NodeFlags {
        self.stmt(id).flags
    }

    fn exprs_flags(&self, ids: &[ExprId]) -> NodeFlags {
        NodeFlags::propagate_all(ids.iter().map(|&id| self.expr_flags(id)))
    }

    pub(super) fn expr_kind_flags(&self, kind: &ExprKind) -> NodeFlags {
        match kind {
            ExprKind::IntLiteral(_) | ExprKind::BoolLiteral(_) => NodeFlags::empty(),
            ExprKind::DeclRef(decl) => self.decl_ref_flags(*decl),
            ExprKind::Binary { lhs, rhs, .. } | ExprKind::OperatorCall { lhs, rhs, .. } => {
                self.expr_flags(*lhs) | self.expr_flags(*rhs)
            }
            ExprKind::Conditional {
                cond,
                then_expr,
                else_expr,
            } => self.exprs_flags(&[*cond, *then_expr, *else_expr]),
            ExprKind::Call { callee, args } => self.expr_flags(*callee) | self.exprs_flags(args),
            ExprKind::Paren(inner) | ExprKind::ImplicitCast(inner) => self.expr_flags(*inner),
            ExprKind::Construct { ty, args } => self.type_flags(*ty) | self.exprs_flags(args),
            ExprKind::PackExpansion { pattern, .. } => self.expr_flags(*pattern).expanded(),
            ExprKind::Fold(fold) => {
                let operands = fold.lhs.iter().chain(fold.rhs.iter());
                NodeFlags::propagate_all(operands.map(|&e| self.expr_flags(e))).expanded()
            }
            ExprKind::PackIndexing(indexing) => self.pack_indexing_flags(indexing),
            ExprKind::SizeOfPack { .. } => NodeFlags::INSTANTIATION_DEPENDENT,
            ExprKind::SubstNonTypeTemplateParmPack { .. } | ExprKind::FunctionParmPack { .. } => {
                NodeFlags::PACK_REFERENCE
            }
            ExprKind::Lambda(lambda) => closure_flags(lambda.contains_unexpanded_pack),
            ExprKind::Block(block) => closure_flags(block.contains_unexpanded_pack),
            ExprKind::DictionaryLiteral(elements) => self.dictionary_flags(elements),
            ExprKind::StmtExpr(stmt) => self.stmt_flags(*stmt),
            ExprKind::Requires {
                params,
                requirements,
            } => {
                let params = NodeFlags::propagate_all(params.iter().map(|&p| self.decl_flags(p)));
                params | self.exprs_flags(requirements)
            }
            ExprKind::ScalarValueInit(ty) => self.type_flags(*ty),
            ExprKind::Recovery => NodeFlags::CONTAINS_ERRORS,
        }
    }

    fn decl_ref_flags(&self, decl: DeclId) -> NodeFlags {
        let decl = self.decl(decl);
        if decl.is_parameter_pack() {
            return NodeFlags::PACK_REFERENCE;
        }
        match &decl.kind {
            DeclKind::NonTypeTemplateParm { .. } | DeclKind::TemplateTemplateParm { .. } => {
                NodeFlags::INSTANTIATION_DEPENDENT
            }
            DeclKind::Var { ty, .. } => self.type_flags(*ty) & NodeFlags::INSTANTIATION_DEPENDENT,
            _ => NodeFlags::empty(),
        }
    }

    fn pack_indexing_flags(&self, indexing: &PackIndexing) -> NodeFlags {
        let index = self.expr_flags(indexing.index);
        if !indexing.fully_substituted || indexing.expansions.is_empty() {
            return index
                | self.expr_flags(indexing.pack).expanded()
                | NodeFlags::INSTANTIATION_DEPENDENT;
        }
        let selected = indexing
            .resolved_index
            .and_then(|i| usize::try_from(i).ok())
            .and_then(|i| indexing.expansions.get(i));
        match selected {
            Some(&element) => index | self.expr_flags(element),
            None => index | self.exprs_flags(&indexing.expansions).expanded(),
        }
    }

    fn dictionary_flags(&self, elements: &[DictionaryElement]) -> NodeFlags {
        NodeFlags::propagate_all(elements.iter().map(|element| {
            let flags = self.expr_flags(element.key) | self.expr_flags(element.value);
            if element.is_pack_expansion() {
                flags.expanded()
            } else {
                flags
            }
        }))
    }

    pub(super) fn type_kind_flags(&self, kind: &TypeKind) -> NodeFlags {
        match kind {
            TypeKind::Builtin(_) | TypeKind::Record(_) => NodeFlags::empty(),
            TypeKind::TemplateTypeParm(param) => {
                if param.is_pack {
                    NodeFlags::PACK_REFERENCE
                } else {
                    NodeFlags::INSTANTIATION_DEPENDENT
                }
            }
            TypeKind::Pointer(inner)
            | TypeKind::LValueReference(inner)
            | TypeKind::RValueReference(inner) => self.type_flags(*inner),
            TypeKind::Array { element, bound } => {
                self.type_flags(*element) | bound.map_or(NodeFlags::empty(), |b| self.expr_flags(b))
            }
            TypeKind::Function { params, result } => {
                NodeFlags::propagate_all(params.iter().map(|&p| self.type_flags(p)))
                    | self.type_flags(*result)
            }
            TypeKind::Specialization { template, args } => {
                self.template_name_flags(template)
                    | NodeFlags::propagate_all(args.iter().map(|a| self.template_argument_flags(a)))
            }
            TypeKind::PackExpansion { pattern, .. } => self.type_flags(*pattern).expanded(),
            TypeKind::PackIndexing { pattern, index } => {
                self.type_flags(*pattern).expanded()
                    | self.expr_flags(*index)
                    | NodeFlags::INSTANTIATION_DEPENDENT
            }
            TypeKind::Decltype(expr) => self.expr_flags(*expr),
            TypeKind::Deduced { deduced: Some(ty) } => self.type_flags(*ty),
            TypeKind::Deduced { deduced: None } => NodeFlags::CONTAINS_DEDUCED_TYPE,
            TypeKind::SubstTemplateTypeParmPack { .. } => NodeFlags::PACK_REFERENCE,
            TypeKind::Error => NodeFlags::CONTAINS_ERRORS,
        }
    }

    pub(super) fn stmt_kind_flags(&self, kind: &StmtKind) -> NodeFlags {
        match kind {
            StmtKind::Compound(stmts) => {
                NodeFlags::propagate_all(stmts.iter().map(|&s| self.stmt_flags(s)))
            }
            StmtKind::Expr(expr) | StmtKind::Return(Some(expr)) => self.expr_flags(*expr),
            StmtKind::Decl(decls) => {
                NodeFlags::propagate_all(decls.iter().map(|&d| self.decl_flags(d)))
            }
            StmtKind::Return(None) | StmtKind::Null => NodeFlags::empty(),
        }
    }

    /// Flags of a template argument.
    pub fn template_argument_flags(&self, arg: &TemplateArgument) -> NodeFlags {
        match arg {
            TemplateArgument::Null | TemplateArgument::Integral(_) => NodeFlags::empty(),
            TemplateArgument::Type(ty) => self.type_flags(*ty),
            TemplateArgument::Expr(expr) => self.expr_flags(*expr),
            TemplateArgument::Template(name) => self.template_name_flags(name),
            TemplateArgument::TemplateExpansion { template, .. } => {
                self.template_name_flags(template).expanded()
            }
            TemplateArgument::Pack(elements) => {
                NodeFlags::propagate_all(elements.iter().map(|e| self.template_argument_flags(e)))
            }
        }
    }

    /// Flags of a template name.
    pub fn template_name_flags(&self, name: &TemplateName) -> NodeFlags {
        match name {
            TemplateName::Decl(decl) => match self.decl(*decl).kind {
                DeclKind::TemplateTemplateParm { is_pack: true, .. } => NodeFlags::PACK_REFERENCE,
                DeclKind::TemplateTemplateParm { is_pack: false, .. } => {
                    NodeFlags::INSTANTIATION_DEPENDENT
                }
                _ => NodeFlags::empty(),
            },
            TemplateName::SubstPack { .. } => NodeFlags::PACK_REFERENCE,
        }
    }

    /// Flags of a declaration, computed on demand.
    ///
    /// A parameter pack declaration is itself an expansion, so its flags
    /// never carry the unexpanded-pack bit.
    pub fn decl_flags(&self, id: DeclId) -> NodeFlags {
        let decl = self.decl(id);
        let attrs = NodeFlags::propagate_all(decl.attrs.iter().map(|a| self.attr_flags(a)));
        let own = match &decl.kind {
            DeclKind::TemplateTypeParm { default, .. } => {
                default.map_or(NodeFlags::empty(), |ty| self.type_flags(ty))
            }
            DeclKind::NonTypeTemplateParm { ty, .. } => self.type_flags(*ty),
            DeclKind::TemplateTemplateParm { .. } => NodeFlags::empty(),
            DeclKind::Var { ty, init, .. } => {
                self.type_flags(*ty) | init.map_or(NodeFlags::empty(), |e| self.expr_flags(e))
            }
            DeclKind::Binding { binding, .. } => {
                binding.map_or(NodeFlags::empty(), |e| self.expr_flags(e))
            }
            DeclKind::Function {
                params,
                result,
                ctor_inits,
                body,
                ..
            } => {
                let params = NodeFlags::propagate_all(params.iter().map(|&p| self.decl_flags(p)));
                let inits = NodeFlags::propagate_all(ctor_inits.iter().map(|init| {
                    let flags = init.base.map_or(NodeFlags::empty(), |b| self.type_flags(b))
                        | self.exprs_flags(&init.args);
                    if init.is_pack_expansion() {
                        flags.expanded()
                    } else {
                        flags
                    }
                }));
                params
                    | inits
                    | result.map_or(NodeFlags::empty(), |r| self.type_flags(r))
                    | body.map_or(NodeFlags::empty(), |b| self.stmt_flags(b))
            }
            DeclKind::Record { bases, members } => {
                let bases = NodeFlags::propagate_all(bases.iter().map(|base| {
                    let flags = self.type_flags(base.ty);
                    if base.is_pack_expansion() {
                        flags.expanded()
                    } else {
                        flags
                    }
                }));
                bases | NodeFlags::propagate_all(members.iter().map(|&m| self.decl_flags(m)))
            }
            DeclKind::UnresolvedUsingValue {
                qualifier,
                ellipsis,
            }
            | DeclKind::UnresolvedUsingTypename {
                qualifier,
                ellipsis,
            } => {
                let flags = self.type_flags(*qualifier);
                if ellipsis.is_some() {
                    flags.expanded()
                } else {
                    flags
                }
            }
        };
        let flags = own | attrs;
        if decl.is_parameter_pack() {
            flags.expanded()
        } else {
            flags
        }
    }

    fn attr_flags(&self, attr: &Attr) -> NodeFlags {
        let flags = self.exprs_flags(&attr.args);
        if attr.is_pack_expansion() {
            flags.expanded()
        } else {
            flags
        }
    }
}

const fn closure_flags(contains_unexpanded_pack: bool) -> NodeFlags {
    if contains_unexpanded_pack {
        NodeFlags::PACK_REFERENCE
    } else {
        NodeFlags::empty()
    }
}
