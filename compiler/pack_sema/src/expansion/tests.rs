use super::*;
use crate::SemaConfig;
use pack_ir::{AstContext, BuiltinType, DeclKind, TemplateParamList, TypeParamType};
use pretty_assertions::assert_eq;

fn sp(start: u32) -> Span {
    Span::new(start, start + 1)
}

/// `template<typename... Ts, typename... Us, int... Ns> void f(Ts... xs);`
struct Fixture {
    sema: Sema,
    ts: DeclId,
    us: DeclId,
    ns: DeclId,
    xs: DeclId,
    int: TypeId,
}

fn fixture() -> Fixture {
    let mut ast = AstContext::new();
    let ts = ast.template_type_parm("Ts", 0, 0, true, sp(0));
    let us = ast.template_type_parm("Us", 0, 1, true, sp(1));
    let ns = ast.non_type_template_parm("Ns", 0, 2, true, sp(2));
    let ts_ty = ast.type_param_ref(ts, Some(sp(4)));
    let xs_ty = ast.pack_expansion_type(ts_ty, sp(5), None);
    let xs = ast.var("xs", xs_ty, true, sp(8));
    ast.function(
        "f",
        Some(TemplateParamList {
            depth: 0,
            params: vec![ts, us, ns],
            span: sp(0),
        }),
        vec![xs],
        None,
        sp(10),
    );
    let int = ast.builtin(BuiltinType::Int);
    Fixture {
        sema: Sema::with_config(ast, SemaConfig::for_testing()),
        ts,
        us,
        ns,
        xs,
        int,
    }
}

impl Fixture {
    fn type_param(&self, decl: DeclId) -> TypeParamType {
        match self.sema.ast().decl(decl).kind {
            DeclKind::TemplateTypeParm { param, .. } => param,
            _ => unreachable!(),
        }
    }

    fn ty_ref(&self, decl: DeclId, at: u32) -> UnexpandedPack {
        UnexpandedPack::type_param(self.type_param(decl), Some(sp(at)))
    }

    fn types(&self, count: usize) -> TemplateArgument {
        TemplateArgument::Pack(vec![TemplateArgument::Type(self.int); count])
    }

    fn check(
        &mut self,
        packs: &[UnexpandedPack],
        args: &MultiLevelTemplateArgs,
        known: Option<u32>,
    ) -> Result<ExpansionPlan, ErrorGuaranteed> {
        self.sema
            .check_parameter_packs_for_expansion(sp(40), Span::new(30, 40), packs, args, known)
    }
}

fn ready(count: u32) -> ExpansionPlan {
    ExpansionPlan {
        should_expand: true,
        retain_expansion: false,
        num_expansions: Some(count),
    }
}

#[test]
fn test_equal_lengths_expand() {
    let mut fx = fixture();
    let args = MultiLevelTemplateArgs::single(vec![fx.types(3), fx.types(3)]);
    let packs = [fx.ty_ref(fx.ts, 30), fx.ty_ref(fx.us, 33), fx.ty_ref(fx.ts, 36)];

    let plan = fx.check(&packs, &args, None).unwrap();

    assert_eq!(plan, ready(3));
    assert!(plan.is_ready());
    assert!(fx.sema.diagnostics().is_empty());
}

#[test]
fn test_length_conflict_names_both_packs() {
    let mut fx = fixture();
    let args = MultiLevelTemplateArgs::single(vec![fx.types(3), fx.types(5)]);
    let packs = [fx.ty_ref(fx.ts, 30), fx.ty_ref(fx.us, 33)];

    assert!(fx.check(&packs, &args, None).is_err());

    let diag = &fx.sema.diagnostics().diagnostics()[0];
    assert_eq!(diag.code, ErrorCode::E2001);
    assert_eq!(
        diag.message,
        "pack expansion contains parameter packs 'Ts' and 'Us' that have different lengths (3 vs. 5)"
    );
    assert_eq!(diag.primary_span(), Some(sp(40)));
    assert_eq!(
        diag.secondary_spans().collect::<Vec<_>>(),
        vec![sp(30), Span::new(30, 40), sp(33)]
    );
}

#[test]
fn test_unbound_pack_defers_without_diagnostic() {
    let mut fx = fixture();
    let args = MultiLevelTemplateArgs::single(vec![TemplateArgument::Null, fx.types(2)]);
    let packs = [fx.ty_ref(fx.ts, 30), fx.ty_ref(fx.us, 33)];

    let plan = fx.check(&packs, &args, None).unwrap();

    assert!(!plan.should_expand);
    assert!(!plan.is_ready());
    assert_eq!(plan.num_expansions, Some(2));
    assert!(fx.sema.diagnostics().is_empty());
}

#[test]
fn test_unbound_pack_does_not_hide_conflicts() {
    let mut fx = fixture();
    let three_ints = TemplateArgument::Pack(vec![TemplateArgument::Integral(1); 3]);
    let args = MultiLevelTemplateArgs::single(vec![TemplateArgument::Null, fx.types(2), three_ints]);
    let packs = [
        fx.ty_ref(fx.ts, 30),
        fx.ty_ref(fx.us, 33),
        UnexpandedPack::decl(fx.ns, Some(sp(36))),
    ];

    assert!(fx.check(&packs, &args, None).is_err());
    assert_eq!(
        fx.sema.diagnostics().diagnostics()[0].message,
        "pack expansion contains parameter packs 'Us' and 'Ns' that have different lengths (2 vs. 3)"
    );
}

#[test]
fn test_retained_outer_level_is_unbound() {
    let mut fx = fixture();
    let args = MultiLevelTemplateArgs::single(vec![fx.types(2)]).with_retained_outer_levels(1);

    let plan = fx.check(&[fx.ty_ref(fx.ts, 30)], &args, None).unwrap();

    assert!(!plan.should_expand);
    assert_eq!(plan.num_expansions, None);
}

#[test]
fn test_known_count_conflict_is_reported_against_outer_level() {
    let mut fx = fixture();
    let args = MultiLevelTemplateArgs::single(vec![fx.types(3)]);

    assert_eq!(fx.check(&[fx.ty_ref(fx.ts, 30)], &args, Some(3)).unwrap(), ready(3));
    assert!(fx.check(&[fx.ty_ref(fx.ts, 30)], &args, Some(2)).is_err());

    let diag = &fx.sema.diagnostics().diagnostics()[0];
    assert_eq!(diag.code, ErrorCode::E2002);
    assert_eq!(
        diag.message,
        "pack expansion contains parameter pack 'Ts' that has a different length (2 vs. 3) from outer parameter packs"
    );
}

#[test]
fn test_pending_elements_tolerate_shorter_lists() {
    let mut fx = fixture();
    let vs = fx.sema.ast_mut().template_type_parm("Vs", 1, 0, true, sp(20));
    let vs_ty = fx.sema.ast_mut().type_param_ref(vs, None);
    let pending = fx.sema.ast_mut().pack_expansion_type(vs_ty, sp(21), None);
    let int = TemplateArgument::Type(fx.int);

    // Us = {int, Vs...}: two elements, one of unknown length.
    let args = MultiLevelTemplateArgs::single(vec![
        fx.types(3),
        TemplateArgument::Pack(vec![int.clone(), TemplateArgument::Type(pending)]),
    ]);
    let plan = fx
        .check(&[fx.ty_ref(fx.ts, 30), fx.ty_ref(fx.us, 33)], &args, None)
        .unwrap();
    assert!(!plan.should_expand);
    assert_eq!(plan.num_expansions, Some(3));
    assert!(fx.sema.diagnostics().is_empty());

    // Us = {int, int, int, int, Vs...}: at least four, more than three.
    let args = MultiLevelTemplateArgs::single(vec![
        fx.types(3),
        TemplateArgument::Pack(vec![
            int.clone(),
            int.clone(),
            int.clone(),
            int,
            TemplateArgument::Type(pending),
        ]),
    ]);
    assert!(fx
        .check(&[fx.ty_ref(fx.ts, 30), fx.ty_ref(fx.us, 33)], &args, None)
        .is_err());
    assert_eq!(
        fx.sema.diagnostics().diagnostics()[0].message,
        "pack expansion contains parameter packs 'Ts' and 'Us' that have different lengths (3 vs. at least 4)"
    );
}

#[test]
fn test_expansion_with_known_count_is_not_pending() {
    let mut fx = fixture();
    let vs = fx.sema.ast_mut().template_type_parm("Vs", 1, 0, true, sp(20));
    let vs_ty = fx.sema.ast_mut().type_param_ref(vs, None);
    let sized = fx.sema.ast_mut().pack_expansion_type(vs_ty, sp(21), Some(4));
    let args = MultiLevelTemplateArgs::single(vec![
        fx.types(3),
        TemplateArgument::Pack(vec![TemplateArgument::Type(fx.int), TemplateArgument::Type(sized)]),
    ]);

    assert!(fx
        .check(&[fx.ty_ref(fx.ts, 30), fx.ty_ref(fx.us, 33)], &args, None)
        .is_err());
    assert_eq!(fx.sema.diagnostics().codes(), vec![ErrorCode::E2001]);
}

#[test]
fn test_function_parameter_pack_uses_instantiation_scope() {
    let mut fx = fixture();
    let args = MultiLevelTemplateArgs::single(vec![fx.types(2)]);
    let xs = fx.xs;
    let packs = [fx.ty_ref(fx.ts, 30), UnexpandedPack::decl(xs, Some(sp(33)))];

    let plan = fx.sema.with_instantiation_scope(false, |sema| {
        let scope = sema.instantiation_scope_mut();
        scope.make_instantiated_local_pack(xs).unwrap();
        scope.instantiated_local_pack_arg(xs, DeclId::new(100)).unwrap();
        scope.instantiated_local_pack_arg(xs, DeclId::new(101)).unwrap();
        sema.check_parameter_packs_for_expansion(sp(40), sp(30), &packs, &args, None)
    });

    assert_eq!(plan.unwrap(), ready(2));
}

#[test]
fn test_unexpanded_function_parameter_pack_is_not_ready() {
    let mut fx = fixture();
    let xs = fx.xs;
    let int = fx.int;
    let instantiated = fx.sema.ast_mut().var("xs", int, true, sp(90));
    let packs = [UnexpandedPack::decl(xs, Some(sp(33)))];
    let args = MultiLevelTemplateArgs::new();

    let plan = fx.sema.with_instantiation_scope(false, |sema| {
        sema.instantiation_scope_mut()
            .instantiated_local(xs, instantiated)
            .unwrap();
        sema.check_parameter_packs_for_expansion(sp(40), sp(30), &packs, &args, None)
    });
    assert!(!plan.unwrap().should_expand);

    // Not in scope at all.
    let plan = fx.check(&packs, &args, None).unwrap();
    assert!(!plan.should_expand);
    assert!(fx.sema.diagnostics().is_empty());
}

#[test]
fn test_variable_pack_is_not_sized_through_a_binding() {
    let mut fx = fixture();
    let xs = fx.xs;
    let ast = fx.sema.ast_mut();
    let element = ast.binding("b0", false, sp(91));
    let expanded = ast.alloc_expr(
        ExprKind::FunctionParmPack {
            param: xs,
            expansions: vec![element],
        },
        sp(92),
    );
    let binding = ast.binding("bs", true, sp(93));
    ast.decl_mut(binding).kind = DeclKind::Binding {
        binding: Some(expanded),
        is_pack: true,
    };
    let packs = [UnexpandedPack::decl(xs, Some(sp(33)))];
    let args = MultiLevelTemplateArgs::new();

    let plan = fx.sema.with_instantiation_scope(false, |sema| {
        sema.instantiation_scope_mut()
            .instantiated_local(xs, binding)
            .unwrap();
        sema.check_parameter_packs_for_expansion(sp(40), sp(30), &packs, &args, None)
    });

    let plan = plan.unwrap();
    assert!(!plan.should_expand);
    assert_eq!(plan.num_expansions, None);
}

#[test]
fn test_binding_pack_size_comes_from_its_instantiation() {
    let mut fx = fixture();
    let ast = fx.sema.ast_mut();
    let pack = ast.binding("bs", true, sp(50));
    let first = ast.binding("b0", false, sp(51));
    let second = ast.binding("b1", false, sp(52));
    let third = ast.binding("b2", false, sp(53));
    let expanded = ast.alloc_expr(
        ExprKind::FunctionParmPack {
            param: pack,
            expansions: vec![first, second, third],
        },
        sp(50),
    );
    let instantiated = ast.binding("bs", true, sp(50));
    ast.decl_mut(instantiated).kind = DeclKind::Binding {
        binding: Some(expanded),
        is_pack: true,
    };
    let unresolved = ast.binding("bs", true, sp(50));

    let packs = [UnexpandedPack::decl(pack, Some(sp(55)))];
    let args = MultiLevelTemplateArgs::new();

    let plan = fx.sema.with_instantiation_scope(false, |sema| {
        sema.instantiation_scope_mut()
            .instantiated_local(pack, instantiated)
            .unwrap();
        sema.check_parameter_packs_for_expansion(sp(40), sp(30), &packs, &args, None)
    });
    assert_eq!(plan.unwrap(), ready(3));

    let plan = fx.sema.with_instantiation_scope(false, |sema| {
        sema.instantiation_scope_mut()
            .instantiated_local(pack, unresolved)
            .unwrap();
        sema.check_parameter_packs_for_expansion(sp(40), sp(30), &packs, &args, None)
    });
    assert!(!plan.unwrap().should_expand);
}

#[test]
fn test_partially_substituted_pack_retains_expansion() {
    let mut fx = fixture();
    let ts = fx.ts;
    let packs = [fx.ty_ref(fx.us, 33), fx.ty_ref(fx.ts, 30)];

    // Ts has two explicit arguments; the full expansion has three.
    let args = MultiLevelTemplateArgs::single(vec![fx.types(2), fx.types(3)]);
    let plan = fx.sema.with_instantiation_scope(false, |sema| {
        sema.instantiation_scope_mut()
            .set_partially_substituted_pack(ts, Vec::new())
            .unwrap();
        sema.check_parameter_packs_for_expansion(sp(40), sp(30), &packs, &args, None)
    });
    assert_eq!(
        plan.unwrap(),
        ExpansionPlan {
            should_expand: true,
            retain_expansion: true,
            num_expansions: Some(2),
        }
    );

    // Partial pack alone.
    let plan = fx.sema.with_instantiation_scope(false, |sema| {
        sema.instantiation_scope_mut()
            .set_partially_substituted_pack(ts, Vec::new())
            .unwrap();
        sema.check_parameter_packs_for_expansion(sp(40), sp(30), &packs[1..], &args, None)
    });
    assert_eq!(plan.unwrap().num_expansions, Some(2));
    assert!(fx.sema.diagnostics().is_empty());
}

#[test]
fn test_partial_pack_longer_than_expansion() {
    let mut fx = fixture();
    let ts = fx.ts;
    let packs = [fx.ty_ref(fx.ts, 30), fx.ty_ref(fx.us, 33)];
    let args = MultiLevelTemplateArgs::single(vec![fx.types(4), fx.types(3)]);

    let plan = fx.sema.with_instantiation_scope(false, |sema| {
        sema.instantiation_scope_mut()
            .set_partially_substituted_pack(ts, Vec::new())
            .unwrap();
        sema.check_parameter_packs_for_expansion(sp(40), sp(30), &packs, &args, None)
    });

    assert!(plan.is_err());
    let diag = &fx.sema.diagnostics().diagnostics()[0];
    assert_eq!(diag.code, ErrorCode::E2003);
    assert_eq!(
        diag.message,
        "partially substituted pack 'Ts' has 4 arguments, more than the 3 of the expansion"
    );
}

#[test]
fn test_num_arguments_in_expansion() {
    let mut fx = fixture();
    let ts_ty = fx.sema.ast_mut().type_param_ref(fx.ts, Some(sp(60)));
    let pointer = fx.sema.ast_mut().alloc_type(TypeKind::Pointer(ts_ty), Some(sp(60)));
    let expansion = fx.sema.ast_mut().pack_expansion_type(pointer, sp(62), None);

    let bound = MultiLevelTemplateArgs::single(vec![fx.types(3)]);
    assert_eq!(fx.sema.num_arguments_in_expansion(expansion, &bound), Some(3));
    assert_eq!(fx.sema.num_arguments_in_expansion(pointer, &bound), Some(3));

    let unbound = MultiLevelTemplateArgs::new();
    assert_eq!(fx.sema.num_arguments_in_expansion(expansion, &unbound), None);

    let int = fx.sema.ast_mut().builtin(BuiltinType::Int);
    assert_eq!(fx.sema.num_arguments_in_expansion(int, &bound), None);
}

#[test]
fn test_num_arguments_in_expansion_of_expr() {
    let mut fx = fixture();
    let xs = fx.xs;
    let xs_ref = fx.sema.ast_mut().decl_ref(xs, sp(60));
    let args = MultiLevelTemplateArgs::new();

    assert_eq!(fx.sema.num_arguments_in_expansion_of_expr(xs_ref, &args), None);

    let size = fx.sema.with_instantiation_scope(false, |sema| {
        let scope = sema.instantiation_scope_mut();
        scope.make_instantiated_local_pack(xs).unwrap();
        scope.instantiated_local_pack_arg(xs, DeclId::new(90)).unwrap();
        sema.num_arguments_in_expansion_of_expr(xs_ref, &args)
    });
    assert_eq!(size, Some(1));
}

#[test]
fn test_fully_pack_expanded_size() {
    let mut fx = fixture();
    let param = fx.type_param(fx.ts);
    let int = TemplateArgument::Type(fx.int);
    let ast = fx.sema.ast_mut();

    let subst = ast.alloc_type(
        TypeKind::SubstTemplateTypeParmPack {
            param,
            pack: vec![int.clone(), int.clone()],
        },
        None,
    );

    let vs = ast.template_type_parm("Vs", 1, 0, true, sp(20));
    let vs_ty = ast.type_param_ref(vs, None);
    let inner = ast.pack_expansion_type(vs_ty, sp(71), None);
    let subst_pending = ast.alloc_type(
        TypeKind::SubstTemplateTypeParmPack {
            param,
            pack: vec![int.clone(), TemplateArgument::Type(inner)],
        },
        None,
    );
    let wrapped = ast.pack_expansion_type(subst, sp(70), None);

    let plain = ast.var("a", fx.int, false, sp(73));
    let also_plain = ast.var("b", fx.int, false, sp(74));
    let still_pack = ast.var("c", fx.int, true, sp(75));
    let parm_pack = ast.alloc_expr(
        ExprKind::FunctionParmPack {
            param: fx.xs,
            expansions: vec![plain, also_plain],
        },
        sp(76),
    );
    let nested_pack = ast.alloc_expr(
        ExprKind::FunctionParmPack {
            param: fx.xs,
            expansions: vec![plain, still_pack],
        },
        sp(78),
    );

    let tt = ast.template_template_parm("TT", 0, 3, true, sp(80));
    let three = vec![int.clone(), int.clone(), int];
    let template_pack = TemplateArgument::Template(TemplateName::SubstPack {
        param: tt,
        pack: three.clone(),
    });
    let template_expansion = TemplateArgument::TemplateExpansion {
        template: TemplateName::SubstPack { param: tt, pack: three },
        ellipsis: sp(81),
        num_expansions: None,
    };

    let size = |arg: &TemplateArgument| fx.sema.fully_pack_expanded_size(arg);
    assert_eq!(size(&TemplateArgument::Type(subst)), Some(2));
    assert_eq!(size(&TemplateArgument::Type(subst_pending)), None);
    assert_eq!(size(&TemplateArgument::Type(wrapped)), None);
    assert_eq!(size(&TemplateArgument::Expr(parm_pack)), Some(2));
    assert_eq!(size(&TemplateArgument::Expr(nested_pack)), None);
    assert_eq!(size(&template_pack), Some(3));
    assert_eq!(size(&template_expansion), None);
    assert_eq!(size(&TemplateArgument::Integral(4)), None);
}

#[test]
fn test_pack_expansion_pattern() {
    let mut fx = fixture();
    let ts_ty = fx.sema.ast_mut().type_param_ref(fx.ts, Some(sp(60)));
    let type_expansion = fx.sema.ast_mut().pack_expansion_type(ts_ty, sp(61), Some(2));
    let xs_ref = fx.sema.ast_mut().decl_ref(fx.xs, sp(62));
    let expr_expansion = fx.sema.ast_mut().pack_expansion_expr(xs_ref, sp(63), None);
    let tt = fx.sema.ast_mut().template_template_parm("TT", 0, 3, true, sp(64));

    assert_eq!(
        fx.sema.pack_expansion_pattern(&TemplateArgument::Type(type_expansion)),
        Some(ExpansionPattern {
            pattern: TemplateArgument::Type(ts_ty),
            ellipsis: sp(61),
            num_expansions: Some(2),
        })
    );
    assert_eq!(
        fx.sema.pack_expansion_pattern(&TemplateArgument::Expr(expr_expansion)),
        Some(ExpansionPattern {
            pattern: TemplateArgument::Expr(xs_ref),
            ellipsis: sp(63),
            num_expansions: None,
        })
    );
    assert_eq!(
        fx.sema.pack_expansion_pattern(&TemplateArgument::TemplateExpansion {
            template: TemplateName::Decl(tt),
            ellipsis: sp(65),
            num_expansions: Some(1),
        }),
        Some(ExpansionPattern {
            pattern: TemplateArgument::Template(TemplateName::Decl(tt)),
            ellipsis: sp(65),
            num_expansions: Some(1),
        })
    );
    assert_eq!(fx.sema.pack_expansion_pattern(&TemplateArgument::Type(ts_ty)), None);
    assert_eq!(fx.sema.pack_expansion_pattern(&fx.types(2)), None);
}

mod proptest_sizes {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn agreeing_lengths_expand(len in 0usize..8, repeats in 1usize..5) {
            let mut fx = fixture();
            let args = MultiLevelTemplateArgs::single(vec![fx.types(len), fx.types(len)]);
            let mut packs = Vec::new();
            for i in 0..repeats {
                let at = u32::try_from(i).unwrap() * 2;
                packs.push(fx.ty_ref(fx.ts, at));
                packs.push(fx.ty_ref(fx.us, at + 1));
            }

            let plan = fx.check(&packs, &args, None).unwrap();

            prop_assert_eq!(plan, ready(u32::try_from(len).unwrap()));
            prop_assert!(fx.sema.diagnostics().is_empty());
        }

        #[test]
        fn disagreeing_lengths_fail(a in 0usize..8, b in 0usize..8) {
            prop_assume!(a != b);
            let mut fx = fixture();
            let args = MultiLevelTemplateArgs::single(vec![fx.types(a), fx.types(b)]);
            let packs = [fx.ty_ref(fx.ts, 30), fx.ty_ref(fx.us, 33)];

            prop_assert!(fx.check(&packs, &args, None).is_err());
            prop_assert_eq!(fx.sema.diagnostics().codes(), vec![ErrorCode::E2001]);
        }
    }
}
