use super::*;
use crate::config::{LangOptions, SemaConfig};
use pack_diagnostic::Severity;
use pack_ir::{AstContext, BuiltinType, DeclId, TemplateParamList};
use pretty_assertions::assert_eq;

fn sp(start: u32) -> Span {
    Span::new(start, start + 1)
}

/// `template<int N, int... Ns> void f(int... xs, int y);`
struct Fixture {
    sema: Sema,
    n: DeclId,
    ns: DeclId,
    xs: DeclId,
    y: DeclId,
}

fn fixture_with(config: SemaConfig) -> Fixture {
    let mut ast = AstContext::new();
    let n = ast.non_type_template_parm("N", 0, 0, false, sp(0));
    let ns = ast.non_type_template_parm("Ns", 0, 1, true, sp(2));
    let int = ast.builtin(BuiltinType::Int);
    let xs = ast.var("xs", int, true, sp(4));
    let y = ast.var("y", int, false, sp(6));
    ast.function(
        "f",
        Some(TemplateParamList {
            depth: 0,
            params: vec![n, ns],
            span: sp(0),
        }),
        vec![xs, y],
        None,
        sp(8),
    );
    Fixture {
        sema: Sema::with_config(ast, config),
        n,
        ns,
        xs,
        y,
    }
}

fn fixture() -> Fixture {
    fixture_with(SemaConfig::for_testing())
}

impl Fixture {
    fn reference(&mut self, decl: DeclId, at: u32) -> ExprId {
        self.sema.ast_mut().decl_ref(decl, sp(at))
    }

    fn literal(&mut self, value: i64, at: u32) -> ExprId {
        self.sema.ast_mut().int_lit(value, sp(at))
    }
}

#[test]
fn test_constant_index_is_resolved() {
    let mut fx = fixture();
    let xs = fx.reference(fx.xs, 20);
    let one = fx.literal(1, 24);

    let expr = fx
        .sema
        .act_on_pack_indexing_expr(xs, Span::new(21, 24), one, sp(25))
        .unwrap();

    let node = fx.sema.ast().expr(expr);
    assert_eq!(node.span, Span::new(20, 26));
    let ExprKind::PackIndexing(indexing) = &node.kind else {
        panic!("expected pack indexing, got {:?}", node.kind);
    };
    assert_eq!(indexing.resolved_index, Some(1));
    assert!(!indexing.fully_substituted);
    assert!(!node.flags.contains_unexpanded_pack());
    assert!(node.flags.is_instantiation_dependent());

    let diag = &fx.sema.diagnostics().diagnostics()[0];
    assert_eq!(diag.code, ErrorCode::W4001);
    assert_eq!(diag.severity, Severity::Warning);
    assert_eq!(diag.message, "pack indexing is a C++2c extension");
}

#[test]
fn test_cplusplus26_reports_compatibility() {
    let mut fx = fixture_with(SemaConfig::for_testing().with_lang(LangOptions::cplusplus26()));
    let ns = fx.reference(fx.ns, 20);
    let zero = fx.literal(0, 24);

    fx.sema
        .act_on_pack_indexing_expr(ns, Span::new(21, 24), zero, sp(25))
        .unwrap();

    assert_eq!(
        fx.sema.diagnostics().diagnostics()[0].message,
        "pack indexing is incompatible with C++ standards before C++2c"
    );
}

#[test]
fn test_non_pack_is_rejected() {
    let mut fx = fixture();
    let y = fx.reference(fx.y, 20);
    let zero = fx.literal(0, 24);

    assert!(fx
        .sema
        .act_on_pack_indexing_expr(y, Span::new(21, 24), zero, sp(25))
        .is_err());

    let diag = &fx.sema.diagnostics().diagnostics()[0];
    assert_eq!(diag.code, ErrorCode::E4001);
    assert_eq!(diag.primary_span(), Some(sp(20)));
}

#[test]
fn test_erroneous_pack_is_not_diagnosed_again() {
    let mut fx = fixture();
    fx.sema
        .diagnostics_mut()
        .emit_error(Diagnostic::error(ErrorCode::E1001).with_message("earlier error"));
    let broken = fx.sema.ast_mut().alloc_expr(ExprKind::Recovery, sp(20));
    let zero = fx.literal(0, 24);

    assert!(fx
        .sema
        .act_on_pack_indexing_expr(broken, Span::new(21, 24), zero, sp(25))
        .is_err());

    assert_eq!(fx.sema.diagnostics().codes(), vec![ErrorCode::E1001]);
}

#[test]
fn test_dependent_index_stays_unresolved() {
    let mut fx = fixture();
    let xs = fx.reference(fx.xs, 20);
    let n = fx.reference(fx.n, 24);

    let expr = fx
        .sema
        .act_on_pack_indexing_expr(xs, Span::new(21, 24), n, sp(25))
        .unwrap();

    let ExprKind::PackIndexing(indexing) = &fx.sema.ast().expr(expr).kind else {
        panic!("expected pack indexing");
    };
    assert_eq!(indexing.resolved_index, None);
}

#[test]
fn test_non_constant_index() {
    let mut fx = fixture();
    let xs = fx.reference(fx.xs, 20);
    let y = fx.reference(fx.y, 24);

    assert!(fx
        .sema
        .act_on_pack_indexing_expr(xs, Span::new(21, 24), y, sp(25))
        .is_err());

    let diag = &fx.sema.diagnostics().diagnostics()[0];
    assert_eq!(diag.code, ErrorCode::E4005);
    assert_eq!(diag.primary_span(), Some(sp(24)));
}

#[test]
fn test_arithmetic_index() {
    let mut fx = fixture();
    let xs = fx.reference(fx.xs, 20);
    let one = fx.literal(1, 24);
    let two = fx.literal(2, 26);
    let sum = fx.sema.ast_mut().binary(BinaryOp::Add, one, two);
    let parens = fx.sema.ast_mut().paren(sum, Span::new(23, 28));
    let factor = fx.literal(2, 29);
    let product = fx.sema.ast_mut().binary(BinaryOp::Mul, parens, factor);
    let five = fx.literal(5, 31);
    let index = fx.sema.ast_mut().binary(BinaryOp::Sub, product, five);

    let expr = fx
        .sema
        .build_pack_indexing_expr(xs, Span::new(21, 23), index, sp(32), Vec::new(), false)
        .unwrap();

    let ExprKind::PackIndexing(indexing) = &fx.sema.ast().expr(expr).kind else {
        panic!("expected pack indexing");
    };
    assert_eq!(indexing.resolved_index, Some(1));
}

#[test]
fn test_substituted_pack_selects_element() {
    let mut fx = fixture();
    let xs = fx.reference(fx.xs, 20);
    let index = fx.literal(1, 24);
    let elements = vec![fx.literal(10, 40), fx.literal(20, 41)];

    let expr = fx
        .sema
        .build_pack_indexing_expr(xs, Span::new(21, 24), index, sp(25), elements, true)
        .unwrap();

    let flags = fx.sema.ast().expr(expr).flags;
    assert!(!flags.is_instantiation_dependent());
    assert!(fx.sema.diagnostics().is_empty());
}

#[test]
fn test_index_out_of_bounds() {
    let mut fx = fixture();
    let xs = fx.reference(fx.xs, 20);
    let two = fx.literal(2, 24);
    let zero = fx.literal(0, 30);
    let one = fx.literal(1, 32);
    let negative = fx.sema.ast_mut().binary(BinaryOp::Sub, zero, one);
    let elements = vec![fx.literal(10, 40), fx.literal(20, 41)];

    assert!(fx
        .sema
        .build_pack_indexing_expr(xs, Span::new(21, 24), two, sp(25), elements.clone(), true)
        .is_err());
    assert!(fx
        .sema
        .build_pack_indexing_expr(xs, Span::new(21, 24), negative, sp(33), elements, true)
        .is_err());

    let diags = fx.sema.diagnostics().diagnostics();
    assert_eq!(diags[0].code, ErrorCode::E4002);
    assert_eq!(diags[0].message, "invalid index 2 for pack 'xs' of size 2");
    assert_eq!(diags[0].primary_span(), Some(sp(20)));
    assert_eq!(diags[1].message, "invalid index -1 for pack 'xs' of size 2");
}

#[test]
fn test_out_of_bounds_is_ignored_until_substituted() {
    let mut fx = fixture();
    let xs = fx.reference(fx.xs, 20);
    let seven = fx.literal(7, 24);

    assert!(fx
        .sema
        .build_pack_indexing_expr(xs, Span::new(21, 24), seven, sp(25), Vec::new(), false)
        .is_ok());
    assert!(fx.sema.diagnostics().is_empty());
}

mod proptest_fold_constant {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn addition_matches_checked_add(a in any::<i64>(), b in any::<i64>()) {
            prop_assert_eq!(fold_constant(BinaryOp::Add, a, b), a.checked_add(b));
        }

        #[test]
        fn division_by_zero_is_not_constant(a in any::<i64>()) {
            prop_assert_eq!(fold_constant(BinaryOp::Div, a, 0), None);
            prop_assert_eq!(fold_constant(BinaryOp::Rem, a, 0), None);
        }
    }
}
