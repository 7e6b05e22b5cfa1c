use super::*;
use crate::ast::{BinaryOp, BuiltinType};
use pretty_assertions::assert_eq;

#[derive(Default)]
struct Recorder {
    decl_refs: Vec<DeclId>,
    type_params: Vec<(TypeParamType, Option<Span>)>,
    substituted: usize,
}

impl<'ast> Visitor<'ast> for Recorder {
    fn visit_decl_ref(&mut self, decl: DeclId, _span: Span, _ast: &'ast AstContext) {
        self.decl_refs.push(decl);
    }

    fn visit_template_type_parm(
        &mut self,
        param: TypeParamType,
        span: Option<Span>,
        _ast: &'ast AstContext,
    ) {
        self.type_params.push((param, span));
    }

    fn visit_substituted_pack(&mut self, _ast: &'ast AstContext) {
        self.substituted += 1;
    }
}

#[test]
fn walks_expressions_in_source_order() {
    let mut ast = AstContext::new();
    let int = ast.builtin(BuiltinType::Int);
    let a = ast.var("a", int, false, Span::new(0, 1));
    let b = ast.var("b", int, false, Span::new(2, 3));
    let a_ref = ast.decl_ref(a, Span::new(10, 11));
    let b_ref = ast.decl_ref(b, Span::new(14, 15));
    let sum = ast.binary(BinaryOp::Add, a_ref, b_ref);
    let stmt = ast.expr_stmt(sum);

    let mut recorder = Recorder::default();
    recorder.visit_stmt(stmt, &ast);

    assert_eq!(recorder.decl_refs, vec![a, b]);
}

#[test]
fn type_param_occurrences_keep_their_location() {
    let mut ast = AstContext::new();
    let t = ast.template_type_parm("T", 0, 0, true, Span::new(0, 10));
    let located = ast.type_param_ref(t, Some(Span::new(20, 21)));
    let bare = ast.type_param_ref(t, None);
    let func = ast.alloc_type(
        TypeKind::Function {
            params: vec![located],
            result: bare,
        },
        None,
    );

    let mut recorder = Recorder::default();
    recorder.visit_type(func, &ast);

    let spans: Vec<_> = recorder.type_params.iter().map(|(_, span)| *span).collect();
    assert_eq!(spans, vec![Some(Span::new(20, 21)), None]);
}

#[test]
fn default_walk_enters_expansion_patterns() {
    let mut ast = AstContext::new();
    let int = ast.builtin(BuiltinType::Int);
    let xs = ast.var("xs", int, true, Span::new(0, 2));
    let x_ref = ast.decl_ref(xs, Span::new(10, 12));
    let expansion = ast.pack_expansion_expr(x_ref, Span::new(12, 15), None);

    let mut recorder = Recorder::default();
    recorder.visit_expr(expansion, &ast);

    assert_eq!(recorder.decl_refs, vec![xs]);
}

#[test]
fn substituted_packs_reach_their_hook() {
    let mut ast = AstContext::new();
    let t = ast.template_type_parm("T", 0, 0, true, Span::new(0, 10));
    let DeclKind::TemplateTypeParm { param, .. } = ast.decl(t).kind else {
        unreachable!()
    };
    let subst = ast.alloc_type(
        TypeKind::SubstTemplateTypeParmPack {
            param,
            pack: Vec::new(),
        },
        None,
    );
    let ptr = ast.alloc_type(TypeKind::Pointer(subst), None);

    let mut recorder = Recorder::default();
    recorder.visit_type(ptr, &ast);

    assert_eq!(recorder.substituted, 1);
    assert!(recorder.type_params.is_empty());
}

#[test]
fn deep_nesting_does_not_overflow() {
    let mut ast = AstContext::new();
    let mut expr = ast.int_lit(0, Span::new(0, 1));
    for _ in 0..50_000 {
        expr = ast.paren(expr, Span::new(0, 1));
    }

    let mut recorder = Recorder::default();
    recorder.visit_expr(expr, &ast);

    assert!(recorder.decl_refs.is_empty());
}
