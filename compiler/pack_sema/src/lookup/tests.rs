use super::*;
use pack_ir::{BuiltinType, Span};
use pretty_assertions::assert_eq;

#[test]
fn test_edit_distance() {
    assert_eq!(edit_distance("", ""), 0);
    assert_eq!(edit_distance("args", ""), 4);
    assert_eq!(edit_distance("", "args"), 4);
    assert_eq!(edit_distance("args", "args"), 0);
    assert_eq!(edit_distance("args", "arg"), 1);
    assert_eq!(edit_distance("Ts", "Us"), 1);
    assert_eq!(edit_distance("kitten", "sitting"), 3);
}

#[test]
fn test_default_threshold() {
    assert_eq!(default_threshold(0), 0);
    assert_eq!(default_threshold(2), 1);
    assert_eq!(default_threshold(4), 2);
    assert_eq!(default_threshold(12), 3);
}

fn table() -> (AstContext, VisibleDecls, [DeclId; 4]) {
    let mut ast = AstContext::new();
    let int = ast.builtin(BuiltinType::Int);
    let args = ast.var("args", int, true, Span::new(0, 4));
    let argc = ast.var("argc", int, false, Span::new(5, 9));
    let first = ast.var("g", int, false, Span::new(10, 11));
    let second = ast.var("g", int, false, Span::new(12, 13));
    let mut visible = VisibleDecls::new();
    for decl in [args, argc, first, second] {
        visible.declare(decl, &ast);
    }
    (ast, visible, [args, argc, first, second])
}

#[test]
fn test_lookup_results() {
    let (ast, mut visible, [args, _, first, second]) = table();

    assert_eq!(
        visible.lookup_ordinary_name(ast.intern("args")),
        LookupResult::Found(args)
    );
    assert_eq!(
        visible.lookup_ordinary_name(ast.intern("nope")),
        LookupResult::NotFound
    );
    assert_eq!(
        visible.lookup_ordinary_name(ast.intern("g")),
        LookupResult::Overloaded(vec![first, second])
    );

    visible.mark_ambiguous(ast.intern("g"));
    assert_eq!(
        visible.lookup_ordinary_name(ast.intern("g")),
        LookupResult::Ambiguous(vec![first, second])
    );
}

#[test]
fn test_correction_respects_filter() {
    let (ast, visible, [args, argc, ..]) = table();
    let packs_only = |decl: DeclId| ast.decl(decl).is_parameter_pack();
    let anything = |_: DeclId| true;

    assert_eq!(
        visible.correct_typo(ast.intern("argz"), &ast, &packs_only),
        Some(args)
    );
    assert_eq!(
        visible.correct_typo(ast.intern("argd"), &ast, &anything),
        Some(argc)
    );
    assert_eq!(
        visible.correct_typo(ast.intern("completely_different"), &ast, &anything),
        None
    );
}
