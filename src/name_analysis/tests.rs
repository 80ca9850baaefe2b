//! Unit tests for name analysis.

use std::rc::Rc;

use crate::{
    ast::{ast::Decl, expressions::ExprKind, statements::StmtKind},
    lexer::lexer::tokenize,
    parser::parser::parse,
};

use super::{
    name_analysis::{analyze, NameAnalysis},
    symbol_table::{SymbolKind, SymbolTable},
};

fn analyze_source(source: &str) -> Result<NameAnalysis, Vec<String>> {
    let tokens = tokenize(source.to_string(), Some("test.cmm".to_string())).unwrap();
    let (_, program) = parse(tokens, Rc::new("test.cmm".to_string()));
    analyze(program.unwrap()).map_err(|errors| {
        errors
            .iter()
            .map(|error| error.get_error_name().to_string())
            .collect()
    })
}

#[test]
fn test_resolves_globals_locals_and_formals() {
    let analysis = analyze_source("int g; int f(int a) { int b; b = a + g; return b; }").unwrap();

    let Decl::Fn(func) = &analysis.program.globals[1] else {
        panic!("expected a function");
    };
    let StmtKind::Assign(assign) = &func.body[1].kind else {
        panic!("expected assignment");
    };
    let ExprKind::Assign(assign) = &assign.kind else {
        panic!("expected assignment expression");
    };
    let ExprKind::Id(dst) = &assign.dst.kind else {
        panic!("expected identifier");
    };

    let symbol = analysis.symbols.get(dst.symbol.unwrap()).unwrap();
    assert_eq!(symbol.name, "b");
    assert_eq!(symbol.kind, SymbolKind::Var);
    assert!(analysis.types.is_int(symbol.ty));
}

#[test]
fn test_function_symbol_has_function_type() {
    let analysis = analyze_source("bool f(int a, int *p) { return true; }").unwrap();

    let func = analysis.program.globals[0].name();
    let symbol = analysis.symbols.get(func.symbol.unwrap()).unwrap();
    assert_eq!(symbol.kind, SymbolKind::Fn);
    assert_eq!(analysis.types.display(symbol.ty), "int,int*->bool");
}

#[test]
fn test_recursive_call_resolves() {
    assert!(analyze_source("int f(int n) { return f(n - 1); }").is_ok());
}

#[test]
fn test_undeclared_variable() {
    let errors = analyze_source("void f() { x = 1; y = 2; }").unwrap_err();
    assert_eq!(errors, vec!["VariableNotDeclared", "VariableNotDeclared"]);
}

#[test]
fn test_multiply_declared() {
    let errors = analyze_source("int x; bool x; void f(int a, int a) { }").unwrap_err();
    assert_eq!(errors, vec!["VariableAlreadyDeclared", "VariableAlreadyDeclared"]);
}

#[test]
fn test_shadowing_is_allowed() {
    assert!(analyze_source("int x; void f(bool x) { if (x) { int x; x = 1; } }").is_ok());
}

#[test]
fn test_void_variable() {
    let errors = analyze_source("void x; void f(void a) { }").unwrap_err();
    assert_eq!(errors, vec!["InvalidVariableType", "InvalidVariableType"]);
}

#[test]
fn test_inner_scopes_are_closed() {
    let errors = analyze_source("void f() { while (true) { int y; } y = 1; }").unwrap_err();
    assert_eq!(errors, vec!["VariableNotDeclared"]);
}

#[test]
fn test_symbol_table_scopes() {
    use crate::{
        name_analysis::symbol_table::Symbol, type_checker::data_types::TypeRegistry, Span,
    };

    let mut types = TypeRegistry::new();
    let int = types.int();
    let symbol = |name: &str| Symbol {
        name: name.to_string(),
        kind: SymbolKind::Var,
        ty: int,
        span: Span::null(),
    };

    let mut table = SymbolTable::new();
    let outer = table.declare(symbol("x")).unwrap();
    table.enter_scope();
    assert_eq!(table.lookup("x"), Some(outer));
    let inner = table.declare(symbol("x")).unwrap();
    assert_eq!(table.lookup("x"), Some(inner));
    assert!(table.declare(symbol("x")).is_err());
    table.exit_scope();
    assert_eq!(table.lookup("x"), Some(outer));

    // The global scope survives extra exits.
    table.exit_scope();
    assert_eq!(table.depth(), 1);
    assert_eq!(table.len(), 2);
}
