//! Integration tests for end-to-end checking.
//!
//! These tests verify that the complete pipeline works correctly from source
//! code through tokenization, parsing, name analysis and type analysis, and
//! that the `cmm` binary reports the outcome.

use std::{io::Write, process::Command, rc::Rc};

use cminusminus::{
    ast::{
        ast::Decl,
        statements::StmtKind,
        unparse::{unparse, unparse_typed},
    },
    lexer::lexer::tokenize,
    name_analysis::name_analysis::{analyze as analyze_names, NameAnalysis},
    parser::parser::parse,
    type_checker::{
        diagnostics::Diagnostic,
        type_analysis::{analyze, TypeAnalysis},
    },
};

fn resolve(source: &str) -> NameAnalysis {
    let tokens = tokenize(source.to_string(), Some("test.cmm".to_string())).unwrap();
    let (_, program) = parse(tokens, Rc::new("test.cmm".to_string()));
    analyze_names(program.unwrap()).unwrap()
}

fn type_check(source: &str) -> (NameAnalysis, Result<TypeAnalysis, Vec<Diagnostic>>) {
    let names = resolve(source);
    let result = analyze(&names);
    (names, result)
}

fn error_names(source: &str) -> Vec<String> {
    type_check(source)
        .1
        .err()
        .unwrap_or_default()
        .iter()
        .map(|diagnostic| diagnostic.get_error_name().to_string())
        .collect()
}

const WELL_TYPED: &str = r#"
int count;
bool verbose;
int *cursor;

int fib(int n) {
    if (n < 2) {
        return n;
    }
    return fib(n - 1) + fib(n - 2);
}

void report(string label, int value) {
    write label;
    write value;
    write "\n";
}

int main() {
    int i;
    short s;
    i = 0;
    s = 3S;
    cursor = &count;
    read count;
    while (i < *cursor && !verbose) {
        report("fib", fib(i));
        i++;
    }
    if (i == count) {
        verbose = true;
    } else {
        *cursor = i = count;
    }
    return 0;
}
"#;

#[test]
fn test_check_well_typed_program() {
    let (names, result) = type_check(WELL_TYPED);
    let analysis = result.unwrap();

    assert!(analysis.passed());
    assert!(analysis.diagnostics().is_empty());

    let Decl::Fn(main) = names.program.globals.last().unwrap() else {
        panic!("expected main last");
    };
    assert_eq!(
        analysis.types().display(analysis.node_type(main.id).unwrap()),
        "->int"
    );
}

#[test]
fn test_statement_types_in_well_typed_program() {
    let (names, result) = type_check(WELL_TYPED);
    let analysis = result.unwrap();

    for decl in &names.program.globals {
        let Decl::Fn(func) = decl else { continue };
        for stmt in &func.body {
            let ty = analysis.node_type(stmt.id).unwrap();
            assert!(
                analysis.types().is_void(ty),
                "statement at {} typed {}",
                stmt.span.start,
                analysis.types().display(ty)
            );
        }
    }
}

#[test]
fn test_typed_unparse_of_call() {
    let source = "int f(int a) { return a; } void main() { write f(1); }";
    let (names, result) = type_check(source);
    let analysis = result.unwrap();

    let text = unparse_typed(&names.program, &analysis).unwrap();
    assert!(text.contains("write ((f : int->int)((1 : int)) : int);"));
    assert!(text.contains("return (a : int);"));
}

#[test]
fn test_untyped_unparse_round_trip() {
    let names = resolve(WELL_TYPED);
    let text = unparse(&names.program);

    let again = resolve(&text);
    assert_eq!(unparse(&again.program), text);
}

#[test]
fn test_all_diagnostics_are_collected() {
    let source = r#"
        int f(int a, bool b) {
            return b;
        }
        void g() {
            return 1;
        }
        void main() {
            int x;
            bool b;
            int *p;
            x = b + 1;
            b = x < "s";
            b = x && b;
            b = x == b;
            x = *x;
            f(1);
            f(b, x);
            x();
            if (x) { }
            while (p) { }
            write g;
            write g();
            write p;
            read p;
            read f;
            x = true;
            f = f;
        }
    "#;

    assert_eq!(
        error_names(source),
        vec![
            "RetWrong",
            "ExtraRetValue",
            "MathOperand",
            "RelOperand",
            "LogicOperand",
            "EqOperator",
            "DerefOperand",
            "ArgCount",
            "ArgMatch",
            "ArgMatch",
            "Callee",
            "CondType",
            "CondType",
            "WriteFn",
            "WriteVoid",
            "WritePtr",
            "ReadPtr",
            "AssignFn",
            "AssignOperator",
            "AssignOperand",
        ]
    );
}

#[test]
fn test_diagnostics_are_in_source_order() {
    let source = "void main() { int x; bool b; x = true; b = 1; x = b; }";
    let (_, result) = type_check(source);
    let diagnostics = result.unwrap_err();

    let offsets: Vec<u32> = diagnostics.iter().map(|d| d.span.start.0).collect();
    let mut sorted = offsets.clone();
    sorted.sort();
    assert_eq!(offsets.len(), 3);
    assert_eq!(offsets, sorted);
}

#[test]
fn test_error_type_is_not_propagated() {
    let source = r#"
        bool flag;
        int f(int a) { return a; }
        void main() {
            int x;
            x = f(flag + 1) * (x - f(2));
            if (f(x + true) == 3) { x = 1; }
        }
    "#;

    assert_eq!(error_names(source), vec!["MathOperand", "MathOperand"]);
}

#[test]
fn test_post_increment_statement_is_void() {
    let source = "void main() { bool b; b++; }";
    let names = resolve(source);
    let mut analysis = TypeAnalysis::new(names.types.clone(), &names.symbols);
    names.program.type_analysis(&mut analysis);

    let Decl::Fn(main) = &names.program.globals[0] else {
        panic!("expected a function");
    };
    let stmt = &main.body[1];
    assert!(matches!(stmt.kind, StmtKind::PostInc(_)));
    assert!(analysis.types().is_void(analysis.node_type(stmt.id).unwrap()));
    assert!(!analysis.passed());
}

#[test]
fn test_name_errors_stop_before_type_analysis() {
    let tokens = tokenize(
        "void main() { x = 1; int y; int y; }".to_string(),
        Some("test.cmm".to_string()),
    )
    .unwrap();
    let (_, program) = parse(tokens, Rc::new("test.cmm".to_string()));

    let errors = analyze_names(program.unwrap()).err().unwrap();
    let names: Vec<&str> = errors.iter().map(|e| e.get_error_name()).collect();
    assert_eq!(names, vec!["VariableNotDeclared", "VariableAlreadyDeclared"]);
}

// Binary

fn write_source(source: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".cmm").tempfile().unwrap();
    file.write_all(source.as_bytes()).unwrap();
    file
}

#[test]
fn test_binary_accepts_well_typed_program() {
    let file = write_source(WELL_TYPED);
    let output = Command::new(env!("CARGO_BIN_EXE_cmm"))
        .arg(file.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_binary_prints_types_on_request() {
    let file = write_source("int x; void main() { x = 1; }");
    let output = Command::new(env!("CARGO_BIN_EXE_cmm"))
        .arg(file.path())
        .arg("--show-types")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("((x : int) = (1 : int) : int);"));
}

#[test]
fn test_binary_reports_type_failure() {
    let file = write_source("bool b;\nvoid main() {\n    b = 5;\n}\n");
    let output = Command::new(env!("CARGO_BIN_EXE_cmm"))
        .arg(file.path())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Error: AssignOperator (Invalid assignment operation)"));
    assert!(stderr.contains("3 | b = 5;"));
    assert!(stderr.contains("Type check failed"));
}

#[test]
fn test_binary_limits_printed_errors() {
    let file = write_source("void main() { int x; x = true; x = true; x = true; }");
    let output = Command::new(env!("CARGO_BIN_EXE_cmm"))
        .arg(file.path())
        .args(["--max-diagnostics", "1"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert_eq!(stderr.matches("Error: AssignOperator").count(), 1);
    assert!(stderr.contains("... and 2 more"));
}

#[test]
fn test_binary_reports_syntax_error() {
    let file = write_source("int x\n");
    let output = Command::new(env!("CARGO_BIN_EXE_cmm"))
        .arg(file.path())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Error: Unexpected"));
}
