//! End-to-end fixtures (§8 of SPEC_FULL.md): whole programs fed through `treelang::compile`,
//! asserting on the emitted C text or on the specific diagnostic kind raised.

use treelang::diagnostics::ErrorKind;

fn compile_ok(source: &str) -> String {
    treelang::compile(source, "test.tl").unwrap_or_else(|error| panic!("expected success, got: {error}"))
}

fn compile_err(source: &str) -> anyhow::Error {
    treelang::compile(source, "test.tl").expect_err("expected a compile error")
}

fn error_kind(error: &anyhow::Error) -> ErrorKind {
    error.downcast_ref::<treelang::diagnostics::CompileError>().expect("error should be a CompileError").kind
}

#[test]
fn hello_world() {
    let emitted = compile_ok(r#"start { (display_str("hello")) }"#);
    assert!(emitted.contains("int main()"));
    assert!(emitted.contains(r#"print_str("hello");"#));
}

#[test]
fn arithmetic_function() {
    let emitted = compile_ok("(fun add (int a, int b) (int) { return a + b }) start { dec int x = add(2,3) }");
    assert!(emitted.contains("int add(int a, int b) {"));
    assert!(emitted.contains("return (a + b);"));
    assert!(emitted.contains("int x = add(2, 3);"));
}

#[test]
fn type_error_on_declaration() {
    let error = compile_err(r#"start { dec int x = "hi" }"#);
    assert_eq!(error_kind(&error), ErrorKind::Type);
}

#[test]
fn duplicate_declaration_is_a_name_error() {
    let error = compile_err("start { dec int x = 1 dec int x = 2 }");
    assert_eq!(error_kind(&error), ErrorKind::Name);
}

#[test]
fn udt_round_trip() {
    let source = "\
        Point uat { int x int y } ufn { (fun sum (void) (int) { return own.x + own.y }) } \
        start { dec Point p = new Point { x: 1, y: 2 } (display_int(p...sum())) }";
    let emitted = compile_ok(source);
    assert!(emitted.contains("typedef struct _Point_ {"));
    assert!(emitted.contains("Point* construct_Point(int x_, int y_) {"));
    assert!(emitted.contains("int sum(Point* _own_) {"));
    assert!(emitted.contains("sum(p)"));
}

#[test]
fn branch_semantics() {
    let source = r#"start { tree ( (|true| { (display_str("a")) }) (|false| { (display_str("b")) }) ) }"#;
    let emitted = compile_ok(source);
    assert!(emitted.contains("if (1) {"));
    assert!(emitted.contains(r#"print_str("a");"#));
    assert!(emitted.contains("else if (0) {"));
    assert!(emitted.contains(r#"print_str("b");"#));
}

#[test]
fn empty_source_emits_only_the_header() {
    let emitted = compile_ok("");
    assert!(emitted.contains("#include <stdio.h>"));
    assert!(!emitted.contains("int main()"));
}

#[test]
fn non_empty_source_still_requires_a_start_block() {
    let error = compile_err("(fun f (void) (void) { })");
    assert_eq!(error_kind(&error), ErrorKind::Parse);
}

#[test]
fn empty_start_block_emits_an_empty_main() {
    let emitted = compile_ok("start {}");
    assert!(emitted.contains("int main() {"));
    assert!(emitted.trim_end().ends_with('}'));
}

#[test]
fn void_function_with_no_return_is_accepted() {
    let emitted = compile_ok(r#"(fun greet (void) (void) { (display_str("hi")) }) start { (greet()) }"#);
    assert!(emitted.contains("void greet() {"));
}

#[test]
fn udt_with_zero_attributes_and_zero_methods() {
    let emitted = compile_ok("Empty uat {} ufn {} start {}");
    assert!(emitted.contains("typedef struct _Empty_ {"));
    assert!(emitted.contains("Empty* construct_Empty() {"));
}

#[test]
fn undeclared_identifier_is_a_name_error() {
    let error = compile_err("start { dec int x = y }");
    assert_eq!(error_kind(&error), ErrorKind::Name);
}

#[test]
fn reserved_name_cannot_be_redeclared() {
    let error = compile_err("start { dec int int = 1 }");
    assert_eq!(error_kind(&error), ErrorKind::ReservedName);
}

#[test]
fn list_literal_emits_the_runtime_constructor() {
    let emitted = compile_ok("start { dec [int] xs = [1, 2, 3] }");
    assert!(emitted.contains("List_int* xs = list_new_int(3, 1, 2, 3);"));
}

#[test]
fn recursive_function_may_call_itself() {
    let source = "(fun fact (int n) (int) { tree ( (|n == 0| { return 1 }) ) return n * fact(n - 1) }) start { dec int x = fact(5) }";
    let emitted = compile_ok(source);
    assert!(emitted.contains("int fact(int n) {"));
    assert!(emitted.contains("fact((n - 1))"));
}
