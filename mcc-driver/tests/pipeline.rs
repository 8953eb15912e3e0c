//! End-to-end pipeline tests: source text in, assembly text out.

use mcc_codegen::CodegenError;
use mcc_common::CompilerError;
use mcc_frontend::{ActionObserver, Lexer, Parser, SemanticAnalyzer, SourceType, SymbolTable};
use mcc_ir::IrGenerator;
use pretty_assertions::assert_eq;

/// Run the whole pipeline in-process, the way the driver does
fn compile(source: &str) -> Result<String, CompilerError> {
    let mut symbols = SymbolTable::new();
    let tokens = Lexer::new(source, "test.mc").tokenize(&mut symbols)?;

    let mut semantic = SemanticAnalyzer::new();
    let mut irgen = IrGenerator::new();
    {
        let mut observers: Vec<&mut dyn ActionObserver> = vec![&mut semantic, &mut irgen];
        Parser::new(tokens).parse(&mut symbols, &mut observers)?;
    }

    let instructions = irgen.into_instructions();
    Ok(mcc_codegen::generate_assembly(&instructions)?)
}

#[test]
fn assignment_addition_and_return() {
    let asm = compile("int a; int b; a = 3; b = a + 1; return b;").unwrap();
    assert_eq!(
        asm,
        ".text\n    li t0, 3\n    addi t1, t0, 1\n    mv t2, t1\n    mv a0, t2\n"
    );
}

#[test]
fn commutative_addition_normalizes() {
    let left = compile("int a; a = 1; a = a + 2; return a;").unwrap();
    let right = compile("int a; a = 1; a = 2 + a; return a;").unwrap();
    assert_eq!(left, right);
}

#[test]
fn subtraction_with_immediate_first_operand() {
    let asm = compile("int a; a = 2; a = 1 - a; return a;").unwrap();
    // a:t0, the difference temp:t1, the materialized 1:t2
    assert!(asm.contains("li t2, 1"));
    assert!(asm.contains("sub t1, t2, t0"));
}

#[test]
fn multiplication_uses_register_form() {
    let asm = compile("int a; int b; a = 2; b = 3; a = a * b; return a;").unwrap();
    assert!(asm.contains("mul t2, t0, t1"));
}

#[test]
fn parentheses_change_evaluation_order() {
    let asm = compile("int a; a = 5; a = a * (a - 2); return a;").unwrap();
    // The subtraction is lowered before the multiplication
    let sub = asm.find("sub").unwrap();
    let mul = asm.find("mul").unwrap();
    assert!(sub < mul);
}

#[test]
fn both_immediate_addition_is_rejected() {
    let err = compile("int a; a = 1 + 2; return a;").unwrap_err();
    assert!(matches!(err, CompilerError::CodegenError { .. }));
    assert!(format!("{}", err).contains("immediate"));
}

#[test]
fn live_variables_spread_across_register_classes() {
    let asm = compile(
        "int a; int b; int c; int d; \
         a = 1; b = 2; c = 3; d = 4; \
         return a + b + c + d;",
    )
    .unwrap();
    // a..d take t0-t2 and a0; the sum temporaries continue into the
    // argument class
    assert!(asm.contains("li a0, 4"));
    assert!(asm.contains("add a3, a2, a0"));
    assert!(asm.ends_with("mv a0, a3\n"));
}

#[test]
fn code_after_return_is_unreachable() {
    let asm = compile("int a; a = 1; return a; a = 2;").unwrap();
    assert_eq!(asm, ".text\n    li t0, 1\n    mv a0, t0\n");
}

#[test]
fn returned_immediate_loads_a0() {
    let asm = compile("return 7;").unwrap();
    assert_eq!(asm, ".text\n    li a0, 7\n");
}

#[test]
fn declared_types_land_in_the_symbol_table() {
    let source = "int a; a = 1; return a;";
    let mut symbols = SymbolTable::new();
    let tokens = Lexer::new(source, "test.mc").tokenize(&mut symbols).unwrap();
    let mut semantic = SemanticAnalyzer::new();
    {
        let mut observers: Vec<&mut dyn ActionObserver> = vec![&mut semantic];
        Parser::new(tokens).parse(&mut symbols, &mut observers).unwrap();
    }
    assert_eq!(symbols.get("a").unwrap().ty, Some(SourceType::Int));
}

#[test]
fn lexical_errors_abort_the_run() {
    let err = compile("int a; a = $1; return a;").unwrap_err();
    assert!(matches!(err, CompilerError::LexError { .. }));
}

#[test]
fn syntax_errors_abort_the_run() {
    let err = compile("int a; a = ; return a;").unwrap_err();
    assert!(matches!(err, CompilerError::ParseError { .. }));
}

#[test]
fn codegen_error_converts_from_register_exhaustion() {
    let err: CompilerError = CodegenError::RegisterExhausted("v".to_string()).into();
    assert!(matches!(err, CompilerError::CodegenError { .. }));
}
