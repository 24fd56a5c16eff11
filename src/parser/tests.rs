//! Unit tests for the parser module.
//!
//! This module contains tests for parsing:
//! - Programs, blocks and declarations
//! - Procedures and functions with parameter groups
//! - Statements and operator precedence
//! - Syntax errors and their positions

use super::parser::parse;
use crate::{
    ast::{
        ast::{Declaration, Program},
        expressions::{BinaryOperator, Expr, Number, RelationalOperator, UnaryOperator},
        statements::Stmt,
        types::TypeSpec,
    },
    errors::errors::ErrorImpl,
};

fn parse_ok(source: &str) -> Program {
    parse(source, Some("test.pas".to_string())).unwrap()
}

/// Wraps `body` in a program declaring integers `x` and `y`.
fn parse_body(body: &str) -> Vec<Stmt> {
    let source = format!("PROGRAM T; VAR x, y : INTEGER; BEGIN {} END.", body);
    parse_ok(&source).block.compound.children
}

fn assigned_value(stmt: &Stmt) -> &Expr {
    match stmt {
        Stmt::Assign(assign) => &assign.value,
        other => panic!("expected assignment, got {:?}", other),
    }
}

#[test]
fn test_parse_minimal_program() {
    let program = parse_ok("PROGRAM Empty; BEGIN END.");

    assert_eq!(program.name, "Empty");
    assert!(program.block.declarations.is_empty());
    assert_eq!(program.block.compound.children.len(), 1);
    assert!(matches!(program.block.compound.children[0], Stmt::NoOp));
}

#[test]
fn test_parse_variable_declarations() {
    let program = parse_ok("PROGRAM P; VAR a, b : INTEGER; c : REAL; s : STRING; BEGIN END.");
    let declarations = &program.block.declarations;

    assert_eq!(declarations.len(), 4);

    let expected = [
        ("a", TypeSpec::Integer),
        ("b", TypeSpec::Integer),
        ("c", TypeSpec::Real),
        ("s", TypeSpec::String),
    ];
    for (declaration, (name, spec)) in declarations.iter().zip(expected) {
        match declaration {
            Declaration::Var(var_decl) => {
                assert_eq!(var_decl.var.name, name);
                assert_eq!(var_decl.type_node.spec, spec);
            }
            other => panic!("expected variable declaration, got {:?}", other),
        }
    }
}

#[test]
fn test_parse_procedure_with_parameter_groups() {
    let program = parse_ok(
        "PROGRAM P;
         PROCEDURE Alpha(a, b : INTEGER; c : REAL);
         VAR z : INTEGER;
         BEGIN
            z := a
         END;
         BEGIN
         END.",
    );

    let Declaration::Procedure(procedure) = &program.block.declarations[0] else {
        panic!("expected procedure declaration");
    };

    assert_eq!(procedure.name, "Alpha");
    assert!(!procedure.is_function());
    assert_eq!(procedure.params.len(), 3);
    assert_eq!(procedure.params[0].var.name, "a");
    assert_eq!(procedure.params[1].type_node.spec, TypeSpec::Integer);
    assert_eq!(procedure.params[2].var.name, "c");
    assert_eq!(procedure.params[2].type_node.spec, TypeSpec::Real);
    assert_eq!(procedure.block.declarations.len(), 1);
}

#[test]
fn test_parse_procedure_without_parameters() {
    let program = parse_ok("PROGRAM P; PROCEDURE A; BEGIN END; PROCEDURE B(); BEGIN END; BEGIN END.");

    assert_eq!(program.block.declarations.len(), 2);
    for declaration in &program.block.declarations {
        let Declaration::Procedure(procedure) = declaration else {
            panic!("expected procedure declaration");
        };
        assert!(procedure.params.is_empty());
    }
}

#[test]
fn test_parse_function_declaration() {
    let program = parse_ok(
        "PROGRAM P;
         FUNCTION Square(n : INTEGER) : INTEGER;
         BEGIN
            Square := n * n
         END;
         BEGIN
         END.",
    );

    let Declaration::Procedure(function) = &program.block.declarations[0] else {
        panic!("expected function declaration");
    };

    assert!(function.is_function());
    assert_eq!(
        function.return_type.as_ref().map(|ty| ty.spec),
        Some(TypeSpec::Integer)
    );
}

#[test]
fn test_operator_precedence() {
    let stmts = parse_body("x := 2 + 3 * 4");

    let Expr::BinOp(sum) = assigned_value(&stmts[0]) else {
        panic!("expected binary operation");
    };
    assert_eq!(sum.operator, BinaryOperator::Plus);
    assert!(matches!(
        *sum.left,
        Expr::Num(ref num) if num.value == Number::Integer(2)
    ));

    let Expr::BinOp(product) = &*sum.right else {
        panic!("expected product on the right");
    };
    assert_eq!(product.operator, BinaryOperator::Multiply);
}

#[test]
fn test_operators_are_left_associative() {
    let stmts = parse_body("x := 8 - 4 - 2");

    let Expr::BinOp(outer) = assigned_value(&stmts[0]) else {
        panic!("expected binary operation");
    };
    assert_eq!(outer.operator, BinaryOperator::Minus);
    assert!(matches!(*outer.left, Expr::BinOp(_)));
    assert!(matches!(*outer.right, Expr::Num(_)));
}

#[test]
fn test_parentheses_and_unary_operators() {
    let stmts = parse_body("x := -(1 + 2) DIV +y / 2.5");

    let Expr::BinOp(division) = assigned_value(&stmts[0]) else {
        panic!("expected binary operation");
    };
    assert_eq!(division.operator, BinaryOperator::FloatDivide);

    let Expr::BinOp(integer_division) = &*division.left else {
        panic!("expected DIV on the left");
    };
    assert_eq!(integer_division.operator, BinaryOperator::IntegerDivide);
    assert!(matches!(
        *integer_division.left,
        Expr::UnaryOp(ref unary) if unary.operator == UnaryOperator::Minus
    ));
    assert!(matches!(
        *integer_division.right,
        Expr::UnaryOp(ref unary) if unary.operator == UnaryOperator::Plus
    ));
    assert!(matches!(
        *division.right,
        Expr::Num(ref num) if num.value == Number::Real(2.5)
    ));
}

#[test]
fn test_parse_string_literal_assignment() {
    let program = parse_ok("PROGRAM P; VAR s : STRING; BEGIN s := 'hi there' END.");

    let Expr::String(literal) = assigned_value(&program.block.compound.children[0]) else {
        panic!("expected string literal");
    };
    assert_eq!(literal.value, "hi there");
}

#[test]
fn test_parse_if_without_else() {
    let stmts = parse_body("IF x < 1 THEN x := 1");

    let Stmt::IfElse(if_else) = &stmts[0] else {
        panic!("expected if statement");
    };
    assert_eq!(if_else.condition.operator, RelationalOperator::Less);
    assert!(matches!(*if_else.then_body, Stmt::Assign(_)));
    assert!(matches!(*if_else.else_body, Stmt::NoOp));
}

#[test]
fn test_parse_if_with_else_and_compound() {
    let stmts = parse_body("IF x = 1 THEN BEGIN x := 2; y := 3 END ELSE y := 4");

    let Stmt::IfElse(if_else) = &stmts[0] else {
        panic!("expected if statement");
    };
    assert_eq!(if_else.condition.operator, RelationalOperator::Equal);

    let Stmt::Compound(compound) = &*if_else.then_body else {
        panic!("expected compound then branch");
    };
    assert_eq!(compound.children.len(), 2);
    assert!(matches!(*if_else.else_body, Stmt::Assign(_)));
}

#[test]
fn test_parse_while_and_for() {
    let stmts = parse_body("WHILE x > 0 DO x := x - 1; FOR y := 1 TO 10 DO x := x + y");

    assert_eq!(stmts.len(), 2);
    assert!(matches!(stmts[0], Stmt::While(_)));

    let Stmt::For(for_stmt) = &stmts[1] else {
        panic!("expected for statement");
    };
    assert_eq!(for_stmt.init.target.name, "y");
    assert!(matches!(
        for_stmt.end,
        Expr::Num(ref num) if num.value == Number::Integer(10)
    ));
}

#[test]
fn test_parse_calls() {
    let stmts = parse_body("WRITELN(x, 'a', 1 + 2); Foo(); x := Bar(y)");

    let Stmt::Call(call) = &stmts[0] else {
        panic!("expected call statement");
    };
    assert_eq!(call.name, "WRITELN");
    assert_eq!(call.arguments.len(), 3);

    let Stmt::Call(call) = &stmts[1] else {
        panic!("expected call statement");
    };
    assert_eq!(call.name, "Foo");
    assert!(call.arguments.is_empty());

    let Expr::Call(call) = assigned_value(&stmts[2]) else {
        panic!("expected call expression");
    };
    assert_eq!(call.name, "Bar");
    assert_eq!(call.arguments.len(), 1);
}

#[test]
fn test_empty_statements_between_semicolons() {
    let stmts = parse_body("x := 1;; y := 2;");

    assert_eq!(stmts.len(), 4);
    assert!(matches!(stmts[1], Stmt::NoOp));
    assert!(matches!(stmts[3], Stmt::NoOp));
}

#[test]
fn test_missing_semicolon_between_statements() {
    let error = parse(
        "PROGRAM P; VAR x : INTEGER; BEGIN x := 1 x := 2 END.",
        None,
    )
    .unwrap_err();

    assert_eq!(error.get_error_name(), "UnexpectedTokenDetailed");
    assert_eq!(error.get_position().0, 41);
    assert_eq!(
        error.get_impl(),
        &ErrorImpl::UnexpectedTokenDetailed {
            token: "x".to_string(),
            message: "expected End".to_string(),
        }
    );
}

#[test]
fn test_missing_final_dot() {
    let error = parse("PROGRAM P; BEGIN END", None).unwrap_err();

    assert_eq!(
        error.get_impl(),
        &ErrorImpl::UnexpectedTokenDetailed {
            token: "EOF".to_string(),
            message: "expected Dot".to_string(),
        }
    );
}

#[test]
fn test_tokens_after_final_dot() {
    let error = parse("PROGRAM P; BEGIN END. x", None).unwrap_err();

    assert_eq!(error.get_position().0, 22);
    assert_eq!(
        error.get_impl(),
        &ErrorImpl::UnexpectedTokenDetailed {
            token: "x".to_string(),
            message: "expected EOF".to_string(),
        }
    );
}

#[test]
fn test_invalid_type_spec() {
    let error = parse("PROGRAM P; VAR x : BOOLEAN; BEGIN END.", None).unwrap_err();

    assert_eq!(
        error.get_impl(),
        &ErrorImpl::UnexpectedTokenDetailed {
            token: "BOOLEAN".to_string(),
            message: "expected INTEGER, REAL or STRING".to_string(),
        }
    );
}

#[test]
fn test_condition_requires_relational_operator() {
    let error = parse(
        "PROGRAM P; VAR x : INTEGER; BEGIN IF x THEN x := 1 END.",
        None,
    )
    .unwrap_err();

    assert_eq!(error.get_error_name(), "UnexpectedTokenDetailed");
    assert_eq!(error.get_position().0, 39);
}

#[test]
fn test_integer_constant_out_of_range() {
    let error = parse(
        "PROGRAM P; VAR x : INTEGER; BEGIN x := 99999999999999999999 END.",
        None,
    )
    .unwrap_err();

    assert_eq!(error.get_error_name(), "NumberParseError");
}

#[test]
fn test_lexical_error_aborts_parse() {
    let error = parse("PROGRAM P; BEGIN @ END.", None).unwrap_err();

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert_eq!(error.get_position().0, 17);
}
