use crate::{
    ast::statements::{Assign, Compound, For, IfElse, Stmt, While},
    errors::errors::Error,
    lexer::tokens::TokenKind,
};

use super::{
    expr::{parse_call, parse_condition, parse_expr, parse_variable},
    parser::Parser,
};

/// statement : compound_statement | if_statement | while_statement
///           | for_statement | assignment_statement | call | empty
pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let handler = parser
        .get_stmt_lookup()
        .get(&parser.current_token_kind())
        .copied();

    match handler {
        Some(handler) => handler(parser),
        None => Ok(Stmt::NoOp),
    }
}

/// compound_statement : BEGIN statement_list END
pub fn parse_compound(parser: &mut Parser) -> Result<Compound, Error> {
    let start = parser.expect(TokenKind::Begin)?.span.start;
    let children = parse_statement_list(parser)?;
    parser.expect(TokenKind::End)?;

    Ok(Compound {
        children,
        span: parser.span_from(start),
    })
}

/// statement_list : statement (SEMI statement)*
pub fn parse_statement_list(parser: &mut Parser) -> Result<Vec<Stmt>, Error> {
    let mut statements = vec![parse_stmt(parser)?];

    while parser.current_token_kind() == TokenKind::Semicolon {
        parser.advance()?;
        statements.push(parse_stmt(parser)?);
    }

    Ok(statements)
}

pub fn parse_compound_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    Ok(Stmt::Compound(parse_compound(parser)?))
}

/// assignment_statement : variable ASSIGN expr
pub fn parse_assignment(parser: &mut Parser) -> Result<Assign, Error> {
    let target = parse_variable(parser)?;
    let start = target.span.start.clone();

    parser.expect(TokenKind::Assign)?;
    let value = parse_expr(parser)?;

    Ok(Assign {
        target,
        value,
        span: parser.span_from(start),
    })
}

pub fn parse_assignment_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    Ok(Stmt::Assign(parse_assignment(parser)?))
}

pub fn parse_call_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    Ok(Stmt::Call(parse_call(parser)?))
}

/// if_statement : IF condition THEN statement (ELSE statement)?
pub fn parse_if_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance()?.span.start;

    let condition = parse_condition(parser)?;
    parser.expect(TokenKind::Then)?;
    let then_body = parse_stmt(parser)?;

    let else_body = if parser.current_token_kind() == TokenKind::Else {
        parser.advance()?;
        parse_stmt(parser)?
    } else {
        Stmt::NoOp
    };

    Ok(Stmt::IfElse(IfElse {
        condition,
        then_body: Box::new(then_body),
        else_body: Box::new(else_body),
        span: parser.span_from(start),
    }))
}

/// while_statement : WHILE condition DO statement
pub fn parse_while_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance()?.span.start;

    let condition = parse_condition(parser)?;
    parser.expect(TokenKind::Do)?;
    let body = parse_stmt(parser)?;

    Ok(Stmt::While(While {
        condition,
        body: Box::new(body),
        span: parser.span_from(start),
    }))
}

/// for_statement : FOR assignment_statement TO expr DO statement
pub fn parse_for_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance()?.span.start;

    let init = parse_assignment(parser)?;
    parser.expect(TokenKind::To)?;
    let end = parse_expr(parser)?;
    parser.expect(TokenKind::Do)?;
    let body = parse_stmt(parser)?;

    Ok(Stmt::For(For {
        init,
        end,
        body: Box::new(body),
        span: parser.span_from(start),
    }))
}
