//! Program, block and declaration parsing.
//!
//! ```text
//! program              : PROGRAM ID SEMI block DOT
//! block                : declarations compound_statement
//! declarations         : ( VAR (variable_declaration SEMI)+
//!                        | PROCEDURE ID (LPAREN formal_parameter_list RPAREN)? SEMI block SEMI
//!                        | FUNCTION ID (LPAREN formal_parameter_list RPAREN)? COLON type_spec SEMI block SEMI
//!                        )*
//! variable_declaration : ID (COMMA ID)* COLON type_spec
//! formal_parameter_list: empty | formal_parameters (SEMI formal_parameters)*
//! formal_parameters    : ID (COMMA ID)* COLON type_spec
//! ```

use crate::{
    ast::{
        ast::{Block, Declaration, Param, ProcedureDecl, Program, VarDecl},
        expressions::Var,
    },
    errors::errors::Error,
    lexer::tokens::TokenKind,
};

use super::{expr::parse_variable, parser::Parser, stmt::parse_compound, types::parse_type_spec};

pub fn parse_program(parser: &mut Parser) -> Result<Program, Error> {
    let start = parser.expect(TokenKind::Program)?.span.start;

    let error = parser.unexpected("expected program name");
    let name = parser.expect_error(TokenKind::Identifier, Some(error))?.value;
    parser.expect(TokenKind::Semicolon)?;

    let block = parse_block(parser)?;
    parser.expect(TokenKind::Dot)?;

    Ok(Program {
        name,
        block,
        span: parser.span_from(start),
    })
}

pub fn parse_block(parser: &mut Parser) -> Result<Block, Error> {
    let declarations = parse_declarations(parser)?;
    let compound = parse_compound(parser)?;

    Ok(Block {
        declarations,
        compound,
    })
}

pub fn parse_declarations(parser: &mut Parser) -> Result<Vec<Declaration>, Error> {
    let mut declarations = vec![];

    loop {
        match parser.current_token_kind() {
            TokenKind::Var => {
                parser.advance()?;

                loop {
                    declarations.extend(
                        parse_variable_declaration(parser)?
                            .into_iter()
                            .map(Declaration::Var),
                    );
                    parser.expect(TokenKind::Semicolon)?;

                    if parser.current_token_kind() != TokenKind::Identifier {
                        break;
                    }
                }
            }
            TokenKind::Procedure => {
                declarations.push(Declaration::Procedure(parse_procedure_decl(parser, false)?));
            }
            TokenKind::Function => {
                declarations.push(Declaration::Procedure(parse_procedure_decl(parser, true)?));
            }
            _ => break,
        }
    }

    Ok(declarations)
}

/// Parses `a, b, c` up to (not including) the colon.
fn parse_identifier_list(parser: &mut Parser) -> Result<Vec<Var>, Error> {
    let mut names = vec![parse_variable(parser)?];

    while parser.current_token_kind() == TokenKind::Comma {
        parser.advance()?;
        names.push(parse_variable(parser)?);
    }

    Ok(names)
}

pub fn parse_variable_declaration(parser: &mut Parser) -> Result<Vec<VarDecl>, Error> {
    let vars = parse_identifier_list(parser)?;
    parser.expect(TokenKind::Colon)?;
    let type_node = parse_type_spec(parser)?;

    Ok(vars
        .into_iter()
        .map(|var| VarDecl {
            var,
            type_node: type_node.clone(),
        })
        .collect())
}

pub fn parse_formal_parameters(parser: &mut Parser) -> Result<Vec<Param>, Error> {
    let vars = parse_identifier_list(parser)?;
    parser.expect(TokenKind::Colon)?;
    let type_node = parse_type_spec(parser)?;

    Ok(vars
        .into_iter()
        .map(|var| Param {
            var,
            type_node: type_node.clone(),
        })
        .collect())
}

pub fn parse_formal_parameter_list(parser: &mut Parser) -> Result<Vec<Param>, Error> {
    // PROCEDURE Foo();
    if parser.current_token_kind() != TokenKind::Identifier {
        return Ok(vec![]);
    }

    let mut params = parse_formal_parameters(parser)?;

    while parser.current_token_kind() == TokenKind::Semicolon {
        parser.advance()?;
        params.extend(parse_formal_parameters(parser)?);
    }

    Ok(params)
}

pub fn parse_procedure_decl(
    parser: &mut Parser,
    is_function: bool,
) -> Result<ProcedureDecl, Error> {
    let start = parser.advance()?.span.start;

    let error = parser.unexpected("expected identifier after routine keyword");
    let name = parser.expect_error(TokenKind::Identifier, Some(error))?.value;

    let mut params = vec![];
    if parser.current_token_kind() == TokenKind::OpenParen {
        parser.advance()?;
        params = parse_formal_parameter_list(parser)?;
        parser.expect(TokenKind::CloseParen)?;
    }

    let return_type = if is_function {
        parser.expect(TokenKind::Colon)?;
        Some(parse_type_spec(parser)?)
    } else {
        None
    };

    parser.expect(TokenKind::Semicolon)?;
    let block = parse_block(parser)?;
    let span = parser.span_from(start);
    parser.expect(TokenKind::Semicolon)?;

    Ok(ProcedureDecl {
        name,
        params,
        return_type,
        block,
        span,
    })
}
