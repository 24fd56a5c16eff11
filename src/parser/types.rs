//! Type specifier parsing.
//!
//! ```text
//! type_spec : INTEGER | REAL | STRING
//! ```

use crate::{
    ast::types::{TypeNode, TypeSpec},
    errors::errors::Error,
    lexer::tokens::TokenKind,
};

use super::parser::Parser;

pub fn parse_type_spec(parser: &mut Parser) -> Result<TypeNode, Error> {
    let spec = match parser.current_token_kind() {
        TokenKind::Integer => TypeSpec::Integer,
        TokenKind::Real => TypeSpec::Real,
        TokenKind::String => TypeSpec::String,
        _ => return Err(parser.unexpected("expected INTEGER, REAL or STRING")),
    };

    let token = parser.advance()?;

    Ok(TypeNode {
        spec,
        span: token.span,
    })
}
