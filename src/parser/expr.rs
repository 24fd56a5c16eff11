use crate::{
    ast::expressions::{
        BinOp, BinaryOperator, Call, Condition, Expr, Num, Number, RelationalOperator, StringLit,
        UnaryOp, UnaryOperator, Var,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Span,
};

use super::parser::Parser;

/// expr : term ((PLUS | MINUS) term)*
pub fn parse_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let mut node = parse_term(parser)?;

    loop {
        let operator = match parser.current_token_kind() {
            TokenKind::Plus => BinaryOperator::Plus,
            TokenKind::Minus => BinaryOperator::Minus,
            _ => break,
        };
        parser.advance()?;

        let right = parse_term(parser)?;
        node = binary(node, operator, right);
    }

    Ok(node)
}

/// term : factor ((MUL | DIV | SLASH) factor)*
pub fn parse_term(parser: &mut Parser) -> Result<Expr, Error> {
    let mut node = parse_factor(parser)?;

    loop {
        let operator = match parser.current_token_kind() {
            TokenKind::Star => BinaryOperator::Multiply,
            TokenKind::Div => BinaryOperator::IntegerDivide,
            TokenKind::Slash => BinaryOperator::FloatDivide,
            _ => break,
        };
        parser.advance()?;

        let right = parse_factor(parser)?;
        node = binary(node, operator, right);
    }

    Ok(node)
}

fn binary(left: Expr, operator: BinaryOperator, right: Expr) -> Expr {
    Expr::BinOp(BinOp {
        span: Span {
            start: left.get_span().start.clone(),
            end: right.get_span().end.clone(),
        },
        left: Box::new(left),
        operator,
        right: Box::new(right),
    })
}

/// factor : (PLUS | MINUS) factor | INTEGER_CONST | REAL_CONST | STRING_CONST
///        | LPAREN expr RPAREN | call | variable
pub fn parse_factor(parser: &mut Parser) -> Result<Expr, Error> {
    match parser.current_token_kind() {
        TokenKind::Plus | TokenKind::Minus => {
            let token = parser.advance()?;
            let operator = if token.kind == TokenKind::Plus {
                UnaryOperator::Plus
            } else {
                UnaryOperator::Minus
            };

            let operand = parse_factor(parser)?;
            Ok(Expr::UnaryOp(UnaryOp {
                span: Span {
                    start: token.span.start,
                    end: operand.get_span().end.clone(),
                },
                operator,
                operand: Box::new(operand),
            }))
        }
        TokenKind::IntegerConst => {
            let token = parser.advance()?;
            let value = token.value.parse::<i64>().map_err(|_| {
                Error::new(
                    ErrorImpl::NumberParseError {
                        token: token.value.clone(),
                    },
                    token.span.start.clone(),
                )
            })?;

            Ok(Expr::Num(Num {
                value: Number::Integer(value),
                span: token.span,
            }))
        }
        TokenKind::RealConst => {
            let token = parser.advance()?;
            let value = token.value.parse::<f64>().map_err(|_| {
                Error::new(
                    ErrorImpl::NumberParseError {
                        token: token.value.clone(),
                    },
                    token.span.start.clone(),
                )
            })?;

            Ok(Expr::Num(Num {
                value: Number::Real(value),
                span: token.span,
            }))
        }
        TokenKind::StringConst => {
            let token = parser.advance()?;
            Ok(Expr::String(StringLit {
                value: token.value,
                span: token.span,
            }))
        }
        TokenKind::OpenParen => {
            parser.advance()?;
            let expr = parse_expr(parser)?;
            parser.expect(TokenKind::CloseParen)?;
            Ok(expr)
        }
        TokenKind::Call => Ok(Expr::Call(parse_call(parser)?)),
        _ => Ok(Expr::Var(parse_variable(parser)?)),
    }
}

/// condition : expr (LT | GT | EQ) expr
pub fn parse_condition(parser: &mut Parser) -> Result<Condition, Error> {
    let left = parse_expr(parser)?;

    let operator = match parser.current_token_kind() {
        TokenKind::Less => RelationalOperator::Less,
        TokenKind::Greater => RelationalOperator::Greater,
        TokenKind::Equal => RelationalOperator::Equal,
        _ => return Err(parser.unexpected("expected `<`, `>` or `=` in condition")),
    };
    parser.advance()?;

    let right = parse_expr(parser)?;

    Ok(Condition {
        span: Span {
            start: left.get_span().start.clone(),
            end: right.get_span().end.clone(),
        },
        left,
        operator,
        right,
    })
}

/// call : CALL (expr (COMMA expr)*)? RPAREN
///
/// The call marker token already includes the opening parenthesis.
pub fn parse_call(parser: &mut Parser) -> Result<Call, Error> {
    let token = parser.expect(TokenKind::Call)?;

    let mut arguments = vec![];

    while parser.current_token_kind() != TokenKind::CloseParen {
        arguments.push(parse_expr(parser)?);

        if parser.current_token_kind() != TokenKind::Comma {
            break;
        }
        parser.advance()?;
    }

    parser.expect(TokenKind::CloseParen)?;

    Ok(Call {
        name: token.value,
        arguments,
        span: parser.span_from(token.span.start),
    })
}

/// variable : ID
pub fn parse_variable(parser: &mut Parser) -> Result<Var, Error> {
    let error = parser.unexpected("expected identifier");
    let token = parser.expect_error(TokenKind::Identifier, Some(error))?;

    Ok(Var {
        name: token.value,
        span: token.span,
    })
}
