//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct and the `parse` entry point.
//! The parser is recursive descent: one routine per grammar production,
//! pulling tokens from the lexer one at a time. Statement routines are
//! dispatched through a lookup table keyed by the token that starts them.

use std::collections::HashMap;

use crate::{
    ast::ast::Program,
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::Lexer,
        tokens::{Token, TokenKind},
    },
    Position, Span,
};

use super::{
    decl::parse_program,
    lookups::{create_token_lookups, StmtHandler, StmtLookup},
};

/// The main parser structure that maintains parsing state.
///
/// It owns the lexer and holds exactly one token of lookahead. Tokens are
/// requested from the lexer as they are consumed, never buffered.
pub struct Parser {
    /// Source of tokens
    lexer: Lexer,
    /// The lookahead token
    current: Token,
    /// End position of the most recently consumed token
    previous_end: Position,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup,
}

impl Parser {
    /// Creates a new Parser over `source` and reads the first token.
    ///
    /// # Arguments
    ///
    /// * `source` - The program text
    /// * `file` - Name of the source, used in diagnostics
    pub fn new(source: &str, file: Option<String>) -> Result<Self, Error> {
        let mut lexer = Lexer::new(source, file);
        let file = lexer.file();
        let current = lexer.next_token()?;

        Ok(Parser {
            lexer,
            current,
            previous_end: Position(0, file),
            stmt_lookup: HashMap::new(),
        })
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current.kind
    }

    /// Advances to the next token and returns the one just consumed.
    pub fn advance(&mut self) -> Result<Token, Error> {
        let next = self.lexer.next_token()?;
        let previous = std::mem::replace(&mut self.current, next);
        self.previous_end = previous.span.end.clone();
        Ok(previous)
    }

    /// Expects a token of the specified kind, with optional custom error.
    ///
    /// # Arguments
    ///
    /// * `expected_kind` - The expected TokenKind
    /// * `error` - Optional custom error to return if expectation fails
    ///
    /// # Returns
    ///
    /// Returns Ok(Token) if the current token matches, otherwise returns an Error.
    pub fn expect_error(
        &mut self,
        expected_kind: TokenKind,
        error: Option<Error>,
    ) -> Result<Token, Error> {
        if self.current.kind != expected_kind {
            match error {
                Some(error) => Err(error),
                None => Err(Error::new(
                    ErrorImpl::UnexpectedTokenDetailed {
                        token: self.current.value.clone(),
                        message: format!("expected {}", expected_kind),
                    },
                    self.get_position(),
                )),
            }
        } else {
            self.advance()
        }
    }

    /// Expects a token of the specified kind with default error message.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        self.expect_error(expected_kind, None)
    }

    /// Builds an error for the current token with a custom message.
    pub fn unexpected(&self, message: &str) -> Error {
        Error::new(
            ErrorImpl::UnexpectedTokenDetailed {
                token: self.current.value.clone(),
                message: String::from(message),
            },
            self.get_position(),
        )
    }

    /// Returns a reference to the statement lookup table.
    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    /// Registers a statement handler for a token.
    ///
    /// # Arguments
    ///
    /// * `kind` - The token kind that starts the statement
    /// * `stmt_fn` - The handler function for this statement type
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    /// Returns the start position of the current token.
    pub fn get_position(&self) -> Position {
        self.current.span.start.clone()
    }

    /// Span from `start` to the end of the last consumed token.
    pub fn span_from(&self, start: Position) -> Span {
        Span {
            start,
            end: self.previous_end.clone(),
        }
    }
}

/// Parses a source text into a `Program` tree.
///
/// This is the main entry point for parsing. It creates a parser, registers
/// the statement handlers and parses a whole program followed by end of
/// input. The first lexical or syntax error aborts parsing.
///
/// # Arguments
///
/// * `source` - The program text
/// * `file` - Name of the source, used in diagnostics
pub fn parse(source: &str, file: Option<String>) -> Result<Program, Error> {
    let mut parser = Parser::new(source, file)?;
    create_token_lookups(&mut parser);

    let program = parse_program(&mut parser)?;
    parser.expect(TokenKind::EOF)?;

    Ok(program)
}
