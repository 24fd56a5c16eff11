//! Lexical analysis module.
//!
//! This module contains the lexer (tokenizer) that converts source text
//! into a stream of tokens for the parser. It handles:
//!
//! - Tokenization using anchored regex patterns, one token per request
//! - Case-insensitive recognition of reserved words
//! - Call markers for identifiers immediately followed by `(`
//! - Brace comments and whitespace skipping
//! - Token position tracking for error reporting

pub mod lexer;
pub mod tokens;

#[cfg(test)]
mod tests;
