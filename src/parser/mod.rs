//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the recursive-descent parser that transforms the
//! lexer's token stream into a `Program` tree. Each grammar production has
//! its own routine:
//!
//! - Program, block and declaration parsing (variables, procedures, functions)
//! - Statement parsing (compound, assignment, if/while/for, calls)
//! - Expression parsing with precedence encoded by expr/term/factor
//! - Type specifier parsing
//!
//! The first unexpected token aborts parsing; there is no recovery.

pub mod decl;
pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
pub mod types;

#[cfg(test)]
mod tests;
