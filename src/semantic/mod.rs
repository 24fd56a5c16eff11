//! Semantic analysis module.
//!
//! This module performs the single pre-execution pass over the AST:
//!
//! - Building one scope per program, procedure and function, chained to the
//!   lexically enclosing scope
//! - Rejecting duplicate declarations within one scope
//! - Resolving every variable and routine reference
//! - Type checking assignments and variable arguments of calls
//!
//! The resulting `Analysis` is consumed read-only by the interpreter.

pub mod analyzer;
pub mod symbols;
