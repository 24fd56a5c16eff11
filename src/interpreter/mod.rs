//! Interpreter module.
//!
//! This module executes an analyzed program by walking its AST. It handles:
//!
//! - Runtime values and the arithmetic defined over them
//! - Activation frames and the call stack, with name resolution that
//!   follows the chain of callers
//! - Statement execution and expression evaluation
//! - The `WRITELN` and `READLN` builtins over caller-supplied streams

pub mod builtins;
pub mod expr;
pub mod frame;
pub mod interpreter;
pub mod stmt;
pub mod value;
