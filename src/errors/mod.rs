//! Error types and error handling for the interpreter.
//!
//! This module defines the error types used throughout the pipeline.
//! It includes:
//!
//! - Error structures with source position information
//! - Specific error variants for lexing, parsing, analysis and execution
//! - The error taxonomy each variant belongs to
//! - Helpful error messages and suggestions

pub mod errors;
