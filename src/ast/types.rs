use std::fmt::Display;

use crate::Span;

/// The three declarable types of the language.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TypeSpec {
    Integer,
    Real,
    String,
}

impl Display for TypeSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeSpec::Integer => write!(f, "INTEGER"),
            TypeSpec::Real => write!(f, "REAL"),
            TypeSpec::String => write!(f, "STRING"),
        }
    }
}

/// Type Node
/// A type specifier as written in a declaration or parameter list.
#[derive(Debug, Clone)]
pub struct TypeNode {
    pub spec: TypeSpec,
    pub span: Span,
}
