use std::fmt::Display;

use crate::Span;

use super::types::TypeSpec;

/// Expression
/// Every node that evaluates to a value.
#[derive(Debug, Clone)]
pub enum Expr {
    BinOp(BinOp),
    UnaryOp(UnaryOp),
    Call(Call),
    Var(Var),
    Num(Num),
    String(StringLit),
}

impl Expr {
    pub fn get_span(&self) -> &Span {
        match self {
            Expr::BinOp(node) => &node.span,
            Expr::UnaryOp(node) => &node.span,
            Expr::Call(node) => &node.span,
            Expr::Var(node) => &node.span,
            Expr::Num(node) => &node.span,
            Expr::String(node) => &node.span,
        }
    }

    /// Type of a literal, if this expression is one.
    pub fn literal_type(&self) -> Option<TypeSpec> {
        match self {
            Expr::Num(Num {
                value: Number::Integer(_),
                ..
            }) => Some(TypeSpec::Integer),
            Expr::Num(Num {
                value: Number::Real(_),
                ..
            }) => Some(TypeSpec::Real),
            Expr::String(_) => Some(TypeSpec::String),
            _ => None,
        }
    }
}

// LITERALS

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Integer(i64),
    Real(f64),
}

/// Number Expression
/// Represents an integer or real constant.
#[derive(Debug, Clone)]
pub struct Num {
    pub value: Number,
    pub span: Span,
}

/// String Expression
/// Represents a quoted string constant.
#[derive(Debug, Clone)]
pub struct StringLit {
    pub value: String,
    pub span: Span,
}

/// Variable Expression
/// Represents a reference to a named entity. Also used as the target of
/// assignments and as the name holder of declarations.
#[derive(Debug, Clone)]
pub struct Var {
    pub name: String,
    pub span: Span,
}

// OPERATORS

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum BinaryOperator {
    Plus,
    Minus,
    Multiply,
    /// `DIV`, truncating integer division.
    IntegerDivide,
    /// `/`, always produces a real.
    FloatDivide,
}

impl Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BinaryOperator::Plus => write!(f, "+"),
            BinaryOperator::Minus => write!(f, "-"),
            BinaryOperator::Multiply => write!(f, "*"),
            BinaryOperator::IntegerDivide => write!(f, "DIV"),
            BinaryOperator::FloatDivide => write!(f, "/"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct BinOp {
    pub left: Box<Expr>,
    pub operator: BinaryOperator,
    pub right: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum UnaryOperator {
    Plus,
    Minus,
}

impl Display for UnaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnaryOperator::Plus => write!(f, "+"),
            UnaryOperator::Minus => write!(f, "-"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct UnaryOp {
    pub operator: UnaryOperator,
    pub operand: Box<Expr>,
    pub span: Span,
}

/// Call
/// Invocation of a procedure, function or builtin. Appears both as a
/// statement and as an expression.
#[derive(Debug, Clone)]
pub struct Call {
    pub name: String,
    pub arguments: Vec<Expr>,
    pub span: Span,
}

// CONDITIONS

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum RelationalOperator {
    Less,
    Greater,
    Equal,
}

impl Display for RelationalOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RelationalOperator::Less => write!(f, "<"),
            RelationalOperator::Greater => write!(f, ">"),
            RelationalOperator::Equal => write!(f, "="),
        }
    }
}

/// Condition
/// A single relational comparison, used by `IF` and `WHILE`.
#[derive(Debug, Clone)]
pub struct Condition {
    pub left: Expr,
    pub operator: RelationalOperator,
    pub right: Expr,
    pub span: Span,
}
