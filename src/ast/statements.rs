use crate::Span;

use super::expressions::{Call, Condition, Expr, Var};

/// Statement
/// Every node that executes for its effect.
#[derive(Debug, Clone)]
pub enum Stmt {
    Compound(Compound),
    Assign(Assign),
    IfElse(IfElse),
    While(While),
    For(For),
    Call(Call),
    NoOp,
}

/// Compound Statement
/// A `BEGIN ... END` sequence.
#[derive(Debug, Clone)]
pub struct Compound {
    pub children: Vec<Stmt>,
    pub span: Span,
}

/// Assignment Statement
/// `target := value`
#[derive(Debug, Clone)]
pub struct Assign {
    pub target: Var,
    pub value: Expr,
    pub span: Span,
}

/// If Statement
/// A missing `ELSE` branch is represented by `Stmt::NoOp`.
#[derive(Debug, Clone)]
pub struct IfElse {
    pub condition: Condition,
    pub then_body: Box<Stmt>,
    pub else_body: Box<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct While {
    pub condition: Condition,
    pub body: Box<Stmt>,
    pub span: Span,
}

/// For Statement
/// `FOR init TO end DO body`. The loop variable is the target of `init`.
#[derive(Debug, Clone)]
pub struct For {
    pub init: Assign,
    pub end: Expr,
    pub body: Box<Stmt>,
    pub span: Span,
}
