use crate::Span;

use super::{expressions::Var, statements::Compound, types::TypeNode};

/// Program
/// The root of every tree: `PROGRAM name; block.`
#[derive(Debug, Clone)]
pub struct Program {
    pub name: String,
    pub block: Block,
    pub span: Span,
}

/// Block
/// Declarations followed by the statement body they are visible in.
#[derive(Debug, Clone)]
pub struct Block {
    pub declarations: Vec<Declaration>,
    pub compound: Compound,
}

#[derive(Debug, Clone)]
pub enum Declaration {
    Var(VarDecl),
    Procedure(ProcedureDecl),
}

#[derive(Debug, Clone)]
pub struct VarDecl {
    pub var: Var,
    pub type_node: TypeNode,
}

/// Procedure Declaration
/// Also used for functions, which carry a result type.
#[derive(Debug, Clone)]
pub struct ProcedureDecl {
    pub name: String,
    pub params: Vec<Param>,
    pub return_type: Option<TypeNode>,
    pub block: Block,
    pub span: Span,
}

impl ProcedureDecl {
    pub fn is_function(&self) -> bool {
        self.return_type.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct Param {
    pub var: Var,
    pub type_node: TypeNode,
}
