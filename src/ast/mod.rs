/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: Program, block and declaration nodes
/// - expressions: Expression nodes (operators, literals, variables, calls)
/// - statements: Statement nodes (assignment, control flow, calls)
/// - types: Type specifiers for declarations and parameters
pub mod ast;
pub mod expressions;
pub mod statements;
pub mod types;
