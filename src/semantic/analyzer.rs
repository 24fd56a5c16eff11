use std::{collections::HashMap, fmt::Display};

use tracing::debug;

use crate::{
    ast::{
        ast::{Block, Declaration, ProcedureDecl, Program, VarDecl},
        expressions::{Call, Condition, Expr, Var},
        statements::{Assign, Stmt},
        types::TypeSpec,
    },
    errors::errors::{Error, ErrorImpl},
    Position,
};

use super::symbols::{Builtin, ScopeId, ScopeTree, Symbol};

pub const BUILTINS_SCOPE: &str = "builtins";

/// Result of a successful analysis, handed to the interpreter.
#[derive(Debug, Clone)]
pub struct Analysis {
    /// Every scope built for the program.
    pub scopes: ScopeTree,
    /// Scope of each program, procedure and function, by declared name.
    pub registry: HashMap<String, ScopeId>,
    /// Scope of the program block.
    pub global: ScopeId,
}

impl Analysis {
    pub fn scope_for(&self, name: &str) -> Option<ScopeId> {
        self.registry.get(name).copied()
    }
}

impl Display for Analysis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.scopes)
    }
}

/// Single pass over the tree that builds scopes and rejects undeclared,
/// duplicate and mistyped identifiers. Stops at the first error.
pub struct SemanticAnalyzer {
    scopes: ScopeTree,
    registry: HashMap<String, ScopeId>,
    current_scope: ScopeId,
}

impl Default for SemanticAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl SemanticAnalyzer {
    pub fn new() -> Self {
        let mut scopes = ScopeTree::new();
        let builtins = scopes.push(BUILTINS_SCOPE, None);

        for builtin in Builtin::ALL {
            scopes.get_mut(builtins).insert(Symbol::Builtin(builtin));
        }

        SemanticAnalyzer {
            scopes,
            registry: HashMap::new(),
            current_scope: builtins,
        }
    }

    pub fn analyze(mut self, program: &Program) -> Result<Analysis, Error> {
        let global = self.visit_program(program)?;

        Ok(Analysis {
            scopes: self.scopes,
            registry: self.registry,
            global,
        })
    }

    fn lookup(&self, name: &str, current_scope_only: bool) -> Option<&Symbol> {
        self.scopes.lookup(self.current_scope, name, current_scope_only)
    }

    fn enter_scope(&mut self, name: &str) -> ScopeId {
        let scope = self.scopes.push(name, Some(self.current_scope));
        self.registry.insert(name.to_string(), scope);
        self.current_scope = scope;

        debug!(scope = name, level = self.scopes.get(scope).level, "ENTER scope");
        scope
    }

    fn leave_scope(&mut self) {
        let scope = self.scopes.get(self.current_scope);
        debug!(
            scope = %scope.name,
            symbols = ?scope.symbols().iter().map(|s| s.to_string()).collect::<Vec<_>>(),
            "LEAVE scope"
        );

        if let Some(enclosing) = scope.enclosing {
            self.current_scope = enclosing;
        }
    }

    /// Inserts into the current scope, rejecting names it already holds.
    fn declare(&mut self, symbol: Symbol, position: Position) -> Result<(), Error> {
        if self.lookup(symbol.name(), true).is_some() {
            return Err(Error::new(
                ErrorImpl::IdentifierAlreadyDeclared {
                    identifier: symbol.name().to_string(),
                },
                position,
            ));
        }

        debug!(scope = %self.scopes.get(self.current_scope).name, %symbol, "insert");
        self.scopes.get_mut(self.current_scope).insert(symbol);
        Ok(())
    }

    fn resolve(&self, var: &Var) -> Result<Symbol, Error> {
        self.lookup(&var.name, false).cloned().ok_or_else(|| {
            Error::new(
                ErrorImpl::IdentifierNotDeclared {
                    identifier: var.name.clone(),
                },
                var.span.start.clone(),
            )
        })
    }

    fn visit_program(&mut self, program: &Program) -> Result<ScopeId, Error> {
        let global = self.enter_scope(&program.name);
        self.visit_block(&program.block)?;
        self.leave_scope();

        Ok(global)
    }

    fn visit_block(&mut self, block: &Block) -> Result<(), Error> {
        for declaration in &block.declarations {
            match declaration {
                Declaration::Var(var_decl) => self.visit_var_decl(var_decl)?,
                Declaration::Procedure(procedure) => self.visit_procedure_decl(procedure)?,
            }
        }

        for stmt in &block.compound.children {
            self.visit_stmt(stmt)?;
        }

        Ok(())
    }

    fn visit_var_decl(&mut self, var_decl: &VarDecl) -> Result<(), Error> {
        self.declare(
            Symbol::Variable {
                name: var_decl.var.name.clone(),
                ty: var_decl.type_node.spec,
            },
            var_decl.var.span.start.clone(),
        )
    }

    fn visit_procedure_decl(&mut self, procedure: &ProcedureDecl) -> Result<(), Error> {
        let params = procedure
            .params
            .iter()
            .map(|param| (param.var.name.clone(), param.type_node.spec))
            .collect();

        // Declared before the body is visited so the routine can call itself.
        self.declare(
            Symbol::Routine {
                name: procedure.name.clone(),
                params,
                result: procedure.return_type.as_ref().map(|ty| ty.spec),
            },
            procedure.span.start.clone(),
        )?;

        self.enter_scope(&procedure.name);

        for param in &procedure.params {
            self.declare(
                Symbol::Variable {
                    name: param.var.name.clone(),
                    ty: param.type_node.spec,
                },
                param.var.span.start.clone(),
            )?;
        }

        self.visit_block(&procedure.block)?;
        self.leave_scope();

        Ok(())
    }

    fn visit_stmt(&mut self, stmt: &Stmt) -> Result<(), Error> {
        match stmt {
            Stmt::Compound(compound) => {
                for child in &compound.children {
                    self.visit_stmt(child)?;
                }
                Ok(())
            }
            Stmt::Assign(assign) => self.visit_assign(assign),
            Stmt::IfElse(if_else) => {
                self.visit_condition(&if_else.condition)?;
                self.visit_stmt(&if_else.then_body)?;
                self.visit_stmt(&if_else.else_body)
            }
            Stmt::While(while_stmt) => {
                self.visit_condition(&while_stmt.condition)?;
                self.visit_stmt(&while_stmt.body)
            }
            Stmt::For(for_stmt) => {
                self.visit_assign(&for_stmt.init)?;
                self.visit_expr(&for_stmt.end)?;
                self.visit_stmt(&for_stmt.body)
            }
            Stmt::Call(call) => self.visit_call(call),
            Stmt::NoOp => Ok(()),
        }
    }

    fn visit_assign(&mut self, assign: &Assign) -> Result<(), Error> {
        let target = self.resolve(&assign.target)?;
        let received = self.visit_expr(&assign.value)?;

        let expected = match &target {
            Symbol::Variable { ty, .. } => *ty,
            // A function's result is assigned only from inside its own body.
            Symbol::Routine {
                name,
                result: Some(result),
                ..
            } if self.scopes.get(self.current_scope).name == *name => *result,
            _ => {
                return Err(Error::new(
                    ErrorImpl::TypeMatchError {
                        expected: target.to_string(),
                        received: received
                            .map(|ty| ty.to_string())
                            .unwrap_or_else(|| String::from("expression")),
                    },
                    assign.target.span.start.clone(),
                ))
            }
        };

        match received {
            Some(received) if received != expected => Err(Error::new(
                ErrorImpl::TypeMatchError {
                    expected: expected.to_string(),
                    received: received.to_string(),
                },
                assign.value.get_span().start.clone(),
            )),
            _ => Ok(()),
        }
    }

    fn visit_condition(&mut self, condition: &Condition) -> Result<(), Error> {
        self.visit_expr(&condition.left)?;
        self.visit_expr(&condition.right)?;
        Ok(())
    }

    /// Checks every reference inside `expr`. Returns the static type when it
    /// is known: the tag of a literal or the declared type of a variable.
    fn visit_expr(&mut self, expr: &Expr) -> Result<Option<TypeSpec>, Error> {
        match expr {
            Expr::Num(_) | Expr::String(_) => Ok(expr.literal_type()),
            Expr::Var(var) => match self.resolve(var)? {
                Symbol::Variable { ty, .. } => Ok(Some(ty)),
                _ => Ok(None),
            },
            Expr::BinOp(bin_op) => {
                self.visit_expr(&bin_op.left)?;
                self.visit_expr(&bin_op.right)?;
                Ok(None)
            }
            Expr::UnaryOp(unary_op) => {
                self.visit_expr(&unary_op.operand)?;
                Ok(None)
            }
            Expr::Call(call) => {
                self.visit_call(call)?;
                Ok(None)
            }
        }
    }

    fn visit_call(&mut self, call: &Call) -> Result<(), Error> {
        let symbol = self.lookup(&call.name, false).cloned().ok_or_else(|| {
            Error::new(
                ErrorImpl::IdentifierNotDeclared {
                    identifier: call.name.clone(),
                },
                call.span.start.clone(),
            )
        })?;

        if !symbol.is_callable() {
            return Err(Error::new(
                ErrorImpl::NotCallable {
                    identifier: call.name.clone(),
                },
                call.span.start.clone(),
            ));
        }

        let formals = symbol.params();

        for (index, argument) in call.arguments.iter().enumerate() {
            let received = self.visit_expr(argument)?;

            if symbol == Symbol::Builtin(Builtin::ReadLn)
                && received_is_not_variable(argument, received)
            {
                return Err(Error::new(
                    ErrorImpl::TypeMatchError {
                        expected: String::from("variable"),
                        received: String::from("expression"),
                    },
                    argument.get_span().start.clone(),
                ));
            }

            // Only plain variable references are checked against the formal.
            let (Expr::Var(_), Some(received), Some((_, expected))) =
                (argument, received, formals.get(index))
            else {
                continue;
            };

            if received != *expected {
                return Err(Error::new(
                    ErrorImpl::ArgumentTypeMatchError {
                        expected: expected.to_string(),
                        received: received.to_string(),
                    },
                    argument.get_span().start.clone(),
                ));
            }
        }

        Ok(())
    }
}

/// `READLN` stores into its arguments, so each must name a variable.
fn received_is_not_variable(argument: &Expr, received: Option<TypeSpec>) -> bool {
    !matches!(argument, Expr::Var(_)) || received.is_none()
}

/// Analyzes `program`, returning its scopes or the first error found.
pub fn analyze(program: &Program) -> Result<Analysis, Error> {
    SemanticAnalyzer::new().analyze(program)
}
