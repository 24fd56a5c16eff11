use std::io::{BufRead, Write};

use crate::{
    ast::{
        ast::{Block, Declaration},
        expressions::BinaryOperator,
        statements::{Assign, Compound, For, Stmt},
    },
    errors::errors::Error,
};

use super::{frame::Binding, interpreter::Interpreter, value::Value};

impl<'a, R: BufRead, W: Write> Interpreter<'a, R, W> {
    /// Binds the block's routines in the current frame, then runs its body.
    /// Variable declarations bind nothing until first assigned.
    pub(super) fn exec_block(&mut self, block: &'a Block) -> Result<(), Error> {
        for declaration in &block.declarations {
            if let Declaration::Procedure(routine) = declaration {
                self.set(&routine.name, Binding::Routine(routine), &routine.span.start)?;
            }
        }

        self.exec_compound(&block.compound)
    }

    fn exec_compound(&mut self, compound: &'a Compound) -> Result<(), Error> {
        for child in &compound.children {
            self.exec_stmt(child)?;
        }

        Ok(())
    }

    pub(super) fn exec_stmt(&mut self, stmt: &'a Stmt) -> Result<(), Error> {
        match stmt {
            Stmt::Compound(compound) => self.exec_compound(compound),
            Stmt::Assign(assign) => self.exec_assign(assign),
            Stmt::IfElse(if_else) => {
                if self.eval_condition(&if_else.condition)? {
                    self.exec_stmt(&if_else.then_body)
                } else {
                    self.exec_stmt(&if_else.else_body)
                }
            }
            Stmt::While(while_stmt) => {
                while self.eval_condition(&while_stmt.condition)? {
                    self.exec_stmt(&while_stmt.body)?;
                }
                Ok(())
            }
            Stmt::For(for_stmt) => self.exec_for(for_stmt),
            Stmt::Call(call) => self.exec_call(call).map(|_| ()),
            Stmt::NoOp => Ok(()),
        }
    }

    fn exec_assign(&mut self, assign: &'a Assign) -> Result<(), Error> {
        let value = self.eval_expr(&assign.value)?;
        self.set(
            &assign.target.name,
            Binding::Value(value),
            &assign.target.span.start,
        )
    }

    /// Runs the initial assignment, evaluates the bound once, then repeats
    /// the body while the loop variable is at most the bound, adding one
    /// after every pass.
    fn exec_for(&mut self, for_stmt: &'a For) -> Result<(), Error> {
        self.exec_assign(&for_stmt.init)?;
        let end = self.eval_expr(&for_stmt.end)?;

        let var = &for_stmt.init.target;
        let position = &for_stmt.span.start;

        loop {
            let current = self.get_value(var)?;
            let ordering = current
                .ordering(&end, "TO")
                .map_err(|error| Error::new(error, position.clone()))?;

            if ordering.map_or(true, |ordering| ordering.is_gt()) {
                break;
            }

            self.exec_stmt(&for_stmt.body)?;

            let next = self
                .get_value(var)?
                .binary(BinaryOperator::Plus, Value::Integer(1))
                .map_err(|error| Error::new(error, position.clone()))?;
            self.set(&var.name, Binding::Value(next), &var.span.start)?;
        }

        Ok(())
    }
}
