use std::io::{BufRead, Write};

use crate::{
    ast::expressions::{Condition, Expr},
    errors::errors::{Error, ErrorImpl},
};

use super::{interpreter::Interpreter, value::Value};

impl<'a, R: BufRead, W: Write> Interpreter<'a, R, W> {
    pub(super) fn eval_expr(&mut self, expr: &'a Expr) -> Result<Value, Error> {
        match expr {
            Expr::Num(num) => Ok(Value::from(num.value)),
            Expr::String(string) => Ok(Value::Str(string.value.clone())),
            Expr::Var(var) => self.get_value(var),
            Expr::UnaryOp(unary_op) => {
                let operand = self.eval_expr(&unary_op.operand)?;

                operand
                    .unary(unary_op.operator)
                    .map_err(|error| Error::new(error, unary_op.span.start.clone()))
            }
            Expr::BinOp(bin_op) => {
                let left = self.eval_expr(&bin_op.left)?;
                let right = self.eval_expr(&bin_op.right)?;

                left.binary(bin_op.operator, right)
                    .map_err(|error| Error::new(error, bin_op.right.get_span().start.clone()))
            }
            Expr::Call(call) => self.exec_call(call)?.ok_or_else(|| {
                Error::new(
                    ErrorImpl::MissingReturnValue {
                        routine: call.name.clone(),
                    },
                    call.span.start.clone(),
                )
            }),
        }
    }

    pub(super) fn eval_condition(&mut self, condition: &'a Condition) -> Result<bool, Error> {
        let left = self.eval_expr(&condition.left)?;
        let right = self.eval_expr(&condition.right)?;

        left.compare(condition.operator, &right)
            .map_err(|error| Error::new(error, condition.span.start.clone()))
    }
}
