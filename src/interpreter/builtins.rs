use std::io::{BufRead, Write};

use tracing::trace;

use crate::{
    ast::{
        expressions::{Call, Expr, Var},
        types::TypeSpec,
    },
    errors::errors::{Error, ErrorImpl},
    semantic::symbols::Symbol,
    Position,
};

use super::{frame::Binding, interpreter::Interpreter, value::Value};

fn io_error(error: std::io::Error, position: &Position) -> Error {
    Error::new(
        ErrorImpl::Io {
            message: error.to_string(),
        },
        position.clone(),
    )
}

impl<'a, R: BufRead, W: Write> Interpreter<'a, R, W> {
    /// `WRITELN(e1, e2, ...)` writes each argument on its own line.
    pub(super) fn write_line(&mut self, call: &'a Call) -> Result<(), Error> {
        for argument in &call.arguments {
            let value = self.eval_expr(argument)?;
            trace!(%value, "WRITELN");

            writeln!(self.output, "{}", value)
                .map_err(|error| io_error(error, &argument.get_span().start))?;
        }

        self.output
            .flush()
            .map_err(|error| io_error(error, &call.span.start))
    }

    /// `READLN(v1, v2, ...)` reads one whitespace-delimited token per
    /// argument and stores it, converted to the variable's declared type.
    pub(super) fn read_line(&mut self, call: &'a Call) -> Result<(), Error> {
        for argument in &call.arguments {
            let Expr::Var(var) = argument else {
                return Err(Error::new(
                    ErrorImpl::TypeMatchError {
                        expected: String::from("variable"),
                        received: String::from("expression"),
                    },
                    argument.get_span().start.clone(),
                ));
            };

            let ty = self.declared_type(var)?;
            let token = self
                .read_token()
                .map_err(|error| io_error(error, &var.span.start))?
                .ok_or_else(|| {
                    Error::new(
                        ErrorImpl::InvalidInput {
                            input: String::from("end of input"),
                            expected: ty.to_string(),
                        },
                        var.span.start.clone(),
                    )
                })?;

            let value = parse_input(&token, ty)
                .map_err(|error| Error::new(error, var.span.start.clone()))?;
            trace!(name = %var.name, %value, "READLN");

            self.set(&var.name, Binding::Value(value), &var.span.start)?;
        }

        Ok(())
    }

    /// Type of `var` as declared in the scope of the innermost frame that
    /// has one, or in any scope lexically enclosing it.
    fn declared_type(&self, var: &Var) -> Result<TypeSpec, Error> {
        let scopes = &self.analysis.scopes;

        self.call_stack
            .scopes()
            .next()
            .and_then(|scope| match scopes.lookup(scope, &var.name, false) {
                Some(Symbol::Variable { ty, .. }) => Some(*ty),
                _ => None,
            })
            .ok_or_else(|| {
                Error::new(
                    ErrorImpl::TypeMatchError {
                        expected: String::from("variable"),
                        received: var.name.clone(),
                    },
                    var.span.start.clone(),
                )
            })
    }

    /// Next whitespace-delimited token of the input, `None` at end of input.
    fn read_token(&mut self) -> std::io::Result<Option<String>> {
        let mut token = vec![];

        loop {
            let buffer = self.input.fill_buf()?;
            if buffer.is_empty() {
                break;
            }

            let mut consumed = 0;
            let mut finished = false;

            for &byte in buffer {
                consumed += 1;

                if byte.is_ascii_whitespace() {
                    if token.is_empty() {
                        continue;
                    }
                    finished = true;
                    break;
                }

                token.push(byte);
            }

            self.input.consume(consumed);
            if finished {
                break;
            }
        }

        if token.is_empty() {
            return Ok(None);
        }

        Ok(Some(String::from_utf8_lossy(&token).into_owned()))
    }
}

fn parse_input(token: &str, ty: TypeSpec) -> Result<Value, ErrorImpl> {
    let invalid = || ErrorImpl::InvalidInput {
        input: token.to_string(),
        expected: ty.to_string(),
    };

    match ty {
        TypeSpec::Integer => token.parse().map(Value::Integer).map_err(|_| invalid()),
        TypeSpec::Real => token.parse().map(Value::Real).map_err(|_| invalid()),
        TypeSpec::String => Ok(Value::Str(token.to_string())),
    }
}
