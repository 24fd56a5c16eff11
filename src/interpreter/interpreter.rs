use std::io::{BufRead, Write};

use tracing::{debug, trace};

use crate::{
    ast::{
        ast::{ProcedureDecl, Program},
        expressions::{Call, Var},
    },
    errors::errors::{Error, ErrorImpl},
    semantic::{analyzer::Analysis, symbols::Builtin},
    Position,
};

use super::{
    frame::{Binding, CallStack, Frame},
    value::Value,
};

/// Calls that may be active at once before a run is aborted.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 1000;

/// Tree-walking interpreter over an analyzed program.
///
/// `input` feeds `READLN` and `output` receives `WRITELN`. The same
/// interpreter may be run more than once; every run starts from an empty
/// call stack.
pub struct Interpreter<'a, R: BufRead, W: Write> {
    pub(super) program: &'a Program,
    pub(super) analysis: &'a Analysis,
    pub(super) call_stack: CallStack<'a>,
    pub(super) max_call_depth: usize,
    pub(super) input: R,
    pub(super) output: W,
}

impl<'a, R: BufRead, W: Write> Interpreter<'a, R, W> {
    pub fn new(program: &'a Program, analysis: &'a Analysis, input: R, output: W) -> Self {
        Interpreter {
            program,
            analysis,
            call_stack: CallStack::new(),
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
            input,
            output,
        }
    }

    pub fn with_max_call_depth(mut self, max_call_depth: usize) -> Self {
        self.max_call_depth = max_call_depth;
        self
    }

    pub fn interpret(&mut self) -> Result<(), Error> {
        debug!(program = %self.program.name, "interpret");

        self.call_stack.clear();
        let global = Frame::new(&self.program.name, Some(self.analysis.global), None);
        let program = self.program;

        self.with_frame(global, |this| this.exec_block(&program.block))?;

        self.output.flush().map_err(|error| {
            Error::new(
                ErrorImpl::Io {
                    message: error.to_string(),
                },
                program.span.end.clone(),
            )
        })
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Runs `body` with `frame` on top of the stack. The frame is popped
    /// whether or not `body` succeeds; its return slot is handed back.
    pub(super) fn with_frame<T>(
        &mut self,
        frame: Frame<'a>,
        body: impl FnOnce(&mut Self) -> Result<T, Error>,
    ) -> Result<(T, Option<Value>), Error> {
        self.call_stack.push(frame);
        let result = body(self);
        let frame = self.call_stack.pop();

        Ok((result?, frame.and_then(|frame| frame.return_value)))
    }

    pub(super) fn get_value(&self, var: &Var) -> Result<Value, Error> {
        let binding = self
            .call_stack
            .get(&self.analysis.scopes, &var.name)
            .map_err(|error| Error::new(error, var.span.start.clone()))?;

        match binding {
            Some(Binding::Value(value)) => Ok(value.clone()),
            Some(Binding::Routine(_)) => Err(Error::new(
                ErrorImpl::NotAValue {
                    identifier: var.name.clone(),
                },
                var.span.start.clone(),
            )),
            None => Err(Error::new(
                ErrorImpl::VariableNotInitialised {
                    identifier: var.name.clone(),
                },
                var.span.start.clone(),
            )),
        }
    }

    pub(super) fn set(
        &mut self,
        name: &str,
        binding: Binding<'a>,
        position: &Position,
    ) -> Result<(), Error> {
        self.call_stack
            .set(&self.analysis.scopes, name, binding)
            .map_err(|error| Error::new(error, position.clone()))
    }

    /// Invokes a user routine or a builtin. User declarations shadow the
    /// builtins of the same name.
    pub(super) fn exec_call(&mut self, call: &'a Call) -> Result<Option<Value>, Error> {
        let routine = match self.call_stack.get(&self.analysis.scopes, &call.name) {
            Ok(Some(Binding::Routine(routine))) => Some(*routine),
            Ok(Some(Binding::Value(_))) => {
                return Err(Error::new(
                    ErrorImpl::NotCallable {
                        identifier: call.name.clone(),
                    },
                    call.span.start.clone(),
                ))
            }
            Ok(None) | Err(_) => None,
        };

        if let Some(routine) = routine {
            return self.call_routine(call, routine);
        }

        match Builtin::from_name(&call.name) {
            Some(builtin) => {
                self.call_builtin(builtin, call)?;
                Ok(None)
            }
            None => Err(Error::new(
                ErrorImpl::SymbolNotBound {
                    identifier: call.name.clone(),
                },
                call.span.start.clone(),
            )),
        }
    }

    fn call_routine(
        &mut self,
        call: &'a Call,
        routine: &'a ProcedureDecl,
    ) -> Result<Option<Value>, Error> {
        // Arguments are evaluated in the caller's frame.
        let arguments = call
            .arguments
            .iter()
            .map(|argument| self.eval_expr(argument))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(routine = %routine.name, arguments = ?arguments, "call");

        if self.call_stack.len() >= self.max_call_depth {
            return Err(Error::new(
                ErrorImpl::CallDepthExceeded {
                    depth: self.max_call_depth,
                },
                call.span.start.clone(),
            ));
        }

        let frame = Frame::routine(
            &routine.name,
            self.analysis.scope_for(&routine.name),
            self.call_stack.current(),
        );

        let (_, return_value) = self.with_frame(frame, |this| {
            // Extra arguments, or missing ones, are silently ignored.
            for (param, argument) in routine.params.iter().zip(arguments) {
                this.set(&param.var.name, Binding::Value(argument), &param.var.span.start)?;
            }

            this.exec_block(&routine.block)
        })?;

        trace!(routine = %routine.name, return_value = ?return_value, "return");
        Ok(return_value)
    }

    fn call_builtin(&mut self, builtin: Builtin, call: &'a Call) -> Result<(), Error> {
        let frame = Frame::new(builtin.name(), None, self.call_stack.current());

        self.with_frame(frame, |this| match builtin {
            Builtin::WriteLn => this.write_line(call),
            Builtin::ReadLn => this.read_line(call),
        })?;

        Ok(())
    }
}
