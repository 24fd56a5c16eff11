use std::{collections::HashMap, fmt::Display};

use tracing::trace;

use crate::{
    ast::ast::ProcedureDecl,
    errors::errors::ErrorImpl,
    semantic::symbols::{ScopeId, ScopeTree},
};

use super::value::Value;

/// What a name is bound to inside a frame.
#[derive(Debug, Clone)]
pub enum Binding<'a> {
    Value(Value),
    /// A procedure or function, bound when its declaration is executed.
    Routine(&'a ProcedureDecl),
}

impl Display for Binding<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Binding::Value(value) => write!(f, "{}", value),
            Binding::Routine(routine) => write!(f, "<ROUTINE {}>", routine.name),
        }
    }
}

/// Activation record for the program body or one routine invocation.
#[derive(Debug)]
pub struct Frame<'a> {
    /// Name of the scope this frame executes.
    pub name: String,
    /// `None` for frames of builtins, which declare nothing.
    pub scope: Option<ScopeId>,
    /// Index of the calling frame on the stack.
    pub enclosing: Option<usize>,
    /// Set for function and procedure calls only. Assigning to `name`
    /// then fills `return_value`.
    pub returns: bool,
    pub return_value: Option<Value>,
    data: HashMap<String, Binding<'a>>,
}

impl<'a> Frame<'a> {
    pub fn new(name: &str, scope: Option<ScopeId>, enclosing: Option<usize>) -> Self {
        Frame {
            name: name.to_string(),
            scope,
            enclosing,
            returns: false,
            return_value: None,
            data: HashMap::new(),
        }
    }

    /// Frame of a routine invocation, which owns a return slot.
    pub fn routine(name: &str, scope: Option<ScopeId>, enclosing: Option<usize>) -> Self {
        Frame {
            returns: true,
            ..Frame::new(name, scope, enclosing)
        }
    }

    /// Whether `name` is declared directly in this frame's scope.
    fn declares(&self, scopes: &ScopeTree, name: &str) -> bool {
        self.scope
            .is_some_and(|scope| scopes.lookup(scope, name, true).is_some())
    }

    pub fn get_local(&self, name: &str) -> Option<&Binding<'a>> {
        self.data.get(name)
    }
}

/// Stack of active frames. Name resolution starts at the top frame and
/// follows each frame's `enclosing` link, so a routine sees the locals of
/// whoever called it.
#[derive(Debug, Default)]
pub struct CallStack<'a> {
    frames: Vec<Frame<'a>>,
}

impl<'a> CallStack<'a> {
    pub fn new() -> Self {
        CallStack { frames: vec![] }
    }

    pub fn push(&mut self, frame: Frame<'a>) {
        trace!(frame = %frame.name, depth = self.frames.len(), "push frame");
        self.frames.push(frame);
    }

    pub fn pop(&mut self) -> Option<Frame<'a>> {
        let frame = self.frames.pop();
        if let Some(frame) = &frame {
            trace!(frame = %frame.name, depth = self.frames.len(), "pop frame");
        }
        frame
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }

    /// Index of the top frame.
    pub fn current(&self) -> Option<usize> {
        self.frames.len().checked_sub(1)
    }

    pub fn peek(&self) -> Option<&Frame<'a>> {
        self.frames.last()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Scopes of the active frames, innermost first.
    pub fn scopes(&self) -> impl Iterator<Item = ScopeId> + '_ {
        let mut index = self.current();

        std::iter::from_fn(move || {
            let frame = &self.frames[index?];
            index = frame.enclosing;
            Some(frame.scope)
        })
        .flatten()
    }

    /// Finds the frame responsible for `name`: the first one along the
    /// chain whose scope declares it.
    fn owner(&self, scopes: &ScopeTree, name: &str) -> Option<usize> {
        let mut index = self.current();

        while let Some(current) = index {
            let frame = &self.frames[current];
            if frame.declares(scopes, name) {
                return Some(current);
            }
            index = frame.enclosing;
        }

        None
    }

    /// Resolves `name`. `Ok(None)` means the owning frame exists but has
    /// not bound the name yet.
    pub fn get(
        &self,
        scopes: &ScopeTree,
        name: &str,
    ) -> Result<Option<&Binding<'a>>, ErrorImpl> {
        let index = self.owner(scopes, name).ok_or_else(|| ErrorImpl::SymbolNotBound {
            identifier: name.to_string(),
        })?;

        Ok(self.frames[index].get_local(name))
    }

    /// Binds `name`. A value assigned to the name of a routine frame fills
    /// that frame's return slot instead.
    pub fn set(
        &mut self,
        scopes: &ScopeTree,
        name: &str,
        binding: Binding<'a>,
    ) -> Result<(), ErrorImpl> {
        let mut index = self.current();

        while let Some(current) = index {
            let frame = &mut self.frames[current];

            if frame.returns && frame.name == name {
                if let Binding::Value(value) = &binding {
                    trace!(frame = %frame.name, %value, "set return value");
                    frame.return_value = Some(value.clone());
                    return Ok(());
                }
            }

            if frame.declares(scopes, name) {
                trace!(frame = %frame.name, name, %binding, "set");
                frame.data.insert(name.to_string(), binding);
                return Ok(());
            }

            index = frame.enclosing;
        }

        Err(ErrorImpl::SymbolNotBound {
            identifier: name.to_string(),
        })
    }
}
