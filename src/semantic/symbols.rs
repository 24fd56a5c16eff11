//! Symbols and scoped symbol tables.
//!
//! Scopes live in a `ScopeTree` arena and refer to their lexically
//! enclosing scope by `ScopeId`, so nested declarations never need
//! shared ownership or back-pointers.

use std::{collections::HashMap, fmt::Display};

use crate::ast::types::TypeSpec;

/// Stable handle to a scope inside a `ScopeTree`.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct ScopeId(usize);

/// The fixed I/O operations resolved outside user declarations.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Builtin {
    WriteLn,
    ReadLn,
}

impl Builtin {
    pub const ALL: [Builtin; 2] = [Builtin::WriteLn, Builtin::ReadLn];

    pub fn name(&self) -> &'static str {
        match self {
            Builtin::WriteLn => "WRITELN",
            Builtin::ReadLn => "READLN",
        }
    }

    pub fn from_name(name: &str) -> Option<Builtin> {
        Builtin::ALL.into_iter().find(|builtin| builtin.name() == name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Symbol {
    Variable {
        name: String,
        ty: TypeSpec,
    },
    /// A procedure (`result` is `None`) or a function.
    Routine {
        name: String,
        params: Vec<(String, TypeSpec)>,
        result: Option<TypeSpec>,
    },
    Builtin(Builtin),
}

impl Symbol {
    pub fn name(&self) -> &str {
        match self {
            Symbol::Variable { name, .. } => name,
            Symbol::Routine { name, .. } => name,
            Symbol::Builtin(builtin) => builtin.name(),
        }
    }

    pub fn is_callable(&self) -> bool {
        !matches!(self, Symbol::Variable { .. })
    }

    /// Formal parameter types, in declaration order. Builtins take any
    /// number of arguments and declare none.
    pub fn params(&self) -> &[(String, TypeSpec)] {
        match self {
            Symbol::Routine { params, .. } => params,
            _ => &[],
        }
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Symbol::Variable { name, ty } => write!(f, "{}: {}", name, ty),
            Symbol::Routine {
                name,
                params,
                result,
            } => {
                let keyword = if result.is_some() { "FUNCTION" } else { "PROCEDURE" };
                let params = params
                    .iter()
                    .map(|(name, ty)| format!("{}: {}", name, ty))
                    .collect::<Vec<_>>()
                    .join("; ");

                write!(f, "{} {}({})", keyword, name, params)?;
                if let Some(result) = result {
                    write!(f, ": {}", result)?;
                }
                Ok(())
            }
            Symbol::Builtin(builtin) => write!(f, "BUILTIN {}", builtin.name()),
        }
    }
}

/// Symbol table for one lexical block.
#[derive(Debug, Clone)]
pub struct Scope {
    pub name: String,
    pub level: usize,
    pub enclosing: Option<ScopeId>,
    symbols: Vec<Symbol>,
    index: HashMap<String, usize>,
}

impl Scope {
    /// Inserts `symbol`, replacing any symbol of the same name.
    pub fn insert(&mut self, symbol: Symbol) {
        match self.index.get(symbol.name()) {
            Some(&slot) => self.symbols[slot] = symbol,
            None => {
                self.index.insert(symbol.name().to_string(), self.symbols.len());
                self.symbols.push(symbol);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.index.get(name).map(|&slot| &self.symbols[slot])
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }
}

/// Arena owning every scope built for a program.
#[derive(Debug, Clone, Default)]
pub struct ScopeTree {
    scopes: Vec<Scope>,
}

impl ScopeTree {
    pub fn new() -> Self {
        ScopeTree { scopes: vec![] }
    }

    /// Adds a scope nested one level inside `enclosing`.
    pub fn push(&mut self, name: &str, enclosing: Option<ScopeId>) -> ScopeId {
        let level = match enclosing {
            Some(parent) => self.get(parent).level + 1,
            None => 0,
        };

        self.scopes.push(Scope {
            name: name.to_string(),
            level,
            enclosing,
            symbols: vec![],
            index: HashMap::new(),
        });

        ScopeId(self.scopes.len() - 1)
    }

    pub fn get(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.0]
    }

    pub fn get_mut(&mut self, id: ScopeId) -> &mut Scope {
        &mut self.scopes[id.0]
    }

    /// Looks `name` up in scope `id`, then in each enclosing scope in turn
    /// unless `current_scope_only` is set.
    pub fn lookup(&self, id: ScopeId, name: &str, current_scope_only: bool) -> Option<&Symbol> {
        let mut scope = Some(id);

        while let Some(current) = scope {
            let table = self.get(current);
            if let Some(symbol) = table.get(name) {
                return Some(symbol);
            }
            if current_scope_only {
                return None;
            }
            scope = table.enclosing;
        }

        None
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ScopeId, &Scope)> {
        self.scopes
            .iter()
            .enumerate()
            .map(|(index, scope)| (ScopeId(index), scope))
    }
}

impl Display for ScopeTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (_, scope) in self.iter() {
            let enclosing = scope
                .enclosing
                .map(|id| self.get(id).name.as_str())
                .unwrap_or("None");

            writeln!(
                f,
                "SCOPE {} (level {}, enclosing {})",
                scope.name, scope.level, enclosing
            )?;
            for symbol in scope.symbols() {
                writeln!(f, "  {}", symbol)?;
            }
        }

        Ok(())
    }
}
