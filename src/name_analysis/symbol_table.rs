use std::collections::HashMap;

use crate::{
    errors::errors::{Error, ErrorImpl},
    type_checker::data_types::TypeId,
    Span,
};

/// Handle to a [`Symbol`] in a [`SymbolTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SymbolId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Var,
    Fn,
}

/// A declared name together with its declared type.
#[derive(Debug, Clone)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
    pub ty: TypeId,
    pub span: Span,
}

/// One lexical scope: the names declared directly in it.
#[derive(Debug, Default)]
pub struct Scope {
    pub variable_lookup: HashMap<String, SymbolId>,
}

impl Scope {
    pub fn new() -> Self {
        Scope {
            variable_lookup: HashMap::new(),
        }
    }

    pub fn get_variable(&self, variable_name: &str) -> Option<SymbolId> {
        self.variable_lookup.get(variable_name).copied()
    }
}

/// Every symbol declared in a program, plus the chain of scopes that is
/// live while name analysis walks it.
///
/// Symbols outlive their scopes: once a scope is exited its names can no
/// longer be looked up, but identifiers that resolved to them keep valid
/// [`SymbolId`]s.
#[derive(Debug, Default)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
    scopes: Vec<Scope>,
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable {
            symbols: vec![],
            scopes: vec![Scope::new()],
        }
    }

    pub fn enter_scope(&mut self) {
        self.scopes.push(Scope::new());
    }

    pub fn exit_scope(&mut self) {
        // The global scope is never popped.
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Declares `symbol` in the innermost scope.
    ///
    /// Fails if the innermost scope already declares the same name. Shadowing
    /// a name from an enclosing scope is allowed.
    pub fn declare(&mut self, symbol: Symbol) -> Result<SymbolId, Error> {
        let id = SymbolId(self.symbols.len() as u32);
        let scope = self
            .scopes
            .last_mut()
            .ok_or_else(|| redeclared(&symbol))?;

        if scope.variable_lookup.contains_key(&symbol.name) {
            return Err(redeclared(&symbol));
        }

        scope.variable_lookup.insert(symbol.name.clone(), id);
        self.symbols.push(symbol);
        Ok(id)
    }

    /// Resolves `name` from the innermost scope outwards.
    pub fn lookup(&self, name: &str) -> Option<SymbolId> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get_variable(name))
    }

    pub fn get(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SymbolId, &Symbol)> {
        self.symbols
            .iter()
            .enumerate()
            .map(|(index, symbol)| (SymbolId(index as u32), symbol))
    }
}

fn redeclared(symbol: &Symbol) -> Error {
    Error::new(
        ErrorImpl::VariableAlreadyDeclared {
            variable: symbol.name.clone(),
        },
        symbol.span.start.clone(),
    )
}
