//! Symbols and the flat symbol table.

use std::fmt;

use indexmap::IndexMap;
use minilang_syntax::ast::{LiteralValue, Type};

/// Label of the only scope minilang has.
pub const GLOBAL_SCOPE: &str = "global";

/// A declared variable.
#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    pub name: String,
    pub ty: Type,
    pub scope: String,
    /// Runtime value; never set during analysis, reserved for an evaluator
    pub value: Option<LiteralValue>,
    /// Line of the declaration
    pub line: usize,
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match &self.value {
            Some(v) => v.to_string(),
            None => "null".to_string(),
        };
        write!(
            f,
            "{:<10} {:<10} {:<10} {:<10} {}",
            self.name, self.ty, self.scope, value, self.line
        )
    }
}

/// Name → symbol mapping. Iteration follows declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SymbolTable {
    symbols: IndexMap<String, Symbol>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new symbol. Returns `false` and leaves the table untouched
    /// when the name is already declared.
    pub fn declare(
        &mut self,
        name: &str,
        ty: Type,
        scope: &str,
        value: Option<LiteralValue>,
        line: usize,
    ) -> bool {
        if self.symbols.contains_key(name) {
            return false;
        }
        self.symbols.insert(
            name.to_string(),
            Symbol {
                name: name.to_string(),
                ty,
                scope: scope.to_string(),
                value,
                line,
            },
        );
        true
    }

    pub fn is_declared(&self, name: &str) -> bool {
        self.symbols.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name)
    }

    /// Declared type of `name`, if any.
    pub fn type_of(&self, name: &str) -> Option<Type> {
        self.symbols.get(name).map(|s| s.ty)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.values()
    }
}

impl fmt::Display for SymbolTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<10} {:<10} {:<10} {:<10} {}",
            "Nombre", "Tipo", "Ámbito", "Valor", "Línea"
        )?;
        for symbol in self.iter() {
            writeln!(f, "{}", symbol)?;
        }
        Ok(())
    }
}
