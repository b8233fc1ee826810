//! Diagnostic types for the three analysis phases.
//!
//! Every phase collects its diagnostics in an ordered list instead of
//! stopping at the first problem, so these are plain values rather than
//! control flow. Each type still implements [`std::error::Error`] so callers
//! can box or propagate them.
//!
//! | Phase    | Type              | Rendering                                                        |
//! |----------|-------------------|------------------------------------------------------------------|
//! | lexical  | [`LexError`]      | `Error léxico [línea L, columna C]: <message>`                   |
//! | syntax   | [`SyntaxError`]   | `Error sintáctico [línea L, col C]: <message> (token: '<lexeme>')` |
//! | semantic | [`SemanticError`] | `Semantic Error (line L): <message>`                             |
//!
//! # Examples
//!
//! ```rust
//! use minilang_syntax::error::LexError;
//!
//! let err = LexError::new(3, 7, "Cadena sin cierre de comillas");
//! assert_eq!(
//!     err.to_string(),
//!     "Error léxico [línea 3, columna 7]: Cadena sin cierre de comillas"
//! );
//! ```

use thiserror::Error;

use crate::ast::Type;

/// A problem found while scanning characters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Error léxico [línea {line}, columna {col}]: {message}")]
pub struct LexError {
    /// 1-based line number
    pub line: usize,
    /// 1-based column number
    pub col: usize,
    pub message: String,
}

impl LexError {
    pub fn new(line: usize, col: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            col,
            message: message.into(),
        }
    }
}

/// A grammar violation, located at the token where it was detected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Error sintáctico [línea {line}, col {col}]: {message} (token: '{lexeme}')")]
pub struct SyntaxError {
    pub line: usize,
    pub col: usize,
    /// What the parser expected at this point
    pub message: String,
    /// Lexeme of the offending token (empty at end of input)
    pub lexeme: String,
}

impl SyntaxError {
    pub fn new(
        line: usize,
        col: usize,
        message: impl Into<String>,
        lexeme: impl Into<String>,
    ) -> Self {
        Self {
            line,
            col,
            message: message.into(),
            lexeme: lexeme.into(),
        }
    }
}

/// The rule a semantic error violates. Its display text is the message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SemanticErrorKind {
    #[error("Variable '{name}' redeclarada.")]
    Redeclared { name: String },

    /// Assignment to a name that was never declared.
    #[error("Variable '{name}' no declarada.")]
    Undeclared { name: String },

    #[error("Variable '{name}' no declarada antes del read.")]
    UndeclaredRead { name: String },

    #[error("Variable '{name}' usada sin declarar.")]
    UsedUndeclared { name: String },

    #[error("Asignación incompatible: {target} = {value}")]
    IncompatibleAssignment { target: Type, value: Type },

    #[error("Operación incompatible: {left} {operator} {right}")]
    IncompatibleOperation {
        operator: String,
        left: Type,
        right: Type,
    },
}

/// A violation of a declaration, usage or type rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Semantic Error (line {line}): {kind}")]
pub struct SemanticError {
    pub line: usize,
    pub kind: SemanticErrorKind,
}

impl SemanticError {
    pub fn new(line: usize, kind: SemanticErrorKind) -> Self {
        Self { line, kind }
    }

    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}
