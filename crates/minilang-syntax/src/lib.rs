//! Shared syntax definitions for the minilang front end: tokens, the AST
//! and the diagnostics each analysis phase produces.

pub mod ast;
pub mod error;
pub mod token;

pub use ast::*;
pub use error::*;
pub use token::*;
