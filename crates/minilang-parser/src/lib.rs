//! minilang parser: turns a token stream into statements and syntax errors.
pub mod parser;

pub use parser::{PResult, ParseError, Parsed, Parser};

use minilang_syntax::token::Token;

/// Parse a token stream produced by the lexer.
pub fn parse(tokens: Vec<Token>) -> Parsed {
    Parser::new(tokens).parse()
}
