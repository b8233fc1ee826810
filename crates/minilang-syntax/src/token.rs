//! Token definitions for the minilang language.
//!
//! Tokens are the smallest meaningful units of minilang source code. Unlike
//! the AST, a token never interprets its text: the exact source substring is
//! kept in [`Token::lexeme`] and the closed category in [`Token::kind`].
//!
//! # Token Categories
//!
//! - **Reserved words**: `long`, `double`, `if`, `then`, `else`, `while`,
//!   `break`, `read`, `write`
//! - **Operators**: arithmetic (`+ - * /`), relational (`> < >= <= == !=`),
//!   logical (`&& || !`) and assignment (`= += -= *= /=`)
//! - **Punctuation**: `( ) { } ; ,`
//! - **Literals**: integers (`42`), reals (`3.5`), strings (`"hola"`) and
//!   booleans (`true`, `false`)
//! - **Comments**: `// ...` and `/* ... */` are kept in the stream
//! - **Special**: end-of-input and unknown characters
//!
//! # Examples
//!
//! ```rust
//! use minilang_syntax::{Token, TokenKind};
//!
//! let number = Token::new(TokenKind::IntegerConst, "12", 1, 1);
//! assert_eq!(number.to_string(), "[INTEGER_CONST] '12' (línea 1, columna 1)");
//! ```

use std::fmt;

/// Closed set of token categories produced by the minilang lexer.
///
/// Each variant displays as its upper-snake-case name (`INTEGER_CONST`,
/// `PLUS_ASSIGN`, ...), which is also the name used in token dumps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // === Reserved words ===
    /// `long`: 64-bit integer type
    Long,
    /// `double`: floating point type
    Double,
    If,
    Then,
    Else,
    While,
    /// `break` is reserved but no statement uses it yet
    Break,
    Read,
    Write,

    // === Arithmetic ===
    Plus,
    Minus,
    Multiply,
    Divide,

    // === Relational and logical ===
    Greater,
    Less,
    GreaterEqual,
    LessEqual,
    /// Equality comparison `==`
    Equal,
    NotEqual,
    /// `&&`
    And,
    /// `||`
    Or,
    /// Prefix negation `!`
    Not,

    // === Assignment ===
    /// Plain assignment `=`
    Assign,
    PlusAssign,
    MinusAssign,
    MultAssign,
    DivAssign,

    // === Punctuation ===
    LParen,
    RParen,
    LBrace,
    RBrace,
    Semicolon,
    Comma,

    // === Identifiers and literals ===
    Identifier,
    IntegerConst,
    RealConst,
    /// String literal; the lexeme holds the text between the quotes
    StringConst,
    BooleanConst,

    // === Comments ===
    CommentSingle,
    CommentMulti,

    /// End-of-input marker, always the last token of a stream
    Eof,
    /// Any character the lexer does not recognize
    Unknown,
}

impl TokenKind {
    /// The upper-snake-case name of this kind.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Long => "LONG",
            TokenKind::Double => "DOUBLE",
            TokenKind::If => "IF",
            TokenKind::Then => "THEN",
            TokenKind::Else => "ELSE",
            TokenKind::While => "WHILE",
            TokenKind::Break => "BREAK",
            TokenKind::Read => "READ",
            TokenKind::Write => "WRITE",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Multiply => "MULTIPLY",
            TokenKind::Divide => "DIVIDE",
            TokenKind::Greater => "GREATER",
            TokenKind::Less => "LESS",
            TokenKind::GreaterEqual => "GREATER_EQUAL",
            TokenKind::LessEqual => "LESS_EQUAL",
            TokenKind::Equal => "EQUAL",
            TokenKind::NotEqual => "NOT_EQUAL",
            TokenKind::And => "AND",
            TokenKind::Or => "OR",
            TokenKind::Not => "NOT",
            TokenKind::Assign => "ASSIGN",
            TokenKind::PlusAssign => "PLUS_ASSIGN",
            TokenKind::MinusAssign => "MINUS_ASSIGN",
            TokenKind::MultAssign => "MULT_ASSIGN",
            TokenKind::DivAssign => "DIV_ASSIGN",
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::LBrace => "LBRACE",
            TokenKind::RBrace => "RBRACE",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::Comma => "COMMA",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::IntegerConst => "INTEGER_CONST",
            TokenKind::RealConst => "REAL_CONST",
            TokenKind::StringConst => "STRING_CONST",
            TokenKind::BooleanConst => "BOOLEAN_CONST",
            TokenKind::CommentSingle => "COMMENT_SINGLE",
            TokenKind::CommentMulti => "COMMENT_MULTI",
            TokenKind::Eof => "EOF",
            TokenKind::Unknown => "UNKNOWN",
        }
    }

    /// Looks up a word in the reserved-word table.
    ///
    /// `true` and `false` are boolean literals rather than keywords, but they
    /// live in the same table.
    pub fn keyword(word: &str) -> Option<TokenKind> {
        let kind = match word {
            "long" => TokenKind::Long,
            "double" => TokenKind::Double,
            "if" => TokenKind::If,
            "then" => TokenKind::Then,
            "else" => TokenKind::Else,
            "while" => TokenKind::While,
            "break" => TokenKind::Break,
            "read" => TokenKind::Read,
            "write" => TokenKind::Write,
            "true" | "false" => TokenKind::BooleanConst,
            _ => return None,
        };
        Some(kind)
    }

    /// True for `=` and the compound assignment operators.
    pub fn is_assignment(self) -> bool {
        matches!(
            self,
            TokenKind::Assign
                | TokenKind::PlusAssign
                | TokenKind::MinusAssign
                | TokenKind::MultAssign
                | TokenKind::DivAssign
        )
    }

    pub fn is_comment(self) -> bool {
        matches!(self, TokenKind::CommentSingle | TokenKind::CommentMulti)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A token with its source text and location.
///
/// # Fields
///
/// - `kind`: closed category of the token
/// - `lexeme`: exact source text (for strings, the text between the quotes)
/// - `line`: 1-based line number
/// - `col`: 1-based column number
///
/// # Usage in Error Reporting
///
/// The position is what syntax errors report:
///
/// ```text
/// Error sintáctico [línea 1, col 12]: Se esperaba una expresión. (token: ';')
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The category of this token
    pub kind: TokenKind,

    /// The source substring this token was read from
    pub lexeme: String,

    /// Line number in the source file (1-based)
    pub line: usize,

    /// Column number in the source file (1-based)
    pub col: usize,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: usize, col: usize) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            line,
            col,
        }
    }

    /// The end-of-input token at the given position.
    pub fn eof(line: usize, col: usize) -> Self {
        Self::new(TokenKind::Eof, "", line, col)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] '{}' (línea {}, columna {})",
            self.kind, self.lexeme, self.line, self.col
        )
    }
}
