//! minilang lexer: converts source text into tokens and lexical errors.
//!
//! The lexer never fails as a whole. Problems are collected as [`LexError`]s
//! while scanning continues, and the token stream always ends with `EOF`.
use minilang_syntax::error::LexError;
use minilang_syntax::token::{Token, TokenKind};

/// Output of a lexer run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Lexed {
    /// Tokens in source order, comments included, ending with `EOF`
    pub tokens: Vec<Token>,
    pub errors: Vec<LexError>,
}

impl Lexed {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Tokenize a whole source unit.
pub fn tokenize(source: &str) -> Lexed {
    Lexer::new(source).tokenize()
}

/// Character scanner that produces tokens with positions.
pub struct Lexer {
    src: Vec<char>,
    pos: usize,
    line: usize,
    col: usize,
    errors: Vec<LexError>,
}

impl Lexer {
    /// Create a new lexer over the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            src: input.chars().collect(),
            pos: 0,
            line: 1,
            col: 1,
            errors: Vec::new(),
        }
    }

    fn peek(&self) -> Option<char> {
        self.src.get(self.pos).copied()
    }
    fn peek_next(&self) -> Option<char> {
        self.src.get(self.pos + 1).copied()
    }
    fn advance(&mut self) -> Option<char> {
        let ch = self.src.get(self.pos).copied();
        if let Some(c) = ch {
            self.pos += 1;
            if c == '\n' {
                self.line += 1;
                self.col = 1;
            } else {
                self.col += 1;
            }
        }
        ch
    }

    /// Consume the next character if it is `expected`.
    fn matches(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn text(&self, start: usize) -> String {
        self.src[start..self.pos].iter().collect()
    }

    fn read_ident_or_keyword(&mut self) -> Token {
        let (line, col, start) = (self.line, self.col, self.pos);
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' {
                self.advance();
            } else {
                break;
            }
        }
        let text = self.text(start);
        let kind = TokenKind::keyword(&text).unwrap_or(TokenKind::Identifier);
        Token::new(kind, text, line, col)
    }

    fn consume_digits(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
    }

    fn read_number(&mut self) -> Token {
        let (line, col, start) = (self.line, self.col, self.pos);
        self.consume_digits();
        let kind = if self.matches('.') {
            self.consume_digits();
            TokenKind::RealConst
        } else {
            TokenKind::IntegerConst
        };
        Token::new(kind, self.text(start), line, col)
    }

    /// Strings are positioned at their closing quote.
    fn read_string(&mut self) -> Option<Token> {
        self.advance();
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c == '"' {
                let (line, col) = (self.line, self.col);
                let text = self.text(start);
                self.advance();
                return Some(Token::new(TokenKind::StringConst, text, line, col));
            }
            self.advance();
        }
        self.errors.push(LexError::new(
            self.line,
            self.col,
            "Cadena sin cierre de comillas",
        ));
        None
    }

    fn read_line_comment(&mut self) -> Token {
        let (line, col, start) = (self.line, self.col, self.pos);
        while self.peek().is_some_and(|c| c != '\n') {
            self.advance();
        }
        Token::new(TokenKind::CommentSingle, self.text(start), line, col)
    }

    fn read_block_comment(&mut self) -> Option<Token> {
        let (line, col, start) = (self.line, self.col, self.pos);
        self.advance();
        self.advance();
        while self.peek().is_some() {
            if self.peek() == Some('*') && self.peek_next() == Some('/') {
                self.advance();
                self.advance();
                return Some(Token::new(TokenKind::CommentMulti, self.text(start), line, col));
            }
            self.advance();
        }
        self.errors
            .push(LexError::new(line, col, "Comentario multilínea sin cierre"));
        None
    }

    /// `op` alone, or `op_eq` when followed by `=`.
    fn with_eq(&mut self, op_eq: TokenKind, op: TokenKind) -> TokenKind {
        if self.matches('=') {
            op_eq
        } else {
            op
        }
    }

    fn read_symbol(&mut self) -> Token {
        let (line, col, start) = (self.line, self.col, self.pos);
        let kind = match self.advance() {
            Some('+') => self.with_eq(TokenKind::PlusAssign, TokenKind::Plus),
            Some('-') => self.with_eq(TokenKind::MinusAssign, TokenKind::Minus),
            Some('*') => self.with_eq(TokenKind::MultAssign, TokenKind::Multiply),
            Some('/') => self.with_eq(TokenKind::DivAssign, TokenKind::Divide),
            Some('>') => self.with_eq(TokenKind::GreaterEqual, TokenKind::Greater),
            Some('<') => self.with_eq(TokenKind::LessEqual, TokenKind::Less),
            Some('=') => self.with_eq(TokenKind::Equal, TokenKind::Assign),
            Some('!') => self.with_eq(TokenKind::NotEqual, TokenKind::Not),
            Some('&') if self.peek() == Some('&') => {
                self.advance();
                TokenKind::And
            }
            Some('|') if self.peek() == Some('|') => {
                self.advance();
                TokenKind::Or
            }
            Some('(') => TokenKind::LParen,
            Some(')') => TokenKind::RParen,
            Some('{') => TokenKind::LBrace,
            Some('}') => TokenKind::RBrace,
            Some(';') => TokenKind::Semicolon,
            Some(',') => TokenKind::Comma,
            _ => TokenKind::Unknown,
        };
        Token::new(kind, self.text(start), line, col)
    }

    /// Tokenize the entire input into a token stream ending with `EOF`.
    pub fn tokenize(mut self) -> Lexed {
        let mut tokens = Vec::new();
        while let Some(c) = self.peek() {
            let token = if c.is_whitespace() {
                self.advance();
                None
            } else if c.is_alphabetic() || c == '_' {
                Some(self.read_ident_or_keyword())
            } else if c.is_ascii_digit() {
                Some(self.read_number())
            } else if c == '"' {
                self.read_string()
            } else if c == '/' && self.peek_next() == Some('/') {
                Some(self.read_line_comment())
            } else if c == '/' && self.peek_next() == Some('*') {
                self.read_block_comment()
            } else {
                Some(self.read_symbol())
            };
            tokens.extend(token);
        }
        tokens.push(Token::eof(self.line, self.col));
        Lexed {
            tokens,
            errors: self.errors,
        }
    }
}
