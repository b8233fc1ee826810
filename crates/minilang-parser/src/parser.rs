//! Recursive-descent parser with panic-mode error recovery.
//!
//! Grammar rules return [`PResult`]. A failed rule records a [`SyntaxError`]
//! and returns `Err(ParseError)`, which `?` carries up to the nearest
//! declaration loop (top level or block). There the parser synchronizes to
//! the next statement boundary and keeps going, so one run reports every
//! independent error.

use minilang_syntax::ast::{Expr, LiteralValue, Stmt};
use minilang_syntax::error::SyntaxError;
use minilang_syntax::token::{Token, TokenKind};

/// Marker for a failed grammar rule. The diagnostic is already recorded in
/// the parser's error list when this is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseError;

pub type PResult<T> = Result<T, ParseError>;

/// Output of a parser run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Parsed {
    pub statements: Vec<Stmt>,
    pub errors: Vec<SyntaxError>,
}

impl Parsed {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

const ASSIGNMENT_OPS: [TokenKind; 5] = [
    TokenKind::Assign,
    TokenKind::PlusAssign,
    TokenKind::MinusAssign,
    TokenKind::MultAssign,
    TokenKind::DivAssign,
];

/// Tokens that start a declaration or statement; recovery stops in front of them.
const SYNC_KINDS: [TokenKind; 6] = [
    TokenKind::Long,
    TokenKind::Double,
    TokenKind::If,
    TokenKind::While,
    TokenKind::Read,
    TokenKind::Write,
];

pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
    errors: Vec<SyntaxError>,
}

impl Parser {
    /// Comment tokens are dropped here, and an `EOF` is appended if the
    /// stream does not already end with one.
    pub fn new(tokens: Vec<Token>) -> Self {
        let mut tokens: Vec<Token> = tokens
            .into_iter()
            .filter(|t| !t.kind.is_comment())
            .collect();
        if tokens.last().map(|t| t.kind) != Some(TokenKind::Eof) {
            let (line, col) = tokens.last().map_or((1, 1), |t| (t.line, t.col));
            tokens.push(Token::eof(line, col));
        }
        Self {
            tokens,
            current: 0,
            errors: Vec::new(),
        }
    }

    pub fn errors(&self) -> &[SyntaxError] {
        &self.errors
    }

    /// Parse the whole token stream. Always returns; syntax errors are in
    /// [`Parsed::errors`].
    pub fn parse(mut self) -> Parsed {
        let mut statements = Vec::new();
        while !self.is_at_end() {
            match self.declaration() {
                Ok(stmt) => statements.push(stmt),
                Err(ParseError) => self.synchronize(),
            }
        }
        Parsed {
            statements,
            errors: self.errors,
        }
    }

    /// Parse a single expression starting at the current token.
    pub fn parse_expr(&mut self) -> PResult<Expr> {
        self.expression()
    }

    // ---------- Declarations ----------

    fn declaration(&mut self) -> PResult<Stmt> {
        if self.match_any(&[TokenKind::Long, TokenKind::Double]) {
            let ty = self.previous().clone();
            return self.var_declaration(ty);
        }
        self.statement()
    }

    fn var_declaration(&mut self, ty: Token) -> PResult<Stmt> {
        let name = self.consume(
            TokenKind::Identifier,
            "Se esperaba un identificador en la declaración.",
        )?;
        let mut vars = vec![Stmt::VarDecl {
            ty: ty.clone(),
            name,
        }];
        while self.match_any(&[TokenKind::Comma]) {
            let name = self.consume(
                TokenKind::Identifier,
                "Se esperaba un identificador después de ','.",
            )?;
            vars.push(Stmt::VarDecl {
                ty: ty.clone(),
                name,
            });
        }
        self.consume(
            TokenKind::Semicolon,
            "Se esperaba ';' al final de la declaración de variables.",
        )?;
        // `long a, b;` is flattened into a block of single declarations.
        if vars.len() == 1 {
            Ok(vars.swap_remove(0))
        } else {
            Ok(Stmt::Block(vars))
        }
    }

    // ---------- Statements ----------

    fn statement(&mut self) -> PResult<Stmt> {
        if self.match_any(&[TokenKind::Read]) {
            return self.read_statement();
        }
        if self.match_any(&[TokenKind::Write]) {
            return self.write_statement();
        }
        if self.match_any(&[TokenKind::If]) {
            return self.if_statement();
        }
        if self.match_any(&[TokenKind::While]) {
            return self.while_statement();
        }
        if self.match_any(&[TokenKind::LBrace]) {
            return Ok(Stmt::Block(self.block()?));
        }
        if self.check(TokenKind::Identifier) && self.peek_next().kind.is_assignment() {
            return self.assign_statement();
        }
        self.expression_statement()
    }

    fn expression_statement(&mut self) -> PResult<Stmt> {
        let expr = self.expression()?;
        self.consume(
            TokenKind::Semicolon,
            "Se esperaba ';' después de la expresión.",
        )?;
        Ok(Stmt::Expression(expr))
    }

    fn assign_statement(&mut self) -> PResult<Stmt> {
        let name = self.consume(
            TokenKind::Identifier,
            "Se esperaba identificador en la asignación.",
        )?;
        if !self.match_any(&ASSIGNMENT_OPS) {
            return Err(
                self.error("Se esperaba un operador de asignación después del identificador.")
            );
        }
        let operator = self.previous().clone();
        let value = self.expression()?;
        self.consume(
            TokenKind::Semicolon,
            "Se esperaba ';' después de la asignación.",
        )?;
        Ok(Stmt::Assign {
            name,
            operator,
            value,
        })
    }

    fn read_statement(&mut self) -> PResult<Stmt> {
        self.consume(TokenKind::LParen, "Se esperaba '(' después de read.")?;
        let name = self.consume(
            TokenKind::Identifier,
            "Se esperaba un identificador dentro de read().",
        )?;
        self.consume(
            TokenKind::RParen,
            "Se esperaba ')' después de read(identifier).",
        )?;
        self.consume(TokenKind::Semicolon, "Se esperaba ';' después de read(...).")?;
        Ok(Stmt::Read(name))
    }

    fn write_statement(&mut self) -> PResult<Stmt> {
        self.consume(TokenKind::LParen, "Se esperaba '(' después de write.")?;
        let expr = self.expression()?;
        self.consume(
            TokenKind::RParen,
            "Se esperaba ')' después de write(expression).",
        )?;
        self.consume(
            TokenKind::Semicolon,
            "Se esperaba ';' después de write(...).",
        )?;
        Ok(Stmt::Write(expr))
    }

    fn if_statement(&mut self) -> PResult<Stmt> {
        self.consume(TokenKind::LParen, "Se esperaba '(' después de if.")?;
        let condition = self.expression()?;
        self.consume(
            TokenKind::RParen,
            "Se esperaba ')' después de la condición del if.",
        )?;
        self.consume(TokenKind::Then, "Se esperaba 'then' después de if(...).")?;
        let then_branch = Box::new(self.statement()?);
        let else_branch = if self.match_any(&[TokenKind::Else]) {
            Some(Box::new(self.statement()?))
        } else {
            None
        };
        Ok(Stmt::If {
            condition,
            then_branch,
            else_branch,
        })
    }

    fn while_statement(&mut self) -> PResult<Stmt> {
        self.consume(TokenKind::LParen, "Se esperaba '(' después de while.")?;
        let condition = self.expression()?;
        self.consume(
            TokenKind::RParen,
            "Se esperaba ')' después de la condición del while.",
        )?;
        let body = Box::new(self.statement()?);
        Ok(Stmt::While { condition, body })
    }

    /// Declarations up to the closing `}`; the opening brace is already consumed.
    fn block(&mut self) -> PResult<Vec<Stmt>> {
        let mut statements = Vec::new();
        while !self.check(TokenKind::RBrace) && !self.is_at_end() {
            match self.declaration() {
                Ok(stmt) => statements.push(stmt),
                Err(ParseError) => self.synchronize(),
            }
        }
        self.consume(TokenKind::RBrace, "Se esperaba '}' al final del bloque.")?;
        Ok(statements)
    }

    // ---------- Expressions ----------

    fn expression(&mut self) -> PResult<Expr> {
        self.logical_or()
    }

    /// One left-associative binary level: `next (op next)*`.
    fn binary_level(
        &mut self,
        ops: &[TokenKind],
        next: fn(&mut Self) -> PResult<Expr>,
    ) -> PResult<Expr> {
        let mut expr = next(self)?;
        while self.match_any(ops) {
            let operator = self.previous().clone();
            let right = next(self)?;
            expr = Expr::binary(expr, operator, right);
        }
        Ok(expr)
    }

    fn logical_or(&mut self) -> PResult<Expr> {
        self.binary_level(&[TokenKind::Or], Self::logical_and)
    }

    fn logical_and(&mut self) -> PResult<Expr> {
        self.binary_level(&[TokenKind::And], Self::equality)
    }

    fn equality(&mut self) -> PResult<Expr> {
        self.binary_level(&[TokenKind::Equal, TokenKind::NotEqual], Self::relational)
    }

    fn relational(&mut self) -> PResult<Expr> {
        self.binary_level(
            &[
                TokenKind::Greater,
                TokenKind::GreaterEqual,
                TokenKind::Less,
                TokenKind::LessEqual,
            ],
            Self::additive,
        )
    }

    fn additive(&mut self) -> PResult<Expr> {
        self.binary_level(&[TokenKind::Plus, TokenKind::Minus], Self::multiplicative)
    }

    fn multiplicative(&mut self) -> PResult<Expr> {
        self.binary_level(&[TokenKind::Multiply, TokenKind::Divide], Self::unary)
    }

    fn unary(&mut self) -> PResult<Expr> {
        if self.match_any(&[TokenKind::Not, TokenKind::Minus]) {
            let operator = self.previous().clone();
            let operand = self.unary()?;
            return Ok(Expr::unary(operator, operand));
        }
        self.primary()
    }

    fn primary(&mut self) -> PResult<Expr> {
        let token = self.peek().clone();
        let literal = match token.kind {
            TokenKind::IntegerConst => match token.lexeme.parse::<i64>() {
                Ok(n) => LiteralValue::Integer(n),
                Err(_) => {
                    self.advance();
                    return Err(self.error_at(&token, "Constante entera fuera de rango."));
                }
            },
            TokenKind::RealConst => match token.lexeme.parse::<f64>() {
                Ok(x) => LiteralValue::Real(x),
                Err(_) => {
                    self.advance();
                    return Err(self.error_at(&token, "Constante real inválida."));
                }
            },
            TokenKind::StringConst => LiteralValue::Str(token.lexeme.clone()),
            TokenKind::BooleanConst => LiteralValue::Boolean(token.lexeme == "true"),
            TokenKind::Identifier => {
                self.advance();
                return Ok(Expr::Variable(token));
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.expression()?;
                self.consume(
                    TokenKind::RParen,
                    "Se esperaba ')' después de la expresión.",
                )?;
                return Ok(Expr::grouping(inner));
            }
            _ => return Err(self.error("Se esperaba una expresión.")),
        };
        self.advance();
        Ok(Expr::Literal(literal))
    }

    // ---------- Helpers ----------

    fn match_any(&mut self, kinds: &[TokenKind]) -> bool {
        if kinds.iter().any(|&k| self.check(k)) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn consume(&mut self, kind: TokenKind, message: &str) -> PResult<Token> {
        if self.check(kind) {
            Ok(self.advance().clone())
        } else {
            Err(self.error(message))
        }
    }

    /// Record an error at the current token.
    fn error(&mut self, message: &str) -> ParseError {
        let token = self.peek().clone();
        self.error_at(&token, message)
    }

    fn error_at(&mut self, token: &Token, message: &str) -> ParseError {
        self.errors.push(SyntaxError::new(
            token.line,
            token.col,
            message,
            token.lexeme.clone(),
        ));
        ParseError
    }

    /// Skip one token, then discard until just past a `;` or just before a
    /// token that starts a new declaration or statement.
    fn synchronize(&mut self) {
        self.advance();
        while !self.is_at_end() {
            if self.previous().kind == TokenKind::Semicolon {
                return;
            }
            if SYNC_KINDS.contains(&self.peek().kind) {
                return;
            }
            self.advance();
        }
    }

    fn check(&self, kind: TokenKind) -> bool {
        !self.is_at_end() && self.peek().kind == kind
    }

    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous()
    }

    fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    fn peek_next(&self) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.current + 1).min(last)]
    }

    fn previous(&self) -> &Token {
        &self.tokens[self.current.saturating_sub(1)]
    }
}
