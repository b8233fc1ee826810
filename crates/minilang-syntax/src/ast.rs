//! AST (abstract syntax tree) types for the minilang language.
//!
//! Nodes keep the tokens they were built from (operators, names, type
//! keywords) so later phases can report source positions. The `Display`
//! implementations give a structural, deterministic serialization of a tree,
//! e.g. `Assign(x = (a + 1))`.

use std::fmt;
use std::mem;

use crate::token::{Token, TokenKind};

/// The two declarable types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    Long,
    Double,
}

impl Type {
    /// Maps a type keyword token kind to its type.
    pub fn from_keyword(kind: TokenKind) -> Option<Type> {
        match kind {
            TokenKind::Long => Some(Type::Long),
            TokenKind::Double => Some(Type::Double),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Type::Long => "long",
            Type::Double => "double",
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Value carried by a literal, decoded by the parser.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    Integer(i64),
    Real(f64),
    Str(String),
    Boolean(bool),
    /// Absent value
    Nil,
}

impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralValue::Integer(n) => write!(f, "{}", n),
            // Debug keeps the decimal point on whole reals (`2.0`, not `2`).
            LiteralValue::Real(x) => write!(f, "{:?}", x),
            LiteralValue::Str(s) => write!(f, "{}", s),
            LiteralValue::Boolean(b) => write!(f, "{}", b),
            LiteralValue::Nil => write!(f, "null"),
        }
    }
}

/// Expressions.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Binary {
        left: Box<Expr>,
        operator: Token,
        right: Box<Expr>,
    },
    Unary {
        operator: Token,
        operand: Box<Expr>,
    },
    Literal(LiteralValue),
    Variable(Token),
    Grouping(Box<Expr>),
}

impl Expr {
    pub fn binary(left: Expr, operator: Token, right: Expr) -> Self {
        Expr::Binary {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }
    }

    pub fn unary(operator: Token, operand: Expr) -> Self {
        Expr::Unary {
            operator,
            operand: Box::new(operand),
        }
    }

    pub fn grouping(inner: Expr) -> Self {
        Expr::Grouping(Box::new(inner))
    }

    /// Split a left-associative chain `((a op1 b) op2 c)` into its leftmost
    /// operand `a` and the `(op, right)` pairs in evaluation order. A
    /// non-binary expression is its own leftmost operand with no pairs.
    pub fn left_spine(&self) -> (&Expr, Vec<(&Token, &Expr)>) {
        let mut pairs = Vec::new();
        let mut leftmost = self;
        while let Expr::Binary {
            left,
            operator,
            right,
        } = leftmost
        {
            pairs.push((operator, right.as_ref()));
            leftmost = left.as_ref();
        }
        pairs.reverse();
        (leftmost, pairs)
    }

    /// Move the non-leaf children of this node onto `out`, leaving `null`
    /// literals in their place.
    fn detach_children(&mut self, out: &mut Vec<Expr>) {
        fn detach(slot: &mut Expr, out: &mut Vec<Expr>) {
            if !matches!(slot, Expr::Literal(_) | Expr::Variable(_)) {
                out.push(mem::replace(slot, Expr::Literal(LiteralValue::Nil)));
            }
        }
        match self {
            Expr::Binary { left, right, .. } => {
                detach(left, out);
                detach(right, out);
            }
            Expr::Unary { operand, .. } | Expr::Grouping(operand) => detach(operand, out),
            Expr::Literal(_) | Expr::Variable(_) => {}
        }
    }
}

/// Tears subtrees down from a worklist. Operator chains nest as deep as they
/// are long.
impl Drop for Expr {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.detach_children(&mut pending);
        while let Some(mut expr) = pending.pop() {
            expr.detach_children(&mut pending);
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Binary { .. } => {
                let (leftmost, pairs) = self.left_spine();
                for _ in 0..pairs.len() {
                    f.write_str("(")?;
                }
                write!(f, "{}", leftmost)?;
                for (operator, right) in pairs {
                    write!(f, " {} {})", operator.lexeme, right)?;
                }
                Ok(())
            }
            Expr::Unary { operator, operand } => write!(f, "({}{})", operator.lexeme, operand),
            Expr::Literal(value) => write!(f, "{}", value),
            Expr::Variable(name) => write!(f, "{}", name.lexeme),
            Expr::Grouping(inner) => write!(f, "(group {})", inner),
        }
    }
}

/// Statements.
///
/// A declaration of several names (`long a, b;`) is represented as a
/// [`Stmt::Block`] of one [`Stmt::VarDecl`] per name.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    VarDecl {
        /// The `long` / `double` keyword token
        ty: Token,
        name: Token,
    },
    Expression(Expr),
    Assign {
        name: Token,
        /// `=`, `+=`, `-=`, `*=` or `/=`
        operator: Token,
        value: Expr,
    },
    Read(Token),
    Write(Expr),
    Block(Vec<Stmt>),
    If {
        condition: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },
    While {
        condition: Expr,
        body: Box<Stmt>,
    },
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stmt::VarDecl { ty, name } => write!(f, "VarDecl({} {})", ty.lexeme, name.lexeme),
            Stmt::Expression(expr) => write!(f, "ExprStmt({})", expr),
            Stmt::Assign {
                name,
                operator,
                value,
            } => write!(f, "Assign({} {} {})", name.lexeme, operator.lexeme, value),
            Stmt::Read(name) => write!(f, "Read({})", name.lexeme),
            Stmt::Write(expr) => write!(f, "Write({})", expr),
            Stmt::Block(stmts) => {
                write!(f, "Block([")?;
                for (i, s) in stmts.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", s)?;
                }
                write!(f, "])")
            }
            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                write!(f, "If({}, {}", condition, then_branch)?;
                if let Some(e) = else_branch {
                    write!(f, ", {}", e)?;
                }
                write!(f, ")")
            }
            Stmt::While { condition, body } => write!(f, "While({}, {})", condition, body),
        }
    }
}
