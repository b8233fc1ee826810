//! Single-pass semantic checker.
//!
//! Walks the statements in order, declaring variables into one global
//! [`SymbolTable`] and checking uses and types against it. Expressions infer
//! an `Option<Type>`; `None` means the type is unknown and suppresses any
//! comparison involving it.

use minilang_syntax::ast::{Expr, LiteralValue, Stmt, Type};
use minilang_syntax::error::{SemanticError, SemanticErrorKind};

use crate::symbol::{SymbolTable, GLOBAL_SCOPE};

/// Output of a semantic analysis run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Analysis {
    pub symbols: SymbolTable,
    pub errors: Vec<SemanticError>,
}

impl Analysis {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct SemanticAnalyzer {
    symbols: SymbolTable,
    errors: Vec<SemanticError>,
}

impl SemanticAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn analyze(&mut self, statements: &[Stmt]) {
        for stmt in statements {
            self.check_stmt(stmt);
        }
    }

    pub fn errors(&self) -> &[SemanticError] {
        &self.errors
    }

    pub fn symbol_table(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn into_parts(self) -> Analysis {
        Analysis {
            symbols: self.symbols,
            errors: self.errors,
        }
    }

    fn report(&mut self, line: usize, kind: SemanticErrorKind) {
        self.errors.push(SemanticError::new(line, kind));
    }

    fn check_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::VarDecl { ty, name } => {
                // The parser only builds declarations from type keywords.
                let Some(declared) = Type::from_keyword(ty.kind) else {
                    return;
                };
                if !self
                    .symbols
                    .declare(&name.lexeme, declared, GLOBAL_SCOPE, None, name.line)
                {
                    self.report(
                        name.line,
                        SemanticErrorKind::Redeclared {
                            name: name.lexeme.clone(),
                        },
                    );
                }
            }
            Stmt::Assign { name, value, .. } => {
                let target = self.symbols.type_of(&name.lexeme);
                if target.is_none() {
                    self.report(
                        name.line,
                        SemanticErrorKind::Undeclared {
                            name: name.lexeme.clone(),
                        },
                    );
                }
                let value_ty = self.infer_expr(value);
                if let (Some(target), Some(value_ty)) = (target, value_ty) {
                    if target != value_ty {
                        self.report(
                            name.line,
                            SemanticErrorKind::IncompatibleAssignment {
                                target,
                                value: value_ty,
                            },
                        );
                    }
                }
            }
            Stmt::Read(name) => {
                if !self.symbols.is_declared(&name.lexeme) {
                    self.report(
                        name.line,
                        SemanticErrorKind::UndeclaredRead {
                            name: name.lexeme.clone(),
                        },
                    );
                }
            }
            Stmt::Write(expr) | Stmt::Expression(expr) => {
                self.infer_expr(expr);
            }
            Stmt::Block(stmts) => {
                for s in stmts {
                    self.check_stmt(s);
                }
            }
            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                self.infer_expr(condition);
                self.check_stmt(then_branch);
                if let Some(else_branch) = else_branch {
                    self.check_stmt(else_branch);
                }
            }
            Stmt::While { condition, body } => {
                self.infer_expr(condition);
                self.check_stmt(body);
            }
        }
    }

    /// Binary chains are folded along their left spine, left operand first,
    /// so a long `a + b + c + ...` costs one loop iteration per operator.
    fn infer_expr(&mut self, expr: &Expr) -> Option<Type> {
        let (leftmost, pairs) = expr.left_spine();
        let mut acc = self.infer_operand(leftmost);
        for (operator, right) in pairs {
            let right_ty = self.infer_expr(right);
            acc = match (acc, right_ty) {
                (Some(left_ty), Some(right_ty)) => {
                    if left_ty != right_ty {
                        self.report(
                            operator.line,
                            SemanticErrorKind::IncompatibleOperation {
                                operator: operator.lexeme.clone(),
                                left: left_ty,
                                right: right_ty,
                            },
                        );
                    }
                    // Relational and logical operators also take the left type.
                    Some(left_ty)
                }
                _ => None,
            };
        }
        acc
    }

    fn infer_operand(&mut self, expr: &Expr) -> Option<Type> {
        match expr {
            Expr::Binary { .. } => self.infer_expr(expr),
            Expr::Unary { operand, .. } => self.infer_expr(operand),
            Expr::Grouping(inner) => self.infer_expr(inner),
            Expr::Literal(value) => match value {
                LiteralValue::Integer(_) => Some(Type::Long),
                LiteralValue::Real(_) => Some(Type::Double),
                // TODO: give strings and booleans their own types once the
                // language grows string/boolean variables; until then they
                // are unchecked.
                LiteralValue::Str(_) | LiteralValue::Boolean(_) | LiteralValue::Nil => None,
            },
            Expr::Variable(name) => {
                let ty = self.symbols.type_of(&name.lexeme);
                if ty.is_none() {
                    self.report(
                        name.line,
                        SemanticErrorKind::UsedUndeclared {
                            name: name.lexeme.clone(),
                        },
                    );
                }
                ty
            }
        }
    }
}
