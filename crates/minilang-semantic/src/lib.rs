//! minilang semantic analysis: symbol table construction plus declaration,
//! usage and type-compatibility checks over the parsed statements.
//!
//! There is a single global scope. Blocks, `if` and `while` bodies do not
//! open new scopes, and a name can be declared only once per program.

pub mod analyzer;
pub mod symbol;

pub use analyzer::{Analysis, SemanticAnalyzer};
pub use symbol::{Symbol, SymbolTable, GLOBAL_SCOPE};

use minilang_syntax::ast::Stmt;

/// Analyze a parsed program with a fresh analyzer.
pub fn analyze(statements: &[Stmt]) -> Analysis {
    let mut analyzer = SemanticAnalyzer::new();
    analyzer.analyze(statements);
    analyzer.into_parts()
}

#[cfg(test)]
mod tests {
    use super::*;
    use minilang_lexer::tokenize;
    use minilang_parser::parse;
    use minilang_syntax::ast::Type;
    use minilang_syntax::error::SemanticErrorKind;

    fn check(input: &str) -> Analysis {
        let lexed = tokenize(input);
        assert!(lexed.errors.is_empty(), "Lex errors: {:?}", lexed.errors);
        let parsed = parse(lexed.tokens);
        assert!(parsed.errors.is_empty(), "Syntax errors: {:?}", parsed.errors);
        analyze(&parsed.statements)
    }

    fn kinds(analysis: &Analysis) -> Vec<SemanticErrorKind> {
        analysis.errors.iter().map(|e| e.kind.clone()).collect()
    }

    fn undeclared_use(name: &str) -> SemanticErrorKind {
        SemanticErrorKind::UsedUndeclared {
            name: name.to_string(),
        }
    }

    #[test]
    fn test_clean_program() {
        let analysis = check(
            "long a, b;\ndouble m;\nread(a);\nread(b);\nm = 2.0;\nwhile (a < b) a = a + 1;\nwrite(m);",
        );
        assert!(!analysis.has_errors(), "{:?}", analysis.errors);
        let names: Vec<&str> = analysis.symbols.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "m"]);
        let m = analysis.symbols.get("m").expect("m declared");
        assert_eq!(m.ty, Type::Double);
        assert_eq!(m.scope, GLOBAL_SCOPE);
        assert_eq!(m.value, None);
        assert_eq!(m.line, 2);
    }

    #[test]
    fn test_incompatible_assignment() {
        let analysis = check("long x; double y; x = y;");
        assert_eq!(
            kinds(&analysis),
            vec![SemanticErrorKind::IncompatibleAssignment {
                target: Type::Long,
                value: Type::Double,
            }]
        );
        assert_eq!(
            analysis.errors[0].to_string(),
            "Semantic Error (line 1): Asignación incompatible: long = double"
        );
    }

    #[test]
    fn test_use_without_declaration() {
        let analysis = check("write(x);");
        assert_eq!(kinds(&analysis), vec![undeclared_use("x")]);
        assert!(analysis.symbols.is_empty());
    }

    #[test]
    fn test_redeclaration_keeps_first() {
        let analysis = check("long x;\ndouble x;");
        assert_eq!(analysis.errors.len(), 1);
        assert_eq!(
            analysis.errors[0].to_string(),
            "Semantic Error (line 2): Variable 'x' redeclarada."
        );
        assert_eq!(analysis.symbols.len(), 1);
        let x = analysis.symbols.get("x").expect("x declared");
        assert_eq!((x.ty, x.line), (Type::Long, 1));
    }

    #[test]
    fn test_same_type_redeclaration() {
        let analysis = check("long x; long x;");
        assert_eq!(
            kinds(&analysis),
            vec![SemanticErrorKind::Redeclared {
                name: "x".to_string()
            }]
        );
        assert_eq!(analysis.symbols.len(), 1);
    }

    #[test]
    fn test_undeclared_assignment_still_checks_value() {
        let analysis = check("y = z + 1;");
        assert_eq!(
            kinds(&analysis),
            vec![
                SemanticErrorKind::Undeclared {
                    name: "y".to_string()
                },
                undeclared_use("z"),
            ]
        );
    }

    #[test]
    fn test_read_requires_declaration() {
        let analysis = check("read(a);");
        assert_eq!(
            analysis.errors[0].to_string(),
            "Semantic Error (line 1): Variable 'a' no declarada antes del read."
        );
    }

    #[test]
    fn test_incompatible_operation() {
        let analysis = check("long a;\ndouble b;\nwrite(a\n* b);");
        assert_eq!(
            kinds(&analysis),
            vec![SemanticErrorKind::IncompatibleOperation {
                operator: "*".to_string(),
                left: Type::Long,
                right: Type::Double,
            }]
        );
        // Reported on the operator's line.
        assert_eq!(analysis.errors[0].line, 4);
        assert_eq!(
            analysis.errors[0].message(),
            "Operación incompatible: long * double"
        );
    }

    #[test]
    fn test_binary_takes_left_type() {
        // The mixed sum is reported once; the sum itself is typed `long`.
        let analysis = check("long a; double b; a = a + b;");
        assert_eq!(analysis.errors.len(), 1);
        assert!(matches!(
            analysis.errors[0].kind,
            SemanticErrorKind::IncompatibleOperation { .. }
        ));

        // Comparisons are not boolean-typed either.
        assert!(!check("long a; a = a < 2;").has_errors());
    }

    #[test]
    fn test_chain_error_order() {
        let analysis = check("long a; double d; write(u + a + d); write(a + d + u);");
        assert_eq!(
            kinds(&analysis),
            vec![
                undeclared_use("u"),
                SemanticErrorKind::IncompatibleOperation {
                    operator: "+".to_string(),
                    left: Type::Long,
                    right: Type::Double,
                },
                undeclared_use("u"),
            ]
        );
    }

    #[test]
    fn test_long_operator_chain() {
        let mut source = String::from("long x;\nx = 1");
        for _ in 0..50_000 {
            source.push_str(" + 1");
        }
        source.push_str(";\nwrite(x);");
        let analysis = check(&source);
        assert!(!analysis.has_errors());
        assert_eq!(analysis.symbols.len(), 1);

        let mixed = source.replacen("x = 1", "x = 1.5", 1);
        let analysis = check(&mixed);
        // Every `+` sees a `double` on its left, then the assignment mismatches.
        assert_eq!(analysis.errors.len(), 50_001);
        assert!(matches!(
            analysis.errors.last().map(|e| &e.kind),
            Some(SemanticErrorKind::IncompatibleAssignment {
                target: Type::Long,
                value: Type::Double,
            })
        ));
    }

    #[test]
    fn test_literal_types() {
        assert_eq!(
            kinds(&check("double d; d = 1;")),
            vec![SemanticErrorKind::IncompatibleAssignment {
                target: Type::Double,
                value: Type::Long,
            }]
        );
        assert!(!check("double d; d = 1.5; long l; l = 7;").has_errors());
    }

    #[test]
    fn test_strings_and_booleans_are_unchecked() {
        let analysis = check("long a; a = \"hola\"; a = true; write(a + \"x\"); a = !false;");
        assert!(!analysis.has_errors(), "{:?}", analysis.errors);
    }

    #[test]
    fn test_unary_and_grouping_pass_type_through() {
        let analysis = check("double d; long l; l = -d; l = (2.5);");
        assert_eq!(analysis.errors.len(), 2);
        assert!(analysis.errors.iter().all(|e| matches!(
            e.kind,
            SemanticErrorKind::IncompatibleAssignment {
                target: Type::Long,
                value: Type::Double
            }
        )));
    }

    #[test]
    fn test_compound_assignment_is_checked() {
        let analysis = check("long a; a += 1.5;");
        assert_eq!(analysis.errors.len(), 1);
    }

    #[test]
    fn test_blocks_share_global_scope() {
        let analysis = check("{ long a; } a = 1; if (a > 0) then { double a; }");
        assert_eq!(
            kinds(&analysis),
            vec![SemanticErrorKind::Redeclared {
                name: "a".to_string()
            }]
        );
    }

    #[test]
    fn test_control_flow_is_visited_in_order() {
        let analysis = check("while (n > 0) write(m); if (p) then read(q); else write(r);");
        assert_eq!(
            kinds(&analysis),
            vec![
                undeclared_use("n"),
                undeclared_use("m"),
                undeclared_use("p"),
                SemanticErrorKind::UndeclaredRead {
                    name: "q".to_string()
                },
                undeclared_use("r"),
            ]
        );
    }

    #[test]
    fn test_empty_program() {
        let analysis = check("");
        assert_eq!(analysis, Analysis::default());
    }

    #[test]
    fn test_analyzer_accessors() {
        let parsed = parse(tokenize("long a; write(b);").tokens);
        let mut analyzer = SemanticAnalyzer::new();
        analyzer.analyze(&parsed.statements);
        assert_eq!(analyzer.errors().len(), 1);
        assert!(analyzer.symbol_table().is_declared("a"));
        assert_eq!(analyzer.symbol_table().type_of("b"), None);
    }

    #[test]
    fn test_symbol_table_dump() {
        let analysis = check("long total;\ndouble x;");
        assert_eq!(
            analysis.symbols.to_string(),
            "Nombre     Tipo       Ámbito     Valor      Línea\n\
             total      long       global     null       1\n\
             x          double     global     null       2\n"
        );
    }

    #[test]
    fn test_symbol_table_declare() {
        let mut table = SymbolTable::new();
        assert!(table.declare("a", Type::Long, GLOBAL_SCOPE, None, 1));
        assert!(!table.declare("a", Type::Double, GLOBAL_SCOPE, None, 5));
        assert_eq!(table.type_of("a"), Some(Type::Long));
        assert_eq!(table.get("a").map(|s| s.line), Some(1));
    }
}
