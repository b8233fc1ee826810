//! Phase results flattened into serializable records.
//!
//! The text output and the `--json` document are both built from these, so
//! the two never disagree about what was found.

use serde::Serialize;

use minilang_lexer::Lexed;
use minilang_parser::Parsed;
use minilang_semantic::Analysis;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Lexical,
    Syntax,
    Semantic,
}

#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    pub phase: Phase,
    pub line: usize,
    /// Semantic errors carry no column
    pub col: Option<usize>,
    pub message: String,
    /// Full one-line rendering, e.g. `Error léxico [línea 1, columna 4]: ...`
    pub rendered: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TokenEntry {
    pub kind: &'static str,
    pub lexeme: String,
    pub line: usize,
    pub col: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct SymbolEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: &'static str,
    pub scope: String,
    pub value: Option<String>,
    pub line: usize,
}

/// The `--json` document.
#[derive(Debug, Serialize)]
pub struct Report {
    pub file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokens: Option<Vec<TokenEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ast: Option<Vec<String>>,
    /// False when lexical or syntax errors stopped the run before semantic analysis
    pub semantic_checked: bool,
    pub errors: Vec<Diagnostic>,
    pub symbols: Vec<SymbolEntry>,
}

/// All diagnostics of a run, in phase order.
pub fn diagnostics(lexed: &Lexed, parsed: &Parsed, analysis: Option<&Analysis>) -> Vec<Diagnostic> {
    let lexical = lexed.errors.iter().map(|e| Diagnostic {
        phase: Phase::Lexical,
        line: e.line,
        col: Some(e.col),
        message: e.message.clone(),
        rendered: e.to_string(),
    });
    let syntax = parsed.errors.iter().map(|e| Diagnostic {
        phase: Phase::Syntax,
        line: e.line,
        col: Some(e.col),
        message: e.message.clone(),
        rendered: e.to_string(),
    });
    let semantic = analysis
        .into_iter()
        .flat_map(|a| a.errors.iter())
        .map(|e| Diagnostic {
            phase: Phase::Semantic,
            line: e.line,
            col: None,
            message: e.message(),
            rendered: e.to_string(),
        });
    lexical.chain(syntax).chain(semantic).collect()
}

pub fn token_entries(lexed: &Lexed) -> Vec<TokenEntry> {
    lexed
        .tokens
        .iter()
        .map(|t| TokenEntry {
            kind: t.kind.name(),
            lexeme: t.lexeme.clone(),
            line: t.line,
            col: t.col,
        })
        .collect()
}

pub fn symbol_entries(analysis: &Analysis) -> Vec<SymbolEntry> {
    analysis
        .symbols
        .iter()
        .map(|s| SymbolEntry {
            name: s.name.clone(),
            ty: s.ty.as_str(),
            scope: s.scope.clone(),
            value: s.value.as_ref().map(|v| v.to_string()),
            line: s.line,
        })
        .collect()
}

impl Report {
    pub fn build(
        file: String,
        lexed: &Lexed,
        parsed: &Parsed,
        analysis: Option<&Analysis>,
        with_tokens: bool,
        with_ast: bool,
    ) -> Self {
        Report {
            file,
            tokens: with_tokens.then(|| token_entries(lexed)),
            ast: with_ast.then(|| parsed.statements.iter().map(|s| s.to_string()).collect()),
            semantic_checked: analysis.is_some(),
            errors: diagnostics(lexed, parsed, analysis),
            symbols: analysis.map(symbol_entries).unwrap_or_default(),
        }
    }
}
