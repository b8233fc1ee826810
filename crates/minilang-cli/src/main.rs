mod render;
mod report;

use std::fs;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::Context;
use clap::Parser as ClapParser;

use minilang_lexer::{tokenize, Lexed};
use minilang_parser::{parse, Parsed};
use minilang_semantic::{analyze, Analysis};

use render::{render_diagnostic, Paint};
use report::{diagnostics, Phase, Report};

/// Check a minilang source file: lexical, syntax and semantic analysis.
#[derive(Debug, ClapParser)]
#[command(name = "minilang", version, about)]
struct Cli {
    /// Source file to analyze
    file: PathBuf,

    /// Print the token stream
    #[arg(long)]
    tokens: bool,

    /// Print the parsed statements
    #[arg(long)]
    ast: bool,

    /// Emit a single JSON report on stdout instead of the text report
    #[arg(long)]
    json: bool,

    /// Disable colored output (also honored through NO_COLOR)
    #[arg(long)]
    no_color: bool,

    /// Print per-phase counts and timings to stderr
    #[arg(short, long)]
    verbose: bool,
}

struct Run {
    lexed: Lexed,
    parsed: Parsed,
    /// `None` when lexical or syntax errors stopped the run
    analysis: Option<Analysis>,
}

impl Run {
    fn failed(&self) -> bool {
        self.lexed.has_errors()
            || self.parsed.has_errors()
            || self.analysis.as_ref().map_or(false, Analysis::has_errors)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let paint = Paint::new(use_color(&cli));
    match run(&cli, paint) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{}: {:#}", paint.error("error"), err);
            ExitCode::FAILURE
        }
    }
}

fn use_color(cli: &Cli) -> bool {
    !cli.no_color
        && !cli.json
        && std::env::var_os("NO_COLOR").is_none()
        && std::io::stderr().is_terminal()
}

fn run(cli: &Cli, paint: Paint) -> anyhow::Result<ExitCode> {
    let source = fs::read_to_string(&cli.file)
        .with_context(|| format!("no se pudo leer '{}'", cli.file.display()))?;

    let result = analyze_source(&source, cli.verbose);

    if cli.json {
        let report = Report::build(
            cli.file.display().to_string(),
            &result.lexed,
            &result.parsed,
            result.analysis.as_ref(),
            cli.tokens,
            cli.ast,
        );
        let json = serde_json::to_string_pretty(&report).context("no se pudo serializar el informe")?;
        println!("{}", json);
    } else {
        print_text_report(cli, paint, &source, &result);
    }

    Ok(if result.failed() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

/// Run the three phases. Semantic analysis only runs over input that
/// lexed and parsed cleanly.
fn analyze_source(source: &str, verbose: bool) -> Run {
    let start = Instant::now();
    let lexed = tokenize(source);
    if verbose {
        eprintln!(
            "[lexer] {} tokens, {} errores ({:?})",
            lexed.tokens.len(),
            lexed.errors.len(),
            start.elapsed()
        );
    }

    let start = Instant::now();
    let parsed = parse(lexed.tokens.clone());
    if verbose {
        eprintln!(
            "[parser] {} sentencias, {} errores ({:?})",
            parsed.statements.len(),
            parsed.errors.len(),
            start.elapsed()
        );
    }

    if lexed.has_errors() || parsed.has_errors() {
        if verbose {
            eprintln!("[semantic] omitido: hay errores léxicos o sintácticos");
        }
        return Run {
            lexed,
            parsed,
            analysis: None,
        };
    }

    let start = Instant::now();
    let analysis = analyze(&parsed.statements);
    if verbose {
        eprintln!(
            "[semantic] {} símbolos, {} errores ({:?})",
            analysis.symbols.len(),
            analysis.errors.len(),
            start.elapsed()
        );
    }
    Run {
        lexed,
        parsed,
        analysis: Some(analysis),
    }
}

fn print_text_report(cli: &Cli, paint: Paint, source: &str, result: &Run) {
    println!(
        "{}",
        paint.banner(&format!(" Analizando archivo: {}", cli.file.display()))
    );

    if cli.tokens {
        println!();
        println!("=== TOKENS ===");
        for token in &result.lexed.tokens {
            println!("{}", token);
        }
    }

    if cli.ast {
        println!();
        println!("=== AST ===");
        for stmt in &result.parsed.statements {
            println!("{}", stmt);
        }
    }

    let diags = diagnostics(&result.lexed, &result.parsed, result.analysis.as_ref());
    for diag in diags.iter().filter(|d| d.phase != Phase::Semantic) {
        render_diagnostic(paint, source, diag);
    }

    let Some(analysis) = &result.analysis else {
        eprintln!(
            "{}",
            paint.error("Análisis semántico omitido por errores léxicos o sintácticos.")
        );
        return;
    };

    println!();
    if analysis.has_errors() {
        println!("=== ERRORES SEMÁNTICOS ===");
        for diag in diags.iter().filter(|d| d.phase == Phase::Semantic) {
            render_diagnostic(paint, source, diag);
        }
    } else {
        println!("No se encontraron errores semánticos.");
    }

    println!();
    println!("=== TABLA DE SÍMBOLOS ===");
    print!("{}", analysis.symbols);
}
