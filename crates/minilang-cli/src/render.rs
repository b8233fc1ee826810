//! Terminal rendering: colors, source snippets and hints.

use owo_colors::OwoColorize;

use crate::report::Diagnostic;

/// Applies colors only when enabled.
#[derive(Debug, Clone, Copy)]
pub struct Paint {
    enabled: bool,
}

impl Paint {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn error(&self, s: &str) -> String {
        if self.enabled {
            s.red().bold().to_string()
        } else {
            s.to_string()
        }
    }

    pub fn caret(&self, s: &str) -> String {
        if self.enabled {
            s.red().to_string()
        } else {
            s.to_string()
        }
    }

    pub fn hint(&self, s: &str) -> String {
        if self.enabled {
            s.yellow().to_string()
        } else {
            s.to_string()
        }
    }

    pub fn gutter(&self, s: &str) -> String {
        if self.enabled {
            s.bright_black().to_string()
        } else {
            s.to_string()
        }
    }

    pub fn banner(&self, s: &str) -> String {
        if self.enabled {
            s.bold().green().to_string()
        } else {
            s.to_string()
        }
    }
}

/// Print a diagnostic to stderr, followed by the offending source line
/// (with a caret when the column is known) and a hint if one applies.
pub fn render_diagnostic(paint: Paint, source: &str, diag: &Diagnostic) {
    eprintln!("{}", paint.error(&diag.rendered));
    let src_line = diag
        .line
        .checked_sub(1)
        .and_then(|idx| source.lines().nth(idx));
    if let Some(src_line) = src_line {
        let line_num_str = format!("{:3} | ", diag.line);
        eprintln!("{}{}", paint.gutter(&line_num_str), src_line);
        if let Some(col) = diag.col {
            let mut marker = " ".repeat(line_num_str.len());
            marker.push_str(&" ".repeat(col.saturating_sub(1)));
            marker.push('^');
            eprintln!("{}", paint.caret(&marker));
        }
    }
    if let Some(hint) = hint_for(&diag.message) {
        eprintln!("{}", paint.hint(&format!("Ayuda: {}", hint)));
    }
}

/// Suggestions for the most common mistakes.
pub fn hint_for(message: &str) -> Option<&'static str> {
    if message.contains("sin cierre de comillas") {
        Some("cierre la cadena con '\"' antes del final del archivo.")
    } else if message.contains("Comentario multilínea sin cierre") {
        Some("todo '/*' necesita su '*/'.")
    } else if message.contains("Se esperaba ';'") {
        Some("cada sentencia y declaración termina en ';'.")
    } else if message.contains("Se esperaba 'then'") {
        Some("la sintaxis es: if (condición) then sentencia [else sentencia]")
    } else if message.contains("sin declarar") || message.contains("no declarada") {
        Some("declare la variable con 'long' o 'double' antes de usarla.")
    } else if message.contains("redeclarada") {
        Some("cada nombre se declara una sola vez; los bloques no abren ámbitos nuevos.")
    } else if message.contains("incompatible") {
        Some("'long' y 'double' no se convierten implícitamente.")
    } else {
        None
    }
}
