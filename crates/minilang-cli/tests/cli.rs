use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::path::PathBuf;
use std::process::Command;

fn workspace_root() -> PathBuf {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    manifest_dir.parent().unwrap().parent().unwrap().to_path_buf()
}

fn minilang() -> Command {
    let mut cmd = Command::cargo_bin("minilang").unwrap();
    cmd.env_remove("NO_COLOR");
    cmd
}

#[test]
fn clean_program_succeeds() {
    let root = workspace_root();
    let mut cmd = minilang();
    cmd.arg(root.join("samples/suma.min")).arg("--no-color");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("No se encontraron errores semánticos."))
        .stdout(predicate::str::contains("=== TABLA DE SÍMBOLOS ==="))
        .stdout(predicate::str::contains("media      double     global     null       3"));
}

#[test]
fn semantic_errors_fail_with_messages() {
    let root = workspace_root();
    let mut cmd = minilang();
    cmd.arg(root.join("samples/tipos.min")).arg("--no-color");
    cmd.assert()
        .failure()
        .stdout(predicate::str::contains("=== ERRORES SEMÁNTICOS ==="))
        .stderr(predicate::str::contains(
            "Semantic Error (line 3): Asignación incompatible: long = double",
        ))
        .stderr(predicate::str::contains(
            "Semantic Error (line 4): Variable 'z' usada sin declarar.",
        ))
        .stderr(predicate::str::contains(
            "Semantic Error (line 5): Variable 'x' redeclarada.",
        ));
}

#[test]
fn syntax_errors_skip_semantic_analysis() {
    let root = workspace_root();
    let mut cmd = minilang();
    cmd.arg(root.join("samples/sintaxis.min")).arg("--no-color");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains(
            "Error sintáctico [línea 2, col 5]: Se esperaba una expresión. (token: ';')",
        ))
        .stderr(predicate::str::contains("Se esperaba ';' después de write(...)."))
        .stderr(predicate::str::contains("Análisis semántico omitido"))
        .stdout(predicate::str::contains("=== TABLA DE SÍMBOLOS ===").not());
}

#[test]
fn syntax_error_shows_caret() {
    let root = workspace_root();
    let mut cmd = minilang();
    cmd.arg(root.join("samples/sintaxis.min")).arg("--no-color");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("  2 | x = ;\n          ^"));
}

#[test]
fn lexical_errors_fail() {
    let root = workspace_root();
    let mut cmd = minilang();
    cmd.arg(root.join("samples/lexico.min")).arg("--no-color");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Error léxico"))
        .stderr(predicate::str::contains("Comentario multilínea sin cierre"));
}

#[test]
fn tokens_and_ast_flags() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let path = tmp_dir.path().join("mini.min");
    std::fs::write(&path, "long x;\nx = 5;\n").unwrap();

    let mut cmd = minilang();
    cmd.arg(&path).args(["--tokens", "--ast", "--no-color"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("[LONG] 'long' (línea 1, columna 1)"))
        .stdout(predicate::str::contains("VarDecl(long x)"))
        .stdout(predicate::str::contains("Assign(x = 5)"));
}

#[test]
fn json_report_is_valid() {
    let root = workspace_root();
    let mut cmd = minilang();
    cmd.arg(root.join("samples/tipos.min")).args(["--json", "--ast"]);
    let output = cmd.output().unwrap();
    assert!(!output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["semantic_checked"], true);
    assert_eq!(report["ast"].as_array().unwrap().len(), 5);
    assert!(report.get("tokens").is_none());

    let errors = report["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 3);
    assert!(errors.iter().all(|e| e["phase"] == "semantic"));
    assert_eq!(errors[0]["line"], 3);
    assert!(errors[0]["col"].is_null());

    let symbols = report["symbols"].as_array().unwrap();
    assert_eq!(symbols.len(), 2);
    assert_eq!(symbols[0]["name"], "x");
    assert_eq!(symbols[0]["type"], "long");
}

#[test]
fn json_report_for_lexical_errors() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let path = tmp_dir.path().join("bad.min");
    std::fs::write(&path, "write(\"hola);\n").unwrap();

    let mut cmd = minilang();
    cmd.arg(&path).arg("--json");
    let output = cmd.output().unwrap();
    assert!(!output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["semantic_checked"], false);
    assert_eq!(report["errors"][0]["phase"], "lexical");
    assert_eq!(report["errors"][0]["message"], "Cadena sin cierre de comillas");
    assert_eq!(report["symbols"].as_array().unwrap().len(), 0);
}

#[test]
fn missing_file_is_an_error() {
    let tmp_dir = tempfile::tempdir().unwrap();
    let mut cmd = minilang();
    cmd.arg(tmp_dir.path().join("nope.min")).arg("--no-color");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("error: no se pudo leer"));
}
