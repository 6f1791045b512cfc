//! Integration tests for the `resmsg` binary.
//!
//! Every test points `--config` at a file inside a temp dir so the user's
//! real configuration never leaks in.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

fn resmsg(temp: &TempDir, config: &str) -> Command {
    let path = temp.path().join("config.toml");
    fs::write(&path, config).unwrap();
    let mut cmd = Command::cargo_bin("resmsg").unwrap();
    cmd.env_remove("RUST_LOG").arg("--config").arg(path);
    cmd
}

fn toml_path(path: &Path) -> String {
    path.display().to_string().replace('\\', "/")
}

#[test]
fn test_help_flag() {
    let temp = TempDir::new().unwrap();
    resmsg(&temp, "")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("show"))
        .stdout(predicate::str::contains("validate"));
}

#[test]
fn test_version_flag() {
    let temp = TempDir::new().unwrap();
    resmsg(&temp, "")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn show_substitutes_params_in_text() {
    let temp = TempDir::new().unwrap();
    resmsg(&temp, "")
        .args(["show", "VAL_002", "--param", "field=Email", "--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[WARNING] VAL_002 (400): Email is required"))
        .stdout(predicate::str::contains("Please provide Email."));
}

#[test]
fn show_json_carries_overrides() {
    let temp = TempDir::new().unwrap();
    let out = resmsg(&temp, "")
        .args([
            "show",
            "CRUD_001",
            "-p",
            "entity=User",
            "--format",
            "json",
            "--data",
            r#"{"id": 7}"#,
            "--meta",
            "region=eu",
            "--correlation-id",
            "req-9",
            "--status",
            "201",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let parsed: Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(parsed["code"], "CRUD_001");
    assert_eq!(parsed["description"], "User was created successfully.");
    assert_eq!(parsed["success"], true);
    assert_eq!(parsed["httpStatusCode"], 201);
    assert_eq!(parsed["data"]["id"], 7);
    assert_eq!(parsed["metadata"]["region"], "eu");
    assert_eq!(parsed["correlationId"], "req-9");
}

#[test]
fn show_generates_correlation_id() {
    let temp = TempDir::new().unwrap();
    let out = resmsg(&temp, "")
        .args(["show", "SYS_001", "--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let parsed: Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(parsed["correlationId"].as_str().map(str::len), Some(36));
}

#[test]
fn show_xml() {
    let temp = TempDir::new().unwrap();
    resmsg(&temp, "")
        .args(["show", "AUTH_002", "--format", "xml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("<message"))
        .stdout(predicate::str::contains("<title>Login failed</title>"));
}

#[test]
fn unknown_code_exits_3() {
    let temp = TempDir::new().unwrap();
    resmsg(&temp, "")
        .args(["show", "NOT_A_CODE"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("NOT_A_CODE"))
        .stderr(predicate::str::contains("resmsg list"));
}

#[test]
fn unknown_format_exits_3_and_lists_formatters() {
    let temp = TempDir::new().unwrap();
    resmsg(&temp, "")
        .args(["show", "CRUD_001", "--format", "yaml"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("json"));
}

#[test]
fn bad_status_exits_2() {
    let temp = TempDir::new().unwrap();
    resmsg(&temp, "")
        .args(["show", "CRUD_001", "--status", "42"])
        .assert()
        .code(2);
}

#[test]
fn bad_param_syntax_is_clap_error() {
    let temp = TempDir::new().unwrap();
    resmsg(&temp, "")
        .args(["show", "VAL_002", "--param", "field"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("KEY=VALUE"));
}

#[test]
fn params_fill_title_and_description_only() {
    let temp = TempDir::new().unwrap();
    let catalog = temp.path().join("hinted.json");
    fs::write(
        &catalog,
        r#"{"FORM_001": {"type": "Warning", "title": "{field} missing", "description": "Add {field}.", "hint": "Check {field}"}}"#,
    )
    .unwrap();
    let config = format!("[catalog]\nfiles = [\"{}\"]\n", toml_path(&catalog));

    let out = resmsg(&temp, &config)
        .args(["show", "FORM_001", "-p", "field=Email", "--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let parsed: Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(parsed["title"], "Email missing");
    assert_eq!(parsed["description"], "Add Email.");
    assert_eq!(parsed["hint"], "Check {field}");
}

#[test]
fn custom_catalog_overrides_defaults() {
    let temp = TempDir::new().unwrap();
    let catalog = temp.path().join("custom.json");
    fs::write(
        &catalog,
        r#"{"CRUD_001": {"title": "Record Created"}, "BILL_001": {"type": "Error", "title": "Card declined", "httpStatusCode": 402}}"#,
    )
    .unwrap();
    let config = format!("[catalog]\nfiles = [\"{}\"]\n", toml_path(&catalog));

    resmsg(&temp, &config)
        .args(["show", "CRUD_001", "--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[SUCCESS] CRUD_001 (200): Record Created"));

    resmsg(&temp, &config)
        .args(["show", "BILL_001", "--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(402): Card declined"));
}

#[test]
fn broken_custom_catalog_warns_and_keeps_defaults() {
    let temp = TempDir::new().unwrap();
    let catalog = temp.path().join("broken.json");
    fs::write(&catalog, "{ not json").unwrap();
    let config = format!("[catalog]\nfiles = [\"{}\"]\n", toml_path(&catalog));

    resmsg(&temp, &config)
        .args(["show", "CRUD_001", "--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created"))
        .stderr(predicate::str::contains("Skipped catalog"));
}

#[test]
fn sqlite_rows_override_defaults() {
    let temp = TempDir::new().unwrap();
    let db = temp.path().join("messages.db");
    let conn = rusqlite::Connection::open(&db).unwrap();
    conn.execute_batch(
        "CREATE TABLE overrides (
            code TEXT PRIMARY KEY, type TEXT, title TEXT,
            description TEXT, http_status_code INTEGER, hint TEXT
        );
        INSERT INTO overrides VALUES ('SYS_002', NULL, 'Back soon', NULL, 503, NULL);",
    )
    .unwrap();
    drop(conn);
    let config = format!(
        "[catalog.sqlite]\npath = \"{}\"\ntable = \"overrides\"\n",
        toml_path(&db)
    );

    resmsg(&temp, &config)
        .args(["show", "SYS_002", "--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(503): Back soon"));
}

#[test]
fn list_json_is_a_catalog() {
    let temp = TempDir::new().unwrap();
    let out = resmsg(&temp, "")
        .args(["list", "--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let parsed: Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(parsed["VAL_002"]["title"], "{field} is required");
    assert_eq!(parsed["CRUD_001"]["httpStatusCode"], 200);
    assert_eq!(parsed.as_object().unwrap().len(), 14);
}

#[test]
fn list_csv_has_header_and_rows() {
    let temp = TempDir::new().unwrap();
    resmsg(&temp, "")
        .args(["list", "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("code,type,httpStatusCode,title"))
        .stdout(predicate::str::contains("AUTH_001,success,200,Login successful"));
}

#[test]
fn validate_good_file() {
    let temp = TempDir::new().unwrap();
    let catalog = temp.path().join("custom.toml");
    fs::write(
        &catalog,
        "[CRUD_001]\ntitle = \"Record Created\"\n\n[BILL_001]\ntype = \"error\"\ntitle = \"Card declined\"\n",
    )
    .unwrap();

    resmsg(&temp, "")
        .arg("validate")
        .arg(&catalog)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 codes (1 override bundled defaults, 1 new)"));
}

#[test]
fn validate_bad_file_exits_2() {
    let temp = TempDir::new().unwrap();
    let catalog = temp.path().join("broken.json");
    fs::write(&catalog, r#"{"X": {"type": "Fatal"}}"#).unwrap();

    resmsg(&temp, "")
        .arg("validate")
        .arg(&catalog)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid message file"));
}

#[test]
fn validate_missing_file_exits_3() {
    let temp = TempDir::new().unwrap();
    resmsg(&temp, "")
        .arg("validate")
        .arg(temp.path().join("absent.json"))
        .assert()
        .code(3);
}

#[test]
fn config_get_reads_file_values() {
    let temp = TempDir::new().unwrap();
    resmsg(&temp, "[registry]\nwarning_status_code = 422\n")
        .args(["config", "get", "registry.warning_status_code"])
        .assert()
        .success()
        .stdout(predicate::str::diff("422\n"));
}

#[test]
fn config_get_unknown_key_exits_2() {
    let temp = TempDir::new().unwrap();
    resmsg(&temp, "")
        .args(["config", "get", "nope"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("formatter.pretty"));
}

#[test]
fn env_overrides_config_file() {
    let temp = TempDir::new().unwrap();
    resmsg(&temp, "[registry]\nwarning_status_code = 422\n")
        .env("RESMSG_REGISTRY__WARNING_STATUS_CODE", "409")
        .args(["show", "VAL_002", "-p", "field=Email", "--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("VAL_002 (409)"));
}

#[test]
fn missing_explicit_config_exits_4() {
    let mut cmd = Command::cargo_bin("resmsg").unwrap();
    cmd.args(["--config", "/absolutely/does/not/exist.toml", "list"])
        .assert()
        .code(4);
}

#[test]
fn test_quiet_flag_keeps_results() {
    let temp = TempDir::new().unwrap();
    resmsg(&temp, "")
        .args(["-q", "show", "CRUD_001", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"code\""));
}

#[test]
fn test_shell_completions() {
    let temp = TempDir::new().unwrap();
    resmsg(&temp, "")
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("complete"));
}
