//! Integration tests for the relint binary.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const CONFIG: &str = r#"
rules:
  - name: assert
    pattern: 'assert\((.+), (.+)\)'
    message: use assert statement
    severity: Error
    fix: 'assert $1: $2'
  - name: todo
    pattern: TODO
    message: resolve TODO
"#;

const SOURCE: &str = "let a = 1\nassert(false, \"x\")\nTODO later\n";

fn setup_project(config: &str) -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join(".relint.yml"), config).unwrap();
    temp
}

fn relint(temp: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("relint"));
    cmd.current_dir(temp.path()).env("NO_COLOR", "1");
    cmd
}

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("relint"));
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Regex lint rules"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("relint"));
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn cli_check_clean_file_succeeds() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(CONFIG);
    fs::write(temp.path().join("clean.txt"), "nothing to see\n")?;

    relint(&temp)
        .args(["check", "clean.txt"])
        .assert()
        .success()
        .stderr(predicate::str::contains("No issues found"));
    Ok(())
}

#[test]
fn cli_check_reports_errors() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(CONFIG);
    fs::write(temp.path().join("src.txt"), SOURCE)?;

    relint(&temp)
        .args(["check", "src.txt"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("error[assert]: use assert statement"))
        .stdout(predicate::str::contains("--> src.txt:2:1"))
        .stdout(predicate::str::contains("warning[todo]: resolve TODO"))
        .stdout(predicate::str::contains("Found 1 error(s) and 1 warning(s)"));
    Ok(())
}

#[test]
fn cli_check_warnings_pass_unless_strict() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(CONFIG);
    fs::write(temp.path().join("notes.txt"), "TODO later\n")?;

    relint(&temp).args(["check", "notes.txt"]).assert().success();
    relint(&temp)
        .args(["check", "notes.txt", "--strict"])
        .assert()
        .code(1);
    Ok(())
}

#[test]
fn cli_check_json_is_parseable() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(CONFIG);
    fs::write(temp.path().join("src.txt"), SOURCE)?;

    let output = relint(&temp)
        .args(["check", "src.txt", "--format", "json"])
        .output()?;

    assert_eq!(output.status.code(), Some(1));
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(parsed["summary"]["errors"], 1);
    assert_eq!(parsed["summary"]["warnings"], 1);
    assert_eq!(parsed["diagnostics"][0]["code"], "assert");
    assert_eq!(parsed["diagnostics"][0]["line"], 2);
    assert_eq!(parsed["diagnostics"][0]["start"], 10);
    Ok(())
}

#[test]
fn cli_check_sarif_is_parseable() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(CONFIG);
    fs::write(temp.path().join("src.txt"), SOURCE)?;

    let output = relint(&temp)
        .args(["check", "src.txt", "--format", "sarif"])
        .output()?;

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(parsed["version"], "2.1.0");
    assert_eq!(parsed["runs"][0]["results"].as_array().unwrap().len(), 2);
    Ok(())
}

#[test]
fn cli_check_fix_rewrites_file() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(CONFIG);
    let path = temp.path().join("src.txt");
    fs::write(&path, "assert(false, \"x\")\n")?;

    relint(&temp)
        .args(["check", "src.txt", "--fix"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Applied 1 fix(es) to src.txt"));

    assert_eq!(fs::read_to_string(&path)?, "assert false: \"x\"\n");
    Ok(())
}

#[test]
fn cli_check_fix_dry_run_prints_fixed_text() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(CONFIG);
    let path = temp.path().join("src.txt");
    fs::write(&path, "assert(false, \"x\")\n")?;

    relint(&temp)
        .args(["check", "src.txt", "--fix", "--dry-run"])
        .assert()
        .success()
        .stdout("assert false: \"x\"\n");

    assert_eq!(fs::read_to_string(&path)?, "assert(false, \"x\")\n");
    Ok(())
}

#[test]
fn cli_check_reads_stdin() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(CONFIG);

    relint(&temp)
        .args(["check", "--stdin"])
        .write_stdin("TODO\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("--> <stdin>:1:1"));
    Ok(())
}

#[test]
fn cli_check_stdin_fix_prints_fixed_text() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(CONFIG);

    relint(&temp)
        .args(["check", "--stdin", "--fix"])
        .write_stdin("assert(a, b)\n")
        .assert()
        .success()
        .stdout("assert a: b\n");
    Ok(())
}

#[test]
fn cli_check_reorders_lines() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(
        r#"
rules:
  - name: imports
    pattern: '^import \w+$'
    message: imports out of order
    fixType: reorder_asc
"#,
    );
    let path = temp.path().join("mod.txt");
    fs::write(&path, "import zeta\nimport alpha\nimport mid\n")?;

    relint(&temp)
        .args(["check", "mod.txt", "--fix"])
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(&path)?,
        "import alpha\nimport mid\nimport zeta\n"
    );
    Ok(())
}

#[test]
fn cli_check_no_config_exits_two() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    fs::write(temp.path().join("a.txt"), "x")?;

    relint(&temp)
        .args(["check", "a.txt"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("No configuration found"));
    Ok(())
}

#[test]
fn cli_check_bad_yaml_exits_one() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project("rules: [unclosed\n");
    fs::write(temp.path().join("a.txt"), "x")?;

    relint(&temp)
        .args(["check", "a.txt"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Parse error"));
    Ok(())
}

#[test]
fn cli_check_missing_path_exits_two() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(CONFIG);

    relint(&temp)
        .args(["check", "missing.txt"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Path not found"));
    Ok(())
}

#[test]
fn cli_check_uses_config_override() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    fs::write(temp.path().join("custom.yml"), CONFIG)?;
    fs::write(temp.path().join("notes.txt"), "TODO\n")?;

    relint(&temp)
        .args(["--config", "custom.yml", "check", "notes.txt", "--strict"])
        .assert()
        .code(1);
    Ok(())
}

#[test]
fn cli_rules_lists_groups_and_dropped() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(
        r#"
rules:
  - name: assert
    pattern: 'assert\('
    message: m
  - name: broken
    pattern: '('
    message: m
"#,
    );

    relint(&temp)
        .arg("rules")
        .assert()
        .success()
        .stdout(predicate::str::contains("assert (1 rule(s))"))
        .stderr(predicate::str::contains("Dropped rule #1"));
    Ok(())
}

#[test]
fn cli_rules_merges_local_overlay() -> Result<(), Box<dyn std::error::Error>> {
    let temp = setup_project(CONFIG);
    fs::create_dir_all(temp.path().join(".relint"))?;
    fs::write(
        temp.path().join(".relint/config.local.yml"),
        "rules:\n  - name: local\n    pattern: FIXME\n    message: m\n",
    )?;

    let output = relint(&temp).args(["rules", "--json"]).output()?;

    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(parsed["rules"].as_array().unwrap().len(), 3);
    assert_eq!(parsed["rules"][2]["name"], "local");
    Ok(())
}

#[test]
fn cli_schema_prints_json_schema() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;

    let output = relint(&temp).arg("schema").output()?;

    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(parsed["$schema"], "http://json-schema.org/draft-07/schema#");
    Ok(())
}

#[test]
fn cli_completions_bash() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;

    relint(&temp)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("relint"));
    Ok(())
}
