// sqlmask/tests/cli_integration_tests.rs
//! Command-line integration tests for `sqlmask sanitize`.
//!
//! Each test points the binary at its own catalog file inside a temp dir, so
//! nothing touches the user's data directory. Output is run through
//! `strip_ansi_escapes` before comparing, in case colors are ever enabled.

use anyhow::Result;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};

use sqlmask_core::TermCatalog;
use strip_ansi_escapes::strip as strip_ansi_escapes_fn;

/// Writes a catalog holding exactly `terms` and returns its path.
fn write_catalog(dir: &TempDir, terms: &[&str]) -> Result<PathBuf> {
    let path = dir.path().join("terms.json");
    let catalog = TermCatalog::from_terms(terms)?;
    fs::write(&path, catalog.to_json_pretty()?)?;
    Ok(path)
}

fn sqlmask(catalog: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo_bin!("sqlmask"));
    cmd.env_remove("SQLMASK_CATALOG");
    cmd.env("RUST_LOG", "debug");
    cmd.arg("--catalog").arg(catalog);
    cmd
}

fn strip_ansi(bytes: &[u8]) -> String {
    String::from_utf8_lossy(&strip_ansi_escapes_fn(bytes)).to_string()
}

#[test]
fn test_sanitize_reference_scenario() -> Result<()> {
    let dir = tempdir()?;
    let catalog = write_catalog(&dir, &["select", "order by", "*"])?;

    sqlmask(&catalog)
        .args(["sanitize", "--text", "Select * from t order by name"])
        .assert()
        .success()
        .stdout("****** * from t ******** name\n");
    Ok(())
}

#[test]
fn test_sanitize_leaves_longer_words_alone() -> Result<()> {
    let dir = tempdir()?;
    let catalog = write_catalog(&dir, &["select", "prep", "order by"])?;

    sqlmask(&catalog)
        .args(["sanitize", "--no-redaction-summary"])
        .write_stdin("selected prepare\nreorder by zone\nin order by zone\n")
        .assert()
        .success()
        .stdout("selected prepare\nreorder by zone\nin ******** zone\n");
    Ok(())
}

#[test]
fn test_sanitize_with_default_terms_when_catalog_missing() -> Result<()> {
    let dir = tempdir()?;
    let catalog = dir.path().join("not-yet-created.json");

    sqlmask(&catalog)
        .arg("sanitize")
        .write_stdin("SELECT * FROM users WHERE id = 1\n")
        .assert()
        .success()
        .stdout("************* users ***** id = 1\n");

    assert!(!catalog.exists(), "sanitize must not create the catalog file");
    Ok(())
}

#[test]
fn test_sanitize_prints_summary_to_stderr() -> Result<()> {
    let dir = tempdir()?;
    let catalog = write_catalog(&dir, &["select", "from"])?;

    let output = sqlmask(&catalog)
        .args(["sanitize", "--text", "select a from b; SELECT c"])
        .output()?;
    assert!(output.status.success());

    let stderr = strip_ansi(&output.stderr);
    assert!(stderr.contains("--- Redaction Summary ---"));
    assert!(stderr.contains("'select' (atomic): 2 occurrences"));
    assert!(stderr.contains("'from' (atomic): 1 occurrence"));
    Ok(())
}

#[test]
fn test_quiet_suppresses_summary() -> Result<()> {
    let dir = tempdir()?;
    let catalog = write_catalog(&dir, &["select"])?;

    sqlmask(&catalog)
        .args(["--quiet", "sanitize", "--text", "select 1"])
        .assert()
        .success()
        .stdout("****** 1\n")
        .stderr(predicate::str::contains("Redaction Summary").not());
    Ok(())
}

#[test]
fn test_sanitize_from_input_file_to_output_file() -> Result<()> {
    let dir = tempdir()?;
    let catalog = write_catalog(&dir, &["drop table", "--"])?;
    let input = dir.path().join("in.sql");
    let output = dir.path().join("out.sql");
    fs::write(&input, "DROP TABLE users; -- cleanup\n")?;

    sqlmask(&catalog)
        .arg("sanitize")
        .arg("--input-file")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert_eq!(fs::read_to_string(&output)?, "********** users; ** cleanup\n");
    Ok(())
}

#[test]
fn test_sanitize_diff_view() -> Result<()> {
    let dir = tempdir()?;
    let catalog = write_catalog(&dir, &["select"])?;

    let output = sqlmask(&catalog)
        .args(["sanitize", "--diff", "--no-redaction-summary"])
        .write_stdin("keep me\nselect 1\n")
        .output()?;
    assert!(output.status.success());

    let stdout = strip_ansi(&output.stdout);
    assert!(stdout.contains("--- Diff View ---"));
    assert!(stdout.contains("  keep me"));
    assert!(stdout.contains("- select 1"));
    assert!(stdout.contains("+ ****** 1"));
    Ok(())
}

#[test]
fn test_catalog_path_from_environment() -> Result<()> {
    let dir = tempdir()?;
    let catalog = write_catalog(&dir, &["truncate"])?;

    Command::new(assert_cmd::cargo_bin!("sqlmask"))
        .env("SQLMASK_CATALOG", &catalog)
        .args(["sanitize", "--text", "TRUNCATE logs"])
        .assert()
        .success()
        .stdout("******** logs\n");
    Ok(())
}

#[test]
fn test_empty_catalog_is_identity() -> Result<()> {
    let dir = tempdir()?;
    let catalog = write_catalog(&dir, &[])?;

    sqlmask(&catalog)
        .args(["sanitize", "--text", "anything at all"])
        .assert()
        .success()
        .stdout("anything at all\n");
    Ok(())
}

#[test]
fn test_missing_input_file_fails() -> Result<()> {
    let dir = tempdir()?;
    let catalog = write_catalog(&dir, &["select"])?;

    sqlmask(&catalog)
        .args(["sanitize", "--input-file"])
        .arg(dir.path().join("missing.sql"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read input file"));
    Ok(())
}

#[test]
fn test_corrupt_catalog_fails() -> Result<()> {
    let dir = tempdir()?;
    let catalog = dir.path().join("terms.json");
    fs::write(&catalog, "[not a catalog")?;

    sqlmask(&catalog)
        .args(["sanitize", "--text", "select 1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("is invalid"));
    Ok(())
}

#[test]
fn test_custom_theme_file() -> Result<()> {
    let dir = tempdir()?;
    let catalog = write_catalog(&dir, &["select"])?;
    let theme = dir.path().join("theme.yaml");
    fs::write(&theme, "header:\n  fg: brightblue\n")?;

    sqlmask(&catalog)
        .arg("--theme")
        .arg(&theme)
        .args(["sanitize", "--text", "select 1"])
        .assert()
        .success()
        .stdout("****** 1\n");

    let broken = dir.path().join("broken.yaml");
    fs::write(&broken, "header: [unclosed")?;
    sqlmask(&catalog)
        .arg("--theme")
        .arg(&broken)
        .args(["sanitize", "--text", "select 1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse theme file"));
    Ok(())
}

#[test]
fn test_terms_file_extends_catalog_for_one_run() -> Result<()> {
    let dir = tempdir()?;
    let catalog = write_catalog(&dir, &["select"])?;
    let before = fs::read_to_string(&catalog)?;
    let terms_file = dir.path().join("extra.yaml");
    fs::write(&terms_file, "terms:\n  - salary\n  - SELECT\n")?;

    sqlmask(&catalog)
        .args(["sanitize", "--no-redaction-summary", "--text", "select salary from pay", "--terms-file"])
        .arg(&terms_file)
        .assert()
        .success()
        .stdout("****** ****** from pay\n");

    assert_eq!(fs::read_to_string(&catalog)?, before);
    Ok(())
}

#[test]
fn test_terms_file_with_blank_term_fails() -> Result<()> {
    let dir = tempdir()?;
    let catalog = write_catalog(&dir, &["select"])?;
    let terms_file = dir.path().join("extra.yaml");
    fs::write(&terms_file, "terms:\n  - salary\n  - '   '\n")?;

    sqlmask(&catalog)
        .args(["sanitize", "--text", "select salary", "--terms-file"])
        .arg(&terms_file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid term"));
    Ok(())
}
