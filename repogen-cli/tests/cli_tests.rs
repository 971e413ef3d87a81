//! CLI integration tests for repogen.
//!
//! Everything here runs without a database: the model and repository stages
//! only read source files, and the DTO stage is checked up to connection setup.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const DTO_SOURCE: &str = r#"
use chrono::NaiveDateTime;

pub struct UserAccountDto {
    pub value: String,
    pub id: i64,
    pub created_at: Option<NaiveDateTime>,
}
"#;

/// Command for the repogen binary, isolated from the caller's environment
fn cmd(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("repogen").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("DATABASE_URL")
        .env_remove("REPOGEN_DATABASE_URL")
        .env_remove("REPOGEN_DEFAULT_SCHEMA");
    cmd
}

fn dto_file(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("user_account_dto.rs");
    fs::write(&path, DTO_SOURCE).unwrap();
    path
}

// =============================================================================
// Help and Version
// =============================================================================

#[test]
fn test_help_shows_all_commands() {
    let dir = TempDir::new().unwrap();
    cmd(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("dto"))
        .stdout(predicate::str::contains("model"))
        .stdout(predicate::str::contains("repository"))
        .stdout(predicate::str::contains("all"));
}

#[test]
fn test_dto_subcommand_help() {
    let dir = TempDir::new().unwrap();
    cmd(&dir)
        .args(["dto", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--package"))
        .stdout(predicate::str::contains("--database-url"))
        .stdout(predicate::str::contains("--schema"))
        .stdout(predicate::str::contains("--force"));
}

#[test]
fn test_version_flag() {
    let dir = TempDir::new().unwrap();
    cmd(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("repogen"));
}

// =============================================================================
// Model and Repository
// =============================================================================

#[test]
fn test_model_from_file_to_stdout() {
    let dir = TempDir::new().unwrap();
    let input = dto_file(&dir);

    cmd(&dir)
        .args(["model", "--package", "accounts", "--input"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("pub struct UserAccount {"))
        .stdout(predicate::str::contains("use chrono::NaiveDateTime;"))
        .stdout(predicate::str::contains("pub created_at: Option<NaiveDateTime>,"));
}

#[test]
fn test_model_from_stdin() {
    let dir = TempDir::new().unwrap();

    cmd(&dir)
        .args(["model", "-p", "accounts"])
        .write_stdin("pub struct OrderDTO { pub id: i64 }")
        .assert()
        .success()
        .stdout(predicate::str::contains("pub struct Order {"));
}

#[test]
fn test_repository_to_file_respects_force() {
    let dir = TempDir::new().unwrap();
    let input = dto_file(&dir);
    let output = dir.path().join("out/user_account_repository.rs");

    cmd(&dir)
        .args(["repository", "-p", "accounts", "-i"])
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .success();

    let generated = fs::read_to_string(&output).unwrap();
    assert!(generated.contains("pub struct UserAccountRepository<P>"));

    cmd(&dir)
        .args(["repository", "-p", "accounts", "-i"])
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    cmd(&dir)
        .args(["repository", "-p", "accounts", "--force", "-i"])
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .success();
}

#[test]
fn test_model_template_override_from_config() {
    let dir = TempDir::new().unwrap();
    let input = dto_file(&dir);
    fs::write(dir.path().join("model.hbs"), "model {{StructName}} in {{PackageName}}").unwrap();
    fs::write(dir.path().join("repogen.toml"), "[templates]\nmodel = \"model.hbs\"\n").unwrap();

    cmd(&dir)
        .args(["model", "-p", "accounts", "-i"])
        .arg(&input)
        .assert()
        .success()
        .stdout("model UserAccount in accounts");
}

// =============================================================================
// Error Conditions
// =============================================================================

#[test]
fn test_missing_package_is_usage_error() {
    let dir = TempDir::new().unwrap();
    cmd(&dir)
        .args(["model", "--input", "dto.rs"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--package"));
}

#[test]
fn test_empty_package_is_rejected() {
    let dir = TempDir::new().unwrap();
    let input = dto_file(&dir);

    cmd(&dir)
        .args(["model", "--package", "", "--input"])
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("package name must not be empty"));
}

#[test]
fn test_invalid_source_is_reported() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("broken.rs");
    fs::write(&input, "pub struct Broken {").unwrap();

    cmd(&dir)
        .args(["model", "-p", "accounts", "-i"])
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("source parsing error"));
}

#[test]
fn test_source_without_struct() {
    let dir = TempDir::new().unwrap();

    cmd(&dir)
        .args(["repository", "-p", "accounts"])
        .write_stdin("pub fn main() {}")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no structure was found"));
}

#[test]
fn test_dto_empty_table_fails_before_connecting() {
    let dir = TempDir::new().unwrap();
    cmd(&dir)
        .args(["dto", "", "-p", "accounts"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("table name must not be empty"));

    cmd(&dir)
        .args(["dto", "", "-p", "accounts", "--database-url", "postgres://127.0.0.1:1/app"])
        .timeout(std::time::Duration::from_secs(10))
        .assert()
        .failure()
        .stderr(predicate::str::contains("table name must not be empty"));
}

#[test]
fn test_all_empty_package_fails_before_connecting() {
    let dir = TempDir::new().unwrap();
    cmd(&dir)
        .args(["all", "users", "-p", ""])
        .assert()
        .failure()
        .stderr(predicate::str::contains("package name must not be empty"));
}

#[test]
fn test_dto_without_database_url() {
    let dir = TempDir::new().unwrap();
    cmd(&dir)
        .args(["dto", "users", "--package", "accounts"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no database URL configured"));
}

#[test]
fn test_dto_with_unsupported_url() {
    let dir = TempDir::new().unwrap();
    cmd(&dir)
        .args(["dto", "users", "-p", "accounts", "--database-url", "sqlite://app.db"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported database URL"));
}

#[test]
fn test_invalid_dialect_flag() {
    let dir = TempDir::new().unwrap();
    cmd(&dir)
        .args(["dto", "users", "-p", "accounts", "--dialect", "oracle"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid dialect 'oracle'"));
}
