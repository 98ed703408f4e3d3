//! Drives the `oxide-rdb` binary against schema files.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

const V1: &str = r#"{
  "name": "shop",
  "tables": [
    {
      "name": "users",
      "columns": [
        { "name": "id", "sql_type": "integer", "primary_key": true },
        { "name": "name", "sql_type": "varchar", "length": 32, "sort_index": 1 }
      ]
    }
  ]
}"#;

const V2: &str = r#"{
  "name": "shop",
  "tables": [
    {
      "name": "users",
      "columns": [
        { "name": "id", "sql_type": "integer", "primary_key": true },
        { "name": "name", "sql_type": "varchar", "length": 64, "sort_index": 1 }
      ]
    },
    {
      "name": "orders",
      "columns": [{ "name": "id", "sql_type": "bigint", "primary_key": true }]
    }
  ]
}"#;

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_oxide-rdb"))
        .env_remove("OXIDE_RDB_DIALECT")
        .args(args)
        .output()
        .unwrap()
}

fn path(p: &Path) -> &str {
    p.to_str().unwrap()
}

#[test]
fn test_dialects_lists_builtins() {
    let output = run(&["dialects"]);
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.lines().collect::<Vec<_>>(), vec!["generic", "mssql", "mysql", "postgresql"]);
}

#[test]
fn test_create_prints_statements() {
    let dir = TempDir::new().unwrap();
    let schema = write(&dir, "v1.json", V1);
    let output = run(&["--dialect", "mssql", "create", "--schema", path(&schema)]);
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(
        stdout,
        "CREATE TABLE [users] (\n    [id] int NOT NULL,\n    [name] nvarchar(32),\n    PRIMARY KEY ([id])\n);\n"
    );
}

#[test]
fn test_dialect_from_environment() {
    let dir = TempDir::new().unwrap();
    let schema = write(&dir, "v1.json", V1);
    let output = Command::new(env!("CARGO_BIN_EXE_oxide-rdb"))
        .env("OXIDE_RDB_DIALECT", "mysql")
        .args(["create", "--schema", path(&schema)])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8(output.stdout).unwrap().starts_with("CREATE TABLE `users`"));
}

#[test]
fn test_diff_alters_and_creates() {
    let dir = TempDir::new().unwrap();
    let before = write(&dir, "v1.json", V1);
    let after = write(&dir, "v2.json", V2);
    let output = run(&[
        "--dialect",
        "postgres",
        "diff",
        "--before",
        path(&before),
        "--after",
        path(&after),
    ]);
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(
        stdout,
        "ALTER TABLE \"users\" ALTER COLUMN \"name\" TYPE varchar(64);\n\
         CREATE TABLE \"orders\" (\n    \"id\" bigint NOT NULL,\n    PRIMARY KEY (\"id\")\n);\n"
    );
}

#[test]
fn test_unknown_dialect_fails() {
    let dir = TempDir::new().unwrap();
    let schema = write(&dir, "v1.json", V1);
    let output = run(&["--dialect", "oracle", "create", "--schema", path(&schema)]);
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Unknown dialect 'oracle'"));
}

#[test]
fn test_unknown_table_fails() {
    let dir = TempDir::new().unwrap();
    let schema = write(&dir, "v1.json", V1);
    let output = run(&["create", "--schema", path(&schema), "--table", "invoices"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("invoices"));
}

#[test]
fn test_missing_file_fails() {
    let output = run(&["create", "--schema", "/nonexistent/schema.json"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Failed to read"));
}
