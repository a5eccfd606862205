//! Offline tests for the s3-client binary
//!
//! None of these reach a storage service: they cover flag handling,
//! configuration discovery, and failures that happen before any remote call.

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

/// Run s3-client in an isolated working and home directory
fn run(args: &[&str], dir: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_s3-client"))
        .args(args)
        .current_dir(dir)
        .env("HOME", dir)
        .env("AWS_EC2_METADATA_DISABLED", "true")
        .env_remove("S3_CLIENT_CONFIG")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute s3-client")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn write_config(dir: &Path, name: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(
        &path,
        r#"
access_key_id = "AKIAEXAMPLE"
secret_access_key = "secret"
region = "us-east-1"
bucket = "test"
endpoint = "http://127.0.0.1:9"
returnurl = "https://cdn.example.com"
"#,
    )
    .unwrap();
    path
}

#[test]
fn test_no_action_prints_guidance() {
    let dir = TempDir::new().unwrap();
    let output = run(&[], dir.path());

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("No file specified for upload"));
}

#[test]
fn test_missing_config() {
    let dir = TempDir::new().unwrap();
    let output = run(&["-list"], dir.path());

    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert!(out.starts_with("Error:"), "{out}");
    assert!(out.contains("No config file found"), "{out}");
}

#[test]
fn test_explicit_config_missing() {
    let dir = TempDir::new().unwrap();
    let output = run(&["-list", "-config", "nope.toml"], dir.path());

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("Config file not found: nope.toml"));
}

#[test]
fn test_malformed_config() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("s3config.toml"), "bucket = [").unwrap();
    let output = run(&["-list"], dir.path());

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("Error: Invalid config file"));
}

#[test]
fn test_user_config_dir_is_searched() {
    let dir = TempDir::new().unwrap();
    let user_dir = dir.path().join(".config").join("s3-client");
    std::fs::create_dir_all(&user_dir).unwrap();
    write_config(&user_dir, "s3config.toml");

    let output = run(&["-file", "missing.png"], dir.path());

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("File does not exist: missing.png"));
}

#[test]
fn test_upload_missing_file_fails_before_remote_call() {
    let dir = TempDir::new().unwrap();
    write_config(dir.path(), "s3config.toml");

    let output = run(&["-file", "missing.png", "-directory", "/pics"], dir.path());

    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert_eq!(out.trim(), "Error: File does not exist: missing.png");
}

#[test]
fn test_help() {
    let dir = TempDir::new().unwrap();
    let output = run(&["-help"], dir.path());

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("--file"));
    assert!(out.contains("--force-path-style"));
}
