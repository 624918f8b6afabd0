//! Runs the `haiku` binary against temporary projects.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::{tempdir, TempDir};

fn project() -> TempDir {
    let temp = tempdir().unwrap();
    let env_dir = temp.path().join("environments/prod");
    fs::create_dir_all(&env_dir).unwrap();
    fs::write(
        env_dir.join("main.jsonnet"),
        r#"{
            ns: { apiVersion: 'v1', kind: 'Namespace', metadata: { name: 'prod' } },
            svc: {
                apiVersion: 'v1',
                kind: 'ServiceList',
                items: [{ metadata: { name: 'web', namespace: 'prod' } }],
            },
        }"#,
    )
    .unwrap();
    temp
}

fn haiku(root: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_haiku"))
        .arg("--root")
        .arg(root)
        .args(args)
        .env_remove("HAIKU_CONFIG")
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

#[test]
fn test_list() {
    let temp = project();
    let output = haiku(temp.path(), &["list", "prod"]);

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout, "v1 Namespace prod\nv1 Service prod/web\n");
}

#[test]
fn test_show_json() {
    let temp = project();
    let output = haiku(temp.path(), &["show", "prod", "-o", "json"]);

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let kinds: Vec<_> = value
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["kind"].as_str().unwrap())
        .collect();
    assert_eq!(kinds, vec!["Namespace", "Service"]);
}

#[test]
fn test_show_yaml_stream() {
    let temp = project();
    let output = haiku(temp.path(), &["show", "prod"]);

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.matches("---\n").count(), 1);
    assert!(stdout.contains("kind: Namespace"));
}

#[test]
fn test_eval_prints_raw_json() {
    let temp = project();
    let output = haiku(temp.path(), &["eval", "prod"]);

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["svc"]["kind"], "ServiceList");
}

#[test]
fn test_missing_environment_exit_code() {
    let temp = project();
    let output = haiku(temp.path(), &["show", "staging"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_evaluation_error_exit_code() {
    let temp = project();
    fs::write(
        temp.path().join("environments/prod/main.jsonnet"),
        "error 'bad environment'",
    )
    .unwrap();

    let output = haiku(temp.path(), &["show", "prod"]);
    assert_eq!(output.status.code(), Some(3));
    assert!(String::from_utf8_lossy(&output.stderr).contains("bad environment"));
}

#[test]
fn test_structure_error_exit_code() {
    let temp = project();
    fs::write(temp.path().join("environments/prod/main.jsonnet"), "[1, 2]").unwrap();

    let output = haiku(temp.path(), &["list", "prod"]);
    assert_eq!(output.status.code(), Some(4));
}
