//! Integration tests for `envstage files`.

mod common;

use common::{env_dir, envstage_cmd};
use predicates::prelude::*;

#[test]
fn test_files_lists_environment_file_then_dotenv() {
    let dir = env_dir(&[(".env", "PORT=8080\n")]);
    let base = dir.path().display().to_string();

    let output = envstage_cmd()
        .env("NODE_ENV", "production")
        .args(["--base-dir", &base, "files"])
        .output()
        .expect("Failed to run command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 3, "stdout: {}", stdout);
    assert_eq!(lines[0], "environment: prod");
    assert_eq!(
        lines[1],
        format!("{}\tmissing", dir.path().join("prod").display())
    );
    assert_eq!(lines[2], format!("{}\tfound", dir.path().join(".env").display()));
}

#[test]
fn test_files_without_node_env_lists_only_dotenv() {
    let dir = env_dir(&[]);

    envstage_cmd()
        .args(["files"])
        .arg("--base-dir")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("environment: none\n"))
        .stdout(predicate::str::contains(".env\tmissing"))
        .stdout(predicate::str::contains("\tmissing\n").count(1));
}

#[test]
fn test_files_unrecognized_node_env_is_unresolved() {
    let dir = env_dir(&[("staging", "A=1\n")]);

    envstage_cmd()
        .env("NODE_ENV", "staging")
        .arg("--base-dir")
        .arg(dir.path())
        .arg("files")
        .assert()
        .success()
        .stdout(predicate::str::contains("environment: none"))
        .stdout(predicate::str::contains("staging").not());
}

#[test]
fn test_files_base_dir_from_env_var() {
    let dir = env_dir(&[("local", "A=1\n")]);

    envstage_cmd()
        .env("NODE_ENV", "LOCAL")
        .env("ENVSTAGE_BASE_DIR", dir.path())
        .arg("files")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "{}\tfound",
            dir.path().join("local").display()
        )));
}

#[test]
fn test_files_defaults_to_working_directory() {
    let dir = env_dir(&[("dev", "A=1\n")]);

    envstage_cmd()
        .current_dir(dir.path())
        .env("NODE_ENV", "development")
        .arg("files")
        .assert()
        .success()
        .stdout(predicate::str::contains("environment: dev"))
        .stdout(predicate::str::contains("dev\tfound"));
}

#[test]
fn test_files_show_files_reports_on_stderr() {
    let dir = env_dir(&[]);

    envstage_cmd()
        .env("NODE_ENV", "prod")
        .arg("--base-dir")
        .arg(dir.path())
        .arg("--show-files=worker")
        .arg("files")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("environment: prod\n"))
        .stderr(predicate::str::contains("environment files"))
        .stderr(predicate::str::contains("worker"));
}

#[test]
fn test_files_is_quiet_without_show_files() {
    let dir = env_dir(&[]);

    envstage_cmd()
        .env("NODE_ENV", "prod")
        .arg("--base-dir")
        .arg(dir.path())
        .arg("files")
        .assert()
        .success()
        .stderr("");
}
