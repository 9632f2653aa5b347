//! Integration tests for dotenv failure handling in the CLI.
//!
//! Responsibilities:
//! - Prove that invalid env files make `check` fail with a general error.
//! - Prove that error messages do not leak secrets from the env file.
//! - Ensure DOTENV_DISABLED=1 lets `check` skip a malformed file.

mod common;

use common::{env_dir, envstage_cmd, fixture};
use predicates::prelude::*;

#[test]
fn test_invalid_dotenv_causes_cli_failure() {
    let dir = env_dir(&[("schema.json", "{}"), (".env", "INVALID_LINE_WITHOUT_EQUALS")]);

    envstage_cmd()
        .current_dir(dir.path())
        .env("NODE_ENV", "prod")
        .arg("check")
        .arg("--schema")
        .arg(fixture(&dir, "schema.json"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains(".env"))
        .stderr(predicate::str::contains("DOTENV_DISABLED=1"));
}

#[test]
fn test_invalid_environment_file_does_not_leak_secrets() {
    let secret_value = "supersecret_cli_token_12345";
    let dir = env_dir(&[
        ("schema.json", "{}"),
        ("prod", &format!("API_TOKEN={}\nINVALID_LINE", secret_value)),
    ]);

    let output = envstage_cmd()
        .env("NODE_ENV", "prod")
        .arg("--base-dir")
        .arg(dir.path())
        .arg("check")
        .arg("--schema")
        .arg(fixture(&dir, "schema.json"))
        .output()
        .expect("Failed to run command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Failed to parse env file"),
        "Expected a parse error. stderr: {}",
        stderr
    );
    assert!(
        !stderr.contains(secret_value),
        "Error message should NOT contain the secret value. stderr: {}",
        stderr
    );
}

#[test]
fn test_dotenv_disabled_skips_invalid_file() {
    let dir = env_dir(&[("schema.json", "{}"), (".env", "INVALID_LINE_WITHOUT_EQUALS")]);

    envstage_cmd()
        .env("NODE_ENV", "prod")
        .env("DOTENV_DISABLED", "1")
        .arg("--base-dir")
        .arg(dir.path())
        .arg("check")
        .arg("--schema")
        .arg(fixture(&dir, "schema.json"))
        .assert()
        .success()
        .stdout("NODE_ENV=prod\n");
}
