//! Integration tests for the public configuration API.
//!
//! These tests exercise the crate the way an application does: build a schema
//! from the re-exported field constructors, point the loader at a directory of
//! env files, and consume the cleaned environment.

use envstage_config::{
    ConfigError, ConfigLoader, EnvError, EnvVars, Environment, Schema, ShowEnvironmentFiles,
    alias_names, bool, email, host, json, make_validator, node_env, num, port, str, url,
};
use serde::Deserialize;
use serde_json::json as json_value;
use std::fs;
use std::io::Write;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

fn env_dir(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    for (name, contents) in files {
        fs::write(dir.path().join(name), contents).expect("Failed to write env file");
    }
    dir
}

/// Test a realistic service schema loaded from prod + .env files.
#[test]
fn test_service_schema_end_to_end() {
    let dir = env_dir(&[
        (
            "prod",
            "PORT=443\nPUBLIC_URL=https://api.example.com\nFEATURE_FLAGS={\"beta\":false}\n",
        ),
        (
            ".env",
            "PORT=8080\nDB_HOST=db.internal\nADMIN_EMAIL=ops@example.com\nWORKERS=8\n",
        ),
    ]);
    let mut vars = EnvVars::from_pairs([("NODE_ENV", "production")]);

    let schema = Schema::new()
        .field("PORT", port())
        .field("PUBLIC_URL", url())
        .field("DB_HOST", host())
        .field("ADMIN_EMAIL", email())
        .field("WORKERS", num().choices([1, 2, 4, 8]))
        .field("FEATURE_FLAGS", json())
        .field("VERBOSE", bool().default(false));

    let env = ConfigLoader::new()
        .with_base_dir(dir.path())
        .configure_with(&mut vars, schema)
        .expect("should configure");

    assert_eq!(env.u16("PORT"), Some(443));
    assert_eq!(env.str("PUBLIC_URL"), Some("https://api.example.com"));
    assert_eq!(env.str("DB_HOST"), Some("db.internal"));
    assert_eq!(env.str("ADMIN_EMAIL"), Some("ops@example.com"));
    assert_eq!(env.i64("WORKERS"), Some(8));
    assert_eq!(env.get("FEATURE_FLAGS"), Some(&json_value!({"beta": false})));
    assert_eq!(env.bool("VERBOSE"), Some(false));
    assert_eq!(env.environment(), Some(Environment::Prod));
}

/// Test that every problem is reported in one error.
#[test]
fn test_all_failures_reported_together() {
    let dir = env_dir(&[(".env", "PORT=http\nADMIN_EMAIL=nobody\n")]);
    let mut vars = EnvVars::from_pairs([("NODE_ENV", "Production")]);

    let schema = Schema::new()
        .field("PORT", port())
        .field("ADMIN_EMAIL", email())
        .field("DATABASE_URL", url().desc("Primary database"));

    let err = ConfigLoader::new()
        .with_base_dir(dir.path())
        .configure_with(&mut vars, schema)
        .unwrap_err();

    let errors = match &err {
        ConfigError::Validation(errors) => errors,
        other => panic!("expected validation errors, got {other:?}"),
    };
    assert_eq!(errors.len(), 4);
    assert!(matches!(errors.get("PORT"), Some(EnvError::Invalid { .. })));
    assert!(matches!(errors.get("ADMIN_EMAIL"), Some(EnvError::Invalid { .. })));
    assert!(matches!(errors.get("DATABASE_URL"), Some(EnvError::Missing { .. })));
    // "Production" is not an accepted spelling.
    assert!(matches!(errors.get("NODE_ENV"), Some(EnvError::NotInChoices { .. })));

    let rendered = err.to_string();
    assert!(rendered.contains("Primary database"));
}

/// Test deserializing the cleaned environment into an application struct.
#[test]
fn test_deserialize_application_config() {
    #[derive(Debug, Deserialize)]
    struct AppConfig {
        #[serde(rename = "NODE_ENV")]
        node_env: String,
        #[serde(rename = "PORT")]
        port: u16,
        #[serde(rename = "LOG_LEVEL")]
        log_level: String,
    }

    let dir = env_dir(&[("test", "PORT=4000\n")]);
    let mut vars = EnvVars::from_pairs([("NODE_ENV", "TEST")]);

    let env = ConfigLoader::new()
        .with_base_dir(dir.path())
        .configure_with(
            &mut vars,
            Schema::new()
                .field("PORT", port())
                .field("LOG_LEVEL", str().choices(["debug", "info"]).test_only("debug")),
        )
        .unwrap();

    let config: AppConfig = env.deserialize().unwrap();
    assert_eq!(config.node_env, "TEST");
    assert_eq!(config.port, 4000);
    assert_eq!(config.log_level, "debug");
    assert!(env.is_test());
}

/// Test a custom validator re-exported at the crate root.
#[test]
fn test_make_validator_in_schema() {
    let duration_secs = make_validator(|raw| {
        let secs = raw
            .strip_suffix('s')
            .ok_or_else(|| "must end with 's'".to_string())?
            .parse::<u64>()
            .map_err(|_| "must be a whole number of seconds".to_string())?;
        Ok(secs.into())
    });

    let mut vars = EnvVars::from_pairs([("NODE_ENV", "dev"), ("TIMEOUT", "30s")]);
    let dir = env_dir(&[]);
    let env = ConfigLoader::new()
        .with_base_dir(dir.path())
        .configure_with(&mut vars, Schema::new().field("TIMEOUT", duration_secs))
        .unwrap();

    assert_eq!(env.u64("TIMEOUT"), Some(30));
}

/// Test that `node_env()` exposes every alias as a choice.
#[test]
fn test_node_env_choices_match_aliases() {
    let field = node_env(None);
    let choices: Vec<String> = field
        .choice_values()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap().to_string())
        .collect();
    assert_eq!(choices, alias_names());
}

#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Test that the show-files option emits one log line listing the resolved paths.
#[test]
fn test_show_environment_files_logs_paths() {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();

    let dir = env_dir(&[]);
    let mut vars = EnvVars::from_pairs([("NODE_ENV", "local")]);

    tracing::subscriber::with_default(subscriber, || {
        ConfigLoader::new()
            .with_base_dir(dir.path())
            .with_show_environment_files(ShowEnvironmentFiles::Labeled("worker".to_string()))
            .configure_with(&mut vars, Schema::new())
            .unwrap();
    });

    let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
    assert!(output.contains("environment files"), "{output}");
    assert!(output.contains("worker"), "{output}");
    assert!(output.contains(".env"), "{output}");
    assert!(
        output.contains(&dir.path().join("local").display().to_string()),
        "{output}"
    );
}

/// Test that reporting stays silent by default.
#[test]
fn test_show_environment_files_off_by_default() {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();

    let dir = env_dir(&[]);
    let mut vars = EnvVars::from_pairs([("NODE_ENV", "local")]);

    tracing::subscriber::with_default(subscriber, || {
        ConfigLoader::new()
            .with_base_dir(dir.path())
            .configure_with(&mut vars, Schema::new())
            .unwrap();
    });

    let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
    assert!(!output.contains("environment files"), "{output}");
}
