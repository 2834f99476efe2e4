//! Tests for the querygen configuration system.

use std::sync::Mutex;

use querygen_core::config::codegen_config::DEFAULT_RUNTIME_IMPORT_PATH;
use querygen_core::config::{CliOverrides, QuerygenConfig};
use querygen_core::errors::ConfigError;

/// Serializes tests that modify environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn tempdir() -> tempfile::TempDir {
    tempfile::TempDir::new().unwrap()
}

fn clear_querygen_env_vars() {
    for key in [
        "QUERYGEN_SCAN_THREADS",
        "QUERYGEN_SCAN_INCLUDE_TESTS",
        "QUERYGEN_CODEGEN_RUNTIME_IMPORT_PATH",
    ] {
        std::env::remove_var(key);
    }
}

#[test]
fn layered_resolution_cli_over_env_over_project() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_querygen_env_vars();

    let dir = tempdir();
    std::fs::write(
        dir.path().join("querygen.toml"),
        r#"
[scan]
threads = 2
include_tests = false

[codegen]
runtime_import_path = "example.com/project/interpolate"
"#,
    )
    .unwrap();

    std::env::set_var("QUERYGEN_SCAN_THREADS", "6");
    std::env::set_var("QUERYGEN_SCAN_INCLUDE_TESTS", "true");

    let cli = CliOverrides {
        scan_threads: Some(12),
        ..Default::default()
    };
    let config = QuerygenConfig::load(dir.path(), Some(&cli)).unwrap();

    assert_eq!(config.scan.threads, Some(12));
    assert_eq!(config.scan.include_tests, Some(true));
    assert_eq!(
        config.codegen.effective_runtime_import_path(),
        "example.com/project/interpolate"
    );

    clear_querygen_env_vars();
}

#[test]
fn missing_project_file_falls_back_to_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_querygen_env_vars();

    let dir = tempdir();
    let config = QuerygenConfig::load(dir.path(), None).unwrap();

    assert_eq!(config.scan.threads, None);
    assert!(config.scan.effective_include_tests());
    assert!(config.scan.effective_respect_gitignore());
    assert!(!config.scan.effective_follow_symlinks());
    assert_eq!(
        config.codegen.effective_runtime_import_path(),
        DEFAULT_RUNTIME_IMPORT_PATH
    );
}

#[test]
fn invalid_toml_is_a_parse_error() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_querygen_env_vars();

    let dir = tempdir();
    std::fs::write(dir.path().join("querygen.toml"), "[scan\nthreads = ").unwrap();

    let err = QuerygenConfig::load(dir.path(), None).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }), "got {err:?}");
}

#[test]
fn zero_threads_fails_validation() {
    let config = QuerygenConfig::from_toml("[scan]\nthreads = 0\n").unwrap();
    let err = QuerygenConfig::validate(&config).unwrap_err();
    match err {
        ConfigError::ValidationFailed { field, .. } => assert_eq!(field, "scan.threads"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn runtime_import_path_with_quote_fails_validation() {
    let config =
        QuerygenConfig::from_toml("[codegen]\nruntime_import_path = 'bad\"path'\n").unwrap();
    assert!(QuerygenConfig::validate(&config).is_err());
}

#[test]
fn unknown_keys_are_ignored() {
    let config = QuerygenConfig::from_toml(
        r#"
[scan]
threads = 3
future_option = "x"

[something_else]
key = 1
"#,
    )
    .unwrap();
    assert_eq!(config.scan.threads, Some(3));
}

#[test]
fn config_round_trips_through_toml() {
    let config = QuerygenConfig::from_toml(
        r#"
[scan]
extra_ignore = ["gen/**"]
"#,
    )
    .unwrap();
    let text = config.to_toml().unwrap();
    let again = QuerygenConfig::from_toml(&text).unwrap();
    assert_eq!(again.scan.extra_ignore, vec!["gen/**".to_string()]);
}
