// SPDX-FileCopyrightText: 2026 Volley Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the volley configuration system.

use volley_config::{load_and_validate_str, load_config_from_str};

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_volley_config() {
    let toml = r#"
[storage]
database_path = "/tmp/test.db"

[sender]
pace_ms = 100
recheck_secs = 5
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.storage.database_path, "/tmp/test.db");
    assert_eq!(config.sender.pace_ms, 100);
    assert_eq!(config.sender.recheck_secs, 5);
}

/// Empty input yields the compiled defaults.
#[test]
fn empty_toml_uses_defaults() {
    let config = load_config_from_str("").expect("defaults should apply");
    assert_eq!(config.storage.database_path, "volley.db");
    assert_eq!(config.sender.pace_ms, 250);
    assert_eq!(config.sender.recheck_secs, 30);
}

/// A partial file overrides only what it names.
#[test]
fn partial_toml_keeps_remaining_defaults() {
    let toml = r#"
[sender]
pace_ms = 1000
"#;

    let config = load_config_from_str(toml).expect("partial TOML should deserialize");
    assert_eq!(config.sender.pace_ms, 1000);
    assert_eq!(config.sender.recheck_secs, 30);
    assert_eq!(config.storage.database_path, "volley.db");
}

/// Unknown field produces an error instead of being silently ignored.
#[test]
fn unknown_field_produces_error() {
    let toml = r#"
[storage]
databse_path = "/tmp/typo.db"
"#;

    let err = load_config_from_str(toml).expect_err("should reject unknown field");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("databse_path"),
        "error should mention the bad key, got: {err_str}"
    );
}

/// Validation rejects an empty database path.
#[test]
fn empty_database_path_fails_validation() {
    let toml = r#"
[storage]
database_path = ""
"#;

    let err = load_and_validate_str(toml).expect_err("empty path must fail validation");
    assert!(err.to_string().contains("database_path"));
}

/// Validation rejects a zero recheck interval.
#[test]
fn zero_recheck_interval_fails_validation() {
    let toml = r#"
[sender]
recheck_secs = 0
"#;

    let err = load_and_validate_str(toml).expect_err("zero interval must fail validation");
    assert!(err.to_string().contains("recheck_secs"));
}
