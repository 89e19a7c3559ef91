// SPDX-FileCopyrightText: 2026 Toma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the TOMA client configuration system.

use toma_config::{load_and_validate_str, load_config_from_str, ConfigError};

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_toma_config() {
    let toml = r#"
[api]
base_url = "https://app.example.com/api"
timeout_secs = 10
poll_interval_secs = 2
customer_id_retry_attempts = 3
customer_id_retry_delay_ms = 250

[session]
store_path = "/tmp/toma-session.json"

[log]
level = "debug"
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.api.base_url, "https://app.example.com/api");
    assert_eq!(config.api.timeout_secs, 10);
    assert_eq!(config.api.poll_interval_secs, 2);
    assert_eq!(config.api.customer_id_retry_attempts, 3);
    assert_eq!(config.api.customer_id_retry_delay_ms, 250);
    assert_eq!(
        config.session.store_path.to_string_lossy(),
        "/tmp/toma-session.json"
    );
    assert_eq!(config.log.level, "debug");
}

/// Missing sections fall back to compiled defaults.
#[test]
fn missing_sections_use_defaults() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");
    assert_eq!(config.api.base_url, "http://localhost:8000/api");
    assert_eq!(config.api.customer_id_retry_attempts, 5);
    assert_eq!(config.log.level, "info");
}

/// Unknown field in [api] section produces an UnknownField error.
#[test]
fn unknown_field_in_api_produces_error() {
    let toml = r#"
[api]
base_ulr = "https://app.example.com/api"
"#;

    let err = load_config_from_str(toml).expect_err("should reject unknown field");
    let err_str = format!("{err}");
    // Figment wraps serde's deny_unknown_fields error
    assert!(
        err_str.contains("unknown field") || err_str.contains("base_ulr"),
        "error should mention unknown field or the bad key, got: {err_str}"
    );
}

/// The validated entry point surfaces a typo suggestion for unknown keys.
#[test]
fn typo_gets_did_you_mean_suggestion() {
    let toml = r#"
[api]
base_ulr = "https://app.example.com/api"
"#;

    let errors = load_and_validate_str(toml).expect_err("should reject unknown field");
    let has_suggestion = errors.iter().any(|e| {
        matches!(
            e,
            ConfigError::UnknownKey { suggestion: Some(s), .. } if s == "base_url"
        )
    });
    assert!(has_suggestion, "expected a base_url suggestion, got: {errors:?}");
}

/// Semantic validation runs after deserialization.
#[test]
fn validation_rejects_zero_retry_attempts() {
    let toml = r#"
[api]
customer_id_retry_attempts = 0
"#;

    let errors = load_and_validate_str(toml).expect_err("should fail validation");
    assert!(errors
        .iter()
        .any(|e| e.to_string().contains("customer_id_retry_attempts")));
}

/// Wrong value type produces an InvalidType diagnostic.
#[test]
fn wrong_type_produces_invalid_type_error() {
    let toml = r#"
[api]
timeout_secs = "fast"
"#;

    let errors = load_and_validate_str(toml).expect_err("should reject wrong type");
    assert!(
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::InvalidType { .. })
                || matches!(e, ConfigError::Other(_))),
        "expected a type error, got: {errors:?}"
    );
}
