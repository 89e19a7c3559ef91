// SPDX-FileCopyrightText: 2026 Toma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as a well-formed base URL and usable retry bounds.

use crate::diagnostic::ConfigError;
use crate::model::TomaConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &TomaConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let base_url = config.api.base_url.trim();
    if base_url.is_empty() {
        errors.push(ConfigError::Validation {
            message: "api.base_url must not be empty".to_string(),
        });
    } else if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
        errors.push(ConfigError::Validation {
            message: format!("api.base_url `{base_url}` must start with http:// or https://"),
        });
    }

    if config.api.timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "api.timeout_secs must be at least 1".to_string(),
        });
    }

    if config.api.poll_interval_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "api.poll_interval_secs must be at least 1".to_string(),
        });
    }

    if config.api.customer_id_retry_attempts == 0 {
        errors.push(ConfigError::Validation {
            message: "api.customer_id_retry_attempts must be at least 1".to_string(),
        });
    }

    if config.session.store_path.as_os_str().is_empty() {
        errors.push(ConfigError::Validation {
            message: "session.store_path must not be empty".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&TomaConfig::default()).is_ok());
    }

    #[test]
    fn rejects_schemeless_base_url() {
        let mut config = TomaConfig::default();
        config.api.base_url = "app.example.com/api".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.to_string().contains("api.base_url")));
    }

    #[test]
    fn collects_all_errors() {
        let mut config = TomaConfig::default();
        config.api.base_url = String::new();
        config.api.poll_interval_secs = 0;
        config.api.customer_id_retry_attempts = 0;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
