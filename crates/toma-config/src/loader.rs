// SPDX-FileCopyrightText: 2026 Toma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./toma.toml` > `~/.config/toma/toma.toml` >
//! `/etc/toma/toma.toml` with environment variable overrides via the
//! `TOMA_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::TomaConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/toma/toma.toml` (system-wide)
/// 3. `~/.config/toma/toma.toml` (user XDG config)
/// 4. `./toma.toml` (local directory)
/// 5. `TOMA_*` environment variables
pub fn load_config() -> Result<TomaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TomaConfig::default()))
        .merge(Toml::file("/etc/toma/toma.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("toma/toma.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("toma.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<TomaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TomaConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<TomaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TomaConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `TOMA_API_BASE_URL` must map to
/// `api.base_url`, not `api.base.url`.
fn env_provider() -> Env {
    Env::prefixed("TOMA_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: TOMA_API_BASE_URL -> "api_base_url"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("api_", "api.", 1)
            .replacen("session_", "session.", 1)
            .replacen("log_", "log.", 1);
        mapped.into()
    })
}
