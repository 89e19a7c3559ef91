// SPDX-FileCopyrightText: 2026 Toma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the TOMA client.

use thiserror::Error;

/// The primary error type used across the TOMA client workspace.
#[derive(Debug, Error)]
pub enum TomaError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Transport-level HTTP errors (connection refused, timeout, malformed response).
    #[error("http error: {message}")]
    Http {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The server rejected the session (HTTP 401). The local session has
    /// already been cleared by the time this error is returned. Never retried.
    #[error("not authenticated")]
    Unauthenticated,

    /// Any other non-2xx response, carrying the human-readable message
    /// extracted from the error body.
    #[error("api error ({status}): {message}")]
    Api { status: u16, message: String },

    /// A session token that does not match the `identifier|secret` shape
    /// even after repair.
    #[error("invalid session token")]
    InvalidToken,

    /// Session store errors (unreadable file, failed write).
    #[error("session store error: {source}")]
    Store {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl TomaError {
    /// The inline message a view/command should display for this error.
    ///
    /// Mirrors the server's own wording for API failures and falls back to
    /// the canonical Display form otherwise.
    pub fn display_message(&self) -> String {
        match self {
            Self::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}
