// SPDX-FileCopyrightText: 2026 Toma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session token shape validation and repair.
//!
//! The backend issues bearer tokens of the form `identifier|secret`. A token
//! without the `|` separator is unusable for authenticated calls. Some stored
//! tokens arrive with the separator replaced by a single stray `}` (upstream
//! corruption, tracked as a backend defect — see DESIGN.md); [`SessionToken`]
//! performs a one-shot substitution before rejecting such a token.

use serde::{Deserialize, Serialize};

/// The separator the backend uses between the token identifier and secret.
pub const TOKEN_SEPARATOR: char = '|';

/// The stray character observed in corrupted stored tokens.
const STRAY_SEPARATOR: char = '}';

/// A validly-shaped bearer session token.
///
/// Construction goes through [`SessionToken::parse`] or
/// [`SessionToken::parse_or_repair`], so holding a `SessionToken` implies the
/// `identifier|secret` shape with both halves non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    /// Parses a raw token string, accepting only the `identifier|secret` shape.
    pub fn parse(raw: &str) -> Option<Self> {
        let (id, secret) = raw.split_once(TOKEN_SEPARATOR)?;
        if id.is_empty() || secret.is_empty() {
            return None;
        }
        Some(Self(raw.to_string()))
    }

    /// Parses a raw token string, attempting the one-character repair first
    /// when the separator is missing.
    ///
    /// The repair substitutes a single stray `}` back to `|`; a token with no
    /// separator and zero or multiple stray characters stays invalid. The
    /// caller decides whether a repaired value needs re-persisting (compare
    /// [`as_str`](Self::as_str) against the raw input).
    pub fn parse_or_repair(raw: &str) -> Option<Self> {
        if raw.contains(TOKEN_SEPARATOR) {
            return Self::parse(raw);
        }
        if raw.matches(STRAY_SEPARATOR).count() != 1 {
            return None;
        }
        Self::parse(&raw.replace(STRAY_SEPARATOR, &TOKEN_SEPARATOR.to_string()))
    }

    /// The token identifier (the part before the separator).
    pub fn identifier(&self) -> &str {
        self.0
            .split_once(TOKEN_SEPARATOR)
            .map(|(id, _)| id)
            .unwrap_or_default()
    }

    /// The full token string, as sent in the `Authorization` header.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionToken {
    /// Redacts the secret half; tokens must never land in logs verbatim.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}***", self.identifier(), TOKEN_SEPARATOR)
    }
}
