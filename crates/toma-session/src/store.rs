// SPDX-FileCopyrightText: 2026 Toma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! File-backed session store.
//!
//! Persists exactly two values: the bearer session token and the serialized
//! user-profile snapshot. Absence is always represented as `None`, never as
//! an error; a missing or corrupt session file simply reads as signed-out.
//!
//! Concurrent processes can race on the file (mirror of two browser tabs
//! racing on logout/login). No locking: the damage is self-correcting,
//! since the next authenticated call gets a 401 and re-clears the store.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use toma_core::{SessionToken, SessionUser, TomaError};
use tracing::{debug, warn};

/// On-disk shape of the session file.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredSession {
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    user: Option<SessionUser>,
}

/// Durable store for the session token and cached user snapshot.
#[derive(Debug)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Opens a store backed by the given file path. The file is created
    /// lazily on first write.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the stored token if it is validly shaped, silently attempting
    /// the one-character repair and re-persisting the repaired value.
    ///
    /// Returns `None` when no token is stored or when repair does not yield
    /// a valid shape.
    pub fn token(&self) -> Option<SessionToken> {
        let mut stored = self.read();
        let raw = stored.token.take()?;
        let token = SessionToken::parse_or_repair(&raw)?;

        if token.as_str() != raw {
            debug!("repaired corrupted session token, re-persisting");
            stored.token = Some(token.as_str().to_string());
            // Best effort: a failed rewrite leaves the corrupt value in
            // place and the repair runs again on the next read.
            if let Err(err) = self.write(&stored) {
                warn!(error = %err, "failed to persist repaired token");
            }
        }

        Some(token)
    }

    /// Stores the token, keeping the user snapshot untouched.
    pub fn set_token(&self, token: &SessionToken) -> Result<(), TomaError> {
        let mut stored = self.read();
        stored.token = Some(token.as_str().to_string());
        self.write(&stored)
    }

    /// Returns the cached user snapshot, or `None` when absent or unreadable.
    pub fn user(&self) -> Option<SessionUser> {
        self.read().user
    }

    /// Replaces the user snapshot wholesale.
    pub fn set_user(&self, user: &SessionUser) -> Result<(), TomaError> {
        let mut stored = self.read();
        stored.user = Some(user.clone());
        self.write(&stored)
    }

    /// Persists token and user together, as done on a successful login.
    pub fn set_session(&self, token: &SessionToken, user: &SessionUser) -> Result<(), TomaError> {
        self.write(&StoredSession {
            token: Some(token.as_str().to_string()),
            user: Some(user.clone()),
        })
    }

    /// Removes both stored values. A missing file already counts as cleared.
    pub fn clear(&self) -> Result<(), TomaError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(TomaError::Store {
                source: Box::new(err),
            }),
        }
    }

    fn read(&self) -> StoredSession {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return StoredSession::default()
            }
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "unreadable session file");
                return StoredSession::default();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(stored) => stored,
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "corrupt session file, treating as signed out");
                StoredSession::default()
            }
        }
    }

    fn write(&self, stored: &StoredSession) -> Result<(), TomaError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|err| TomaError::Store {
                source: Box::new(err),
            })?;
        }
        let raw = serde_json::to_string(stored).map_err(|err| TomaError::Store {
            source: Box::new(err),
        })?;
        fs::write(&self.path, raw).map_err(|err| TomaError::Store {
            source: Box::new(err),
        })
    }
}
