// SPDX-FileCopyrightText: 2026 Toma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session-invalidation event bus.
//!
//! The browser client escaped a rejected session with a hard full-page
//! reload. Here the HTTP layer publishes an [`SessionEvent::Invalidated`]
//! instead and the front end subscribes, performing its own navigation.
//! Publishing with no subscribers is fine; the local clear has already
//! happened by then.

use tokio::sync::broadcast;
use tracing::debug;

/// Events emitted by the session layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The session was invalidated without the user asking for it (401 or
    /// refresh failure) and the store has been cleared. An explicit logout
    /// does not publish this.
    Invalidated { reason: String },
}

/// Broadcast bus for session events.
#[derive(Debug, Clone)]
pub struct SessionEvents {
    tx: broadcast::Sender<SessionEvent>,
}

impl SessionEvents {
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(16);
        Self { tx }
    }

    /// Subscribe to session events.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.tx.subscribe()
    }

    /// Publish an invalidation. Lagging or absent subscribers are ignored.
    pub fn invalidated(&self, reason: impl Into<String>) {
        let reason = reason.into();
        debug!(%reason, "session invalidated");
        let _ = self.tx.send(SessionEvent::Invalidated { reason });
    }
}

impl Default for SessionEvents {
    fn default() -> Self {
        Self::new()
    }
}
