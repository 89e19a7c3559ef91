// SPDX-FileCopyrightText: 2026 Toma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session layer for the TOMA client.
//!
//! Wraps the two persisted session values (bearer token, user snapshot) in a
//! file-backed [`SessionStore`], derives identity facts via
//! [`SessionResolver`], gates navigation with pure route guards, and carries
//! invalidation notifications over a broadcast [`SessionEvents`] bus.

pub mod events;
pub mod guard;
pub mod resolver;
pub mod store;

pub use events::{SessionEvent, SessionEvents};
pub use guard::{public_only, require_auth, require_role, GuardOutcome};
pub use resolver::SessionResolver;
pub use store::SessionStore;
