// SPDX-FileCopyrightText: 2026 Toma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the TOMA client workspace.
//!
//! Provides the shared error type, the session token shape (including the
//! one-shot corruption repair), and the domain types every other crate in
//! the workspace builds on.

pub mod error;
pub mod token;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::TomaError;
pub use token::{SessionToken, TOKEN_SEPARATOR};
pub use types::{Role, Route, SessionUser};
