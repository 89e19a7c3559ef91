// SPDX-FileCopyrightText: 2026 Toma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Route guards.
//!
//! Each guard is a pure decision over the resolver's output. A mismatched
//! role is silently rerouted to its own home, never to an error page.

use toma_core::{Role, Route};

use crate::resolver::SessionResolver;

/// Outcome of a guard check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Render the wrapped view / run the wrapped action.
    Allow,
    /// Do not render; send the visitor to this route instead.
    Redirect(Route),
}

impl GuardOutcome {
    pub fn is_allowed(self) -> bool {
        self == Self::Allow
    }
}

/// Protected path: anonymous visitors are sent to the landing page.
pub fn require_auth(resolver: &SessionResolver) -> GuardOutcome {
    if resolver.is_authenticated() {
        GuardOutcome::Allow
    } else {
        GuardOutcome::Redirect(Route::Landing)
    }
}

/// Role-gated path: anonymous visitors go to the landing page, and an
/// authenticated visitor of a different role goes to that role's own home.
pub fn require_role(resolver: &SessionResolver, required: Role) -> GuardOutcome {
    match require_auth(resolver) {
        GuardOutcome::Redirect(route) => GuardOutcome::Redirect(route),
        GuardOutcome::Allow => {
            if resolver.current_role() == Some(required) {
                GuardOutcome::Allow
            } else {
                GuardOutcome::Redirect(resolver.default_route())
            }
        }
    }
}

/// Public-only path (landing/login): an already-authenticated visitor is
/// sent to their home route.
pub fn public_only(resolver: &SessionResolver) -> GuardOutcome {
    if resolver.is_authenticated() {
        GuardOutcome::Redirect(resolver.default_route())
    } else {
        GuardOutcome::Allow
    }
}
