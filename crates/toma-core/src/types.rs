// SPDX-FileCopyrightText: 2026 Toma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared across the TOMA client workspace.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// The role carried by a user profile.
///
/// The role is the sole authority for route-gating decisions; no other
/// profile claim (activation flag included) is enforced client-side.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    Admin,
    Customer,
    User,
}

/// Denormalized snapshot of the signed-in user, mirrored from the last
/// successful login or profile refresh.
///
/// Always replaced wholesale, never patched field-by-field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub customer_id: Option<i64>,
}

/// The client route surface. Redirect decisions are expressed in these
/// terms so guard behavior stays testable without a front end attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Public landing / login screen.
    Landing,
    /// Regular-user home.
    Dashboard,
    /// Customer home.
    Customer,
    /// Admin home.
    Admin,
}

impl Route {
    /// The path string for this route.
    pub fn as_path(self) -> &'static str {
        match self {
            Self::Landing => "/",
            Self::Dashboard => "/dashboard",
            Self::Customer => "/customer",
            Self::Admin => "/admin",
        }
    }

    /// The home route for a role, or the landing page when no user is
    /// signed in.
    ///
    /// Single source of truth for every post-login and unauthorized-access
    /// redirect.
    pub fn home_for(role: Option<Role>) -> Self {
        match role {
            None => Self::Landing,
            Some(Role::Admin) => Self::Admin,
            Some(Role::Customer) => Self::Customer,
            Some(Role::User) => Self::Dashboard,
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_path())
    }
}
