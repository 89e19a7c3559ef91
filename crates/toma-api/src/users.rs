// SPDX-FileCopyrightText: 2026 Toma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! User administration endpoints.

use serde::Serialize;
use toma_core::{SessionUser, TomaError};

use crate::client::{ApiClient, Envelope};
use crate::types::Paginated;

/// Fields an admin may change on a user account.
#[derive(Debug, Default, Serialize)]
pub struct UpdateUser {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl ApiClient {
    /// `GET /users` — paginated account listing.
    pub async fn list_users(
        &self,
        page: Option<u32>,
        per_page: Option<u32>,
    ) -> Result<Paginated<SessionUser>, TomaError> {
        let mut query = Vec::new();
        if let Some(page) = page {
            query.push(("page", page.to_string()));
        }
        if let Some(per_page) = per_page {
            query.push(("per_page", per_page.to_string()));
        }
        self.get("/users", &query, Envelope::Bare).await
    }

    /// `GET /users/:id`
    pub async fn user(&self, id: i64) -> Result<SessionUser, TomaError> {
        self.get(&format!("/users/{id}"), &[], Envelope::Key("data"))
            .await
    }

    /// `PUT /users/:id`
    pub async fn update_user(&self, id: i64, update: &UpdateUser) -> Result<SessionUser, TomaError> {
        self.put(&format!("/users/{id}"), update, Envelope::Key("data"))
            .await
    }

    /// `POST /users/:id/reset-password` — triggers a server-side reset mail.
    pub async fn reset_password(&self, id: i64) -> Result<(), TomaError> {
        self.post_unit(&format!("/users/{id}/reset-password")).await
    }
}
