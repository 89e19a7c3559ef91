// SPDX-FileCopyrightText: 2026 Toma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration settings endpoints.
//!
//! Two scopes with the same shape: `/settings` holds the signed-in
//! customer's provider credentials, `/admin-settings` holds the
//! platform-wide defaults only admins may touch.

use serde::{Deserialize, Serialize};
use toma_core::TomaError;

use crate::client::{ApiClient, Envelope};

/// API credentials for the third-party content-generation and
/// social-publishing providers. Values are write-through; the backend
/// stores and uses them, the client only edits them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IntegrationSettings {
    #[serde(default)]
    pub content_api_key: Option<String>,
    #[serde(default)]
    pub content_api_url: Option<String>,
    #[serde(default)]
    pub social_api_key: Option<String>,
    #[serde(default)]
    pub social_api_url: Option<String>,
}

impl ApiClient {
    /// `GET /settings`
    pub async fn settings(&self) -> Result<IntegrationSettings, TomaError> {
        self.get("/settings", &[], Envelope::Key("data")).await
    }

    /// `PUT /settings`
    pub async fn update_settings(
        &self,
        settings: &IntegrationSettings,
    ) -> Result<IntegrationSettings, TomaError> {
        self.put("/settings", settings, Envelope::Key("data")).await
    }

    /// `GET /admin-settings`
    pub async fn admin_settings(&self) -> Result<IntegrationSettings, TomaError> {
        self.get("/admin-settings", &[], Envelope::Key("data")).await
    }

    /// `PUT /admin-settings`
    pub async fn update_admin_settings(
        &self,
        settings: &IntegrationSettings,
    ) -> Result<IntegrationSettings, TomaError> {
        self.put("/admin-settings", settings, Envelope::Key("data"))
            .await
    }
}
