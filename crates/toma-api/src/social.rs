// SPDX-FileCopyrightText: 2026 Toma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Social composer/queue/connection endpoints.
//!
//! OAuth linking and actual publishing are server-side; the client lists
//! connections, composes posts, and triggers queue/retry transitions on
//! the server's per-network publish attempts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use toma_core::TomaError;

use crate::client::{ApiClient, Envelope};

/// An OAuth-linked social account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialConnection {
    pub id: i64,
    pub provider: String,
    pub account_name: String,
    #[serde(default)]
    pub connected_at: Option<DateTime<Utc>>,
}

/// Per-network publish attempt status, owned by the server.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TargetStatus {
    Queued,
    Publishing,
    Published,
    Failed,
    Skipped,
}

/// One publish attempt of a post on one network.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostTarget {
    pub id: i64,
    pub post_id: i64,
    pub provider: String,
    pub status: TargetStatus,
    #[serde(default)]
    pub retry_count: u32,
    #[serde(default)]
    pub error: Option<String>,
}

/// A composed social post with its per-network targets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialPost {
    pub id: i64,
    pub customer_id: i64,
    pub body: String,
    #[serde(default)]
    pub scheduled_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub targets: Vec<PostTarget>,
}

/// Payload for composing a post.
#[derive(Debug, Serialize)]
pub struct NewPost {
    pub body: String,
    /// Provider names to publish on, each becoming a target.
    pub providers: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<DateTime<Utc>>,
}

/// `GET /oauth/:provider/redirect` response.
#[derive(Debug, Deserialize)]
struct OauthRedirect {
    url: String,
}

impl ApiClient {
    /// `GET /social/connections`
    pub async fn list_connections(&self) -> Result<Vec<SocialConnection>, TomaError> {
        self.get("/social/connections", &[], Envelope::Key("data"))
            .await
    }

    /// `DELETE /social/connections/:id`
    pub async fn delete_connection(&self, id: i64) -> Result<(), TomaError> {
        self.delete(&format!("/social/connections/{id}")).await
    }

    /// `GET /social/posts`
    pub async fn list_posts(&self) -> Result<Vec<SocialPost>, TomaError> {
        self.get("/social/posts", &[], Envelope::Key("data")).await
    }

    /// `POST /social/posts`
    pub async fn create_post(&self, post: &NewPost) -> Result<SocialPost, TomaError> {
        self.post("/social/posts", post, Envelope::Key("data")).await
    }

    /// `POST /social/posts/:id/queue` — hand the post to the publish queue.
    pub async fn queue_post(&self, id: i64) -> Result<SocialPost, TomaError> {
        self.post_empty(&format!("/social/posts/{id}/queue"), Envelope::Key("data"))
            .await
    }

    /// `POST /social/targets/:id/retry` — retry one failed network attempt.
    pub async fn retry_target(&self, id: i64) -> Result<PostTarget, TomaError> {
        self.post_empty(&format!("/social/targets/{id}/retry"), Envelope::Key("data"))
            .await
    }

    /// `GET /oauth/:provider/redirect` — the provider authorization URL the
    /// user must open in a browser. The token exchange happens server-side.
    pub async fn oauth_redirect_url(&self, provider: &str) -> Result<String, TomaError> {
        let redirect: OauthRedirect = self
            .get(&format!("/oauth/{provider}/redirect"), &[], Envelope::Bare)
            .await?;
        Ok(redirect.url)
    }
}
