// SPDX-FileCopyrightText: 2026 Toma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Content-generation endpoints.
//!
//! The generation state machine is entirely server-side; this surface lists
//! jobs, triggers creation, and polls status. Two client-side loops live
//! here: a fixed-interval poll for a long-running job, and the bounded
//! fixed-delay retry that resolves a freshly-registered customer's id (the
//! backend assigns it asynchronously after signup).

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use toma_core::TomaError;
use tracing::debug;

use crate::client::{ApiClient, Envelope};
use crate::types::Paginated;

/// The automation flavor a job was submitted under.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PromptFor {
    Blog,
    Youtube,
    Topic,
    Launch,
}

/// Server-side job status; the client only ever reads it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum JobStatus {
    Idle,
    Queued,
    Processing,
    Completed,
    Failed,
}

impl JobStatus {
    /// True for statuses the server will not move away from on its own.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

/// A content-generation job as listed by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationJob {
    pub id: i64,
    pub customer_id: i64,
    pub prompt_for: PromptFor,
    pub url: String,
    #[serde(default)]
    pub title: Option<String>,
    pub status: JobStatus,
    #[serde(default)]
    pub last_run_at: Option<DateTime<Utc>>,
}

/// Filters for `GET /content-generations`.
#[derive(Debug, Default, Clone)]
pub struct GenerationQuery {
    pub customer_id: Option<i64>,
    pub prompt_for: Option<PromptFor>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub q: Option<String>,
}

impl GenerationQuery {
    fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(customer_id) = self.customer_id {
            pairs.push(("customer_id", customer_id.to_string()));
        }
        if let Some(prompt_for) = self.prompt_for {
            pairs.push(("prompt_for", prompt_for.to_string()));
        }
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(per_page) = self.per_page {
            pairs.push(("per_page", per_page.to_string()));
        }
        if let Some(q) = &self.q {
            pairs.push(("q", q.clone()));
        }
        pairs
    }
}

/// Payload for `POST /generate-contents`.
#[derive(Debug, Serialize)]
pub struct GenerateRequest {
    pub customer_id: i64,
    pub prompt_for: PromptFor,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl ApiClient {
    /// `GET /content-generations` with the given filters.
    pub async fn list_generations(
        &self,
        query: &GenerationQuery,
    ) -> Result<Paginated<GenerationJob>, TomaError> {
        self.get("/content-generations", &query.to_pairs(), Envelope::Bare)
            .await
    }

    /// `POST /generate-contents` — submit a source URL for generation.
    pub async fn generate(&self, request: &GenerateRequest) -> Result<GenerationJob, TomaError> {
        self.post("/generate-contents", request, Envelope::Key("data"))
            .await
    }

    /// `POST /customers/:cid/contents/:id/make-image` — request the image
    /// artifact for an already-generated content item.
    pub async fn make_image(
        &self,
        customer_id: i64,
        content_id: i64,
    ) -> Result<GenerationJob, TomaError> {
        self.post_empty(
            &format!("/customers/{customer_id}/contents/{content_id}/make-image"),
            Envelope::Key("data"),
        )
        .await
    }

    /// Polls the job list at a fixed interval until the job reaches a
    /// terminal status, up to `max_polls` attempts.
    ///
    /// A poll where the job is missing from the list counts as an attempt
    /// and polling continues; freshly-created jobs can lag the index.
    pub async fn wait_for_completion(
        &self,
        customer_id: i64,
        job_id: i64,
        interval: Duration,
        max_polls: u32,
    ) -> Result<GenerationJob, TomaError> {
        let query = GenerationQuery {
            customer_id: Some(customer_id),
            per_page: Some(100),
            ..GenerationQuery::default()
        };

        for poll in 1..=max_polls {
            let listing = self.list_generations(&query).await?;
            let job = listing.data.into_iter().find(|job| job.id == job_id);

            match job {
                Some(job) if job.status.is_terminal() => return Ok(job),
                Some(job) => {
                    debug!(job_id, status = %job.status, poll, "generation still running")
                }
                None => debug!(job_id, poll, "job not yet listed"),
            }

            if poll < max_polls {
                tokio::time::sleep(interval).await;
            }
        }

        Err(TomaError::Internal(format!(
            "generation job {job_id} did not finish within {max_polls} polls"
        )))
    }

    /// Resolves the signed-in user's customer id, retrying a bounded number
    /// of times with a fixed delay.
    ///
    /// Right after registration the profile can come back without a
    /// customer id; that is a transient here, not an error, until the
    /// attempts run out. Refresh failures are not transient and propagate
    /// immediately (they invalidate the session, same as a 401).
    pub async fn resolve_customer_id(
        &self,
        attempts: u32,
        delay: Duration,
    ) -> Result<i64, TomaError> {
        if let Some(id) = self.store().user().and_then(|u| u.customer_id) {
            return Ok(id);
        }

        for attempt in 1..=attempts {
            let user = self.refresh_user().await?;
            if let Some(id) = user.customer_id {
                return Ok(id);
            }
            debug!(attempt, attempts, "customer id not yet assigned");
            if attempt < attempts {
                tokio::time::sleep(delay).await;
            }
        }

        Err(TomaError::Internal(format!(
            "customer id was not assigned after {attempts} attempts"
        )))
    }
}

#[cfg(test)]
mod tests {
    use toma_core::Role;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::testing::{authed_client, test_user};

    fn job_json(id: i64, status: &str) -> serde_json::Value {
        serde_json::json!({
            "id": id, "customer_id": 42, "prompt_for": "blog",
            "url": "https://example.com/post", "title": "A post",
            "status": status, "last_run_at": "2026-08-01T10:00:00Z"
        })
    }

    #[tokio::test]
    async fn list_sends_filter_query_params() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/content-generations"))
            .and(query_param("customer_id", "42"))
            .and(query_param("prompt_for", "youtube"))
            .and(query_param("page", "2"))
            .and(query_param("per_page", "10"))
            .and(query_param("q", "launch plan"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [job_json(1, "completed")],
                "total": 1, "page": 2, "per_page": 10
            })))
            .expect(1)
            .mount(&server)
            .await;

        let (_dir, client) = authed_client(&server.uri(), Role::Customer).await;
        let query = GenerationQuery {
            customer_id: Some(42),
            prompt_for: Some(PromptFor::Youtube),
            page: Some(2),
            per_page: Some(10),
            q: Some("launch plan".into()),
        };
        let listing = client.list_generations(&query).await.unwrap();
        assert_eq!(listing.data.len(), 1);
        assert_eq!(listing.total, Some(1));
        assert_eq!(listing.data[0].status, JobStatus::Completed);
    }

    #[tokio::test]
    async fn generate_submits_and_returns_job() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate-contents"))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(serde_json::json!({"data": job_json(7, "queued")})),
            )
            .mount(&server)
            .await;

        let (_dir, client) = authed_client(&server.uri(), Role::Customer).await;
        let request = GenerateRequest {
            customer_id: 42,
            prompt_for: PromptFor::Blog,
            url: "https://example.com/post".into(),
            title: None,
        };
        let job = client.generate(&request).await.unwrap();
        assert_eq!(job.id, 7);
        assert_eq!(job.status, JobStatus::Queued);
    }

    #[tokio::test]
    async fn make_image_posts_under_the_customer_scope() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/customers/42/contents/7/make-image"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"data": job_json(7, "processing")})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let (_dir, client) = authed_client(&server.uri(), Role::Customer).await;
        let job = client.make_image(42, 7).await.unwrap();
        assert_eq!(job.status, JobStatus::Processing);
    }

    #[tokio::test]
    async fn wait_polls_until_terminal_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/content-generations"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [job_json(7, "processing")]
            })))
            .up_to_n_times(2)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/content-generations"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [job_json(7, "completed")]
            })))
            .mount(&server)
            .await;

        let (_dir, client) = authed_client(&server.uri(), Role::Customer).await;
        let job = client
            .wait_for_completion(42, 7, Duration::from_millis(5), 10)
            .await
            .unwrap();
        assert_eq!(job.status, JobStatus::Completed);
    }

    #[tokio::test]
    async fn wait_gives_up_after_max_polls() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/content-generations"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [job_json(7, "processing")]
            })))
            .expect(3)
            .mount(&server)
            .await;

        let (_dir, client) = authed_client(&server.uri(), Role::Customer).await;
        let err = client
            .wait_for_completion(42, 7, Duration::from_millis(1), 3)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("did not finish"), "got: {err}");
    }

    #[tokio::test]
    async fn resolve_customer_id_prefers_cached_snapshot() {
        let server = MockServer::start().await;
        // No /user mock mounted: a request would fail the test via the
        // resulting transport error.
        let (_dir, client) = authed_client(&server.uri(), Role::Customer).await;
        let id = client
            .resolve_customer_id(3, Duration::from_millis(1))
            .await
            .unwrap();
        assert_eq!(id, 42);
    }

    #[tokio::test]
    async fn resolve_customer_id_retries_until_assigned() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/user"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "user": {"id": 1, "name": "Ada", "email": "ada@example.com", "role": "customer"}
            })))
            .up_to_n_times(2)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/user"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "user": {"id": 1, "name": "Ada", "email": "ada@example.com", "role": "customer", "customer_id": 42}
            })))
            .mount(&server)
            .await;

        let (_dir, client) = authed_client(&server.uri(), Role::Customer).await;
        // Drop the cached customer id so the loop has to resolve it.
        let mut user = test_user(Role::Customer);
        user.customer_id = None;
        client.store().set_user(&user).unwrap();

        let id = client
            .resolve_customer_id(5, Duration::from_millis(1))
            .await
            .unwrap();
        assert_eq!(id, 42);
    }

    #[tokio::test]
    async fn resolve_customer_id_gives_up_after_bounded_attempts() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/user"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "user": {"id": 1, "name": "Ada", "email": "ada@example.com", "role": "customer"}
            })))
            .expect(3)
            .mount(&server)
            .await;

        let (_dir, client) = authed_client(&server.uri(), Role::Customer).await;
        let mut user = test_user(Role::Customer);
        user.customer_id = None;
        client.store().set_user(&user).unwrap();

        let err = client
            .resolve_customer_id(3, Duration::from_millis(1))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("not assigned"), "got: {err}");
    }
}
