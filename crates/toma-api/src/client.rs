// SPDX-FileCopyrightText: 2026 Toma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The single configured HTTP access layer for the TOMA backend.
//!
//! Every endpoint surface in this crate goes through [`ApiClient`]: one
//! reqwest client carrying the JSON content headers, bearer-token injection
//! from the session store, 401-to-invalidation handling, and error-body
//! normalization. The backend is inconsistent about response envelopes
//! (`{data: …}` vs `{user: …}` vs bare objects), so each endpoint states its
//! [`Envelope`] contract explicitly and unwrapping happens once, here.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use toma_config::ApiConfig;
use toma_core::{SessionToken, TomaError};
use toma_session::{SessionEvents, SessionStore};
use tracing::{debug, warn};

/// Response envelope contract for an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Envelope {
    /// The payload is the response body itself.
    Bare,
    /// The payload is boxed under this top-level key.
    Key(&'static str),
}

/// HTTP client for the TOMA backend.
///
/// Cheap to clone; the underlying reqwest client is pooled.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    store: Arc<SessionStore>,
    events: SessionEvents,
}

impl ApiClient {
    /// Creates a client for the configured backend, reading and clearing
    /// session state through `store` and publishing invalidations on `events`.
    pub fn new(
        config: &ApiConfig,
        store: Arc<SessionStore>,
        events: SessionEvents,
    ) -> Result<Self, TomaError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TomaError::Http {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            store,
            events,
        })
    }

    /// The session store this client reads its bearer token from.
    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    /// The event bus 401 invalidations are published on.
    pub fn events(&self) -> &SessionEvents {
        &self.events
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        envelope: Envelope,
    ) -> Result<T, TomaError> {
        let body = self.execute(Method::GET, path, query, None).await?;
        unwrap_envelope(body, envelope)
    }

    pub(crate) async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        envelope: Envelope,
    ) -> Result<T, TomaError> {
        let payload = to_json(body)?;
        let body = self.execute(Method::POST, path, &[], Some(payload)).await?;
        unwrap_envelope(body, envelope)
    }

    pub(crate) async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        envelope: Envelope,
    ) -> Result<T, TomaError> {
        let payload = to_json(body)?;
        let body = self.execute(Method::PUT, path, &[], Some(payload)).await?;
        unwrap_envelope(body, envelope)
    }

    /// POST with no request body, discarding any response payload. Used for
    /// trigger endpoints (queue, retry, mark-read, reset-password).
    pub(crate) async fn post_unit(&self, path: &str) -> Result<(), TomaError> {
        self.execute(Method::POST, path, &[], None).await?;
        Ok(())
    }

    /// POST with no request body, returning the unwrapped payload.
    pub(crate) async fn post_empty<T: DeserializeOwned>(
        &self,
        path: &str,
        envelope: Envelope,
    ) -> Result<T, TomaError> {
        let body = self.execute(Method::POST, path, &[], None).await?;
        unwrap_envelope(body, envelope)
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), TomaError> {
        self.execute(Method::DELETE, path, &[], None).await?;
        Ok(())
    }

    /// POST with an explicitly supplied bearer token.
    ///
    /// Exists for the one call that happens after the store has already been
    /// cleared (the best-effort logout notification); a 401 here must not
    /// re-enter the invalidation path.
    pub(crate) async fn post_unit_with_bearer(
        &self,
        path: &str,
        token: &SessionToken,
    ) -> Result<(), TomaError> {
        let url = self.url(path);
        let response = self
            .http
            .post(&url)
            .header(AUTHORIZATION, format!("Bearer {}", token.as_str()))
            .send()
            .await
            .map_err(|e| TomaError::Http {
                message: format!("request to {url} failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let text = response.text().await.unwrap_or_default();
            Err(TomaError::Api {
                status: status.as_u16(),
                message: extract_error_message(status, &text),
            })
        }
    }

    /// Issues the request and returns the parsed JSON body.
    ///
    /// `Authorization: Bearer <token>` is attached iff the store currently
    /// holds a validly-shaped token. A 401 clears the store, publishes an
    /// invalidation, and fails with [`TomaError::Unauthenticated`] — that
    /// path is deliberately not retryable.
    async fn execute(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<Value>,
    ) -> Result<Value, TomaError> {
        let url = self.url(path);
        let mut request = self.http.request(method.clone(), &url);

        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(token) = self.store.token() {
            let bearer = format!("Bearer {}", token.as_str());
            let value = HeaderValue::from_str(&bearer).map_err(|e| TomaError::Http {
                message: format!("token is not a valid header value: {e}"),
                source: Some(Box::new(e)),
            })?;
            request = request.header(AUTHORIZATION, value);
        }
        if let Some(body) = &body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| TomaError::Http {
            message: format!("request to {url} failed: {e}"),
            source: Some(Box::new(e)),
        })?;

        let status = response.status();
        debug!(%method, %url, status = status.as_u16(), "api response");

        if status == StatusCode::UNAUTHORIZED {
            return Err(self.invalidate_session("server rejected the session (401)"));
        }

        let text = response.text().await.map_err(|e| TomaError::Http {
            message: format!("failed to read response body: {e}"),
            source: Some(Box::new(e)),
        })?;

        if !status.is_success() {
            return Err(TomaError::Api {
                status: status.as_u16(),
                message: extract_error_message(status, &text),
            });
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| TomaError::Http {
            message: format!("malformed JSON response from {url}: {e}"),
            source: Some(Box::new(e)),
        })
    }

    /// Clears the session and publishes the invalidation event.
    ///
    /// Never keep operating in a broken authenticated state: the store is
    /// emptied before the caller even sees the error.
    pub(crate) fn invalidate_session(&self, reason: &str) -> TomaError {
        if let Err(err) = self.store.clear() {
            warn!(error = %err, "failed to clear session store during invalidation");
        }
        self.events.invalidated(reason);
        TomaError::Unauthenticated
    }
}

fn to_json<B: Serialize>(body: &B) -> Result<Value, TomaError> {
    serde_json::to_value(body)
        .map_err(|e| TomaError::Internal(format!("failed to serialize request body: {e}")))
}

/// Applies an endpoint's envelope contract to a parsed response body.
fn unwrap_envelope<T: DeserializeOwned>(body: Value, envelope: Envelope) -> Result<T, TomaError> {
    let payload = match envelope {
        Envelope::Bare => body,
        Envelope::Key(key) => body
            .get(key)
            .cloned()
            .ok_or_else(|| TomaError::Http {
                message: format!("response is missing the `{key}` envelope field"),
                source: None,
            })?,
    };
    serde_json::from_value(payload).map_err(|e| TomaError::Http {
        message: format!("unexpected response shape: {e}"),
        source: Some(Box::new(e)),
    })
}

/// Normalizes a non-2xx body into a human message: JSON `message` field,
/// then JSON `error` field, then the raw text, then `HTTP <code>`.
fn extract_error_message(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        for field in ["message", "error"] {
            if let Some(message) = value.get(field).and_then(Value::as_str) {
                if !message.trim().is_empty() {
                    return message.to_string();
                }
            }
        }
    }
    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }
    format!("HTTP {}", status.as_u16())
}
