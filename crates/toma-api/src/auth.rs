// SPDX-FileCopyrightText: 2026 Toma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Authentication flows: login, register, logout, profile refresh.
//!
//! The session state machine has no intermediate states: anonymous becomes
//! authenticated on a successful login, and a logout, a 401, or a failed
//! profile refresh all lead straight back to anonymous.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use toma_core::{SessionToken, SessionUser, TomaError};
use tracing::{debug, info};

use crate::client::{ApiClient, Envelope};

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// `POST /login` response: bare `{user, token}` object.
#[derive(Debug, Deserialize)]
struct LoginResponse {
    user: SessionUser,
    token: String,
}

/// Registration payload. The customer number and business profile are
/// filled in server-side after signup. Not serialized directly; the wire
/// payload is built inside [`ApiClient::register`] so the password only
/// leaves its [`SecretString`] there.
#[derive(Debug)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: SecretString,
    pub business_name: Option<String>,
    pub phone: Option<String>,
}

/// `POST /register` may return a token, a user, both, or neither; the
/// fallback login covers the gaps.
#[derive(Debug, Deserialize)]
struct RegisterResponse {
    #[serde(default)]
    user: Option<SessionUser>,
    #[serde(default)]
    token: Option<String>,
}

impl ApiClient {
    /// Logs in with email and password.
    ///
    /// Validates the returned token's shape before anything is persisted: a
    /// malformed token is a login failure, not a partial success. On success
    /// the token and user snapshot are stored wholesale and the user is
    /// returned.
    pub async fn login(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<SessionUser, TomaError> {
        let request = LoginRequest {
            email,
            password: password.expose_secret(),
        };
        let response: LoginResponse = self.post("/login", &request, Envelope::Bare).await?;

        let token = SessionToken::parse(&response.token).ok_or(TomaError::InvalidToken)?;
        self.store().set_session(&token, &response.user)?;
        info!(user_id = response.user.id, role = %response.user.role, "logged in");
        Ok(response.user)
    }

    /// Registers a new account.
    ///
    /// When the response carries a usable token and user they are persisted
    /// directly; otherwise falls back to a regular login with the same
    /// credentials.
    pub async fn register(&self, request: &RegisterRequest) -> Result<SessionUser, TomaError> {
        #[derive(Serialize)]
        struct Payload<'a> {
            name: &'a str,
            email: &'a str,
            password: &'a str,
            #[serde(skip_serializing_if = "Option::is_none")]
            business_name: Option<&'a str>,
            #[serde(skip_serializing_if = "Option::is_none")]
            phone: Option<&'a str>,
        }
        let payload = Payload {
            name: &request.name,
            email: &request.email,
            password: request.password.expose_secret(),
            business_name: request.business_name.as_deref(),
            phone: request.phone.as_deref(),
        };

        let response: RegisterResponse = self.post("/register", &payload, Envelope::Bare).await?;

        if let (Some(user), Some(raw)) = (response.user, response.token.as_deref()) {
            if let Some(token) = SessionToken::parse(raw) {
                self.store().set_session(&token, &user)?;
                info!(user_id = user.id, "registered and logged in");
                return Ok(user);
            }
        }

        debug!("register response had no usable token, falling back to login");
        self.login(&request.email, &request.password).await
    }

    /// Signs out.
    ///
    /// The store is cleared before the server is told, so the local session
    /// reflects signed-out immediately; the server notification is best
    /// effort and its failure is swallowed. No invalidation event is
    /// published: the bus carries unexpected session loss, and an explicit
    /// sign-out is not that.
    pub async fn logout(&self) -> Result<(), TomaError> {
        // Read the token before clearing so the notification is still
        // authenticated.
        let token = self.store().token();
        self.store().clear()?;

        if let Some(token) = token {
            if let Err(err) = self.notify_logout(&token).await {
                debug!(error = %err, "logout notification failed, ignoring");
            }
        }
        Ok(())
    }

    async fn notify_logout(&self, token: &SessionToken) -> Result<(), TomaError> {
        // The store no longer holds the token at this point, so the header
        // is supplied explicitly.
        self.post_unit_with_bearer("/logout", token).await
    }

    /// Re-fetches the current user's profile and replaces the snapshot.
    ///
    /// Any failure here is treated identically to having no valid identity:
    /// the session is invalidated and cleared before the error is returned.
    pub async fn refresh_user(&self) -> Result<SessionUser, TomaError> {
        match self.get::<SessionUser>("/user", &[], Envelope::Key("user")).await {
            Ok(user) => {
                self.store().set_user(&user)?;
                Ok(user)
            }
            Err(TomaError::Unauthenticated) => Err(TomaError::Unauthenticated),
            Err(err) => {
                debug!(error = %err, "profile refresh failed, invalidating session");
                let _ = self.invalidate_session("profile refresh failed");
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use toma_core::Role;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::testing::{authed_client, client_fixture};

    fn user_json(role: &str) -> serde_json::Value {
        serde_json::json!({
            "id": 1, "name": "Ada", "email": "ada@example.com",
            "role": role, "is_active": true, "customer_id": 42
        })
    }

    #[tokio::test]
    async fn login_persists_token_and_user() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/login"))
            .and(body_json(
                serde_json::json!({"email": "ada@example.com", "password": "pw"}),
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "user": user_json("customer"),
                "token": "a|b"
            })))
            .mount(&server)
            .await;

        let (_dir, client) = client_fixture(&server.uri()).await;
        let user = client
            .login("ada@example.com", &SecretString::from("pw"))
            .await
            .unwrap();

        assert_eq!(user.role, Role::Customer);
        assert_eq!(client.store().token().unwrap().as_str(), "a|b");
        assert_eq!(client.store().user().unwrap().id, 1);
    }

    #[tokio::test]
    async fn login_rejects_malformed_token_without_persisting() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "user": user_json("user"),
                "token": "no-separator-here"
            })))
            .mount(&server)
            .await;

        let (_dir, client) = client_fixture(&server.uri()).await;
        let err = client
            .login("ada@example.com", &SecretString::from("pw"))
            .await
            .unwrap_err();

        assert!(matches!(err, TomaError::InvalidToken));
        assert!(client.store().token().is_none());
        assert!(client.store().user().is_none());
    }

    #[tokio::test]
    async fn login_failure_surfaces_server_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/login"))
            .respond_with(
                ResponseTemplate::new(422)
                    .set_body_json(serde_json::json!({"message": "Invalid credentials."})),
            )
            .mount(&server)
            .await;

        let (_dir, client) = client_fixture(&server.uri()).await;
        let err = client
            .login("ada@example.com", &SecretString::from("wrong"))
            .await
            .unwrap_err();
        assert_eq!(err.display_message(), "Invalid credentials.");
    }

    #[tokio::test]
    async fn logout_clears_store_even_when_server_fails() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/logout"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let (_dir, client) = authed_client(&server.uri(), Role::User).await;
        client.logout().await.unwrap();

        assert!(client.store().token().is_none());
        assert!(client.store().user().is_none());
    }

    #[tokio::test]
    async fn logout_does_not_publish_invalidation() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/logout"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let (_dir, client) = authed_client(&server.uri(), Role::User).await;
        let mut rx = client.events().subscribe();
        client.logout().await.unwrap();

        // An explicit sign-out is not an unexpected session loss.
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn logout_notifies_server_with_the_old_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/logout"))
            .and(header("authorization", "Bearer 7|secret"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let (_dir, client) = authed_client(&server.uri(), Role::User).await;
        client.logout().await.unwrap();
    }

    #[tokio::test]
    async fn refresh_replaces_snapshot_wholesale() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/user"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "user": {"id": 1, "name": "Ada L.", "email": "ada@example.com", "role": "admin"}
            })))
            .mount(&server)
            .await;

        let (_dir, client) = authed_client(&server.uri(), Role::User).await;
        let user = client.refresh_user().await.unwrap();
        assert_eq!(user.name, "Ada L.");
        // Optional fields absent in the response are gone from the snapshot
        // too; the profile is never merged field-by-field.
        assert_eq!(client.store().user().unwrap().customer_id, None);
    }

    #[tokio::test]
    async fn refresh_failure_invalidates_like_a_401() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/user"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let (_dir, client) = authed_client(&server.uri(), Role::Customer).await;
        let mut rx = client.events().subscribe();

        assert!(client.refresh_user().await.is_err());
        assert!(client.store().token().is_none());
        assert!(rx.try_recv().is_ok());
    }

    #[tokio::test]
    async fn register_falls_back_to_login_without_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/register"))
            .respond_with(
                ResponseTemplate::new(201).set_body_json(serde_json::json!({"user": user_json("customer")})),
            )
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "user": user_json("customer"),
                "token": "9|fresh"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let (_dir, client) = client_fixture(&server.uri()).await;
        let request = RegisterRequest {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            password: SecretString::from("pw"),
            business_name: None,
            phone: None,
        };
        let user = client.register(&request).await.unwrap();
        assert_eq!(user.customer_id, Some(42));
        assert_eq!(client.store().token().unwrap().as_str(), "9|fresh");
    }

    #[tokio::test]
    async fn register_uses_returned_token_when_present() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/register"))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "user": user_json("customer"),
                "token": "5|minted"
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/login"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&server)
            .await;

        let (_dir, client) = client_fixture(&server.uri()).await;
        let request = RegisterRequest {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            password: SecretString::from("pw"),
            business_name: Some("Ada's Bakery".into()),
            phone: None,
        };
        client.register(&request).await.unwrap();
        assert_eq!(client.store().token().unwrap().as_str(), "5|minted");
    }
}
