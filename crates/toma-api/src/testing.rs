// SPDX-FileCopyrightText: 2026 Toma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared fixtures for the wiremock-backed tests in this crate.

use std::sync::Arc;

use toma_config::ApiConfig;
use toma_core::{Role, SessionToken, SessionUser};
use toma_session::{SessionEvents, SessionStore};

use crate::client::ApiClient;

/// A client wired to a temp-dir session store and a mock server base URL.
///
/// The tempdir must be kept alive by the caller for the store to stay valid.
pub(crate) async fn client_fixture(server_uri: &str) -> (tempfile::TempDir, ApiClient) {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(SessionStore::open(dir.path().join("session.json")));
    let config = ApiConfig {
        base_url: format!("{server_uri}/api"),
        ..ApiConfig::default()
    };
    let client = ApiClient::new(&config, store, SessionEvents::new()).unwrap();
    (dir, client)
}

/// A [`client_fixture`] with a valid token and a user of the given role
/// already persisted.
pub(crate) async fn authed_client(server_uri: &str, role: Role) -> (tempfile::TempDir, ApiClient) {
    let (dir, client) = client_fixture(server_uri).await;
    client
        .store()
        .set_session(&SessionToken::parse("7|secret").unwrap(), &test_user(role))
        .unwrap();
    (dir, client)
}

pub(crate) fn test_user(role: Role) -> SessionUser {
    SessionUser {
        id: 1,
        name: "Ada".into(),
        email: "ada@example.com".into(),
        role,
        is_active: Some(true),
        customer_id: Some(42),
    }
}
