// SPDX-FileCopyrightText: 2026 Toma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Customer profile endpoints.

use serde::{Deserialize, Serialize};
use toma_core::TomaError;

use crate::client::{ApiClient, Envelope};

/// Server-owned customer record, fetched on demand and cached nowhere —
/// only the session user snapshot lives in the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerProfile {
    pub id: i64,
    pub user_id: i64,
    pub customer_number: String,
    #[serde(default)]
    pub business_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub about: Option<String>,
}

/// Fields a customer may change on their own profile.
#[derive(Debug, Default, Serialize)]
pub struct UpdateCustomer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
}

impl ApiClient {
    /// `GET /customers/me` — the signed-in customer's own profile.
    pub async fn my_customer_profile(&self) -> Result<CustomerProfile, TomaError> {
        self.get("/customers/me", &[], Envelope::Key("data")).await
    }

    /// `PUT /customers/me`
    pub async fn update_my_customer_profile(
        &self,
        update: &UpdateCustomer,
    ) -> Result<CustomerProfile, TomaError> {
        self.put("/customers/me", update, Envelope::Key("data")).await
    }

    /// `GET /customers/:id` — admin view of any customer.
    pub async fn customer_profile(&self, id: i64) -> Result<CustomerProfile, TomaError> {
        self.get(&format!("/customers/{id}"), &[], Envelope::Key("data"))
            .await
    }

    /// `PUT /customers/:id`
    pub async fn update_customer_profile(
        &self,
        id: i64,
        update: &UpdateCustomer,
    ) -> Result<CustomerProfile, TomaError> {
        self.put(&format!("/customers/{id}"), update, Envelope::Key("data"))
            .await
    }
}

#[cfg(test)]
mod tests {
    use toma_core::Role;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::testing::authed_client;

    fn profile_json() -> serde_json::Value {
        serde_json::json!({
            "id": 42, "user_id": 1, "customer_number": "C-0042",
            "business_name": "Ada's Bakery", "phone": "555-0100",
            "address": null, "city": "London", "state": null, "about": null
        })
    }

    #[tokio::test]
    async fn my_profile_unwraps_data_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/customers/me"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"data": profile_json()})),
            )
            .mount(&server)
            .await;

        let (_dir, client) = authed_client(&server.uri(), Role::Customer).await;
        let profile = client.my_customer_profile().await.unwrap();
        assert_eq!(profile.customer_number, "C-0042");
        assert_eq!(profile.business_name.as_deref(), Some("Ada's Bakery"));
    }

    #[tokio::test]
    async fn update_sends_only_set_fields() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/customers/42"))
            .and(body_json(serde_json::json!({"city": "Paris"})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"data": profile_json()})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let (_dir, client) = authed_client(&server.uri(), Role::Admin).await;
        let update = UpdateCustomer {
            city: Some("Paris".into()),
            ..UpdateCustomer::default()
        };
        client.update_customer_profile(42, &update).await.unwrap();
    }
}
