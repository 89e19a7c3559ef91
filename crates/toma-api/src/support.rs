// SPDX-FileCopyrightText: 2026 Toma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Support-ticket endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use toma_core::TomaError;

use crate::client::{ApiClient, Envelope};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TicketStatus {
    Open,
    Pending,
    Closed,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TicketPriority {
    Low,
    Normal,
    High,
}

/// One message in a ticket thread.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketMessage {
    pub id: i64,
    pub is_staff: bool,
    pub message: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub attachments: Vec<String>,
}

/// A support ticket. List responses omit the thread; `messages` defaults
/// to empty there and is populated by the detail endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    pub id: i64,
    pub customer_id: i64,
    pub subject: String,
    pub status: TicketStatus,
    pub priority: TicketPriority,
    #[serde(default)]
    pub messages: Vec<TicketMessage>,
}

/// Payload for opening a new ticket.
#[derive(Debug, Serialize)]
pub struct NewTicket {
    pub subject: String,
    pub message: String,
    pub priority: TicketPriority,
}

/// Payload for replying on an existing ticket.
#[derive(Debug, Serialize)]
pub struct TicketReply {
    pub message: String,
    /// Names of already-uploaded attachments to link to the reply.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<String>,
}

impl ApiClient {
    /// `GET /support/tickets`
    pub async fn list_tickets(&self) -> Result<Vec<Ticket>, TomaError> {
        self.get("/support/tickets", &[], Envelope::Key("data")).await
    }

    /// `GET /support/tickets/:id` — full ticket including the thread.
    pub async fn ticket(&self, id: i64) -> Result<Ticket, TomaError> {
        self.get(&format!("/support/tickets/{id}"), &[], Envelope::Key("data"))
            .await
    }

    /// `POST /support/tickets`
    pub async fn create_ticket(&self, ticket: &NewTicket) -> Result<Ticket, TomaError> {
        self.post("/support/tickets", ticket, Envelope::Key("data"))
            .await
    }

    /// `POST /support/tickets/:id` — reply on the thread.
    pub async fn reply_to_ticket(&self, id: i64, reply: &TicketReply) -> Result<Ticket, TomaError> {
        self.post(&format!("/support/tickets/{id}"), reply, Envelope::Key("data"))
            .await
    }

    /// `POST /support/tickets/:id/read` — mark the thread read.
    pub async fn mark_ticket_read(&self, id: i64) -> Result<(), TomaError> {
        self.post_unit(&format!("/support/tickets/{id}/read")).await
    }
}
