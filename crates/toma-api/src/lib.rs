// SPDX-FileCopyrightText: 2026 Toma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed HTTP client for the TOMA backend API.
//!
//! One configured [`ApiClient`] carries every endpoint surface: auth flows,
//! customer profiles, user administration, integration settings, content
//! generation (with the client-side polling loops), support tickets, and
//! the social composer/queue. Bearer injection, 401 invalidation, error
//! normalization, and envelope unwrapping all live in the client and
//! nowhere else.

pub mod auth;
pub mod client;
pub mod content;
pub mod customers;
pub mod settings;
pub mod social;
pub mod support;
pub mod types;
pub mod users;

#[cfg(test)]
pub(crate) mod testing;

pub use auth::RegisterRequest;
pub use client::{ApiClient, Envelope};
pub use content::{GenerateRequest, GenerationJob, GenerationQuery, JobStatus, PromptFor};
pub use customers::{CustomerProfile, UpdateCustomer};
pub use settings::IntegrationSettings;
pub use social::{NewPost, PostTarget, SocialConnection, SocialPost, TargetStatus};
pub use support::{NewTicket, Ticket, TicketMessage, TicketPriority, TicketReply, TicketStatus};
pub use types::Paginated;
pub use users::UpdateUser;
