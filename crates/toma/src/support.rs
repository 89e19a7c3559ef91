// SPDX-FileCopyrightText: 2026 Toma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `toma tickets` — the support-ticketing screens.

use std::str::FromStr;

use clap::Subcommand;
use colored::Colorize;
use toma_api::{NewTicket, TicketPriority, TicketReply};
use toma_core::{Role, TomaError};
use toma_session::require_role;

use crate::{gate, App};

#[derive(Subcommand, Debug)]
pub(crate) enum TicketCommands {
    /// List your tickets.
    List,
    /// Show one ticket with its full thread (marks it read).
    Show { id: i64 },
    /// Open a new ticket.
    New {
        subject: String,
        message: String,
        /// low, normal, or high.
        #[arg(long, default_value = "normal")]
        priority: String,
    },
    /// Reply on an existing ticket.
    Reply {
        id: i64,
        message: String,
        /// Names of already-uploaded attachments to link.
        #[arg(long = "attach")]
        attachments: Vec<String>,
    },
}

pub(crate) async fn run(app: &App, command: TicketCommands) -> Result<(), TomaError> {
    if !gate(require_role(&app.resolver, Role::Customer)) {
        return Ok(());
    }
    match command {
        TicketCommands::List => list(app).await,
        TicketCommands::Show { id } => show(app, id).await,
        TicketCommands::New {
            subject,
            message,
            priority,
        } => new(app, subject, message, &priority).await,
        TicketCommands::Reply {
            id,
            message,
            attachments,
        } => reply(app, id, message, attachments).await,
    }
}

async fn list(app: &App) -> Result<(), TomaError> {
    let tickets = app.client.list_tickets().await?;
    if tickets.is_empty() {
        println!("no tickets");
        return Ok(());
    }
    for ticket in &tickets {
        println!(
            "#{:<5} [{:<7}] ({}) {}",
            ticket.id,
            ticket.status,
            ticket.priority,
            ticket.subject.bold()
        );
    }
    Ok(())
}

async fn show(app: &App, id: i64) -> Result<(), TomaError> {
    let ticket = app.client.ticket(id).await?;
    println!(
        "#{} {} [{}] ({})",
        ticket.id,
        ticket.subject.bold(),
        ticket.status,
        ticket.priority
    );
    for message in &ticket.messages {
        let author = if message.is_staff { "staff" } else { "you" };
        println!();
        println!("{} — {}", author.bold(), message.created_at);
        println!("{}", message.message);
        for attachment in &message.attachments {
            println!("  attachment: {attachment}");
        }
    }

    // Viewing the thread marks it read; the SPA did this on open. Best
    // effort: a failure here must not break the read path.
    if let Err(err) = app.client.mark_ticket_read(id).await {
        tracing::debug!(error = %err, "failed to mark ticket read");
    }
    Ok(())
}

async fn new(app: &App, subject: String, message: String, priority: &str) -> Result<(), TomaError> {
    let priority = TicketPriority::from_str(priority).map_err(|_| {
        TomaError::Internal(format!(
            "unknown priority `{priority}` (expected low, normal, or high)"
        ))
    })?;
    let ticket = app
        .client
        .create_ticket(&NewTicket {
            subject,
            message,
            priority,
        })
        .await?;
    println!("{} ticket #{} opened", "ok:".green().bold(), ticket.id);
    Ok(())
}

async fn reply(
    app: &App,
    id: i64,
    message: String,
    attachments: Vec<String>,
) -> Result<(), TomaError> {
    app.client
        .reply_to_ticket(
            id,
            &TicketReply {
                message,
                attachments,
            },
        )
        .await?;
    println!("{} reply sent on #{id}", "ok:".green().bold());
    Ok(())
}
