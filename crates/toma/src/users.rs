// SPDX-FileCopyrightText: 2026 Toma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `toma users` — admin-only user administration.

use clap::Subcommand;
use colored::Colorize;
use toma_api::UpdateUser;
use toma_core::{Role, TomaError};
use toma_session::require_role;

use crate::{gate, App};

#[derive(Subcommand, Debug)]
pub(crate) enum UserCommands {
    /// List user accounts.
    List {
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        per_page: Option<u32>,
    },
    /// Show a user account.
    Show { id: i64 },
    /// Update a user account.
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        /// Activate (`true`) or deactivate (`false`) the account.
        #[arg(long)]
        active: Option<bool>,
    },
    /// Send the user a password-reset mail.
    ResetPassword { id: i64 },
}

pub(crate) async fn run(app: &App, command: UserCommands) -> Result<(), TomaError> {
    if !gate(require_role(&app.resolver, Role::Admin)) {
        return Ok(());
    }
    match command {
        UserCommands::List { page, per_page } => list(app, page, per_page).await,
        UserCommands::Show { id } => show(app, id).await,
        UserCommands::Update {
            id,
            name,
            email,
            active,
        } => {
            update(
                app,
                id,
                UpdateUser {
                    name,
                    email,
                    is_active: active,
                },
            )
            .await
        }
        UserCommands::ResetPassword { id } => reset_password(app, id).await,
    }
}

async fn list(app: &App, page: Option<u32>, per_page: Option<u32>) -> Result<(), TomaError> {
    let listing = app.client.list_users(page, per_page).await?;
    if listing.data.is_empty() {
        println!("no users");
        return Ok(());
    }
    for user in &listing.data {
        let active = match user.is_active {
            Some(false) => "inactive".red(),
            _ => "active".green(),
        };
        println!(
            "#{:<5} {:<10} {:<8} {} <{}>",
            user.id,
            user.role,
            active,
            user.name.bold(),
            user.email
        );
    }
    if let Some(total) = listing.total {
        println!("{} of {total} shown", listing.data.len());
    }
    Ok(())
}

async fn show(app: &App, id: i64) -> Result<(), TomaError> {
    let user = app.client.user(id).await?;
    let active = match user.is_active {
        Some(false) => "inactive".red(),
        _ => "active".green(),
    };
    println!("#{} {} <{}>", user.id, user.name.bold(), user.email);
    println!("role: {}, {}", user.role, active);
    if let Some(customer_id) = user.customer_id {
        println!("customer id: {customer_id}");
    }
    Ok(())
}

async fn update(app: &App, id: i64, update: UpdateUser) -> Result<(), TomaError> {
    let user = app.client.update_user(id, &update).await?;
    println!(
        "{} user #{} updated ({})",
        "ok:".green().bold(),
        user.id,
        user.email
    );
    Ok(())
}

async fn reset_password(app: &App, id: i64) -> Result<(), TomaError> {
    app.client.reset_password(id).await?;
    println!("{} reset mail sent for user #{id}", "ok:".green().bold());
    Ok(())
}
