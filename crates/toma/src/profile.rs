// SPDX-FileCopyrightText: 2026 Toma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `toma profile` — the customer business profile screens.

use clap::Subcommand;
use colored::Colorize;
use toma_api::UpdateCustomer;
use toma_core::{Role, TomaError};
use toma_session::require_role;

use crate::{gate, App};

#[derive(Subcommand, Debug)]
pub(crate) enum ProfileCommands {
    /// Show a customer profile (your own, or any by id as admin).
    Show {
        #[arg(long)]
        customer_id: Option<i64>,
    },
    /// Update your business profile.
    Update {
        #[arg(long)]
        business_name: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        city: Option<String>,
        #[arg(long)]
        state: Option<String>,
        #[arg(long)]
        about: Option<String>,
    },
}

pub(crate) async fn run(app: &App, command: ProfileCommands) -> Result<(), TomaError> {
    match command {
        ProfileCommands::Show { customer_id } => show(app, customer_id).await,
        ProfileCommands::Update {
            business_name,
            phone,
            address,
            city,
            state,
            about,
        } => {
            update(
                app,
                UpdateCustomer {
                    business_name,
                    phone,
                    address,
                    city,
                    state,
                    about,
                },
            )
            .await
        }
    }
}

async fn show(app: &App, customer_id: Option<i64>) -> Result<(), TomaError> {
    let profile = match customer_id {
        // Looking at someone else's profile is the admin screen.
        Some(id) => {
            if !gate(require_role(&app.resolver, Role::Admin)) {
                return Ok(());
            }
            app.client.customer_profile(id).await?
        }
        None => {
            if !gate(require_role(&app.resolver, Role::Customer)) {
                return Ok(());
            }
            app.client.my_customer_profile().await?
        }
    };

    println!(
        "{} ({})",
        profile
            .business_name
            .as_deref()
            .unwrap_or("<unnamed business>")
            .bold(),
        profile.customer_number
    );
    for (label, value) in [
        ("phone", &profile.phone),
        ("address", &profile.address),
        ("city", &profile.city),
        ("state", &profile.state),
        ("about", &profile.about),
    ] {
        if let Some(value) = value {
            println!("{label}: {value}");
        }
    }
    Ok(())
}

async fn update(app: &App, update: UpdateCustomer) -> Result<(), TomaError> {
    if !gate(require_role(&app.resolver, Role::Customer)) {
        return Ok(());
    }
    let profile = app.client.update_my_customer_profile(&update).await?;
    println!(
        "{} profile updated ({})",
        "ok:".green().bold(),
        profile.customer_number
    );
    Ok(())
}
