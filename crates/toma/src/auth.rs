// SPDX-FileCopyrightText: 2026 Toma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `toma login` / `register` / `logout` / `whoami`.

use colored::Colorize;
use secrecy::SecretString;
use toma_api::RegisterRequest;
use toma_core::{Route, TomaError};
use toma_session::{public_only, require_auth};

use crate::{gate, App};

fn password_from(option: Option<String>) -> Result<SecretString, TomaError> {
    match option {
        Some(password) => Ok(SecretString::from(password)),
        None => rpassword::prompt_password("Password: ")
            .map(SecretString::from)
            .map_err(|e| TomaError::Internal(format!("failed to read password: {e}"))),
    }
}

pub(crate) async fn login(
    app: &App,
    email: &str,
    password: Option<String>,
) -> Result<(), TomaError> {
    if !gate(public_only(&app.resolver)) {
        return Ok(());
    }

    let password = password_from(password)?;
    let user = app.client.login(email, &password).await?;
    println!(
        "{} signed in as {} ({}); your home is {}",
        "ok:".green().bold(),
        user.name.bold(),
        user.role,
        Route::home_for(Some(user.role)).as_path().bold()
    );
    Ok(())
}

pub(crate) async fn register(
    app: &App,
    name: String,
    email: String,
    password: Option<String>,
    business_name: Option<String>,
    phone: Option<String>,
) -> Result<(), TomaError> {
    if !gate(public_only(&app.resolver)) {
        return Ok(());
    }

    let request = RegisterRequest {
        name,
        email,
        password: password_from(password)?,
        business_name,
        phone,
    };
    let user = app.client.register(&request).await?;
    println!(
        "{} account created; signed in as {}",
        "ok:".green().bold(),
        user.name.bold()
    );
    Ok(())
}

pub(crate) async fn logout(app: &App) -> Result<(), TomaError> {
    // No guard here: clearing local state must always be possible, even
    // with a half-broken session.
    app.client.logout().await?;
    println!("{} signed out", "ok:".green().bold());
    Ok(())
}

pub(crate) fn whoami(app: &App) -> Result<(), TomaError> {
    if !gate(require_auth(&app.resolver)) {
        return Ok(());
    }

    match app.resolver.current_user() {
        Some(user) => {
            println!("{} <{}>", user.name.bold(), user.email);
            println!("role: {}", user.role);
            if let Some(customer_id) = user.customer_id {
                println!("customer id: {customer_id}");
            }
            println!("home: {}", app.resolver.default_route().as_path());
            Ok(())
        }
        None => {
            // Token present but no snapshot; a refresh would normally fix
            // this on the next page load, mirror that here.
            println!("signed in, but no cached profile; run any command to refresh it");
            Ok(())
        }
    }
}
