// SPDX-FileCopyrightText: 2026 Toma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `toma settings` — integration provider credentials.

use clap::Subcommand;
use colored::Colorize;
use toma_api::IntegrationSettings;
use toma_core::{Role, TomaError};
use toma_session::require_role;

use crate::{gate, App};

#[derive(Subcommand, Debug)]
pub(crate) enum SettingsCommands {
    /// Show the stored provider credentials (keys are shown redacted).
    Show {
        /// Platform-wide defaults instead of your own (admin only).
        #[arg(long)]
        admin: bool,
    },
    /// Set provider credentials. Omitted fields are left unchanged
    /// server-side.
    Set {
        #[arg(long)]
        admin: bool,
        #[arg(long)]
        content_api_key: Option<String>,
        #[arg(long)]
        content_api_url: Option<String>,
        #[arg(long)]
        social_api_key: Option<String>,
        #[arg(long)]
        social_api_url: Option<String>,
    },
}

pub(crate) async fn run(app: &App, command: SettingsCommands) -> Result<(), TomaError> {
    match command {
        SettingsCommands::Show { admin } => show(app, admin).await,
        SettingsCommands::Set {
            admin,
            content_api_key,
            content_api_url,
            social_api_key,
            social_api_url,
        } => {
            let settings = IntegrationSettings {
                content_api_key,
                content_api_url,
                social_api_key,
                social_api_url,
            };
            set(app, admin, settings).await
        }
    }
}

fn required_role(admin: bool) -> Role {
    if admin { Role::Admin } else { Role::Customer }
}

fn redact(value: &Option<String>) -> String {
    match value {
        // Char-wise, not byte-wise: keys are user-supplied and may contain
        // multi-byte characters.
        Some(key) if key.chars().count() > 4 => {
            let prefix: String = key.chars().take(4).collect();
            format!("{prefix}…")
        }
        Some(_) => "****".to_string(),
        None => "<unset>".to_string(),
    }
}

async fn show(app: &App, admin: bool) -> Result<(), TomaError> {
    if !gate(require_role(&app.resolver, required_role(admin))) {
        return Ok(());
    }
    let settings = if admin {
        app.client.admin_settings().await?
    } else {
        app.client.settings().await?
    };

    println!("content provider key: {}", redact(&settings.content_api_key));
    println!(
        "content provider url: {}",
        settings.content_api_url.as_deref().unwrap_or("<default>")
    );
    println!("social provider key:  {}", redact(&settings.social_api_key));
    println!(
        "social provider url:  {}",
        settings.social_api_url.as_deref().unwrap_or("<default>")
    );
    Ok(())
}

async fn set(app: &App, admin: bool, settings: IntegrationSettings) -> Result<(), TomaError> {
    if !gate(require_role(&app.resolver, required_role(admin))) {
        return Ok(());
    }
    if admin {
        app.client.update_admin_settings(&settings).await?;
    } else {
        app.client.update_settings(&settings).await?;
    }
    println!("{} settings saved", "ok:".green().bold());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redact_shows_four_char_prefix() {
        assert_eq!(redact(&Some("ck-12345".to_string())), "ck-1…");
    }

    #[test]
    fn redact_handles_multibyte_keys() {
        // Byte 4 falls inside the multi-byte character.
        assert_eq!(redact(&Some("abc€xyz".to_string())), "abc€…");
        assert_eq!(redact(&Some("€€€€€".to_string())), "€€€€…");
    }

    #[test]
    fn redact_masks_short_keys_fully() {
        assert_eq!(redact(&Some("abcd".to_string())), "****");
        assert_eq!(redact(&Some("€€".to_string())), "****");
    }

    #[test]
    fn redact_marks_unset_keys() {
        assert_eq!(redact(&None), "<unset>");
    }
}
