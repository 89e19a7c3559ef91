// SPDX-FileCopyrightText: 2026 Toma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `toma social` — connections, composer, and the publish queue.

use clap::Subcommand;
use colored::Colorize;
use toma_api::{NewPost, TargetStatus};
use toma_core::{Role, TomaError};
use toma_session::require_role;

use crate::{gate, App};

#[derive(Subcommand, Debug)]
pub(crate) enum SocialCommands {
    /// List linked social accounts.
    Connections,
    /// Print the authorization URL to link a provider account.
    Connect { provider: String },
    /// Unlink a social account.
    Disconnect { id: i64 },
    /// List composed posts and their per-network status.
    Posts,
    /// Compose a post for one or more providers.
    Post {
        body: String,
        /// Provider to publish on; repeat for multiple networks.
        #[arg(long = "to", required = true)]
        providers: Vec<String>,
    },
    /// Hand a composed post to the publish queue.
    Queue { id: i64 },
    /// Retry a failed per-network publish attempt.
    Retry { target_id: i64 },
}

pub(crate) async fn run(app: &App, command: SocialCommands) -> Result<(), TomaError> {
    if !gate(require_role(&app.resolver, Role::Customer)) {
        return Ok(());
    }
    match command {
        SocialCommands::Connections => connections(app).await,
        SocialCommands::Connect { provider } => connect(app, &provider).await,
        SocialCommands::Disconnect { id } => disconnect(app, id).await,
        SocialCommands::Posts => posts(app).await,
        SocialCommands::Post { body, providers } => post(app, body, providers).await,
        SocialCommands::Queue { id } => queue(app, id).await,
        SocialCommands::Retry { target_id } => retry(app, target_id).await,
    }
}

async fn connections(app: &App) -> Result<(), TomaError> {
    let connections = app.client.list_connections().await?;
    if connections.is_empty() {
        println!("no linked accounts; use `toma social connect <provider>`");
        return Ok(());
    }
    for connection in &connections {
        println!(
            "#{:<4} {:<10} {}",
            connection.id,
            connection.provider,
            connection.account_name.bold()
        );
    }
    Ok(())
}

async fn connect(app: &App, provider: &str) -> Result<(), TomaError> {
    let url = app.client.oauth_redirect_url(provider).await?;
    println!("open this URL in your browser to link {provider}:");
    println!("{}", url.bold());
    Ok(())
}

async fn disconnect(app: &App, id: i64) -> Result<(), TomaError> {
    app.client.delete_connection(id).await?;
    println!("{} connection #{id} removed", "ok:".green().bold());
    Ok(())
}

fn status_colored(status: TargetStatus) -> colored::ColoredString {
    match status {
        TargetStatus::Published => status.to_string().green(),
        TargetStatus::Failed => status.to_string().red(),
        _ => status.to_string().normal(),
    }
}

async fn posts(app: &App) -> Result<(), TomaError> {
    let posts = app.client.list_posts().await?;
    if posts.is_empty() {
        println!("no posts composed yet");
        return Ok(());
    }
    for post in &posts {
        let preview: String = post.body.chars().take(60).collect();
        println!("#{:<5} {}", post.id, preview.bold());
        for target in &post.targets {
            let retries = if target.retry_count > 0 {
                format!(" ({} retries)", target.retry_count)
            } else {
                String::new()
            };
            println!(
                "    {:<10} {}{}{}",
                target.provider,
                status_colored(target.status),
                retries,
                target
                    .error
                    .as_deref()
                    .map(|e| format!(" — {e}"))
                    .unwrap_or_default()
            );
        }
    }
    Ok(())
}

async fn post(app: &App, body: String, providers: Vec<String>) -> Result<(), TomaError> {
    let post = app
        .client
        .create_post(&NewPost {
            body,
            providers,
            scheduled_at: None,
        })
        .await?;
    println!(
        "{} post #{} composed for {} network(s); `toma social queue {}` to publish",
        "ok:".green().bold(),
        post.id,
        post.targets.len(),
        post.id
    );
    Ok(())
}

async fn queue(app: &App, id: i64) -> Result<(), TomaError> {
    let post = app.client.queue_post(id).await?;
    println!(
        "{} post #{} queued on {} network(s)",
        "ok:".green().bold(),
        post.id,
        post.targets.len()
    );
    Ok(())
}

async fn retry(app: &App, target_id: i64) -> Result<(), TomaError> {
    let target = app.client.retry_target(target_id).await?;
    println!(
        "{} target #{} re-queued on {} (attempt {})",
        "ok:".green().bold(),
        target.id,
        target.provider,
        target.retry_count
    );
    Ok(())
}
