// SPDX-FileCopyrightText: 2026 Toma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `toma generate` and `toma jobs` — the content-generation workflow.

use std::str::FromStr;
use std::time::Duration;

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use toma_api::{GenerateRequest, GenerationQuery, JobStatus, PromptFor};
use toma_core::{Role, TomaError};
use toma_session::require_role;

use crate::{gate, App};

fn parse_prompt_for(raw: &str) -> Result<PromptFor, TomaError> {
    PromptFor::from_str(raw).map_err(|_| {
        TomaError::Internal(format!(
            "unknown automation flavor `{raw}` (expected blog, youtube, topic, or launch)"
        ))
    })
}

pub(crate) async fn generate(
    app: &App,
    url: &str,
    prompt_for: &str,
    title: Option<String>,
    wait: bool,
) -> Result<(), TomaError> {
    if !gate(require_role(&app.resolver, Role::Customer)) {
        return Ok(());
    }
    let prompt_for = parse_prompt_for(prompt_for)?;

    // Freshly-registered customers may not have a customer id yet; treat
    // that as a transient and retry a bounded number of times.
    let customer_id = app
        .client
        .resolve_customer_id(
            app.config.api.customer_id_retry_attempts,
            Duration::from_millis(app.config.api.customer_id_retry_delay_ms),
        )
        .await?;

    let request = GenerateRequest {
        customer_id,
        prompt_for,
        url: url.to_string(),
        title,
    };
    let job = app.client.generate(&request).await?;
    println!(
        "{} job {} submitted ({}, {})",
        "ok:".green().bold(),
        job.id,
        job.prompt_for,
        job.status
    );

    if !wait {
        return Ok(());
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(format!("waiting for job {}", job.id));
    spinner.enable_steady_tick(Duration::from_millis(120));

    let interval = Duration::from_secs(app.config.api.poll_interval_secs);
    let finished = app
        .client
        .wait_for_completion(customer_id, job.id, interval, 120)
        .await;
    spinner.finish_and_clear();

    let finished = finished?;
    match finished.status {
        JobStatus::Completed => println!(
            "{} job {} completed{}",
            "ok:".green().bold(),
            finished.id,
            finished
                .title
                .map(|t| format!(": {t}"))
                .unwrap_or_default()
        ),
        status => println!("{} job {} ended as {status}", "warn:".yellow().bold(), finished.id),
    }
    Ok(())
}

pub(crate) async fn jobs(
    app: &App,
    prompt_for: Option<String>,
    page: Option<u32>,
    per_page: Option<u32>,
    search: Option<String>,
) -> Result<(), TomaError> {
    if !gate(require_role(&app.resolver, Role::Customer)) {
        return Ok(());
    }
    let customer_id = app
        .client
        .resolve_customer_id(
            app.config.api.customer_id_retry_attempts,
            Duration::from_millis(app.config.api.customer_id_retry_delay_ms),
        )
        .await?;

    let query = GenerationQuery {
        customer_id: Some(customer_id),
        prompt_for: prompt_for.as_deref().map(parse_prompt_for).transpose()?,
        page,
        per_page,
        q: search,
    };
    let listing = app.client.list_generations(&query).await?;

    if listing.data.is_empty() {
        println!("no generation jobs");
        return Ok(());
    }
    for job in &listing.data {
        let status = match job.status {
            JobStatus::Completed => job.status.to_string().green(),
            JobStatus::Failed => job.status.to_string().red(),
            _ => job.status.to_string().normal(),
        };
        println!(
            "#{:<6} {:<8} {:<11} {}",
            job.id,
            job.prompt_for,
            status,
            job.title.as_deref().unwrap_or(&job.url)
        );
    }
    if let Some(total) = listing.total {
        println!("{} of {total} shown", listing.data.len());
    }
    Ok(())
}
