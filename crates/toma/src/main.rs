// SPDX-FileCopyrightText: 2026 Toma Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! toma - command-line client for the TOMA content-automation platform.
//!
//! The binary plays the part the router played in the browser client: it
//! builds the one shared [`ApiClient`], runs each feature command behind
//! its route guard, and listens on the session event bus to tell the user
//! when their session has been invalidated.

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::process::ExitCode;
use std::sync::Arc;
use toma_api::ApiClient;
use toma_config::TomaConfig;
use toma_core::TomaError;
use toma_session::{SessionEvents, SessionResolver, SessionStore};
use tracing_subscriber::EnvFilter;

mod auth;
mod content;
mod profile;
mod settings;
mod social;
mod support;
mod users;

/// Everything a command handler needs.
pub(crate) struct App {
    pub config: TomaConfig,
    pub client: ApiClient,
    pub resolver: SessionResolver,
}

/// toma - client for the TOMA content-automation platform.
#[derive(Parser, Debug)]
#[command(name = "toma", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Sign in with email and password.
    Login {
        email: String,
        /// Password; prompted for when omitted.
        #[arg(long)]
        password: Option<String>,
    },
    /// Create a new account (signs you in afterwards).
    Register {
        name: String,
        email: String,
        #[arg(long)]
        password: Option<String>,
        #[arg(long)]
        business_name: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },
    /// Sign out. Local state is cleared even if the server is unreachable.
    Logout,
    /// Show the signed-in user and where their home route is.
    Whoami,
    /// Show or update the customer business profile.
    Profile {
        #[command(subcommand)]
        command: profile::ProfileCommands,
    },
    /// Show or update integration provider settings.
    Settings {
        #[command(subcommand)]
        command: settings::SettingsCommands,
    },
    /// Submit a source URL for content generation.
    Generate {
        url: String,
        /// Automation flavor: blog, youtube, topic, or launch.
        #[arg(long = "for", value_name = "PROMPT_FOR", default_value = "blog")]
        prompt_for: String,
        #[arg(long)]
        title: Option<String>,
        /// Poll until the job reaches a terminal status.
        #[arg(long)]
        wait: bool,
    },
    /// List content-generation jobs.
    Jobs {
        #[arg(long = "for")]
        prompt_for: Option<String>,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        per_page: Option<u32>,
        #[arg(long)]
        search: Option<String>,
    },
    /// Support tickets.
    Tickets {
        #[command(subcommand)]
        command: support::TicketCommands,
    },
    /// Social connections, posts, and the publish queue.
    Social {
        #[command(subcommand)]
        command: social::SocialCommands,
    },
    /// User administration (admin only).
    Users {
        #[command(subcommand)]
        command: users::UserCommands,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match toma_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            toma_config::render_errors(&errors);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config);

    let app = match build_app(config) {
        Ok(app) => app,
        Err(err) => {
            eprintln!("{} {}", "error:".red().bold(), err.display_message());
            return ExitCode::FAILURE;
        }
    };

    // The CLI analogue of the router subscribing to session invalidation:
    // after the command finishes we report any invalidation that happened
    // mid-flight so the user knows why they ended up signed out.
    let mut session_rx = app.client.events().subscribe();

    let result = run_command(&app, cli.command).await;

    if let Ok(toma_session::SessionEvent::Invalidated { reason }) = session_rx.try_recv() {
        eprintln!(
            "{} session ended ({reason}); run `toma login` to sign in again",
            "note:".yellow().bold()
        );
    }

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {}", "error:".red().bold(), err.display_message());
            ExitCode::FAILURE
        }
    }
}

/// Runs a guard decision; on a redirect, prints where the visitor belongs
/// and returns false so the command body is skipped.
///
/// This is the CLI rendering of the silent reroute: a mismatched role is
/// pointed at its own home, never shown an error.
pub(crate) fn gate(outcome: toma_session::GuardOutcome) -> bool {
    match outcome {
        toma_session::GuardOutcome::Allow => true,
        toma_session::GuardOutcome::Redirect(route) => {
            println!(
                "{} this area is not part of your account; your home is {}",
                "redirect:".yellow().bold(),
                route.as_path().bold()
            );
            false
        }
    }
}

fn init_tracing(config: &TomaConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log.level.clone()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_app(config: TomaConfig) -> Result<App, TomaError> {
    let store = Arc::new(SessionStore::open(&config.session.store_path));
    let events = SessionEvents::new();
    let client = ApiClient::new(&config.api, Arc::clone(&store), events)?;
    let resolver = SessionResolver::new(store);
    Ok(App {
        config,
        client,
        resolver,
    })
}

async fn run_command(app: &App, command: Commands) -> Result<(), TomaError> {
    match command {
        Commands::Login { email, password } => auth::login(app, &email, password).await,
        Commands::Register {
            name,
            email,
            password,
            business_name,
            phone,
        } => auth::register(app, name, email, password, business_name, phone).await,
        Commands::Logout => auth::logout(app).await,
        Commands::Whoami => auth::whoami(app),
        Commands::Profile { command } => profile::run(app, command).await,
        Commands::Settings { command } => settings::run(app, command).await,
        Commands::Generate {
            url,
            prompt_for,
            title,
            wait,
        } => content::generate(app, &url, &prompt_for, title, wait).await,
        Commands::Jobs {
            prompt_for,
            page,
            per_page,
            search,
        } => content::jobs(app, prompt_for, page, per_page, search).await,
        Commands::Tickets { command } => support::run(app, command).await,
        Commands::Social { command } => social::run(app, command).await,
        Commands::Users { command } => users::run(app, command).await,
    }
}
