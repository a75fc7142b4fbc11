//! Command-line simulation of a short link's lifecycle.
//!
//! Registers a user, shortens a URL, then resolves the code repeatedly and
//! prints each outcome together with the lifecycle notifications it caused.
//!
//! # Usage
//!
//! ```bash
//! # Link that dies after two clicks
//! cargo run -- https://example.com --max-clicks 2 --resolves 3
//!
//! # Custom credentials and a 10-minute expiration
//! cargo run -- https://example.com -l alice -p secret --expires-in 10
//!
//! # Notifications as log lines instead of console output
//! cargo run -- https://example.com --events log
//! ```
//!
//! # Environment Variables
//!
//! All engine options are read from the environment (or `.env`); see
//! [`short_link_service::config`].

use short_link_service::application::sweeper::run_sweeper;
use short_link_service::config::{Config, load_from_env};
use short_link_service::domain::entities::NewLink;
use short_link_service::domain::event_sink::EventSink;
use short_link_service::domain::link_event::LinkEvent;
use short_link_service::infrastructure::events::{
    ChannelEventSink, NullEventSink, TracingEventSink, run_event_worker,
};
use short_link_service::state::AppState;

use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use clap::{Parser, ValueEnum};
use colored::*;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Short link lifecycle simulator.
#[derive(Parser)]
#[command(name = "short-link")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// URL to shorten
    url: String,

    /// Login to register and authenticate with
    #[arg(short, long, default_value = "demo_user")]
    login: String,

    /// Password for the login
    #[arg(short, long, default_value = "demo_pass")]
    password: String,

    /// Click budget (defaults to LINK_DEFAULT_MAX_CLICKS)
    #[arg(short, long)]
    max_clicks: Option<u32>,

    /// Minutes until expiration (defaults to LINK_DEFAULT_EXPIRATION_HOURS)
    #[arg(short, long)]
    expires_in: Option<i64>,

    /// Optional link title
    #[arg(short, long)]
    title: Option<String>,

    /// How many times to resolve the code
    #[arg(short = 'n', long, default_value_t = 3)]
    resolves: u32,

    /// Where lifecycle notifications go
    #[arg(long, value_enum, default_value_t = EventOutput::Console)]
    events: EventOutput,
}

/// Destinations for lifecycle notifications.
#[derive(Clone, Copy, ValueEnum)]
enum EventOutput {
    /// Colored lines on stdout
    Console,
    /// Structured log lines
    Log,
    /// Discard
    Off,
}

/// Prints lifecycle notifications to stdout.
struct ConsoleEventSink;

impl EventSink for ConsoleEventSink {
    fn publish(&self, event: LinkEvent) {
        let link = event.link();
        let line = match &event {
            LinkEvent::Created { .. } => format!(
                "created {} -> {} (max clicks {}, expires {})",
                link.code, link.original_url, link.max_clicks, link.expires_at
            )
            .green(),
            LinkEvent::Expired { .. } => {
                format!("expired {} at {}", link.code, link.expires_at).yellow()
            }
            LinkEvent::LimitExceeded { .. } => format!(
                "click limit reached for {} ({}/{})",
                link.code, link.click_count, link.max_clicks
            )
            .red(),
        };

        println!("  {} {}", "event".bright_magenta().bold(), line);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = load_from_env().context("Failed to load configuration")?;

    init_tracing(&config);
    config.print_summary();

    let (sink, rx) = ChannelEventSink::channel(config.event_queue_capacity);
    let consumer: Arc<dyn EventSink> = match cli.events {
        EventOutput::Console => Arc::new(ConsoleEventSink),
        EventOutput::Log => Arc::new(TracingEventSink::new()),
        EventOutput::Off => Arc::new(NullEventSink::new()),
    };
    let worker = tokio::spawn(run_event_worker(rx, consumer));

    let sweep_interval = config
        .is_sweep_enabled()
        .then(|| std::time::Duration::from_secs(config.sweep_interval_seconds));

    let state = AppState::new(config, Arc::new(sink));

    let sweeper = sweep_interval
        .map(|period| tokio::spawn(run_sweeper(state.lifecycle_service.clone(), period)));

    let outcome = simulate(&state, cli).await;

    drop(state);
    if let Some(handle) = sweeper {
        handle.abort();
        let _ = handle.await;
    }
    worker.await.context("Event worker panicked")?;

    outcome
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if config.log_format.eq_ignore_ascii_case("json") {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Runs the register, shorten, resolve sequence against `state`.
async fn simulate(state: &AppState, cli: Cli) -> Result<()> {
    println!("{}", "Short link simulation".bright_blue().bold());
    println!();

    state
        .register(&cli.login, &cli.password)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to register '{}': {}", cli.login, e))?;
    state
        .authenticate(&cli.login, &cli.password)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to authenticate: {}", e))?;
    println!("{} {}", "Logged in as".bright_white(), cli.login.cyan());

    let mut new_link = NewLink::new(cli.url);
    new_link.title = cli.title;
    new_link.max_clicks = cli.max_clicks;
    new_link.expires_at = cli.expires_in.map(|m| Utc::now() + Duration::minutes(m));

    let link = state
        .create_link(new_link)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create link: {}", e))?;

    println!(
        "{} {}",
        "Short URL:".bright_white(),
        state.short_url(&link).bright_yellow().bold()
    );
    println!(
        "  Clicks allowed: {}, expires: {}",
        link.max_clicks.to_string().cyan(),
        link.expires_at.to_string().cyan()
    );
    println!();

    for attempt in 1..=cli.resolves {
        match state.resolve_link(&link.code).await {
            Ok(url) => println!(
                "{} #{}: {} {}",
                "resolve".bright_white(),
                attempt,
                "->".green(),
                url.green()
            ),
            Err(e) => println!(
                "{} #{}: {} {}",
                "resolve".bright_white(),
                attempt,
                e.code().red().bold(),
                e.to_string().red()
            ),
        }
        tokio::task::yield_now().await;
    }

    println!();
    let remaining = state
        .list_links()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?;
    println!(
        "{} {}",
        "Links still active:".bright_white(),
        remaining.len().to_string().cyan()
    );

    state.logout();
    Ok(())
}
