//! # Epic Events CRM
//!
//! Role-gated command-line CRM: collaborators authenticate and manage
//! clients, contracts, and events, subject to per-role permission checks.
//!
//! ## Usage
//!
//! ```bash
//! epicevents seed      # provision the database and demo collaborators
//! epicevents           # interactive session (login + role menu)
//! epicevents migrate   # apply pending migrations and exit
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use epicevents_cli::app::AppState;
use epicevents_cli::config::Config;
use epicevents_cli::{controllers, seed};

#[derive(Parser)]
#[command(name = "epicevents", version, about = "Epic Events CRM")]
struct Cli {
    /// Path to the settings file (defaults to ./epicevents.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Start an interactive session (default)
    Run,

    /// Provision the database and create the demo collaborators
    Seed,

    /// Apply pending migrations and exit
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing; logs go to stderr so they don't interleave with
    // the menus
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "epicevents=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    match cli.command.unwrap_or(Command::Run) {
        Command::Seed => seed::run(&config).await,
        Command::Migrate => {
            let pool = epicevents_core::db::create_pool(config.database_config()).await?;
            epicevents_core::db::run_migrations(&pool).await?;
            tracing::info!("migrations applied");
            Ok(())
        }
        Command::Run => {
            let pool = epicevents_core::db::create_pool(config.database_config()).await?;
            epicevents_core::db::run_migrations(&pool).await?;

            let state = AppState::new(pool, config);
            controllers::run(&state).await
        }
    }
}
