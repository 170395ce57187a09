//! Threadly CLI entry point.
//!
//! Binary name: `thly`
//!
//! Parses CLI arguments, initializes the database and session controller,
//! then dispatches to the interactive chat loop or a one-shot command.

mod cli;
mod state;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,threadly=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    // Initialize application state (DB, provider, controller)
    let state = AppState::init().await?;

    match cli.command {
        Commands::Chat => {
            cli::chat::run_chat_loop(&state).await?;
        }

        Commands::List => {
            cli::chats::list_chats(&state, cli.json).await?;
        }

        Commands::Delete { id, force } => {
            cli::chats::delete_chat(&state, &id, force, cli.json).await?;
        }

        Commands::Rename { id, title } => {
            cli::chats::rename_chat(&state, &id, &title, cli.json).await?;
        }

        Commands::SignOut => {
            cli::chats::sign_out(&state, cli.json).await?;
        }
    }

    Ok(())
}
