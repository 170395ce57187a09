//! CLI command definitions using clap derive.

pub mod chat;
pub mod chats;

use clap::{Parser, Subcommand};
use uuid::Uuid;

/// Threadly: chat with Gemini from your terminal.
#[derive(Parser)]
#[command(name = "thly", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive chat session
    Chat,

    /// List your chats
    #[command(visible_alias = "ls")]
    List,

    /// Delete a chat and all of its messages
    #[command(visible_alias = "rm")]
    Delete {
        /// Id of the chat to delete
        id: Uuid,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Rename a chat
    Rename {
        /// Id of the chat to rename
        id: Uuid,

        /// New title
        title: String,
    },

    /// Sign out and discard the local identity
    SignOut,
}
