//! Slash command parsing for the chat loop.
//!
//! Commands start with `/` and provide in-chat controls for chat
//! management, model selection, and help.

use console::style;

/// Available slash commands in the chat loop.
#[derive(Debug, PartialEq)]
pub enum ChatCommand {
    /// Show available commands.
    Help,
    /// Clear the terminal screen.
    Clear,
    /// Exit the chat session.
    Exit,
    /// Create a new chat and make it active.
    New,
    /// List the user's chats.
    Chats,
    /// Select a chat by its position in the list (1-based).
    Select(String),
    /// Rename the active chat.
    Rename(String),
    /// Delete the active chat.
    Delete,
    /// Switch the model, or list models when no argument is given.
    Model(Option<String>),
    /// Unknown command.
    Unknown(String),
}

/// Parse user input as a slash command.
///
/// Returns `None` if the input doesn't start with `/`.
pub fn parse(input: &str) -> Option<ChatCommand> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let parts: Vec<&str> = trimmed.splitn(2, ' ').collect();
    let cmd = parts[0].to_lowercase();
    let arg = parts.get(1).map(|s| s.trim().to_string());

    match cmd.as_str() {
        "/help" | "/h" | "/?" => Some(ChatCommand::Help),
        "/clear" | "/cls" => Some(ChatCommand::Clear),
        "/exit" | "/quit" | "/q" => Some(ChatCommand::Exit),
        "/new" => Some(ChatCommand::New),
        "/chats" | "/list" => Some(ChatCommand::Chats),
        "/select" | "/sel" => match arg {
            Some(n) if !n.is_empty() => Some(ChatCommand::Select(n)),
            _ => Some(ChatCommand::Unknown(
                "/select requires a chat number".to_string(),
            )),
        },
        "/rename" => match arg {
            Some(title) if !title.is_empty() => Some(ChatCommand::Rename(title)),
            _ => Some(ChatCommand::Unknown(
                "/rename requires a title".to_string(),
            )),
        },
        "/delete" | "/del" => Some(ChatCommand::Delete),
        "/model" => Some(ChatCommand::Model(arg.filter(|a| !a.is_empty()))),
        other => Some(ChatCommand::Unknown(other.to_string())),
    }
}

/// Print the help text listing all available commands.
pub fn print_help() {
    println!();
    println!("  {}", style("Available commands:").bold());
    println!();
    println!(
        "  {}       {}",
        style("/help").cyan(),
        "Show this help message"
    );
    println!(
        "  {}        {}",
        style("/new").cyan(),
        "Create a new chat"
    );
    println!(
        "  {}      {}",
        style("/chats").cyan(),
        "List your chats"
    );
    println!(
        "  {}   {}",
        style("/select N").cyan(),
        "Switch to the Nth chat in the list"
    );
    println!(
        "  {}  {}",
        style("/rename ..").cyan(),
        "Rename the active chat"
    );
    println!(
        "  {}     {}",
        style("/delete").cyan(),
        "Delete the active chat"
    );
    println!(
        "  {}   {}",
        style("/model [m]").cyan(),
        "Show or switch the model"
    );
    println!(
        "  {}      {}",
        style("/clear").cyan(),
        "Clear the screen"
    );
    println!(
        "  {}       {}",
        style("/exit").cyan(),
        "End the chat session"
    );
    println!();
    println!("  {}", style("Ctrl+D to exit").dim());
    println!();
}
