//! Main chat loop orchestration.
//!
//! Drives the session controller from terminal input: loads the chat
//! list, renders a banner, then loops over lines. Slash commands map to
//! controller operations; plain text becomes a message send with a
//! thinking spinner while the completion is in flight.

use console::style;
use tracing::warn;

use threadly_core::session::controller::SendOutcome;
use threadly_types::chat::Chat;
use threadly_types::error::SessionError;
use threadly_types::llm::MessageRole;
use threadly_types::model::ModelId;

use crate::state::AppState;

use super::commands::{self, ChatCommand};
use super::input::{ChatInput, InputEvent};

/// Run the interactive chat session.
pub async fn run_chat_loop(state: &AppState) -> anyhow::Result<()> {
    state.controller.load_chats(&state.user).await?;

    print_banner(state).await;

    let prompt = format!("  {} ", style("You >").green().bold());
    let (mut chat_input, _writer) = ChatInput::new(prompt)
        .map_err(|e| anyhow::anyhow!("Failed to initialize input: {e}"))?;

    loop {
        match chat_input.read_line().await {
            InputEvent::Eof => {
                println!("\n  {}", style("Session ended.").dim());
                break;
            }
            InputEvent::Interrupted => {
                println!("\n  {}", style("Press Ctrl+D to exit, or keep chatting.").dim());
                continue;
            }
            InputEvent::Message(text) => {
                if text.is_empty() {
                    continue;
                }

                if let Some(cmd) = commands::parse(&text) {
                    match cmd {
                        ChatCommand::Help => commands::print_help(),
                        ChatCommand::Clear => chat_input.clear(),
                        ChatCommand::Exit => {
                            println!("\n  {}", style("Session ended.").dim());
                            break;
                        }
                        ChatCommand::New => handle_new(state).await,
                        ChatCommand::Chats => print_chat_list(state).await,
                        ChatCommand::Select(index) => handle_select(state, &index).await,
                        ChatCommand::Rename(title) => handle_rename(state, &title).await,
                        ChatCommand::Delete => handle_delete(state).await,
                        ChatCommand::Model(arg) => handle_model(state, arg.as_deref()).await,
                        ChatCommand::Unknown(cmd_name) => {
                            println!(
                                "\n  {} Unknown command: {}. Type /help for available commands.\n",
                                style("?").yellow().bold(),
                                style(cmd_name).dim()
                            );
                        }
                    }
                    continue;
                }

                handle_send(state, &text).await;
            }
        }
    }

    Ok(())
}

/// Print the session banner with the chat count and active model.
async fn print_banner(state: &AppState) {
    let snapshot = state.controller.snapshot().await;
    println!();
    println!(
        "  {} {}",
        style("Threadly").cyan().bold(),
        style(format!("({})", snapshot.selected_model)).dim()
    );
    if snapshot.chats.is_empty() {
        println!("  {}", style("No chats yet. /new starts one.").dim());
    } else {
        println!(
            "  {}",
            style(format!(
                "{} chat(s). /chats lists them, /select N opens one.",
                snapshot.chats.len()
            ))
            .dim()
        );
    }
    println!("  {}", style("Type /help for commands.").dim());
    println!();
}

async fn handle_new(state: &AppState) {
    match state.controller.create_chat(&state.user).await {
        Ok(chat) => {
            println!(
                "\n  {} Created '{}'\n",
                style("✓").green().bold(),
                chat.title
            );
        }
        Err(e) => print_error(&e),
    }
}

/// Render the chat list with 1-based positions for `/select`.
async fn print_chat_list(state: &AppState) {
    if let Err(e) = state.controller.load_chats(&state.user).await {
        print_error(&e);
        return;
    }
    let snapshot = state.controller.snapshot().await;

    if snapshot.chats.is_empty() {
        println!("\n  {}\n", style("No chats yet. /new starts one.").dim());
        return;
    }

    println!();
    for (i, chat) in snapshot.chats.iter().enumerate() {
        let marker = if snapshot.active_chat.as_ref().is_some_and(|a| a.id == chat.id) {
            format!("{}", style(">").cyan().bold())
        } else {
            " ".to_string()
        };
        println!(
            "  {} {} {}  {}",
            marker,
            style(format!("{}.", i + 1)).bold(),
            chat.title,
            style(chat.created_at.format("%Y-%m-%d %H:%M").to_string()).dim()
        );
    }
    println!();
}

async fn handle_select(state: &AppState, index: &str) {
    let snapshot = state.controller.snapshot().await;

    let chat: Option<Chat> = index
        .parse::<usize>()
        .ok()
        .filter(|n| *n >= 1)
        .and_then(|n| snapshot.chats.get(n - 1).cloned());

    let Some(chat) = chat else {
        println!(
            "\n  {} No chat at position '{}'. /chats lists them.\n",
            style("?").yellow().bold(),
            index
        );
        return;
    };

    let title = chat.title.clone();
    match state.controller.select_chat(chat).await {
        Ok(()) => {
            println!("\n  {} Switched to '{}'\n", style("✓").green().bold(), title);
            print_history(state).await;
        }
        Err(e) => print_error(&e),
    }
}

/// Replay the active chat's persisted messages.
async fn print_history(state: &AppState) {
    let snapshot = state.controller.snapshot().await;
    for msg in &snapshot.messages {
        print_message(msg.role, &msg.content);
    }
    if !snapshot.messages.is_empty() {
        println!();
    }
}

async fn handle_rename(state: &AppState, title: &str) {
    let snapshot = state.controller.snapshot().await;
    let Some(active) = snapshot.active_chat else {
        println!(
            "\n  {} No active chat. /select one first.\n",
            style("?").yellow().bold()
        );
        return;
    };

    match state.controller.rename_chat(&active.id, title).await {
        Ok(()) => {
            println!(
                "\n  {} Renamed to '{}'\n",
                style("✓").green().bold(),
                title.trim()
            );
        }
        Err(e) => print_error(&e),
    }
}

async fn handle_delete(state: &AppState) {
    let snapshot = state.controller.snapshot().await;
    let Some(active) = snapshot.active_chat else {
        println!(
            "\n  {} No active chat. /select one first.\n",
            style("?").yellow().bold()
        );
        return;
    };

    match state.controller.delete_chat(&active.id).await {
        Ok(()) => {
            println!(
                "\n  {} Deleted '{}'\n",
                style("✓").green().bold(),
                active.title
            );
        }
        Err(e) => print_error(&e),
    }
}

async fn handle_model(state: &AppState, arg: Option<&str>) {
    let Some(id) = arg else {
        let snapshot = state.controller.snapshot().await;
        println!();
        for model in ModelId::ALL {
            let marker = if model == snapshot.selected_model {
                format!("{}", style(">").cyan().bold())
            } else {
                " ".to_string()
            };
            println!("  {} {}", marker, model);
        }
        println!();
        return;
    };

    match state.controller.select_model(id).await {
        Ok(model) => {
            println!("\n  {} Model set to {}\n", style("✓").green().bold(), model);
        }
        Err(e) => print_error(&e),
    }
}

async fn handle_send(state: &AppState, text: &str) {
    let snapshot = state.controller.snapshot().await;
    if snapshot.active_chat.is_none() {
        println!(
            "\n  {} No active chat. /new creates one, /select N opens one.\n",
            style("?").yellow().bold()
        );
        return;
    }

    let spinner = indicatif::ProgressBar::new_spinner();
    spinner.set_style(
        indicatif::ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| indicatif::ProgressStyle::default_spinner()),
    );
    spinner.set_message("thinking...");
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));

    let result = state.controller.send_message(text).await;
    spinner.finish_and_clear();

    match result {
        Ok(SendOutcome::Sent { assistant, .. }) => {
            print_message(MessageRole::Assistant, &assistant.content);
            println!();
        }
        Ok(SendOutcome::Ignored) => {
            warn!("Send ignored while another request is in flight");
            println!(
                "\n  {} Still waiting on the previous reply.\n",
                style("!").yellow().bold()
            );
        }
        Err(e) => print_error(&e),
    }
}

fn print_message(role: MessageRole, content: &str) {
    let label = match role {
        MessageRole::User => format!("{}", style("You").green().bold()),
        MessageRole::Assistant => format!("{}", style("Gemini").cyan().bold()),
    };
    println!("  {} {}", label, content.trim());
}

fn print_error(err: &SessionError) {
    println!("\n  {} {err}\n", style("!").red().bold());
}
