//! One-shot chat management commands: list, delete, rename, sign-out.

use comfy_table::{presets, Cell, Color, ContentArrangement, Table};
use console::style;
use dialoguer::Confirm;
use indicatif::{ProgressBar, ProgressStyle};
use uuid::Uuid;

use threadly_types::chat::Chat;

use crate::state::AppState;

/// Load the user's chats and return the one with the given id.
async fn find_chat(state: &AppState, id: &Uuid) -> anyhow::Result<Chat> {
    state.controller.load_chats(&state.user).await?;
    let snapshot = state.controller.snapshot().await;
    snapshot
        .chats
        .into_iter()
        .find(|c| c.id == *id)
        .ok_or_else(|| anyhow::anyhow!("No chat found with id '{id}'"))
}

/// List all chats for the current user.
pub async fn list_chats(state: &AppState, json: bool) -> anyhow::Result<()> {
    state.controller.load_chats(&state.user).await?;
    let snapshot = state.controller.snapshot().await;

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot.chats)?);
        return Ok(());
    }

    if snapshot.chats.is_empty() {
        println!();
        println!("  No chats yet. Start one with: thly chat");
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Title").fg(Color::White),
        Cell::new("Id").fg(Color::White),
        Cell::new("Created").fg(Color::White),
    ]);

    for chat in &snapshot.chats {
        table.add_row(vec![
            Cell::new(&chat.title),
            Cell::new(chat.id.to_string()),
            Cell::new(chat.created_at.format("%Y-%m-%d %H:%M").to_string()),
        ]);
    }

    println!("{table}");
    Ok(())
}

/// Delete a chat after confirmation.
pub async fn delete_chat(
    state: &AppState,
    id: &Uuid,
    force: bool,
    json: bool,
) -> anyhow::Result<()> {
    let chat = find_chat(state, id).await?;

    if !force && !json {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Delete chat '{}' and all of its messages?",
                chat.title
            ))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("  Cancelled.");
            return Ok(());
        }
    }

    let spinner = if !json {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.red} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(format!("Deleting '{}'...", chat.title));
        pb.enable_steady_tick(std::time::Duration::from_millis(80));
        Some(pb)
    } else {
        None
    };

    let result = state.controller.delete_chat(id).await;

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    result?;

    if json {
        println!(
            "{}",
            serde_json::json!({ "deleted": id.to_string(), "title": chat.title })
        );
    } else {
        println!("  {} Deleted '{}'", style("✓").green().bold(), chat.title);
    }
    Ok(())
}

/// Rename a chat.
pub async fn rename_chat(
    state: &AppState,
    id: &Uuid,
    title: &str,
    json: bool,
) -> anyhow::Result<()> {
    if title.trim().is_empty() {
        anyhow::bail!("Title cannot be empty");
    }

    let chat = find_chat(state, id).await?;
    state.controller.rename_chat(id, title).await?;

    if json {
        println!(
            "{}",
            serde_json::json!({
                "renamed": id.to_string(),
                "from": chat.title,
                "to": title.trim(),
            })
        );
    } else {
        println!(
            "  {} Renamed '{}' to '{}'",
            style("✓").green().bold(),
            chat.title,
            title.trim()
        );
    }
    Ok(())
}

/// Sign out, discarding the local identity and in-memory session.
pub async fn sign_out(state: &AppState, json: bool) -> anyhow::Result<()> {
    state.controller.sign_out().await;

    if json {
        println!("{}", serde_json::json!({ "signed_out": true }));
    } else {
        println!("  {} Signed out.", style("✓").green().bold());
    }
    Ok(())
}
