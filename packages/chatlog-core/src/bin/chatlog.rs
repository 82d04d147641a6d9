//! Chatlog CLI - headless conversation browsing.
//!
//! Uses the same client, search, and markdown rendering as the desktop viewer.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use chatlog_core::{
    format::{format_update_time, message_count_label},
    render_markdown, ConfigOverrides, ConversationClient, ConversationId, ViewerConfig,
    ViewerState,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "chatlog")]
#[command(about = "Browse saved chat conversations from the command line")]
#[command(version)]
struct Cli {
    /// Conversation server base URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List conversations in server order
    List {
        /// Only show conversations whose title contains this text
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Print the messages of one conversation
    Show {
        /// Conversation ID
        id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let overrides = ConfigOverrides {
        base_url: cli.base_url,
        theme: None,
    };
    let config = ViewerConfig::load(&overrides).context("Failed to load configuration")?;
    let client = ConversationClient::from_config(&config)?;

    match cli.command {
        Commands::List { search } => list(&client, &config, search.unwrap_or_default()).await,
        Commands::Show { id } => show(&client, &config, ConversationId::new(id)).await,
    }
}

async fn list(client: &ConversationClient, config: &ViewerConfig, query: String) -> Result<()> {
    let mut state = ViewerState::new(config.theme);
    state.begin_conversations_load();
    state.apply_conversations(client.list_conversations().await);

    if let Some(reason) = state.conversations_status().error() {
        anyhow::bail!("Failed to load conversations: {}", reason);
    }

    state.set_search_query(query);
    let visible = state.visible_conversations();

    if state.conversations().is_empty() {
        println!("No conversations found");
        return Ok(());
    }
    if visible.is_empty() {
        println!("No matching conversations");
        return Ok(());
    }

    for conversation in visible {
        let mut details = Vec::new();
        if let Some(updated) = format_update_time(conversation.update_time) {
            details.push(updated);
        }
        if let Some(count) = message_count_label(conversation.message_count) {
            details.push(count);
        }

        if details.is_empty() {
            println!("{}\t{}", conversation.id, conversation.display_title());
        } else {
            println!(
                "{}\t{}\t({})",
                conversation.id,
                conversation.display_title(),
                details.join(", ")
            );
        }
    }

    Ok(())
}

async fn show(client: &ConversationClient, config: &ViewerConfig, id: ConversationId) -> Result<()> {
    let messages = client
        .conversation_messages(&id)
        .await
        .with_context(|| format!("Failed to load conversation {}", id))?;

    for (i, message) in messages.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("[{}]", message.role.as_str());
        println!("{}", render_markdown(&message.text, config.theme).plain_text());
    }

    Ok(())
}
