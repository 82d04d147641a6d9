//! Chatlog Core - conversation browsing library.
//!
//! This crate provides everything the Chatlog viewer needs that is not tied
//! to a window system:
//!
//! - **API client**: the two read-only calls against the conversation server
//! - **Search**: case-insensitive title filtering
//! - **Viewer state**: selection, load status, and last-request-wins tagging
//! - **Markdown**: sanitized rich documents with highlighted code blocks
//! - **Config**: file, environment, and command-line resolution
//!
//! # Example
//!
//! ```rust,no_run
//! use chatlog_core::{ConversationClient, ThemeMode, ViewerConfig, ViewerState};
//!
//! # async fn run() -> chatlog_core::Result<()> {
//! let config = ViewerConfig::default();
//! let client = ConversationClient::from_config(&config)?;
//! let mut state = ViewerState::new(ThemeMode::Light);
//!
//! state.begin_conversations_load();
//! let ticket = state.apply_conversations(client.list_conversations().await);
//!
//! if let Some(ticket) = ticket {
//!     let messages = client.conversation_messages(ticket.conversation_id()).await;
//!     state.apply_messages(&ticket, messages);
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod format;
pub mod markdown;
pub mod search;
pub mod state;
pub mod theme;
pub mod types;

pub use api::ConversationClient;
pub use config::{ConfigOverrides, ViewerConfig};
pub use markdown::{render_markdown, Block, Color, RichDocument, Span, SpanStyle};
pub use search::{filter_conversations, matches_title};
pub use state::{ListView, LoadStatus, MessageTicket, ViewerState};
pub use theme::ThemeMode;
pub use types::{Conversation, ConversationId, Message, MessageId, Role};

/// Error types for chatlog-core operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request failed: {status} {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Request task failed: {0}")]
    Task(String),
}

/// Result type for chatlog-core operations.
pub type Result<T> = std::result::Result<T, Error>;
