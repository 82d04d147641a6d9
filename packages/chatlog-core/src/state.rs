//! Viewer state: the single source of truth for the conversation screen
//!
//! Holds the fetched conversation list, the active selection, the search
//! query, the theme flag, and the displayed messages. Every message fetch is
//! tagged with a [`MessageTicket`]; results carrying a superseded ticket are
//! dropped, so the most recent selection always wins regardless of the order
//! in which responses arrive.

use crate::search::filter_conversations;
use crate::theme::ThemeMode;
use crate::types::{Conversation, ConversationId, Message};
use crate::Result;

// ============================================================================
// Supporting Types
// ============================================================================

/// Progress of a single fetch
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

impl LoadStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadStatus::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadStatus::Failed(reason) => Some(reason),
            _ => None,
        }
    }
}

/// Tag attached to a message fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageTicket {
    conversation_id: ConversationId,
    generation: u64,
}

impl MessageTicket {
    pub fn conversation_id(&self) -> &ConversationId {
        &self.conversation_id
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// What the conversation list area should show
#[derive(Debug, PartialEq)]
pub enum ListView<'a> {
    Loading,
    Failed(&'a str),
    /// The server returned no conversations at all
    Empty,
    /// Conversations exist but the search hides all of them
    NoMatches,
    Items(Vec<&'a Conversation>),
}

// ============================================================================
// Viewer State
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct ViewerState {
    conversations: Vec<Conversation>,
    conversations_status: LoadStatus,
    active_id: Option<ConversationId>,
    search_query: String,
    theme_mode: ThemeMode,
    messages: Vec<Message>,
    messages_status: LoadStatus,
    generation: u64,
}

impl ViewerState {
    pub fn new(theme_mode: ThemeMode) -> Self {
        Self {
            theme_mode,
            ..Self::default()
        }
    }

    // ========================================================================
    // Conversation List
    // ========================================================================

    pub fn begin_conversations_load(&mut self) {
        self.conversations_status = LoadStatus::Loading;
    }

    /// Store the list response and select its first entry.
    ///
    /// Returns the ticket for the initial message fetch, if a conversation
    /// was selected. On failure the list stays empty and nothing is selected.
    pub fn apply_conversations(&mut self, result: Result<Vec<Conversation>>) -> Option<MessageTicket> {
        match result {
            Ok(conversations) => {
                tracing::debug!("Loaded {} conversations", conversations.len());
                let first = conversations.first().map(|c| c.id.clone());
                self.conversations = conversations;
                self.conversations_status = LoadStatus::Loaded;
                first.and_then(|id| self.select(Some(id)))
            }
            Err(e) => {
                tracing::warn!("Failed to load conversations: {}", e);
                self.conversations.clear();
                self.conversations_status = LoadStatus::Failed(e.to_string());
                None
            }
        }
    }

    pub fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    pub fn conversations_status(&self) -> &LoadStatus {
        &self.conversations_status
    }

    /// Conversations matching the current search query
    pub fn visible_conversations(&self) -> Vec<&Conversation> {
        filter_conversations(&self.conversations, &self.search_query)
    }

    pub fn list_view(&self) -> ListView<'_> {
        match &self.conversations_status {
            LoadStatus::Idle | LoadStatus::Loading => ListView::Loading,
            LoadStatus::Failed(reason) => ListView::Failed(reason),
            LoadStatus::Loaded if self.conversations.is_empty() => ListView::Empty,
            LoadStatus::Loaded => {
                let visible = self.visible_conversations();
                if visible.is_empty() {
                    ListView::NoMatches
                } else {
                    ListView::Items(visible)
                }
            }
        }
    }

    // ========================================================================
    // Search
    // ========================================================================

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    /// Replace the search query. Never changes the selection.
    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    // ========================================================================
    // Selection & Messages
    // ========================================================================

    pub fn active_id(&self) -> Option<&ConversationId> {
        self.active_id.as_ref()
    }

    pub fn is_active(&self, id: &ConversationId) -> bool {
        self.active_id.as_ref() == Some(id)
    }

    /// The active conversation, if its id is in the fetched list
    pub fn active_conversation(&self) -> Option<&Conversation> {
        self.active_id
            .as_ref()
            .and_then(|id| self.conversations.iter().find(|c| &c.id == id))
    }

    /// Change the active selection.
    ///
    /// Returns a ticket when a message fetch must be issued. Displayed
    /// messages are cleared immediately and any in-flight fetch becomes
    /// stale. Re-selecting the active conversation only refetches after a
    /// failed load.
    pub fn select(&mut self, id: Option<ConversationId>) -> Option<MessageTicket> {
        if id.is_some()
            && id == self.active_id
            && !matches!(self.messages_status, LoadStatus::Failed(_))
        {
            return None;
        }

        self.generation += 1;
        self.messages.clear();
        self.active_id = id;

        match &self.active_id {
            Some(id) => {
                self.messages_status = LoadStatus::Loading;
                Some(MessageTicket {
                    conversation_id: id.clone(),
                    generation: self.generation,
                })
            }
            None => {
                self.messages_status = LoadStatus::Idle;
                None
            }
        }
    }

    /// The visible conversation after (or before) the active one.
    ///
    /// With no visible active conversation this is the first (or last)
    /// visible entry. Returns `None` at either end of the list.
    pub fn adjacent_visible(&self, forward: bool) -> Option<ConversationId> {
        let visible = self.visible_conversations();
        let position = self
            .active_id
            .as_ref()
            .and_then(|id| visible.iter().position(|c| &c.id == id));

        let next = match (position, forward) {
            (None, true) => visible.first(),
            (None, false) => visible.last(),
            (Some(i), true) => visible.get(i + 1),
            (Some(i), false) => i.checked_sub(1).and_then(|i| visible.get(i)),
        };
        next.map(|c| c.id.clone())
    }

    /// Whether a fetch tagged with `ticket` may still update the view
    pub fn is_current(&self, ticket: &MessageTicket) -> bool {
        ticket.generation == self.generation && self.is_active(&ticket.conversation_id)
    }

    /// Apply a message fetch result. Stale results are discarded.
    ///
    /// Returns `true` when the result was applied.
    pub fn apply_messages(&mut self, ticket: &MessageTicket, result: Result<Vec<Message>>) -> bool {
        if !self.is_current(ticket) {
            tracing::debug!(
                "Discarding stale messages for {} (generation {} != {})",
                ticket.conversation_id,
                ticket.generation,
                self.generation
            );
            return false;
        }

        match result {
            Ok(messages) => {
                tracing::debug!("Loaded {} messages for {}", messages.len(), ticket.conversation_id);
                self.messages = messages;
                self.messages_status = LoadStatus::Loaded;
            }
            Err(e) => {
                tracing::warn!("Failed to load conversation {}: {}", ticket.conversation_id, e);
                self.messages.clear();
                self.messages_status = LoadStatus::Failed(e.to_string());
            }
        }
        true
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn messages_status(&self) -> &LoadStatus {
        &self.messages_status
    }

    /// Changes whenever the displayed message set is replaced
    pub fn message_generation(&self) -> u64 {
        self.generation
    }

    // ========================================================================
    // Theme
    // ========================================================================

    pub fn theme_mode(&self) -> ThemeMode {
        self.theme_mode
    }

    pub fn toggle_theme(&mut self) -> ThemeMode {
        self.theme_mode = self.theme_mode.toggle();
        self.theme_mode
    }
}
