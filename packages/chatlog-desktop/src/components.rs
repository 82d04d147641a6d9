//! Reusable UI components for Chatlog Desktop

pub mod conversation_item;
pub mod message;
pub mod search_input;
pub mod sidebar;
pub mod theme_toggle;
