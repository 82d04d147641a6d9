//! View modules for Chatlog Desktop

pub mod chat;
