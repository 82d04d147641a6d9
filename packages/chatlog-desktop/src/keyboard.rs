//! Keyboard bindings for Chatlog Desktop

use gpui::*;

/// Key context of the root view
pub const ROOT_CONTEXT: &str = "ChatlogViewer";

actions!(
    chatlog,
    [
        ToggleTheme,
        FocusSearch,
        SelectNextConversation,
        SelectPreviousConversation,
    ]
);

/// Initialize keyboard bindings
pub fn init(cx: &mut App) {
    cx.bind_keys([
        // Theme
        KeyBinding::new("ctrl-shift-t", ToggleTheme, Some(ROOT_CONTEXT)),

        // Search
        KeyBinding::new("ctrl-f", FocusSearch, Some(ROOT_CONTEXT)),

        // Conversation list
        KeyBinding::new("alt-down", SelectNextConversation, Some(ROOT_CONTEXT)),
        KeyBinding::new("alt-up", SelectPreviousConversation, Some(ROOT_CONTEXT)),
    ]);

    tracing::debug!("Keyboard bindings initialized");
}
