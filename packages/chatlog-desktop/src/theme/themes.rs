//! Built-in theme definitions

use super::colors::{hex, with_alpha};
use super::Theme;
use chatlog_core::ThemeMode;

// ============================================================================
// Light (Default)
// ============================================================================

pub fn chatlog_light() -> Theme {
    let primary = hex("#3b7dd8");

    Theme {
        id: "chatlog-light",
        name: "Chatlog Light",
        mode: ThemeMode::Light,

        primary,
        error: hex("#d1383d"),

        text: hex("#1a1a1a"),
        text_muted: hex("#8a8a8a"),

        background: hex("#ffffff"),
        background_panel: hex("#fafafa"),
        background_element: hex("#f0f0f0"),

        border: hex("#d4d4d4"),
        border_active: hex("#a0a0a0"),
        border_subtle: hex("#e6e6e6"),

        user_bubble: hex("#d0e7ff"),
        assistant_bubble: hex("#f7f7f8"),
        user_avatar: primary,
        assistant_avatar: hex("#10a37f"),

        markdown_heading: hex("#1a1a1a"),
        markdown_link: primary,
        markdown_code: hex("#c7254e"),
        markdown_code_bg: with_alpha(hex("#1a1a1a"), 0.06),
        markdown_code_block_bg: hex("#ffffff"),
        markdown_block_quote: hex("#6a737d"),
        markdown_list_enumeration: hex("#318795"),
        markdown_horizontal_rule: hex("#d4d4d4"),
    }
}

// ============================================================================
// Dark
// ============================================================================

pub fn chatlog_dark() -> Theme {
    let primary = hex("#5c9cf5");

    Theme {
        id: "chatlog-dark",
        name: "Chatlog Dark",
        mode: ThemeMode::Dark,

        primary,
        error: hex("#e06c75"),

        text: hex("#ececf1"),
        text_muted: hex("#8e8ea0"),

        background: hex("#202123"),
        background_panel: hex("#2a2b32"),
        background_element: hex("#343541"),

        border: hex("#4d4d4f"),
        border_active: hex("#6e6e80"),
        border_subtle: hex("#3e3f4b"),

        user_bubble: hex("#1e3a5f"),
        assistant_bubble: hex("#444654"),
        user_avatar: primary,
        assistant_avatar: hex("#19c37d"),

        markdown_heading: hex("#ececf1"),
        markdown_link: hex("#7fb2f7"),
        markdown_code: hex("#f5a742"),
        markdown_code_bg: with_alpha(hex("#ffffff"), 0.08),
        markdown_code_block_bg: hex("#2b303b"),
        markdown_block_quote: hex("#a0a0b0"),
        markdown_list_enumeration: hex("#56b6c2"),
        markdown_horizontal_rule: hex("#565869"),
    }
}
