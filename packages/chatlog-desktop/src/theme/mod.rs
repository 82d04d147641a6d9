//! Theme system for Chatlog Desktop
//!
//! Two built-in palettes, one per display mode. The active palette is a
//! GPUI global swapped in place when the mode toggles.

mod colors;
mod themes;

pub use colors::*;
pub use themes::*;

use chatlog_core::ThemeMode;
use gpui::*;

// ============================================================================
// Theme Structure
// ============================================================================

/// Complete theme with all color definitions
#[derive(Debug, Clone)]
pub struct Theme {
    pub id: &'static str,
    pub name: &'static str,
    pub mode: ThemeMode,

    // Core colors
    pub primary: Hsla,
    pub error: Hsla,

    // Text colors
    pub text: Hsla,
    pub text_muted: Hsla,

    // Background colors
    pub background: Hsla,
    pub background_panel: Hsla,
    pub background_element: Hsla,

    // Border colors
    pub border: Hsla,
    pub border_active: Hsla,
    pub border_subtle: Hsla,

    // Message rows
    pub user_bubble: Hsla,
    pub assistant_bubble: Hsla,
    pub user_avatar: Hsla,
    pub assistant_avatar: Hsla,

    // Markdown colors
    pub markdown_heading: Hsla,
    pub markdown_link: Hsla,
    pub markdown_code: Hsla,
    pub markdown_code_bg: Hsla,
    pub markdown_code_block_bg: Hsla,
    pub markdown_block_quote: Hsla,
    pub markdown_list_enumeration: Hsla,
    pub markdown_horizontal_rule: Hsla,
}

impl Theme {
    /// The built-in palette for a display mode
    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => themes::chatlog_light(),
            ThemeMode::Dark => themes::chatlog_dark(),
        }
    }

    pub fn is_dark(&self) -> bool {
        self.mode.is_dark()
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::for_mode(ThemeMode::default())
    }
}

impl Global for Theme {}

// ============================================================================
// Theme Initialization
// ============================================================================

/// Initialize the theme system
pub fn init(mode: ThemeMode, cx: &mut App) {
    let theme = Theme::for_mode(mode);
    tracing::debug!("Theme system initialized with {}", theme.name);
    cx.set_global(theme);
}

/// Switch the global palette to match `mode`
pub fn apply_mode(mode: ThemeMode, cx: &mut App) {
    let theme = Theme::for_mode(mode);
    tracing::info!("Theme changed to: {}", theme.id);
    cx.set_global(theme);
}
