//! A single entry in the conversation list

use chatlog_core::format::{format_update_time, message_count_label};
use chatlog_core::Conversation;
use gpui::prelude::*;
use gpui::*;

use crate::app::AppRoot;
use crate::theme::Theme;

pub struct ConversationItem;

/// Row colors for one list entry
#[derive(Debug, Clone, Copy, PartialEq)]
struct ItemColors {
    background: Hsla,
    border: Hsla,
    /// `None` keeps the resting background under the pointer
    hover_background: Option<Hsla>,
}

impl ItemColors {
    fn new(theme: &Theme, is_active: bool) -> Self {
        if is_active {
            Self {
                background: theme.primary.opacity(0.15),
                border: theme.primary,
                hover_background: None,
            }
        } else {
            Self {
                background: theme.background_element,
                border: theme.border_subtle,
                hover_background: Some(theme.background_panel),
            }
        }
    }
}

impl ConversationItem {
    /// Render one conversation; clicking it selects it.
    pub fn render(
        conversation: &Conversation,
        index: usize,
        is_active: bool,
        cx: &Context<AppRoot>,
    ) -> impl IntoElement {
        let theme = cx.global::<Theme>();

        let colors = ItemColors::new(theme, is_active);

        let updated = format_update_time(conversation.update_time);
        let count = message_count_label(conversation.message_count);
        let id = conversation.id.clone();

        div()
            .id(SharedString::from(format!("conversation-{}", index)))
            .px(px(12.0))
            .py(px(10.0))
            .rounded(px(8.0))
            .bg(colors.background)
            .border_1()
            .border_color(colors.border)
            .cursor_pointer()
            .hover(|style| {
                let style = style.border_color(theme.border_active);
                match colors.hover_background {
                    Some(bg) => style.bg(bg),
                    None => style,
                }
            })
            .on_click(cx.listener(move |this, _event, _window, cx| {
                this.select_conversation(Some(id.clone()), cx);
            }))
            .child(
                div()
                    .flex()
                    .flex_col()
                    .gap(px(4.0))
                    .child(
                        div()
                            .font_weight(if is_active { FontWeight::SEMIBOLD } else { FontWeight::MEDIUM })
                            .text_ellipsis()
                            .child(conversation.display_title().to_string()),
                    )
                    .when(updated.is_some() || count.is_some(), |el| {
                        el.child(
                            div()
                                .flex()
                                .items_center()
                                .justify_between()
                                .gap(px(8.0))
                                .text_xs()
                                .text_color(theme.text_muted)
                                .child(updated.unwrap_or_default())
                                .child(count.unwrap_or_default()),
                        )
                    }),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::prelude::v1::test;
    use chatlog_core::ThemeMode;

    #[test]
    fn test_active_item_keeps_highlight_on_hover() {
        for mode in [ThemeMode::Light, ThemeMode::Dark] {
            let theme = Theme::for_mode(mode);
            let active = ItemColors::new(&theme, true);
            assert_eq!(active.background, theme.primary.opacity(0.15));
            assert_eq!(active.hover_background, None);
        }
    }

    #[test]
    fn test_inactive_item_hover_background() {
        let theme = Theme::for_mode(ThemeMode::Light);
        let inactive = ItemColors::new(&theme, false);
        assert_eq!(inactive.background, theme.background_element);
        assert_eq!(inactive.border, theme.border_subtle);
        assert_eq!(inactive.hover_background, Some(theme.background_panel));
    }
}
