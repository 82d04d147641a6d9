//! Sidebar component
//!
//! Search field and conversation list. Renders inline within the parent
//! AppRoot context.

use chatlog_core::ListView;
use gpui::prelude::*;
use gpui::*;

use crate::app::AppRoot;
use crate::components::conversation_item::ConversationItem;
use crate::components::search_input::SearchInput;
use crate::components::theme_toggle::ThemeToggle;
use crate::i18n::I18n;
use crate::state;
use crate::theme::Theme;

/// Sidebar rendering functions
pub struct Sidebar;

impl Sidebar {
    /// Render the sidebar inline within the AppRoot context
    pub fn render_inline(search_input: &Entity<SearchInput>, cx: &Context<AppRoot>) -> impl IntoElement {
        let theme = cx.global::<Theme>();

        div()
            .w(px(300.0))
            .h_full()
            .flex()
            .flex_col()
            .bg(theme.background)
            .border_r_1()
            .border_color(theme.border)
            .child(Self::render_header(cx))
            .child(div().p(px(12.0)).child(search_input.clone()))
            .child(Self::render_list(cx))
            .child(Self::render_footer(cx))
    }

    fn render_header(cx: &Context<AppRoot>) -> impl IntoElement {
        let theme = cx.global::<Theme>();
        let i18n = cx.global::<I18n>();
        let mode = state::viewer(cx).theme_mode();

        div()
            .h(px(48.0))
            .px(px(12.0))
            .flex()
            .items_center()
            .justify_between()
            .border_b_1()
            .border_color(theme.border)
            .child(
                div()
                    .flex()
                    .items_center()
                    .gap(px(8.0))
                    .child(
                        div()
                            .w(px(24.0))
                            .h(px(24.0))
                            .rounded(px(6.0))
                            .bg(theme.primary)
                            .flex()
                            .items_center()
                            .justify_center()
                            .child(
                                div()
                                    .text_sm()
                                    .font_weight(FontWeight::BOLD)
                                    .text_color(theme.background)
                                    .child(i18n.t("app.short_name")),
                            ),
                    )
                    .child(
                        div()
                            .text_lg()
                            .font_weight(FontWeight::BOLD)
                            .child(i18n.t("app.name")),
                    ),
            )
            .child(ThemeToggle::render(mode, cx))
    }

    fn render_list(cx: &Context<AppRoot>) -> impl IntoElement {
        let theme = cx.global::<Theme>();
        let i18n = cx.global::<I18n>();
        let viewer = state::viewer(cx);

        let status = |text: String, color: Hsla| {
            div()
                .flex_1()
                .flex()
                .items_center()
                .justify_center()
                .px(px(16.0))
                .text_sm()
                .text_center()
                .text_color(color)
                .child(text)
                .into_any_element()
        };

        match viewer.list_view() {
            ListView::Loading => status(i18n.t("list.loading"), theme.text_muted),
            ListView::Failed(reason) => div()
                .flex_1()
                .flex()
                .flex_col()
                .items_center()
                .justify_center()
                .gap(px(4.0))
                .px(px(16.0))
                .text_center()
                .child(div().text_sm().text_color(theme.error).child(i18n.t("list.error")))
                .child(div().text_xs().text_color(theme.text_muted).child(reason.to_string()))
                .into_any_element(),
            ListView::Empty => status(i18n.t("list.empty"), theme.text_muted),
            ListView::NoMatches => status(i18n.t("list.no_matches"), theme.text_muted),
            ListView::Items(conversations) => div()
                .id("conversation-list")
                .flex_1()
                .overflow_y_scroll()
                .px(px(12.0))
                .flex()
                .flex_col()
                .gap(px(6.0))
                .children(conversations.into_iter().enumerate().map(|(index, conversation)| {
                    let is_active = viewer.is_active(&conversation.id);
                    ConversationItem::render(conversation, index, is_active, cx)
                }))
                .into_any_element(),
        }
    }

    fn render_footer(cx: &Context<AppRoot>) -> impl IntoElement {
        let theme = cx.global::<Theme>();
        let i18n = cx.global::<I18n>();
        let viewer = state::viewer(cx);

        let total = viewer.conversations().len();
        let shown = viewer.visible_conversations().len();

        div()
            .px(px(12.0))
            .py(px(8.0))
            .border_t_1()
            .border_color(theme.border)
            .text_xs()
            .text_color(theme.text_muted)
            .when(total > 0, |el| {
                el.child(i18n.format(
                    "list.count",
                    &[("shown", &shown.to_string()), ("total", &total.to_string())],
                ))
            })
    }
}
