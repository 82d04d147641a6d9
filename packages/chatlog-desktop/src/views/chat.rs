//! Chat view for the selected conversation
//!
//! Shows the active conversation's messages, or its loading, error, and
//! empty states. Message markdown is rendered once per loaded message set
//! and display mode.

use chatlog_core::{render_markdown, LoadStatus, RichDocument, ThemeMode, ViewerState};
use gpui::prelude::*;
use gpui::*;

use crate::components::message::render_message;
use crate::i18n::I18n;
use crate::state::{self, AppState};
use crate::theme::Theme;

/// Rendered documents for one loaded message set
struct RenderedMessages {
    generation: u64,
    mode: ThemeMode,
    documents: Vec<RichDocument>,
}

/// Chat view
pub struct ChatView {
    scroll_handle: ScrollHandle,
    rendered: Option<RenderedMessages>,
}

impl ChatView {
    pub fn new(cx: &mut Context<Self>) -> Self {
        cx.observe_global::<AppState>(|_this, cx| cx.notify()).detach();

        Self {
            scroll_handle: ScrollHandle::new(),
            rendered: None,
        }
    }

    /// Scroll to the newest message once the new list has been laid out.
    pub fn scroll_to_latest(&mut self, cx: &mut Context<Self>) {
        let app_state = cx.global::<AppState>();
        let settle = app_state.scroll_settle;
        let generation = app_state.viewer.message_generation();

        cx.spawn(async move |this, cx| {
            cx.background_executor().timer(settle).await;

            let _ = this.update(cx, |this, cx| {
                // A newer selection owns the scroll position
                if state::viewer(cx).message_generation() == generation {
                    this.scroll_handle.scroll_to_bottom();
                    cx.notify();
                }
            });
        })
        .detach();
    }

    /// Re-render message markdown when the message set or display mode
    /// has changed since the last frame.
    fn refresh_documents(&mut self, viewer: &ViewerState) {
        let generation = viewer.message_generation();
        let mode = viewer.theme_mode();

        let fresh = matches!(
            &self.rendered,
            Some(r) if r.generation == generation
                && r.mode == mode
                && r.documents.len() == viewer.messages().len()
        );
        if fresh {
            return;
        }

        self.rendered = Some(RenderedMessages {
            generation,
            mode,
            documents: viewer
                .messages()
                .iter()
                .map(|message| render_markdown(&message.text, mode))
                .collect(),
        });
    }

    fn render_header(&self, viewer: &ViewerState, theme: &Theme) -> impl IntoElement {
        let title = match (viewer.active_conversation(), viewer.active_id()) {
            (Some(conversation), _) => conversation.display_title().to_string(),
            (None, Some(id)) => id.to_string(),
            (None, None) => String::new(),
        };

        div()
            .h(px(48.0))
            .px(px(20.0))
            .flex()
            .items_center()
            .border_b_1()
            .border_color(theme.border)
            .child(
                div()
                    .text_lg()
                    .font_weight(FontWeight::BOLD)
                    .text_ellipsis()
                    .child(title),
            )
    }

    fn render_no_selection(&self, theme: &Theme, i18n: &I18n) -> impl IntoElement {
        div()
            .flex_1()
            .flex()
            .flex_col()
            .items_center()
            .justify_center()
            .gap(px(16.0))
            .child(
                div()
                    .w(px(80.0))
                    .h(px(80.0))
                    .rounded(px(16.0))
                    .bg(theme.background_element)
                    .flex()
                    .items_center()
                    .justify_center()
                    .child(div().text_3xl().child("💬")),
            )
            .child(
                div()
                    .text_xl()
                    .font_weight(FontWeight::MEDIUM)
                    .child(i18n.t("chat.no_selection_title")),
            )
            .child(
                div()
                    .text_color(theme.text_muted)
                    .child(i18n.t("chat.no_selection_subtitle")),
            )
    }

    fn render_loading(&self, theme: &Theme, i18n: &I18n) -> impl IntoElement {
        div()
            .flex_1()
            .flex()
            .items_center()
            .justify_center()
            .child(
                div()
                    .flex()
                    .flex_col()
                    .items_center()
                    .gap(px(12.0))
                    .child(
                        div()
                            .w(px(32.0))
                            .h(px(32.0))
                            .rounded_full()
                            .border_2()
                            .border_color(theme.primary),
                    )
                    .child(div().text_color(theme.text_muted).child(i18n.t("chat.loading"))),
            )
    }

    fn render_notice(&self, title: String, detail: Option<String>, color: Hsla, theme: &Theme) -> impl IntoElement {
        div()
            .flex_1()
            .flex()
            .flex_col()
            .items_center()
            .justify_center()
            .gap(px(8.0))
            .px(px(24.0))
            .text_center()
            .child(div().text_color(color).child(title))
            .when_some(detail, |el, detail| {
                el.child(div().text_sm().text_color(theme.text_muted).child(detail))
            })
    }
}

impl Render for ChatView {
    fn render(&mut self, window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.global::<Theme>().clone();
        let i18n = cx.global::<I18n>().clone();
        let viewer = state::viewer(cx);

        let body = if viewer.active_id().is_none() {
            self.render_no_selection(&theme, &i18n).into_any_element()
        } else {
            match viewer.messages_status() {
                LoadStatus::Idle | LoadStatus::Loading => {
                    self.render_loading(&theme, &i18n).into_any_element()
                }
                LoadStatus::Failed(reason) => self
                    .render_notice(i18n.t("chat.error"), Some(reason.clone()), theme.error, &theme)
                    .into_any_element(),
                LoadStatus::Loaded if viewer.messages().is_empty() => self
                    .render_notice(i18n.t("chat.empty"), None, theme.text_muted, &theme)
                    .into_any_element(),
                LoadStatus::Loaded => {
                    let base_font = window.text_style().font();
                    self.refresh_documents(viewer);
                    let documents = self
                        .rendered
                        .as_ref()
                        .map(|r| r.documents.as_slice())
                        .unwrap_or_default();

                    div()
                        .id("messages-scroll")
                        .flex_1()
                        .overflow_y_scroll()
                        .track_scroll(&self.scroll_handle)
                        .child(
                            div()
                                .p(px(20.0))
                                .flex()
                                .flex_col()
                                .gap(px(16.0))
                                .children(viewer.messages().iter().zip(documents).map(
                                    |(message, document)| {
                                        render_message(message, document, &base_font, &theme, &i18n)
                                    },
                                )),
                        )
                        .into_any_element()
                }
            }
        };

        div()
            .flex()
            .flex_col()
            .flex_1()
            .h_full()
            .bg(theme.background_panel)
            .when(viewer.active_id().is_some(), |el| {
                el.child(self.render_header(viewer, &theme))
            })
            .child(body)
    }
}
