//! Root view of the application
//!
//! AppRoot owns the data flow: it fetches the conversation list once,
//! selects the first entry, and fetches messages for every selection change.
//! Each message fetch carries a ticket so only the latest selection's
//! response is shown.

use chatlog_core::{ConversationId, MessageTicket};
use gpui::prelude::*;
use gpui::*;

use crate::api::{self, ApiState};
use crate::components::search_input::{QueryChanged, SearchInput};
use crate::components::sidebar::Sidebar;
use crate::keyboard::{
    FocusSearch, SelectNextConversation, SelectPreviousConversation, ToggleTheme, ROOT_CONTEXT,
};
use crate::state::{self, AppState};
use crate::theme::{self, Theme};
use crate::views::chat::ChatView;

// ============================================================================
// Root View
// ============================================================================

/// Root view of the application
pub struct AppRoot {
    focus_handle: FocusHandle,
    search_input: Entity<SearchInput>,
    chat_view: Entity<ChatView>,
}

impl AppRoot {
    pub fn new(window: &mut Window, cx: &mut Context<Self>) -> Self {
        let search_input = cx.new(|cx| SearchInput::new(cx));
        let chat_view = cx.new(|cx| ChatView::new(cx));

        // Filter on every keystroke
        cx.subscribe(&search_input, |this, _input, event: &QueryChanged, cx| {
            this.set_search_query(event.query.clone(), cx);
        })
        .detach();

        search_input.update(cx, |input, cx| input.focus(window, cx));

        Self::load_conversations(cx);

        Self {
            focus_handle: cx.focus_handle(),
            search_input,
            chat_view,
        }
    }

    /// Fetch the conversation list. Issued once, at startup.
    fn load_conversations(cx: &mut Context<Self>) {
        cx.global_mut::<AppState>().viewer.begin_conversations_load();

        let api_state = cx.global::<ApiState>();
        let client = api_state.client.clone();
        let runtime = api_state.runtime.clone();

        cx.spawn(async move |this, cx| {
            let result = api::run(runtime, async move { client.list_conversations().await }).await;

            let _ = this.update(cx, |this, cx| {
                let ticket = cx.global_mut::<AppState>().viewer.apply_conversations(result);
                if let Some(ticket) = ticket {
                    this.load_messages(ticket, cx);
                }
                cx.notify();
            });
        })
        .detach();
    }

    pub fn select_conversation(&mut self, id: Option<ConversationId>, cx: &mut Context<Self>) {
        let ticket = cx.global_mut::<AppState>().viewer.select(id);
        if let Some(ticket) = ticket {
            self.load_messages(ticket, cx);
        }
        cx.notify();
    }

    fn load_messages(&self, ticket: MessageTicket, cx: &mut Context<Self>) {
        let api_state = cx.global::<ApiState>();
        let client = api_state.client.clone();
        let runtime = api_state.runtime.clone();
        let conversation_id = ticket.conversation_id().clone();

        tracing::debug!("Loading messages for {} (generation {})", conversation_id, ticket.generation());

        cx.spawn(async move |this, cx| {
            let result = api::run(runtime, async move {
                client.conversation_messages(&conversation_id).await
            })
            .await;

            let _ = this.update(cx, |this, cx| {
                let applied = cx.global_mut::<AppState>().viewer.apply_messages(&ticket, result);
                if applied {
                    this.chat_view.update(cx, |view, cx| view.scroll_to_latest(cx));
                }
                cx.notify();
            });
        })
        .detach();
    }

    fn set_search_query(&mut self, query: String, cx: &mut Context<Self>) {
        cx.global_mut::<AppState>().viewer.set_search_query(query);
        cx.notify();
    }

    pub fn toggle_theme(&mut self, cx: &mut Context<Self>) {
        let mode = cx.global_mut::<AppState>().viewer.toggle_theme();
        theme::apply_mode(mode, cx);
        cx.notify();
    }

    fn step_selection(&mut self, forward: bool, cx: &mut Context<Self>) {
        if let Some(id) = state::viewer(cx).adjacent_visible(forward) {
            self.select_conversation(Some(id), cx);
        }
    }

    // ========================================================================
    // Actions
    // ========================================================================

    fn on_toggle_theme(&mut self, _: &ToggleTheme, _window: &mut Window, cx: &mut Context<Self>) {
        self.toggle_theme(cx);
    }

    fn on_focus_search(&mut self, _: &FocusSearch, window: &mut Window, cx: &mut Context<Self>) {
        self.search_input.update(cx, |input, cx| input.focus(window, cx));
    }

    fn on_select_next(&mut self, _: &SelectNextConversation, _window: &mut Window, cx: &mut Context<Self>) {
        self.step_selection(true, cx);
    }

    fn on_select_previous(
        &mut self,
        _: &SelectPreviousConversation,
        _window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        self.step_selection(false, cx);
    }
}

impl Render for AppRoot {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.global::<Theme>().clone();

        div()
            .key_context(ROOT_CONTEXT)
            .track_focus(&self.focus_handle)
            .on_action(cx.listener(Self::on_toggle_theme))
            .on_action(cx.listener(Self::on_focus_search))
            .on_action(cx.listener(Self::on_select_next))
            .on_action(cx.listener(Self::on_select_previous))
            .flex()
            .flex_row()
            .size_full()
            .bg(theme.background)
            .text_color(theme.text)
            .child(Sidebar::render_inline(&self.search_input, cx))
            .child(
                div()
                    .flex_1()
                    .h_full()
                    .flex()
                    .flex_col()
                    .child(self.chat_view.clone()),
            )
    }
}
