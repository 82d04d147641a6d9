//! Light/dark toggle button

use chatlog_core::ThemeMode;
use gpui::prelude::*;
use gpui::*;

use crate::app::AppRoot;
use crate::theme::Theme;

pub struct ThemeToggle;

impl ThemeToggle {
    /// The label names the mode a click switches to.
    pub fn render(mode: ThemeMode, cx: &Context<AppRoot>) -> impl IntoElement {
        let theme = cx.global::<Theme>();

        div()
            .id("theme-toggle")
            .px(px(10.0))
            .py(px(4.0))
            .rounded(px(6.0))
            .bg(theme.background_element)
            .border_1()
            .border_color(theme.border)
            .text_xs()
            .cursor_pointer()
            .hover(|s| s.border_color(theme.border_active))
            .on_click(cx.listener(|this, _event, _window, cx| {
                this.toggle_theme(cx);
            }))
            .child(mode.toggle_label())
    }
}
