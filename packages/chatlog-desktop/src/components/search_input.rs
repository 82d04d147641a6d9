//! Search input for the conversation list
//!
//! A single-line text field. Every edit emits the full query so the list
//! filters on each keystroke.

use gpui::prelude::*;
use gpui::*;
use crate::i18n::I18n;
use crate::theme::Theme;

/// Event emitted whenever the query text changes
#[derive(Clone)]
pub struct QueryChanged {
    pub query: String,
}

/// Search input component
pub struct SearchInput {
    focus_handle: FocusHandle,
    text: String,
    cursor_position: usize,
    placeholder: String,
}

impl SearchInput {
    pub fn new(cx: &mut Context<Self>) -> Self {
        let i18n = cx.global::<I18n>();
        Self {
            focus_handle: cx.focus_handle(),
            text: String::new(),
            cursor_position: 0,
            placeholder: i18n.t("search.placeholder"),
        }
    }

    pub fn focus(&self, window: &mut Window, cx: &mut Context<Self>) {
        self.focus_handle.focus(window);
    }

    pub fn clear(&mut self, cx: &mut Context<Self>) {
        if self.text.is_empty() {
            return;
        }
        self.text.clear();
        self.cursor_position = 0;
        self.changed(cx);
    }

    fn changed(&mut self, cx: &mut Context<Self>) {
        cx.emit(QueryChanged {
            query: self.text.clone(),
        });
        cx.notify();
    }

    fn insert_text(&mut self, text: &str, cx: &mut Context<Self>) {
        // Single line: drop line breaks and other control characters
        let text: String = text.chars().filter(|c| !c.is_control()).collect();
        if text.is_empty() {
            return;
        }
        self.text.insert_str(self.cursor_position, &text);
        self.cursor_position += text.len();
        self.changed(cx);
    }

    fn backspace(&mut self, cx: &mut Context<Self>) {
        if let Some(prev) = prev_boundary(&self.text, self.cursor_position) {
            self.text.remove(prev);
            self.cursor_position = prev;
            self.changed(cx);
        }
    }

    fn delete(&mut self, cx: &mut Context<Self>) {
        if self.cursor_position < self.text.len() {
            self.text.remove(self.cursor_position);
            self.changed(cx);
        }
    }

    fn move_left(&mut self, cx: &mut Context<Self>) {
        if let Some(prev) = prev_boundary(&self.text, self.cursor_position) {
            self.cursor_position = prev;
            cx.notify();
        }
    }

    fn move_right(&mut self, cx: &mut Context<Self>) {
        if let Some(next) = next_boundary(&self.text, self.cursor_position) {
            self.cursor_position = next;
            cx.notify();
        }
    }

    fn handle_key_down(&mut self, event: &KeyDownEvent, cx: &mut Context<Self>) {
        let modifiers = event.keystroke.modifiers;

        match event.keystroke.key.as_str() {
            "backspace" => self.backspace(cx),
            "delete" => self.delete(cx),
            "left" => self.move_left(cx),
            "right" => self.move_right(cx),
            "escape" => self.clear(cx),
            key if key == "home" || (key == "a" && modifiers.control) => {
                self.cursor_position = 0;
                cx.notify();
            }
            key if key == "end" || (key == "e" && modifiers.control) => {
                self.cursor_position = self.text.len();
                cx.notify();
            }
            key if key == "u" && modifiers.control => self.clear(cx),
            key => {
                if modifiers.control || modifiers.alt || modifiers.platform {
                    return;
                }
                if let Some(key_char) = &event.keystroke.key_char {
                    self.insert_text(key_char, cx);
                } else if key == "space" {
                    self.insert_text(" ", cx);
                } else if key.chars().count() == 1 {
                    self.insert_text(key, cx);
                }
            }
        }
    }

    fn render_text_with_cursor(&self, is_focused: bool, theme: &Theme) -> impl IntoElement {
        if self.text.is_empty() {
            return div()
                .flex()
                .when(is_focused, |el| el.child(cursor(theme)))
                .child(
                    div()
                        .text_color(theme.text_muted)
                        .child(self.placeholder.clone()),
                )
                .into_any_element();
        }

        let (before, after) = self.text.split_at(self.cursor_position);

        div()
            .flex()
            .overflow_hidden()
            .child(div().child(before.to_string()))
            .when(is_focused, |el| el.child(cursor(theme)))
            .child(div().child(after.to_string()))
            .into_any_element()
    }
}

fn cursor(theme: &Theme) -> Div {
    div().w(px(1.5)).h(px(16.0)).bg(theme.primary)
}

fn prev_boundary(text: &str, position: usize) -> Option<usize> {
    text[..position].char_indices().last().map(|(i, _)| i)
}

fn next_boundary(text: &str, position: usize) -> Option<usize> {
    text[position..]
        .chars()
        .next()
        .map(|c| position + c.len_utf8())
}

impl EventEmitter<QueryChanged> for SearchInput {}

impl Render for SearchInput {
    fn render(&mut self, window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.global::<Theme>();
        let is_focused = self.focus_handle.is_focused(window);

        let border_color = if is_focused {
            theme.primary
        } else {
            theme.border
        };

        div()
            .id("search-input")
            .key_context("SearchInput")
            .track_focus(&self.focus_handle)
            .w_full()
            .px(px(12.0))
            .py(px(8.0))
            .rounded(px(8.0))
            .bg(theme.background_element)
            .border_1()
            .border_color(border_color)
            .text_sm()
            .cursor_text()
            .on_click(cx.listener(|this, _event, window, cx| {
                this.focus(window, cx);
            }))
            .on_key_down(cx.listener(|this, event, _window, cx| {
                this.handle_key_down(event, cx);
            }))
            .child(self.render_text_with_cursor(is_focused, theme))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::prelude::v1::test;

    #[test]
    fn test_boundaries_respect_multibyte_chars() {
        let text = "aé😀";
        assert_eq!(prev_boundary(text, 0), None);
        assert_eq!(prev_boundary(text, 1), Some(0));
        assert_eq!(prev_boundary(text, 3), Some(1));
        assert_eq!(prev_boundary(text, text.len()), Some(3));

        assert_eq!(next_boundary(text, 0), Some(1));
        assert_eq!(next_boundary(text, 1), Some(3));
        assert_eq!(next_boundary(text, 3), Some(text.len()));
        assert_eq!(next_boundary(text, text.len()), None);
    }
}
