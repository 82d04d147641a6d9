//! Message component for the chat view
//!
//! Lays out one message row and renders its rich document with styled text
//! runs. Assistant rows sit on the left with the assistant avatar; every
//! other role is shown as the user, on the right.

use chatlog_core::{Block, Message, RichDocument, Span};
use gpui::prelude::*;
use gpui::*;

use crate::i18n::I18n;
use crate::theme::{from_color, Theme};

const CODE_FONT: &str = "monospace";

/// Render one message row
pub fn render_message(
    message: &Message,
    document: &RichDocument,
    base_font: &Font,
    theme: &Theme,
    i18n: &I18n,
) -> impl IntoElement {
    let is_assistant = message.role.is_assistant();

    let (avatar_label, avatar_color, bubble) = if is_assistant {
        (i18n.t("message.assistant_avatar"), theme.assistant_avatar, theme.assistant_bubble)
    } else {
        (i18n.t("message.user_avatar"), theme.user_avatar, theme.user_bubble)
    };

    div()
        .id(SharedString::from(format!("message-{}", message.id.as_str())))
        .w_full()
        .flex()
        .items_start()
        .gap(px(12.0))
        .when(!is_assistant, |el| el.flex_row_reverse())
        .child(
            div()
                .flex_none()
                .w(px(28.0))
                .h(px(28.0))
                .rounded_full()
                .bg(avatar_color)
                .flex()
                .items_center()
                .justify_center()
                .text_xs()
                .font_weight(FontWeight::BOLD)
                .text_color(theme.background)
                .child(avatar_label),
        )
        .child(
            div()
                .max_w(rems(48.0))
                .px(px(16.0))
                .py(px(12.0))
                .rounded(px(16.0))
                .bg(bubble)
                .flex()
                .flex_col()
                .gap(px(8.0))
                .children(render_document(document, base_font, theme, i18n)),
        )
}

/// Render every block of a document
pub fn render_document(
    document: &RichDocument,
    base_font: &Font,
    theme: &Theme,
    i18n: &I18n,
) -> Vec<AnyElement> {
    document
        .blocks
        .iter()
        .map(|block| render_block(block, base_font, theme, i18n))
        .collect()
}

fn render_block(block: &Block, base_font: &Font, theme: &Theme, i18n: &I18n) -> AnyElement {
    match block {
        Block::Paragraph { spans, quoted: false } => {
            div().child(styled_text(spans, base_font, theme.text, theme)).into_any_element()
        }
        Block::Paragraph { spans, quoted: true } => div()
            .pl(px(12.0))
            .border_l_2()
            .border_color(theme.markdown_block_quote)
            .child(styled_text(spans, &base_font.clone().italic(), theme.markdown_block_quote, theme))
            .into_any_element(),
        Block::Heading { level, spans } => {
            let heading = div().child(styled_text(spans, base_font, theme.markdown_heading, theme));
            match level {
                1 => heading.text_xl(),
                2 => heading.text_lg(),
                _ => heading.text_base(),
            }
            .into_any_element()
        }
        Block::ListItem {
            depth,
            marker,
            task,
            spans,
            quoted,
        } => {
            let checkbox = task.map(|done| {
                if done {
                    i18n.t("message.task_done")
                } else {
                    i18n.t("message.task_open")
                }
            });

            div()
                .flex()
                .gap(px(6.0))
                .pl(px(16.0 * depth.saturating_sub(1) as f32))
                .child(
                    div()
                        .flex_none()
                        .min_w(px(16.0))
                        .text_color(theme.markdown_list_enumeration)
                        .child(marker.clone()),
                )
                .when_some(checkbox, |el, checkbox| {
                    el.child(div().flex_none().text_color(theme.text_muted).child(checkbox))
                })
                .child(div().flex_1().child(styled_text(spans, base_font, theme.text, theme)))
                .when(*quoted, |el| {
                    el.border_l_2()
                        .border_color(theme.markdown_block_quote)
                        .pl(px(12.0 + 16.0 * depth.saturating_sub(1) as f32))
                })
                .into_any_element()
        }
        Block::CodeBlock { language, lines } => {
            let code_font = font(CODE_FONT);

            div()
                .w_full()
                .rounded(px(8.0))
                .bg(theme.markdown_code_block_bg)
                .border_1()
                .border_color(theme.border_subtle)
                .flex()
                .flex_col()
                .when_some(language.clone(), |el, language| {
                    el.child(
                        div()
                            .px(px(12.0))
                            .py(px(4.0))
                            .border_b_1()
                            .border_color(theme.border_subtle)
                            .text_xs()
                            .text_color(theme.text_muted)
                            .child(language),
                    )
                })
                .child(
                    div()
                        .px(px(12.0))
                        .py(px(8.0))
                        .text_sm()
                        .flex()
                        .flex_col()
                        .children(lines.iter().map(|line| {
                            div().child(styled_text(line, &code_font, theme.text, theme))
                        })),
                )
                .into_any_element()
        }
        Block::Table { header, rows } => {
            let render_row = |cells: &[Vec<Span>], is_header: bool| {
                let cell_font = if is_header {
                    base_font.clone().bold()
                } else {
                    base_font.clone()
                };
                div()
                    .flex()
                    .border_b_1()
                    .border_color(theme.border_subtle)
                    .children(cells.iter().map(|cell| {
                        div()
                            .flex_1()
                            .px(px(8.0))
                            .py(px(4.0))
                            .child(styled_text(cell, &cell_font, theme.text, theme))
                    }))
            };

            div()
                .flex()
                .flex_col()
                .text_sm()
                .border_1()
                .border_color(theme.border_subtle)
                .rounded(px(6.0))
                .child(render_row(header, true).bg(theme.background_element))
                .children(rows.iter().map(|row| render_row(row, false)))
                .into_any_element()
        }
        Block::Rule => div()
            .w_full()
            .h(px(1.0))
            .my(px(4.0))
            .bg(theme.markdown_horizontal_rule)
            .into_any_element(),
    }
}

fn styled_text(spans: &[Span], base_font: &Font, base_color: Hsla, theme: &Theme) -> StyledText {
    let (text, runs) = text_runs(spans, base_font, base_color, theme);
    StyledText::new(text).with_runs(runs)
}

/// Convert spans to a string plus one text run per span
fn text_runs(
    spans: &[Span],
    base_font: &Font,
    base_color: Hsla,
    theme: &Theme,
) -> (SharedString, Vec<TextRun>) {
    let mut text = String::new();
    let mut runs = Vec::with_capacity(spans.len());

    for span in spans {
        if span.text.is_empty() {
            continue;
        }
        let style = &span.style;

        let mut run_font = if style.code && style.color.is_none() {
            font(CODE_FONT)
        } else {
            base_font.clone()
        };
        if style.bold {
            run_font = run_font.bold();
        }
        if style.italic {
            run_font = run_font.italic();
        }

        let color = match (style.color, &style.link) {
            (Some(color), _) => from_color(color),
            (None, Some(_)) => theme.markdown_link,
            (None, None) if style.code => theme.markdown_code,
            (None, None) => base_color,
        };

        text.push_str(&span.text);
        runs.push(TextRun {
            len: span.text.len(),
            font: run_font,
            color,
            background_color: (style.code && style.color.is_none()).then_some(theme.markdown_code_bg),
            underline: style.link.as_ref().map(|_| UnderlineStyle {
                color: Some(color),
                thickness: 1.0.into(),
                wavy: false,
            }),
            strikethrough: style.strikethrough.then_some(StrikethroughStyle {
                color: Some(color),
                thickness: 1.0.into(),
            }),
        });
    }

    // Keep empty lines at full height
    if text.is_empty() {
        text.push(' ');
        runs.push(TextRun {
            len: 1,
            font: base_font.clone(),
            color: base_color,
            background_color: None,
            underline: None,
            strikethrough: None,
        });
    }

    (SharedString::from(text), runs)
}
