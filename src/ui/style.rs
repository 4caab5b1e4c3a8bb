// style.rs
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use std::borrow::Cow;

pub fn span_key(s: String) -> Span<'static> {
    Span::styled(s, Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
}
pub fn span_sep() -> Span<'static> {
    Span::styled("  |  ", Style::default().fg(Color::DarkGray))
}
pub fn span_text(s: String) -> Span<'static> {
    Span::raw(s)
}

const ACCENT_BRACKET: Color = Color::Blue;
const SELECTED_TEXT: Color = Color::Red;
const IDLE_TEXT: Color = Color::Blue;

/// "< " + LABEL + " >"
pub fn button_spans<S: Into<Cow<'static, str>>>(label: S, selected: bool) -> Vec<Span<'static>> {
    let label = label.into();
    vec![
        Span::styled("< ", Style::default().fg(ACCENT_BRACKET).add_modifier(Modifier::BOLD)),
        Span::styled(
            label,
            Style::default()
                .fg(if selected { SELECTED_TEXT } else { IDLE_TEXT })
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" >", Style::default().fg(ACCENT_BRACKET).add_modifier(Modifier::BOLD)),
    ]
}

/// List row with the ▶ selection prefix; disabled rows render dimmed.
pub fn list_row(label: &str, selected: bool, enabled: bool) -> Line<'static> {
    let prefix = if selected { "▶ " } else { "  " };
    let text_style = match (selected, enabled) {
        (_, false) => Style::default().fg(Color::DarkGray),
        (true, true) => Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        (false, true) => Style::default(),
    };
    Line::from(vec![
        Span::styled(prefix.to_string(), Style::default().fg(Color::Cyan)),
        Span::styled(label.to_string(), text_style),
    ])
}
