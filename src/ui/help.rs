use ratatui::{
    text::Line,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::style::{span_key, span_sep, span_text};

/// Footer legend built from a localized hint string.
///
/// Segments are separated by runs of three spaces; the first word of each
/// segment is the key, the remainder its action ("Enter Select").
pub fn footer(hint: &str) -> Paragraph<'_> {
    let mut spans = Vec::new();
    for (i, segment) in hint.split("   ").filter(|s| !s.is_empty()).enumerate() {
        if i > 0 {
            spans.push(span_sep());
        }
        match segment.split_once(' ') {
            Some((key, action)) => {
                spans.push(span_key(key.to_string()));
                spans.push(span_text(format!(" {action}")));
            }
            None => spans.push(span_text(segment.to_string())),
        }
    }
    Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: true })
}
