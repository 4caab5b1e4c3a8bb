use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders},
};

/// Single-line edit buffer with a cursor, used by the input dialog.
#[derive(Clone, Default)]
pub struct TextField {
    pub text: String,
    pub cursor: usize,
}

impl TextField {
    pub fn with(text: &str) -> Self {
        Self { text: text.into(), cursor: text.len() }
    }
    pub fn insert_char(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }
    pub fn backspace(&mut self) {
        if let Some(c) = self.text[..self.cursor].chars().next_back() {
            self.cursor -= c.len_utf8();
            self.text.remove(self.cursor);
        }
    }
    pub fn delete(&mut self) {
        if self.cursor < self.text.len() {
            self.text.remove(self.cursor);
        }
    }
    pub fn move_left(&mut self) {
        if let Some(c) = self.text[..self.cursor].chars().next_back() {
            self.cursor -= c.len_utf8();
        }
    }
    pub fn move_right(&mut self) {
        if let Some(c) = self.text[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
    }
    pub fn home(&mut self) {
        self.cursor = 0;
    }
    pub fn end(&mut self) {
        self.cursor = self.text.len();
    }
}

pub fn draw_frame_title(title: &str) -> Block<'_> {
    Block::default().borders(Borders::ALL).title(title)
}

// Bash-style block cursor that covers the char (no shifting)
pub fn field_line_text<'a>(label: &str, field: &TextField, focused: bool) -> Line<'a> {
    let label_s = if label.is_empty() { String::new() } else { format!("{label}: ") };
    let text = field.text.as_str();
    let cur = field.cursor.min(text.len());
    let label_span = Span::styled(label_s, Style::default().fg(Color::Yellow));

    if !focused {
        return Line::from(vec![label_span, Span::raw(text.to_string())]);
    }

    let (left, rest) = text.split_at(cur);
    let block = |s: &str| {
        Span::styled(
            s.to_string(),
            Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD),
        )
    };

    if let Some(ch) = rest.chars().next() {
        let after = &rest[ch.len_utf8()..];
        Line::from(vec![
            label_span,
            Span::raw(left.to_string()),
            block(&ch.to_string()),
            Span::raw(after.to_string()),
        ])
    } else {
        Line::from(vec![label_span, Span::raw(left.to_string()), block(" ")])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_tracks_utf8_edits() {
        let mut f = TextField::with("ab");
        f.insert_char('ü');
        assert_eq!(f.text, "abü");
        f.backspace();
        assert_eq!(f.text, "ab");
        f.home();
        f.delete();
        assert_eq!(f.text, "b");
        assert_eq!(f.cursor, 0);
    }
}
