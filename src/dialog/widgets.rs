// src/dialog/widgets.rs
//
// Per-dialog state machines: `draw` paints the current state, `on_key`
// consumes one key press and yields the dialog's result when it reaches a
// terminal state. The blocking loop that connects them to the terminal
// lives in `term.rs`.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Margin},
    prelude::Frame,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, Paragraph, Wrap},
};
use textwrap::wrap;

use super::{CancelKind, Chrome, MenuItem, ScreenResult};
use crate::ui::geometry::GeometrySpec;
use crate::ui::help::footer;
use crate::ui::layout::{centered_rect_abs, three_box_layout, Margins};
use crate::ui::style::{button_spans, list_row};
use crate::ui::components::{draw_frame_title, field_line_text, TextField};

/* ───────────────────────── Menu ───────────────────────── */

pub struct MenuDialog<'a> {
    title: &'a str,
    items: &'a [MenuItem],
    chrome: &'a Chrome,
    cursor: usize,
    on_back: bool, // focus is on the < Back > button
}

impl<'a> MenuDialog<'a> {
    pub fn new(title: &'a str, items: &'a [MenuItem], chrome: &'a Chrome) -> Self {
        Self { title, items, chrome, cursor: 0, on_back: items.is_empty() }
    }

    pub fn draw(&self, f: &mut Frame<'_>, g: &GeometrySpec) {
        let area = g.dialog_rect(f.size());
        f.render_widget(Clear, area);

        let regions = three_box_layout(
            area,
            4, // header box: title + subtitle inside borders
            3,
            Margins { page: 0, inner_top: 3, inner_middle: 3, inner_bottom: 3 },
        );

        // Header
        f.render_widget(Block::default().borders(Borders::ALL), regions.top);
        let header = Paragraph::new(vec![
            Line::from(Span::styled(
                self.chrome.title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                self.chrome.subtitle.clone(),
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .alignment(Alignment::Center);
        f.render_widget(header, regions.top_inner);

        // Body: list, description of the highlighted item, back button
        f.render_widget(draw_frame_title(self.title), regions.middle);

        let list_height = (self.items.len() as u16).min(g.content_height).max(1);
        let body = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(list_height),
                Constraint::Length(1),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(regions.middle_inner);

        let rows: Vec<ListItem> = self
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let selected = !self.on_back && i == self.cursor;
                ListItem::new(list_row(&item.label, selected, item.enabled))
            })
            .collect();
        f.render_widget(List::new(rows), body[0]);

        if let Some(help) = self.items.get(self.cursor).and_then(|i| i.help_text.as_deref()) {
            let width = body[2].width.max(10) as usize;
            let lines: Vec<Line> = wrap(help, width)
                .into_iter()
                .map(|seg| {
                    Line::from(Span::styled(seg.to_string(), Style::default().fg(Color::DarkGray)))
                })
                .collect();
            f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), body[2]);
        }

        let back = Paragraph::new(Line::from(button_spans(
            self.chrome.back_label.clone(),
            self.on_back,
        )));
        f.render_widget(back, body[3]);

        // Footer legend
        f.render_widget(Block::default().borders(Borders::ALL), regions.bottom);
        f.render_widget(footer(&self.chrome.hint), regions.bottom_inner);
    }

    pub fn on_key(&mut self, k: KeyEvent) -> Option<ScreenResult> {
        // Tab walks the same ring as Down
        let code = match k.code {
            KeyCode::Tab => KeyCode::Down,
            KeyCode::BackTab => KeyCode::Up,
            other => other,
        };

        match code {
            KeyCode::Esc => return Some(ScreenResult::Cancelled(CancelKind::Escape)),
            KeyCode::Backspace => return Some(ScreenResult::Cancelled(CancelKind::Back)),
            KeyCode::Down => {
                if self.on_back && !self.items.is_empty() {
                    self.on_back = false;
                    self.cursor = 0;
                } else if !self.on_back && self.cursor + 1 < self.items.len() {
                    self.cursor += 1;
                } else {
                    self.on_back = true;
                }
            }
            KeyCode::Up => {
                if self.on_back && !self.items.is_empty() {
                    self.on_back = false;
                    self.cursor = self.items.len() - 1;
                } else if !self.on_back && self.cursor > 0 {
                    self.cursor -= 1;
                } else {
                    self.on_back = true;
                }
            }
            KeyCode::Enter => {
                if self.on_back {
                    return Some(ScreenResult::Cancelled(CancelKind::Back));
                }
                if let Some(item) = self.items.get(self.cursor) {
                    return Some(ScreenResult::Selected(item.id.clone()));
                }
            }
            _ => {}
        }
        None
    }
}

/* ───────────────────────── Confirm ───────────────────────── */

pub struct ConfirmDialog<'a> {
    message: &'a str,
    yes_label: &'a str,
    no_label: &'a str,
    selected: usize, // 0 = no (default), 1 = yes
}

impl<'a> ConfirmDialog<'a> {
    pub fn new(message: &'a str, yes_label: &'a str, no_label: &'a str) -> Self {
        Self { message, yes_label, no_label, selected: 0 }
    }

    pub fn draw(&self, f: &mut Frame<'_>, g: &GeometrySpec) {
        let bounds = g.dialog_rect(f.size());

        let btn_len = |label: &str| 4 + label.chars().count();
        let buttons_len = btn_len(self.no_label) + 3 + btn_len(self.yes_label);
        let inner_width = (self.message.chars().count().max(buttons_len) as u16)
            .max(36)
            .min(bounds.width.saturating_sub(4));

        let area = centered_rect_abs(inner_width + 4, 7, bounds);
        let inner = area.inner(&Margin { horizontal: 2, vertical: 1 });

        let vchunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(inner);

        let msg = Paragraph::new(Line::from(self.message))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });

        let mut btn_spans = Vec::new();
        btn_spans.extend(button_spans(self.no_label.to_string(), self.selected == 0));
        btn_spans.push(Span::raw("   "));
        btn_spans.extend(button_spans(self.yes_label.to_string(), self.selected == 1));
        let buttons = Paragraph::new(Line::from(btn_spans)).alignment(Alignment::Center);

        f.render_widget(Clear, area);
        f.render_widget(Block::default().borders(Borders::ALL), area);
        f.render_widget(msg, vchunks[1]);
        f.render_widget(buttons, vchunks[3]);
    }

    pub fn on_key(&mut self, k: KeyEvent) -> Option<bool> {
        match k.code {
            // Any cancellation is the negative answer, never an error.
            KeyCode::Esc | KeyCode::Backspace => return Some(false),
            KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') => {
                self.selected = 1 - self.selected;
            }
            KeyCode::Enter => return Some(self.selected == 1),
            _ => {}
        }
        None
    }
}

/* ───────────────────────── Message / Warning / Error ───────────────────────── */

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

pub struct MessageDialog<'a> {
    title: &'a str,
    text: &'a str,
    level: NoticeLevel,
    ok_label: &'static str,
}

impl<'a> MessageDialog<'a> {
    pub fn new(title: &'a str, text: &'a str, level: NoticeLevel) -> Self {
        Self { title, text, level, ok_label: "OK" }
    }

    pub fn draw(&self, f: &mut Frame<'_>, g: &GeometrySpec) {
        let bounds = g.dialog_rect(f.size());
        let inner_width = bounds.width.saturating_sub(8).max(30) as usize;
        let lines: Vec<String> = wrap(self.text, inner_width)
            .into_iter()
            .map(|s| s.to_string())
            .collect();

        let widest = lines
            .iter()
            .map(|l| l.chars().count())
            .max()
            .unwrap_or(0)
            .max(self.title.chars().count() + 2) as u16;
        let total_w = (widest + 6).min(bounds.width);
        let total_h = (lines.len() as u16 + 5).min(bounds.height);

        let area = centered_rect_abs(total_w, total_h, bounds);
        let inner = area.inner(&Margin { horizontal: 2, vertical: 1 });

        let title_style = match self.level {
            NoticeLevel::Info => Style::default(),
            NoticeLevel::Warning => Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            NoticeLevel::Error => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        };

        let mut constraints: Vec<Constraint> = vec![Constraint::Length(1); lines.len()];
        constraints.push(Constraint::Length(1)); // spacer
        constraints.push(Constraint::Length(1)); // button
        let vchunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(inner);

        f.render_widget(Clear, area);
        f.render_widget(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(format!(" {} ", self.title), title_style)),
            area,
        );
        for (i, text) in lines.iter().enumerate() {
            let p = Paragraph::new(Line::from(text.clone())).alignment(Alignment::Center);
            f.render_widget(p, vchunks[i]);
        }
        let ok = Paragraph::new(Line::from(button_spans(self.ok_label, true)))
            .alignment(Alignment::Center);
        f.render_widget(ok, vchunks[vchunks.len() - 1]);
    }

    pub fn on_key(&mut self, k: KeyEvent) -> Option<()> {
        match k.code {
            KeyCode::Enter | KeyCode::Esc => Some(()),
            _ => None,
        }
    }
}

/* ───────────────────────── Input ───────────────────────── */

pub struct InputDialog<'a> {
    title: &'a str,
    prompt: &'a str,
    hint: &'a str,
    field: TextField,
}

impl<'a> InputDialog<'a> {
    pub fn new(title: &'a str, prompt: &'a str, default: &str, hint: &'a str) -> Self {
        Self { title, prompt, hint, field: TextField::with(default) }
    }

    pub fn draw(&self, f: &mut Frame<'_>, g: &GeometrySpec) {
        let bounds = g.dialog_rect(f.size());
        let total_w = bounds.width.saturating_sub(8).max(40);
        let area = centered_rect_abs(total_w, 8, bounds);
        let inner = area.inner(&Margin { horizontal: 2, vertical: 1 });

        let vchunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // prompt
                Constraint::Length(1),
                Constraint::Length(1), // field
                Constraint::Length(1),
                Constraint::Length(1), // hint
            ])
            .split(inner);

        f.render_widget(Clear, area);
        f.render_widget(
            Block::default().borders(Borders::ALL).title(format!(" {} ", self.title)),
            area,
        );
        f.render_widget(Paragraph::new(Line::from(self.prompt)), vchunks[0]);
        f.render_widget(
            Paragraph::new(field_line_text("", &self.field, true)),
            vchunks[2],
        );
        f.render_widget(
            Paragraph::new(Line::from(Span::styled(
                self.hint.to_string(),
                Style::default().fg(Color::DarkGray),
            ))),
            vchunks[4],
        );
    }

    pub fn on_key(&mut self, k: KeyEvent) -> Option<ScreenResult> {
        match k.code {
            KeyCode::Esc => return Some(ScreenResult::Cancelled(CancelKind::Escape)),
            KeyCode::Enter => return Some(ScreenResult::Selected(self.field.text.trim().to_string())),
            KeyCode::Backspace => self.field.backspace(),
            KeyCode::Delete => self.field.delete(),
            KeyCode::Left => self.field.move_left(),
            KeyCode::Right => self.field.move_right(),
            KeyCode::Home => self.field.home(),
            KeyCode::End => self.field.end(),
            KeyCode::Char(c) if !k.modifiers.contains(crossterm::event::KeyModifiers::CONTROL) => {
                self.field.insert_char(c)
            }
            _ => {}
        }
        None
    }
}

/* ───────────────────────── Gauge ───────────────────────── */

pub struct GaugeDialog<'a> {
    title: &'a str,
    text: &'a str,
    pub percent: u16,
}

impl<'a> GaugeDialog<'a> {
    pub fn new(title: &'a str, text: &'a str) -> Self {
        Self { title, text, percent: 0 }
    }

    pub fn set(&mut self, percent: u16) {
        self.percent = percent.min(100);
    }

    pub fn draw(&self, f: &mut Frame<'_>, g: &GeometrySpec) {
        let bounds = g.dialog_rect(f.size());
        let total_w = bounds.width.saturating_sub(8).max(40);
        let area = centered_rect_abs(total_w, 7, bounds);
        let inner = area.inner(&Margin { horizontal: 2, vertical: 1 });

        let vchunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // text
                Constraint::Length(1),
                Constraint::Length(1), // gauge
            ])
            .split(inner);

        f.render_widget(Clear, area);
        f.render_widget(
            Block::default().borders(Borders::ALL).title(format!(" {} ", self.title)),
            area,
        );
        f.render_widget(Paragraph::new(Line::from(self.text)), vchunks[0]);
        f.render_widget(
            Gauge::default()
                .gauge_style(Style::default().fg(Color::Cyan))
                .percent(self.percent),
            vchunks[2],
        );
    }
}
