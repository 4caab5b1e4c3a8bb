//! Scripted dialog backend for unit tests: replies come from a queue,
//! every invocation is counted, and notices are captured for assertions.

use anyhow::Result;
use std::collections::VecDeque;
use std::time::Duration;

use crate::dialog::{Chrome, DialogBackend, MenuItem, ScreenResult};
use crate::ui::geometry::GeometrySpec;

#[derive(Debug, Clone)]
pub enum Reply {
    Menu(ScreenResult),
    Confirm(bool),
    Input(ScreenResult),
}

pub struct ScriptedBackend {
    pub size: (u16, u16),
    replies: VecDeque<Reply>,
    pub menu_renders: usize,
    pub confirm_calls: usize,
    pub input_calls: usize,
    pub progress_runs: usize,
    /// (title, item ids) per menu render, in order.
    pub menu_log: Vec<(String, Vec<String>)>,
    /// Geometry handed to each menu render, in order.
    pub menu_geometries: Vec<GeometrySpec>,
    pub messages: Vec<String>,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

impl ScriptedBackend {
    pub fn new(replies: impl IntoIterator<Item = Reply>) -> Self {
        Self {
            size: (200, 50),
            replies: replies.into_iter().collect(),
            menu_renders: 0,
            confirm_calls: 0,
            input_calls: 0,
            progress_runs: 0,
            menu_log: Vec::new(),
            menu_geometries: Vec::new(),
            messages: Vec::new(),
            warnings: Vec::new(),
            errors: Vec::new(),
        }
    }

    fn next(&mut self, kind: &str) -> Reply {
        self.replies
            .pop_front()
            .unwrap_or_else(|| panic!("script exhausted, backend asked for {kind}"))
    }
}

impl DialogBackend for ScriptedBackend {
    fn size(&mut self) -> (u16, u16) {
        self.size
    }

    fn menu(
        &mut self,
        g: &GeometrySpec,
        title: &str,
        items: &[MenuItem],
        _chrome: &Chrome,
    ) -> Result<ScreenResult> {
        self.menu_renders += 1;
        self.menu_geometries.push(*g);
        self.menu_log
            .push((title.to_string(), items.iter().map(|i| i.id.clone()).collect()));
        match self.next("menu") {
            Reply::Menu(r) => Ok(r),
            other => panic!("script mismatch: menu render got {other:?}"),
        }
    }

    fn confirm(
        &mut self,
        _g: &GeometrySpec,
        _message: &str,
        _yes_label: &str,
        _no_label: &str,
    ) -> Result<bool> {
        self.confirm_calls += 1;
        match self.next("confirm") {
            Reply::Confirm(b) => Ok(b),
            other => panic!("script mismatch: confirm got {other:?}"),
        }
    }

    fn message(&mut self, _g: &GeometrySpec, _title: &str, text: &str) -> Result<()> {
        self.messages.push(text.to_string());
        Ok(())
    }

    fn warning(&mut self, _g: &GeometrySpec, _title: &str, text: &str) -> Result<()> {
        self.warnings.push(text.to_string());
        Ok(())
    }

    fn error(&mut self, _g: &GeometrySpec, _title: &str, text: &str) -> Result<()> {
        self.errors.push(text.to_string());
        Ok(())
    }

    fn input(
        &mut self,
        _g: &GeometrySpec,
        _title: &str,
        _prompt: &str,
        _default: &str,
        _hint: &str,
    ) -> Result<ScreenResult> {
        self.input_calls += 1;
        match self.next("input") {
            Reply::Input(r) => Ok(r),
            other => panic!("script mismatch: input got {other:?}"),
        }
    }

    fn progress(
        &mut self,
        _g: &GeometrySpec,
        _title: &str,
        _text: &str,
        percents: &mut dyn Iterator<Item = u16>,
    ) -> Result<()> {
        self.progress_runs += 1;
        for p in percents {
            if p >= 100 {
                break;
            }
        }
        Ok(())
    }

    fn notice(&mut self, _g: &GeometrySpec, _title: &str, text: &str, _timeout: Duration) -> Result<()> {
        self.messages.push(text.to_string());
        Ok(())
    }
}
