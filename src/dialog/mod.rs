//! Dialog backend seam.
//!
//! The engine decides *which* dialog to show with *what* geometry; the
//! backend owns the drawing and blocking input loop. `TermDialog` is the
//! ratatui implementation; tests drive the same trait with a scripted
//! double.

pub mod term;
pub mod widgets;

use anyhow::Result;
use std::time::Duration;

use crate::ui::geometry::GeometrySpec;

/// One selectable row of a menu. Ids are unique within a menu and display
/// order is selection order; items are composed per render and discarded
/// after the dialog returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub id: String,
    pub label: String,
    pub enabled: bool,
    pub help_text: Option<String>,
}

impl MenuItem {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self { id: id.into(), label: label.into(), enabled: true, help_text: None }
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help_text = Some(help.into());
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

/// How a dialog was cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelKind {
    /// Explicit back action: Backspace or the `< Back >` button.
    Back,
    /// Abrupt escape gesture (Esc key).
    Escape,
    /// An interrupt/termination signal arrived while the dialog was pending.
    Interrupt,
}

/// Outcome of a single dialog invocation. Consumed immediately by the
/// calling screen logic, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenResult {
    Selected(String),
    Cancelled(CancelKind),
    Errored(String),
}

/// Localized framing shared by the full-screen dialogs: application header,
/// footer key legend, back button label.
#[derive(Debug, Clone, Default)]
pub struct Chrome {
    pub title: String,
    pub subtitle: String,
    pub hint: String,
    pub back_label: String,
}

pub trait DialogBackend {
    /// Current terminal size in (columns, rows). Read before every dialog
    /// invocation so geometry tracks resizes between screens.
    fn size(&mut self) -> (u16, u16);

    /// Single-choice list. Blocks until the user selects, backs out,
    /// escapes, or an interrupt is observed.
    fn menu(
        &mut self,
        g: &GeometrySpec,
        title: &str,
        items: &[MenuItem],
        chrome: &Chrome,
    ) -> Result<ScreenResult>;

    /// Yes/no question. True only on the explicit affirmative; escape and
    /// interrupts count as the negative answer, never as an error.
    fn confirm(
        &mut self,
        g: &GeometrySpec,
        message: &str,
        yes_label: &str,
        no_label: &str,
    ) -> Result<bool>;

    /// Acknowledge-only notices; block until dismissed.
    fn message(&mut self, g: &GeometrySpec, title: &str, text: &str) -> Result<()>;
    fn warning(&mut self, g: &GeometrySpec, title: &str, text: &str) -> Result<()>;
    fn error(&mut self, g: &GeometrySpec, title: &str, text: &str) -> Result<()>;

    /// Single-line text capture.
    fn input(
        &mut self,
        g: &GeometrySpec,
        title: &str,
        prompt: &str,
        default: &str,
        hint: &str,
    ) -> Result<ScreenResult>;

    /// Determinate gauge driven by a 0-100 stream; the display terminates at
    /// 100 or at stream end, whichever comes first.
    fn progress(
        &mut self,
        g: &GeometrySpec,
        title: &str,
        text: &str,
        percents: &mut dyn Iterator<Item = u16>,
    ) -> Result<()>;

    /// Informational notice that dismisses itself after `timeout` (a display
    /// timeout, not a concurrency primitive) or on any key.
    fn notice(&mut self, g: &GeometrySpec, title: &str, text: &str, timeout: Duration)
        -> Result<()>;
}
