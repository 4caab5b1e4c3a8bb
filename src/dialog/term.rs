// src/dialog/term.rs
//
// The concrete terminal backend: ratatui over crossterm, one blocking event
// loop per dialog invocation. Nothing here decides where the session goes
// next; it renders, blocks, and reports.

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEvent, KeyEventKind},
    execute,
    terminal::{enable_raw_mode, EnterAlternateScreen},
    tty::IsTty,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::widgets::{ConfirmDialog, GaugeDialog, InputDialog, MenuDialog, MessageDialog, NoticeLevel};
use super::{CancelKind, Chrome, DialogBackend, MenuItem, ScreenResult};
use crate::defaults::Defaults;
use crate::error::StartupError;
use crate::lifecycle::{Interrupts, TerminalGuard};
use crate::ui::geometry::GeometrySpec;

pub struct TermDialog {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    interrupts: Arc<Interrupts>,
    guard: Arc<TerminalGuard>,
    poll: Duration,
}

impl TermDialog {
    /// Probe and take over the terminal. Failure here means the dialog
    /// capability itself is unavailable, which is fatal for the whole
    /// program rather than a per-call error.
    pub fn new(interrupts: Arc<Interrupts>, guard: Arc<TerminalGuard>) -> Result<Self, StartupError> {
        let stdout = io::stdout();
        if !stdout.is_tty() {
            return Err(StartupError::BackendUnavailable(
                "stdout is not a terminal".to_string(),
            ));
        }

        let init = (|| -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
            enable_raw_mode()?;
            let mut stdout = io::stdout();
            execute!(stdout, EnterAlternateScreen)?;
            let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
            terminal.clear()?; // clean start
            Ok(terminal)
        })();

        match init {
            Ok(terminal) => Ok(Self {
                terminal,
                interrupts,
                guard,
                poll: Duration::from_millis(Defaults::POLL_INTERVAL_MS),
            }),
            Err(e) => {
                // Raw mode may be half-enabled; undo before reporting.
                guard.restore();
                Err(StartupError::BackendUnavailable(e.to_string()))
            }
        }
    }

    /// One tick: wait up to the poll interval for a key press. Redrawing on
    /// every tick keeps the box live through terminal resizes.
    fn next_key(&mut self) -> Result<Option<KeyEvent>> {
        if event::poll(self.poll)? {
            if let Event::Key(k) = event::read()? {
                if k.kind == KeyEventKind::Press {
                    return Ok(Some(k));
                }
            }
        }
        Ok(None)
    }

    fn run_notice(&mut self, g: &GeometrySpec, title: &str, text: &str, level: NoticeLevel) -> Result<()> {
        let mut dlg = MessageDialog::new(title, text, level);
        loop {
            self.terminal.draw(|f| dlg.draw(f, g))?;
            if let Some(()) = self.next_key()?.and_then(|k| dlg.on_key(k)) {
                return Ok(());
            }
        }
    }
}

impl Drop for TermDialog {
    fn drop(&mut self) {
        self.guard.restore();
    }
}

impl DialogBackend for TermDialog {
    fn size(&mut self) -> (u16, u16) {
        crossterm::terminal::size().unwrap_or((80, 24))
    }

    fn menu(
        &mut self,
        g: &GeometrySpec,
        title: &str,
        items: &[MenuItem],
        chrome: &Chrome,
    ) -> Result<ScreenResult> {
        let mut dlg = MenuDialog::new(title, items, chrome);
        loop {
            self.terminal.draw(|f| dlg.draw(f, g))?;
            if self.interrupts.take() {
                return Ok(ScreenResult::Cancelled(CancelKind::Interrupt));
            }
            if let Some(result) = self.next_key()?.and_then(|k| dlg.on_key(k)) {
                return Ok(result);
            }
        }
    }

    fn confirm(
        &mut self,
        g: &GeometrySpec,
        message: &str,
        yes_label: &str,
        no_label: &str,
    ) -> Result<bool> {
        let mut dlg = ConfirmDialog::new(message, yes_label, no_label);
        loop {
            self.terminal.draw(|f| dlg.draw(f, g))?;
            // A signal while a question is up answers it with "no". The flag
            // is left pending so the navigation layer sees it next.
            if self.interrupts.peek() {
                return Ok(false);
            }
            if let Some(answer) = self.next_key()?.and_then(|k| dlg.on_key(k)) {
                return Ok(answer);
            }
        }
    }

    fn message(&mut self, g: &GeometrySpec, title: &str, text: &str) -> Result<()> {
        self.run_notice(g, title, text, NoticeLevel::Info)
    }

    fn warning(&mut self, g: &GeometrySpec, title: &str, text: &str) -> Result<()> {
        self.run_notice(g, title, text, NoticeLevel::Warning)
    }

    fn error(&mut self, g: &GeometrySpec, title: &str, text: &str) -> Result<()> {
        self.run_notice(g, title, text, NoticeLevel::Error)
    }

    fn input(
        &mut self,
        g: &GeometrySpec,
        title: &str,
        prompt: &str,
        default: &str,
        hint: &str,
    ) -> Result<ScreenResult> {
        let mut dlg = InputDialog::new(title, prompt, default, hint);
        loop {
            self.terminal.draw(|f| dlg.draw(f, g))?;
            if self.interrupts.take() {
                return Ok(ScreenResult::Cancelled(CancelKind::Interrupt));
            }
            if let Some(result) = self.next_key()?.and_then(|k| dlg.on_key(k)) {
                return Ok(result);
            }
        }
    }

    fn progress(
        &mut self,
        g: &GeometrySpec,
        title: &str,
        text: &str,
        percents: &mut dyn Iterator<Item = u16>,
    ) -> Result<()> {
        // The gauge is the one widget with its own completion condition: it
        // runs to 100 or stream end and ignores input. A pending interrupt
        // stays set and surfaces at the next interactive dialog.
        let mut dlg = GaugeDialog::new(title, text);
        for p in percents {
            dlg.set(p);
            self.terminal.draw(|f| dlg.draw(f, g))?;
            if dlg.percent >= 100 {
                break;
            }
            if event::poll(Duration::from_millis(Defaults::GAUGE_FRAME_MS))? {
                let _ = event::read()?; // discard keys pressed during the run
            }
        }
        Ok(())
    }

    fn notice(&mut self, g: &GeometrySpec, title: &str, text: &str, timeout: Duration) -> Result<()> {
        let mut dlg = MessageDialog::new(title, text, NoticeLevel::Info);
        let deadline = Instant::now() + timeout;
        loop {
            self.terminal.draw(|f| dlg.draw(f, g))?;
            if Instant::now() >= deadline {
                return Ok(());
            }
            if let Some(()) = self.next_key()?.and_then(|k| dlg.on_key(k)) {
                return Ok(());
            }
        }
    }
}
