//! Menu navigation engine and confirmation flow.
//!
//! The navigator sits between the session state machine (and the task
//! modules) and the dialog backend. It recomputes geometry before every
//! invocation, absorbs escape-driven exit attempts by running the exit
//! confirmation itself, retries the same dialog when the user declines, and
//! turns unknown selection ids into an error notice plus a re-render rather
//! than a crash or a silent default.

use anyhow::Result;
use std::time::Duration;

use crate::config::SessionConfig;
use crate::dialog::{CancelKind, Chrome, DialogBackend, MenuItem, ScreenResult};
use crate::lang::TextProvider;
use crate::lifecycle::Interrupts;
use crate::ui::geometry::GeometrySpec;

/// Result of presenting a menu screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuOutcome {
    Chosen(String),
    Back,
    /// Exit was confirmed. The caller unwinds to the single teardown path;
    /// terminating here would bypass the restore-at-most-once invariant.
    Exit,
}

/// Result of presenting an input prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputOutcome {
    Value(String),
    Back,
    Exit,
}

/// What a task module hands back to the session loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct Navigator<'a> {
    backend: &'a mut dyn DialogBackend,
    interrupts: &'a Interrupts,
}

impl<'a> Navigator<'a> {
    pub fn new(backend: &'a mut dyn DialogBackend, interrupts: &'a Interrupts) -> Self {
        Self { backend, interrupts }
    }

    /// Fresh geometry for the next dialog; never cached, the terminal may
    /// have been resized while the previous screen was up.
    fn geometry(&mut self) -> GeometrySpec {
        GeometrySpec::from_terminal(self.backend.size())
    }

    fn chrome(&self, cfg: &SessionConfig, texts: &TextProvider) -> Chrome {
        let lang = &cfg.current_lang;
        Chrome {
            title: texts.text(lang, "app.title"),
            subtitle: texts.text(lang, "app.subtitle"),
            hint: texts.text(lang, "nav.hint"),
            back_label: texts.text(lang, "label.back"),
        }
    }

    /// Present a titled single-choice list until it yields something the
    /// caller has to act on.
    pub fn menu(
        &mut self,
        cfg: &SessionConfig,
        texts: &TextProvider,
        title: &str,
        items: &[MenuItem],
    ) -> Result<MenuOutcome> {
        let lang = cfg.current_lang.clone();
        loop {
            let g = self.geometry();
            let chrome = self.chrome(cfg, texts);
            match self.backend.menu(&g, title, items, &chrome)? {
                ScreenResult::Selected(id) if items.iter().any(|i| i.id == id) => {
                    return Ok(MenuOutcome::Chosen(id));
                }
                ScreenResult::Selected(id) => {
                    // Defensive: the backend answered with an id we never
                    // offered. Re-render the same menu, never pick a default.
                    tracing::warn!(id, title, "backend returned unknown selection");
                    let g = self.geometry();
                    self.backend.error(
                        &g,
                        &texts.text(&lang, "error.unknown-selection"),
                        &format!("'{id}'"),
                    )?;
                }
                ScreenResult::Cancelled(CancelKind::Back) => return Ok(MenuOutcome::Back),
                ScreenResult::Cancelled(CancelKind::Escape | CancelKind::Interrupt) => {
                    if self.confirm_exit(cfg, texts)? {
                        return Ok(MenuOutcome::Exit);
                    }
                    // Declined: idempotent retry with the same title/items.
                }
                ScreenResult::Errored(reason) => {
                    tracing::warn!(reason, title, "dialog reported an error, redisplaying");
                    let g = self.geometry();
                    self.backend
                        .error(&g, &texts.text(&lang, "error.unknown-selection"), &reason)?;
                }
            }
        }
    }

    /// The one exit question, shared by the quit action, top-level escape
    /// gestures and interrupt signals. Repeated "no" answers prompt
    /// independently and mutate nothing.
    pub fn confirm_exit(&mut self, cfg: &SessionConfig, texts: &TextProvider) -> Result<bool> {
        let lang = &cfg.current_lang;
        self.interrupts.disarm();
        let g = self.geometry();
        let confirmed = self.backend.confirm(
            &g,
            &texts.text(lang, "confirm.exit"),
            &texts.text(lang, "confirm.yes"),
            &texts.text(lang, "confirm.no"),
        )?;
        if !confirmed {
            self.interrupts.rearm();
        }
        Ok(confirmed)
    }

    /// Single-line prompt used by the task modules. Escape backs out of the
    /// prompt (a normal cancellation); only an interrupt escalates to the
    /// exit confirmation.
    pub fn input(
        &mut self,
        cfg: &SessionConfig,
        texts: &TextProvider,
        title: &str,
        prompt: &str,
        default: &str,
    ) -> Result<InputOutcome> {
        let lang = cfg.current_lang.clone();
        loop {
            let g = self.geometry();
            let hint = texts.text(&lang, "nav.hint");
            match self.backend.input(&g, title, prompt, default, &hint)? {
                ScreenResult::Selected(text) => return Ok(InputOutcome::Value(text)),
                ScreenResult::Cancelled(CancelKind::Back | CancelKind::Escape) => {
                    return Ok(InputOutcome::Back);
                }
                ScreenResult::Cancelled(CancelKind::Interrupt) => {
                    if self.confirm_exit(cfg, texts)? {
                        return Ok(InputOutcome::Exit);
                    }
                }
                ScreenResult::Errored(reason) => {
                    tracing::warn!(reason, title, "input dialog error, redisplaying");
                    let g = self.geometry();
                    self.backend
                        .error(&g, &texts.text(&lang, "error.unknown-selection"), &reason)?;
                }
            }
        }
    }

    /// Plain yes/no question for task-local decisions.
    pub fn confirm(&mut self, message: &str, yes_label: &str, no_label: &str) -> Result<bool> {
        let g = self.geometry();
        self.backend.confirm(&g, message, yes_label, no_label)
    }

    pub fn message(&mut self, title: &str, text: &str) -> Result<()> {
        let g = self.geometry();
        self.backend.message(&g, title, text)
    }

    pub fn warning(&mut self, title: &str, text: &str) -> Result<()> {
        let g = self.geometry();
        self.backend.warning(&g, title, text)
    }

    pub fn error_notice(&mut self, title: &str, text: &str) -> Result<()> {
        let g = self.geometry();
        self.backend.error(&g, title, text)
    }

    pub fn progress(
        &mut self,
        title: &str,
        text: &str,
        percents: &mut dyn Iterator<Item = u16>,
    ) -> Result<()> {
        let g = self.geometry();
        self.backend.progress(&g, title, text, percents)
    }

    pub fn notice(&mut self, title: &str, text: &str, timeout: Duration) -> Result<()> {
        let g = self.geometry();
        self.backend.notice(&g, title, text, timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{Reply, ScriptedBackend};
    use pretty_assertions::assert_eq;

    fn fixtures() -> (SessionConfig, TextProvider) {
        (SessionConfig::default(), TextProvider::builtin())
    }

    fn items() -> Vec<MenuItem> {
        vec![
            MenuItem::new("install", "Install"),
            MenuItem::new("backup", "Backup"),
            MenuItem::new("keys", "Keys"),
        ]
    }

    #[test]
    fn declined_escapes_rerender_until_a_choice_lands() {
        let (cfg, texts) = fixtures();
        let ints = Interrupts::new();
        let mut backend = ScriptedBackend::new([
            Reply::Menu(ScreenResult::Cancelled(CancelKind::Escape)),
            Reply::Confirm(false),
            Reply::Menu(ScreenResult::Cancelled(CancelKind::Escape)),
            Reply::Confirm(false),
            Reply::Menu(ScreenResult::Cancelled(CancelKind::Escape)),
            Reply::Confirm(false),
            Reply::Menu(ScreenResult::Selected("keys".into())),
        ]);
        let outcome = Navigator::new(&mut backend, &ints)
            .menu(&cfg, &texts, "Main Menu", &items())
            .unwrap();
        assert_eq!(outcome, MenuOutcome::Chosen("keys".into()));
        assert_eq!(backend.menu_renders, 4);
        assert_eq!(backend.confirm_calls, 3);
    }

    #[test]
    fn confirmed_escape_reports_exit() {
        let (cfg, texts) = fixtures();
        let ints = Interrupts::new();
        let mut backend = ScriptedBackend::new([
            Reply::Menu(ScreenResult::Cancelled(CancelKind::Escape)),
            Reply::Confirm(true),
        ]);
        let outcome = Navigator::new(&mut backend, &ints)
            .menu(&cfg, &texts, "Main Menu", &items())
            .unwrap();
        assert_eq!(outcome, MenuOutcome::Exit);
    }

    #[test]
    fn unknown_selection_raises_one_error_notice_and_rerenders() {
        let (cfg, texts) = fixtures();
        let ints = Interrupts::new();
        let mut backend = ScriptedBackend::new([
            Reply::Menu(ScreenResult::Selected("format-disk".into())),
            Reply::Menu(ScreenResult::Selected("backup".into())),
        ]);
        let outcome = Navigator::new(&mut backend, &ints)
            .menu(&cfg, &texts, "Main Menu", &items())
            .unwrap();
        assert_eq!(outcome, MenuOutcome::Chosen("backup".into()));
        assert_eq!(backend.errors.len(), 1);
        assert_eq!(backend.menu_renders, 2);
    }

    #[test]
    fn explicit_back_is_returned_without_any_confirmation() {
        let (cfg, texts) = fixtures();
        let ints = Interrupts::new();
        let mut backend =
            ScriptedBackend::new([Reply::Menu(ScreenResult::Cancelled(CancelKind::Back))]);
        let outcome = Navigator::new(&mut backend, &ints)
            .menu(&cfg, &texts, "Main Menu", &items())
            .unwrap();
        assert_eq!(outcome, MenuOutcome::Back);
        assert_eq!(backend.confirm_calls, 0);
    }

    #[test]
    fn repeated_declined_exit_confirmations_are_independent() {
        let (cfg, texts) = fixtures();
        let before = cfg.clone();
        let ints = Interrupts::new();
        let mut backend = ScriptedBackend::new([Reply::Confirm(false), Reply::Confirm(false)]);
        let mut nav = Navigator::new(&mut backend, &ints);
        assert!(!nav.confirm_exit(&cfg, &texts).unwrap());
        assert!(!nav.confirm_exit(&cfg, &texts).unwrap());
        drop(nav);
        assert_eq!(backend.confirm_calls, 2);
        assert_eq!(cfg.current_lang, before.current_lang);
        assert_eq!(cfg.keyboard, before.keyboard);
        // Declining re-armed the interrupt flag both times.
        ints.raise();
        assert!(ints.take());
    }

    #[test]
    fn interrupt_runs_the_same_confirmation_flow_as_escape() {
        let (cfg, texts) = fixtures();
        let ints = Interrupts::new();
        let mut backend = ScriptedBackend::new([
            Reply::Menu(ScreenResult::Cancelled(CancelKind::Interrupt)),
            Reply::Confirm(false),
            Reply::Menu(ScreenResult::Selected("install".into())),
        ]);
        let outcome = Navigator::new(&mut backend, &ints)
            .menu(&cfg, &texts, "Main Menu", &items())
            .unwrap();
        assert_eq!(outcome, MenuOutcome::Chosen("install".into()));
        assert_eq!(backend.confirm_calls, 1);
    }

    #[test]
    fn input_escape_backs_out_without_exit_prompt() {
        let (cfg, texts) = fixtures();
        let ints = Interrupts::new();
        let mut backend =
            ScriptedBackend::new([Reply::Input(ScreenResult::Cancelled(CancelKind::Escape))]);
        let outcome = Navigator::new(&mut backend, &ints)
            .input(&cfg, &texts, "Backup", "Source", "/home")
            .unwrap();
        assert_eq!(outcome, InputOutcome::Back);
        assert_eq!(backend.confirm_calls, 0);
    }
}
