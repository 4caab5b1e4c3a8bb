//! Session state machine.
//!
//! The original recursive screen-to-screen calls are modelled as explicit
//! transitions over an enumerated state, so long sessions cannot grow the
//! call stack and the whole flow can be driven by a scripted backend in
//! tests. Backing out of the main menu deliberately revisits the language
//! and keyboard screens (that is how language and layout get changed
//! mid-session); a value confirmed earlier lets its screen be skipped with a
//! cancel.

use anyhow::Result;

use crate::config::SessionConfig;
use crate::defaults::Defaults;
use crate::dialog::{DialogBackend, MenuItem};
use crate::lang::TextProvider;
use crate::lifecycle::Interrupts;
use crate::nav::{Flow, MenuOutcome, Navigator};
use crate::system;
use crate::tasks::TaskRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    LanguageSelect,
    KeyboardSelect,
    MainMenu,
}

enum Step {
    Goto(SessionState),
    Exit,
}

pub struct App<'a> {
    nav: Navigator<'a>,
    cfg: &'a mut SessionConfig,
    texts: &'a TextProvider,
    tasks: &'a mut TaskRegistry,
    state: SessionState,
    lang_confirmed: bool,
    keyboard_confirmed: bool,
}

impl<'a> App<'a> {
    pub fn new(
        backend: &'a mut dyn DialogBackend,
        interrupts: &'a Interrupts,
        cfg: &'a mut SessionConfig,
        texts: &'a TextProvider,
        tasks: &'a mut TaskRegistry,
    ) -> Self {
        Self {
            nav: Navigator::new(backend, interrupts),
            cfg,
            texts,
            tasks,
            state: SessionState::LanguageSelect,
            lang_confirmed: false,
            keyboard_confirmed: false,
        }
    }

    /// Run until an exit is confirmed. The loop is unbounded; every other
    /// outcome is a transition.
    pub fn run(&mut self) -> Result<()> {
        tracing::info!(lang = %self.cfg.current_lang, keyboard = %self.cfg.keyboard, "session started");
        loop {
            let step = match self.state {
                SessionState::LanguageSelect => self.language_select()?,
                SessionState::KeyboardSelect => self.keyboard_select()?,
                SessionState::MainMenu => self.main_menu()?,
            };
            match step {
                Step::Goto(next) => self.state = next,
                Step::Exit => break,
            }
        }
        tracing::info!("session ended");
        Ok(())
    }

    fn language_select(&mut self) -> Result<Step> {
        let lang = self.cfg.current_lang.clone();
        let title = self.texts.text(&lang, "screen.language");
        let items: Vec<MenuItem> = Defaults::LANGUAGES
            .iter()
            .map(|l| MenuItem::new(*l, self.texts.text(&lang, &format!("lang.{l}"))))
            .collect();

        match self.nav.menu(self.cfg, self.texts, &title, &items)? {
            MenuOutcome::Chosen(id) => {
                tracing::info!(language = %id, "language selected");
                self.cfg.current_lang = id;
                self.lang_confirmed = true;
                Ok(Step::Goto(SessionState::KeyboardSelect))
            }
            MenuOutcome::Back => {
                // First run requires an explicit choice; later visits keep
                // the last-known value and move on.
                if self.lang_confirmed {
                    Ok(Step::Goto(SessionState::KeyboardSelect))
                } else {
                    Ok(Step::Goto(SessionState::LanguageSelect))
                }
            }
            MenuOutcome::Exit => Ok(Step::Exit),
        }
    }

    fn keyboard_select(&mut self) -> Result<Step> {
        let lang = self.cfg.current_lang.clone();
        let title = self.texts.text(&lang, "screen.keyboard");
        let items: Vec<MenuItem> = self
            .keyboard_order()
            .into_iter()
            .map(|k| MenuItem::new(k, self.texts.text(&lang, &format!("kbd.{k}"))))
            .collect();

        match self.nav.menu(self.cfg, self.texts, &title, &items)? {
            MenuOutcome::Chosen(id) => {
                tracing::info!(keyboard = %id, "keyboard layout selected");
                system::set_keyboard_layout(&id);
                self.cfg.keyboard = id;
                self.keyboard_confirmed = true;
                Ok(Step::Goto(SessionState::MainMenu))
            }
            MenuOutcome::Back => {
                if self.keyboard_confirmed {
                    Ok(Step::Goto(SessionState::MainMenu))
                } else {
                    Ok(Step::Goto(SessionState::KeyboardSelect))
                }
            }
            MenuOutcome::Exit => Ok(Step::Exit),
        }
    }

    fn main_menu(&mut self) -> Result<Step> {
        let lang = self.cfg.current_lang.clone();
        let title = self.texts.text(&lang, "screen.main");

        // Rebuilt every iteration; availability is probed per build.
        let mut items = self.tasks.menu_items(self.cfg, self.texts);
        items.push(MenuItem::new("quit", self.texts.text(&lang, "label.quit")));

        match self.nav.menu(self.cfg, self.texts, &title, &items)? {
            MenuOutcome::Chosen(id) if id == "quit" => {
                if self.nav.confirm_exit(self.cfg, self.texts)? {
                    Ok(Step::Exit)
                } else {
                    Ok(Step::Goto(SessionState::MainMenu))
                }
            }
            MenuOutcome::Chosen(id) => self.dispatch(&id, &items),
            MenuOutcome::Back => Ok(Step::Goto(SessionState::LanguageSelect)),
            MenuOutcome::Exit => Ok(Step::Exit),
        }
    }

    fn dispatch(&mut self, id: &str, items: &[MenuItem]) -> Result<Step> {
        let lang = self.cfg.current_lang.clone();
        let item = items.iter().find(|i| i.id == id);
        let label = item.map(|i| i.label.clone()).unwrap_or_else(|| id.to_string());

        if !item.map(|i| i.enabled).unwrap_or(false) {
            tracing::info!(task = id, "task not available");
            self.nav.message(&label, &self.texts.text(&lang, "task.unavailable"))?;
            return Ok(Step::Goto(SessionState::MainMenu));
        }

        tracing::info!(task = id, "launching task module");
        match self.tasks.launch(id, &mut self.nav, self.cfg, self.texts) {
            Some(Ok(Flow::Continue)) => Ok(Step::Goto(SessionState::MainMenu)),
            Some(Ok(Flow::Exit)) => Ok(Step::Exit),
            Some(Err(e)) => {
                // Module failures are reported, never propagated: the menu
                // comes back regardless of what the task did.
                tracing::error!(task = id, error = %format!("{e:#}"), "task module failed");
                self.nav
                    .error_notice(&label, &self.texts.text(&lang, "task.failed"))?;
                Ok(Step::Goto(SessionState::MainMenu))
            }
            None => {
                tracing::warn!(task = id, "selection has no registered module");
                self.nav
                    .error_notice(&label, &self.texts.text(&lang, "error.unknown-selection"))?;
                Ok(Step::Goto(SessionState::MainMenu))
            }
        }
    }

    /// Layout list ordered to put the likely choice first for the session
    /// language, the way the original installer menus did.
    fn keyboard_order(&self) -> Vec<&'static str> {
        if self.cfg.current_lang == "de" {
            vec!["de", "us"]
        } else {
            vec!["us", "de"]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialog::{CancelKind, ScreenResult};
    use crate::tasks::TaskModule;
    use crate::testutil::{Reply, ScriptedBackend};
    use pretty_assertions::assert_eq;
    use std::cell::Cell;
    use std::rc::Rc;

    struct FakeTask {
        id: &'static str,
        title_key: &'static str,
        available: bool,
        fail: bool,
        launches: Rc<Cell<usize>>,
    }

    impl FakeTask {
        fn new(id: &'static str, title_key: &'static str, available: bool) -> (Self, Rc<Cell<usize>>) {
            let launches = Rc::new(Cell::new(0));
            (
                Self { id, title_key, available, fail: false, launches: Rc::clone(&launches) },
                launches,
            )
        }
    }

    impl TaskModule for FakeTask {
        fn id(&self) -> &'static str {
            self.id
        }
        fn title_key(&self) -> &'static str {
            self.title_key
        }
        fn description_key(&self) -> &'static str {
            self.title_key
        }
        fn is_available(&self) -> bool {
            self.available
        }
        fn launch(
            &mut self,
            _nav: &mut Navigator<'_>,
            _cfg: &SessionConfig,
            _texts: &TextProvider,
        ) -> Result<Flow> {
            self.launches.set(self.launches.get() + 1);
            if self.fail {
                anyhow::bail!("synthetic module failure");
            }
            Ok(Flow::Continue)
        }
    }

    fn cfg() -> SessionConfig {
        SessionConfig {
            current_lang: "en".to_string(),
            keyboard: "us".to_string(),
            debug_mode: false,
            log_file: "/tmp/sysmenu-test.log".into(),
        }
    }

    fn registry() -> (TaskRegistry, Rc<Cell<usize>>, Rc<Cell<usize>>) {
        let (install, install_count) = FakeTask::new("install", "task.install.title", true);
        let (backup, backup_count) = FakeTask::new("backup", "task.backup.title", true);
        (
            TaskRegistry::with_modules(vec![Box::new(install), Box::new(backup)]),
            install_count,
            backup_count,
        )
    }

    fn run_app(
        backend: &mut ScriptedBackend,
        cfg: &mut SessionConfig,
        tasks: &mut TaskRegistry,
    ) {
        let texts = TextProvider::builtin();
        let ints = Interrupts::new();
        let mut app = App::new(backend, &ints, cfg, &texts, tasks);
        app.run().unwrap();
    }

    fn ids(backend: &ScriptedBackend) -> Vec<Vec<String>> {
        backend.menu_log.iter().map(|(_, ids)| ids.clone()).collect()
    }

    #[test]
    fn end_to_end_dispatches_backup_once_then_rerenders_main_menu() {
        let mut backend = ScriptedBackend::new([
            Reply::Menu(ScreenResult::Selected("en".into())),
            Reply::Menu(ScreenResult::Selected("us".into())),
            Reply::Menu(ScreenResult::Selected("backup".into())),
            Reply::Menu(ScreenResult::Selected("quit".into())),
            Reply::Confirm(true),
        ]);
        backend.size = (200, 50);
        let mut cfg = cfg();
        let (mut tasks, install_count, backup_count) = registry();

        run_app(&mut backend, &mut cfg, &mut tasks);

        assert_eq!(backup_count.get(), 1);
        assert_eq!(install_count.get(), 0);
        assert_eq!(
            ids(&backend),
            vec![
                vec!["en".to_string(), "de".to_string()],
                vec!["us".to_string(), "de".to_string()],
                vec!["install".to_string(), "backup".to_string(), "quit".to_string()],
                vec!["install".to_string(), "backup".to_string(), "quit".to_string()],
            ]
        );
        // 200x50 terminal clamps to the geometry maximums on every render.
        for g in &backend.menu_geometries {
            assert_eq!((g.width, g.height), (120, 40));
        }
        assert_eq!(cfg.current_lang, "en");
        assert_eq!(cfg.keyboard, "us");
    }

    #[test]
    fn back_from_main_menu_revisits_language_and_keyboard() {
        let mut backend = ScriptedBackend::new([
            Reply::Menu(ScreenResult::Selected("en".into())),
            Reply::Menu(ScreenResult::Selected("us".into())),
            Reply::Menu(ScreenResult::Cancelled(CancelKind::Back)),
            // Both setup screens were confirmed earlier, so cancelling them
            // now keeps the values and advances.
            Reply::Menu(ScreenResult::Cancelled(CancelKind::Back)),
            Reply::Menu(ScreenResult::Cancelled(CancelKind::Back)),
            Reply::Menu(ScreenResult::Selected("quit".into())),
            Reply::Confirm(true),
        ]);
        let mut cfg = cfg();
        let (mut tasks, ..) = registry();

        run_app(&mut backend, &mut cfg, &mut tasks);

        let titles: Vec<&str> = backend.menu_log.iter().map(|(t, _)| t.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Language / Sprache",
                "Keyboard Layout",
                "Main Menu",
                "Language / Sprache",
                "Keyboard Layout",
                "Main Menu",
            ]
        );
        assert_eq!(cfg.current_lang, "en");
        assert_eq!(cfg.keyboard, "us");
    }

    #[test]
    fn first_visit_cancel_stays_until_an_explicit_choice() {
        let mut backend = ScriptedBackend::new([
            Reply::Menu(ScreenResult::Cancelled(CancelKind::Back)),
            Reply::Menu(ScreenResult::Selected("de".into())),
            Reply::Menu(ScreenResult::Cancelled(CancelKind::Back)),
            Reply::Menu(ScreenResult::Selected("de".into())),
            Reply::Menu(ScreenResult::Selected("quit".into())),
            Reply::Confirm(true),
        ]);
        let mut cfg = cfg();
        let (mut tasks, ..) = registry();

        run_app(&mut backend, &mut cfg, &mut tasks);

        // Language rendered twice, then keyboard twice (de-first ordering
        // after the language change), then the main menu.
        assert_eq!(
            ids(&backend),
            vec![
                vec!["en".to_string(), "de".to_string()],
                vec!["en".to_string(), "de".to_string()],
                vec!["de".to_string(), "us".to_string()],
                vec!["de".to_string(), "us".to_string()],
                vec!["install".to_string(), "backup".to_string(), "quit".to_string()],
            ]
        );
        assert_eq!(cfg.current_lang, "de");
        assert_eq!(cfg.keyboard, "de");
    }

    #[test]
    fn unavailable_task_raises_one_notice_and_stays_on_main_menu() {
        let (install, install_count) = FakeTask::new("install", "task.install.title", false);
        let mut tasks = TaskRegistry::with_modules(vec![Box::new(install)]);
        let mut backend = ScriptedBackend::new([
            Reply::Menu(ScreenResult::Selected("en".into())),
            Reply::Menu(ScreenResult::Selected("us".into())),
            Reply::Menu(ScreenResult::Selected("install".into())),
            Reply::Menu(ScreenResult::Selected("quit".into())),
            Reply::Confirm(true),
        ]);
        let mut cfg = cfg();

        run_app(&mut backend, &mut cfg, &mut tasks);

        assert_eq!(install_count.get(), 0);
        assert_eq!(backend.messages.len(), 1);
        // Still on the main menu after the notice.
        assert_eq!(backend.menu_log.last().unwrap().0, "Main Menu");
    }

    #[test]
    fn failing_task_reports_and_returns_to_main_menu() {
        let (mut install, install_count) = FakeTask::new("install", "task.install.title", true);
        install.fail = true;
        let mut tasks = TaskRegistry::with_modules(vec![Box::new(install)]);
        let mut backend = ScriptedBackend::new([
            Reply::Menu(ScreenResult::Selected("en".into())),
            Reply::Menu(ScreenResult::Selected("us".into())),
            Reply::Menu(ScreenResult::Selected("install".into())),
            Reply::Menu(ScreenResult::Selected("quit".into())),
            Reply::Confirm(true),
        ]);
        let mut cfg = cfg();

        run_app(&mut backend, &mut cfg, &mut tasks);

        assert_eq!(install_count.get(), 1);
        assert_eq!(backend.errors.len(), 1);
        assert_eq!(backend.menu_log.last().unwrap().0, "Main Menu");
    }

    #[test]
    fn declined_quit_returns_to_main_menu() {
        let mut backend = ScriptedBackend::new([
            Reply::Menu(ScreenResult::Selected("en".into())),
            Reply::Menu(ScreenResult::Selected("us".into())),
            Reply::Menu(ScreenResult::Selected("quit".into())),
            Reply::Confirm(false),
            Reply::Menu(ScreenResult::Selected("quit".into())),
            Reply::Confirm(true),
        ]);
        let mut cfg = cfg();
        let (mut tasks, ..) = registry();

        run_app(&mut backend, &mut cfg, &mut tasks);

        assert_eq!(backend.confirm_calls, 2);
        assert_eq!(backend.menu_log.len(), 4);
    }
}
