//! Pluggable task modules.
//!
//! The session only knows the narrow contract here: a task has an id, menu
//! labels, an availability probe re-run every time the main menu is built,
//! and a synchronous `launch` that owns its own sub-dialogs and hands
//! control back when done. The session never inspects what a module did.

pub mod backup;
pub mod installation;
pub mod key_manager;

use anyhow::Result;

use crate::config::SessionConfig;
use crate::dialog::MenuItem;
use crate::lang::TextProvider;
use crate::nav::{Flow, Navigator};

pub trait TaskModule {
    fn id(&self) -> &'static str;
    fn title_key(&self) -> &'static str;
    fn description_key(&self) -> &'static str;
    fn is_available(&self) -> bool;
    fn launch(
        &mut self,
        nav: &mut Navigator<'_>,
        cfg: &SessionConfig,
        texts: &TextProvider,
    ) -> Result<Flow>;
}

pub struct TaskRegistry {
    modules: Vec<Box<dyn TaskModule>>,
}

impl TaskRegistry {
    pub fn builtin() -> Self {
        Self {
            modules: vec![
                Box::new(installation::InstallationTask),
                Box::new(backup::BackupTask),
                Box::new(key_manager::KeyManagerTask),
            ],
        }
    }

    pub fn with_modules(modules: Vec<Box<dyn TaskModule>>) -> Self {
        Self { modules }
    }

    /// Menu rows for the current state of the system. Availability is
    /// probed here, once per menu build.
    pub fn menu_items(&self, cfg: &SessionConfig, texts: &TextProvider) -> Vec<MenuItem> {
        let lang = &cfg.current_lang;
        self.modules
            .iter()
            .map(|m| {
                MenuItem::new(m.id(), texts.text(lang, m.title_key()))
                    .with_help(texts.text(lang, m.description_key()))
                    .enabled(m.is_available())
            })
            .collect()
    }

    pub fn launch(
        &mut self,
        id: &str,
        nav: &mut Navigator<'_>,
        cfg: &SessionConfig,
        texts: &TextProvider,
    ) -> Option<Result<Flow>> {
        self.modules
            .iter_mut()
            .find(|m| m.id() == id)
            .map(|m| m.launch(nav, cfg, texts))
    }
}
