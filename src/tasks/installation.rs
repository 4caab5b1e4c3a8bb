use anyhow::Result;

use crate::config::SessionConfig;
use crate::lang::TextProvider;
use crate::nav::{Flow, InputOutcome, Navigator};
use crate::system;
use crate::tasks::TaskModule;

/// Guided system installation. Collects the base configuration through the
/// dialog capability; the destructive steps themselves (partitioning,
/// bootloader) stay behind the staged runner and are logged only, so the
/// module is safe to walk through on a live system.
pub struct InstallationTask;

impl TaskModule for InstallationTask {
    fn id(&self) -> &'static str {
        "install"
    }
    fn title_key(&self) -> &'static str {
        "task.install.title"
    }
    fn description_key(&self) -> &'static str {
        "task.install.desc"
    }

    fn is_available(&self) -> bool {
        system::detect_package_manager().is_some()
    }

    fn launch(
        &mut self,
        nav: &mut Navigator<'_>,
        cfg: &SessionConfig,
        texts: &TextProvider,
    ) -> Result<Flow> {
        let lang = &cfg.current_lang;
        let title = texts.text(lang, "task.install.title");

        if !nav.confirm(
            &texts.text(lang, "install.confirm"),
            &texts.text(lang, "confirm.yes"),
            &texts.text(lang, "confirm.no"),
        )? {
            return Ok(Flow::Continue);
        }

        let hostname = match nav.input(cfg, texts, &title, &texts.text(lang, "install.hostname"), "linux")? {
            InputOutcome::Value(v) => v,
            InputOutcome::Back => return Ok(Flow::Continue),
            InputOutcome::Exit => return Ok(Flow::Exit),
        };
        let username = match nav.input(cfg, texts, &title, &texts.text(lang, "install.username"), "admin")? {
            InputOutcome::Value(v) => v,
            InputOutcome::Back => return Ok(Flow::Continue),
            InputOutcome::Exit => return Ok(Flow::Exit),
        };
        let disk = match nav.input(cfg, texts, &title, &texts.text(lang, "install.disk"), "/dev/sda")? {
            InputOutcome::Value(v) => v,
            InputOutcome::Back => return Ok(Flow::Continue),
            InputOutcome::Exit => return Ok(Flow::Exit),
        };

        let pkg = system::detect_package_manager().unwrap_or("unknown");
        tracing::info!(hostname, username, disk, pkg, "installation configuration collected");

        // Staged dry run: partition, format, base system, bootloader.
        let mut stream = (0..=100u16).step_by(4);
        nav.progress(
            &title,
            &texts.text(lang, "install.running"),
            &mut stream,
        )?;

        tracing::info!(hostname, disk, "installation stages completed");
        nav.message(&title, &texts.text(lang, "install.done"))?;
        Ok(Flow::Continue)
    }
}
