use anyhow::{Context, Result};
use std::process::Command;
use time::{format_description, OffsetDateTime};

use crate::config::SessionConfig;
use crate::defaults::Defaults;
use crate::lang::TextProvider;
use crate::nav::{Flow, InputOutcome, Navigator};
use crate::system;
use crate::tasks::TaskModule;

/// rsync-backed directory backup.
pub struct BackupTask;

impl BackupTask {
    fn default_destination() -> String {
        let stamp = format_description::parse("[year][month][day]-[hour][minute][second]")
            .ok()
            .and_then(|fmt| OffsetDateTime::now_utc().format(&fmt).ok())
            .unwrap_or_else(|| "latest".to_string());
        format!("{}/backup-{stamp}", Defaults::BACKUP_DEST_DIR)
    }
}

impl TaskModule for BackupTask {
    fn id(&self) -> &'static str {
        "backup"
    }
    fn title_key(&self) -> &'static str {
        "task.backup.title"
    }
    fn description_key(&self) -> &'static str {
        "task.backup.desc"
    }

    fn is_available(&self) -> bool {
        system::command_exists("rsync")
    }

    fn launch(
        &mut self,
        nav: &mut Navigator<'_>,
        cfg: &SessionConfig,
        texts: &TextProvider,
    ) -> Result<Flow> {
        let lang = &cfg.current_lang;
        let title = texts.text(lang, "task.backup.title");

        let source = match nav.input(
            cfg,
            texts,
            &title,
            &texts.text(lang, "backup.source"),
            Defaults::BACKUP_SOURCE,
        )? {
            InputOutcome::Value(v) => v,
            InputOutcome::Back => return Ok(Flow::Continue),
            InputOutcome::Exit => return Ok(Flow::Exit),
        };
        let dest = match nav.input(
            cfg,
            texts,
            &title,
            &texts.text(lang, "backup.dest"),
            &Self::default_destination(),
        )? {
            InputOutcome::Value(v) => v,
            InputOutcome::Back => return Ok(Flow::Continue),
            InputOutcome::Exit => return Ok(Flow::Exit),
        };

        if !nav.confirm(
            &texts.text(lang, "backup.confirm"),
            &texts.text(lang, "confirm.yes"),
            &texts.text(lang, "confirm.no"),
        )? {
            return Ok(Flow::Continue);
        }

        tracing::info!(source, dest, "backup starting");
        // Short heads-up before the screen blocks on the rsync run.
        nav.notice(
            &title,
            &texts.text(lang, "backup.running"),
            std::time::Duration::from_millis(1200),
        )?;
        let output = Command::new("rsync")
            .args(["-a", "--stats", &source, &dest])
            .output()
            .context("spawning rsync")?;

        if output.status.success() {
            tracing::info!(source, dest, "backup finished");
            nav.message(&title, &texts.text(lang, "backup.done"))?;
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            tracing::error!(source, dest, code = ?output.status.code(), %stderr, "rsync failed");
            nav.error_notice(&title, &texts.text(lang, "backup.failed"))?;
        }
        Ok(Flow::Continue)
    }
}
