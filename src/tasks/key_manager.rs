use anyhow::{Context, Result};
use std::fs;
use std::process::Command;

use crate::config::SessionConfig;
use crate::dialog::MenuItem;
use crate::lang::TextProvider;
use crate::nav::{Flow, InputOutcome, MenuOutcome, Navigator};
use crate::system;
use crate::tasks::TaskModule;

/// Key management: GPG keypair generation now, encrypted boot media later.
pub struct KeyManagerTask;

impl KeyManagerTask {
    fn generate_gpg_key(name: &str, email: &str) -> Result<()> {
        let batch = format!(
            "Key-Type: RSA\n\
             Key-Length: 3072\n\
             Name-Real: {name}\n\
             Name-Email: {email}\n\
             Expire-Date: 0\n\
             %no-protection\n\
             %commit\n\
             %echo done\n"
        );

        let batch_file = std::env::temp_dir().join("sysmenu-gpg-batch.txt");
        fs::write(&batch_file, batch)
            .with_context(|| format!("writing {}", batch_file.display()))?;

        let status = Command::new("gpg")
            .args(["--batch", "--gen-key"])
            .arg(&batch_file)
            .status()
            .context("spawning gpg");
        let _ = fs::remove_file(&batch_file);

        let status = status?;
        if !status.success() {
            anyhow::bail!("gpg exited with {status}");
        }
        Ok(())
    }
}

impl TaskModule for KeyManagerTask {
    fn id(&self) -> &'static str {
        "keys"
    }
    fn title_key(&self) -> &'static str {
        "task.keys.title"
    }
    fn description_key(&self) -> &'static str {
        "task.keys.desc"
    }

    fn is_available(&self) -> bool {
        system::command_exists("gpg")
    }

    fn launch(
        &mut self,
        nav: &mut Navigator<'_>,
        cfg: &SessionConfig,
        texts: &TextProvider,
    ) -> Result<Flow> {
        let lang = &cfg.current_lang;
        let title = texts.text(lang, "keys.menu");

        loop {
            let items = vec![
                MenuItem::new("gpg", texts.text(lang, "keys.gpg")),
                MenuItem::new("usb", texts.text(lang, "keys.usb")),
            ];

            match nav.menu(cfg, texts, &title, &items)? {
                MenuOutcome::Chosen(id) if id == "gpg" => {
                    let name = match nav.input(cfg, texts, &title, &texts.text(lang, "keys.name"), "")? {
                        InputOutcome::Value(v) => v,
                        InputOutcome::Back => continue,
                        InputOutcome::Exit => return Ok(Flow::Exit),
                    };
                    let email = match nav.input(cfg, texts, &title, &texts.text(lang, "keys.email"), "")? {
                        InputOutcome::Value(v) => v,
                        InputOutcome::Back => continue,
                        InputOutcome::Exit => return Ok(Flow::Exit),
                    };

                    match Self::generate_gpg_key(&name, &email) {
                        Ok(()) => {
                            tracing::info!(name, email, "gpg keypair generated");
                            nav.message(&title, &texts.text(lang, "keys.done"))?;
                        }
                        Err(e) => {
                            tracing::error!(error = %e, "gpg key generation failed");
                            nav.error_notice(&title, &texts.text(lang, "task.failed"))?;
                        }
                    }
                }
                MenuOutcome::Chosen(_) => {
                    // usb: placeholder until encrypted media support lands
                    nav.message(&title, &texts.text(lang, "keys.usb.todo"))?;
                }
                MenuOutcome::Back => return Ok(Flow::Continue),
                MenuOutcome::Exit => return Ok(Flow::Exit),
            }
        }
    }
}
