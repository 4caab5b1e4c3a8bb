use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use crate::defaults::Defaults;

/// Set up the tracing subscriber writing to a file.
///
/// The UI owns the terminal, so nothing may ever be logged to stdout/stderr
/// while the session runs. Returns the path actually used, which may be the
/// /tmp fallback when the preferred location is not writable.
pub fn setup_logger(preferred: &Path, debug: bool) -> Result<PathBuf> {
    let path = match open_log_file(preferred) {
        Ok(file) => {
            init_subscriber(file, debug)?;
            preferred.to_path_buf()
        }
        Err(_) => {
            let fallback = PathBuf::from(Defaults::FALLBACK_LOG_FILE);
            let file = open_log_file(&fallback)
                .with_context(|| format!("opening fallback log file {}", fallback.display()))?;
            init_subscriber(file, debug)?;
            fallback
        }
    };

    tracing::info!("=== sysmenu log started ===");
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "startup");
    if let Ok(user) = std::env::var("USER") {
        tracing::info!(user, "running as");
    }
    Ok(path)
}

fn open_log_file(path: &Path) -> Result<std::fs::File> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
        }
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening {}", path.display()))
}

fn init_subscriber(file: std::fs::File, debug: bool) -> Result<()> {
    let default_directive = if debug { "sysmenu=debug,info" } else { "sysmenu=info,warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Arc::new(file))
        .try_init()
        .map_err(|e| anyhow::anyhow!("initializing tracing subscriber: {e}"))?;
    Ok(())
}
