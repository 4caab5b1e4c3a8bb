pub mod app;
pub mod cli;
pub mod config;
pub mod defaults;
pub mod dialog;
pub mod error;
pub mod lang;
pub mod lifecycle;
pub mod logger;
pub mod nav;
pub mod system;
pub mod tasks;
pub mod ui;

#[cfg(test)]
pub(crate) mod testutil;

use std::path::PathBuf;

/// Per-user configuration directory ($XDG_CONFIG_HOME/sysmenu, falling back
/// to ~/.config/sysmenu, falling back to the working directory).
pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        if !xdg.is_empty() {
            return PathBuf::from(xdg).join("sysmenu");
        }
    }
    if let Ok(home) = std::env::var("HOME") {
        if !home.is_empty() {
            return PathBuf::from(home).join(".config").join("sysmenu");
        }
    }
    PathBuf::from(".")
}

/// Directory for runtime state such as the log file.
pub fn state_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_STATE_HOME") {
        if !xdg.is_empty() {
            return PathBuf::from(xdg).join("sysmenu");
        }
    }
    if let Ok(home) = std::env::var("HOME") {
        if !home.is_empty() {
            return PathBuf::from(home).join(".local").join("state").join("sysmenu");
        }
    }
    PathBuf::from("/tmp")
}
