use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::config_dir;
use crate::defaults::Defaults;

/// Process-wide session state.
///
/// Created once at startup, mutated only by the language/keyboard selection
/// screens, read by every other screen. Passed explicitly, never held in a
/// global.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Current language ("en" or "de")
    pub current_lang: String,
    /// Keyboard layout ("us" or "de")
    pub keyboard: String,
    /// Debug mode widens the log filter
    pub debug_mode: bool,
    /// Log file path
    pub log_file: PathBuf,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            current_lang: locale_from_env().unwrap_or_else(|| Defaults::LANGUAGE.to_string()),
            keyboard: Defaults::KEYBOARD.to_string(),
            debug_mode: false,
            log_file: crate::state_dir().join(Defaults::LOG_FILE),
        }
    }
}

impl SessionConfig {
    /// Load configuration, creating the default file on first run.
    pub fn load() -> Result<Self> {
        let path = Self::path();
        if !path.exists() {
            let config = SessionConfig::default();
            config.save()?;
            return Ok(config);
        }

        let text = fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn save(&self) -> Result<()> {
        let dir = config_dir();
        if !dir.exists() {
            fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;
        }
        let path = Self::path();
        let text = serde_json::to_string_pretty(self).context("serializing config")?;
        fs::write(&path, text).with_context(|| format!("writing {}", path.display()))
    }

    fn path() -> PathBuf {
        config_dir().join(Defaults::CONFIG_FILE)
    }
}

/// Seed the initial language from $LC_ALL / $LANG ("de_DE.UTF-8" -> "de").
/// Only languages we bundle strings for count.
fn locale_from_env() -> Option<String> {
    for var in ["LC_ALL", "LANG"] {
        if let Ok(value) = std::env::var(var) {
            if let Some(lang) = parse_locale(&value) {
                return Some(lang);
            }
        }
    }
    None
}

fn parse_locale(value: &str) -> Option<String> {
    let tag = value.split(['_', '.', '@']).next()?.to_ascii_lowercase();
    if Defaults::LANGUAGES.contains(&tag.as_str()) {
        Some(tag)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn locale_tag_is_extracted_from_full_locale() {
        assert_eq!(parse_locale("de_DE.UTF-8"), Some("de".to_string()));
        assert_eq!(parse_locale("en_US.UTF-8"), Some("en".to_string()));
        assert_eq!(parse_locale("en"), Some("en".to_string()));
    }

    #[test]
    fn unbundled_locales_are_ignored() {
        assert_eq!(parse_locale("fr_FR.UTF-8"), None);
        assert_eq!(parse_locale("C"), None);
        assert_eq!(parse_locale(""), None);
    }
}
