//! Fatal startup conditions, checked before any UI is shown.

use thiserror::Error;

/// Errors that abort the program before the session loop starts.
/// Everything after startup is either recoverable (redisplayed as an error
/// notice) or a user cancellation, which is not an error at all.
#[derive(Error, Debug)]
pub enum StartupError {
    /// The terminal-dialog capability itself cannot be used.
    #[error("terminal dialog backend unavailable: {0}")]
    BackendUnavailable(String),

    /// A mandatory navigation/menu string is missing for a bundled locale.
    #[error("missing mandatory text resource '{key}' for locale '{locale}'")]
    MissingText { key: &'static str, locale: String },

    /// The configuration could not be read or created.
    #[error("configuration error: {0}")]
    Config(String),
}
