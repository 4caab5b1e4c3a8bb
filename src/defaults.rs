//! Central place for all default values.
//! Update these and the whole app picks them up.

pub struct Defaults;

impl Defaults {
    /* Session */
    pub const LANGUAGES: [&'static str; 2] = ["en", "de"];
    pub const KEYBOARDS: [&'static str; 2] = ["us", "de"];
    pub const LANGUAGE: &'static str = "en";
    pub const KEYBOARD: &'static str = "us";

    /* Files */
    pub const CONFIG_FILE: &'static str = "config.json";
    pub const LOG_FILE: &'static str = "sysmenu.log";
    pub const FALLBACK_LOG_FILE: &'static str = "/tmp/sysmenu.log";

    /* Dialog loop */
    pub const POLL_INTERVAL_MS: u64 = 250;
    pub const GAUGE_FRAME_MS: u64 = 80;

    /* Backup */
    pub const BACKUP_SOURCE: &'static str = "/home";
    pub const BACKUP_DEST_DIR: &'static str = "/var/backups";
}
