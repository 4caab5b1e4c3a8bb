//! Built-in localized text resources.
//!
//! The provider is an explicit value handed to every screen rather than a
//! process-wide table, so the session machinery can be exercised in tests
//! with the same lookup path the UI uses. Lookup falls back to English and,
//! for optional keys, to a visible `[key]` placeholder. Mandatory keys
//! (navigation and menu labels) are verified once at startup; a missing one
//! is fatal before any UI is shown.

use std::collections::HashMap;

use crate::error::StartupError;

/// Keys every bundled locale must provide. Missing one of these is a
/// startup-fatal condition, not a render-time placeholder.
pub const MANDATORY_KEYS: [&str; 16] = [
    "app.title",
    "app.subtitle",
    "screen.language",
    "screen.keyboard",
    "screen.main",
    "nav.hint",
    "confirm.exit",
    "confirm.yes",
    "confirm.no",
    "label.back",
    "label.quit",
    "error.unknown-selection",
    "task.unavailable",
    "task.install.title",
    "task.backup.title",
    "task.keys.title",
];

pub struct TextProvider {
    tables: HashMap<&'static str, HashMap<&'static str, &'static str>>,
}

impl TextProvider {
    /// The bundled en/de tables.
    pub fn builtin() -> Self {
        let mut tables = HashMap::new();
        tables.insert("en", english());
        tables.insert("de", german());
        Self { tables }
    }

    /// Look up `key` for `locale`, falling back to English, then to a
    /// `[key]` placeholder for optional keys.
    pub fn text(&self, locale: &str, key: &str) -> String {
        if let Some(s) = self.lookup(locale, key) {
            return s.to_string();
        }
        if locale != "en" {
            if let Some(s) = self.lookup("en", key) {
                return s.to_string();
            }
        }
        tracing::warn!(key, locale, "missing text resource, rendering placeholder");
        format!("[{key}]")
    }

    pub fn lookup(&self, locale: &str, key: &str) -> Option<&'static str> {
        self.tables.get(locale)?.get(key).copied()
    }

    /// Startup check: every mandatory key must exist in every bundled locale.
    pub fn verify_mandatory(&self, locales: &[&str]) -> Result<(), StartupError> {
        for locale in locales {
            for key in MANDATORY_KEYS {
                if self.lookup(locale, key).is_none() {
                    return Err(StartupError::MissingText {
                        key,
                        locale: locale.to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}

fn english() -> HashMap<&'static str, &'static str> {
    HashMap::from([
        ("app.title", "Linux System Console"),
        ("app.subtitle", "Central management environment"),
        ("screen.language", "Language / Sprache"),
        ("screen.keyboard", "Keyboard Layout"),
        ("screen.main", "Main Menu"),
        ("nav.hint", "↑/↓ Navigate   Enter Select   Backspace Back   Esc Exit"),
        ("confirm.exit", "Do you really want to exit the system console?"),
        ("confirm.yes", "Yes"),
        ("confirm.no", "No"),
        ("label.back", "Back"),
        ("label.quit", "Quit"),
        ("label.ok", "OK"),
        ("error.unknown-selection", "Invalid selection"),
        ("task.unavailable", "This module is not available on this system yet."),
        ("task.failed", "The module reported an error. Details are in the log file."),
        ("task.install.title", "System Installation"),
        ("task.install.desc", "Set up and configure a new Linux system: partitioning, bootloader and base configuration."),
        ("task.backup.title", "Backup & Restore"),
        ("task.backup.desc", "Create and manage system backups, restore data and preserve system states."),
        ("task.keys.title", "Key Management"),
        ("task.keys.desc", "Create and manage cryptographic keys for boot media and system encryption."),
        ("lang.en", "English"),
        ("lang.de", "German / Deutsch"),
        ("kbd.us", "US (qwerty)"),
        ("kbd.de", "German (qwertz)"),
        ("install.hostname", "Hostname for the new system"),
        ("install.username", "Name of the first user account"),
        ("install.disk", "Target disk (e.g. /dev/sda)"),
        ("install.confirm", "Start the guided installation now?"),
        ("install.running", "Installing base system"),
        ("install.done", "Installation steps completed."),
        ("backup.source", "Directory to back up"),
        ("backup.dest", "Backup destination"),
        ("backup.confirm", "Start the backup now?"),
        ("backup.running", "Backup running, this can take a while..."),
        ("backup.done", "Backup finished."),
        ("backup.failed", "Backup failed. Details are in the log file."),
        ("keys.menu", "Key Management"),
        ("keys.gpg", "Generate GPG key pair"),
        ("keys.usb", "Create encrypted boot USB"),
        ("keys.name", "Real name for the key"),
        ("keys.email", "E-mail address for the key"),
        ("keys.done", "GPG key pair created."),
        ("keys.usb.todo", "Encrypted USB creation will be available in a future version."),
    ])
}

fn german() -> HashMap<&'static str, &'static str> {
    HashMap::from([
        ("app.title", "Linux System Console"),
        ("app.subtitle", "Zentrale Verwaltungsumgebung"),
        ("screen.language", "Sprache / Language"),
        ("screen.keyboard", "Tastaturlayout"),
        ("screen.main", "Hauptmenü"),
        ("nav.hint", "↑/↓ Navigation   Enter Auswählen   Backspace Zurück   Esc Beenden"),
        ("confirm.exit", "Möchtest du die System-Konsole wirklich beenden?"),
        ("confirm.yes", "Ja"),
        ("confirm.no", "Nein"),
        ("label.back", "Zurück"),
        ("label.quit", "Beenden"),
        ("label.ok", "OK"),
        ("error.unknown-selection", "Ungültige Auswahl"),
        ("task.unavailable", "Dieses Modul ist auf diesem System noch nicht verfügbar."),
        ("task.failed", "Das Modul hat einen Fehler gemeldet. Details stehen im Logfile."),
        ("task.install.title", "System-Installation"),
        ("task.install.desc", "Neues Linux-System einrichten und konfigurieren: Partitionierung, Bootloader und Grundeinrichtung."),
        ("task.backup.title", "Sicherung & Wiederherstellung"),
        ("task.backup.desc", "Systemsicherungen erstellen und verwalten, Daten wiederherstellen und Systemzustände sichern."),
        ("task.keys.title", "Schlüssel-Verwaltung"),
        ("task.keys.desc", "Kryptografische Schlüssel für Boot-Medien und Systemverschlüsselung erstellen und verwalten."),
        ("lang.en", "Englisch / English"),
        ("lang.de", "Deutsch"),
        ("kbd.us", "US (qwerty)"),
        ("kbd.de", "Deutsch (qwertz)"),
        ("install.hostname", "Hostname des neuen Systems"),
        ("install.username", "Name des ersten Benutzerkontos"),
        ("install.disk", "Ziel-Datenträger (z.B. /dev/sda)"),
        ("install.confirm", "Geführte Installation jetzt starten?"),
        ("install.running", "Basissystem wird installiert"),
        ("install.done", "Installationsschritte abgeschlossen."),
        ("backup.source", "Zu sicherndes Verzeichnis"),
        ("backup.dest", "Sicherungsziel"),
        ("backup.confirm", "Sicherung jetzt starten?"),
        ("backup.running", "Sicherung läuft, das kann eine Weile dauern..."),
        ("backup.done", "Sicherung abgeschlossen."),
        ("backup.failed", "Sicherung fehlgeschlagen. Details stehen im Logfile."),
        ("keys.menu", "Schlüssel-Verwaltung"),
        ("keys.gpg", "GPG-Schlüsselpaar erzeugen"),
        ("keys.usb", "Verschlüsselten Boot-USB erstellen"),
        ("keys.name", "Name für den Schlüssel"),
        ("keys.email", "E-Mail-Adresse für den Schlüssel"),
        ("keys.done", "GPG-Schlüsselpaar erzeugt."),
        ("keys.usb.todo", "Die Erstellung verschlüsselter USB-Medien folgt in einer späteren Version."),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mandatory_keys_exist_for_all_bundled_locales() {
        let texts = TextProvider::builtin();
        assert!(texts.verify_mandatory(&["en", "de"]).is_ok());
    }

    #[test]
    fn missing_optional_key_renders_placeholder() {
        let texts = TextProvider::builtin();
        assert_eq!(texts.text("en", "no.such.key"), "[no.such.key]");
    }

    #[test]
    fn unknown_locale_falls_back_to_english() {
        let texts = TextProvider::builtin();
        assert_eq!(texts.text("fr", "confirm.yes"), "Yes");
    }

    #[test]
    fn verify_reports_locale_without_table() {
        let texts = TextProvider::builtin();
        assert!(matches!(
            texts.verify_mandatory(&["fr"]),
            Err(StartupError::MissingText { locale, .. }) if locale == "fr"
        ));
    }
}
