//! Small OS helpers: package-manager probing, privilege and live-media
//! checks, keyboard layout application. These back the task availability
//! checks and the keyboard screen; everything heavier belongs to the task
//! modules themselves.

use std::process::Command;

/// Probe for a known package manager. Availability of the installation
/// module hinges on this.
pub fn detect_package_manager() -> Option<&'static str> {
    const CANDIDATES: [&str; 4] = ["apt", "dnf", "pacman", "zypper"];
    CANDIDATES.into_iter().find(|cmd| command_exists(cmd))
}

/// True when `cmd --version` can be spawned at all.
pub fn command_exists(cmd: &str) -> bool {
    Command::new(cmd)
        .arg("--version")
        .output()
        .is_ok()
}

pub fn check_root() -> bool {
    // Effective uid via id(1); sysmenu itself never requires root, tasks
    // warn on their own when they do.
    match Command::new("id").arg("-u").output() {
        Ok(out) => String::from_utf8_lossy(&out.stdout).trim() == "0",
        Err(_) => false,
    }
}

/// Detect a live-media boot the way installers do.
pub fn is_live_environment() -> bool {
    use std::path::Path;

    if Path::new("/run/live").exists() || Path::new("/run/initramfs/live").exists() {
        return true;
    }
    std::fs::read_to_string("/proc/cmdline")
        .map(|cmdline| cmdline.contains("boot=live"))
        .unwrap_or(false)
}

/// Apply a console/X keyboard layout. Tries loadkeys first, then setxkbmap.
/// Failure is logged, not fatal: the session value still changes so the
/// choice survives into the installed system's configuration.
pub fn set_keyboard_layout(layout: &str) {
    for tool in ["loadkeys", "setxkbmap"] {
        match Command::new(tool).arg(layout).output() {
            Ok(out) if out.status.success() => {
                tracing::info!(layout, tool, "keyboard layout applied");
                return;
            }
            Ok(out) => {
                tracing::debug!(layout, tool, code = ?out.status.code(), "layout tool refused");
            }
            Err(e) => {
                tracing::debug!(layout, tool, error = %e, "layout tool not spawnable");
            }
        }
    }
    tracing::warn!(layout, "could not apply keyboard layout with system tools");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_exists_rejects_nonsense() {
        assert!(!command_exists("definitely-not-a-real-binary-xyz"));
    }
}
