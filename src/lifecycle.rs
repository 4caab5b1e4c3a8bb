//! Interrupt handling and terminal teardown.
//!
//! Signals never execute UI code. SIGINT/SIGTERM only set a pending flag;
//! whichever dialog is blocking observes it on its next tick and surfaces it
//! as `Cancelled(Interrupt)`, which the navigation engine turns into the
//! usual exit confirmation. While that prompt is up the flag is disarmed, so
//! a second signal cannot stack a second prompt; re-arming clears anything
//! that arrived in between.

use anyhow::{Context, Result};
use crossterm::{cursor, execute, terminal};
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub struct Interrupts {
    pending: Arc<AtomicBool>,
    armed: AtomicBool,
}

impl Interrupts {
    /// Flag pair without OS registration, for tests and doctor mode.
    pub fn new() -> Arc<Self> {
        Arc::new(Self { pending: Arc::new(AtomicBool::new(false)), armed: AtomicBool::new(true) })
    }

    /// Register SIGINT/SIGTERM to set the pending flag.
    pub fn install() -> Result<Arc<Self>> {
        let this = Self::new();
        for sig in [signal_hook::consts::SIGINT, signal_hook::consts::SIGTERM] {
            signal_hook::flag::register(sig, Arc::clone(&this.pending))
                .with_context(|| format!("registering handler for signal {sig}"))?;
        }
        Ok(this)
    }

    /// Consume a pending interrupt. Returns false while disarmed, so a
    /// signal delivered during the exit confirmation is swallowed.
    pub fn take(&self) -> bool {
        self.armed.load(Ordering::SeqCst) && self.pending.swap(false, Ordering::SeqCst)
    }

    /// Non-consuming check used by the confirm dialog.
    pub fn peek(&self) -> bool {
        self.armed.load(Ordering::SeqCst) && self.pending.load(Ordering::SeqCst)
    }

    /// Stop observing signals while the exit confirmation is up.
    pub fn disarm(&self) {
        self.armed.store(false, Ordering::SeqCst);
    }

    /// Resume observing. Anything delivered while disarmed is dropped.
    pub fn rearm(&self) {
        self.pending.store(false, Ordering::SeqCst);
        self.armed.store(true, Ordering::SeqCst);
    }

    /// Mark an interrupt as pending, as the signal handler would.
    pub fn raise(&self) {
        self.pending.store(true, Ordering::SeqCst);
    }
}

/// Restores the terminal to its pre-program state at most once per process,
/// whichever exit path gets there first (normal return, confirmed interrupt,
/// fatal error, panic hook, drop).
pub struct TerminalGuard {
    restored: AtomicBool,
}

impl TerminalGuard {
    pub fn new() -> Arc<Self> {
        Arc::new(Self { restored: AtomicBool::new(false) })
    }

    /// Returns true when this call actually performed the restore.
    pub fn restore(&self) -> bool {
        if self.restored.swap(true, Ordering::SeqCst) {
            return false;
        }
        // Errors are ignored: there is nothing left to report to once the
        // process is on its way out, and stdout may already be gone.
        let _ = terminal::disable_raw_mode();
        let _ = execute!(io::stdout(), terminal::LeaveAlternateScreen, cursor::Show);
        true
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        self.restore();
    }
}

/// Chain a terminal restore in front of the default panic handler so a
/// panicking session does not leave the user's shell in raw mode.
pub fn install_panic_hook(guard: Arc<TerminalGuard>) {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        guard.restore();
        default_hook(info);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interrupt_is_consumed_exactly_once() {
        let ints = Interrupts::new();
        assert!(!ints.take());
        ints.raise();
        assert!(ints.take());
        assert!(!ints.take());
    }

    #[test]
    fn disarmed_interrupts_are_invisible_and_cleared_on_rearm() {
        let ints = Interrupts::new();
        ints.disarm();
        ints.raise();
        assert!(!ints.take());
        assert!(!ints.peek());
        // A signal delivered during the confirmation prompt dies here.
        ints.rearm();
        assert!(!ints.take());
    }

    #[test]
    fn restore_runs_at_most_once_even_for_a_double_signal() {
        let guard = TerminalGuard::new();
        assert!(guard.restore());
        assert!(!guard.restore());
        assert!(!guard.restore());
    }
}
