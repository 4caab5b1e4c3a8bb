use clap::Parser;
use std::process;
use std::sync::Arc;

use sysmenu::{
    app::App,
    cli::{Cli, Command},
    config::SessionConfig,
    defaults::Defaults,
    dialog::term::TermDialog,
    error::StartupError,
    lang::TextProvider,
    lifecycle::{install_panic_hook, Interrupts, TerminalGuard},
    logger::setup_logger,
    system,
    tasks::TaskRegistry,
};

fn main() {
    let cli = Cli::parse();

    // Everything up to the terminal takeover is a startup check: failures
    // abort with a diagnostic on stderr and exit code 2, before any UI.
    let mut config = match SessionConfig::load() {
        Ok(c) => c,
        Err(e) => fatal(&StartupError::Config(format!("{e:#}")).to_string()),
    };
    if let Some(lang) = cli.lang {
        if !Defaults::LANGUAGES.contains(&lang.as_str()) {
            fatal(&format!("unsupported language '{lang}' (bundled: en, de)"));
        }
        config.current_lang = lang;
    }
    if let Some(keyboard) = cli.keyboard {
        if !Defaults::KEYBOARDS.contains(&keyboard.as_str()) {
            fatal(&format!("unsupported keyboard layout '{keyboard}' (bundled: us, de)"));
        }
        config.keyboard = keyboard;
    }
    if let Some(log_file) = cli.log_file {
        config.log_file = log_file;
    }
    if cli.debug {
        config.debug_mode = true;
    }

    let log_path = match setup_logger(&config.log_file, config.debug_mode) {
        Ok(p) => p,
        Err(e) => fatal(&format!("logger: {e:#}")),
    };

    let texts = TextProvider::builtin();
    if let Err(e) = texts.verify_mandatory(&Defaults::LANGUAGES) {
        fatal(&e.to_string());
    }

    if matches!(cli.cmd, Some(Command::Doctor)) {
        doctor(&config, &texts);
        return;
    }

    tracing::info!(
        root = system::check_root(),
        live = system::is_live_environment(),
        package_manager = ?system::detect_package_manager(),
        "host probe"
    );

    let interrupts = match Interrupts::install() {
        Ok(i) => i,
        Err(e) => fatal(&format!("signal handling: {e:#}")),
    };
    let guard = TerminalGuard::new();
    install_panic_hook(Arc::clone(&guard));

    let mut backend = match TermDialog::new(Arc::clone(&interrupts), Arc::clone(&guard)) {
        Ok(b) => b,
        // TermDialog::new already undid any partial terminal takeover.
        Err(e) => fatal(&e.to_string()),
    };

    let mut tasks = TaskRegistry::builtin();
    let result = App::new(&mut backend, &interrupts, &mut config, &texts, &mut tasks).run();

    drop(backend); // restores the terminal; the guard makes this idempotent
    guard.restore();

    if let Err(e) = config.save() {
        tracing::warn!(error = %format!("{e:#}"), "could not persist session config");
    }

    match result {
        Ok(()) => tracing::info!("exiting cleanly"),
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "session error");
            eprintln!("sysmenu: {e:#} (log: {})", log_path.display());
            process::exit(1);
        }
    }
}

fn doctor(config: &SessionConfig, texts: &TextProvider) {
    use crossterm::tty::IsTty;

    let tty = std::io::stdout().is_tty();
    println!("dialog backend (tty):  {}", if tty { "ok" } else { "unavailable" });
    println!(
        "package manager:       {}",
        system::detect_package_manager().unwrap_or("none detected")
    );
    println!("running as root:       {}", system::check_root());
    println!("live environment:      {}", system::is_live_environment());
    println!();
    for item in TaskRegistry::builtin().menu_items(config, texts) {
        println!(
            "module {:<10} {}",
            item.id,
            if item.enabled { "available" } else { "unavailable" }
        );
    }
}

fn fatal(msg: &str) -> ! {
    eprintln!("sysmenu: fatal: {msg}");
    process::exit(2);
}
