use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Menu-driven console for Linux system administration
#[derive(Parser, Debug)]
#[command(version, about = "Menu-driven console for Linux system administration")]
pub struct Cli {
    /// Override the configured language (en|de)
    #[arg(long)]
    pub lang: Option<String>,

    /// Override the configured keyboard layout (us|de)
    #[arg(long)]
    pub keyboard: Option<String>,

    /// Override the log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Widen the log filter to debug
    #[arg(long)]
    pub debug: bool,

    #[command(subcommand)]
    pub cmd: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print environment checks (dialog capability, task availability) and exit
    Doctor,
}
