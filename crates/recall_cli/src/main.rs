//! `recall` command-line entry point.

mod cli;
mod commands;
mod config;

use anyhow::{Context, Result};
use config::AppConfig;
use log::info;

fn main() {
    if let Err(err) = run_main() {
        eprintln!("recall error: {err:#}");
        std::process::exit(1);
    }
}

fn run_main() -> Result<()> {
    let args = cli::parse();
    let config = AppConfig::load(args.config.as_deref())?;

    let cwd = std::env::current_dir().context("resolving current directory")?;
    let log_dir = config.log_dir(&cwd);
    let log_dir = log_dir
        .to_str()
        .with_context(|| format!("log directory {} is not valid UTF-8", log_dir.display()))?;
    recall_core::init_logging(config.log_level(), log_dir)?;

    let today = chrono::Local::now().date_naive();
    info!("event=cli_start module=cli status=ok today={today}");

    let stdout = std::io::stdout();
    commands::run(args.command, &config, today, &mut stdout.lock())
}
