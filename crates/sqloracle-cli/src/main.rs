use std::io::IsTerminal;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use sqloracle_cli::commands::{list_oracles, predict};
use sqloracle_cli::report::render_error;
use sqloracle_cli::{Cli, Command};
use sqloracle_core::config::SqloracleConfig;
use sqloracle_core::tracing::init_tracing;

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", render_error(&err));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let stdout_is_tty = std::io::stdout().is_terminal();
    match cli.command.unwrap_or(Command::Predict) {
        Command::ListOracles => {
            print!("{}", list_oracles::render(stdout_is_tty));
            Ok(())
        }
        Command::Predict => {
            let root = std::env::current_dir()?;
            let overrides = cli.predict.overrides();
            let config = SqloracleConfig::load(&root, cli.predict.config.as_deref(), Some(&overrides))?;
            let progress = config.run.progress.unwrap_or(stdout_is_tty);
            let mut stdout = std::io::stdout().lock();
            predict::execute(&config, progress, &mut stdout)?;
            Ok(())
        }
    }
}
