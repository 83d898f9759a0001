use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

mod cli;
mod config;
mod ignore_rules;
mod matcher;
mod ranking;
mod scanner;
mod search;
mod selector;
mod shell;

use cli::{Cli, Commands};
use config::Settings;
use selector::CommandSelector;

fn main() -> ExitCode {
    let cli = Cli::parse();
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if cli.verbose { "debug" } else { "warn" }),
    )
    .init();

    match run(&cli) {
        Ok(Some(path)) => {
            // The chosen path is the only thing on stdout; the shell wrapper
            // consumes it directly.
            println!("{}", path.display());
            ExitCode::SUCCESS
        }
        Ok(None) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("fcd: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<Option<PathBuf>> {
    if let Some(Commands::Init { shell }) = &cli.command {
        print!("{}", shell::init_script(*shell));
        return Ok(None);
    }

    let pattern = cli
        .pattern
        .as_deref()
        .context("missing pattern; try `fcd <pattern>` or `fcd init <shell>`")?;
    let mut settings = Settings::load()?;
    cli.apply(&mut settings);

    let cwd = std::env::current_dir().context("cannot determine the working directory")?;
    let selector = CommandSelector::new(settings.selector_command.clone());
    let path = search::find_directory(&cwd, pattern, &settings, &selector)?;
    Ok(Some(path))
}
