//! Deployer CLI
//!
//! Resolves and validates autoscaling group deployment manifests.

mod cli;
mod commands;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;
use deployer_core::DEFAULT_LOG_LEVEL;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let level = match &cli.command {
        Some(Commands::Check(args)) => args.log_level.as_str(),
        _ => DEFAULT_LOG_LEVEL,
    };
    logging::init(level, cli.verbose)?;

    match cli.command {
        Some(Commands::Check(args)) => commands::run_check(args),
        Some(Commands::Completions { shell }) => {
            commands::run_completions(shell);
            Ok(())
        }
        None => {
            println!("{} autoscaling group deployment checker", "deployer".green().bold());
            println!();
            println!("Run {} for available commands.", "deployer --help".cyan());
            Ok(())
        }
    }
}
