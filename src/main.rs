//! hardlint - Heuristic checks for hardcoded values and risky patterns in C# syntax trees
//!
//! This is the main entry point for the CLI application.

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use hardlint::cli::{self, exit_codes, Cli, Commands};

#[tokio::main]
async fn main() {
    // Parse errors exit with INVALID_ARGS rather than clap's default code
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() {
                exit_codes::INVALID_ARGS
            } else {
                exit_codes::SUCCESS
            };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    // Setup logging based on verbosity
    setup_logging(cli.verbose);

    let config = cli.config;
    let result = match cli.command {
        Commands::Analyze(args) => cli::commands::analyze::execute(args, config).await,
        Commands::Rules(args) => cli::commands::rules::execute(args, config).await,
        Commands::Init(args) => cli::commands::init::execute(args, config).await,
    };

    // Handle exit codes for CI integration
    match result {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            std::process::exit(exit_codes::ERROR);
        }
    }
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();
}
