//! # CLI Module
//!
//! This module defines the command-line interface for hardlint using `clap`.
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `analyze` | Run the rules over source unit documents |
//! | `rules` | List the registered rules |
//! | `init` | Write a default `.hardlint.toml` |
//!
//! ## Submodules
//!
//! - [`commands`] - Command implementations
//! - [`exit_codes`] - Standardized exit codes
//! - [`output`] - Output formatters (Terminal, JSON, SARIF)
//!
//! ## Global Options
//!
//! - `-v, --verbose` - Increase verbosity level (use multiple times: -v, -vv, -vvv)
//! - `-c, --config <FILE>` - Path to configuration file
//!
//! ## Examples
//!
//! ```bash
//! # Analyze every *.tree.json under a directory
//! hardlint analyze build/trees
//!
//! # Only the hardcode checks, as SARIF
//! hardlint analyze build/trees --only HCD001,HCD003 --format sarif -o hardlint.sarif
//!
//! # Write a default configuration
//! hardlint init
//! ```

pub mod commands;
pub mod exit_codes;
pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use commands::{AnalyzeArgs, InitArgs, RulesArgs};

/// hardlint - Heuristic checks for hardcoded values and risky patterns in C# syntax trees
#[derive(Parser, Debug)]
#[command(name = "hardlint")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file (defaults to ./.hardlint.toml when present)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze source unit documents and report findings
    Analyze(AnalyzeArgs),

    /// List the registered rules
    Rules(RulesArgs),

    /// Initialize a new configuration file
    Init(InitArgs),
}
