//! Init command - Initialize a new configuration file

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

use super::InitArgs;
use crate::cli::exit_codes;
use crate::config::loader::CONFIG_FILENAME;
use crate::config::Config;

/// Write the default configuration to `-c FILE` or `./.hardlint.toml`.
pub async fn execute(args: InitArgs, config_path: Option<PathBuf>) -> Result<i32> {
    let config_path = config_path.unwrap_or_else(|| PathBuf::from(CONFIG_FILENAME));

    if !write_default_config(&config_path, args.force)? {
        eprintln!(
            "{} Configuration file already exists. Use --force to overwrite.",
            "Error:".red().bold()
        );
        return Ok(exit_codes::ERROR);
    }

    println!(
        "{} Created {}",
        "Success:".green().bold(),
        config_path.display().to_string().cyan()
    );

    println!("\nNext steps:");
    println!("  1. Set {} to your VAT rate", "[vat] rate".cyan());
    println!("  2. Run {} to see the available rules", "hardlint rules".cyan());
    println!("  3. Run {} on your exported trees", "hardlint analyze <PATH>".cyan());

    Ok(exit_codes::SUCCESS)
}

/// Returns `false` when the file exists and `force` is not set.
fn write_default_config(path: &Path, force: bool) -> Result<bool> {
    if path.exists() && !force {
        return Ok(false);
    }

    let content = Config::default().to_toml()?;
    fs::write(path, content)
        .with_context(|| format!("Failed to write configuration file '{}'", path.display()))?;
    Ok(true)
}
