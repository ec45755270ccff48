//! Analyze command - Run the rules over source unit documents
//!
//! Loads the configuration, expands the given paths into unit documents,
//! analyzes them and renders the findings in the requested format.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

use super::{AnalyzeArgs, OutputFormat};
use crate::cli::exit_codes;
use crate::cli::output::{JsonOutput, OutputRenderer, SarifOutput, TerminalOutput};
use crate::config::Config;
use crate::rules::constants::filter_valid_rules;
use crate::rules::RuleEngine;
use crate::scanner::{self, SourceUnit};

/// Execute the analyze command
///
/// # Returns
///
/// An exit code: 0 when clean, 1 for error findings, 2 for warnings only,
/// 4 when `--only` names no known rule
///
/// # Errors
///
/// Returns an error if the configuration, a unit document or the output
/// file cannot be read or written
pub async fn execute(args: AnalyzeArgs, config_path: Option<PathBuf>) -> Result<i32> {
    let started = Instant::now();
    let config = load_config(config_path.as_deref())?;

    let mut engine = RuleEngine::new(&config).context("Failed to set up the rule engine")?;

    if let Some(only) = args.only {
        let only = filter_valid_rules(only);
        if only.is_empty() {
            eprintln!(
                "{} --only names no known rule. Run '{}' to list them.",
                "Error:".red().bold(),
                "hardlint rules".cyan()
            );
            return Ok(exit_codes::INVALID_ARGS);
        }
        engine.set_only_rules(only);
    }
    if let Some(skip) = args.skip {
        engine.set_skip_rules(filter_valid_rules(skip));
    }

    let documents = scanner::discover(&args.paths)?;
    let units = scanner::load_units(&documents).await?;
    let units = apply_excludes(&config, units)?;
    debug!(units = units.len(), "Units to analyze");

    let results = engine.analyze_all(&units);
    info!(elapsed_ms = started.elapsed().as_millis() as u64, "Analysis finished");

    let renderer: Box<dyn OutputRenderer> = match args.format {
        OutputFormat::Terminal => Box::new(TerminalOutput::new()),
        OutputFormat::Json => Box::new(JsonOutput::new()),
        OutputFormat::Sarif => Box::new(SarifOutput::new()),
    };
    let rendered = renderer.render(&results, engine.registry())?;

    if let Some(output_path) = args.output {
        tokio::fs::write(&output_path, &rendered)
            .await
            .with_context(|| format!("Failed to write '{}'", output_path.display()))?;
        eprintln!("Findings written to: {}", output_path.display());
    } else {
        println!("{rendered}");
    }

    Ok(exit_codes::for_results(&results))
}

/// Explicit `-c` file, else `./.hardlint.toml` when present, else defaults.
pub(crate) fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Failed to load configuration from '{}'", path.display())),
        None => Config::load_or_default().context("Failed to load configuration"),
    }
}

/// Drop units whose file name matches an `exclude` glob.
fn apply_excludes(config: &Config, units: Vec<SourceUnit>) -> Result<Vec<SourceUnit>> {
    let matcher = config.exclude_matcher()?;
    if matcher.is_empty() {
        return Ok(units);
    }

    Ok(units
        .into_iter()
        .filter(|unit| {
            let excluded = matcher.is_match(&unit.file);
            if excluded {
                debug!(file = %unit.file, "Unit excluded by configuration");
            }
            !excluded
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semantic::FactsModel;
    use crate::syntax::{NodeKind, Span, TreeBuilder};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn unit(file: &str) -> SourceUnit {
        let mut builder = TreeBuilder::new();
        let root = builder.push(
            NodeKind::CompilationUnit {
                members: Vec::new(),
            },
            Span::at(1, 1, 1),
        );
        SourceUnit::new(file, builder.finish(root).unwrap(), FactsModel::default())
    }

    #[test]
    fn test_apply_excludes() {
        let config = Config {
            exclude: vec!["**/Generated/**".to_string(), "*.Designer.cs".to_string()],
            ..Default::default()
        };
        let units = vec![
            unit("src/Generated/Reference.cs"),
            unit("Form1.Designer.cs"),
            unit("src/Mailer.cs"),
        ];

        let kept = apply_excludes(&config, units).unwrap();
        let files: Vec<_> = kept.iter().map(|u| u.file.as_str()).collect();
        assert_eq!(files, vec!["src/Mailer.cs"]);
    }

    #[test]
    fn test_apply_excludes_without_patterns() {
        let kept = apply_excludes(&Config::default(), vec![unit("A.cs"), unit("B.cs")]).unwrap();
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn test_load_config_from_explicit_path() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[vat]\nrate = 20").unwrap();

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.vat.rate, rust_decimal::Decimal::from(20));
    }

    #[test]
    fn test_load_config_missing_file() {
        let err = load_config(Some(Path::new("/nonexistent/.hardlint.toml"))).unwrap_err();
        assert!(err.to_string().contains("Failed to load configuration"));
    }
}
