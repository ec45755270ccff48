//! Rules command - List the registered rules

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;

use super::analyze::load_config;
use super::{RulesArgs, RulesFormat};
use crate::cli::exit_codes;
use crate::config::Config;
use crate::rules::{Descriptor, RuleEngine, Severity};

/// One registry entry as configured for this run.
#[derive(Debug, Serialize)]
struct RuleEntry {
    #[serde(flatten)]
    descriptor: &'static Descriptor,
    enabled: bool,
    severity: Severity,
}

pub async fn execute(args: RulesArgs, config_path: Option<PathBuf>) -> Result<i32> {
    let config = load_config(config_path.as_deref())?;
    let entries = entries(&config)?;

    let rendered = match args.format {
        RulesFormat::Terminal => render_terminal(&entries),
        RulesFormat::Json => serde_json::to_string_pretty(&entries)?,
    };
    println!("{rendered}");

    Ok(exit_codes::SUCCESS)
}

fn entries(config: &Config) -> Result<Vec<RuleEntry>> {
    let engine = RuleEngine::new(config).context("Failed to set up the rule engine")?;

    Ok(engine
        .registry()
        .iter()
        .map(|descriptor| RuleEntry {
            descriptor,
            enabled: config.is_rule_enabled(descriptor.id),
            severity: config
                .rule_severity(descriptor.id)
                .unwrap_or(descriptor.default_severity),
        })
        .collect())
}

fn render_terminal(entries: &[RuleEntry]) -> String {
    let mut output = String::new();

    for entry in entries {
        let severity = match entry.severity {
            Severity::Error => entry.severity.as_str().red(),
            Severity::Warning => entry.severity.as_str().yellow(),
        };
        let state = if entry.enabled {
            String::new()
        } else {
            format!(" {}", "(disabled)".dimmed())
        };
        output.push_str(&format!(
            "{} {:<8} {:<12} {}{}\n",
            entry.descriptor.id.cyan().bold(),
            severity,
            entry.descriptor.category.dimmed(),
            entry.descriptor.title,
            state
        ));
        output.push_str(&format!(
            "    {} {}\n",
            "└─".dimmed(),
            entry.descriptor.description.dimmed()
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_follow_configuration() {
        let config: Config =
            toml::from_str("[rules.HCD004]\nenabled = false\n\n[rules.WEB001]\nseverity = \"error\"\n")
                .unwrap();

        let entries = entries(&config).unwrap();
        let ids: Vec<_> = entries.iter().map(|e| e.descriptor.id).collect();
        assert_eq!(
            ids,
            vec!["ENG001", "EXC001", "HCD001", "HCD002", "HCD003", "HCD004", "WEB001"]
        );

        let vat = entries.iter().find(|e| e.descriptor.id == "HCD004").unwrap();
        assert!(!vat.enabled);
        let web = entries.iter().find(|e| e.descriptor.id == "WEB001").unwrap();
        assert_eq!(web.severity, Severity::Error);
    }

    #[test]
    fn test_json_entry_is_flat() {
        let entries = entries(&Config::default()).unwrap();
        let json = serde_json::to_value(&entries[0]).unwrap();
        assert_eq!(json["id"], "ENG001");
        assert_eq!(json["enabled"], true);
        assert_eq!(json["severity"], "error");
    }

    #[test]
    fn test_render_terminal_marks_disabled() {
        let config: Config = toml::from_str("[rules.HCD002]\nenabled = false\n").unwrap();
        let rendered = render_terminal(&entries(&config).unwrap());
        assert!(rendered.contains("HCD002"));
        assert!(rendered.contains("(disabled)"));
    }
}
