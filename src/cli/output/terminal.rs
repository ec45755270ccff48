//! Terminal output formatting with colors

use crate::error::HardlintError;
use colored::Colorize;

use super::OutputRenderer;
use crate::rules::{AnalysisResults, DescriptorRegistry, Finding, Severity};

pub struct TerminalOutput;

impl TerminalOutput {
    pub fn new() -> Self {
        Self
    }

    fn format_header(&self, results: &AnalysisResults) -> String {
        format!(
            "\n{} v{}\n\n{} {}\n",
            "hardlint".cyan().bold(),
            env!("CARGO_PKG_VERSION"),
            "Units analyzed:".dimmed(),
            results.units_analyzed.to_string().white().bold()
        )
    }

    fn format_findings(&self, results: &AnalysisResults) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "\n{}\n{}\n\n",
            "━".repeat(50).dimmed(),
            "  FINDINGS".bold()
        ));

        if results.is_clean() {
            output.push_str(&format!("  {}\n", "No findings.".green()));
            return output;
        }

        let errors: Vec<_> = results.findings_by_severity(Severity::Error).collect();
        if !errors.is_empty() {
            output.push_str(&format!("{} ({})\n", "❌ ERROR".red().bold(), errors.len()));
            for finding in errors {
                output.push_str(&self.format_finding(finding));
            }
            output.push('\n');
        }

        let warnings: Vec<_> = results.findings_by_severity(Severity::Warning).collect();
        if !warnings.is_empty() {
            output.push_str(&format!(
                "{} ({})\n",
                "⚠️  WARNING".yellow().bold(),
                warnings.len()
            ));
            for finding in warnings {
                output.push_str(&self.format_finding(finding));
            }
            output.push('\n');
        }

        output
    }

    fn format_finding(&self, finding: &Finding) -> String {
        let mut output = format!(
            "  {} [{}] {}\n",
            "•".dimmed(),
            finding.rule_id.cyan(),
            finding.message
        );

        if let Some(location) = &finding.location {
            output.push_str(&format!(
                "    {} {}\n",
                "└─".dimmed(),
                location.to_string().dimmed()
            ));
        }

        output
    }

    fn format_summary(&self, results: &AnalysisResults) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "\n{}\n{}\n\n",
            "━".repeat(50).dimmed(),
            "  SUMMARY".bold()
        ));

        let error_count = results.count_by_severity(Severity::Error);
        let warning_count = results.count_by_severity(Severity::Warning);

        output.push_str(&format!(
            "Errors: {} │ Warnings: {}\n",
            error_count.to_string().red().bold(),
            warning_count.to_string().yellow().bold()
        ));

        let failures = results.findings_by_rule("ENG001").count();
        if failures > 0 {
            output.push_str(&format!(
                "\n{} {} rule failure(s); findings for those nodes are missing. Rerun with -v for details.\n",
                "⚠️ ".yellow(),
                failures
            ));
        }

        output
    }
}

impl Default for TerminalOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputRenderer for TerminalOutput {
    fn render(
        &self,
        results: &AnalysisResults,
        _registry: &DescriptorRegistry,
    ) -> Result<String, HardlintError> {
        let mut output = String::new();

        output.push_str(&self.format_header(results));
        output.push_str(&self.format_findings(results));
        output.push_str(&self.format_summary(results));

        Ok(output)
    }
}
