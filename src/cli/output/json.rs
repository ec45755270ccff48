//! JSON output formatting

use crate::error::HardlintError;
use serde::Serialize;

use super::OutputRenderer;
use crate::rules::{AnalysisResults, DescriptorRegistry, Finding, Severity};

pub struct JsonOutput;

impl JsonOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonOutput {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct AnalysisOutput<'a> {
    version: &'static str,
    summary: Summary,
    findings: &'a [Finding],
}

#[derive(Serialize)]
struct Summary {
    units_analyzed: usize,
    error_count: usize,
    warning_count: usize,
}

impl OutputRenderer for JsonOutput {
    fn render(
        &self,
        results: &AnalysisResults,
        _registry: &DescriptorRegistry,
    ) -> Result<String, HardlintError> {
        let output = AnalysisOutput {
            version: env!("CARGO_PKG_VERSION"),
            summary: Summary {
                units_analyzed: results.units_analyzed,
                error_count: results.count_by_severity(Severity::Error),
                warning_count: results.count_by_severity(Severity::Warning),
            },
            findings: results.findings(),
        };

        Ok(serde_json::to_string_pretty(&output)?)
    }
}
