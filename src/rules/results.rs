//! # Analysis Results Structures
//!
//! This module defines the data structures for representing findings and
//! the results of analyzing one or more source units.
//!
//! ## Overview
//!
//! - [`Severity`] - Finding severity levels (Error, Warning)
//! - [`Location`] - File, line and column a finding points at
//! - [`Finding`] - Individual finding produced by a rule
//! - [`AnalysisResults`] - Collection of findings from an analysis run
//!
//! ## Examples
//!
//! ### Creating Findings
//!
//! ```rust
//! use hardlint::rules::{Finding, Location, Severity};
//!
//! let finding = Finding::new("HCD001", "hardcode", Severity::Warning, "String 'a@b.c' contains hardcoded email")
//!     .with_location(Location::new("Mailer.cs", 8, 27))
//!     .with_description("Email addresses belong in configuration");
//! ```
//!
//! ### Working with Analysis Results
//!
//! ```rust
//! use hardlint::rules::results::{AnalysisResults, Finding, Severity};
//!
//! let mut results = AnalysisResults::new();
//!
//! results.add_finding(Finding::new("HCD004", "hardcode", Severity::Warning, "This constant 18 could be hardcoded VAT value."));
//!
//! println!("Has errors: {}", results.has_errors());
//! println!("Warning count: {}", results.count_by_severity(Severity::Warning));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity levels for findings.
///
/// - **Error** - A rule crashed, or a rule was configured to fail the run
/// - **Warning** - A suspicious pattern worth a look
///
/// # Examples
///
/// ```rust
/// use hardlint::rules::Severity;
///
/// let parsed = Severity::from_string("warn");
/// assert_eq!(parsed, Some(Severity::Warning));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Findings that fail the run, including rule failures.
    Error,
    /// Suspicious code that should be reviewed.
    Warning,
}

impl Severity {
    pub fn from_string(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "error" | "critical" => Some(Self::Error),
            "warning" | "warn" => Some(Self::Warning),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a finding points: the start of the reported node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub file: String,
    pub line: u32,
    pub column: u32,
}

impl Location {
    pub fn new(file: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// A single finding reported by a rule.
///
/// Findings are immutable once handed to the host.
///
/// # Examples
///
/// ```rust
/// use hardlint::rules::{Finding, Location, Severity};
///
/// let finding = Finding::new("WEB001", "web-performance", Severity::Warning, "Controller method is synchronous")
///     .with_location(Location::new("HomeController.cs", 12, 30));
/// assert_eq!(finding.location.as_ref().map(|l| l.line), Some(12));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Rule identifier (e.g. "HCD001").
    pub rule_id: String,

    /// Category of the rule that produced it.
    pub category: String,

    pub severity: Severity,

    /// Human readable message.
    pub message: String,

    /// Source location of the reported node.
    pub location: Option<Location>,

    /// Longer explanation, taken from the rule's descriptor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Finding {
    /// Create a new finding
    pub fn new(
        rule_id: impl Into<String>,
        category: impl Into<String>,
        severity: Severity,
        message: impl Into<String>,
    ) -> Self {
        Self {
            rule_id: rule_id.into(),
            category: category.into(),
            severity,
            message: message.into(),
            location: None,
            description: None,
        }
    }

    /// Set the location
    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Findings collected over one analysis run.
///
/// Per-unit findings are appended in input order, so the overall sequence is
/// stable across runs over the same inputs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisResults {
    /// Number of source units analyzed.
    pub units_analyzed: usize,

    findings: Vec<Finding>,
}

impl AnalysisResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_finding(&mut self, finding: Finding) {
        self.findings.push(finding);
    }

    /// Record one analyzed unit together with its findings.
    pub fn add_unit(&mut self, findings: impl IntoIterator<Item = Finding>) {
        self.units_analyzed += 1;
        self.findings.extend(findings);
    }

    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    pub fn findings_by_severity(&self, severity: Severity) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(move |f| f.severity == severity)
    }

    pub fn findings_by_rule<'a>(&'a self, rule_id: &'a str) -> impl Iterator<Item = &'a Finding> {
        self.findings.iter().filter(move |f| f.rule_id == rule_id)
    }

    pub fn count_by_severity(&self, severity: Severity) -> usize {
        self.findings_by_severity(severity).count()
    }

    pub fn has_errors(&self) -> bool {
        self.findings.iter().any(|f| f.severity == Severity::Error)
    }

    pub fn has_warnings(&self) -> bool {
        self.findings.iter().any(|f| f.severity == Severity::Warning)
    }

    pub fn total_count(&self) -> usize {
        self.findings.len()
    }

    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finding_builder() {
        let finding = Finding::new("HCD003", "hardcode", Severity::Warning, "URL found")
            .with_location(Location::new("Client.cs", 4, 21))
            .with_description("URLs belong in configuration");

        assert_eq!(finding.rule_id, "HCD003");
        assert_eq!(
            finding.location.as_ref().map(ToString::to_string),
            Some("Client.cs:4:21".to_string())
        );
        assert_eq!(
            finding.description.as_deref(),
            Some("URLs belong in configuration")
        );
    }

    #[test]
    fn test_severity_from_string() {
        assert_eq!(Severity::from_string("error"), Some(Severity::Error));
        assert_eq!(Severity::from_string("CRITICAL"), Some(Severity::Error));
        assert_eq!(Severity::from_string("warning"), Some(Severity::Warning));
        assert_eq!(Severity::from_string("Warn"), Some(Severity::Warning));
        assert_eq!(Severity::from_string("info"), None);
        assert_eq!(Severity::from_string(""), None);
    }

    #[test]
    fn test_severity_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Severity::Error).unwrap(),
            "\"error\""
        );
    }

    #[test]
    fn test_results_counts() {
        let mut results = AnalysisResults::new();
        results.add_unit(vec![
            Finding::new("HCD001", "hardcode", Severity::Warning, "w1"),
            Finding::new("ENG001", "correctness", Severity::Error, "crash"),
        ]);
        results.add_unit(vec![Finding::new(
            "HCD001",
            "hardcode",
            Severity::Warning,
            "w2",
        )]);

        assert_eq!(results.units_analyzed, 2);
        assert_eq!(results.total_count(), 3);
        assert!(results.has_errors());
        assert!(results.has_warnings());
        assert_eq!(results.count_by_severity(Severity::Warning), 2);
        assert_eq!(results.findings_by_rule("HCD001").count(), 2);
    }

    #[test]
    fn test_results_is_clean() {
        let mut results = AnalysisResults::new();
        results.add_unit(Vec::new());
        assert!(results.is_clean());
        assert!(!results.has_errors());
        assert!(!results.has_warnings());
    }
}
