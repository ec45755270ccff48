//! Exit codes for the CLI
//!
//! # Exit Code Reference
//!
//! | Code | Constant | Meaning | Example |
//! |------|----------|---------|---------|
//! | 0 | `SUCCESS` | Clean run | No findings |
//! | 1 | `ERROR_FINDINGS` | Error findings | A rule failed, or a rule configured as `error` fired |
//! | 2 | `WARNINGS` | Warnings only | Hardcoded URL reported |
//! | 3 | `ERROR` | Runtime error | Unreadable unit document, invalid config |
//! | 4 | `INVALID_ARGS` | Invalid arguments | Unknown flag, missing path |

use crate::rules::AnalysisResults;

/// No findings, or a command that completed normally.
pub const SUCCESS: i32 = 0;

/// At least one error-severity finding, rule failures included.
pub const ERROR_FINDINGS: i32 = 1;

/// Findings, all of them warnings.
pub const WARNINGS: i32 = 2;

/// Configuration, input or engine setup failed before any finding was produced.
pub const ERROR: i32 = 3;

/// Invalid command-line arguments.
pub const INVALID_ARGS: i32 = 4;

/// Exit code for a finished analysis run.
pub fn for_results(results: &AnalysisResults) -> i32 {
    if results.has_errors() {
        ERROR_FINDINGS
    } else if results.has_warnings() {
        WARNINGS
    } else {
        SUCCESS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{Finding, Severity};

    #[test]
    fn test_exit_codes_are_distinct() {
        let codes = [SUCCESS, ERROR_FINDINGS, WARNINGS, ERROR, INVALID_ARGS];
        for i in 0..codes.len() {
            for j in (i + 1)..codes.len() {
                assert_ne!(codes[i], codes[j]);
            }
        }
    }

    #[test]
    fn test_for_results() {
        let mut results = AnalysisResults::new();
        results.add_unit(Vec::new());
        assert_eq!(for_results(&results), SUCCESS);

        results.add_finding(Finding::new("HCD003", "hardcode", Severity::Warning, "url"));
        assert_eq!(for_results(&results), WARNINGS);

        results.add_finding(Finding::new("ENG001", "correctness", Severity::Error, "crash"));
        assert_eq!(for_results(&results), ERROR_FINDINGS);
    }
}
