//! Configuration module
//!
//! `.hardlint.toml` holds per-rule switches plus the static settings each
//! heuristic reads once when the engine is built.

pub mod loader;

pub use loader::Config;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Rule configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Whether the rule is enabled
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Severity override (error, warning)
    pub severity: Option<String>,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            severity: None,
        }
    }
}

fn default_true() -> bool {
    true
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// VAT literal detection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VatConfig {
    /// VAT rate in percent
    #[serde(default = "default_vat_rate")]
    pub rate: Decimal,

    /// Parameter names that may legitimately receive the rate-like values
    #[serde(default = "default_vat_parameters")]
    pub parameter_whitelist: Vec<String>,
}

impl Default for VatConfig {
    fn default() -> Self {
        Self {
            rate: default_vat_rate(),
            parameter_whitelist: default_vat_parameters(),
        }
    }
}

fn default_vat_rate() -> Decimal {
    Decimal::from(18)
}

fn default_vat_parameters() -> Vec<String> {
    strings(&[
        "index",
        "length",
        "precision",
        "scale",
        "startindex",
        "count",
        "order",
        "position",
        "capacity",
        "size",
    ])
}

/// Email literal detection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    /// Parameter names whose arguments are never reported
    #[serde(default = "default_email_parameters")]
    pub parameter_whitelist: Vec<String>,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            parameter_whitelist: default_email_parameters(),
        }
    }
}

fn default_email_parameters() -> Vec<String> {
    strings(&["sql"])
}

/// URL literal detection
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UrlConfig {
    /// Extra prefixes that are never reported (added to the built-in ones)
    #[serde(default)]
    pub allowed_prefixes: Vec<String>,

    /// Extra attributes whose arguments may be URLs
    #[serde(default)]
    pub allowed_attributes: Vec<String>,
}

/// Exception message logging
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExceptionsConfig {
    /// Logging method names, matched case-sensitively
    #[serde(default = "default_log_methods")]
    pub log_methods: Vec<String>,
}

impl Default for ExceptionsConfig {
    fn default() -> Self {
        Self {
            log_methods: default_log_methods(),
        }
    }
}

fn default_log_methods() -> Vec<String> {
    strings(&[
        "Error",
        "Warn",
        "Warning",
        "Info",
        "Information",
        "Debug",
        "Trace",
    ])
}

/// Synchronous controller detection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControllersConfig {
    /// Result helpers that make a `return` trivial when given constant arguments
    #[serde(default = "default_result_methods")]
    pub result_methods: Vec<String>,
}

impl Default for ControllersConfig {
    fn default() -> Self {
        Self {
            result_methods: default_result_methods(),
        }
    }
}

fn default_result_methods() -> Vec<String> {
    strings(&["View", "PartialView", "File"])
}
