//! Configuration loader

use globset::{Glob, GlobSet, GlobSetBuilder};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::ConfigError;
use crate::rules::Severity;

use super::{ControllersConfig, EmailConfig, ExceptionsConfig, RuleConfig, UrlConfig, VatConfig};

pub const CONFIG_FILENAME: &str = ".hardlint.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Glob patterns of unit file names to skip
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Rule overrides keyed by rule id
    #[serde(default)]
    pub rules: BTreeMap<String, RuleConfig>,

    #[serde(default)]
    pub vat: VatConfig,

    #[serde(default)]
    pub email: EmailConfig,

    #[serde(default)]
    pub urls: UrlConfig,

    #[serde(default)]
    pub exceptions: ExceptionsConfig,

    #[serde(default)]
    pub controllers: ControllersConfig,
}

impl Config {
    /// Load configuration from the working directory or return default
    pub fn load_or_default() -> Result<Self, ConfigError> {
        let config_path = Path::new(CONFIG_FILENAME);

        if config_path.exists() {
            Self::load_from_file(config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load and validate configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.display().to_string(),
            source: e,
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            source: e,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to TOML
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(Into::into)
    }

    /// Reject settings no pass could run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let rate = self.vat.rate;
        if rate <= Decimal::ZERO || rate >= Decimal::ONE_HUNDRED {
            return Err(ConfigError::Invalid {
                field: "vat.rate".to_string(),
                message: format!("{rate} is not a percentage between 0 and 100"),
            });
        }

        for (id, rule) in &self.rules {
            if let Some(severity) = &rule.severity {
                if Severity::from_string(severity).is_none() {
                    return Err(ConfigError::Invalid {
                        field: format!("rules.{id}.severity"),
                        message: format!("unknown severity '{severity}' (expected error or warning)"),
                    });
                }
            }
        }

        self.exclude_matcher().map(|_| ())
    }

    /// Check if a rule is enabled
    pub fn is_rule_enabled(&self, rule_id: &str) -> bool {
        self.rules.get(rule_id).map(|r| r.enabled).unwrap_or(true)
    }

    /// Get severity override for a rule
    pub fn rule_severity(&self, rule_id: &str) -> Option<Severity> {
        self.rules
            .get(rule_id)
            .and_then(|r| r.severity.as_deref())
            .and_then(Severity::from_string)
    }

    /// Compiled `exclude` patterns
    pub fn exclude_matcher(&self) -> Result<GlobSet, ConfigError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &self.exclude {
            let glob = Glob::new(pattern).map_err(|e| ConfigError::Glob {
                pattern: pattern.clone(),
                source: e,
            })?;
            builder.add(glob);
        }
        builder.build().map_err(|e| ConfigError::Glob {
            pattern: self.exclude.join(", "),
            source: e,
        })
    }
}
