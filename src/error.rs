//! Error types for hardlint
//!
//! This module defines custom error types using `thiserror` for better error handling
//! and more descriptive error messages throughout the application.
//!
//! Rule failures are not errors at this level: the dispatcher turns them into
//! findings. Tree validation errors live in [`crate::syntax::TreeError`].

use thiserror::Error;

/// Main error type for hardlint
#[derive(Error, Debug)]
pub enum HardlintError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Engine setup errors
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// Source unit loading errors
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    /// Rendering findings failed
    #[error("Output error: {0}")]
    Output(#[from] serde_json::Error),
}

/// Errors raised while loading or validating `.hardlint.toml`
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file
    #[error("Failed to read config file '{path}': {source}")]
    FileRead {
        path: String,
        source: std::io::Error,
    },

    /// The file is not valid TOML for the expected schema
    #[error("Failed to parse config file '{path}': {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },

    #[error("Failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A value is out of range or unknown
    #[error("Invalid value for '{field}': {message}")]
    Invalid { field: String, message: String },

    #[error("Invalid exclude pattern '{pattern}': {source}")]
    Glob {
        pattern: String,
        source: globset::Error,
    },
}

/// Errors in the rule set itself, fatal before any pass runs
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Rule id '{0}' is registered more than once")]
    DuplicateRule(String),

    #[error("Rule id '{0}' is reserved for rule failures")]
    ReservedRuleId(String),
}

/// Errors raised while reading source units
#[derive(Error, Debug)]
pub enum InputError {
    #[error("Failed to read '{path}': {source}")]
    FileRead {
        path: String,
        source: std::io::Error,
    },

    /// Malformed JSON or a structurally invalid tree
    #[error("Failed to parse source unit '{path}': {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },

    #[error("Path '{0}' does not exist")]
    NotFound(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_error_converts() {
        let err: HardlintError = EngineError::DuplicateRule("HCD001".to_string()).into();
        assert_eq!(
            err.to_string(),
            "Engine error: Rule id 'HCD001' is registered more than once"
        );
    }

    #[test]
    fn test_config_error_message() {
        let err = ConfigError::Invalid {
            field: "vat.rate".to_string(),
            message: "must be between 0 and 100".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid value for 'vat.rate': must be between 0 and 100"
        );
    }
}
