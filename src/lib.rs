//! hardlint Library
//!
//! Heuristic checks over C# syntax trees exported by a compiler front-end:
//! hardcoded emails, GUIDs, URLs and VAT rates, exception messages handed to
//! loggers, and synchronous controller actions.
//!
//! The host supplies one [`scanner::SourceUnit`] per file. A
//! [`rules::RuleEngine`] walks each tree once, dispatching nodes to the rules
//! subscribed to their kind, and isolates any rule that fails.
//!
//! ```rust
//! use hardlint::config::Config;
//! use hardlint::rules::RuleEngine;
//! use hardlint::scanner::SourceUnit;
//!
//! let unit = SourceUnit::from_json("mailer.tree.json", r#"{
//!     "file": "Mailer.cs",
//!     "tree": { "nodes": [
//!         {"kind": "CompilationUnit", "members": [1],
//!          "span": {"start": {"line": 1, "column": 1}, "end": {"line": 1, "column": 30}}},
//!         {"kind": "Literal", "literal": "String", "text": "ops@example.com",
//!          "span": {"start": {"line": 1, "column": 5}, "end": {"line": 1, "column": 22}}}
//!     ]}
//! }"#).unwrap();
//!
//! let engine = RuleEngine::new(&Config::default()).unwrap();
//! let findings = engine.analyze(&unit);
//! assert_eq!(findings[0].rule_id, "HCD001");
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod rules;
pub mod scanner;
pub mod semantic;
pub mod syntax;

pub use error::HardlintError;
