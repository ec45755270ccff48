//! Rules module - Heuristic rules and the dispatcher that runs them

pub mod categories;
pub mod constants;
pub mod descriptors;
pub mod engine;
pub mod fold;
pub mod helpers;
pub mod results;

#[cfg(test)]
pub(crate) mod testing;

pub use descriptors::{Descriptor, DescriptorRegistry, RULE_FAILED};
pub use engine::{Report, Rule, RuleContext, RuleEngine, RuleError};
pub use fold::ConstantValue;
pub use results::{AnalysisResults, Finding, Location, Severity};
