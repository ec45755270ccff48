//! Output formatting module for CLI

pub mod json;
mod sarif;
mod terminal;

pub use json::JsonOutput;
pub use sarif::SarifOutput;
pub use terminal::TerminalOutput;

use crate::error::HardlintError;
use crate::rules::{AnalysisResults, DescriptorRegistry};

/// Trait for rendering analysis results
///
/// The registry carries the metadata of every rule that could have fired,
/// including the ones that stayed silent.
pub trait OutputRenderer {
    fn render(
        &self,
        results: &AnalysisResults,
        registry: &DescriptorRegistry,
    ) -> Result<String, HardlintError>;
}
