//! Source units handed over by the front-end

use serde::Deserialize;
use std::path::Path;

use crate::error::InputError;
use crate::semantic::FactsModel;
use crate::syntax::SyntaxTree;

/// One parsed C# file: its syntax tree plus whatever the host resolved.
///
/// Owned by a single pass and dropped afterwards.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceUnit {
    /// Source file name used in finding locations
    pub file: String,

    pub tree: SyntaxTree,

    /// Missing semantics means nothing resolves.
    #[serde(default)]
    pub semantics: FactsModel,
}

impl SourceUnit {
    pub fn new(file: impl Into<String>, tree: SyntaxTree, semantics: FactsModel) -> Self {
        Self {
            file: file.into(),
            tree,
            semantics,
        }
    }

    /// Parse a unit document; `origin` only labels errors.
    pub fn from_json(origin: &str, json: &str) -> Result<Self, InputError> {
        serde_json::from_str(json).map_err(|e| InputError::Parse {
            path: origin.to_string(),
            source: e,
        })
    }

    pub async fn load(path: &Path) -> Result<Self, InputError> {
        let origin = path.display().to_string();
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| InputError::FileRead {
                path: origin.clone(),
                source: e,
            })?;
        Self::from_json(&origin, &content)
    }
}
