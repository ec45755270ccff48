//! Table-driven semantic model
//!
//! The host resolves what it can and dumps the answers as plain tables; this
//! model only looks them up. An empty model resolves nothing.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{ParameterInfo, SemanticModel, SymbolId, TypeId, TypeInfo};
use crate::syntax::NodeId;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TypeEntry {
    id: TypeId,
    #[serde(flatten)]
    info: TypeInfo,
    #[serde(default)]
    members: Vec<MemberEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct MemberEntry {
    name: String,
    symbol: SymbolId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct NodeTypeEntry {
    node: NodeId,
    #[serde(rename = "type")]
    ty: TypeId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct NodeSymbolEntry {
    node: NodeId,
    symbol: SymbolId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct MethodEntry {
    symbol: SymbolId,
    #[serde(default)]
    parameters: Vec<ParameterInfo>,
}

/// Wire form of [`FactsModel`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct FactsSpec {
    #[serde(default)]
    types: Vec<TypeEntry>,
    #[serde(default)]
    well_known: HashMap<String, TypeId>,
    #[serde(default)]
    node_types: Vec<NodeTypeEntry>,
    #[serde(default)]
    node_symbols: Vec<NodeSymbolEntry>,
    #[serde(default)]
    declared_types: Vec<NodeTypeEntry>,
    #[serde(default)]
    methods: Vec<MethodEntry>,
}

/// Semantic facts resolved ahead of time by the host.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "FactsSpec")]
pub struct FactsModel {
    types: HashMap<TypeId, TypeInfo>,
    members: HashMap<(TypeId, String), Vec<SymbolId>>,
    well_known: HashMap<String, TypeId>,
    node_types: HashMap<NodeId, TypeId>,
    node_symbols: HashMap<NodeId, SymbolId>,
    declared_types: HashMap<NodeId, TypeId>,
    methods: HashMap<SymbolId, Vec<ParameterInfo>>,
}

impl From<FactsSpec> for FactsModel {
    fn from(spec: FactsSpec) -> Self {
        let mut model = FactsModel {
            well_known: spec.well_known,
            ..Default::default()
        };
        for entry in spec.types {
            for member in entry.members {
                model
                    .members
                    .entry((entry.id, member.name))
                    .or_default()
                    .push(member.symbol);
            }
            model.types.insert(entry.id, entry.info);
        }
        model.node_types = spec.node_types.into_iter().map(|e| (e.node, e.ty)).collect();
        model.declared_types = spec
            .declared_types
            .into_iter()
            .map(|e| (e.node, e.ty))
            .collect();
        model.node_symbols = spec
            .node_symbols
            .into_iter()
            .map(|e| (e.node, e.symbol))
            .collect();
        model.methods = spec
            .methods
            .into_iter()
            .map(|e| (e.symbol, e.parameters))
            .collect();
        model
    }
}

impl FactsModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a type; `base` links it into an inheritance chain.
    pub fn with_type(mut self, id: TypeId, name: &str, base: Option<TypeId>) -> Self {
        self.types.insert(
            id,
            TypeInfo {
                name: name.to_string(),
                base,
                generic_definition: None,
            },
        );
        self
    }

    /// Declare a constructed generic type and its open definition.
    pub fn with_generic(mut self, id: TypeId, name: &str, definition: TypeId) -> Self {
        self.types.insert(
            id,
            TypeInfo {
                name: name.to_string(),
                base: None,
                generic_definition: Some(definition),
            },
        );
        self
    }

    pub fn with_well_known(mut self, name: &str, ty: TypeId) -> Self {
        self.well_known.insert(name.to_string(), ty);
        self
    }

    pub fn with_member(mut self, ty: TypeId, name: &str, symbol: SymbolId) -> Self {
        self.members
            .entry((ty, name.to_string()))
            .or_default()
            .push(symbol);
        self
    }

    pub fn with_method(mut self, symbol: SymbolId, parameters: &[&str]) -> Self {
        self.methods.insert(
            symbol,
            parameters.iter().map(|name| ParameterInfo::new(*name)).collect(),
        );
        self
    }

    pub fn bind_type(mut self, node: NodeId, ty: TypeId) -> Self {
        self.node_types.insert(node, ty);
        self
    }

    pub fn bind_symbol(mut self, node: NodeId, symbol: SymbolId) -> Self {
        self.node_symbols.insert(node, symbol);
        self
    }

    pub fn declare(mut self, class: NodeId, ty: TypeId) -> Self {
        self.declared_types.insert(class, ty);
        self
    }
}

impl SemanticModel for FactsModel {
    fn type_of(&self, node: NodeId) -> Option<TypeId> {
        self.node_types.get(&node).copied()
    }

    fn symbol_of(&self, node: NodeId) -> Option<SymbolId> {
        self.node_symbols.get(&node).copied()
    }

    fn declared_type(&self, class: NodeId) -> Option<TypeId> {
        self.declared_types.get(&class).copied()
    }

    fn method_parameters(&self, symbol: SymbolId) -> Option<&[ParameterInfo]> {
        self.methods.get(&symbol).map(Vec::as_slice)
    }

    fn type_info(&self, ty: TypeId) -> Option<&TypeInfo> {
        self.types.get(&ty)
    }

    fn well_known_type(&self, name: &str) -> Option<TypeId> {
        self.well_known.get(name).copied()
    }

    fn members_named(&self, ty: TypeId, name: &str) -> Vec<SymbolId> {
        self.members
            .get(&(ty, name.to_string()))
            .cloned()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_model_resolves_nothing() {
        let model = FactsModel::default();
        assert_eq!(model.type_of(NodeId(0)), None);
        assert_eq!(model.symbol_of(NodeId(0)), None);
        assert_eq!(model.well_known_type("System.Exception"), None);
        assert!(model.members_named(TypeId(1), "Parse").is_empty());
    }

    #[test]
    fn test_subtype_walks_base_chain() {
        let model = FactsModel::new()
            .with_type(TypeId(1), "Exception", None)
            .with_type(TypeId(2), "IOException", Some(TypeId(1)))
            .with_type(TypeId(3), "FileNotFoundException", Some(TypeId(2)));
        assert!(model.is_subtype_of(TypeId(3), TypeId(1)));
        assert!(model.is_subtype_of(TypeId(1), TypeId(1)));
        assert!(!model.is_subtype_of(TypeId(1), TypeId(3)));
        assert_eq!(
            model.base_chain(TypeId(3)),
            vec![TypeId(3), TypeId(2), TypeId(1)]
        );
    }

    #[test]
    fn test_subtype_survives_cyclic_bases() {
        let model = FactsModel::new()
            .with_type(TypeId(1), "A", Some(TypeId(2)))
            .with_type(TypeId(2), "B", Some(TypeId(1)));
        assert!(!model.is_subtype_of(TypeId(1), TypeId(9)));
        assert_eq!(model.base_chain(TypeId(1)), vec![TypeId(1), TypeId(2)]);
    }

    #[test]
    fn test_deserialize_tables() {
        let json = r#"{
            "types": [
                {"id": 1, "name": "Guid", "members": [
                    {"name": "Parse", "symbol": 10},
                    {"name": "Parse", "symbol": 11}
                ]}
            ],
            "well_known": {"System.Guid": 1},
            "node_types": [{"node": 4, "type": 1}],
            "node_symbols": [{"node": 5, "symbol": 10}],
            "methods": [{"symbol": 10, "parameters": [{"name": "input"}]}]
        }"#;
        let model: FactsModel = serde_json::from_str(json).unwrap();
        assert_eq!(model.well_known_type("System.Guid"), Some(TypeId(1)));
        assert_eq!(model.type_of(NodeId(4)), Some(TypeId(1)));
        assert_eq!(model.symbol_of(NodeId(5)), Some(SymbolId(10)));
        assert_eq!(
            model.members_named(TypeId(1), "Parse"),
            vec![SymbolId(10), SymbolId(11)]
        );
        let params = model.method_parameters(SymbolId(10)).unwrap();
        assert_eq!(params[0].name, "input");
    }
}
