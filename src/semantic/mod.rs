//! Semantic resolver surface
//!
//! Rules never look types up by themselves; they go through a
//! [`SemanticModel`] handed to them by the dispatcher. Every query may come
//! back empty, and callers treat an empty answer as "cannot confirm".

pub mod facts;

pub use facts::FactsModel;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::syntax::NodeId;

/// Opaque identity of a resolved type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeId(pub u32);

/// Opaque identity of a resolved method, constructor or member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymbolId(pub u32);

/// A formal parameter of a resolved method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterInfo {
    pub name: String,
    #[serde(default)]
    pub type_id: Option<TypeId>,
}

impl ParameterInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_id: None,
        }
    }
}

/// What the resolver knows about a named type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeInfo {
    /// Simple name without generic arity (`Task` for `Task<T>`).
    pub name: String,
    #[serde(default)]
    pub base: Option<TypeId>,
    /// Open generic definition for constructed generic types.
    #[serde(default)]
    pub generic_definition: Option<TypeId>,
}

/// Query surface provided by the host compiler.
pub trait SemanticModel: Send + Sync {
    /// Static type of an expression or type-syntax node.
    fn type_of(&self, node: NodeId) -> Option<TypeId>;

    /// Symbol an invocation, object creation, attribute or member access binds to.
    fn symbol_of(&self, node: NodeId) -> Option<SymbolId>;

    /// Type declared by a class declaration node.
    fn declared_type(&self, class: NodeId) -> Option<TypeId>;

    /// Ordered formal parameters of a method or constructor symbol.
    fn method_parameters(&self, symbol: SymbolId) -> Option<&[ParameterInfo]>;

    fn type_info(&self, ty: TypeId) -> Option<&TypeInfo>;

    /// Built-in types by metadata name, e.g. `System.Exception`.
    fn well_known_type(&self, name: &str) -> Option<TypeId>;

    /// Member symbols of `ty` with the given simple name (all overloads).
    fn members_named(&self, ty: TypeId, name: &str) -> Vec<SymbolId>;

    /// Whether `ty` is `base` or derives from it through the base chain.
    fn is_subtype_of(&self, ty: TypeId, base: TypeId) -> bool {
        let mut seen = HashSet::new();
        let mut current = Some(ty);
        while let Some(candidate) = current {
            if candidate == base {
                return true;
            }
            if !seen.insert(candidate) {
                return false;
            }
            current = self.type_info(candidate).and_then(|info| info.base);
        }
        false
    }

    /// The type followed by every base type, nearest first.
    fn base_chain(&self, ty: TypeId) -> Vec<TypeId> {
        let mut chain = Vec::new();
        let mut current = Some(ty);
        while let Some(candidate) = current {
            if chain.contains(&candidate) {
                break;
            }
            chain.push(candidate);
            current = self.type_info(candidate).and_then(|info| info.base);
        }
        chain
    }
}
