//! Semantic type checks

use crate::semantic::SemanticModel;
use crate::syntax::{NodeId, NodeKind, SyntaxTree};

const TASK_TYPE_NAMES: &[&str] = &["Task", "ValueTask"];

/// Whether the static type of `node` is exactly the well-known type `name`.
///
/// False when either side does not resolve.
pub fn is_of_type(model: &dyn SemanticModel, node: NodeId, name: &str) -> bool {
    match (model.type_of(node), model.well_known_type(name)) {
        (Some(actual), Some(expected)) => actual == expected,
        _ => false,
    }
}

/// Whether the static type of `node` is the well-known type `name` or derives
/// from it.
pub fn is_of_type_or_derived(model: &dyn SemanticModel, node: NodeId, name: &str) -> bool {
    match (model.type_of(node), model.well_known_type(name)) {
        (Some(actual), Some(expected)) => model.is_subtype_of(actual, expected),
        _ => false,
    }
}

/// Whether a return type is `Task`, `Task<T>`, `ValueTask` or `ValueTask<T>`.
///
/// Uses the resolved type when there is one and falls back to the written
/// name otherwise.
pub fn is_task_like(tree: &SyntaxTree, model: &dyn SemanticModel, type_node: NodeId) -> bool {
    if let Some(ty) = model.type_of(type_node) {
        let Some(info) = model.type_info(ty) else {
            return false;
        };
        let definition = info
            .generic_definition
            .and_then(|definition| model.type_info(definition))
            .map(|definition| definition.name.as_str());
        return TASK_TYPE_NAMES.contains(&info.name.as_str())
            || definition.is_some_and(|name| TASK_TYPE_NAMES.contains(&name));
    }

    match tree.kind(type_node) {
        Some(NodeKind::TypeName { name }) => TASK_TYPE_NAMES.contains(&simple_type_name(name)),
        _ => false,
    }
}

/// `System.Threading.Tasks.Task<int>` -> `Task`
fn simple_type_name(written: &str) -> &str {
    let without_generics = written.split('<').next().unwrap_or(written);
    without_generics
        .rsplit('.')
        .next()
        .unwrap_or(without_generics)
        .trim()
}
