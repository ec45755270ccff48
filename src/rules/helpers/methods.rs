//! Method declaration and invocation helpers

use crate::syntax::{NodeId, NodeKind, SyntaxTree};

/// Simple name of the method an invocation calls.
///
/// `Log.Error(..)` and `Error(..)` both give `Error`; generic arguments are
/// dropped. Anything fancier (delegates, indexers) has no name.
pub fn method_name(tree: &SyntaxTree, invocation: NodeId) -> Option<&str> {
    let Some(NodeKind::Invocation { callee, .. }) = tree.kind(invocation) else {
        return None;
    };
    let name = match tree.kind(*callee)? {
        NodeKind::Identifier { name } | NodeKind::MemberAccess { name, .. } => name.as_str(),
        _ => return None,
    };
    Some(name.split('<').next().unwrap_or(name))
}

fn has_modifier(tree: &SyntaxTree, method: NodeId, modifier: &str) -> bool {
    match tree.kind(method) {
        Some(NodeKind::MethodDecl { modifiers, .. }) => modifiers.iter().any(|m| m == modifier),
        _ => false,
    }
}

pub fn is_public(tree: &SyntaxTree, method: NodeId) -> bool {
    has_modifier(tree, method, "public")
}

pub fn is_abstract(tree: &SyntaxTree, method: NodeId) -> bool {
    has_modifier(tree, method, "abstract")
}
