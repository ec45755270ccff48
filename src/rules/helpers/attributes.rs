//! Attribute navigation

use crate::syntax::{NodeId, NodeKind, SyntaxTree};

const ATTRIBUTE_SUFFIX: &str = "Attribute";

/// Normalised attribute class name: last segment of a qualified name with the
/// `Attribute` suffix added when it was omitted.
///
/// `System.Web.Services.WebService` and `WebServiceAttribute` both give
/// `WebServiceAttribute`.
pub fn attribute_name(written: &str) -> String {
    let last = written
        .rsplit(['.', ':'])
        .next()
        .unwrap_or(written)
        .trim();
    if last.ends_with(ATTRIBUTE_SUFFIX) {
        last.to_string()
    } else {
        format!("{last}{ATTRIBUTE_SUFFIX}")
    }
}

/// The attribute an attribute argument belongs to.
///
/// Only the direct chain argument -> argument list -> attribute counts.
pub fn walk_to_attribute(tree: &SyntaxTree, argument: NodeId) -> Option<NodeId> {
    if !matches!(tree.kind(argument), Some(NodeKind::AttributeArgument { .. })) {
        return None;
    }
    let list = tree.parent(argument)?;
    if !matches!(tree.kind(list), Some(NodeKind::AttributeArgumentList { .. })) {
        return None;
    }
    let attribute = tree.parent(list)?;
    matches!(tree.kind(attribute), Some(NodeKind::Attribute { .. })).then_some(attribute)
}
