//! Class containment and class-shape heuristics

use crate::semantic::SemanticModel;
use crate::syntax::{NodeId, NodeKind, SyntaxTree};

/// Base class names that mark an EF-style schema migration.
pub const MIGRATION_BASE_NAMES: &[&str] = &["DbMigration", "Migration"];

/// Nearest enclosing class declaration, not counting `node` itself.
pub fn containing_class(tree: &SyntaxTree, node: NodeId) -> Option<NodeId> {
    all_containing_classes(tree, node).next()
}

/// Every enclosing class declaration, innermost first.
pub fn all_containing_classes(
    tree: &SyntaxTree,
    node: NodeId,
) -> impl Iterator<Item = NodeId> + '_ {
    tree.ancestors(node)
        .filter(move |ancestor| matches!(tree.kind(*ancestor), Some(NodeKind::ClassDecl { .. })))
}

/// Whether the class derives, by written name, from a migration base class.
///
/// Purely syntactic: `Migrations.DbMigration` or an alias does not match.
pub fn looks_like_migration(tree: &SyntaxTree, class: NodeId) -> bool {
    match tree.kind(class) {
        Some(NodeKind::ClassDecl { base_types, .. }) => base_types
            .iter()
            .any(|base| MIGRATION_BASE_NAMES.contains(&base.trim())),
        _ => false,
    }
}

/// Whether any property of the class looks like an identifier column.
pub fn looks_like_primary_key_holder(tree: &SyntaxTree, class: NodeId) -> bool {
    let Some(NodeKind::ClassDecl { members, .. }) = tree.kind(class) else {
        return false;
    };
    members.iter().any(|member| match tree.kind(*member) {
        Some(NodeKind::PropertyDecl { name, .. }) => {
            let lower = name.to_lowercase();
            lower.ends_with("id") || lower.ends_with("key")
        }
        _ => false,
    })
}

/// Names from the class up to the top of its hierarchy.
///
/// The declared name and base list come first, as written; when the model
/// resolves the class, the names along its base chain follow.
pub fn class_names_to_top(
    tree: &SyntaxTree,
    model: &dyn SemanticModel,
    class: NodeId,
) -> Vec<String> {
    let Some(NodeKind::ClassDecl {
        name, base_types, ..
    }) = tree.kind(class)
    else {
        return Vec::new();
    };

    let mut names = vec![name.clone()];
    names.extend(base_types.iter().cloned());
    if let Some(declared) = model.declared_type(class) {
        names.extend(
            model
                .base_chain(declared)
                .into_iter()
                .filter_map(|ty| model.type_info(ty).map(|info| info.name.clone())),
        );
    }
    names
}
