//! Argument to parameter binding
//!
//! Every function here fails closed: when the binding cannot be worked out
//! the answer is "no parameter" / "not whitelisted".

use crate::semantic::{ParameterInfo, SemanticModel, SymbolId};
use crate::syntax::{NodeId, NodeKind, SyntaxTree};

/// The argument node whose expression is exactly `node`.
pub fn enclosing_argument(tree: &SyntaxTree, node: NodeId) -> Option<NodeId> {
    let parent = tree.parent(node)?;
    match tree.kind(parent)? {
        NodeKind::Argument { expression, .. } | NodeKind::AttributeArgument { expression, .. }
            if *expression == node =>
        {
            Some(parent)
        }
        _ => None,
    }
}

/// Expressions passed through an argument list, in order.
///
/// `None` when `list` is not an argument list or holds something other than
/// arguments.
pub fn argument_expressions(tree: &SyntaxTree, list: NodeId) -> Option<Vec<NodeId>> {
    let arguments = match tree.kind(list)? {
        NodeKind::ArgumentList { arguments }
        | NodeKind::BracketedArgumentList { arguments }
        | NodeKind::AttributeArgumentList { arguments } => arguments,
        _ => return None,
    };
    arguments
        .iter()
        .map(|argument| match tree.kind(*argument)? {
            NodeKind::Argument { expression, .. } | NodeKind::AttributeArgument { expression, .. } => {
                Some(*expression)
            }
            _ => None,
        })
        .collect()
}

/// Symbol of the invocation, object creation or attribute an argument is
/// passed to.
pub fn called_method(
    tree: &SyntaxTree,
    model: &dyn SemanticModel,
    argument: NodeId,
) -> Option<SymbolId> {
    let list = tree.parent(argument)?;
    if !matches!(
        tree.kind(list)?,
        NodeKind::ArgumentList { .. } | NodeKind::AttributeArgumentList { .. }
    ) {
        return None;
    }
    let call = tree.parent(list)?;
    match tree.kind(call)? {
        NodeKind::Invocation { .. } | NodeKind::ObjectCreation { .. } | NodeKind::Attribute { .. } => {
            model.symbol_of(call)
        }
        _ => None,
    }
}

/// Formal parameter an argument binds to.
///
/// Needs the resolved parameter list. Named arguments bind by their written
/// name; positional arguments need at least as many parameters as arguments.
/// Indexer arguments never bind.
pub fn corresponding_parameter(
    tree: &SyntaxTree,
    model: &dyn SemanticModel,
    argument: NodeId,
) -> Option<ParameterInfo> {
    bind_parameter(tree, model, argument, true)
}

/// Like [`corresponding_parameter`], but a positional argument binds to the
/// parameter at its position whenever one exists. Leading parameters of a
/// `params` overload such as `Format(format, params args)` still bind when
/// more arguments than parameters are passed.
pub fn leading_parameter(
    tree: &SyntaxTree,
    model: &dyn SemanticModel,
    argument: NodeId,
) -> Option<ParameterInfo> {
    bind_parameter(tree, model, argument, false)
}

fn bind_parameter(
    tree: &SyntaxTree,
    model: &dyn SemanticModel,
    argument: NodeId,
    exact_arity: bool,
) -> Option<ParameterInfo> {
    let written = match tree.kind(argument)? {
        NodeKind::Argument { name, .. } | NodeKind::AttributeArgument { name, .. } => {
            name.as_deref()
        }
        _ => return None,
    };
    let list = tree.parent(argument)?;
    let arguments = match tree.kind(list)? {
        NodeKind::ArgumentList { arguments } | NodeKind::AttributeArgumentList { arguments } => {
            arguments
        }
        _ => return None,
    };
    let symbol = called_method(tree, model, argument)?;
    let parameters = model.method_parameters(symbol)?;

    if let Some(name) = written {
        return parameters.iter().find(|p| p.name == name).cloned();
    }

    if exact_arity && arguments.len() > parameters.len() {
        return None;
    }
    let position = arguments.iter().position(|a| *a == argument)?;
    parameters.get(position).cloned()
}

/// Whether `node` is passed straight into a parameter whose name is on the
/// whitelist (case-insensitive).
pub fn is_whitelisted_parameter(
    tree: &SyntaxTree,
    model: &dyn SemanticModel,
    node: NodeId,
    whitelist: &[String],
) -> bool {
    enclosing_argument(tree, node)
        .and_then(|argument| corresponding_parameter(tree, model, argument))
        .is_some_and(|parameter| {
            whitelist
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(&parameter.name))
        })
}

/// Whether `node` is an indexer argument (`items[18]`).
pub fn is_array_index_argument(tree: &SyntaxTree, node: NodeId) -> bool {
    enclosing_argument(tree, node)
        .and_then(|argument| tree.parent_kind(argument))
        .is_some_and(|list| matches!(list, NodeKind::BracketedArgumentList { .. }))
}
