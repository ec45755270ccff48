//! Arena-backed syntax tree with parent links

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::node::{NodeId, NodeKind, SyntaxKind};
use super::span::Span;

/// Structural problems found while assembling a tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("syntax tree has no nodes")]
    Empty,

    #[error("root {0} is out of range")]
    MissingRoot(NodeId),

    #[error("node {parent} refers to missing child {child}")]
    DanglingChild { parent: NodeId, child: NodeId },

    #[error("node {child} is claimed by both {first} and {second}")]
    SharedChild {
        child: NodeId,
        first: NodeId,
        second: NodeId,
    },

    #[error("root {0} cannot be a child of another node")]
    RootHasParent(NodeId),

    #[error("node {0} is not reachable from the root")]
    Unreachable(NodeId),

    #[error("span of node {node} ({span}) lies outside its parent {parent} ({parent_span})")]
    SpanOutsideParent {
        node: NodeId,
        span: Span,
        parent: NodeId,
        parent_span: Span,
    },

    #[error("node {0} has no children to derive a span from")]
    NoSpan(NodeId),
}

/// One node as stored in the arena.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxNode {
    kind: NodeKind,
    span: Span,
    parent: Option<NodeId>,
}

impl SyntaxNode {
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn syntax_kind(&self) -> SyntaxKind {
        self.kind.syntax_kind()
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }
}

/// Wire form of a node: span plus the tagged payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeSpec {
    pub span: Span,
    #[serde(flatten)]
    pub kind: NodeKind,
}

/// Wire form of a tree: a flat node list plus the root index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeSpec {
    #[serde(default = "default_root")]
    pub root: NodeId,
    pub nodes: Vec<NodeSpec>,
}

fn default_root() -> NodeId {
    NodeId(0)
}

/// Immutable syntax tree for one source unit.
///
/// Nodes own their children through the arena; parent links are ids and are
/// only used for upward navigation.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "TreeSpec")]
pub struct SyntaxTree {
    root: NodeId,
    nodes: Vec<SyntaxNode>,
}

impl TryFrom<TreeSpec> for SyntaxTree {
    type Error = TreeError;

    fn try_from(spec: TreeSpec) -> Result<Self, Self::Error> {
        SyntaxTree::from_nodes(spec.root, spec.nodes)
    }
}

impl SyntaxTree {
    /// Assemble and validate a tree from a flat node list.
    pub fn from_nodes(root: NodeId, specs: Vec<NodeSpec>) -> Result<Self, TreeError> {
        if specs.is_empty() {
            return Err(TreeError::Empty);
        }
        if root.index() >= specs.len() {
            return Err(TreeError::MissingRoot(root));
        }

        let mut parents: Vec<Option<NodeId>> = vec![None; specs.len()];
        for (index, spec) in specs.iter().enumerate() {
            let parent = NodeId(index as u32);
            for child in spec.kind.children() {
                if child.index() >= specs.len() {
                    return Err(TreeError::DanglingChild { parent, child });
                }
                if child == root {
                    return Err(TreeError::RootHasParent(root));
                }
                if let Some(first) = parents[child.index()] {
                    return Err(TreeError::SharedChild {
                        child,
                        first,
                        second: parent,
                    });
                }
                parents[child.index()] = Some(parent);
            }
        }

        let nodes: Vec<SyntaxNode> = specs
            .into_iter()
            .zip(parents)
            .map(|(spec, parent)| SyntaxNode {
                kind: spec.kind,
                span: spec.span,
                parent,
            })
            .collect();

        let tree = Self { root, nodes };
        tree.validate()?;
        Ok(tree)
    }

    fn validate(&self) -> Result<(), TreeError> {
        let mut seen = vec![false; self.nodes.len()];
        for id in self.preorder(self.root) {
            seen[id.index()] = true;
        }
        if let Some(index) = seen.iter().position(|visited| !visited) {
            return Err(TreeError::Unreachable(NodeId(index as u32)));
        }

        for (index, node) in self.nodes.iter().enumerate() {
            if let Some(parent) = node.parent {
                let parent_span = self.nodes[parent.index()].span;
                if !parent_span.contains(&node.span) {
                    return Err(TreeError::SpanOutsideParent {
                        node: NodeId(index as u32),
                        span: node.span,
                        parent,
                        parent_span,
                    });
                }
            }
        }
        Ok(())
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: NodeId) -> Option<&SyntaxNode> {
        self.nodes.get(id.index())
    }

    pub fn kind(&self, id: NodeId) -> Option<&NodeKind> {
        self.get(id).map(SyntaxNode::kind)
    }

    pub fn span(&self, id: NodeId) -> Option<Span> {
        self.get(id).map(SyntaxNode::span)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(SyntaxNode::parent)
    }

    pub fn parent_kind(&self, id: NodeId) -> Option<&NodeKind> {
        self.parent(id).and_then(|parent| self.kind(parent))
    }

    /// Ancestors from the direct parent up to the root.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |current| self.parent(*current))
    }

    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.kind(id).map(NodeKind::children).unwrap_or_default()
    }

    /// Pre-order walk starting at (and including) `id`, siblings in source order.
    pub fn preorder(&self, id: NodeId) -> Preorder<'_> {
        let stack = if self.get(id).is_some() {
            vec![id]
        } else {
            Vec::new()
        };
        Preorder { tree: self, stack }
    }
}

/// Iterator returned by [`SyntaxTree::preorder`].
pub struct Preorder<'a> {
    tree: &'a SyntaxTree,
    stack: Vec<NodeId>,
}

impl Iterator for Preorder<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        // Children are validated to exist, but a malformed id must not loop.
        let children = self.tree.children(id);
        self.stack.extend(
            children
                .into_iter()
                .rev()
                .filter(|child| child.index() < self.tree.nodes.len()),
        );
        Some(id)
    }
}

/// Bottom-up tree construction for hosts and tests.
///
/// Children are pushed before their parents; [`TreeBuilder::wrap`] derives a
/// parent's span from its children.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    nodes: Vec<NodeSpec>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a node with an explicit span.
    pub fn push(&mut self, kind: NodeKind, span: Span) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(NodeSpec { span, kind });
        id
    }

    /// Push a node whose span is the union of its children's spans.
    pub fn wrap(&mut self, kind: NodeKind) -> Result<NodeId, TreeError> {
        let next = NodeId(self.nodes.len() as u32);
        let span = kind
            .children()
            .iter()
            .filter_map(|child| self.nodes.get(child.index()).map(|n| n.span))
            .reduce(|acc, span| acc.union(&span))
            .ok_or(TreeError::NoSpan(next))?;
        Ok(self.push(kind, span))
    }

    pub fn span(&self, id: NodeId) -> Option<Span> {
        self.nodes.get(id.index()).map(|n| n.span)
    }

    pub fn finish(self, root: NodeId) -> Result<SyntaxTree, TreeError> {
        SyntaxTree::from_nodes(root, self.nodes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::node::LiteralKind;

    fn string(text: &str) -> NodeKind {
        NodeKind::Literal {
            literal: LiteralKind::String,
            text: text.to_string(),
        }
    }

    fn small_tree() -> (SyntaxTree, NodeId, NodeId, NodeId) {
        let mut b = TreeBuilder::new();
        let left = b.push(string("a"), Span::at(1, 1, 3));
        let right = b.push(string("b"), Span::at(1, 7, 3));
        let add = b
            .wrap(NodeKind::Binary {
                op: crate::syntax::BinaryOp::Add,
                left,
                right,
            })
            .unwrap();
        let tree = b.finish(add).unwrap();
        (tree, add, left, right)
    }

    #[test]
    fn test_parent_links() {
        let (tree, add, left, right) = small_tree();
        assert_eq!(tree.parent(left), Some(add));
        assert_eq!(tree.parent(right), Some(add));
        assert_eq!(tree.parent(add), None);
        assert_eq!(tree.ancestors(left).collect::<Vec<_>>(), vec![add]);
    }

    #[test]
    fn test_preorder_follows_source_order() {
        let (tree, add, left, right) = small_tree();
        assert_eq!(
            tree.preorder(tree.root()).collect::<Vec<_>>(),
            vec![add, left, right]
        );
    }

    #[test]
    fn test_wrap_derives_span() {
        let (tree, add, _, _) = small_tree();
        assert_eq!(tree.span(add), Some(Span::at(1, 1, 9)));
    }

    #[test]
    fn test_rejects_shared_child() {
        let mut b = TreeBuilder::new();
        let leaf = b.push(string("x"), Span::at(1, 1, 1));
        let first = b.push(
            NodeKind::Parenthesized { expression: leaf },
            Span::at(1, 1, 5),
        );
        let second = b.push(
            NodeKind::Parenthesized { expression: leaf },
            Span::at(1, 1, 5),
        );
        let root = b.push(
            NodeKind::Other {
                label: "pair".to_string(),
                children: vec![first, second],
            },
            Span::at(1, 1, 10),
        );
        assert_eq!(
            b.finish(root).unwrap_err(),
            TreeError::SharedChild {
                child: leaf,
                first,
                second
            }
        );
    }

    #[test]
    fn test_rejects_dangling_child() {
        let mut b = TreeBuilder::new();
        let root = b.push(
            NodeKind::Parenthesized {
                expression: NodeId(7),
            },
            Span::at(1, 1, 3),
        );
        assert!(matches!(
            b.finish(root),
            Err(TreeError::DanglingChild { .. })
        ));
    }

    #[test]
    fn test_rejects_unreachable_node() {
        let mut b = TreeBuilder::new();
        let orphan = b.push(string("lost"), Span::at(2, 1, 6));
        let root = b.push(string("root"), Span::at(1, 1, 6));
        assert_eq!(b.finish(root).unwrap_err(), TreeError::Unreachable(orphan));
    }

    #[test]
    fn test_rejects_span_outside_parent() {
        let mut b = TreeBuilder::new();
        let leaf = b.push(string("x"), Span::at(5, 1, 3));
        let root = b.push(
            NodeKind::Parenthesized { expression: leaf },
            Span::at(1, 1, 3),
        );
        assert!(matches!(
            b.finish(root),
            Err(TreeError::SpanOutsideParent { .. })
        ));
    }

    #[test]
    fn test_rejects_empty() {
        assert_eq!(
            SyntaxTree::from_nodes(NodeId(0), Vec::new()).unwrap_err(),
            TreeError::Empty
        );
    }

    #[test]
    fn test_deserialize_flat_tree() {
        let json = r#"{
            "nodes": [
                {"kind": "Parenthesized", "expression": 1,
                 "span": {"start": {"line": 1, "column": 1}, "end": {"line": 1, "column": 9}}},
                {"kind": "Literal", "literal": "String", "text": "hello",
                 "span": {"start": {"line": 1, "column": 2}, "end": {"line": 1, "column": 9}}}
            ]
        }"#;
        let tree: SyntaxTree = serde_json::from_str(json).unwrap();
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.parent(NodeId(1)), Some(NodeId(0)));
    }

    #[test]
    fn test_deserialize_reports_structural_error() {
        let json = r#"{"nodes": []}"#;
        let err = serde_json::from_str::<SyntaxTree>(json).unwrap_err();
        assert!(err.to_string().contains("no nodes"));
    }
}
