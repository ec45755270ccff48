//! Syntax model - the immutable C# tree handed over by the front-end

pub mod node;
pub mod span;
pub mod tree;

pub use node::{BinaryOp, LiteralKind, NodeId, NodeKind, SyntaxKind};
pub use span::{Position, Span};
pub use tree::{NodeSpec, SyntaxNode, SyntaxTree, TreeBuilder, TreeError, TreeSpec};
