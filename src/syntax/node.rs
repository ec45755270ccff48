//! Node payloads of the C# syntax model
//!
//! Every payload refers to its children by [`NodeId`]; the owning
//! [`SyntaxTree`](super::SyntaxTree) resolves those ids and keeps the parent
//! links. Field names follow the shape the front-end emits.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::span::Span;

/// Index of a node inside its tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Literal token categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LiteralKind {
    String,
    Char,
    Numeric,
    True,
    False,
    Null,
}

/// Binary operators the rules care about; everything else is `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Coalesce,
    Other,
}

/// Payload-free node kind, used to subscribe rules to nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SyntaxKind {
    CompilationUnit,
    Namespace,
    ClassDecl,
    InterfaceDecl,
    MethodDecl,
    Parameter,
    PropertyDecl,
    FieldDecl,
    TypeName,
    Block,
    Return,
    ExpressionStatement,
    LocalDeclaration,
    Literal,
    InterpolatedString,
    InterpolatedText,
    Interpolation,
    Parenthesized,
    Binary,
    Assignment,
    Conditional,
    Invocation,
    MemberAccess,
    ElementAccess,
    Identifier,
    ObjectCreation,
    ArrayCreation,
    Initializer,
    ArgumentList,
    BracketedArgumentList,
    Argument,
    Attribute,
    AttributeArgumentList,
    AttributeArgument,
    Lambda,
    Other,
}

/// Typed payload of a syntax node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum NodeKind {
    CompilationUnit {
        #[serde(default)]
        members: Vec<NodeId>,
    },
    Namespace {
        name: String,
        #[serde(default)]
        members: Vec<NodeId>,
    },
    ClassDecl {
        name: String,
        /// Base list exactly as written (`DbMigration`, `System.Web.Mvc.Controller`).
        #[serde(default)]
        base_types: Vec<String>,
        #[serde(default)]
        attributes: Vec<NodeId>,
        #[serde(default)]
        members: Vec<NodeId>,
    },
    InterfaceDecl {
        name: String,
        #[serde(default)]
        members: Vec<NodeId>,
    },
    MethodDecl {
        name: String,
        #[serde(default)]
        modifiers: Vec<String>,
        return_type: NodeId,
        #[serde(default)]
        parameters: Vec<NodeId>,
        #[serde(default)]
        attributes: Vec<NodeId>,
        body: Option<NodeId>,
        expression_body: Option<NodeId>,
        /// Span of the method name token.
        identifier: Option<Span>,
    },
    Parameter {
        name: String,
        type_name: String,
        #[serde(default)]
        attributes: Vec<NodeId>,
        default: Option<NodeId>,
    },
    PropertyDecl {
        name: String,
        type_name: String,
        #[serde(default)]
        attributes: Vec<NodeId>,
        initializer: Option<NodeId>,
    },
    FieldDecl {
        name: String,
        type_name: String,
        #[serde(default)]
        modifiers: Vec<String>,
        #[serde(default)]
        attributes: Vec<NodeId>,
        initializer: Option<NodeId>,
    },
    TypeName {
        name: String,
    },
    Block {
        #[serde(default)]
        statements: Vec<NodeId>,
    },
    Return {
        expression: Option<NodeId>,
    },
    ExpressionStatement {
        expression: NodeId,
    },
    LocalDeclaration {
        name: String,
        type_name: Option<String>,
        initializer: Option<NodeId>,
    },
    Literal {
        literal: LiteralKind,
        /// Unescaped value for strings and chars, token text otherwise.
        text: String,
    },
    InterpolatedString {
        #[serde(default)]
        contents: Vec<NodeId>,
    },
    InterpolatedText {
        text: String,
    },
    Interpolation {
        expression: NodeId,
    },
    Parenthesized {
        expression: NodeId,
    },
    Binary {
        op: BinaryOp,
        left: NodeId,
        right: NodeId,
    },
    Assignment {
        left: NodeId,
        right: NodeId,
    },
    Conditional {
        condition: NodeId,
        when_true: NodeId,
        when_false: NodeId,
    },
    Invocation {
        callee: NodeId,
        arguments: NodeId,
    },
    MemberAccess {
        target: NodeId,
        name: String,
    },
    ElementAccess {
        target: NodeId,
        arguments: NodeId,
    },
    Identifier {
        name: String,
    },
    ObjectCreation {
        type_name: String,
        arguments: Option<NodeId>,
        initializer: Option<NodeId>,
    },
    ArrayCreation {
        type_name: String,
        initializer: Option<NodeId>,
    },
    Initializer {
        #[serde(default)]
        expressions: Vec<NodeId>,
    },
    ArgumentList {
        #[serde(default)]
        arguments: Vec<NodeId>,
    },
    BracketedArgumentList {
        #[serde(default)]
        arguments: Vec<NodeId>,
    },
    Argument {
        name: Option<String>,
        expression: NodeId,
    },
    Attribute {
        name: String,
        arguments: Option<NodeId>,
    },
    AttributeArgumentList {
        #[serde(default)]
        arguments: Vec<NodeId>,
    },
    AttributeArgument {
        name: Option<String>,
        expression: NodeId,
    },
    Lambda {
        #[serde(default)]
        parameters: Vec<String>,
        body: NodeId,
    },
    /// Anything the model does not distinguish; children are still walked.
    Other {
        label: String,
        #[serde(default)]
        children: Vec<NodeId>,
    },
}

impl NodeKind {
    pub fn syntax_kind(&self) -> SyntaxKind {
        match self {
            NodeKind::CompilationUnit { .. } => SyntaxKind::CompilationUnit,
            NodeKind::Namespace { .. } => SyntaxKind::Namespace,
            NodeKind::ClassDecl { .. } => SyntaxKind::ClassDecl,
            NodeKind::InterfaceDecl { .. } => SyntaxKind::InterfaceDecl,
            NodeKind::MethodDecl { .. } => SyntaxKind::MethodDecl,
            NodeKind::Parameter { .. } => SyntaxKind::Parameter,
            NodeKind::PropertyDecl { .. } => SyntaxKind::PropertyDecl,
            NodeKind::FieldDecl { .. } => SyntaxKind::FieldDecl,
            NodeKind::TypeName { .. } => SyntaxKind::TypeName,
            NodeKind::Block { .. } => SyntaxKind::Block,
            NodeKind::Return { .. } => SyntaxKind::Return,
            NodeKind::ExpressionStatement { .. } => SyntaxKind::ExpressionStatement,
            NodeKind::LocalDeclaration { .. } => SyntaxKind::LocalDeclaration,
            NodeKind::Literal { .. } => SyntaxKind::Literal,
            NodeKind::InterpolatedString { .. } => SyntaxKind::InterpolatedString,
            NodeKind::InterpolatedText { .. } => SyntaxKind::InterpolatedText,
            NodeKind::Interpolation { .. } => SyntaxKind::Interpolation,
            NodeKind::Parenthesized { .. } => SyntaxKind::Parenthesized,
            NodeKind::Binary { .. } => SyntaxKind::Binary,
            NodeKind::Assignment { .. } => SyntaxKind::Assignment,
            NodeKind::Conditional { .. } => SyntaxKind::Conditional,
            NodeKind::Invocation { .. } => SyntaxKind::Invocation,
            NodeKind::MemberAccess { .. } => SyntaxKind::MemberAccess,
            NodeKind::ElementAccess { .. } => SyntaxKind::ElementAccess,
            NodeKind::Identifier { .. } => SyntaxKind::Identifier,
            NodeKind::ObjectCreation { .. } => SyntaxKind::ObjectCreation,
            NodeKind::ArrayCreation { .. } => SyntaxKind::ArrayCreation,
            NodeKind::Initializer { .. } => SyntaxKind::Initializer,
            NodeKind::ArgumentList { .. } => SyntaxKind::ArgumentList,
            NodeKind::BracketedArgumentList { .. } => SyntaxKind::BracketedArgumentList,
            NodeKind::Argument { .. } => SyntaxKind::Argument,
            NodeKind::Attribute { .. } => SyntaxKind::Attribute,
            NodeKind::AttributeArgumentList { .. } => SyntaxKind::AttributeArgumentList,
            NodeKind::AttributeArgument { .. } => SyntaxKind::AttributeArgument,
            NodeKind::Lambda { .. } => SyntaxKind::Lambda,
            NodeKind::Other { .. } => SyntaxKind::Other,
        }
    }

    /// Child ids in source order.
    pub fn children(&self) -> Vec<NodeId> {
        fn chain(parts: &[&[NodeId]], optional: &[Option<NodeId>]) -> Vec<NodeId> {
            let mut out: Vec<NodeId> = parts.iter().flat_map(|p| p.iter().copied()).collect();
            out.extend(optional.iter().flatten().copied());
            out
        }

        match self {
            NodeKind::CompilationUnit { members }
            | NodeKind::Namespace { members, .. }
            | NodeKind::InterfaceDecl { members, .. } => members.clone(),
            NodeKind::ClassDecl {
                attributes,
                members,
                ..
            } => chain(&[attributes.as_slice(), members.as_slice()], &[]),
            NodeKind::MethodDecl {
                return_type,
                parameters,
                attributes,
                body,
                expression_body,
                ..
            } => {
                let mut out = attributes.clone();
                out.push(*return_type);
                out.extend(parameters.iter().copied());
                out.extend(body.iter().chain(expression_body.iter()).copied());
                out
            }
            NodeKind::Parameter {
                attributes,
                default,
                ..
            } => chain(&[attributes.as_slice()], &[*default]),
            NodeKind::PropertyDecl {
                attributes,
                initializer,
                ..
            }
            | NodeKind::FieldDecl {
                attributes,
                initializer,
                ..
            } => chain(&[attributes.as_slice()], &[*initializer]),
            NodeKind::Block { statements } => statements.clone(),
            NodeKind::Return { expression } => expression.iter().copied().collect(),
            NodeKind::LocalDeclaration { initializer, .. } => {
                initializer.iter().copied().collect()
            }
            NodeKind::ExpressionStatement { expression }
            | NodeKind::Interpolation { expression }
            | NodeKind::Parenthesized { expression }
            | NodeKind::Argument { expression, .. }
            | NodeKind::AttributeArgument { expression, .. } => vec![*expression],
            NodeKind::InterpolatedString { contents } => contents.clone(),
            NodeKind::Binary { left, right, .. } | NodeKind::Assignment { left, right } => {
                vec![*left, *right]
            }
            NodeKind::Conditional {
                condition,
                when_true,
                when_false,
            } => vec![*condition, *when_true, *when_false],
            NodeKind::Invocation { callee, arguments } => vec![*callee, *arguments],
            NodeKind::MemberAccess { target, .. } => vec![*target],
            NodeKind::ElementAccess { target, arguments } => vec![*target, *arguments],
            NodeKind::ObjectCreation {
                arguments,
                initializer,
                ..
            } => chain(&[], &[*arguments, *initializer]),
            NodeKind::ArrayCreation { initializer, .. } => initializer.iter().copied().collect(),
            NodeKind::Initializer { expressions } => expressions.clone(),
            NodeKind::ArgumentList { arguments }
            | NodeKind::BracketedArgumentList { arguments }
            | NodeKind::AttributeArgumentList { arguments } => arguments.clone(),
            NodeKind::Attribute { arguments, .. } => arguments.iter().copied().collect(),
            NodeKind::Lambda { body, .. } => vec![*body],
            NodeKind::Other { children, .. } => children.clone(),
            NodeKind::TypeName { .. }
            | NodeKind::Literal { .. }
            | NodeKind::InterpolatedText { .. }
            | NodeKind::Identifier { .. } => Vec::new(),
        }
    }
}
