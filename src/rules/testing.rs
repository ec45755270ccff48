//! Compact tree construction for unit tests
//!
//! Leaves get consecutive single-line spans in creation order and inner nodes
//! take the union of their children, so building in source order yields a
//! valid tree.

use crate::config::Config;
use crate::rules::engine::{Rule, RuleEngine};
use crate::rules::results::Finding;
use crate::semantic::SemanticModel;
use crate::syntax::{BinaryOp, LiteralKind, NodeId, NodeKind, Span, SyntaxTree, TreeBuilder};

/// Run a single rule over `tree` through the full dispatcher.
pub(crate) fn analyze(
    rule: impl Rule + 'static,
    tree: &SyntaxTree,
    model: &dyn SemanticModel,
) -> Vec<Finding> {
    RuleEngine::with_rules(vec![Box::new(rule)], &Config::default())
        .expect("rule registers")
        .analyze_tree("Test.cs", tree, model)
}

pub(crate) struct Ast {
    builder: TreeBuilder,
    column: u32,
}

impl Ast {
    pub fn new() -> Self {
        Self {
            builder: TreeBuilder::new(),
            column: 1,
        }
    }

    fn leaf_span(&mut self, len: u32) -> Span {
        let span = Span::at(1, self.column, len.max(1));
        self.column += len.max(1) + 1;
        span
    }

    pub fn node(&mut self, kind: NodeKind) -> NodeId {
        if kind.children().is_empty() {
            let span = self.leaf_span(4);
            self.builder.push(kind, span)
        } else {
            self.builder.wrap(kind).expect("children exist")
        }
    }

    pub fn span(&self, id: NodeId) -> Span {
        self.builder.span(id).expect("node exists")
    }

    pub fn literal(&mut self, literal: LiteralKind, text: &str) -> NodeId {
        let span = self.leaf_span(text.chars().count() as u32 + 2);
        self.builder.push(
            NodeKind::Literal {
                literal,
                text: text.to_string(),
            },
            span,
        )
    }

    pub fn string(&mut self, text: &str) -> NodeId {
        self.literal(LiteralKind::String, text)
    }

    pub fn number(&mut self, text: &str) -> NodeId {
        self.literal(LiteralKind::Numeric, text)
    }

    pub fn null(&mut self) -> NodeId {
        self.literal(LiteralKind::Null, "null")
    }

    pub fn ident(&mut self, name: &str) -> NodeId {
        self.node(NodeKind::Identifier {
            name: name.to_string(),
        })
    }

    pub fn type_name(&mut self, name: &str) -> NodeId {
        self.node(NodeKind::TypeName {
            name: name.to_string(),
        })
    }

    pub fn member(&mut self, target: NodeId, name: &str) -> NodeId {
        self.node(NodeKind::MemberAccess {
            target,
            name: name.to_string(),
        })
    }

    pub fn add(&mut self, left: NodeId, right: NodeId) -> NodeId {
        self.node(NodeKind::Binary {
            op: BinaryOp::Add,
            left,
            right,
        })
    }

    pub fn interpolated(&mut self, contents: &[NodeId]) -> NodeId {
        self.node(NodeKind::InterpolatedString {
            contents: contents.to_vec(),
        })
    }

    pub fn text(&mut self, text: &str) -> NodeId {
        self.node(NodeKind::InterpolatedText {
            text: text.to_string(),
        })
    }

    pub fn hole(&mut self, expression: NodeId) -> NodeId {
        self.node(NodeKind::Interpolation { expression })
    }

    /// Positional argument list.
    pub fn args(&mut self, expressions: &[NodeId]) -> NodeId {
        let arguments: Vec<NodeId> = expressions
            .iter()
            .map(|&expression| self.node(NodeKind::Argument {
                name: None,
                expression,
            }))
            .collect();
        self.node(NodeKind::ArgumentList { arguments })
    }

    pub fn named_arg(&mut self, name: &str, expression: NodeId) -> NodeId {
        self.node(NodeKind::Argument {
            name: Some(name.to_string()),
            expression,
        })
    }

    pub fn arg_list(&mut self, arguments: &[NodeId]) -> NodeId {
        self.node(NodeKind::ArgumentList {
            arguments: arguments.to_vec(),
        })
    }

    pub fn call(&mut self, callee: NodeId, expressions: &[NodeId]) -> NodeId {
        let arguments = self.args(expressions);
        self.node(NodeKind::Invocation { callee, arguments })
    }

    /// `Method(args)`
    pub fn call_named(&mut self, method: &str, expressions: &[NodeId]) -> NodeId {
        let callee = self.ident(method);
        self.call(callee, expressions)
    }

    /// `Receiver.Method(args)`
    pub fn member_call(&mut self, receiver: &str, method: &str, expressions: &[NodeId]) -> NodeId {
        let target = self.ident(receiver);
        let callee = self.member(target, method);
        self.call(callee, expressions)
    }

    pub fn new_object(&mut self, type_name: &str, expressions: &[NodeId]) -> NodeId {
        let arguments = self.args(expressions);
        self.node(NodeKind::ObjectCreation {
            type_name: type_name.to_string(),
            arguments: Some(arguments),
            initializer: None,
        })
    }

    pub fn index(&mut self, target: NodeId, expressions: &[NodeId]) -> NodeId {
        let arguments: Vec<NodeId> = expressions
            .iter()
            .map(|&expression| self.node(NodeKind::Argument {
                name: None,
                expression,
            }))
            .collect();
        let arguments = self.node(NodeKind::BracketedArgumentList { arguments });
        self.node(NodeKind::ElementAccess { target, arguments })
    }

    pub fn attribute(&mut self, name: &str, expressions: &[NodeId]) -> NodeId {
        let arguments: Vec<NodeId> = expressions
            .iter()
            .map(|&expression| self.node(NodeKind::AttributeArgument {
                name: None,
                expression,
            }))
            .collect();
        let arguments = self.node(NodeKind::AttributeArgumentList { arguments });
        self.node(NodeKind::Attribute {
            name: name.to_string(),
            arguments: Some(arguments),
        })
    }

    pub fn local(&mut self, name: &str, initializer: NodeId) -> NodeId {
        self.node(NodeKind::LocalDeclaration {
            name: name.to_string(),
            type_name: None,
            initializer: Some(initializer),
        })
    }

    pub fn statement(&mut self, expression: NodeId) -> NodeId {
        self.node(NodeKind::ExpressionStatement { expression })
    }

    pub fn ret(&mut self, expression: Option<NodeId>) -> NodeId {
        self.node(NodeKind::Return { expression })
    }

    pub fn block(&mut self, statements: &[NodeId]) -> NodeId {
        self.node(NodeKind::Block {
            statements: statements.to_vec(),
        })
    }

    pub fn method(
        &mut self,
        name: &str,
        modifiers: &[&str],
        return_type: NodeId,
        body: NodeId,
    ) -> NodeId {
        self.node(NodeKind::MethodDecl {
            name: name.to_string(),
            modifiers: modifiers.iter().map(|m| m.to_string()).collect(),
            return_type,
            parameters: Vec::new(),
            attributes: Vec::new(),
            body: Some(body),
            expression_body: None,
            identifier: None,
        })
    }

    pub fn property(&mut self, name: &str, type_name: &str) -> NodeId {
        self.node(NodeKind::PropertyDecl {
            name: name.to_string(),
            type_name: type_name.to_string(),
            attributes: Vec::new(),
            initializer: None,
        })
    }

    pub fn class(&mut self, name: &str, base_types: &[&str], members: &[NodeId]) -> NodeId {
        self.node(NodeKind::ClassDecl {
            name: name.to_string(),
            base_types: base_types.iter().map(|b| b.to_string()).collect(),
            attributes: Vec::new(),
            members: members.to_vec(),
        })
    }

    pub fn finish(self, root: NodeId) -> SyntaxTree {
        self.builder.finish(root).expect("valid tree")
    }

    /// Wrap `members` in a compilation unit and finish.
    pub fn unit(mut self, members: &[NodeId]) -> SyntaxTree {
        let root = self.node(NodeKind::CompilationUnit {
            members: members.to_vec(),
        });
        self.finish(root)
    }
}
