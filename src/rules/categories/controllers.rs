//! Synchronous controller action rule

use crate::config::ControllersConfig;
use crate::rules::descriptors::Descriptor;
use crate::rules::engine::{Report, Rule, RuleContext, RuleError};
use crate::rules::fold::is_constant;
use crate::rules::helpers::{
    argument_expressions, class_names_to_top, containing_class, is_abstract, is_public,
    is_task_like, method_name,
};
use crate::rules::results::Severity;
use crate::syntax::{NodeId, NodeKind, SyntaxKind, SyntaxTree};

pub static DESCRIPTOR: Descriptor = Descriptor {
    id: "WEB001",
    title: "Synchronous controller action",
    category: "web",
    default_severity: Severity::Warning,
    description: "Controller actions that do real work should be asynchronous so request \
                  threads are not blocked on I/O.",
};

const CONTROLLER_MARKER: &str = "controller";
const VIEW_BAG: &str = "ViewBag";
const DISPOSE: &str = "Dispose";

/// Flags public controller methods that do work but do not return a task.
pub struct SyncControllerRule {
    result_methods: Vec<String>,
}

impl SyncControllerRule {
    pub fn new(config: &ControllersConfig) -> Self {
        Self {
            result_methods: config.result_methods.clone(),
        }
    }

    fn is_controller(&self, class: NodeId, ctx: &RuleContext<'_>) -> bool {
        class_names_to_top(ctx.tree, ctx.model, class)
            .iter()
            .any(|name| name.to_lowercase().contains(CONTROLLER_MARKER))
    }

    /// A body that only sets constants up and hands back a constant view.
    fn is_trivial_method(
        &self,
        tree: &SyntaxTree,
        body: Option<NodeId>,
        expression_body: Option<NodeId>,
    ) -> bool {
        if let Some(expression) = expression_body {
            return self.is_trivial_expression(tree, expression);
        }
        match body {
            Some(block) => self.is_trivial_body(tree, block),
            None => true,
        }
    }

    fn is_trivial_body(&self, tree: &SyntaxTree, block: NodeId) -> bool {
        let Some(NodeKind::Block { statements }) = tree.kind(block) else {
            return false;
        };
        for statement in statements {
            match tree.kind(*statement) {
                Some(NodeKind::Return {
                    expression: Some(expression),
                }) => return self.is_trivial_expression(tree, *expression),
                Some(NodeKind::ExpressionStatement { expression })
                    if self.is_trivial_expression(tree, *expression) => {}
                _ => return false,
            }
        }
        true
    }

    fn is_trivial_expression(&self, tree: &SyntaxTree, expression: NodeId) -> bool {
        match tree.kind(expression) {
            Some(NodeKind::Assignment { left, right }) => {
                self.is_trivial_expression(tree, *left) && self.is_trivial_expression(tree, *right)
            }
            Some(NodeKind::ArrayCreation { initializer, .. }) => {
                (*initializer).is_some_and(|init| is_constant(tree, init))
            }
            Some(NodeKind::MemberAccess { target, .. }) if is_view_bag(tree, *target) => true,
            Some(NodeKind::Conditional {
                condition,
                when_true,
                when_false,
            }) => {
                self.is_trivial_expression(tree, *condition)
                    && self.is_trivial_expression(tree, *when_true)
                    && self.is_trivial_expression(tree, *when_false)
            }
            _ => is_constant(tree, expression) || self.is_constant_result(tree, expression),
        }
    }

    /// `View()`, `PartialView("Name", 1)` and the like.
    fn is_constant_result(&self, tree: &SyntaxTree, expression: NodeId) -> bool {
        let Some(NodeKind::Invocation { arguments, .. }) = tree.kind(expression) else {
            return false;
        };
        let is_result_method = method_name(tree, expression)
            .is_some_and(|name| self.result_methods.iter().any(|m| m == name));
        is_result_method
            && argument_expressions(tree, *arguments).is_some_and(|expressions| {
                expressions
                    .iter()
                    .all(|e| self.is_trivial_expression(tree, *e))
            })
    }
}

fn is_view_bag(tree: &SyntaxTree, target: NodeId) -> bool {
    matches!(tree.kind(target), Some(NodeKind::Identifier { name }) if name == VIEW_BAG)
}

impl Rule for SyncControllerRule {
    fn descriptor(&self) -> &'static Descriptor {
        &DESCRIPTOR
    }

    fn subscriptions(&self) -> &'static [SyntaxKind] {
        &[SyntaxKind::MethodDecl]
    }

    fn evaluate(&self, node: NodeId, ctx: &RuleContext<'_>) -> Result<Vec<Report>, RuleError> {
        let NodeKind::MethodDecl {
            name,
            return_type,
            body,
            expression_body,
            identifier,
            ..
        } = ctx.kind(node)?
        else {
            return Err(RuleError::UnexpectedNode {
                node,
                expected: "method declaration",
            });
        };

        if name == DISPOSE {
            return Ok(Vec::new());
        }
        let Some(class) = containing_class(ctx.tree, node) else {
            return Ok(Vec::new());
        };
        let Some(NodeKind::ClassDecl {
            name: class_name, ..
        }) = ctx.tree.kind(class)
        else {
            return Ok(Vec::new());
        };

        let synchronous_action = self.is_controller(class, ctx)
            && is_public(ctx.tree, node)
            && !is_abstract(ctx.tree, node)
            && !is_task_like(ctx.tree, ctx.model, *return_type)
            && !self.is_trivial_method(ctx.tree, *body, *expression_body);
        if !synchronous_action {
            return Ok(Vec::new());
        }

        let mut report = Report::at(
            node,
            format!(
                "Controller method {class_name}.{name} is synchronous. Consider making it asynchronous"
            ),
        );
        if let Some(span) = identifier {
            report = report.with_span(*span);
        }
        Ok(vec![report])
    }
}
