//! Exception message logging rule

use crate::config::ExceptionsConfig;
use crate::rules::descriptors::Descriptor;
use crate::rules::engine::{Report, Rule, RuleContext, RuleError};
use crate::rules::helpers::{argument_expressions, is_of_type_or_derived, method_name};
use crate::rules::results::Severity;
use crate::syntax::{NodeId, NodeKind, SyntaxKind};

pub static DESCRIPTOR: Descriptor = Descriptor {
    id: "EXC001",
    title: "Exception message logged without the exception",
    category: "exceptions",
    default_severity: Severity::Warning,
    description: "Logging only exception.Message drops the stack trace, the exception type \
                  and inner exceptions. Pass the exception object to the logger instead.",
};

const EXCEPTION_TYPE: &str = "System.Exception";
const MESSAGE_PROPERTY: &str = "Message";
const MESSAGE: &str =
    "Exception data is swallowed. Consider logging the exception object instead of just exception.Message";

/// Flags `Log.Error(ex.Message)` style calls.
pub struct ExceptionMessageRule {
    log_methods: Vec<String>,
}

impl ExceptionMessageRule {
    pub fn new(config: &ExceptionsConfig) -> Self {
        Self {
            log_methods: config.log_methods.clone(),
        }
    }

    fn is_log_method(&self, name: &str) -> bool {
        self.log_methods.iter().any(|m| m == name)
    }

    /// `<exception>.Message`
    fn is_exception_message(&self, node: NodeId, ctx: &RuleContext<'_>) -> bool {
        match ctx.tree.kind(node) {
            Some(NodeKind::MemberAccess { target, name }) => {
                name == MESSAGE_PROPERTY
                    && is_of_type_or_derived(ctx.model, *target, EXCEPTION_TYPE)
            }
            _ => false,
        }
    }
}

impl Rule for ExceptionMessageRule {
    fn descriptor(&self) -> &'static Descriptor {
        &DESCRIPTOR
    }

    fn subscriptions(&self) -> &'static [SyntaxKind] {
        &[SyntaxKind::Invocation]
    }

    fn evaluate(&self, node: NodeId, ctx: &RuleContext<'_>) -> Result<Vec<Report>, RuleError> {
        let NodeKind::Invocation { arguments, .. } = ctx.kind(node)? else {
            return Err(RuleError::UnexpectedNode {
                node,
                expected: "invocation",
            });
        };

        if !method_name(ctx.tree, node).is_some_and(|name| self.is_log_method(name)) {
            return Ok(Vec::new());
        }

        let expressions =
            argument_expressions(ctx.tree, *arguments).ok_or(RuleError::UnexpectedNode {
                node: *arguments,
                expected: "argument list",
            })?;

        // the exception itself is logged, so nothing is lost
        if expressions
            .iter()
            .any(|e| is_of_type_or_derived(ctx.model, *e, EXCEPTION_TYPE))
        {
            return Ok(Vec::new());
        }

        let message_access = expressions
            .iter()
            .flat_map(|e| ctx.tree.preorder(*e))
            .find(|id| self.is_exception_message(*id, ctx));

        Ok(message_access
            .map(|access| vec![Report::at(access, MESSAGE)])
            .unwrap_or_default())
    }
}
