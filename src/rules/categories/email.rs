//! Hardcoded email rule

use crate::config::EmailConfig;
use crate::rules::descriptors::Descriptor;
use crate::rules::engine::{Report, Rule, RuleContext, RuleError};
use crate::rules::fold::is_constant;
use crate::rules::helpers::{
    called_method, containing_class, enclosing_argument, is_whitelisted_parameter,
    leading_parameter, looks_like_migration,
};
use crate::rules::results::Severity;
use crate::syntax::{BinaryOp, LiteralKind, NodeId, NodeKind, SyntaxKind, SyntaxTree};

pub static DESCRIPTOR: Descriptor = Descriptor {
    id: "HCD001",
    title: "Hardcoded email",
    category: "hardcode",
    default_severity: Severity::Warning,
    description: "Email addresses belong in configuration, not in source code.",
};

const STRING_TYPE: &str = "System.String";
const FORMAT_METHOD: &str = "Format";
const FORMAT_PARAMETER: &str = "format";
const CALCULATED: &str = "<calculated string>";

/// Flags string literals and concatenations that look like email addresses.
pub struct EmailRule {
    parameter_whitelist: Vec<String>,
}

impl EmailRule {
    pub fn new(config: &EmailConfig) -> Self {
        Self {
            parameter_whitelist: config.parameter_whitelist.clone(),
        }
    }

    fn check_text(&self, node: NodeId, text: &str, ctx: &RuleContext<'_>) -> Vec<Report> {
        if is_whitelisted_parameter(ctx.tree, ctx.model, node, &self.parameter_whitelist) {
            return Vec::new();
        }
        if !looks_like_email(text) || is_format_template(node, text, ctx) {
            return Vec::new();
        }
        vec![Report::at(node, message(text))]
    }

    fn check_concatenation(
        &self,
        node: NodeId,
        left: NodeId,
        right: NodeId,
        ctx: &RuleContext<'_>,
    ) -> Vec<Report> {
        let in_migration = containing_class(ctx.tree, node)
            .is_some_and(|class| looks_like_migration(ctx.tree, class));
        if in_migration {
            return Vec::new();
        }

        let joins_at_sign = (is_at_sign(ctx.tree, left) && is_constant(ctx.tree, right))
            || (is_at_sign(ctx.tree, right) && is_constant(ctx.tree, left));
        if joins_at_sign {
            vec![Report::at(node, message(CALCULATED))]
        } else {
            Vec::new()
        }
    }
}

impl Rule for EmailRule {
    fn descriptor(&self) -> &'static Descriptor {
        &DESCRIPTOR
    }

    fn subscriptions(&self) -> &'static [SyntaxKind] {
        &[
            SyntaxKind::Literal,
            SyntaxKind::InterpolatedText,
            SyntaxKind::Binary,
        ]
    }

    fn evaluate(&self, node: NodeId, ctx: &RuleContext<'_>) -> Result<Vec<Report>, RuleError> {
        match ctx.kind(node)? {
            NodeKind::Literal {
                literal: LiteralKind::String,
                text,
            }
            | NodeKind::InterpolatedText { text } => Ok(self.check_text(node, text, ctx)),
            NodeKind::Binary {
                op: BinaryOp::Add,
                left,
                right,
            } => Ok(self.check_concatenation(node, *left, *right, ctx)),
            NodeKind::Literal { .. } | NodeKind::Binary { .. } => Ok(Vec::new()),
            _ => Err(RuleError::UnexpectedNode {
                node,
                expected: "string literal or binary expression",
            }),
        }
    }
}

fn message(value: &str) -> String {
    format!("String '{value}' contains hardcoded email")
}

/// An `@` somewhere after the first character.
///
/// `@p1`-style SQL and XSLT parameters start with it and are left alone.
fn looks_like_email(text: &str) -> bool {
    text != "@" && text.contains('@') && text.rfind('@') != Some(0)
}

/// `"@"` or `$"@"`
fn is_at_sign(tree: &SyntaxTree, node: NodeId) -> bool {
    match tree.kind(node) {
        Some(NodeKind::Literal {
            literal: LiteralKind::String,
            text,
        }) => text == "@",
        Some(NodeKind::InterpolatedString { contents }) => match contents.as_slice() {
            [single] => matches!(
                tree.kind(*single),
                Some(NodeKind::InterpolatedText { text }) if text == "@"
            ),
            _ => false,
        },
        _ => false,
    }
}

/// The `format` argument of `string.Format` where every `@` sits between two
/// placeholders (`"{0}@{1}"`).
fn is_format_template(node: NodeId, text: &str, ctx: &RuleContext<'_>) -> bool {
    let Some(argument) = enclosing_argument(ctx.tree, node) else {
        return false;
    };
    let Some(method) = called_method(ctx.tree, ctx.model, argument) else {
        return false;
    };
    let Some(string_type) = ctx.model.well_known_type(STRING_TYPE) else {
        return false;
    };
    if !ctx
        .model
        .members_named(string_type, FORMAT_METHOD)
        .contains(&method)
    {
        return false;
    }

    leading_parameter(ctx.tree, ctx.model, argument)
        .is_some_and(|parameter| parameter.name == FORMAT_PARAMETER)
        && text.matches('@').count() == text.matches("}@{").count()
}
