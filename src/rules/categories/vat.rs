//! Hardcoded VAT rule

use rust_decimal::Decimal;

use crate::config::VatConfig;
use crate::rules::descriptors::Descriptor;
use crate::rules::engine::{Report, Rule, RuleContext, RuleError};
use crate::rules::fold::parse_numeric;
use crate::rules::helpers::{
    all_containing_classes, is_array_index_argument, is_whitelisted_parameter,
    looks_like_migration,
};
use crate::rules::results::Severity;
use crate::syntax::{LiteralKind, NodeId, NodeKind, SyntaxKind};

pub static DESCRIPTOR: Descriptor = Descriptor {
    id: "HCD004",
    title: "Hardcoded VAT rate",
    category: "hardcode",
    default_severity: Severity::Warning,
    description: "Numbers derived from the VAT rate change when the rate does. Keep the rate \
                  in one configurable place.",
};

/// Flags numeric literals equal to the VAT rate or a value derived from it.
pub struct VatRule {
    /// rate, 100 - rate, 100 + rate, 1 - rate/100, 1 + rate/100
    suspicious: Vec<Decimal>,
    parameter_whitelist: Vec<String>,
}

impl VatRule {
    pub fn new(config: &VatConfig) -> Self {
        let rate = config.rate;
        let hundred = Decimal::ONE_HUNDRED;
        let fraction = rate / hundred;
        Self {
            suspicious: vec![
                rate,
                hundred - rate,
                hundred + rate,
                Decimal::ONE - fraction,
                Decimal::ONE + fraction,
            ],
            parameter_whitelist: config.parameter_whitelist.clone(),
        }
    }

    fn is_suppressed(&self, node: NodeId, ctx: &RuleContext<'_>) -> bool {
        all_containing_classes(ctx.tree, node).any(|class| looks_like_migration(ctx.tree, class))
            || is_whitelisted_parameter(ctx.tree, ctx.model, node, &self.parameter_whitelist)
            || is_array_index_argument(ctx.tree, node)
    }
}

impl Rule for VatRule {
    fn descriptor(&self) -> &'static Descriptor {
        &DESCRIPTOR
    }

    fn subscriptions(&self) -> &'static [SyntaxKind] {
        &[SyntaxKind::Literal]
    }

    fn evaluate(&self, node: NodeId, ctx: &RuleContext<'_>) -> Result<Vec<Report>, RuleError> {
        let NodeKind::Literal { literal, text } = ctx.kind(node)? else {
            return Err(RuleError::UnexpectedNode {
                node,
                expected: "literal",
            });
        };
        if *literal != LiteralKind::Numeric {
            return Ok(Vec::new());
        }

        // hex overflow and the like are simply not VAT
        let Some(value) = parse_numeric(text) else {
            return Ok(Vec::new());
        };
        if !self.suspicious.contains(&value) || self.is_suppressed(node, ctx) {
            return Ok(Vec::new());
        }

        Ok(vec![Report::at(
            node,
            format!("This constant {value} could be hardcoded VAT value."),
        )])
    }
}
