//! Rules evaluation engine
//!
//! The engine walks each tree once, pre-order, and offers every node to the
//! rules subscribed to its kind. Each (node, rule) call runs inside a failure
//! boundary: an `Err`, a panic or a report that does not point into the tree
//! becomes a single rule-failed finding and the pass carries on.

use rayon::prelude::*;
use std::any::Any;
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use thiserror::Error;
use tracing::{debug, info, info_span, warn};

use super::categories;
use super::descriptors::{Descriptor, DescriptorRegistry, RULE_FAILED};
use super::results::{AnalysisResults, Finding, Location, Severity};
use crate::config::Config;
use crate::error::EngineError;
use crate::scanner::SourceUnit;
use crate::semantic::SemanticModel;
use crate::syntax::{NodeId, NodeKind, Span, SyntaxKind, SyntaxTree};

/// Why a rule could not finish evaluating a node.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    #[error("node {0} does not exist")]
    MissingNode(NodeId),

    #[error("expected {expected} at node {node}")]
    UnexpectedNode { node: NodeId, expected: &'static str },

    #[error("reported span {span} lies outside node {node}")]
    SpanOutsideNode { node: NodeId, span: Span },

    #[error("{0}")]
    Failed(String),
}

/// What a rule sees while evaluating one node.
#[derive(Clone, Copy)]
pub struct RuleContext<'a> {
    pub tree: &'a SyntaxTree,
    pub model: &'a dyn SemanticModel,
}

impl<'a> RuleContext<'a> {
    pub fn new(tree: &'a SyntaxTree, model: &'a dyn SemanticModel) -> Self {
        Self { tree, model }
    }

    /// Payload of `node`, or an error the dispatcher will surface.
    pub fn kind(&self, node: NodeId) -> Result<&'a NodeKind, RuleError> {
        self.tree.kind(node).ok_or(RuleError::MissingNode(node))
    }
}

/// A finding as produced by a rule, before the dispatcher attaches file,
/// severity and descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub node: NodeId,
    /// Narrower location inside the node, e.g. a method's name token.
    pub span: Option<Span>,
    pub message: String,
}

impl Report {
    pub fn at(node: NodeId, message: impl Into<String>) -> Self {
        Self {
            node,
            span: None,
            message: message.into(),
        }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }
}

/// A heuristic subscribed to one or more node kinds.
///
/// Rules keep no state between calls; settings are fixed when the rule is
/// built.
pub trait Rule: Send + Sync {
    fn descriptor(&self) -> &'static Descriptor;

    /// Node kinds this rule wants to see.
    fn subscriptions(&self) -> &'static [SyntaxKind];

    fn evaluate(&self, node: NodeId, ctx: &RuleContext<'_>) -> Result<Vec<Report>, RuleError>;
}

struct RegisteredRule {
    rule: Box<dyn Rule>,
    severity: Severity,
}

/// Main rules evaluation engine
pub struct RuleEngine {
    rules: Vec<RegisteredRule>,
    routes: HashMap<SyntaxKind, Vec<usize>>,
    registry: DescriptorRegistry,
    only_rules: Option<Vec<String>>,
    skip_rules: Option<Vec<String>>,
}

impl RuleEngine {
    /// Engine with the built-in rules, configured from `config`.
    pub fn new(config: &Config) -> Result<Self, EngineError> {
        Self::with_rules(categories::builtin_rules(config), config)
    }

    /// Engine over an explicit rule set.
    ///
    /// Every rule is registered, even when disabled, so id clashes are caught
    /// regardless of configuration.
    pub fn with_rules(rules: Vec<Box<dyn Rule>>, config: &Config) -> Result<Self, EngineError> {
        let mut registry = DescriptorRegistry::new();
        for rule in &rules {
            registry.register(rule.descriptor())?;
        }

        let mut registered = Vec::new();
        for rule in rules {
            let descriptor = rule.descriptor();
            if !config.is_rule_enabled(descriptor.id) {
                debug!(rule = descriptor.id, "Rule disabled by configuration");
                continue;
            }
            let severity = config
                .rule_severity(descriptor.id)
                .unwrap_or(descriptor.default_severity);
            registered.push(RegisteredRule { rule, severity });
        }

        let mut routes: HashMap<SyntaxKind, Vec<usize>> = HashMap::new();
        for (index, entry) in registered.iter().enumerate() {
            for kind in entry.rule.subscriptions() {
                let slot = routes.entry(*kind).or_default();
                // one call per (node, rule), however often a kind is listed
                if !slot.contains(&index) {
                    slot.push(index);
                }
            }
        }

        Ok(Self {
            rules: registered,
            routes,
            registry,
            only_rules: None,
            skip_rules: None,
        })
    }

    pub fn registry(&self) -> &DescriptorRegistry {
        &self.registry
    }

    /// Set rules to exclusively run
    pub fn set_only_rules(&mut self, rules: Vec<String>) {
        self.only_rules = Some(rules);
    }

    /// Set rules to skip
    pub fn set_skip_rules(&mut self, rules: Vec<String>) {
        self.skip_rules = Some(rules);
    }

    /// Check if a rule should be run
    fn should_run_rule(&self, rule_id: &str) -> bool {
        if let Some(only) = &self.only_rules {
            return only.iter().any(|r| r == rule_id);
        }

        if let Some(skip) = &self.skip_rules {
            return !skip.iter().any(|r| r == rule_id);
        }

        true
    }

    /// Analyze one unit.
    pub fn analyze(&self, unit: &SourceUnit) -> Vec<Finding> {
        self.analyze_tree(&unit.file, &unit.tree, &unit.semantics)
    }

    /// Single pass over one tree; findings come out in traversal order.
    pub fn analyze_tree(
        &self,
        file: &str,
        tree: &SyntaxTree,
        model: &dyn SemanticModel,
    ) -> Vec<Finding> {
        let span = info_span!("unit", file = %file);
        let _guard = span.enter();

        let active: Vec<bool> = self
            .rules
            .iter()
            .map(|entry| self.should_run_rule(entry.rule.descriptor().id))
            .collect();
        let ctx = RuleContext::new(tree, model);
        let mut findings = Vec::new();

        for node in tree.preorder(tree.root()) {
            let Some(kind) = tree.get(node).map(|n| n.syntax_kind()) else {
                continue;
            };
            let Some(subscribers) = self.routes.get(&kind) else {
                continue;
            };
            for &index in subscribers {
                if active[index] {
                    findings.extend(self.invoke(&self.rules[index], node, &ctx, file));
                }
            }
        }

        debug!(findings = findings.len(), "Unit analyzed");
        findings
    }

    /// Analyze units in parallel; results keep the input order.
    pub fn analyze_all(&self, units: &[SourceUnit]) -> AnalysisResults {
        let per_unit: Vec<Vec<Finding>> = units
            .par_iter()
            .map(|unit| self.analyze(unit))
            .collect();

        let mut results = AnalysisResults::new();
        for findings in per_unit {
            results.add_unit(findings);
        }

        info!(
            "Analysis complete: {} units, {} errors, {} warnings",
            results.units_analyzed,
            results.count_by_severity(Severity::Error),
            results.count_by_severity(Severity::Warning),
        );
        results
    }

    fn invoke(
        &self,
        entry: &RegisteredRule,
        node: NodeId,
        ctx: &RuleContext<'_>,
        file: &str,
    ) -> Vec<Finding> {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| entry.rule.evaluate(node, ctx)));

        let failure = match outcome {
            Ok(Ok(reports)) => match self.to_findings(entry, reports, ctx, file) {
                Ok(findings) => return findings,
                Err(e) => e.to_string(),
            },
            Ok(Err(e)) => e.to_string(),
            Err(payload) => panic_message(payload),
        };

        let rule_id = entry.rule.descriptor().id;
        warn!(rule = rule_id, node = %node, error = %failure, "Rule failed");
        vec![rule_failed(rule_id, node, ctx.tree, file, &failure)]
    }

    /// All reports become findings, or the whole call counts as failed.
    fn to_findings(
        &self,
        entry: &RegisteredRule,
        reports: Vec<Report>,
        ctx: &RuleContext<'_>,
        file: &str,
    ) -> Result<Vec<Finding>, RuleError> {
        let descriptor = entry.rule.descriptor();
        reports
            .into_iter()
            .map(|report| {
                let node_span = ctx
                    .tree
                    .span(report.node)
                    .ok_or(RuleError::MissingNode(report.node))?;
                let span = match report.span {
                    Some(span) if node_span.contains(&span) => span,
                    Some(span) => {
                        return Err(RuleError::SpanOutsideNode {
                            node: report.node,
                            span,
                        })
                    }
                    None => node_span,
                };
                Ok(Finding::new(
                    descriptor.id,
                    descriptor.category,
                    entry.severity,
                    report.message,
                )
                .with_location(location(file, span))
                .with_description(descriptor.description))
            })
            .collect()
    }
}

fn location(file: &str, span: Span) -> Location {
    Location::new(file, span.start.line, span.start.column)
}

fn rule_failed(rule_id: &str, node: NodeId, tree: &SyntaxTree, file: &str, detail: &str) -> Finding {
    let mut finding = Finding::new(
        RULE_FAILED.id,
        RULE_FAILED.category,
        RULE_FAILED.default_severity,
        format!("Rule {rule_id} failed: {detail}"),
    )
    .with_description(RULE_FAILED.description);
    if let Some(span) = tree.span(node) {
        finding = finding.with_location(location(file, span));
    }
    finding
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "rule panicked".to_string()
    }
}
