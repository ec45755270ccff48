//! Hardcoded GUID rule

use crate::rules::descriptors::Descriptor;
use crate::rules::engine::{Report, Rule, RuleContext, RuleError};
use crate::rules::helpers::{
    all_containing_classes, argument_expressions, is_of_type, looks_like_primary_key_holder,
};
use crate::rules::results::Severity;
use crate::syntax::{LiteralKind, NodeId, NodeKind, SyntaxKind, SyntaxTree};

pub static DESCRIPTOR: Descriptor = Descriptor {
    id: "HCD002",
    title: "Hardcoded GUID",
    category: "hardcode",
    default_severity: Severity::Warning,
    description: "GUID values built from string literals are usually identifiers copied \
                  from one environment. Load them from configuration or data instead.",
};

const GUID_TYPE: &str = "System.Guid";
const PARSE_METHODS: &[&str] = &["Parse", "ParseExact", "TryParse", "TryParseExact"];
const MESSAGE: &str = "Attempt to create hardcoded Guid value";

/// Flags `new Guid("...")` and `Guid.Parse("...")`.
pub struct GuidRule;

impl GuidRule {
    fn is_guid_parse(&self, invocation: NodeId, ctx: &RuleContext<'_>) -> bool {
        let (Some(called), Some(guid)) = (
            ctx.model.symbol_of(invocation),
            ctx.model.well_known_type(GUID_TYPE),
        ) else {
            return false;
        };
        PARSE_METHODS
            .iter()
            .any(|name| ctx.model.members_named(guid, name).contains(&called))
    }
}

impl Rule for GuidRule {
    fn descriptor(&self) -> &'static Descriptor {
        &DESCRIPTOR
    }

    fn subscriptions(&self) -> &'static [SyntaxKind] {
        &[SyntaxKind::ObjectCreation, SyntaxKind::Invocation]
    }

    fn evaluate(&self, node: NodeId, ctx: &RuleContext<'_>) -> Result<Vec<Report>, RuleError> {
        let hardcoded = match ctx.kind(node)? {
            NodeKind::ObjectCreation { arguments, .. } => {
                is_of_type(ctx.model, node, GUID_TYPE)
                    && (*arguments)
                        .is_some_and(|list| first_argument_is_string_literal(ctx.tree, list))
            }
            NodeKind::Invocation { arguments, .. } => {
                self.is_guid_parse(node, ctx)
                    && first_argument_is_string_literal(ctx.tree, *arguments)
            }
            _ => {
                return Err(RuleError::UnexpectedNode {
                    node,
                    expected: "object creation or invocation",
                })
            }
        };

        if !hardcoded || is_part_of_entity(ctx.tree, node) {
            return Ok(Vec::new());
        }
        Ok(vec![Report::at(node, MESSAGE)])
    }
}

fn first_argument_is_string_literal(tree: &SyntaxTree, list: NodeId) -> bool {
    argument_expressions(tree, list)
        .and_then(|expressions| expressions.first().copied())
        .is_some_and(|first| {
            matches!(
                tree.kind(first),
                Some(NodeKind::Literal {
                    literal: LiteralKind::String,
                    ..
                })
            )
        })
}

/// Entities keep fixed ids for seed data; those are left alone.
fn is_part_of_entity(tree: &SyntaxTree, node: NodeId) -> bool {
    all_containing_classes(tree, node).any(|class| looks_like_primary_key_holder(tree, class))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::testing::{analyze, Ast};
    use crate::semantic::{FactsModel, SymbolId, TypeId};

    const GUID: TypeId = TypeId(1);

    fn guid_model() -> FactsModel {
        FactsModel::new()
            .with_type(GUID, "Guid", None)
            .with_well_known("System.Guid", GUID)
            .with_member(GUID, "Parse", SymbolId(1))
            .with_member(GUID, "ParseExact", SymbolId(2))
            .with_member(GUID, "TryParse", SymbolId(3))
            .with_member(GUID, "TryParseExact", SymbolId(4))
            .with_member(GUID, "NewGuid", SymbolId(5))
    }

    const VALUE: &str = "0f8fad5b-d9cb-469f-a165-70867728950e";

    /// `class <name> { <property>; void M() { var id = <expr>; } }`
    fn in_class(
        ast: &mut Ast,
        class_name: &str,
        property: Option<&str>,
        expression: NodeId,
    ) -> NodeId {
        let local = ast.local("id", expression);
        let body = ast.block(&[local]);
        let void = ast.type_name("void");
        let method = ast.method("Seed", &["public"], void, body);
        let mut members = Vec::new();
        if let Some(name) = property {
            members.push(ast.property(name, "Guid"));
        }
        members.push(method);
        ast.class(class_name, &[], &members)
    }

    #[test]
    fn test_constructor_with_literal() {
        let mut ast = Ast::new();
        let value = ast.string(VALUE);
        let create = ast.new_object("Guid", &[value]);
        let class = in_class(&mut ast, "Defaults", None, create);
        let tree = ast.unit(&[class]);
        let model = guid_model().bind_type(create, GUID);

        let findings = analyze(GuidRule, &tree, &model);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].message, MESSAGE);
        assert_eq!(findings[0].rule_id, "HCD002");
    }

    #[test]
    fn test_constructor_of_other_type() {
        let mut ast = Ast::new();
        let value = ast.string(VALUE);
        let create = ast.new_object("Uri", &[value]);
        let tree = ast.finish(create);
        let model = guid_model().bind_type(create, TypeId(9));

        assert!(analyze(GuidRule, &tree, &model).is_empty());
    }

    #[test]
    fn test_constructor_with_variable() {
        let mut ast = Ast::new();
        let value = ast.ident("text");
        let create = ast.new_object("Guid", &[value]);
        let tree = ast.finish(create);
        let model = guid_model().bind_type(create, GUID);

        assert!(analyze(GuidRule, &tree, &model).is_empty());
    }

    fn parse(method: &str, symbol: SymbolId) -> (SyntaxTree, FactsModel) {
        let mut ast = Ast::new();
        let value = ast.string(VALUE);
        let call = ast.member_call("Guid", method, &[value]);
        let tree = ast.finish(call);
        (tree, guid_model().bind_symbol(call, symbol))
    }

    #[test]
    fn test_every_parse_entry_point() {
        for (method, symbol) in [
            ("Parse", SymbolId(1)),
            ("ParseExact", SymbolId(2)),
            ("TryParse", SymbolId(3)),
            ("TryParseExact", SymbolId(4)),
        ] {
            let (tree, model) = parse(method, symbol);
            assert_eq!(analyze(GuidRule, &tree, &model).len(), 1, "{method}");
        }
    }

    #[test]
    fn test_other_guid_members_ignored() {
        let (tree, model) = parse("NewGuid", SymbolId(5));
        assert!(analyze(GuidRule, &tree, &model).is_empty());
    }

    #[test]
    fn test_unresolved_parse_ignored() {
        let mut ast = Ast::new();
        let value = ast.string(VALUE);
        let call = ast.member_call("Guid", "Parse", &[value]);
        let tree = ast.finish(call);

        assert!(analyze(GuidRule, &tree, &guid_model()).is_empty());
    }

    #[test]
    fn test_entity_classes_ignored() {
        for property in ["Id", "UserKey", "ParentId"] {
            let mut ast = Ast::new();
            let value = ast.string(VALUE);
            let create = ast.new_object("Guid", &[value]);
            let class = in_class(&mut ast, "User", Some(property), create);
            let tree = ast.unit(&[class]);
            let model = guid_model().bind_type(create, GUID);

            assert!(analyze(GuidRule, &tree, &model).is_empty(), "{property}");
        }
    }

    #[test]
    fn test_non_key_property_does_not_suppress() {
        let mut ast = Ast::new();
        let value = ast.string(VALUE);
        let create = ast.new_object("Guid", &[value]);
        let class = in_class(&mut ast, "Settings", Some("Name"), create);
        let tree = ast.unit(&[class]);
        let model = guid_model().bind_type(create, GUID);

        assert_eq!(analyze(GuidRule, &tree, &model).len(), 1);
    }
}
